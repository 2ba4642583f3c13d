pub mod db;
pub mod earningsdb;
pub mod kycdb;
pub mod notificationdb;
pub mod providerdb;
pub mod requestdb;
pub mod userdb;
