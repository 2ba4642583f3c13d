pub mod earningsmodel;
pub mod notificationmodel;
pub mod providermodel;
pub mod requestmodel;
pub mod usermodel;
