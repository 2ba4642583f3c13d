pub mod fees;
pub mod password;
pub mod token;
pub mod tracking;
