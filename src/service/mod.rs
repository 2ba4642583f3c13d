pub mod error;
pub mod kyc_service;
pub mod notification_service;
pub mod request_service;
