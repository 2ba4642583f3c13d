pub mod admin;
pub mod auth;
pub mod earnings;
pub mod events;
pub mod notifications;
pub mod provider;
pub mod requests;
pub mod users;
