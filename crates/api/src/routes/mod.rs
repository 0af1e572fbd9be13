pub mod auth;
pub mod health;
pub mod models;
pub mod notifications;
pub mod users;
