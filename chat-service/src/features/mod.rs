pub mod auth;
pub mod chat;
pub mod gym;
pub mod user;
