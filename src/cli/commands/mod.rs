pub mod auth;
pub mod init;
