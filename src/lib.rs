pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use error::SessionError;

#[cfg(test)]
pub mod testing;
