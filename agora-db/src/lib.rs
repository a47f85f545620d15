pub mod aggregate;
pub mod client;
pub mod error;
mod record;
pub mod service;
