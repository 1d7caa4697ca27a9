//! Core building blocks shared by the client

pub mod config;
pub mod error;
pub mod traits;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use traits::Transport;
