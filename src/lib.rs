#![forbid(unsafe_code)]

//! `peer-chat`: a line-based conversation between exactly two peers.

pub mod cli;
pub mod config;
pub mod errors;
pub mod localization;
pub mod net;
pub mod session;

pub use config::ChatConfig;
pub use errors::{AppError, Result};
