//! Error types

mod config;
mod decimal;

pub use config::*;
pub use decimal::*;
