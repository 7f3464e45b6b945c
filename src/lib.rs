pub mod api;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod error;
pub mod exchanges;
pub mod logging;
pub mod models;
pub mod scanner;
pub mod snapshot;
pub mod validation;

pub use error::{Error, Result};
