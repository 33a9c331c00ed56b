// src/lib.rs
pub mod config;
pub mod error;
pub mod tables;
pub mod ucd;

pub use error::{CprunError, Result};
