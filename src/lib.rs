pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reader;
pub mod classify;
pub mod export;
pub mod plan;
