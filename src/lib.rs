// Main library entry point for refscan.

pub mod api;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;
