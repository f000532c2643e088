// src/lib.rs
pub mod banner;
pub mod client;
pub mod config;
pub mod errors;
pub mod harness;
pub mod scenarios;
pub mod transport;
