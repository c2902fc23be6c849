//! Snaplink - a URL shortener with time-limited codes and per-visit analytics
//!
//! The core is the shortcode lifecycle: generation with collision avoidance,
//! expiry enforcement, and concurrent-safe click recording against an
//! in-memory store. The HTTP layer is thin plumbing over four operations:
//! create, resolve, stats, and list.
//!
//! # Architecture
//! - `registry`: shortcode → record map, code allocation, expiry, resolution
//! - `analytics`: append-only per-shortcode click ledger
//! - `services`: actix-web handlers wrapping the four core operations
//! - `middleware`: request logging
//! - `config`: environment-based configuration
//! - `system`: logging initialization
//! - `utils`: URL validation and code generation

pub mod analytics;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod registry;
pub mod services;
pub mod structs;
pub mod system;
pub mod utils;
