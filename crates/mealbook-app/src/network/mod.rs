//! Network operations
//!
//! HTTP client used by the recipe catalog providers.

pub mod client;

pub use client::HttpClient;
