//! Mealbook App Services
//!
//! Recipe catalog provider, favorites persistence, and the session object
//! that presentation surfaces hold on to.
//! Depends on the `mealbook` core crate.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod network;
pub mod providers;
