//! Core types, policies and storage contracts for SafeWalk.
//!
//! This crate is free of HTTP and database dependencies. The storage backend
//! (`safewalk-store-sqlite`) and the JSON API (`safewalk-api`) both depend on
//! it; external collaborators (identity, email, geocoding) are reached only
//! through the traits defined here.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod alert;
pub mod assistant;
pub mod challenges;
pub mod community;
pub mod console;
pub mod counters;
pub mod error;
pub mod flow;
pub mod geo;
pub mod helplines;
pub mod notify;
pub mod records;
pub mod report;
pub mod session;
pub mod sos;
pub mod store;

pub use error::{Error, Result};
