//! Core types and trait definitions for the Talant record service.
//!
//! This crate is free of HTTP and filesystem dependencies. Storage backends
//! implement the traits in [`store`]; the server depends on those traits, not
//! on any concrete backend.

pub mod error;
pub mod identity;
pub mod record;
pub mod store;

pub use error::{Error, Result};
