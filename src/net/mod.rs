//! Networking modules for the posts REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs HTTP calls, `error` defines the tagged failure type, and
//! `types` defines the wire schema shared by pages and the session manager.

pub mod api;
pub mod error;
pub mod types;
