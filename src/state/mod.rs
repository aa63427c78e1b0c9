//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the single authority for authentication; `feed` holds the
//! dashboard's transient UI state.

pub mod feed;
pub mod session;
