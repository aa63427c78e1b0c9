//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. All pages reach the session through context.

pub mod create_post;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod register;
