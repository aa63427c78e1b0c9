//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render form chrome and post/comment cards; pages own the data
//! fetching and pass callbacks down.

pub mod button;
pub mod comment_item;
pub mod form_input;
pub mod post_card;
