//! Search helpers.
//!
//! # Responsibility
//! - Adapt help-center documentation answers for the search panel.

pub mod documentation;
