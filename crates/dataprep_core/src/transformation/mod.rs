//! Transformation menu and parameter forms.
//!
//! # Responsibility
//! - Decode the recursive parameter schema (`schema`).
//! - Instantiate and drive parameter-entry forms (`form`).
//! - Group transformations into the column menu (`menu`).

pub mod form;
pub mod menu;
pub mod schema;
