//! UI-facing view models.
//!
//! # Responsibility
//! - Define the column, inventory and step shapes shared by state, actions
//!   and the backend contract.
//!
//! # Invariants
//! - Models carry no cross-entity references; consistency between them is
//!   whatever the last settled request left behind.

pub mod column;
pub mod inventory;
pub mod step;
