#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # vulnboard-entities
//!
//! Domain entities of the comment board.
//!
//! The entities only carry data. They never validate, trim or escape
//! user supplied text.

pub mod comment;
pub mod id;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
