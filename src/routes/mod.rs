//! Route configuration.
//!
//! `router` assembles the full route table; `pages` holds the handlers
//! with no domain logic of their own (home, 404).

pub mod pages;
pub mod router;
