//! The secrets listing and submission routes.

pub mod handlers;
