//! Application error taxonomy.
//!
//! `types` defines the handler-boundary `AppError` enum, `conversion` holds
//! the `From` impls from the store/auth layers and the `IntoResponse`
//! mapping. Every error that reaches a handler boundary is logged and
//! answered with a redirect to a relevant form; no error detail is rendered
//! to the user.

pub mod conversion;
pub mod types;

pub use types::AppError;
