//! Server configuration, state, and initialization.
//!
//! Everything the application needs at runtime is built here once, at
//! startup, and handed to the router as an explicit [`state::AppState`].
//! There is no module-scoped singleton anywhere: the store pool, the session
//! signer, and the OAuth client all live in the state the handlers extract.

pub mod config;
pub mod init;
pub mod state;
