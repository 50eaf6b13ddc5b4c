//! Secrets - Main Library
//!
//! A small server-rendered web application where users register (locally or
//! via Google OAuth), log in, and share a single free-text secret that is
//! listed alongside everyone else's.
//!
//! # Module Structure
//!
//! - **`server`** - Configuration, application state, and startup
//!   - `AppConfig` loaded from the environment once at startup
//!   - `AppState` constructed explicitly and passed to the router
//!   - `create_app` which connects the store and assembles the router
//!
//! - **`routes`** - Router assembly and the plain page handlers
//!
//! - **`auth`** - Authentication
//!   - The closed credential set (`Credentials::{Local, Google}`) behind a
//!     single `authenticate` entry point
//!   - bcrypt password hashing, signed cookie sessions, Google OAuth
//!   - Route handlers for register / login / logout / the Google pair
//!
//! - **`users`** - The user store: the `User` model and its sqlx queries
//!
//! - **`secrets`** - Handlers for the secrets listing and secret submission
//!
//! - **`views`** - Server-side HTML page rendering
//!
//! - **`error`** - The application error taxonomy and its redirect mapping
//!
//! # Error Handling
//!
//! Store and authentication failures are caught at the handler boundary,
//! logged via `tracing`, and answered with a redirect to a relevant form.
//! No structured error detail is ever rendered to the end user.

/// Authentication: credentials, sessions, password hashing, handlers
pub mod auth;

/// Application error taxonomy and HTTP conversion
pub mod error;

/// Router assembly and page handlers
pub mod routes;

/// Secrets listing and submission handlers
pub mod secrets;

/// Server configuration, state, and initialization
pub mod server;

/// User model and store operations
pub mod users;

/// HTML page rendering
pub mod views;
