//! HTTP handlers for the authentication routes.
//!
//! - `register` - GET/POST `/register`
//! - `login` - GET/POST `/login`
//! - `logout` - GET `/logout`
//! - `oauth` - GET `/auth/google` and GET `/auth/google/secrets`

pub mod login;
pub mod logout;
pub mod oauth;
pub mod register;
