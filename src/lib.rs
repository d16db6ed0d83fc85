//! LG Deploy Service
//!
//! A small HTTP service exposing liveness and readiness probes. Every request
//! passes through a correlation middleware that assigns or propagates an
//! `X-Request-ID`, logs start and completion records carrying it, and echoes
//! it on the response.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::*;
pub use http::{Application, ServerError};
pub use lifecycle::{Lifecycle, Readiness};
