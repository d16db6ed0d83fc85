//! HTTP server module.
//!
//! The server includes:
//! - Listener binding up front, so the bound address is known before serving
//! - Readiness transitions around the serve loop
//! - Graceful shutdown on SIGTERM/SIGINT with connection draining

mod server;
mod shutdown;

pub use server::{start_server, Application, ServerError};
pub use shutdown::setup_shutdown_handler;
