//! # NGN Dimensioning Server
//!
//! HTTP JSON service and command-line front end over
//! [`ngn_dimensioning_core`]. The binary is `ngn-dimensioning`; the library
//! exposes the router so it can be exercised without a socket.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use api::{AppState, create_router};
pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
