//! A tiny HTTP server that answers every connection with the same page.
//!
//! Connections are served strictly one after another: the accept loop in
//! [`server::Listener::run`] waits for the current client to finish before it
//! accepts the next one.

pub mod cli;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod server;
pub mod shutdown;

pub use config::{Config, ListenerConfig};
pub use error::{Error, Result};
pub use server::Listener;
pub use shutdown::{Shutdown, ShutdownHandle};
