//! Packets exchanged during a Server List Ping.
//!
//! `client` holds what we send to a server, `server` what it answers with.

pub mod client;
pub mod server;
