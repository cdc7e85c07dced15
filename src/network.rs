pub mod client;
pub mod encode;
pub mod error;
pub mod frame;

pub use client::PingClient;
pub use error::{ConnectionError, PingError, ProtocolError};
