//! Error type shared by the subnet calculator, the lab tables and the sinks.

use std::net::Ipv4Addr;
use thiserror::Error;

/// Errors returned by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range address/prefix input. Caller must fix the input.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested range runs past 255.255.255.255, or a host pool ran dry.
    #[error("address space exhausted: {needed} addresses requested from {start}, only {available} left")]
    AddressSpaceExhausted {
        start: Ipv4Addr,
        needed: u64,
        available: u64,
    },

    #[error("device not found: {0}")]
    UnknownDevice(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for [`Error::InvalidParameter`].
pub(crate) fn invalid<S: Into<String>>(msg: S) -> Error {
    Error::InvalidParameter(msg.into())
}
