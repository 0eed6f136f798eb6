//! Domain models for the CCNA tables.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network with CIDR notation support
//! - [`SubnetRecord`] - one row of a generated subnet table
//! - [`DeviceInterface`] - one row of a lab addressing table
//! - [`ConnectivityTest`] - one row of a lab test checklist

mod connectivity;
mod device;
mod ipv4;
mod subnet_record;

// Re-export public types
pub use connectivity::ConnectivityTest;
pub use device::{DeviceInterface, DeviceKind};
pub use ipv4::{
    binary_mask, block_size, dotted_mask, get_cidr_mask, num_hosts, prefix_from_mask, Ipv4,
    MAX_LENGTH,
};
pub use subnet_record::{SubnetMode, SubnetRecord};
