//! Table computation logic.
//!
//! This module contains the logic behind the tables:
//! - [`subnet_table`] - splitting a network into equal subnets
//! - [`addressing`] - automatic address assignment for lab devices
//! - [`tables`] - the editable table set of a lab

mod addressing;
mod subnet_table;
mod tables;

// Re-export public functions
pub use addressing::assign_addresses;
pub use subnet_table::{generate_subnets, subnet_summary, SubnetSummary, MAX_SUBNET_ROWS};
pub use tables::LabTables;
