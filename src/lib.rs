//! CCNA subnet and addressing tables.
//!
//! This crate provides functionality to:
//! - Split an IPv4 network into equal subnets ([`processing::generate_subnets`])
//! - Keep lab addressing and connectivity tables ([`processing::LabTables`], [`labs`])
//! - Render and export the tables ([`output`])
//!
//! # Modules
//! - [`models`] - Data structures (Ipv4, SubnetRecord, DeviceInterface, ConnectivityTest)
//! - [`processing`] - Table computation logic
//! - [`output`] - Terminal, CSV, JSON and Excel sinks
//! - [`menu`] - Line based command dispatcher
//! - [`labs`] - Built-in lab worksheets

pub mod cmdline;
pub mod config;
pub mod error;
pub mod labs;
pub mod menu;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Error, Result};
pub use models::{Ipv4, SubnetMode, SubnetRecord};
pub use processing::generate_subnets;

use output::{write_csv_file, write_json_file, write_xlsx_file, ExportFormat, Table, TableSink, TerminalSink};
use std::path::Path;

/// Generate a subnet table, print it to `sink` and write it to each of
/// `exports`.
pub fn run_subnets(
    network: Ipv4,
    new_prefix: u8,
    exports: &[(ExportFormat, &Path)],
    sink: &mut dyn TableSink,
    csv_bom: bool,
) -> Result<Vec<SubnetRecord>> {
    let summary = processing::subnet_summary(network, new_prefix)?;
    log::info!("{summary}");
    let subnets = generate_subnets(network, new_prefix)?;
    let table = Table::from_rows(&format!("Subredes de {network} en /{new_prefix}"), &subnets);
    sink.write_table(&table)?;

    for (format, path) in exports {
        match format {
            ExportFormat::Xlsx => write_xlsx_file(path, &[("Subredes", &table)])?,
            ExportFormat::Csv => write_csv_file(path, &table, csv_bom)?,
            ExportFormat::Json => write_json_file(path, &table.title, &subnets)?,
        }
    }
    Ok(subnets)
}

/// Terminal sink on stdout, colored unless disabled.
pub fn stdout_sink(color: bool) -> TerminalSink<std::io::Stdout> {
    TerminalSink::new(std::io::stdout(), color)
}
