//! Output formatting for the tables.
//!
//! This module handles rendering and exporting tables:
//! - [`table`] - record types laid out as string tables
//! - [`terminal`] - aligned terminal output with colors
//! - [`csv`] - CSV files
//! - [`json`] - JSON files
//! - [`xlsx`] - Excel workbooks

mod csv;
mod json;
mod table;
mod terminal;
mod xlsx;

pub use csv::{escape_csv_field, write_csv_file, CsvSink};
pub use json::{write_json_file, JsonSink};
pub use table::{Table, Tabular};
pub use terminal::{render_table, TerminalSink};
pub use xlsx::{write_xlsx_file, XlsxSink};

use crate::error::Result;
use crate::processing::LabTables;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Destination for generated tables.
pub trait TableSink {
    fn write_table(&mut self, table: &Table) -> Result<()>;
}

/// File format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// The tables a lab worksheet can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabTable {
    Subnets,
    Addresses,
    Tests,
}

impl LabTable {
    /// Part of the export file name.
    pub fn name(&self) -> &'static str {
        match self {
            LabTable::Subnets => "subredes",
            LabTable::Addresses => "direcciones",
            LabTable::Tests => "pruebas",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LabTable::Subnets => "Tabla de subredes",
            LabTable::Addresses => "Tabla de asignación de direcciones",
            LabTable::Tests => "Tabla de pruebas de conectividad",
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            LabTable::Subnets => "Subredes",
            LabTable::Addresses => "Asignación_Direcciones",
            LabTable::Tests => "Pruebas_Conectividad",
        }
    }
}

/// `<prefix>_<name>_YYYYmmdd_HHMMSS.<ext>`
pub fn timestamped_file_name(prefix: &str, name: &str, ext: &str, now: DateTime<Local>) -> String {
    format!("{prefix}_{name}_{}.{ext}", now.format("%Y%m%d_%H%M%S"))
}

/// Non-empty tables of a lab, in display order.
pub fn lab_tables(lab: &LabTables) -> Vec<(LabTable, Table)> {
    let mut tables = Vec::new();
    if !lab.subnets.is_empty() {
        let kind = LabTable::Subnets;
        tables.push((kind, Table::from_rows(kind.title(), &lab.subnets)));
    }
    if !lab.addresses.is_empty() {
        let kind = LabTable::Addresses;
        tables.push((kind, Table::from_rows(kind.title(), &lab.addresses)));
    }
    if !lab.tests.is_empty() {
        let kind = LabTable::Tests;
        tables.push((kind, Table::from_rows(kind.title(), &lab.tests)));
    }
    tables
}

/// Send every table of a lab to `sink`.
pub fn write_lab(lab: &LabTables, sink: &mut dyn TableSink) -> Result<()> {
    for (_, table) in lab_tables(lab) {
        sink.write_table(&table)?;
    }
    Ok(())
}

/// Export `lab` under `dir`: one workbook with a sheet per table for
/// [`ExportFormat::Xlsx`], otherwise one timestamped file per table.
///
/// # Returns
/// The paths written, in table order.
pub fn export_lab(
    lab: &LabTables,
    dir: &Path,
    prefix: &str,
    format: ExportFormat,
    csv_bom: bool,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let now = Local::now();
    let tables = lab_tables(lab);

    if format == ExportFormat::Xlsx {
        let path = dir.join(timestamped_file_name(prefix, "tablas", format.extension(), now));
        let sheets: Vec<(&str, &Table)> = tables
            .iter()
            .map(|(kind, table)| (kind.sheet_name(), table))
            .collect();
        write_xlsx_file(&path, &sheets)?;
        return Ok(vec![path]);
    }

    let mut written = Vec::new();
    for (kind, table) in &tables {
        let file_name = timestamped_file_name(prefix, kind.name(), format.extension(), now);
        let path = dir.join(file_name);
        if format == ExportFormat::Csv {
            write_csv_file(&path, table, csv_bom)?;
        } else {
            match kind {
                LabTable::Subnets => write_json_file(&path, kind.title(), &lab.subnets)?,
                LabTable::Addresses => write_json_file(&path, kind.title(), &lab.addresses)?,
                LabTable::Tests => write_json_file(&path, kind.title(), &lab.tests)?,
            }
        }
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ccna_export_{tag}_{}", std::process::id()))
    }

    #[test]
    fn test_timestamped_file_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            timestamped_file_name("tabla_red", "direcciones", "csv", now),
            "tabla_red_direcciones_20240309_140507.csv"
        );
    }

    #[test]
    fn test_lab_tables_skips_empty() {
        let lab = crate::labs::lab_10_3_4();
        let names: Vec<&str> = lab_tables(&lab).into_iter().map(|(k, _)| k.name()).collect();
        assert_eq!(names, vec!["direcciones", "pruebas"]);
    }

    #[test]
    fn test_export_lab_csv() {
        let dir = temp_dir("csv");
        let lab = crate::labs::lab_11_10_1().unwrap();
        let paths = export_lab(&lab, &dir, "tabla_red", ExportFormat::Csv, false).unwrap();
        assert_eq!(paths.len(), 2);
        let subnets = std::fs::read_to_string(&paths[0]).unwrap();
        assert!(subnets.lines().nth(1).unwrap().starts_with("1,192.168.0.0,/26,"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_lab_json_typed() {
        let dir = temp_dir("json");
        let lab = crate::labs::lab_11_10_1().unwrap();
        let paths = export_lab(&lab, &dir, "tabla_red", ExportFormat::Json, false).unwrap();
        assert_eq!(paths.len(), 2);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths[0]).unwrap()).unwrap();
        assert_eq!(value["title"], "Tabla de subredes");
        assert_eq!(value["rows"][3]["usable_host_count"], 62);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths[1]).unwrap()).unwrap();
        assert_eq!(value["rows"][2]["ip_address"], "209.165.201.2");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_lab_xlsx_one_sheet_per_table() {
        use calamine::{open_workbook, Data, Reader, Xlsx};

        let dir = temp_dir("xlsx");
        let lab = crate::labs::lab_10_3_4();
        let paths = export_lab(&lab, &dir, "tabla_red", ExportFormat::Xlsx, false).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].extension().unwrap(), "xlsx");

        let mut book: Xlsx<_> = open_workbook(&paths[0]).unwrap();
        assert_eq!(
            book.sheet_names(),
            vec!["Asignación_Direcciones", "Pruebas_Conectividad"]
        );
        let range = book.worksheet_range("Asignación_Direcciones").unwrap();
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Dispositivo".to_string())));
        assert_eq!(range.height(), lab.addresses.len() + 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
