//! Excel workbooks: one sheet per table, formatted header row.

use super::{Table, TableSink};
use crate::error::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

const MIN_COLUMN_WIDTH: usize = 15;
const MAX_COLUMN_WIDTH: usize = 50;
/// Excel refuses longer sheet names.
const MAX_SHEET_NAME: usize = 31;

/// Collects tables as sheets of one workbook; nothing touches the disk until
/// [`XlsxSink::save`].
pub struct XlsxSink {
    workbook: Workbook,
    header: Format,
    cell: Format,
}

impl XlsxSink {
    pub fn new() -> XlsxSink {
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x4472C4))
            .set_border(FormatBorder::Thin)
            .set_text_wrap()
            .set_align(FormatAlign::Top);
        let cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_text_wrap()
            .set_align(FormatAlign::Top);
        XlsxSink {
            workbook: Workbook::new(),
            header,
            cell,
        }
    }

    /// Add `table` as a sheet called `name`. Whole-number cells are written
    /// as numbers, everything else as text.
    pub fn add_sheet(&mut self, name: &str, table: &Table) -> Result<()> {
        let sheet = self.workbook.add_worksheet();
        sheet.set_name(name)?;
        for (col, header) in table.headers.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, header, &self.header)?;
        }
        for (i, row) in table.rows.iter().enumerate() {
            let r = i as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell.parse::<u64>() {
                    Ok(n) => sheet.write_number_with_format(r, col, n as f64, &self.cell)?,
                    Err(_) => sheet.write_string_with_format(r, col, cell, &self.cell)?,
                };
            }
        }
        for (col, width) in table.column_widths().into_iter().enumerate() {
            let width = (width + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
            sheet.set_column_width(col as u16, width as f64)?;
        }
        sheet.set_freeze_panes(1, 0)?;
        log::debug!("sheet '{name}' with {} rows", table.rows.len());
        Ok(())
    }

    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.workbook.save(path)?;
        log::info!("Excel written: {}", path.display());
        Ok(())
    }
}

impl Default for XlsxSink {
    fn default() -> Self {
        XlsxSink::new()
    }
}

/// Sheet named after the table title, cut to what Excel accepts.
impl TableSink for XlsxSink {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        self.add_sheet(&sheet_name(&table.title), table)
    }
}

fn sheet_name(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect()
}

/// Write `sheets` as one workbook at `path`.
pub fn write_xlsx_file(path: &Path, sheets: &[(&str, &Table)]) -> Result<()> {
    let mut book = XlsxSink::new();
    for (name, table) in sheets {
        book.add_sheet(name, table)?;
    }
    book.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};

    fn sample() -> Table {
        Table {
            title: "Pruebas: PC1/PC2".to_string(),
            headers: vec!["Prueba".to_string(), "Hosts".to_string()],
            rows: vec![vec!["PC1 a PC2".to_string(), "62".to_string()]],
        }
    }

    #[test]
    fn test_sheet_name() {
        assert_eq!(sheet_name("Pruebas: PC1/PC2"), "Pruebas_ PC1_PC2");
        let long = sheet_name("Tabla de asignación de direcciones");
        assert_eq!(long.chars().count(), MAX_SHEET_NAME);
    }

    #[test]
    fn test_workbook_read_back() {
        let path = std::env::temp_dir().join(format!("ccna_xlsx_{}.xlsx", std::process::id()));
        let mut sink = XlsxSink::new();
        sink.write_table(&sample()).unwrap();
        sink.add_sheet("Otra", &sample()).unwrap();
        sink.save(&path).unwrap();

        let mut book: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(book.sheet_names(), vec!["Pruebas_ PC1_PC2", "Otra"]);
        let range = book.worksheet_range("Otra").unwrap();
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Prueba".to_string())));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("PC1 a PC2".to_string())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(62.0)));
        std::fs::remove_file(&path).unwrap();
    }
}
