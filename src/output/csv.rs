//! CSV output formatting for the tables.

use super::{Table, TableSink};
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte order mark, lets spreadsheet programs detect the encoding.
const UTF8_BOM: &str = "\u{feff}";

/// Quote a field when it holds a comma, quote or line break.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains([',', '"', '\n', '\r']) {
        // Enclose in double quotes and double any quote inside.
        // No spaces after the comma between fields, excel does not like them.
        let escaped = input.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        input.to_string()
    }
}

fn csv_line(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| escape_csv_field(c))
        .collect::<Vec<String>>()
        .join(",")
}

/// Writes each table as header line plus rows.
pub struct CsvSink<W: Write> {
    out: W,
    bom: bool,
    written: usize,
}

impl<W: Write> CsvSink<W> {
    /// `bom` prefixes the output with a UTF-8 byte order mark.
    pub fn new(out: W, bom: bool) -> CsvSink<W> {
        CsvSink {
            out,
            bom,
            written: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TableSink for CsvSink<W> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        if self.bom && self.written == 0 {
            self.out.write_all(UTF8_BOM.as_bytes())?;
        }
        if self.written > 0 {
            // blank line between tables sharing one stream
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}", csv_line(&table.headers))?;
        for row in &table.rows {
            writeln!(self.out, "{}", csv_line(row))?;
        }
        self.out.flush()?;
        self.written += 1;
        log::debug!("csv: wrote table '{}' ({} rows)", table.title, table.rows.len());
        Ok(())
    }
}

/// Write one table to its own CSV file.
pub fn write_csv_file(path: &Path, table: &Table, bom: bool) -> Result<()> {
    let file = File::create(path)?;
    let mut sink = CsvSink::new(BufWriter::new(file), bom);
    sink.write_table(table)?;
    log::info!("CSV written: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("R1"), "R1");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("¿Se realizó correctamente?"), "¿Se realizó correctamente?");
    }

    fn table(title: &str) -> Table {
        Table {
            title: title.to_string(),
            headers: vec!["Dispositivo".to_string(), "Dirección IP".to_string()],
            rows: vec![vec!["PC1".to_string(), "192.168.10.10".to_string()]],
        }
    }

    #[test]
    fn test_csv_sink() {
        let mut sink = CsvSink::new(Vec::new(), false);
        sink.write_table(&table("a")).unwrap();
        sink.write_table(&table("b")).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "Dispositivo,Dirección IP\nPC1,192.168.10.10\n\nDispositivo,Dirección IP\nPC1,192.168.10.10\n"
        );
    }

    #[test]
    fn test_csv_sink_bom() {
        let mut sink = CsvSink::new(Vec::new(), true);
        sink.write_table(&table("a")).unwrap();
        let out = sink.into_inner();
        assert_eq!(&out[..3], &[0xEF, 0xBB, 0xBF]);
    }
}
