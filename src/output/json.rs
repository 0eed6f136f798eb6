//! JSON output: one document per table.

use super::{Table, TableSink};
use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct Document<'a, T> {
    title: &'a str,
    rows: &'a [T],
}

/// Pretty-printed JSON, one value per table.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> JsonSink<W> {
        JsonSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write `{"title": .., "rows": [..]}` with each row serialized from its
    /// record type, so keys follow field order and counts stay numbers.
    pub fn write_rows<T: Serialize>(&mut self, title: &str, rows: &[T]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &Document { title, rows })?;
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Untyped tables keep their column order as `headers` plus row arrays.
impl<W: Write> TableSink for JsonSink<W> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, table)?;
        self.finish()
    }
}

/// Write typed rows to a new JSON file at `path`.
pub fn write_json_file<T: Serialize>(path: &Path, title: &str, rows: &[T]) -> Result<()> {
    let mut sink = JsonSink::new(BufWriter::new(File::create(path)?));
    sink.write_rows(title, rows)?;
    log::info!("JSON written: {}", path.display());
    Ok(())
}
