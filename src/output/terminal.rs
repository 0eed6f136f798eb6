//! Terminal output: aligned columns under a banner.

use super::{Table, TableSink};
use crate::error::Result;
use colored::Colorize;
use itertools::Itertools;
use std::io::Write;

/// Lay out a table with a banner, left-aligned columns and a rule under the
/// header. Header and banner are coloured when `color` is set.
pub fn render_table(table: &Table, color: bool) -> String {
    let widths = table.column_widths();
    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .join("  ")
            .trim_end()
            .to_string()
    };
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let banner = "=".repeat(total.max(table.title.chars().count()));
    let title = table.title.to_uppercase();
    let header = line(table.headers.as_slice());

    let mut out = String::new();
    if color {
        out.push_str(&format!("{}\n{}\n{}\n", banner, title.as_str().bold(), banner));
        out.push_str(&format!("{}\n", header.as_str().on_blue().white().bold()));
    } else {
        out.push_str(&format!("{banner}\n{title}\n{banner}\n{header}\n"));
    }
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).join("  "));
    out.push('\n');
    for row in &table.rows {
        out.push_str(&line(row.as_slice()));
        out.push('\n');
    }
    out
}

/// Writes rendered tables to a terminal or any other writer.
pub struct TerminalSink<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, color: bool) -> TerminalSink<W> {
        TerminalSink { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TableSink for TerminalSink<W> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        writeln!(self.out, "{}", render_table(table, self.color))?;
        Ok(())
    }
}
