// benchpost - core/export.rs
//
// Header-less CSV serialisation of aggregated result tables.
// Core layer: writes to any Write trait object; the caller owns the file.

use crate::core::model::ResultTable;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Write `table` as CSV: one `protocol,n,t,l,avg,stddev` line per row,
/// `\n` terminated, no header. Fields are quoted only when they contain the
/// delimiter, a quote or a line break.
///
/// `export_path` is used for error context only. Returns the row count.
pub fn export_csv<W: Write>(
    table: &ResultTable,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in &table.rows {
        csv_writer
            .write_record(row.fields())
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(table.len())
}
