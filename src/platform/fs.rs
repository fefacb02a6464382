// benchpost - platform/fs.rs
//
// Thin file-handle helpers so the core layer only ever sees Read/Write.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

/// Open a log file for a buffered line scan.
///
/// The handle lives as long as the returned reader; dropping it after the
/// scan releases the file.
pub fn open_log(path: &Path) -> io::Result<BufReader<File>> {
    File::open(path).map(BufReader::new)
}

/// Create (or truncate) an output file for buffered writing.
pub fn create_output(path: &Path) -> io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}
