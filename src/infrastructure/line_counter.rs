use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, ScanError};

/// Count the text records in the file at `path`.
pub fn count_lines(path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| ScanError::read(path, e))?;
    count_records(BufReader::new(file)).map_err(|e| ScanError::read(path, e))
}

/// Count `\n`-terminated records, plus a final unterminated one. Works on raw bytes.
pub fn count_records<R: BufRead>(mut reader: R) -> std::io::Result<usize> {
    let mut count = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(count);
        }
        count += 1;
    }
}
