// info.rs - Vector count and dimensionality of a GloVe text file.
//
// Both values come from independent read passes over the input. Lines are read as raw
// bytes so that non-UTF-8 tokens never abort the scan.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::config;
use crate::error::{ConvertError, Result};

/// Compiled once, used for every sampled line.
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(config::convert::DECIMAL_PATTERN).expect("decimal pattern must compile"));

/// Number of vectors and components per vector in an embedding file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    pub vectors: usize,
    pub dimensions: usize,
}

/// Open the input for reading. Any failure here (missing file, permissions, a directory)
/// is reported as `NotFound`.
pub(crate) fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| ConvertError::not_found(path, e))?;
    if file.metadata().map(|m| m.is_dir()).unwrap_or(false) {
        return Err(ConvertError::not_found(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
        ));
    }
    Ok(BufReader::with_capacity(config::convert::IO_BUFFER_BYTES, file))
}

/// Read the next line, terminator included, into `buf`. Returns `false` at EOF.
pub(crate) fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    Ok(reader.read_until(b'\n', buf)? > 0)
}

/// Count newline-delimited lines. A last line without a terminator still counts.
pub fn count_lines(path: &Path) -> Result<usize> {
    let reader = open_input(path)?;
    count_lines_in(reader).map_err(|e| ConvertError::read(path, e))
}

fn count_lines_in<R: BufRead>(mut reader: R) -> io::Result<usize> {
    let mut buf = Vec::new();
    let mut lines = 0;
    while next_line(&mut reader, &mut buf)? {
        lines += 1;
    }
    Ok(lines)
}

/// Estimate dimensionality as the median number of decimal numbers per line over the
/// first `DIM_SAMPLE_LINES` lines. An empty file yields 0.
pub fn estimate_dimensionality(path: &Path) -> Result<usize> {
    let reader = open_input(path)?;
    sample_dimensionality(reader).map_err(|e| ConvertError::read(path, e))
}

fn sample_dimensionality<R: BufRead>(mut reader: R) -> io::Result<usize> {
    let mut buf = Vec::new();
    let mut counts = Vec::with_capacity(config::convert::DIM_SAMPLE_LINES);

    while counts.len() < config::convert::DIM_SAMPLE_LINES && next_line(&mut reader, &mut buf)? {
        counts.push(DECIMAL_RE.find_iter(&buf).count());
    }

    log::debug!("Sampled {} lines for dimensionality", counts.len());
    Ok(median(&mut counts))
}

/// Median truncated to an integer; the mean of the two middle values for even lengths.
fn median(counts: &mut [usize]) -> usize {
    if counts.is_empty() {
        return 0;
    }
    counts.sort_unstable();
    let mid = counts.len() / 2;
    if counts.len() % 2 == 1 {
        counts[mid]
    } else {
        (counts[mid - 1] + counts[mid]) / 2
    }
}

/// Vector count and estimated dimensionality of a GloVe file (two read passes).
pub fn get_file_info(path: &Path) -> Result<FileInfo> {
    let vectors = count_lines(path)?;
    let dimensions = estimate_dimensionality(path)?;
    Ok(FileInfo { vectors, dimensions })
}
