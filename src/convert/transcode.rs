// transcode.rs - GloVe text → word2vec text.
//
// Writes "<vectors> <dims>\n" and then copies every input line byte-for-byte.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config;
use crate::convert::info::{get_file_info, next_line, open_input, FileInfo};
use crate::error::{ConvertError, Result};

/// Source of the second header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDims {
    /// The estimated dimensionality of the input.
    Computed,
    /// A fixed width, whatever the input holds.
    Fixed(usize),
}

impl HeaderDims {
    /// The historical fixed header width.
    pub fn legacy() -> Self {
        HeaderDims::Fixed(config::convert::LEGACY_HEADER_DIMS)
    }

    pub fn resolve(self, info: &FileInfo) -> usize {
        match self {
            HeaderDims::Computed => info.dimensions,
            HeaderDims::Fixed(n) => n,
        }
    }
}

/// Header line (without terminator) for a word2vec text file.
pub fn header_line(info: &FileInfo, header_dims: HeaderDims) -> String {
    format!("{} {}", info.vectors, header_dims.resolve(info))
}

/// Convert `input` (GloVe) into `output` (word2vec text), overwriting `output`.
///
/// Returns the counted vectors and the *estimated* dimensionality, even when the header
/// carries a fixed width. The input is fully scanned before the output is touched, so a
/// missing input never creates or truncates the output.
pub fn convert(input: &Path, output: &Path, header_dims: HeaderDims) -> Result<FileInfo> {
    let info = get_file_info(input)?;
    let header = header_line(&info, header_dims);
    log::info!(
        "converting {} vectors from {} to {}",
        info.vectors,
        input.display(),
        output.display()
    );

    ensure_distinct(input, output)?;
    let file = File::create(output).map_err(|e| ConvertError::write(output, e))?;
    let mut writer = BufWriter::with_capacity(config::convert::IO_BUFFER_BYTES, file);
    writeln!(writer, "{header}").map_err(|e| ConvertError::write(output, e))?;

    let mut reader = open_input(input)?;
    let mut buf = Vec::new();
    let mut copied = 0usize;
    while next_line(&mut reader, &mut buf).map_err(|e| ConvertError::read(input, e))? {
        writer.write_all(&buf).map_err(|e| ConvertError::write(output, e))?;
        copied += 1;
    }
    writer.flush().map_err(|e| ConvertError::write(output, e))?;

    if copied != info.vectors {
        // Input changed between the counting pass and the copy pass.
        log::warn!(
            "copied {} lines but header declares {} vectors ({})",
            copied,
            info.vectors,
            input.display()
        );
    }

    log::debug!("Wrote header \"{}\" and {} lines to {}", header, copied, output.display());
    Ok(info)
}

/// Refuse to write over the input: creating the output would truncate it before the copy.
fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    let Ok(output_real) = std::fs::canonicalize(output) else {
        // Output does not exist yet.
        return Ok(());
    };
    let input_real = std::fs::canonicalize(input).map_err(|e| ConvertError::not_found(input, e))?;
    if input_real == output_real {
        return Err(ConvertError::write(
            output,
            io::Error::new(io::ErrorKind::InvalidInput, "output is the same file as the input"),
        ));
    }
    Ok(())
}
