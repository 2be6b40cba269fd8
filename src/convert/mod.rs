// convert/ - GloVe → word2vec text conversion.
//
// Provides:
// - Line counting and dimensionality estimation (info)
// - Header generation and verbatim line copy (transcode)
// - A serializable summary of a finished conversion

pub mod info;
pub mod transcode;

use std::path::Path;

use serde::Serialize;

pub use info::FileInfo;
pub use transcode::{convert, header_line, HeaderDims};

/// Summary of one conversion, printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub input: String,
    pub output: String,
    pub vectors: usize,
    pub dimensions: usize,
    pub header: String,
}

impl ConversionReport {
    pub fn new(input: &Path, output: &Path, info: &FileInfo, header_dims: HeaderDims) -> Self {
        Self {
            input: input.to_string_lossy().into_owned(),
            output: output.to_string_lossy().into_owned(),
            vectors: info.vectors,
            dimensions: info.dimensions,
            header: header_line(info, header_dims),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let info = FileInfo { vectors: 3, dimensions: 2 };
        let report = ConversionReport::new(Path::new("in.txt"), Path::new("out.txt"), &info, HeaderDims::legacy());
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "input": "in.txt",
                "output": "out.txt",
                "vectors": 3,
                "dimensions": 2,
                "header": "3 50"
            })
        );
    }
}
