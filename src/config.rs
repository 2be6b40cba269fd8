// IMPORTANT:
// Keep ALL numeric values centralized here (repo rule: no hardcoded numeric values scattered around).

// NOTE: TOOL_VERSION must stay in sync with the `version` field in Cargo.toml.
pub const TOOL_VERSION: &str = "0.1.0";

pub mod logging {
    pub const DEFAULT_LEVEL: &str = "info";
    pub const LOG_FILE_NAME: &str = "glove2w2v";

    pub const LOG_ROTATE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
    pub const LOG_ROTATE_KEEP_FILES: usize = 5;
}

pub mod convert {
    /// Only the first lines (strictly fewer than 100) are inspected when estimating dimensionality.
    pub const DIM_SAMPLE_LINES: usize = 99;

    /// A decimal number: ASCII digits, one separator byte of any kind, ASCII digits.
    pub const DECIMAL_PATTERN: &str = r"(?-u)\d+.\d+";

    /// Header width written by `--legacy-header`, regardless of the real dimensionality.
    pub const LEGACY_HEADER_DIMS: usize = 50;

    pub const IO_BUFFER_BYTES: usize = 64 * 1024;
}

pub mod check {
    // Queries run by `--check` after conversion.
    pub const NEIGHBOR_WORD: &str = "king";
    pub const NEIGHBOR_TOPN: usize = 10;
    pub const PAIR: (&str, &str) = ("woman", "man");
}
