// src/error.rs
// Error type shared by the loader, the encoder and the artifact writers.

use thiserror::Error;

use crate::tables::rules::GrammarRule;
use crate::ucd::GeneralCategory;

#[derive(Debug, Error)]
pub enum CprunError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A malformed line in UnicodeData.txt.
    #[error("UnicodeData line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown general category {0:?}")]
    UnknownCategory(String),

    /// The override table and the category table disagree. The generated
    /// table would be silently wrong, so generation stops here.
    #[error(
        "override U+{code_point:04X} uses {category:?}, which maps to {actual:?} instead of {expected:?}"
    )]
    InconsistentOverride {
        code_point: u32,
        category: GeneralCategory,
        expected: GrammarRule,
        actual: Option<GrammarRule>,
    },

    /// A record field does not fit its bit width.
    #[error("{field} value {value:#x} does not fit in {bits} bits")]
    FieldOverflow {
        field: &'static str,
        value: u32,
        bits: u32,
    },

    /// A run that would extend past the last code point.
    #[error("run U+{code_point:04X}+{length} ends past U+10FFFF")]
    OutOfBounds { code_point: u32, length: u32 },

    #[error("run table out of order at record {index}: {message}")]
    Unordered { index: usize, message: String },

    #[error("U+{code_point:04X}: table says {found:?}, classification says {expected:?}")]
    Coverage {
        code_point: u32,
        expected: Option<GrammarRule>,
        found: Option<GrammarRule>,
    },

    #[error("bad table artifact: {0}")]
    BadArtifact(String),
}

pub type Result<T> = std::result::Result<T, CprunError>;
