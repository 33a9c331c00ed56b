// src/tables/mod.rs
// Code point runs: classification of the whole code point space into
// (first code point, length, grammar rule) records for range lookup.

pub mod encode;
pub mod io;
pub mod lookup;
pub mod mapper;
pub mod record;
pub mod rules;
pub mod verify;

pub use encode::{EncodeSummary, code_run_array, encode_runs};
pub use io::{load_table_bin_bytes, load_table_json_bytes, save_table, save_table_bin, save_table_json};
pub use lookup::RunTable;
pub use mapper::{CategoryMapper, CategoryTable, OVERRIDES, apply_overrides, check_overrides};
pub use record::Run;
pub use rules::{GrammarRule, IDENTIFIER_MASK, MAX_RUN_LENGTH};
pub use verify::verify_table;

use crate::{error::Result, ucd::Database};

/// Patches `db`, encodes it and, if asked, verifies the result. Nothing is
/// returned unless every step succeeded.
pub fn build_table(db: Database, verify: bool) -> Result<(CategoryMapper, EncodeSummary)> {
    let mapper = CategoryMapper::new(db)?;
    let summary = code_run_array(&mapper)?;
    if verify {
        verify_table(&summary.runs, |cp| mapper.classify(cp))?;
    }
    Ok((mapper, summary))
}
