// src/tables/verify.rs
// Post-encode check: every code point in the table must decode to exactly
// what the classifier says, and gaps must be code points with no rule.

use rayon::prelude::*;
use std::time::Instant;

use super::{
    lookup::RunTable,
    record::{Run, check_bounds},
    rules::GrammarRule,
};
use crate::{
    error::{CprunError, Result},
    ucd::{CodePoint, MAX_CODE_POINT},
};

pub fn verify_table<F>(runs: &[Run], classify: F) -> Result<()>
where
    F: Fn(CodePoint) -> Option<GrammarRule> + Sync,
{
    let t0 = Instant::now();
    for r in runs {
        check_bounds(r.code_point(), r.length())?;
    }
    let table = RunTable::new(runs.to_vec())?;

    let mismatch = (0..=MAX_CODE_POINT)
        .into_par_iter()
        .find_first(|&cp| table.lookup(cp) != classify(cp));
    if let Some(cp) = mismatch {
        return Err(CprunError::Coverage {
            code_point: cp,
            expected: classify(cp),
            found: table.lookup(cp),
        });
    }

    log::debug!(
        "verified {} runs over {} code points in {} ms",
        runs.len(),
        MAX_CODE_POINT + 1,
        t0.elapsed().as_millis()
    );
    Ok(())
}
