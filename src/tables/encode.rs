// src/tables/encode.rs
// Single ascending pass over the code point space, folding code points into
// maximal same-rule runs of at most MAX_RUN_LENGTH.

use std::time::Instant;

use super::{
    mapper::CategoryMapper,
    record::Run,
    rules::{GrammarRule, MAX_RUN_LENGTH},
};
use crate::{
    error::Result,
    ucd::{CodePoint, MAX_CODE_POINT},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    NoRun,
    InRun {
        rule: GrammarRule,
        start: CodePoint,
        length: u32,
    },
}

impl RunState {
    fn open(cp: CodePoint, rule: Option<GrammarRule>) -> Self {
        match rule {
            Some(rule) => RunState::InRun {
                rule,
                start: cp,
                length: 1,
            },
            None => RunState::NoRun,
        }
    }

    /// Adds `cp` to the open run if it carries the same rule and the run has
    /// room. Returns false when a new run must be started instead.
    fn extend(&mut self, rule: Option<GrammarRule>) -> bool {
        match self {
            RunState::InRun {
                rule: r, length, ..
            } if Some(*r) == rule && *length < MAX_RUN_LENGTH => {
                *length += 1;
                true
            }
            _ => false,
        }
    }

    fn close(self, out: &mut Vec<Run>) -> Result<()> {
        if let RunState::InRun {
            rule,
            start,
            length,
        } = self
        {
            if length > 0 {
                out.push(Run::new(start, length, rule)?);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EncodeSummary {
    pub runs: Vec<Run>,
    /// Longest run emitted, after splitting.
    pub longest_run: u32,
}

/// Encodes the classification of every code point in `0..=MAX_CODE_POINT`.
pub fn encode_runs<F>(classify: F) -> Result<EncodeSummary>
where
    F: Fn(CodePoint) -> Option<GrammarRule>,
{
    let mut runs = Vec::new();
    let mut state = RunState::NoRun;

    for cp in 0..=MAX_CODE_POINT {
        let rule = classify(cp);
        if state.extend(rule) {
            continue;
        }
        state.close(&mut runs)?;
        state = RunState::open(cp, rule);
    }
    state.close(&mut runs)?;

    let longest_run = runs.iter().map(Run::length).max().unwrap_or(0);
    Ok(EncodeSummary { runs, longest_run })
}

/// Builds the run table for a patched database.
pub fn code_run_array(mapper: &CategoryMapper) -> Result<EncodeSummary> {
    let t0 = Instant::now();
    let summary = encode_runs(|cp| mapper.classify(cp))?;
    log::info!(
        "encoded {} runs (longest {}) in {} ms",
        summary.runs.len(),
        summary.longest_run,
        t0.elapsed().as_millis()
    );
    Ok(summary)
}
