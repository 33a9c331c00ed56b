// src/tables/lookup.rs
// Consumer-side view of a run table: binary search on the first code point.

use super::{record::Run, rules::GrammarRule};
use crate::{
    error::{CprunError, Result},
    ucd::CodePoint,
};

/// Checks that runs are strictly ascending and pairwise disjoint.
pub fn check_ordering(runs: &[Run]) -> Result<()> {
    for (i, pair) in runs.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        if a.end() > b.code_point() {
            return Err(CprunError::Unordered {
                index: i + 1,
                message: format!(
                    "run at U+{:04X} starts before the previous run ends at U+{:04X}",
                    b.code_point(),
                    a.end()
                ),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTable {
    runs: Vec<Run>,
}

impl RunTable {
    pub fn new(runs: Vec<Run>) -> Result<Self> {
        check_ordering(&runs)?;
        Ok(Self { runs })
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn lookup(&self, cp: CodePoint) -> Option<GrammarRule> {
        // Index of the first run starting after cp; the candidate is the one before it.
        let idx = self.runs.partition_point(|r| r.code_point() <= cp);
        let run = self.runs.get(idx.checked_sub(1)?)?;
        run.contains(cp).then_some(run.rule())
    }

    pub fn is_whitespace(&self, cp: CodePoint) -> bool {
        self.lookup(cp) == Some(GrammarRule::Whitespace)
    }

    pub fn is_identifier_start(&self, cp: CodePoint) -> bool {
        self.lookup(cp) == Some(GrammarRule::IdentifierStart)
    }

    /// True for both identifier rules.
    pub fn is_identifier_part(&self, cp: CodePoint) -> bool {
        self.lookup(cp).is_some_and(GrammarRule::is_identifier)
    }

    /// Every (code point, rule) pair covered by the table, ascending.
    pub fn expand(&self) -> impl Iterator<Item = (CodePoint, GrammarRule)> + '_ {
        self.runs
            .iter()
            .flat_map(|r| (r.code_point()..r.end()).map(move |cp| (cp, r.rule())))
    }
}
