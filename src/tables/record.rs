// src/tables/record.rs
// One run of code points sharing a rule, packed into a u32:
//   bits  0..21  first code point
//   bits 21..30  run length (1..=511)
//   bits 30..32  grammar rule

use super::rules::{CODE_POINT_BITS, GrammarRule, MAX_RUN_LENGTH, RUN_LENGTH_BITS};
use crate::{
    error::{CprunError, Result},
    ucd::{CodePoint, MAX_CODE_POINT},
};

const CODE_POINT_MASK: u32 = (1 << CODE_POINT_BITS) - 1;
const LENGTH_SHIFT: u32 = CODE_POINT_BITS;
const RULE_SHIFT: u32 = CODE_POINT_BITS + RUN_LENGTH_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    code_point: CodePoint,
    length: u32,
    rule: GrammarRule,
}

/// Checks that `code_point..code_point + length` is a valid run: both fields
/// fit their widths and the run ends inside the code point space.
pub fn check_bounds(code_point: CodePoint, length: u32) -> Result<()> {
    if code_point > MAX_CODE_POINT {
        return Err(CprunError::FieldOverflow {
            field: "code point",
            value: code_point,
            bits: CODE_POINT_BITS,
        });
    }
    if length == 0 || length > MAX_RUN_LENGTH {
        return Err(CprunError::FieldOverflow {
            field: "run length",
            value: length,
            bits: RUN_LENGTH_BITS,
        });
    }
    if code_point + (length - 1) > MAX_CODE_POINT {
        return Err(CprunError::OutOfBounds { code_point, length });
    }
    Ok(())
}

impl Run {
    /// Builds a run, rejecting any field outside its bit width.
    pub fn new(code_point: CodePoint, length: u32, rule: GrammarRule) -> Result<Self> {
        check_bounds(code_point, length)?;
        Ok(Self {
            code_point,
            length,
            rule,
        })
    }

    #[inline]
    pub fn code_point(&self) -> CodePoint {
        self.code_point
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[inline]
    pub fn rule(&self) -> GrammarRule {
        self.rule
    }

    /// One past the last code point covered.
    #[inline]
    pub fn end(&self) -> CodePoint {
        self.code_point + self.length
    }

    #[inline]
    pub fn contains(&self, cp: CodePoint) -> bool {
        cp >= self.code_point && cp < self.end()
    }

    pub fn pack(&self) -> u32 {
        self.code_point | (self.length << LENGTH_SHIFT) | ((self.rule.bits() as u32) << RULE_SHIFT)
    }

    pub fn unpack(word: u32) -> Result<Self> {
        let code_point = word & CODE_POINT_MASK;
        let length = (word >> LENGTH_SHIFT) & MAX_RUN_LENGTH;
        let bits = (word >> RULE_SHIFT) as u8;
        let rule = GrammarRule::from_bits(bits)
            .ok_or_else(|| CprunError::BadArtifact(format!("unused rule bits {bits:#04b} in {word:#010x}")))?;
        Self::new(code_point, length, rule)
    }
}
