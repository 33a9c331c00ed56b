// src/tables/rules.rs

use serde::{Deserialize, Serialize};

pub const CODE_POINT_BITS: u32 = 21;
pub const RUN_LENGTH_BITS: u32 = 9;
pub const RULE_BITS: u32 = 2;

pub const MAX_RUN_LENGTH: u32 = (1 << RUN_LENGTH_BITS) - 1;
pub const MAX_RULE: u32 = (1 << RULE_BITS) - 1;

const _: () = assert!(CODE_POINT_BITS + RUN_LENGTH_BITS + RULE_BITS <= 32);

/// Set in both identifier rules, clear in whitespace.
pub const IDENTIFIER_MASK: u8 = 0b01;

/// Lexical role of a code point. The discriminants are part of the emitted
/// table format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GrammarRule {
    Whitespace = 0b00,
    IdentifierStart = 0b01,
    IdentifierPart = 0b11,
}

pub const ALL_RULES: [GrammarRule; 3] = [
    GrammarRule::Whitespace,
    GrammarRule::IdentifierStart,
    GrammarRule::IdentifierPart,
];

impl GrammarRule {
    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// `0b10` is unused and decodes to `None`.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::Whitespace),
            0b01 => Some(Self::IdentifierStart),
            0b11 => Some(Self::IdentifierPart),
            _ => None,
        }
    }

    #[inline]
    pub fn is_identifier(self) -> bool {
        self.bits() & IDENTIFIER_MASK != 0
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::IdentifierStart => "identifier_start",
            Self::IdentifierPart => "identifier_part",
        }
    }
}
