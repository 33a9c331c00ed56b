// src/ucd/mod.rs
// In-memory model of UnicodeData.txt: name and general category per code point.

pub mod load;

use hashbrown::HashMap;
use std::io::Write;

pub use load::{parse_unicode_data, read_unicode_data};

use crate::error::{CprunError, Result};

pub type CodePoint = u32;

pub const MAX_CODE_POINT: CodePoint = 0x10FFFF;

/// Unicode general category, as abbreviated in field 2 of UnicodeData.txt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneralCategory {
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    ModifierLetter,
    OtherLetter,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    Unassigned,
}

const ABBREVS: &[(&str, GeneralCategory)] = &[
    ("Lu", GeneralCategory::UppercaseLetter),
    ("Ll", GeneralCategory::LowercaseLetter),
    ("Lt", GeneralCategory::TitlecaseLetter),
    ("Lm", GeneralCategory::ModifierLetter),
    ("Lo", GeneralCategory::OtherLetter),
    ("Mn", GeneralCategory::NonspacingMark),
    ("Mc", GeneralCategory::SpacingMark),
    ("Me", GeneralCategory::EnclosingMark),
    ("Nd", GeneralCategory::DecimalNumber),
    ("Nl", GeneralCategory::LetterNumber),
    ("No", GeneralCategory::OtherNumber),
    ("Pc", GeneralCategory::ConnectorPunctuation),
    ("Pd", GeneralCategory::DashPunctuation),
    ("Ps", GeneralCategory::OpenPunctuation),
    ("Pe", GeneralCategory::ClosePunctuation),
    ("Pi", GeneralCategory::InitialPunctuation),
    ("Pf", GeneralCategory::FinalPunctuation),
    ("Po", GeneralCategory::OtherPunctuation),
    ("Sm", GeneralCategory::MathSymbol),
    ("Sc", GeneralCategory::CurrencySymbol),
    ("Sk", GeneralCategory::ModifierSymbol),
    ("So", GeneralCategory::OtherSymbol),
    ("Zs", GeneralCategory::SpaceSeparator),
    ("Zl", GeneralCategory::LineSeparator),
    ("Zp", GeneralCategory::ParagraphSeparator),
    ("Cc", GeneralCategory::Control),
    ("Cf", GeneralCategory::Format),
    ("Cs", GeneralCategory::Surrogate),
    ("Co", GeneralCategory::PrivateUse),
    ("Cn", GeneralCategory::Unassigned),
];

impl GeneralCategory {
    pub fn parse(s: &str) -> Result<Self> {
        ABBREVS
            .iter()
            .find(|(abbrev, _)| *abbrev == s)
            .map(|&(_, cat)| cat)
            .ok_or_else(|| CprunError::UnknownCategory(s.to_string()))
    }

    pub fn abbrev(self) -> &'static str {
        // ABBREVS is listed in declaration order.
        ABBREVS[self as usize].0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeRecord {
    pub name: String,
    pub category: GeneralCategory,
}

/// The assigned subset of the code point space, keyed by code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    entries: HashMap<CodePoint, UnicodeRecord>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cp: CodePoint) -> Option<&UnicodeRecord> {
        self.entries.get(&cp)
    }

    pub fn get_mut(&mut self, cp: CodePoint) -> Option<&mut UnicodeRecord> {
        self.entries.get_mut(&cp)
    }

    pub fn insert(&mut self, cp: CodePoint, record: UnicodeRecord) -> Option<UnicodeRecord> {
        self.entries.insert(cp, record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending code point order.
    pub fn iter_sorted(&self) -> Vec<(CodePoint, &UnicodeRecord)> {
        let mut v: Vec<_> = self.entries.iter().map(|(&cp, r)| (cp, r)).collect();
        v.sort_unstable_by_key(|&(cp, _)| cp);
        v
    }
}

impl FromIterator<(CodePoint, UnicodeRecord)> for Database {
    fn from_iter<I: IntoIterator<Item = (CodePoint, UnicodeRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Writes one `U+XXXX <category> <name>` line per entry.
pub fn dump<W: Write>(db: &Database, mut w: W) -> Result<()> {
    for (cp, rec) in db.iter_sorted() {
        writeln!(w, "U+{cp:04X} {} {}", rec.category.abbrev(), rec.name)?;
    }
    w.flush()?;
    Ok(())
}
