// src/tables/mapper.rs
// Unicode general category -> grammar rule, plus the per-code-point overrides
// that push a handful of characters into the category we want.

use hashbrown::HashMap;

use super::rules::GrammarRule;
use crate::{
    error::{CprunError, Result},
    ucd::{CodePoint, Database, GeneralCategory, UnicodeRecord},
};

/// Categories not listed here have no lexical role.
pub const CATEGORY_TO_GRAMMAR_RULE: &[(GeneralCategory, GrammarRule)] = &[
    (GeneralCategory::SpacingMark, GrammarRule::IdentifierPart),
    (GeneralCategory::ConnectorPunctuation, GrammarRule::IdentifierPart),
    (GeneralCategory::DecimalNumber, GrammarRule::IdentifierPart),
    (GeneralCategory::LetterNumber, GrammarRule::IdentifierStart),
    (GeneralCategory::LowercaseLetter, GrammarRule::IdentifierStart),
    (GeneralCategory::ModifierLetter, GrammarRule::IdentifierStart),
    (GeneralCategory::NonspacingMark, GrammarRule::IdentifierPart),
    (GeneralCategory::SpaceSeparator, GrammarRule::Whitespace),
    (GeneralCategory::OtherLetter, GrammarRule::IdentifierStart),
    (GeneralCategory::TitlecaseLetter, GrammarRule::IdentifierStart),
    (GeneralCategory::UppercaseLetter, GrammarRule::IdentifierStart),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override {
    pub code_point: CodePoint,
    pub category: GeneralCategory,
    /// The rule `category` must map to for this override to mean anything.
    pub produces: GrammarRule,
}

const fn ws(code_point: CodePoint) -> Override {
    Override {
        code_point,
        category: GeneralCategory::SpaceSeparator,
        produces: GrammarRule::Whitespace,
    }
}

const fn id_start(code_point: CodePoint) -> Override {
    Override {
        code_point,
        category: GeneralCategory::OtherLetter,
        produces: GrammarRule::IdentifierStart,
    }
}

const fn id_part(code_point: CodePoint) -> Override {
    Override {
        code_point,
        category: GeneralCategory::SpacingMark,
        produces: GrammarRule::IdentifierPart,
    }
}

pub const OVERRIDES: &[Override] = &[
    ws(0x0009), // TAB
    ws(0x000A), // LF
    ws(0x000B), // VT
    ws(0x000C), // FF
    ws(0x000D), // CR
    ws(0x0020), // SPACE
    id_start(0x0024), // $
    id_start(0x005F), // _
    ws(0x00A0), // NBSP
    id_part(0x200C), // ZWNJ
    id_part(0x200D), // ZWJ
    ws(0xFEFF), // BOM
];

/// Name given to an override entry the database did not have.
pub const OVERRIDE_NAME: &str = "<override>";

#[derive(Debug, Clone)]
pub struct CategoryTable {
    map: HashMap<GeneralCategory, GrammarRule>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            map: CATEGORY_TO_GRAMMAR_RULE.iter().copied().collect(),
        }
    }
}

impl CategoryTable {
    #[inline]
    pub fn rule_for(&self, category: GeneralCategory) -> Option<GrammarRule> {
        self.map.get(&category).copied()
    }
}

/// Fails if any override category does not map to the rule it is meant to
/// produce.
pub fn check_overrides(table: &CategoryTable, overrides: &[Override]) -> Result<()> {
    for o in overrides {
        let actual = table.rule_for(o.category);
        if actual != Some(o.produces) {
            return Err(CprunError::InconsistentOverride {
                code_point: o.code_point,
                category: o.category,
                expected: o.produces,
                actual,
            });
        }
    }
    Ok(())
}

/// Overwrites the category of every override code point. Running it again
/// changes nothing.
pub fn apply_overrides(mut db: Database, table: &CategoryTable) -> Result<Database> {
    check_overrides(table, OVERRIDES)?;
    for o in OVERRIDES {
        match db.get_mut(o.code_point) {
            Some(rec) => rec.category = o.category,
            None => {
                log::warn!("U+{:04X} missing from the database; inserting override", o.code_point);
                db.insert(
                    o.code_point,
                    UnicodeRecord {
                        name: OVERRIDE_NAME.to_string(),
                        category: o.category,
                    },
                );
            }
        }
    }
    log::debug!("applied {} code point overrides", OVERRIDES.len());
    Ok(db)
}

/// Classifies code points against a database that has already been patched.
pub struct CategoryMapper {
    db: Database,
    table: CategoryTable,
}

impl CategoryMapper {
    /// Applies the overrides to `db` and takes ownership of the result.
    pub fn new(db: Database) -> Result<Self> {
        let table = CategoryTable::default();
        let db = apply_overrides(db, &table)?;
        Ok(Self { db, table })
    }

    pub fn classify(&self, cp: CodePoint) -> Option<GrammarRule> {
        let rec = self.db.get(cp)?;
        self.table.rule_for(rec.category)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
