#![allow(dead_code)]

use std::path::{Path, PathBuf};

use cprun::ucd::{CodePoint, Database, GeneralCategory, UnicodeRecord, read_unicode_data};

pub fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/UnicodeData-sample.txt")
}

pub fn sample_db() -> Database {
    read_unicode_data(&sample_path()).expect("sample UnicodeData loads")
}

pub fn rec(name: &str, category: GeneralCategory) -> UnicodeRecord {
    UnicodeRecord {
        name: name.to_string(),
        category,
    }
}

/// A database where every code point in `range` has `category`.
pub fn block(range: std::ops::RangeInclusive<CodePoint>, category: GeneralCategory) -> Database {
    range.map(|cp| (cp, rec("TEST", category))).collect()
}
