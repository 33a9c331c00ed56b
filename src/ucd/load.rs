// src/ucd/load.rs
// Reader for UnicodeData.txt:
//   <code point hex>;<name>;<general category>;...   (15 fields, only 3 used)
// Large blocks are listed as a "<Block, First>" line followed by "<Block, Last>".

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    time::Instant,
};

use super::{CodePoint, Database, GeneralCategory, MAX_CODE_POINT, UnicodeRecord};
use crate::error::{CprunError, Result};

fn parse_err(line: usize, message: impl Into<String>) -> CprunError {
    CprunError::Parse {
        line,
        message: message.into(),
    }
}

enum RangeMark<'a> {
    First(&'a str),
    Last(&'a str),
}

fn range_mark(name: &str) -> Option<RangeMark<'_>> {
    let inner = name.strip_prefix('<')?.strip_suffix('>')?;
    if let Some(block) = inner.strip_suffix(", First") {
        Some(RangeMark::First(block))
    } else {
        inner.strip_suffix(", Last").map(RangeMark::Last)
    }
}

pub fn parse_unicode_data<R: BufRead>(reader: R) -> Result<Database> {
    let mut db = Database::new();
    // (first code point, block name, category, line of the First entry)
    let mut open: Option<(CodePoint, String, GeneralCategory, usize)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let lineno = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(';').collect();
        if fields.len() < 3 {
            return Err(parse_err(lineno, format!("expected at least 3 fields, got {}", fields.len())));
        }
        let cp = CodePoint::from_str_radix(fields[0], 16)
            .map_err(|e| parse_err(lineno, format!("bad code point {:?}: {e}", fields[0])))?;
        if cp > MAX_CODE_POINT {
            return Err(parse_err(lineno, format!("code point {cp:#x} out of range")));
        }
        let category = GeneralCategory::parse(fields[2])
            .map_err(|e| parse_err(lineno, e.to_string()))?;
        let name = fields[1];

        match range_mark(name) {
            Some(RangeMark::First(block)) => {
                if let Some((_, prev, _, at)) = &open {
                    return Err(parse_err(lineno, format!("range {prev:?} opened at line {at} was never closed")));
                }
                open = Some((cp, block.to_string(), category, lineno));
            }
            Some(RangeMark::Last(block)) => {
                let Some((first, opened, first_cat, _)) = open.take() else {
                    return Err(parse_err(lineno, format!("{block:?} Last without First")));
                };
                if opened != block || first > cp {
                    return Err(parse_err(lineno, format!("{block:?} Last does not match {opened:?} First")));
                }
                for c in first..=cp {
                    db.insert(
                        c,
                        UnicodeRecord {
                            name: format!("{block}-{c:04X}"),
                            category: first_cat,
                        },
                    );
                }
            }
            None => {
                if let Some((_, block, _, at)) = &open {
                    return Err(parse_err(lineno, format!("entry inside range {block:?} opened at line {at}")));
                }
                db.insert(
                    cp,
                    UnicodeRecord {
                        name: name.to_string(),
                        category,
                    },
                );
            }
        }
    }

    if let Some((_, block, _, at)) = open {
        return Err(parse_err(at, format!("range {block:?} has no Last entry")));
    }
    Ok(db)
}

pub fn read_unicode_data(path: &Path) -> Result<Database> {
    let t0 = Instant::now();
    let f = File::open(path)?;
    let db = parse_unicode_data(BufReader::new(f))?;
    log::info!(
        "loaded {} code points from {} in {} ms",
        db.len(),
        path.display(),
        t0.elapsed().as_millis()
    );
    Ok(db)
}
