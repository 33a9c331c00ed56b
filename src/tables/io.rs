// src/tables/io.rs
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use serde::{Deserialize, Serialize};

use super::{
    record::Run,
    rules::{ALL_RULES, CODE_POINT_BITS, GrammarRule, IDENTIFIER_MASK, RULE_BITS, RUN_LENGTH_BITS},
};
use crate::{
    error::{CprunError, Result},
    ucd::{CodePoint, Database},
};

// -------------------- JSON (de)serialization --------------------

#[derive(Serialize, Deserialize)]
struct RunDisk {
    code_point: CodePoint,
    length: u32,
    rule: GrammarRule,
}

#[derive(Serialize, Deserialize)]
struct TableDisk {
    runs: Vec<RunDisk>,
}

impl From<&[Run]> for TableDisk {
    fn from(runs: &[Run]) -> Self {
        Self {
            runs: runs
                .iter()
                .map(|r| RunDisk {
                    code_point: r.code_point(),
                    length: r.length(),
                    rule: r.rule(),
                })
                .collect(),
        }
    }
}

impl TableDisk {
    fn into_runs(self) -> Result<Vec<Run>> {
        self.runs
            .into_iter()
            .map(|d| Run::new(d.code_point, d.length, d.rule))
            .collect()
    }
}

pub fn save_table_json(path: &Path, runs: &[Run]) -> Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &TableDisk::from(runs))?;
    w.flush()?;
    Ok(())
}

pub fn load_table_json_bytes(data: &[u8]) -> Result<Vec<Run>> {
    serde_json::from_slice::<TableDisk>(data)?.into_runs()
}

// -------------------- Compact binary --------------------
//   magic: 8 bytes = "CPRUN001"
//   u32:   record count
//   u32:   reserved (0)
//   u32:   packed run[count]

const BIN_MAGIC: &[u8; 8] = b"CPRUN001";

pub fn write_table_bin<W: Write>(mut w: W, runs: &[Run]) -> Result<()> {
    let count = u32::try_from(runs.len())
        .map_err(|_| CprunError::BadArtifact(format!("{} runs exceed u32::MAX", runs.len())))?;
    w.write_all(BIN_MAGIC)?;
    w.write_all(&count.to_le_bytes())?;
    w.write_all(&0u32.to_le_bytes())?;
    for r in runs {
        w.write_all(&r.pack().to_le_bytes())?;
    }
    w.flush()?;
    Ok(())
}

pub fn save_table_bin(path: &Path, runs: &[Run]) -> Result<()> {
    let f = File::create(path)?;
    write_table_bin(BufWriter::new(f), runs)
}

pub fn load_table_bin_bytes(mut data: &[u8]) -> Result<Vec<Run>> {
    if data.len() < 8 + 4 + 4 {
        return Err(CprunError::BadArtifact("bin too short".into()));
    }
    if &data[..8] != BIN_MAGIC {
        return Err(CprunError::BadArtifact("bad magic in cprun .bin".into()));
    }
    data = &data[8..];

    let read_u32 = |buf: &mut &[u8]| -> Result<u32> {
        if buf.len() < 4 {
            return Err(CprunError::BadArtifact("truncated u32".into()));
        }
        let mut le = [0u8; 4];
        le.copy_from_slice(&buf[..4]);
        *buf = &buf[4..];
        Ok(u32::from_le_bytes(le))
    };

    let count = read_u32(&mut data)? as usize;
    let _reserved = read_u32(&mut data)?;
    let mut runs = Vec::with_capacity(count.min(data.len() / 4));
    for _ in 0..count {
        runs.push(Run::unpack(read_u32(&mut data)?)?);
    }
    if !data.is_empty() {
        return Err(CprunError::BadArtifact(format!("{} trailing bytes", data.len())));
    }
    Ok(runs)
}

// -------------------- Rust source --------------------

pub fn render_rust_source<W: Write>(mut w: W, runs: &[Run], db: &Database) -> Result<()> {
    writeln!(w, "// This file was auto-generated by gen_cprun. DO NOT EDIT!")?;
    writeln!(w)?;
    writeln!(w, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]")?;
    writeln!(w, "#[repr(u8)]")?;
    writeln!(w, "pub enum GrammarRule {{")?;
    for rule in ALL_RULES {
        writeln!(w, "    {rule:?} = {:#04b},", rule.bits())?;
    }
    writeln!(w, "}}")?;
    writeln!(w)?;
    writeln!(w, "pub const IDENTIFIER_MASK: u8 = {IDENTIFIER_MASK:#04b};")?;
    writeln!(w, "pub const CODE_POINT_BITS: u32 = {CODE_POINT_BITS};")?;
    writeln!(w, "pub const RUN_LENGTH_BITS: u32 = {RUN_LENGTH_BITS};")?;
    writeln!(w, "pub const RULE_BITS: u32 = {RULE_BITS};")?;
    writeln!(w)?;
    writeln!(
        w,
        "/// One run, packed as code_point | length << {CODE_POINT_BITS} | rule << {}.",
        CODE_POINT_BITS + RUN_LENGTH_BITS
    )?;
    writeln!(w, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]")?;
    writeln!(w, "pub struct Cprun(pub u32);")?;
    writeln!(w)?;
    writeln!(w, "impl Cprun {{")?;
    writeln!(w, "    pub const fn code_point(self) -> u32 {{")?;
    writeln!(w, "        self.0 & ((1 << CODE_POINT_BITS) - 1)")?;
    writeln!(w, "    }}")?;
    writeln!(w)?;
    writeln!(w, "    pub const fn length(self) -> u32 {{")?;
    writeln!(w, "        (self.0 >> CODE_POINT_BITS) & ((1 << RUN_LENGTH_BITS) - 1)")?;
    writeln!(w, "    }}")?;
    writeln!(w)?;
    writeln!(w, "    pub const fn rule(self) -> GrammarRule {{")?;
    writeln!(w, "        match self.0 >> (CODE_POINT_BITS + RUN_LENGTH_BITS) {{")?;
    for rule in ALL_RULES {
        if rule == GrammarRule::IdentifierPart {
            // 0b10 is never emitted.
            writeln!(w, "            _ => GrammarRule::{rule:?},")?;
        } else {
            writeln!(w, "            {:#04b} => GrammarRule::{rule:?},", rule.bits())?;
        }
    }
    writeln!(w, "        }}")?;
    writeln!(w, "    }}")?;
    writeln!(w, "}}")?;
    writeln!(w)?;
    writeln!(w, "#[rustfmt::skip]")?;
    writeln!(w, "pub static CODE_POINT_RUNS: [Cprun; {}] = [", runs.len())?;
    for r in runs {
        let name = db.get(r.code_point()).map_or("", |rec| rec.name.as_str());
        writeln!(
            w,
            "    Cprun({:#010x}), // U+{:04X}+{} {} ({})",
            r.pack(),
            r.code_point(),
            r.length(),
            name,
            r.rule().name()
        )?;
    }
    writeln!(w, "];")?;
    w.flush()?;
    Ok(())
}

/// Writes `runs` in the format implied by the extension of `path`
/// (`.json`, `.bin`, anything else as Rust source).
pub fn save_table(path: &Path, runs: &[Run], db: &Database) -> Result<()> {
    let instant = Instant::now();
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => save_table_json(path, runs)?,
        Some("bin") => save_table_bin(path, runs)?,
        _ => render_rust_source(BufWriter::new(File::create(path)?), runs, db)?,
    }
    log::info!(
        "saved {} runs to {} in {} ms",
        runs.len(),
        path.display(),
        instant.elapsed().as_millis()
    );
    Ok(())
}
