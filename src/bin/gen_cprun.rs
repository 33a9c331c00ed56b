// src/bin/gen_cprun.rs
// Build the code point run table from UnicodeData.txt.
// Usage:
//   cargo run --bin gen_cprun                                # writes tables/cprun.rs
//   cargo run --bin gen_cprun -- -u UnicodeData.txt -o tables/cprun.bin
//   cargo run --bin gen_cprun -- --dump                      # print the database

use std::{fs, io};

use anyhow::{Context, Result};
use cprun::{
    config::GenConfig,
    tables::{build_table, save_table},
    ucd::{dump, read_unicode_data},
};

fn main() -> Result<()> {
    let cfg = GenConfig::from_args()?;

    let db = read_unicode_data(&cfg.unicode_data)
        .with_context(|| format!("reading {}", cfg.unicode_data.display()))?;

    if cfg.dump {
        return dump(&db, io::stdout().lock()).context("dumping database");
    }

    println!("[gen_cprun] {} code points loaded, encoding…", db.len());
    let (mapper, summary) = build_table(db, cfg.verify).context("building run table")?;
    println!(
        "[gen_cprun] {} runs, longest = {}, verified = {}",
        summary.runs.len(),
        summary.longest_run,
        cfg.verify
    );

    if let Some(parent) = cfg.output.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    save_table(&cfg.output, &summary.runs, mapper.database())
        .with_context(|| format!("writing {}", cfg.output.display()))?;

    let bytes = summary.runs.len() * 4;
    println!(
        "[gen_cprun] wrote {} records ({} bytes packed) → {}",
        summary.runs.len(),
        bytes,
        cfg.output.display()
    );
    Ok(())
}
