// src/config.rs
// Generator settings: command line first, then CPRUN_* environment variables,
// then defaults.

use std::{env, path::PathBuf};

use anyhow::{Result, anyhow, bail};

pub const DEFAULT_UNICODE_DATA: &str = "./UnicodeData.txt";
pub const DEFAULT_OUTPUT: &str = "tables/cprun.rs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub unicode_data: PathBuf,
    pub output: PathBuf,
    pub dump: bool,
    pub verify: bool,
}

fn env_path(name: &str, default: &str) -> PathBuf {
    env::var_os(name)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(s) => !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
        Err(_) => default,
    }
}

impl GenConfig {
    pub fn from_env() -> Self {
        Self {
            unicode_data: env_path("CPRUN_UNICODE_DATA", DEFAULT_UNICODE_DATA),
            output: env_path("CPRUN_OUT", DEFAULT_OUTPUT),
            dump: false,
            verify: env_bool("CPRUN_VERIFY", true),
        }
    }

    /// Parses flags (without the program name) on top of `self`.
    pub fn with_args<I>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-u" | "--unicode-data" => {
                    let v = args.next().ok_or_else(|| anyhow!("{arg} needs a path"))?;
                    self.unicode_data = PathBuf::from(v);
                }
                "-o" | "--output" => {
                    let v = args.next().ok_or_else(|| anyhow!("{arg} needs a path"))?;
                    self.output = PathBuf::from(v);
                }
                "-d" | "--dump" => self.dump = true,
                "--no-verify" => self.verify = false,
                other => bail!("unknown argument {other:?}"),
            }
        }
        Ok(self)
    }

    pub fn from_args() -> Result<Self> {
        Self::from_env().with_args(env::args().skip(1))
    }
}
