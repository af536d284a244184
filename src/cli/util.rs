//! CLI utility helpers

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use suitegen::{sink, Error, RenderedSuite, Result};

/// Split `--methods` values on commas and whitespace
pub fn split_methods(values: &[String]) -> Vec<String> {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator =
        SEPARATOR.get_or_init(|| Regex::new(r"[,\s]+").expect("Failed to compile separator"));
    values
        .iter()
        .flat_map(|v| separator.split(v))
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where `--output` points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Dir(PathBuf),
    File(PathBuf),
}

impl OutputTarget {
    /// Resolve `--output`/`--filename`: an existing directory or a path
    /// without extension is a directory, anything else a file
    pub fn resolve(output: Option<&Path>, filename: Option<&str>) -> Self {
        match (output, filename) {
            (None, None) => OutputTarget::Stdout,
            (None, Some(name)) => OutputTarget::File(PathBuf::from(name)),
            (Some(dir), Some(name)) => OutputTarget::File(dir.join(name)),
            (Some(path), None) if path.is_dir() || path.extension().is_none() => {
                OutputTarget::Dir(path.to_path_buf())
            }
            (Some(path), None) => OutputTarget::File(path.to_path_buf()),
        }
    }

    /// Path a suite would be written to
    pub fn path_for(&self, suite: &RenderedSuite) -> Option<PathBuf> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::Dir(dir) => Some(sink::target_path(suite, dir)),
            OutputTarget::File(path) => Some(path.clone()),
        }
    }

    /// Write or print every suite
    pub fn emit(&self, suites: &[RenderedSuite]) -> Result<()> {
        if let OutputTarget::File(path) = self {
            if suites.len() > 1 {
                return Err(Error::Other(format!(
                    "{} suites cannot share one output file {}; pass a directory",
                    suites.len(),
                    path.display()
                )));
            }
        }

        for suite in suites {
            match self {
                OutputTarget::Stdout => print_suite(suite, suites.len() > 1),
                OutputTarget::Dir(dir) => {
                    let path = sink::persist(suite, dir)?;
                    eprintln!("Written to: {}", path.display());
                }
                OutputTarget::File(path) => {
                    sink::persist_as(suite, path)?;
                    eprintln!("Written to: {}", path.display());
                }
            }
        }
        Ok(())
    }
}

/// Print a suite to stdout, with a file banner when several are printed
pub fn print_suite(suite: &RenderedSuite, banner: bool) {
    if banner {
        println!("==> {} <==", suite.file_name);
    }
    print!("{}", suite.source);
    if banner {
        println!();
    }
}
