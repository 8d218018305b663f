//! Rendering of analysed functions into the cycle-table source literal, and
//! run metadata tying a generated table back to its inputs.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::{Category, FunctionReport};

/// SHA-256 of one analysed source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDigest {
    pub source_file: String,
    /// `None` when the file could not be read.
    pub sha256: Option<String>,
}

/// Metadata recorded for every generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub tool_version: String,
    pub root: String,
    /// Compiler used, or `None` for prebuilt listings.
    pub toolchain: Option<String>,
    pub started_at: String,
    pub finished_at: String,
    pub sources: Vec<SourceDigest>,
}

impl RunMetadata {
    pub fn start(root: &Path, toolchain: Option<String>) -> Self {
        Self {
            tool_version: crate::version().to_string(),
            root: root.display().to_string(),
            toolchain,
            started_at: now(),
            finished_at: String::new(),
            sources: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = now();
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Compute the SHA-256 of a file as a hex string.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Render one report as a cycle-table insertion.
///
/// `InstStat` takes branch, load, store, arithmetic, floating point and
/// other costs, in that order.
pub fn render_cpp_entry(report: &FunctionReport) -> String {
    let c = &report.costs;
    format!(
        "cpi.find({})->second.insert(\n    {{{}, InstStat({}, {}, {}, {}, {}, {}, clockPeriod)}});",
        report.namespace_code,
        report.function_code,
        c.get(Category::Branch),
        c.get(Category::Load),
        c.get(Category::Store),
        c.get(Category::Arithmetic),
        c.get(Category::FloatingPoint),
        c.get(Category::Other),
    )
}

/// Render all reports, one entry per line group, in the given order.
pub fn render_cpp(reports: &[FunctionReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "{}", render_cpp_entry(report));
    }
    out
}
