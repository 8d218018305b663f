//! Per-function cost aggregation over a disassembly listing.
//!
//! Drives [`Extractor`] over the listing, classifies every instruction of the
//! target function against a [`PatternTable`] and sums the rule costs into a
//! [`CostVector`]. Unknown mnemonics never abort the analysis: they count as
//! `Other` with cost 1 and are reported through `tracing`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::{Extractor, LineKind};
use crate::model::CostVector;
use crate::patterns::PatternTable;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Listing not found at {0}")]
    MissingListing(PathBuf),
    #[error("Failed to read listing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of analysing one function, with the diagnostics gathered on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionAnalysis {
    pub costs: CostVector,
    /// Number of instruction lines counted.
    pub instructions: u64,
    /// Unknown mnemonic -> occurrences.
    pub unknown: BTreeMap<String, u64>,
}

/// Cost vector of `function` in `lines`.
///
/// All zero when the function's header never appears.
pub fn analyse<I, S>(lines: I, function: &str, table: &PatternTable) -> CostVector
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    analyse_detailed(lines, function, table).costs
}

/// Like [`analyse`], also returning the instruction count and unknown mnemonics.
pub fn analyse_detailed<I, S>(lines: I, function: &str, table: &PatternTable) -> FunctionAnalysis
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extractor = Extractor::new(function);
    let mut result = FunctionAnalysis::default();

    for line in lines {
        let LineKind::Instruction(mnemonic) = extractor.feed(line.as_ref()) else {
            continue;
        };
        let class = table.classify(mnemonic);
        if !class.matched {
            tracing::warn!(function, mnemonic, "unknown instruction, counted as other");
            *result.unknown.entry(mnemonic.to_string()).or_default() += 1;
        }
        result.costs.add(class.category, u64::from(class.cost));
        result.instructions += 1;
    }

    if result.instructions == 0 {
        tracing::debug!(function, label = extractor.label(), "no instructions found for function");
    }
    result
}

/// Stream the listing at `path` and analyse `function` in it.
pub fn analyse_listing_file(
    path: &Path,
    function: &str,
    table: &PatternTable,
) -> Result<FunctionAnalysis, AnalysisError> {
    if !path.is_file() {
        return Err(AnalysisError::MissingListing(path.to_path_buf()));
    }
    let file = File::open(path)
        .map_err(|source| AnalysisError::Io { path: path.to_path_buf(), source })?;

    let mut read_error = None;
    let lines = LossyLines::new(BufReader::new(file)).map_while(|line| match line {
        Ok(line) => Some(line),
        Err(e) => {
            read_error = Some(e);
            None
        }
    });
    let analysis = analyse_detailed(lines, function, table);

    match read_error {
        Some(source) => Err(AnalysisError::Io { path: path.to_path_buf(), source }),
        None => Ok(analysis),
    }
}

/// Forward-only line iterator tolerating invalid UTF-8 and `\r\n` endings.
struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new() }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                    self.buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
