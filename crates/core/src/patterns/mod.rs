//! Ordered mnemonic pattern table and the first-match classifier.
//!
//! Each rule is a case-insensitive regular expression over a bare mnemonic.
//! A rule only counts when its match, anchored at the start, covers the whole
//! mnemonic. Matching is leftmost-first like a backtracking engine, so a rule
//! such as `FCMP(E|P|PE|)` stops at `FCMPP` for `FCMPPE` and does not match it.
//! There is no longest-match resolution: table order decides.

mod aarch64;

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::parse_by_extension;
use crate::model::Category;

pub use aarch64::AARCH64_RULES;

/// One `(pattern, cost, category)` classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnemonicRule {
    pub pattern: String,
    pub cost: u32,
    pub category: Category,
}

impl MnemonicRule {
    pub fn new(pattern: impl Into<String>, cost: u32, category: Category) -> Self {
        Self { pattern: pattern.into(), cost, category }
    }
}

/// Outcome of classifying one mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub matched: bool,
    pub cost: u32,
    pub category: Category,
}

impl Classification {
    /// Fallback for mnemonics no rule matches.
    pub const UNKNOWN: Classification =
        Classification { matched: false, cost: 1, category: Category::Other };
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid mnemonic pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    #[error("Rule '{0}' has cost 0; costs must be positive")]
    ZeroCost(String),
    #[error("Failed to read pattern table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse pattern table {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// On-disk form of a custom table (YAML or JSON).
#[derive(Debug, Serialize, Deserialize)]
pub struct PatternFile {
    pub rules: Vec<MnemonicRule>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: MnemonicRule,
    regex: Regex,
}

/// Immutable ordered rule catalog with compiled regexes.
#[derive(Debug, Clone)]
pub struct PatternTable {
    rules: Vec<CompiledRule>,
}

impl PatternTable {
    /// Compile `rules`, keeping their order.
    pub fn from_rules(rules: Vec<MnemonicRule>) -> Result<Self, PatternError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            if rule.cost == 0 {
                return Err(PatternError::ZeroCost(rule.pattern));
            }
            let regex = Regex::new(&format!("(?i)^(?:{})", rule.pattern)).map_err(|e| {
                PatternError::InvalidPattern { pattern: rule.pattern.clone(), source: Box::new(e) }
            })?;
            compiled.push(CompiledRule { rule, regex });
        }
        Ok(Self { rules: compiled })
    }

    /// Built-in AArch64 table.
    pub fn aarch64() -> Self {
        let rules = AARCH64_RULES
            .iter()
            .map(|(pattern, cost, category)| MnemonicRule::new(*pattern, *cost, *category))
            .collect();
        Self::from_rules(rules).expect("built-in AArch64 patterns must compile")
    }

    /// Load a custom table from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, PatternError> {
        let body = fs::read_to_string(path)
            .map_err(|source| PatternError::Io { path: path.to_path_buf(), source })?;
        let file: PatternFile = parse_by_extension(path, &body)
            .map_err(|message| PatternError::Parse { path: path.to_path_buf(), message })?;
        Self::from_rules(file.rules)
    }

    /// Classify a bare mnemonic; the first rule matching the whole string wins.
    pub fn classify(&self, mnemonic: &str) -> Classification {
        for compiled in &self.rules {
            let full = compiled.regex.find(mnemonic).is_some_and(|m| m.end() == mnemonic.len());
            if full {
                return Classification {
                    matched: true,
                    cost: compiled.rule.cost,
                    category: compiled.rule.category,
                };
            }
        }
        Classification::UNKNOWN
    }

    pub fn rules(&self) -> impl Iterator<Item = &MnemonicRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::aarch64()
    }
}
