//! Core data model shared by the classifier, the aggregator and the reports.
//!
//! - `Category`: the closed set of instruction categories and their fixed codes.
//! - `CostVector`: accumulated cost per category for one function.
//! - `FunctionDescriptor`: one function of interest and the file that contains it.
//! - `FunctionReport`: the analysed result for one descriptor.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of instruction categories (and slots in a [`CostVector`]).
pub const CATEGORY_COUNT: usize = 6;

/// Instruction category.
///
/// The integer codes are consumed by the generated cycle table and must not
/// change without updating every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Other,
    Branch,
    Load,
    Store,
    Arithmetic,
    FloatingPoint,
}

impl Category {
    /// All categories in code order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Other,
        Category::Branch,
        Category::Load,
        Category::Store,
        Category::Arithmetic,
        Category::FloatingPoint,
    ];

    /// Fixed integer code of the category (0..=5).
    pub fn code(self) -> usize {
        match self {
            Category::Other => 0,
            Category::Branch => 1,
            Category::Load => 2,
            Category::Store => 3,
            Category::Arithmetic => 4,
            Category::FloatingPoint => 5,
        }
    }

    /// Decode a category code; `None` for codes outside 0..=5.
    pub fn from_code(code: usize) -> Option<Self> {
        Self::ALL.get(code).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Other => "other",
            Category::Branch => "branch",
            Category::Load => "load",
            Category::Store => "store",
            Category::Arithmetic => "arithmetic",
            Category::FloatingPoint => "floating_point",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted instruction cost accumulated per category.
///
/// Serialized as a plain six-element array in category-code order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostVector([u64; CATEGORY_COUNT]);

impl CostVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_array(costs: [u64; CATEGORY_COUNT]) -> Self {
        Self(costs)
    }

    pub fn add(&mut self, category: Category, cost: u64) {
        self.0[category.code()] += cost;
    }

    pub fn get(&self, category: Category) -> u64 {
        self.0[category.code()]
    }

    pub fn as_array(&self) -> [u64; CATEGORY_COUNT] {
        self.0
    }

    /// Sum over all categories.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| *c == 0)
    }
}

/// One function to analyse, together with its cycle-table codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Source file relative to the project root (e.g. `ftl/page_mapping.cc`).
    pub source_file: String,
    /// Unmangled function name (e.g. `readInternal`).
    pub function: String,
    /// Namespace code of the cycle table.
    pub namespace_code: u32,
    /// Function code of the cycle table.
    pub function_code: u32,
}

impl FunctionDescriptor {
    pub fn new(
        source_file: impl Into<String>,
        function: impl Into<String>,
        namespace_code: u32,
        function_code: u32,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            function: function.into(),
            namespace_code,
            function_code,
        }
    }
}

/// Analysed result for one [`FunctionDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub function: String,
    pub namespace_code: u32,
    pub function_code: u32,
    pub source_file: String,
    pub costs: CostVector,
    /// Instructions counted inside the function.
    #[serde(default)]
    pub instructions: u64,
    /// Mnemonics that matched no rule, with occurrence counts.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unknown_mnemonics: BTreeMap<String, u64>,
}
