use std::path::Path;

use anyhow::{Context, Result};
use instcount_core::catalog::FunctionCatalog;
use instcount_core::model::{Category, CostVector};
use instcount_core::patterns::PatternTable;

/// Load a pattern table from `path`, or the built-in AArch64 table.
pub fn load_pattern_table(path: Option<&Path>) -> Result<PatternTable> {
    match path {
        Some(path) => PatternTable::load(path)
            .with_context(|| format!("Failed to load pattern table {}", path.display())),
        None => Ok(PatternTable::aarch64()),
    }
}

/// Load and validate a function catalog from `path`, or the built-in catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<FunctionCatalog> {
    match path {
        Some(path) => FunctionCatalog::load(path)
            .with_context(|| format!("Failed to load function catalog {}", path.display())),
        None => Ok(FunctionCatalog::builtin()),
    }
}

/// `other=0 branch=1 ...` in category-code order.
pub fn format_costs(costs: &CostVector) -> String {
    Category::ALL
        .iter()
        .map(|c| format!("{}={}", c, costs.get(*c)))
        .collect::<Vec<_>>()
        .join(" ")
}
