use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use instcount_core::analysis::analyse_listing_file;
use instcount_core::listing::decode;
use instcount_core::model::CostVector;
use serde::Serialize;

use crate::commands::{format_costs, load_pattern_table};

#[derive(Debug, Serialize)]
pub struct AnalysedFunction {
    pub function: String,
    pub costs: CostVector,
    pub instructions: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub unknown_mnemonics: BTreeMap<String, u64>,
}

/// Analyse each named function of one listing.
pub fn analyse_functions(
    listing: &Path,
    functions: &[String],
    patterns: Option<&Path>,
) -> Result<Vec<AnalysedFunction>> {
    let table = load_pattern_table(patterns)?;
    functions
        .iter()
        .map(|function| -> Result<AnalysedFunction> {
            let analysis = analyse_listing_file(listing, function, &table).with_context(|| {
                format!("Failed to analyse {} in {}", function, listing.display())
            })?;
            Ok(AnalysedFunction {
                function: function.clone(),
                costs: analysis.costs,
                instructions: analysis.instructions,
                unknown_mnemonics: analysis.unknown,
            })
        })
        .collect()
}

pub fn analyse_command(
    listing: &Path,
    functions: &[String],
    patterns: Option<&Path>,
    json: bool,
) -> Result<()> {
    let results = analyse_functions(listing, functions, patterns)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for r in &results {
        println!(
            "{}: {} (total={}, instructions={})",
            r.function,
            format_costs(&r.costs),
            r.costs.total(),
            r.instructions
        );
        for (mnemonic, count) in &r.unknown_mnemonics {
            println!("  unknown: {mnemonic} x{count}");
        }
    }
    Ok(())
}

/// Mnemonics decoded from every instruction line of a listing, in order.
pub fn decode_listing(listing: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(listing)
        .with_context(|| format!("Failed to read listing {}", listing.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text
        .lines()
        .map(decode)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn decode_command(listing: &Path) -> Result<()> {
    for mnemonic in decode_listing(listing)? {
        println!("{mnemonic}");
    }
    Ok(())
}
