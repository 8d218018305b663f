use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::commands::load_pattern_table;

#[derive(Debug, Serialize)]
pub struct ClassifiedMnemonic {
    pub mnemonic: String,
    pub matched: bool,
    pub cost: u32,
    pub category: instcount_core::model::Category,
}

/// Classify each mnemonic against the pattern table.
pub fn classify_mnemonics(
    mnemonics: &[String],
    patterns: Option<&Path>,
) -> Result<Vec<ClassifiedMnemonic>> {
    let table = load_pattern_table(patterns)?;
    Ok(mnemonics
        .iter()
        .map(|m| {
            let c = table.classify(m);
            ClassifiedMnemonic {
                mnemonic: m.clone(),
                matched: c.matched,
                cost: c.cost,
                category: c.category,
            }
        })
        .collect())
}

pub fn classify_command(mnemonics: &[String], patterns: Option<&Path>, json: bool) -> Result<()> {
    let results = classify_mnemonics(mnemonics, patterns)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for r in results {
        let note = if r.matched { "" } else { " (unknown)" };
        println!("{}: {} cost={}{}", r.mnemonic, r.category, r.cost, note);
    }
    Ok(())
}

/// Print the rules of the active pattern table in evaluation order.
pub fn list_patterns_command(patterns: Option<&Path>, json: bool) -> Result<()> {
    let table = load_pattern_table(patterns)?;
    let rules: Vec<_> = table.rules().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    println!("Patterns ({}):", rules.len());
    for (index, rule) in rules.iter().enumerate() {
        println!("  {:>3}. {:<28} {:>3}  {}", index, rule.pattern, rule.cost, rule.category);
    }
    Ok(())
}
