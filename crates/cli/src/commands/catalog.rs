use std::path::Path;

use anyhow::Result;
use instcount_core::catalog::{function_name, namespace_name};

use crate::commands::load_catalog;

/// List the functions a generation run would analyse.
pub fn list_functions_command(catalog: Option<&Path>, json: bool) -> Result<()> {
    let catalog = load_catalog(catalog)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog.functions)?);
        return Ok(());
    }

    println!(
        "Functions ({} in {} source files):",
        catalog.len(),
        catalog.source_files().len()
    );
    for desc in &catalog.functions {
        let ns = namespace_name(desc.namespace_code).unwrap_or("?");
        let fct = function_name(desc.function_code).unwrap_or("?");
        println!(
            "  - {} ({}) -> {}::{} [{}, {}]",
            desc.function, desc.source_file, ns, fct, desc.namespace_code, desc.function_code
        );
    }
    Ok(())
}
