use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use instcount_core::layout::BuildLayout;
use instcount_core::pipeline::{GenerationRun, Generator};
use instcount_core::report::render_cpp;
use instcount_core::toolchain::GnuToolchain;

use crate::canonicalize_or_current;
use crate::commands::{load_catalog, load_generator_config, load_pattern_table, resolve_root};

/// Inputs of the `generate` command; `None` means "use config or default".
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub root: Option<String>,
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub patterns: Option<PathBuf>,
    pub cxx: Option<String>,
    pub objdump: Option<String>,
    /// Directory of prebuilt `<stem>.asm` listings; skips compiling.
    pub listings: Option<PathBuf>,
    pub keep_build: bool,
    pub output: Option<PathBuf>,
    pub json: bool,
}

/// Resolve inputs and run the generation pipeline.
pub fn run_generation(opts: &GenerateOptions) -> Result<GenerationRun> {
    let config = load_generator_config(opts.config.as_deref())?;
    let root = match &opts.root {
        Some(root) => {
            let root = canonicalize_or_current(root)?;
            if !root.is_dir() {
                return Err(anyhow!("Project root does not exist: {}", root.display()));
            }
            root
        }
        None => resolve_root(None, &config)?,
    };
    let catalog = load_catalog(opts.catalog.as_deref().or(config.catalog.as_deref()))?;
    let table = load_pattern_table(opts.patterns.as_deref().or(config.patterns.as_deref()))?;
    tracing::info!(
        root = %root.display(),
        functions = catalog.len(),
        rules = table.len(),
        "starting generation"
    );

    if let Some(dir) = &opts.listings {
        if !dir.is_dir() {
            return Err(anyhow!("Listings directory does not exist: {}", dir.display()));
        }
        let layout = BuildLayout::prebuilt(dir);
        let generator = Generator {
            root: &root,
            catalog: &catalog,
            table: &table,
            toolchain: None,
            layout: &layout,
        };
        return Ok(generator.run());
    }

    let mut toolchain_config = config.toolchain.clone().with_env_overrides();
    if let Some(cxx) = &opts.cxx {
        toolchain_config.cxx = cxx.clone();
    }
    if let Some(objdump) = &opts.objdump {
        toolchain_config.objdump = objdump.clone();
    }
    let toolchain = GnuToolchain::new(toolchain_config);
    let layout = BuildLayout::create_in(&root)
        .with_context(|| format!("Failed to create build directory in {}", root.display()))?;

    let run = Generator {
        root: &root,
        catalog: &catalog,
        table: &table,
        toolchain: Some(&toolchain),
        layout: &layout,
    }
    .run();

    if opts.keep_build {
        let dir = layout.keep();
        eprintln!("Build directory kept at {}", dir.display());
    }
    Ok(run)
}

pub fn generate_command(opts: &GenerateOptions) -> Result<()> {
    let run = run_generation(opts)?;

    let body = if opts.json {
        let mut json =
            serde_json::to_string_pretty(&run).context("Failed to serialize generation run")?;
        json.push('\n');
        json
    } else {
        render_cpp(&run.reports)
    };

    match &opts.output {
        Some(path) => fs::write(path, &body)
            .with_context(|| format!("Failed to write output {}", path.display()))?,
        None => print!("{body}"),
    }

    eprintln!(
        "Generated {} entries ({} skipped, {} failures)",
        run.reports.len(),
        run.skipped.len(),
        run.failures.len()
    );
    for failure in &run.failures {
        eprintln!("  {:?} {}: {}", failure.stage, failure.source_file, failure.message);
    }
    Ok(())
}
