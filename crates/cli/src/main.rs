use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use instcount::commands::{
    analyse_command, classify_command, decode_command, find_root_command, generate_command,
    init_config_command, list_functions_command, list_patterns_command, GenerateOptions,
};
use instcount::default_log_filter;
use tracing_subscriber::EnvFilter;

/// Instruction counter for SimpleSSD firmware functions.
///
/// Compiles the firmware sources, disassembles the objects and classifies every
/// instruction of the catalogued functions into weighted per-category costs.
/// All substantive logic lives in `instcount-core`.
#[derive(Parser, Debug)]
#[command(
    name = "instcount",
    version,
    about = "Per-function instruction cost generator",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one or more bare mnemonics.
    Classify {
        /// Mnemonics to classify (e.g. `ldr`, `b.eq`).
        #[arg(required = true)]
        mnemonics: Vec<String>,

        /// Pattern table file (YAML or JSON). Defaults to the built-in AArch64 table.
        #[arg(long)]
        patterns: Option<PathBuf>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the mnemonic of every instruction line in a listing.
    Decode {
        /// Disassembly listing (`objdump -S -d` output).
        #[arg(long)]
        listing: PathBuf,
    },

    /// Compute the cost vector of functions in an existing listing.
    Analyse {
        /// Disassembly listing (`objdump -S -d` output).
        #[arg(long)]
        listing: PathBuf,

        /// Unmangled function name; repeat for several functions.
        #[arg(long = "function", required = true)]
        functions: Vec<String>,

        #[arg(long)]
        patterns: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Compile, disassemble and analyse every catalogued function.
    ///
    /// Writes the cycle-table entries (or the full run as JSON) to stdout or `--output`.
    Generate {
        /// Project root. Defaults to the nearest ancestor containing the root markers.
        #[arg(long)]
        root: Option<String>,

        /// Generator config file (YAML or JSON).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Function catalog file. Defaults to the config's catalog, then the built-in one.
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        patterns: Option<PathBuf>,

        /// Compiler binary (overrides config and INSTCOUNT_CXX).
        #[arg(long)]
        cxx: Option<String>,

        /// Disassembler binary (overrides config and INSTCOUNT_OBJDUMP).
        #[arg(long)]
        objdump: Option<String>,

        /// Use prebuilt listings from this directory instead of compiling.
        #[arg(long)]
        listings: Option<PathBuf>,

        /// Keep the temporary build directory.
        #[arg(long, default_value_t = false)]
        keep_build: bool,

        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the function catalog.
    ListFunctions {
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the classification rules in evaluation order.
    ListPatterns {
        #[arg(long)]
        patterns: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the detected project root.
    FindRoot {
        /// Directory to start searching from. Defaults to the current directory.
        #[arg(long)]
        start: Option<String>,

        /// Config file providing custom root markers.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a default generator config.
    InitConfig {
        /// Destination; `.yaml`/`.yml` writes YAML, anything else JSON.
        #[arg(long)]
        path: String,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(cli.verbose)));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {
        Command::Classify { mnemonics, patterns, json } => {
            classify_command(&mnemonics, patterns.as_deref(), json)?
        }
        Command::Decode { listing } => decode_command(&listing)?,
        Command::Analyse { listing, functions, patterns, json } => {
            analyse_command(&listing, &functions, patterns.as_deref(), json)?
        }
        Command::Generate {
            root,
            config,
            catalog,
            patterns,
            cxx,
            objdump,
            listings,
            keep_build,
            output,
            json,
        } => generate_command(&GenerateOptions {
            root,
            config,
            catalog,
            patterns,
            cxx,
            objdump,
            listings,
            keep_build,
            output,
            json,
        })?,
        Command::ListFunctions { catalog, json } => {
            list_functions_command(catalog.as_deref(), json)?
        }
        Command::ListPatterns { patterns, json } => {
            list_patterns_command(patterns.as_deref(), json)?
        }
        Command::FindRoot { start, config } => {
            find_root_command(start.as_deref(), config.as_deref())?
        }
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
    }

    Ok(())
}
