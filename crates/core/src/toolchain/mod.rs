//! External compiler and disassembler invocation.
//!
//! The pipeline only needs two things from a toolchain: turn a source file
//! into an object file, and turn an object file into a textual listing in the
//! shape understood by [`crate::listing`]. [`GnuToolchain`] does this by
//! shelling out to a GNU cross compiler and `objdump -S -d`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the compiler binary.
pub const CXX_ENV: &str = "INSTCOUNT_CXX";
/// Environment variable overriding the disassembler binary.
pub const OBJDUMP_ENV: &str = "INSTCOUNT_OBJDUMP";

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("Failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}")]
    Failed { tool: String, status: String, output: String },
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ToolchainError {
    /// Captured tool output, if the tool ran and failed.
    pub fn output(&self) -> Option<&str> {
        match self {
            ToolchainError::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Compiles sources and disassembles objects.
pub trait Toolchain: Send + Sync {
    fn name(&self) -> &str;

    /// Compile `source` into `object`; `root` is the project root used for includes.
    fn compile(&self, source: &Path, object: &Path, root: &Path) -> Result<(), ToolchainError>;

    /// Disassemble `object` into a text listing at `listing`.
    fn disassemble(&self, object: &Path, listing: &Path) -> Result<(), ToolchainError>;
}

/// Serializable compiler/disassembler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub cxx: String,
    pub objdump: String,
    /// Language standard passed as `-std=`.
    pub std: String,
    /// Optimisation level passed as `-O`.
    pub opt_level: String,
    pub debug_info: bool,
    /// Include directories relative to the project root (the root itself is always included).
    pub include_dirs: Vec<String>,
    pub extra_flags: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            cxx: "aarch64-linux-gnu-g++".to_string(),
            objdump: "aarch64-linux-gnu-objdump".to_string(),
            std: "c++11".to_string(),
            opt_level: "2".to_string(),
            debug_info: true,
            include_dirs: vec![
                "../../../../ext/drampower/src".to_string(),
                "../lib/drampower/src".to_string(),
            ],
            extra_flags: Vec::new(),
        }
    }
}

impl ToolchainConfig {
    /// Apply `INSTCOUNT_CXX` / `INSTCOUNT_OBJDUMP` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(cxx) = std::env::var_os(CXX_ENV) {
            self.cxx = cxx.to_string_lossy().to_string();
        }
        if let Some(objdump) = std::env::var_os(OBJDUMP_ENV) {
            self.objdump = objdump.to_string_lossy().to_string();
        }
        self
    }
}

/// GNU toolchain driven through `std::process::Command`.
#[derive(Debug, Clone)]
pub struct GnuToolchain {
    pub config: ToolchainConfig,
}

impl GnuToolchain {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    /// Arguments passed to the compiler for one translation unit.
    pub fn compile_args(&self, source: &Path, object: &Path, root: &Path) -> Vec<OsString> {
        let cfg = &self.config;
        let mut args: Vec<OsString> = vec![
            format!("-std={}", cfg.std).into(),
            format!("-O{}", cfg.opt_level).into(),
        ];
        if cfg.debug_info {
            args.push("-g".into());
        }
        args.push(include_arg(root));
        for dir in &cfg.include_dirs {
            args.push(include_arg(&root.join(dir)));
        }
        args.extend(cfg.extra_flags.iter().map(OsString::from));
        args.push("-c".into());
        args.push(source.into());
        args.push("-o".into());
        args.push(object.into());
        args
    }

    /// Arguments passed to the disassembler.
    pub fn disassemble_args(&self, object: &Path) -> Vec<OsString> {
        vec!["-S".into(), "-d".into(), object.into()]
    }
}

impl Toolchain for GnuToolchain {
    fn name(&self) -> &str {
        &self.config.cxx
    }

    fn compile(&self, source: &Path, object: &Path, root: &Path) -> Result<(), ToolchainError> {
        let output = run(&self.config.cxx, &self.compile_args(source, object, root))?;
        if !output.status.success() {
            return Err(failure(&self.config.cxx, &output));
        }
        Ok(())
    }

    fn disassemble(&self, object: &Path, listing: &Path) -> Result<(), ToolchainError> {
        let output = run(&self.config.objdump, &self.disassemble_args(object))?;
        if !output.status.success() {
            return Err(failure(&self.config.objdump, &output));
        }
        fs::write(listing, &output.stdout)
            .map_err(|source| ToolchainError::Io { path: listing.to_path_buf(), source })
    }
}

fn include_arg(dir: &Path) -> OsString {
    let mut arg = OsString::from("-I");
    arg.push(dir);
    arg
}

fn run(tool: &str, args: &[OsString]) -> Result<Output, ToolchainError> {
    tracing::debug!(tool, ?args, "running tool");
    Command::new(tool)
        .args(args)
        .output()
        .map_err(|source| ToolchainError::Spawn { tool: tool.to_string(), source })
}

fn failure(tool: &str, output: &Output) -> ToolchainError {
    let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    ToolchainError::Failed {
        tool: tool.to_string(),
        status: output.status.to_string(),
        output: combined,
    }
}
