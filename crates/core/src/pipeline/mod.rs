//! End-to-end generation: compile, disassemble, analyse.
//!
//! Every step is best-effort. A source that is missing or fails to build is
//! recorded as a [`StepFailure`]; a function whose listing does not exist is
//! recorded as a [`SkippedFunction`] and left out of the reports. Neither
//! stops the remaining work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{analyse_listing_file, AnalysisError};
use crate::catalog::FunctionCatalog;
use crate::layout::BuildLayout;
use crate::model::FunctionReport;
use crate::patterns::PatternTable;
use crate::report::{sha256_file, RunMetadata, SourceDigest};
use crate::toolchain::Toolchain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Compile,
    Disassemble,
    Analyse,
}

/// A step that did not complete for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub stage: Stage,
    pub source_file: String,
    pub message: String,
    /// Tool output, when a tool ran and failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// A catalog function with no listing to analyse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFunction {
    pub function: String,
    pub source_file: String,
    pub reason: String,
}

/// Everything a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRun {
    pub metadata: RunMetadata,
    pub reports: Vec<FunctionReport>,
    pub skipped: Vec<SkippedFunction>,
    pub failures: Vec<StepFailure>,
}

/// Coordinator tying a catalog, a pattern table and a build layout together.
///
/// With `toolchain: None` the layout must already contain the listings.
pub struct Generator<'a> {
    pub root: &'a Path,
    pub catalog: &'a FunctionCatalog,
    pub table: &'a PatternTable,
    pub toolchain: Option<&'a dyn Toolchain>,
    pub layout: &'a BuildLayout,
}

impl<'a> Generator<'a> {
    pub fn run(&self) -> GenerationRun {
        let mut run = GenerationRun {
            metadata: RunMetadata::start(self.root, self.toolchain.map(|t| t.name().to_string())),
            reports: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        };
        let files = self.catalog.source_files();

        if let Some(toolchain) = self.toolchain {
            tracing::info!(files = files.len(), "compiling sources");
            for file in &files {
                self.compile(toolchain, file, &mut run.failures);
            }
            tracing::info!("disassembling objects");
            for file in &files {
                self.disassemble(toolchain, file, &mut run.failures);
            }
        }

        tracing::info!(functions = self.catalog.len(), "analysing functions");
        for desc in &self.catalog.functions {
            let listing = self.layout.listing_path(&desc.source_file);
            match analyse_listing_file(&listing, &desc.function, self.table) {
                Ok(analysis) => run.reports.push(FunctionReport {
                    function: desc.function.clone(),
                    namespace_code: desc.namespace_code,
                    function_code: desc.function_code,
                    source_file: desc.source_file.clone(),
                    costs: analysis.costs,
                    instructions: analysis.instructions,
                    unknown_mnemonics: analysis.unknown,
                }),
                Err(AnalysisError::MissingListing(path)) => {
                    tracing::warn!(
                        function = %desc.function,
                        listing = %path.display(),
                        "listing for function does not exist"
                    );
                    run.skipped.push(SkippedFunction {
                        function: desc.function.clone(),
                        source_file: desc.source_file.clone(),
                        reason: format!("Listing not found at {}", path.display()),
                    });
                }
                Err(err) => {
                    tracing::warn!(function = %desc.function, error = %err, "analysis failed");
                    run.failures.push(StepFailure {
                        stage: Stage::Analyse,
                        source_file: desc.source_file.clone(),
                        message: err.to_string(),
                        output: None,
                    });
                }
            }
        }

        run.metadata.sources = files
            .iter()
            .map(|file| SourceDigest {
                source_file: file.to_string(),
                sha256: sha256_file(&self.root.join(file)).ok(),
            })
            .collect();
        run.metadata.finish();
        run
    }

    fn compile(&self, toolchain: &dyn Toolchain, file: &str, failures: &mut Vec<StepFailure>) {
        let source = self.root.join(file);
        if !source.is_file() {
            tracing::warn!(file, "source file does not exist");
            failures.push(StepFailure {
                stage: Stage::Compile,
                source_file: file.to_string(),
                message: format!("Source file not found at {}", source.display()),
                output: None,
            });
            return;
        }
        let object = self.layout.object_path(file);
        tracing::debug!(file, object = %object.display(), "compiling");
        if let Err(err) = toolchain.compile(&source, &object, self.root) {
            tracing::warn!(file, error = %err, "compilation failed");
            failures.push(StepFailure {
                stage: Stage::Compile,
                source_file: file.to_string(),
                message: err.to_string(),
                output: err.output().map(str::to_string),
            });
        }
    }

    fn disassemble(&self, toolchain: &dyn Toolchain, file: &str, failures: &mut Vec<StepFailure>) {
        let object = self.layout.object_path(file);
        if !object.is_file() {
            return;
        }
        let listing = self.layout.listing_path(file);
        tracing::debug!(file, listing = %listing.display(), "disassembling");
        if let Err(err) = toolchain.disassemble(&object, &listing) {
            tracing::warn!(file, error = %err, "disassembly failed");
            failures.push(StepFailure {
                stage: Stage::Disassemble,
                source_file: file.to_string(),
                message: err.to_string(),
                output: err.output().map(str::to_string),
            });
        }
    }
}
