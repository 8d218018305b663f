//! Catalog of functions to analyse.
//!
//! Each entry names a source file, the unmangled function name and the
//! namespace/function codes under which the result lands in the cycle table.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::parse_by_extension;
use crate::model::FunctionDescriptor;

/// Namespace codes of the cycle table, indexed by code.
pub const NAMESPACES: &[&str] = &[
    "FTL",
    "FTL::PageMapping",
    "ICL",
    "ICL::GenericCache",
    "HIL",
    "HIL::NVMe::Controller",
    "HIL::NVMe::PRPList",
    "HIL::NVMe::SGL",
    "HIL::NVMe::Subsystem",
    "HIL::NVMe::Namespace",
    "HIL::NVMe::OpenChannelSSD",
    "HIL::UFS::Device",
    "HIL::SATA::Device",
];

/// Function codes of the cycle table, indexed by code.
pub const FUNCTIONS: &[&str] = &[
    "read",
    "write",
    "flush",
    "trim",
    "format",
    "readInternal",
    "writeInternal",
    "eraseInternal",
    "trimInternal",
    "selectVictimBlock",
    "doGarbageCollection",
    "createCQ",
    "createSQ",
    "collectSQ",
    "handleRequest",
    "work",
    "completion",
    "getPRPListFromPRP",
    "parseSGLSegment",
    "submitCommand",
    "convertUnit",
    "formatNVM",
    "datasetManagement",
    "vectorChunkRead",
    "vectorChunkWrite",
    "vectorChunkReset",
    "physicalPageRead",
    "physicalPageWrite",
    "physicalBlockErase",
    "processQueryCommand",
    "processCommand",
    "prdtRead",
    "prdtWrite",
    "readDMA",
    "readNCQ",
    "readDMASetup",
    "readDMADone",
    "writeDMA",
    "writeNCQ",
    "writeDMASetup",
    "writeDMADone",
];

/// Built-in catalog as `(source file, function, namespace code, function code)`.
const BUILTIN: &[(&str, &str, u32, u32)] = &[
    ("ftl/ftl.cc", "read", 0, 0),
    ("ftl/ftl.cc", "write", 0, 1),
    ("ftl/ftl.cc", "trim", 0, 3),
    ("ftl/ftl.cc", "format", 0, 4),
    ("ftl/page_mapping.cc", "read", 1, 0),
    ("ftl/page_mapping.cc", "write", 1, 1),
    ("ftl/page_mapping.cc", "trim", 1, 3),
    ("ftl/page_mapping.cc", "format", 1, 4),
    ("ftl/page_mapping.cc", "selectVictimBlock", 1, 9),
    ("ftl/page_mapping.cc", "doGarbageCollection", 1, 10),
    ("ftl/page_mapping.cc", "readInternal", 1, 5),
    ("ftl/page_mapping.cc", "writeInternal", 1, 6),
    ("ftl/page_mapping.cc", "trimInternal", 1, 8),
    ("ftl/page_mapping.cc", "eraseInternal", 1, 7),
    ("icl/icl.cc", "read", 2, 0),
    ("icl/icl.cc", "write", 2, 1),
    ("icl/icl.cc", "flush", 2, 2),
    ("icl/icl.cc", "trim", 2, 3),
    ("icl/icl.cc", "format", 2, 4),
    ("icl/generic_cache.cc", "read", 3, 0),
    ("icl/generic_cache.cc", "write", 3, 1),
    ("icl/generic_cache.cc", "flush", 3, 2),
    ("icl/generic_cache.cc", "trim", 3, 3),
    ("icl/generic_cache.cc", "format", 3, 4),
    ("hil/hil.cc", "read", 4, 0),
    ("hil/hil.cc", "write", 4, 1),
    ("hil/hil.cc", "flush", 4, 2),
    ("hil/nvme/controller.cc", "handleRequest", 5, 14),
    ("hil/nvme/controller.cc", "collectSQ", 5, 13),
    ("hil/nvme/controller.cc", "completion", 5, 16),
    ("hil/nvme/controller.cc", "work", 5, 15),
    ("hil/nvme/controller.cc", "createCQ", 5, 11),
    ("hil/nvme/controller.cc", "createSQ", 5, 12),
    ("hil/nvme/dma.cc", "getPRPListFromPRP", 6, 17),
    ("hil/nvme/dma.cc", "read", 6, 0),
    ("hil/nvme/dma.cc", "write", 6, 1),
    ("hil/nvme/dma.cc", "parseSGLSegment", 7, 18),
    ("hil/nvme/dma.cc", "read", 7, 0),
    ("hil/nvme/dma.cc", "write", 7, 1),
    ("hil/nvme/subsystem.cc", "submitCommand", 8, 19),
    ("hil/nvme/subsystem.cc", "convertUnit", 8, 20),
    ("hil/nvme/subsystem.cc", "formatNVM", 8, 21),
    ("hil/nvme/namespace.cc", "submitCommand", 9, 19),
    ("hil/nvme/namespace.cc", "read", 9, 0),
    ("hil/nvme/namespace.cc", "write", 9, 1),
    ("hil/nvme/namespace.cc", "flush", 9, 2),
    ("hil/nvme/namespace.cc", "datasetManagement", 9, 22),
    ("hil/nvme/ocssd.cc", "submitCommand", 10, 19),
    ("hil/nvme/ocssd.cc", "read", 10, 0),
    ("hil/nvme/ocssd.cc", "write", 10, 1),
    ("hil/nvme/ocssd.cc", "datasetManagement", 10, 22),
    ("hil/nvme/ocssd.cc", "readInternal", 10, 5),
    ("hil/nvme/ocssd.cc", "writeInternal", 10, 6),
    ("hil/nvme/ocssd.cc", "eraseInternal", 10, 7),
    ("hil/nvme/ocssd.cc", "convertUnit", 10, 20),
    ("hil/nvme/ocssd.cc", "vectorChunkRead", 10, 23),
    ("hil/nvme/ocssd.cc", "vectorChunkWrite", 10, 24),
    ("hil/nvme/ocssd.cc", "vectorChunkReset", 10, 25),
    ("hil/nvme/ocssd.cc", "physicalPageRead", 10, 26),
    ("hil/nvme/ocssd.cc", "physicalPageWrite", 10, 27),
    ("hil/nvme/ocssd.cc", "physicalBlockErase", 10, 28),
    ("hil/ufs/device.cc", "processQueryCommand", 11, 29),
    ("hil/ufs/device.cc", "processCommand", 11, 30),
    ("hil/ufs/device.cc", "prdtRead", 11, 31),
    ("hil/ufs/device.cc", "prdtWrite", 11, 32),
    ("hil/ufs/device.cc", "read", 11, 0),
    ("hil/ufs/device.cc", "write", 11, 1),
    ("hil/ufs/device.cc", "flush", 11, 2),
    ("hil/sata/device.cc", "submitCommand", 12, 19),
    ("hil/sata/device.cc", "prdtRead", 12, 31),
    ("hil/sata/device.cc", "prdtWrite", 12, 32),
    ("hil/sata/device.cc", "read", 12, 0),
    ("hil/sata/device.cc", "write", 12, 1),
    ("hil/sata/device.cc", "flush", 12, 2),
    ("hil/sata/device.cc", "readDMA", 12, 33),
    ("hil/sata/device.cc", "readNCQ", 12, 34),
    ("hil/sata/device.cc", "_readDMASetup", 12, 35),
    ("hil/sata/device.cc", "_readDMADone", 12, 36),
    ("hil/sata/device.cc", "writeDMA", 12, 37),
    ("hil/sata/device.cc", "writeNCQ", 12, 38),
    ("hil/sata/device.cc", "_writeDMASetup", 12, 39),
    ("hil/sata/device.cc", "_writeDMADone", 12, 40),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read function catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse function catalog {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Function catalog is empty")]
    Empty,
    #[error("Catalog entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Ordered list of functions to analyse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCatalog {
    pub functions: Vec<FunctionDescriptor>,
}

impl FunctionCatalog {
    pub fn new(functions: Vec<FunctionDescriptor>) -> Self {
        Self { functions }
    }

    /// The catalog of FTL, ICL and HIL functions shipped with the tool.
    pub fn builtin() -> Self {
        let functions = BUILTIN
            .iter()
            .map(|(file, name, ns, fct)| FunctionDescriptor::new(*file, *name, *ns, *fct))
            .collect();
        Self { functions }
    }

    /// Load a catalog from a `.yaml`/`.yml` or `.json` file and validate it.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let body = fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        let catalog: FunctionCatalog = parse_by_extension(path, &body)
            .map_err(|message| CatalogError::Parse { path: path.to_path_buf(), message })?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.functions.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, desc) in self.functions.iter().enumerate() {
            if desc.source_file.trim().is_empty() {
                return Err(CatalogError::InvalidEntry {
                    index,
                    reason: "'source_file' is required".to_string(),
                });
            }
            if desc.function.trim().is_empty() {
                return Err(CatalogError::InvalidEntry {
                    index,
                    reason: "'function' is required".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Distinct source files, sorted.
    pub fn source_files(&self) -> Vec<&str> {
        let files: BTreeSet<&str> =
            self.functions.iter().map(|f| f.source_file.as_str()).collect();
        files.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Name of a namespace code in the built-in code table.
pub fn namespace_name(code: u32) -> Option<&'static str> {
    NAMESPACES.get(code as usize).copied()
}

/// Name of a function code in the built-in code table.
pub fn function_name(code: u32) -> Option<&'static str> {
    FUNCTIONS.get(code as usize).copied()
}
