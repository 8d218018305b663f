//! instcount-core
//!
//! Core library for estimating per-function instruction-mix statistics from
//! textual disassembly listings.
//!
//! The crate locates a function's machine code inside an `objdump -S -d`
//! listing, classifies every instruction mnemonic against an ordered pattern
//! table and accumulates a weighted cycle cost per instruction category. The
//! surrounding orchestration (finding the project root, compiling and
//! disassembling sources, rendering the cycle table) lives here too so it is
//! fully testable and reusable from multiple frontends.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod layout;
pub mod listing;
pub mod model;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod toolchain;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
