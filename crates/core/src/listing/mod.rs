//! Line-level parsing of `objdump -d` style listings.
//!
//! Two kinds of lines matter:
//! - instruction lines: `<hex address>:\t<hex bytes>\t<mnemonic>[.<suffix>][ <operands>]`
//! - symbol headers: `<16 hex digit address> <symbol>:`
//!
//! Everything else (interleaved source, section banners, blank lines) is ignored.

use std::sync::OnceLock;

use regex::Regex;

fn instruction_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9a-f ]+:\t[0-9a-f ]+\t([\w.]+)").expect("static regex must compile")
    })
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9a-f]{16} <").expect("static regex must compile"))
}

/// Extract the mnemonic of an instruction line, or `""` for any other line.
///
/// Dotted condition suffixes are kept (`b.ne`); operands are dropped.
pub fn decode(line: &str) -> &str {
    instruction_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Encode a function name as `<byte length><name>`, the form it takes inside
/// an Itanium-mangled C++ symbol.
pub fn mangled_label(function: &str) -> String {
    format!("{}{}", function.len(), function)
}

/// Boundary classification of a single listing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Not a symbol header.
    NotBoundary,
    /// A header whose symbol contains the target label.
    EnterOrContinue,
    /// A header for some other symbol.
    Exit,
}

/// Classify `line` against the mangled `label` (see [`mangled_label`]).
///
/// The label is substring-matched against the whole header line.
pub fn match_function_boundary(line: &str, label: &str) -> Boundary {
    if !header_regex().is_match(line) {
        Boundary::NotBoundary
    } else if line.contains(label) {
        Boundary::EnterOrContinue
    } else {
        Boundary::Exit
    }
}

/// Whether the extractor is currently inside the target function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorState {
    Outside,
    Inside,
}

/// What [`Extractor::feed`] made of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Outside the function, or inside but not an instruction.
    Skipped,
    /// A symbol header; never classified.
    Header,
    /// An instruction of the target function.
    Instruction(&'a str),
}

/// Two-state scanner selecting the instruction lines of one function.
///
/// The block starts at a header containing the label and ends at the next
/// header for a different symbol. A function running to the end of the
/// listing is still collected. After leaving, a later header containing the
/// label re-enters, so every matching block of the listing is selected.
#[derive(Debug, Clone)]
pub struct Extractor {
    label: String,
    state: ExtractorState,
}

impl Extractor {
    pub fn new(function: &str) -> Self {
        Self { label: mangled_label(function), state: ExtractorState::Outside }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> ExtractorState {
        self.state
    }

    /// Advance over one listing line.
    pub fn feed<'a>(&mut self, line: &'a str) -> LineKind<'a> {
        let boundary = match_function_boundary(line, &self.label);
        match (self.state, boundary) {
            (ExtractorState::Outside, Boundary::EnterOrContinue) => {
                self.state = ExtractorState::Inside;
                LineKind::Header
            }
            (ExtractorState::Outside, Boundary::Exit) => LineKind::Header,
            (ExtractorState::Outside, Boundary::NotBoundary) => LineKind::Skipped,
            (ExtractorState::Inside, Boundary::Exit) => {
                self.state = ExtractorState::Outside;
                LineKind::Header
            }
            (ExtractorState::Inside, Boundary::EnterOrContinue) => LineKind::Header,
            (ExtractorState::Inside, Boundary::NotBoundary) => match decode(line) {
                "" => LineKind::Skipped,
                mnemonic => LineKind::Instruction(mnemonic),
            },
        }
    }
}
