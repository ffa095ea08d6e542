//! The translation unit and its per-field fragments.

use crate::bits::field;
use crate::isa::{Format, Xlen};

/// One decoded/encoded bit field: its name, semantic value, raw bits,
/// and position within the word.
///
/// Fragments are ordered most-significant field first; concatenating
/// their `bits` strings reproduces the full 32-character binary word.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fragment {
    /// Field-name tag: `opcode`, `funct3`, `rd`, `imm[11:5]`, …
    pub tag: String,
    /// Decoded semantic value: a register name, an immediate rendered in
    /// decimal, or the mnemonic selected by a function field.
    pub value: String,
    /// The raw bit substring, most-significant bit first.
    pub bits: String,
    /// Index of the fragment's least-significant bit (bit 0 = word LSB).
    pub low_bit: u32,
}

impl Fragment {
    /// Build a fragment covering the inclusive bit range `[hi:lo]` of `word`.
    pub(crate) fn new(tag: &str, value: impl Into<String>, word: u32, hi: u32, lo: u32) -> Self {
        let raw = field(word, hi, lo);
        let width = (hi - lo + 1) as usize;
        Self {
            tag: tag.into(),
            value: value.into(),
            bits: format!("{:0width$b}", raw, width = width),
            low_bit: lo,
        }
    }
}

/// A fully translated instruction: all three representations plus the
/// format class, the ISA width that resolved it, and its fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// 32-character binary string.
    pub binary: String,
    /// Lowercase `0x`-prefixed hex, zero-padded to 8 digits.
    pub hex: String,
    /// Canonical assembly: lowercase mnemonic, comma-space separated
    /// operands, memory operands as `offset(base)`.
    pub assembly: String,
    /// Format class.
    pub format: Format,
    /// Which register-width sub-table resolved the operation.
    pub xlen: Xlen,
    /// Ordered field fragments, most-significant first.
    pub fragments: Vec<Fragment>,
}

impl Instruction {
    /// The instruction as a raw 32-bit word.
    pub fn word(&self) -> u32 {
        // binary is always produced from a u32 by the codec itself.
        u32::from_str_radix(&self.binary, 2).unwrap_or(0)
    }
}

/// Width-selection mode for the operation table search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XlenMode {
    /// Search RV32 first, fall back to RV64 for operations and shift
    /// amounts only legal there.
    #[default]
    Auto,
    /// Search exactly one sub-table.
    Fixed(Xlen),
}

/// Codec options. Plain values, no global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Which operation sub-table to search.
    pub xlen: XlenMode,
    /// Render registers with ABI alias names (`s0`) instead of `x8`.
    pub abi_names: bool,
}

/// Render a word as the canonical 32-character binary string.
pub(crate) fn binary_string(word: u32) -> String {
    format!("{:032b}", word)
}

/// Render a word as canonical lowercase, `0x`-prefixed, 8-digit hex.
pub(crate) fn hex_string(word: u32) -> String {
    format!("{:#010x}", word)
}
