//! # rvcodec — RISC-V instruction codec
//!
//! `rvcodec` translates a single RISC-V instruction among three
//! representations: a 32-bit binary string, a hexadecimal word, and an
//! assembly statement. It is the computational core of an instructional
//! tool; it performs no execution, no I/O, and holds no mutable state.
//!
//! ## Quick Start
//!
//! ```rust
//! use rvcodec::{translate, Options};
//!
//! let insn = translate("add x1, x2, x3", &Options::default()).unwrap();
//! assert_eq!(insn.hex, "0x003100b3");
//! assert_eq!(insn.binary, "00000000001100010000000010110011");
//!
//! let insn = translate("0xff442503", &Options::default()).unwrap();
//! assert_eq!(insn.assembly, "lw x10, -12(x8)");
//! ```
//!
//! ## Instruction Formats
//!
//! ```text
//! R-type:  [funct7 | rs2 | rs1 | funct3 | rd  | opcode]
//! I-type:  [  imm[11:0]  | rs1 | funct3 | rd  | opcode]
//! S-type:  [imm[11:5]|rs2| rs1 | funct3 |imm[4:0]|opcode]
//! B-type:  [imm[12|10:5]|rs2|rs1|funct3|imm[4:1|11]|opcode]
//! U-type:  [      imm[31:12]             | rd  | opcode]
//! J-type:  [imm[20|10:1|11|19:12]        | rd  | opcode]
//! SYSTEM:  [   funct12   | rs1 | funct3 | rd  | opcode]
//! FENCE:   [fm|pred|succ | rs1 | funct3 | rd  | opcode]
//! ```
//!
//! ## Features
//!
//! - **Three-way translation** — binary, hex, and assembly in, all three out.
//! - **Fragments** — every decoded field with its name, value, bits, and
//!   position; fragments tile the full 32-bit word.
//! - **RV32I + RV64I** — auto-detected or explicitly selected width.
//! - **Attributed errors** — every rejection names the offending field,
//!   token, or value.

#![forbid(unsafe_code)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod bits;
mod decode;
mod encode;
/// Error types: one attributed kind per failure mode.
pub mod error;
/// The translation unit, fragments, and codec options.
pub mod instruction;
/// Static ISA tables: formats, opcodes, operation table.
pub mod isa;
/// Canonical-operand placeholder templates for external UI consumers.
pub mod meta;
/// Integer register mapping: numeric index ↔ ABI alias.
pub mod register;

// Re-exports
pub use error::CodecError;
pub use instruction::{Fragment, Instruction, Options, XlenMode};
pub use isa::{mnemonics, Format, Xlen};
pub use meta::operand_hint;

/// Translate one instruction given in any of the three accepted forms.
///
/// Input classification, in priority order:
///
/// 1. **binary** — exactly 32 `0`/`1` characters, no prefix or separators
/// 2. **hex** — optional `0x`, then exactly 8 hex digits, case-insensitive
/// 3. **assembly** — a mnemonic token, then comma-separated operands
///
/// Anything else fails with [`CodecError::MalformedInput`].
///
/// # Examples
///
/// ```rust
/// use rvcodec::{translate, Options};
///
/// let insn = translate("addi x15, x1, -50", &Options::default()).unwrap();
/// assert_eq!(insn.hex, "0xfce08793");
///
/// let abi = Options { abi_names: true, ..Options::default() };
/// let insn = translate("add x8, x29, x16", &abi).unwrap();
/// assert_eq!(insn.assembly, "add s0, t4, a6");
/// ```
pub fn translate(input: &str, opts: &Options) -> Result<Instruction, CodecError> {
    let trimmed = input.trim();

    if trimmed.len() == 32 && trimmed.bytes().all(|b| b == b'0' || b == b'1') {
        // Cannot fail: 32 binary digits always fit a u32.
        let word = u32::from_str_radix(trimmed, 2).map_err(|_| CodecError::MalformedInput {
            token: trimmed.into(),
        })?;
        return decode_word(word, opts);
    }

    let hex_body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if hex_body.len() == 8 && hex_body.bytes().all(|b| b.is_ascii_hexdigit()) {
        let word = u32::from_str_radix(hex_body, 16).map_err(|_| CodecError::MalformedInput {
            token: trimmed.into(),
        })?;
        return decode_word(word, opts);
    }

    if looks_like_assembly(trimmed) {
        return encode::encode_asm(trimmed, opts);
    }

    Err(CodecError::MalformedInput {
        token: trimmed.into(),
    })
}

/// Decode a raw 32-bit instruction word.
///
/// ```rust
/// use rvcodec::{decode_word, Options};
///
/// let insn = decode_word(0x0031_00b3, &Options::default()).unwrap();
/// assert_eq!(insn.assembly, "add x1, x2, x3");
/// ```
pub fn decode_word(word: u32, opts: &Options) -> Result<Instruction, CodecError> {
    decode::decode_word(word, opts)
}

/// Assembly shape: a leading alphabetic mnemonic token. Operand
/// validation is left to the encoder, which attributes its own errors.
fn looks_like_assembly(input: &str) -> bool {
    let mnemonic = input.split_whitespace().next().unwrap_or("");
    !mnemonic.is_empty()
        && mnemonic.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && mnemonic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.')
}
