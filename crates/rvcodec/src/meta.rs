//! Canonical-operand placeholder templates, keyed by mnemonic.
//!
//! This table exists for external UI components (e.g. an autocomplete
//! widget rendering a hint next to a matched mnemonic). The decode and
//! encode strategies never consult it.

use crate::isa::{self, Format, OP_JALR, OP_LOAD};

/// The placeholder operand template for a mnemonic, or `None` if the
/// mnemonic is unknown.
///
/// Templates follow the per-format default with explicit overrides for
/// memory-operand, shift, and fence forms:
///
/// ```
/// assert_eq!(rvcodec::operand_hint("add"), Some("rd, rs1, rs2"));
/// assert_eq!(rvcodec::operand_hint("lw"), Some("rd, offset(rs1)"));
/// assert_eq!(rvcodec::operand_hint("srai"), Some("rd, rs1, shamt"));
/// assert_eq!(rvcodec::operand_hint("ecall"), Some(""));
/// assert_eq!(rvcodec::operand_hint("mul"), None);
/// ```
pub fn operand_hint(mnemonic: &str) -> Option<&'static str> {
    let spec = isa::by_mnemonic(mnemonic)?;

    // Overrides first: forms whose operands deviate from the format default.
    if isa::is_shift(spec.mnemonic) {
        return Some("rd, rs1, shamt");
    }
    if spec.opcode == OP_LOAD {
        return Some("rd, offset(rs1)");
    }
    if spec.opcode == OP_JALR {
        return Some("rd, rs1, offset");
    }

    Some(match spec.format {
        Format::R => "rd, rs1, rs2",
        Format::I => "rd, rs1, imm",
        Format::S => "rs2, offset(rs1)",
        Format::B => "rs1, rs2, offset",
        Format::U => "rd, imm",
        Format::J => "rd, offset",
        Format::System => "",
        Format::Fence => "pred, succ",
    })
}
