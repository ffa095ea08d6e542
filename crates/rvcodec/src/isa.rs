//! Static ISA tables: instruction formats, opcodes, and the operation table.
//!
//! The operation table is built once as a flat static slice; inverse lookup
//! maps (mnemonic → spec, function fields → spec) are constructed lazily on
//! first use and shared read-only for the lifetime of the process.

use core::fmt;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

// ── Opcodes ─────────────────────────────────────────────────────────────

pub(crate) const OP_LUI: u32 = 0b011_0111;
pub(crate) const OP_AUIPC: u32 = 0b001_0111;
pub(crate) const OP_JAL: u32 = 0b110_1111;
pub(crate) const OP_JALR: u32 = 0b110_0111;
pub(crate) const OP_BRANCH: u32 = 0b110_0011;
pub(crate) const OP_LOAD: u32 = 0b000_0011;
pub(crate) const OP_STORE: u32 = 0b010_0011;
pub(crate) const OP_IMM: u32 = 0b001_0011;
pub(crate) const OP_REG: u32 = 0b011_0011;
pub(crate) const OP_IMM_W: u32 = 0b001_1011; // RV64I W-suffix immediate ops
pub(crate) const OP_REG_W: u32 = 0b011_1011; // RV64I W-suffix register ops
pub(crate) const OP_SYSTEM: u32 = 0b111_0011;
pub(crate) const OP_FENCE: u32 = 0b000_1111;

/// Instruction-format class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// Register-register: `funct7 | rs2 | rs1 | funct3 | rd | opcode`
    R,
    /// Immediate: `imm[11:0] | rs1 | funct3 | rd | opcode`
    I,
    /// Store: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
    S,
    /// Branch: `imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | opcode`
    B,
    /// Upper immediate: `imm[31:12] | rd | opcode`
    U,
    /// Jump: `imm[20|10:1|11|19:12] | rd | opcode`
    J,
    /// System: `funct12 | rs1 | funct3 | rd | opcode` (reserved fields zero)
    System,
    /// Fence: `fm | pred | succ | rs1 | funct3 | rd | opcode`
    Fence,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::R => write!(f, "R"),
            Format::I => write!(f, "I"),
            Format::S => write!(f, "S"),
            Format::B => write!(f, "B"),
            Format::U => write!(f, "U"),
            Format::J => write!(f, "J"),
            Format::System => write!(f, "SYSTEM"),
            Format::Fence => write!(f, "FENCE"),
        }
    }
}

/// Register-width variant of the base integer ISA.
///
/// Instructions are 32 bits wide in both; the width selects which
/// operation sub-table is searched and the legal shift-amount range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Xlen {
    /// RV32I base.
    Rv32,
    /// RV64I base (RV32I plus the W-suffix and doubleword operations).
    Rv64,
}

impl fmt::Display for Xlen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Xlen::Rv32 => write!(f, "RV32"),
            Xlen::Rv64 => write!(f, "RV64"),
        }
    }
}

/// One operation table entry: mnemonic plus its fixed encoding fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpSpec {
    /// Canonical lowercase mnemonic.
    pub mnemonic: &'static str,
    /// 7-bit primary opcode.
    pub opcode: u32,
    /// funct3 discriminator (0 where the format has none).
    pub funct3: u32,
    /// Secondary discriminator: funct7 for R-format, the fixed high
    /// immediate bits for I-format shifts, funct12 for SYSTEM.
    pub funct7: u32,
    /// Format class controlling field layout.
    pub format: Format,
    /// Entry only exists in the RV64I sub-table.
    pub rv64_only: bool,
}

impl OpSpec {
    const fn new(
        mnemonic: &'static str,
        opcode: u32,
        funct3: u32,
        funct7: u32,
        format: Format,
        rv64_only: bool,
    ) -> Self {
        Self {
            mnemonic,
            opcode,
            funct3,
            funct7,
            format,
            rv64_only,
        }
    }
}

/// The full operation table: RV32I plus the RV64I additions.
///
/// Built once, never mutated; the inverse indexes below are derived from
/// this slice. Order matters only for [`mnemonics`] iteration.
pub(crate) static OPERATIONS: &[OpSpec] = &[
    // ── R-format ────────────────────────────────────────────
    OpSpec::new("add", OP_REG, 0b000, 0b000_0000, Format::R, false),
    OpSpec::new("sub", OP_REG, 0b000, 0b010_0000, Format::R, false),
    OpSpec::new("sll", OP_REG, 0b001, 0b000_0000, Format::R, false),
    OpSpec::new("slt", OP_REG, 0b010, 0b000_0000, Format::R, false),
    OpSpec::new("sltu", OP_REG, 0b011, 0b000_0000, Format::R, false),
    OpSpec::new("xor", OP_REG, 0b100, 0b000_0000, Format::R, false),
    OpSpec::new("srl", OP_REG, 0b101, 0b000_0000, Format::R, false),
    OpSpec::new("sra", OP_REG, 0b101, 0b010_0000, Format::R, false),
    OpSpec::new("or", OP_REG, 0b110, 0b000_0000, Format::R, false),
    OpSpec::new("and", OP_REG, 0b111, 0b000_0000, Format::R, false),
    OpSpec::new("addw", OP_REG_W, 0b000, 0b000_0000, Format::R, true),
    OpSpec::new("subw", OP_REG_W, 0b000, 0b010_0000, Format::R, true),
    OpSpec::new("sllw", OP_REG_W, 0b001, 0b000_0000, Format::R, true),
    OpSpec::new("srlw", OP_REG_W, 0b101, 0b000_0000, Format::R, true),
    OpSpec::new("sraw", OP_REG_W, 0b101, 0b010_0000, Format::R, true),
    // ── I-format ALU immediates ─────────────────────────────
    OpSpec::new("addi", OP_IMM, 0b000, 0, Format::I, false),
    OpSpec::new("slti", OP_IMM, 0b010, 0, Format::I, false),
    OpSpec::new("sltiu", OP_IMM, 0b011, 0, Format::I, false),
    OpSpec::new("xori", OP_IMM, 0b100, 0, Format::I, false),
    OpSpec::new("ori", OP_IMM, 0b110, 0, Format::I, false),
    OpSpec::new("andi", OP_IMM, 0b111, 0, Format::I, false),
    OpSpec::new("addiw", OP_IMM_W, 0b000, 0, Format::I, true),
    // ── I-format shifts (funct7 = fixed high immediate bits) ─
    OpSpec::new("slli", OP_IMM, 0b001, 0b000_0000, Format::I, false),
    OpSpec::new("srli", OP_IMM, 0b101, 0b000_0000, Format::I, false),
    OpSpec::new("srai", OP_IMM, 0b101, 0b010_0000, Format::I, false),
    OpSpec::new("slliw", OP_IMM_W, 0b001, 0b000_0000, Format::I, true),
    OpSpec::new("srliw", OP_IMM_W, 0b101, 0b000_0000, Format::I, true),
    OpSpec::new("sraiw", OP_IMM_W, 0b101, 0b010_0000, Format::I, true),
    // ── I-format loads ──────────────────────────────────────
    OpSpec::new("lb", OP_LOAD, 0b000, 0, Format::I, false),
    OpSpec::new("lh", OP_LOAD, 0b001, 0, Format::I, false),
    OpSpec::new("lw", OP_LOAD, 0b010, 0, Format::I, false),
    OpSpec::new("ld", OP_LOAD, 0b011, 0, Format::I, true),
    OpSpec::new("lbu", OP_LOAD, 0b100, 0, Format::I, false),
    OpSpec::new("lhu", OP_LOAD, 0b101, 0, Format::I, false),
    OpSpec::new("lwu", OP_LOAD, 0b110, 0, Format::I, true),
    OpSpec::new("jalr", OP_JALR, 0b000, 0, Format::I, false),
    // ── S-format ────────────────────────────────────────────
    OpSpec::new("sb", OP_STORE, 0b000, 0, Format::S, false),
    OpSpec::new("sh", OP_STORE, 0b001, 0, Format::S, false),
    OpSpec::new("sw", OP_STORE, 0b010, 0, Format::S, false),
    OpSpec::new("sd", OP_STORE, 0b011, 0, Format::S, true),
    // ── B-format ────────────────────────────────────────────
    OpSpec::new("beq", OP_BRANCH, 0b000, 0, Format::B, false),
    OpSpec::new("bne", OP_BRANCH, 0b001, 0, Format::B, false),
    OpSpec::new("blt", OP_BRANCH, 0b100, 0, Format::B, false),
    OpSpec::new("bge", OP_BRANCH, 0b101, 0, Format::B, false),
    OpSpec::new("bltu", OP_BRANCH, 0b110, 0, Format::B, false),
    OpSpec::new("bgeu", OP_BRANCH, 0b111, 0, Format::B, false),
    // ── U-format ────────────────────────────────────────────
    OpSpec::new("lui", OP_LUI, 0, 0, Format::U, false),
    OpSpec::new("auipc", OP_AUIPC, 0, 0, Format::U, false),
    // ── J-format ────────────────────────────────────────────
    OpSpec::new("jal", OP_JAL, 0, 0, Format::J, false),
    // ── SYSTEM (funct7 column holds funct12) ────────────────
    OpSpec::new("ecall", OP_SYSTEM, 0b000, 0b0000_0000_0000, Format::System, false),
    OpSpec::new("ebreak", OP_SYSTEM, 0b000, 0b0000_0000_0001, Format::System, false),
    // ── FENCE ───────────────────────────────────────────────
    OpSpec::new("fence", OP_FENCE, 0b000, 0, Format::Fence, false),
];

lazy_static! {
    /// mnemonic → operation spec.
    static ref BY_MNEMONIC: FxHashMap<&'static str, &'static OpSpec> = OPERATIONS
        .iter()
        .map(|spec| (spec.mnemonic, spec))
        .collect();

    /// (opcode, funct3, funct7) → R-format operation spec.
    static ref R_BY_FUNCT: FxHashMap<(u32, u32, u32), &'static OpSpec> = OPERATIONS
        .iter()
        .filter(|spec| spec.format == Format::R)
        .map(|spec| ((spec.opcode, spec.funct3, spec.funct7), spec))
        .collect();

    /// (opcode, funct3) → I/S/B-format operation spec, shifts excluded
    /// (those are disambiguated by the immediate's high bits instead).
    static ref BY_FUNCT3: FxHashMap<(u32, u32), &'static OpSpec> = OPERATIONS
        .iter()
        .filter(|spec| {
            matches!(spec.format, Format::I | Format::S | Format::B) && !is_shift(spec.mnemonic)
        })
        .map(|spec| ((spec.opcode, spec.funct3), spec))
        .collect();

    /// (opcode, funct3, high-bits discriminator) → shift operation spec.
    static ref SHIFT_BY_FUNCT: FxHashMap<(u32, u32, u32), &'static OpSpec> = OPERATIONS
        .iter()
        .filter(|spec| is_shift(spec.mnemonic))
        .map(|spec| ((spec.opcode, spec.funct3, spec.funct7), spec))
        .collect();
}

/// Whether a mnemonic is one of the immediate-shift operations, whose
/// funct7 column is the fixed high bits of the immediate field.
pub(crate) fn is_shift(mnemonic: &str) -> bool {
    matches!(
        mnemonic,
        "slli" | "srli" | "srai" | "slliw" | "srliw" | "sraiw"
    )
}

/// Look up an operation by mnemonic.
pub(crate) fn by_mnemonic(mnemonic: &str) -> Option<&'static OpSpec> {
    BY_MNEMONIC.get(mnemonic).copied()
}

/// Resolve an R-format operation from its exact (funct3, funct7) pair.
pub(crate) fn r_by_funct(opcode: u32, funct3: u32, funct7: u32) -> Option<&'static OpSpec> {
    R_BY_FUNCT.get(&(opcode, funct3, funct7)).copied()
}

/// Resolve a non-shift I/S/B-format operation from its funct3.
pub(crate) fn by_funct3(opcode: u32, funct3: u32) -> Option<&'static OpSpec> {
    BY_FUNCT3.get(&(opcode, funct3)).copied()
}

/// Resolve an immediate shift from the high bits of its immediate field.
pub(crate) fn shift_by_funct(opcode: u32, funct3: u32, high: u32) -> Option<&'static OpSpec> {
    SHIFT_BY_FUNCT.get(&(opcode, funct3, high)).copied()
}

/// Map a primary opcode to its format class.
pub(crate) fn format_for_opcode(opcode: u32) -> Option<Format> {
    // Several opcodes collapse to the same layout; this table is the
    // single source of truth for the decode-direction dispatch.
    match opcode {
        OP_REG | OP_REG_W => Some(Format::R),
        OP_IMM | OP_IMM_W | OP_LOAD | OP_JALR => Some(Format::I),
        OP_STORE => Some(Format::S),
        OP_BRANCH => Some(Format::B),
        OP_LUI | OP_AUIPC => Some(Format::U),
        OP_JAL => Some(Format::J),
        OP_SYSTEM => Some(Format::System),
        OP_FENCE => Some(Format::Fence),
        _ => None,
    }
}

/// Read-only iterator over every known mnemonic, for external consumers
/// building search structures.
pub fn mnemonics() -> impl Iterator<Item = &'static str> {
    OPERATIONS.iter().map(|spec| spec.mnemonic)
}
