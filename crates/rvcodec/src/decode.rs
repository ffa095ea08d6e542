//! Decode direction: 32-bit word → structured instruction + fragments.
//!
//! The dispatcher maps the opcode field to a format class; one strategy
//! per format extracts the fields, resolves the mnemonic through the
//! precomputed inverse indexes, and renders the canonical assembly.

use crate::bits::{b_imm, field, i_imm, j_imm, s_imm, u_imm};
use crate::error::CodecError;
use crate::instruction::{binary_string, hex_string, Fragment, Instruction, Options, XlenMode};
use crate::isa::{self, Format, OpSpec, Xlen, OP_IMM, OP_IMM_W, OP_LOAD, OP_LUI, OP_REG_W};
use crate::register;

/// Decode a raw instruction word under the given options.
pub(crate) fn decode_word(word: u32, opts: &Options) -> Result<Instruction, CodecError> {
    let opcode = field(word, 6, 0);
    let format = isa::format_for_opcode(opcode).ok_or(CodecError::InvalidOpcode { opcode })?;

    // The W-suffix opcode spaces do not exist at all in RV32.
    if opts.xlen == XlenMode::Fixed(Xlen::Rv32) && matches!(opcode, OP_REG_W | OP_IMM_W) {
        return Err(CodecError::InvalidOpcode { opcode });
    }

    match format {
        Format::R => decode_r(word, opcode, opts),
        Format::I => decode_i(word, opcode, opts),
        Format::S => decode_s(word, opcode, opts),
        Format::B => decode_b(word, opcode, opts),
        Format::U => decode_u(word, opcode, opts),
        Format::J => decode_j(word, opcode, opts),
        Format::System => decode_system(word, opts),
        Format::Fence => decode_fence(word, opts),
    }
}

/// Which xlen an operation resolves under, given the search mode.
/// `None` means the operation is absent from the searched sub-table.
fn resolve_xlen(spec: &OpSpec, mode: XlenMode) -> Option<Xlen> {
    match (spec.rv64_only, mode) {
        (true, XlenMode::Fixed(Xlen::Rv32)) => None,
        (true, _) => Some(Xlen::Rv64),
        (false, XlenMode::Fixed(x)) => Some(x),
        (false, XlenMode::Auto) => Some(Xlen::Rv32),
    }
}

fn funct3_miss(format: Format, funct3: u32) -> CodecError {
    CodecError::InvalidFunct {
        format,
        detail: format!("funct3=0b{:03b} selects no operation", funct3),
    }
}

fn finish(
    word: u32,
    assembly: String,
    format: Format,
    xlen: Xlen,
    fragments: Vec<Fragment>,
) -> Instruction {
    debug_assert_eq!(
        fragments.iter().map(|f| f.bits.len()).sum::<usize>(),
        32,
        "fragments must cover the full word"
    );
    Instruction {
        binary: binary_string(word),
        hex: hex_string(word),
        assembly,
        format,
        xlen,
        fragments,
    }
}

// ── R-format ────────────────────────────────────────────────────────────

fn decode_r(word: u32, opcode: u32, opts: &Options) -> Result<Instruction, CodecError> {
    let funct3 = field(word, 14, 12);
    let funct7 = field(word, 31, 25);
    let spec = isa::r_by_funct(opcode, funct3, funct7).ok_or_else(|| CodecError::InvalidFunct {
        format: Format::R,
        detail: format!(
            "funct3=0b{:03b} funct7=0b{:07b} selects no operation",
            funct3, funct7
        ),
    })?;
    let xlen = resolve_xlen(spec, opts.xlen)
        .ok_or_else(|| funct3_miss(Format::R, funct3))?;

    let rd = register::name(field(word, 11, 7), opts.abi_names);
    let rs1 = register::name(field(word, 19, 15), opts.abi_names);
    let rs2 = register::name(field(word, 24, 20), opts.abi_names);
    let assembly = format!("{} {}, {}, {}", spec.mnemonic, rd, rs1, rs2);

    let fragments = vec![
        Fragment::new("funct7", spec.mnemonic, word, 31, 25),
        Fragment::new("rs2", rs2, word, 24, 20),
        Fragment::new("rs1", rs1, word, 19, 15),
        Fragment::new("funct3", spec.mnemonic, word, 14, 12),
        Fragment::new("rd", rd, word, 11, 7),
        Fragment::new("opcode", spec.mnemonic, word, 6, 0),
    ];
    Ok(finish(word, assembly, Format::R, xlen, fragments))
}

// ── I-format ────────────────────────────────────────────────────────────

fn decode_i(word: u32, opcode: u32, opts: &Options) -> Result<Instruction, CodecError> {
    let funct3 = field(word, 14, 12);

    // Shift immediates share opcode+funct3 with each other and are told
    // apart by the high bits of the immediate field.
    if matches!(opcode, OP_IMM | OP_IMM_W) && matches!(funct3, 0b001 | 0b101) {
        return decode_shift(word, opcode, funct3, opts);
    }

    let spec =
        isa::by_funct3(opcode, funct3).ok_or_else(|| funct3_miss(Format::I, funct3))?;
    let xlen = resolve_xlen(spec, opts.xlen)
        .ok_or_else(|| funct3_miss(Format::I, funct3))?;

    let rd = register::name(field(word, 11, 7), opts.abi_names);
    let rs1 = register::name(field(word, 19, 15), opts.abi_names);
    let imm = i_imm(word);

    let assembly = if opcode == OP_LOAD {
        format!("{} {}, {}({})", spec.mnemonic, rd, imm, rs1)
    } else {
        format!("{} {}, {}, {}", spec.mnemonic, rd, rs1, imm)
    };

    let fragments = vec![
        Fragment::new("imm[11:0]", imm.to_string(), word, 31, 20),
        Fragment::new("rs1", rs1, word, 19, 15),
        Fragment::new("funct3", spec.mnemonic, word, 14, 12),
        Fragment::new("rd", rd, word, 11, 7),
        Fragment::new("opcode", spec.mnemonic, word, 6, 0),
    ];
    Ok(finish(word, assembly, Format::I, xlen, fragments))
}

/// Decode `slli`/`srli`/`srai` and the W-suffix shifts.
///
/// The shift amount is unsigned and occupies the low 5 immediate bits
/// (6 on RV64 for the non-W forms); the remaining high bits are a fixed
/// discriminator that must match exactly.
fn decode_shift(
    word: u32,
    opcode: u32,
    funct3: u32,
    opts: &Options,
) -> Result<Instruction, CodecError> {
    // (spec, xlen, discriminator width 6 or 7)
    let resolved = if opcode == OP_IMM_W {
        // W-suffix shifts always take a 5-bit shamt and a 7-bit discriminator.
        isa::shift_by_funct(opcode, funct3, field(word, 31, 25))
            .map(|spec| (spec, Xlen::Rv64, 7u32))
    } else {
        let rv32 = || {
            isa::shift_by_funct(opcode, funct3, field(word, 31, 25))
                .map(|spec| (spec, Xlen::Rv32, 7u32))
        };
        // On RV64, bit 25 belongs to the shamt; the discriminator is the
        // 6-bit field above it, re-aligned to the table's funct7 column.
        let rv64 = || {
            isa::shift_by_funct(opcode, funct3, field(word, 31, 26) << 1)
                .map(|spec| (spec, Xlen::Rv64, 6u32))
        };
        match opts.xlen {
            XlenMode::Fixed(Xlen::Rv32) => rv32(),
            XlenMode::Fixed(Xlen::Rv64) => rv64(),
            XlenMode::Auto => rv32().or_else(rv64),
        }
    };
    let (spec, xlen, discr_bits) = resolved.ok_or_else(|| CodecError::InvalidFunct {
        format: Format::I,
        detail: format!(
            "funct3=0b{:03b} imm[11:5]=0b{:07b} selects no shift operation",
            funct3,
            field(word, 31, 25)
        ),
    })?;

    let shamt_hi = 31 - discr_bits;
    let shamt = field(word, shamt_hi, 20);
    let rd = register::name(field(word, 11, 7), opts.abi_names);
    let rs1 = register::name(field(word, 19, 15), opts.abi_names);
    let assembly = format!("{} {}, {}, {}", spec.mnemonic, rd, rs1, shamt);

    let discr_tag = if discr_bits == 7 { "imm[11:5]" } else { "imm[11:6]" };
    let fragments = vec![
        Fragment::new(discr_tag, spec.mnemonic, word, 31, shamt_hi + 1),
        Fragment::new("shamt", shamt.to_string(), word, shamt_hi, 20),
        Fragment::new("rs1", rs1, word, 19, 15),
        Fragment::new("funct3", spec.mnemonic, word, 14, 12),
        Fragment::new("rd", rd, word, 11, 7),
        Fragment::new("opcode", spec.mnemonic, word, 6, 0),
    ];
    Ok(finish(word, assembly, Format::I, xlen, fragments))
}

// ── S-format ────────────────────────────────────────────────────────────

fn decode_s(word: u32, opcode: u32, opts: &Options) -> Result<Instruction, CodecError> {
    let funct3 = field(word, 14, 12);
    let spec =
        isa::by_funct3(opcode, funct3).ok_or_else(|| funct3_miss(Format::S, funct3))?;
    let xlen = resolve_xlen(spec, opts.xlen)
        .ok_or_else(|| funct3_miss(Format::S, funct3))?;

    let rs1 = register::name(field(word, 19, 15), opts.abi_names);
    let rs2 = register::name(field(word, 24, 20), opts.abi_names);
    let imm = s_imm(word);
    let assembly = format!("{} {}, {}({})", spec.mnemonic, rs2, imm, rs1);

    let imm_str = imm.to_string();
    let fragments = vec![
        Fragment::new("imm[11:5]", imm_str.clone(), word, 31, 25),
        Fragment::new("rs2", rs2, word, 24, 20),
        Fragment::new("rs1", rs1, word, 19, 15),
        Fragment::new("funct3", spec.mnemonic, word, 14, 12),
        Fragment::new("imm[4:0]", imm_str, word, 11, 7),
        Fragment::new("opcode", spec.mnemonic, word, 6, 0),
    ];
    Ok(finish(word, assembly, Format::S, xlen, fragments))
}

// ── B-format ────────────────────────────────────────────────────────────

fn decode_b(word: u32, opcode: u32, opts: &Options) -> Result<Instruction, CodecError> {
    let funct3 = field(word, 14, 12);
    let spec =
        isa::by_funct3(opcode, funct3).ok_or_else(|| funct3_miss(Format::B, funct3))?;
    let xlen = resolve_xlen(spec, opts.xlen)
        .ok_or_else(|| funct3_miss(Format::B, funct3))?;

    let rs1 = register::name(field(word, 19, 15), opts.abi_names);
    let rs2 = register::name(field(word, 24, 20), opts.abi_names);
    let imm = b_imm(word);
    let assembly = format!("{} {}, {}, {}", spec.mnemonic, rs1, rs2, imm);

    let imm_str = imm.to_string();
    let fragments = vec![
        Fragment::new("imm[12]", imm_str.clone(), word, 31, 31),
        Fragment::new("imm[10:5]", imm_str.clone(), word, 30, 25),
        Fragment::new("rs2", rs2, word, 24, 20),
        Fragment::new("rs1", rs1, word, 19, 15),
        Fragment::new("funct3", spec.mnemonic, word, 14, 12),
        Fragment::new("imm[4:1]", imm_str.clone(), word, 11, 8),
        Fragment::new("imm[11]", imm_str, word, 7, 7),
        Fragment::new("opcode", spec.mnemonic, word, 6, 0),
    ];
    Ok(finish(word, assembly, Format::B, xlen, fragments))
}

// ── U-format ────────────────────────────────────────────────────────────

fn decode_u(word: u32, opcode: u32, opts: &Options) -> Result<Instruction, CodecError> {
    let mnemonic = if opcode == OP_LUI { "lui" } else { "auipc" };
    let spec = isa::by_mnemonic(mnemonic).expect("U-format table entry");
    let xlen = resolve_xlen(spec, opts.xlen).expect("U-format ops exist in both tables");

    let rd = register::name(field(word, 11, 7), opts.abi_names);
    let imm = u_imm(word);
    let assembly = format!("{} {}, {}", spec.mnemonic, rd, imm);

    let fragments = vec![
        Fragment::new("imm[31:12]", imm.to_string(), word, 31, 12),
        Fragment::new("rd", rd, word, 11, 7),
        Fragment::new("opcode", spec.mnemonic, word, 6, 0),
    ];
    Ok(finish(word, assembly, Format::U, xlen, fragments))
}

// ── J-format ────────────────────────────────────────────────────────────

fn decode_j(word: u32, _opcode: u32, opts: &Options) -> Result<Instruction, CodecError> {
    let spec = isa::by_mnemonic("jal").expect("J-format table entry");
    let xlen = resolve_xlen(spec, opts.xlen).expect("jal exists in both tables");

    let rd = register::name(field(word, 11, 7), opts.abi_names);
    let imm = j_imm(word);
    let assembly = format!("{} {}, {}", spec.mnemonic, rd, imm);

    let imm_str = imm.to_string();
    let fragments = vec![
        Fragment::new("imm[20]", imm_str.clone(), word, 31, 31),
        Fragment::new("imm[10:1]", imm_str.clone(), word, 30, 21),
        Fragment::new("imm[11]", imm_str.clone(), word, 20, 20),
        Fragment::new("imm[19:12]", imm_str, word, 19, 12),
        Fragment::new("rd", rd, word, 11, 7),
        Fragment::new("opcode", spec.mnemonic, word, 6, 0),
    ];
    Ok(finish(word, assembly, Format::J, xlen, fragments))
}

// ── SYSTEM ──────────────────────────────────────────────────────────────

fn decode_system(word: u32, opts: &Options) -> Result<Instruction, CodecError> {
    check_reserved("rd", field(word, 11, 7))?;
    check_reserved("rs1", field(word, 19, 15))?;
    check_reserved("funct3", field(word, 14, 12))?;

    let funct12 = field(word, 31, 20);
    let mnemonic = match funct12 {
        0b0000_0000_0000 => "ecall",
        0b0000_0000_0001 => "ebreak",
        _ => {
            return Err(CodecError::InvalidFunct {
                format: Format::System,
                detail: format!("funct12=0b{:012b} selects no operation", funct12),
            })
        }
    };
    let spec = isa::by_mnemonic(mnemonic).expect("SYSTEM table entry");
    let xlen = resolve_xlen(spec, opts.xlen).expect("SYSTEM ops exist in both tables");

    let zero = register::name(0, opts.abi_names);
    let fragments = vec![
        Fragment::new("funct12", mnemonic, word, 31, 20),
        Fragment::new("rs1", zero.clone(), word, 19, 15),
        Fragment::new("funct3", mnemonic, word, 14, 12),
        Fragment::new("rd", zero, word, 11, 7),
        Fragment::new("opcode", mnemonic, word, 6, 0),
    ];
    Ok(finish(word, mnemonic.into(), Format::System, xlen, fragments))
}

// ── FENCE ───────────────────────────────────────────────────────────────

fn decode_fence(word: u32, opts: &Options) -> Result<Instruction, CodecError> {
    check_reserved("rd", field(word, 11, 7))?;
    check_reserved("rs1", field(word, 19, 15))?;
    check_reserved("funct3", field(word, 14, 12))?;
    check_reserved("fm", field(word, 31, 28))?;

    let pred = field(word, 27, 24);
    let succ = field(word, 23, 20);
    // Encoding never produces an empty flag group, so an all-zero nibble
    // cannot round-trip and is rejected.
    if pred == 0 || succ == 0 {
        return Err(CodecError::InvalidFunct {
            format: Format::Fence,
            detail: format!("empty {} flag set", if pred == 0 { "predecessor" } else { "successor" }),
        });
    }

    let spec = isa::by_mnemonic("fence").expect("FENCE table entry");
    let xlen = resolve_xlen(spec, opts.xlen).expect("fence exists in both tables");

    let pred_str = fence_flags(pred);
    let succ_str = fence_flags(succ);
    let assembly = format!("fence {}, {}", pred_str, succ_str);

    let fragments = vec![
        Fragment::new("fm", "fence", word, 31, 28),
        Fragment::new("pred", pred_str, word, 27, 24),
        Fragment::new("succ", succ_str, word, 23, 20),
        Fragment::new("rs1", register::name(0, opts.abi_names), word, 19, 15),
        Fragment::new("funct3", "fence", word, 14, 12),
        Fragment::new("rd", register::name(0, opts.abi_names), word, 11, 7),
        Fragment::new("opcode", "fence", word, 6, 0),
    ];
    Ok(finish(word, assembly, Format::Fence, xlen, fragments))
}

fn check_reserved(field_name: &'static str, value: u32) -> Result<(), CodecError> {
    if value != 0 {
        return Err(CodecError::ReservedFieldViolation {
            field: field_name,
            value,
        });
    }
    Ok(())
}

/// Render a 4-bit access set as a subset of `iorw` in fixed order,
/// omitting unset flags.
pub(crate) fn fence_flags(nibble: u32) -> String {
    let mut s = String::new();
    for (bit, ch) in [(3, 'i'), (2, 'o'), (1, 'r'), (0, 'w')] {
        if nibble & (1 << bit) != 0 {
            s.push(ch);
        }
    }
    s
}
