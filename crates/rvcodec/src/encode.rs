//! Encode direction: assembly text → instruction word.
//!
//! The mnemonic selects an operation-table entry, whose format tag picks
//! the packing strategy. Operand tokenization handles comma separation,
//! `offset(base)` memory operands, and fence access-flag groups. Every
//! range check happens before packing; out-of-range immediates are
//! rejected, never truncated.

use crate::bits::{b_type, i_type, j_type, r_type, s_type, u_type};
use crate::decode;
use crate::error::CodecError;
use crate::instruction::{Instruction, Options, XlenMode};
use crate::isa::{self, Format, OpSpec, Xlen, OP_IMM_W, OP_JALR, OP_LOAD};
use crate::register;

/// Encode one assembly statement under the given options.
///
/// The returned [`Instruction`] is produced by decoding the packed word,
/// which guarantees canonical rendering and the fragment invariants.
pub(crate) fn encode_asm(source: &str, opts: &Options) -> Result<Instruction, CodecError> {
    let source = source.trim().to_ascii_lowercase();
    let (mnemonic, rest) = match source.split_once(char::is_whitespace) {
        Some((m, rest)) => (m, rest.trim()),
        None => (source.as_str(), ""),
    };

    let spec = isa::by_mnemonic(mnemonic).ok_or_else(|| CodecError::UnknownMnemonic {
        mnemonic: mnemonic.into(),
    })?;
    // RV64-only operations are simply absent from the RV32 sub-table.
    if spec.rv64_only && opts.xlen == XlenMode::Fixed(Xlen::Rv32) {
        return Err(CodecError::UnknownMnemonic {
            mnemonic: mnemonic.into(),
        });
    }

    let ops = split_operands(rest, &source)?;

    let (word, xlen) = match spec.format {
        Format::R => encode_r(spec, &ops, opts)?,
        Format::I => encode_i(spec, &ops, opts)?,
        Format::S => encode_s(spec, &ops, opts)?,
        Format::B => encode_b(spec, &ops, opts)?,
        Format::U => encode_u(spec, &ops, opts)?,
        Format::J => encode_j(spec, &ops, opts)?,
        Format::System => encode_system(spec, &ops, opts)?,
        Format::Fence => encode_fence(spec, &ops, opts)?,
    };

    // Re-decode under the resolved width: the decode strategies own
    // canonical rendering and fragment construction.
    decode::decode_word(
        word,
        &Options {
            xlen: XlenMode::Fixed(xlen),
            abi_names: opts.abi_names,
        },
    )
}

/// Split a comma-separated operand list into trimmed tokens.
fn split_operands(rest: &str, source: &str) -> Result<Vec<String>, CodecError> {
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    let mut ops = Vec::new();
    for token in rest.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(CodecError::MalformedInput {
                token: source.into(),
            });
        }
        ops.push(token.to_owned());
    }
    Ok(ops)
}

fn arity(
    spec: &OpSpec,
    ops: &[String],
    expected: &'static str,
    allowed: &[usize],
) -> Result<(), CodecError> {
    if allowed.contains(&ops.len()) {
        return Ok(());
    }
    Err(CodecError::OperandCount {
        mnemonic: spec.mnemonic.into(),
        expected,
        got: ops.len(),
    })
}

/// Parse an immediate token: decimal or `0x`/`0b`-prefixed, optional sign.
fn parse_imm(token: &str) -> Result<i64, CodecError> {
    let bad = || CodecError::MalformedInput {
        token: token.into(),
    };
    let (negative, body) = match token.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let magnitude = if let Some(hex) = body.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).map_err(|_| bad())?
    } else if let Some(bin) = body.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).map_err(|_| bad())?
    } else {
        body.parse::<i64>().map_err(|_| bad())?
    };
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parse a memory operand `offset(base)`; the offset may be omitted.
fn parse_mem(token: &str) -> Result<(i64, u32), CodecError> {
    let bad = || CodecError::MalformedInput {
        token: token.into(),
    };
    let open = token.find('(').ok_or_else(bad)?;
    let inner = token[open + 1..].strip_suffix(')').ok_or_else(bad)?;
    let offset_str = token[..open].trim();
    let offset = if offset_str.is_empty() {
        0
    } else {
        parse_imm(offset_str)?
    };
    let base = register::parse(inner)?;
    Ok((offset, base))
}

fn check_range(value: i64, min: i64, max: i64) -> Result<i32, CodecError> {
    if value < min || value > max {
        return Err(CodecError::ImmediateOverflow { value, min, max });
    }
    Ok(value as i32)
}

/// Range-check a branch/jump offset. Bit 0 of the offset is never
/// stored, so the bounds are even and an odd value has no encoding.
fn check_offset(value: i64, min: i64, max: i64) -> Result<i32, CodecError> {
    let value = check_range(value, min, max)?;
    if value & 1 != 0 {
        return Err(CodecError::MisalignedOffset {
            value: value as i64,
        });
    }
    Ok(value)
}

/// Resolve the xlen an encoding runs under: RV64-only operations force
/// RV64; otherwise the fixed width, or RV32 under auto detection.
fn base_xlen(spec: &OpSpec, opts: &Options) -> Xlen {
    if spec.rv64_only {
        Xlen::Rv64
    } else {
        match opts.xlen {
            XlenMode::Fixed(x) => x,
            XlenMode::Auto => Xlen::Rv32,
        }
    }
}

// ── Per-format encoders ─────────────────────────────────────────────────

fn encode_r(spec: &OpSpec, ops: &[String], opts: &Options) -> Result<(u32, Xlen), CodecError> {
    arity(spec, ops, "3", &[3])?;
    let rd = register::parse(&ops[0])?;
    let rs1 = register::parse(&ops[1])?;
    let rs2 = register::parse(&ops[2])?;
    let word = r_type(spec.opcode, rd, spec.funct3, rs1, rs2, spec.funct7);
    Ok((word, base_xlen(spec, opts)))
}

fn encode_i(spec: &OpSpec, ops: &[String], opts: &Options) -> Result<(u32, Xlen), CodecError> {
    if isa::is_shift(spec.mnemonic) {
        return encode_shift(spec, ops, opts);
    }
    if spec.opcode == OP_LOAD {
        arity(spec, ops, "2", &[2])?;
        let rd = register::parse(&ops[0])?;
        let (offset, base) = parse_mem(&ops[1])?;
        let imm = check_range(offset, -2048, 2047)?;
        return Ok((
            i_type(spec.opcode, rd, spec.funct3, base, imm),
            base_xlen(spec, opts),
        ));
    }
    if spec.opcode == OP_JALR {
        arity(spec, ops, "2 or 3", &[2, 3])?;
        let rd = register::parse(&ops[0])?;
        let (rs1, imm) = if ops.len() == 3 {
            let rs1 = register::parse(&ops[1])?;
            let imm = check_range(parse_imm(&ops[2])?, -2048, 2047)?;
            (rs1, imm)
        } else if ops[1].contains('(') {
            // jalr rd, offset(rs1)
            let (offset, base) = parse_mem(&ops[1])?;
            (base, check_range(offset, -2048, 2047)?)
        } else {
            // jalr rd, rs1 → offset 0
            (register::parse(&ops[1])?, 0)
        };
        return Ok((
            i_type(spec.opcode, rd, spec.funct3, rs1, imm),
            base_xlen(spec, opts),
        ));
    }
    // ALU immediate
    arity(spec, ops, "3", &[3])?;
    let rd = register::parse(&ops[0])?;
    let rs1 = register::parse(&ops[1])?;
    let imm = check_range(parse_imm(&ops[2])?, -2048, 2047)?;
    Ok((
        i_type(spec.opcode, rd, spec.funct3, rs1, imm),
        base_xlen(spec, opts),
    ))
}

/// Shift immediates: the shamt is unsigned and width-limited; the fixed
/// high immediate bits come straight from the operation table.
fn encode_shift(spec: &OpSpec, ops: &[String], opts: &Options) -> Result<(u32, Xlen), CodecError> {
    arity(spec, ops, "3", &[3])?;
    let rd = register::parse(&ops[0])?;
    let rs1 = register::parse(&ops[1])?;
    let shamt = parse_imm(&ops[2])?;

    // W-suffix shifts always use a 5-bit shamt; the base shifts allow 6
    // bits on RV64. A shamt above 31 promotes auto detection to RV64.
    let (max, xlen) = if spec.opcode == OP_IMM_W {
        (31, Xlen::Rv64)
    } else {
        match opts.xlen {
            XlenMode::Fixed(Xlen::Rv32) => (31, Xlen::Rv32),
            XlenMode::Fixed(Xlen::Rv64) => (63, Xlen::Rv64),
            XlenMode::Auto if shamt > 31 => (63, Xlen::Rv64),
            XlenMode::Auto => (31, Xlen::Rv32),
        }
    };
    let shamt = check_range(shamt, 0, max)?;

    // funct7 bit 0 is zero for every shift, so OR-ing a 6-bit shamt in
    // underneath it cannot collide.
    let imm = ((spec.funct7 << 5) | shamt as u32) as i32;
    Ok((i_type(spec.opcode, rd, spec.funct3, rs1, imm), xlen))
}

fn encode_s(spec: &OpSpec, ops: &[String], opts: &Options) -> Result<(u32, Xlen), CodecError> {
    arity(spec, ops, "2", &[2])?;
    let rs2 = register::parse(&ops[0])?;
    let (offset, base) = parse_mem(&ops[1])?;
    let imm = check_range(offset, -2048, 2047)?;
    Ok((
        s_type(spec.opcode, spec.funct3, base, rs2, imm),
        base_xlen(spec, opts),
    ))
}

fn encode_b(spec: &OpSpec, ops: &[String], opts: &Options) -> Result<(u32, Xlen), CodecError> {
    arity(spec, ops, "3", &[3])?;
    let rs1 = register::parse(&ops[0])?;
    let rs2 = register::parse(&ops[1])?;
    let imm = check_offset(parse_imm(&ops[2])?, -4096, 4094)?;
    Ok((
        b_type(spec.opcode, spec.funct3, rs1, rs2, imm),
        base_xlen(spec, opts),
    ))
}

fn encode_u(spec: &OpSpec, ops: &[String], opts: &Options) -> Result<(u32, Xlen), CodecError> {
    arity(spec, ops, "2", &[2])?;
    let rd = register::parse(&ops[0])?;
    let imm = check_range(parse_imm(&ops[1])?, -(1 << 19), (1 << 20) - 1)?;
    Ok((u_type(spec.opcode, rd, imm), base_xlen(spec, opts)))
}

fn encode_j(spec: &OpSpec, ops: &[String], opts: &Options) -> Result<(u32, Xlen), CodecError> {
    arity(spec, ops, "2", &[2])?;
    let rd = register::parse(&ops[0])?;
    let imm = check_offset(parse_imm(&ops[1])?, -(1 << 20), (1 << 20) - 2)?;
    Ok((j_type(spec.opcode, rd, imm), base_xlen(spec, opts)))
}

fn encode_system(
    spec: &OpSpec,
    ops: &[String],
    opts: &Options,
) -> Result<(u32, Xlen), CodecError> {
    arity(spec, ops, "0", &[0])?;
    // funct7 column carries funct12 for SYSTEM operations.
    let word = (spec.funct7 << 20) | spec.opcode;
    Ok((word, base_xlen(spec, opts)))
}

fn encode_fence(
    spec: &OpSpec,
    ops: &[String],
    opts: &Options,
) -> Result<(u32, Xlen), CodecError> {
    arity(spec, ops, "0 or 2", &[0, 2])?;
    // Bare `fence` is the full fence: iorw, iorw.
    let (pred, succ) = if ops.is_empty() {
        (0b1111, 0b1111)
    } else {
        (fence_set(&ops[0])?, fence_set(&ops[1])?)
    };
    let word = (pred << 24) | (succ << 20) | spec.opcode;
    Ok((word, base_xlen(spec, opts)))
}

/// Parse an access-flag group over `{i, o, r, w}`. Order-insensitive,
/// repeats rejected, at least one flag required.
fn fence_set(token: &str) -> Result<u32, CodecError> {
    let mut set = 0u32;
    for ch in token.chars() {
        let bit = match ch {
            'i' => 3,
            'o' => 2,
            'r' => 1,
            'w' => 0,
            _ => {
                return Err(CodecError::MalformedInput {
                    token: token.into(),
                })
            }
        };
        if set & (1 << bit) != 0 {
            return Err(CodecError::MalformedInput {
                token: token.into(),
            });
        }
        set |= 1 << bit;
    }
    if set == 0 {
        return Err(CodecError::MalformedInput {
            token: token.into(),
        });
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imm_token_forms() {
        assert_eq!(parse_imm("42").unwrap(), 42);
        assert_eq!(parse_imm("-50").unwrap(), -50);
        assert_eq!(parse_imm("0x7ff").unwrap(), 2047);
        assert_eq!(parse_imm("-0x800").unwrap(), -2048);
        assert_eq!(parse_imm("0b1010").unwrap(), 10);
        assert!(parse_imm("twelve").is_err());
        assert!(parse_imm("").is_err());
    }

    #[test]
    fn mem_operand_forms() {
        assert_eq!(parse_mem("-12(x8)").unwrap(), (-12, 8));
        assert_eq!(parse_mem("0(sp)").unwrap(), (0, 2));
        assert_eq!(parse_mem("(t0)").unwrap(), (0, 5));
        assert!(parse_mem("x8").is_err());
        assert!(parse_mem("12(x8").is_err());
        assert!(matches!(
            parse_mem("4(x99)"),
            Err(CodecError::InvalidRegister { .. })
        ));
    }

    #[test]
    fn offset_alignment() {
        assert_eq!(check_offset(8, -4096, 4094).unwrap(), 8);
        assert_eq!(check_offset(-4096, -4096, 4094).unwrap(), -4096);
        assert!(matches!(
            check_offset(7, -4096, 4094),
            Err(CodecError::MisalignedOffset { value: 7 })
        ));
        assert!(matches!(
            check_offset(4095, -4096, 4094),
            Err(CodecError::ImmediateOverflow { max: 4094, .. })
        ));
    }

    #[test]
    fn fence_flag_sets() {
        assert_eq!(fence_set("iorw").unwrap(), 0b1111);
        assert_eq!(fence_set("rw").unwrap(), 0b0011);
        assert_eq!(fence_set("i").unwrap(), 0b1000);
        assert!(fence_set("x").is_err());
        assert!(fence_set("ii").is_err());
        assert!(fence_set("").is_err());
    }
}
