//! Bit-field extraction, packing, and the immediate sign-extension rule.
//!
//! The instruction word is held as a `u32` throughout; the 32-character
//! binary string exists only at the facade boundary. Bit positions use the
//! architecture's convention: inclusive (hi, lo) ranges counted from bit 0
//! at the least-significant position.

/// Extract the inclusive bit range `[hi:lo]` from a word.
///
/// This is the single shared index-translation utility; strategies never
/// slice bit strings directly.
#[inline]
pub(crate) fn field(word: u32, hi: u32, lo: u32) -> u32 {
    debug_assert!(hi >= lo && hi < 32);
    let width = hi - lo + 1;
    let mask = ((1u64 << width) - 1) as u32;
    (word >> lo) & mask
}

/// Sign-extend a `bits`-wide value: if its most-significant bit is set,
/// pad with ones out to the full word width, otherwise zero-extend.
#[inline]
pub(crate) fn sign_extend(value: u32, bits: u32) -> i32 {
    debug_assert!(bits >= 1 && bits <= 32);
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

// ── Packers (encode direction) ──────────────────────────────────────────

/// Pack an R-format word.
#[inline]
pub(crate) fn r_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    (funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Pack an I-format word. The immediate is truncated to its low 12 bits;
/// range validation happens before this point.
#[inline]
pub(crate) fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    let imm = (imm as u32) & 0xFFF;
    (imm << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Pack an S-format word, splitting the immediate into imm[11:5] | imm[4:0].
#[inline]
pub(crate) fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    let imm_hi = (imm >> 5) & 0x7F;
    let imm_lo = imm & 0x1F;
    (imm_hi << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (imm_lo << 7) | opcode
}

/// Pack a B-format word, scattering the immediate into
/// imm[12] | imm[10:5] | imm[4:1] | imm[11]. Bit 0 of the offset is
/// implicit and never stored (branch targets are 2-byte aligned).
#[inline]
pub(crate) fn b_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    let bit12 = (imm >> 12) & 1;
    let bit11 = (imm >> 11) & 1;
    let bits10_5 = (imm >> 5) & 0x3F;
    let bits4_1 = (imm >> 1) & 0xF;
    (bit12 << 31)
        | (bits10_5 << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (funct3 << 12)
        | (bits4_1 << 8)
        | (bit11 << 7)
        | opcode
}

/// Pack a U-format word from the 20-bit upper-immediate value.
#[inline]
pub(crate) fn u_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    (((imm as u32) & 0xF_FFFF) << 12) | (rd << 7) | opcode
}

/// Pack a J-format word, scattering the immediate into
/// imm[20] | imm[10:1] | imm[11] | imm[19:12]. Bit 0 is implicit zero.
#[inline]
pub(crate) fn j_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    let bit20 = (imm >> 20) & 1;
    let bits10_1 = (imm >> 1) & 0x3FF;
    let bit11 = (imm >> 11) & 1;
    let bits19_12 = (imm >> 12) & 0xFF;
    (bit20 << 31) | (bits10_1 << 21) | (bit11 << 20) | (bits19_12 << 12) | (rd << 7) | opcode
}

// ── Extractors (decode direction) ───────────────────────────────────────

/// I-format immediate: contiguous imm[11:0], sign-extended.
#[inline]
pub(crate) fn i_imm(word: u32) -> i32 {
    sign_extend(field(word, 31, 20), 12)
}

/// S-format immediate: imm[11:5] ++ imm[4:0], high-then-low, then
/// sign-extended.
#[inline]
pub(crate) fn s_imm(word: u32) -> i32 {
    let raw = (field(word, 31, 25) << 5) | field(word, 11, 7);
    sign_extend(raw, 12)
}

/// B-format immediate: imm[12] ++ imm[11] ++ imm[10:5] ++ imm[4:1] with
/// the forced trailing zero appended, sign-extended over 13 bits.
#[inline]
pub(crate) fn b_imm(word: u32) -> i32 {
    let raw = (field(word, 31, 31) << 12)
        | (field(word, 7, 7) << 11)
        | (field(word, 30, 25) << 5)
        | (field(word, 11, 8) << 1);
    sign_extend(raw, 13)
}

/// U-format immediate: the 20-bit upper field, sign-extended.
#[inline]
pub(crate) fn u_imm(word: u32) -> i32 {
    sign_extend(field(word, 31, 12), 20)
}

/// J-format immediate: imm[20] ++ imm[19:12] ++ imm[11] ++ imm[10:1]
/// with the forced trailing zero appended, sign-extended over 21 bits.
#[inline]
pub(crate) fn j_imm(word: u32) -> i32 {
    let raw = (field(word, 31, 31) << 20)
        | (field(word, 19, 12) << 12)
        | (field(word, 20, 20) << 11)
        | (field(word, 30, 21) << 1);
    sign_extend(raw, 21)
}
