//! Integer register mapping: numeric index ↔ ABI alias.
//!
//! The alias table is a fixed bijection over x0–x31. `fp` is accepted on
//! input as a synonym for `s0` but never produced on output.

use crate::error::CodecError;

/// ABI alias for each register index, in index order.
pub(crate) const ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Parse a register token: `x<N>` with N in 0..=31, or any ABI alias.
/// Matching is case-insensitive.
pub fn parse(token: &str) -> Result<u32, CodecError> {
    let token = token.trim();
    let lower = token.to_ascii_lowercase();

    if let Some(num) = lower.strip_prefix('x') {
        if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = num.parse::<u32>() {
                if n < 32 {
                    return Ok(n);
                }
            }
        }
        return Err(CodecError::InvalidRegister {
            token: token.into(),
        });
    }

    // `fp` is the frame-pointer spelling of s0/x8.
    if lower == "fp" {
        return Ok(8);
    }

    if let Some(idx) = ABI_NAMES.iter().position(|&name| name == lower) {
        return Ok(idx as u32);
    }

    Err(CodecError::InvalidRegister {
        token: token.into(),
    })
}

/// Render a register index as `x<N>` or its ABI alias.
pub fn name(index: u32, abi: bool) -> String {
    debug_assert!(index < 32);
    if abi {
        ABI_NAMES[index as usize].into()
    } else {
        format!("x{}", index)
    }
}
