//! Error types for the instruction codec.
//!
//! Every failure is detected at the earliest possible stage and reported
//! with the offending field or token attached — there is no partial decode
//! and no best-effort fallback.

use core::fmt;

use crate::isa::Format;

/// Codec error, attributed to a specific input shape, field, or token.
///
/// Serialize-only under the `serde` feature: the static field-name
/// references cannot be deserialized into.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CodecError {
    /// Input matches none of the three accepted shapes (binary word,
    /// hex word, assembly text).
    MalformedInput {
        /// The input or token that failed classification.
        token: String,
    },

    /// Decoded opcode is not present in the format dispatch table.
    InvalidOpcode {
        /// The raw 7-bit opcode value.
        opcode: u32,
    },

    /// Assembly mnemonic is not present in the operation table.
    UnknownMnemonic {
        /// The mnemonic that was not recognized.
        mnemonic: String,
    },

    /// funct3/funct7/funct12 combination does not select any operation
    /// for the resolved format.
    InvalidFunct {
        /// The format whose function fields failed to resolve.
        format: Format,
        /// Description of the unresolvable field combination.
        detail: String,
    },

    /// A field required to hold a fixed reserved value does not.
    ReservedFieldViolation {
        /// Name of the violated field (`rd`, `rs1`, `funct3`, `fm`, …).
        field: &'static str,
        /// The value actually found in the field.
        value: u32,
    },

    /// An operand token is neither a numeric register nor an ABI alias.
    InvalidRegister {
        /// The rejected operand token.
        token: String,
    },

    /// Assembly operand list length does not match the format's arity.
    OperandCount {
        /// The mnemonic being encoded.
        mnemonic: String,
        /// Human-readable expected arity (e.g. `"3"`, `"2 or 3"`).
        expected: &'static str,
        /// Number of operands actually supplied.
        got: usize,
    },

    /// Immediate value exceeds the representable range of its field.
    ImmediateOverflow {
        /// The immediate value that overflowed.
        value: i64,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
    },

    /// Branch or jump offset is odd. Bit 0 of the target offset is never
    /// stored, so an odd offset has no encoding.
    MisalignedOffset {
        /// The odd offset value.
        value: i64,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::MalformedInput { token } => {
                write!(
                    f,
                    "malformed input '{}': expected a 32-bit binary word, an 8-digit hex word, or assembly text",
                    token
                )
            }
            CodecError::InvalidOpcode { opcode } => {
                write!(f, "invalid opcode 0b{:07b}", opcode)
            }
            CodecError::UnknownMnemonic { mnemonic } => {
                write!(f, "unknown mnemonic '{}'", mnemonic)
            }
            CodecError::InvalidFunct { format, detail } => {
                write!(f, "invalid function field for {} format: {}", format, detail)
            }
            CodecError::ReservedFieldViolation { field, value } => {
                write!(
                    f,
                    "reserved field '{}' must be zero, found 0b{:b}",
                    field, value
                )
            }
            CodecError::InvalidRegister { token } => {
                write!(f, "invalid register '{}'", token)
            }
            CodecError::OperandCount {
                mnemonic,
                expected,
                got,
            } => {
                write!(
                    f,
                    "'{}' expects {} operand(s), got {}",
                    mnemonic, expected, got
                )
            }
            CodecError::ImmediateOverflow { value, min, max } => {
                write!(
                    f,
                    "immediate value {} out of range [{}..{}]",
                    value, min, max
                )
            }
            CodecError::MisalignedOffset { value } => {
                write!(f, "offset {} is not 2-byte aligned", value)
            }
        }
    }
}

impl std::error::Error for CodecError {}
