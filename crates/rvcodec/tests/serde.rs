//! Serde round-trip tests for rvcodec public types.

#![cfg(feature = "serde")]

use rvcodec::{translate, CodecError, Format, Fragment, Instruction, Options, Xlen, XlenMode};

/// Helper: serialize to JSON, deserialize back, assert equality.
fn round_trip<T>(val: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(val).expect("serialize");
    let back: T = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(val, &back, "round-trip mismatch for JSON: {json}");
}

#[test]
fn serde_format() {
    for format in [
        Format::R,
        Format::I,
        Format::S,
        Format::B,
        Format::U,
        Format::J,
        Format::System,
        Format::Fence,
    ] {
        round_trip(&format);
    }
}

#[test]
fn serde_xlen_and_options() {
    round_trip(&Xlen::Rv32);
    round_trip(&Xlen::Rv64);
    round_trip(&Options::default());
    round_trip(&Options {
        xlen: XlenMode::Fixed(Xlen::Rv64),
        abi_names: true,
    });
}

#[test]
fn serde_instruction_with_fragments() {
    let insn: Instruction = translate("lw x10, -12(x8)", &Options::default()).unwrap();
    round_trip(&insn);
    let frag: &Fragment = &insn.fragments[0];
    round_trip(frag);
}

#[test]
fn serde_errors() {
    let errs = [
        CodecError::MalformedInput {
            token: "???".into(),
        },
        CodecError::InvalidOpcode { opcode: 0x7f },
        CodecError::UnknownMnemonic {
            mnemonic: "mul".into(),
        },
        CodecError::InvalidFunct {
            format: Format::R,
            detail: "funct7".into(),
        },
        CodecError::ReservedFieldViolation {
            field: "rd",
            value: 3,
        },
        CodecError::InvalidRegister { token: "q0".into() },
        CodecError::OperandCount {
            mnemonic: "add".into(),
            expected: "3",
            got: 1,
        },
        CodecError::ImmediateOverflow {
            value: 4096,
            min: -2048,
            max: 2047,
        },
        CodecError::MisalignedOffset { value: 7 },
    ];
    for err in &errs {
        let json = serde_json::to_string(err).expect("serialize");
        assert!(!json.is_empty());
    }
}
