//! Property-based tests using proptest.
//!
//! These tests verify codec invariants across large, randomly generated
//! input spaces — complementing the targeted unit/integration tests.

use proptest::prelude::*;
use rvcodec::{decode_word, translate, Options, Xlen, XlenMode};

// ── Strategies ──────────────────────────────────────────────────────────

/// Generates valid assembly statements from a curated pool with random
/// registers and in-range immediates.
fn valid_asm() -> impl Strategy<Value = String> {
    let reg = 0u32..32;
    prop_oneof![
        (reg.clone(), reg.clone(), reg.clone())
            .prop_map(|(a, b, c)| format!("add x{}, x{}, x{}", a, b, c)),
        (reg.clone(), reg.clone(), reg.clone())
            .prop_map(|(a, b, c)| format!("sltu x{}, x{}, x{}", a, b, c)),
        (reg.clone(), reg.clone(), -2048i32..=2047)
            .prop_map(|(a, b, i)| format!("addi x{}, x{}, {}", a, b, i)),
        (reg.clone(), reg.clone(), -2048i32..=2047)
            .prop_map(|(a, b, i)| format!("lw x{}, {}(x{})", a, i, b)),
        (reg.clone(), reg.clone(), -2048i32..=2047)
            .prop_map(|(a, b, i)| format!("sw x{}, {}(x{})", a, i, b)),
        (reg.clone(), reg.clone(), -2048i32..=2046)
            .prop_map(|(a, b, i)| format!("beq x{}, x{}, {}", a, b, i * 2)),
        (reg.clone(), -(1i32 << 19)..(1 << 19))
            .prop_map(|(a, i)| format!("lui x{}, {}", a, i)),
        (reg.clone(), -(1i32 << 19)..(1 << 19))
            .prop_map(|(a, i)| format!("jal x{}, {}", a, i * 2)),
        (reg.clone(), reg, 0u32..=31).prop_map(|(a, b, s)| format!("srai x{}, x{}, {}", a, b, s)),
    ]
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    /// Decoding never panics, whatever the word.
    #[test]
    fn decode_total(word in any::<u32>()) {
        let _ = decode_word(word, &Options::default());
    }

    /// Translation never panics on arbitrary text.
    #[test]
    fn translate_total(input in "\\PC{0,64}") {
        let _ = translate(&input, &Options::default());
    }

    /// Any word that decodes re-encodes to the identical word.
    #[test]
    fn decode_encode_identity(word in any::<u32>()) {
        let opts = Options::default();
        if let Ok(insn) = decode_word(word, &opts) {
            let back = translate(&insn.assembly, &opts)
                .expect("decoded assembly must re-encode");
            prop_assert_eq!(back.word(), word, "assembly was {}", insn.assembly);
        }
    }

    /// Same identity under a fixed RV64 table.
    #[test]
    fn decode_encode_identity_rv64(word in any::<u32>()) {
        let opts = Options { xlen: XlenMode::Fixed(Xlen::Rv64), ..Options::default() };
        if let Ok(insn) = decode_word(word, &opts) {
            let back = translate(&insn.assembly, &opts)
                .expect("decoded assembly must re-encode");
            prop_assert_eq!(back.word(), word, "assembly was {}", insn.assembly);
        }
    }

    /// Fragments always tile the full word, in MSB-first order.
    #[test]
    fn fragments_tile(word in any::<u32>()) {
        if let Ok(insn) = decode_word(word, &Options::default()) {
            let joined: String = insn.fragments.iter().map(|f| f.bits.as_str()).collect();
            prop_assert_eq!(joined, insn.binary);
        }
    }

    /// Valid assembly encodes, and its canonical form is a fixed point.
    #[test]
    fn encode_canonical_fixed_point(asm in valid_asm()) {
        let opts = Options::default();
        let first = translate(&asm, &opts).expect("pool statement must encode");
        let second = translate(&first.assembly, &opts).unwrap();
        prop_assert_eq!(&first.binary, &second.binary);
        prop_assert_eq!(&first.assembly, &second.assembly);
    }

    /// ABI rendering changes spelling only, never bits.
    #[test]
    fn abi_rendering_preserves_bits(asm in valid_asm()) {
        let plain = translate(&asm, &Options::default()).unwrap();
        let abi = translate(&asm, &Options { abi_names: true, ..Options::default() }).unwrap();
        prop_assert_eq!(plain.binary, abi.binary);
    }
}
