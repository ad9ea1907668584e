//! Generates the constant tables for `src/fp.rs` and `src/poseidon.rs`.
//!
//! The scalar-field Montgomery constants are derived from the modulus, and
//! the Poseidon round constants / MDS matrices for widths 2, 3 and 4 are
//! pulled from `light-poseidon`'s canonical circomlib tables. Everything is
//! emitted in Montgomery form so the `no_std` crate never converts at
//! runtime and all three protocol implementations share one parameter set.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use ark_ff::{BigInteger, PrimeField};
use light_poseidon::parameters::bn254_x5::get_poseidon_parameters;
use num_bigint::BigUint;

/// BN254 scalar-field modulus r.
const MODULUS_DEC: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

fn limbs(x: &BigUint) -> [u64; 4] {
    let mut l = x.to_u64_digits();
    assert!(l.len() <= 4, "value exceeds four limbs");
    l.resize(4, 0);
    [l[0], l[1], l[2], l[3]]
}

fn emit_limbs(out: &mut String, l: [u64; 4]) {
    let _ = write!(
        out,
        "[0x{:016x}, 0x{:016x}, 0x{:016x}, 0x{:016x}]",
        l[0], l[1], l[2], l[3]
    );
}

fn emit_const(out: &mut String, name: &str, l: [u64; 4]) {
    let _ = write!(out, "pub(crate) const {name}: [u64; 4] = ");
    emit_limbs(out, l);
    out.push_str(";\n");
}

fn emit_table(out: &mut String, name: &str, values: &[[u64; 4]]) {
    let _ = write!(
        out,
        "pub(crate) static {name}: [[u64; 4]; {}] = [\n",
        values.len()
    );
    for l in values {
        out.push_str("    ");
        emit_limbs(out, *l);
        out.push_str(",\n");
    }
    out.push_str("];\n");
}

fn fr_to_biguint(f: &ark_bn254::Fr) -> BigUint {
    BigUint::from_bytes_be(&f.into_bigint().to_bytes_be())
}

fn main() {
    let r = BigUint::parse_bytes(MODULUS_DEC.as_bytes(), 10).expect("modulus literal");
    let two_256 = BigUint::from(1u8) << 256usize;
    let mont_r = &two_256 % &r;
    let mont_r2 = (&mont_r * &mont_r) % &r;

    // -r^{-1} mod 2^64 via Newton iteration on the low limb (r is odd).
    let r0 = limbs(&r)[0];
    let mut inv = 1u64;
    for _ in 0..6 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(r0.wrapping_mul(inv)));
    }
    let inv = inv.wrapping_neg();

    let to_mont = |x: &BigUint| limbs(&((x * &mont_r) % &r));

    let mut out = String::new();
    out.push_str("// @generated by build.rs -- do not edit.\n\n");
    emit_const(&mut out, "MODULUS", limbs(&r));
    emit_const(
        &mut out,
        "MODULUS_MINUS_TWO",
        limbs(&(&r - BigUint::from(2u8))),
    );
    let _ = writeln!(out, "pub(crate) const MONT_INV: u64 = 0x{inv:016x};");
    emit_const(&mut out, "MONT_R", limbs(&mont_r));
    emit_const(&mut out, "MONT_R2", limbs(&mont_r2));
    out.push('\n');

    for (tag, width) in [("T2", 2usize), ("T3", 3), ("T4", 4)] {
        let params = get_poseidon_parameters::<ark_bn254::Fr>(width as u8)
            .expect("canonical bn254 x5 parameters");
        assert_eq!(params.width, width);
        assert_eq!(
            params.ark.len(),
            width * (params.full_rounds + params.partial_rounds)
        );

        let _ = writeln!(
            out,
            "pub(crate) const {tag}_FULL_ROUNDS: usize = {};",
            params.full_rounds
        );
        let _ = writeln!(
            out,
            "pub(crate) const {tag}_PARTIAL_ROUNDS: usize = {};",
            params.partial_rounds
        );

        let ark: Vec<[u64; 4]> = params
            .ark
            .iter()
            .map(|f| to_mont(&fr_to_biguint(f)))
            .collect();
        emit_table(&mut out, &format!("{tag}_ARK"), &ark);

        // Row-major width x width matrix.
        let mds: Vec<[u64; 4]> = params
            .mds
            .iter()
            .flat_map(|row| row.iter().map(|f| to_mont(&fr_to_biguint(f))))
            .collect();
        assert_eq!(mds.len(), width * width);
        emit_table(&mut out, &format!("{tag}_MDS"), &mds);
        out.push('\n');
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR");
    fs::write(Path::new(&out_dir).join("constants.rs"), out).expect("write constants.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
