//! Scalar-field element for BN254, Montgomery form on four 64-bit limbs.
//!
//! The modulus is
//! `r = 21888242871839275222246405745257275088548364400416034343698204186575808495617`.
//! Elements are kept as `a * 2^256 mod r`; multiplication is CIOS Montgomery
//! reduction, inversion is exponentiation by `r - 2`.

use crate::constants::{MODULUS, MODULUS_MINUS_TWO, MONT_INV, MONT_R, MONT_R2};

/// An element of the BN254 scalar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Fp([u64; 4]);

#[inline]
const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

#[inline]
const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let (d, b1) = a.overflowing_sub(b);
    let (d, b2) = d.overflowing_sub(borrow);
    (d, (b1 | b2) as u64)
}

#[inline]
const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// `a < b` on little-endian limbs.
#[inline]
const fn lt(a: &[u64; 4], b: &[u64; 4]) -> bool {
    let mut i = 3;
    loop {
        if a[i] < b[i] {
            return true;
        }
        if a[i] > b[i] {
            return false;
        }
        if i == 0 {
            return false;
        }
        i -= 1;
    }
}

/// `a - r` when `a >= r` (including a possible carry limb), identity otherwise.
#[inline]
const fn reduce(limbs: [u64; 4], carry: u64) -> [u64; 4] {
    if carry == 0 && lt(&limbs, &MODULUS) {
        return limbs;
    }
    let (d0, borrow) = sbb(limbs[0], MODULUS[0], 0);
    let (d1, borrow) = sbb(limbs[1], MODULUS[1], borrow);
    let (d2, borrow) = sbb(limbs[2], MODULUS[2], borrow);
    let (d3, _) = sbb(limbs[3], MODULUS[3], borrow);
    [d0, d1, d2, d3]
}

/// CIOS Montgomery multiplication: returns `a * b * 2^-256 mod r`.
fn mont_mul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let mut t = [0u64; 6];
    let mut i = 0;
    while i < 4 {
        let mut carry = 0u64;
        let mut j = 0;
        while j < 4 {
            let (lo, c) = mac(t[j], a[i], b[j], carry);
            t[j] = lo;
            carry = c;
            j += 1;
        }
        let (t4, c) = adc(t[4], carry, 0);
        t[4] = t4;
        t[5] = c;

        let m = t[0].wrapping_mul(MONT_INV);
        let (_, mut carry) = mac(t[0], m, MODULUS[0], 0);
        let mut j = 1;
        while j < 4 {
            let (lo, c) = mac(t[j], m, MODULUS[j], carry);
            t[j - 1] = lo;
            carry = c;
            j += 1;
        }
        let (t3, c) = adc(t[4], carry, 0);
        t[3] = t3;
        t[4] = t[5] + c;
        t[5] = 0;
        i += 1;
    }
    reduce([t[0], t[1], t[2], t[3]], t[4])
}

impl Fp {
    pub const ZERO: Fp = Fp([0, 0, 0, 0]);
    pub const ONE: Fp = Fp(MONT_R);

    /// Wraps limbs that are already in reduced Montgomery form. Only the
    /// build-script tables use this.
    #[inline]
    pub(crate) const fn from_mont(limbs: [u64; 4]) -> Fp {
        Fp(limbs)
    }

    /// Lifts a small integer into the field.
    pub fn from_u64(v: u64) -> Fp {
        Fp(mont_mul(&[v, 0, 0, 0], &MONT_R2))
    }

    /// Parses a canonical 32-byte big-endian encoding. Values at or above
    /// the modulus are rejected.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Option<Fp> {
        let mut limbs = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            let mut limb = 0u64;
            let mut j = 0;
            while j < 8 {
                limb = (limb << 8) | bytes[i * 8 + j] as u64;
                j += 1;
            }
            limbs[3 - i] = limb;
            i += 1;
        }
        if !lt(&limbs, &MODULUS) {
            return None;
        }
        Some(Fp(mont_mul(&limbs, &MONT_R2)))
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let canonical = mont_mul(&self.0, &[1, 0, 0, 0]);
        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 4 {
            let limb = canonical[3 - i];
            let mut j = 0;
            while j < 8 {
                out[i * 8 + j] = (limb >> (56 - 8 * j)) as u8;
                j += 1;
            }
            i += 1;
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0, 0, 0]
    }

    pub fn add(&self, other: &Fp) -> Fp {
        let (d0, carry) = adc(self.0[0], other.0[0], 0);
        let (d1, carry) = adc(self.0[1], other.0[1], carry);
        let (d2, carry) = adc(self.0[2], other.0[2], carry);
        let (d3, carry) = adc(self.0[3], other.0[3], carry);
        Fp(reduce([d0, d1, d2, d3], carry))
    }

    pub fn sub(&self, other: &Fp) -> Fp {
        let (d0, borrow) = sbb(self.0[0], other.0[0], 0);
        let (d1, borrow) = sbb(self.0[1], other.0[1], borrow);
        let (d2, borrow) = sbb(self.0[2], other.0[2], borrow);
        let (d3, borrow) = sbb(self.0[3], other.0[3], borrow);
        if borrow == 0 {
            return Fp([d0, d1, d2, d3]);
        }
        let (d0, carry) = adc(d0, MODULUS[0], 0);
        let (d1, carry) = adc(d1, MODULUS[1], carry);
        let (d2, carry) = adc(d2, MODULUS[2], carry);
        let (d3, _) = adc(d3, MODULUS[3], carry);
        Fp([d0, d1, d2, d3])
    }

    pub fn mul(&self, other: &Fp) -> Fp {
        Fp(mont_mul(&self.0, &other.0))
    }

    pub fn square(&self) -> Fp {
        self.mul(self)
    }

    /// Square-and-multiply with a little-endian limb exponent.
    pub fn pow(&self, exp: &[u64; 4]) -> Fp {
        let mut acc = Fp::ONE;
        let mut i = 4;
        while i > 0 {
            i -= 1;
            let mut bit = 64;
            while bit > 0 {
                bit -= 1;
                acc = acc.square();
                if (exp[i] >> bit) & 1 == 1 {
                    acc = acc.mul(self);
                }
            }
        }
        acc
    }

    /// Multiplicative inverse via Fermat; `None` for zero.
    pub fn inverse(&self) -> Option<Fp> {
        if self.is_zero() {
            return None;
        }
        Some(self.pow(&MODULUS_MINUS_TWO))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use ark_ff::{BigInteger, PrimeField};
    use ark_std::UniformRand;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fr_bytes(f: &ark_bn254::Fr) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&f.into_bigint().to_bytes_be());
        out
    }

    #[test]
    fn byte_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..64 {
            let fr = ark_bn254::Fr::rand(&mut rng);
            let bytes = fr_bytes(&fr);
            let fp = Fp::from_be_bytes(&bytes).unwrap();
            assert_eq!(fp.to_be_bytes(), bytes);
        }
    }

    #[test]
    fn rejects_non_canonical_bytes() {
        // r itself and all-ones are both out of range.
        let modulus_bytes: [u8; 32] = [
            0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81,
            0x58, 0x5d, 0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93,
            0xf0, 0x00, 0x00, 0x01,
        ];
        assert!(Fp::from_be_bytes(&modulus_bytes).is_none());
        assert!(Fp::from_be_bytes(&[0xff; 32]).is_none());
    }

    #[test]
    fn arithmetic_matches_arkworks() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..64 {
            let a = ark_bn254::Fr::rand(&mut rng);
            let b = ark_bn254::Fr::rand(&mut rng);
            let fa = Fp::from_be_bytes(&fr_bytes(&a)).unwrap();
            let fb = Fp::from_be_bytes(&fr_bytes(&b)).unwrap();
            assert_eq!(fa.add(&fb).to_be_bytes(), fr_bytes(&(a + b)));
            assert_eq!(fa.sub(&fb).to_be_bytes(), fr_bytes(&(a - b)));
            assert_eq!(fa.mul(&fb).to_be_bytes(), fr_bytes(&(a * b)));
        }
    }

    #[test]
    fn inverse_is_multiplicative_inverse() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..16 {
            let a = ark_bn254::Fr::rand(&mut rng);
            let fa = Fp::from_be_bytes(&fr_bytes(&a)).unwrap();
            if fa.is_zero() {
                continue;
            }
            assert_eq!(fa.mul(&fa.inverse().unwrap()), Fp::ONE);
        }
        assert!(Fp::ZERO.inverse().is_none());
    }

    #[test]
    fn small_values() {
        assert_eq!(Fp::from_u64(0), Fp::ZERO);
        assert_eq!(Fp::from_u64(1), Fp::ONE);
        assert_eq!(Fp::from_u64(2).add(&Fp::from_u64(3)), Fp::from_u64(5));
        assert!(Fp::from_u64(7).sub(&Fp::from_u64(9)).add(&Fp::from_u64(2)).is_zero());
    }
}
