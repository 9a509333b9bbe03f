//! Big-integer primitives shared by the issuing side and the credential holder.
//!
//! Byte conversions are big-endian and zero-padded to the byte length of the
//! modulus so that independently written clients reproduce every value bit for bit.

use crate::*;
use num_bigint_dig::{BigInt, BigUint, ModInverse, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use sha2::{Digest, Sha256};

/// Modular exponentiation.
///
/// Uses a Montgomery ladder: every bit of the exponent, including the leading
/// zero bits of its top byte, costs one multiplication and one squaring.
/// This is structural hygiene only and not a side-channel guarantee.
pub fn modpow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint, Error> {
    if modulus.is_zero() {
        return Err(Error::InvalidParameter("modulus must be non-zero"));
    }
    if modulus.is_one() {
        return Ok(BigUint::zero());
    }

    let mut r0 = BigUint::one();
    let mut r1 = base % modulus;
    for byte in exponent.to_bytes_be() {
        for shift in (0..8).rev() {
            if (byte >> shift) & 1 == 0 {
                r1 = (&r0 * &r1) % modulus;
                r0 = (&r0 * &r0) % modulus;
            } else {
                r0 = (&r0 * &r1) % modulus;
                r1 = (&r1 * &r1) % modulus;
            }
        }
    }

    Ok(r0)
}

/// Modular multiplicative inverse, normalised into `[0, modulus)`.
///
/// Fails with `Error::NoInverse` when `gcd(a, modulus) != 1`.
pub fn modinv(a: &BigUint, modulus: &BigUint) -> Result<BigUint, Error> {
    if modulus.is_zero() {
        return Err(Error::InvalidParameter("modulus must be non-zero"));
    }
    if (a % modulus).is_zero() {
        return Err(Error::NoInverse);
    }

    let inverse = a.mod_inverse(modulus).ok_or(Error::NoInverse)?;
    let modulus = BigInt::from_biguint(Sign::Plus, modulus.clone());
    inverse.mod_floor(&modulus).to_biguint().ok_or(Error::NoInverse)
}

/// Number of bytes needed to hold any value below `n`
pub fn byte_len(n: &BigUint) -> usize {
    (n.bits() + 7) / 8
}

/// Encode as big-endian bytes, left-padded with zeros to exactly `len` bytes
pub fn to_fixed_bytes(x: &BigUint, len: usize) -> Result<Vec<u8>, Error> {
    let raw = if x.is_zero() {
        Vec::new()
    } else {
        x.to_bytes_be()
    };

    if raw.len() > len {
        return Err(Error::InvalidParameter("integer wider than key byte length"));
    }

    let mut bytes = vec![0u8; len - raw.len()];
    bytes.extend_from_slice(&raw);
    Ok(bytes)
}

/// Decode big-endian bytes that must be exactly `len` bytes long
pub fn from_fixed_bytes(bytes: &[u8], len: usize) -> Result<BigUint, Error> {
    if bytes.len() != len {
        return Err(Error::WrongLength {
            expected: len,
            found: bytes.len(),
        });
    }
    Ok(BigUint::from_bytes_be(bytes))
}

/// SHA-256 of the message, read as a big-endian integer and reduced mod `n`
pub fn hash_to_int(message: &[u8], n: &BigUint) -> Result<BigUint, Error> {
    if n.is_zero() {
        return Err(Error::InvalidParameter("modulus must be non-zero"));
    }
    let digest = Sha256::digest(message);
    Ok(BigUint::from_bytes_be(&digest) % n)
}
