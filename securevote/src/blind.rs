//! Chaum RSA blind signatures.
//!
//! ```text
//! holder:  B   = H(token) * r^e mod n        blind
//! issuer:  S   = B^d mod n                   blind_sign
//! holder:  sig = S * r^-1 mod n              unblind
//! anyone:  sig^e mod n == H(token)           verify
//! ```
//!
//! `H` is SHA-256 reduced mod `n`. Every function takes the key parts
//! explicitly so that both sides of the exchange run the same code; the
//! methods on `IssuerKey` and `IssuerPublicKey` are thin wrappers.

use crate::*;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::One;
use rand::RngCore;
use std::fmt;

/// Size in bytes of a voter's secret token
pub const TOKEN_LEN: usize = 32;

/// A voter's secret token.
///
/// Only ever revealed at vote time, as lowercase hex.
#[derive(Clone, PartialEq, Eq)]
pub struct Token([u8; TOKEN_LEN]);

impl Token {
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Token(bytes)
    }

    pub fn from_bytes(bytes: [u8; TOKEN_LEN]) -> Self {
        Token(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s).map_err(|_| Error::TokenBadHex)?;
        if bytes.len() != TOKEN_LEN {
            return Err(Error::TokenBadLen(bytes.len()));
        }
        let mut token = [0u8; TOKEN_LEN];
        token.copy_from_slice(&bytes);
        Ok(Token(token))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The double-spend key recorded on the ledger
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Token({})", self.fingerprint())
    }
}

macro_rules! key_sized_integer {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name(BigUint);

        impl $name {
            pub fn from_biguint(value: BigUint) -> Self {
                $name(value)
            }

            pub fn as_biguint(&self) -> &BigUint {
                &self.0
            }

            /// Big-endian, padded to the key byte length, base64
            pub fn encode(&self, key: &IssuerPublicKey) -> Result<String, Error> {
                let bytes = to_fixed_bytes(&self.0, key.byte_len())?;
                Ok(STANDARD.encode(bytes))
            }

            pub fn decode(encoded: &str, key: &IssuerPublicKey) -> Result<Self, Error> {
                let bytes = STANDARD.decode(encoded.trim())?;
                let value = from_fixed_bytes(&bytes, key.byte_len())?;
                check_below(&value, key.n())?;
                Ok($name(value))
            }
        }
    };
}

key_sized_integer!(
    /// `H(token) * r^e mod n`, sent to the issuer at registration
    #[derive(Clone, Debug, PartialEq, Eq)]
    BlindedToken
);

key_sized_integer!(
    /// `B^d mod n`, returned by the issuer
    #[derive(Clone, Debug, PartialEq, Eq)]
    BlindSignature
);

key_sized_integer!(
    /// `H(token)^d mod n`, presented with the token at vote time
    #[derive(Clone, Debug, PartialEq, Eq)]
    Signature
);

key_sized_integer!(
    /// The holder's random mask `r`. Used once to blind and once to unblind.
    BlindingFactor
);

impl fmt::Debug for BlindingFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BlindingFactor(..)")
    }
}

fn check_below(value: &BigUint, n: &BigUint) -> Result<(), Error> {
    if value >= n {
        return Err(Error::InvalidParameter("value must be less than the modulus"));
    }
    Ok(())
}

fn check_modulus(n: &BigUint) -> Result<(), Error> {
    if n <= &BigUint::from(4u32) {
        return Err(Error::InvalidParameter("modulus too small"));
    }
    Ok(())
}

// r must lie in [2, n-2]
fn check_factor(r: &BigUint, n: &BigUint) -> Result<(), Error> {
    let two = BigUint::from(2u32);
    check_modulus(n)?;
    if r < &two || r > &(n - &two) {
        return Err(Error::InvalidParameter("blinding factor out of range"));
    }
    Ok(())
}

/// Pick a random `r` coprime to `n` and blind the token with it.
///
/// Draws that share a factor with `n` are discarded and redrawn.
pub fn blind(
    token: &Token,
    n: &BigUint,
    e: &BigUint,
) -> Result<(BlindedToken, BlindingFactor), Error> {
    check_modulus(n)?;

    let mut rng = rand::rngs::OsRng;
    let low = BigUint::from(2u32);
    let high = n - &BigUint::one();

    loop {
        let r = rng.gen_biguint_range(&low, &high);
        let factor = BlindingFactor(r);
        match blind_with_factor(token, &factor, n, e) {
            Ok(blinded) => return Ok((blinded, factor)),
            Err(Error::NoInverse) => {
                log::warn!("securevote: discarding blinding factor not coprime to n");
                continue;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Blind with a caller-supplied factor.
///
/// A factor outside `[2, n-2]` or not invertible mod `n` is rejected.
pub fn blind_with_factor(
    token: &Token,
    factor: &BlindingFactor,
    n: &BigUint,
    e: &BigUint,
) -> Result<BlindedToken, Error> {
    check_factor(&factor.0, n)?;
    modinv(&factor.0, n)?;

    let m = hash_to_int(token.as_bytes(), n)?;
    let r_e = modpow(&factor.0, e, n)?;
    Ok(BlindedToken((m * r_e) % n))
}

/// Issuer-side signing of a blinded token
pub fn blind_sign(blinded: &BlindedToken, d: &BigUint, n: &BigUint) -> Result<BlindSignature, Error> {
    check_below(&blinded.0, n)?;
    check_below(d, n)?;
    Ok(BlindSignature(modpow(&blinded.0, d, n)?))
}

/// Remove the blinding factor, consuming it
pub fn unblind(
    signed: &BlindSignature,
    factor: BlindingFactor,
    n: &BigUint,
) -> Result<Signature, Error> {
    check_below(&signed.0, n)?;
    check_factor(&factor.0, n)?;

    let r_inv = modinv(&factor.0, n)?;
    Ok(Signature((&signed.0 * r_inv) % n))
}

/// Check `sig^e mod n == H(token)`
pub fn verify(
    token: &Token,
    signature: &Signature,
    n: &BigUint,
    e: &BigUint,
) -> Result<bool, Error> {
    check_below(&signature.0, n)?;

    let m = hash_to_int(token.as_bytes(), n)?;
    Ok(modpow(&signature.0, e, n)? == m)
}
