use crate::*;
use num_bigint_dig::BigUint;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;

/// Smallest modulus accepted for issuer keys
pub const MIN_KEY_BITS: usize = 2048;

fn check_size(n: &BigUint) -> Result<(), Error> {
    if n.bits() < MIN_KEY_BITS {
        return Err(Error::KeyTooSmall(n.bits()));
    }
    Ok(())
}

/// The issuer's RSA key pair.
///
/// Only the credential issuer ever holds one of these. Everything the
/// credential holder and the ballot ledger need is in `IssuerPublicKey`.
#[derive(Clone)]
pub struct IssuerKey {
    inner: RsaPrivateKey,
}

impl IssuerKey {
    /// Generate a fresh key pair with a public exponent of 65537
    pub fn generate(bits: usize) -> Result<Self, Error> {
        if bits < MIN_KEY_BITS {
            return Err(Error::KeyTooSmall(bits));
        }
        let mut rng = rand::rngs::OsRng;
        let inner = RsaPrivateKey::new(&mut rng, bits)?;
        Self::from_rsa(inner)
    }

    pub fn from_rsa(inner: RsaPrivateKey) -> Result<Self, Error> {
        check_size(inner.n())?;
        Ok(IssuerKey { inner })
    }

    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        primes: Vec<BigUint>,
    ) -> Result<Self, Error> {
        let inner = RsaPrivateKey::from_components(n, e, d, primes)?;
        inner.validate()?;
        Self::from_rsa(inner)
    }

    /// Load from PEM, either PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`)
    pub fn from_pem(pem: &str) -> Result<Self, Error> {
        let inner = if pem.contains("BEGIN RSA PRIVATE KEY") {
            RsaPrivateKey::from_pkcs1_pem(pem)?
        } else {
            RsaPrivateKey::from_pkcs8_pem(pem)?
        };
        Self::from_rsa(inner)
    }

    /// Export as PKCS#8 PEM
    pub fn to_pem(&self) -> Result<String, Error> {
        let pem = self.inner.to_pkcs8_pem(LineEnding::LF)?;
        Ok(pem.as_str().to_owned())
    }

    pub fn public_key(&self) -> IssuerPublicKey {
        IssuerPublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    pub fn n(&self) -> &BigUint {
        self.inner.n()
    }

    pub fn d(&self) -> &BigUint {
        self.inner.d()
    }

    /// Sign a blinded token.
    ///
    /// Callers must have confirmed eligibility and non-duplication first;
    /// see `Issuer::register`.
    pub fn blind_sign(&self, blinded: &BlindedToken) -> Result<BlindSignature, Error> {
        blind_sign(blinded, self.inner.d(), self.inner.n())
    }
}

impl fmt::Debug for IssuerKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IssuerKey({} bits)", self.inner.n().bits())
    }
}

/// The issuer's public key, `n` and `e`
#[derive(Clone, Debug, PartialEq)]
pub struct IssuerPublicKey {
    inner: RsaPublicKey,
}

impl IssuerPublicKey {
    pub fn from_rsa(inner: RsaPublicKey) -> Result<Self, Error> {
        check_size(inner.n())?;
        Ok(IssuerPublicKey { inner })
    }

    pub fn from_components(n: BigUint, e: BigUint) -> Result<Self, Error> {
        Self::from_rsa(RsaPublicKey::new(n, e)?)
    }

    /// Load a SubjectPublicKeyInfo (`PUBLIC KEY`) PEM
    pub fn from_pem(pem: &str) -> Result<Self, Error> {
        Self::from_rsa(RsaPublicKey::from_public_key_pem(pem)?)
    }

    pub fn to_pem(&self) -> Result<String, Error> {
        Ok(self.inner.to_public_key_pem(LineEnding::LF)?)
    }

    pub fn n(&self) -> &BigUint {
        self.inner.n()
    }

    pub fn e(&self) -> &BigUint {
        self.inner.e()
    }

    /// Length in bytes of every wire-encoded integer under this key
    pub fn byte_len(&self) -> usize {
        byte_len(self.inner.n())
    }

    pub fn blind(&self, token: &Token) -> Result<(BlindedToken, BlindingFactor), Error> {
        blind(token, self.n(), self.e())
    }

    pub fn unblind(
        &self,
        signed: &BlindSignature,
        factor: BlindingFactor,
    ) -> Result<Signature, Error> {
        unblind(signed, factor, self.n())
    }

    pub fn verify(&self, token: &Token, signature: &Signature) -> Result<bool, Error> {
        verify(token, signature, self.n(), self.e())
    }
}
