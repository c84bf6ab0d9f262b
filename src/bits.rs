use ssh_key::public::KeyData;
use ssh_key::{EcdsaCurve, Mpint, PublicKey};

/// Size in bits of the given public key, `None` for key types we do not
/// know how to measure.
pub fn key_bits(key: &PublicKey) -> Option<usize> {
    match key.key_data() {
        KeyData::Rsa(k) => get_bits(&k.n),
        KeyData::Dsa(k) => get_bits(&k.p),
        KeyData::Ed25519(k) => Some(k.0.len() * 8),
        KeyData::Ecdsa(k) => Some(curve_bits(k.curve())),
        KeyData::SkEcdsaSha2NistP256(_) => Some(256),
        KeyData::SkEd25519(k) => Some(k.public_key().0.len() * 8),
        _ => None,
    }
}

fn curve_bits(curve: EcdsaCurve) -> usize {
    match curve {
        EcdsaCurve::NistP256 => 256,
        EcdsaCurve::NistP384 => 384,
        EcdsaCurve::NistP521 => 521,
    }
}

// The leading zero byte of a positive mpint is not part of the modulus.
fn get_bits(int: &Mpint) -> Option<usize> {
    int.as_positive_bytes().map(|bytes| bytes.len() * 8)
}
