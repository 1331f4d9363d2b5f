use alloy_primitives::FixedBytes;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512_256};

/// RIPEMD160(SHA256(x)), the key hash carried by every Stacks address.
pub type Hash160 = FixedBytes<20>;

pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(Sha256::digest(bytes).as_slice());
    out
}

pub fn hash160(bytes: &[u8]) -> Hash160 {
    let digest = Ripemd160::digest(sha256(bytes));
    let mut out = [0u8; 20];
    out.copy_from_slice(digest.as_slice());
    FixedBytes(out)
}

/// SHA-512/256, used for transaction ids and sighashes.
pub fn sha512_256(bytes: &[u8]) -> FixedBytes<32> {
    let mut out = [0u8; 32];
    out.copy_from_slice(Sha512_256::digest(bytes).as_slice());
    FixedBytes(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha512_256_of_empty_input() {
        assert_eq!(
            sha512_256(b"").to_string(),
            "0xc672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a"
        );
    }

    #[test]
    fn hash160_of_compressed_key() {
        let pubkey = [
            0x03, 0x90, 0xa5, 0xca, 0xc7, 0xc3, 0x3f, 0xda, 0x49, 0xf7, 0x0b, 0xc1, 0xb0, 0x86,
            0x6f, 0xa0, 0xba, 0x7a, 0x94, 0x40, 0xd9, 0xde, 0x64, 0x7f, 0xec, 0xb8, 0x13, 0x2c,
            0xeb, 0x76, 0xa9, 0x4d, 0xfa,
        ];
        assert_eq!(
            hash160(&pubkey).to_string(),
            "0x6d78de7b0625dfbfc16c3a8a5735f6dc3dc3f2ce"
        );
    }
}
