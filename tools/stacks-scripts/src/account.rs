use std::fmt;

use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use k256::ecdsa::SigningKey;
use stacks_intent_types::{Network, StacksAddress};

/// BIP-44 coin type registered for Stacks.
const STACKS_COIN_TYPE: u32 = 5757;

#[derive(Debug, thiserror::Error)]
pub enum DerivationError {
    #[error("invalid mnemonic: {0}")]
    Mnemonic(bip39::Error),
    #[error("key derivation failed: {0}")]
    Derivation(bip32::Error),
}

/// A derived wallet account. Lives for one run; never written anywhere.
#[derive(Clone)]
pub struct Account {
    pub network: Network,
    pub index: u32,
    pub address: StacksAddress,
    signing_key: SigningKey,
}

impl Account {
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// SEC1 compressed public key.
    pub fn public_key(&self) -> Vec<u8> {
        self.signing_key.verifying_key().to_encoded_point(true).as_bytes().to_vec()
    }

    /// Private key in the Stacks "compressed" hex form: 32 key bytes followed by `01`.
    pub fn private_key_hex(&self) -> String {
        format!("{}01", hex::encode(self.signing_key.to_bytes()))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("network", &self.network)
            .field("index", &self.index)
            .field("address", &self.address.to_string())
            .finish_non_exhaustive()
    }
}

/// Derive the account at `m/44'/5757'/0'/0/{index}` for `mnemonic` (empty passphrase).
pub fn derive_child_account(network: Network, mnemonic: &str, index: u32) -> Result<Account, DerivationError> {
    let seed = seed_from_mnemonic(mnemonic)?;
    derive_from_seed(network, &seed, index)
}

/// Accounts `0..=max_index`, in index order.
pub fn derive_child_accounts(
    network: Network,
    mnemonic: &str,
    max_index: u32,
) -> Result<Vec<Account>, DerivationError> {
    let seed = seed_from_mnemonic(mnemonic)?;
    (0..=max_index).map(|index| derive_from_seed(network, &seed, index)).collect()
}

fn seed_from_mnemonic(mnemonic: &str) -> Result<[u8; 64], DerivationError> {
    let phrase = mnemonic.split_whitespace().collect::<Vec<_>>().join(" ");
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, &phrase).map_err(DerivationError::Mnemonic)?;
    Ok(mnemonic.to_seed(""))
}

fn derive_from_seed(network: Network, seed: &[u8; 64], index: u32) -> Result<Account, DerivationError> {
    let path: DerivationPath = format!("m/44'/{STACKS_COIN_TYPE}'/0'/0/{index}")
        .parse()
        .map_err(DerivationError::Derivation)?;
    let xprv = XPrv::derive_from_path(seed, &path).map_err(DerivationError::Derivation)?;
    let signing_key = xprv.private_key().clone();
    let public_key = signing_key.verifying_key().to_encoded_point(true);
    let address = StacksAddress::from_public_key(network, public_key.as_bytes());
    log::debug!("derived account {index}: {address}");
    Ok(Account { network, index, address, signing_key })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVNET_MNEMONIC: &str = "twice kind fence tip hidden tilt action fragile skin nothing glory cousin \
                                   green tomorrow spring wrist shed math olympic multiply hip blue scout claw";
    const ABANDON_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn derives_devnet_deployer() {
        let account = derive_child_account(Network::Testnet, DEVNET_MNEMONIC, 0).unwrap();
        assert_eq!(account.address.to_string(), "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
        assert_eq!(
            account.private_key_hex(),
            "753b7cc01a1a2e86221266a154af739463fce51219d97e4f856cd7200c3bd2a601"
        );
        assert_eq!(
            hex::encode(account.public_key()),
            "0390a5cac7c33fda49f70bc1b0866fa0ba7a9440d9de647fecb8132ceb76a94dfa"
        );
    }

    #[test]
    fn network_selects_address_version() {
        let testnet = derive_child_account(Network::Testnet, ABANDON_MNEMONIC, 0).unwrap();
        let mainnet = derive_child_account(Network::Mainnet, ABANDON_MNEMONIC, 0).unwrap();
        assert_eq!(testnet.address.to_string(), "STC5KHM41H6WHAST7MWWDD807YSPRQKJ68T330BQ");
        assert_eq!(mainnet.address.to_string(), "SPC5KHM41H6WHAST7MWWDD807YSPRQKJ69FSH54J");
        assert_eq!(testnet.address.hash160, mainnet.address.hash160);
    }

    #[test]
    fn derives_index_range() {
        let accounts = derive_child_accounts(Network::Testnet, ABANDON_MNEMONIC, 1).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].index, 1);
        assert_eq!(accounts[1].address.to_string(), "ST3XHES5990FYDV5BHBZCJRFYFD2Z4X3FMEXRWMFR");
    }

    #[test]
    fn accepts_every_standard_phrase_length() {
        let eighteen = format!("{}agent", "abandon ".repeat(17));
        let twenty_four = format!("{}art", "abandon ".repeat(23));
        for (phrase, expected) in [
            (ABANDON_MNEMONIC.to_string(), "STC5KHM41H6WHAST7MWWDD807YSPRQKJ68T330BQ"),
            (eighteen, "ST111D6QJN19PJW61WSR17HAVTB7HANQHEKJKE0NE"),
            (twenty_four, "ST1JAHE8GEHB0MCBGR8J6W0AA7TJEE1XKFSD2Q80H"),
        ] {
            let account = derive_child_account(Network::Testnet, &phrase, 0).unwrap();
            assert_eq!(account.address.to_string(), expected, "{} words", phrase.split(' ').count());
        }
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let spaced = format!("  {}  ", ABANDON_MNEMONIC.replace(' ', "   "));
        let account = derive_child_account(Network::Testnet, &spaced, 0).unwrap();
        assert_eq!(account.address.to_string(), "STC5KHM41H6WHAST7MWWDD807YSPRQKJ68T330BQ");
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let bad = ABANDON_MNEMONIC.replace("about", "abandon");
        assert!(matches!(
            derive_child_account(Network::Testnet, &bad, 0),
            Err(DerivationError::Mnemonic(_))
        ));
    }

    #[test]
    fn debug_hides_key() {
        let account = derive_child_account(Network::Testnet, DEVNET_MNEMONIC, 0).unwrap();
        let debug = format!("{account:?}");
        assert!(!debug.contains("753b7cc0"));
        assert!(debug.contains("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"));
    }
}
