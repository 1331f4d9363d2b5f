use assert_cmd::Command;
use predicates::prelude::*;

const ABANDON_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// Binary with every variable the scripts read removed, so the caller's shell can't leak in.
fn script(name: &str) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin(name).unwrap();
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    for var in [
        "NETWORK",
        "MNEMONIC",
        "ACCOUNT_INDEX",
        "STACKS_API_URL",
        "ORDINALSBOT_API_KEY",
        "ORDINALSBOT_API_URL",
        "RECEIVE_ADDRESS",
        "JING_API_URL",
        "JING_API_KEY",
        "AIBTC_TOKEN_CONTRACT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn failure_envelope(message: &str) -> impl Predicate<str> {
    predicate::str::contains(r#""success":false"#).and(predicate::str::contains(message.to_string()))
}

#[test]
fn test_etch_runes_requires_api_key_first() {
    script("etch-runes")
        .args(["FAKTORY•TOKEN", "K", "testnet"])
        .assert()
        .code(1)
        .stdout(failure_envelope("ORDINALSBOT_API_KEY environment variable is required"));
}

#[test]
fn test_etch_runes_requires_receive_address() {
    script("etch-runes")
        .env("ORDINALSBOT_API_KEY", "test-key")
        .args(["FAKTORY•TOKEN", "K", "testnet"])
        .assert()
        .code(1)
        .stdout(failure_envelope("RECEIVE_ADDRESS environment variable is required"));
}

#[test]
fn test_etch_runes_rejects_long_symbol() {
    script("etch-runes")
        .env("ORDINALSBOT_API_KEY", "test-key")
        .env("RECEIVE_ADDRESS", "tb1qexample")
        .args(["FAKTORY•TOKEN", "KK", "testnet"])
        .assert()
        .code(1)
        .stdout(failure_envelope("Symbol must be a single character"));
}

#[test]
fn test_etch_runes_rejects_stacks_network() {
    script("etch-runes")
        .env("ORDINALSBOT_API_KEY", "test-key")
        .env("RECEIVE_ADDRESS", "tb1qexample")
        .args(["FAKTORY•TOKEN", "K", "devnet"])
        .assert()
        .code(1)
        .stdout(failure_envelope("Network must be either 'testnet' or 'mainnet'"));
}

#[test]
fn test_missing_arguments_print_usage() {
    script("jing-cancel-ask")
        .arg("10")
        .assert()
        .code(1)
        .stdout(failure_envelope("Invalid arguments: 10"))
        .stderr(predicate::str::contains("Usage: jing-cancel-ask <swap_id> <pair> [account_index]"))
        .stderr(predicate::str::contains("Example: jing-cancel-ask 10 PEPE-STX"));
}

#[test]
fn test_invalid_network_is_usage_error() {
    script("get-wallet-addresses")
        .env("NETWORK", "regtest")
        .env("MNEMONIC", ABANDON_MNEMONIC)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: get-wallet-addresses"));
}

#[test]
fn test_help_exits_zero() {
    script("jing-submit-ask")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<SWAP_ID>"));
}

#[test]
fn test_wallet_addresses_are_derived_locally() {
    script("get-wallet-addresses")
        .env("NETWORK", "testnet")
        .env("MNEMONIC", ABANDON_MNEMONIC)
        .assert()
        .success()
        .stdout(predicate::str::contains("0: STC5KHM41H6WHAST7MWWDD807YSPRQKJ68T330BQ"))
        .stdout(predicate::str::contains("1: ST3XHES5990FYDV5BHBZCJRFYFD2Z4X3FMEXRWMFR"))
        .stdout(predicate::str::contains(r#""success":true"#));
}

#[test]
fn test_wallet_addresses_require_mnemonic() {
    script("get-wallet-addresses")
        .assert()
        .code(1)
        .stdout(failure_envelope("MNEMONIC environment variable is required"));
}

#[test]
fn test_unknown_pair_fails_before_network() {
    script("jing-cancel-ask")
        .env("MNEMONIC", ABANDON_MNEMONIC)
        // unroutable, so any request would fail differently
        .env("STACKS_API_URL", "http://127.0.0.1:9")
        .args(["10", "DOGE-STX"])
        .assert()
        .code(1)
        .stdout(failure_envelope("Failed to get token info for pair: DOGE-STX"));
}

#[test]
fn test_resource_proposal_validates_contracts() {
    script("propose-action-add-resource")
        .args(["not-a-contract", "ST35K818S3K2GSNEBC3M35GA3W8Q7X72KF4RVM3QA.aibtcdao-action-add-resource", "n", "d", "0"])
        .assert()
        .code(1)
        .stdout(failure_envelope("Invalid contract addresses"));
}

#[test]
fn test_cancel_ask_accepts_positional_account_index() {
    script("jing-cancel-ask")
        .env("MNEMONIC", ABANDON_MNEMONIC)
        .env("STACKS_API_URL", "http://127.0.0.1:9")
        .args(["10", "PEPE-STX", "3"])
        .assert()
        .code(1)
        .stdout(failure_envelope(
            "failed to read decimals of SP1Z92MPDQEWZXW36VX71Q25HKF5K2EPCJ304F275.tokensoft-token-v4k68639zxz",
        ))
        .stderr(predicate::str::contains("Usage:").not());
}
