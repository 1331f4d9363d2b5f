use alloy_primitives::FixedBytes;
use stacks_intent_types::{ClarityValue, ContractId, Hash160, Network, PostCondition};

pub const AUTH_TYPE_STANDARD: u8 = 0x04;
pub const HASH_MODE_P2PKH: u8 = 0x00;
pub const KEY_ENCODING_COMPRESSED: u8 = 0x00;
pub const PAYLOAD_CONTRACT_CALL: u8 = 0x02;
pub const POST_CONDITION_STX: u8 = 0x00;
pub const POST_CONDITION_FUNGIBLE: u8 = 0x01;
pub const PRINCIPAL_ORIGIN: u8 = 0x01;
pub const PRINCIPAL_STANDARD: u8 = 0x02;
pub const PRINCIPAL_CONTRACT: u8 = 0x03;

/// Which block kinds may confirm the transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AnchorMode {
    OnChainOnly = 0x01,
    OffChainOnly = 0x02,
    Any = 0x03,
}

/// `Deny` aborts the transaction if it moves assets no post-condition mentions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PostConditionMode {
    Allow = 0x01,
    Deny = 0x02,
}

/// Contract call ready to be signed.
///
/// Built with [`ContractCallBuilder`]; nothing mutates it afterwards; a different
/// fee produces a new intent via [`TransactionIntent::with_fee`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionIntent {
    network: Network,
    contract: ContractId,
    function_name: String,
    function_args: Vec<ClarityValue>,
    fee: u64,
    nonce: u64,
    anchor_mode: AnchorMode,
    post_condition_mode: PostConditionMode,
    post_conditions: Vec<PostCondition>,
}

impl TransactionIntent {
    pub fn network(&self) -> Network {
        self.network
    }

    pub fn contract(&self) -> &ContractId {
        &self.contract
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn function_args(&self) -> &[ClarityValue] {
        &self.function_args
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn anchor_mode(&self) -> AnchorMode {
        self.anchor_mode
    }

    pub fn post_condition_mode(&self) -> PostConditionMode {
        self.post_condition_mode
    }

    pub fn post_conditions(&self) -> &[PostCondition] {
        &self.post_conditions
    }

    pub fn with_fee(self, fee: u64) -> Self {
        Self { fee, ..self }
    }
}

/// Builder for [`TransactionIntent`]. Defaults: anchor mode `Any`, post-condition mode
/// `Deny`, no post-conditions, fee 0, nonce 0.
#[derive(Clone, Debug)]
pub struct ContractCallBuilder {
    intent: TransactionIntent,
}

impl ContractCallBuilder {
    pub fn new(network: Network, contract: ContractId, function_name: impl Into<String>) -> Self {
        Self {
            intent: TransactionIntent {
                network,
                contract,
                function_name: function_name.into(),
                function_args: Vec::new(),
                fee: 0,
                nonce: 0,
                anchor_mode: AnchorMode::Any,
                post_condition_mode: PostConditionMode::Deny,
                post_conditions: Vec::new(),
            },
        }
    }

    pub fn arg(mut self, value: ClarityValue) -> Self {
        self.intent.function_args.push(value);
        self
    }

    pub fn args(mut self, values: impl IntoIterator<Item = ClarityValue>) -> Self {
        self.intent.function_args.extend(values);
        self
    }

    pub fn fee(mut self, fee: u64) -> Self {
        self.intent.fee = fee;
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.intent.nonce = nonce;
        self
    }

    pub fn anchor_mode(mut self, mode: AnchorMode) -> Self {
        self.intent.anchor_mode = mode;
        self
    }

    pub fn post_condition_mode(mut self, mode: PostConditionMode) -> Self {
        self.intent.post_condition_mode = mode;
        self
    }

    pub fn post_condition(mut self, condition: PostCondition) -> Self {
        self.intent.post_conditions.push(condition);
        self
    }

    pub fn post_conditions(mut self, conditions: impl IntoIterator<Item = PostCondition>) -> Self {
        self.intent.post_conditions.extend(conditions);
        self
    }

    pub fn build(self) -> TransactionIntent {
        self.intent
    }
}

/// Intent plus the signer's authorisation, serialized and ready to broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub(crate) intent: TransactionIntent,
    pub(crate) signer: Hash160,
    /// Recoverable signature, `recovery_id || r || s`.
    pub(crate) signature: [u8; 65],
    pub(crate) bytes: Vec<u8>,
    pub(crate) txid: FixedBytes<32>,
}

impl SignedTransaction {
    pub fn intent(&self) -> &TransactionIntent {
        &self.intent
    }

    pub fn signer(&self) -> &Hash160 {
        &self.signer
    }

    pub fn signature(&self) -> &[u8; 65] {
        &self.signature
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn txid(&self) -> FixedBytes<32> {
        self.txid
    }

    /// Lowercase hex txid without the `0x` prefix, as the node reports it.
    pub fn txid_hex(&self) -> String {
        hex::encode(self.txid.as_slice())
    }
}
