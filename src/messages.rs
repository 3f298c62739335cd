//! EOS device protocol messages
//!
//! Hand-written equivalents of the device's `messages-eos.proto` schema.
//! Field names follow the protobuf definitions; 64-bit name and symbol
//! fields are carried as decimal-digit strings so no precision is lost at
//! the JSON boundary.

use serde::{Deserialize, Serialize};

/// Request the EOS public key for a derivation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosGetPublicKey {
    pub address_n: Vec<u32>,
    pub show_display: Option<bool>,
}

/// Public key response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosPublicKey {
    pub wif_public_key: String,
    pub raw_public_key: Vec<u8>,
}

/// Opens a signing session on the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosSignTx {
    pub address_n: Vec<u32>,
    pub chain_id: String,
    pub header: Option<EosTxHeader>,
    pub num_actions: u32,
}

/// Transaction header, expiration in epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosTxHeader {
    pub expiration: u32,
    pub ref_block_num: u32,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u32,
    pub delay_sec: u32,
}

/// Device request for the next action, or for the next slice of an opaque
/// action payload. `data_size` is the number of payload bytes still owed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EosTxActionRequest {
    pub data_size: Option<u32>,
}

/// One action acknowledgement: the common fields plus exactly one typed
/// payload variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosTxActionAck {
    pub common: EosActionCommon,
    #[serde(flatten)]
    pub action: EosActionVariant,
}

/// Fields present on every action regardless of variant. All names are
/// serialized 64-bit name values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionCommon {
    pub account: String,
    pub name: String,
    pub authorization: Vec<EosPermissionLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosPermissionLevel {
    pub actor: String,
    pub permission: String,
}

/// Asset quantity: decimal amount string plus the packed symbol value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosAsset {
    pub amount: String,
    pub symbol: String,
}

/// Weighted-threshold authority structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosAuthorization {
    pub threshold: u32,
    pub keys: Vec<EosAuthorizationKey>,
    pub accounts: Vec<EosAuthorizationAccount>,
    pub waits: Vec<EosAuthorizationWait>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosAuthorizationKey {
    /// Key container type; always 0 (legacy) on this device generation.
    #[serde(rename = "type")]
    pub key_type: u32,
    /// Decoded public key bytes with the 4-byte checksum stripped.
    pub key: Vec<u8>,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosAuthorizationAccount {
    pub account: EosPermissionLevel,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosAuthorizationWait {
    pub wait_sec: u32,
    pub weight: u32,
}

/// The closed set of action payloads the device renders natively, plus the
/// opaque fallback for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EosActionVariant {
    Transfer(EosActionTransfer),
    Delegate(EosActionDelegate),
    Undelegate(EosActionUndelegate),
    BuyRam(EosActionBuyRam),
    BuyRamBytes(EosActionBuyRamBytes),
    SellRam(EosActionSellRam),
    VoteProducer(EosActionVoteProducer),
    Refund(EosActionRefund),
    UpdateAuth(EosActionUpdateAuth),
    DeleteAuth(EosActionDeleteAuth),
    LinkAuth(EosActionLinkAuth),
    UnlinkAuth(EosActionUnlinkAuth),
    NewAccount(EosActionNewAccount),
    Unknown(EosActionUnknown),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionTransfer {
    pub sender: String,
    pub receiver: String,
    pub quantity: EosAsset,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionDelegate {
    pub sender: String,
    pub receiver: String,
    pub net_quantity: EosAsset,
    pub cpu_quantity: EosAsset,
    pub transfer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionUndelegate {
    pub sender: String,
    pub receiver: String,
    pub net_quantity: EosAsset,
    pub cpu_quantity: EosAsset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionBuyRam {
    pub payer: String,
    pub receiver: String,
    pub quantity: EosAsset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionBuyRamBytes {
    pub payer: String,
    pub receiver: String,
    pub bytes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionSellRam {
    pub account: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionVoteProducer {
    pub voter: String,
    pub proxy: String,
    pub producers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionRefund {
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionUpdateAuth {
    pub account: String,
    pub permission: String,
    pub parent: String,
    pub auth: EosAuthorization,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionDeleteAuth {
    pub account: String,
    pub permission: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionLinkAuth {
    pub account: String,
    pub code: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub requirement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionUnlinkAuth {
    pub account: String,
    pub code: String,
    #[serde(rename = "type")]
    pub action_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionNewAccount {
    pub creator: String,
    pub name: String,
    pub owner: EosAuthorization,
    pub active: EosAuthorization,
}

/// Opaque payload for actions the device cannot render. `data_size` is the
/// total payload size in bytes; `data_chunk` carries at most one chunk of
/// hex-encoded data per acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosActionUnknown {
    pub data_size: u32,
    pub data_chunk: String,
}

/// Final device response carrying the signature over the full transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EosSignedTx {
    pub signature: String,
}

/// Generic device failure response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub code: Option<i32>,
    pub message: Option<String>,
}

/// Envelope over every message kind this crate exchanges with a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    EosGetPublicKey(EosGetPublicKey),
    EosPublicKey(EosPublicKey),
    EosSignTx(EosSignTx),
    EosTxActionRequest(EosTxActionRequest),
    EosTxActionAck(EosTxActionAck),
    EosSignedTx(EosSignedTx),
    Failure(Failure),
}

impl Message {
    /// Wire name of the message, used in protocol error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::EosGetPublicKey(_) => "EosGetPublicKey",
            Message::EosPublicKey(_) => "EosPublicKey",
            Message::EosSignTx(_) => "EosSignTx",
            Message::EosTxActionRequest(_) => "EosTxActionRequest",
            Message::EosTxActionAck(_) => "EosTxActionAck",
            Message::EosSignedTx(_) => "EosSignedTx",
            Message::Failure(_) => "Failure",
        }
    }
}
