//! EOS authority encoding
//!
//! Weighted-threshold authorities (used by `updateauth` and `newaccount`)
//! carry base58-encoded public keys. The device wants the raw key bytes with
//! the 4-byte checksum stripped, and account names in packed form.

use serde::Deserialize;

use crate::chains::eos::name::serialize_name;
use crate::error::{EosSignerError, Result};
use crate::messages::{
    EosAuthorization, EosAuthorizationAccount, EosAuthorizationKey, EosAuthorizationWait,
    EosPermissionLevel,
};

/// Authority structure as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct EosAuthorizationInput {
    pub threshold: u32,
    pub keys: Vec<EosAuthorizationKeyInput>,
    pub accounts: Vec<EosAuthorizationAccountInput>,
    pub waits: Vec<EosAuthorizationWaitInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EosAuthorizationKeyInput {
    /// Base58 public key, either legacy `EOS...` or curve-tagged `PUB_K1_...`.
    pub key: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EosAuthorizationAccountInput {
    pub permission: EosPermissionLevelInput,
    pub weight: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EosPermissionLevelInput {
    pub actor: String,
    pub permission: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EosAuthorizationWaitInput {
    pub wait_sec: u32,
    pub weight: u32,
}

/// Encode an authority for the wire. Threshold and waits pass through;
/// keys are base58-decoded and checksum-stripped; account names are packed.
pub fn parse_authorization(auth: &EosAuthorizationInput) -> Result<EosAuthorization> {
    let keys = auth
        .keys
        .iter()
        .map(|k| {
            let key = decode_public_key(&k.key)?;
            Ok(EosAuthorizationKey {
                key_type: 0,
                key,
                weight: k.weight,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let accounts = auth
        .accounts
        .iter()
        .map(|acc| EosAuthorizationAccount {
            account: EosPermissionLevel {
                actor: serialize_name(&acc.permission.actor),
                permission: serialize_name(&acc.permission.permission),
            },
            weight: acc.weight,
        })
        .collect();

    let waits = auth
        .waits
        .iter()
        .map(|w| EosAuthorizationWait {
            wait_sec: w.wait_sec,
            weight: w.weight,
        })
        .collect();

    Ok(EosAuthorization {
        threshold: auth.threshold,
        keys,
        accounts,
        waits,
    })
}

/// Decode a base58 public key string to raw key bytes, dropping the trailing
/// 4-byte checksum. Legacy keys carry a 3-character `EOS` prefix, newer
/// formats a 7-character curve tag (`PUB_K1_` and friends).
fn decode_public_key(key: &str) -> Result<Vec<u8>> {
    let prefix_len = if key.starts_with("EOS") { 3 } else { 7 };
    let encoded = key.get(prefix_len..).unwrap_or("");
    let mut decoded = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| EosSignerError::Decode(format!("invalid base58 public key: {}", e)))?;
    if decoded.len() < 4 {
        return Err(EosSignerError::Decode(format!(
            "public key payload too short: {} bytes",
            decoded.len()
        )));
    }
    decoded.truncate(decoded.len() - 4);
    Ok(decoded)
}
