//! Transaction validation and assembly
//!
//! Turns the caller's transaction into the exact sequence of device
//! messages: one `EosSignTx` header plus an ordered list of action
//! acknowledgements. Action order is authoritative; the device signs
//! exactly the sequence presented here.

use chrono::DateTime;
use serde::Deserialize;

use crate::chains::eos::action::{translate_action, EosActionInput};
use crate::error::{EosSignerError, Result};
use crate::messages::{EosTxActionAck, EosTxHeader};

/// Transaction as supplied by the caller. Header fields use the camelCase
/// names of the surrounding JSON APIs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EosTransactionInput {
    pub chain_id: String,
    pub header: Option<EosTxHeaderInput>,
    pub actions: Vec<EosActionInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EosTxHeaderInput {
    pub expiration: EosExpiration,
    pub ref_block_num: u32,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u32,
    pub delay_sec: u32,
}

/// Expiration either as epoch seconds or as an ISO-8601 timestamp.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EosExpiration {
    Timestamp(u32),
    DateTime(String),
}

/// Validated transaction, ready for the signing flow.
#[derive(Debug, Clone)]
pub struct UnsignedEosTransaction {
    pub chain_id: String,
    pub header: Option<EosTxHeader>,
    pub actions: Vec<EosTxActionAck>,
}

/// Validate and translate a transaction. Everything that can fail without
/// the device fails here, before the first device call.
pub fn validate(tx: &EosTransactionInput) -> Result<UnsignedEosTransaction> {
    let header = match &tx.header {
        Some(h) => Some(EosTxHeader {
            expiration: expiration_epoch(&h.expiration)?,
            ref_block_num: h.ref_block_num,
            ref_block_prefix: h.ref_block_prefix,
            max_net_usage_words: h.max_net_usage_words,
            max_cpu_usage_ms: h.max_cpu_usage_ms,
            delay_sec: h.delay_sec,
        }),
        None => None,
    };

    let actions = tx
        .actions
        .iter()
        .map(translate_action)
        .collect::<Result<Vec<_>>>()?;

    Ok(UnsignedEosTransaction {
        chain_id: tx.chain_id.clone(),
        header,
        actions,
    })
}

/// Resolve an expiration to epoch seconds. Timestamps without a trailing
/// `Z` get one appended so they parse as UTC rather than local time.
fn expiration_epoch(expiration: &EosExpiration) -> Result<u32> {
    let raw = match expiration {
        EosExpiration::Timestamp(t) => return Ok(*t),
        EosExpiration::DateTime(s) => s,
    };
    let utc = if raw.ends_with('Z') {
        raw.clone()
    } else {
        format!("{}Z", raw)
    };
    let parsed = DateTime::parse_from_rfc3339(&utc).map_err(|e| {
        EosSignerError::Validation(format!("invalid expiration '{}': {}", raw, e))
    })?;
    u32::try_from(parsed.timestamp()).map_err(|_| {
        EosSignerError::Validation(format!("expiration '{}' out of range", raw))
    })
}
