//! Action translation
//!
//! Maps a caller-supplied action onto the device's typed action variants.
//! Dispatch is on the on-chain action name; anything outside the known set
//! falls back to the opaque `unknown` variant, which requires the raw action
//! data to already be hex-encoded.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::chains::eos::asset::parse_quantity;
use crate::chains::eos::authorization::{parse_authorization, EosAuthorizationInput};
use crate::chains::eos::name::serialize_name;
use crate::error::{EosSignerError, Result};
use crate::messages::{
    EosActionBuyRam, EosActionBuyRamBytes, EosActionCommon, EosActionDeleteAuth,
    EosActionDelegate, EosActionLinkAuth, EosActionNewAccount, EosActionRefund,
    EosActionSellRam, EosActionTransfer, EosActionUndelegate, EosActionUnknown,
    EosActionUnlinkAuth, EosActionUpdateAuth, EosActionVariant, EosActionVoteProducer,
    EosPermissionLevel, EosTxActionAck,
};

/// One action as supplied by the caller. `data` stays untyped until dispatch
/// because its shape depends on the action name.
#[derive(Debug, Clone, Deserialize)]
pub struct EosActionInput {
    pub account: String,
    pub name: String,
    pub authorization: Vec<EosActionAuthorizationInput>,
    pub data: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EosActionAuthorizationInput {
    pub actor: String,
    pub permission: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TransferData {
    from: String,
    to: String,
    quantity: String,
    memo: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DelegateData {
    from: String,
    receiver: String,
    stake_net_quantity: String,
    stake_cpu_quantity: String,
    transfer: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct UndelegateData {
    from: String,
    receiver: String,
    unstake_net_quantity: String,
    unstake_cpu_quantity: String,
}

#[derive(Debug, Clone, Deserialize)]
struct BuyRamData {
    payer: String,
    receiver: String,
    quant: String,
}

#[derive(Debug, Clone, Deserialize)]
struct BuyRamBytesData {
    payer: String,
    receiver: String,
    bytes: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct SellRamData {
    account: String,
    bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct VoteProducerData {
    voter: String,
    proxy: String,
    producers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RefundData {
    owner: String,
}

#[derive(Debug, Clone, Deserialize)]
struct UpdateAuthData {
    account: String,
    permission: String,
    parent: String,
    auth: EosAuthorizationInput,
}

#[derive(Debug, Clone, Deserialize)]
struct DeleteAuthData {
    account: String,
    permission: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LinkAuthData {
    account: String,
    code: String,
    #[serde(rename = "type")]
    action_type: String,
    requirement: String,
}

#[derive(Debug, Clone, Deserialize)]
struct UnlinkAuthData {
    account: String,
    code: String,
    #[serde(rename = "type")]
    action_type: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NewAccountData {
    creator: String,
    name: String,
    owner: EosAuthorizationInput,
    active: EosAuthorizationInput,
}

/// Translate one action into its acknowledgement message.
pub fn translate_action(action: &EosActionInput) -> Result<EosTxActionAck> {
    let variant = match known_variant(action)? {
        Some(variant) => variant,
        None => unknown_variant(action)?,
    };
    Ok(EosTxActionAck {
        common: action_common(action),
        action: variant,
    })
}

/// Dispatch over the closed set of natively rendered action kinds. Returns
/// `None` when the action name is not in the set.
fn known_variant(action: &EosActionInput) -> Result<Option<EosActionVariant>> {
    let variant = match action.name.as_str() {
        "transfer" => {
            let d: TransferData = action_data(action)?;
            EosActionVariant::Transfer(EosActionTransfer {
                sender: serialize_name(&d.from),
                receiver: serialize_name(&d.to),
                quantity: parse_quantity(&d.quantity)?,
                memo: d.memo,
            })
        }
        "delegatebw" => {
            let d: DelegateData = action_data(action)?;
            EosActionVariant::Delegate(EosActionDelegate {
                sender: serialize_name(&d.from),
                receiver: serialize_name(&d.receiver),
                net_quantity: parse_quantity(&d.stake_net_quantity)?,
                cpu_quantity: parse_quantity(&d.stake_cpu_quantity)?,
                transfer: d.transfer,
            })
        }
        "undelegatebw" => {
            let d: UndelegateData = action_data(action)?;
            EosActionVariant::Undelegate(EosActionUndelegate {
                sender: serialize_name(&d.from),
                receiver: serialize_name(&d.receiver),
                net_quantity: parse_quantity(&d.unstake_net_quantity)?,
                cpu_quantity: parse_quantity(&d.unstake_cpu_quantity)?,
            })
        }
        "buyram" => {
            let d: BuyRamData = action_data(action)?;
            EosActionVariant::BuyRam(EosActionBuyRam {
                payer: serialize_name(&d.payer),
                receiver: serialize_name(&d.receiver),
                quantity: parse_quantity(&d.quant)?,
            })
        }
        "buyrambytes" => {
            let d: BuyRamBytesData = action_data(action)?;
            EosActionVariant::BuyRamBytes(EosActionBuyRamBytes {
                payer: serialize_name(&d.payer),
                receiver: serialize_name(&d.receiver),
                bytes: d.bytes,
            })
        }
        "sellram" => {
            let d: SellRamData = action_data(action)?;
            EosActionVariant::SellRam(EosActionSellRam {
                account: serialize_name(&d.account),
                bytes: d.bytes,
            })
        }
        "voteproducer" => {
            let d: VoteProducerData = action_data(action)?;
            EosActionVariant::VoteProducer(EosActionVoteProducer {
                voter: serialize_name(&d.voter),
                proxy: serialize_name(&d.proxy),
                producers: d.producers.iter().map(|p| serialize_name(p)).collect(),
            })
        }
        "refund" => {
            let d: RefundData = action_data(action)?;
            EosActionVariant::Refund(EosActionRefund {
                owner: serialize_name(&d.owner),
            })
        }
        "updateauth" => {
            let d: UpdateAuthData = action_data(action)?;
            EosActionVariant::UpdateAuth(EosActionUpdateAuth {
                account: serialize_name(&d.account),
                permission: serialize_name(&d.permission),
                parent: serialize_name(&d.parent),
                auth: parse_authorization(&d.auth)?,
            })
        }
        "deleteauth" => {
            let d: DeleteAuthData = action_data(action)?;
            EosActionVariant::DeleteAuth(EosActionDeleteAuth {
                account: serialize_name(&d.account),
                permission: serialize_name(&d.permission),
            })
        }
        "linkauth" => {
            let d: LinkAuthData = action_data(action)?;
            EosActionVariant::LinkAuth(EosActionLinkAuth {
                account: serialize_name(&d.account),
                code: serialize_name(&d.code),
                action_type: serialize_name(&d.action_type),
                requirement: serialize_name(&d.requirement),
            })
        }
        "unlinkauth" => {
            let d: UnlinkAuthData = action_data(action)?;
            EosActionVariant::UnlinkAuth(EosActionUnlinkAuth {
                account: serialize_name(&d.account),
                code: serialize_name(&d.code),
                action_type: serialize_name(&d.action_type),
            })
        }
        "newaccount" => {
            let d: NewAccountData = action_data(action)?;
            EosActionVariant::NewAccount(EosActionNewAccount {
                creator: serialize_name(&d.creator),
                name: serialize_name(&d.name),
                owner: parse_authorization(&d.owner)?,
                active: parse_authorization(&d.active)?,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(variant))
}

/// Fallback for actions the device cannot render: the raw data must already
/// be a hex string, streamed to the device in chunks.
fn unknown_variant(action: &EosActionInput) -> Result<EosActionVariant> {
    let data = match &action.data {
        Value::String(s) => s,
        _ => {
            return Err(EosSignerError::UnsupportedAction(format!(
                "action '{}' is not supported and its data is not a hex string",
                action.name
            )))
        }
    };
    let bytes = hex::decode(data).map_err(|e| {
        EosSignerError::UnsupportedAction(format!(
            "action '{}' carries invalid hex data: {}",
            action.name, e
        ))
    })?;
    trace!(
        action = %action.name,
        data_size = bytes.len(),
        "falling back to opaque action payload"
    );
    Ok(EosActionVariant::Unknown(EosActionUnknown {
        data_size: bytes.len() as u32,
        data_chunk: data.clone(),
    }))
}

fn action_common(action: &EosActionInput) -> EosActionCommon {
    EosActionCommon {
        account: serialize_name(&action.account),
        name: serialize_name(&action.name),
        authorization: action
            .authorization
            .iter()
            .map(|a| EosPermissionLevel {
                actor: serialize_name(&a.actor),
                permission: serialize_name(&a.permission),
            })
            .collect(),
    }
}

fn action_data<T: DeserializeOwned>(action: &EosActionInput) -> Result<T> {
    serde_json::from_value(action.data.clone()).map_err(|e| {
        EosSignerError::Validation(format!("malformed '{}' action data: {}", action.name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(name: &str, data: Value) -> EosActionInput {
        EosActionInput {
            account: "eosio.token".to_string(),
            name: name.to_string(),
            authorization: vec![EosActionAuthorizationInput {
                actor: "miniminimini".to_string(),
                permission: "active".to_string(),
            }],
            data,
        }
    }

    #[test]
    fn test_translate_transfer() {
        let ack = translate_action(&input(
            "transfer",
            json!({
                "from": "miniminimini",
                "to": "maximaximaxi",
                "quantity": "1.0000 EOS",
                "memo": "testing",
            }),
        ))
        .unwrap();

        assert_eq!(ack.common.account, "6138663591592764928");
        assert_eq!(ack.common.name, "14829575313431724032");
        assert_eq!(ack.common.authorization.len(), 1);
        match ack.action {
            EosActionVariant::Transfer(t) => {
                assert_eq!(t.sender, serialize_name("miniminimini"));
                assert_eq!(t.receiver, serialize_name("maximaximaxi"));
                assert_eq!(t.quantity.amount, "10000");
                assert_eq!(t.memo, "testing");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_translate_delegate_remaps_stake_fields() {
        let ack = translate_action(&input(
            "delegatebw",
            json!({
                "from": "miniminimini",
                "receiver": "maximaximaxi",
                "stake_net_quantity": "1.0000 EOS",
                "stake_cpu_quantity": "2.0000 EOS",
                "transfer": true,
            }),
        ))
        .unwrap();
        match ack.action {
            EosActionVariant::Delegate(d) => {
                assert_eq!(d.net_quantity.amount, "10000");
                assert_eq!(d.cpu_quantity.amount, "20000");
                assert!(d.transfer);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_translate_vote_producer_packs_each_producer() {
        let ack = translate_action(&input(
            "voteproducer",
            json!({
                "voter": "miniminimini",
                "proxy": "",
                "producers": ["eosio", "eosio.token"],
            }),
        ))
        .unwrap();
        match ack.action {
            EosActionVariant::VoteProducer(v) => {
                assert_eq!(v.proxy, "0");
                assert_eq!(
                    v.producers,
                    vec![
                        "6138663577826885632".to_string(),
                        "6138663591592764928".to_string()
                    ]
                );
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_translate_link_auth_renames_type_field() {
        let ack = translate_action(&input(
            "linkauth",
            json!({
                "account": "miniminimini",
                "code": "eosio.token",
                "type": "transfer",
                "requirement": "active",
            }),
        ))
        .unwrap();
        match ack.action {
            EosActionVariant::LinkAuth(l) => {
                assert_eq!(l.action_type, serialize_name("transfer"));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_action_with_hex_data() {
        let ack = translate_action(&input("mysteryact", json!("deadbeef00"))).unwrap();
        match ack.action {
            EosActionVariant::Unknown(u) => {
                assert_eq!(u.data_size, 5);
                assert_eq!(u.data_chunk, "deadbeef00");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_action_with_object_data_rejected() {
        let err = translate_action(&input("mysteryact", json!({"field": 1}))).unwrap_err();
        assert!(matches!(err, EosSignerError::UnsupportedAction(_)));
    }

    #[test]
    fn test_unknown_action_with_non_hex_string_rejected() {
        let err = translate_action(&input("mysteryact", json!("not hex"))).unwrap_err();
        assert!(matches!(err, EosSignerError::UnsupportedAction(_)));
    }

    #[test]
    fn test_malformed_known_action_data_rejected() {
        let err = translate_action(&input("transfer", json!({"from": "a"}))).unwrap_err();
        assert!(matches!(err, EosSignerError::Validation(_)));
    }

    #[test]
    fn test_malformed_quantity_rejected() {
        let err = translate_action(&input(
            "transfer",
            json!({
                "from": "a",
                "to": "b",
                "quantity": "EOS 1.0",
                "memo": "",
            }),
        ))
        .unwrap_err();
        assert!(matches!(err, EosSignerError::Validation(_)));
    }
}
