//! EOS signing flow
//!
//! Drives the device's sequential sign protocol: one `EosSignTx` opening the
//! session, then one acknowledgement per `EosTxActionRequest` until the
//! device returns the signature. Opaque action payloads larger than one
//! chunk take several requests for the same action, the device asking each
//! time with the number of bytes it is still owed.

use tracing::{debug, trace};

use crate::chains::eos::transaction::UnsignedEosTransaction;
use crate::error::{EosSignerError, Result};
use crate::messages::{
    EosActionUnknown, EosActionVariant, EosSignTx, EosSignedTx, EosTxActionAck,
    EosTxActionRequest, Message,
};
use crate::transport::{expect_response, DeviceTransport};

/// Largest opaque payload slice sent in one acknowledgement, in bytes.
pub const CHUNK_SIZE: usize = 2048;

/// Run the signing exchange for an already validated transaction.
///
/// Exactly one device call is in flight at any point. Transport and device
/// errors abort the flow; nothing is committed on the device until the
/// final response, so there is no cleanup to do.
pub async fn sign_transaction<T: DeviceTransport + ?Sized>(
    transport: &mut T,
    address_n: &[u32],
    tx: UnsignedEosTransaction,
) -> Result<EosSignedTx> {
    if tx.actions.is_empty() {
        return Err(EosSignerError::Validation(
            "transaction has no actions".to_string(),
        ));
    }

    debug!(
        chain_id = %tx.chain_id,
        num_actions = tx.actions.len(),
        "starting EOS signing session"
    );
    let open = EosSignTx {
        address_n: address_n.to_vec(),
        chain_id: tx.chain_id,
        header: tx.header,
        num_actions: tx.actions.len() as u32,
    };
    let mut response = transport.send(Message::EosSignTx(open)).await?;

    let mut index = 0;
    loop {
        let request = expect_action_request(response)?;
        let action = &tx.actions[index];
        let last_action = index + 1 >= tx.actions.len();

        let step = match &action.action {
            EosActionVariant::Unknown(unknown) => {
                chunk_step(&action.common, unknown, &request, last_action)?
            }
            _ => Step {
                ack: action.clone(),
                final_ack: last_action,
                advance: true,
            },
        };

        if step.final_ack {
            let reply = transport.send(Message::EosTxActionAck(step.ack)).await?;
            let signed = expect_response(reply, "EosSignedTx", |msg| match msg {
                Message::EosSignedTx(signed) => Ok(signed),
                other => Err(other),
            })?;
            debug!("EOS signing session complete");
            return Ok(signed);
        }

        response = transport.send(Message::EosTxActionAck(step.ack)).await?;
        if step.advance {
            index += 1;
        }
    }
}

struct Step {
    ack: EosTxActionAck,
    /// The device answers this acknowledgement with `EosSignedTx`.
    final_ack: bool,
    /// Move on to the next action after this acknowledgement.
    advance: bool,
}

/// Build the acknowledgement for one slice of an opaque payload.
fn chunk_step(
    common: &crate::messages::EosActionCommon,
    unknown: &EosActionUnknown,
    request: &EosTxActionRequest,
    last_action: bool,
) -> Result<Step> {
    let offset = request.data_size.map(i64::from).unwrap_or(0);
    let chunk = data_chunk(&unknown.data_chunk, offset).ok_or_else(|| {
        EosSignerError::Device(format!(
            "device requested invalid payload offset {} of {} bytes",
            offset, unknown.data_size
        ))
    })?;

    let total = i64::from(unknown.data_size);
    let sent = if offset > 0 {
        total - offset + CHUNK_SIZE as i64
    } else {
        CHUNK_SIZE as i64
    };
    let last_chunk = sent >= total;
    trace!(offset, sent, total, last_chunk, "sending payload chunk");

    Ok(Step {
        ack: EosTxActionAck {
            common: common.clone(),
            action: EosActionVariant::Unknown(EosActionUnknown {
                data_size: unknown.data_size,
                data_chunk: chunk.to_string(),
            }),
        },
        final_ack: last_action && last_chunk,
        advance: last_chunk,
    })
}

/// Slice the next chunk out of a hex payload. `offset` is the byte count
/// the device still wants; 0 means start from the beginning. Returns `None`
/// for offsets outside the payload.
fn data_chunk(data: &str, offset: i64) -> Option<&str> {
    if offset < 0 {
        return None;
    }
    let offset = offset as usize;
    if data.len() < offset {
        return None;
    }
    let start = if offset > 0 {
        data.len().saturating_sub(offset * 2)
    } else {
        0
    };
    let end = (start + CHUNK_SIZE * 2).min(data.len());
    Some(&data[start..end])
}

fn expect_action_request(response: Message) -> Result<EosTxActionRequest> {
    expect_response(response, "EosTxActionRequest", |msg| match msg {
        Message::EosTxActionRequest(request) => Ok(request),
        other => Err(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_chunk_is_bounded() {
        // 2500-byte payload, 5000 hex characters
        let data = "ab".repeat(2500);
        let chunk = data_chunk(&data, 0).unwrap();
        assert_eq!(chunk.len(), CHUNK_SIZE * 2);
        assert_eq!(chunk, &data[..4096]);
    }

    #[test]
    fn test_remainder_chunk_reaches_end_of_payload() {
        let data = "ab".repeat(2500);
        // 452 bytes still owed after the first 2048 went out
        let chunk = data_chunk(&data, 452).unwrap();
        assert_eq!(chunk, &data[4096..]);
        assert_eq!(chunk.len(), 904);
    }

    #[test]
    fn test_small_payload_fits_one_chunk() {
        let data = "00112233";
        assert_eq!(data_chunk(data, 0).unwrap(), data);
    }

    #[test]
    fn test_empty_payload_yields_empty_chunk() {
        assert_eq!(data_chunk("", 0).unwrap(), "");
    }

    #[test]
    fn test_out_of_range_offsets_rejected() {
        let data = "ab".repeat(2500);
        assert!(data_chunk(&data, -1).is_none());
        assert!(data_chunk(&data, data.len() as i64 + 1).is_none());
    }
}
