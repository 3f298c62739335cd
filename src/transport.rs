//! Device transport seam
//!
//! The session/transport layer (USB framing, device queueing, retries) lives
//! outside this crate. All the signing flow needs is one operation: send a
//! message, suspend, get the device's reply. Implementations must guarantee
//! that at most one exchange is in flight on a channel at a time; the signing
//! flow itself never issues concurrent calls.

use async_trait::async_trait;

use crate::error::{EosSignerError, Result};
use crate::messages::{Failure, Message};

/// One request/response exchange with a signing device.
#[async_trait]
pub trait DeviceTransport: Send {
    /// Send `msg` and return the device's reply. Channel failures map to
    /// [`EosSignerError::Transport`] and abort the signing flow outright.
    async fn send(&mut self, msg: Message) -> Result<Message>;
}

/// Narrow a device reply down to the expected kind. `Failure` responses and
/// any other kind become errors.
pub(crate) fn expect_response<T>(
    response: Message,
    expected: &'static str,
    extract: impl FnOnce(Message) -> std::result::Result<T, Message>,
) -> Result<T> {
    match response {
        Message::Failure(f) => Err(failure_to_error(f)),
        other => extract(other).map_err(|got| EosSignerError::UnexpectedResponse {
            expected,
            got: got.kind(),
        }),
    }
}

fn failure_to_error(failure: Failure) -> EosSignerError {
    let message = failure
        .message
        .unwrap_or_else(|| "device returned failure".to_string());
    match failure.code {
        Some(code) => EosSignerError::Device(format!("{} (code {})", message, code)),
        None => EosSignerError::Device(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::EosTxActionRequest;

    #[test]
    fn test_expect_response_matches_kind() {
        let response = Message::EosTxActionRequest(EosTxActionRequest {
            data_size: Some(16),
        });
        let request = expect_response(response, "EosTxActionRequest", |msg| match msg {
            Message::EosTxActionRequest(r) => Ok(r),
            other => Err(other),
        })
        .unwrap();
        assert_eq!(request.data_size, Some(16));
    }

    #[test]
    fn test_expect_response_rejects_wrong_kind() {
        let response = Message::EosTxActionRequest(EosTxActionRequest::default());
        let err = expect_response(response, "EosSignedTx", |msg| match msg {
            Message::EosSignedTx(s) => Ok(s),
            other => Err(other),
        })
        .unwrap_err();
        match err {
            EosSignerError::UnexpectedResponse { expected, got } => {
                assert_eq!(expected, "EosSignedTx");
                assert_eq!(got, "EosTxActionRequest");
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn test_expect_response_surfaces_device_failure() {
        let response = Message::Failure(Failure {
            code: Some(9),
            message: Some("Action cancelled by user".to_string()),
        });
        let err = expect_response(response, "EosSignedTx", |msg| match msg {
            Message::EosSignedTx(s) => Ok(s),
            other => Err(other),
        })
        .unwrap_err();
        assert!(matches!(err, EosSignerError::Device(_)));
    }
}
