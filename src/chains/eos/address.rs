//! EOS public key retrieval

use crate::error::Result;
use crate::messages::{EosGetPublicKey, EosPublicKey, Message};
use crate::transport::{expect_response, DeviceTransport};

/// Get the EOS public key for a derivation path from the device.
pub async fn get_eos_public_key<T: DeviceTransport + ?Sized>(
    transport: &mut T,
    path: &[u32],
    show_display: bool,
) -> Result<EosPublicKey> {
    let msg = EosGetPublicKey {
        address_n: path.to_vec(),
        show_display: Some(show_display),
    };
    let response = transport.send(Message::EosGetPublicKey(msg)).await?;
    expect_response(response, "EosPublicKey", |msg| match msg {
        Message::EosPublicKey(key) => Ok(key),
        other => Err(other),
    })
}
