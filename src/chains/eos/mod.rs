//! EOS chain support
//!
//! Provides EOS support over a device transport, including:
//! - Account/action name and asset quantity packing
//! - Typed translation of the known system actions, with an opaque
//!   chunked fallback for everything else
//! - The multi-step transaction signing exchange
//! - Public key retrieval

use crate::error::Result;
use crate::messages::{EosPublicKey, EosSignedTx};
use crate::transport::DeviceTransport;

pub mod action;
pub mod address;
pub mod asset;
pub mod authorization;
pub mod name;
pub mod signing;
pub mod transaction;

pub use action::{translate_action, EosActionInput};
pub use address::get_eos_public_key;
pub use asset::parse_quantity;
pub use authorization::parse_authorization;
pub use name::serialize_name;
pub use signing::{sign_transaction, CHUNK_SIZE};
pub use transaction::{validate, EosTransactionInput, UnsignedEosTransaction};

/// Main EOS support structure
pub struct EosSupport;

impl EosSupport {
    /// Get an EOS public key for the given path
    pub async fn get_public_key<T: DeviceTransport + ?Sized>(
        transport: &mut T,
        path: &[u32],
        show_display: bool,
    ) -> Result<EosPublicKey> {
        address::get_eos_public_key(transport, path, show_display).await
    }

    /// Validate and sign an EOS transaction
    pub async fn sign_transaction<T: DeviceTransport + ?Sized>(
        transport: &mut T,
        path: &[u32],
        tx: &EosTransactionInput,
    ) -> Result<EosSignedTx> {
        let unsigned = transaction::validate(tx)?;
        signing::sign_transaction(transport, path, unsigned).await
    }
}
