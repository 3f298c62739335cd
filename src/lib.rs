//! EOS transaction signing for hardware wallets
//!
//! Prepares EOS transactions for an external signing device and drives the
//! sequential request/acknowledge exchange until the device returns a
//! signature. The transport itself (USB framing, session queueing) is
//! supplied by the caller through the [`transport::DeviceTransport`] trait.

pub mod chains;
pub mod error;
pub mod messages;
pub mod transport;

pub use chains::eos::{EosSupport, EosTransactionInput};
pub use error::{EosSignerError, Result};
pub use transport::DeviceTransport;
