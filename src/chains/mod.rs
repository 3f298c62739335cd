//! Chain support for hardware signing devices
//!
//! One module per supported chain, each building its own wire messages and
//! driving its own signing exchange over the shared device transport.

pub mod eos;

pub use eos::EosSupport;
