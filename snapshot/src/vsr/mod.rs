//! Client-side interface to the voter-stake-registry program: the account
//! layouts, the one instruction the simulator issues, and the event encoding
//! used to read results back out of simulation logs.

pub mod events;
pub mod instructions;
pub mod state;

use sha2::{
    Digest,
    Sha256,
};

/// Eight byte anchor discriminator: `sha256("<namespace>:<name>")`.
/// Namespaces in use: `global` for instructions, `account` for accounts,
/// `event` for events.
pub fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{}:{}", namespace, name).as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    bytes
}
