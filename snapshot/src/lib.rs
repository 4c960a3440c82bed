//! Delegated voting power snapshots for spl-governance realms.
//!
//! For each configured realm the pipeline scans the governance program's
//! account index for token owner records delegated to one wallet, computes
//! each delegator's voter-stake-registry voting power by simulating the
//! `log_voter_info` instruction (never submitting it) and decoding the
//! `VoterInfo` event from the logs, and folds the results into per-realm
//! summaries.

pub mod aggregator;
pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod pda;
pub mod records;
pub mod scanner;
pub mod simulator;
pub mod vsr;
