//! Decoding of anchor events from simulation logs.
//!
//! The program emits events as `Program data: <base64>` log lines whose
//! payload is an eight byte `sha256("event:<Name>")` discriminator followed
//! by the borsh-encoded fields. Lines with other prefixes and payloads with
//! unknown discriminators are skipped.

use {
    crate::vsr::sighash,
    anchor_lang::{
        prelude::borsh,
        AnchorDeserialize,
        AnchorSerialize,
    },
    base64::Engine,
};

pub const PROGRAM_DATA_PREFIX: &str = "Program data: ";

/// Wallet-level voting power totals, logged once per `log_voter_info` call.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq)]
pub struct VoterInfo {
    /// Voting power with lockup effects applied.
    pub voting_power: u64,
    /// Voting power ignoring lockup effects.
    pub voting_power_baseline: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq)]
pub struct VestingInfo {
    /// Tokens vesting per period.
    pub rate: u64,
    pub next_timestamp: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq)]
pub struct LockingInfo {
    pub amount: u64,
    pub end_timestamp: Option<u64>,
    pub vesting: Option<VestingInfo>,
}

/// Per-deposit detail, logged once per deposit entry in the window.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq)]
pub struct DepositEntryInfo {
    pub deposit_entry_index: u8,
    pub voting_mint_config_index: u8,
    pub unlocked: u64,
    pub voting_power: u64,
    pub voting_power_baseline: u64,
    pub locking: Option<LockingInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VsrEvent {
    VoterInfo(VoterInfo),
    DepositEntryInfo(DepositEntryInfo),
}

impl VsrEvent {
    pub fn name(&self) -> &'static str {
        match self {
            VsrEvent::VoterInfo(_) => "VoterInfo",
            VsrEvent::DepositEntryInfo(_) => "DepositEntryInfo",
        }
    }
}

/// Decode every recognizable event in a batch of log lines, in log order.
pub fn parse_event_logs(logs: &[String]) -> Vec<VsrEvent> {
    let voter_info = sighash("event", "VoterInfo");
    let deposit_entry_info = sighash("event", "DepositEntryInfo");
    let mut events = Vec::new();
    for line in logs {
        let payload = match line.strip_prefix(PROGRAM_DATA_PREFIX) {
            Some(payload) => payload,
            None => continue,
        };
        let bytes = match base64::prelude::BASE64_STANDARD.decode(payload) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };
        if bytes.len() < 8 {
            continue;
        }
        let discriminator = &bytes[..8];
        let mut body = &bytes[8..];
        if discriminator == &voter_info[..] {
            if let Ok(event) = VoterInfo::deserialize(&mut body) {
                events.push(VsrEvent::VoterInfo(event));
            }
        } else if discriminator == &deposit_entry_info[..] {
            if let Ok(event) = DepositEntryInfo::deserialize(&mut body) {
                events.push(VsrEvent::DepositEntryInfo(event));
            }
        }
    }
    events
}

/// Encode an event the way the program logs it. Test fixtures build
/// simulation logs with this.
pub fn event_log_line<T: AnchorSerialize>(name: &str, event: &T) -> String {
    let mut payload = sighash("event", name).to_vec();
    event
        .serialize(&mut payload)
        .expect("event serialization cannot fail");
    format!(
        "{}{}",
        PROGRAM_DATA_PREFIX,
        base64::prelude::BASE64_STANDARD.encode(payload)
    )
}
