//! Account layouts of the voter-stake-registry program, as read by clients.

use {
    crate::{
        client::LedgerClient,
        error::SimulationError,
        vsr::sighash,
    },
    anchor_lang::{
        prelude::borsh,
        AnchorDeserialize,
        AnchorSerialize,
    },
    solana_sdk::pubkey::Pubkey,
};

/// Locking schedule attached to one deposit entry.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Lockup {
    pub start_ts: i64,
    pub end_ts: i64,
    pub kind: u8,
    pub reserved: [u8; 15],
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct DepositEntry {
    pub lockup: Lockup,
    pub amount_deposited_native: u64,
    pub amount_initially_locked_native: u64,
    /// Only used entries contribute to voting power.
    pub is_used: bool,
    pub allow_clawback: bool,
    pub voting_mint_config_idx: u8,
    pub reserved: [u8; 29],
}

/// Per-wallet deposit ledger under one registrar.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy)]
pub struct Voter {
    pub voter_authority: Pubkey,
    pub registrar: Pubkey,
    pub deposits: [DepositEntry; 32],
    pub voter_bump: u8,
    pub voter_weight_record_bump: u8,
    pub reserved: [u8; 94],
}

impl Voter {
    pub fn used_deposits(&self) -> usize {
        self.deposits.iter().filter(|entry| entry.is_used).count()
    }
}

/// Deserialize a voter account, checking the anchor account discriminator.
pub fn deserialize_voter(data: &[u8]) -> Result<Voter, SimulationError> {
    if data.len() < 8 {
        return Err(SimulationError::Decode(
            "voter account shorter than its discriminator".to_string(),
        ));
    }
    let discriminator = &data[..8];
    if discriminator != &sighash("account", "Voter")[..] {
        return Err(SimulationError::Decode(
            "voter account discriminator mismatch".to_string(),
        ));
    }
    let mut body = &data[8..];
    Voter::deserialize(&mut body)
        .map_err(|err| SimulationError::Decode(format!("voter account body: {}", err)))
}

/// Fetch a wallet's deposit ledger. An absent account means the wallet never
/// registered and simply has zero voting power, so it is not an error.
pub async fn fetch_voter(
    client: &dyn LedgerClient,
    voter_address: &Pubkey,
) -> Result<Option<Voter>, SimulationError> {
    let account = match client.fetch_account(voter_address).await? {
        Some(account) => account,
        None => return Ok(None),
    };
    deserialize_voter(&account.data).map(Some)
}

/// Serialize a voter account the way the program stores it, discriminator
/// included. Test fixtures build accounts with this.
pub fn serialize_voter(voter: &Voter) -> Vec<u8> {
    let mut data = sighash("account", "Voter").to_vec();
    voter
        .serialize(&mut data)
        .expect("voter serialization cannot fail");
    data
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        solana_sdk::pubkey::Pubkey,
    };

    pub fn voter_with_used_deposits(used: usize) -> Voter {
        let mut deposits = [DepositEntry::default(); 32];
        for entry in deposits.iter_mut().take(used) {
            entry.is_used = true;
            entry.amount_deposited_native = 1_000;
        }
        Voter {
            voter_authority: Pubkey::new_unique(),
            registrar: Pubkey::new_unique(),
            deposits,
            voter_bump: 255,
            voter_weight_record_bump: 254,
            reserved: [0; 94],
        }
    }

    #[test]
    fn roundtrips_through_account_bytes() {
        let voter = voter_with_used_deposits(3);
        let decoded = deserialize_voter(&serialize_voter(&voter)).unwrap();
        assert_eq!(decoded.voter_authority, voter.voter_authority);
        assert_eq!(decoded.deposits[..], voter.deposits[..]);
        assert_eq!(decoded.used_deposits(), 3);
    }

    #[test]
    fn rejects_a_wrong_discriminator() {
        let mut data = serialize_voter(&voter_with_used_deposits(1));
        data[0] ^= 0xff;
        assert!(matches!(
            deserialize_voter(&data),
            Err(SimulationError::Decode(_))
        ));
    }

    #[test]
    fn rejects_truncated_accounts() {
        let data = serialize_voter(&voter_with_used_deposits(1));
        assert!(matches!(
            deserialize_voter(&data[..4]),
            Err(SimulationError::Decode(_))
        ));
        assert!(matches!(
            deserialize_voter(&data[..64]),
            Err(SimulationError::Decode(_))
        ));
    }
}
