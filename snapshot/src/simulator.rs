//! Voting power computation through simulated `log_voter_info` calls.
//!
//! Voting power is not stored in any account field; the program computes it
//! on the fly and logs it as a `VoterInfo` event. Reading it without ever
//! committing a transaction means simulating the instruction and decoding
//! the log output.

use {
    crate::{
        client::LedgerClient,
        config::{
            RealmConfig,
            SnapshotConfig,
        },
        error::SimulationError,
        pda,
        vsr::{
            events::{
                parse_event_logs,
                VsrEvent,
            },
            instructions,
            state,
        },
    },
    solana_sdk::{
        compute_budget::ComputeBudgetInstruction,
        pubkey::Pubkey,
    },
    tracing::debug,
};

/// Deposit slots covered by one simulated call. Per-call compute cost scales
/// with the number of deposits processed, so the window is capped.
pub const MAX_DEPOSITS_PER_BATCH: u8 = 8;

/// A contiguous range of deposit entry indexes, at most
/// [`MAX_DEPOSITS_PER_BATCH`] wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositBatch {
    pub deposit_entry_begin: u32,
    pub deposit_entry_count: u8,
}

/// Partition `[0, used_deposits)` into contiguous batches.
pub fn deposit_batches(used_deposits: usize) -> Vec<DepositBatch> {
    let max = MAX_DEPOSITS_PER_BATCH as usize;
    (0..used_deposits)
        .step_by(max)
        .map(|begin| DepositBatch {
            deposit_entry_begin: begin as u32,
            deposit_entry_count: usize::min(max, used_deposits - begin) as u8,
        })
        .collect()
}

/// Scale a raw voting power magnitude into token units.
pub fn scale_voting_power(raw: u64, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

/// Compute one wallet's voting power in `realm`, in token units.
///
/// Failures surface as `Err` so the caller can decide between reporting zero
/// and propagating; a wallet without a voter account or without a decoded
/// `VoterInfo` event is genuinely zero, not a failure.
pub async fn compute_voting_power(
    client: &dyn LedgerClient,
    config: &SnapshotConfig,
    realm: &RealmConfig,
    wallet: &Pubkey,
) -> Result<f64, SimulationError> {
    let (registrar, _) = pda::get_registrar_address(
        &realm.realm,
        &realm.governance_token_mint,
        &config.vsr_program,
    );
    let (voter_address, _) = pda::get_voter_address(&registrar, wallet, &config.vsr_program);

    let voter = match state::fetch_voter(client, &voter_address).await? {
        Some(voter) => voter,
        None => return Ok(0.0),
    };
    let used_deposits = voter.used_deposits();
    if used_deposits == 0 {
        return Ok(0.0);
    }

    let recent_blockhash = client.latest_blockhash().await?;
    let mut events = Vec::new();
    // Batches run strictly sequentially to bound load on the endpoint.
    for batch in deposit_batches(used_deposits) {
        let batch_instructions = [
            ComputeBudgetInstruction::set_compute_unit_limit(
                instructions::SIMULATION_COMPUTE_UNITS,
            ),
            instructions::log_voter_info(
                &config.vsr_program,
                &registrar,
                &voter_address,
                batch.deposit_entry_begin,
                batch.deposit_entry_count,
            )?,
        ];
        let transaction = instructions::simulation_transaction(
            &config.simulation_wallet,
            &batch_instructions,
            recent_blockhash,
        )?;
        let logs = client.simulate(&transaction).await?;
        events.extend(parse_event_logs(&logs));
    }

    let raw = events.iter().find_map(|event| match event {
        VsrEvent::VoterInfo(info) => Some(info.voting_power),
        _ => None,
    });
    match raw {
        Some(raw) => Ok(scale_voting_power(raw, realm.governance_token_decimals)),
        None => {
            debug!(wallet = %wallet, "no VoterInfo event decoded, voting power is zero");
            Ok(0.0)
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn no_deposits_means_no_batches() {
        assert!(deposit_batches(0).is_empty());
    }

    #[test]
    fn small_ledgers_fit_one_batch() {
        assert_eq!(
            deposit_batches(3),
            vec![DepositBatch {
                deposit_entry_begin: 0,
                deposit_entry_count: 3,
            }]
        );
        assert_eq!(
            deposit_batches(8),
            vec![DepositBatch {
                deposit_entry_begin: 0,
                deposit_entry_count: 8,
            }]
        );
    }

    #[test]
    fn larger_ledgers_split_on_the_batch_ceiling() {
        assert_eq!(
            deposit_batches(10),
            vec![
                DepositBatch {
                    deposit_entry_begin: 0,
                    deposit_entry_count: 8,
                },
                DepositBatch {
                    deposit_entry_begin: 8,
                    deposit_entry_count: 2,
                },
            ]
        );
    }

    #[test]
    fn batches_cover_the_range_without_gaps_or_overlaps() {
        for used in 0..40 {
            let batches = deposit_batches(used);
            assert_eq!(batches.len(), (used + 7) / 8);
            let mut next = 0u32;
            for batch in &batches {
                assert_eq!(batch.deposit_entry_begin, next);
                assert!(batch.deposit_entry_count > 0);
                assert!(batch.deposit_entry_count <= MAX_DEPOSITS_PER_BATCH);
                next += batch.deposit_entry_count as u32;
            }
            assert_eq!(next as usize, used);
        }
    }

    #[test]
    fn scaling_is_exact_for_token_amounts() {
        assert_eq!(scale_voting_power(5_000_000_000, 9), 5.0);
        assert_eq!(scale_voting_power(2_000_000_000, 9), 2.0);
        assert_eq!(scale_voting_power(1_500_000, 6), 1.5);
        assert_eq!(scale_voting_power(0, 9), 0.0);
        assert_eq!(scale_voting_power(42, 0), 42.0);
    }
}
