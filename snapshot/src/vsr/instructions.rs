//! Instruction and transaction assembly for simulated voting power reads.

use {
    crate::{
        error::SimulationError,
        vsr::sighash,
    },
    anchor_lang::{
        prelude::borsh,
        AnchorSerialize,
    },
    solana_sdk::{
        hash::Hash,
        instruction::{
            AccountMeta,
            Instruction,
        },
        message::{
            v0,
            VersionedMessage,
        },
        pubkey::Pubkey,
        signature::Signature,
        transaction::VersionedTransaction,
    },
};

/// Compute unit allowance for one simulated batch, high enough that wallets
/// with many deposits do not truncate the event log.
pub const SIMULATION_COMPUTE_UNITS: u32 = 1_000_000;

#[derive(AnchorSerialize)]
struct LogVoterInfoArgs {
    deposit_entry_begin: u32,
    deposit_entry_count: u8,
}

/// The diagnostic instruction that logs a voter's deposit and voting power
/// information for a window of deposit entries. Read-only on both accounts.
pub fn log_voter_info(
    vsr_program: &Pubkey,
    registrar: &Pubkey,
    voter: &Pubkey,
    deposit_entry_begin: u32,
    deposit_entry_count: u8,
) -> Result<Instruction, SimulationError> {
    let mut data = sighash("global", "log_voter_info").to_vec();
    LogVoterInfoArgs {
        deposit_entry_begin,
        deposit_entry_count,
    }
    .serialize(&mut data)
    .map_err(|err| SimulationError::Message(format!("log_voter_info args: {}", err)))?;
    Ok(Instruction {
        program_id: *vsr_program,
        accounts: vec![
            AccountMeta::new_readonly(*registrar, false),
            AccountMeta::new_readonly(*voter, false),
        ],
        data,
    })
}

/// Compile instructions into a v0 transaction funded by the simulation
/// wallet. The transaction is only ever simulated, so a default signature
/// stands in for the payer's.
pub fn simulation_transaction(
    payer: &Pubkey,
    instructions: &[Instruction],
    recent_blockhash: Hash,
) -> Result<VersionedTransaction, SimulationError> {
    let message = v0::Message::try_compile(payer, instructions, &[], recent_blockhash)
        .map_err(|err| SimulationError::Message(err.to_string()))?;
    Ok(VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::V0(message),
    })
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        solana_sdk::pubkey::Pubkey,
    };

    #[test]
    fn instruction_data_carries_the_sighash_and_args() {
        let instruction = log_voter_info(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            16,
            8,
        )
        .unwrap();
        assert_eq!(&instruction.data[..8], &sighash("global", "log_voter_info"));
        assert_eq!(&instruction.data[8..12], &16u32.to_le_bytes());
        assert_eq!(instruction.data[12], 8);
        assert_eq!(instruction.data.len(), 13);
    }

    #[test]
    fn accounts_are_read_only_non_signers() {
        let registrar = Pubkey::new_unique();
        let voter = Pubkey::new_unique();
        let instruction =
            log_voter_info(&Pubkey::new_unique(), &registrar, &voter, 0, 8).unwrap();
        assert_eq!(instruction.accounts.len(), 2);
        assert_eq!(instruction.accounts[0].pubkey, registrar);
        assert_eq!(instruction.accounts[1].pubkey, voter);
        for meta in &instruction.accounts {
            assert!(!meta.is_writable);
            assert!(!meta.is_signer);
        }
    }

    #[test]
    fn transaction_is_funded_by_the_payer_with_a_placeholder_signature() {
        let payer = Pubkey::new_unique();
        let instruction = log_voter_info(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            0,
            8,
        )
        .unwrap();
        let transaction =
            simulation_transaction(&payer, &[instruction], Hash::default()).unwrap();
        assert_eq!(transaction.message.static_account_keys()[0], payer);
        assert_eq!(transaction.signatures, vec![Signature::default()]);
    }
}
