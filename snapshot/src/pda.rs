//! Deterministic address derivation for voter-stake-registry accounts.

use solana_sdk::pubkey::Pubkey;

pub const REGISTRAR_SEED: &str = "registrar";
pub const VOTER_SEED: &str = "voter";

/// Per-realm registrar governing deposits of one community mint.
pub fn get_registrar_address(
    realm: &Pubkey,
    governance_token_mint: &Pubkey,
    vsr_program: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            realm.as_ref(),
            REGISTRAR_SEED.as_bytes(),
            governance_token_mint.as_ref(),
        ],
        vsr_program,
    )
}

/// Per-wallet voter account under a registrar.
pub fn get_voter_address(
    registrar: &Pubkey,
    wallet: &Pubkey,
    vsr_program: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[registrar.as_ref(), VOTER_SEED.as_bytes(), wallet.as_ref()],
        vsr_program,
    )
}
