//! Ledger access boundary.
//!
//! The pipeline consumes exactly four RPC capabilities; everything it knows
//! about the ledger goes through this trait so tests can substitute a canned
//! backend for the real endpoint.

use {
    crate::error::LedgerError,
    async_trait::async_trait,
    solana_account_decoder::UiAccountEncoding,
    solana_client::{
        client_error::ClientError,
        nonblocking::rpc_client::RpcClient,
        rpc_config::{
            RpcAccountInfoConfig,
            RpcProgramAccountsConfig,
            RpcSimulateTransactionConfig,
        },
        rpc_filter::RpcFilterType,
    },
    solana_sdk::{
        account::Account,
        commitment_config::CommitmentConfig,
        hash::Hash,
        pubkey::Pubkey,
        transaction::VersionedTransaction,
    },
};

#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash, LedgerError>;

    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, LedgerError>;

    async fn program_accounts(
        &self,
        program: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> Result<Vec<(Pubkey, Account)>, LedgerError>;

    /// Simulate a transaction without submitting it and return the log lines
    /// the execution emitted.
    async fn simulate(&self, transaction: &VersionedTransaction)
        -> Result<Vec<String>, LedgerError>;
}

/// Shared, lock-free handle to a real RPC endpoint.
pub struct SolanaRpc {
    rpc_client: RpcClient,
    commitment: CommitmentConfig,
}

impl SolanaRpc {
    pub fn new(rpc_url: String) -> Self {
        Self::new_with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    pub fn new_with_commitment(rpc_url: String, commitment: CommitmentConfig) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(rpc_url, commitment),
            commitment,
        }
    }
}

#[async_trait]
impl LedgerClient for SolanaRpc {
    async fn latest_blockhash(&self) -> Result<Hash, LedgerError> {
        self.rpc_client
            .get_latest_blockhash()
            .await
            .map_err(into_transport)
    }

    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, LedgerError> {
        Ok(self
            .rpc_client
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(into_transport)?
            .value)
    }

    async fn program_accounts(
        &self,
        program: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> Result<Vec<(Pubkey, Account)>, LedgerError> {
        self.rpc_client
            .get_program_accounts_with_config(
                program,
                RpcProgramAccountsConfig {
                    filters: Some(filters),
                    account_config: RpcAccountInfoConfig {
                        encoding: Some(UiAccountEncoding::Base64Zstd),
                        data_slice: None,
                        commitment: Some(self.commitment),
                        min_context_slot: None,
                    },
                    with_context: None,
                },
            )
            .await
            .map_err(into_transport)
    }

    async fn simulate(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<Vec<String>, LedgerError> {
        let response = self
            .rpc_client
            .simulate_transaction_with_config(
                transaction,
                RpcSimulateTransactionConfig {
                    commitment: Some(self.commitment),
                    ..Default::default()
                },
            )
            .await
            .map_err(into_transport)?;
        Ok(response.value.logs.unwrap_or_default())
    }
}

fn into_transport(err: ClientError) -> LedgerError {
    LedgerError::Transport(err.to_string())
}
