use {
    solana_sdk::pubkey::Pubkey,
    thiserror::Error,
};

/// Transport-level failure of the ledger connection.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("rpc transport failure: {0}")]
    Transport(String),
}

/// A realm or key that cannot be turned into usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pubkey in field {field}: {value}")]
    InvalidPubkey {
        field: &'static str,
        value: String,
    },
    #[error("unreadable realm configuration: {0}")]
    Unreadable(String),
}

/// Failure while scanning a realm's token owner records. Aborts that realm
/// only; a configuration problem must never widen into an unfiltered scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("refusing delegation scan: {0}")]
    Configuration(String),
    #[error("token owner record scan failed: {0}")]
    Retrieval(#[from] LedgerError),
}

/// Failure while computing one wallet's voting power.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("rpc failure during simulation: {0}")]
    Rpc(#[from] LedgerError),
    #[error("could not assemble simulation transaction: {0}")]
    Message(String),
    #[error("could not decode {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum RealmError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("voting power computation for {wallet} failed: {source}")]
    VotingPower {
        wallet: Pubkey,
        source: SimulationError,
    },
}

/// Marker for a realm that produced no summary in a snapshot run.
#[derive(Debug, Error)]
#[error("realm {slug}: {source}")]
pub struct RealmFailure {
    pub slug: String,
    #[source]
    pub source: RealmError,
}
