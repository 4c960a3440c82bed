//! Static snapshot configuration.
//!
//! Every address the pipeline needs is threaded through these types
//! explicitly; nothing reads global state.

use {
    crate::error::ConfigError,
    anchor_lang::pubkey,
    serde::Deserialize,
    solana_sdk::pubkey::Pubkey,
    std::str::FromStr,
};

pub const MAINNET_GOVERNANCE_PROGRAM_ID: Pubkey =
    pubkey!("GovER5Lthms3bLBqWub97yVrMmEogzX7xNjdXpPPCVZw");
pub const MAINNET_VOTER_STAKE_REGISTRY_ID: Pubkey =
    pubkey!("vsr2nfGVNHmSY8uxoBGqq8AQbwz3JwaEaHqGbsTPXqQ");
pub const VOTA_DELEGATE_ADDRESS: Pubkey = pubkey!("AMd2nnFYtPGkeEbUvyVtWRDkG3nrESCvNW4C43mEvWrF");

/// Funding identity for simulated transactions. The transactions are never
/// submitted, so this wallet needs neither funds nor a signature.
pub const SIMULATION_WALLET: Pubkey = pubkey!("ENmcpFCpxN1CqyUjuog9yyUVfdXBKF3LVCwLr7grJZpk");

pub const DEFAULT_MAX_CONCURRENT_DELEGATORS: usize = 8;

/// One governance community whose delegations are snapshotted.
#[derive(Debug, Clone, PartialEq)]
pub struct RealmConfig {
    pub slug: String,
    pub name: String,
    pub governance_program: Pubkey,
    pub governance_token_mint: Pubkey,
    pub governance_token_decimals: u8,
    pub realm: Pubkey,
}

/// What to do when a single delegator's voting power computation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the delegator with a voting power of zero.
    ZeroOnFailure,
    /// Fail the whole realm.
    Propagate,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::ZeroOnFailure
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// The delegate wallet whose delegators are counted.
    pub delegate: Pubkey,
    /// The voter-stake-registry deployment computing voting power.
    pub vsr_program: Pubkey,
    pub simulation_wallet: Pubkey,
    pub max_concurrent_delegators: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            delegate: VOTA_DELEGATE_ADDRESS,
            vsr_program: MAINNET_VOTER_STAKE_REGISTRY_ID,
            simulation_wallet: SIMULATION_WALLET,
            max_concurrent_delegators: DEFAULT_MAX_CONCURRENT_DELEGATORS,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// One realm entry as written in a configuration file, keys in base58.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRealmConfig {
    pub slug: String,
    pub name: String,
    pub governance_program: String,
    pub governance_token_mint: String,
    pub governance_token_decimals: u8,
    pub realm: String,
}

impl RawRealmConfig {
    pub fn validate(&self) -> Result<RealmConfig, ConfigError> {
        Ok(RealmConfig {
            slug: self.slug.clone(),
            name: self.name.clone(),
            governance_program: parse_pubkey("governance_program", &self.governance_program)?,
            governance_token_mint: parse_pubkey(
                "governance_token_mint",
                &self.governance_token_mint,
            )?,
            governance_token_decimals: self.governance_token_decimals,
            realm: parse_pubkey("realm", &self.realm)?,
        })
    }
}

fn parse_pubkey(field: &'static str, value: &str) -> Result<Pubkey, ConfigError> {
    Pubkey::from_str(value).map_err(|_| ConfigError::InvalidPubkey {
        field,
        value: value.to_string(),
    })
}

/// Parse and validate a realm list from its JSON representation.
pub fn load_realms_from_json(json: &str) -> Result<Vec<RealmConfig>, ConfigError> {
    let raw: Vec<RawRealmConfig> =
        serde_json::from_str(json).map_err(|err| ConfigError::Unreadable(err.to_string()))?;
    raw.iter().map(RawRealmConfig::validate).collect()
}

/// The realms snapshotted when no configuration file is given.
pub fn default_realms() -> Vec<RealmConfig> {
    vec![RealmConfig {
        slug: "solblaze".to_string(),
        name: "SolBlaze".to_string(),
        governance_program: MAINNET_GOVERNANCE_PROGRAM_ID,
        governance_token_mint: pubkey!("BLZEEuZUBVqFhj8adcCFPJvPVCiCyVmh3hkJMrU8KuJA"),
        governance_token_decimals: 9,
        realm: pubkey!("7vrFDrK9GRNX7YZXbo7N3kvta7Pbn6W1hCXQ6C7WBxG9"),
    }]
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        crate::error::ConfigError,
    };

    #[test]
    fn validate_rejects_malformed_keys() {
        let raw = RawRealmConfig {
            slug: "example".to_string(),
            name: "Example".to_string(),
            governance_program: MAINNET_GOVERNANCE_PROGRAM_ID.to_string(),
            governance_token_mint: "not a pubkey".to_string(),
            governance_token_decimals: 6,
            realm: MAINNET_GOVERNANCE_PROGRAM_ID.to_string(),
        };
        match raw.validate() {
            Err(ConfigError::InvalidPubkey { field, .. }) => {
                assert_eq!(field, "governance_token_mint")
            }
            other => panic!("expected InvalidPubkey, got {:?}", other),
        }
    }

    #[test]
    fn load_realms_roundtrip() {
        let json = r#"[{
            "slug": "solblaze",
            "name": "SolBlaze",
            "governance_program": "GovER5Lthms3bLBqWub97yVrMmEogzX7xNjdXpPPCVZw",
            "governance_token_mint": "BLZEEuZUBVqFhj8adcCFPJvPVCiCyVmh3hkJMrU8KuJA",
            "governance_token_decimals": 9,
            "realm": "7vrFDrK9GRNX7YZXbo7N3kvta7Pbn6W1hCXQ6C7WBxG9"
        }]"#;
        let realms = load_realms_from_json(json).unwrap();
        assert_eq!(realms, default_realms());
    }

    #[test]
    fn load_realms_rejects_garbage() {
        assert!(matches!(
            load_realms_from_json("not json"),
            Err(ConfigError::Unreadable(_))
        ));
    }
}
