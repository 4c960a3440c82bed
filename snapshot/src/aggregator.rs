//! Per-realm aggregation of delegated voting power.

use {
    crate::{
        client::LedgerClient,
        config::{
            FailurePolicy,
            RealmConfig,
            SnapshotConfig,
        },
        error::{
            RealmError,
            RealmFailure,
        },
        scanner,
        simulator,
    },
    futures::{
        future,
        stream,
        StreamExt,
    },
    serde::Serialize,
    std::collections::BTreeMap,
    tracing::{
        info,
        warn,
    },
};

/// One delegator's share of a realm summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DelegatorVotingPower {
    pub pubkey: String,
    pub voting_power: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RealmSummary {
    pub realm: String,
    pub delegators: Vec<DelegatorVotingPower>,
    pub total_voting_power: f64,
}

/// Result of one snapshot run: the slug-keyed summary mapping handed to the
/// persistence collaborator, plus markers for realms that produced none.
#[derive(Debug)]
pub struct SnapshotOutcome {
    pub summaries: BTreeMap<String, RealmSummary>,
    pub failures: Vec<RealmFailure>,
}

/// Snapshot every realm. Realms run concurrently and independently; one
/// realm's failure never blocks the others.
pub async fn run_snapshot(
    client: &dyn LedgerClient,
    config: &SnapshotConfig,
    realms: &[RealmConfig],
) -> SnapshotOutcome {
    let results = future::join_all(
        realms
            .iter()
            .map(|realm| realm_summary(client, config, realm)),
    )
    .await;

    let mut summaries = BTreeMap::new();
    let mut failures = Vec::new();
    for (realm, result) in realms.iter().zip(results) {
        match result {
            Ok(summary) => {
                info!(
                    realm = realm.slug.as_str(),
                    delegators = summary.delegators.len(),
                    total = summary.total_voting_power,
                    "realm summary complete"
                );
                summaries.insert(realm.slug.clone(), summary);
            }
            Err(source) => {
                let failure = RealmFailure {
                    slug: realm.slug.clone(),
                    source,
                };
                warn!("{}", failure);
                failures.push(failure);
            }
        }
    }
    SnapshotOutcome {
        summaries,
        failures,
    }
}

async fn realm_summary(
    client: &dyn LedgerClient,
    config: &SnapshotConfig,
    realm: &RealmConfig,
) -> Result<RealmSummary, RealmError> {
    let records = scanner::scan_delegators(client, config, realm).await?;

    let concurrency = config.max_concurrent_delegators.max(1);
    let results: Vec<Result<DelegatorVotingPower, RealmError>> = stream::iter(records)
        .map(|record| async move {
            let wallet = record.governing_token_owner;
            match simulator::compute_voting_power(client, config, realm, &wallet).await {
                Ok(voting_power) => Ok(DelegatorVotingPower {
                    pubkey: wallet.to_string(),
                    voting_power,
                }),
                Err(source) => match config.failure_policy {
                    FailurePolicy::ZeroOnFailure => {
                        warn!(
                            realm = realm.slug.as_str(),
                            wallet = %wallet,
                            error = %source,
                            "voting power computation failed, reporting zero"
                        );
                        Ok(DelegatorVotingPower {
                            pubkey: wallet.to_string(),
                            voting_power: 0.0,
                        })
                    }
                    FailurePolicy::Propagate => Err(RealmError::VotingPower { wallet, source }),
                },
            }
        })
        .buffered(concurrency)
        .collect()
        .await;

    let delegators = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let total_voting_power = delegators.iter().map(|d| d.voting_power).sum();
    Ok(RealmSummary {
        realm: realm.slug.clone(),
        delegators,
        total_voting_power,
    })
}
