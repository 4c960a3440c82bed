//! Delegation scan over the governance program's account index.

use {
    crate::{
        client::LedgerClient,
        config::{
            RealmConfig,
            SnapshotConfig,
        },
        error::ScanError,
        filters,
        records::{
            self,
            GovernanceAccountRecord,
        },
    },
    tracing::warn,
};

/// All token owner records in `realm` delegated to the configured delegate,
/// in whatever order the index returns them. No pagination, no retry; a
/// transport failure aborts this realm only.
pub async fn scan_delegators(
    client: &dyn LedgerClient,
    config: &SnapshotConfig,
    realm: &RealmConfig,
) -> Result<Vec<GovernanceAccountRecord>, ScanError> {
    let filters = filters::delegate_filters(&realm.realm, &config.delegate)?;
    let accounts = client
        .program_accounts(&realm.governance_program, filters)
        .await?;
    let mut delegators = Vec::with_capacity(accounts.len());
    for (address, account) in accounts {
        match records::parse_token_owner_record(address, &account.data) {
            Some(record) => delegators.push(record),
            None => warn!(
                realm = realm.slug.as_str(),
                account = %address,
                "skipping unparseable token owner record"
            ),
        }
    }
    Ok(delegators)
}
