//! Byte-offset equality predicates over the spl-governance token owner
//! record layout.
//!
//! Layout prefix: 1 byte account type, three 32 byte keys (realm, governing
//! token mint, governing token owner), 8 byte deposit amount, two 4 byte
//! vote counters, two 1 byte flags, 6 reserved bytes, then the governance
//! delegate as a borsh `Option<Pubkey>` (1 byte presence tag + 32 byte key).

use {
    crate::error::ScanError,
    solana_client::rpc_filter::{
        Memcmp,
        MemcmpEncodedBytes,
        RpcFilterType,
    },
    solana_sdk::pubkey::Pubkey,
};

pub const REALM_OFFSET: usize = 1;
pub const GOVERNING_TOKEN_MINT_OFFSET: usize = REALM_OFFSET + 32;
pub const GOVERNING_TOKEN_OWNER_OFFSET: usize = GOVERNING_TOKEN_MINT_OFFSET + 32;
pub const DEPOSIT_AMOUNT_OFFSET: usize = GOVERNING_TOKEN_OWNER_OFFSET + 32;
pub const UNRELINQUISHED_VOTES_OFFSET: usize = DEPOSIT_AMOUNT_OFFSET + 8;
pub const TOTAL_VOTES_OFFSET: usize = UNRELINQUISHED_VOTES_OFFSET + 4;
pub const OUTSTANDING_PROPOSALS_OFFSET: usize = TOTAL_VOTES_OFFSET + 4;
pub const VERSION_OFFSET: usize = OUTSTANDING_PROPOSALS_OFFSET + 1;
pub const RESERVED_OFFSET: usize = VERSION_OFFSET + 1;
pub const HAS_DELEGATE_OFFSET: usize = RESERVED_OFFSET + 6;
pub const DELEGATE_OFFSET: usize = HAS_DELEGATE_OFFSET + 1;

/// The three predicates selecting token owner records of `realm` that are
/// delegated to `delegate`. A degenerate key is refused outright: scanning
/// without the full filter set would return the whole program index.
pub fn delegate_filters(
    realm: &Pubkey,
    delegate: &Pubkey,
) -> Result<Vec<RpcFilterType>, ScanError> {
    if *realm == Pubkey::default() {
        return Err(ScanError::Configuration(
            "realm key is the default pubkey".to_string(),
        ));
    }
    if *delegate == Pubkey::default() {
        return Err(ScanError::Configuration(
            "delegate key is the default pubkey".to_string(),
        ));
    }
    Ok(vec![
        RpcFilterType::Memcmp(Memcmp::new(
            REALM_OFFSET,
            MemcmpEncodedBytes::Bytes(realm.to_bytes().to_vec()),
        )),
        RpcFilterType::Memcmp(Memcmp::new(
            HAS_DELEGATE_OFFSET,
            MemcmpEncodedBytes::Bytes(vec![1]),
        )),
        RpcFilterType::Memcmp(Memcmp::new(
            DELEGATE_OFFSET,
            MemcmpEncodedBytes::Bytes(delegate.to_bytes().to_vec()),
        )),
    ])
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        solana_sdk::pubkey::Pubkey,
    };

    #[test]
    fn documented_offsets() {
        assert_eq!(GOVERNING_TOKEN_OWNER_OFFSET, 65);
        assert_eq!(HAS_DELEGATE_OFFSET, 121);
        assert_eq!(DELEGATE_OFFSET, 122);
    }

    #[test]
    fn exactly_three_predicates_at_the_documented_offsets() {
        let realm = Pubkey::new_unique();
        let delegate = Pubkey::new_unique();
        let filters = delegate_filters(&realm, &delegate).unwrap();
        assert_eq!(
            filters,
            vec![
                RpcFilterType::Memcmp(Memcmp::new(
                    REALM_OFFSET,
                    MemcmpEncodedBytes::Bytes(realm.to_bytes().to_vec()),
                )),
                RpcFilterType::Memcmp(Memcmp::new(
                    HAS_DELEGATE_OFFSET,
                    MemcmpEncodedBytes::Bytes(vec![1]),
                )),
                RpcFilterType::Memcmp(Memcmp::new(
                    DELEGATE_OFFSET,
                    MemcmpEncodedBytes::Bytes(delegate.to_bytes().to_vec()),
                )),
            ]
        );
    }

    #[test]
    fn changing_the_delegate_changes_only_the_third_predicate() {
        let realm = Pubkey::new_unique();
        let first = delegate_filters(&realm, &Pubkey::new_unique()).unwrap();
        let second = delegate_filters(&realm, &Pubkey::new_unique()).unwrap();
        assert_eq!(first[0], second[0]);
        assert_eq!(first[1], second[1]);
        assert_ne!(first[2], second[2]);
    }

    #[test]
    fn degenerate_keys_are_refused() {
        let key = Pubkey::new_unique();
        assert!(matches!(
            delegate_filters(&Pubkey::default(), &key),
            Err(ScanError::Configuration(_))
        ));
        assert!(matches!(
            delegate_filters(&key, &Pubkey::default()),
            Err(ScanError::Configuration(_))
        ));
    }
}
