//! Read-only snapshots of spl-governance token owner records.

use {
    crate::filters,
    solana_sdk::pubkey::Pubkey,
    spl_governance::state::enums::GovernanceAccountType,
    std::convert::{
        TryFrom,
        TryInto,
    },
};

pub const TOKEN_OWNER_RECORD_V1: u8 = GovernanceAccountType::TokenOwnerRecordV1 as u8;
pub const TOKEN_OWNER_RECORD_V2: u8 = GovernanceAccountType::TokenOwnerRecordV2 as u8;

/// One token owner record as returned by the delegation scan.
#[derive(Debug, Clone, PartialEq)]
pub struct GovernanceAccountRecord {
    pub address: Pubkey,
    pub realm: Pubkey,
    pub governing_token_owner: Pubkey,
    pub governance_delegate: Option<Pubkey>,
    pub governing_token_deposit_amount: u64,
    pub unrelinquished_votes_count: u32,
    pub total_votes_count: u32,
    pub outstanding_proposal_count: u8,
}

/// Parse a record at the fixed layout offsets shared with the scan filters.
/// The V1 and V2 record layouts share this prefix, so both parse here.
/// Returns `None` for accounts that are not token owner records or are too
/// short for the documented layout.
pub fn parse_token_owner_record(address: Pubkey, data: &[u8]) -> Option<GovernanceAccountRecord> {
    if data.len() < filters::DELEGATE_OFFSET {
        return None;
    }
    if !is_token_owner_record(data[0]) {
        return None;
    }
    let governance_delegate = match data[filters::HAS_DELEGATE_OFFSET] {
        0 => None,
        1 => Some(read_pubkey(data, filters::DELEGATE_OFFSET)?),
        _ => return None,
    };
    Some(GovernanceAccountRecord {
        address,
        realm: read_pubkey(data, filters::REALM_OFFSET)?,
        governing_token_owner: read_pubkey(data, filters::GOVERNING_TOKEN_OWNER_OFFSET)?,
        governance_delegate,
        governing_token_deposit_amount: read_u64(data, filters::DEPOSIT_AMOUNT_OFFSET)?,
        unrelinquished_votes_count: read_u32(data, filters::UNRELINQUISHED_VOTES_OFFSET)?,
        total_votes_count: read_u32(data, filters::TOTAL_VOTES_OFFSET)?,
        outstanding_proposal_count: *data.get(filters::OUTSTANDING_PROPOSALS_OFFSET)?,
    })
}

fn is_token_owner_record(account_type: u8) -> bool {
    account_type == TOKEN_OWNER_RECORD_V1 || account_type == TOKEN_OWNER_RECORD_V2
}

fn read_pubkey(data: &[u8], offset: usize) -> Option<Pubkey> {
    data.get(offset..offset + 32)
        .and_then(|bytes| Pubkey::try_from(bytes).ok())
}

fn read_u64(data: &[u8], offset: usize) -> Option<u64> {
    data.get(offset..offset + 8)
        .map(|bytes| u64::from_le_bytes(bytes.try_into().unwrap()))
}

fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    data.get(offset..offset + 4)
        .map(|bytes| u32::from_le_bytes(bytes.try_into().unwrap()))
}
