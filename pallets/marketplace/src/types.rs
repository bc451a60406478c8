extern crate alloc;
use alloc::vec::Vec;
use codec::{Encode, Decode};
use scale_info::TypeInfo;

/// Listing identifiers are assigned sequentially starting at 1.
pub type ListingId = u64;

/// Review scores run from 0 to 5 inclusive.
pub const MAX_REVIEW_SCORE: u8 = 5;

/// Listing Status Enumeration
///
/// Listings are never removed from storage; `remove_listing` only flips
/// the status to `Delisted` so provenance stays queryable.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, TypeInfo)]
pub enum ListingStatus {
    Active = 1,
    Delisted = 2,
}

/// Digital Asset Listing Structure
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
pub struct Listing<AccountId, Balance, BlockNumber> {
    // Current seller (reassigned on resale)
    pub seller: AccountId,

    // Basic information
    pub title: Vec<u8>,
    pub description: Vec<u8>,

    // Price in the smallest currency unit
    pub price: Balance,

    // Category label used for trend aggregation
    pub category: Vec<u8>,

    // Opaque content references (no validation performed)
    pub preview_uri: Vec<u8>,
    pub full_asset_uri: Vec<u8>,

    // Creator royalty percentage, immutable after creation
    pub royalty_percent: u8,

    // Creation block
    pub created_at: BlockNumber,

    // Listing status
    pub status: ListingStatus,
}

/// Ownership History Entry
///
/// One entry per holder, keyed by (listing id, sequential index).
/// Index 0 is written at creation with a zero price.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
pub struct OwnershipEntry<AccountId, Balance, BlockNumber> {
    pub owner: AccountId,
    pub acquired_at: BlockNumber,
    pub price_paid: Balance,
}

/// Purchase Record
///
/// Evidence that a buyer paid for a listing. Write-once per
/// (listing, buyer) pair; only `reviewed` changes afterwards.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
pub struct PurchaseRecord<Balance, BlockNumber> {
    pub purchased_at: BlockNumber,
    pub price_paid: Balance,
    pub reviewed: bool,
}

/// Buyer Review
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
pub struct Review<BlockNumber> {
    pub score: u8,
    pub comment: Vec<u8>,
    pub submitted_at: BlockNumber,
}

impl<AccountId, Balance, BlockNumber> Listing<AccountId, Balance, BlockNumber> {
    /// Create a fresh active listing owned by its creator
    pub fn new(
        seller: AccountId,
        title: Vec<u8>,
        description: Vec<u8>,
        price: Balance,
        category: Vec<u8>,
        preview_uri: Vec<u8>,
        full_asset_uri: Vec<u8>,
        royalty_percent: u8,
        created_at: BlockNumber,
    ) -> Self {
        Self {
            seller,
            title,
            description,
            price,
            category,
            preview_uri,
            full_asset_uri,
            royalty_percent,
            created_at,
            status: ListingStatus::Active,
        }
    }

    /// Check if the listing can currently be purchased
    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }
}
