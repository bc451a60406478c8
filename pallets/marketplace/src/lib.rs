//! # Marketplace Pallet
//!
//! A ledger for digital asset listings with atomic payment distribution.
//!
//! ## Overview
//!
//! The pallet owns five mutually consistent sub-stores:
//! - Listings: the sellable catalog, soft-deleted only
//! - Ownership history: append-only provenance per listing
//! - Purchases: one record per (listing, buyer) pair
//! - Reviews: one record per (listing, reviewer) pair, gated by purchase
//! - Category trends: purchase counters per (category, period)
//!
//! Every purchase pays a fixed platform fee cut to the platform account and
//! the remainder to the current seller. Both transfer legs must succeed
//! before any bookkeeping is written; a failed leg aborts the whole call.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
use alloc::vec::Vec;

pub use pallet::*;
pub mod types;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use frame_support::{
        traits::{Currency, ExistenceRequirement},
        transactional,
    };
    use sp_runtime::{
        traits::{SaturatedConversion, Saturating, Zero},
        Percent,
    };

    use crate::types::*;

    /// Currency type alias
    pub type BalanceOf<T> =
        <<T as Config>::Currency as Currency<<T as frame_system::Config>::AccountId>>::Balance;

    // Trend period length in blocks (18s/block, roughly one month).
    // Only monotonicity of the bucketing matters, not the exact boundary.
    const PERIOD_BLOCKS: u32 = 144_000;

    #[pallet::pallet]
    #[pallet::without_storage_info]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Currency used for purchase payments
        type Currency: Currency<Self::AccountId>;

        /// Account receiving the platform fee cut of every purchase
        #[pallet::constant]
        type PlatformAccount: Get<Self::AccountId>;

        /// Platform fee as a percentage of the purchase price
        #[pallet::constant]
        type PlatformFeePercent: Get<Percent>;

        /// Upper bound on the creator royalty percentage
        #[pallet::constant]
        type MaxRoyaltyPercent: Get<u8>;

        #[pallet::constant]
        type MaxTitleLength: Get<u32>;

        #[pallet::constant]
        type MaxDescriptionLength: Get<u32>;

        #[pallet::constant]
        type MaxCategoryLength: Get<u32>;

        #[pallet::constant]
        type MaxUriLength: Get<u32>;

        #[pallet::constant]
        type MaxCommentLength: Get<u32>;
    }

    // -------------------------- Storage --------------------------

    /// Catalog of listings, keyed by sequential id
    #[pallet::storage]
    #[pallet::getter(fn listing)]
    pub type Listings<T: Config> = StorageMap<
        _,
        Blake2_128Concat,
        ListingId,
        Listing<T::AccountId, BalanceOf<T>, BlockNumberFor<T>>,
    >;

    /// Highest assigned listing id
    #[pallet::storage]
    #[pallet::getter(fn listing_count)]
    pub type ListingCount<T: Config> = StorageValue<_, ListingId, ValueQuery>;

    /// Append-only provenance, keyed by (listing id, owner index)
    #[pallet::storage]
    #[pallet::getter(fn ownership_history)]
    pub type OwnershipHistory<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, ListingId,
        Blake2_128Concat, u32,
        OwnershipEntry<T::AccountId, BalanceOf<T>, BlockNumberFor<T>>,
    >;

    /// Last written ownership index per listing, starts at 0 (creation entry)
    #[pallet::storage]
    #[pallet::getter(fn owner_index)]
    pub type OwnerIndex<T: Config> =
        StorageMap<_, Blake2_128Concat, ListingId, u32, ValueQuery>;

    /// Purchase records, keyed by (listing id, buyer)
    #[pallet::storage]
    #[pallet::getter(fn purchase)]
    pub type Purchases<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, ListingId,
        Blake2_128Concat, T::AccountId,
        PurchaseRecord<BalanceOf<T>, BlockNumberFor<T>>,
    >;

    /// Buyer reviews, keyed by (listing id, reviewer)
    #[pallet::storage]
    #[pallet::getter(fn review)]
    pub type Reviews<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, ListingId,
        Blake2_128Concat, T::AccountId,
        Review<BlockNumberFor<T>>,
    >;

    /// Purchase counters keyed by (category, period), monotonic, never reset
    #[pallet::storage]
    #[pallet::getter(fn category_trend)]
    pub type CategoryTrends<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, Vec<u8>,
        Blake2_128Concat, u32,
        u64,
        ValueQuery,
    >;

    // -------------------------- Events --------------------------

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        ListingCreated { listing_id: ListingId, seller: T::AccountId, price: BalanceOf<T>, category: Vec<u8> },
        ListingUpdated { listing_id: ListingId, seller: T::AccountId },
        ListingDelisted { listing_id: ListingId },
        AssetPurchased {
            listing_id: ListingId,
            buyer: T::AccountId,
            seller: T::AccountId,
            price: BalanceOf<T>,
            platform_fee: BalanceOf<T>,
        },
        AssetRelisted { listing_id: ListingId, seller: T::AccountId, price: BalanceOf<T> },
        ReviewSubmitted { listing_id: ListingId, reviewer: T::AccountId, score: u8 },
    }

    // -------------------------- Errors --------------------------

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is not allowed to perform this operation
        NotAuthorized,
        /// No listing with the given id
        ListingNotFound,
        /// Listing is delisted and cannot be purchased
        ListingExpired,
        /// Caller already holds a purchase record for this listing
        AlreadyPurchased,
        /// Price must be greater than zero
        InvalidPrice,
        /// Royalty percentage exceeds the allowed maximum
        InvalidRoyalty,
        /// Review score exceeds the allowed maximum
        InvalidReview,
        /// Caller has no purchase record for this listing
        NotPurchased,
        /// Caller already reviewed this purchase
        AlreadyReviewed,
        /// Platform fee transfer leg failed (e.g. insufficient funds)
        PlatformFeeTransferFailed,
        /// Seller payment transfer leg failed (e.g. insufficient funds)
        SellerPaymentFailed,
        TitleTooLong,
        DescriptionTooLong,
        CategoryTooLong,
        UriTooLong,
        CommentTooLong,
    }

    // -------------------------- Calls --------------------------

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Create a new listing owned by the caller.
        ///
        /// Writes ownership history entry 0 (owner = creator, price 0) and
        /// returns the sequential id through the `ListingCreated` event.
        #[pallet::call_index(0)]
        #[pallet::weight(10_000)]
        pub fn create_listing(
            origin: OriginFor<T>,
            title: Vec<u8>,
            description: Vec<u8>,
            price: BalanceOf<T>,
            category: Vec<u8>,
            preview_uri: Vec<u8>,
            full_asset_uri: Vec<u8>,
            royalty_percent: u8,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            ensure!(!price.is_zero(), Error::<T>::InvalidPrice);
            ensure!(
                royalty_percent <= T::MaxRoyaltyPercent::get(),
                Error::<T>::InvalidRoyalty
            );
            Self::ensure_listing_bounds(&title, &description, &category, &preview_uri, &full_asset_uri)?;

            let now = Self::current_block();
            let listing_id = ListingCount::<T>::get().saturating_add(1);

            let listing = Listing::new(
                who.clone(),
                title,
                description,
                price,
                category.clone(),
                preview_uri,
                full_asset_uri,
                royalty_percent,
                now,
            );

            Listings::<T>::insert(listing_id, listing);
            ListingCount::<T>::put(listing_id);
            OwnerIndex::<T>::insert(listing_id, 0u32);
            OwnershipHistory::<T>::insert(
                listing_id,
                0u32,
                OwnershipEntry {
                    owner: who.clone(),
                    acquired_at: now,
                    price_paid: BalanceOf::<T>::zero(),
                },
            );

            Self::deposit_event(Event::ListingCreated { listing_id, seller: who, price, category });
            Ok(())
        }

        /// Overwrite the mutable fields of a listing, seller only.
        ///
        /// The royalty percentage is immutable after creation.
        #[pallet::call_index(1)]
        #[pallet::weight(10_000)]
        pub fn update_listing(
            origin: OriginFor<T>,
            listing_id: ListingId,
            title: Vec<u8>,
            description: Vec<u8>,
            price: BalanceOf<T>,
            category: Vec<u8>,
            preview_uri: Vec<u8>,
            full_asset_uri: Vec<u8>,
            is_active: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let mut listing = Listings::<T>::get(listing_id).ok_or(Error::<T>::ListingNotFound)?;
            ensure!(listing.seller == who, Error::<T>::NotAuthorized);
            ensure!(!price.is_zero(), Error::<T>::InvalidPrice);
            Self::ensure_listing_bounds(&title, &description, &category, &preview_uri, &full_asset_uri)?;

            listing.title = title;
            listing.description = description;
            listing.price = price;
            listing.category = category;
            listing.preview_uri = preview_uri;
            listing.full_asset_uri = full_asset_uri;
            listing.status = if is_active { ListingStatus::Active } else { ListingStatus::Delisted };

            Listings::<T>::insert(listing_id, listing);

            Self::deposit_event(Event::ListingUpdated { listing_id, seller: who });
            Ok(())
        }

        /// Soft-delete a listing, seller only.
        ///
        /// History and purchase records persist; only the status flips.
        #[pallet::call_index(2)]
        #[pallet::weight(10_000)]
        pub fn remove_listing(origin: OriginFor<T>, listing_id: ListingId) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let mut listing = Listings::<T>::get(listing_id).ok_or(Error::<T>::ListingNotFound)?;
            ensure!(listing.seller == who, Error::<T>::NotAuthorized);

            listing.status = ListingStatus::Delisted;
            Listings::<T>::insert(listing_id, listing);

            Self::deposit_event(Event::ListingDelisted { listing_id });
            Ok(())
        }

        /// Purchase an active listing.
        ///
        /// Pays the platform fee leg and the seller leg from the buyer, then
        /// records the purchase, appends ownership history and bumps the
        /// category trend counter. Aborts fully if either leg fails.
        #[pallet::call_index(3)]
        #[pallet::weight(10_000)]
        pub fn purchase_asset(origin: OriginFor<T>, listing_id: ListingId) -> DispatchResult {
            let buyer = ensure_signed(origin)?;
            Self::do_purchase(&buyer, listing_id)
        }

        /// Relist a previously purchased asset at a new price.
        ///
        /// Any holder of a purchase record may relist, not only the most
        /// recent owner of record. Ownership history is appended only at
        /// actual purchase time, not on relisting.
        #[pallet::call_index(4)]
        #[pallet::weight(10_000)]
        pub fn resell_asset(
            origin: OriginFor<T>,
            listing_id: ListingId,
            new_price: BalanceOf<T>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let mut listing = Listings::<T>::get(listing_id).ok_or(Error::<T>::ListingNotFound)?;
            ensure!(
                Purchases::<T>::contains_key(listing_id, &who),
                Error::<T>::NotPurchased
            );
            ensure!(!new_price.is_zero(), Error::<T>::InvalidPrice);

            listing.seller = who.clone();
            listing.price = new_price;
            listing.status = ListingStatus::Active;
            Listings::<T>::insert(listing_id, listing);

            Self::deposit_event(Event::AssetRelisted { listing_id, seller: who, price: new_price });
            Ok(())
        }

        /// Submit a review for a purchased listing.
        ///
        /// One review per (listing, reviewer), gated on an unreviewed
        /// purchase record whose flag is flipped here.
        #[pallet::call_index(5)]
        #[pallet::weight(10_000)]
        pub fn submit_review(
            origin: OriginFor<T>,
            listing_id: ListingId,
            score: u8,
            comment: Vec<u8>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            ensure!(Listings::<T>::contains_key(listing_id), Error::<T>::ListingNotFound);
            let mut purchase =
                Purchases::<T>::get(listing_id, &who).ok_or(Error::<T>::NotPurchased)?;
            ensure!(!purchase.reviewed, Error::<T>::AlreadyReviewed);
            ensure!(score <= MAX_REVIEW_SCORE, Error::<T>::InvalidReview);
            ensure!(
                comment.len() <= T::MaxCommentLength::get() as usize,
                Error::<T>::CommentTooLong
            );

            let now = Self::current_block();
            Reviews::<T>::insert(listing_id, &who, Review { score, comment, submitted_at: now });

            purchase.reviewed = true;
            Purchases::<T>::insert(listing_id, &who, purchase);

            Self::deposit_event(Event::ReviewSubmitted { listing_id, reviewer: who, score });
            Ok(())
        }
    }

    // -------------------------- Internal logic --------------------------

    impl<T: Config> Pallet<T> {
        /// Purchase flow: payment legs first, bookkeeping second, all or nothing.
        #[transactional]
        pub fn do_purchase(buyer: &T::AccountId, listing_id: ListingId) -> DispatchResult {
            let listing = Listings::<T>::get(listing_id).ok_or(Error::<T>::ListingNotFound)?;
            ensure!(listing.is_active(), Error::<T>::ListingExpired);
            ensure!(listing.seller != *buyer, Error::<T>::NotAuthorized);
            ensure!(
                !Purchases::<T>::contains_key(listing_id, buyer),
                Error::<T>::AlreadyPurchased
            );

            // mul_floor is overflow-free at any price
            let platform_fee = T::PlatformFeePercent::get().mul_floor(listing.price);
            let seller_amount = listing.price.saturating_sub(platform_fee);

            if platform_fee.is_zero() {
                log::debug!("listing {} priced below the fee floor, fee leg is zero", listing_id);
            }

            T::Currency::transfer(
                buyer,
                &T::PlatformAccount::get(),
                platform_fee,
                ExistenceRequirement::AllowDeath,
            )
            .map_err(|_| Error::<T>::PlatformFeeTransferFailed)?;

            T::Currency::transfer(
                buyer,
                &listing.seller,
                seller_amount,
                ExistenceRequirement::AllowDeath,
            )
            .map_err(|_| Error::<T>::SellerPaymentFailed)?;

            let now = Self::current_block();

            Purchases::<T>::insert(
                listing_id,
                buyer,
                PurchaseRecord { purchased_at: now, price_paid: listing.price, reviewed: false },
            );

            let next_index = OwnerIndex::<T>::get(listing_id).saturating_add(1);
            OwnerIndex::<T>::insert(listing_id, next_index);
            OwnershipHistory::<T>::insert(
                listing_id,
                next_index,
                OwnershipEntry {
                    owner: buyer.clone(),
                    acquired_at: now,
                    price_paid: listing.price,
                },
            );

            CategoryTrends::<T>::mutate(listing.category.clone(), Self::current_period(), |count| {
                *count = count.saturating_add(1)
            });

            Self::deposit_event(Event::AssetPurchased {
                listing_id,
                buyer: buyer.clone(),
                seller: listing.seller,
                price: listing.price,
                platform_fee,
            });
            Ok(())
        }

        /// Whether the account holds a purchase record for the listing
        pub fn has_purchased(listing_id: ListingId, who: &T::AccountId) -> bool {
            Purchases::<T>::contains_key(listing_id, who)
        }

        fn ensure_listing_bounds(
            title: &[u8],
            description: &[u8],
            category: &[u8],
            preview_uri: &[u8],
            full_asset_uri: &[u8],
        ) -> DispatchResult {
            ensure!(
                title.len() <= T::MaxTitleLength::get() as usize,
                Error::<T>::TitleTooLong
            );
            ensure!(
                description.len() <= T::MaxDescriptionLength::get() as usize,
                Error::<T>::DescriptionTooLong
            );
            ensure!(
                category.len() <= T::MaxCategoryLength::get() as usize,
                Error::<T>::CategoryTooLong
            );
            ensure!(
                preview_uri.len() <= T::MaxUriLength::get() as usize,
                Error::<T>::UriTooLong
            );
            ensure!(
                full_asset_uri.len() <= T::MaxUriLength::get() as usize,
                Error::<T>::UriTooLong
            );
            Ok(())
        }

        fn current_block() -> BlockNumberFor<T> {
            frame_system::Pallet::<T>::block_number()
        }

        /// Coarse trend period derived from the block number
        pub fn current_period() -> u32 {
            let now: u32 = frame_system::Pallet::<T>::block_number().saturated_into();
            now / PERIOD_BLOCKS
        }
    }
}
