use super::*;

#[allow(unused)]
use crate::Pallet as Marketplace;
use crate::pallet::BalanceOf;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;
use frame_support::traits::{Currency, Get};
use alloc::vec;

fn setup_user<T: Config>(caller: T::AccountId) {
    let funds: BalanceOf<T> = 10_000_000u32.into();
    T::Currency::make_free_balance_be(&caller, funds);
}

fn seed_listing<T: Config>(seller: T::AccountId) -> types::ListingId {
    setup_user::<T>(seller.clone());
    Marketplace::<T>::create_listing(
        RawOrigin::Signed(seller).into(),
        vec![0u8; T::MaxTitleLength::get() as usize],
        vec![0u8; T::MaxDescriptionLength::get() as usize],
        1_000_000u32.into(),
        vec![0u8; T::MaxCategoryLength::get() as usize],
        vec![0u8; T::MaxUriLength::get() as usize],
        vec![0u8; T::MaxUriLength::get() as usize],
        T::MaxRoyaltyPercent::get(),
    )
    .unwrap();
    Marketplace::<T>::listing_count()
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn create_listing() {
        let caller: T::AccountId = whitelisted_caller();
        setup_user::<T>(caller.clone());

        let title = vec![0u8; T::MaxTitleLength::get() as usize];
        let description = vec![0u8; T::MaxDescriptionLength::get() as usize];
        let category = vec![0u8; T::MaxCategoryLength::get() as usize];
        let uri = vec![0u8; T::MaxUriLength::get() as usize];
        let price: BalanceOf<T> = 1_000_000u32.into();

        #[extrinsic_call]
        create_listing(
            RawOrigin::Signed(caller),
            title,
            description,
            price,
            category,
            uri.clone(),
            uri,
            T::MaxRoyaltyPercent::get(),
        );
    }

    #[benchmark]
    fn purchase_asset() {
        let seller: T::AccountId = account("seller", 0, 0);
        let listing_id = seed_listing::<T>(seller);

        let buyer: T::AccountId = whitelisted_caller();
        setup_user::<T>(buyer.clone());

        #[extrinsic_call]
        purchase_asset(RawOrigin::Signed(buyer), listing_id);
    }

    #[benchmark]
    fn submit_review() {
        let seller: T::AccountId = account("seller", 0, 0);
        let listing_id = seed_listing::<T>(seller);

        let buyer: T::AccountId = whitelisted_caller();
        setup_user::<T>(buyer.clone());
        Marketplace::<T>::purchase_asset(RawOrigin::Signed(buyer.clone()).into(), listing_id)
            .unwrap();

        let comment = vec![0u8; T::MaxCommentLength::get() as usize];

        #[extrinsic_call]
        submit_review(RawOrigin::Signed(buyer), listing_id, 5u8, comment);
    }

    impl_benchmark_test_suite!(
        Pallet,
        crate::mock::new_test_ext(),
        crate::mock::Test,
    );
}
