use crate as pallet_marketplace;
use frame_support::{
    parameter_types,
    derive_impl,
    traits::{ConstU128, ConstU32},
};
use sp_runtime::{BuildStorage, Percent};

type Block = frame_system::mocking::MockBlock<Test>;

pub const SELLER: u64 = 1;
pub const BUYER: u64 = 2;
pub const BUYER_2: u64 = 3;
pub const BROKE_BUYER: u64 = 4;
pub const SHORT_BUYER: u64 = 5;
pub const PLATFORM: u64 = 255;

frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Balances: pallet_balances,
        Marketplace: pallet_marketplace,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
    type AccountData = pallet_balances::AccountData<u128>;
}

impl pallet_balances::Config for Test {
    type MaxLocks = ConstU32<50>;
    type MaxReserves = ();
    type ReserveIdentifier = [u8; 8];
    type Balance = u128;
    type RuntimeEvent = RuntimeEvent;
    type DustRemoval = ();
    type ExistentialDeposit = ConstU128<1>;
    type AccountStore = System;
    type WeightInfo = ();
    type FreezeIdentifier = ();
    type MaxFreezes = ();
    type RuntimeHoldReason = ();
    type RuntimeFreezeReason = ();
    type DoneSlashHandler = ();
}

parameter_types! {
    pub const PlatformAccount: u64 = PLATFORM;
    pub const PlatformFeePercent: Percent = Percent::from_percent(5);
    pub const MaxRoyaltyPercent: u8 = 15;
    pub const MaxTitleLength: u32 = 128;
    pub const MaxDescriptionLength: u32 = 1024;
    pub const MaxCategoryLength: u32 = 64;
    pub const MaxUriLength: u32 = 256;
    pub const MaxCommentLength: u32 = 1024;
}

impl pallet_marketplace::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Currency = Balances;
    type PlatformAccount = PlatformAccount;
    type PlatformFeePercent = PlatformFeePercent;
    type MaxRoyaltyPercent = MaxRoyaltyPercent;
    type MaxTitleLength = MaxTitleLength;
    type MaxDescriptionLength = MaxDescriptionLength;
    type MaxCategoryLength = MaxCategoryLength;
    type MaxUriLength = MaxUriLength;
    type MaxCommentLength = MaxCommentLength;
}

pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default()
        .build_storage()
        .unwrap();
    pallet_balances::GenesisConfig::<Test> {
        balances: vec![
            (SELLER, 1_000_000),
            (BUYER, 10_000_000),
            (BUYER_2, 10_000_000),
            // enough for nothing: below the 5% fee of a 1_000_000 listing
            (BROKE_BUYER, 1_000),
            // enough for the fee leg, not for the seller leg
            (SHORT_BUYER, 100_000),
        ],
        ..Default::default()
    }
    .assimilate_storage(&mut t)
    .unwrap();
    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
