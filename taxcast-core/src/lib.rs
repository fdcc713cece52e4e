//! taxcast-core: ledger record types, amount normalization and fiscal year detection

pub mod amount;
pub mod clock;
pub mod fiscal_year;
pub mod ledger;

pub use amount::Amount;
pub use clock::{Clock, FixedClock, SystemClock};
pub use fiscal_year::{default_year, resolve_year, selectable_years};
pub use ledger::{
    ApprovalStatus, EntryKind, LedgerTransaction, ReceiptRecord, ReceiptStatus,
    DEPRECIATION_ASSET_TAG,
};
