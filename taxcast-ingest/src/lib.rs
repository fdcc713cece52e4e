//! taxcast-ingest: load ledger snapshots from JSON exports and CSV ledgers.

pub mod dates;
pub mod parsers;
pub mod snapshot;

pub use dates::parse_record_date;
pub use parsers::{parse_ledger_csv, parse_receipts_csv};
pub use snapshot::{load_snapshot, parse_snapshot, LedgerSnapshot};
