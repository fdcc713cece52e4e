use std::io::Write;

use taxcast_ingest::{load_snapshot, parse_ledger_csv, parse_receipts_csv};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_snapshot_from_disk() {
    let file = write_temp(
        ".json",
        r#"{
            "transactions": [
                {"id": "t1", "date": "2025-01-31", "amount": 6000000, "type": "income"},
                {"id": "t2", "date": "2025-02-28", "amount": "-¥2,000,000", "approvalStatus": "approved"}
            ],
            "receipts": [
                {"date": "2025-03-01", "amount": "¥12,000", "status": "pending"}
            ]
        }"#,
    );

    let snapshot = load_snapshot(file.path()).unwrap();
    assert_eq!(snapshot.transactions.len(), 2);
    assert_eq!(snapshot.receipts.len(), 1);

    let income: f64 = snapshot
        .transactions
        .iter()
        .map(|t| t.amount.normalize())
        .filter(|a| *a > 0.0)
        .sum();
    assert_eq!(income, 6_000_000.0);
}

#[test]
fn test_missing_file_reports_path() {
    let err = load_snapshot("/definitely/not/here/ledger.json").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here/ledger.json"));
}

#[test]
fn test_csv_files_from_disk() {
    let ledger = write_temp(
        ".csv",
        "date,amount,type,status,tags,description\n\
         2025-04-01,-1200000,expense,,depreciation-asset,当期償却額: ¥100000\n\
         2025-04-05,300000,income,rejected,,cancelled invoice\n",
    );
    let receipts = write_temp(".csv", "date,amount,status\n2025-04-06,5000,pending\n");

    let txns = parse_ledger_csv(ledger.path()).unwrap();
    assert_eq!(txns.len(), 2);
    assert!(txns[0].is_depreciation_asset());
    assert!(txns[1].is_rejected());

    let receipts = parse_receipts_csv(receipts.path()).unwrap();
    assert_eq!(receipts.len(), 1);
    assert!(receipts[0].is_pending());
}
