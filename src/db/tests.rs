#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn price(date: &str, c3: Decimal, c4: Decimal, hip: Decimal) -> PriceReference {
    PriceReference::new(date, "Januari", Some(c3), Some(c4), Some(hip))
}

// ── CP Aramco ─────────────────────────────────────────────────

#[test]
fn test_price_reference_crud() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_price_reference(&price("2024-01-01", dec!(500), dec!(480), dec!(490)), "admin")
        .unwrap();

    let fetched = db.get_price_reference_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.id, Some(id));
    assert_eq!(fetched.propane, Some(dec!(500)));
    assert_eq!(fetched.blended, Some(dec!(490)));
    assert_eq!(fetched.audit.created_by, "admin");
    assert_eq!(fetched.audit.updated_by, "admin");
    assert!(!fetched.audit.created_at.is_empty());

    let mut changed = fetched.clone();
    changed.blended = Some(dec!(495.5));
    assert!(db.update_price_reference(id, &changed, "operator").unwrap());
    let after = db.get_price_reference_by_id(id).unwrap().unwrap();
    assert_eq!(after.blended, Some(dec!(495.5)));
    assert_eq!(after.audit.created_by, "admin");
    assert_eq!(after.audit.updated_by, "operator");

    assert!(db.delete_record(Series::PriceReference, id).unwrap());
    assert!(db.get_price_reference_by_id(id).unwrap().is_none());
}

#[test]
fn test_price_reference_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_price_reference_by_id(42).unwrap().is_none());
    let rec = price("2024-01-01", dec!(1), dec!(1), dec!(1));
    assert!(!db.update_price_reference(42, &rec, "admin").unwrap());
    assert!(!db.delete_record(Series::PriceReference, 42).unwrap());
}

#[test]
fn test_list_is_newest_first() {
    let db = Database::open_in_memory().unwrap();
    for date in ["2024-02-01", "2024-03-01", "2024-01-01"] {
        db.insert_price_reference(&price(date, dec!(1), dec!(1), dec!(1)), "admin")
            .unwrap();
    }
    let dates: Vec<String> = db
        .get_price_references()
        .unwrap()
        .into_iter()
        .map(|r| r.date)
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
}

#[test]
fn test_null_numbers_stay_null() {
    let db = Database::open_in_memory().unwrap();
    let rec = PriceReference::new("2024-01-01", "Januari", Some(dec!(500)), None, None);
    let id = db.insert_price_reference(&rec, "admin").unwrap();
    let fetched = db.get_price_reference_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.butane, None);
    assert_eq!(fetched.blended, None);
}

#[test]
fn test_blended_override_stored_verbatim() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_price_reference(&price("2024-01-01", dec!(500), dec!(480), dec!(495)), "admin")
        .unwrap();
    let fetched = db.get_price_reference_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.blended, Some(dec!(495)));
}

// ── Kurs ──────────────────────────────────────────────────────

#[test]
fn test_exchange_rate_last_update_wins() {
    let db = Database::open_in_memory().unwrap();
    let rec = ExchangeRate::new("2024-01-15", "Jan 2024", Some(dec!(15000)), Some(dec!(15100)), Some(dec!(15050)));
    let id = db.insert_exchange_rate(&rec, "admin").unwrap();

    let first = ExchangeRate { mid: Some(dec!(15055)), ..rec.clone() };
    let second = ExchangeRate { mid: Some(dec!(15060)), ..rec };
    assert!(db.update_exchange_rate(id, &first, "admin").unwrap());
    assert!(db.update_exchange_rate(id, &second, "admin").unwrap());

    let fetched = db.get_exchange_rate_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.mid, Some(dec!(15060)));
    assert_eq!(db.get_exchange_rates().unwrap().len(), 1);
}

// ── LPG Nasional ──────────────────────────────────────────────

#[test]
fn test_national_volume_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_national_volume(&NationalVolume::new("2024-01-01", "Januari", Some(dec!(650000000))), "admin")
        .unwrap();
    let fetched = db.get_national_volume_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.volume, Some(dec!(650000000)));
}

#[test]
fn test_national_volume_without_volume_is_rejected() {
    let db = Database::open_in_memory().unwrap();
    let rec = NationalVolume::new("2024-01-01", "Januari", None);
    assert!(db.insert_national_volume(&rec, "admin").is_err());
    assert_eq!(db.count_records(Series::NationalVolume).unwrap(), 0);
}

// ── LPG Provinsi ──────────────────────────────────────────────

#[test]
fn test_provincial_volume_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let mut rec = ProvincialVolume::new("2024-01-01", "Januari", "Aceh", Some(dec!(1200.5)), None);
    rec.region_office = Some("MOR I".into());
    let id = db.insert_provincial_volume(&rec, "admin").unwrap();

    let fetched = db.get_provincial_volume_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.province, "Aceh");
    assert_eq!(fetched.region_office.as_deref(), Some("MOR I"));
    assert_eq!(fetched.volume, Some(dec!(1200.5)));
    assert_eq!(fetched.quota, None);
}

// ── Fact table trait ──────────────────────────────────────────

fn resubmit<T: FactTable + Clone>(db: &Database, id: i64) -> T {
    let stored = T::get(db, id).unwrap().unwrap();
    let again = stored.clone().validated().unwrap();
    assert!(T::update(db, id, &again, "admin").unwrap());
    T::get(db, id).unwrap().unwrap()
}

#[test]
fn test_resubmitting_unchanged_record_is_idempotent() {
    let db = Database::open_in_memory().unwrap();
    let rec = ExchangeRate::new("2024-01-15", "Jan 2024", Some(dec!(15000)), None, Some(dec!(15020.25)));
    let id = db.insert_exchange_rate(&rec, "admin").unwrap();
    let before = db.get_exchange_rate_by_id(id).unwrap().unwrap();

    let after: ExchangeRate = resubmit(&db, id);
    assert_eq!(after.audit.created_at, before.audit.created_at);
    assert_eq!(
        ExchangeRate { audit: Audit::default(), ..after },
        ExchangeRate { audit: Audit::default(), ..before }
    );
}

#[test]
fn test_trait_delete_uses_series_table() {
    let db = Database::open_in_memory().unwrap();
    let rec = ProvincialVolume::new("2024-01-01", "Januari", "Aceh", None, None);
    let id = ProvincialVolume::insert(&db, &rec, "admin").unwrap();
    assert!(ProvincialVolume::delete(&db, id).unwrap());
    assert!(ProvincialVolume::list(&db).unwrap().is_empty());
}

#[test]
fn test_simulation_view_cannot_be_deleted_from() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.delete_record(Series::Simulation, 1).is_err());
}

// ── Simulasi ──────────────────────────────────────────────────

#[test]
fn test_simulation_rows_read_from_view() {
    let db = Database::open_in_memory().unwrap();
    db.insert_simulation_feed(&SimulationRow {
        date: "2024-01-01".into(),
        retail_price: Some(dec!(4250)),
        ..Default::default()
    })
    .unwrap();
    db.insert_simulation_feed(&SimulationRow {
        date: "2024-02-01".into(),
        subsidy: Some(dec!(12500.75)),
        period: Some("Feb 2024".into()),
        ..Default::default()
    })
    .unwrap();

    let rows = db.get_simulation_rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2024-02-01");
    assert_eq!(rows[0].subsidy, Some(dec!(12500.75)));
    assert_eq!(rows[0].period.as_deref(), Some("Feb 2024"));
    assert_eq!(rows[1].retail_price, Some(dec!(4250)));
    assert_eq!(rows[1].hip_per_kg, None);
}

#[test]
fn test_simulation_feed_real_values_are_read() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO simulation_feed (date, hip_per_kg, margin) VALUES ('2024-03-01', 11250.5, 1600)",
            [],
        )
        .unwrap();
    let rows = db.get_simulation_rows().unwrap();
    assert_eq!(rows[0].hip_per_kg, Some(dec!(11250.5)));
    assert_eq!(rows[0].margin, Some(dec!(1600)));
}

// ── Users ─────────────────────────────────────────────────────

#[test]
fn test_upsert_user_replaces_hash() {
    let db = Database::open_in_memory().unwrap();
    let id1 = db.upsert_user(&User::new("admin", "hash-one".into())).unwrap();
    let id2 = db.upsert_user(&User::new("admin", "hash-two".into())).unwrap();
    assert_eq!(id1, id2);

    let user = db.get_user_by_username("admin").unwrap().unwrap();
    assert_eq!(user.password_hash, "hash-two");
    assert!(db.get_user_by_username("nobody").unwrap().is_none());
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_csv() {
    let db = Database::open_in_memory().unwrap();
    let mut rec = ProvincialVolume::new("2024-01-01", "Januari", "Jawa Barat", Some(dec!(1500)), Some(dec!(1600)));
    rec.region_office = Some("MOR III".into());
    db.insert_provincial_volume(&rec, "admin").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("provinsi.csv");
    let count = db.export_to_csv(Series::ProvincialVolume, &path).unwrap();
    assert_eq!(count, 1);

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("id,tanggal,bulan,propinsi,mor,volume,kuota"));
    assert_eq!(lines.next(), Some("1,2024-01-01,Januari,Jawa Barat,MOR III,1500,1600"));
}

#[test]
fn test_export_empty_series_writes_header_only() {
    let db = Database::open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim.csv");
    assert_eq!(db.export_to_csv(Series::Simulation, &path).unwrap(), 0);
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
}
