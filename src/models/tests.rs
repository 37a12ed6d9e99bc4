#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── Series ────────────────────────────────────────────────────

#[test]
fn test_series_names_roundtrip() {
    for series in Series::all() {
        assert_eq!(Series::parse(series.as_str()), Some(*series));
    }
}

#[test]
fn test_series_parse_short_names() {
    assert_eq!(Series::parse("cp"), Some(Series::PriceReference));
    assert_eq!(Series::parse(" Nasional "), Some(Series::NationalVolume));
    assert_eq!(Series::parse("provinsi"), Some(Series::ProvincialVolume));
    assert_eq!(Series::parse("simulasi-lpg-3kg"), Some(Series::Simulation));
    assert_eq!(Series::parse("budget"), None);
}

#[test]
fn test_only_simulation_is_read_only() {
    let writable: Vec<_> = Series::all().iter().filter(|s| s.is_writable()).collect();
    assert_eq!(writable.len(), 4);
    assert!(!Series::Simulation.is_writable());
}

// ── Dates ─────────────────────────────────────────────────────

#[test]
fn test_parse_date_plain_and_with_time() {
    let expected = chrono::NaiveDate::from_ymd_opt(2024, 1, 15);
    assert_eq!(parse_date("2024-01-15"), expected);
    assert_eq!(parse_date("2024-01-15T00:00:00.000Z"), expected);
    assert_eq!(parse_date(" 2024-01-15 08:30:00 "), expected);
}

#[test]
fn test_parse_date_rejects_garbage() {
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("15/01/2024"), None);
    assert_eq!(parse_date("2024-13-01"), None);
}

// ── Validation ────────────────────────────────────────────────

#[test]
fn test_price_reference_requires_date_and_month() {
    let err = PriceReference::new("", "", None, None, None)
        .validated()
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Tanggal"));
    assert!(msg.contains("Bulan"));
}

#[test]
fn test_price_reference_numbers_are_optional() {
    let rec = PriceReference::new("2024-01-15T00:00:00Z", " Januari ", None, None, None)
        .validated()
        .unwrap();
    assert_eq!(rec.date, "2024-01-15");
    assert_eq!(rec.month, "Januari");
}

#[test]
fn test_exchange_rate_requires_period() {
    let err = ExchangeRate::new("2024-01-15", "  ", Some(dec!(15000)), None, None)
        .validated()
        .unwrap_err();
    assert!(err.to_string().contains("Periode_Perhitungan_LPG"));
}

#[test]
fn test_national_volume_requires_volume() {
    let err = NationalVolume::new("2024-01-15", "Januari", None)
        .validated()
        .unwrap_err();
    assert!(err.to_string().contains("Volume"));

    let ok = NationalVolume::new("2024-01-15", "Januari", Some(dec!(0)))
        .validated()
        .unwrap();
    assert_eq!(ok.volume, Some(dec!(0)));
}

#[test]
fn test_provincial_volume_requires_province() {
    let err = ProvincialVolume::new("2024-01-15", "Januari", "", None, None)
        .validated()
        .unwrap_err();
    assert!(err.to_string().contains("Propinsi"));
}

#[test]
fn test_provincial_volume_blank_region_becomes_none() {
    let mut rec = ProvincialVolume::new("2024-01-15", "Januari", "Aceh", None, None);
    rec.region_office = Some("   ".into());
    assert_eq!(rec.validated().unwrap().region_office, None);
}

#[test]
fn test_invalid_date_rejected() {
    let err = PriceReference::new("kemarin", "Januari", None, None, None)
        .validated()
        .unwrap_err();
    assert!(err.to_string().contains("kemarin"));
}

// ── Wire format ───────────────────────────────────────────────

#[test]
fn test_price_reference_request_field_names() {
    let body = r#"{"Tanggal":"2024-01-15","Bulan":"Januari","CPA_C3":500,"CPA_C4":480.5,"HIP_LPG_USD_Per_MT":null}"#;
    let rec: PriceReference = serde_json::from_str(body).unwrap();
    assert_eq!(rec.id, None);
    assert_eq!(rec.propane, Some(dec!(500)));
    assert_eq!(rec.butane, Some(dec!(480.5)));
    assert_eq!(rec.blended, None);
}

#[test]
fn test_price_reference_response_aliases_blended() {
    let mut rec = PriceReference::new("2024-01-15", "Januari", None, None, Some(dec!(490)));
    rec.id = Some(7);
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["hip_lpg"], 490.0);
    assert!(json.get("HIP_LPG_USD_Per_MT").is_none());
    assert!(json.get("audit").is_none());
}

#[test]
fn test_exchange_rate_response_uses_lowercase_names() {
    let rec = ExchangeRate::new("2024-01-15", "Jan 2024", Some(dec!(15000)), None, None);
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["periode_perhitungan_lpg"], "Jan 2024");
    assert_eq!(json["kurs_beli"], 15000.0);
    assert!(json["kurs_jual"].is_null());
}

#[test]
fn test_missing_fields_deserialize_as_empty() {
    let rec: ProvincialVolume = serde_json::from_str("{}").unwrap();
    assert!(rec.date.is_empty());
    assert!(rec.province.is_empty());
    assert_eq!(rec.volume, None);
}

#[test]
fn test_simulation_row_column_names() {
    let row = SimulationRow {
        date: "2024-01-01".into(),
        subsidy: Some(dec!(12.5)),
        ..Default::default()
    };
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["Tanggal"], "2024-01-01");
    assert_eq!(json["Subsidi"], 12.5);
    assert!(json["Harga_Jual_Perhitungan_Rp_Kg"].is_null());
}
