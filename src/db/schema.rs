pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS price_reference (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT NOT NULL,
    month       TEXT NOT NULL,
    propane     TEXT,
    butane      TEXT,
    blended     TEXT,
    created_by  TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_by  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS exchange_rate (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT NOT NULL,
    period      TEXT NOT NULL,
    buy         TEXT,
    sell        TEXT,
    mid         TEXT,
    created_by  TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_by  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS national_volume (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT NOT NULL,
    month       TEXT NOT NULL,
    volume      TEXT NOT NULL,
    created_by  TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_by  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS provincial_volume (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    date          TEXT NOT NULL,
    month         TEXT NOT NULL,
    province      TEXT NOT NULL,
    region_office TEXT,
    volume        TEXT,
    quota         TEXT,
    created_by    TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    updated_by    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_price_reference_date ON price_reference(date);
CREATE INDEX IF NOT EXISTS idx_exchange_rate_date ON exchange_rate(date);
CREATE INDEX IF NOT EXISTS idx_national_volume_date ON national_volume(date);
CREATE INDEX IF NOT EXISTS idx_provincial_volume_date ON provincial_volume(date);

-- Written by the external pricing pipeline, never by this application.
CREATE TABLE IF NOT EXISTS simulation_feed (
    id                        INTEGER PRIMARY KEY AUTOINCREMENT,
    date                      TEXT NOT NULL,
    month                     TEXT NOT NULL DEFAULT '',
    propane                   NUMERIC,
    butane                    NUMERIC,
    blended                   NUMERIC,
    average_rate              NUMERIC,
    hip_per_kg                NUMERIC,
    benchmark_price           NUMERIC,
    retail_price              NUMERIC,
    margin                    NUMERIC,
    price_ex_margin_with_vat  NUMERIC,
    vat                       NUMERIC,
    subsidy                   NUMERIC,
    period                    TEXT,
    computed_price            NUMERIC
);

CREATE VIEW IF NOT EXISTS v_simulation_lpg_3kg AS
SELECT date, month, propane, butane, blended, average_rate, hip_per_kg,
       benchmark_price, retail_price, margin, price_ex_margin_with_vat,
       vat, subsidy, period, computed_price
FROM simulation_feed;

CREATE TABLE IF NOT EXISTS users (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    username       TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,
    created_at     TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
