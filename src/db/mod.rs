mod export;
mod schema;

use anyhow::{bail, Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::calc::validate::ValidationError;
use crate::models::*;

/// Audit name stamped on writes. There are no per-user sessions yet.
pub(crate) const DEFAULT_ACTOR: &str = "admin";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Removes one row from a fact table. Returns false when the id is unknown.
    pub(crate) fn delete_record(&self, series: Series, id: i64) -> Result<bool> {
        if !series.is_writable() {
            bail!("{} is read-only", series.label());
        }
        let sql = format!("DELETE FROM {} WHERE id = ?1", series.table());
        let changed = self
            .conn
            .execute(&sql, params![id])
            .with_context(|| format!("Failed to delete {} #{id}", series.label()))?;
        Ok(changed > 0)
    }

    pub(crate) fn count_records(&self, series: Series) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", series.table());
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    // ── CP Aramco ─────────────────────────────────────────────

    pub(crate) fn get_price_references(&self) -> Result<Vec<PriceReference>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, month, propane, butane, blended, created_by, created_at, updated_by, updated_at
             FROM price_reference ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], price_reference_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_price_reference_by_id(&self, id: i64) -> Result<Option<PriceReference>> {
        let result = self.conn.query_row(
            "SELECT id, date, month, propane, butane, blended, created_by, created_at, updated_by, updated_at
             FROM price_reference WHERE id = ?1",
            params![id],
            price_reference_from_row,
        );
        match result {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_price_reference(&self, rec: &PriceReference, actor: &str) -> Result<i64> {
        let now = timestamp();
        self.conn.execute(
            "INSERT INTO price_reference (date, month, propane, butane, blended, created_by, created_at, updated_by, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?6, ?7)",
            params![
                rec.date,
                rec.month,
                decimal_text(rec.propane),
                decimal_text(rec.butane),
                decimal_text(rec.blended),
                actor,
                now,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_price_reference(
        &self,
        id: i64,
        rec: &PriceReference,
        actor: &str,
    ) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE price_reference
             SET date = ?1, month = ?2, propane = ?3, butane = ?4, blended = ?5, updated_by = ?6, updated_at = ?7
             WHERE id = ?8",
            params![
                rec.date,
                rec.month,
                decimal_text(rec.propane),
                decimal_text(rec.butane),
                decimal_text(rec.blended),
                actor,
                timestamp(),
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    // ── Kurs ──────────────────────────────────────────────────

    pub(crate) fn get_exchange_rates(&self) -> Result<Vec<ExchangeRate>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, period, buy, sell, mid, created_by, created_at, updated_by, updated_at
             FROM exchange_rate ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], exchange_rate_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_exchange_rate_by_id(&self, id: i64) -> Result<Option<ExchangeRate>> {
        let result = self.conn.query_row(
            "SELECT id, date, period, buy, sell, mid, created_by, created_at, updated_by, updated_at
             FROM exchange_rate WHERE id = ?1",
            params![id],
            exchange_rate_from_row,
        );
        match result {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_exchange_rate(&self, rec: &ExchangeRate, actor: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO exchange_rate (date, period, buy, sell, mid, created_by, created_at, updated_by, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?6, ?7)",
            params![
                rec.date,
                rec.period,
                decimal_text(rec.buy),
                decimal_text(rec.sell),
                decimal_text(rec.mid),
                actor,
                timestamp(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_exchange_rate(&self, id: i64, rec: &ExchangeRate, actor: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE exchange_rate
             SET date = ?1, period = ?2, buy = ?3, sell = ?4, mid = ?5, updated_by = ?6, updated_at = ?7
             WHERE id = ?8",
            params![
                rec.date,
                rec.period,
                decimal_text(rec.buy),
                decimal_text(rec.sell),
                decimal_text(rec.mid),
                actor,
                timestamp(),
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    // ── LPG Nasional ──────────────────────────────────────────

    pub(crate) fn get_national_volumes(&self) -> Result<Vec<NationalVolume>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, month, volume, created_by, created_at, updated_by, updated_at
             FROM national_volume ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], national_volume_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_national_volume_by_id(&self, id: i64) -> Result<Option<NationalVolume>> {
        let result = self.conn.query_row(
            "SELECT id, date, month, volume, created_by, created_at, updated_by, updated_at
             FROM national_volume WHERE id = ?1",
            params![id],
            national_volume_from_row,
        );
        match result {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_national_volume(&self, rec: &NationalVolume, actor: &str) -> Result<i64> {
        let volume = rec
            .volume
            .context("National volume requires a Volume value")?;
        self.conn.execute(
            "INSERT INTO national_volume (date, month, volume, created_by, created_at, updated_by, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?4, ?5)",
            params![rec.date, rec.month, volume.to_string(), actor, timestamp()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_national_volume(&self, id: i64, rec: &NationalVolume, actor: &str) -> Result<bool> {
        let volume = rec
            .volume
            .context("National volume requires a Volume value")?;
        let changed = self.conn.execute(
            "UPDATE national_volume
             SET date = ?1, month = ?2, volume = ?3, updated_by = ?4, updated_at = ?5
             WHERE id = ?6",
            params![rec.date, rec.month, volume.to_string(), actor, timestamp(), id],
        )?;
        Ok(changed > 0)
    }

    // ── LPG Provinsi ──────────────────────────────────────────

    pub(crate) fn get_provincial_volumes(&self) -> Result<Vec<ProvincialVolume>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, month, province, region_office, volume, quota, created_by, created_at, updated_by, updated_at
             FROM provincial_volume ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], provincial_volume_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_provincial_volume_by_id(&self, id: i64) -> Result<Option<ProvincialVolume>> {
        let result = self.conn.query_row(
            "SELECT id, date, month, province, region_office, volume, quota, created_by, created_at, updated_by, updated_at
             FROM provincial_volume WHERE id = ?1",
            params![id],
            provincial_volume_from_row,
        );
        match result {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_provincial_volume(&self, rec: &ProvincialVolume, actor: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO provincial_volume (date, month, province, region_office, volume, quota, created_by, created_at, updated_by, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?7, ?8)",
            params![
                rec.date,
                rec.month,
                rec.province,
                rec.region_office,
                decimal_text(rec.volume),
                decimal_text(rec.quota),
                actor,
                timestamp(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_provincial_volume(
        &self,
        id: i64,
        rec: &ProvincialVolume,
        actor: &str,
    ) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE provincial_volume
             SET date = ?1, month = ?2, province = ?3, region_office = ?4, volume = ?5, quota = ?6,
                 updated_by = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                rec.date,
                rec.month,
                rec.province,
                rec.region_office,
                decimal_text(rec.volume),
                decimal_text(rec.quota),
                actor,
                timestamp(),
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    // ── Simulasi ──────────────────────────────────────────────

    pub(crate) fn get_simulation_rows(&self) -> Result<Vec<SimulationRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, month, propane, butane, blended, average_rate, hip_per_kg,
                    benchmark_price, retail_price, margin, price_ex_margin_with_vat,
                    vat, subsidy, period, computed_price
             FROM v_simulation_lpg_3kg ORDER BY date DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SimulationRow {
                date: text_at(row, 0)?.unwrap_or_default(),
                month: text_at(row, 1)?.unwrap_or_default(),
                propane: decimal_at(row, 2)?,
                butane: decimal_at(row, 3)?,
                blended: decimal_at(row, 4)?,
                average_rate: decimal_at(row, 5)?,
                hip_per_kg: decimal_at(row, 6)?,
                benchmark_price: decimal_at(row, 7)?,
                retail_price: decimal_at(row, 8)?,
                margin: decimal_at(row, 9)?,
                price_ex_margin_with_vat: decimal_at(row, 10)?,
                vat: decimal_at(row, 11)?,
                subsidy: decimal_at(row, 12)?,
                period: text_at(row, 13)?,
                computed_price: decimal_at(row, 14)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Stands in for the pricing pipeline in tests.
    #[cfg(test)]
    pub(crate) fn insert_simulation_feed(&self, row: &SimulationRow) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO simulation_feed (date, month, propane, butane, blended, average_rate, hip_per_kg,
                 benchmark_price, retail_price, margin, price_ex_margin_with_vat, vat, subsidy, period, computed_price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                row.date,
                row.month,
                decimal_text(row.propane),
                decimal_text(row.butane),
                decimal_text(row.blended),
                decimal_text(row.average_rate),
                decimal_text(row.hip_per_kg),
                decimal_text(row.benchmark_price),
                decimal_text(row.retail_price),
                decimal_text(row.margin),
                decimal_text(row.price_ex_margin_with_vat),
                decimal_text(row.vat),
                decimal_text(row.subsidy),
                row.period,
                decimal_text(row.computed_price),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ── Users ─────────────────────────────────────────────────

    /// Inserts the user, or replaces the password hash if the name exists.
    pub(crate) fn upsert_user(&self, user: &User) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(username) DO UPDATE SET password_hash = excluded.password_hash",
            params![user.username, user.password_hash, user.created_at],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM users WHERE username = ?1",
            params![user.username],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    pub(crate) fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = self.conn.query_row(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(User {
                    id: Some(row.get(0)?),
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        );
        match result {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

// ── Fact tables ───────────────────────────────────────────────

/// The operations every editable series supports. The HTTP handlers and the
/// TUI forms are written once against this trait.
pub(crate) trait FactTable: Sized {
    const SERIES: Series;

    fn list(db: &Database) -> Result<Vec<Self>>;
    fn get(db: &Database, id: i64) -> Result<Option<Self>>;
    fn insert(db: &Database, rec: &Self, actor: &str) -> Result<i64>;
    /// Full replacement of the mutable fields. False when the id is unknown.
    fn update(db: &Database, id: i64, rec: &Self, actor: &str) -> Result<bool>;
    fn validated(self) -> std::result::Result<Self, ValidationError>;

    fn delete(db: &Database, id: i64) -> Result<bool> {
        db.delete_record(Self::SERIES, id)
    }
}

impl FactTable for PriceReference {
    const SERIES: Series = Series::PriceReference;

    fn list(db: &Database) -> Result<Vec<Self>> {
        db.get_price_references()
    }
    fn get(db: &Database, id: i64) -> Result<Option<Self>> {
        db.get_price_reference_by_id(id)
    }
    fn insert(db: &Database, rec: &Self, actor: &str) -> Result<i64> {
        db.insert_price_reference(rec, actor)
    }
    fn update(db: &Database, id: i64, rec: &Self, actor: &str) -> Result<bool> {
        db.update_price_reference(id, rec, actor)
    }
    fn validated(self) -> std::result::Result<Self, ValidationError> {
        PriceReference::validated(self)
    }
}

impl FactTable for ExchangeRate {
    const SERIES: Series = Series::ExchangeRate;

    fn list(db: &Database) -> Result<Vec<Self>> {
        db.get_exchange_rates()
    }
    fn get(db: &Database, id: i64) -> Result<Option<Self>> {
        db.get_exchange_rate_by_id(id)
    }
    fn insert(db: &Database, rec: &Self, actor: &str) -> Result<i64> {
        db.insert_exchange_rate(rec, actor)
    }
    fn update(db: &Database, id: i64, rec: &Self, actor: &str) -> Result<bool> {
        db.update_exchange_rate(id, rec, actor)
    }
    fn validated(self) -> std::result::Result<Self, ValidationError> {
        ExchangeRate::validated(self)
    }
}

impl FactTable for NationalVolume {
    const SERIES: Series = Series::NationalVolume;

    fn list(db: &Database) -> Result<Vec<Self>> {
        db.get_national_volumes()
    }
    fn get(db: &Database, id: i64) -> Result<Option<Self>> {
        db.get_national_volume_by_id(id)
    }
    fn insert(db: &Database, rec: &Self, actor: &str) -> Result<i64> {
        db.insert_national_volume(rec, actor)
    }
    fn update(db: &Database, id: i64, rec: &Self, actor: &str) -> Result<bool> {
        db.update_national_volume(id, rec, actor)
    }
    fn validated(self) -> std::result::Result<Self, ValidationError> {
        NationalVolume::validated(self)
    }
}

impl FactTable for ProvincialVolume {
    const SERIES: Series = Series::ProvincialVolume;

    fn list(db: &Database) -> Result<Vec<Self>> {
        db.get_provincial_volumes()
    }
    fn get(db: &Database, id: i64) -> Result<Option<Self>> {
        db.get_provincial_volume_by_id(id)
    }
    fn insert(db: &Database, rec: &Self, actor: &str) -> Result<i64> {
        db.insert_provincial_volume(rec, actor)
    }
    fn update(db: &Database, id: i64, rec: &Self, actor: &str) -> Result<bool> {
        db.update_provincial_volume(id, rec, actor)
    }
    fn validated(self) -> std::result::Result<Self, ValidationError> {
        ProvincialVolume::validated(self)
    }
}

// ── Row mapping ───────────────────────────────────────────────

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn decimal_text(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

/// Reads a numeric column whatever its storage class. Our own tables store
/// decimal text; the pipeline-owned feed may hold REAL or INTEGER values.
fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::from_f64(f),
        ValueRef::Text(t) => std::str::from_utf8(t)
            .ok()
            .and_then(|s| Decimal::from_str(s.trim()).ok()),
    })
}

fn text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
    })
}

fn audit_from_row(row: &Row<'_>, first: usize) -> rusqlite::Result<Audit> {
    Ok(Audit {
        created_by: row.get(first)?,
        created_at: row.get(first + 1)?,
        updated_by: row.get(first + 2)?,
        updated_at: row.get(first + 3)?,
    })
}

fn price_reference_from_row(row: &Row<'_>) -> rusqlite::Result<PriceReference> {
    Ok(PriceReference {
        id: Some(row.get(0)?),
        date: row.get(1)?,
        month: row.get(2)?,
        propane: decimal_at(row, 3)?,
        butane: decimal_at(row, 4)?,
        blended: decimal_at(row, 5)?,
        audit: audit_from_row(row, 6)?,
    })
}

fn exchange_rate_from_row(row: &Row<'_>) -> rusqlite::Result<ExchangeRate> {
    Ok(ExchangeRate {
        id: Some(row.get(0)?),
        date: row.get(1)?,
        period: row.get(2)?,
        buy: decimal_at(row, 3)?,
        sell: decimal_at(row, 4)?,
        mid: decimal_at(row, 5)?,
        audit: audit_from_row(row, 6)?,
    })
}

fn national_volume_from_row(row: &Row<'_>) -> rusqlite::Result<NationalVolume> {
    Ok(NationalVolume {
        id: Some(row.get(0)?),
        date: row.get(1)?,
        month: row.get(2)?,
        volume: decimal_at(row, 3)?,
        audit: audit_from_row(row, 4)?,
    })
}

fn provincial_volume_from_row(row: &Row<'_>) -> rusqlite::Result<ProvincialVolume> {
    Ok(ProvincialVolume {
        id: Some(row.get(0)?),
        date: row.get(1)?,
        month: row.get(2)?,
        province: row.get(3)?,
        region_office: row.get(4)?,
        volume: decimal_at(row, 5)?,
        quota: decimal_at(row, 6)?,
        audit: audit_from_row(row, 7)?,
    })
}

#[cfg(test)]
mod tests;
