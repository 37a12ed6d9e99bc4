//! Create and edit forms for the four fact tables.
//!
//! Every keystroke goes through [`Form::set_value`], so numeric fields are
//! sanitized as they are typed and the derived field (HIP LPG or Kurs Tengah)
//! follows its two inputs live. A manual override of the derived field
//! stands until one of the inputs changes again.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::calc::validate::ValidationError;
use crate::calc::{sanitize_numeric, to_nullable, DerivedPair, BLENDED_PRICE, MID_RATE};
use crate::db::{Database, FactTable};
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldId {
    Date,
    /// Bulan, or the calculation period for Kurs.
    Label,
    Province,
    Region,
    First,
    Second,
    Dependent,
    Volume,
    Quota,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Form {
    pub(crate) series: Series,
    pub(crate) editing_id: Option<i64>,
    pub(crate) focus: usize,
    date: String,
    label: String,
    province: String,
    region: String,
    pair: Option<DerivedPair>,
    volume: String,
    quota: String,
}

/// A validated record ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormOutput {
    PriceReference(PriceReference),
    ExchangeRate(ExchangeRate),
    NationalVolume(NationalVolume),
    ProvincialVolume(ProvincialVolume),
}

fn text(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

impl Form {
    fn blank(series: Series, pair: Option<DerivedPair>) -> Self {
        Self {
            series,
            editing_id: None,
            focus: 0,
            date: String::new(),
            label: String::new(),
            province: String::new(),
            region: String::new(),
            pair,
            volume: String::new(),
            quota: String::new(),
        }
    }

    /// Empty form for a new record. `None` for the read-only simulation.
    pub(crate) fn create(series: Series) -> Option<Self> {
        let pair = match series {
            Series::PriceReference => Some(DerivedPair::new(BLENDED_PRICE)),
            Series::ExchangeRate => Some(DerivedPair::new(MID_RATE)),
            Series::NationalVolume | Series::ProvincialVolume => None,
            Series::Simulation => return None,
        };
        Some(Self::blank(series, pair))
    }

    pub(crate) fn title(&self) -> String {
        match self.editing_id {
            Some(id) => format!(" Edit {} #{id} ", self.series.label()),
            None => format!(" New {} ", self.series.label()),
        }
    }

    pub(crate) fn fields(&self) -> &'static [FieldId] {
        use FieldId::*;
        match self.series {
            Series::PriceReference | Series::ExchangeRate => &[Date, Label, First, Second, Dependent],
            Series::NationalVolume => &[Date, Label, Volume],
            Series::ProvincialVolume => &[Date, Label, Province, Region, Volume, Quota],
            Series::Simulation => &[],
        }
    }

    pub(crate) fn focused(&self) -> FieldId {
        self.fields()
            .get(self.focus)
            .copied()
            .unwrap_or(FieldId::Date)
    }

    pub(crate) fn next_field(&mut self) {
        let len = self.fields().len().max(1);
        self.focus = (self.focus + 1) % len;
    }

    pub(crate) fn prev_field(&mut self) {
        let len = self.fields().len().max(1);
        self.focus = (self.focus + len - 1) % len;
    }

    pub(crate) fn field_label(&self, field: FieldId) -> &'static str {
        match field {
            FieldId::Date => "Tanggal (YYYY-MM-DD)",
            FieldId::Label if self.series == Series::ExchangeRate => "Periode Perhitungan LPG",
            FieldId::Label => "Bulan",
            FieldId::Province => "Propinsi",
            FieldId::Region => "MOR",
            FieldId::First => self.pair.as_ref().map_or("", |p| p.rule.first),
            FieldId::Second => self.pair.as_ref().map_or("", |p| p.rule.second),
            FieldId::Dependent => self.pair.as_ref().map_or("", |p| p.rule.dependent),
            FieldId::Volume => "Volume (kg)",
            FieldId::Quota => "Kuota",
        }
    }

    pub(crate) fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Date => &self.date,
            FieldId::Label => &self.label,
            FieldId::Province => &self.province,
            FieldId::Region => &self.region,
            FieldId::First => self.pair.as_ref().map_or("", |p| p.first.as_str()),
            FieldId::Second => self.pair.as_ref().map_or("", |p| p.second.as_str()),
            FieldId::Dependent => self.pair.as_ref().map_or("", |p| p.dependent.as_str()),
            FieldId::Volume => &self.volume,
            FieldId::Quota => &self.quota,
        }
    }

    pub(crate) fn set_value(&mut self, field: FieldId, raw: &str) {
        match field {
            FieldId::Date => self.date = raw.to_string(),
            FieldId::Label => self.label = raw.to_string(),
            FieldId::Province => self.province = raw.to_string(),
            FieldId::Region => self.region = raw.to_string(),
            FieldId::First => {
                if let Some(pair) = self.pair.as_mut() {
                    pair.set_first(raw);
                }
            }
            FieldId::Second => {
                if let Some(pair) = self.pair.as_mut() {
                    pair.set_second(raw);
                }
            }
            FieldId::Dependent => {
                if let Some(pair) = self.pair.as_mut() {
                    pair.set_dependent(raw);
                }
            }
            FieldId::Volume => self.volume = sanitize_numeric(raw),
            FieldId::Quota => self.quota = sanitize_numeric(raw),
        }
    }

    pub(crate) fn push_char(&mut self, c: char) {
        let field = self.focused();
        let mut value = self.value(field).to_string();
        value.push(c);
        self.set_value(field, &value);
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.focused();
        let mut value = self.value(field).to_string();
        value.pop();
        self.set_value(field, &value);
    }

    /// Converts the text fields into a record and runs the required-field
    /// checks. Empty numbers become null.
    pub(crate) fn build(&self) -> Result<FormOutput, ValidationError> {
        let (first, second, dependent) = self
            .pair
            .as_ref()
            .map(DerivedPair::values)
            .unwrap_or_default();
        let out = match self.series {
            Series::PriceReference => FormOutput::PriceReference(
                PriceReference::new(&self.date, &self.label, first, second, dependent)
                    .validated()?,
            ),
            Series::ExchangeRate => FormOutput::ExchangeRate(
                ExchangeRate::new(&self.date, &self.label, first, second, dependent)
                    .validated()?,
            ),
            Series::NationalVolume => FormOutput::NationalVolume(
                NationalVolume::new(&self.date, &self.label, to_nullable(&self.volume))
                    .validated()?,
            ),
            Series::ProvincialVolume => {
                let mut rec = ProvincialVolume::new(
                    &self.date,
                    &self.label,
                    &self.province,
                    to_nullable(&self.volume),
                    to_nullable(&self.quota),
                );
                rec.region_office = Some(self.region.clone());
                FormOutput::ProvincialVolume(rec.validated()?)
            }
            Series::Simulation => return Err(ValidationError::ReadOnly(self.series.label())),
        };
        Ok(out)
    }
}

impl From<&PriceReference> for Form {
    fn from(rec: &PriceReference) -> Self {
        let pair = DerivedPair::from_values(BLENDED_PRICE, rec.propane, rec.butane, rec.blended);
        Self {
            editing_id: rec.id,
            date: rec.date.clone(),
            label: rec.month.clone(),
            ..Self::blank(Series::PriceReference, Some(pair))
        }
    }
}

impl From<&ExchangeRate> for Form {
    fn from(rec: &ExchangeRate) -> Self {
        let pair = DerivedPair::from_values(MID_RATE, rec.buy, rec.sell, rec.mid);
        Self {
            editing_id: rec.id,
            date: rec.date.clone(),
            label: rec.period.clone(),
            ..Self::blank(Series::ExchangeRate, Some(pair))
        }
    }
}

impl From<&NationalVolume> for Form {
    fn from(rec: &NationalVolume) -> Self {
        Self {
            editing_id: rec.id,
            date: rec.date.clone(),
            label: rec.month.clone(),
            volume: text(rec.volume),
            ..Self::blank(Series::NationalVolume, None)
        }
    }
}

impl From<&ProvincialVolume> for Form {
    fn from(rec: &ProvincialVolume) -> Self {
        Self {
            editing_id: rec.id,
            date: rec.date.clone(),
            label: rec.month.clone(),
            province: rec.province.clone(),
            region: rec.region_office.clone().unwrap_or_default(),
            volume: text(rec.volume),
            quota: text(rec.quota),
            ..Self::blank(Series::ProvincialVolume, None)
        }
    }
}

impl FormOutput {
    pub(crate) fn series(&self) -> Series {
        match self {
            Self::PriceReference(_) => Series::PriceReference,
            Self::ExchangeRate(_) => Series::ExchangeRate,
            Self::NationalVolume(_) => Series::NationalVolume,
            Self::ProvincialVolume(_) => Series::ProvincialVolume,
        }
    }

    /// Inserts a new row, or replaces row `id`. Returns the row id, or
    /// `None` when the row to replace no longer exists.
    pub(crate) fn save(&self, db: &Database, id: Option<i64>, actor: &str) -> Result<Option<i64>> {
        match self {
            Self::PriceReference(rec) => store(db, rec, id, actor),
            Self::ExchangeRate(rec) => store(db, rec, id, actor),
            Self::NationalVolume(rec) => store(db, rec, id, actor),
            Self::ProvincialVolume(rec) => store(db, rec, id, actor),
        }
    }
}

fn store<T: FactTable>(db: &Database, rec: &T, id: Option<i64>, actor: &str) -> Result<Option<i64>> {
    match id {
        None => T::insert(db, rec, actor).map(Some),
        Some(id) => Ok(T::update(db, id, rec, actor)?.then_some(id)),
    }
}
