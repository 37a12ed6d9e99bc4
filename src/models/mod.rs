mod exchange_rate;
mod national_volume;
mod price_reference;
mod provincial_volume;
mod series;
mod simulation;
mod user;

pub use exchange_rate::ExchangeRate;
pub use national_volume::NationalVolume;
pub use price_reference::PriceReference;
pub use provincial_volume::ProvincialVolume;
pub use series::Series;
pub use simulation::SimulationRow;
pub use user::User;

use chrono::NaiveDate;

/// Audit columns shared by every fact table. Never sent over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audit {
    pub created_by: String,
    pub created_at: String,
    pub updated_by: String,
    pub updated_at: String,
}

/// Anything that sits on the dashboard's date axis.
pub trait Dated {
    fn record_date(&self) -> &str;

    fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(self.record_date())
    }
}

/// Parses `YYYY-MM-DD`, optionally followed by a time part
/// (`2024-01-15T00:00:00.000Z`, `2024-01-15 08:00:00`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests;
