use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// First hour (inclusive) billed at the day rate.
pub const DAY_START_HOUR: u32 = 6;
/// First hour (inclusive) billed at the night rate.
pub const NIGHT_START_HOUR: u32 = 22;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffPeriod {
    Day,
    Night,
}

impl TariffPeriod {
    pub fn at(hour: u32) -> Self {
        if (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour) {
            Self::Day
        } else {
            Self::Night
        }
    }
}

/// Price per kilometer, in lei.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TariffTable {
    pub day_rate: f64,
    pub night_rate: f64,
}

impl Default for TariffTable {
    fn default() -> Self {
        Self {
            day_rate: 3.0,
            night_rate: 4.0,
        }
    }
}

impl TariffTable {
    pub fn new(day_rate: f64, night_rate: f64) -> Result<Self, Error> {
        Ok(Self {
            day_rate: validate_rate(day_rate)?,
            night_rate: validate_rate(night_rate)?,
        })
    }

    /// Parses the free-text rates typed in the admin view. Accepts either `.`
    /// or `,` as the decimal separator.
    pub fn parse(day_rate: &str, night_rate: &str) -> Result<Self, Error> {
        Self::new(parse_rate(day_rate)?, parse_rate(night_rate)?)
    }

    pub fn rate(&self, period: TariffPeriod) -> f64 {
        match period {
            TariffPeriod::Day => self.day_rate,
            TariffPeriod::Night => self.night_rate,
        }
    }

    pub fn fare_at(&self, distance_km: f64, hour: u32) -> f64 {
        distance_km * self.rate(TariffPeriod::at(hour))
    }

    pub fn fare_now(&self, distance_km: f64) -> f64 {
        self.fare_at(distance_km, current_hour())
    }
}

/// Local wall-clock hour.
pub fn current_hour() -> u32 {
    Local::now().hour()
}

fn parse_rate(text: &str) -> Result<f64, Error> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| invalid_input_error())
}

fn validate_rate(rate: f64) -> Result<f64, Error> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(invalid_input_error());
    }

    Ok(rate)
}
