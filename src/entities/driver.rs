use oso::PolarClass;
use serde::{Deserialize, Serialize};

use crate::entities::TariffTable;
use crate::error::{invalid_input_error, Error};

/// The single driver's status, tariffs and contact number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, PolarClass)]
pub struct DriverState {
    pub status: Status,
    pub tariffs: TariffTable,
    pub phone_number: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Available,
    Busy,
    OffDuty,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Liber",
            Self::Busy => "Ocupat",
            Self::OffDuty => "Nu lucrează azi",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Available => "Șoferul este disponibil",
            Self::Busy => "Șoferul este într-o cursă",
            Self::OffDuty => "Șoferul nu este disponibil astăzi",
        }
    }
}

impl Default for DriverState {
    fn default() -> Self {
        Self {
            status: Status::Available,
            tariffs: TariffTable::default(),
            phone_number: "0755123456".into(),
        }
    }
}

impl DriverState {
    pub fn is_available(&self) -> bool {
        matches!(self.status, Status::Available)
    }

    #[tracing::instrument]
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    #[tracing::instrument]
    pub fn update_tariffs(&mut self, day_rate: &str, night_rate: &str) -> Result<(), Error> {
        self.tariffs = TariffTable::parse(day_rate, night_rate)?;

        Ok(())
    }

    #[tracing::instrument]
    pub fn update_phone_number(&mut self, phone_number: &str) -> Result<(), Error> {
        let phone_number = phone_number.trim();
        let digits = phone_number.strip_prefix('+').unwrap_or(phone_number);

        let is_valid = digits.chars().any(|c| c.is_ascii_digit())
            && digits.chars().all(|c| c.is_ascii_digit() || c == ' ');

        if !is_valid {
            return Err(invalid_input_error());
        }

        self.phone_number = phone_number.into();

        Ok(())
    }
}
