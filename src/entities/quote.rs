use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Route, TariffPeriod, TariffTable};

/// Priced passenger→destination route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub route: Route,
    pub destination_address: String,
    pub tariff_period: TariffPeriod,
    pub rate: f64,
    pub price: f64,
    pub computed_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(route: Route, destination_address: String, tariffs: &TariffTable, hour: u32) -> Self {
        let tariff_period = TariffPeriod::at(hour);
        let rate = tariffs.rate(tariff_period);

        Self {
            price: route.distance_km * rate,
            route,
            destination_address,
            tariff_period,
            rate,
            computed_at: Utc::now(),
        }
    }

    pub fn price_label(&self) -> String {
        format!("{:.2} lei", self.price)
    }
}
