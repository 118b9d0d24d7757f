use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub path: Vec<Coordinates>,
    pub traffic_description: String,
}

impl Route {
    pub fn distance_label(&self) -> String {
        format!("{:.1} km", self.distance_km)
    }

    /// Travel time the way the app shows it, e.g. "1 oră și 5 minute".
    pub fn eta_label(&self) -> String {
        let total_minutes = self.duration_minutes.round() as u64;
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;

        let minute_text = if minutes == 1 { "minut" } else { "minute" };

        if hours == 0 {
            return format!("{} {}", minutes, minute_text);
        }

        let hour_text = if hours == 1 { "oră" } else { "ore" };

        if minutes > 0 {
            format!("{} {} și {} {}", hours, hour_text, minutes, minute_text)
        } else {
            format!("{} {}", hours, hour_text)
        }
    }
}
