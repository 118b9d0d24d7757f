mod coordinates;
mod driver;
mod member;
mod place;
mod quote;
mod route;
mod tariff;

pub use coordinates::Coordinates;
pub use driver::{DriverState, Status as DriverStatus};
pub use member::{Member, Role};
pub use place::{Place, PlaceSuggestion, DEFAULT_PLACE_LABEL};
pub use quote::Quote;
pub use route::Route;
pub use tariff::{current_hour, TariffPeriod, TariffTable, DAY_START_HOUR, NIGHT_START_HOUR};
