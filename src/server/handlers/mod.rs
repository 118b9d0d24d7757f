pub mod driver;
pub mod places;
pub mod quotes;
pub mod routes;
pub mod users;
