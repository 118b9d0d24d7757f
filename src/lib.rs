pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod polyline;
pub mod routing;
pub mod search;
pub mod server;

#[cfg(test)]
mod testing;
