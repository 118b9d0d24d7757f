pub mod authorizor;
mod user;

pub use user::{AdminToken, User};
