pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod movements;
pub mod products;
