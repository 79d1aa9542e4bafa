pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod ledger;
pub mod types;
