//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts (and full-replacement updates where the
//!   resource supports them)

pub mod category;
pub mod movement;
pub mod product;
pub mod session;
pub mod user;
