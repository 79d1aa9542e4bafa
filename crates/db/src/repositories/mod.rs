//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. [`LedgerRepo`] is the exception
//! in shape: it owns a transaction for the duration of one movement.

pub mod category_repo;
pub mod ledger_repo;
pub mod movement_repo;
pub mod product_repo;
pub mod session_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use ledger_repo::{LedgerRepo, PgLedgerStore};
pub use movement_repo::MovementRepo;
pub use product_repo::ProductRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
