//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Reads go through the
//! joined views so every returned record carries its parent chain.

pub mod clock_repo;
pub mod contact_repo;
pub mod inspection_repo;
pub mod property_repo;

pub use clock_repo::ClockRepo;
pub use contact_repo::ContactRepo;
pub use inspection_repo::InspectionRepo;
pub use property_repo::PropertyRepo;
