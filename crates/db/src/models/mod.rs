//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` row struct, denormalized with the parent
//!   chain where the listing UI needs it
//! - A `Deserialize` input DTO mirroring the request body, lenient about
//!   missing fields and numeric strings
//! - A validated fields struct produced from the input DTO and bound by the
//!   repository

pub mod clock;
pub mod contact;
pub mod inspection;
pub mod property;
