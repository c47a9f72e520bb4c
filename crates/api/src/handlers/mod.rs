pub mod clock;
pub mod contact;
pub mod inspection;
pub mod property;
