//! Domain types shared by the DevBoard database and API crates.
//!
//! Nothing in here touches the database or HTTP; it only defines the
//! primitive aliases, the domain error and the project field rules.

pub mod error;
pub mod project;
pub mod types;
