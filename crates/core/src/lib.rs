//! Pure domain logic for health-facility budget planning.
//!
//! Everything in this crate is synchronous, stateless, and side-effect-free:
//! immutable lookup tables ([`locations`], [`catalog`]) and pure functions
//! over caller-supplied value objects ([`budget`], [`plan`]). Persistence
//! and HTTP concerns live in the `fbp-db` and `fbp-api` crates.

pub mod budget;
pub mod catalog;
pub mod error;
pub mod facility;
pub mod fiscal_year;
pub mod locations;
pub mod plan;
pub mod program;
pub mod types;
