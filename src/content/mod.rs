//! Game content: power, boss and level tables.
//!
//! Everything here is immutable for the process lifetime. The tables are
//! inserted as resources so tests (and future content packs) can swap them.
//! Which powers the player *owns* is not content; see `plugins::progression`.

pub mod bosses;
pub mod error;
pub mod levels;
pub mod powers;

pub use error::ContentError;

#[cfg(test)]
mod tests;
