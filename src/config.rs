//! Configuration loader and schema types.
//!
//! Settings come from struct defaults, an optional TOML file and
//! `LONETRACK__`-prefixed environment variables, in increasing precedence.

mod load;
mod schema;

pub use load::state_dir;
pub use schema::*;

#[cfg(test)]
pub(crate) mod tests;
