//! Codec for container resource limits (ulimits).
//!
//! Limits come in as `name=soft[:hard]` flag tokens or as structured config
//! values in several shapes, and always end up as a [`Ulimits`] collection
//! that can be merged, rendered back to flag text, or handed to the runtime
//! as [`RuntimeUlimit`] descriptors.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod resource;
pub mod text;
pub mod ulimit;
pub mod ulimits;
pub mod utils;
pub mod value;

pub use descriptor::{RuntimeUlimit, UlimitOpt};
pub use error::{Error, ParseError};
pub use ulimit::Ulimit;
pub use ulimits::{merge, Ulimits};
