//! Live train status with primary/secondary fallback.
//!
//! A lookup first scrapes the Korail site. Only if that fails is the
//! nxlogis API asked, and only if both fail does the caller see an error.

mod resolver;
mod source;

pub use resolver::{ALL_SOURCES_FAILED, ResolveError, TrainInfo, TrainInfoResolver};
pub use source::{PrimarySource, SecondarySource};
