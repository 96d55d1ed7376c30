//! Secondary live-status source: the nxlogis.kr train API.

mod client;
mod error;

pub use client::{DEFAULT_BASE_URL, NxLogisClient, NxLogisConfig};
pub use error::RemoteApiError;
