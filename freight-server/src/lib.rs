//! Freight train lookup server.
//!
//! Serves Korail freight train schedules and freight stations from
//! bundled reference files, and resolves a train's live position by
//! scraping the Korail logistics site with a fallback API.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod korail;
pub mod live;
pub mod nxlogis;
pub mod web;
