//! Preprocessing of network-device power/throughput test logs into
//! analysis-ready tables.
//!
//! Flow per device: `rawlog` reads the file, `columns` locates fields,
//! `events` extracts the phase timeline, `model` aggregates per phase and
//! `render` writes the tables. `pipeline` ties it together for a batch.

pub mod columns;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod model;
pub mod pipeline;
pub mod rawlog;
pub mod render;

pub type Result<T> = anyhow::Result<T>;
