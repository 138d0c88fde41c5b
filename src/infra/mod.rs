//! Infrastructure adapters: metadata capture, preference storage, telemetry.

pub mod error;
pub mod fragments;
pub mod storage;
pub mod telemetry;
