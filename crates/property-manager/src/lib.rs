//! Property and tenant management: an in-memory registry with occupancy tracking, the
//! storage collaborators it is synchronized with, and the ambient configuration, telemetry
//! and error plumbing shared by the console application.

pub mod config;
pub mod error;
pub mod import;
pub mod persistence;
pub mod registry;
pub mod session;
pub mod telemetry;
