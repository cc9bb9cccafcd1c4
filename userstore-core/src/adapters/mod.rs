//! Adapter implementations
//!
//! - DuckDB for storage (one connection per call)
//! - SQL statement text, including the interpolating builders

pub mod duckdb;
pub mod sql;
