//! hospdb - menu-driven client for a hospital appointment database
//!
//! Connects to PostgreSQL with one synchronous session and offers eight
//! operations: three inserts, appointment booking and four reports.

pub mod cli;
pub mod db;
pub mod hospital;
pub mod observability;
