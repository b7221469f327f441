pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod schedule;
pub mod session_date;
