//! # sleuth-loader
//!
//! Reads a headed CSV of personalities into a [`sleuth_store::CandidateStore`].
//! Columns may come in any order; unknown columns are ignored and missing
//! ones read as empty strings. Only `name` is required.

pub mod csv_loader;

pub use csv_loader::{load_csv, load_from_reader, load_records};
