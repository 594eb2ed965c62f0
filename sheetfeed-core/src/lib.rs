#![doc = "sheetfeed-core: core logic library for sheetfeed."]

//! This crate contains the whole pipeline for publishing a local CSV file
//! to a remote spreadsheet, archiving the source file to remote storage and
//! recording an audit trail of each run.
//!
//! Remote services are reached only through the capability traits in
//! [`contract`]; the CLI crate supplies real HTTP-backed implementations,
//! tests supply mocks.

pub mod archive;
pub mod audit;
pub mod config;
pub mod contract;
pub mod publish;
pub mod reader;
pub mod run;
pub mod trace;
