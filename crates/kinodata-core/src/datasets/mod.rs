//! # Dataset Loading Layer
//!
//! Turns raw KINOMEscan-format spreadsheets into the domain model:
//!
//! - [`table`] - fixed-layout CSV loader for the percentage-displacement
//!   matrix (SMILES rows x kinase columns)
//! - [`mapper`] - kinase display name to amino-acid construct sequence,
//!   backed by a reference CSV
//! - [`config`] - TOML-backed provider configuration with a builder
//! - [`provider`] - eager and lazy dataset providers that materialize the
//!   object graph from a loaded table and mapper

pub mod config;
pub mod mapper;
pub mod provider;
pub mod table;
