//! # KinoData Core Library
//!
//! A library for ingesting kinase-inhibitor bioassay datasets (KINOMEscan
//! percentage-displacement spreadsheets) and materializing them as
//! cross-referenced, in-memory domain objects ready for downstream
//! machine-learning featurization.
//!
//! ## Architectural Philosophy
//!
//! The library is designed as two strictly separated layers:
//!
//! - **[`core`]: The Domain Models.** Contains stateless, validated value
//!   types: amino-acid sequences, SMILES-derived ligand structures,
//!   protein-ligand complexes, assay conditions, and measurement records.
//!   Nothing in this layer knows where data comes from.
//!
//! - **[`datasets`]: The Loading Layer.** This stateful layer turns a raw
//!   spreadsheet into the domain model: a fixed-layout CSV loader
//!   (`MeasurementTable`), a kinase-name-to-sequence mapper
//!   (`KinomeScanMapper`), TOML-backed provider configuration, and the two
//!   dataset providers — an eager one that materializes the full
//!   kinase x ligand cross product up front, and a lazy one that memoizes
//!   each entity on first lookup and reuses the same instance thereafter.
//!
//! ## Example
//!
//! ```no_run
//! use kinodata::datasets::config::ProviderConfig;
//! use kinodata::datasets::provider::LazyDatasetProvider;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProviderConfig::load("pkis2.toml".as_ref())?;
//! let provider = LazyDatasetProvider::from_config(&config)?;
//!
//! let kinase = provider.kinase("ABL2")?;
//! let smiles = provider.available_ligands()[0].clone();
//! let measurement = provider.measurement("ABL2", &smiles)?;
//! println!(
//!     "% displacement for kinase={} and ligand={} is {}",
//!     kinase.name(),
//!     smiles,
//!     measurement.value()
//! );
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod datasets;
