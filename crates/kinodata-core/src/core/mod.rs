//! # Core Domain Models
//!
//! This module provides the validated value types that the rest of the
//! library cross-references: proteins, ligands, protein-ligand complexes,
//! assay conditions, and measurement records.
//!
//! ## Overview
//!
//! Every type here is constructed through a validating constructor and is
//! immutable afterward. The loading layer ([`crate::datasets`]) is the only
//! producer; consumers treat these as plain data.
//!
//! - **Protein representation** ([`protein`]) - validated one-letter
//!   amino-acid sequences with a display name
//! - **Ligand representation** ([`ligand`]) - chemical structures parsed
//!   from SMILES strings
//! - **Complexes** ([`complex`]) - one protein paired with one ligand,
//!   shared by reference counting
//! - **Assay conditions** ([`conditions`]) - the fixed experimental
//!   conditions a measurement was taken under
//! - **Measurements** ([`measurements`]) - a scalar assay readout bound to
//!   a complex and its conditions

pub mod complex;
pub mod conditions;
pub mod ligand;
pub mod measurements;
pub mod protein;
