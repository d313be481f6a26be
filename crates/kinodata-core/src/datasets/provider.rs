use super::config::{ConfigError, ProviderConfig};
use super::mapper::{KinomeScanMapper, MapperError};
use super::table::{MeasurementTable, TableError};
use crate::core::complex::ProteinLigandComplex;
use crate::core::conditions::{AssayConditions, ConditionsError};
use crate::core::ligand::{Ligand, LigandError};
use crate::core::measurements::{MeasurementError, PercentDisplacement};
use crate::core::protein::{AminoAcidSequence, SequenceError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to load measurement table: {0}")]
    Table(#[from] TableError),

    #[error("Failed to resolve kinase name: {0}")]
    Mapper(#[from] MapperError),

    #[error("Invalid assay conditions: {0}")]
    Conditions(#[from] ConditionsError),

    #[error("Invalid provider configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid sequence for kinase '{name}': {source}")]
    Protein {
        name: String,
        source: SequenceError,
    },

    #[error("Invalid SMILES '{smiles}': {source}")]
    Ligand { smiles: String, source: LigandError },

    #[error("Invalid measurement value: {0}")]
    Measurement(#[from] MeasurementError),

    #[error("No measurement for kinase '{kinase}' and ligand '{smiles}' in the table")]
    MissingEntry { kinase: String, smiles: String },
}

/// Resolves a kinase display name to a validated protein entity.
fn build_protein(
    mapper: &KinomeScanMapper,
    name: &str,
) -> Result<AminoAcidSequence, ProviderError> {
    let sequence = mapper.sequence_for_name(name)?;
    AminoAcidSequence::new(name, sequence).map_err(|e| ProviderError::Protein {
        name: name.to_string(),
        source: e,
    })
}

fn build_ligand(smiles: &str) -> Result<Ligand, ProviderError> {
    Ligand::from_smiles(smiles).map_err(|e| ProviderError::Ligand {
        smiles: smiles.to_string(),
        source: e,
    })
}

fn load_inputs(
    config: &ProviderConfig,
) -> Result<(MeasurementTable, KinomeScanMapper, AssayConditions), ProviderError> {
    let table = MeasurementTable::from_csv(&config.data_sheet, &config.layout)?;
    let mapper = KinomeScanMapper::from_csv(&config.reference_sheet)?;
    let conditions = AssayConditions::new(config.ph)?;
    Ok((table, mapper, conditions))
}

/// Materializes the complete object graph at construction time.
///
/// Every kinase column becomes one protein, every SMILES row one ligand,
/// and every (row, column) cell one measurement — the full N x M cross
/// product, built before the constructor returns. Proteins and ligands are
/// reference-counted so all measurements over the same entity share one
/// instance.
#[derive(Debug)]
pub struct EagerDatasetProvider {
    conditions: AssayConditions,
    kinases: Vec<Rc<AminoAcidSequence>>,
    ligands: Vec<Rc<Ligand>>,
    measurements: Vec<PercentDisplacement>,
    kinase_index: HashMap<String, usize>,
    ligand_index: HashMap<String, usize>,
}

impl EagerDatasetProvider {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let (table, mapper, conditions) = load_inputs(config)?;
        Self::from_table(&table, &mapper, conditions)
    }

    #[instrument(skip_all, name = "eager_materialization")]
    pub fn from_table(
        table: &MeasurementTable,
        mapper: &KinomeScanMapper,
        conditions: AssayConditions,
    ) -> Result<Self, ProviderError> {
        let mut kinases = Vec::with_capacity(table.kinase_count());
        let mut kinase_index = HashMap::with_capacity(table.kinase_count());
        for name in table.kinases() {
            kinase_index.insert(name.clone(), kinases.len());
            kinases.push(Rc::new(build_protein(mapper, name)?));
        }

        let mut ligands = Vec::with_capacity(table.ligand_count());
        let mut ligand_index = HashMap::with_capacity(table.ligand_count());
        for smiles in table.ligands() {
            ligand_index.insert(smiles.clone(), ligands.len());
            ligands.push(Rc::new(build_ligand(smiles)?));
        }

        // Row-major: measurement for (row, column) sits at row * M + column.
        let mut measurements = Vec::with_capacity(kinases.len() * ligands.len());
        for (row, smiles) in table.ligands().iter().enumerate() {
            for (column, name) in table.kinases().iter().enumerate() {
                let value =
                    table
                        .value(name, smiles)
                        .ok_or_else(|| ProviderError::MissingEntry {
                            kinase: name.clone(),
                            smiles: smiles.clone(),
                        })?;
                let complex =
                    ProteinLigandComplex::new(kinases[column].clone(), ligands[row].clone());
                measurements.push(PercentDisplacement::new(value, conditions, complex)?);
            }
        }

        info!(
            kinases = kinases.len(),
            ligands = ligands.len(),
            measurements = measurements.len(),
            "Materialized dataset eagerly"
        );

        Ok(Self {
            conditions,
            kinases,
            ligands,
            measurements,
            kinase_index,
            ligand_index,
        })
    }

    /// All proteins, in the table's column order.
    pub fn kinases(&self) -> &[Rc<AminoAcidSequence>] {
        &self.kinases
    }

    /// All ligands, in the table's row order.
    pub fn ligands(&self) -> &[Rc<Ligand>] {
        &self.ligands
    }

    /// All measurements, row-major over (ligand, kinase).
    pub fn measurements(&self) -> &[PercentDisplacement] {
        &self.measurements
    }

    pub fn kinase(&self, name: &str) -> Option<&Rc<AminoAcidSequence>> {
        self.kinase_index.get(name).map(|&i| &self.kinases[i])
    }

    pub fn ligand(&self, smiles: &str) -> Option<&Rc<Ligand>> {
        self.ligand_index.get(smiles).map(|&i| &self.ligands[i])
    }

    pub fn measurement(&self, kinase: &str, smiles: &str) -> Option<&PercentDisplacement> {
        let column = *self.kinase_index.get(kinase)?;
        let row = *self.ligand_index.get(smiles)?;
        self.measurements.get(row * self.kinases.len() + column)
    }

    pub fn conditions(&self) -> &AssayConditions {
        &self.conditions
    }
}

/// Materializes entities on first lookup and memoizes them.
///
/// Three caches — proteins by kinase name, ligands by SMILES, measurements
/// by (name, SMILES) pair — each guarantee at most one construction per
/// distinct key for the life of the provider: two lookups of the same key
/// return the identical `Rc` (observable via [`Rc::ptr_eq`]). There is no
/// eviction. The caches use `RefCell` and are deliberately not `Sync`;
/// loading is a single-threaded, synchronous affair.
#[derive(Debug)]
pub struct LazyDatasetProvider {
    table: MeasurementTable,
    mapper: KinomeScanMapper,
    conditions: AssayConditions,
    kinases: RefCell<HashMap<String, Rc<AminoAcidSequence>>>,
    ligands: RefCell<HashMap<String, Rc<Ligand>>>,
    measurements: RefCell<HashMap<(String, String), Rc<PercentDisplacement>>>,
}

impl LazyDatasetProvider {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let (table, mapper, conditions) = load_inputs(config)?;
        Ok(Self::new(table, mapper, conditions))
    }

    pub fn new(
        table: MeasurementTable,
        mapper: KinomeScanMapper,
        conditions: AssayConditions,
    ) -> Self {
        info!(
            kinases = table.kinase_count(),
            ligands = table.ligand_count(),
            "Prepared lazy dataset provider"
        );
        Self {
            table,
            mapper,
            conditions,
            kinases: RefCell::new(HashMap::new()),
            ligands: RefCell::new(HashMap::new()),
            measurements: RefCell::new(HashMap::new()),
        }
    }

    /// Kinase names present in the table, in column order.
    pub fn available_kinases(&self) -> &[String] {
        self.table.kinases()
    }

    /// Ligand SMILES present in the table, in row order.
    pub fn available_ligands(&self) -> &[String] {
        self.table.ligands()
    }

    pub fn conditions(&self) -> &AssayConditions {
        &self.conditions
    }

    /// The protein for a kinase display name, built on first lookup.
    ///
    /// Any name the reference table can resolve is accepted, whether or not
    /// it appears in the measurement table; measurements additionally
    /// require a table cell.
    pub fn kinase(&self, name: &str) -> Result<Rc<AminoAcidSequence>, ProviderError> {
        if let Some(hit) = self.kinases.borrow().get(name) {
            return Ok(hit.clone());
        }
        debug!(kinase = name, "Materializing protein");
        let built = Rc::new(build_protein(&self.mapper, name)?);
        self.kinases
            .borrow_mut()
            .insert(name.to_string(), built.clone());
        Ok(built)
    }

    /// The ligand for a SMILES string, built on first lookup.
    pub fn ligand(&self, smiles: &str) -> Result<Rc<Ligand>, ProviderError> {
        if let Some(hit) = self.ligands.borrow().get(smiles) {
            return Ok(hit.clone());
        }
        debug!(smiles, "Materializing ligand");
        let built = Rc::new(build_ligand(smiles)?);
        self.ligands
            .borrow_mut()
            .insert(smiles.to_string(), built.clone());
        Ok(built)
    }

    /// The measurement for a (kinase name, SMILES) pair, built on first
    /// lookup. Reuses the memoized protein and ligand, so the measurement
    /// shares instances with direct [`Self::kinase`]/[`Self::ligand`]
    /// lookups of the same keys.
    pub fn measurement(
        &self,
        name: &str,
        smiles: &str,
    ) -> Result<Rc<PercentDisplacement>, ProviderError> {
        let key = (name.to_string(), smiles.to_string());
        if let Some(hit) = self.measurements.borrow().get(&key) {
            return Ok(hit.clone());
        }

        let value = self
            .table
            .value(name, smiles)
            .ok_or_else(|| ProviderError::MissingEntry {
                kinase: name.to_string(),
                smiles: smiles.to_string(),
            })?;
        let protein = self.kinase(name)?;
        let ligand = self.ligand(smiles)?;

        debug!(kinase = name, smiles, value, "Materializing measurement");
        let complex = ProteinLigandComplex::new(protein, ligand);
        let built = Rc::new(PercentDisplacement::new(value, self.conditions, complex)?);
        self.measurements.borrow_mut().insert(key, built.clone());
        Ok(built)
    }

    /// Number of proteins materialized so far.
    pub fn materialized_kinases(&self) -> usize {
        self.kinases.borrow().len()
    }

    /// Number of ligands materialized so far.
    pub fn materialized_ligands(&self) -> usize {
        self.ligands.borrow().len()
    }

    /// Number of measurements materialized so far.
    pub fn materialized_measurements(&self) -> usize {
        self.measurements.borrow().len()
    }
}
