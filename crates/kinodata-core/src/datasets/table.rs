use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    #[error("Invalid table layout: {reason}")]
    InvalidLayout { reason: String },

    #[error("Header row is too short: expected at least {expected} columns, found {found}")]
    ShortHeader { expected: usize, found: usize },

    #[error("Row at line {line} is too short: expected at least {expected} columns, found {found}")]
    ShortRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Row at line {line} has an empty SMILES cell")]
    EmptySmiles { line: u64 },

    #[error("Value for kinase '{kinase}' at line {line} is not a number: {source}")]
    BadValue {
        line: u64,
        kinase: String,
        source: std::num::ParseFloatError,
    },

    #[error("Duplicate ligand SMILES '{smiles}' at line {line}")]
    DuplicateLigand { smiles: String, line: u64 },

    #[error("Duplicate kinase column '{name}' in header")]
    DuplicateKinase { name: String },
}

/// Positional layout of a KINOMEscan-format data sheet.
///
/// The defaults match the published PKIS2 sheet: ligand SMILES in column 3,
/// kinase columns spanning 7..413 (half-open, zero-based). Other sheets in
/// the same family shift these indices; they are configuration, not code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TableLayout {
    #[serde(default = "TableLayout::default_smiles_column")]
    pub smiles_column: usize,
    #[serde(default = "TableLayout::default_kinase_start")]
    pub kinase_start: usize,
    #[serde(default = "TableLayout::default_kinase_end")]
    pub kinase_end: usize,
}

impl TableLayout {
    fn default_smiles_column() -> usize {
        3
    }

    fn default_kinase_start() -> usize {
        7
    }

    fn default_kinase_end() -> usize {
        413
    }

    fn validate(&self) -> Result<(), TableError> {
        if self.kinase_start >= self.kinase_end {
            return Err(TableError::InvalidLayout {
                reason: format!(
                    "kinase column range {}..{} is empty",
                    self.kinase_start, self.kinase_end
                ),
            });
        }
        if (self.kinase_start..self.kinase_end).contains(&self.smiles_column) {
            return Err(TableError::InvalidLayout {
                reason: format!(
                    "SMILES column {} falls inside the kinase range {}..{}",
                    self.smiles_column, self.kinase_start, self.kinase_end
                ),
            });
        }
        Ok(())
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            smiles_column: Self::default_smiles_column(),
            kinase_start: Self::default_kinase_start(),
            kinase_end: Self::default_kinase_end(),
        }
    }
}

/// The raw percentage-displacement matrix: SMILES-keyed rows, kinase-keyed
/// columns. Row and column keys are unique; duplicates fail the load.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    kinases: Vec<String>,
    ligands: Vec<String>,
    values: Vec<Vec<f64>>,
    kinase_index: HashMap<String, usize>,
    ligand_index: HashMap<String, usize>,
}

impl MeasurementTable {
    /// Loads a fixed-layout CSV sheet.
    ///
    /// The first record is treated as the header; kinase names are taken
    /// from the layout's column range. Every data row must provide a
    /// non-empty SMILES cell and a finite number in every kinase column.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_csv(path: &Path, layout: &TableLayout) -> Result<Self, TableError> {
        layout.validate()?;

        let csv_err = |e: csv::Error| TableError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(csv_err)?;

        let headers = reader.headers().map_err(csv_err)?.clone();
        if headers.len() < layout.kinase_end {
            return Err(TableError::ShortHeader {
                expected: layout.kinase_end,
                found: headers.len(),
            });
        }

        let mut kinases = Vec::with_capacity(layout.kinase_end - layout.kinase_start);
        let mut kinase_index = HashMap::new();
        for column in layout.kinase_start..layout.kinase_end {
            let name = headers[column].trim().to_string();
            if kinase_index.insert(name.clone(), kinases.len()).is_some() {
                return Err(TableError::DuplicateKinase { name });
            }
            kinases.push(name);
        }

        let mut ligands = Vec::new();
        let mut ligand_index = HashMap::new();
        let mut values = Vec::new();

        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            let line = record.position().map_or(0, |p| p.line());

            let required = layout.kinase_end.max(layout.smiles_column + 1);
            if record.len() < required {
                return Err(TableError::ShortRow {
                    line,
                    expected: required,
                    found: record.len(),
                });
            }

            let smiles = record[layout.smiles_column].trim().to_string();
            if smiles.is_empty() {
                return Err(TableError::EmptySmiles { line });
            }
            if ligand_index.insert(smiles.clone(), ligands.len()).is_some() {
                return Err(TableError::DuplicateLigand { smiles, line });
            }

            let mut row = Vec::with_capacity(kinases.len());
            for (offset, column) in (layout.kinase_start..layout.kinase_end).enumerate() {
                let cell = record[column].trim();
                let value: f64 = cell.parse().map_err(|e| TableError::BadValue {
                    line,
                    kinase: kinases[offset].clone(),
                    source: e,
                })?;
                row.push(value);
            }

            ligands.push(smiles);
            values.push(row);
        }

        debug!(
            kinases = kinases.len(),
            ligands = ligands.len(),
            "Loaded measurement table"
        );

        Ok(Self {
            kinases,
            ligands,
            values,
            kinase_index,
            ligand_index,
        })
    }

    /// Kinase names in column order.
    pub fn kinases(&self) -> &[String] {
        &self.kinases
    }

    /// Ligand SMILES in row order.
    pub fn ligands(&self) -> &[String] {
        &self.ligands
    }

    pub fn kinase_count(&self) -> usize {
        self.kinases.len()
    }

    pub fn ligand_count(&self) -> usize {
        self.ligands.len()
    }

    /// The cell value for a (kinase, SMILES) pair, if both keys exist.
    pub fn value(&self, kinase: &str, smiles: &str) -> Option<f64> {
        let column = *self.kinase_index.get(kinase)?;
        let row = *self.ligand_index.get(smiles)?;
        Some(self.values[row][column])
    }

    pub fn contains_kinase(&self, kinase: &str) -> bool {
        self.kinase_index.contains_key(kinase)
    }

    pub fn contains_ligand(&self, smiles: &str) -> bool {
        self.ligand_index.contains_key(smiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    /// Miniature sheet in the PKIS2 shape: three junk columns, SMILES at
    /// column 3, three more junk columns, then two kinase columns.
    fn small_layout() -> TableLayout {
        TableLayout {
            smiles_column: 3,
            kinase_start: 7,
            kinase_end: 9,
        }
    }

    fn write_sheet(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", contents).unwrap();
        (dir, path)
    }

    const VALID_SHEET: &str = "\
id,name,lot,Smiles,plate,well,conc,ABL2,AAK1
1,cmpd-1,a,CCO,p1,A1,1.0,12.5,0.0
2,cmpd-2,a,c1ccccc1,p1,A2,1.0,99.1,-4.0
";

    #[test]
    fn from_csv_loads_keys_and_values() {
        let (_dir, path) = write_sheet(VALID_SHEET);
        let table = MeasurementTable::from_csv(&path, &small_layout()).unwrap();

        assert_eq!(table.kinases(), &["ABL2".to_string(), "AAK1".to_string()]);
        assert_eq!(
            table.ligands(),
            &["CCO".to_string(), "c1ccccc1".to_string()]
        );
        assert_eq!(table.value("ABL2", "CCO"), Some(12.5));
        assert_eq!(table.value("AAK1", "c1ccccc1"), Some(-4.0));
        assert_eq!(table.value("ABL2", "missing"), None);
    }

    #[test]
    fn from_csv_fails_on_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = MeasurementTable::from_csv(&path, &small_layout()).unwrap_err();
        assert!(matches!(err, TableError::Csv { .. }));
    }

    #[test]
    fn from_csv_fails_when_columns_shift() {
        let (_dir, path) = write_sheet("id,Smiles,ABL2\n1,CCO,12.5\n");
        let err = MeasurementTable::from_csv(&path, &small_layout()).unwrap_err();
        assert!(matches!(err, TableError::ShortHeader { .. }));
    }

    #[test]
    fn from_csv_fails_on_non_numeric_cell() {
        let sheet = "\
id,name,lot,Smiles,plate,well,conc,ABL2,AAK1
1,cmpd-1,a,CCO,p1,A1,1.0,12.5,n/a
";
        let (_dir, path) = write_sheet(sheet);
        let err = MeasurementTable::from_csv(&path, &small_layout()).unwrap_err();
        match err {
            TableError::BadValue { line, kinase, .. } => {
                assert_eq!(line, 2);
                assert_eq!(kinase, "AAK1");
            }
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn from_csv_fails_on_duplicate_smiles() {
        let sheet = "\
id,name,lot,Smiles,plate,well,conc,ABL2,AAK1
1,cmpd-1,a,CCO,p1,A1,1.0,12.5,0.0
2,cmpd-2,a,CCO,p1,A2,1.0,3.0,4.0
";
        let (_dir, path) = write_sheet(sheet);
        let err = MeasurementTable::from_csv(&path, &small_layout()).unwrap_err();
        assert!(matches!(err, TableError::DuplicateLigand { .. }));
    }

    #[test]
    fn from_csv_fails_on_duplicate_kinase_column() {
        let sheet = "\
id,name,lot,Smiles,plate,well,conc,ABL2,ABL2
1,cmpd-1,a,CCO,p1,A1,1.0,12.5,0.0
";
        let (_dir, path) = write_sheet(sheet);
        let err = MeasurementTable::from_csv(&path, &small_layout()).unwrap_err();
        assert!(matches!(err, TableError::DuplicateKinase { .. }));
    }

    #[test]
    fn from_csv_fails_on_empty_smiles_cell() {
        let sheet = "\
id,name,lot,Smiles,plate,well,conc,ABL2,AAK1
1,cmpd-1,a,,p1,A1,1.0,12.5,0.0
";
        let (_dir, path) = write_sheet(sheet);
        let err = MeasurementTable::from_csv(&path, &small_layout()).unwrap_err();
        assert!(matches!(err, TableError::EmptySmiles { line: 2 }));
    }

    #[test]
    fn layout_validation_rejects_overlapping_columns() {
        let layout = TableLayout {
            smiles_column: 8,
            kinase_start: 7,
            kinase_end: 9,
        };
        assert!(matches!(
            layout.validate(),
            Err(TableError::InvalidLayout { .. })
        ));

        let layout = TableLayout {
            smiles_column: 3,
            kinase_start: 9,
            kinase_end: 9,
        };
        assert!(matches!(
            layout.validate(),
            Err(TableError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn default_layout_matches_pkis2_sheet() {
        let layout = TableLayout::default();
        assert_eq!(layout.smiles_column, 3);
        assert_eq!(layout.kinase_start, 7);
        assert_eq!(layout.kinase_end, 413);
    }
}
