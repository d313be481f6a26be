use super::ligand::Ligand;
use super::protein::AminoAcidSequence;
use std::rc::Rc;

/// One protein paired with one ligand.
///
/// Components are reference-counted so every measurement over the same
/// protein or ligand shares a single materialized instance; the providers
/// in [`crate::datasets::provider`] rely on this to keep the N x M cross
/// product cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinLigandComplex {
    protein: Rc<AminoAcidSequence>,
    ligand: Rc<Ligand>,
}

impl ProteinLigandComplex {
    pub fn new(protein: Rc<AminoAcidSequence>, ligand: Rc<Ligand>) -> Self {
        Self { protein, ligand }
    }

    pub fn protein(&self) -> &Rc<AminoAcidSequence> {
        &self.protein
    }

    pub fn ligand(&self) -> &Rc<Ligand> {
        &self.ligand
    }
}

impl std::fmt::Display for ProteinLigandComplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.protein.name(), self.ligand.smiles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_shares_components_by_reference() {
        let protein = Rc::new(AminoAcidSequence::new("ABL2", "MGSKV").unwrap());
        let ligand = Rc::new(Ligand::from_smiles("CCO").unwrap());

        let first = ProteinLigandComplex::new(protein.clone(), ligand.clone());
        let second = ProteinLigandComplex::new(protein.clone(), ligand.clone());

        assert!(Rc::ptr_eq(first.protein(), second.protein()));
        assert!(Rc::ptr_eq(first.ligand(), second.ligand()));
    }
}
