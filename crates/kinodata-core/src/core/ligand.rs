use std::collections::HashMap;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// Errors produced while parsing a SMILES string.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LigandError {
    #[error("SMILES string is empty")]
    Empty,

    #[error("Unexpected character '{character}' at position {position} in SMILES")]
    UnexpectedCharacter { position: usize, character: char },

    #[error("Bond symbol at position {position} has no preceding atom")]
    BondWithoutAtom { position: usize },

    #[error("Closing parenthesis at position {position} does not match an open branch")]
    UnmatchedBranchClose { position: usize },

    #[error("SMILES ends with {count} unclosed branch(es)")]
    UnclosedBranch { count: usize },

    #[error("Ring-bond label {label} is never closed")]
    UnclosedRingBond { label: u32 },

    #[error("Ring-bond label {label} at position {position} closes onto its own atom")]
    SelfRingBond { label: u32, position: usize },

    #[error(
        "Ring-bond label {label} at position {position} closes with a bond that contradicts its opening"
    )]
    ConflictingRingBond { label: u32, position: usize },

    #[error("Bracket atom starting at position {position} is malformed")]
    MalformedBracketAtom { position: usize },

    #[error("SMILES ends with a dangling bond symbol")]
    TrailingBond,
}

/// Covalent bond classification as written in SMILES.
///
/// Stereo bond symbols (`/`, `\`) are read as single bonds: undefined or
/// unparsed stereochemistry is tolerated at the connectivity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondKind {
    Single,
    Double,
    Triple,
    Aromatic,
}

/// A single atom in a parsed ligand structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LigandAtom {
    /// Element symbol, capitalized (e.g. "C", "Cl", "Se").
    pub symbol: String,
    /// Whether the atom was written in aromatic (lowercase) form.
    pub aromatic: bool,
    /// Isotope label from a bracket atom, if any.
    pub isotope: Option<u16>,
    /// Formal charge from a bracket atom; zero for organic-subset atoms.
    pub charge: i8,
    /// Explicit hydrogen count from a bracket atom, if any.
    pub explicit_hydrogens: Option<u8>,
}

impl LigandAtom {
    fn organic(symbol: &str, aromatic: bool) -> Self {
        Self {
            symbol: symbol.to_string(),
            aromatic,
            isotope: None,
            charge: 0,
            explicit_hydrogens: None,
        }
    }
}

/// A bond between two atoms, identified by their indices in [`Ligand::atoms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LigandBond {
    pub a: usize,
    pub b: usize,
    pub kind: BondKind,
}

/// A small-molecule ligand parsed from a SMILES string.
///
/// The parser covers the organic subset, bracket atoms (isotope, charge,
/// explicit hydrogens, chirality marks), branches, ring-bond labels
/// (including `%nn`), and dot-separated components. Chirality and stereo
/// bond marks are accepted and discarded; ligands in percentage-displacement
/// sheets routinely carry undefined stereochemistry.
///
/// The source SMILES is retained verbatim as provenance, since it is the
/// row key of the measurement table the ligand came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Ligand {
    smiles: String,
    atoms: Vec<LigandAtom>,
    bonds: Vec<LigandBond>,
}

impl Ligand {
    /// Parses a SMILES string into a ligand structure.
    ///
    /// Leading and trailing whitespace is ignored. Interior whitespace and
    /// any symbol outside the supported grammar is an error.
    ///
    /// # Errors
    ///
    /// Returns a [`LigandError`] describing the first malformation found:
    /// empty input, unknown symbols, unbalanced branches, unclosed ring
    /// bonds, malformed bracket atoms, or dangling bond symbols.
    pub fn from_smiles(smiles: &str) -> Result<Self, LigandError> {
        let trimmed = smiles.trim();
        if trimmed.is_empty() {
            return Err(LigandError::Empty);
        }

        let mut parser = Parser::new(trimmed);
        parser.run()?;

        Ok(Self {
            smiles: trimmed.to_string(),
            atoms: parser.atoms,
            bonds: parser.bonds,
        })
    }

    /// The SMILES string this ligand was parsed from.
    pub fn smiles(&self) -> &str {
        &self.smiles
    }

    pub fn atoms(&self) -> &[LigandAtom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[LigandBond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Number of non-hydrogen atoms. Hydrogens only appear as explicit
    /// `[H]` bracket atoms; organic-subset hydrogens are implicit.
    pub fn heavy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.symbol != "H").count()
    }
}

impl std::fmt::Display for Ligand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.smiles)
    }
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
    atoms: Vec<LigandAtom>,
    bonds: Vec<LigandBond>,
    current: Option<usize>,
    pending_bond: Option<BondKind>,
    branch_stack: Vec<usize>,
    // ring label -> (atom index, explicit bond at open, aromatic at open)
    ring_map: HashMap<u32, (usize, Option<BondKind>, bool)>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            atoms: Vec::new(),
            bonds: Vec::new(),
            current: None,
            pending_bond: None,
            branch_stack: Vec::new(),
            ring_map: HashMap::new(),
        }
    }

    fn run(&mut self) -> Result<(), LigandError> {
        while let Some(&(position, ch)) = self.chars.peek() {
            match ch {
                '-' | '/' | '\\' => self.set_bond(BondKind::Single, position)?,
                '=' => self.set_bond(BondKind::Double, position)?,
                '#' => self.set_bond(BondKind::Triple, position)?,
                ':' => self.set_bond(BondKind::Aromatic, position)?,

                '(' => match self.current {
                    Some(index) => {
                        self.branch_stack.push(index);
                        self.chars.next();
                    }
                    None => {
                        return Err(LigandError::UnexpectedCharacter {
                            position,
                            character: ch,
                        });
                    }
                },
                ')' => {
                    let restored = self
                        .branch_stack
                        .pop()
                        .ok_or(LigandError::UnmatchedBranchClose { position })?;
                    self.current = Some(restored);
                    self.chars.next();
                }

                '.' => {
                    if self.pending_bond.is_some() {
                        return Err(LigandError::TrailingBond);
                    }
                    self.current = None;
                    self.chars.next();
                }

                '0'..='9' => {
                    self.chars.next();
                    let label = ch as u32 - '0' as u32;
                    self.ring_bond(label, position)?;
                }
                '%' => {
                    self.chars.next();
                    let label = self.two_digit_label(position)?;
                    self.ring_bond(label, position)?;
                }

                '[' => {
                    let atom = self.parse_bracket_atom(position)?;
                    self.add_atom(atom);
                }

                'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' => {
                    self.chars.next();
                    let symbol = self.organic_symbol(ch);
                    self.add_atom(LigandAtom::organic(&symbol, false));
                }
                'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
                    self.chars.next();
                    let symbol = ch.to_ascii_uppercase().to_string();
                    self.add_atom(LigandAtom::organic(&symbol, true));
                }

                _ => {
                    return Err(LigandError::UnexpectedCharacter {
                        position,
                        character: ch,
                    });
                }
            }
        }

        if self.pending_bond.is_some() {
            return Err(LigandError::TrailingBond);
        }
        if !self.branch_stack.is_empty() {
            return Err(LigandError::UnclosedBranch {
                count: self.branch_stack.len(),
            });
        }
        if let Some(&label) = self.ring_map.keys().min() {
            return Err(LigandError::UnclosedRingBond { label });
        }

        Ok(())
    }

    fn set_bond(&mut self, kind: BondKind, position: usize) -> Result<(), LigandError> {
        if self.current.is_none() {
            return Err(LigandError::BondWithoutAtom { position });
        }
        self.pending_bond = Some(kind);
        self.chars.next();
        Ok(())
    }

    /// Two-character organic-subset symbols (Cl, Br) need one lookahead.
    fn organic_symbol(&mut self, first: char) -> String {
        match (first, self.chars.peek()) {
            ('C', Some(&(_, 'l'))) => {
                self.chars.next();
                "Cl".to_string()
            }
            ('B', Some(&(_, 'r'))) => {
                self.chars.next();
                "Br".to_string()
            }
            _ => first.to_string(),
        }
    }

    fn add_atom(&mut self, atom: LigandAtom) {
        let index = self.atoms.len();
        let aromatic = atom.aromatic;
        self.atoms.push(atom);

        if let Some(previous) = self.current {
            let kind = self.pending_bond.take().unwrap_or({
                if aromatic && self.atoms[previous].aromatic {
                    BondKind::Aromatic
                } else {
                    BondKind::Single
                }
            });
            self.bonds.push(LigandBond {
                a: previous,
                b: index,
                kind,
            });
        }
        self.current = Some(index);
    }

    /// Opens a ring bond on first sight of a label, closes it on the second.
    /// The bond kind is taken from whichever side wrote it explicitly; if
    /// both sides are explicit they must agree. Two adjacent aromatic atoms
    /// default to an aromatic bond.
    fn ring_bond(&mut self, label: u32, position: usize) -> Result<(), LigandError> {
        let current = self.current.ok_or(LigandError::UnexpectedCharacter {
            position,
            character: char::from_digit(label % 10, 10).unwrap_or('%'),
        })?;

        let close_bond = self.pending_bond.take();
        match self.ring_map.remove(&label) {
            Some((other, open_bond, other_aromatic)) => {
                if other == current {
                    return Err(LigandError::SelfRingBond { label, position });
                }
                let kind = match (open_bond, close_bond) {
                    (Some(open), Some(close)) if open != close => {
                        return Err(LigandError::ConflictingRingBond { label, position });
                    }
                    (Some(kind), _) | (None, Some(kind)) => kind,
                    (None, None) => {
                        if other_aromatic && self.atoms[current].aromatic {
                            BondKind::Aromatic
                        } else {
                            BondKind::Single
                        }
                    }
                };
                self.bonds.push(LigandBond {
                    a: other,
                    b: current,
                    kind,
                });
            }
            None => {
                let aromatic = self.atoms[current].aromatic;
                self.ring_map.insert(label, (current, close_bond, aromatic));
            }
        }
        Ok(())
    }

    fn two_digit_label(&mut self, position: usize) -> Result<u32, LigandError> {
        let mut label = 0;
        for _ in 0..2 {
            match self.chars.peek() {
                Some(&(_, c)) if c.is_ascii_digit() => {
                    label = label * 10 + (c as u32 - '0' as u32);
                    self.chars.next();
                }
                _ => {
                    return Err(LigandError::UnexpectedCharacter {
                        position,
                        character: '%',
                    });
                }
            }
        }
        Ok(label)
    }

    fn parse_bracket_atom(&mut self, start: usize) -> Result<LigandAtom, LigandError> {
        let malformed = LigandError::MalformedBracketAtom { position: start };
        self.chars.next(); // consume '['

        let mut isotope: Option<u16> = None;
        while let Some(&(_, c)) = self.chars.peek() {
            if let Some(digit) = c.to_digit(10) {
                isotope = Some(
                    isotope
                        .unwrap_or(0)
                        .saturating_mul(10)
                        .saturating_add(digit as u16),
                );
                self.chars.next();
            } else {
                break;
            }
        }

        let (_, first) = self.chars.next().ok_or(malformed.clone())?;
        let (symbol, aromatic) = if first.is_ascii_uppercase() {
            let mut symbol = first.to_string();
            if let Some(&(_, c)) = self.chars.peek() {
                // A lowercase letter continues a two-letter element symbol;
                // 'h' never does ([CH3] hydrogens are uppercase).
                if c.is_ascii_lowercase() {
                    symbol.push(c);
                    self.chars.next();
                }
            }
            (symbol, false)
        } else {
            match first {
                'b' | 'c' | 'n' | 'o' | 'p' => (first.to_ascii_uppercase().to_string(), true),
                's' => {
                    if let Some(&(_, 'e')) = self.chars.peek() {
                        self.chars.next();
                        ("Se".to_string(), true)
                    } else {
                        ("S".to_string(), true)
                    }
                }
                'a' => {
                    if let Some(&(_, 's')) = self.chars.peek() {
                        self.chars.next();
                        ("As".to_string(), true)
                    } else {
                        return Err(malformed);
                    }
                }
                _ => return Err(malformed),
            }
        };

        // Chirality marks are tolerated and discarded.
        while let Some(&(_, '@')) = self.chars.peek() {
            self.chars.next();
        }

        let mut explicit_hydrogens: Option<u8> = None;
        if let Some(&(_, 'H')) = self.chars.peek() {
            self.chars.next();
            let mut count = 1u8;
            if let Some(&(_, c)) = self.chars.peek() {
                if let Some(digit) = c.to_digit(10) {
                    count = digit as u8;
                    self.chars.next();
                }
            }
            explicit_hydrogens = Some(count);
        }

        let mut charge: i8 = 0;
        if let Some(&(_, sign @ ('+' | '-'))) = self.chars.peek() {
            self.chars.next();
            let unit: i8 = if sign == '+' { 1 } else { -1 };
            charge = unit;
            if let Some(&(_, c)) = self.chars.peek() {
                if let Some(digit) = c.to_digit(10) {
                    charge = unit.saturating_mul(digit as i8);
                    self.chars.next();
                } else {
                    while let Some(&(_, c)) = self.chars.peek() {
                        if c == sign {
                            charge = charge.saturating_add(unit);
                            self.chars.next();
                        } else {
                            break;
                        }
                    }
                }
            }
        }

        // Optional atom-class label, ignored.
        if let Some(&(_, ':')) = self.chars.peek() {
            self.chars.next();
            let mut saw_digit = false;
            while let Some(&(_, c)) = self.chars.peek() {
                if c.is_ascii_digit() {
                    saw_digit = true;
                    self.chars.next();
                } else {
                    break;
                }
            }
            if !saw_digit {
                return Err(malformed);
            }
        }

        match self.chars.next() {
            Some((_, ']')) => Ok(LigandAtom {
                symbol,
                aromatic,
                isotope,
                charge,
                explicit_hydrogens,
            }),
            _ => Err(malformed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_smiles_parses_linear_chain() {
        let ligand = Ligand::from_smiles("CCO").unwrap();
        assert_eq!(ligand.atom_count(), 3);
        assert_eq!(ligand.bond_count(), 2);
        assert!(ligand.bonds().iter().all(|b| b.kind == BondKind::Single));
        assert_eq!(ligand.smiles(), "CCO");
    }

    #[test]
    fn from_smiles_parses_branches_and_double_bonds() {
        let ligand = Ligand::from_smiles("CC(=O)O").unwrap();
        assert_eq!(ligand.atom_count(), 4);
        assert_eq!(ligand.bond_count(), 3);
        let double_bonds: Vec<_> = ligand
            .bonds()
            .iter()
            .filter(|b| b.kind == BondKind::Double)
            .collect();
        assert_eq!(double_bonds.len(), 1);
        assert_eq!((double_bonds[0].a, double_bonds[0].b), (1, 2));
    }

    #[test]
    fn from_smiles_parses_aromatic_ring_with_closure() {
        let ligand = Ligand::from_smiles("c1ccccc1").unwrap();
        assert_eq!(ligand.atom_count(), 6);
        assert_eq!(ligand.bond_count(), 6);
        assert!(ligand.bonds().iter().all(|b| b.kind == BondKind::Aromatic));
        assert!(ligand.atoms().iter().all(|a| a.aromatic));
    }

    #[test]
    fn from_smiles_parses_two_letter_organic_symbols() {
        let ligand = Ligand::from_smiles("ClCBr").unwrap();
        let symbols: Vec<_> = ligand.atoms().iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["Cl", "C", "Br"]);
    }

    #[test]
    fn from_smiles_parses_bracket_atom_details() {
        let ligand = Ligand::from_smiles("[13NH4+]").unwrap();
        let atom = &ligand.atoms()[0];
        assert_eq!(atom.symbol, "N");
        assert_eq!(atom.isotope, Some(13));
        assert_eq!(atom.explicit_hydrogens, Some(4));
        assert_eq!(atom.charge, 1);
    }

    #[test]
    fn from_smiles_parses_double_negative_charge() {
        let ligand = Ligand::from_smiles("[O--]").unwrap();
        assert_eq!(ligand.atoms()[0].charge, -2);
        let ligand = Ligand::from_smiles("[O-2]").unwrap();
        assert_eq!(ligand.atoms()[0].charge, -2);
    }

    #[test]
    fn from_smiles_tolerates_stereo_marks() {
        let ligand = Ligand::from_smiles("F/C=C/F").unwrap();
        assert_eq!(ligand.atom_count(), 4);
        assert_eq!(ligand.bond_count(), 3);

        let chiral = Ligand::from_smiles("N[C@@H](C)C(=O)O").unwrap();
        assert_eq!(chiral.atoms()[1].symbol, "C");
        assert_eq!(chiral.atoms()[1].explicit_hydrogens, Some(1));
    }

    #[test]
    fn from_smiles_separates_components_without_bond() {
        let ligand = Ligand::from_smiles("C.C").unwrap();
        assert_eq!(ligand.atom_count(), 2);
        assert_eq!(ligand.bond_count(), 0);
    }

    #[test]
    fn from_smiles_handles_percent_ring_labels() {
        let ligand = Ligand::from_smiles("C%12CC%12").unwrap();
        assert_eq!(ligand.atom_count(), 3);
        assert_eq!(ligand.bond_count(), 3);
    }

    #[test]
    fn from_smiles_rejects_conflicting_ring_bond_symbols() {
        assert_eq!(
            Ligand::from_smiles("C=1CCC#1").unwrap_err(),
            LigandError::ConflictingRingBond {
                label: 1,
                position: 7
            }
        );
    }

    #[test]
    fn from_smiles_accepts_matching_explicit_ring_bonds() {
        let ligand = Ligand::from_smiles("C=1CCC=1").unwrap();
        assert_eq!(ligand.atom_count(), 4);
        assert_eq!(ligand.bond_count(), 4);
        let doubles = ligand
            .bonds()
            .iter()
            .filter(|b| b.kind == BondKind::Double)
            .count();
        assert_eq!(doubles, 1);

        // Explicit on one side only is fine too.
        let ligand = Ligand::from_smiles("C=1CCC1").unwrap();
        let ring_bond = ligand.bonds().last().unwrap();
        assert_eq!(ring_bond.kind, BondKind::Double);
    }

    #[test]
    fn from_smiles_rejects_empty_input() {
        assert_eq!(Ligand::from_smiles("").unwrap_err(), LigandError::Empty);
        assert_eq!(Ligand::from_smiles("   ").unwrap_err(), LigandError::Empty);
    }

    #[test]
    fn from_smiles_rejects_unknown_symbols() {
        assert_eq!(
            Ligand::from_smiles("CQC").unwrap_err(),
            LigandError::UnexpectedCharacter {
                position: 1,
                character: 'Q'
            }
        );
    }

    #[test]
    fn from_smiles_rejects_unclosed_ring() {
        assert_eq!(
            Ligand::from_smiles("C1CC").unwrap_err(),
            LigandError::UnclosedRingBond { label: 1 }
        );
    }

    #[test]
    fn from_smiles_rejects_unbalanced_branches() {
        assert_eq!(
            Ligand::from_smiles("C(C").unwrap_err(),
            LigandError::UnclosedBranch { count: 1 }
        );
        assert_eq!(
            Ligand::from_smiles("C)C").unwrap_err(),
            LigandError::UnmatchedBranchClose { position: 1 }
        );
    }

    #[test]
    fn from_smiles_rejects_dangling_bond() {
        assert_eq!(
            Ligand::from_smiles("C=").unwrap_err(),
            LigandError::TrailingBond
        );
        assert_eq!(
            Ligand::from_smiles("=C").unwrap_err(),
            LigandError::BondWithoutAtom { position: 0 }
        );
    }

    #[test]
    fn from_smiles_rejects_malformed_bracket() {
        assert_eq!(
            Ligand::from_smiles("[C").unwrap_err(),
            LigandError::MalformedBracketAtom { position: 0 }
        );
    }

    #[test]
    fn heavy_atom_count_excludes_explicit_hydrogens() {
        let ligand = Ligand::from_smiles("[H]O[H]").unwrap();
        assert_eq!(ligand.atom_count(), 3);
        assert_eq!(ligand.heavy_atom_count(), 1);
    }
}
