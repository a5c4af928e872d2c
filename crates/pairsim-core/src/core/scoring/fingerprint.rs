use super::smiles::{SmilesError, Token, tokenize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

pub const DEFAULT_FINGERPRINT_BITS: usize = 2048;
pub const DEFAULT_MAX_PATH_LENGTH: usize = 7;

/// Parameters of the hashed linear-path fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerprintParams {
    /// Length of the bit vector.
    pub num_bits: usize,
    /// Longest path, in bonds, that contributes a feature.
    pub max_path_length: usize,
}

impl Default for FingerprintParams {
    fn default() -> Self {
        Self {
            num_bits: DEFAULT_FINGERPRINT_BITS,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
        }
    }
}

/// A fixed-length bit vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    words: Vec<u64>,
    num_bits: usize,
}

impl Fingerprint {
    pub fn new(num_bits: usize) -> Self {
        Self {
            words: vec![0; num_bits.div_ceil(64)],
            num_bits,
        }
    }

    pub fn set(&mut self, bit: usize) {
        debug_assert!(bit < self.num_bits);
        self.words[bit / 64] |= 1u64 << (bit % 64);
    }

    /// Tanimoto coefficient `|A ∩ B| / |A ∪ B|`.
    ///
    /// Two empty fingerprints share nothing and score `0.0`. Fingerprints of
    /// different lengths are compared over the words they have in common.
    pub fn tanimoto(&self, other: &Fingerprint) -> f64 {
        let (mut both, mut either) = (0u32, 0u32);
        for (a, b) in self.words.iter().zip(&other.words) {
            both += (a & b).count_ones();
            either += (a | b).count_ones();
        }
        if either == 0 {
            0.0
        } else {
            f64::from(both) / f64::from(either)
        }
    }
}

/// Molecular graph recovered from a SMILES token stream.
#[derive(Debug, Default)]
struct MolGraph<'a> {
    atoms: Vec<&'a str>,
    neighbors: Vec<Vec<(usize, char)>>,
}

impl<'a> MolGraph<'a> {
    fn from_tokens(tokens: &[Token<'a>]) -> Result<Self, SmilesError> {
        let mut graph = Self::default();
        let mut previous: Option<usize> = None;
        let mut pending_bond: Option<char> = None;
        let mut branch_stack: Vec<Option<usize>> = Vec::new();
        let mut open_rings: HashMap<u8, (usize, Option<char>)> = HashMap::new();

        for token in tokens {
            match *token {
                Token::Atom(symbol) => {
                    let index = graph.add_atom(symbol);
                    if let Some(prev) = previous {
                        graph.add_bond(prev, index, pending_bond.take());
                    }
                    pending_bond = None;
                    previous = Some(index);
                }
                Token::Bond(bond) => pending_bond = Some(bond),
                Token::BranchOpen => branch_stack.push(previous),
                Token::BranchClose => {
                    previous = branch_stack.pop().flatten();
                    pending_bond = None;
                }
                Token::RingClosure(label) => {
                    let current = previous.ok_or(SmilesError::DanglingRingClosure { label })?;
                    match open_rings.remove(&label) {
                        Some((partner, bond)) => {
                            graph.add_bond(partner, current, pending_bond.take().or(bond));
                        }
                        None => {
                            open_rings.insert(label, (current, pending_bond.take()));
                        }
                    }
                }
                Token::Dot => {
                    previous = None;
                    pending_bond = None;
                }
            }
        }
        Ok(graph)
    }

    fn add_atom(&mut self, symbol: &'a str) -> usize {
        self.atoms.push(symbol);
        self.neighbors.push(Vec::new());
        self.atoms.len() - 1
    }

    fn add_bond(&mut self, a: usize, b: usize, explicit: Option<char>) {
        let bond = match explicit {
            Some('/') | Some('\\') | None if is_aromatic(self.atoms[a]) && is_aromatic(self.atoms[b]) => ':',
            Some('/') | Some('\\') | None => '-',
            Some(bond) => bond,
        };
        self.neighbors[a].push((b, bond));
        self.neighbors[b].push((a, bond));
    }
}

fn is_aromatic(symbol: &str) -> bool {
    let element = symbol.trim_start_matches('[');
    element
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .is_some_and(|c| c.is_ascii_lowercase())
}

/// Computes the hashed linear-path fingerprint of a SMILES string.
///
/// Every simple path of up to `max_path_length` bonds, including single
/// atoms, is written as an alternating atom/bond label sequence. The
/// lexicographically smaller of the forward and reverse spellings is hashed
/// with SHA-256 and folded onto the bit vector, so a path sets the same bit
/// whichever end it was discovered from, on every build and platform.
pub fn path_fingerprint(smiles: &str, params: &FingerprintParams) -> Result<Fingerprint, SmilesError> {
    let tokens = tokenize(smiles)?;
    let graph = MolGraph::from_tokens(&tokens)?;
    let mut fingerprint = Fingerprint::new(params.num_bits);
    if params.num_bits == 0 {
        return Ok(fingerprint);
    }

    let mut path = Vec::with_capacity(params.max_path_length + 1);
    let mut bonds = Vec::with_capacity(params.max_path_length);
    let mut visited = vec![false; graph.atoms.len()];
    for start in 0..graph.atoms.len() {
        path.push(start);
        visited[start] = true;
        extend_paths(&graph, params, &mut path, &mut bonds, &mut visited, &mut fingerprint);
        visited[start] = false;
        path.pop();
    }
    Ok(fingerprint)
}

fn extend_paths(
    graph: &MolGraph<'_>,
    params: &FingerprintParams,
    path: &mut Vec<usize>,
    bonds: &mut Vec<char>,
    visited: &mut [bool],
    fingerprint: &mut Fingerprint,
) {
    let bit = (path_hash(graph, path, bonds) % params.num_bits as u64) as usize;
    fingerprint.set(bit);

    if bonds.len() == params.max_path_length {
        return;
    }
    let Some(&tail) = path.last() else {
        return;
    };
    for &(next, bond) in &graph.neighbors[tail] {
        if visited[next] {
            continue;
        }
        visited[next] = true;
        path.push(next);
        bonds.push(bond);
        extend_paths(graph, params, path, bonds, visited, fingerprint);
        bonds.pop();
        path.pop();
        visited[next] = false;
    }
}

fn path_hash(graph: &MolGraph<'_>, path: &[usize], bonds: &[char]) -> u64 {
    let forward = path_label(graph, path.iter().copied(), bonds.iter().copied());
    let reverse = path_label(graph, path.iter().rev().copied(), bonds.iter().rev().copied());
    let digest = Sha256::digest(forward.min(reverse).as_bytes());
    let mut leading = [0u8; 8];
    leading.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(leading)
}

fn path_label(
    graph: &MolGraph<'_>,
    atoms: impl Iterator<Item = usize>,
    mut bonds: impl Iterator<Item = char>,
) -> String {
    let mut label = String::new();
    for atom in atoms {
        label.push_str(graph.atoms[atom]);
        if let Some(bond) = bonds.next() {
            label.push(bond);
        }
    }
    label
}
