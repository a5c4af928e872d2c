use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SmilesError {
    #[error("SMILES string contains no atoms")]
    NoAtoms,
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("Bracket atom opened at position {position} is never closed")]
    UnclosedBracket { position: usize },
    #[error("Empty bracket atom at position {position}")]
    EmptyBracket { position: usize },
    #[error("Unbalanced branch at position {position}")]
    UnbalancedBranch { position: usize },
    #[error("Invalid ring-closure label at position {position}")]
    InvalidRingLabel { position: usize },
    #[error("Ring closure {label} is opened but never closed")]
    UnclosedRing { label: u8 },
    #[error("Ring closure {label} does not follow an atom")]
    DanglingRingClosure { label: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// An atom symbol; bracket atoms keep their full text, e.g. `[NH4+]`.
    Atom(&'a str),
    Bond(char),
    BranchOpen,
    BranchClose,
    RingClosure(u8),
    Dot,
}

fn is_organic_subset(byte: u8) -> bool {
    matches!(
        byte,
        b'B' | b'C' | b'N' | b'O' | b'P' | b'S' | b'F' | b'I' | b'b' | b'c' | b'n' | b'o' | b'p'
            | b's' | b'*'
    )
}

/// Splits a SMILES string into tokens and checks its structural balance.
///
/// Only syntax is validated: brackets, branches and ring-closure labels must
/// pair up and every character must belong to the SMILES alphabet. Valence and
/// aromaticity are not checked.
pub fn tokenize(smiles: &str) -> Result<Vec<Token<'_>>, SmilesError> {
    let bytes = smiles.as_bytes();
    let mut tokens = Vec::with_capacity(bytes.len());
    let mut branch_depth = 0usize;
    let mut open_rings = HashSet::new();
    let mut has_atom = false;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        let next = bytes.get(i + 1).copied();
        match byte {
            b'[' => {
                let close = smiles[i + 1..]
                    .find(']')
                    .ok_or(SmilesError::UnclosedBracket { position: i })?;
                if close == 0 {
                    return Err(SmilesError::EmptyBracket { position: i });
                }
                tokens.push(Token::Atom(&smiles[i..i + close + 2]));
                has_atom = true;
                i += close + 2;
                continue;
            }
            b'B' if next == Some(b'r') => {
                tokens.push(Token::Atom(&smiles[i..i + 2]));
                has_atom = true;
                i += 2;
                continue;
            }
            b'C' if next == Some(b'l') => {
                tokens.push(Token::Atom(&smiles[i..i + 2]));
                has_atom = true;
                i += 2;
                continue;
            }
            b if is_organic_subset(b) => {
                tokens.push(Token::Atom(&smiles[i..i + 1]));
                has_atom = true;
            }
            b'-' | b'=' | b'#' | b'$' | b':' | b'/' | b'\\' => {
                tokens.push(Token::Bond(byte as char));
            }
            b'(' => {
                branch_depth += 1;
                tokens.push(Token::BranchOpen);
            }
            b')' => {
                if branch_depth == 0 {
                    return Err(SmilesError::UnbalancedBranch { position: i });
                }
                branch_depth -= 1;
                tokens.push(Token::BranchClose);
            }
            b'0'..=b'9' => {
                let label = byte - b'0';
                toggle_ring(&mut open_rings, label);
                tokens.push(Token::RingClosure(label));
            }
            b'%' => {
                let digits = bytes.get(i + 1..i + 3);
                let label = match digits {
                    Some([tens, ones]) if tens.is_ascii_digit() && ones.is_ascii_digit() => {
                        (tens - b'0') * 10 + (ones - b'0')
                    }
                    _ => return Err(SmilesError::InvalidRingLabel { position: i }),
                };
                toggle_ring(&mut open_rings, label);
                tokens.push(Token::RingClosure(label));
                i += 3;
                continue;
            }
            b'.' => tokens.push(Token::Dot),
            _ => {
                let character = smiles[i..].chars().next().unwrap_or('\u{FFFD}');
                return Err(SmilesError::UnexpectedCharacter {
                    character,
                    position: i,
                });
            }
        }
        i += 1;
    }

    if branch_depth != 0 {
        return Err(SmilesError::UnbalancedBranch {
            position: bytes.len(),
        });
    }
    if let Some(&label) = open_rings.iter().min() {
        return Err(SmilesError::UnclosedRing { label });
    }
    if !has_atom {
        return Err(SmilesError::NoAtoms);
    }
    Ok(tokens)
}

fn toggle_ring(open_rings: &mut HashSet<u8>, label: u8) {
    if !open_rings.remove(&label) {
        open_rings.insert(label);
    }
}
