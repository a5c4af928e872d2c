use super::fingerprint::{Fingerprint, FingerprintParams, path_fingerprint};
use super::{Scorer, ScoringError};
use crate::core::models::entity::Entity;

/// Tanimoto similarity over hashed linear-path fingerprints. Scores lie in
/// `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct TanimotoScorer {
    params: FingerprintParams,
}

impl TanimotoScorer {
    pub fn new(params: FingerprintParams) -> Self {
        Self { params }
    }

    pub fn fingerprint(&self, entity: &Entity) -> Result<Fingerprint, ScoringError> {
        path_fingerprint(entity.smiles(), &self.params).map_err(|source| {
            ScoringError::InvalidSmiles {
                smiles: entity.smiles().to_string(),
                source,
            }
        })
    }
}

impl Scorer for TanimotoScorer {
    fn score(&self, left: &Entity, right: &Entity) -> Result<f64, ScoringError> {
        let left = self.fingerprint(left)?;
        let right = self.fingerprint(right)?;
        Ok(left.tanimoto(&right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::smiles::SmilesError;

    #[test]
    fn identical_molecules_score_one() {
        let scorer = TanimotoScorer::default();
        let phenol = Entity::new("c1ccccc1O");
        assert_eq!(scorer.score(&phenol, &phenol).unwrap(), 1.0);
    }

    #[test]
    fn scoring_is_deterministic_and_symmetric() {
        let scorer = TanimotoScorer::default();
        let a = Entity::new("CC(=O)Oc1ccccc1C(=O)O");
        let b = Entity::new("OC(=O)c1ccccc1O");

        let first = scorer.score(&a, &b).unwrap();
        let second = scorer.score(&a, &b).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, scorer.score(&b, &a).unwrap());
        assert!((0.0..=1.0).contains(&first));
        assert!(first > 0.0 && first < 1.0);
    }

    #[test]
    fn related_molecules_score_higher_than_unrelated_ones() {
        let scorer = TanimotoScorer::default();
        let ethanol = Entity::new("CCO");
        let propanol = Entity::new("CCCO");
        let benzene = Entity::new("c1ccccc1");

        let related = scorer.score(&ethanol, &propanol).unwrap();
        let unrelated = scorer.score(&ethanol, &benzene).unwrap();
        assert!(related > unrelated);
    }

    #[test]
    fn malformed_smiles_fails_with_the_offending_string() {
        let scorer = TanimotoScorer::default();
        let err = scorer
            .score(&Entity::new("CCO"), &Entity::new("C1CC"))
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidSmiles {
                smiles: "C1CC".to_string(),
                source: SmilesError::UnclosedRing { label: 1 },
            }
        );
    }

    #[test]
    fn closures_are_scorers() {
        let constant = |_: &Entity, _: &Entity| -> Result<f64, ScoringError> { Ok(0.5) };
        let a = Entity::new("A");
        assert_eq!(constant.score(&a, &a).unwrap(), 0.5);
    }
}
