//! Coded answers and set membership

use crate::concept::Concept;
use serde::{Deserialize, Serialize};

/// A permitted coded answer of a question concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptAnswer {
    pub answer_concept_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_weight: Option<f64>,
}

impl ConceptAnswer {
    /// Answer without an explicit position
    pub fn new(answer_concept_id: i64) -> Self {
        Self {
            answer_concept_id,
            sort_weight: None,
        }
    }

    /// Answer at an explicit position
    pub fn weighted(answer_concept_id: i64, sort_weight: f64) -> Self {
        Self {
            answer_concept_id,
            sort_weight: Some(sort_weight),
        }
    }
}

/// Membership of a concept in a set concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSet {
    pub member_id: i64,
    pub sort_weight: f64,
}

impl ConceptSet {
    pub fn new(member_id: i64, sort_weight: f64) -> Self {
        Self {
            member_id,
            sort_weight,
        }
    }
}

impl Concept {
    /// Add an answer; one without a sort weight goes after the heaviest
    ///
    /// Returns the weight the answer ended up with.
    pub fn add_answer(&mut self, mut answer: ConceptAnswer) -> f64 {
        let weight = match answer.sort_weight {
            Some(weight) => weight,
            None => {
                let max = self
                    .answers
                    .iter()
                    .filter_map(|a| a.sort_weight)
                    .fold(0.0_f64, f64::max);
                max + 1.0
            }
        };
        answer.sort_weight = Some(weight);
        self.answers.push(answer);
        weight
    }

    pub fn answers(&self) -> &[ConceptAnswer] {
        &self.answers
    }

    /// Append a member at the end of the set
    pub fn add_set_member(&mut self, member_id: i64) {
        self.insert_set_member(member_id, -1);
    }

    /// Insert a member so it lands at `index` of [`set_members`](Self::set_members)
    ///
    /// `0` places it first, `-1` (or any index past the end) places it last.
    /// The member receives a sort weight between its new neighbours.
    pub fn insert_set_member(&mut self, member_id: i64, index: isize) {
        let sets = &self.concept_sets;
        let position = usize::try_from(index)
            .ok()
            .filter(|i| *i < sets.len());

        let weight = match (sets.first(), sets.last()) {
            (Some(first), Some(last)) => match position {
                None => last.sort_weight + 1.0,
                Some(0) => first.sort_weight - 1.0,
                Some(i) => (sets[i - 1].sort_weight + sets[i].sort_weight) / 2.0,
            },
            _ => 1.0,
        };

        self.concept_sets.push(ConceptSet::new(member_id, weight));
        self.sort_concept_sets();
    }

    /// Memberships ordered by sort weight
    pub fn concept_sets(&self) -> &[ConceptSet] {
        &self.concept_sets
    }

    /// Member concept ids ordered by sort weight
    pub fn set_members(&self) -> Vec<i64> {
        self.concept_sets.iter().map(|s| s.member_id).collect()
    }

    pub fn is_set(&self) -> bool {
        !self.concept_sets.is_empty()
    }

    pub(crate) fn sort_concept_sets(&mut self) {
        self.concept_sets
            .sort_by(|a, b| a.sort_weight.total_cmp(&b.sort_weight));
    }
}
