mod rules;

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogError, CriteriaCatalog};
use super::domain::ResponseSet;

/// Stateless engine applying the catalog's weighted rubric to a response set.
///
/// Construction validates the catalog once; scoring itself is pure and never
/// fails, per-criterion data-quality issues degrade to "unanswered".
pub struct ScoringEngine {
    catalog: CriteriaCatalog,
}

impl ScoringEngine {
    pub fn new(catalog: CriteriaCatalog) -> Result<Self, CatalogError> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &CriteriaCatalog {
        &self.catalog
    }

    pub fn score(&self, responses: &ResponseSet) -> ScoreSnapshot {
        let category_scores: Vec<CategoryScore> = self
            .catalog
            .categories
            .iter()
            .map(|category| rules::score_category(category, responses))
            .collect();

        let weights: Vec<u32> = self
            .catalog
            .categories
            .iter()
            .map(|category| category.weight)
            .collect();

        let percentage = rules::overall_percentage(&category_scores, &weights);
        let answered: usize = category_scores.iter().map(|score| score.answered).sum();
        let completion_percent =
            rules::percentage(answered as u32, self.catalog.criterion_count() as u32);

        ScoreSnapshot {
            catalog_version: self.catalog.version.clone(),
            category_scores,
            overall: OverallScore {
                percentage,
                grade: Grade::from_percentage(percentage),
            },
            completion_percent,
        }
    }

    /// True once every required criterion has a usable response.
    pub fn required_complete(&self, responses: &ResponseSet) -> bool {
        self.catalog.categories.iter().all(|category| {
            category
                .criteria
                .iter()
                .filter(|criterion| criterion.required)
                .all(|criterion| {
                    rules::criterion_points(criterion, responses.value(&criterion.id)).is_some()
                })
        })
    }
}

/// Discrete contribution of one criterion, kept for transparent audits and
/// as the recommendation generator's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion_id: String,
    pub points: u32,
    pub max_points: u32,
    pub answered: bool,
}

impl CriterionScore {
    pub fn unmet(&self) -> bool {
        self.points < self.max_points || (!self.answered && self.max_points > 0)
    }
}

/// Derived score for one category over the criteria that count toward it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category_id: String,
    pub raw_points: u32,
    pub max_points: u32,
    pub percentage: u8,
    pub answered: usize,
    pub total: usize,
    pub complete: bool,
    pub components: Vec<CriterionScore>,
}

/// Letter grade over fixed overall-percentage thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90..=u8::MAX => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            50..=59 => Grade::D,
            _ => Grade::F,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Overall fundability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallScore {
    pub percentage: u8,
    pub grade: Grade,
}

/// Immutable result of one scoring run, stamped with the catalog revision
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub catalog_version: String,
    pub category_scores: Vec<CategoryScore>,
    pub overall: OverallScore,
    pub completion_percent: u8,
}

impl ScoreSnapshot {
    pub fn category(&self, id: &str) -> Option<&CategoryScore> {
        self.category_scores
            .iter()
            .find(|score| score.category_id == id)
    }
}
