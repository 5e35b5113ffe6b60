mod playbook;

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::{CriteriaCatalog, Criterion};
use super::scoring::{CategoryScore, ScoreSnapshot};

/// Urgency of a recommendation, ordered from most to least pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Actionable advice generated from one scoring run. Superseded wholesale by
/// the next run's output, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub category_id: Option<String>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Overall points the score could gain if this item were resolved.
    pub estimated_impact: u8,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
}

/// Rule-driven generator emitting at most one recommendation per criterion
/// (and per category) with fully deterministic ordering.
pub struct RecommendationGenerator {
    category_threshold: u8,
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self {
            category_threshold: 80,
        }
    }
}

impl RecommendationGenerator {
    pub fn new(category_threshold: u8) -> Self {
        Self { category_threshold }
    }

    pub fn generate(
        &self,
        snapshot: &ScoreSnapshot,
        catalog: &CriteriaCatalog,
        industry: Option<&str>,
    ) -> Vec<Recommendation> {
        let weight_denominator: u32 = catalog
            .categories
            .iter()
            .zip(&snapshot.category_scores)
            .filter(|(_, score)| score.max_points > 0)
            .map(|(category, _)| category.weight)
            .sum();

        let mut emitted = BTreeSet::new();
        let mut drafts: Vec<Draft> = Vec::new();

        for (category, score) in catalog.categories.iter().zip(&snapshot.category_scores) {
            let normalized_weight = if weight_denominator > 0 && score.max_points > 0 {
                f64::from(category.weight) / f64::from(weight_denominator)
            } else {
                0.0
            };

            for (criterion, component) in category.criteria.iter().zip(&score.components) {
                if !criterion.required || !component.unmet() {
                    continue;
                }

                if !emitted.insert(criterion.id.clone()) {
                    continue;
                }

                let priority = if criterion.critical {
                    Priority::Critical
                } else {
                    self.category_priority(score)
                };

                let missing = criterion.weight - component.points;
                let computed_impact = gain(missing, score.max_points, normalized_weight);

                drafts.push(Draft {
                    category_weight: category.weight,
                    recommendation: self.criterion_recommendation(
                        criterion,
                        &category.id,
                        priority,
                        computed_impact,
                    ),
                });
            }

            if score.percentage < self.category_threshold
                && emitted.insert(category.id.clone())
            {
                let shortfall = 100u32.saturating_sub(u32::from(score.percentage));
                let impact = (f64::from(shortfall) * normalized_weight).round() as u8;
                let entry = playbook::category_entry(&category.id);

                drafts.push(Draft {
                    category_weight: category.weight,
                    recommendation: Recommendation {
                        id: category.id.clone(),
                        category_id: Some(category.id.clone()),
                        title: entry
                            .map(|entry| entry.title.to_string())
                            .unwrap_or_else(|| format!("Improve your {} score", category.name)),
                        description: entry
                            .map(|entry| entry.description.to_string())
                            .unwrap_or_else(|| {
                                format!(
                                    "The {} category is at {}%, below the {}% target.",
                                    category.name, score.percentage, self.category_threshold
                                )
                            }),
                        priority: self.category_priority(score),
                        estimated_impact: impact,
                        actions: entry
                            .map(|entry| to_strings(entry.actions))
                            .unwrap_or_default(),
                        resources: entry
                            .map(|entry| to_strings(entry.resources))
                            .unwrap_or_default(),
                    },
                });
            }
        }

        // Industry advice supplements remediation work; a clean assessment
        // gets no advice at all.
        if let Some(industry) = industry.filter(|_| !drafts.is_empty()) {
            for advice in playbook::industry_advice(industry) {
                if !emitted.insert(advice.id.to_string()) {
                    continue;
                }

                drafts.push(Draft {
                    category_weight: 0,
                    recommendation: Recommendation {
                        id: advice.id.to_string(),
                        category_id: None,
                        title: advice.title.to_string(),
                        description: advice.description.to_string(),
                        priority: advice.priority,
                        estimated_impact: advice.impact,
                        actions: to_strings(advice.actions),
                        resources: Vec::new(),
                    },
                });
            }
        }

        drafts.sort_by(|a, b| {
            let left = (
                a.recommendation.priority.rank(),
                Reverse(a.recommendation.estimated_impact),
                Reverse(a.category_weight),
            );
            let right = (
                b.recommendation.priority.rank(),
                Reverse(b.recommendation.estimated_impact),
                Reverse(b.category_weight),
            );
            left.cmp(&right)
                .then_with(|| a.recommendation.id.cmp(&b.recommendation.id))
        });

        drafts.into_iter().map(|draft| draft.recommendation).collect()
    }

    fn category_priority(&self, score: &CategoryScore) -> Priority {
        if score.percentage < 50 {
            Priority::High
        } else if score.percentage < self.category_threshold {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    fn criterion_recommendation(
        &self,
        criterion: &Criterion,
        category_id: &str,
        priority: Priority,
        computed_impact: u8,
    ) -> Recommendation {
        match playbook::criterion_entry(&criterion.id) {
            Some(entry) => Recommendation {
                id: criterion.id.clone(),
                category_id: Some(category_id.to_string()),
                title: entry.title.to_string(),
                description: entry.description.to_string(),
                priority,
                estimated_impact: entry.impact.unwrap_or(computed_impact),
                actions: to_strings(entry.actions),
                resources: to_strings(entry.resources),
            },
            None => Recommendation {
                id: criterion.id.clone(),
                category_id: Some(category_id.to_string()),
                title: format!("Address: {}", criterion.question),
                description: format!(
                    "This item is currently counting against the {} category.",
                    category_id
                ),
                priority,
                estimated_impact: computed_impact,
                actions: Vec::new(),
                resources: Vec::new(),
            },
        }
    }
}

struct Draft {
    category_weight: u32,
    recommendation: Recommendation,
}

fn gain(missing: u32, category_max: u32, normalized_weight: f64) -> u8 {
    if category_max == 0 {
        return 0;
    }

    (f64::from(missing) / f64::from(category_max) * 100.0 * normalized_weight).round() as u8
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
