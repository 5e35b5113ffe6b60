use serde::{Deserialize, Serialize};

/// Shape of the answer a criterion expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Boolean,
    Number,
    Text,
    Select,
}

/// Left-inclusive numeric bucket mapping a value range to points.
///
/// Bands are contiguous: each band's `min` equals the previous band's `max`,
/// and the final band is open-ended (`max: None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min: f64,
    pub max: Option<f64>,
    pub points: u32,
}

impl ScoreBand {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value < max)
    }
}

/// One admissible choice for a select criterion with its point value.
///
/// Satisfying options carry the full criterion weight, the "none" sentinel
/// carries zero, and partial credit is expressed with intermediate values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub points: u32,
}

/// A single scorable question within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub question: String,
    pub kind: ResponseKind,
    pub weight: u32,
    pub required: bool,
    pub critical: bool,
    pub options: Vec<SelectOption>,
    pub bands: Vec<ScoreBand>,
}

impl Criterion {
    pub fn boolean(id: &str, question: &str, weight: u32) -> Self {
        Self::base(id, question, ResponseKind::Boolean, weight)
    }

    pub fn text(id: &str, question: &str, weight: u32) -> Self {
        Self::base(id, question, ResponseKind::Text, weight)
    }

    pub fn number(id: &str, question: &str, weight: u32, bands: Vec<ScoreBand>) -> Self {
        let mut criterion = Self::base(id, question, ResponseKind::Number, weight);
        criterion.bands = bands;
        criterion
    }

    pub fn select(id: &str, question: &str, weight: u32, options: Vec<SelectOption>) -> Self {
        let mut criterion = Self::base(id, question, ResponseKind::Select, weight);
        criterion.options = options;
        criterion
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    fn base(id: &str, question: &str, kind: ResponseKind, weight: u32) -> Self {
        Self {
            id: id.to_string(),
            question: question.to_string(),
            kind,
            weight,
            required: true,
            critical: false,
            options: Vec::new(),
            bands: Vec::new(),
        }
    }
}

/// Weighted grouping of criteria contributing to the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub weight: u32,
    pub criteria: Vec<Criterion>,
}

/// Versioned questionnaire definition. Immutable reference data: the version
/// is stamped into every score snapshot so historical assessments stay
/// reproducible against the catalog revision that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaCatalog {
    pub version: String,
    pub categories: Vec<Category>,
}

impl CriteriaCatalog {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn criterion(&self, id: &str) -> Option<(&Category, &Criterion)> {
        self.categories.iter().find_map(|category| {
            category
                .criteria
                .iter()
                .find(|criterion| criterion.id == id)
                .map(|criterion| (category, criterion))
        })
    }

    pub fn criterion_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.criteria.len())
            .sum()
    }

    /// Structural integrity check. Violations are contract failures at
    /// catalog definition time, distinct from the data-quality degradation
    /// the scoring rules absorb silently.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::BTreeSet::new();

        for category in &self.categories {
            for criterion in &category.criteria {
                if !seen.insert(criterion.id.clone()) {
                    return Err(CatalogError::DuplicateCriterion {
                        id: criterion.id.clone(),
                    });
                }

                if criterion.weight == 0 {
                    return Err(CatalogError::ZeroWeight {
                        id: criterion.id.clone(),
                    });
                }

                match criterion.kind {
                    ResponseKind::Select => {
                        if criterion.options.is_empty() {
                            return Err(CatalogError::MissingOptions {
                                id: criterion.id.clone(),
                            });
                        }
                        if criterion
                            .options
                            .iter()
                            .any(|option| option.points > criterion.weight)
                        {
                            return Err(CatalogError::PointsExceedWeight {
                                id: criterion.id.clone(),
                            });
                        }
                    }
                    ResponseKind::Number => validate_bands(criterion)?,
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Canonical questionnaire consolidating the product's scoring rules
    /// into a single weighted rubric.
    pub fn standard() -> Self {
        Self {
            version: "2026.1".to_string(),
            categories: standard_categories(),
        }
    }
}

fn validate_bands(criterion: &Criterion) -> Result<(), CatalogError> {
    let bands = &criterion.bands;
    let Some(first) = bands.first() else {
        return Err(CatalogError::MissingBands {
            id: criterion.id.clone(),
        });
    };

    if first.min != 0.0 {
        return Err(CatalogError::UnanchoredBands {
            id: criterion.id.clone(),
        });
    }

    for pair in bands.windows(2) {
        match pair[0].max {
            Some(max) if max == pair[1].min => {}
            _ => {
                return Err(CatalogError::BandGap {
                    id: criterion.id.clone(),
                    at: pair[1].min,
                });
            }
        }
    }

    if bands.last().map(|band| band.max.is_some()).unwrap_or(true) {
        return Err(CatalogError::BoundedTail {
            id: criterion.id.clone(),
        });
    }

    // Earned points can never exceed the criterion's contribution to the
    // category maximum, keeping percentages inside [0, 100].
    if bands.iter().any(|band| band.points > criterion.weight) {
        return Err(CatalogError::PointsExceedWeight {
            id: criterion.id.clone(),
        });
    }

    Ok(())
}

/// Catalog contract violation detected before any scoring runs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("criterion '{id}' is defined more than once")]
    DuplicateCriterion { id: String },
    #[error("criterion '{id}' has zero weight")]
    ZeroWeight { id: String },
    #[error("select criterion '{id}' has no options")]
    MissingOptions { id: String },
    #[error("number criterion '{id}' has no scoring bands")]
    MissingBands { id: String },
    #[error("number criterion '{id}' bands do not start at 0")]
    UnanchoredBands { id: String },
    #[error("number criterion '{id}' bands are not contiguous at {at}")]
    BandGap { id: String, at: f64 },
    #[error("number criterion '{id}' final band must be open-ended")]
    BoundedTail { id: String },
    #[error("criterion '{id}' awards more points than its weight")]
    PointsExceedWeight { id: String },
}

fn band(min: f64, max: Option<f64>, points: u32) -> ScoreBand {
    ScoreBand { min, max, points }
}

fn option(value: &str, points: u32) -> SelectOption {
    SelectOption {
        value: value.to_string(),
        points,
    }
}

fn standard_categories() -> Vec<Category> {
    vec![
        Category {
            id: "foundation".to_string(),
            name: "Business Foundation".to_string(),
            weight: 25,
            criteria: vec![
                Criterion::boolean(
                    "entity_registered",
                    "Is the business registered as an LLC or corporation with the state?",
                    5,
                )
                .critical(),
                Criterion::boolean(
                    "ein_obtained",
                    "Does the business have a federal EIN on file with the IRS?",
                    4,
                )
                .critical(),
                Criterion::boolean(
                    "business_address",
                    "Does the business operate from a verifiable commercial address?",
                    4,
                ),
                Criterion::boolean(
                    "business_phone",
                    "Is a dedicated business phone line listed with 411 directory assistance?",
                    3,
                ),
                Criterion::boolean(
                    "dba_registered",
                    "Is a DBA or trade name registered for the business?",
                    2,
                )
                .optional(),
                Criterion::number(
                    "months_in_business",
                    "How many months has the business been operating?",
                    7,
                    vec![
                        band(0.0, Some(7.0), 0),
                        band(7.0, Some(13.0), 3),
                        band(13.0, Some(25.0), 5),
                        band(25.0, None, 7),
                    ],
                ),
            ],
        },
        Category {
            id: "financials".to_string(),
            name: "Financial Health".to_string(),
            weight: 25,
            criteria: vec![
                Criterion::boolean(
                    "business_bank_account",
                    "Is there a dedicated business checking account in the legal entity name?",
                    6,
                )
                .critical(),
                Criterion::number(
                    "monthly_revenue",
                    "What is the average monthly revenue over the last three months?",
                    8,
                    vec![
                        band(0.0, Some(5_000.0), 0),
                        band(5_000.0, Some(15_000.0), 3),
                        band(15_000.0, Some(50_000.0), 6),
                        band(50_000.0, None, 8),
                    ],
                ),
                Criterion::select(
                    "account_balance",
                    "How would you describe the average business account balance?",
                    4,
                    vec![
                        option("minimal", 0),
                        option("stable", 2),
                        option("strong", 4),
                    ],
                ),
                Criterion::boolean(
                    "tax_returns_filed",
                    "Are the business tax returns filed and current?",
                    4,
                ),
                Criterion::boolean(
                    "bookkeeping_system",
                    "Does the business use an accountant or bookkeeping system?",
                    3,
                )
                .optional(),
            ],
        },
        Category {
            id: "credit".to_string(),
            name: "Business Credit".to_string(),
            weight: 20,
            criteria: vec![
                Criterion::boolean(
                    "duns_number",
                    "Does the business have a D-U-N-S number registered with Dun & Bradstreet?",
                    5,
                )
                .critical(),
                Criterion::number(
                    "tradelines_reporting",
                    "How many tradelines currently report to business credit bureaus?",
                    6,
                    vec![
                        band(0.0, Some(1.0), 0),
                        band(1.0, Some(3.0), 2),
                        band(3.0, Some(5.0), 4),
                        band(5.0, None, 6),
                    ],
                ),
                Criterion::number(
                    "personal_credit_score",
                    "What is the owner's personal FICO score?",
                    5,
                    vec![
                        band(0.0, Some(580.0), 0),
                        band(580.0, Some(650.0), 2),
                        band(650.0, Some(720.0), 4),
                        band(720.0, None, 5),
                    ],
                ),
                Criterion::boolean(
                    "derogatory_free",
                    "Is the business free of open collections, liens, and judgments?",
                    4,
                ),
            ],
        },
        Category {
            id: "digital".to_string(),
            name: "Digital Presence".to_string(),
            weight: 15,
            criteria: vec![
                Criterion::boolean(
                    "website_live",
                    "Does the business have a live website on its own domain?",
                    4,
                ),
                Criterion::boolean(
                    "business_email",
                    "Does the business use a domain-based email address?",
                    3,
                ),
                Criterion::boolean(
                    "listings_consistent",
                    "Are the Google Business Profile and directory listings consistent with the legal name, address, and phone?",
                    3,
                ),
                Criterion::select(
                    "social_activity",
                    "How active is the business on social media?",
                    2,
                    vec![
                        option("none", 0),
                        option("occasional", 1),
                        option("active", 2),
                    ],
                )
                .optional(),
                Criterion::number(
                    "online_reviews",
                    "How many online customer reviews does the business have?",
                    3,
                    vec![
                        band(0.0, Some(5.0), 0),
                        band(5.0, Some(20.0), 2),
                        band(20.0, None, 3),
                    ],
                )
                .optional(),
            ],
        },
        Category {
            id: "operations".to_string(),
            name: "Industry & Operations".to_string(),
            weight: 15,
            criteria: vec![
                Criterion::boolean(
                    "licenses_current",
                    "Are all required industry and municipal licenses current?",
                    5,
                ),
                Criterion::select(
                    "industry_risk",
                    "How do lenders classify the business industry?",
                    4,
                    vec![
                        option("high_risk", 0),
                        option("moderate_risk", 2),
                        option("low_risk", 4),
                    ],
                ),
                Criterion::select(
                    "location_type",
                    "What kind of location does the business operate from?",
                    3,
                    vec![
                        option("none", 0),
                        option("home_based", 1),
                        option("commercial", 3),
                    ],
                ),
                Criterion::number(
                    "employee_count",
                    "How many employees does the business have?",
                    3,
                    vec![
                        band(0.0, Some(2.0), 1),
                        band(2.0, Some(10.0), 2),
                        band(10.0, None, 3),
                    ],
                )
                .optional(),
            ],
        },
    ]
}
