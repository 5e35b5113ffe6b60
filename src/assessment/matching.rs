use serde::{Deserialize, Serialize};

use super::domain::BorrowerProfile;

/// Minimum score at which a match is considered prequalified.
pub const PREQUALIFIED_SCORE: u8 = 80;

/// Matches below this score are dropped from caller-facing ranked lists.
pub const MATCH_CUTOFF: u8 = 60;

// Fixed shares per satisfied eligibility condition; they sum to exactly 100.
const CREDIT_SHARE: u8 = 30;
const REVENUE_SHARE: u8 = 25;
const TENURE_SHARE: u8 = 20;
const INDUSTRY_SHARE: u8 = 15;
const GUARANTEE_SHARE: u8 = 10;

/// A funding product with its eligibility thresholds. Administered
/// independently of assessments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LenderOpportunity {
    pub id: String,
    pub name: String,
    pub product: String,
    pub min_credit_score: u16,
    pub min_annual_revenue: u64,
    pub min_months_in_business: u32,
    /// Empty means unrestricted.
    pub allowed_industries: Vec<String>,
    pub requires_personal_guarantee: bool,
}

/// Computed compatibility between a profile and one opportunity. Derived and
/// disposable; recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LenderMatch {
    pub opportunity_id: String,
    pub score: u8,
    pub prequalified: bool,
}

/// Score one opportunity against a profile. Each satisfied condition adds its
/// fixed share; the clamp is defensive since the shares already sum to 100.
pub fn score_match(opportunity: &LenderOpportunity, profile: &BorrowerProfile) -> LenderMatch {
    let mut score: u16 = 0;

    if profile.credit_score >= opportunity.min_credit_score {
        score += u16::from(CREDIT_SHARE);
    }

    if profile.annual_revenue >= opportunity.min_annual_revenue {
        score += u16::from(REVENUE_SHARE);
    }

    if profile.months_in_business >= opportunity.min_months_in_business {
        score += u16::from(TENURE_SHARE);
    }

    if industry_allowed(opportunity, profile) {
        score += u16::from(INDUSTRY_SHARE);
    }

    if !opportunity.requires_personal_guarantee {
        score += u16::from(GUARANTEE_SHARE);
    }

    let score = score.min(100) as u8;

    LenderMatch {
        opportunity_id: opportunity.id.clone(),
        score,
        prequalified: score >= PREQUALIFIED_SCORE,
    }
}

/// Rank a catalog of opportunities for a profile. Matches below the cutoff
/// are excluded entirely; ties break on ascending opportunity id so repeated
/// runs return identical orderings.
pub fn rank_matches(
    opportunities: &[LenderOpportunity],
    profile: &BorrowerProfile,
    cutoff: u8,
) -> Vec<LenderMatch> {
    let mut matches: Vec<LenderMatch> = opportunities
        .iter()
        .map(|opportunity| score_match(opportunity, profile))
        .filter(|candidate| candidate.score >= cutoff)
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.opportunity_id.cmp(&b.opportunity_id))
    });

    matches
}

fn industry_allowed(opportunity: &LenderOpportunity, profile: &BorrowerProfile) -> bool {
    opportunity.allowed_industries.is_empty()
        || opportunity
            .allowed_industries
            .iter()
            .any(|industry| industry.eq_ignore_ascii_case(profile.industry.trim()))
}
