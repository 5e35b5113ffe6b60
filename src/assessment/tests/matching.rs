use super::common::*;
use crate::assessment::matching::{
    rank_matches, score_match, LenderOpportunity, MATCH_CUTOFF, PREQUALIFIED_SCORE,
};

#[test]
fn meeting_every_condition_scores_one_hundred() {
    let opportunity = term_loan_opportunity();
    let candidate = score_match(&opportunity, &profile(680, 150_000, 30, "consulting"));

    assert_eq!(candidate.score, 100);
    assert!(candidate.prequalified);
}

#[test]
fn failing_thresholds_drops_the_match_below_the_cutoff() {
    // Credit and tenure thresholds missed, industry unrestricted, no
    // guarantee required: 25 + 15 + 10 = 50.
    let opportunity = term_loan_opportunity();
    let candidate = score_match(&opportunity, &profile(600, 150_000, 10, "consulting"));

    assert_eq!(candidate.score, 50);
    assert!(!candidate.prequalified);

    let ranked = rank_matches(
        std::slice::from_ref(&opportunity),
        &profile(600, 150_000, 10, "consulting"),
        MATCH_CUTOFF,
    );
    assert!(ranked.is_empty());
}

#[test]
fn score_exactly_at_the_cutoff_is_included() {
    // Credit, tenure, and guarantee satisfied against a restricted industry
    // list that excludes the borrower: 30 + 20 + 10 = 60.
    let opportunity = LenderOpportunity {
        allowed_industries: vec!["trucking".to_string()],
        min_annual_revenue: 500_000,
        ..term_loan_opportunity()
    };
    let borrower = profile(700, 100_000, 36, "consulting");

    let candidate = score_match(&opportunity, &borrower);
    assert_eq!(candidate.score, 60);

    let ranked = rank_matches(std::slice::from_ref(&opportunity), &borrower, MATCH_CUTOFF);
    assert_eq!(ranked.len(), 1);
}

#[test]
fn prequalification_starts_at_eighty() {
    // Guarantee required costs exactly the 10-point share, landing on 90.
    let requires_guarantee = LenderOpportunity {
        requires_personal_guarantee: true,
        ..term_loan_opportunity()
    };
    let candidate = score_match(&requires_guarantee, &profile(700, 150_000, 36, "retail"));
    assert_eq!(candidate.score, 90);
    assert!(candidate.prequalified);

    // Missing only the tenure share lands exactly on the prequalification line.
    let at_line = LenderOpportunity {
        min_months_in_business: 60,
        ..term_loan_opportunity()
    };
    let candidate = score_match(&at_line, &profile(700, 150_000, 36, "retail"));
    assert_eq!(candidate.score, PREQUALIFIED_SCORE);
    assert!(candidate.prequalified);

    let below = LenderOpportunity {
        requires_personal_guarantee: true,
        min_months_in_business: 60,
        ..term_loan_opportunity()
    };
    let candidate = score_match(&below, &profile(700, 150_000, 36, "retail"));
    assert_eq!(candidate.score, 70);
    assert!(!candidate.prequalified);
}

#[test]
fn industry_lists_match_case_insensitively() {
    let restricted = LenderOpportunity {
        allowed_industries: vec!["Trucking".to_string(), "Construction".to_string()],
        ..term_loan_opportunity()
    };

    let matching = score_match(&restricted, &profile(700, 150_000, 36, "  trucking "));
    assert_eq!(matching.score, 100);

    let excluded = score_match(&restricted, &profile(700, 150_000, 36, "retail"));
    assert_eq!(excluded.score, 85);
}

#[test]
fn empty_industry_list_means_unrestricted() {
    let opportunity = term_loan_opportunity();
    let candidate = score_match(&opportunity, &profile(700, 150_000, 36, "anything at all"));

    assert_eq!(candidate.score, 100);
}

#[test]
fn ranking_is_descending_with_id_tie_break() {
    let strong = term_loan_opportunity();
    let tied_b = LenderOpportunity {
        id: "opp-b".to_string(),
        requires_personal_guarantee: true,
        ..term_loan_opportunity()
    };
    let tied_a = LenderOpportunity {
        id: "opp-a".to_string(),
        requires_personal_guarantee: true,
        ..term_loan_opportunity()
    };

    let ranked = rank_matches(
        &[tied_b, strong, tied_a],
        &profile(700, 150_000, 36, "retail"),
        MATCH_CUTOFF,
    );

    let ids: Vec<&str> = ranked
        .iter()
        .map(|candidate| candidate.opportunity_id.as_str())
        .collect();
    assert_eq!(ids, ["opp-term", "opp-a", "opp-b"]);
    assert_eq!(ranked[0].score, 100);
    assert_eq!(ranked[1].score, 90);
    assert_eq!(ranked[2].score, 90);
}

#[test]
fn no_opportunities_yields_no_matches() {
    let ranked = rank_matches(&[], &profile(700, 150_000, 36, "retail"), MATCH_CUTOFF);
    assert!(ranked.is_empty());
}

#[test]
fn zero_threshold_products_match_any_profile() {
    let net_30 = LenderOpportunity {
        id: "opp-net30".to_string(),
        min_credit_score: 0,
        min_annual_revenue: 0,
        min_months_in_business: 0,
        ..term_loan_opportunity()
    };

    let candidate = score_match(&net_30, &profile(0, 0, 0, ""));
    assert_eq!(candidate.score, 100);
}
