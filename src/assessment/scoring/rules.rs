use super::super::catalog::{Category, Criterion, ResponseKind};
use super::super::domain::{ResponseSet, ResponseValue};
use super::{CategoryScore, CriterionScore};

/// Points earned by a single response, or `None` when the criterion is
/// effectively unanswered (missing, blank, or the wrong value shape for the
/// criterion's declared kind). Malformed input degrades, it never fails.
pub(crate) fn criterion_points(criterion: &Criterion, value: Option<&ResponseValue>) -> Option<u32> {
    let value = value?;

    match (criterion.kind, value) {
        (ResponseKind::Boolean, ResponseValue::Boolean(answer)) => {
            Some(if *answer { criterion.weight } else { 0 })
        }
        (ResponseKind::Number, ResponseValue::Number(number)) => Some(
            criterion
                .bands
                .iter()
                .find(|band| band.contains(*number))
                .map(|band| band.points)
                .unwrap_or(0),
        ),
        (ResponseKind::Text, ResponseValue::Text(text)) => {
            if text.trim().is_empty() {
                None
            } else {
                Some(criterion.weight)
            }
        }
        (ResponseKind::Select, ResponseValue::Selection(choice)) => criterion
            .options
            .iter()
            .find(|option| option.value.eq_ignore_ascii_case(choice.trim()))
            .map(|option| option.points),
        _ => None,
    }
}

/// Aggregate one category: answered criteria contribute earned points and
/// full weight to the max; unanswered required criteria contribute weight to
/// the max only; unanswered optional criteria are excluded from both sums.
pub(crate) fn score_category(category: &Category, responses: &ResponseSet) -> CategoryScore {
    let mut raw_points = 0u32;
    let mut max_points = 0u32;
    let mut answered = 0usize;
    let mut components = Vec::with_capacity(category.criteria.len());

    for criterion in &category.criteria {
        let points = criterion_points(criterion, responses.value(&criterion.id));

        match points {
            Some(points) => {
                raw_points += points;
                max_points += criterion.weight;
                answered += 1;
                components.push(CriterionScore {
                    criterion_id: criterion.id.clone(),
                    points,
                    max_points: criterion.weight,
                    answered: true,
                });
            }
            None => {
                if criterion.required {
                    max_points += criterion.weight;
                }
                components.push(CriterionScore {
                    criterion_id: criterion.id.clone(),
                    points: 0,
                    max_points: if criterion.required { criterion.weight } else { 0 },
                    answered: false,
                });
            }
        }
    }

    let percentage = percentage(raw_points, max_points);
    let required_answered = category
        .criteria
        .iter()
        .filter(|criterion| criterion.required)
        .all(|criterion| {
            criterion_points(criterion, responses.value(&criterion.id)).is_some()
        });

    CategoryScore {
        category_id: category.id.clone(),
        raw_points,
        max_points,
        percentage,
        answered,
        total: category.criteria.len(),
        complete: max_points > 0 && required_answered,
        components,
    }
}

/// Weighted mean of category percentages. Categories with no attainable
/// points are excluded from the normalization denominator so a fully
/// unanswered optional category cannot zero out the denominator.
pub(crate) fn overall_percentage(scores: &[CategoryScore], weights: &[u32]) -> u8 {
    debug_assert_eq!(scores.len(), weights.len());

    let mut weighted = 0.0f64;
    let mut denominator = 0u32;

    for (score, weight) in scores.iter().zip(weights) {
        if score.max_points > 0 {
            weighted += f64::from(*weight) * f64::from(score.percentage);
            denominator += weight;
        }
    }

    if denominator == 0 {
        return 0;
    }

    (weighted / f64::from(denominator)).round() as u8
}

pub(crate) fn percentage(raw: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }

    (f64::from(raw) / f64::from(max) * 100.0).round() as u8
}
