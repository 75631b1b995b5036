use super::common::*;
use crate::scoring::rules::{
    LENGTH_WEIGHT, RELEVANCE_WEIGHT, STRUCTURE_WEIGHT, TERMINOLOGY_WEIGHT,
};
use crate::scoring::{ResponseScorer, SubScoreCategory, TermUsage, SCALE_MAX};

#[test]
fn weights_sum_to_scale_maximum() {
    assert_eq!(
        LENGTH_WEIGHT + STRUCTURE_WEIGHT + TERMINOLOGY_WEIGHT + RELEVANCE_WEIGHT,
        SCALE_MAX
    );
}

#[test]
fn sub_scores_are_reported_in_fixed_order() {
    let result = scorer().score("Short answer.");

    let categories: Vec<_> = result
        .sub_scores
        .iter()
        .map(|sub_score| sub_score.category)
        .collect();
    assert_eq!(
        categories,
        vec![
            SubScoreCategory::Length,
            SubScoreCategory::Structure,
            SubScoreCategory::Terminology,
            SubScoreCategory::Relevance,
        ]
    );
    let max: f64 = result.sub_scores.iter().map(|s| s.max_points).sum();
    assert_eq!(max, SCALE_MAX);
}

#[test]
fn repeated_calls_are_identical() {
    let scorer = scorer();

    assert_eq!(scorer.score(STRONG_ANSWER), scorer.score(STRONG_ANSWER));
}

#[test]
fn context_match_never_lowers_term_credit() {
    let profile = security_profile();
    let generic = crate::scoring::rules::assess_terms("An enemy appeared.", &profile.required_terms);
    let contextual = crate::scoring::rules::assess_terms(
        "An enemy appeared and began the attack.",
        &profile.required_terms,
    );

    assert_eq!(generic[2].usage, TermUsage::Generic);
    assert_eq!(contextual[2].usage, TermUsage::InContext);
    assert!(contextual[2].points > generic[2].points);
}

#[test]
fn per_term_share_shrinks_with_more_terms() {
    let mut definition = security_definition();
    definition
        .required_terms
        .push(term("Victory", &["victory.*(?:celebrated|won)"]));
    let profile = definition.compile().expect("six terms compile");

    let assessments =
        crate::scoring::rules::assess_terms("The commander leads the army.", &profile.required_terms);

    assert_close(assessments[0].points, 5.0);
}

#[test]
fn matching_is_case_insensitive() {
    let result = scorer().score("THE COMMANDER LEADS THE ARMY INTO WAR.");

    let terminology = result
        .sub_score(SubScoreCategory::Terminology)
        .expect("terminology");
    assert_close(terminology.weighted_points, 6.0);
    let relevance = result
        .sub_score(SubScoreCategory::Relevance)
        .expect("relevance");
    assert_close(relevance.weighted_points, 10.0);
}

#[test]
fn checked_scoring_trims_input() {
    let scorer = ResponseScorer::new(security_profile());

    let checked = scorer
        .score_checked("   The commander leads the army.   ")
        .expect("non-empty input");

    assert_eq!(checked, scorer.score("The commander leads the army."));
}

#[test]
fn render_lists_every_component() {
    let rendered = scorer().score(STRONG_ANSWER).render();

    assert!(rendered.starts_with("Score: ⭐⭐⭐⭐½ (4.4/5, 88.0/100)"));
    assert!(rendered.contains("Length: 55 words (20.0/20)"));
    assert!(rendered.contains("\"Tactics\": not used"));
    assert!(rendered.contains("\"Commander\": used with context"));
    assert!(rendered.contains("conflict: 3/3 keywords (war, battle, soldier)"));
}
