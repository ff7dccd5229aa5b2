use super::common::*;
use crate::engine::{CandidatePass, Gender, MatchStrategy};

#[test]
fn exact_single_code_wins_over_combinations() {
    let catalog = vec![
        code_result("pair", &["H+H"]),
        code_result("single", &["P", "H"]),
    ];
    let input = response(0.0, &["H", "H", "H", "S"]);

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "single");
    assert_eq!(outcome.strategy, MatchStrategy::ExactCode);
}

#[test]
fn dominant_code_matches_self_combination() {
    let catalog = vec![code_result("double-h", &["H+H"])];
    let input = response(0.0, &["H", "H", "H", "S"]);

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "double-h");
    assert_eq!(outcome.strategy, MatchStrategy::DominantPair);
}

#[test]
fn self_combination_requires_dominance() {
    // H and S tie, so the self-combination step is skipped; H+H still qualifies by inclusion.
    let catalog = vec![
        code_result("double-h", &["H+H"]),
        code_result("mixed", &["E+H"]),
    ];
    let input = response(0.0, &["H", "S", "H", "S"]);

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "double-h");
    assert_eq!(outcome.strategy, MatchStrategy::PairInclusion);
}

#[test]
fn top_two_combination_matches_reversed_order() {
    let catalog = vec![code_result("sh", &["S+H"])];
    let input = response(0.0, &["H", "S", "H", "S"]);

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "sh");
    assert_eq!(outcome.strategy, MatchStrategy::TopTwoPair);
}

#[test]
fn written_order_is_preferred_over_reversed_order() {
    let catalog = vec![
        code_result("reversed", &["S+H"]),
        code_result("forward", &["H+S"]),
    ];
    let input = response(0.0, &["H", "H", "S", "E"]);

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "forward");
    assert_eq!(outcome.strategy, MatchStrategy::TopTwoPair);
}

#[test]
fn combination_inclusion_matches_top_code_in_either_position() {
    let catalog = vec![
        code_result("unrelated", &["E+P"]),
        code_result("includes-h", &["E+H"]),
    ];
    let input = response(0.0, &["H", "S", "H", "S"]);

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "includes-h");
    assert_eq!(outcome.strategy, MatchStrategy::PairInclusion);
}

#[test]
fn frequency_tie_prefers_first_seen_code() {
    let catalog = vec![code_result("s", &["S"]), code_result("h", &["H"])];

    let h_first = response(0.0, &["H", "S", "S", "H"]);
    assert_eq!(selected_id(&catalog, &h_first).as_deref(), Some("h"));

    let s_first = response(0.0, &["S", "H", "H", "S"]);
    assert_eq!(selected_id(&catalog, &s_first).as_deref(), Some("s"));
}

#[test]
fn code_match_retries_on_full_catalog_when_filtered_set_misses() {
    let catalog = vec![
        targeted(code_result("female-e", &["E"]), Gender::Female),
        targeted(code_result("male-h", &["H"]), Gender::Male),
    ];
    let input = response(0.0, &["H", "H"]).with_gender(Gender::Female);

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "male-h");
    assert_eq!(outcome.pass, CandidatePass::FullCatalog);
    assert_eq!(outcome.strategy, MatchStrategy::ExactCode);
}

#[test]
fn filtered_pass_wins_even_with_weaker_strategy() {
    // The filtered pass runs all four strategies before the full catalog is consulted.
    let catalog = vec![
        targeted(code_result("male-exact", &["H"]), Gender::Male),
        targeted(code_result("female-inclusion", &["P+H"]), Gender::Female),
    ];
    let input = response(0.0, &["H", "S", "H"]).with_gender(Gender::Female);

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "female-inclusion");
    assert_eq!(outcome.pass, CandidatePass::GenderFiltered);
}

#[test]
fn code_match_takes_precedence_over_score_match() {
    let catalog = vec![range_result("band", 0.0, 100.0), code_result("h", &["H"])];
    let input = response(50.0, &["H"]);

    assert_eq!(selected_id(&catalog, &input).as_deref(), Some("h"));
}

#[test]
fn missing_codes_skip_code_strategies() {
    let catalog = vec![code_result("h", &["H"]), range_result("band", 0.0, 10.0)];
    let mut input = response(5.0, &[]);
    input.codes = vec![None, Some(String::new())];

    let outcome = engine().select(&catalog, &input).expect("match");

    assert_eq!(outcome.definition.id.0, "band");
    assert_eq!(outcome.strategy, MatchStrategy::ScoreRange);
}
