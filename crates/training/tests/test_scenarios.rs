use pairwise_core::{Pair, TokenSequence, Vocabulary};
use pairwise_training::{StopReason, Strategy, Trainer, TrainingConfig, TrainingOutput};

fn vocab(entries: &[(&str, u64)]) -> Vocabulary {
    entries
        .iter()
        .map(|&(text, freq)| (TokenSequence::parse(text), freq))
        .collect()
}

fn train(corpus: &str, max_iterations: usize, strategy: Strategy) -> TrainingOutput {
    let config = TrainingConfig::builder()
        .max_iterations(max_iterations)
        .strategy(strategy)
        .build()
        .unwrap();
    Trainer::new(config).unwrap().train(corpus).unwrap()
}

#[test]
fn test_repeated_word_single_merge() {
    for strategy in [Strategy::Rebuild, Strategy::Incremental] {
        let output = train("ab ab ab", 1, strategy);

        assert_eq!(output.vocabulary(), &vocab(&[("ab </w>", 3)]));
        assert_eq!(output.merges().len(), 1);

        let rule = output.merges().get(0).unwrap();
        assert_eq!(rule.pair, Pair::new("a", "b"));
        assert_eq!(rule.merged.as_str(), "ab");
        assert_eq!(output.stop_reason(), Some(StopReason::BudgetExhausted));
    }
}

#[test]
fn test_repeated_letter_tie_break() {
    for strategy in [Strategy::Rebuild, Strategy::Incremental] {
        let output = train("aa aa", 1, strategy);

        assert_eq!(output.merges().get(0).unwrap().pair, Pair::new("a", "a"));
        assert_eq!(output.vocabulary(), &vocab(&[("aa </w>", 2)]));
    }
}

#[test]
fn test_empty_corpus() {
    for strategy in [Strategy::Rebuild, Strategy::Incremental] {
        let output = train("", 15, strategy);

        assert!(output.vocabulary().is_empty());
        assert!(output.merges().is_empty());
        assert_eq!(output.iterations(), 0);
        assert_eq!(output.stop_reason(), Some(StopReason::NoPairs));
    }
}

#[test]
fn test_zero_budget_keeps_initial_vocabulary() {
    let output = train("low lower newest", 0, Strategy::Rebuild);

    assert!(output.merges().is_empty());
    assert_eq!(
        output.vocabulary(),
        &vocab(&[
            ("l o w </w>", 1),
            ("l o w e r </w>", 1),
            ("n e w e s t </w>", 1),
        ])
    );
    assert_eq!(output.stop_reason(), Some(StopReason::BudgetExhausted));
}

#[test]
fn test_default_budget_is_fifteen() {
    let corpus = "the quick brown fox jumps over the lazy dog ".repeat(4)
        + "pack my box with five dozen liquor jugs";
    let output = Trainer::new(TrainingConfig::default())
        .unwrap()
        .train(&corpus)
        .unwrap();

    assert_eq!(output.merges().len(), 15);
    assert_eq!(output.iterations(), 15);
}

#[test]
fn test_classic_low_lower_newest_widest() {
    let corpus =
        "low ".repeat(5) + &"lower ".repeat(2) + &"newest ".repeat(6) + &"widest ".repeat(3);
    let output = train(&corpus, 4, Strategy::Rebuild);

    let learned: Vec<String> = output
        .merges()
        .iter()
        .map(|rule| rule.merged.to_string())
        .collect();
    // (e,s)=9 and (s,t)=9 tie; e sorts first. Then (es,t)=9, then
    // (est,</w>)=9 beats (l,o)=7.
    assert_eq!(learned, vec!["es", "est", "est</w>", "lo"]);
    assert_eq!(output.vocabulary().get(&TokenSequence::parse("n e w est</w>")), Some(6));
}

#[test]
fn test_rule_ranks_follow_learning_order() {
    let output = train("banana bandana banana", 6, Strategy::Rebuild);

    for (rank, rule) in output.merges().iter().enumerate() {
        assert_eq!(output.merges().rank(&rule.pair), Some(rank as u32));
    }
}
