use pairwise_core::{Token, Vocabulary};
use pairwise_training::{
    CorpusSegmenter, MergeApplier, PairCounter, Step, Strategy as TrainingStrategy, Trainer,
    TrainingConfig, TrainingOutput,
};
use proptest::prelude::*;

fn corpus_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[abc]{1,6}", 0..24).prop_map(|words| words.join(" "))
}

fn train(
    corpus: &str,
    max_iterations: usize,
    strategy: TrainingStrategy,
    parallel: bool,
) -> TrainingOutput {
    let config = TrainingConfig::builder()
        .max_iterations(max_iterations)
        .strategy(strategy)
        .parallel(parallel)
        .build()
        .unwrap();
    Trainer::new(config).unwrap().train(corpus).unwrap()
}

fn total_tokens(vocab: &Vocabulary) -> u64 {
    vocab
        .iter()
        .map(|(seq, freq)| seq.len() as u64 * freq)
        .sum()
}

proptest! {
    /// Identical input and configuration give identical output.
    #[test]
    fn prop_training_is_deterministic(corpus in corpus_strategy(), iterations in 0_usize..12) {
        let first = train(&corpus, iterations, TrainingStrategy::Rebuild, false);
        let second = train(&corpus, iterations, TrainingStrategy::Rebuild, false);
        prop_assert_eq!(first, second);
    }

    /// Both strategies learn the same rules and end with the same vocabulary.
    #[test]
    fn prop_strategies_agree(corpus in corpus_strategy(), iterations in 0_usize..20) {
        let rebuild = train(&corpus, iterations, TrainingStrategy::Rebuild, false);
        let incremental = train(&corpus, iterations, TrainingStrategy::Incremental, false);
        prop_assert_eq!(rebuild.merges(), incremental.merges());
        prop_assert_eq!(rebuild.vocabulary(), incremental.vocabulary());
    }

    /// Parallel counting and merging do not change the result.
    #[test]
    fn prop_parallel_agrees(corpus in corpus_strategy(), iterations in 0_usize..12) {
        let sequential = train(&corpus, iterations, TrainingStrategy::Rebuild, false);
        let parallel = train(&corpus, iterations, TrainingStrategy::Rebuild, true);
        prop_assert_eq!(sequential, parallel);
    }

    /// Merging never changes how many words the corpus has, and every real
    /// merge shortens the corpus by at least one token.
    #[test]
    fn prop_frequency_conserved(corpus in corpus_strategy()) {
        let mut trainer = Trainer::with_max_iterations(10).unwrap();
        trainer.initialize(&corpus).unwrap();
        let words = trainer.vocabulary().total_frequency();

        loop {
            let before_tokens = total_tokens(&trainer.vocabulary());
            let before_distinct = trainer.vocabulary().distinct_tokens().len();
            match trainer.step().unwrap() {
                Step::Merged { .. } => {
                    let vocab = trainer.vocabulary();
                    prop_assert_eq!(vocab.total_frequency(), words);
                    prop_assert!(total_tokens(&vocab) < before_tokens);
                    prop_assert!(vocab.distinct_tokens().len() <= before_distinct + 1);
                }
                Step::Stopped(_) => break,
            }
        }
    }

    /// After a merge no eligible occurrence of the pair remains, and
    /// merging the same pair again changes nothing.
    #[test]
    fn prop_merge_removes_pair(corpus in corpus_strategy(), pick in any::<prop::sample::Index>()) {
        let vocab = CorpusSegmenter::segment(&corpus);
        let ranked = PairCounter::count(&vocab).ranked();
        prop_assume!(!ranked.is_empty());

        let (pair, _) = ranked[pick.index(ranked.len())].clone();
        let merged = MergeApplier::apply(vocab, &pair);

        for (seq, _) in merged.iter() {
            prop_assert!(!seq.contains_adjacent(&pair.left, &pair.right));
        }
        prop_assert!(merged.distinct_tokens().contains(&pair.merged()));

        let again = MergeApplier::apply(merged.clone(), &pair);
        prop_assert_eq!(again, merged);
    }

    /// The selected pair is always a maximum of the pair table.
    #[test]
    fn prop_best_is_maximal(corpus in corpus_strategy()) {
        let vocab = CorpusSegmenter::segment(&corpus);
        let table = PairCounter::count(&vocab);
        if let Some((best, count)) = table.best() {
            for (pair, other) in table.iter() {
                prop_assert!(other < count || (other == count && best <= pair));
            }
            let ranked = table.ranked();
            prop_assert_eq!(&ranked[0].0, best);
        }
    }
}

#[test]
fn test_overlapping_run_merges_greedily() {
    let output = train("aaaa", 2, TrainingStrategy::Rebuild, false);

    let learned: Vec<&str> = output.merges().iter().map(|rule| rule.merged.as_str()).collect();
    assert_eq!(learned, vec!["aa", "aaaa"]);
    assert!(output.vocabulary().distinct_tokens().contains(&Token::new("aaaa")));
    assert_eq!(output.vocabulary().len(), 1);
}
