//! BPE trainer implementation.
//!
//! The trainer segments the corpus once, then repeatedly selects the best
//! pair, records a merge rule and merges the pair into the vocabulary until
//! the iteration budget is spent or no mergeable pair is left.

use super::applier::MergeApplier;
use super::config::{Strategy, TrainingConfig};
use super::counter::PairCounter;
use super::incremental::PairIndex;
use super::segmenter::CorpusSegmenter;
use pairwise_core::{
    MergeRule, MergeRules, Pair, PairwiseError, Result, Token, TokenTable, Vocabulary,
};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, info};

/// Why training stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured number of iterations ran.
    BudgetExhausted,
    /// No sequence has two or more tokens left.
    NoPairs,
    /// The best pair is rarer than the configured minimum frequency.
    BelowMinFrequency,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::BudgetExhausted => f.write_str("iteration budget exhausted"),
            StopReason::NoPairs => f.write_str("no pairs left to merge"),
            StopReason::BelowMinFrequency => f.write_str("best pair below minimum frequency"),
        }
    }
}

/// Trainer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    /// No corpus yet.
    Uninitialized,
    /// Vocabulary built, no merge applied.
    Ready,
    /// At least one merge applied.
    Iterating { completed: usize },
    /// Training halted.
    Done(StopReason),
}

/// Outcome of a single [`Trainer::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A rule was learned and applied.
    Merged { rule: MergeRule, frequency: u64 },
    /// Training is over.
    Stopped(StopReason),
}

/// The vocabulary as each strategy keeps it.
enum Engine {
    Rebuild(Vocabulary),
    Incremental(PairIndex),
}

impl Engine {
    fn new(vocab: Vocabulary, strategy: Strategy) -> Self {
        match strategy {
            Strategy::Rebuild => Engine::Rebuild(vocab),
            Strategy::Incremental => Engine::Incremental(PairIndex::new(vocab)),
        }
    }

    fn best(&mut self, parallel: bool) -> Option<(Pair, u64)> {
        match self {
            Engine::Rebuild(vocab) => PairCounter::count_with(vocab, parallel)
                .best()
                .map(|(pair, count)| (pair.clone(), count)),
            Engine::Incremental(index) => index.best(),
        }
    }

    fn apply(&mut self, pair: &Pair, merged: &Token, parallel: bool) {
        match self {
            Engine::Rebuild(vocab) => {
                let current = std::mem::take(vocab);
                *vocab = MergeApplier::apply_with(current, pair, parallel);
            }
            Engine::Incremental(index) => {
                index.merge(pair, merged);
            }
        }
    }

    fn vocabulary(&self) -> Cow<'_, Vocabulary> {
        match self {
            Engine::Rebuild(vocab) => Cow::Borrowed(vocab),
            Engine::Incremental(index) => Cow::Owned(index.vocabulary()),
        }
    }

    fn into_vocabulary(self) -> Vocabulary {
        match self {
            Engine::Rebuild(vocab) => vocab,
            Engine::Incremental(index) => index.into_vocabulary(),
        }
    }
}

/// BPE trainer.
///
/// Each trainer owns its vocabulary and merge rules for one training run.
///
/// ```rust
/// use pairwise_training::{Trainer, TrainingConfig};
///
/// let output = Trainer::new(TrainingConfig::default())?.train("ab ab ab")?;
/// assert_eq!(output.merges().len(), 2);
/// # Ok::<(), pairwise_training::PairwiseError>(())
/// ```
pub struct Trainer {
    config: TrainingConfig,
    state: TrainerState,
    engine: Engine,
    merges: MergeRules,
    iterations: usize,
}

impl Trainer {
    /// Create a trainer, rejecting malformed configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            merges: MergeRules::with_capacity(config.max_iterations.min(1 << 16)),
            config,
            state: TrainerState::Uninitialized,
            engine: Engine::Rebuild(Vocabulary::new()),
            iterations: 0,
        })
    }

    /// Create a trainer with the default configuration and a custom
    /// iteration budget.
    pub fn with_max_iterations(max_iterations: usize) -> Result<Self> {
        Self::new(TrainingConfig {
            max_iterations,
            ..Default::default()
        })
    }

    /// Segment the corpus into the initial vocabulary.
    pub fn initialize(&mut self, corpus: &str) -> Result<()> {
        if self.state != TrainerState::Uninitialized {
            return Err(PairwiseError::Training(
                "trainer is already initialized".to_string(),
            ));
        }

        let vocab = CorpusSegmenter::segment(corpus);
        info!(
            words = vocab.total_frequency(),
            distinct = vocab.len(),
            strategy = %self.config.strategy,
            max_iterations = self.config.max_iterations,
            "Vocabulary initialized"
        );

        self.engine = Engine::new(vocab, self.config.strategy);
        self.state = TrainerState::Ready;
        Ok(())
    }

    /// Run one iteration.
    ///
    /// Stopping never counts against the iteration budget. Once stopped,
    /// further calls keep returning the same reason.
    pub fn step(&mut self) -> Result<Step> {
        match self.state {
            TrainerState::Uninitialized => {
                return Err(PairwiseError::Training(
                    "trainer must be initialized with a corpus first".to_string(),
                ))
            }
            TrainerState::Done(reason) => return Ok(Step::Stopped(reason)),
            TrainerState::Ready | TrainerState::Iterating { .. } => {}
        }

        if self.iterations >= self.config.max_iterations {
            return Ok(self.stop(StopReason::BudgetExhausted));
        }

        let (pair, frequency) = match self.engine.best(self.config.parallel) {
            Some(best) => best,
            None => return Ok(self.stop(StopReason::NoPairs)),
        };

        if frequency == 0 || frequency < self.config.min_frequency {
            return Ok(self.stop(StopReason::BelowMinFrequency));
        }

        let rule = MergeRule::new(pair);
        let rank = self.merges.push(rule.clone());
        self.engine.apply(&rule.pair, &rule.merged, self.config.parallel);

        self.iterations += 1;
        self.state = TrainerState::Iterating {
            completed: self.iterations,
        };

        debug!(rank, pair = %rule.pair, merged = %rule.merged, frequency, "Learned merge");

        Ok(Step::Merged { rule, frequency })
    }

    /// Step until training stops.
    pub fn run(&mut self) -> Result<StopReason> {
        loop {
            if let Step::Stopped(reason) = self.step()? {
                return Ok(reason);
            }
        }
    }

    /// Initialize, run to completion and return the output.
    pub fn train(mut self, corpus: &str) -> Result<TrainingOutput> {
        self.initialize(corpus)?;
        self.run()?;
        self.finish()
    }

    /// Hand over the vocabulary and merge rules.
    ///
    /// A caller may finish before training stops on its own; the output then
    /// carries no stop reason.
    pub fn finish(self) -> Result<TrainingOutput> {
        let stop_reason = match self.state {
            TrainerState::Uninitialized => {
                return Err(PairwiseError::Training(
                    "nothing to finish: trainer was never initialized".to_string(),
                ))
            }
            TrainerState::Done(reason) => Some(reason),
            TrainerState::Ready | TrainerState::Iterating { .. } => None,
        };

        Ok(TrainingOutput {
            vocabulary: self.engine.into_vocabulary(),
            merges: self.merges,
            iterations: self.iterations,
            stop_reason,
        })
    }

    fn stop(&mut self, reason: StopReason) -> Step {
        info!(
            iterations = self.iterations,
            merges = self.merges.len(),
            %reason,
            "Training stopped"
        );
        self.state = TrainerState::Done(reason);
        Step::Stopped(reason)
    }

    pub fn state(&self) -> TrainerState {
        self.state
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Number of merges applied so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// The current vocabulary. Borrowed for the rebuild strategy,
    /// materialized for the incremental one.
    pub fn vocabulary(&self) -> Cow<'_, Vocabulary> {
        self.engine.vocabulary()
    }
}

/// Result of a training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingOutput {
    vocabulary: Vocabulary,
    merges: MergeRules,
    iterations: usize,
    stop_reason: Option<StopReason>,
}

impl TrainingOutput {
    /// Final word vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Learned merge rules in rank order.
    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// Number of merges applied.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Why training stopped, or `None` if the caller finished early.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Assign token ids for the trained model.
    pub fn token_table(&self) -> Result<TokenTable> {
        TokenTable::from_training(&self.vocabulary, &self.merges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairwise_core::TokenSequence;

    fn config(max_iterations: usize) -> TrainingConfig {
        TrainingConfig::builder()
            .max_iterations(max_iterations)
            .build()
            .unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let mut trainer = Trainer::new(config(1)).unwrap();
        assert_eq!(trainer.state(), TrainerState::Uninitialized);

        trainer.initialize("ab ab").unwrap();
        assert_eq!(trainer.state(), TrainerState::Ready);

        assert!(matches!(trainer.step().unwrap(), Step::Merged { frequency: 2, .. }));
        assert_eq!(trainer.state(), TrainerState::Iterating { completed: 1 });

        assert_eq!(
            trainer.step().unwrap(),
            Step::Stopped(StopReason::BudgetExhausted)
        );
        assert_eq!(
            trainer.state(),
            TrainerState::Done(StopReason::BudgetExhausted)
        );
        assert_eq!(
            trainer.step().unwrap(),
            Step::Stopped(StopReason::BudgetExhausted)
        );
    }

    #[test]
    fn test_step_before_initialize_fails() {
        let mut trainer = Trainer::new(config(5)).unwrap();
        assert!(matches!(trainer.step(), Err(PairwiseError::Training(_))));
    }

    #[test]
    fn test_double_initialize_fails() {
        let mut trainer = Trainer::new(config(5)).unwrap();
        trainer.initialize("a").unwrap();
        assert!(matches!(
            trainer.initialize("b"),
            Err(PairwiseError::Training(_))
        ));
    }

    #[test]
    fn test_finish_uninitialized_fails() {
        let trainer = Trainer::new(config(5)).unwrap();
        assert!(trainer.finish().is_err());
    }

    #[test]
    fn test_runs_until_no_pairs() {
        let output = Trainer::new(config(100)).unwrap().train("ab ab ab").unwrap();

        assert_eq!(output.stop_reason(), Some(StopReason::NoPairs));
        assert_eq!(output.iterations(), 2);
        assert_eq!(output.merges().get(1).unwrap().merged.as_str(), "ab</w>");
        assert_eq!(
            output.vocabulary().get(&TokenSequence::parse("ab</w>")),
            Some(3)
        );
    }

    #[test]
    fn test_min_frequency_stops_training() {
        let config = TrainingConfig::builder()
            .max_iterations(100)
            .min_frequency(3)
            .build()
            .unwrap();
        let output = Trainer::new(config).unwrap().train("ab ab cd").unwrap();

        assert_eq!(output.stop_reason(), Some(StopReason::BelowMinFrequency));
        assert!(output.merges().is_empty());
    }

    #[test]
    fn test_finish_early() {
        let mut trainer = Trainer::new(config(10)).unwrap();
        trainer.initialize("hello hello world").unwrap();
        trainer.step().unwrap();

        let output = trainer.finish().unwrap();
        assert_eq!(output.iterations(), 1);
        assert_eq!(output.stop_reason(), None);
    }

    #[test]
    fn test_vocabulary_snapshot_matches_strategies() {
        let corpus = "low lower lowest newer wider";
        let mut rebuild = Trainer::new(config(3)).unwrap();
        let mut incremental = Trainer::new(
            TrainingConfig::builder()
                .max_iterations(3)
                .strategy(Strategy::Incremental)
                .build()
                .unwrap(),
        )
        .unwrap();

        rebuild.initialize(corpus).unwrap();
        incremental.initialize(corpus).unwrap();
        for _ in 0..3 {
            assert_eq!(rebuild.step().unwrap(), incremental.step().unwrap());
            assert_eq!(rebuild.vocabulary(), incremental.vocabulary());
        }
    }

    #[test]
    fn test_token_table() {
        let output = Trainer::new(config(1)).unwrap().train("ab ab ab").unwrap();
        let table = output.token_table().unwrap();

        assert_eq!(table.id_of("</w>"), Some(0));
        assert_eq!(table.id_of("<unk>"), Some(1));
        assert_eq!(table.token_of(table.len() as u32 - 1), Some("ab"));
    }
}
