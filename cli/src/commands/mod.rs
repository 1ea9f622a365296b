//! CLI commands for the pairwise trainer.

pub mod benchmark;
pub mod inspect;
pub mod pairs;
pub mod train;

pub use benchmark::BenchmarkCommand;
pub use inspect::InspectCommand;
pub use pairs::PairsCommand;
pub use train::TrainCommand;
