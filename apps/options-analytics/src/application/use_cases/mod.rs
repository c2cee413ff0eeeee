//! Application use cases.

mod analyze_chain;

pub use analyze_chain::AnalyzeChainUseCase;
