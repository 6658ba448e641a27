pub mod eval;
pub mod search;
pub mod stability;

pub use eval::{EvalBreakdown, EvalWeights, Evaluator, StabilityWeights};
pub use search::{AlphaBetaSelector, SearchError, SearchOutcome, SearchStats, Searcher, best_move};
