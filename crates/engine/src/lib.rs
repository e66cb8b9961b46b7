pub mod error;
pub mod estimator;
pub mod generator;
pub mod packager;
pub mod pipeline;
pub mod polynomial;
pub mod profit;
pub mod solver;

pub use error::EngineError;
pub use estimator::fit;
pub use generator::generate;
pub use packager::{package, Packaged, Report};
pub use pipeline::{run, PipelineRun};
pub use polynomial::Polynomial;
pub use profit::{build, ProfitFunction};
pub use solver::{solve, OptimizationResult, SolveStatus};
