mod injector;
mod normalizer;
mod orchestrator;
mod record_builder;
mod seeding;

pub use injector::*;
pub use normalizer::*;
pub use orchestrator::*;
pub use record_builder::*;
pub use seeding::*;
