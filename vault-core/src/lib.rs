pub mod adapters;
pub mod domain;
pub mod template;

/// Items referenced by generated seeder modules.
pub mod seeding {
    pub use crate::domain::models::{SeedEntry, SeedReport, UpsertOutcome};
    pub use crate::domain::services::SeedContext;
    pub use crate::domain::SeedError;
}

#[cfg(test)]
mod test_support;
