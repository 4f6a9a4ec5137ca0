use std::{fs, path::Path, sync::LazyLock};

use regex::Regex;
use tracing::{info, warn};

use crate::domain::ArtifactError;

// The opening brace of the first `fn run(...)`, generics and return type included.
static ENTRY_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bfn\s+run\s*(?:<[^>]*>)?\s*\([^)]*\)[^{;]*\{").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    AlreadyPresent,
    OrchestratorMissing,
    EntryPointMissing,
}

/// True when `source` already calls `<logical_name>::run(` or passes `<logical_name>::run`
/// as a function value. `logical_name` must start at an identifier boundary, so
/// `admin_user_seeder::run(` does not count for `user_seeder`.
pub fn is_registered(source: &str, logical_name: &str) -> bool {
    let reference = format!("{logical_name}::run");

    source.match_indices(&reference).any(|(start, _)| {
        let before = source[..start].chars().next_back();
        let after = source[start + reference.len()..].chars().next();
        !before.is_some_and(is_ident_char) && matches!(after, Some('(' | ')'))
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Makes the orchestrator's `run` call the seeder's `run`, at most once.
///
/// A missing orchestrator or one without a `fn run` is skipped with a warning.
pub fn register_seeder(
    orchestrator: &Path,
    logical_name: &str,
) -> Result<Registration, ArtifactError> {
    if !orchestrator.exists() {
        warn!(
            "{} not found, add `{logical_name}::run(ctx).await?;` to your seeding entry point by hand",
            orchestrator.display()
        );
        return Ok(Registration::OrchestratorMissing);
    }

    let source = fs::read_to_string(orchestrator).map_err(|source| ArtifactError::Read {
        path: orchestrator.to_path_buf(),
        source,
    })?;

    if is_registered(&source, logical_name) {
        return Ok(Registration::AlreadyPresent);
    }

    let Some(entry) = ENTRY_POINT.find(&source) else {
        warn!("no `fn run` found in {}", orchestrator.display());
        return Ok(Registration::EntryPointMissing);
    };

    let mut updated = String::with_capacity(source.len() + 64);
    updated.push_str(&source[..entry.end()]);
    updated.push_str(&format!("\n    {logical_name}::run(ctx).await?;"));
    updated.push_str(&source[entry.end()..]);

    fs::write(orchestrator, updated).map_err(|source| ArtifactError::Write {
        path: orchestrator.to_path_buf(),
        source,
    })?;

    info!("registered {logical_name} in {}", orchestrator.display());
    Ok(Registration::Inserted)
}
