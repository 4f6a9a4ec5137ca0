use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "seed-vault")]
#[command(about = "Keep encrypted seed users (with avatars) in a generated seeder")]
pub struct Cli {
    /// Config file to read instead of ./seed-vault.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactively add one or more users to the seeder
    Add(AddArgs),
    /// Decrypt every recorded user and upsert it into the database
    Seed,
    /// Regenerate the seeder entries from the record ledger
    Rebuild(RebuildArgs),
    /// Write a default config and prepare the users table
    Install,
    /// Print a fresh base64 AES-256 key for `crypto.key`
    GenerateKey,
}

/// Flags only pre-fill the first user. The password is always prompted.
#[derive(Debug, Clone, Default, Args)]
pub struct AddArgs {
    /// Display name of the user
    #[arg(long)]
    pub name: Option<String>,

    /// Email address, used as the upsert key when seeding
    #[arg(long)]
    pub email: Option<String>,

    /// Path to the avatar image (JPEG, PNG, GIF or SVG)
    #[arg(long)]
    pub avatar: Option<PathBuf>,

    /// Run the seeder right after adding the users
    #[arg(long)]
    pub seed: bool,

    /// Add a single user without asking for more
    #[arg(long)]
    pub once: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RebuildArgs {
    /// Rebuild even if the seeder holds more users than the ledger (the extra users are lost)
    #[arg(long)]
    pub force: bool,
}
