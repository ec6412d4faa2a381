//! Vortex CLI
//!
//! Chaotic-map stream cipher and trajectory toolkit.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Map;
use std::path::PathBuf;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "vortex")]
#[command(about = "Chaotic-map stream cipher and trajectory toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt or decrypt a file (the transform is its own inverse)
    Crypt {
        /// Input file
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Key as hex (at least 64 hex chars = 32 bytes)
        #[arg(short, long)]
        key: String,
        /// IV as hex (up to 32 hex chars = 16 bytes)
        #[arg(long, default_value = "")]
        iv: String,
        /// Chaotic map driving the keystream
        #[arg(short, long, value_enum, default_value_t = Map::Tent)]
        map: Map,
    },
    /// Write raw keystream bytes to a file
    Keystream {
        /// Output file
        output: PathBuf,
        /// Key as hex (at least 64 hex chars = 32 bytes)
        #[arg(short, long)]
        key: String,
        /// IV as hex (up to 32 hex chars = 16 bytes)
        #[arg(long, default_value = "")]
        iv: String,
        /// Chaotic map driving the keystream
        #[arg(short, long, value_enum, default_value_t = Map::Tent)]
        map: Map,
        /// Number of bytes to emit
        #[arg(short = 'n', long, default_value_t = 4096)]
        length: u64,
    },
    /// Dump a chaotic trajectory as CSV on stdout
    Sample {
        /// Map or flow to sample
        #[arg(short, long, value_enum, default_value_t = Map::Lorenz)]
        map: Map,
        /// Number of samples
        #[arg(short = 'n', long, default_value_t = 10_000)]
        count: usize,
    },
    /// Print the active SIMD backend
    Backend,
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crypt {
            input,
            output,
            key,
            iv,
            map,
        } => commands::crypt(&input, &output, &key, &iv, map)?,
        Commands::Keystream {
            output,
            key,
            iv,
            map,
            length,
        } => commands::keystream(&output, &key, &iv, map, length)?,
        Commands::Sample { map, count } => commands::sample(map, count)?,
        Commands::Backend => println!("{}", vortex::active_backend()),
    }

    Ok(())
}
