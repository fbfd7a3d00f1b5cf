//! shamir-pool CLI
//!
//! Splits a secret into a pool of shares and recovers it from any threshold
//! subset. Diceware indices and recovery-code characters are mapped into the
//! field before splitting.
//!
//! ## Usage
//!
//! ```bash
//! # Split a raw integer secret, 3 of 5
//! shamir-pool-cli split --secret 1234 --threshold 3 --total 5
//!
//! # Split a recovery code char / diceware index
//! shamir-pool-cli codes gen --char Q -t 2 -n 3
//! shamir-pool-cli diceware gen --index 35214 -t 2 -n 3
//!
//! # Recover (shares as printed by gen, or as json pairs)
//! shamir-pool-cli diceware recover --shares "[(1, 2), (3, 89)]" --wordlist words.txt
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use shamir_pool::{encoding, recover, split, FieldConfig, ShareSet, DEFAULT_PRIME};

#[derive(Parser)]
#[command(name = "shamir-pool-cli")]
#[command(about = "split secrets into shamir share pools and recover them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Field prime, must be the same for gen and recover
    #[arg(long, global = true, default_value_t = DEFAULT_PRIME)]
    prime: u64,

    /// Print generated shares as json pairs
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct PoolArgs {
    /// Shares needed to unlock the secret
    #[arg(short, long)]
    threshold: usize,

    /// Total number of shares to generate
    #[arg(short = 'n', long)]
    total: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a raw integer secret
    Split {
        /// Secret, below the field prime
        #[arg(short, long)]
        secret: u64,

        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Recover a raw integer secret
    Recover {
        /// Shares, e.g. "[(1, 2), (2, 89)]"
        #[arg(short, long)]
        shares: String,
    },

    /// Recovery code characters (A-Z, 0-9)
    Codes {
        #[command(subcommand)]
        action: CodesAction,
    },

    /// Diceware indices (five dice, e.g. 35214)
    Diceware {
        #[command(subcommand)]
        action: DicewareAction,
    },
}

#[derive(Subcommand)]
enum CodesAction {
    /// Split a recovery code char
    Gen {
        /// Recovery code char
        #[arg(short, long)]
        char: String,

        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Recover a recovery code char
    Recover {
        #[arg(short, long)]
        shares: String,
    },
}

#[derive(Subcommand)]
enum DicewareAction {
    /// Split a diceware index
    Gen {
        /// Dice index, five digits 1-6
        #[arg(short, long)]
        index: String,

        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Recover a diceware index (and word, given a word list)
    Recover {
        #[arg(short, long)]
        shares: String,

        /// Diceware word list, one "<index> <word>" per line
        #[arg(short, long)]
        wordlist: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("shamir_pool={}", level).parse()?)
                .add_directive(format!("shamir_pool_cli={}", level).parse()?),
        )
        .init();

    let field = FieldConfig::new(cli.prime).context("invalid --prime")?;
    debug!(prime = field.prime(), "field configured");

    match cli.command {
        Commands::Split { secret, pool } => {
            generate(secret, &pool, &field, cli.json)?;
        }
        Commands::Recover { shares } => {
            let secret = recover_from(&shares, &field)?;
            println!("Secret: {}", secret);
        }
        Commands::Codes { action } => match action {
            CodesAction::Gen { char, pool } => {
                let secret = encoding::recovery_char_to_secret(&char)?;
                generate(secret, &pool, &field, cli.json)?;
            }
            CodesAction::Recover { shares } => {
                let secret = recover_from(&shares, &field)?;
                let code = encoding::secret_to_recovery_char(secret)
                    .context("recovered value is not a recovery code, wrong shares or prime?")?;
                println!("Recovery code char: {}", code);
            }
        },
        Commands::Diceware { action } => match action {
            DicewareAction::Gen { index, pool } => {
                let secret = encoding::dice_index_to_secret(&index)?;
                generate(secret, &pool, &field, cli.json)?;
            }
            DicewareAction::Recover { shares, wordlist } => {
                let secret = recover_from(&shares, &field)?;
                let index = encoding::secret_to_dice_index(secret)
                    .context("recovered value is not a diceware index, wrong shares or prime?")?;
                println!("Diceware index: {}", index);

                if let Some(path) = wordlist {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading word list {}", path.display()))?;
                    match encoding::parse_wordlist(&text).get(&index) {
                        Some(word) => println!("Diceware word: {}", word),
                        None => warn!(%index, path = %path.display(), "index not in word list"),
                    }
                }
            }
        },
    }

    Ok(())
}

fn generate(secret: u64, pool: &PoolArgs, field: &FieldConfig, json: bool) -> Result<()> {
    let shares = split(secret, pool.threshold, pool.total, field)?;
    info!(threshold = pool.threshold, total = pool.total, "generated share pool");

    if json {
        println!("{}", serde_json::to_string(&shares)?);
        return Ok(());
    }

    println!("Secret: {}", secret);
    println!("Shares:");
    for share in &shares {
        println!("   {}", share);
    }
    println!(
        "{} shares generated, {} required to unlock secret",
        pool.total, pool.threshold
    );
    Ok(())
}

/// accepts the `[(x, y), ...]` text format or json pairs `[[x, y], ...]`
fn parse_shares(input: &str) -> Result<ShareSet> {
    match input.parse::<ShareSet>() {
        Ok(shares) => Ok(shares),
        Err(text_err) => serde_json::from_str(input)
            .with_context(|| format!("shares are neither tuple text ({}) nor json pairs", text_err)),
    }
}

fn recover_from(input: &str, field: &FieldConfig) -> Result<u64> {
    let shares = parse_shares(input)?;
    let secret = recover(&shares, field)?;
    info!(shares = shares.len(), "recovered secret");
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shamir_pool::Share;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from([
            "shamir-pool-cli", "diceware", "gen", "--index", "35214", "-t", "2", "-n", "3",
        ]);
        assert_eq!(cli.prime, DEFAULT_PRIME);
        match cli.command {
            Commands::Diceware {
                action: DicewareAction::Gen { index, pool },
            } => {
                assert_eq!(index, "35214");
                assert_eq!((pool.threshold, pool.total), (2, 3));
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_parse_shares_both_formats() {
        let expected = ShareSet::new(vec![Share::new(1, 2), Share::new(2, 89)]);
        assert_eq!(parse_shares("[(1, 2), (2, 89)]").unwrap(), expected);
        assert_eq!(parse_shares("[[1, 2], [2, 89]]").unwrap(), expected);
        assert!(parse_shares("not shares").is_err());
    }

    #[test]
    fn test_recover_from_text() {
        // f(x) = 5 + 3x
        let field = FieldConfig::default();
        assert_eq!(recover_from("[(1, 8), (2, 11)]", &field).unwrap(), 5);
        assert!(recover_from("[(2, 5), (2, 9)]", &field).is_err());
    }
}
