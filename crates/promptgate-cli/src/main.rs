//! PromptGate CLI - scan text for prompt injection from the command line.
//!
//! Reads text from the argument list (or stdin when no text is given),
//! runs it through the validation engine, and prints the result as JSON.
//! Exits non-zero when the input is rejected, so the binary slots into
//! shell pipelines as a gate.

use std::io::Read;

use anyhow::Context;
use clap::Parser;
use promptgate_engine::{Validator, ValidatorConfig};

#[derive(Parser)]
#[command(name = "promptgate")]
#[command(about = "PromptGate - prompt injection detection for LLM-backed assistants")]
struct Cli {
    /// Text to validate. Reads stdin when omitted.
    text: Vec<String>,

    /// Accept only Safe and Low threat levels.
    #[arg(short, long)]
    strict: bool,

    /// Maximum input length in characters before truncation.
    #[arg(long, default_value_t = 5000)]
    max_length: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    let input = if cli.text.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        cli.text.join(" ")
    };

    let config = ValidatorConfig {
        max_length: cli.max_length,
        strict_mode: cli.strict,
        ..ValidatorConfig::default()
    };
    let validator = Validator::new(config).context("failed to build validator")?;

    let result = validator.validate(&input);
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.is_valid {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_strict_flag() {
        let cli = Cli::parse_from(["promptgate", "--strict", "hello"]);
        assert!(cli.strict);
        assert_eq!(cli.text, vec!["hello"]);
        assert_eq!(cli.max_length, 5000);
    }
}
