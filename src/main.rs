// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use asyncflow::backends::local::builtin_registry;
use asyncflow::config::consts::INPUT_ASSIGNMENT;
use asyncflow::config::{load_and_validate_config, RuntimeBuilder};
use asyncflow::engine::Identifier;
use asyncflow::errors::ConfigurationError;

/// Parse `name@version=value` into an identifier and an `f64` payload.
fn parse_input(arg: &str) -> Result<(Identifier, f64), ConfigurationError> {
    let invalid = |reason: &str| ConfigurationError::InvalidInput {
        input: arg.to_string(),
        reason: reason.to_string(),
    };

    let (identifier, value) = arg
        .split_once(INPUT_ASSIGNMENT)
        .ok_or_else(|| invalid("expected <identifier>=<value>"))?;
    let identifier: Identifier = identifier.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("value is not a number"))?;

    Ok((identifier, value))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <workflow.yaml> [name@version=value ...]", args[0]);
        eprintln!("Example: {} demos/arithmetic.yaml A=2 B=3 C=4", args[0]);
        std::process::exit(1);
    }

    let config_file = &args[1];
    let inputs = args[2..]
        .iter()
        .map(|arg| parse_input(arg))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = builtin_registry();
    let config = load_and_validate_config(config_file, &registry)?;
    let workflow = RuntimeBuilder::from_config(&config, &registry)?
        .initialize()
        .with_context(|| format!("wiring {}", config_file))?;

    let start_time = Instant::now();
    for (identifier, value) in inputs {
        workflow.feed(&identifier, value).await?;
    }
    workflow.run().await?;

    println!("📋 Configuration: {}", config_file);
    println!("⏱️  Completed in {:?}", start_time.elapsed());
    for identifier in workflow.outputs() {
        let value = workflow.read(identifier).await?;
        println!("  {} = {}", identifier, value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inputs_with_and_without_versions() {
        assert_eq!(parse_input("A=2").unwrap(), (Identifier::new("A", "1.0"), 2.0));
        assert_eq!(
            parse_input("B@2.0 = -1.5").unwrap(),
            (Identifier::new("B", "2.0"), -1.5)
        );
    }

    #[test]
    fn rejects_malformed_inputs() {
        assert!(matches!(
            parse_input("A"),
            Err(ConfigurationError::InvalidInput { .. })
        ));
        assert!(matches!(
            parse_input("A=two"),
            Err(ConfigurationError::InvalidInput { .. })
        ));
        assert!(matches!(
            parse_input("@1.0=2"),
            Err(ConfigurationError::InvalidIdentifier { .. })
        ));
    }
}
