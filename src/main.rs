//! hal-navigator main entry point
//!
//! Command-line interface that walks a HAL API from a root URL and prints
//! either the resolved URL or the body of the final resource.

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use hal_navigator::config::load_config;
use hal_navigator::{Navigator, Params};
use reqwest::header::{HeaderName, HeaderValue};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// hal-navigator: follow links through a HAL API
///
/// Steps are applied in the order given on the command line. A follow step
/// may carry template parameters: `--follow 'ea:find:id=123,page=2'`.
#[derive(Parser, Debug)]
#[command(name = "hal-navigator")]
#[command(version)]
#[command(about = "Follow links through a HAL API", long_about = None)]
struct Cli {
    /// Root URL of the API (overrides the config file)
    #[arg(value_name = "ROOT")]
    root: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Follow a link relation, optionally with template parameters (REL[:k=v,...])
    #[arg(short, long = "follow", value_name = "REL")]
    follow: Vec<String>,

    /// Jump to the self link of an embedded resource
    #[arg(short, long = "extract", value_name = "REL")]
    extract: Vec<String>,

    /// Add a session header ('Name: value')
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    header: Vec<String>,

    /// Print the resolved URL instead of fetching it
    #[arg(long)]
    url_only: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// One navigation step in command-line order
enum Step {
    Follow(String),
    Extract(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = <Cli as clap::CommandFactory>::command().get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    setup_logging(cli.verbose, cli.quiet);

    let mut nav = build_navigator(&cli)?;
    for step in ordered_steps(&matches) {
        nav = match step {
            Step::Follow(arg) => {
                let (rel, params) = parse_follow(&arg)?;
                match params {
                    Some(params) => nav.follow_with_params(rel, params),
                    None => nav.follow(rel),
                }
            }
            Step::Extract(rel) => nav.extract(rel),
        };
    }

    for header in &cli.header {
        let (name, value) = parse_header(header)?;
        nav = nav.add_session_header(name, value);
    }

    tracing::debug!(root = nav.root_uri(), hops = nav.path().len(), "Navigating");

    if cli.url_only {
        let url = nav.resolve().await.context("Failed to resolve path")?;
        println!("{}", url);
        return Ok(());
    }

    let response = nav.get(None).await.context("Request failed")?;
    let status = response.status();
    let body = response.text().await.context("Failed to read response")?;

    if !status.is_success() {
        tracing::error!("Final request returned {}", status);
    }
    println!("{}", body);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hal_navigator=info,warn"),
            1 => EnvFilter::new("hal_navigator=debug,info"),
            2 => EnvFilter::new("hal_navigator=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Creates the starting navigator from the config file and/or ROOT argument
fn build_navigator(cli: &Cli) -> anyhow::Result<Navigator> {
    match (&cli.config, &cli.root) {
        (Some(path), root) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let mut config = load_config(path)?;
            if let Some(root) = root {
                config.root = root.clone();
            }
            Ok(config.navigator()?)
        }
        (None, Some(root)) => Ok(Navigator::new(root.clone())),
        (None, None) => bail!("Either ROOT or --config must be given"),
    }
}

/// Interleaves --follow and --extract in the order they appeared
fn ordered_steps(matches: &clap::ArgMatches) -> Vec<Step> {
    let mut steps: Vec<(usize, Step)> = Vec::new();

    if let (Some(indices), Some(values)) = (
        matches.indices_of("follow"),
        matches.get_many::<String>("follow"),
    ) {
        steps.extend(indices.zip(values).map(|(i, v)| (i, Step::Follow(v.clone()))));
    }
    if let (Some(indices), Some(values)) = (
        matches.indices_of("extract"),
        matches.get_many::<String>("extract"),
    ) {
        steps.extend(indices.zip(values).map(|(i, v)| (i, Step::Extract(v.clone()))));
    }

    steps.sort_by_key(|(i, _)| *i);
    steps.into_iter().map(|(_, step)| step).collect()
}

/// Splits `REL[:k=v,...]` into a relation and optional params
///
/// Relations may contain colons themselves (`ea:find`), so the parameter
/// list starts after the last colon that is followed by a `k=v` pair.
fn parse_follow(spec: &str) -> anyhow::Result<(String, Option<Params>)> {
    let split = spec
        .rmatch_indices(':')
        .map(|(i, _)| i)
        .find(|&i| spec[i + 1..].contains('='));

    let Some(split) = split else {
        return Ok((spec.to_string(), None));
    };

    let (rel, list) = (&spec[..split], &spec[split + 1..]);
    if rel.is_empty() {
        bail!("Missing relation in '{}'", spec);
    }

    let mut params = Params::new();
    for pair in list.split(',') {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid parameter '{}' in '{}'", pair, spec))?;
        params.insert(name, value);
    }

    Ok((rel.to_string(), Some(params)))
}

/// Parses `Name: value`
fn parse_header(header: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let (name, value) = header
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid header '{}', expected 'Name: value'", header))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .with_context(|| format!("Invalid header name in '{}'", header))?;
    let value = HeaderValue::from_str(value.trim())
        .with_context(|| format!("Invalid header value in '{}'", header))?;

    Ok((name, value))
}
