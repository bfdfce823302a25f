//! `telos` command line: simulate, navigate, sanity and score

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use telos_engine::{assess, AnswerSet, EngineConfig};
use telos_harness::{run_batched, run_navigation_scenario, run_sanity_flow, SimulatorConfig};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("telos")
        .version(telos_harness::VERSION)
        .about("TELOS portfolio purpose assessment")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Scoring configuration (TOML)"),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Run randomized assessment sessions")
                .arg(
                    Arg::new("runs")
                        .long("runs")
                        .default_value("100")
                        .value_parser(value_parser!(usize))
                        .help("Number of sessions to simulate"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("batch-size")
                        .long("batch-size")
                        .default_value("10")
                        .value_parser(value_parser!(usize))
                        .help("Sessions run concurrently per batch"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(Command::new("navigate").about("Run the navigation scenario"))
        .subcommand(Command::new("sanity").about("Run a single sanity pass"))
        .subcommand(
            Command::new("score")
                .about("Score one set of fifteen answers")
                .arg(
                    Arg::new("answers")
                        .required(true)
                        .help("Fifteen answers 1-5, comma or space separated"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<EngineConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let Some((name, args)) = matches.subcommand() else {
        return Ok(ExitCode::FAILURE);
    };
    // Global args resolve on the subcommand's matches wherever they appear
    let engine = load_config(args)?;

    match name {
        "simulate" => {
            let json = args.get_flag("json");
            let config = SimulatorConfig::default()
                .with_runs(args.get_one::<usize>("runs").copied().unwrap_or(100))
                .with_seed(args.get_one::<u64>("seed").copied().unwrap_or(42))
                .with_batch_size(args.get_one::<usize>("batch-size").copied().unwrap_or(10))
                .with_engine(engine);

            if !json {
                println!("Running TELOS Simulator...");
                println!("Runs: {}", config.runs);
                println!("Seed: {}", config.seed);
                println!();
            }

            let report = run_batched(config).await.context("running simulator")?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report.generate_text());
            }
            Ok(exit_code(report.passed()))
        }
        "navigate" => {
            let report = run_navigation_scenario(&engine);
            println!("{}", report.generate_text());
            Ok(exit_code(report.passed()))
        }
        "sanity" => {
            let report = run_sanity_flow(&engine);
            println!("{}", report.generate_text());
            Ok(exit_code(report.passed()))
        }
        "score" => {
            let raw = args.get_one::<String>("answers").map(String::as_str).unwrap_or_default();
            let answers: AnswerSet = raw.parse().with_context(|| format!("parsing answers {raw:?}"))?;
            let assessment = assess(&answers, &engine);
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{assessment}");
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn simulate_defaults() {
        let m = cli().try_get_matches_from(["telos", "simulate"]).unwrap();
        let (_, args) = m.subcommand().unwrap();
        assert_eq!(args.get_one::<usize>("runs"), Some(&100));
        assert_eq!(args.get_one::<u64>("seed"), Some(&42));
        assert!(!args.get_flag("json"));
    }

    #[test]
    fn config_is_global() {
        let m = cli()
            .try_get_matches_from(["telos", "score", "3,3,3,3,3,3,3,3,3,3,3,3,3,3,3", "--config", "x.toml"])
            .unwrap();
        let (_, args) = m.subcommand().unwrap();
        assert_eq!(args.get_one::<PathBuf>("config"), Some(&PathBuf::from("x.toml")));
    }
}
