use std::path::PathBuf;
use std::process::ExitCode;

use botworks::*;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ---------- Arguments ----------
/// Headless runner: load a level (or generate one) and tick it.
#[derive(Debug, Parser)]
#[command(name = "botworks-sim", version)]
struct Args {
	/// Level JSON file. When absent a scenario is generated from `--seed`.
	#[arg(long)]
	level: Option<PathBuf>,
	#[arg(long, default_value_t = 42)]
	seed: u64,
	#[arg(long, default_value_t = 2)]
	teams: u32,
	#[arg(long, default_value_t = 4)]
	workers: u32,
	#[arg(long, default_value_t = 3)]
	tasks: u32,
	#[arg(long, default_value_t = 10)]
	ticks: u64,
	/// Print the final entity snapshot as JSON instead of the panel.
	#[arg(long)]
	json: bool,
}

// ---------- Entry ----------
fn main() -> ExitCode {
	init_tracing();
	let args = Args::parse();
	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!(error = %e, "simulation failed");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.compact()
		.init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
	let level = args.level.as_ref().map(Level::load).transpose()?;
	let mut engine = match &level {
		Some(level) => level.build_engine()?,
		None => {
			let config = ScenarioConfig {
				teams: args.teams,
				workers_per_team: args.workers,
				tasks_per_team: args.tasks,
				..ScenarioConfig::default()
			};
			info!(seed = args.seed, ?config, "generating scenario");
			Engine::new(generate(args.seed, &config)?)
		}
	};

	engine.run(args.ticks)?;

	if args.json {
		let snapshot = engine.game.snapshot();
		let entities: Vec<&Entity> = snapshot.iter().map(|e| e.as_ref()).collect();
		println!("{}", serde_json::to_string_pretty(&entities)?);
		return Ok(());
	}

	println!("{}", format_status_line(&engine));
	for line in format_side_panel(&engine.game) {
		println!("{line}");
	}
	if let Some(level) = &level {
		println!("[Goals] {}", level.label);
		for goal in level.evaluate(&engine) {
			let mark = if goal.met { "x" } else { " " };
			let kind = if goal.is_mandatory { "" } else { " (optional)" };
			println!("[{mark}] {}{kind}", goal.desc);
		}
		println!("Solved: {}", level.is_solved(&engine));
	}
	Ok(())
}
