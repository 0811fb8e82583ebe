// SPDX-License-Identifier: Apache-2.0

use clap::error::ErrorKind;
use env_logger::{Builder, Env};
use outlier::{cli::CliConfig, config::Config, run, shell::print_error};
use std::process::exit;

/// Entry point for Outlier.
///
/// Sets up logging and makes sure error codes are output correctly.
fn main() {
	init_log();
	exit(go().exit_code())
}

/// The environment variable for configuring logging output.
static LOG_NAME: &str = "OUTLIER_LOG";

/// The environment variable for configuring logging style.
static LOG_STYLE: &str = "OUTLIER_LOG_STYLE";

/// Initialize the logger.
fn init_log() {
	let env = Env::new().filter(LOG_NAME).write_style(LOG_STYLE);
	Builder::from_env(env).init();
}

/// How a run of Outlier ended.
enum Outcome {
	Ok,
	Err,
}

impl Outcome {
	fn exit_code(&self) -> i32 {
		match self {
			Outcome::Ok => 0,
			Outcome::Err => 1,
		}
	}
}

fn go() -> Outcome {
	let cli = match CliConfig::load() {
		Ok(cli) => cli,
		Err(e) => return usage(e),
	};

	cli.color().apply();

	let config = match Config::try_from(cli) {
		Ok(config) => config,
		Err(e) => {
			print_error(&e.into());
			return Outcome::Err;
		}
	};

	log::debug!("loaded configuration [config={:?}]", config);

	let mut stdout = std::io::stdout().lock();
	match run(&config, &mut stdout) {
		Ok(()) => Outcome::Ok,
		Err(e) => {
			print_error(&e);
			Outcome::Err
		}
	}
}

/// Print help, version, or a usage error from argument parsing.
fn usage(error: clap::Error) -> Outcome {
	let outcome = match error.kind() {
		ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Outcome::Ok,
		_ => Outcome::Err,
	};

	// Nothing more can be reported if stdout or stderr is gone.
	let _ = error.print();

	outcome
}
