// SPDX-License-Identifier: Apache-2.0

//! Terminal concerns: colour selection and error output.

use console::style;

/// Selection of whether the CLI output should use color.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
	/// Always use color output
	Always,
	/// Never use color output
	Never,
	/// Guess whether to use color output
	#[default]
	Auto,
}

impl ColorChoice {
	/// Apply the choice to all terminal output.
	///
	/// `Auto` leaves `console`'s own terminal detection in charge.
	pub fn apply(self) {
		let enable = match self {
			ColorChoice::Always => true,
			ColorChoice::Never => false,
			ColorChoice::Auto => return,
		};

		console::set_colors_enabled(enable);
		console::set_colors_enabled_stderr(enable);
	}
}

/// Print an error and its chain of causes to stderr.
pub fn print_error(error: &anyhow::Error) {
	let mut chain = error.chain();

	if let Some(head) = chain.next() {
		eprintln!("{} {}", style("error:").for_stderr().red().bold(), head);
	}

	for cause in chain {
		eprintln!("  {} {}", style("caused by:").for_stderr().bold(), cause);
	}
}
