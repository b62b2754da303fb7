// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_details::AllFixtures;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    /// Log more; repeat for trace output from the engines.
    #[clap(long, short, global = true, parse(from_occurrences))]
    verbose: usize,

    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Minimize random formulas with both engines and verify the covers.
    Check {
        #[clap(long, short, default_value_t = 64)]
        count: usize,

        /// Maximum number of variables per formula.
        #[clap(long, default_value_t = 6)]
        vars: usize,

        #[clap(long, default_value = "boolmin")]
        seed: String,
    },
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Check { count, vars, seed } => {
                let summary = AllFixtures::check_random(count, vars, &seed)?;
                println!("{}", summary);
                Ok(())
            }
        }
    }
}
