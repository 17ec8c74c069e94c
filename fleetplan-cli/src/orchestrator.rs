//! Sequencing of a single invocation.
//!
//! The orchestrator never writes and never exits. It returns an [`Outcome`]
//! describing what the process boundary should emit.

use std::ffi::OsString;
use std::fmt;

use fleetplan_core::{Engine, Solution, SolveParams};
use log::{debug, info, warn};

use crate::CliError;
use crate::args::{ParsedArgs, parse_args, usage};
use crate::diagnostics::configure_diagnostics;
use crate::input::acquire_input;
use crate::options::{Destination, OptionSet, destination_of};

/// Stage at which an invocation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Scanning the command line.
    ParsingArgs,
    /// Converting `-t` and `-x`.
    ValidatingNumerics,
    /// Reading the problem text.
    AcquiringInput,
    /// Handing the problem text to the engine.
    BuildingProblem,
    /// Searching for a solution.
    Solving,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ParsingArgs => "argument parsing",
            Self::ValidatingNumerics => "numeric validation",
            Self::AcquiringInput => "input acquisition",
            Self::BuildingProblem => "problem building",
            Self::Solving => "solving",
        };
        f.write_str(name)
    }
}

/// What a finished invocation produced.
#[derive(Debug)]
pub enum Outcome {
    /// Usage text for `-h`, `-?` or a missing input.
    Usage(String),
    /// A solution ready to be written.
    Solved {
        /// Where the solution goes.
        destination: Destination,
        /// Solution document, geometry already stripped unless requested.
        solution: Box<Solution>,
    },
    /// A failure to report as an error envelope.
    Failed {
        /// Stage that failed.
        stage: Stage,
        /// Where the envelope goes.
        destination: Destination,
        /// The failure.
        error: CliError,
    },
}

impl Outcome {
    /// Process exit code for this outcome.
    ///
    /// # Examples
    /// ```
    /// use fleetplan_cli::Outcome;
    ///
    /// assert_eq!(Outcome::Usage(String::new()).exit_code(), 0);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::Solved { .. } => 0,
            Self::Failed { .. } => 1,
        }
    }

    const fn failed(stage: Stage, destination: Destination, error: CliError) -> Self {
        Self::Failed {
            stage,
            destination,
            error,
        }
    }
}

/// Runs invocations against an [`Engine`].
pub struct Orchestrator<'a> {
    engine: &'a dyn Engine,
}

impl<'a> Orchestrator<'a> {
    /// Build an orchestrator delegating to `engine`.
    #[must_use]
    pub const fn new(engine: &'a dyn Engine) -> Self {
        Self { engine }
    }

    /// Run one invocation for `argv`, program name first.
    pub fn execute<I, T>(&self, argv: I) -> Outcome
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let draft = match parse_args(argv) {
            Ok(ParsedArgs::Help) => return Outcome::Usage(usage()),
            Ok(ParsedArgs::Draft(draft)) => draft,
            Err(failure) => {
                return Outcome::failed(Stage::ParsingArgs, failure.destination, failure.error);
            }
        };

        let destination = destination_of(&draft);
        let options = match OptionSet::try_from(*draft) {
            Ok(options) => options,
            Err(err) => return Outcome::failed(Stage::ValidatingNumerics, destination, err),
        };

        let input = match acquire_input(&options) {
            Ok(Some(input)) => input,
            Ok(None) => return Outcome::Usage(usage()),
            Err(err) => return Outcome::failed(Stage::AcquiringInput, options.output, err),
        };

        self.solve(&options, &input)
    }

    fn solve(&self, options: &OptionSet, input: &str) -> Outcome {
        let diagnostics = configure_diagnostics(options.diagnostic_level);
        debug!("Routing options: {:?}", options.routing);
        let destination = options.output.clone();

        let problem = match self.engine.parse(input, &options.routing, &diagnostics) {
            Ok(problem) => problem,
            Err(err) => {
                return report(Stage::BuildingProblem, destination, CliError::ProblemBuild(err));
            }
        };
        info!("Problem built");

        let params = SolveParams {
            exploration_level: options.exploration_level,
            threads: options.threads,
        };
        debug!(
            "Solving with exploration level {} on {} threads",
            params.exploration_level, params.threads
        );
        let solution = match problem.solve(params, &diagnostics) {
            Ok(solution) => solution,
            Err(err) => return report(Stage::Solving, destination, CliError::Solve(err)),
        };
        info!("Problem solved");

        let rendered = if options.include_geometry {
            solution
        } else {
            solution.without_geometry()
        };
        Outcome::Solved {
            destination,
            solution: Box::new(rendered),
        }
    }
}

fn report(stage: Stage, destination: Destination, error: CliError) -> Outcome {
    if !error.is_domain() {
        warn!("Engine backend failure during {stage}");
    }
    Outcome::failed(stage, destination, error)
}
