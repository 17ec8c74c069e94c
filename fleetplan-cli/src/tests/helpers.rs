//! Test doubles and capture helpers for driving the CLI end to end.

use std::sync::{Arc, Mutex};

use camino::Utf8PathBuf;
use fleetplan_core::{
    Diagnostics, Engine, EngineError, ProblemInstance, RouteSummary, RoutingOptions, Solution,
    SolveParams, Step, StepKind, Summary,
};
use tempfile::TempDir;

use super::*;

/// How the stub engine answers.
#[derive(Debug, Clone)]
pub(super) enum StubBehaviour {
    Solve(Solution),
    RejectProblem(EngineError),
    FailSolve(EngineError),
}

/// Engine double recording what the orchestrator handed it.
#[derive(Debug)]
pub(super) struct StubEngine {
    behaviour: StubBehaviour,
    parsed: Mutex<Vec<(String, RoutingOptions)>>,
    solved: Arc<Mutex<Vec<SolveParams>>>,
}

impl StubEngine {
    pub(super) fn new(behaviour: StubBehaviour) -> Self {
        Self {
            behaviour,
            parsed: Mutex::new(Vec::new()),
            solved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(super) fn solving() -> Self {
        Self::new(StubBehaviour::Solve(sample_solution()))
    }

    pub(super) fn parsed(&self) -> Vec<(String, RoutingOptions)> {
        self.parsed.lock().expect("parsed lock").clone()
    }

    pub(super) fn solved(&self) -> Vec<SolveParams> {
        self.solved.lock().expect("solved lock").clone()
    }
}

impl Engine for StubEngine {
    fn parse(
        &self,
        input: &str,
        routing: &RoutingOptions,
        _diagnostics: &Diagnostics,
    ) -> Result<Box<dyn ProblemInstance>, EngineError> {
        self.parsed
            .lock()
            .expect("parsed lock")
            .push((input.to_owned(), routing.clone()));
        if let StubBehaviour::RejectProblem(err) = &self.behaviour {
            return Err(err.clone());
        }
        Ok(Box::new(StubProblem {
            behaviour: self.behaviour.clone(),
            solved: Arc::clone(&self.solved),
        }))
    }
}

struct StubProblem {
    behaviour: StubBehaviour,
    solved: Arc<Mutex<Vec<SolveParams>>>,
}

impl ProblemInstance for StubProblem {
    fn solve(&self, params: SolveParams, _diagnostics: &Diagnostics) -> Result<Solution, EngineError> {
        self.solved.lock().expect("solved lock").push(params);
        match &self.behaviour {
            StubBehaviour::Solve(solution) => Ok(solution.clone()),
            StubBehaviour::FailSolve(err) | StubBehaviour::RejectProblem(err) => Err(err.clone()),
        }
    }
}

/// One route with geometry, as an engine would return it.
pub(super) fn sample_solution() -> Solution {
    let start = Step {
        kind: StepKind::Start,
        location: Some([2.35, 48.85]),
        ..Step::default()
    };
    let job = Step {
        kind: StepKind::Job,
        job: Some(10),
        location: Some([2.36, 48.86]),
        arrival: 120,
        duration: 120,
        service: 300,
        ..Step::default()
    };
    Solution {
        code: 0,
        summary: Summary {
            cost: 120,
            service: 300,
            duration: 120,
            ..Summary::default()
        },
        unassigned: Vec::new(),
        routes: vec![RouteSummary {
            vehicle: 1,
            cost: 120,
            service: 300,
            duration: 120,
            steps: vec![start, job],
            geometry: Some(vec![[2.35, 48.85], [2.36, 48.86]]),
        }],
    }
}

/// Everything an invocation emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Captured {
    pub(super) exit_code: u8,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

impl Captured {
    pub(super) fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout should hold JSON")
    }
}

/// Run the CLI with `args` (program name excluded) against `engine`.
pub(super) fn run_cli(engine: &dyn Engine, args: &[&str]) -> Captured {
    let argv = std::iter::once("fleetplan").chain(args.iter().copied());
    let outcome = Orchestrator::new(engine).execute(argv);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit_code = finish(outcome, &mut stdout, &mut stderr);
    Captured {
        exit_code,
        stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
    }
}

/// Temporary directory addressed with UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("write workspace file");
        path
    }

    pub(super) fn read_json(&self, name: &str) -> serde_json::Value {
        let text = std::fs::read_to_string(self.path(name)).expect("read workspace file");
        serde_json::from_str(&text).expect("workspace file should hold JSON")
    }
}
