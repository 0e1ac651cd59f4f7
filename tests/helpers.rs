//! Test utility functions for the bootstrap pipeline
#![allow(dead_code)]

use async_trait::async_trait;
use bootstrap::core::{PipelineCompleted, Step, StepCompleted, StepError, StepFactory};
use bootstrap::execution::PipelineController;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared, ordered record of what the steps did
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// What a recording step does when it runs
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
    /// Sleep before succeeding, to force a suspension point
    Sleep(Duration),
}

/// Step that writes `start:<name>` and `end:<name>` to a journal
pub struct RecordingStep {
    name: &'static str,
    behavior: Behavior,
    journal: Journal,
}

#[async_trait]
impl Step for RecordingStep {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run_internal(&mut self) -> Result<(), StepError> {
        self.journal.lock().unwrap().push(format!("start:{}", self.name));
        let result = match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(StepError::failed(format!("{} refused to start", self.name))),
            Behavior::Panic => panic!("{} panicked", self.name),
            Behavior::Sleep(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        };
        self.journal.lock().unwrap().push(format!("end:{}", self.name));
        result
    }
}

/// Factory of recording steps; every construction is journaled as `create:<name>`
pub fn recording_factory(steps: &[(&'static str, Behavior)], journal: &Journal) -> StepFactory {
    let mut factory = StepFactory::new();
    for &(name, behavior) in steps {
        let journal = journal.clone();
        factory.register_with(name, move || {
            journal.lock().unwrap().push(format!("create:{}", name));
            Box::new(RecordingStep {
                name,
                behavior,
                journal: journal.clone(),
            })
        });
    }
    factory
}

/// Events observed on a controller
#[derive(Clone, Default)]
pub struct Captured {
    pub steps: Arc<Mutex<Vec<StepCompleted>>>,
    pub completions: Arc<AtomicUsize>,
}

impl Captured {
    pub fn step_events(&self) -> Vec<(usize, String)> {
        self.steps
            .lock()
            .unwrap()
            .iter()
            .map(|e| (e.index, e.name.clone()))
            .collect()
    }

    pub fn completion_count(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

/// Attach capturing listeners to both notification channels
pub fn capture(controller: &mut PipelineController) -> Captured {
    let captured = Captured::default();

    let steps = captured.steps.clone();
    controller.on_step_completed(move |event: &StepCompleted| {
        steps.lock().unwrap().push(event.clone())
    });

    let completions = captured.completions.clone();
    controller.on_pipeline_completed(move |_: &PipelineCompleted| {
        completions.fetch_add(1, Ordering::SeqCst);
    });

    captured
}

/// Controller with recording steps registered in the given order
pub fn controller_with(
    steps: &[(&'static str, Behavior)],
    journal: &Journal,
) -> PipelineController {
    let mut controller = PipelineController::new(recording_factory(steps, journal));
    controller
        .register(steps.iter().map(|(name, _)| *name))
        .unwrap();
    controller
}

/// Assert that no step started before the previous one ended
pub fn assert_strictly_sequential(journal: &Journal) {
    let mut running: Option<String> = None;
    for entry in entries(journal) {
        if let Some(name) = entry.strip_prefix("start:") {
            assert!(
                running.is_none(),
                "step {} started while {:?} was still running",
                name,
                running
            );
            running = Some(name.to_string());
        } else if let Some(name) = entry.strip_prefix("end:") {
            assert_eq!(running.as_deref(), Some(name), "unexpected end of {}", name);
            running = None;
        }
    }
}
