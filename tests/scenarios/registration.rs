//! Test: Registration - descriptor validation and registry ordering

use crate::helpers::*;
use bootstrap::steps::{builtin_factory, NoopStep, WarmupStep};
use bootstrap::{BootstrapError, PipelineController, PipelineStatus, StepDescriptor};

#[tokio::test]
async fn test_invalid_descriptors_excluded_order_preserved() {
    let journal = journal();
    let factory = recording_factory(
        &[
            ("a", Behavior::Succeed),
            ("b", Behavior::Succeed),
            ("c", Behavior::Succeed),
        ],
        &journal,
    );
    let mut controller = PipelineController::new(factory);

    let registration = controller
        .register(["c", "missing", "a", "also_missing", "b"])
        .unwrap();

    assert_eq!(
        registration.rejected,
        vec![
            StepDescriptor::from("missing"),
            StepDescriptor::from("also_missing")
        ]
    );
    assert_eq!(
        controller.steps(),
        &[
            StepDescriptor::from("c"),
            StepDescriptor::from("a"),
            StepDescriptor::from("b")
        ]
    );

    let captured = capture(&mut controller);
    controller.run().await;
    assert_eq!(
        captured.step_events(),
        vec![
            (0, "c".to_string()),
            (1, "a".to_string()),
            (2, "b".to_string())
        ]
    );
}

#[tokio::test]
async fn test_bulk_and_repeated_register_calls_append() {
    let mut controller = PipelineController::new(builtin_factory());
    controller.register(["noop"]).unwrap();
    controller
        .register(vec![StepDescriptor::of::<WarmupStep>(), StepDescriptor::of::<NoopStep>()])
        .unwrap();

    assert_eq!(
        controller.steps(),
        &[
            StepDescriptor::from("noop"),
            StepDescriptor::from("warmup"),
            StepDescriptor::from("noop")
        ]
    );
}

#[tokio::test]
async fn test_registration_closed_until_reset() {
    let mut controller = PipelineController::new(builtin_factory());
    controller.register(["noop"]).unwrap();
    controller.run().await;

    assert_eq!(
        controller.register(["warmup"]),
        Err(BootstrapError::RegistrationClosed {
            status: PipelineStatus::Completed
        })
    );
    assert_eq!(controller.steps().len(), 1);

    controller.reset();
    controller.register(["warmup"]).unwrap();
    assert_eq!(controller.steps().len(), 2);
}

#[tokio::test]
async fn test_typed_registration() {
    let mut controller = PipelineController::new(Default::default());
    controller.register_kind::<NoopStep>().unwrap();
    controller.register_kind::<WarmupStep>().unwrap();

    let captured = capture(&mut controller);
    let report = controller.run().await;

    assert!(report.is_clean());
    assert_eq!(
        captured.step_events(),
        vec![(0, "noop".to_string()), (1, "warmup".to_string())]
    );
}
