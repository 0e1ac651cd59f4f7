//! Test: Sequencing - steps run one at a time in registration order

use crate::helpers::*;
use std::time::Duration;

#[tokio::test]
async fn test_steps_created_and_run_in_index_order() {
    let journal = journal();
    let mut controller = controller_with(
        &[
            ("first", Behavior::Succeed),
            ("second", Behavior::Succeed),
            ("third", Behavior::Succeed),
        ],
        &journal,
    );

    let report = controller.run().await;
    assert!(report.is_clean());

    assert_eq!(
        entries(&journal),
        vec![
            "create:first",
            "start:first",
            "end:first",
            "create:second",
            "start:second",
            "end:second",
            "create:third",
            "start:third",
            "end:third",
        ]
    );
}

/// Steps that suspend must still finish before the next one starts
#[tokio::test]
async fn test_suspending_steps_never_overlap() {
    let journal = journal();
    let mut controller = controller_with(
        &[
            ("slow", Behavior::Sleep(Duration::from_millis(30))),
            ("fast", Behavior::Succeed),
            ("medium", Behavior::Sleep(Duration::from_millis(10))),
        ],
        &journal,
    );

    controller.run().await;

    assert_strictly_sequential(&journal);
    let starts: Vec<String> = entries(&journal)
        .into_iter()
        .filter(|e| e.starts_with("start:"))
        .collect();
    assert_eq!(starts, vec!["start:slow", "start:fast", "start:medium"]);
}

#[tokio::test]
async fn test_reports_follow_index_order() {
    let journal = journal();
    let mut controller = controller_with(
        &[
            ("a", Behavior::Sleep(Duration::from_millis(5))),
            ("b", Behavior::Fail),
            ("c", Behavior::Succeed),
        ],
        &journal,
    );

    let report = controller.run().await;

    let indexed: Vec<(usize, &str)> = report
        .outcomes
        .iter()
        .map(|r| (r.index, r.name.as_str()))
        .collect();
    assert_eq!(indexed, vec![(0, "a"), (1, "b"), (2, "c")]);
    for pair in report.outcomes.windows(2) {
        assert!(pair[0].finished_at <= pair[1].started_at);
    }
}

/// The same descriptor may appear twice; each occurrence gets its own instance
#[tokio::test]
async fn test_duplicate_descriptor_runs_twice_with_fresh_instances() {
    let journal = journal();
    let mut controller = controller_with(&[("repeat", Behavior::Succeed)], &journal);
    controller.register(["repeat"]).unwrap();

    let captured = capture(&mut controller);
    controller.run().await;

    assert_eq!(
        captured.step_events(),
        vec![(0, "repeat".to_string()), (1, "repeat".to_string())]
    );
    let creations = entries(&journal)
        .into_iter()
        .filter(|e| e == "create:repeat")
        .count();
    assert_eq!(creations, 2);
}
