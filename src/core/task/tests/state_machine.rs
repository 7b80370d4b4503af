use crate::core::task::{TaskState, can_transition};

#[test]
fn lifecycle_happy_path_transitions_are_allowed() {
    assert!(can_transition(TaskState::Pending, TaskState::Running));
    assert!(can_transition(TaskState::Running, TaskState::Done));
    assert!(can_transition(TaskState::Running, TaskState::Failed));
}

#[test]
fn no_state_is_skipped() {
    assert!(!can_transition(TaskState::Pending, TaskState::Done));
    assert!(!can_transition(TaskState::Pending, TaskState::Failed));
}

#[test]
fn terminal_states_absorb() {
    for terminal in [TaskState::Done, TaskState::Failed] {
        for to in [
            TaskState::Pending,
            TaskState::Running,
            TaskState::Done,
            TaskState::Failed,
        ] {
            assert!(
                !can_transition(terminal, to),
                "expected {terminal} -> {to} to be rejected"
            );
        }
    }
}

#[test]
fn nothing_returns_to_pending() {
    for from in [TaskState::Running, TaskState::Done, TaskState::Failed] {
        assert!(!can_transition(from, TaskState::Pending));
    }
}

#[test]
fn wire_form_is_uppercase() {
    assert_eq!(TaskState::Pending.as_str(), "PENDING");
    assert_eq!(TaskState::Running.as_str(), "RUNNING");
    assert_eq!(TaskState::Done.as_str(), "DONE");
    assert_eq!(TaskState::Failed.as_str(), "FAILED");
}
