#[cfg(test)]
mod tests {
    use serde_json::json;
    use stepwise_framework::{ActionDescriptor, Hook};

    use crate::error::HarnessError;
    use crate::record::{TrackingRecord, WaitOn};
    use crate::step::Step;
    use crate::tracker::Tracker;

    // --- Tracking Record Tests ---

    #[test]
    fn test_record_reset_keeps_last_state() {
        let mut record: TrackingRecord<String> = TrackingRecord::new();
        record.track_state(json!({ "count": 1 }));
        record.track_state(json!({ "count": 2 }));
        record.start_action(ActionDescriptor::named("inc"));
        record.track_view("2".to_string());
        record.arm(WaitOn::Render);

        record.reset();

        assert_eq!(record.states(), &[json!({ "count": 2 })]);
        assert!(record.actions().is_empty());
        assert!(record.views().is_empty());
        assert_eq!(record.pending_actions(), 0);
        assert_eq!(record.on(), None);
    }

    #[test]
    fn test_record_reset_on_empty_states() {
        let mut record: TrackingRecord<()> = TrackingRecord::new();
        record.reset();
        assert!(record.states().is_empty());
    }

    #[test]
    fn test_record_pending_never_negative() {
        let mut record: TrackingRecord<()> = TrackingRecord::new();
        record.end_action();
        assert_eq!(record.pending_actions(), 0);
    }

    #[test]
    fn test_record_fire_requires_matching_event_and_no_pending() {
        let mut record: TrackingRecord<()> = TrackingRecord::new();
        assert!(!record.fire(WaitOn::Update), "nothing armed");

        record.arm(WaitOn::Render);
        assert!(!record.fire(WaitOn::Update), "wrong event");

        record.start_action(ActionDescriptor::named("a"));
        assert!(!record.fire(WaitOn::Render), "action still pending");

        record.end_action();
        assert!(record.fire(WaitOn::Render));
        assert!(!record.fire(WaitOn::Render), "completion is one-shot");
    }

    #[test]
    fn test_record_first_last_and_names() {
        let mut record: TrackingRecord<()> = TrackingRecord::new();
        record.track_state(json!({ "n": 0 }));
        record.track_state(json!({ "n": 1 }));
        record.start_action(ActionDescriptor::named("a"));
        record.start_action(ActionDescriptor::new("b", Some(json!(3))));
        assert_eq!(record.first_state(), Some(&json!({ "n": 0 })));
        assert_eq!(record.last_state(), Some(&json!({ "n": 1 })));
        assert_eq!(record.action_names(), vec!["a", "b"]);
    }

    // --- Tracker Tests ---

    #[test]
    fn test_tracker_settles_on_update_when_pending_drains() {
        let mut tracker: Tracker<()> = Tracker::new();
        tracker.arm(WaitOn::Update);

        let first = ActionDescriptor::named("first");
        let second = ActionDescriptor::named("second");
        tracker.on_action(&first);
        tracker.on_action(&second);
        tracker.on_commit(&second, &json!({ "b": 1 }));
        assert!(!tracker.is_settled());
        assert_eq!(tracker.record().pending_actions(), 1);

        tracker.on_commit(&first, &json!({ "a": 1, "b": 1 }));
        assert!(tracker.is_settled());
        assert_eq!(tracker.record().actions(), &[first, second]);
        assert_eq!(tracker.record().states().len(), 2);
    }

    #[test]
    fn test_tracker_render_mode_ignores_commit() {
        let mut tracker: Tracker<String> = Tracker::new();
        tracker.arm(WaitOn::Render);
        let action = ActionDescriptor::named("go");
        tracker.on_action(&action);
        tracker.on_commit(&action, &json!({}));
        assert!(!tracker.is_settled());

        tracker.on_render(&"view".to_string());
        assert!(tracker.is_settled());
        assert_eq!(tracker.record().views(), &["view".to_string()]);
    }

    #[test]
    fn test_tracker_reset_clears_settled() {
        let mut tracker: Tracker<()> = Tracker::new();
        tracker.track_state(json!({}));
        tracker.arm(WaitOn::Update);
        let action = ActionDescriptor::named("x");
        tracker.on_action(&action);
        tracker.on_commit(&action, &json!({ "x": 1 }));
        assert!(tracker.is_settled());

        tracker.reset();
        assert!(!tracker.is_settled());
        assert_eq!(tracker.record().states(), &[json!({ "x": 1 })]);
    }

    // --- Step Tests ---

    #[test]
    fn test_step_shapes() {
        let plain: Step<()> = Step::dispatch("inc");
        assert_eq!(plain.name(), "inc");
        assert_eq!(plain.data(), None);

        let with_data: Step<()> = Step::dispatch("inc").with_data(json!({ "by": 2 }));
        assert_eq!(with_data.data(), Some(&json!({ "by": 2 })));
        assert!(format!("{with_data:?}").contains("inc"));
    }

    #[test]
    fn test_step_try_new_maps_error_message() {
        let step: Step<()> = Step::try_new("x", |_| Err::<(), _>("nope"));
        let (_, _, assertion) = step.into_parts();
        assert_eq!(assertion(&TrackingRecord::new()), Err("nope".to_string()));
    }

    #[test]
    fn test_step_expect_states_reports_mismatch() {
        let mut record: TrackingRecord<()> = TrackingRecord::new();
        record.track_state(json!({ "n": 1 }));

        let (_, _, ok) = Step::<()>::expect_states("x", vec![json!({ "n": 1 })]).into_parts();
        assert_eq!(ok(&record), Ok(()));

        let (_, _, bad) = Step::<()>::expect_states("x", vec![json!({ "n": 2 })]).into_parts();
        let msg = bad(&record).unwrap_err();
        assert!(msg.starts_with("states mismatch"), "{msg}");
        assert!(msg.contains(r#"[{"n":2}]"#), "{msg}");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            HarnessError::UnknownAction("wrong".into()).to_string(),
            "unknown action: wrong"
        );
        assert_eq!(HarnessError::Assertion("boom".into()).to_string(), "boom");
    }
}
