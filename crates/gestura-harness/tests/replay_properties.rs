//! Property tests for scripted replay.
//!
//! 1. Replaying the same scenario twice yields the same trace
//! 2. Traces survive the JSONL round trip
//! 3. Trace timestamps never go backwards
//! 4. Consecutive entries of one recognizer chain (`to` of one is `from` of the next)

use gestura_core::{DragConfig, PanConfig};
use gestura_harness::cli::replay;
use gestura_harness::{RecognizerSpec, Scenario, Script, Trace};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Down(u8),
    Up(u8),
    MoveBy(f64, f64),
    TouchStart(u64, f64, f64),
    TouchMove(u64, f64, f64),
    TouchEnd(u64),
    TouchCancel(u64),
    Wait(u64),
    Reset,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => (0u8..2).prop_map(Action::Down),
        2 => (0u8..2).prop_map(Action::Up),
        4 => (-15.0f64..15.0, -15.0f64..15.0).prop_map(|(dx, dy)| Action::MoveBy(dx, dy)),
        2 => (0u64..3, -50.0f64..50.0, -50.0f64..50.0)
            .prop_map(|(id, x, y)| Action::TouchStart(id, x, y)),
        4 => (0u64..3, -50.0f64..50.0, -50.0f64..50.0)
            .prop_map(|(id, x, y)| Action::TouchMove(id, x, y)),
        2 => (0u64..3).prop_map(Action::TouchEnd),
        1 => (0u64..3).prop_map(Action::TouchCancel),
        2 => (0u64..700).prop_map(Action::Wait),
        1 => Just(Action::Reset),
    ]
}

fn script_strategy() -> impl Strategy<Value = Script> {
    prop::collection::vec(action_strategy(), 0..60).prop_map(|actions| {
        actions
            .into_iter()
            .fold(Script::new(), |script, action| match action {
                Action::Down(b) => script.down(b),
                Action::Up(b) => script.up(b),
                Action::MoveBy(dx, dy) => script.move_by(dx, dy),
                Action::TouchStart(id, x, y) => script.touch_start(id, x, y),
                Action::TouchMove(id, x, y) => script.touch_move(id, x, y),
                Action::TouchEnd(id) => script.touch_end(id, 0.0, 0.0),
                Action::TouchCancel(id) => script.touch_cancel(id),
                Action::Wait(ms) => script.wait(ms),
                Action::Reset => script.reset(),
            })
    })
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (1u32..3, 1u32..3, 1u32..3, script_strategy()).prop_map(|(clicks, taps, min, script)| {
        Scenario::new("generated")
            .with_recognizer(
                RecognizerSpec::drag(DragConfig::default().with_clicks(clicks)).labeled("drag"),
            )
            .with_recognizer(
                RecognizerSpec::pan(PanConfig::default().with_taps(taps).with_min_touches(min))
                    .labeled("pan"),
            )
            .with_script(script)
    })
}

proptest! {
    #[test]
    fn replay_is_deterministic(scenario in scenario_strategy()) {
        let first = replay(&scenario).unwrap();
        let second = replay(&scenario).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn trace_survives_jsonl(scenario in scenario_strategy()) {
        let trace = replay(&scenario).unwrap();
        let parsed = Trace::from_jsonl(&trace.to_jsonl().unwrap()).unwrap();
        prop_assert_eq!(parsed, trace);
    }

    #[test]
    fn timestamps_are_monotonic(scenario in scenario_strategy()) {
        let trace = replay(&scenario).unwrap();
        for pair in trace.entries().windows(2) {
            prop_assert!(pair[0].at_ms <= pair[1].at_ms, "{:?}", pair);
            prop_assert!(pair[0].step <= pair[1].step, "{:?}", pair);
        }
    }

    #[test]
    fn transitions_chain_per_recognizer(scenario in scenario_strategy()) {
        let trace = replay(&scenario).unwrap();
        for label in ["drag", "pan"] {
            let transitions = trace.transitions_for(label);
            for pair in transitions.windows(2) {
                prop_assert_eq!(pair[0].1, pair[1].0, "{} broke the chain", label);
            }
        }
    }
}
