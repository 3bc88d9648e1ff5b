//! Integration tests for the timer engine's session and cycle rules.

use pomotick_core::{Event, Intent, SessionType, TimerEngine, TimerState};
use proptest::prelude::*;

/// Start the current session and tick until it completes.
fn finish_session(engine: &mut TimerEngine) -> Event {
    engine.start().expect("start from idle");
    let budget = engine.time_left_secs();
    let mut ticks = 0;
    loop {
        ticks += 1;
        if let Some(event @ Event::SessionCompleted { .. }) = engine.tick() {
            assert_eq!(ticks, budget);
            return event;
        }
        assert!(ticks < budget, "session outlived its {budget}s countdown");
    }
}

#[test]
fn scenario_a_first_work_session() {
    let mut engine = TimerEngine::new();
    engine.start();
    for _ in 0..1499 {
        assert!(matches!(engine.tick(), Some(Event::Tick { .. })));
    }
    assert!(engine.tick().is_some_and(|e| e.is_completion()));

    let snap = engine.snapshot();
    assert_eq!(snap.timer_state, TimerState::Idle);
    assert_eq!(snap.time_left_secs, 0);
    assert_eq!(snap.completed_work_sessions, 1);
    assert_eq!(snap.work_sessions_in_cycle, 1);

    engine.apply_pending_advance();
    let snap = engine.snapshot();
    assert_eq!(snap.session_type, SessionType::ShortBreak);
    assert_eq!(snap.time_left_secs, 300);
}

#[test]
fn scenario_b_fourth_work_session_earns_long_break() {
    let mut engine = TimerEngine::new();
    let mut breaks = Vec::new();

    for _ in 0..4 {
        assert_eq!(engine.session_type(), SessionType::Work);
        finish_session(&mut engine);
        engine.apply_pending_advance();
        breaks.push(engine.session_type());
        if engine.session_type() == SessionType::ShortBreak {
            finish_session(&mut engine);
            engine.apply_pending_advance();
        }
    }

    assert_eq!(
        breaks,
        vec![
            SessionType::ShortBreak,
            SessionType::ShortBreak,
            SessionType::ShortBreak,
            SessionType::LongBreak,
        ]
    );
    let snap = engine.snapshot();
    assert_eq!(snap.session_type, SessionType::LongBreak);
    assert_eq!(snap.time_left_secs, 900);
    assert_eq!(snap.work_sessions_in_cycle, 0);
    assert_eq!(snap.completed_work_sessions, 4);
}

#[test]
fn scenario_c_without_auto_advance_requires_manual_selection() {
    let mut engine = TimerEngine::new();
    engine.set_auto_advance(false);
    finish_session(&mut engine);
    assert!(engine.apply_pending_advance().is_none());

    let snap = engine.snapshot();
    assert_eq!(snap.time_left_secs, 0);
    assert_eq!(snap.timer_state, TimerState::Idle);
    assert_eq!(snap.session_type, SessionType::Work);

    engine.select_session(SessionType::ShortBreak);
    assert_eq!(engine.time_left_secs(), 300);
}

#[test]
fn scenario_d_select_while_running_is_rejected() {
    let mut engine = TimerEngine::new();
    engine.start();
    engine.tick();
    let before = engine.snapshot();
    assert!(engine.select_session(SessionType::ShortBreak).is_none());
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn scenario_e_pause_while_idle_is_rejected() {
    let mut engine = TimerEngine::new();
    let before = engine.snapshot();
    assert!(engine.pause().is_none());
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn manual_long_break_closes_a_full_cycle() {
    let mut engine = TimerEngine::new();
    engine.set_auto_advance(false);
    for _ in 0..4 {
        engine.select_session(SessionType::Work);
        finish_session(&mut engine);
    }
    assert_eq!(engine.counters().work_sessions_in_cycle, 4);
    engine.select_session(SessionType::LongBreak);
    assert_eq!(engine.counters().work_sessions_in_cycle, 0);
    assert_eq!(engine.counters().completed_work_sessions, 4);
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    let session = prop_oneof![
        Just(SessionType::Work),
        Just(SessionType::ShortBreak),
        Just(SessionType::LongBreak),
    ];
    prop_oneof![
        Just(Intent::Start),
        Just(Intent::Pause),
        Just(Intent::Resume),
        Just(Intent::TogglePause),
        Just(Intent::Reset),
        session.prop_map(Intent::SelectSession),
        any::<bool>().prop_map(Intent::SetAutoAdvance),
    ]
}

/// An intent or a burst of ticks.
#[derive(Debug, Clone)]
enum Step {
    Intent(Intent),
    Ticks(u32),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => intent_strategy().prop_map(Step::Intent),
        1 => (1u32..2000).prop_map(Step::Ticks),
    ]
}

fn drive(engine: &mut TimerEngine, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Intent(intent) => {
                engine.apply(*intent);
            }
            Step::Ticks(n) => {
                for _ in 0..*n {
                    engine.tick();
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn reset_is_idempotent(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let mut engine = TimerEngine::new();
        drive(&mut engine, &steps);
        engine.reset();
        let once = engine.snapshot();
        engine.reset();
        prop_assert_eq!(engine.snapshot(), once);
        prop_assert_eq!(once.timer_state, TimerState::Idle);
        prop_assert_eq!(once.time_left_secs, once.session_type.duration_secs());
    }

    #[test]
    fn snapshot_stays_in_range(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let mut engine = TimerEngine::new();
        for step in steps {
            drive(&mut engine, std::slice::from_ref(&step));
            engine.apply_pending_advance();
            let snap = engine.snapshot();
            prop_assert!(snap.time_left_secs <= snap.duration_secs());
            prop_assert!(snap.work_sessions_in_cycle <= 4);
        }
    }

    #[test]
    fn running_ticks_decrease_by_one(ticks in 1u32..1500) {
        let mut engine = TimerEngine::new();
        engine.start();
        let mut previous = engine.time_left_secs();
        for _ in 0..ticks {
            engine.tick();
            let now = engine.time_left_secs();
            if engine.state() == TimerState::Running {
                prop_assert_eq!(now, previous - 1);
            } else {
                prop_assert_eq!(now, 0);
                break;
            }
            previous = now;
        }
    }

    #[test]
    fn each_work_completion_counts_once(auto_advance in any::<bool>(), rounds in 1usize..6) {
        let mut engine = TimerEngine::new();
        engine.set_auto_advance(auto_advance);
        for round in 1..=rounds {
            engine.select_session(SessionType::Work);
            finish_session(&mut engine);
            prop_assert_eq!(engine.counters().completed_work_sessions as usize, round);
        }
    }
}
