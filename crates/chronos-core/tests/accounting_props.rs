//! Property tests over the accounting invariants.

use chronos_core::{clock, AppState, Event, TrackerEngine};
use proptest::prelude::*;

const T0: u64 = 1_760_000_000_000;

fn engine_with_timer(minutes: u64) -> (TrackerEngine, uuid::Uuid) {
    let mut engine = TrackerEngine::from_state(AppState {
        last_active_day: clock::day_key(T0),
        ..AppState::default()
    });
    let id = match engine.add_timer_at("prop", minutes, T0) {
        Event::TimerAdded { timer_id, .. } => timer_id,
        _ => unreachable!(),
    };
    (engine, id)
}

proptest! {
    /// Live elapsed stays within [0, target] for bounded timers, whatever
    /// the clock does.
    #[test]
    fn live_elapsed_is_bounded(
        minutes in 1u64..240,
        run_ms in 0u64..40_000_000,
        drift_back in 0u64..120_000,
    ) {
        let (mut engine, id) = engine_with_timer(minutes);
        engine.start_at(id, T0);

        let timer = &engine.timers()[0];
        let target = minutes * 60;
        prop_assert!(timer.live_elapsed(T0 + run_ms) <= target);
        // A clock that moved backward reads zero, not negative or huge.
        prop_assert_eq!(timer.live_elapsed(T0.saturating_sub(drift_back)), 0);
    }

    /// An unbounded timer's live elapsed never exceeds wall-clock time.
    #[test]
    fn unbounded_elapsed_tracks_wall_clock(run_ms in 0u64..40_000_000) {
        let (mut engine, id) = engine_with_timer(0);
        engine.start_at(id, T0);
        let live = engine.timers()[0].live_elapsed(T0 + run_ms);
        prop_assert!(live <= run_ms / 1000);
    }

    /// Pausing then resuming never double-counts across the boundary.
    #[test]
    fn pause_resume_never_double_counts(
        first_ms in 0u64..7_200_000,
        gap_ms in 0u64..7_200_000,
        second_ms in 0u64..7_200_000,
    ) {
        let (mut engine, id) = engine_with_timer(0);
        engine.start_at(id, T0);
        let pause_at = T0 + first_ms;
        engine.pause_at(id, pause_at);
        let before = engine.timers()[0].live_elapsed(pause_at);

        let resume_at = pause_at + gap_ms;
        engine.start_at(id, resume_at);
        let read_at = resume_at + second_ms;
        let after = engine.timers()[0].live_elapsed(read_at);

        prop_assert!(after >= before);
        prop_assert!(after - before <= second_ms / 1000);
    }

    /// Deleting or resetting a timer leaves the daily total untouched.
    #[test]
    fn orphaned_elapsed_is_banked(
        run_ms in 0u64..7_200_000,
        reset_instead in any::<bool>(),
    ) {
        let (mut engine, id) = engine_with_timer(0);
        engine.start_at(id, T0);

        let now = T0 + run_ms;
        let before = engine.total_today_at(now);
        if reset_instead {
            engine.reset_timer_at(id, now);
        } else {
            engine.remove_timer_at(id, now);
        }
        prop_assert_eq!(engine.total_today_at(now), before);
    }
}
