use xr_knob::hysteresis::{MODE_SWITCH_DEAD_ZONE, ModeHysteresis, ModeLatch, Transition, UP_VECTOR_THRESHOLD};

#[test]
fn test_sticky_band() {
    let mode = ModeHysteresis::position(1.0);
    let mut latch = ModeLatch::default();

    assert_eq!(mode.apply(0.99, &mut latch, false), Transition::Idle);
    assert_eq!(mode.apply(1.05, &mut latch, false), Transition::Engaged);

    // Inside the band the mode holds
    assert_eq!(mode.apply(0.95, &mut latch, false), Transition::Held);
    assert_eq!(mode.apply(0.92, &mut latch, false), Transition::Held);

    // Below threshold / (1 + dead zone) it releases
    assert_eq!(mode.apply(0.90, &mut latch, false), Transition::Released);
    assert!(!latch.engaged);

    // And re-entry needs the full threshold again
    assert_eq!(mode.apply(0.95, &mut latch, false), Transition::Idle);
    assert_eq!(mode.apply(1.0, &mut latch, false), Transition::Engaged);
}

#[test]
fn test_sticky_exit_level_matches_dead_zone() {
    let mode = ModeHysteresis::position(0.1);
    let exit = mode.exit_level();
    assert!((exit - 0.1 / (1.0 + MODE_SWITCH_DEAD_ZONE)).abs() < 1e-7);

    let mut latch = ModeLatch { engaged: true };
    assert_eq!(mode.apply(exit * 1.001, &mut latch, false), Transition::Held);
    assert_eq!(mode.apply(exit * 0.999, &mut latch, false), Transition::Released);
}

#[test]
fn test_fresh_bypasses_dead_zone() {
    let mode = ModeHysteresis::position(1.0);
    let mut latch = ModeLatch { engaged: true };

    // Would be held inside the band, but a fresh read compares raw
    assert_eq!(mode.apply(0.95, &mut latch, true), Transition::Released);

    // Fresh reads always report an edge
    assert_eq!(mode.apply(1.2, &mut latch, true), Transition::Engaged);
    assert_eq!(mode.apply(1.2, &mut latch, true), Transition::Engaged);
    assert_eq!(mode.apply(0.2, &mut latch, true), Transition::Released);
    assert_eq!(mode.apply(0.2, &mut latch, true), Transition::Released);
}

#[test]
fn test_balanced_band() {
    let mode = ModeHysteresis::up_vector();
    let mut latch = ModeLatch::default();

    // 0.72 is above the raw threshold but attenuated below it while disengaged
    assert!(0.72 > UP_VECTOR_THRESHOLD);
    assert_eq!(mode.apply(0.72, &mut latch, false), Transition::Idle);
    assert_eq!(mode.apply(0.76, &mut latch, false), Transition::Engaged);

    // 0.69 is below the raw threshold but boosted above it while engaged
    assert_eq!(mode.apply(0.69, &mut latch, false), Transition::Held);
    assert_eq!(mode.apply(0.66, &mut latch, false), Transition::Released);
}

#[test]
fn test_balanced_is_strict() {
    let mode = ModeHysteresis::Balanced {
        threshold: 0.5,
        dead_zone: 0.0,
    };
    let mut latch = ModeLatch::default();
    assert_eq!(mode.apply(0.5, &mut latch, false), Transition::Idle);
    assert_eq!(mode.apply(0.5001, &mut latch, false), Transition::Engaged);
}

#[test]
fn test_oscillation_is_suppressed() {
    let mode = ModeHysteresis::position(0.1);
    let mut latch = ModeLatch::default();
    mode.apply(0.11, &mut latch, true);

    let mut edges = 0;
    for i in 0..100 {
        // Jitter of +-4% around the threshold
        let radius = if i % 2 == 0 { 0.104 } else { 0.096 };
        if mode.apply(radius, &mut latch, false).is_edge() {
            edges += 1;
        }
    }
    assert_eq!(edges, 0);
    assert!(latch.engaged);
}
