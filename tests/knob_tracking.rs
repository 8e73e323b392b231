use core::cell::{Cell, RefCell};

use xr_knob::{
    ControllerId, ControllerPose, Handle, Knob, KnobConfig, ListenerError, PoseSmoothing, ValueListener, Vec3,
};

const LEFT: ControllerId = ControllerId(1);
const RIGHT: ControllerId = ControllerId(2);

fn dir(deg: f32) -> Vec3 {
    let rad = deg.to_radians();
    Vec3::new(rad.cos(), 0.0, rad.sin())
}

/// Controller beside the hub, inside the default tracked radius.
fn side_grab(heading: f32) -> ControllerPose {
    ControllerPose::new(dir(0.0) * 0.05, dir(heading), Vec3::Y)
}

/// Controller out at `radius` at `angle` around the hub, pointing along +X.
fn sweep(radius: f32, angle: f32) -> ControllerPose {
    ControllerPose::new(dir(angle) * radius, Vec3::X, Vec3::Y)
}

#[derive(Default)]
struct TestHandle {
    orientation: Cell<f32>,
    writes: Cell<usize>,
}

impl Handle for TestHandle {
    fn set_orientation(&self, angle_degrees: f32) {
        self.orientation.set(angle_degrees);
        self.writes.set(self.writes.get() + 1);
    }
}

#[derive(Default)]
struct RecordingListener {
    values: RefCell<Vec<f32>>,
}

impl ValueListener for RecordingListener {
    fn on_value_changed(&self, value: f32) {
        self.values.borrow_mut().push(value);
    }
}

#[test]
fn test_fresh_grab_does_not_move_knob() {
    let mut knob = Knob::new(KnobConfig::default()).unwrap();

    assert_eq!(knob.grab_start(LEFT, &side_grab(37.0)), None);
    assert_eq!(knob.rotation(), knob.state().base_rotation());

    for i in 1..=10 {
        knob.update(&side_grab(37.0 - 3.0 * i as f32), 0.011);
    }
    knob.grab_end(LEFT);
    assert!(knob.value() > 0.5);

    // A second session from a far-off pose starts where the first left off
    knob.grab_start(LEFT, &sweep(0.3, -140.0));
    assert_eq!(knob.rotation(), knob.state().base_rotation());
    assert!(knob.is_position_driven());
}

#[test]
fn test_position_sweep_turns_knob() {
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.grab_start(LEFT, &sweep(0.2, 0.0));
    assert!(knob.is_position_driven());

    for i in 1..=10 {
        knob.update(&sweep(0.2, 3.0 * i as f32), 0.011);
    }

    // Sweeping toward +Z turns the knob negative, unscaled by twist sensitivity
    assert!((knob.rotation() + 30.0).abs() < 1e-3);
    assert!((knob.value() - 1.0 / 3.0).abs() < 1e-4);
}

#[test]
fn test_position_mode_hysteresis() {
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.grab_start(LEFT, &sweep(0.2, 0.0));
    for i in 1..=10 {
        knob.update(&sweep(0.2, 3.0 * i as f32), 0.011);
    }

    // Just inside the radius the mode sticks
    knob.update(&sweep(0.095, 30.0), 0.011);
    assert!(knob.is_position_driven());

    knob.update(&sweep(0.085, 30.0), 0.011);
    assert!(!knob.is_position_driven());
    let held = knob.rotation();

    // Leaving the radius does not re-engage until the full radius is reached
    knob.update(&sweep(0.099, 30.0), 0.011);
    assert!(!knob.is_position_driven());

    // Re-engaging elsewhere around the hub rebases; no jump
    knob.update(&sweep(0.15, 60.0), 0.011);
    assert!(knob.is_position_driven());
    assert!((knob.rotation() - held).abs() < 1e-3);
}

#[test]
fn test_twist_source_switch_is_continuous() {
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.grab_start(LEFT, &side_grab(0.0));
    for i in 1..=10 {
        knob.update(&side_grab(-2.0 * i as f32), 0.011);
    }
    assert!((knob.rotation() - 30.0).abs() < 1e-3);
    assert!(!knob.is_up_vector_driven());

    // Point the controller down the spin axis; the up vector now carries twist
    let down = |heading: f32| ControllerPose::new(dir(0.0) * 0.05, Vec3::new(0.0, -1.0, 0.0), dir(heading));
    knob.update(&down(0.0), 0.011);
    assert!(knob.is_up_vector_driven());
    assert!((knob.rotation() - 30.0).abs() < 1e-3);

    for i in 1..=5 {
        knob.update(&down(-2.0 * i as f32), 0.011);
    }
    assert!((knob.rotation() - 45.0).abs() < 1e-3);

    // And back to the forward vector, again without a jump
    knob.update(&side_grab(75.0), 0.011);
    assert!(!knob.is_up_vector_driven());
    assert!((knob.rotation() - 45.0).abs() < 1e-3);
}

#[test]
fn test_degenerate_pose_freezes_rotation() {
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.grab_start(LEFT, &side_grab(0.0));
    for i in 1..=10 {
        knob.update(&side_grab(-2.0 * i as f32), 0.011);
    }
    let rotation = knob.rotation();

    let degenerate = ControllerPose::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    assert_eq!(knob.update(&degenerate, 0.011), None);
    assert_eq!(knob.rotation(), rotation);

    // Tracking picks up again from the frozen heading
    knob.update(&side_grab(-22.0), 0.011);
    assert!((knob.rotation() - 33.0).abs() < 1e-3);
}

#[test]
fn test_release_stops_tracking() {
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.grab_start(LEFT, &side_grab(0.0));
    knob.update(&side_grab(-10.0), 0.011);

    // Only the holding controller can release
    assert!(!knob.grab_end(RIGHT));
    assert!(knob.is_grabbed());
    assert!(knob.grab_end(LEFT));
    assert!(!knob.is_grabbed());
    assert!(!knob.grab_end(LEFT));

    let rotation = knob.rotation();
    assert_eq!(knob.update(&side_grab(-60.0), 0.011), None);
    assert_eq!(knob.rotation(), rotation);
}

#[test]
fn test_other_controller_takes_over() {
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.grab_start(LEFT, &side_grab(0.0));
    knob.update(&side_grab(-10.0), 0.011);
    let rotation = knob.rotation();

    knob.grab_start(RIGHT, &side_grab(90.0));
    assert_eq!(knob.controller(), Some(RIGHT));
    assert!((knob.rotation() - rotation).abs() < 1e-3);
    assert!(!knob.grab_end(LEFT));
}

#[test]
fn test_listeners_notified_on_change_only() {
    let handle = TestHandle::default();
    let listener = RecordingListener::default();
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.attach_handle(&handle);
    knob.add_listener(&listener).unwrap();

    knob.grab_start(LEFT, &side_grab(0.0));
    assert!(listener.values.borrow().is_empty());

    let changed = knob.update(&side_grab(-20.0), 0.011);
    assert_eq!(changed, Some(knob.value()));
    assert_eq!(knob.update(&side_grab(-20.0), 0.011), None);
    knob.update(&side_grab(-40.0), 0.011);

    let values = listener.values.borrow();
    assert_eq!(values.len(), 2);
    assert_eq!(values[1], knob.value());
    assert_eq!(handle.orientation.get(), knob.rotation());
}

#[test]
fn test_no_handle_no_publish() {
    let listener = RecordingListener::default();
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.add_listener(&listener).unwrap();

    knob.grab_start(LEFT, &side_grab(0.0));
    knob.update(&side_grab(-20.0), 0.011);
    assert!((knob.value() - 2.0 / 3.0).abs() < 1e-4);
    assert!(listener.values.borrow().is_empty());

    assert!(knob.set_value(0.1));
    assert!(listener.values.borrow().is_empty());
}

#[test]
fn test_attach_handle_shows_rotation() {
    let handle = TestHandle::default();
    let mut knob = Knob::new(KnobConfig {
        value: 1.0,
        ..KnobConfig::default()
    })
    .unwrap();

    knob.attach_handle(&handle);
    assert!(knob.has_handle());
    assert_eq!(handle.orientation.get(), 90.0);

    knob.set_value(0.0);
    assert_eq!(handle.orientation.get(), -90.0);

    knob.detach_handle();
    knob.set_value(0.5);
    assert_eq!(handle.orientation.get(), -90.0);
}

#[test]
fn test_closure_listener() {
    let handle = TestHandle::default();
    let last = Cell::new(-1.0_f32);
    let record = |value: f32| last.set(value);

    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.attach_handle(&handle);
    knob.add_listener(&record).unwrap();

    knob.set_value(0.25);
    assert_eq!(last.get(), 0.25);

    assert!(knob.remove_listener(&record));
    knob.set_value(0.75);
    assert_eq!(last.get(), 0.25);
}

#[test]
fn test_listener_registry_dedupes_and_fills() {
    let handle = TestHandle::default();
    let listeners: [RecordingListener; 9] = core::array::from_fn(|_| RecordingListener::default());
    let mut knob = Knob::new(KnobConfig::default()).unwrap();
    knob.attach_handle(&handle);

    knob.add_listener(&listeners[0]).unwrap();
    knob.add_listener(&listeners[0]).unwrap();
    for listener in &listeners[1..8] {
        knob.add_listener(listener).unwrap();
    }
    assert_eq!(knob.add_listener(&listeners[8]), Err(ListenerError::Full));

    knob.set_value(0.2);
    assert_eq!(listeners[0].values.borrow().len(), 1);
    assert_eq!(listeners[7].values.borrow().len(), 1);
    assert!(listeners[8].values.borrow().is_empty());
}

#[test]
fn test_smoothing_lags_then_converges() {
    let config = KnobConfig {
        smoothing: PoseSmoothing::Exponential { rate: 10.0 },
        ..KnobConfig::default()
    };
    let mut knob = Knob::new(config).unwrap();
    knob.grab_start(LEFT, &sweep(0.2, 0.0));

    knob.update(&sweep(0.2, 60.0), 0.011);
    assert!(knob.rotation() < 0.0);
    assert!(knob.rotation() > -20.0, "rotation {}", knob.rotation());

    for _ in 0..300 {
        knob.update(&sweep(0.2, 60.0), 0.011);
    }
    assert!((knob.rotation() + 60.0).abs() < 1e-2, "rotation {}", knob.rotation());
}

#[test]
fn test_world_space_pose_through_frame() {
    use xr_knob::{Frame, Quat};

    // Knob mounted on a wall: local Y points along world +Z
    let frame = Frame::new(Vec3::new(1.0, 1.5, 0.0), Quat::from_axis_angle(Vec3::X, 90.0));
    let mut knob = Knob::new(KnobConfig::default()).unwrap();

    let world = |angle: f32| {
        let local = sweep(0.2, angle);
        ControllerPose::new(
            frame.transform_point(local.position),
            frame.transform_direction(local.forward),
            frame.transform_direction(local.up),
        )
    };

    knob.grab_start(LEFT, &world(0.0).to_local(&frame));
    for i in 1..=10 {
        knob.update(&world(3.0 * i as f32).to_local(&frame), 0.011);
    }
    assert!((knob.rotation() + 30.0).abs() < 1e-2);
}
