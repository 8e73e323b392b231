//! Drives xr-knob widgets with simulated controller poses
//!
//! Run with `RUST_LOG=debug` to see grab edges and mode switches.

use std::cell::Cell;

use xr_knob::{
    ControllerId, ControllerPose, Handle, Knob, KnobConfig, LeverHinge, LeverHingeConfig, SwitchEvent,
    SwitchListener, Vec3,
};

const HAND: ControllerId = ControllerId(1);
const TICK: f32 = 1.0 / 90.0;

fn dir(deg: f32) -> Vec3 {
    let rad = deg.to_radians();
    Vec3::new(rad.cos(), 0.0, rad.sin())
}

struct PrintHandle {
    angle: Cell<f32>,
}

impl Handle for PrintHandle {
    fn set_orientation(&self, angle_degrees: f32) {
        self.angle.set(angle_degrees);
    }
}

struct PrintSwitch;

impl SwitchListener for PrintSwitch {
    fn on_switch(&self, event: SwitchEvent) {
        println!("   lever {:?}", event);
    }
}

fn main() {
    env_logger::init();

    println!("=== xr-knob Sweep Examples ===\n");

    // Example 1: Wrist twist from the side
    println!("1. Twisting a knob from the side (sensitivity 1.5)");
    let handle = PrintHandle { angle: Cell::new(0.0) };
    let print_value = |value: f32| log::info!("value changed to {:.3}", value);

    let mut knob = Knob::new(KnobConfig::default()).expect("Valid config");
    knob.attach_handle(&handle);
    knob.add_listener(&print_value).expect("Listener slot");

    let side = |heading: f32| ControllerPose::new(dir(0.0) * 0.05, dir(heading), Vec3::Y);
    knob.grab_start(HAND, &side(0.0));

    println!("   Twist → Rotation → Value");
    for step in 1..=8 {
        let twist = -10.0 * step as f32;
        knob.update(&side(twist), TICK);
        println!("   {:5.1}° → {:6.1}° → {:.3}", twist, handle.angle.get(), knob.value());
    }
    knob.grab_end(HAND);
    println!();

    // Example 2: Sweeping around the hub with detents
    let config = KnobConfig {
        value: 0.0,
        min_angle: 0.0,
        max_angle: 180.0,
        angle_increment: 15.0,
        ..KnobConfig::default()
    };
    let detents = config.steps().detent_count(config.min_angle, config.max_angle);
    println!("2. Sweeping around the hub ({} detents of 15°)", detents.unwrap_or(0));
    let mut knob = Knob::new(config).expect("Valid config");

    let sweep = |angle: f32| ControllerPose::new(dir(angle) * 0.2, Vec3::X, Vec3::Y);
    knob.grab_start(HAND, &sweep(0.0));

    println!("   Sweep → Rotation → Value");
    for step in 1..=12 {
        let angle = -8.0 * step as f32;
        knob.update(&sweep(angle), TICK);
        println!("   {:5.1}° → {:6.1}° → {:.3}", angle, knob.rotation(), knob.value());
    }
    knob.grab_end(HAND);
    println!();

    // Example 3: Unclamped multi-turn knob
    println!("3. Unclamped knob, one and a half turns");
    let config = KnobConfig {
        value: 0.0,
        clamped_motion: false,
        min_angle: 0.0,
        max_angle: 360.0,
        position_tracked_radius: 0.0,
        twist_sensitivity: 1.0,
        ..KnobConfig::default()
    };
    let mut knob = Knob::new(config).expect("Valid config");
    knob.grab_start(HAND, &side(0.0));
    for step in 1..=18 {
        knob.update(&side(-30.0 * step as f32), TICK);
    }
    println!("   Rotation {:.1}° → Value {:.3}", knob.rotation(), knob.value());
    println!();

    // Example 4: Hinge lever
    println!("4. Pulling a hinge lever over");
    let switch = PrintSwitch;
    let mut lever = LeverHinge::new(LeverHingeConfig::default()).expect("Valid config");
    lever.add_listener(&switch).expect("Listener slot");
    lever.grab_start(HAND);

    for step in 0..=6 {
        let angle = -90.0 + 30.0 * step as f32;
        let rad = angle.to_radians();
        let pose = ControllerPose {
            position: Vec3::new(0.0, rad.cos() * 0.3, rad.sin() * 0.3),
            ..ControllerPose::default()
        };
        for _ in 0..10 {
            lever.update(&pose, TICK);
        }
        println!("   Hand {:5.1}° → Handle {:6.1}° ({})", angle, lever.angle(), lever.value());
    }

    lever.grab_end(HAND);
    while lever.is_settling() {
        lever.update_released(TICK);
    }
    println!("   Settled at {:.1}°", lever.angle());
}
