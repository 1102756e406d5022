use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};
use scissor_linkage::{AnimationConfig, CurveType, Mechanism, MechanismParams};

fn main() {
    let mut rng = StdRng::from_seed(*b"Scissor lifts reach the ceiling.");
    let mut mech = Mechanism::with_params(MechanismParams {
        segments: 10,
        curve_type: CurveType::Sine,
        ..Default::default()
    });
    mech.set_trail_enabled(true);
    let animation = AnimationConfig::crazy();

    println!("Rebuilding...");
    let num_frames = 10_000;
    loop {
        let start = Instant::now();
        for frame in 0..num_frames {
            mech.set_params(&animation.params_at(frame as f64 / 60.0));
            mech.update();
        }
        let frame = start.elapsed() / num_frames;
        let integrity = mech.integrity();
        println!(
            "Avg. rebuild: {:?} --> {:.0} rebuilds/s ({} joints, {} pivots, {:?} {})",
            frame,
            1.0 / frame.as_secs_f64(),
            mech.joints().len(),
            mech.pivots().len(),
            integrity.level,
            integrity.text,
        );
        mech.randomize(&mut rng);
    }
}
