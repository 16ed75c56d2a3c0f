//! Timing sweeps for the force kernels and the integrator step.
//!
//! Plain functions printing one line per system size; paste the output
//! into a spreadsheet to graph. Reached through the driver's `--bench`
//! flag.

use crate::simulation::coordinate::Cartesian3D;
use crate::simulation::field::CentralGravityField;
use crate::simulation::integrator::{
    FieldIntegrator, ForceSource, GravityIntegrator, PairwiseGravity,
};
use crate::simulation::states::{NVec3, Particle};
use std::time::Instant;

/// Deterministic cluster of `n` unit-mass bodies, no rand needed.
fn push_cluster(n: usize, mut push: impl FnMut(Cartesian3D, NVec3, Particle)) {
    for i in 0..n {
        let i_f = i as f64;
        let x = Cartesian3D::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        push(x, NVec3::zeros(), Particle::new(1.0, 0.0));
    }
}

fn gravity_cluster(n: usize) -> GravityIntegrator<Cartesian3D> {
    let mut sys = GravityIntegrator::<Cartesian3D>::with_softening(1e-4);
    push_cluster(n, |x, v, p| {
        sys.push(p, x, v).expect("cluster masses are positive");
    });
    sys
}

/// Time one direct pairwise force accumulation for a range of system sizes.
pub fn bench_gravity() {
    let ns = [128, 256, 512, 1024];

    println!("N,pairwise_ms");
    for n in ns {
        let sys = gravity_cluster(n);
        let gravity = PairwiseGravity { eps2: 1e-4 };
        let mut out = vec![NVec3::zeros(); n];

        // Warm up
        gravity.accumulate(sys.records(), &mut out);

        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }
        let t0 = Instant::now();
        gravity.accumulate(sys.records(), &mut out);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6}", n, ms);
    }
}

/// Time one integrator step for the pairwise-gravity and central-field
/// variants across system sizes.
pub fn bench_verlet() {
    let ns = [128, 256, 512, 1024];
    let steps = 3; // averaged to smooth noise
    let dt = 0.001;

    println!("N,gravity_step_ms,field_step_ms");
    for n in ns {
        // Direct pairwise gravity
        let mut sys_gravity = gravity_cluster(n);

        // Warm up
        sys_gravity.step(dt);

        let t0 = Instant::now();
        for _ in 0..steps {
            sys_gravity.step(dt);
        }
        let gravity_ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        // Central-mass field
        let field = CentralGravityField::new(Cartesian3D::new(0.0, 0.0, 0.0), 1.989e30);
        let mut sys_field: FieldIntegrator<Cartesian3D, _> = FieldIntegrator::new(field);
        push_cluster(n, |x, v, p| {
            sys_field.push(p, x, v).expect("cluster masses are positive");
        });

        // Warm up
        sys_field.step(dt);

        let t1 = Instant::now();
        for _ in 0..steps {
            sys_field.step(dt);
        }
        let field_ms = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, gravity_ms, field_ms);
    }
}
