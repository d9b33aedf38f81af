//! Basic physics simulation example
//!
//! This example demonstrates a ball falling onto a floor under gravity.

use spherephys::prelude::*;

fn main() -> Result<()> {
    println!("SpherePhys - Basic Simulation Example");
    println!("=====================================\n");

    // Create physics world with default settings
    let mut world = World::default();
    world.set_gravity(Vec3::new(0.0, -9.81, 0.0))?;

    // Create a static floor
    world.add(BodyDesc::fixed(Collider::plane(Vec3::y())?))?;
    println!("Created floor plane at Y=0");

    // Create a dynamic ball
    let ball = world.add(
        BodyDesc::dynamic(Collider::sphere(0.5)?)
            .with_position(Vec3::new(0.0, 5.0, 0.0))
            .with_mass(1.0)
            .with_restitution(0.6),
    )?;
    println!("Created ball at Y=5.0 (radius=0.5)\n");

    // Simulation parameters
    let dt = 1.0 / 60.0;
    let total_time = 3.0;
    let steps = (total_time / dt) as usize;

    println!("Simulating {} seconds ({} steps at {}Hz)...\n", total_time, steps, 1.0 / dt);

    for i in 0..steps {
        world.step(dt)?;

        // Print state every 30 frames (0.5 seconds)
        if i % 30 == 0 {
            let pos = world.position(ball)?;
            let vel = world.velocity(ball)?;
            println!(
                "t={:.2}s: position=({:.3}, {:.3}, {:.3}), velocity=({:.3}, {:.3}, {:.3}), energy={:.3}J, colliding={}",
                world.time(),
                pos.x, pos.y, pos.z,
                vel.x, vel.y, vel.z,
                world.body(ball)?.kinetic_energy(),
                world.is_colliding(ball)?
            );
        }
    }

    let final_pos = world.position(ball)?;
    println!("\nFinal ball position: ({:.3}, {:.3}, {:.3})", final_pos.x, final_pos.y, final_pos.z);
    println!("Expected resting position: ~(0, 0.5, 0) (floor at 0 + ball radius 0.5)");
    Ok(())
}
