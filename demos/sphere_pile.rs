//! A row of spheres dropped onto a ground plane.
//!
//! Every sphere gets a contact listener that prints when it lands and when
//! it bounces off again.

use spherephys::prelude::*;

fn main() -> Result<()> {
    let mut world = World::default();

    let ground = world.add(BodyDesc::fixed(Collider::plane(Vec3::y())?))?;

    let mut spheres = Vec::new();
    for i in 0..6 {
        let x = -15.0 + 5.0 * i as f32;
        let handle = world.add(
            BodyDesc::dynamic(Collider::sphere(0.5)?)
                .with_position(Vec3::new(x, 5.0 + i as f32, 0.0))
                .with_restitution(i as f32 / 5.0)
                .with_damping(0.9),
        )?;
        world.set_contact_listener(handle, move |event: &ContactEvent| match event.phase {
            ContactPhase::Started => println!("  sphere {} hit {}", event.body, event.other),
            ContactPhase::Ended => println!("  sphere {} left {}", event.body, event.other),
            ContactPhase::Persisted => {}
        })?;
        spheres.push(handle);
    }
    // The ground's restitution only matters through the pairwise minimum.
    world.set_material(ground, 0.5, 1.0)?;

    let dt = 1.0 / 60.0;
    for frame in 0..240 {
        world.step(dt)?;
        if frame % 60 == 59 {
            println!("t={:.2}s", world.time());
            for &handle in &spheres {
                let pos = world.position(handle)?;
                println!("  {handle}: x={:6.2} y={:.3}", pos.x, pos.y);
            }
        }
    }

    println!("{} contacts at the end", world.contacts().len());
    Ok(())
}
