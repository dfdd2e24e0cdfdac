//! Example: Build a small scene graph and print its hierarchy.
//!
//! Run with: RUST_LOG=debug cargo run --example inspect_scene

use arbor_math::Vec3;
use arbor_scene::{
    Camera, Light, LightType, MeshRegistry, ObjectId, Scene, SceneError, SceneNode,
};

fn print_tree(scene: &Scene, id: ObjectId, depth: usize) {
    let Some(object) = scene.object(id) else {
        return;
    };
    let kinds: Vec<&str> = scene.components(id).map(|(_, c)| c.type_name()).collect();
    let position = scene
        .transform(id)
        .map(|t| t.position())
        .unwrap_or(Vec3::ZERO);

    println!(
        "{}{} [{}] at ({:.2}, {:.2}, {:.2}){}",
        "  ".repeat(depth),
        object.name(),
        kinds.join(", "),
        position.x,
        position.y,
        position.z,
        if object.visible { "" } else { " (hidden)" }
    );
    for child in scene.children(Some(id)) {
        print_tree(scene, child, depth + 1);
    }
}

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let assets = MeshRegistry::with_defaults();
    let mut scene = Scene::new("Inspect");

    let table = scene.create_object("Table", None)?;
    scene.add_component(table, assets.make_primitive("Box").unwrap_or_default())?;
    scene.set_local_scale(table, Vec3::new(2.0, 0.1, 1.0))?;

    let ball = scene.create_object("Ball", Some(table))?;
    scene.add_component(ball, assets.make_primitive("Sphere").unwrap_or_default())?;
    scene.set_local_position(ball, Vec3::new(0.0, 0.6, 0.0))?;

    let lamp = scene.create_object("Lamp", None)?;
    scene.add_component(lamp, Light::new(LightType::Point))?;
    scene.set_local_position(lamp, Vec3::new(0.0, 3.0, 0.0))?;

    let camera = scene.create_object("Main Camera", None)?;
    scene.add_component(camera, Camera::perspective(45.0))?;
    scene.set_local_position(camera, Vec3::new(0.0, 1.0, 5.0))?;
    scene.set_current_camera(Some(camera))?;

    println!("=== Scene: {} ({} objects) ===", scene.name(), scene.object_count());
    for id in scene.children(None) {
        print_tree(&scene, id, 0);
    }

    // Structural edits that must fail leave the graph unchanged
    if let Err(err) = scene.add_component(lamp, Light::default()) {
        println!("\nRefused: {}", err);
    }
    if let Err(err) = scene.set_parent(table, Some(ball)) {
        println!("Refused: {}", err);
    }

    // Move the ball onto the lamp, then drop the table
    scene.set_parent(ball, Some(lamp))?;
    scene.destroy_object(table)?;

    println!("\n=== After reparenting ({} objects) ===", scene.object_count());
    for id in scene.children(None) {
        print_tree(&scene, id, 0);
    }

    Ok(())
}
