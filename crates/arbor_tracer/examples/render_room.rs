//! Render the "Room" preset scene to a PNG.
//!
//! Usage: cargo run --example render_room [config.json] [output.png]
//!
//! The optional config file holds a JSON `TracerConfig`; missing fields keep
//! their defaults.

use anyhow::Context;
use arbor_scene::{Camera, Light, LightType, Material, MeshRegistry, Scene, SceneNode};
use arbor_tracer::{Color, ImageBuffer, RayTracer, TracerConfig, Vec3};

const WIDTH: u32 = 400;
const HEIGHT: u32 = 300;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Arbor Ray Tracer - Room");
    println!("=======================");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid config in {}", path))?
        }
        None => TracerConfig::default().with_parallel(true),
    };
    let output = args.next().unwrap_or_else(|| "room.png".to_string());

    let start = std::time::Instant::now();
    let scene = build_room()?;
    println!(
        "Scene '{}' built in {:?} ({} objects)",
        scene.name(),
        start.elapsed(),
        scene.object_count()
    );

    let mut tracer = RayTracer::new(&scene, config);
    let mut image = ImageBuffer::new(WIDTH, HEIGHT);

    println!("Rendering {}x{}...", WIDTH, HEIGHT);
    let start = std::time::Instant::now();
    let stats = tracer.render_image(&mut image)?;
    println!("Rendered in {:?}", start.elapsed());
    println!(
        "  {} rays, {} hits, {} objects visited",
        stats.rays, stats.hits, stats.objects_visited
    );

    image.save_png(&output)?;
    println!("Saved to {}", output);
    Ok(())
}

fn build_room() -> anyhow::Result<Scene> {
    let assets = MeshRegistry::with_defaults();
    let mut scene = Scene::new("Room");

    let room = scene.create_object("Room", None)?;
    let walls = [
        ("Floor", Vec3::new(0.0, -1.3, 0.0), Vec3::new(4.0, 0.2, 4.0), Color::new(0.6, 0.6, 0.6)),
        ("Wall 1", Vec3::new(-3.9, 2.6, 0.0), Vec3::new(0.2, 4.0, 4.0), Color::new(0.8, 0.3, 0.3)),
        ("Wall 2", Vec3::new(0.0, 2.6, -4.0), Vec3::new(4.0, 4.0, 0.2), Color::new(0.3, 0.3, 0.8)),
    ];
    for (name, position, scale, color) in walls {
        let id = scene.create_object(name, Some(room))?;
        let primitive = assets
            .make_primitive("Box")
            .context("Box mesh missing")?
            .with_material(Material::with_diffuse(color));
        scene.add_component(id, primitive)?;
        scene.set_local_position(id, position)?;
        scene.set_local_scale(id, scale)?;
    }

    let ball = scene.create_object("Object 1", None)?;
    let primitive = assets
        .make_primitive("Sphere")
        .context("Sphere mesh missing")?
        .with_material(Material::with_diffuse(Color::new(0.9, 0.7, 0.2)));
    scene.add_component(ball, primitive)?;

    let camera = scene.create_object("Main Camera", None)?;
    scene.add_component(camera, Camera::default())?;
    scene.set_local_position(camera, Vec3::new(0.0, 2.0, 4.0))?;
    scene.set_local_euler_angles(camera, Vec3::new(-27.0, 0.0, 0.0))?;
    scene.set_current_camera(Some(camera))?;

    let lamp = scene.create_object("Point Light", None)?;
    scene.add_component(lamp, Light::new(LightType::Point))?;
    scene.set_local_position(lamp, Vec3::new(1.0, 2.7, 4.4))?;
    scene.set_local_euler_angles(lamp, Vec3::new(-150.0, 0.0, 0.0))?;

    Ok(scene)
}
