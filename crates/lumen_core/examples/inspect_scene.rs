//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/demo.txt

use std::env;

use lumen_core::{load_scene, Light, Primitive, SceneOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/demo.txt");
        println!("  cargo run --example inspect_scene -- scenes/mirrors.txt");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path, &SceneOptions::default()) {
        Ok(scene) => {
            let (spheres, triangles) = scene.primitive_counts();
            println!("\n=== Scene: {} ===", scene.name);
            println!(
                "Shapes: {} ({} spheres, {} triangles)",
                scene.shape_count(),
                spheres,
                triangles
            );
            println!("Lights: {}", scene.light_count());
            println!("Materials: {}", scene.material_count());

            let cam = &scene.camera;
            println!("\n--- Camera ---");
            println!("  Eye: ({:.2}, {:.2}, {:.2})", cam.eye.x, cam.eye.y, cam.eye.z);
            println!(
                "  Lower left: ({:.2}, {:.2}, {:.2})",
                cam.lower_left.x, cam.lower_left.y, cam.lower_left.z
            );
            println!(
                "  Upper right: ({:.2}, {:.2}, {:.2})",
                cam.upper_right.x, cam.upper_right.y, cam.upper_right.z
            );

            println!("\n--- Lights ---");
            let ambient = scene.ambient_light;
            println!("  Ambient ({:.2}, {:.2}, {:.2})", ambient.x, ambient.y, ambient.z);
            for (i, light) in scene.lights.iter().enumerate() {
                match light {
                    Light::Point { position, color } => println!(
                        "  [{}] Point at ({:.2}, {:.2}, {:.2}) color ({:.2}, {:.2}, {:.2})",
                        i, position.x, position.y, position.z, color.x, color.y, color.z
                    ),
                    Light::Directional { direction, color } => println!(
                        "  [{}] Directional ({:.2}, {:.2}, {:.2}) color ({:.2}, {:.2}, {:.2})",
                        i, direction.x, direction.y, direction.z, color.x, color.y, color.z
                    ),
                }
            }

            println!("\n--- Shapes ---");
            for shape in &scene.shapes {
                let kind = match shape.primitive {
                    Primitive::Sphere { center, radius } => format!(
                        "Sphere at ({:.2}, {:.2}, {:.2}) r={:.2}",
                        center.x, center.y, center.z, radius
                    ),
                    Primitive::Triangle { a, b, c } => format!(
                        "Triangle ({:.1}, {:.1}, {:.1}) ({:.1}, {:.1}, {:.1}) ({:.1}, {:.1}, {:.1})",
                        a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z
                    ),
                };
                let transformed = if shape.transform.is_some() { " [transformed]" } else { "" };
                println!(
                    "  [{}] {} mat {}{}",
                    shape.id.0, kind, shape.material_id, transformed
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
