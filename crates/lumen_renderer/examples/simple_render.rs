//! Simple ray tracer example.
//!
//! Builds a small scene in code, renders it and saves to PPM format.

use lumen_core::{ImagePlane, Light, Material, Primitive, Scene};
use lumen_renderer::{render, Canvas, Color, Point3, RenderConfig, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Lumen Ray Tracer - Simple Example");
    println!("=================================");

    let scene = build_scene();
    let config = RenderConfig::default();

    println!(
        "Rendering {}x{} @ depth {}...",
        scene.resolution, scene.resolution, config.max_depth
    );

    let start = std::time::Instant::now();
    let canvas = render(&scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    if let Err(e) = save_ppm(&canvas, filename) {
        eprintln!("Failed to save {}: {}", filename, e);
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new("simple", 400);
    scene.camera = ImagePlane {
        eye: Point3::new(0.0, 0.0, 1500.0),
        lower_left: Point3::new(-500.0, -500.0, 500.0),
        lower_right: Point3::new(500.0, -500.0, 500.0),
        upper_left: Point3::new(-500.0, 500.0, 500.0),
        upper_right: Point3::new(500.0, 500.0, 500.0),
    };
    scene.ambient_light = Color::splat(0.1);

    scene.add_light(Light::Point {
        position: Point3::new(-600.0, 800.0, 400.0),
        color: Color::new(0.7, 0.7, 0.6),
    });
    scene.add_light(Light::Directional {
        direction: Vec3::new(0.0, -1.0, -1.0),
        color: Color::splat(0.3),
    });

    // Ground triangle
    let ground = scene.add_material(Material::matte(
        Color::splat(0.05),
        Color::new(0.4, 0.4, 0.45),
    ));
    scene.add_shape(
        Primitive::Triangle {
            a: Point3::new(-1500.0, -300.0, -1500.0),
            b: Point3::new(1500.0, -300.0, -1500.0),
            c: Point3::new(0.0, -300.0, 800.0),
        },
        ground,
        None,
    );

    // Three spheres: mirror, glossy red, matte blue
    let mirror = scene.add_material(Material {
        ambient: Color::splat(0.02),
        diffuse: Color::splat(0.1),
        specular: Color::splat(0.8),
        shininess: 40.0,
        reflective: Color::splat(0.8),
    });
    let glossy = scene.add_material(Material {
        ambient: Color::new(0.1, 0.02, 0.02),
        diffuse: Color::new(0.8, 0.1, 0.1),
        specular: Color::splat(0.5),
        shininess: 16.0,
        reflective: Color::splat(0.2),
    });
    let matte = scene.add_material(Material::matte(
        Color::new(0.02, 0.02, 0.1),
        Color::new(0.1, 0.2, 0.8),
    ));

    let spheres = [
        (Point3::new(0.0, -50.0, -400.0), 250.0, mirror),
        (Point3::new(-450.0, -150.0, -100.0), 150.0, glossy),
        (Point3::new(450.0, -150.0, -100.0), 150.0, matte),
    ];
    for (center, radius, material) in spheres {
        scene.add_shape(Primitive::Sphere { center, radius }, material, None);
    }

    println!("Created {} shapes", scene.shape_count());
    scene
}

fn save_ppm(canvas: &Canvas, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", canvas.width(), canvas.height())?;
    writeln!(writer, "255")?;

    for px in canvas.to_rgba().chunks(4) {
        writeln!(writer, "{} {} {}", px[0], px[1], px[2])?;
    }

    Ok(())
}
