//! Example: Write a random scene file.
//!
//! Run with: cargo run --example generate_scene -- new_scene.txt [seed]
//!
//! The scene has one directional light, three point lights, two triangles
//! and one sphere, each shape with its own random material.

use std::env;
use std::fs;
use std::process;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAMERA: &str = "cam 0 0 150 -50 -50 50 50 -50 50 -50 50 50 50 50 50";

fn record(tag: &str, fields: &[f64]) -> String {
    let mut line = tag.to_string();
    for field in fields {
        line.push(' ');
        line.push_str(&field.to_string());
    }
    line
}

fn int(rng: &mut StdRng, min: i32, max: i32) -> f64 {
    rng.gen_range(min..=max) as f64
}

fn random_material(rng: &mut StdRng) -> String {
    let mut fields = Vec::with_capacity(13);
    fields.extend((0..3).map(|_| rng.gen_range(0.0..0.3)));
    fields.extend((0..3).map(|_| rng.gen::<f64>()));
    fields.extend((0..3).map(|_| rng.gen::<f64>()));
    fields.push(int(rng, 2, 50));
    fields.extend((0..3).map(|_| rng.gen_range(0.0..0.5)));
    record("mat", &fields)
}

fn random_light(rng: &mut StdRng, tag: &str, z_range: (i32, i32)) -> String {
    let fields = [
        int(rng, -200, 200),
        int(rng, -200, 200),
        int(rng, z_range.0, z_range.1),
        rng.gen_range(0.05..0.8),
        rng.gen_range(0.05..0.8),
        rng.gen_range(0.05..0.8),
    ];
    record(tag, &fields)
}

fn random_sphere(rng: &mut StdRng) -> String {
    let radius = int(rng, 5, 50);
    let fields = [
        int(rng, -100, 100),
        int(rng, -100, 100),
        int(rng, -250, -50),
        radius,
    ];
    record("sph", &fields)
}

fn random_triangle(rng: &mut StdRng) -> String {
    let mut fields = Vec::with_capacity(9);
    for _ in 0..3 {
        fields.push(int(rng, -100, 100));
        fields.push(int(rng, -100, 100));
        fields.push(int(rng, -100, 0));
    }
    record("tri", &fields)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or("new_scene.txt");
    let seed = match args.get(2).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("Invalid seed: {}", e);
            process::exit(1);
        }
        None => rand::random(),
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut lines = vec![CAMERA.to_string()];

    lines.push(random_light(&mut rng, "ltd", (-50, 200)));
    for _ in 0..3 {
        lines.push(random_light(&mut rng, "ltp", (-50, 50)));
    }
    for _ in 0..2 {
        lines.push(random_material(&mut rng));
        lines.push(random_triangle(&mut rng));
    }
    lines.push(random_material(&mut rng));
    lines.push(random_sphere(&mut rng));

    let mut content = lines.join("\n");
    content.push('\n');

    if let Err(e) = fs::write(path, content) {
        eprintln!("Failed to write {}: {}", path, e);
        process::exit(1);
    }
    println!("Wrote {} (seed {})", path, seed);
}
