/// Example: Load and render an OBJ file in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/file.obj

use std::env;
use std::fs;

use sw3d_core::{obj, Mesh, RenderConfig};
use sw3d_terminal::App;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = RenderConfig::default();

    if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using default cube...");
        let mut app = App::new(Mesh::cube(1.0), &config)?;
        return app.run();
    }

    let obj_path = &args[1];
    let text = fs::read_to_string(obj_path)?;
    let mesh = obj::parse_obj(&text)?;

    println!(
        "Loaded {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    let mut app = App::new(mesh, &config)?;
    app.run()
}
