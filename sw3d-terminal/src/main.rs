//! Terminal renderer binary.
//!
//! Usage:
//!   cargo run -p sw3d-terminal -- [--model path/to/mesh.obj] [--width 120] [--height 40] [--mode plain|bresenham|scanline] [--config sw3d.json]
//!
//! Without a model argument a demo cube is rendered. Controls:
//!   - Arrow keys: move camera along x/y
//!   - w/s: move camera along z
//!   - a/d and q/e: rotate the view about y and x
//!   - j/l and i/k: rotate the mesh placement about y and x
//!   - +/-: zoom (field of view)
//!   - Enter: cycle the drawing algorithm
//!   - Esc: quit

use std::env;
use std::fs;

use anyhow::{bail, Context};
use sw3d_core::{obj, DrawMode, Mesh, RenderConfig};
use sw3d_terminal::App;
use tracing::info;

fn parse_args() -> anyhow::Result<RenderConfig> {
    let mut cfg = RenderConfig::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                let text = fs::read_to_string(&args[i + 1])
                    .with_context(|| format!("read config file {}", args[i + 1]))?;
                cfg = RenderConfig::from_json_str(&text)
                    .with_context(|| format!("parse config file {}", args[i + 1]))?;
                i += 2;
            }
            "--model" if i + 1 < args.len() => {
                cfg.model = Some(args[i + 1].clone());
                i += 2;
            }
            "--width" if i + 1 < args.len() => {
                cfg.width = args[i + 1].parse().context("parse --width")?;
                i += 2;
            }
            "--height" if i + 1 < args.len() => {
                cfg.height = args[i + 1].parse().context("parse --height")?;
                i += 2;
            }
            "--mode" if i + 1 < args.len() => {
                cfg.draw_mode = match args[i + 1].as_str() {
                    "plain" => DrawMode::Plain,
                    "bresenham" => DrawMode::Bresenham,
                    "scanline" => DrawMode::Scanline,
                    other => bail!("unknown draw mode: {}", other),
                };
                i += 2;
            }
            _ => i += 1,
        }
    }
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = parse_args()?;

    let mesh = match &cfg.model {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("read model file {}", path))?;
            let mesh =
                obj::parse_obj(&text).with_context(|| format!("parse model file {}", path))?;
            info!(
                model = %path,
                vertices = mesh.vertex_count(),
                triangles = mesh.triangle_count(),
                "imported mesh"
            );
            mesh
        }
        None => Mesh::cube(1.0),
    };

    let mut app = App::new(mesh, &cfg)?;
    app.run()
}
