//! Entry point: load a mesh (or the built-in cube) and drive a few frames
//! through the headless tracing backend. Run with RUST_LOG=debug to see the
//! full stream of context calls.

mod trace;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use corelib::{Mat4, Quat, Transform};
use renderer::{DrawMode, DrawObject, Shader, ShadedDrawObject, VertexLayout};

use trace::{TraceContext, TraceShader};

struct Options {
    model: Option<PathBuf>,
    draw_mode: DrawMode,
    frames: u32,
}

fn parse_args() -> Options {
    // Accept: --model=PATH --points --frames=N
    let mut options = Options {
        model: None,
        draw_mode: DrawMode::Triangles,
        frames: 3,
    };
    for arg in std::env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--model=") {
            options.model = Some(PathBuf::from(path));
        } else if arg == "--points" {
            options.draw_mode = DrawMode::Points;
        } else if let Some(value) = arg.strip_prefix("--frames=") {
            match value.parse::<u32>() {
                Ok(n) => options.frames = n,
                Err(_) => eprintln!("[warn] Invalid --frames value '{}', keeping default.", value),
            }
        } else {
            eprintln!("[warn] Unknown argument '{}', ignoring.", arg);
        }
    }
    options
}

fn yaw_matrix(frame: u32) -> Mat4 {
    Transform::identity()
        .with_rotation(Quat::from_rotation_y(frame as f32 * 0.1))
        .matrix()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args();
    let mut ctx = TraceContext::new();
    let shader: Rc<dyn Shader> = Rc::new(TraceShader::new("phong"));

    match &options.model {
        Some(path) => {
            let mesh = asset::obj::load_obj_from_path(path)?;
            let mut object = ShadedDrawObject::new(
                mesh.material,
                &mut ctx,
                shader,
                &mesh.vertex_data,
                &mesh.indices,
                VertexLayout::PositionNormal,
                options.draw_mode,
            );
            for frame in 0..options.frames {
                object.set_transformation(yaw_matrix(frame));
                object.render(&mut ctx);
            }
            object.dispose(&mut ctx);
        }
        None => {
            log::info!("No --model given, drawing the built-in cube");
            let (vertices, indices) = cube_geometry();
            let mut object = DrawObject::new(
                &mut ctx,
                shader,
                &vertices,
                &indices,
                VertexLayout::PositionOnly,
                options.draw_mode,
            );
            for frame in 0..options.frames {
                object.set_transformation(yaw_matrix(frame));
                object.render(&mut ctx);
            }
            object.dispose(&mut ctx);
        }
    }

    log::info!("Rendered {} frame(s). Bye!", options.frames);
    Ok(())
}

/// Unit cube as raw corner positions, no normals: 8 triples, 36 indices
/// (CCW). Drawn with the position-only layout.
fn cube_geometry() -> (Vec<f32>, Vec<u32>) {
    let vertices = vec![
        // back z=-1
        -1.0, -1.0, -1.0, // 0
        1.0, -1.0, -1.0, // 1
        1.0, 1.0, -1.0, // 2
        -1.0, 1.0, -1.0, // 3
        // front z=+1
        -1.0, -1.0, 1.0, // 4
        1.0, -1.0, 1.0, // 5
        1.0, 1.0, 1.0, // 6
        -1.0, 1.0, 1.0, // 7
    ];
    let indices = vec![
        // front (+Z)
        4, 5, 6, 4, 6, 7, //
        // back (-Z)
        0, 2, 1, 0, 3, 2, //
        // top (+Y)
        3, 2, 6, 3, 6, 7, //
        // bottom (-Y)
        0, 5, 1, 0, 4, 5, //
        // left (-X)
        0, 3, 7, 0, 7, 4, //
        // right (+X)
        1, 2, 6, 1, 6, 5,
    ];
    (vertices, indices)
}
