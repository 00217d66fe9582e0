//! # Scene Viewer
//!
//! Builds a small hierarchy (a spinning turntable carrying a few primitives),
//! orbits a perspective camera around it and draws every frame into a
//! `CommandRecorder`, logging what was drawn and culled.
//!
//! An OBJ file given on the command line is loaded under its own node.
//!
//! ```text
//! RUST_LOG=debug cargo run --example scene_viewer -- assets/model.obj
//! ```

use anyhow::Context;
use cgmath::{Deg, Point3, Quaternion, Rotation3, Vector3};
use thistle::gfx::geometry::generate_plane;
use thistle::prelude::*;

const FRAMES: u32 = 120;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut registry = AssetRegistry::new();
    let cube = registry.add_mesh(Box::new(Mesh::from_geometry("cube", &generate_cube())));
    let sphere = registry.add_mesh(Box::new(Mesh::from_geometry("sphere", &generate_sphere(32, 16))));
    let floor = registry.add_mesh(Box::new(Mesh::from_geometry("floor", &generate_plane(20.0, 20.0, 4, 4))));
    let phong = registry.add_shader(Box::new(ShaderProgram::phong("phong")));

    let gold = registry.add_material(
        Material::new("gold", [1.0, 0.8, 0.3, 1.0], 1.0, 0.3).with_emission(0.1, 0.08, 0.0),
    );
    let plastic = registry.add_material(Material::new("plastic", [0.8, 0.1, 0.1, 1.0], 0.0, 0.7));

    let mut graph = SceneGraph::new();
    let ground = graph.add_mesh_node("floor", NodeId::ROOT, floor, phong);
    graph.add_color_to_node(ground, [0.4, 0.4, 0.4]);

    let turntable = graph.add_simple_node("turntable", NodeId::ROOT);
    graph.transform_mut(turntable).set_local_position(Vector3::new(0.0, 0.5, 0.0));

    for (i, x) in [-3.0f32, 0.0, 3.0].into_iter().enumerate() {
        let node = graph.add_mesh_node(&format!("cube_{}", i), turntable, cube, phong);
        graph.transform_mut(node).set_local_position(Vector3::new(x, 0.0, 0.0));
        graph.add_material_to_node(node, plastic);
    }

    let orb = graph.add_mesh_node("orb", turntable, sphere, phong);
    graph.transform_mut(orb).set_local_position(Vector3::new(0.0, 2.0, 0.0));
    graph.add_material_to_node(orb, gold);

    // Far outside the orbit, only visible when the camera faces it
    let beacon = graph.add_mesh_node("beacon", NodeId::ROOT, cube, phong);
    graph.transform_mut(beacon).set_local_position(Vector3::new(0.0, 0.0, -60.0));

    if let Some(path) = std::env::args().nth(1) {
        let loader = ObjSceneLoader::new(phong);
        let imported = graph
            .add_scene_node("imported", NodeId::ROOT, &path, &loader, &mut registry)
            .with_context(|| format!("loading '{}'", path))?;
        graph.transform_mut(imported).set_local_position(Vector3::new(0.0, 0.0, 5.0));
    }

    graph.select(Some(orb));

    let mut camera = PerspectiveCamera::new(Point3::new(0.0, 4.0, 12.0), Point3::new(0.0, 0.0, 0.0), 16.0 / 9.0, Deg(45.0));
    let mut frustum = Frustum::from_camera(&camera);
    let mut recorder = CommandRecorder::new();
    let mut monitor = PerformanceMonitor::new();

    for frame in 0..FRAMES {
        monitor.begin_frame();

        let angle = frame as f32 / FRAMES as f32 * std::f32::consts::TAU;
        camera.orbit(Point3::new(0.0, 0.0, 0.0), 12.0, 0.35, angle);
        frustum.update(&camera);

        graph
            .transform_mut(turntable)
            .set_local_orientation(Quaternion::from_angle_y(Deg(frame as f32 * 3.0)));

        recorder.clear();
        graph.draw(&frustum, &registry, &mut recorder);
        monitor.record_scene_frame(graph.total_drawn_objects(), graph.total_culled_nodes());
        monitor.end_frame();

        log::debug!(
            "frame {}: drew {:?}, culled {} nodes",
            frame,
            recorder.drawn_meshes(),
            graph.total_culled_nodes()
        );
    }

    let metrics = monitor.metrics();
    log::info!(
        "{} nodes, {:.1} fps, last frame {} draws / {} culled",
        graph.node_count(),
        metrics.fps,
        metrics.draw_calls,
        metrics.culled_nodes
    );

    Ok(())
}
