//! # Conway's Game of Life - Scene Graph Cells
//!
//! Every cell of the grid is a cube mesh node under one grid node. Each generation
//! hides dead cells with `set_visibility`, draws the graph into a
//! `CommandRecorder` and logs how many cubes were drawn.
//!
//! ```text
//! RUST_LOG=info cargo run --example life_grid -- 64
//! ```

use anyhow::Context;
use cgmath::{Deg, Point3, Vector3};
use rand::Rng;
use thistle::prelude::*;

/// Simple Conway's Game of Life state
struct GameOfLifeState {
    width: u32,
    height: u32,
    current_grid: Vec<bool>,
    next_grid: Vec<bool>,
    generation: u64,
}

impl GameOfLifeState {
    /// Create new Game of Life state with random initialization (30% alive)
    fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let mut rng = rand::rng();
        let current_grid = (0..size).map(|_| rng.random_bool(0.3)).collect();

        Self {
            width,
            height,
            current_grid,
            next_grid: vec![false; size],
            generation: 0,
        }
    }

    /// Cell state at position, wrapping at the edges
    fn cell(&self, x: i32, y: i32) -> bool {
        let wrapped_x = x.rem_euclid(self.width as i32) as u32;
        let wrapped_y = y.rem_euclid(self.height as i32) as u32;
        self.current_grid[(wrapped_y * self.width + wrapped_x) as usize]
    }

    fn count_neighbors(&self, x: u32, y: u32) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx != 0 || dy != 0) && self.cell(x as i32 + dx, y as i32 + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Apply Conway's rules for one generation
    fn step(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = (y * self.width + x) as usize;
                self.next_grid[index] = matches!(
                    (self.current_grid[index], self.count_neighbors(x, y)),
                    (true, 2) | (true, 3) | (false, 3)
                );
            }
        }

        std::mem::swap(&mut self.current_grid, &mut self.next_grid);
        self.generation += 1;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let generations: u64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse().with_context(|| format!("invalid generation count '{}'", arg))?,
        None => 32,
    };

    const WIDTH: u32 = 24;
    const HEIGHT: u32 = 24;

    let mut registry = AssetRegistry::new();
    let cube = registry.add_mesh(Box::new(Mesh::from_geometry("cell", &generate_cube())));
    let shader = registry.add_shader(Box::new(ShaderProgram::phong("phong")));
    let alive = registry.add_material(Material::new("alive", [0.2, 0.8, 0.3, 1.0], 0.0, 0.6));

    let mut graph = SceneGraph::with_settings(
        SceneGraphSettings::default()
            .with_light_position(Vector3::new(0.0, 30.0, 20.0))
            .with_node_capacity((WIDTH * HEIGHT) as usize + 4),
    );
    let grid = graph.add_simple_node("grid", NodeId::ROOT);
    // Center the grid on the origin
    graph
        .transform_mut(grid)
        .set_local_position(Vector3::new(-(WIDTH as f32) / 2.0, 0.0, -(HEIGHT as f32) / 2.0));

    let cells: Vec<NodeId> = (0..WIDTH * HEIGHT)
        .map(|i| {
            let (x, y) = (i % WIDTH, i / WIDTH);
            let node = graph.add_mesh_node(&format!("cell_{}_{}", x, y), grid, cube, shader);
            graph
                .transform_mut(node)
                .set_local_position(Vector3::new(x as f32 + 0.5, 0.0, y as f32 + 0.5));
            graph.transform_mut(node).set_local_scale(Vector3::new(0.9, 0.9, 0.9));
            graph.add_material_to_node(node, alive);
            node
        })
        .collect();

    let camera = PerspectiveCamera::new(Point3::new(0.0, 30.0, 24.0), Point3::new(0.0, 0.0, 0.0), 16.0 / 9.0, Deg(45.0));
    let frustum = Frustum::from_camera(&camera);

    let mut state = GameOfLifeState::new(WIDTH, HEIGHT);
    let mut recorder = CommandRecorder::new();
    let mut monitor = PerformanceMonitor::new();

    for _ in 0..generations {
        monitor.begin_frame();

        for (&node, &is_alive) in cells.iter().zip(&state.current_grid) {
            graph.set_visibility(node, is_alive);
        }

        recorder.clear();
        graph.draw(&frustum, &registry, &mut recorder);
        monitor.record_scene_frame(graph.total_drawn_objects(), graph.total_culled_nodes());
        monitor.end_frame();

        log::info!(
            "generation {}: {} live cells drawn, {} commands",
            state.generation,
            graph.total_drawn_objects(),
            recorder.commands().len()
        );

        state.step();
    }

    let metrics = monitor.metrics();
    log::info!("{:.2}ms average frame, {} draw calls last frame", metrics.frame_time_ms, metrics.draw_calls);

    Ok(())
}
