//! # Performance Metrics System
//!
//! Frame timing and per-frame scene statistics for the Thistle engine.
//!
//! ## Usage
//!
//! ```rust
//! use thistle::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//!
//! // In your main loop
//! monitor.begin_frame();
//! // ... update and draw the scene graph ...
//! monitor.record_scene_frame(12, 3);
//! monitor.end_frame();
//!
//! log::info!("{:.1} fps", monitor.metrics().fps);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Performance metrics over the current sample window
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Frames per second derived from the average frame time
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    /// Minimum frame time in the current window
    pub min_frame_time_ms: f32,
    /// Maximum frame time in the current window
    pub max_frame_time_ms: f32,
    /// Meshes drawn in the last frame
    pub draw_calls: usize,
    /// Nodes rejected by the frustum test in the last frame
    pub culled_nodes: usize,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: f32::MAX,
            max_frame_time_ms: 0.0,
            draw_calls: 0,
            culled_nodes: 0,
        }
    }
}

/// Performance monitoring system
pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times for averaging
    frame_times: VecDeque<Duration>,
    /// Maximum number of frame times to keep for averaging
    max_samples: usize,
    /// Start time of the current frame
    frame_start: Option<Instant>,
    current_metrics: PerformanceMetrics,
    last_update: Instant,
    /// Minimum time between metric recalculations in `end_frame`
    update_interval: Duration,
}

impl PerformanceMonitor {
    /// Monitor averaging over ~2 seconds at 60fps
    pub fn new() -> Self {
        Self::with_config(120)
    }

    pub fn with_config(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            frame_start: None,
            current_metrics: PerformanceMetrics::default(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(100),
        }
    }

    /// Mark the beginning of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame; metrics are recalculated at most every 100ms
    pub fn end_frame(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.add_frame_time(start.elapsed());

            if self.last_update.elapsed() >= self.update_interval {
                self.update_metrics();
                self.last_update = Instant::now();
            }
        }
    }

    /// Adds a measured frame time and recalculates immediately
    pub fn record_frame_time(&mut self, frame_time: Duration) {
        self.add_frame_time(frame_time);
        self.update_metrics();
    }

    /// Stores the scene graph's counters for the frame just drawn
    pub fn record_scene_frame(&mut self, drawn: usize, culled: usize) {
        self.current_metrics.draw_calls = drawn;
        self.current_metrics.culled_nodes = culled;
    }

    fn add_frame_time(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
    }

    fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time_ms = total_time.as_secs_f32() * 1000.0 / self.frame_times.len() as f32;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) = (self.frame_times.iter().min(), self.frame_times.iter().max()) {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }

        log::trace!(
            "{:.1} fps, {:.2}ms avg over {} frames",
            self.current_metrics.fps,
            avg_frame_time_ms,
            self.frame_times.len()
        );
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Frame times in milliseconds, oldest first
    pub fn frame_time_history(&self) -> Vec<f32> {
        self.frame_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.frame_start = None;
        self.last_update = Instant::now();
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}
