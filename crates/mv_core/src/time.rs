use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Fixed step consumed by actor animation and the presentation orbit,
/// regardless of the real frame rate.
pub const NOMINAL_DT: f32 = 1.0 / 60.0;

/// Per-frame wall-clock measurement alongside the fixed nominal step.
///
/// Two delta-time sources coexist on purpose: creature animation and the
/// presentation orbit consume `NOMINAL_DT` once per rendered frame, while the
/// rain field integrates with the measured wall-clock delta. Unifying them
/// changes observed motion speed, so each subsystem declares which one it
/// reads.
pub struct FrameTiming {
    pub max_measured_dt: f64,
    measured_dt: f64,
    last_instant: Instant,
    pub frame_count: u64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameTiming {
    pub fn new() -> Self {
        Self {
            max_measured_dt: 0.25,
            measured_dt: 0.0,
            last_instant: Instant::now(),
            frame_count: 0,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        self.measured_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Hitch cap: a stalled frame (debugger, window drag) must not turn
        // into one giant integration step for the rain field.
        if self.measured_dt > self.max_measured_dt {
            log::warn!(
                "Frame took {:.1}ms — capping measured delta to {}ms",
                self.measured_dt * 1000.0,
                self.max_measured_dt * 1000.0
            );
            self.measured_dt = self.max_measured_dt;
        }

        self.frame_count += 1;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = self.measured_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    /// Wall-clock seconds since the previous `begin_frame`, hitch-capped.
    /// Consumed by the rain field only.
    pub fn measured_dt(&self) -> f32 {
        self.measured_dt as f32
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}
