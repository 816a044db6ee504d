//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    started: Instant,
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }
    
    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time = now.duration_since(self.started).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Forget accumulated event times, so the next frame measures from now
    pub fn clear_event_times(&mut self) {
        let now = Instant::now();
        self.started = now;
        self.last_frame = now;
        self.delta_time = 0.0;
        self.total_time = 0.0;
    }
    
    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }
    
    /// Get the total elapsed time since the timer was created or cleared
    pub fn total_time(&self) -> f32 {
        self.total_time
    }
    
    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
