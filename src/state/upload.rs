//! Simulated upload progress for attached site files

use std::time::{Duration, Instant};

/// Progress indicator for one attached file
#[derive(Debug, Clone)]
pub struct UploadProgress {
    pub file_name: String,
    /// When the file was attached
    pub start_time: Instant,
    pub duration: Duration,
    /// Fraction complete, 0.0 to 1.0
    pub progress: f32,
}

impl UploadProgress {
    pub fn new(file_name: impl Into<String>, duration: Duration) -> Self {
        Self {
            file_name: file_name.into(),
            start_time: Instant::now(),
            duration,
            progress: 0.0,
        }
    }

    /// Update progress from the wall clock
    pub fn update(&mut self) {
        self.update_elapsed(self.start_time.elapsed());
    }

    pub fn update_elapsed(&mut self, elapsed: Duration) {
        if self.duration.is_zero() || elapsed >= self.duration {
            self.progress = 1.0;
            return;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.progress = simple_easing::linear(t).clamp(0.0, 1.0);
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn percent(&self) -> u16 {
        (self.progress * 100.0).round() as u16
    }
}

/// Advance every indicator and drop the finished ones
pub fn tick_uploads(uploads: &mut Vec<UploadProgress>) {
    for upload in uploads.iter_mut() {
        upload.update();
    }
    uploads.retain(|u| !u.is_complete());
}
