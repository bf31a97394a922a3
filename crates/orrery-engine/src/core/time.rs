/// Frame delta sanitizer.
/// Guarantees every delta handed to a simulation step is finite, non-negative
/// and no larger than `max_dt`.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    /// Largest delta a single step may receive (seconds).
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { max_dt }
    }

    /// Clamp a raw wall-clock delta.
    ///
    /// NaN, infinities and negative values become 0 (the frame is rendered but
    /// simulated time does not move). Oversized deltas, e.g. after the tab was
    /// backgrounded, are capped so orbits do not jump.
    pub fn sanitize(&self, raw_dt: f32) -> f32 {
        if !raw_dt.is_finite() || raw_dt < 0.0 {
            log::warn!("discarding anomalous frame delta {raw_dt}");
            return 0.0;
        }
        if raw_dt > self.max_dt {
            log::debug!("clamping frame delta {raw_dt}s to {}s", self.max_dt);
            return self.max_dt;
        }
        raw_dt
    }

    /// The delta cap.
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

/// Display-refresh driven loop state.
///
/// The host calls `advance` once per animation frame with its timestamp and
/// must stop re-scheduling as soon as it returns `None`.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    clock: FrameClock,
    running: bool,
    last_timestamp_ms: Option<f64>,
    frame_count: u64,
}

impl FrameLoop {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            running: true,
            last_timestamp_ms: None,
            frame_count: 0,
        }
    }

    /// Consume a frame timestamp (milliseconds) and return the sanitized
    /// delta in seconds, or `None` once the loop is stopped.
    /// The first frame yields 0.
    pub fn advance(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let raw_dt = match self.last_timestamp_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        // A NaN timestamp must not poison the next frame's delta too.
        if now_ms.is_finite() {
            self.last_timestamp_ms = Some(now_ms);
        }
        self.frame_count += 1;
        Some(self.clock.sanitize(raw_dt))
    }

    /// Stop requesting frames. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("frame loop stopped after {} frames", self.frame_count);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames advanced so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_passes_normal_deltas() {
        let clock = FrameClock::new(0.25);
        assert_eq!(clock.sanitize(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(clock.sanitize(0.0), 0.0);
    }

    #[test]
    fn sanitize_rejects_non_finite_and_negative() {
        let clock = FrameClock::new(0.25);
        assert_eq!(clock.sanitize(f32::NAN), 0.0);
        assert_eq!(clock.sanitize(f32::INFINITY), 0.0);
        assert_eq!(clock.sanitize(f32::NEG_INFINITY), 0.0);
        assert_eq!(clock.sanitize(-0.5), 0.0);
    }

    #[test]
    fn sanitize_caps_large_deltas() {
        let clock = FrameClock::new(0.25);
        assert_eq!(clock.sanitize(30.0), 0.25);
    }

    #[test]
    fn first_frame_is_zero_then_elapsed() {
        let mut frames = FrameLoop::new(FrameClock::new(0.25));
        assert_eq!(frames.advance(1000.0), Some(0.0));
        let dt = frames.advance(1016.0).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(frames.frame_count(), 2);
    }

    #[test]
    fn clock_going_backwards_yields_zero() {
        let mut frames = FrameLoop::new(FrameClock::new(0.25));
        frames.advance(2000.0);
        assert_eq!(frames.advance(1500.0), Some(0.0));
    }

    #[test]
    fn nan_timestamp_does_not_poison_next_delta() {
        let mut frames = FrameLoop::new(FrameClock::new(0.25));
        frames.advance(1000.0);
        assert_eq!(frames.advance(f64::NAN), Some(0.0));
        let dt = frames.advance(1100.0).unwrap();
        assert!((dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut frames = FrameLoop::new(FrameClock::new(0.25));
        frames.advance(0.0);
        frames.stop();
        frames.stop();
        assert!(!frames.is_running());
        assert_eq!(frames.advance(16.0), None);
        assert_eq!(frames.frame_count(), 1);
    }
}
