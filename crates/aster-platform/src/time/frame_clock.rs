/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Milliseconds elapsed since the previous tick; zero on the first tick.
    pub dt_ms: f32,

    /// Host timestamp of this tick, in milliseconds.
    pub now_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots from host timestamps.
///
/// The clock never samples time itself; the host passes the timestamp of
/// each animation frame. Until the first tick there is no baseline, so the
/// first delta is exactly zero, including for a genuine timestamp of 0.0,
/// which is an ordinary value here and not a sentinel.
///
/// Deltas are exact differences. Pausing or stalling the loop therefore
/// produces a correspondingly large delta; smoothing or clamping is the
/// engine's call, not the clock's.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the timing baseline; the next tick reports a zero delta.
    ///
    /// Useful when resuming after a long suspension.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Advances the clock to `now_ms` and returns a new `FrameTime`.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let dt_ms = match self.last_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        let ft = FrameTime {
            dt_ms,
            now_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_reports_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.5).dt_ms, 0.0);
    }

    #[test]
    fn first_tick_at_timestamp_zero_reports_zero_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.tick(0.0);
        assert_eq!(ft.dt_ms, 0.0);
        // 0.0 is a real baseline, not "unset": the next delta counts from it.
        assert_eq!(clock.tick(16.0).dt_ms, 16.0);
    }

    #[test]
    fn deltas_are_exact_differences() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(116.625).dt_ms, 116.625 - 100.0);
        assert_eq!(clock.tick(150.0).dt_ms, (150.0f64 - 116.625) as f32);
    }

    #[test]
    fn frame_index_counts_up_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1.0).frame_index, 0);
        assert_eq!(clock.tick(2.0).frame_index, 1);
        assert_eq!(clock.tick(3.0).frame_index, 2);
    }

    #[test]
    fn reset_restores_the_zero_delta_behavior() {
        let mut clock = FrameClock::new();
        clock.tick(10.0);
        clock.tick(20.0);
        clock.reset();
        assert_eq!(clock.tick(500.0).dt_ms, 0.0);
    }
}
