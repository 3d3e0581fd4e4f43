use aster_platform::core::{Game, InitOptions};
use aster_platform::device::Canvas;
use aster_platform::files::{load_file, LoadError};
use aster_platform::input::Key;

use crate::quad::{QuadInstance, QuadRenderer};

const QUAD_SIZE: f32 = 120.0;

const PALETTE: [[f32; 4]; 4] = [
    [0.93, 0.56, 0.13, 1.0],
    [0.22, 0.76, 0.58, 1.0],
    [0.44, 0.47, 0.95, 1.0],
    [0.91, 0.32, 0.47, 1.0],
];

/// Minimal hosted game: a quad bouncing over a slowly pulsing background.
///
/// Exists to exercise the full platform surface: gesture-gated init,
/// per-frame update/draw, resize, input forwarding, and the file loader.
pub struct Pulse {
    width: f32,
    height: f32,
    /// Seconds since init; drives the background pulse.
    t: f32,
    pos: [f32; 2],
    vel: [f32; 2],
    color: usize,
    renderer: QuadRenderer,
}

impl Pulse {
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            t: 0.0,
            pos: [80.0, 80.0],
            vel: [220.0, 160.0],
            color: 0,
            renderer: QuadRenderer::new(),
        }
    }
}

impl Game for Pulse {
    fn init(&mut self, options: &InitOptions) -> bool {
        if options.keyboard_fullscreen_instructions {
            log::info!("space cycles the quad color; your window manager handles fullscreen");
        }
        if !options.hide_quit_instructions {
            log::info!("close the window to quit");
        }

        // Optional greeting next to the working directory.
        match load_file("motd.txt", false) {
            Ok(buf) => log::info!("motd: {}", String::from_utf8_lossy(&buf.data).trim_end()),
            Err(LoadError::NoResource(_)) => log::debug!("no motd.txt; skipping greeting"),
            Err(e) => log::warn!("motd unavailable: {e}"),
        }

        true
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    fn update(&mut self, dt_ms: f32) {
        let dt = dt_ms / 1_000.0;
        self.t += dt;

        let bounds = [self.width - QUAD_SIZE, self.height - QUAD_SIZE];
        bounce(&mut self.pos, &mut self.vel, bounds, dt);
    }

    fn draw(&mut self, canvas: &mut Canvas<'_>) {
        // Slow pulse between two dark tones.
        let pulse = 0.5 + 0.5 * (self.t * 0.8).sin();
        let clear = wgpu::Color {
            r: 0.02 + 0.05 * pulse as f64,
            g: 0.02,
            b: 0.06 + 0.08 * pulse as f64,
            a: 1.0,
        };

        let quad = QuadInstance {
            origin: self.pos,
            extent: [QUAD_SIZE, QUAD_SIZE],
            color: PALETTE[self.color],
        };

        self.renderer.render(canvas, clear, &[quad]);
    }

    fn key_down(&mut self, key: Key) {
        match key {
            Key::Space => self.color = (self.color + 1) % PALETTE.len(),
            other => log::debug!("key pressed: {other:?}"),
        }
    }

    fn gamepad_connected(&mut self, pad: usize) {
        log::info!("gamepad {pad} joined");
    }

    fn gamepad_disconnected(&mut self, pad: usize) {
        log::info!("gamepad {pad} left");
    }
}

/// Integrates one bounce step, reflecting velocity at the walls.
///
/// `bounds` is the maximum origin per axis; a non-positive bound (window
/// smaller than the quad) pins the quad to the origin on that axis.
fn bounce(pos: &mut [f32; 2], vel: &mut [f32; 2], bounds: [f32; 2], dt: f32) {
    for axis in 0..2 {
        if bounds[axis] <= 0.0 {
            pos[axis] = 0.0;
            continue;
        }

        let mut next = pos[axis] + vel[axis] * dt;
        if next < 0.0 {
            next = -next;
            vel[axis] = vel[axis].abs();
        } else if next > bounds[axis] {
            next = bounds[axis] - (next - bounds[axis]);
            vel[axis] = -vel[axis].abs();
        }
        pos[axis] = next.clamp(0.0, bounds[axis]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounce_advances_linearly_inside_bounds() {
        let mut pos = [10.0, 20.0];
        let mut vel = [100.0, -50.0];
        bounce(&mut pos, &mut vel, [500.0, 500.0], 0.1);
        assert_eq!(pos, [20.0, 15.0]);
        assert_eq!(vel, [100.0, -50.0]);
    }

    #[test]
    fn bounce_reflects_at_the_far_wall() {
        let mut pos = [490.0, 0.0];
        let mut vel = [200.0, 0.0];
        bounce(&mut pos, &mut vel, [500.0, 500.0], 0.1);
        assert_eq!(pos[0], 490.0);
        assert!(vel[0] < 0.0);
    }

    #[test]
    fn bounce_pins_to_origin_when_window_is_tiny() {
        let mut pos = [50.0, 50.0];
        let mut vel = [100.0, 100.0];
        bounce(&mut pos, &mut vel, [-20.0, 300.0], 0.016);
        assert_eq!(pos[0], 0.0);
        assert!(pos[1] > 50.0);
    }
}
