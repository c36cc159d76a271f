use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::env::EpisodeState;
use crate::render::{battery_label, time_label, Frame, Render, RenderError};

const MAX_TEXT_CELLS: usize = 40;

/// Keeps presentation at a fixed frame rate by sleeping out the rest of each period.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until one period of `fps` has passed since the previous tick.
    pub fn tick(&mut self, fps: u32) {
        if let (Some(last), true) = (self.last, fps > 0) {
            let period = Duration::from_secs_f64(1.0 / fps as f64);
            let elapsed = last.elapsed();
            if elapsed < period {
                thread::sleep(period - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Text picture of the world, `A` for the agent, `T` for the target and `X`
/// when both share a cell, followed by the two status labels.
pub fn text_view(state: &EpisodeState, size: f64) -> String {
    let cells = (size.ceil() as usize).clamp(1, MAX_TEXT_CELLS);
    let scale = cells as f64 / size;
    let cell = |v: f64| ((v * scale).floor() as usize).min(cells - 1);
    let [ax, ay] = state.agent();
    let [tx, ty] = state.target();
    let agent = (cell(ax), cell(ay));
    let target = (cell(tx), cell(ty));

    let mut view = String::with_capacity((cells + 1) * cells + 64);
    for row in 0..cells {
        for col in 0..cells {
            let here = (col, row);
            view.push(match (here == agent, here == target) {
                (true, true) => 'X',
                (true, false) => 'A',
                (false, true) => 'T',
                (false, false) => '.',
            });
        }
        view.push('\n');
    }
    view.push_str(&battery_label(state));
    view.push('\n');
    view.push_str(&time_label(state));
    view
}

#[cfg(not(feature = "window"))]
mod surface {
    use std::io::{self, Write};

    use super::text_view;
    use crate::env::EpisodeState;
    use crate::render::RenderError;

    pub(super) struct Surface {
        out: io::Stdout,
    }

    impl Surface {
        pub(super) fn open(_window_size: u32) -> Result<Self, RenderError> {
            Ok(Self { out: io::stdout() })
        }

        pub(super) fn present(&mut self, state: &EpisodeState, size: f64) -> Result<(), RenderError> {
            let mut out = self.out.lock();
            writeln!(out, "{}\n", text_view(state, size))?;
            out.flush()?;
            Ok(())
        }
    }
}

#[cfg(feature = "window")]
mod surface {
    use minifb::{Window, WindowOptions};

    use crate::env::EpisodeState;
    use crate::render::{render_frame, RenderError};

    pub(super) struct Surface {
        window: Window,
        window_size: u32,
    }

    impl Surface {
        pub(super) fn open(window_size: u32) -> Result<Self, RenderError> {
            let side = window_size as usize;
            let window = Window::new("Grid World", side, side, WindowOptions::default())
                .map_err(|e| RenderError::Window(e.to_string()))?;
            Ok(Self {
                window,
                window_size,
            })
        }

        pub(super) fn present(&mut self, state: &EpisodeState, size: f64) -> Result<(), RenderError> {
            let frame = render_frame(state, size, self.window_size, true)?;
            let buffer: Vec<u32> = frame
                .into_raw_vec()
                .chunks_exact(3)
                .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2]))
                .collect();
            let side = self.window_size as usize;
            self.window
                .update_with_buffer(&buffer, side, side)
                .map_err(|e| RenderError::Window(e.to_string()))
        }
    }
}

/// Shows every frame to a person, paced to the render frame rate.
///
/// The surface and clock are acquired on the first render and released by `close`.
pub struct HumanRenderer {
    window_size: u32,
    render_fps: u32,
    surface: Option<surface::Surface>,
    clock: Option<FrameClock>,
}

impl HumanRenderer {
    pub fn new(window_size: u32, render_fps: u32) -> Self {
        Self {
            window_size,
            render_fps,
            surface: None,
            clock: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_some()
    }
}

impl Render for HumanRenderer {
    fn render(&mut self, state: &EpisodeState, size: f64) -> Result<Option<Frame>, RenderError> {
        if self.surface.is_none() {
            debug!("opening {}px human surface", self.window_size);
            self.surface = Some(surface::Surface::open(self.window_size)?);
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.present(state, size)?;
        }
        self.clock
            .get_or_insert_with(FrameClock::new)
            .tick(self.render_fps);
        Ok(None)
    }

    fn close(&mut self) {
        if self.surface.take().is_some() {
            debug!("closed human surface");
        }
        self.clock = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_view_marks_agent_and_target() {
        let state = EpisodeState::new([0.2, 1.7], [3.9, 0.0], 70.0, 5.0);
        let view = text_view(&state, 4.0);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines[0], "...T");
        assert_eq!(lines[1], "A...");
        assert_eq!(lines[4], "Battery Level: 70");
        assert_eq!(lines[5], "Time remaining: 5");
    }

    #[test]
    fn text_view_caps_large_worlds() {
        let state = EpisodeState::new([999.0, 999.0], [999.0, 999.0], 70.0, 5.0);
        let view = text_view(&state, 1000.0);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines[0].len(), MAX_TEXT_CELLS);
        assert!(lines[MAX_TEXT_CELLS - 1].ends_with('X'));
    }

    #[test]
    fn clock_paces_consecutive_ticks() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(50);
        clock.tick(50);
        assert!(start.elapsed() >= Duration::from_millis(19));
    }

    #[test]
    fn close_without_render_is_harmless() {
        let mut renderer = HumanRenderer::new(512, 4);
        renderer.close();
        renderer.close();
        assert!(!renderer.is_open());
    }

    #[cfg(not(feature = "window"))]
    #[test]
    fn surface_is_acquired_lazily() {
        let state = EpisodeState::new([1.0, 1.0], [5.0, 5.0], 70.0, 5.0);
        let mut renderer = HumanRenderer::new(512, 1000);
        assert!(!renderer.is_open());
        assert!(renderer.render(&state, 20.0).unwrap().is_none());
        assert!(renderer.is_open());
        renderer.close();
        assert!(!renderer.is_open());
        renderer.close();
    }
}
