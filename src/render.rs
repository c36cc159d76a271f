mod human;
mod rgb_array;
mod scene;

use enum_dispatch::enum_dispatch;
use ndarray::Array3;

use crate::env::{EpisodeState, RenderMode};

pub use human::{text_view, FrameClock, HumanRenderer};
pub use rgb_array::RgbArrayRenderer;
pub use scene::{battery_label, draw_scene, render_frame, save_frame, time_label};

/// RGB pixels laid out as `(height, width, 3)`, row `y` first.
pub type Frame = Array3<u8>;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to draw frame: {0}")]
    Drawing(String),
    #[error("frame buffer has an unexpected shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "window")]
    #[error("window error: {0}")]
    Window(String),
}

/// Presentation of an episode. Never touches simulation state.
#[enum_dispatch]
pub trait Render {
    /// Draws `state`. Only array renderers hand back a frame.
    fn render(&mut self, state: &EpisodeState, size: f64) -> Result<Option<Frame>, RenderError>;
    /// Releases whatever the renderer acquired. Safe to call repeatedly.
    fn close(&mut self);
}

#[enum_dispatch(Render)]
pub enum Renderer {
    RgbArray(RgbArrayRenderer),
    Human(HumanRenderer),
}

impl Renderer {
    pub fn for_mode(mode: RenderMode, window_size: u32, render_fps: u32) -> Self {
        match mode {
            RenderMode::RgbArray => RgbArrayRenderer::new(window_size).into(),
            RenderMode::Human => HumanRenderer::new(window_size, render_fps).into(),
        }
    }
}
