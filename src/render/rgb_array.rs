use crate::env::EpisodeState;
use crate::render::{render_frame, Frame, Render, RenderError};

/// Hands every frame back to the caller as a pixel array.
#[derive(Debug, Clone)]
pub struct RgbArrayRenderer {
    window_size: u32,
}

impl RgbArrayRenderer {
    pub fn new(window_size: u32) -> Self {
        Self { window_size }
    }
}

impl Render for RgbArrayRenderer {
    fn render(&mut self, state: &EpisodeState, size: f64) -> Result<Option<Frame>, RenderError> {
        render_frame(state, size, self.window_size, false).map(Some)
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        [frame[[y, x, 0]], frame[[y, x, 1]], frame[[y, x, 2]]]
    }

    #[test]
    fn draws_target_and_agent() {
        // 512 / 20 = 25.6 pixels per unit
        let state = EpisodeState::new([4.0, 4.0], [10.0, 2.0], 70.0, 5.0);
        let mut renderer = RgbArrayRenderer::new(512);
        let frame = renderer.render(&state, 20.0).unwrap().unwrap();
        assert_eq!(frame.shape(), &[512, 512, 3]);
        assert_eq!(pixel(&frame, 268, 64), [255, 0, 0]);
        assert_eq!(pixel(&frame, 115, 115), [0, 0, 0]);
        assert_eq!(pixel(&frame, 500, 500), [255, 255, 255]);
    }

    #[test]
    fn rows_follow_the_y_axis() {
        // target far right on the top row, so the frame is not symmetric
        let state = EpisodeState::new([0.0, 19.0], [18.0, 0.0], 70.0, 5.0);
        let frame = RgbArrayRenderer::new(512)
            .render(&state, 20.0)
            .unwrap()
            .unwrap();
        assert_eq!(pixel(&frame, 470, 12), [255, 0, 0]);
        assert_eq!(pixel(&frame, 12, 470), [255, 255, 255]);
        assert_eq!(pixel(&frame, 12, 499), [0, 0, 0]);
    }

    #[test]
    fn close_is_a_no_op() {
        let mut renderer = RgbArrayRenderer::new(32);
        renderer.close();
        renderer.close();
    }
}
