use std::path::Path;

use log::warn;
use ndarray::Array3;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::env::EpisodeState;
use crate::render::{Frame, RenderError};
use crate::utils::round_to;

const LABEL_MARGIN: i32 = 20;
const LABEL_FONT_SIZE: u32 = 30;

fn drawing_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(err.to_string())
}

pub fn battery_label(state: &EpisodeState) -> String {
    format!("Battery Level: {}", round_to(state.agent_battery, 0))
}

pub fn time_label(state: &EpisodeState) -> String {
    format!("Time remaining: {}", round_to(state.time_remaining, 2))
}

/// Draws the target as a red cell and the agent as a black disc on white.
///
/// One world unit spans `width / size` pixels. Labels need a system font; when
/// none can be loaded the shapes are still drawn.
pub fn draw_scene<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    state: &EpisodeState,
    size: f64,
    labels: bool,
) -> Result<(), RenderError> {
    area.fill(&WHITE).map_err(drawing_error)?;
    let (width, height) = area.dim_in_pixel();
    let pix = width as f64 / size;

    let [tx, ty] = state.target();
    let x0 = (pix * tx) as i32;
    let y0 = (pix * ty) as i32;
    let side = pix as i32;
    area.draw(&Rectangle::new(
        [(x0, y0), (x0 + side, y0 + side)],
        RED.filled(),
    ))
    .map_err(drawing_error)?;

    let [ax, ay] = state.agent();
    let center = (((ax + 0.5) * pix) as i32, ((ay + 0.5) * pix) as i32);
    area.draw(&Circle::new(center, pix / 3.0, BLACK.filled()))
        .map_err(drawing_error)?;

    if labels {
        let style = ("sans-serif", LABEL_FONT_SIZE).into_font().color(&BLACK);
        let bottom = height as i32 - LABEL_MARGIN;
        for (text, pos) in [
            (battery_label(state), (LABEL_MARGIN, LABEL_MARGIN)),
            (time_label(state), (LABEL_MARGIN, bottom)),
        ] {
            if let Err(err) = area.draw(&Text::new(text, pos, style.clone())) {
                warn!("skipping label: {}", err);
            }
        }
    }
    Ok(())
}

/// Renders `state` into a fresh square frame of `window_size` pixels.
pub fn render_frame(
    state: &EpisodeState,
    size: f64,
    window_size: u32,
    labels: bool,
) -> Result<Frame, RenderError> {
    let side = window_size as usize;
    let mut buffer = vec![0u8; side * side * 3];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (window_size, window_size)).into_drawing_area();
        draw_scene(&root, state, size, labels)?;
        root.present().map_err(drawing_error)?;
    }
    Ok(Array3::from_shape_vec((side, side, 3), buffer)?)
}

/// Writes the labelled scene to an image file.
pub fn save_frame(
    path: &Path,
    state: &EpisodeState,
    size: f64,
    window_size: u32,
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, (window_size, window_size)).into_drawing_area();
    draw_scene(&root, state, size, true)?;
    root.present().map_err(drawing_error)?;
    Ok(())
}
