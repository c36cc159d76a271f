use std::path::Path;

use ndarray::Array1;
use plotters::prelude::*;

#[inline(always)]
pub fn l2_norm(vector: &Array1<f64>) -> f64 {
    vector.dot(vector).sqrt()
}

#[inline(always)]
pub fn l1_distance(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    (a - b).mapv(f64::abs).sum()
}

/// Rounds to `decimals` places, ties going to the even neighbour.
#[inline(always)]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

pub fn moving_average(window: usize, vector: &[f64]) -> Vec<f64> {
    let window = window.max(1);
    vector
        .chunks(window)
        .map(|slice| slice.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Draws one line per series into a PNG at `path`.
pub fn plot_moving_average(
    path: &Path,
    values: &[Vec<f64>],
    colors: &[RGBColor],
    legends: &[&str],
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = values.iter().map(|v| v.len()).max().unwrap_or(1).max(1);
    let (y_min, y_max) = values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let (y_min, y_max) = if y_min.is_finite() && y_max > y_min {
        (y_min, y_max)
    } else {
        (-1.0, 1.0)
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..x_max, y_min..y_max)?;
    chart.configure_mesh().draw()?;

    for ((series, color), legend) in values.iter().zip(colors).zip(legends) {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                series.iter().enumerate().map(|(i, v)| (i, *v)),
                &color,
            ))?
            .label(*legend)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn norms() {
        let a = arr1(&[1.0, 2.0]);
        let b = arr1(&[4.0, -2.0]);
        assert_eq!(l1_distance(&a, &b), 7.0);
        assert_eq!(l2_norm(&(&a - &b)), 5.0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(4.8999999, 2), 4.9);
        assert_eq!(round_to(69.5, 0), 70.0);
        assert_eq!(round_to(68.5, 0), 68.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(-4.0, 0), -4.0);
    }

    #[test]
    fn moving_average_over_chunks() {
        let values = [1.0, 3.0, 2.0, 2.0, 5.0];
        assert_eq!(moving_average(2, &values), vec![2.0, 2.0, 2.5]);
        assert_eq!(moving_average(0, &values), values.to_vec());
    }
}
