//! Frame capture and GIF export for Monte Carlo search animation
//!
//! Replays a finished search as an animation: each frame shows the scatter of
//! candidate scores evaluated so far, in draw order, so the best-candidate
//! structure emerges as the search progresses.

use crate::io::configuration::{ANIMATION_FINAL_HOLD, ANIMATION_MAX_FRAMES, AXIS_HEADROOM};
use crate::io::error::{EstimationError, Result, computation_error};
use image::{Delay, Frame, Rgba, RgbaImage};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Captures candidate evaluations for animation export
pub struct SearchFrameCapture {
    points: Vec<(f64, f64)>,
    x_range: (f64, f64),
    dimensions: (u32, u32),
    y_label: &'static str,
}

impl SearchFrameCapture {
    /// Create a capture for a search over `x_range`
    ///
    /// `y_label` names the score axis; scores are recorded already mapped to
    /// their display scale.
    pub const fn new(x_range: (f64, f64), dimensions: (u32, u32), y_label: &'static str) -> Self {
        Self {
            points: Vec::new(),
            x_range,
            dimensions,
            y_label,
        }
    }

    /// Record one evaluated candidate and its display score
    pub fn record(&mut self, mean: f64, display_score: f64) {
        self.points.push((mean, display_score));
    }

    /// Number of candidates recorded
    pub const fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Export the capture as an animated GIF
    ///
    /// Candidates are strided so the animation stays within a bounded frame
    /// count, and the final frame is held longer for visibility.
    ///
    /// # Errors
    ///
    /// Returns an error if no candidates were recorded, frame rendering
    /// fails, or the GIF cannot be written.
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.points.is_empty() {
            return Err(computation_error(
                "search animation",
                &"no candidates captured",
            ));
        }

        let y_top = self
            .points
            .iter()
            .map(|&(_, score)| score)
            .fold(f64::MIN, f64::max)
            .max(1e-9)
            * AXIS_HEADROOM;

        let stride = self.points.len().div_ceil(ANIMATION_MAX_FRAMES).max(1);

        let mut frames = Vec::new();
        let mut end = 0;
        while end < self.points.len() {
            end = (end + stride).min(self.points.len());
            let prefix = self.points.get(..end).unwrap_or_default();
            frames.push(self.render_frame(prefix, y_top, frame_delay_ms)?);
        }

        // Final frame displays longer for better visibility
        if let Some(last) = frames.last().map(|frame| frame.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                Delay::from_numer_denom_ms(frame_delay_ms * ANIMATION_FINAL_HOLD, 1),
            ));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| EstimationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
        let file = std::fs::File::create(output_path).map_err(|e| EstimationError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| EstimationError::AnimationExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn render_frame(&self, points: &[(f64, f64)], y_top: f64, delay_ms: u32) -> Result<Frame> {
        let (width, height) = self.dimensions;
        let mut buffer = vec![0u8; (width * height * 3) as usize];

        self.draw_scatter(&mut buffer, points, y_top)
            .map_err(|e| computation_error("animation frame rendering", &e))?;

        let mut img = RgbaImage::new(width, height);
        for (pixel, chunk) in img.pixels_mut().zip(buffer.chunks_exact(3)) {
            if let [r, g, b] = *chunk {
                *pixel = Rgba([r, g, b, 255]);
            }
        }

        Ok(Frame::from_parts(
            img,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }

    fn draw_scatter(
        &self,
        buffer: &mut [u8],
        points: &[(f64, f64)],
        y_top: f64,
    ) -> std::result::Result<(), Box<dyn Error>> {
        let root = BitMapBackend::with_buffer(buffer, self.dimensions).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(self.x_range.0..self.x_range.1, 0.0..y_top)?;
        chart
            .configure_mesh()
            .x_desc("BG (mg/dl)")
            .y_desc(self.y_label)
            .draw()?;

        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 2, BLUE.filled())),
        )?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SearchFrameCapture;

    #[test]
    fn test_empty_capture_refuses_to_export() {
        let capture = SearchFrameCapture::new((157.0, 178.0), (64, 48), "likelihood (sum)");
        let result = capture.export_gif(std::path::Path::new("unused.gif"), 50);
        assert!(result.is_err());
    }

    #[test]
    fn test_capture_records_points() {
        let mut capture = SearchFrameCapture::new((157.0, 178.0), (64, 48), "likelihood (sum)");
        capture.record(168.4, 0.41);
        capture.record(160.2, 0.12);
        assert_eq!(capture.point_count(), 2);
    }
}
