//! Collecting the keypoint clicks for one crop.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use log::debug;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::config::{DISPLAY_SIZE, KEYPOINT_COUNT, KEYPOINT_NAMES, WINDOW_TARGET_FPS};
use crate::error::{AnnotatorError, Result};

/// Marker colours for top, left and right
const MARKER_COLORS: [Rgb<u8>; KEYPOINT_COUNT] = [Rgb([255, 0, 0]), Rgb([0, 255, 0]), Rgb([0, 0, 255])];
const MARKER_RADIUS: i32 = 3;

/// What the annotator did with a crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptOutcome {
    /// Clicks in display coordinates, in top, left, right order
    Points([(f32, f32); KEYPOINT_COUNT]),
    /// The window was closed or Escape was pressed
    Cancelled,
}

/// Source of keypoint clicks for a displayed crop.
pub trait PointPrompt {
    /// Show `crop` and block until all keypoints are clicked or the prompt is cancelled.
    fn collect_points(&mut self, crop: &RgbImage, caption: &str) -> Result<PromptOutcome>;
}

impl<P: PointPrompt + ?Sized> PointPrompt for &mut P {
    fn collect_points(&mut self, crop: &RgbImage, caption: &str) -> Result<PromptOutcome> {
        (**self).collect_points(crop, caption)
    }
}

/// Click state for one crop: records clicks in order and marks each on the canvas.
pub struct ClickCollector {
    canvas: RgbImage,
    clicks: Vec<(f32, f32)>,
}

impl ClickCollector {
    pub fn new(crop: &RgbImage) -> Self {
        Self {
            canvas: crop.clone(),
            clicks: Vec::with_capacity(KEYPOINT_COUNT),
        }
    }

    /// Register a click; returns true once every keypoint has been collected
    pub fn on_click(&mut self, pos: (f32, f32)) -> bool {
        if self.is_complete() {
            return true;
        }
        let index = self.clicks.len();
        draw_filled_circle_mut(
            &mut self.canvas,
            (pos.0.round() as i32, pos.1.round() as i32),
            MARKER_RADIUS,
            MARKER_COLORS[index],
        );
        debug!("Clicked {} point at ({:.1}, {:.1})", KEYPOINT_NAMES[index], pos.0, pos.1);
        self.clicks.push(pos);
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.clicks.len() == KEYPOINT_COUNT
    }

    /// Name of the keypoint the next click will be assigned to
    pub fn next_name(&self) -> Option<&'static str> {
        KEYPOINT_NAMES.get(self.clicks.len()).copied()
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    pub fn points(&self) -> Option<[(f32, f32); KEYPOINT_COUNT]> {
        self.clicks.as_slice().try_into().ok()
    }
}

/// Pack an RGB image into the 0RGB words a minifb window expects
pub fn to_frame_buffer(image: &RgbImage) -> Vec<u32> {
    image
        .pixels()
        .map(|Rgb([r, g, b])| ((*r as u32) << 16) | ((*g as u32) << 8) | (*b as u32))
        .collect()
}

/// Interactive prompt backed by a desktop window.
///
/// The window is opened on first use and reused for every crop of the run.
pub struct WindowPrompt {
    title: String,
    window: Option<Window>,
}

impl WindowPrompt {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            window: None,
        }
    }

    fn window(&mut self) -> Result<&mut Window> {
        if self.window.is_none() {
            let size = DISPLAY_SIZE as usize;
            let mut window = Window::new(&self.title, size, size, WindowOptions::default())?;
            window.set_target_fps(WINDOW_TARGET_FPS);
            self.window = Some(window);
        }
        self.window
            .as_mut()
            .ok_or_else(|| AnnotatorError::Window("window was not created".to_string()))
    }
}

impl PointPrompt for WindowPrompt {
    fn collect_points(&mut self, crop: &RgbImage, caption: &str) -> Result<PromptOutcome> {
        let title = self.title.clone();
        let window = self.window()?;
        let size = DISPLAY_SIZE as usize;
        let mut collector = ClickCollector::new(crop);

        // A press still held from the previous crop must not count
        let mut was_down = window.get_mouse_down(MouseButton::Left);
        let mut prompted = None;

        while !collector.is_complete() {
            if !window.is_open() || window.is_key_down(Key::Escape) {
                return Ok(PromptOutcome::Cancelled);
            }
            let next = collector.next_name();
            if next != prompted {
                if let Some(name) = next {
                    window.set_title(&format!("{} - {} - click {} point", title, caption, name));
                }
                prompted = next;
            }

            let down = window.get_mouse_down(MouseButton::Left);
            if down && !was_down {
                if let Some(pos) = window.get_mouse_pos(MouseMode::Discard) {
                    collector.on_click(pos);
                }
            }
            was_down = down;

            window.update_with_buffer(&to_frame_buffer(collector.canvas()), size, size)?;
        }

        match collector.points() {
            Some(points) => Ok(PromptOutcome::Points(points)),
            None => Ok(PromptOutcome::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_collector_orders_and_marks_points() {
        let crop = RgbImage::new(DISPLAY_SIZE, DISPLAY_SIZE);
        let mut collector = ClickCollector::new(&crop);
        assert_eq!(collector.next_name(), Some("top"));

        assert!(!collector.on_click((128.0, 20.0)));
        assert_eq!(collector.next_name(), Some("left"));
        assert_eq!(*collector.canvas().get_pixel(128, 20), MARKER_COLORS[0]);

        assert!(!collector.on_click((20.0, 200.0)));
        assert!(collector.on_click((230.0, 200.0)));
        assert_eq!(collector.next_name(), None);
        assert_eq!(*collector.canvas().get_pixel(230, 200), MARKER_COLORS[2]);

        // Extra clicks after completion are ignored
        assert!(collector.on_click((1.0, 1.0)));
        assert_eq!(
            collector.points(),
            Some([(128.0, 20.0), (20.0, 200.0), (230.0, 200.0)])
        );
    }

    #[test]
    fn test_to_frame_buffer() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(1, 0, Rgb([0x12, 0x34, 0x56]));
        assert_eq!(to_frame_buffer(&image), vec![0, 0x0012_3456]);
    }
}
