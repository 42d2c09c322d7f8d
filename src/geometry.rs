//! Crop geometry and the mapping of display clicks back to image coordinates.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::config::{CROP_MARGIN_PX, DISPLAY_SIZE};
use crate::types::{BoundingBox, Keypoint};

/// Pixel rectangle inside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A crop resized to the display size, remembering where it came from.
#[derive(Debug, Clone)]
pub struct Crop {
    pub image: RgbImage,
    pub region: CropRegion,
}

/// Expand a box by the crop margin and clip it to the image.
///
/// Returns `None` when nothing of the box lies inside the image.
pub fn crop_region(bbox: &BoundingBox, image_width: u32, image_height: u32) -> Option<CropRegion> {
    let (x_min, y_min, x_max, y_max) = bbox.to_pixels(image_width, image_height);
    let margin = CROP_MARGIN_PX as f64;
    let (iw, ih) = (image_width as f64, image_height as f64);

    let x0 = (x_min - margin).floor().clamp(0.0, iw) as u32;
    let y0 = (y_min - margin).floor().clamp(0.0, ih) as u32;
    let x1 = (x_max + margin).ceil().clamp(0.0, iw) as u32;
    let y1 = (y_max + margin).ceil().clamp(0.0, ih) as u32;

    let width = x1.saturating_sub(x0);
    let height = y1.saturating_sub(y0);
    if width == 0 || height == 0 {
        return None;
    }

    Some(CropRegion {
        x: x0,
        y: y0,
        width,
        height,
    })
}

/// Cut a region out of the image and resize it to `DISPLAY_SIZE` x `DISPLAY_SIZE`
pub fn extract_crop(image: &RgbImage, region: CropRegion) -> Crop {
    let sub = imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image();
    let resized = imageops::resize(&sub, DISPLAY_SIZE, DISPLAY_SIZE, FilterType::Triangle);
    Crop {
        image: resized,
        region,
    }
}

/// Map a click on the displayed crop back to normalized image coordinates
pub fn map_to_image(
    click: (f32, f32),
    region: CropRegion,
    image_width: u32,
    image_height: u32,
) -> Keypoint {
    let scale_x = region.width as f64 / DISPLAY_SIZE as f64;
    let scale_y = region.height as f64 / DISPLAY_SIZE as f64;

    let x = region.x as f64 + click.0 as f64 * scale_x;
    let y = region.y as f64 + click.1 as f64 * scale_y;

    Keypoint::new(x / image_width as f64, y / image_height as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_region_adds_margin() {
        // 64x32 box centred at (128, 64) in a 256x128 image
        let bbox = BoundingBox::new(0, 0.5, 0.5, 0.25, 0.25);
        let region = crop_region(&bbox, 256, 128).unwrap();
        assert_eq!(
            region,
            CropRegion {
                x: 81,
                y: 33,
                width: 94,
                height: 62
            }
        );
    }

    #[test]
    fn test_crop_region_clips_to_image() {
        let bbox = BoundingBox::new(0, 0.0625, 0.875, 0.125, 0.25);
        let region = crop_region(&bbox, 128, 128).unwrap();
        assert_eq!(region.x, 0);
        assert_eq!(region.y, 81);
        assert_eq!(region.x + region.width, 31);
        assert_eq!(region.y + region.height, 128);
    }

    #[test]
    fn test_crop_region_outside_image() {
        let bbox = BoundingBox::new(0, 2.0, 2.0, 0.1, 0.1);
        assert!(crop_region(&bbox, 100, 100).is_none());
    }

    #[test]
    fn test_extract_crop_has_display_size() {
        let image = RgbImage::new(120, 80);
        let crop = extract_crop(
            &image,
            CropRegion {
                x: 10,
                y: 10,
                width: 30,
                height: 50,
            },
        );
        assert_eq!(crop.image.dimensions(), (DISPLAY_SIZE, DISPLAY_SIZE));
    }

    #[test]
    fn test_map_corners() {
        let region = CropRegion {
            x: 20,
            y: 10,
            width: 64,
            height: 32,
        };
        let origin = map_to_image((0.0, 0.0), region, 200, 100);
        assert!((origin.x - 0.1).abs() < 1e-9);
        assert!((origin.y - 0.1).abs() < 1e-9);

        let far = map_to_image((256.0, 256.0), region, 200, 100);
        assert!((far.x - 0.42).abs() < 1e-9);
        assert!((far.y - 0.42).abs() < 1e-9);
    }
}
