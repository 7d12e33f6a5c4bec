use image::{Rgba, RgbaImage};

/// Map every pure-white pixel to fully transparent.
///
/// The match is exact: color channels (255, 255, 255) with any current
/// alpha. Every other pixel passes through untouched, so partial
/// transparency elsewhere in the image is preserved. Applying the
/// transform twice yields the same result as applying it once.
pub fn white_to_transparent(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let Rgba([r, g, b, _]) = *pixel;
        if r == 255 && g == 255 && b == 255 {
            *pixel = Rgba([255, 255, 255, 0]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    #[test]
    fn test_white_becomes_transparent() {
        let img: RgbaImage = ImageBuffer::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let out = white_to_transparent(&img);
        assert!(out.pixels().all(|p| p.0 == [255, 255, 255, 0]));
    }

    #[test]
    fn test_near_white_is_untouched() {
        let img: RgbaImage = ImageBuffer::from_pixel(4, 4, Rgba([254, 255, 255, 255]));
        let out = white_to_transparent(&img);
        assert!(out.pixels().all(|p| p.0 == [254, 255, 255, 255]));
    }

    #[test]
    fn test_white_with_partial_alpha_still_matches() {
        let img: RgbaImage = ImageBuffer::from_pixel(2, 2, Rgba([255, 255, 255, 128]));
        let out = white_to_transparent(&img);
        assert!(out.pixels().all(|p| p.0 == [255, 255, 255, 0]));
    }

    #[test]
    fn test_existing_partial_alpha_is_preserved() {
        let img: RgbaImage = ImageBuffer::from_pixel(2, 2, Rgba([100, 150, 200, 77]));
        let out = white_to_transparent(&img);
        assert!(out.pixels().all(|p| p.0 == [100, 150, 200, 77]));
    }

    #[test]
    fn test_idempotent() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([255, 255, 255, 40]));
        img.put_pixel(1, 1, Rgba([255, 0, 255, 0]));

        let once = white_to_transparent(&img);
        let twice = white_to_transparent(&once);
        assert_eq!(once.as_raw(), twice.as_raw());
    }
}
