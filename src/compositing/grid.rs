use image::RgbaImage;

use super::error::{MergeError, Result};
use super::layout::LayoutOption;
use super::ImageAsset;

/// Paste the ordered assets into a `rows x cols` grid, row-major.
///
/// Cell dimensions come from the first asset. Cells past the end of the
/// sequence keep the canvas's transparent fill (alpha 0). Assets larger
/// than the cell are clipped to the cell rectangle so a mixed-size batch
/// never bleeds into a neighboring cell; same-size batches, the expected
/// case, are unaffected.
pub fn composite(assets: &[ImageAsset], layout: LayoutOption) -> Result<RgbaImage> {
    let first = assets.first().ok_or(MergeError::EmptySet)?;
    ensure_capacity(layout, assets.len())?;

    let (cell_w, cell_h) = first.dimensions();
    let mut canvas = RgbaImage::new(layout.cols * cell_w, layout.rows * cell_h);

    for (idx, asset) in assets.iter().enumerate() {
        let (col, row) = cell_position(idx, layout);
        paste_clipped(
            &mut canvas,
            &asset.pixels,
            col * cell_w,
            row * cell_h,
            cell_w,
            cell_h,
        );
    }

    Ok(canvas)
}

/// Overwrite every blank trailing cell with a copy of the first asset.
///
/// Cells `0..assets.len()` are left byte-identical to the input composite;
/// only the transparent cells past the end of the sequence are touched.
pub fn auto_fill(
    composite: &RgbaImage,
    assets: &[ImageAsset],
    layout: LayoutOption,
) -> Result<RgbaImage> {
    let first = assets.first().ok_or(MergeError::EmptySet)?;
    ensure_capacity(layout, assets.len())?;

    let (cell_w, cell_h) = first.dimensions();
    let mut filled = composite.clone();

    for idx in assets.len()..layout.cell_count() {
        let (col, row) = cell_position(idx, layout);
        paste_clipped(
            &mut filled,
            &first.pixels,
            col * cell_w,
            row * cell_h,
            cell_w,
            cell_h,
        );
    }

    Ok(filled)
}

fn ensure_capacity(layout: LayoutOption, count: usize) -> Result<()> {
    if !layout.holds(count) {
        return Err(MergeError::LayoutUnavailable {
            rows: layout.rows,
            cols: layout.cols,
            count,
        });
    }
    Ok(())
}

/// Row-major cell coordinates for a paste index.
fn cell_position(idx: usize, layout: LayoutOption) -> (u32, u32) {
    let idx = idx as u32;
    (idx % layout.cols, idx / layout.cols)
}

/// Copy `src` to `(dst_x, dst_y)`, writing at most `max_w` by `max_h`
/// pixels. Source pixels replace destination pixels outright; the canvas
/// under an occupied cell is always the transparent fill.
fn paste_clipped(
    canvas: &mut RgbaImage,
    src: &RgbaImage,
    dst_x: u32,
    dst_y: u32,
    max_w: u32,
    max_h: u32,
) {
    let w = src.width().min(max_w);
    let h = src.height().min(max_h);
    for y in 0..h {
        for x in 0..w {
            canvas.put_pixel(dst_x + x, dst_y + y, *src.get_pixel(x, y));
        }
    }
}
