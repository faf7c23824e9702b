//! PNG preview export of generated maps

use crate::algorithm::decoration::DecorationLayer;
use crate::analysis::patterns::Category;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::grid::ResolvedGrid;
use image::{ImageBuffer, Rgba};
use std::path::Path;

// Fallback for categories outside the terrain palette
const UNKNOWN_COLOR: [u8; 4] = [255, 0, 255, 255];

/// Preview colour of a base category
pub const fn category_color(category: Category) -> [u8; 4] {
    match category.label() {
        'G' => [88, 160, 72, 255],
        'S' => [222, 200, 140, 255],
        'I' => [176, 220, 240, 255],
        _ => UNKNOWN_COLOR,
    }
}

// Decorations darken the middle of the cell
const fn shade(color: [u8; 4]) -> [u8; 4] {
    [color[0] / 2, color[1] / 2, color[2] / 2, color[3]]
}

/// Render a grid and its decorations to an RGBA buffer
///
/// Each cell becomes a `cell_size` square; decorated cells get a shaded
/// centre half the cell wide.
///
/// # Errors
///
/// Returns `InvalidParameter` if `cell_size` is zero or the image would not
/// fit in 32-bit dimensions
pub fn render_preview(
    grid: &ResolvedGrid,
    decorations: &DecorationLayer,
    cell_size: u32,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    if cell_size == 0 {
        return Err(invalid_parameter("cell_size", &cell_size, &"must be at least 1"));
    }
    let width = u32::try_from(grid.cols())
        .ok()
        .and_then(|cols| cols.checked_mul(cell_size))
        .ok_or_else(|| invalid_parameter("width", &grid.cols(), &"preview too large"))?;
    let height = u32::try_from(grid.rows())
        .ok()
        .and_then(|rows| rows.checked_mul(cell_size))
        .ok_or_else(|| invalid_parameter("height", &grid.rows(), &"preview too large"))?;

    let inset = cell_size / 4;
    let mut img = ImageBuffer::new(width, height);

    for (position, category) in grid.cells() {
        let base = category_color(category);
        let decorated = decorations.get(position).is_some();
        let origin_x = position[1] as u32 * cell_size;
        let origin_y = position[0] as u32 * cell_size;

        for dy in 0..cell_size {
            for dx in 0..cell_size {
                let centre = (inset..cell_size - inset).contains(&dx)
                    && (inset..cell_size - inset).contains(&dy);
                let color = if decorated && centre { shade(base) } else { base };
                img.put_pixel(origin_x + dx, origin_y + dy, Rgba(color));
            }
        }
    }

    Ok(img)
}

/// Export a grid preview as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The preview cannot be rendered (see [`render_preview`])
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(
    grid: &ResolvedGrid,
    decorations: &DecorationLayer,
    cell_size: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_preview(grid, decorations, cell_size)?;

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
