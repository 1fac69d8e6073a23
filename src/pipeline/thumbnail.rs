//! Thumbnail rendering: page 0 fitted onto a fixed-size white canvas.
//!
//! The returned surface is always exactly the requested size. The page is
//! scaled uniformly to fit the box, centered on the shorter axis, and
//! composed over opaque white — so border pixels the page does not cover are
//! white, not transparent. PNG keeps rendered text edges lossless; the bytes
//! are base64-wrapped for embedding in a record.

use super::loader::DocumentHandle;
use crate::error::DecomposeError;
use crate::output::Screenshot;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use pdfium_render::prelude::*;
use std::io::Cursor;
use tracing::debug;

const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Uniform scale plus the centering offset that places the scaled page
/// inside the target box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FitGeometry {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Fit a `page_w × page_h` page into a `target_w × target_h` box.
///
/// A page wider than tall fills the box width and centers vertically; any
/// other page (square included — the comparison is strict) fills the box
/// height and centers horizontally.
pub(crate) fn fit_page(page_w: f32, page_h: f32, target_w: u32, target_h: u32) -> FitGeometry {
    if page_w > page_h {
        let scale = target_w as f32 / page_w;
        FitGeometry {
            scale,
            offset_x: 0.0,
            offset_y: (target_h as f32 - page_h * scale) / 2.0,
        }
    } else {
        let scale = target_h as f32 / page_h;
        FitGeometry {
            scale,
            offset_x: (target_w as f32 - page_w * scale) / 2.0,
            offset_y: 0.0,
        }
    }
}

/// Rasterize page 0 into a `width × height` PNG, base64-encoded.
pub(crate) fn render_thumbnail(
    handle: &DocumentHandle,
    width: u32,
    height: u32,
) -> Result<Screenshot, DecomposeError> {
    let page = handle
        .document()
        .pages()
        .get(0)
        .map_err(|e| DecomposeError::Internal(format!("thumbnail: no page 0: {e:?}")))?;

    let page_w = page.width().value;
    let page_h = page.height().value;
    let geometry = fit_page(page_w, page_h, width, height);

    let scaled_w = ((page_w * geometry.scale).round() as i32).max(1);
    let scaled_h = ((page_h * geometry.scale).round() as i32).max(1);
    let render_config = PdfRenderConfig::new()
        .set_target_width(scaled_w)
        .set_target_height(scaled_h);

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| DecomposeError::Internal(format!("thumbnail: rasterization: {e:?}")))?;
    let page_image = bitmap.as_image().into_rgba8();

    debug!(
        "thumbnail: page {page_w}x{page_h}pt → {scaled_w}x{scaled_h}px at offset ({}, {}) in {width}x{height}",
        geometry.offset_x, geometry.offset_y
    );

    let mut canvas = RgbaImage::from_pixel(width, height, OPAQUE_WHITE);
    imageops::overlay(
        &mut canvas,
        &page_image,
        geometry.offset_x.round() as i64,
        geometry.offset_y.round() as i64,
    );

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| DecomposeError::Internal(format!("thumbnail: png encode: {e}")))?;

    Ok(Screenshot::png_base64(STANDARD.encode(&png)))
}
