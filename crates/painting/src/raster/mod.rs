//! Software rasterizer behind the paint-context contract
//!
//! [`RasterContext`] accumulates paths with canvas semantics, turns them into
//! anti-aliased coverage masks, and composites them onto a [`TiledSurface`].
//! Shadows are drawn first as a blurred copy of the shape's mask.

mod coverage;
mod path;

pub use coverage::{CoverageMask, fill_coverage, stroke_coverage};
pub use path::{Path, Subpath};

use std::io::Cursor;

use tracing::{debug, warn};

use crate::constants::MAX_CANVAS_SIZE;
use crate::context::{DrawState, PaintContext};
use crate::history::{SnapshotError, SnapshotTarget};
use crate::surface::CpuSurface;
use crate::tiles::{TileCoord, TiledSurface};
use crate::types::{Point, Rgba};

/// Paint context that rasterizes into an in-memory RGBA surface
pub struct RasterContext {
    tiles: TiledSurface,
    state: DrawState,
    path: Path,
}

impl RasterContext {
    /// Transparent surface; each side is clamped to 1..=MAX_CANVAS_SIZE
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width.clamp(1, MAX_CANVAS_SIZE), height.clamp(1, MAX_CANVAS_SIZE));
        if (w, h) != (width, height) {
            warn!("RasterContext: clamped {}x{} to {}x{}", width, height, w, h);
        }
        Self {
            tiles: TiledSurface::with_default_tile_size(w, h),
            state: DrawState::default(),
            path: Path::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.tiles.surface().width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.tiles.surface().height
    }

    #[inline]
    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn surface(&self) -> &CpuSurface {
        self.tiles.surface()
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.tiles.surface().get_pixel(x, y).map(Rgba::from_array)
    }

    /// The path built since the last `begin_path`
    pub fn current_path(&self) -> &Path {
        &self.path
    }

    /// Tiles changed since the last call, for hosts that upload incrementally
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        self.tiles.take_dirty_tiles()
    }

    pub fn tile_bounds(&self, coord: TileCoord) -> (u32, u32, u32, u32) {
        self.tiles.tile_bounds(coord)
    }

    /// Drain the dirty tiles together with their f32 RGBA bytes
    pub fn take_dirty_uploads(&mut self) -> Vec<(TileCoord, Vec<u8>)> {
        self.tiles
            .take_dirty_tiles()
            .into_iter()
            .map(|coord| (coord, self.tiles.tile_bytes(coord)))
            .collect()
    }

    /// Encode the surface as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, SnapshotError> {
        let (w, h) = self.size();
        let image = image::RgbaImage::from_raw(w, h, self.tiles.surface().to_rgba8())
            .ok_or_else(|| SnapshotError::Encode(format!("pixel buffer does not match {w}x{h}")))?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        debug!("encode_png: {}x{} -> {} bytes", w, h, bytes.len());
        Ok(bytes)
    }

    /// Replace the surface with a decoded PNG, adopting its size
    pub fn decode_png(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.to_rgba8();
        let (w, h) = decoded.dimensions();
        if w == 0 || h == 0 || w > MAX_CANVAS_SIZE || h > MAX_CANVAS_SIZE {
            return Err(SnapshotError::Decode(format!("unsupported snapshot size {w}x{h}")));
        }
        let surface = CpuSurface::from_rgba8(w, h, decoded.as_raw())
            .ok_or_else(|| SnapshotError::Decode(format!("pixel buffer does not match {w}x{h}")))?;
        self.tiles.replace_surface(surface);
        debug!("decode_png: restored {}x{}", w, h);
        Ok(())
    }

    /// Shadow then shape, both under the current alpha and composite mode
    fn paint_mask(&mut self, mask: CoverageMask, color: Rgba) {
        let DrawState {
            global_alpha,
            composite,
            shadow_color,
            shadow_blur,
            ..
        } = self.state;

        if shadow_color.a > 0.0 && shadow_blur > 0.0 {
            if let Some(shadow) = mask.blurred(shadow_blur, self.size()) {
                self.tiles.apply_mask(&shadow, shadow_color, global_alpha, composite);
            }
        }
        self.tiles.apply_mask(&mask, color, global_alpha, composite);
    }
}

impl PaintContext for RasterContext {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        self.path.line_to(point);
    }

    fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.path.quadratic_curve_to(control, to);
    }

    fn stroke(&mut self) {
        let size = self.size();
        if let Some(mask) = stroke_coverage(&self.path, self.state.line_width, self.state.line_cap, size) {
            self.paint_mask(mask, self.state.stroke_style);
        }
    }

    fn fill(&mut self) {
        if let Some(mask) = fill_coverage(&self.path, self.size()) {
            self.paint_mask(mask, self.state.fill_style);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let mut rect = Path::new();
        rect.move_to(Point::new(x, y));
        rect.line_to(Point::new(x + width, y));
        rect.line_to(Point::new(x + width, y + height));
        rect.line_to(Point::new(x, y + height));
        rect.close();
        if let Some(mask) = fill_coverage(&rect, self.size()) {
            self.paint_mask(mask, self.state.fill_style);
        }
    }

    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }
}

impl SnapshotTarget for RasterContext {
    fn capture(&self) -> Result<Vec<u8>, SnapshotError> {
        self.encode_png()
    }

    fn restore(&mut self, snapshot: &[u8]) -> Result<(), SnapshotError> {
        self.decode_png(snapshot)
    }

    fn dimensions(&self) -> (u32, u32) {
        self.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompositeMode, LineCap};

    fn white(w: u32, h: u32) -> RasterContext {
        let mut ctx = RasterContext::new(w, h);
        ctx.set_fill_style(Rgba::WHITE);
        ctx.fill_rect(0.0, 0.0, w as f32, h as f32);
        ctx
    }

    #[test]
    fn test_fill_rect_covers_surface() {
        let ctx = white(16, 16);
        assert_eq!(ctx.get_pixel(0, 0).unwrap().to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(ctx.get_pixel(15, 15).unwrap().to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_stroke_paints_line() {
        let mut ctx = white(64, 64);
        ctx.set_stroke_style(Rgba::BLACK);
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(Point::new(10.0, 32.0));
        ctx.line_to(Point::new(50.0, 32.0));
        ctx.stroke();

        assert_eq!(ctx.get_pixel(30, 31).unwrap().to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(ctx.get_pixel(30, 10).unwrap().to_rgba8(), [255, 255, 255, 255]);
        assert!(!ctx.take_dirty_tiles().is_empty());
    }

    #[test]
    fn test_dirty_uploads_carry_painted_texels() {
        let mut ctx = white(64, 64);
        ctx.take_dirty_tiles();
        ctx.set_fill_style(Rgba::BLACK);
        ctx.fill_rect(2.0, 2.0, 4.0, 4.0);

        let uploads = ctx.take_dirty_uploads();
        assert_eq!(uploads.len(), 1);
        let (coord, bytes) = &uploads[0];
        assert_eq!(*coord, TileCoord { x: 0, y: 0 });
        let (_, _, w, h) = ctx.tile_bounds(*coord);
        let texels = crate::tiles::texels(bytes);
        assert_eq!(texels.len(), (w * h) as usize);
        let inked = texels[3 * w as usize + 3];
        assert!(inked[0] < 0.01 && (inked[3] - 1.0).abs() < 0.01);
        assert!(texels[20 * w as usize + 20].iter().all(|c| (c - 1.0).abs() < 0.01));
        assert!(ctx.take_dirty_uploads().is_empty());
    }

    #[test]
    fn test_begin_path_discards_previous_path() {
        let mut ctx = white(64, 64);
        ctx.set_stroke_style(Rgba::BLACK);
        ctx.set_line_width(4.0);
        ctx.move_to(Point::new(0.0, 10.0));
        ctx.line_to(Point::new(60.0, 10.0));
        ctx.begin_path();
        ctx.move_to(Point::new(0.0, 50.0));
        ctx.line_to(Point::new(60.0, 50.0));
        ctx.stroke();
        assert_eq!(ctx.get_pixel(30, 10).unwrap().to_rgba8(), [255, 255, 255, 255]);
        assert!(ctx.get_pixel(30, 49).unwrap().r < 0.5);
        assert!(ctx.get_pixel(30, 50).unwrap().r < 0.5);
    }

    #[test]
    fn test_hairline_straddles_two_rows() {
        // A 1px line on a pixel boundary lands half on each neighbouring row
        let mut ctx = white(64, 64);
        ctx.set_stroke_style(Rgba::BLACK);
        ctx.begin_path();
        ctx.move_to(Point::new(0.0, 50.0));
        ctx.line_to(Point::new(60.0, 50.0));
        ctx.stroke();
        for y in [49, 50] {
            assert!((ctx.get_pixel(30, y).unwrap().r - 0.5).abs() < 0.01);
        }
        assert_eq!(ctx.get_pixel(30, 48).unwrap().to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_stroked_curve_follows_control_point() {
        let mut ctx = white(64, 64);
        ctx.set_stroke_style(Rgba::BLACK);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(Point::new(4.0, 60.0));
        ctx.quadratic_curve_to(Point::new(32.0, 4.0), Point::new(60.0, 60.0));
        ctx.stroke();
        // The apex of the curve sits at y = 32
        assert!(ctx.get_pixel(32, 31).unwrap().r < 0.2);
        assert_eq!(ctx.get_pixel(32, 60).unwrap().to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_global_alpha_and_darken() {
        let mut ctx = white(32, 32);
        ctx.set_fill_style(Rgba::new(1.0, 0.0, 0.0, 1.0));
        ctx.set_composite(CompositeMode::Darken);
        ctx.set_global_alpha(0.5);
        ctx.fill_rect(0.0, 0.0, 32.0, 32.0);

        // Darken against white keeps red, halves green and blue
        let px = ctx.get_pixel(16, 16).unwrap();
        assert!((px.r - 1.0).abs() < 0.01);
        assert!((px.g - 0.5).abs() < 0.01);
        assert!((px.b - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_shadow_spreads_beyond_shape() {
        let mut ctx = white(64, 64);
        ctx.set_stroke_style(Rgba::BLACK);
        ctx.set_line_width(2.0);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_shadow_color(Rgba::BLACK);
        ctx.set_shadow_blur(8.0);
        ctx.begin_path();
        ctx.move_to(Point::new(20.0, 32.0));
        ctx.line_to(Point::new(44.0, 32.0));
        ctx.stroke();

        let halo = ctx.get_pixel(32, 35).unwrap();
        assert!(halo.r < 1.0);
        assert!(halo.r > 0.0);
    }

    #[test]
    fn test_png_snapshot_round_trip() {
        let mut ctx = white(24, 12);
        ctx.set_fill_style(Rgba::BLACK);
        ctx.fill_rect(0.0, 0.0, 12.0, 12.0);
        let png = ctx.capture().unwrap();

        let mut other = RasterContext::new(5, 5);
        other.restore(&png).unwrap();
        assert_eq!(other.dimensions(), (24, 12));
        assert_eq!(other.get_pixel(3, 3).unwrap().to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(other.get_pixel(20, 3).unwrap().to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let mut ctx = RasterContext::new(4, 4);
        assert!(ctx.restore(b"not a png").is_err());
        assert_eq!(ctx.dimensions(), (4, 4));
    }
}
