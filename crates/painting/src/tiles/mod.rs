//! Dirty-tile bookkeeping over the raster surface
//!
//! Every mask that lands on the surface marks the tiles it touched, so a host
//! mirroring the artboard only re-uploads those regions.

mod mask_application;

use std::collections::HashSet;

use tracing::debug;

use crate::constants::DEFAULT_TILE_SIZE;
use crate::surface::{CpuSurface, PIXEL_BYTES};

/// Column and row of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

/// Pixels plus the set of square tiles changed since the host last drained it
pub struct TiledSurface {
    pub(crate) surface: CpuSurface,
    pub(crate) tile_size: u32,
    /// Tiles across and down; edge tiles may be partial
    grid: (u32, u32),
    dirty: HashSet<TileCoord>,
}

impl TiledSurface {
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self::from_surface(CpuSurface::new(width, height), tile_size)
    }

    pub fn from_surface(surface: CpuSurface, tile_size: u32) -> Self {
        let tile_size = tile_size.max(1);
        Self {
            grid: (surface.width.div_ceil(tile_size), surface.height.div_ceil(tile_size)),
            surface,
            tile_size,
            dirty: HashSet::new(),
        }
    }

    /// Tiled with [`DEFAULT_TILE_SIZE`]
    pub fn with_default_tile_size(width: u32, height: u32) -> Self {
        Self::new(width, height, DEFAULT_TILE_SIZE)
    }

    /// Swap in a whole new surface (a restored snapshot, possibly resized);
    /// every tile becomes dirty
    pub fn replace_surface(&mut self, surface: CpuSurface) {
        *self = Self::from_surface(surface, self.tile_size);
        self.mark_all_dirty();
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// (columns, rows)
    #[inline]
    pub fn grid(&self) -> (u32, u32) {
        self.grid
    }

    #[inline]
    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }

    /// Writes made here are not tracked; mark the region dirty yourself
    #[inline]
    pub fn surface_mut(&mut self) -> &mut CpuSurface {
        &mut self.surface
    }

    /// Flag every tile overlapping the pixel rectangle; the part outside the
    /// surface is ignored
    pub fn mark_dirty(&mut self, x: u32, y: u32, width: u32, height: u32) {
        if width == 0 || height == 0 || x >= self.surface.width || y >= self.surface.height {
            return;
        }
        let last_x = x.saturating_add(width).min(self.surface.width) - 1;
        let last_y = y.saturating_add(height).min(self.surface.height) - 1;
        let size = self.tile_size;

        let before = self.dirty.len();
        self.dirty.extend(
            (y / size..=last_y / size)
                .flat_map(|ty| (x / size..=last_x / size).map(move |tx| TileCoord { x: tx, y: ty })),
        );
        debug!(
            "mark_dirty: {}x{} at ({}, {}), {} tiles newly dirty",
            width,
            height,
            x,
            y,
            self.dirty.len() - before
        );
    }

    pub fn mark_all_dirty(&mut self) {
        let (columns, rows) = self.grid;
        self.dirty
            .extend((0..rows).flat_map(|ty| (0..columns).map(move |tx| TileCoord { x: tx, y: ty })));
    }

    /// Drain the dirty set, row by row
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        let mut tiles: Vec<TileCoord> = self.dirty.drain().collect();
        tiles.sort_by_key(|t| (t.y, t.x));
        tiles
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.dirty.is_empty()
    }

    #[inline]
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Pixel rectangle (x, y, width, height) covered by a tile
    pub fn tile_bounds(&self, coord: TileCoord) -> (u32, u32, u32, u32) {
        let x = coord.x * self.tile_size;
        let y = coord.y * self.tile_size;
        (
            x,
            y,
            self.tile_size.min(self.surface.width.saturating_sub(x)),
            self.tile_size.min(self.surface.height.saturating_sub(y)),
        )
    }

    /// One tile's f32 RGBA texels, row by row, for a partial texture upload
    ///
    /// Empty for a tile outside the grid.
    pub fn tile_bytes(&self, coord: TileCoord) -> Vec<u8> {
        let (x, y, width, height) = self.tile_bounds(coord);
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let bytes = self.surface.as_bytes();
        let stride = self.surface.width as usize * PIXEL_BYTES;
        let row_len = width as usize * PIXEL_BYTES;

        let mut out = Vec::with_capacity(row_len * height as usize);
        for row in y..y + height {
            let start = row as usize * stride + x as usize * PIXEL_BYTES;
            out.extend_from_slice(&bytes[start..start + row_len]);
        }
        out
    }
}

/// Decode bytes from [`TiledSurface::tile_bytes`] back into pixels
#[cfg(test)]
pub(crate) fn texels(bytes: &[u8]) -> Vec<[f32; 4]> {
    bytes
        .chunks_exact(PIXEL_BYTES)
        .map(|px| {
            let mut texel = [0.0; 4];
            for (channel, raw) in texel.iter_mut().zip(px.chunks_exact(4)) {
                *channel = f32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]);
            }
            texel
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_tiles_are_clipped() {
        let surface = TiledSurface::new(300, 200, 128);
        assert_eq!(surface.grid(), (3, 2));
        assert_eq!(surface.tile_bounds(TileCoord { x: 0, y: 0 }), (0, 0, 128, 128));
        assert_eq!(surface.tile_bounds(TileCoord { x: 2, y: 1 }), (256, 128, 44, 72));
    }

    #[test]
    fn test_default_tile_size() {
        let surface = TiledSurface::with_default_tile_size(800, 600);
        assert_eq!(surface.tile_size(), DEFAULT_TILE_SIZE);
        assert_eq!(surface.grid(), (7, 5));
    }

    #[test]
    fn test_region_across_tile_corner() {
        let mut surface = TiledSurface::new(256, 256, 128);
        surface.mark_dirty(100, 100, 56, 56);
        assert_eq!(surface.dirty_count(), 4);

        let tiles = surface.take_dirty_tiles();
        assert_eq!(tiles[0], TileCoord { x: 0, y: 0 });
        assert_eq!(tiles[3], TileCoord { x: 1, y: 1 });
        assert!(surface.is_clean());
    }

    #[test]
    fn test_region_outside_is_ignored() {
        let mut surface = TiledSurface::new(64, 64, 32);
        surface.mark_dirty(70, 0, 10, 10);
        surface.mark_dirty(0, 0, 0, 10);
        assert!(surface.is_clean());
    }

    #[test]
    fn test_tile_bytes_reads_one_tile() {
        let mut surface = TiledSurface::new(10, 6, 4);
        surface.surface_mut().set_pixel(9, 5, [0.25, 0.5, 0.75, 1.0]);

        // Bottom-right tile is clipped to 2x2
        let bytes = surface.tile_bytes(TileCoord { x: 2, y: 1 });
        assert_eq!(bytes.len(), 2 * 2 * PIXEL_BYTES);
        let texels = texels(&bytes);
        assert_eq!(texels[3], [0.25, 0.5, 0.75, 1.0]);
        assert_eq!(texels[0], [0.0; 4]);

        assert_eq!(surface.tile_bytes(TileCoord { x: 0, y: 0 }).len(), 4 * 4 * PIXEL_BYTES);
        assert!(surface.tile_bytes(TileCoord { x: 3, y: 0 }).is_empty());
    }

    #[test]
    fn test_replace_surface_resizes_and_dirties() {
        let mut surface = TiledSurface::new(64, 64, 32);
        surface.replace_surface(CpuSurface::new(100, 40));
        assert_eq!(surface.surface().width, 100);
        assert_eq!(surface.grid(), (4, 2));
        assert_eq!(surface.dirty_count(), 8);
    }
}
