//! Compositing coverage masks onto the tiled surface

use tracing::debug;

use super::TiledSurface;
use crate::raster::CoverageMask;
use crate::types::{CompositeMode, Rgba};

impl TiledSurface {
    /// Composite `color` through a coverage mask
    ///
    /// Each covered pixel receives `color` at `opacity * coverage` under the
    /// given mode. Returns the mask's bounding box (x, y, width, height), or
    /// None if nothing was painted.
    pub fn apply_mask(
        &mut self,
        mask: &CoverageMask,
        color: Rgba,
        opacity: f32,
        mode: CompositeMode,
    ) -> Option<(u32, u32, u32, u32)> {
        if opacity <= 0.0 || color.a <= 0.0 {
            debug!("apply_mask: skipped, nothing visible (opacity={:.3}, alpha={:.3})", opacity, color.a);
            return None;
        }

        let rgba = color.to_array();
        let mut painted = 0usize;
        for (px, py, coverage) in mask.covered() {
            self.surface.composite_pixel(px, py, rgba, opacity * coverage, mode);
            painted += 1;
        }
        if painted == 0 {
            return None;
        }

        self.mark_dirty(mask.x, mask.y, mask.width, mask.height);
        debug!(
            "apply_mask: {} px in ({}, {}) {}x{}, mode={:?}",
            painted, mask.x, mask.y, mask.width, mask.height, mode
        );
        Some((mask.x, mask.y, mask.width, mask.height))
    }
}
