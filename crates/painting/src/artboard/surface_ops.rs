//! Whole-surface operations for the artboard

use tracing::{debug, warn};

use crate::context::PaintContext;
use crate::history::SnapshotTarget;
use crate::types::CompositeMode;

use super::Artboard;

impl<C: PaintContext + SnapshotTarget> Artboard<C> {
    /// Paint the background over everything and record a snapshot
    ///
    /// Refused while drawing.
    pub fn clear(&mut self) -> bool {
        if self.drawing {
            debug!("clear: refused while drawing");
            return false;
        }
        let Some(ctx) = self.context.as_mut() else {
            return false;
        };

        let (width, height) = ctx.dimensions();
        let (alpha, composite) = (ctx.global_alpha(), ctx.composite());
        ctx.set_global_alpha(1.0);
        ctx.set_composite(CompositeMode::SourceOver);
        ctx.set_fill_style(self.background);
        ctx.fill_rect(0.0, 0.0, width as f32, height as f32);
        ctx.set_global_alpha(alpha);
        ctx.set_composite(composite);
        debug!("clear: {}x{}", width, height);

        self.record_snapshot();
        true
    }

    /// Encode the surface with the context's snapshot codec (PNG for the
    /// raster context)
    pub fn export_image(&self) -> Option<Vec<u8>> {
        let ctx = self.context.as_ref()?;
        match ctx.capture() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("export_image: {}", e);
                None
            }
        }
    }

    /// Surface size, if mounted
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.context.as_ref().map(|ctx| ctx.dimensions())
    }
}
