//! Straight-alpha f32 pixel storage behind the raster backend

use crate::types::CompositeMode;

/// Bytes per f32 RGBA pixel
pub const PIXEL_BYTES: usize = 4 * std::mem::size_of::<f32>();

/// Row-major `[r, g, b, a]` pixels, channels in 0..=1, alpha not premultiplied
pub struct CpuSurface {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[f32; 4]>,
}

impl CpuSurface {
    /// Fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; area(width, height)],
        }
    }

    /// Widen 8-bit RGBA (as decoded from a PNG snapshot)
    ///
    /// None when the byte count does not match `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != area(width, height) * 4 {
            return None;
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]].map(|c| c as f32 / 255.0))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Overwrite every pixel
    pub fn fill(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Out-of-bounds writes are dropped
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [f32; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Blend `color` at `opacity` onto one pixel
    ///
    /// Straight-alpha Porter-Duff source-over with a separable blend term:
    /// `co = cs·αs·(1-αb) + cb·αb·(1-αs) + αs·αb·B(cb, cs)` where `B` is the
    /// source colour for `SourceOver` and the per-channel minimum for `Darken`.
    #[inline]
    pub fn composite_pixel(
        &mut self,
        x: u32,
        y: u32,
        color: [f32; 4],
        opacity: f32,
        mode: CompositeMode,
    ) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let src_alpha = (color[3] * opacity).clamp(0.0, 1.0);
        if src_alpha <= 0.0 {
            return;
        }

        let dst = self.pixels[i];
        let dst_alpha = dst[3];
        let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
        if out_alpha <= 0.0 {
            self.pixels[i] = [0.0; 4];
            return;
        }

        let mut out = [0.0, 0.0, 0.0, out_alpha];
        for c in 0..3 {
            let (cs, cb) = (color[c], dst[c]);
            let blended = match mode {
                CompositeMode::SourceOver => cs,
                CompositeMode::Darken => cs.min(cb),
            };
            let premul = cs * src_alpha * (1.0 - dst_alpha)
                + cb * dst_alpha * (1.0 - src_alpha)
                + src_alpha * dst_alpha * blended;
            out[c] = (premul / out_alpha).clamp(0.0, 1.0);
        }
        self.pixels[i] = out;
    }

    /// The f32 buffer viewed as bytes, ready for an Rgba32Float texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Quantize to 8-bit RGBA for PNG encoding
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
