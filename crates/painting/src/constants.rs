/// Default tile size for dirty tracking on the raster surface.
pub const DEFAULT_TILE_SIZE: u32 = 128;

/// Largest canvas side accepted by the raster context. Not a magic number - may change.
pub const MAX_CANVAS_SIZE: u32 = 8192;

/// Horizontal gap between bristles and the divisor for bristle count.
pub const BRISTLE_SPACING: f32 = 3.0;

/// Bristle thickness range (uniform).
pub const BRISTLE_THICKNESS_MIN: f32 = 2.0;
pub const BRISTLE_THICKNESS_MAX: f32 = 4.0;

/// Line width of every marker pass.
pub const MARKER_LINE_WIDTH: f32 = 3.0;

/// Offset step between marker passes.
pub const MARKER_PASS_STEP: usize = 2;

/// Fraction of the stroke width used as airbrush shadow blur.
pub const AIRBRUSH_BLUR_FACTOR: f32 = 0.5;

/// Alpha of the airbrush shadow colour.
pub const AIRBRUSH_SHADOW_ALPHA: f32 = 0.5;

/// Watercolor base alpha at the start of a stroke and at the head of a trail.
pub const WATERCOLOR_BASE_ALPHA: f32 = 0.01;

/// How much alpha fades over the length of a splodge trail.
pub const WATERCOLOR_ALPHA_FALLOFF: f32 = 0.009;

/// Width multiplier of the first splodge of a stroke.
pub const WATERCOLOR_START_SCALE: f32 = 1.1;

/// Trail length used while a watercolor stroke continues.
pub const WATERCOLOR_TRAIL: usize = 5;

/// Subdivision levels of polygon deformation; each level doubles the
/// vertex count, so a splodge edge ends up with 63 displaced midpoints.
pub const DEFORM_DEPTH: u32 = 6;

/// Variance divisor applied at each deformation level.
pub const DEFORM_VARIANCE_DIVISOR: f32 = 2.0;

/// Sketch preset: link distance (linear) and spread.
pub const SKETCH_DISTANCE: f32 = 31.622_776;
pub const SKETCH_SPREAD: f32 = 0.8;

/// Shading preset: link distance (linear) and spread.
pub const SHADING_DISTANCE: f32 = 40.0;
pub const SHADING_SPREAD: f32 = 0.9;
