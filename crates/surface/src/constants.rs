/// Content of a freshly added text decoration.
pub const DEFAULT_TEXT: &str = "Edit me";

/// Font family of a freshly added text decoration.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Font size of text decorations in surface pixels.
pub const DEFAULT_FONT_SIZE: f32 = 24.0;

/// Fill and stroke color of a freshly added text decoration.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Initial uniform scale of a text decoration.
pub const DEFAULT_TEXT_SCALE: f32 = 0.5;

/// Placement used when no position is given.
pub const DEFAULT_POSITION: (f32, f32) = (100.0, 100.0);

/// Width in surface pixels a new image is scaled to.
pub const INITIAL_IMAGE_WIDTH: f32 = 50.0;

/// Distance between line baselines as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.16;

/// Advance per character, as a multiple of the font size, when no font is loaded.
pub const FALLBACK_ADVANCE: f32 = 0.6;

/// Hit-test padding around decorations in surface pixels.
pub const HIT_PADDING: f32 = 10.0;

/// Edge length of a control handle in surface pixels.
pub const CONTROL_SIZE: f32 = 10.0;

/// Distance of the rotation handle above the top edge.
pub const ROTATION_HANDLE_OFFSET: f32 = 40.0;

/// Rotation gestures snap to multiples of this many degrees.
pub const SNAP_ANGLE: f32 = 5.0;

/// Smallest uniform scale reachable by a scaling gesture.
pub const MIN_SCALE: f32 = 0.01;
