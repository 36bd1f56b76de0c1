//! The native engine seam
//!
//! [`Engine`] is the fixed function table of the native graphics/windowing
//! library, expressed as a trait: one method per entry point. Trampolines
//! program against `&dyn Engine` and never see engine internals; the
//! embedder provides the concrete implementation. The engine is assumed
//! non-reentrant and driven from one logical thread.

use std::ops::{BitOr, BitOrAssign};

use tinge_sdk::RawPtr;

/// Native 4-channel color, the engine-side pixel representation.
///
/// The host-side representation is the packed u32 wire value; see
/// [`crate::pixel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Construct a color from its four channels.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }
}

/// Alpha handling for blit operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlitMode {
    /// Copy source alpha into the destination.
    KeepAlpha,
    /// Blend source over destination using source alpha.
    BlendAlpha,
}

impl BlitMode {
    /// The host-facing token for this mode.
    pub fn token(self) -> &'static str {
        match self {
            BlitMode::KeepAlpha => "keep_alpha",
            BlitMode::BlendAlpha => "blend_alpha",
        }
    }

    /// Parse a host-facing token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "keep_alpha" => Some(BlitMode::KeepAlpha),
            "blend_alpha" => Some(BlitMode::BlendAlpha),
            _ => None,
        }
    }
}

/// Window creation options, bit-or combinable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowFlags(u32);

impl WindowFlags {
    /// Fixed-size window.
    pub const FIXED: WindowFlags = WindowFlags(0);
    /// Auto-scale content to the window size.
    pub const AUTO: WindowFlags = WindowFlags(1);
    /// Integer upscale 2x.
    pub const SCALE_2X: WindowFlags = WindowFlags(2);
    /// Integer upscale 3x.
    pub const SCALE_3X: WindowFlags = WindowFlags(4);
    /// Integer upscale 4x.
    pub const SCALE_4X: WindowFlags = WindowFlags(8);
    /// Use the full retina resolution where available.
    pub const RETINA: WindowFlags = WindowFlags(16);
    /// Hide the mouse cursor over the window.
    pub const NOCURSOR: WindowFlags = WindowFlags(32);
    /// Fullscreen.
    pub const FULLSCREEN: WindowFlags = WindowFlags(64);

    /// The raw bit value passed to the engine.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Parse one host-facing option token.
    pub fn from_token(token: &str) -> Option<Self> {
        WINDOW_OPTION_TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, flag)| *flag)
    }
}

impl BitOr for WindowFlags {
    type Output = WindowFlags;
    fn bitor(self, rhs: WindowFlags) -> WindowFlags {
        WindowFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for WindowFlags {
    fn bitor_assign(&mut self, rhs: WindowFlags) {
        self.0 |= rhs.0;
    }
}

/// The fixed set of window option tokens, in declaration order.
pub const WINDOW_OPTION_TOKENS: &[(&str, WindowFlags)] = &[
    ("fixed", WindowFlags::FIXED),
    ("auto", WindowFlags::AUTO),
    ("2x", WindowFlags::SCALE_2X),
    ("3x", WindowFlags::SCALE_3X),
    ("4x", WindowFlags::SCALE_4X),
    ("retina", WindowFlags::RETINA),
    ("nocursor", WindowFlags::NOCURSOR),
    ("fullscreen", WindowFlags::FULLSCREEN),
];

/// A surface's current clip rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClipRect {
    /// Left edge.
    pub cx: i32,
    /// Top edge.
    pub cy: i32,
    /// Width; negative means "to the surface edge".
    pub cw: i32,
    /// Height; negative means "to the surface edge".
    pub ch: i32,
}

/// Mouse position and button bits for a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseState {
    /// X position in surface coordinates.
    pub x: i32,
    /// Y position in surface coordinates.
    pub y: i32,
    /// Button bitmask, engine-defined.
    pub buttons: i32,
}

/// One active touch point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchPoint {
    /// X position in surface coordinates.
    pub x: i32,
    /// Y position in surface coordinates.
    pub y: i32,
}

/// Touch-point query capacity: at most this many points per call.
pub const MAX_TOUCH_POINTS: usize = 10;

/// Failure reported by an engine I/O entry point, message verbatim.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    /// Build an error from the engine's message text.
    pub fn new(message: impl Into<String>) -> Self {
        EngineError(message.into())
    }
}

/// The native engine function table.
///
/// All pointer-taking methods receive pointers previously returned by this
/// same engine; the binding layer guarantees it never passes a pointer after
/// the matching free. Drawing entry points clip internally (engine
/// contract) — the binding layer range-checks host arguments but does not
/// clamp them to surface bounds.
pub trait Engine: Send + Sync {
    // ------------------------------------------------------------------
    // Resource lifecycle
    // ------------------------------------------------------------------

    /// Create a window with a drawable surface. `None` on failure.
    fn window_new(&self, w: i32, h: i32, title: &str, flags: WindowFlags) -> Option<RawPtr>;

    /// Create an off-screen surface. `None` on failure.
    fn bitmap_new(&self, w: i32, h: i32) -> Option<RawPtr>;

    /// Free a window or bitmap created by this engine.
    fn free(&self, ptr: RawPtr);

    /// Extract a font from a glyph-sheet bitmap for the given codepage.
    /// `None` on failure.
    fn font_load(&self, sheet: RawPtr, codepage: i32) -> Option<RawPtr>;

    /// Free a font created by [`Engine::font_load`].
    fn font_free(&self, ptr: RawPtr);

    /// The engine's built-in font. Process-wide singleton, never freed.
    fn builtin_font(&self) -> RawPtr;

    // ------------------------------------------------------------------
    // Image I/O
    // ------------------------------------------------------------------

    /// Load an image file into a new bitmap.
    fn image_load(&self, path: &str) -> Result<RawPtr, EngineError>;

    /// Decode an in-memory image into a new bitmap.
    fn image_load_mem(&self, data: &[u8]) -> Result<RawPtr, EngineError>;

    /// Save a bitmap to an image file.
    fn image_save(&self, path: &str, bmp: RawPtr) -> Result<(), EngineError>;

    // ------------------------------------------------------------------
    // Surface queries
    // ------------------------------------------------------------------

    /// Width and height of a surface.
    fn size(&self, bmp: RawPtr) -> (i32, i32);

    /// Current clip rectangle of a surface.
    fn clip_rect(&self, bmp: RawPtr) -> ClipRect;

    /// Current blit mode of a surface.
    fn blit_mode(&self, bmp: RawPtr) -> BlitMode;

    /// Read one pixel.
    fn get(&self, bmp: RawPtr, x: i32, y: i32) -> Rgba;

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Set the blit mode for subsequent blits onto `bmp`.
    fn set_blit_mode(&self, bmp: RawPtr, mode: BlitMode);

    /// Fill the whole surface, ignoring the clip rectangle.
    fn clear(&self, bmp: RawPtr, color: Rgba);

    /// Write one pixel.
    fn plot(&self, bmp: RawPtr, x: i32, y: i32, color: Rgba);

    /// Fill a rectangular area.
    fn fill(&self, bmp: RawPtr, x: i32, y: i32, w: i32, h: i32, color: Rgba);

    /// Draw a line.
    fn line(&self, bmp: RawPtr, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba);

    /// Draw a rectangle outline.
    fn rect(&self, bmp: RawPtr, x: i32, y: i32, w: i32, h: i32, color: Rgba);

    /// Draw a filled rectangle with its outline.
    fn fill_rect(&self, bmp: RawPtr, x: i32, y: i32, w: i32, h: i32, color: Rgba);

    /// Draw a circle outline.
    fn circle(&self, bmp: RawPtr, x: i32, y: i32, r: i32, color: Rgba);

    /// Draw a filled circle.
    fn fill_circle(&self, bmp: RawPtr, x: i32, y: i32, r: i32, color: Rgba);

    /// Set the clip rectangle.
    fn clip(&self, bmp: RawPtr, cx: i32, cy: i32, cw: i32, ch: i32);

    /// Copy a source region onto a destination surface.
    #[allow(clippy::too_many_arguments)]
    fn blit(
        &self,
        dest: RawPtr,
        src: RawPtr,
        dx: i32,
        dy: i32,
        sx: i32,
        sy: i32,
        w: i32,
        h: i32,
    );

    /// Blit with a constant alpha multiplier.
    #[allow(clippy::too_many_arguments)]
    fn blit_alpha(
        &self,
        dest: RawPtr,
        src: RawPtr,
        dx: i32,
        dy: i32,
        sx: i32,
        sy: i32,
        w: i32,
        h: i32,
        alpha: f32,
    );

    /// Blit with a tint color.
    #[allow(clippy::too_many_arguments)]
    fn blit_tint(
        &self,
        dest: RawPtr,
        src: RawPtr,
        dx: i32,
        dy: i32,
        sx: i32,
        sy: i32,
        w: i32,
        h: i32,
        tint: Rgba,
    );

    // ------------------------------------------------------------------
    // Window and input
    // ------------------------------------------------------------------

    /// Whether the user has closed the window.
    fn window_closed(&self, win: RawPtr) -> bool;

    /// Present the window's surface and pump events.
    fn window_update(&self, win: RawPtr);

    /// Current mouse state. Polling may advance engine-internal input
    /// state; that is the engine's contract, not this layer's.
    fn mouse(&self, win: RawPtr) -> MouseState;

    /// Currently active touch points, at most `cap` of them, in engine
    /// order. Reflects live state; not restartable.
    fn touch(&self, win: RawPtr, cap: usize) -> Vec<TouchPoint>;

    /// Whether a key went down since the last update.
    fn key_down(&self, win: RawPtr, code: u8) -> bool;

    /// Whether a key is currently held.
    fn key_held(&self, win: RawPtr, code: u8) -> bool;

    /// Next typed character, 0 when none is pending.
    fn read_char(&self, win: RawPtr) -> i32;

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Pixel width of `text` in `font`.
    fn text_width(&self, font: RawPtr, text: &str) -> i32;

    /// Pixel height of `text` in `font`.
    fn text_height(&self, font: RawPtr, text: &str) -> i32;

    /// Draw text onto a surface.
    fn print(&self, bmp: RawPtr, font: RawPtr, x: i32, y: i32, color: Rgba, text: &str);

    // ------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------

    /// Seconds elapsed since the previous call.
    fn time(&self) -> f64;

    /// Report a fatal error and terminate. Does not return, by engine
    /// contract.
    fn fatal(&self, win: Option<RawPtr>, message: &str) -> !;
}
