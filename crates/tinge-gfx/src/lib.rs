//! tinge-gfx — binding module exposing a native 2-D graphics engine to a
//! dynamically-typed embedding host.
//!
//! The native engine (windowing, drawing, fonts, image files, input) sits
//! behind the [`Engine`] trait — a fixed function table the embedder
//! implements. [`Module::open`] assembles the host-facing namespace over it:
//! three handle kinds (Window, Bitmap, Font), their method/property tables,
//! the Window→Bitmap cast that lets a window be drawn on directly, and the
//! module-level functions (`window`, `bitmap`, `load_image`, `rgba`, `time`,
//! …).
//!
//! Colors cross the host boundary as packed u32 values; see [`pixel`].

#![warn(missing_docs)]

pub mod engine;
pub mod keymap;
mod module;
mod ops;
pub mod pixel;

pub use engine::{
    BlitMode, ClipRect, Engine, EngineError, MouseState, Rgba, TouchPoint, WindowFlags,
    MAX_TOUCH_POINTS, WINDOW_OPTION_TOKENS,
};
pub use module::Module;
