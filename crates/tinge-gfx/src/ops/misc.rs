//! Free-function trampolines: the pixel constructor, the frame timer and
//! the function variant of the `blitmode` property.

use std::sync::Arc;

use tinge_sdk::{Args, Kind, Trampoline, Value};

use crate::engine::{BlitMode, Engine, Rgba};
use crate::ops::draw::check_blit_mode;
use crate::ops::trampoline;
use crate::pixel::{pack, DEFAULT_ALPHA};

/// The `rgba(r, g, b [, a])` pixel constructor. Omitted alpha defaults to
/// fully opaque.
pub(crate) fn rgba_fn() -> Trampoline {
    trampoline(move |_types, argv| {
        let args = Args::new(argv);
        let r = args.int(0, 0, 255)? as u8;
        let g = args.int(1, 0, 255)? as u8;
        let b = args.int(2, 0, 255)? as u8;
        let a = match args.opt(3) {
            Some(_) => args.int(3, 0, 255)? as u8,
            None => DEFAULT_ALPHA,
        };
        Ok(Value::Int(i64::from(pack(Rgba::new(r, g, b, a)))))
    })
}

/// The `time()` frame timer.
pub(crate) fn time_fn(engine: &Arc<dyn Engine>) -> Trampoline {
    let e = Arc::clone(engine);
    trampoline(move |_types, _argv| Ok(Value::Float(e.time())))
}

/// The `blitmode(bitmap [, mode])` function; the mode token defaults to
/// `blend_alpha` when omitted.
pub(crate) fn blitmode_fn(engine: &Arc<dyn Engine>) -> Trampoline {
    let e = Arc::clone(engine);
    trampoline(move |types, argv| {
        let args = Args::new(argv);
        let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
        let mode = match args.opt(1) {
            Some(_) => check_blit_mode(&args, 1)?,
            None => BlitMode::BlendAlpha,
        };
        e.set_blit_mode(bmp, mode);
        Ok(Value::Null)
    })
}
