//! Surface trampolines: construction, drawing, clipping, blitting and the
//! read-only geometry properties.

use std::sync::Arc;

use tinge_sdk::{
    Args, BindError, BindResult, Kind, MethodTable, PropertySlot, PropertyTable, RawPtr,
    Trampoline, TypeRegistry, Value,
};

use crate::engine::{BlitMode, Engine};
use crate::ops::{clip_extent, coord, trampoline};
use crate::pixel::check_pixel;

/// The `bitmap(w, h)` constructor.
pub(crate) fn bitmap_constructor(engine: &Arc<dyn Engine>) -> Trampoline {
    let e = Arc::clone(engine);
    trampoline(move |types, argv| {
        let args = Args::new(argv);
        let w = coord(&args, 0)?;
        let h = coord(&args, 1)?;
        types.wrap(e.bitmap_new(w, h), Kind::Bitmap)
    })
}

/// Parse the shared (dest, src, dx, dy, sx, sy, w, h) prefix of the blit
/// variants.
#[allow(clippy::type_complexity)]
fn blit_prefix(
    types: &TypeRegistry,
    args: &Args<'_>,
) -> BindResult<(RawPtr, RawPtr, i32, i32, i32, i32, i32, i32)> {
    let dest = types.unwrap(args.value(0)?, Kind::Bitmap)?;
    let src = types.unwrap(args.value(1)?, Kind::Bitmap)?;
    let dx = coord(args, 2)?;
    let dy = coord(args, 3)?;
    let sx = coord(args, 4)?;
    let sy = coord(args, 5)?;
    let w = coord(args, 6)?;
    let h = coord(args, 7)?;
    Ok((dest, src, dx, dy, sx, sy, w, h))
}

/// Parse a blit-mode token argument.
pub(crate) fn check_blit_mode(args: &Args<'_>, index: usize) -> BindResult<BlitMode> {
    let token = args.str(index)?;
    BlitMode::from_token(token)
        .ok_or_else(|| BindError::argument(index + 1, format!("invalid blit mode '{token}'")))
}

/// Install the surface methods shared by bitmaps and windows.
pub(crate) fn install_methods(engine: &Arc<dyn Engine>, methods: &mut MethodTable) {
    let e = Arc::clone(engine);
    methods.insert(
        "get",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let x = coord(&args, 1)?;
            let y = coord(&args, 2)?;
            Ok(Value::Int(i64::from(crate::pixel::pack(e.get(bmp, x, y)))))
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "plot",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let x = coord(&args, 1)?;
            let y = coord(&args, 2)?;
            let color = check_pixel(&args, 3)?;
            e.plot(bmp, x, y, color);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "clear",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let color = check_pixel(&args, 1)?;
            e.clear(bmp, color);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "fill",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let x = coord(&args, 1)?;
            let y = coord(&args, 2)?;
            let w = coord(&args, 3)?;
            let h = coord(&args, 4)?;
            let color = check_pixel(&args, 5)?;
            e.fill(bmp, x, y, w, h, color);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "line",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let x0 = coord(&args, 1)?;
            let y0 = coord(&args, 2)?;
            let x1 = coord(&args, 3)?;
            let y1 = coord(&args, 4)?;
            let color = check_pixel(&args, 5)?;
            e.line(bmp, x0, y0, x1, y1, color);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "rect",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let x = coord(&args, 1)?;
            let y = coord(&args, 2)?;
            let w = coord(&args, 3)?;
            let h = coord(&args, 4)?;
            let color = check_pixel(&args, 5)?;
            e.rect(bmp, x, y, w, h, color);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "fill_rect",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let x = coord(&args, 1)?;
            let y = coord(&args, 2)?;
            let w = coord(&args, 3)?;
            let h = coord(&args, 4)?;
            let color = check_pixel(&args, 5)?;
            e.fill_rect(bmp, x, y, w, h, color);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "circle",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let x = coord(&args, 1)?;
            let y = coord(&args, 2)?;
            let r = coord(&args, 3)?;
            let color = check_pixel(&args, 4)?;
            e.circle(bmp, x, y, r, color);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "fill_circle",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let x = coord(&args, 1)?;
            let y = coord(&args, 2)?;
            let r = coord(&args, 3)?;
            let color = check_pixel(&args, 4)?;
            e.fill_circle(bmp, x, y, r, color);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "clip",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let cx = coord(&args, 1)?;
            let cy = coord(&args, 2)?;
            let cw = clip_extent(&args, 3)?;
            let ch = clip_extent(&args, 4)?;
            e.clip(bmp, cx, cy, cw, ch);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "blit",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let (dest, src, dx, dy, sx, sy, w, h) = blit_prefix(types, &args)?;
            e.blit(dest, src, dx, dy, sx, sy, w, h);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "blit_alpha",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let (dest, src, dx, dy, sx, sy, w, h) = blit_prefix(types, &args)?;
            let alpha = args.float(8)? as f32;
            e.blit_alpha(dest, src, dx, dy, sx, sy, w, h, alpha);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "blit_tint",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let (dest, src, dx, dy, sx, sy, w, h) = blit_prefix(types, &args)?;
            let tint = check_pixel(&args, 8)?;
            e.blit_tint(dest, src, dx, dy, sx, sy, w, h, tint);
            Ok(Value::Null)
        }),
    );
}

/// Install the surface properties: geometry (read-only) and `blitmode`
/// (read-write).
pub(crate) fn install_properties(engine: &Arc<dyn Engine>, properties: &mut PropertyTable) {
    let e = Arc::clone(engine);
    properties.insert(
        "w",
        PropertySlot::read_only(trampoline(move |types, argv| {
            let bmp = types.unwrap(Args::new(argv).value(0)?, Kind::Bitmap)?;
            Ok(Value::Int(i64::from(e.size(bmp).0)))
        })),
    );

    let e = Arc::clone(engine);
    properties.insert(
        "h",
        PropertySlot::read_only(trampoline(move |types, argv| {
            let bmp = types.unwrap(Args::new(argv).value(0)?, Kind::Bitmap)?;
            Ok(Value::Int(i64::from(e.size(bmp).1)))
        })),
    );

    let e = Arc::clone(engine);
    properties.insert(
        "cx",
        PropertySlot::read_only(trampoline(move |types, argv| {
            let bmp = types.unwrap(Args::new(argv).value(0)?, Kind::Bitmap)?;
            Ok(Value::Int(i64::from(e.clip_rect(bmp).cx)))
        })),
    );

    let e = Arc::clone(engine);
    properties.insert(
        "cy",
        PropertySlot::read_only(trampoline(move |types, argv| {
            let bmp = types.unwrap(Args::new(argv).value(0)?, Kind::Bitmap)?;
            Ok(Value::Int(i64::from(e.clip_rect(bmp).cy)))
        })),
    );

    let e = Arc::clone(engine);
    properties.insert(
        "cw",
        PropertySlot::read_only(trampoline(move |types, argv| {
            let bmp = types.unwrap(Args::new(argv).value(0)?, Kind::Bitmap)?;
            Ok(Value::Int(i64::from(e.clip_rect(bmp).cw)))
        })),
    );

    let e = Arc::clone(engine);
    properties.insert(
        "ch",
        PropertySlot::read_only(trampoline(move |types, argv| {
            let bmp = types.unwrap(Args::new(argv).value(0)?, Kind::Bitmap)?;
            Ok(Value::Int(i64::from(e.clip_rect(bmp).ch)))
        })),
    );

    let get_engine = Arc::clone(engine);
    let set_engine = Arc::clone(engine);
    properties.insert(
        "blitmode",
        PropertySlot::read_write(
            trampoline(move |types, argv| {
                let bmp = types.unwrap(Args::new(argv).value(0)?, Kind::Bitmap)?;
                Ok(Value::str(get_engine.blit_mode(bmp).token()))
            }),
            trampoline(move |types, argv| {
                let args = Args::new(argv);
                let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
                let mode = check_blit_mode(&args, 1)?;
                set_engine.set_blit_mode(bmp, mode);
                Ok(Value::Null)
            }),
        ),
    );
}
