//! Font trampolines: loading, metrics and printing.

use std::sync::Arc;

use tinge_sdk::{Args, Kind, MethodTable, Value};

use crate::engine::Engine;
use crate::ops::{coord, trampoline};
use crate::pixel::check_pixel;

/// Install the font-related surface methods (`load_font` constructs a Font
/// from a glyph-sheet bitmap; `print` draws with one).
pub(crate) fn install_bitmap_methods(engine: &Arc<dyn Engine>, methods: &mut MethodTable) {
    let e = Arc::clone(engine);
    methods.insert(
        "load_font",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let sheet = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let codepage = coord(&args, 1)?;
            types.wrap(e.font_load(sheet, codepage), Kind::Font)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "print",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let font = types.unwrap(args.value(1)?, Kind::Font)?;
            let x = coord(&args, 2)?;
            let y = coord(&args, 3)?;
            let color = check_pixel(&args, 4)?;
            let text = args.str(5)?;
            e.print(bmp, font, x, y, color, text);
            Ok(Value::Null)
        }),
    );
}

/// Install the font methods.
pub(crate) fn install_font_methods(engine: &Arc<dyn Engine>, methods: &mut MethodTable) {
    let e = Arc::clone(engine);
    methods.insert(
        "text_width",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let font = types.unwrap(args.value(0)?, Kind::Font)?;
            let text = args.str(1)?;
            Ok(Value::Int(i64::from(e.text_width(font, text))))
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "text_height",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let font = types.unwrap(args.value(0)?, Kind::Font)?;
            let text = args.str(1)?;
            Ok(Value::Int(i64::from(e.text_height(font, text))))
        }),
    );
}
