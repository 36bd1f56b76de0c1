//! Image I/O trampolines.
//!
//! Load failures surface the engine's own message as an allocation error;
//! save failures surface it as an engine error. Either way the text crosses
//! verbatim.

use std::sync::Arc;

use tinge_sdk::{Args, BindError, Kind, MethodTable, Trampoline, Value};

use crate::engine::Engine;
use crate::ops::trampoline;

/// The `load_image(path)` constructor.
pub(crate) fn load_image_constructor(engine: &Arc<dyn Engine>) -> Trampoline {
    let e = Arc::clone(engine);
    trampoline(move |types, argv| {
        let args = Args::new(argv);
        let path = args.str(0)?;
        match e.image_load(path) {
            Ok(ptr) => types.wrap(Some(ptr), Kind::Bitmap),
            Err(err) => Err(BindError::Allocation {
                message: err.to_string(),
            }),
        }
    })
}

/// The `load_image_mem(bytes)` constructor.
pub(crate) fn load_image_mem_constructor(engine: &Arc<dyn Engine>) -> Trampoline {
    let e = Arc::clone(engine);
    trampoline(move |types, argv| {
        let args = Args::new(argv);
        let data = args.bytes(0)?;
        match e.image_load_mem(data) {
            Ok(ptr) => types.wrap(Some(ptr), Kind::Bitmap),
            Err(err) => Err(BindError::Allocation {
                message: err.to_string(),
            }),
        }
    })
}

/// Install `save_image` as a surface method.
pub(crate) fn install_bitmap_methods(engine: &Arc<dyn Engine>, methods: &mut MethodTable) {
    let e = Arc::clone(engine);
    methods.insert(
        "save_image",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let bmp = types.unwrap(args.value(0)?, Kind::Bitmap)?;
            let path = args.str(1)?;
            e.image_save(path, bmp).map_err(|err| BindError::Engine {
                message: err.to_string(),
            })?;
            Ok(Value::Bool(true))
        }),
    );
}
