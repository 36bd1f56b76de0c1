//! Binding-protocol tests: handle lifecycle, casting, dispatch, errors.

use tinge_gfx::WindowFlags;
use tinge_sdk::{BindError, Kind, Value};

use crate::harness::open_module;

fn new_bitmap(module: &tinge_gfx::Module, w: i64, h: i64) -> Value {
    module
        .call("bitmap", &[Value::Int(w), Value::Int(h)])
        .expect("bitmap creation failed")
}

fn new_window(module: &tinge_gfx::Module) -> Value {
    module
        .call(
            "window",
            &[Value::Int(64), Value::Int(48), Value::str("test")],
        )
        .expect("window creation failed")
}

#[test]
fn bitmap_is_freed_exactly_once_on_drop() {
    let (engine, module) = open_module();
    let bitmap = new_bitmap(&module, 4, 4);
    assert_eq!(engine.live_surfaces(), 1);
    drop(bitmap);
    assert_eq!(engine.freed_surfaces().len(), 1);
    assert_eq!(engine.live_surfaces(), 0);
}

#[test]
fn explicit_release_then_drop_frees_once() {
    let (engine, module) = open_module();
    let bitmap = new_bitmap(&module, 4, 4);
    bitmap.as_handle().unwrap().release();
    assert_eq!(engine.freed_surfaces().len(), 1);
    drop(bitmap);
    assert_eq!(engine.freed_surfaces().len(), 1);
}

#[test]
fn two_bitmaps_free_two_distinct_pointers() {
    let (engine, module) = open_module();
    let a = new_bitmap(&module, 2, 2);
    let b = new_bitmap(&module, 3, 3);
    drop(a);
    drop(b);
    let freed = engine.freed_surfaces();
    assert_eq!(freed.len(), 2);
    assert_ne!(freed[0], freed[1]);
}

#[test]
fn method_call_after_release_is_use_after_free() {
    let (_engine, module) = open_module();
    let bitmap = new_bitmap(&module, 4, 4);
    bitmap.as_handle().unwrap().release();
    let err = module
        .call_method(&bitmap, "get", &[Value::Int(0), Value::Int(0)])
        .unwrap_err();
    assert!(matches!(
        err,
        BindError::UseAfterFree { kind: Kind::Bitmap }
    ));
    let err = module.get_property(&bitmap, "w").unwrap_err();
    assert!(matches!(
        err,
        BindError::UseAfterFree { kind: Kind::Bitmap }
    ));
}

#[test]
fn font_handle_does_not_satisfy_bitmap_methods() {
    let (_engine, module) = open_module();
    let font = module.constant("font").unwrap();
    let err = module
        .call_method(&font, "clear", &[Value::Int(0)])
        .unwrap_err();
    // no Font→Bitmap cast is registered
    assert!(matches!(err, BindError::NoSuchMember { what: "method", .. }));
    // the same mismatch through a free-function alias reports the kind
    let err = module.call("clear", &[font, Value::Int(0)]).unwrap_err();
    assert!(matches!(
        err,
        BindError::KindMismatch {
            expected: "bitmap",
            got: "font"
        }
    ));
}

#[test]
fn window_methods_reject_plain_values() {
    let (_engine, module) = open_module();
    let err = module
        .call("update", &[Value::Int(7)])
        .unwrap_err();
    assert!(matches!(
        err,
        BindError::KindMismatch {
            expected: "window",
            got: "int"
        }
    ));
}

#[test]
fn window_casts_to_bitmap_with_identical_call_arguments() {
    let (engine, module) = open_module();
    let window = new_window(&module);

    // draw on the window through the cast view
    module
        .call_method(
            &window,
            "line",
            &[
                Value::Int(1),
                Value::Int(2),
                Value::Int(3),
                Value::Int(4),
                Value::Int(0xFF00_00FF),
            ],
        )
        .unwrap();

    // wrap the window's surface pointer directly as a bitmap and repeat
    let surface = module.types().unwrap(&window, Kind::Bitmap).unwrap();
    let direct = module.types().wrap_unowned(surface, Kind::Bitmap);
    module
        .call_method(
            &direct,
            "line",
            &[
                Value::Int(1),
                Value::Int(2),
                Value::Int(3),
                Value::Int(4),
                Value::Int(0xFF00_00FF),
            ],
        )
        .unwrap();

    let calls = engine.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[test]
fn cast_view_is_not_a_second_owner() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    // exercise the cast view, then drop the window
    module.call_method(&window, "clear", &[Value::Int(0)]).unwrap();
    drop(window);
    assert_eq!(engine.freed_surfaces().len(), 1);
}

#[test]
fn geometry_properties_are_read_only() {
    let (_engine, module) = open_module();
    let bitmap = new_bitmap(&module, 7, 5);
    assert_eq!(module.get_property(&bitmap, "w").unwrap(), Value::Int(7));
    assert_eq!(module.get_property(&bitmap, "h").unwrap(), Value::Int(5));
    for name in ["w", "h", "cx", "cy", "cw", "ch"] {
        let err = module
            .set_property(&bitmap, name, Value::Int(9))
            .unwrap_err();
        match err {
            BindError::ImmutableProperty { kind, name: n } => {
                assert_eq!(kind, Kind::Bitmap);
                assert_eq!(n, name);
            }
            other => panic!("expected ImmutableProperty, got {other:?}"),
        }
    }
}

#[test]
fn blitmode_property_reads_and_writes() {
    let (_engine, module) = open_module();
    let bitmap = new_bitmap(&module, 4, 4);
    assert_eq!(
        module.get_property(&bitmap, "blitmode").unwrap(),
        Value::str("blend_alpha")
    );
    module
        .set_property(&bitmap, "blitmode", Value::str("keep_alpha"))
        .unwrap();
    assert_eq!(
        module.get_property(&bitmap, "blitmode").unwrap(),
        Value::str("keep_alpha")
    );
    let err = module
        .set_property(&bitmap, "blitmode", Value::str("copy"))
        .unwrap_err();
    assert!(matches!(err, BindError::Argument { index: 2, .. }));
}

#[test]
fn blitmode_function_defaults_to_blend_alpha() {
    let (_engine, module) = open_module();
    let bitmap = new_bitmap(&module, 4, 4);
    module
        .call("blitmode", &[bitmap.clone(), Value::str("keep_alpha")])
        .unwrap();
    assert_eq!(
        module.get_property(&bitmap, "blitmode").unwrap(),
        Value::str("keep_alpha")
    );
    module.call("blitmode", &[bitmap.clone()]).unwrap();
    assert_eq!(
        module.get_property(&bitmap, "blitmode").unwrap(),
        Value::str("blend_alpha")
    );
}

#[test]
fn unknown_names_are_reported() {
    let (_engine, module) = open_module();
    let bitmap = new_bitmap(&module, 4, 4);
    assert!(matches!(
        module.call("teleport", &[]).unwrap_err(),
        BindError::NoSuchMember {
            what: "function",
            ..
        }
    ));
    assert!(matches!(
        module.call_method(&bitmap, "teleport", &[]).unwrap_err(),
        BindError::NoSuchMember { what: "method", .. }
    ));
    assert!(matches!(
        module.get_property(&bitmap, "depth").unwrap_err(),
        BindError::NoSuchMember {
            what: "property",
            ..
        }
    ));
}

#[test]
fn failed_construction_is_an_allocation_error() {
    let (engine, module) = open_module();
    engine.fail_next_alloc();
    let err = module
        .call("bitmap", &[Value::Int(4), Value::Int(4)])
        .unwrap_err();
    match err {
        BindError::Allocation { message } => assert_eq!(message, "error creating bitmap"),
        other => panic!("expected Allocation, got {other:?}"),
    }
    assert_eq!(engine.live_surfaces(), 0);
}

#[test]
fn load_image_surfaces_engine_message_verbatim() {
    let (engine, module) = open_module();
    let err = module
        .call("load_image", &[Value::str("missing.png")])
        .unwrap_err();
    match err {
        BindError::Allocation { message } => {
            assert_eq!(message, "missing.png: no such file or directory");
        }
        other => panic!("expected Allocation, got {other:?}"),
    }

    engine.add_image_file("sprite.png", 16, 16);
    let image = module.call("load_image", &[Value::str("sprite.png")]).unwrap();
    assert_eq!(module.get_property(&image, "w").unwrap(), Value::Int(16));
}

#[test]
fn load_image_mem_accepts_bytes_and_strings() {
    let (_engine, module) = open_module();
    let image = module
        .call("load_image_mem", &[Value::Bytes(b"IMGdata".to_vec())])
        .unwrap();
    assert_eq!(module.get_property(&image, "w").unwrap(), Value::Int(2));
    let err = module
        .call("load_image_mem", &[Value::Bytes(b"not an image".to_vec())])
        .unwrap_err();
    assert!(matches!(err, BindError::Allocation { .. }));
}

#[test]
fn save_image_failure_surfaces_engine_message() {
    let (engine, module) = open_module();
    let bitmap = new_bitmap(&module, 4, 4);
    let ok = module
        .call_method(&bitmap, "save_image", &[Value::str("out.png")])
        .unwrap();
    assert_eq!(ok, Value::Bool(true));
    assert_eq!(engine.saved_images(), vec!["out.png".to_string()]);

    let err = module
        .call_method(&bitmap, "save_image", &[Value::str("/readonly/out.png")])
        .unwrap_err();
    match err {
        BindError::Engine { message } => {
            assert_eq!(message, "/readonly/out.png: permission denied");
        }
        other => panic!("expected Engine, got {other:?}"),
    }
}

#[test]
fn builtin_font_measures_text_and_survives_drop() {
    let (engine, module) = open_module();
    let font = module.constant("font").unwrap();
    let width = module
        .call_method(&font, "text_width", &[Value::str("hi")])
        .unwrap();
    assert_eq!(width, Value::Int(16));
    drop(font);
    assert!(engine.freed_fonts().is_empty());
}

#[test]
fn loaded_font_is_freed_with_the_font_finalizer() {
    let (engine, module) = open_module();
    let sheet = new_bitmap(&module, 128, 64);
    let font = module
        .call_method(&sheet, "load_font", &[Value::Int(1252)])
        .unwrap();
    let height = module
        .call_method(&font, "text_height", &[Value::str("x")])
        .unwrap();
    assert_eq!(height, Value::Int(16));
    drop(font);
    assert_eq!(engine.freed_fonts().len(), 1);
    assert!(engine.freed_surfaces().is_empty());
}

#[test]
fn window_constructor_combines_flag_tokens() {
    let (engine, module) = open_module();
    let window = module
        .call(
            "window",
            &[
                Value::Int(320),
                Value::Int(240),
                Value::str("demo"),
                Value::str("2x"),
                Value::str("nocursor"),
            ],
        )
        .unwrap();
    let ptr = module.types().unwrap(&window, Kind::Window).unwrap();
    assert_eq!(
        engine.window_flags(ptr),
        WindowFlags::SCALE_2X | WindowFlags::NOCURSOR
    );
    assert_eq!(engine.window_title(ptr), Some("demo".to_string()));
}

#[test]
fn window_constructor_rejects_unknown_tokens() {
    let (_engine, module) = open_module();
    let err = module
        .call(
            "window",
            &[
                Value::Int(320),
                Value::Int(240),
                Value::str("demo"),
                Value::str("windowed"),
            ],
        )
        .unwrap_err();
    match err {
        BindError::Argument { index, message } => {
            assert_eq!(index, 4);
            assert!(message.contains("windowed"));
        }
        other => panic!("expected Argument, got {other:?}"),
    }
}

#[test]
fn method_aliases_dispatch_like_methods() {
    let (_engine, module) = open_module();
    let bitmap = new_bitmap(&module, 4, 4);
    let red = module
        .call("rgba", &[Value::Int(255), Value::Int(0), Value::Int(0)])
        .unwrap();
    module.call("clear", &[bitmap.clone(), red.clone()]).unwrap();
    let via_alias = module
        .call("get", &[bitmap.clone(), Value::Int(0), Value::Int(0)])
        .unwrap();
    let via_method = module
        .call_method(&bitmap, "get", &[Value::Int(0), Value::Int(0)])
        .unwrap();
    assert_eq!(via_alias, red);
    assert_eq!(via_method, red);
}

#[test]
fn error_function_terminates_with_message() {
    let (_engine, module) = open_module();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = module.call("error", &[Value::str("boom")]);
    }));
    let payload = result.unwrap_err();
    let message = payload.downcast_ref::<String>().unwrap();
    assert_eq!(message, "engine fatal: boom");
}

#[test]
fn error_function_accepts_window_and_message() {
    let (_engine, module) = open_module();
    let window = new_window(&module);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = module.call("error", &[window.clone(), Value::str("boom")]);
    }));
    let payload = result.unwrap_err();
    let message = payload.downcast_ref::<String>().unwrap();
    assert!(message.starts_with("engine fatal [window "));
    assert!(message.ends_with("]: boom"));
}
