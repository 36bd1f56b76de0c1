//! Input-path tests: key lookup dual path, typed characters, mouse, touch,
//! the event-loop pair.

use tinge_gfx::{MouseState, TouchPoint};
use tinge_sdk::{BindError, Value};

use crate::harness::open_module;

fn new_window(module: &tinge_gfx::Module) -> Value {
    module
        .call(
            "window",
            &[Value::Int(64), Value::Int(48), Value::str("input")],
        )
        .unwrap()
}

#[test]
fn single_character_key_passes_through_as_ascii() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    engine.press_key(97);
    let down = module
        .call_method(&window, "key_down", &[Value::str("a")])
        .unwrap();
    assert_eq!(down, Value::Bool(true));
    assert_eq!(engine.queried_keys(), vec![97]);
}

#[test]
fn named_key_resolves_through_the_table() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    let down = module
        .call_method(&window, "key_down", &[Value::str("f1")])
        .unwrap();
    assert_eq!(down, Value::Bool(false));
    assert_eq!(engine.queried_keys(), vec![144]);
}

#[test]
fn unknown_key_name_is_absent_not_an_error() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    let result = module
        .call_method(&window, "key_down", &[Value::str("notakey")])
        .unwrap();
    assert_eq!(result, Value::Null);
    // the engine was never asked
    assert!(engine.queried_keys().is_empty());
}

#[test]
fn key_held_uses_the_same_lookup() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    engine.hold_key(165);
    assert_eq!(
        module
            .call_method(&window, "key_held", &[Value::str("space")])
            .unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        module
            .call_method(&window, "key_held", &[Value::str("notakey")])
            .unwrap(),
        Value::Null
    );
}

#[test]
fn key_lookup_rejects_non_string_names() {
    let (_engine, module) = open_module();
    let window = new_window(&module);
    let err = module
        .call_method(&window, "key_down", &[Value::Int(97)])
        .unwrap_err();
    assert!(matches!(err, BindError::Argument { index: 2, .. }));
}

#[test]
fn read_char_maps_zero_to_null() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    engine.push_char(0x41);
    assert_eq!(
        module.call_method(&window, "read_char", &[]).unwrap(),
        Value::Int(0x41)
    );
    assert_eq!(
        module.call_method(&window, "read_char", &[]).unwrap(),
        Value::Null
    );
}

#[test]
fn mouse_returns_position_and_buttons() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    engine.set_mouse(MouseState {
        x: 10,
        y: 20,
        buttons: 0b101,
    });
    let state = module.call_method(&window, "mouse", &[]).unwrap();
    assert_eq!(
        state,
        Value::list(vec![Value::Int(10), Value::Int(20), Value::Int(0b101)])
    );
}

#[test]
fn touch_preserves_order_and_caps_at_ten() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    let points: Vec<TouchPoint> = (0..12).map(|i| TouchPoint { x: i, y: i * 2 }).collect();
    engine.set_touches(points);
    let result = module.call_method(&window, "touch", &[]).unwrap();
    let list = result.as_list().unwrap();
    assert_eq!(list.len(), 10);
    assert_eq!(
        list[0],
        Value::list(vec![Value::Int(0), Value::Int(0)])
    );
    assert_eq!(
        list[9],
        Value::list(vec![Value::Int(9), Value::Int(18)])
    );
}

#[test]
fn touch_reflects_live_state_per_call() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    engine.set_touches(vec![TouchPoint { x: 1, y: 1 }]);
    let first = module.call_method(&window, "touch", &[]).unwrap();
    assert_eq!(first.as_list().unwrap().len(), 1);
    engine.set_touches(vec![]);
    let second = module.call_method(&window, "touch", &[]).unwrap();
    assert_eq!(second.as_list().unwrap().len(), 0);
}

#[test]
fn closed_and_update_drive_the_event_loop() {
    let (engine, module) = open_module();
    let window = new_window(&module);
    assert_eq!(
        module.call_method(&window, "closed", &[]).unwrap(),
        Value::Bool(false)
    );
    module.call_method(&window, "update", &[]).unwrap();
    engine.set_closed(true);
    assert_eq!(
        module.call_method(&window, "closed", &[]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(engine.calls().len(), 1);
    assert!(engine.calls()[0].starts_with("update("));
}
