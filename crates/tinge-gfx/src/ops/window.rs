//! Window trampolines: construction, event-loop pair, input queries and the
//! fatal-error path.

use std::sync::Arc;

use tinge_sdk::{Args, BindError, Kind, MethodTable, Trampoline, Value};

use crate::engine::{Engine, WindowFlags, MAX_TOUCH_POINTS};
use crate::keymap;
use crate::ops::{coord, trampoline};

/// The `window(w, h, title, option-token...)` constructor.
pub(crate) fn window_constructor(engine: &Arc<dyn Engine>) -> Trampoline {
    let e = Arc::clone(engine);
    trampoline(move |types, argv| {
        let args = Args::new(argv);
        let w = coord(&args, 0)?;
        let h = coord(&args, 1)?;
        let title = args.str(2)?;
        let mut flags = WindowFlags::default();
        for (offset, value) in args.rest(3).iter().enumerate() {
            let index = 3 + offset;
            let token = value.as_str().ok_or_else(|| {
                BindError::argument(
                    index + 1,
                    format!("expected option token, got {}", value.type_name()),
                )
            })?;
            flags |= WindowFlags::from_token(token).ok_or_else(|| {
                BindError::argument(index + 1, format!("unknown window option '{token}'"))
            })?;
        }
        types.wrap(e.window_new(w, h, title, flags), Kind::Window)
    })
}

/// Install the window-only methods.
pub(crate) fn install_methods(engine: &Arc<dyn Engine>, methods: &mut MethodTable) {
    let e = Arc::clone(engine);
    methods.insert(
        "closed",
        trampoline(move |types, argv| {
            let win = types.unwrap(Args::new(argv).value(0)?, Kind::Window)?;
            Ok(Value::Bool(e.window_closed(win)))
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "update",
        trampoline(move |types, argv| {
            let win = types.unwrap(Args::new(argv).value(0)?, Kind::Window)?;
            e.window_update(win);
            Ok(Value::Null)
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "mouse",
        trampoline(move |types, argv| {
            let win = types.unwrap(Args::new(argv).value(0)?, Kind::Window)?;
            let m = e.mouse(win);
            Ok(Value::list(vec![
                Value::Int(i64::from(m.x)),
                Value::Int(i64::from(m.y)),
                Value::Int(i64::from(m.buttons)),
            ]))
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "touch",
        trampoline(move |types, argv| {
            let win = types.unwrap(Args::new(argv).value(0)?, Kind::Window)?;
            let points = e.touch(win, MAX_TOUCH_POINTS);
            Ok(Value::list(
                points
                    .into_iter()
                    .take(MAX_TOUCH_POINTS)
                    .map(|p| {
                        Value::list(vec![Value::Int(i64::from(p.x)), Value::Int(i64::from(p.y))])
                    })
                    .collect(),
            ))
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "read_char",
        trampoline(move |types, argv| {
            let win = types.unwrap(Args::new(argv).value(0)?, Kind::Window)?;
            match e.read_char(win) {
                0 => Ok(Value::Null),
                code => Ok(Value::Int(i64::from(code))),
            }
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "error",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            // two call shapes, resolved by the first argument's type:
            // (message) or (window, message)
            match args.value(0)? {
                Value::Str(message) => e.fatal(None, message),
                other => {
                    let win = types.unwrap(other, Kind::Window)?;
                    let message = args.str(1)?;
                    e.fatal(Some(win), message)
                }
            }
        }),
    );
}

/// Install `key_down` / `key_held`, closed over the key name table.
pub(crate) fn install_keyboard(engine: &Arc<dyn Engine>, methods: &mut MethodTable) {
    let e = Arc::clone(engine);
    methods.insert(
        "key_down",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let win = types.unwrap(args.value(0)?, Kind::Window)?;
            match keymap::resolve(args.str(1)?) {
                Some(code) => Ok(Value::Bool(e.key_down(win, code))),
                None => Ok(Value::Null),
            }
        }),
    );

    let e = Arc::clone(engine);
    methods.insert(
        "key_held",
        trampoline(move |types, argv| {
            let args = Args::new(argv);
            let win = types.unwrap(args.value(0)?, Kind::Window)?;
            match keymap::resolve(args.str(1)?) {
                Some(code) => Ok(Value::Bool(e.key_held(win, code))),
                None => Ok(Value::Null),
            }
        }),
    );
}
