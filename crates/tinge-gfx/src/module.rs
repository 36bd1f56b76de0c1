//! Namespace assembly and dispatch surface
//!
//! [`Module::open`] is the one-time initialization: it registers the three
//! kinds and the Window→Bitmap cast, composes the dispatch tables by union,
//! and builds the host-facing function namespace. Everything it builds is
//! immutable afterwards; the host drives it through `call`, `call_method`,
//! `get_property` and `set_property`.

use std::collections::HashMap;
use std::sync::Arc;

use tinge_sdk::{
    BindError, BindResult, Finalizer, Kind, MethodTable, PropertyTable, Trampoline,
    TypeDescriptor, TypeRegistry, Value,
};

use crate::engine::Engine;
use crate::ops;

/// The assembled host-facing module.
pub struct Module {
    types: TypeRegistry,
    functions: HashMap<&'static str, Trampoline>,
    constants: HashMap<&'static str, Value>,
}

impl Module {
    /// Build the module over an engine. Called once at startup; any
    /// configuration error here is fatal by contract.
    pub fn open(engine: Arc<dyn Engine>) -> BindResult<Module> {
        // surface tables, shared verbatim by Bitmap and Window
        let mut bitmap_methods = MethodTable::new();
        ops::draw::install_methods(&engine, &mut bitmap_methods);
        ops::text::install_bitmap_methods(&engine, &mut bitmap_methods);
        ops::image::install_bitmap_methods(&engine, &mut bitmap_methods);

        let mut bitmap_properties = PropertyTable::new();
        ops::draw::install_properties(&engine, &mut bitmap_properties);

        // Window = bitmap ops ∪ window ops ∪ keyboard ops
        let mut window_methods = bitmap_methods.clone();
        ops::window::install_methods(&engine, &mut window_methods);
        ops::window::install_keyboard(&engine, &mut window_methods);
        let window_properties = bitmap_properties.clone();

        let mut font_methods = MethodTable::new();
        ops::text::install_font_methods(&engine, &mut font_methods);

        let free_surface: Finalizer = {
            let e = Arc::clone(&engine);
            Arc::new(move |ptr| e.free(ptr))
        };
        let free_font: Finalizer = {
            let e = Arc::clone(&engine);
            Arc::new(move |ptr| e.font_free(ptr))
        };

        let mut types = TypeRegistry::new();
        types.register_type(TypeDescriptor {
            kind: Kind::Window,
            methods: window_methods.clone(),
            properties: window_properties,
            finalizer: Some(Arc::clone(&free_surface)),
        })?;
        types.register_type(TypeDescriptor {
            kind: Kind::Bitmap,
            methods: bitmap_methods,
            properties: bitmap_properties,
            finalizer: Some(free_surface),
        })?;
        types.register_type(TypeDescriptor {
            kind: Kind::Font,
            methods: font_methods.clone(),
            properties: PropertyTable::new(),
            finalizer: Some(free_font),
        })?;
        // a window's native object embeds its drawable surface: the window
        // pointer, reinterpreted, is the surface pointer
        types.register_cast(Kind::Window, Kind::Bitmap, |ptr| ptr)?;

        let mut functions: HashMap<&'static str, Trampoline> = HashMap::new();
        functions.insert("window", ops::window::window_constructor(&engine));
        functions.insert("bitmap", ops::draw::bitmap_constructor(&engine));
        functions.insert("load_image", ops::image::load_image_constructor(&engine));
        functions.insert(
            "load_image_mem",
            ops::image::load_image_mem_constructor(&engine),
        );
        functions.insert("rgba", ops::misc::rgba_fn());
        functions.insert("time", ops::misc::time_fn(&engine));
        functions.insert("blitmode", ops::misc::blitmode_fn(&engine));
        // every method is also callable as a module-level function taking
        // the receiver first; window_methods already carries the bitmap and
        // keyboard sets
        for (&name, t) in &window_methods {
            functions.entry(name).or_insert_with(|| Arc::clone(t));
        }
        for (&name, t) in &font_methods {
            functions.entry(name).or_insert_with(|| Arc::clone(t));
        }

        let mut constants = HashMap::new();
        constants.insert("font", types.wrap_unowned(engine.builtin_font(), Kind::Font));

        log::debug!("module opened with {} functions", functions.len());
        Ok(Module {
            types,
            functions,
            constants,
        })
    }

    /// Call a module-level function by name.
    pub fn call(&self, name: &str, args: &[Value]) -> BindResult<Value> {
        let f = self
            .functions
            .get(name)
            .ok_or_else(|| BindError::NoSuchMember {
                what: "function",
                name: name.to_string(),
                target: "module",
            })?;
        f(&self.types, args)
    }

    /// Call a method on a handle value; the receiver becomes the
    /// trampoline's first argument.
    pub fn call_method(&self, receiver: &Value, name: &str, args: &[Value]) -> BindResult<Value> {
        let kind = Self::receiver_kind(receiver)?;
        let method = self
            .types
            .method(kind, name)
            .ok_or_else(|| BindError::NoSuchMember {
                what: "method",
                name: name.to_string(),
                target: kind.name(),
            })?;
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(receiver.clone());
        argv.extend_from_slice(args);
        method(&self.types, &argv)
    }

    /// Read a property of a handle value.
    pub fn get_property(&self, receiver: &Value, name: &str) -> BindResult<Value> {
        let kind = Self::receiver_kind(receiver)?;
        let slot = self
            .types
            .property(kind, name)
            .ok_or_else(|| BindError::NoSuchMember {
                what: "property",
                name: name.to_string(),
                target: kind.name(),
            })?;
        (slot.get)(&self.types, std::slice::from_ref(receiver))
    }

    /// Write a property of a handle value. Read-only properties fail with
    /// an immutable-property error rather than ignoring the write.
    pub fn set_property(&self, receiver: &Value, name: &str, value: Value) -> BindResult<()> {
        let kind = Self::receiver_kind(receiver)?;
        let slot = self
            .types
            .property(kind, name)
            .ok_or_else(|| BindError::NoSuchMember {
                what: "property",
                name: name.to_string(),
                target: kind.name(),
            })?;
        match &slot.set {
            Some(set) => {
                set(&self.types, &[receiver.clone(), value])?;
                Ok(())
            }
            None => Err(BindError::ImmutableProperty {
                kind,
                name: name.to_string(),
            }),
        }
    }

    /// Look up a module constant (currently just `font`, the built-in font).
    pub fn constant(&self, name: &str) -> Option<Value> {
        self.constants.get(name).cloned()
    }

    /// The type registry, for embedders that need `unwrap`/`wrap` directly.
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    fn receiver_kind(receiver: &Value) -> BindResult<Kind> {
        match receiver {
            Value::Handle(h) => Ok(h.kind()),
            other => Err(BindError::KindMismatch {
                expected: "object handle",
                got: other.type_name(),
            }),
        }
    }
}
