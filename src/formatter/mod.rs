//! Type-directed rendering of values into log text.
//!
//! Every value that can appear in a log message implements [`Loggable`],
//! which describes the value as a [`Shape`]. The [`FormatterRegistry`] turns
//! shapes into strings, consulting user overrides first, then the built-in
//! formatters for arrays, collections, iterables and maps, and finally the
//! value's own textual representation.
//!
//! # Built-in formats
//!
//! ```
//! use alog::formatter::FormatterRegistry;
//! use std::collections::BTreeMap;
//!
//! let registry = FormatterRegistry::new();
//!
//! assert_eq!(registry.render(&[1, 2, 3]), "Array(size = 3) [1, 2, 3]");
//! assert_eq!(registry.render(&vec!["a", "b"]), "Vec(size = 2) [a, b]");
//!
//! let map: BTreeMap<i32, i32> = [(1, 45), (2, 76)].into_iter().collect();
//! assert_eq!(registry.render(&map), "BTreeMap(size = 2) [{1 -> 45}, {2 -> 76}]");
//! ```
//!
//! Elements are rendered through the same registry, so nested structures
//! format consistently. There is no cycle detection: a value whose shape
//! refers back to itself recurses until the stack is exhausted.
use crate::builder::ConfigError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

mod impls;
pub(crate) mod primitive;

pub mod hex;
pub mod json;
pub mod xml;

pub use impls::{debug, display, DebugValue, DisplayValue, Iterable};
pub use primitive::{Primitive, PrimitiveSlice};

/// A sequence of borrowed elements, rendered one by one.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn Loggable> + 'a>;

/// A sequence of borrowed key-value pairs.
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a dyn Loggable, &'a dyn Loggable)> + 'a>;

/// A value that can be rendered into a log message.
///
/// Implementations exist for primitives, strings, slices, arrays, the
/// standard collections and maps, `Option`, and smart pointers. User types
/// usually implement it through `#[derive(Loggable)]` (feature `derive`), or
/// by hand:
/// ```
/// use alog::{Loggable, Shape};
/// use std::any::Any;
/// use std::fmt;
///
/// struct UserId(u64);
///
/// impl fmt::Display for UserId {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "user#{}", self.0)
///     }
/// }
///
/// impl Loggable for UserId {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Object(self)
///     }
///
///     fn as_any(&self) -> Option<&dyn Any> {
///         Some(self)
///     }
/// }
/// ```
pub trait Loggable {
    /// Describes this value for rendering.
    fn shape(&self) -> Shape<'_>;

    /// Exposes the concrete value so that overrides registered for its type
    /// can find it. Returning `None` opts out of overrides.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }

    /// The category this type belongs to. Only [`Kind::Object`] types accept
    /// formatter overrides.
    fn kind() -> Kind
    where
        Self: Sized,
    {
        Kind::Object
    }

    /// Describes a slice of this type. Primitives override this to render
    /// without dynamic dispatch per element.
    fn slice_shape(items: &[Self]) -> Shape<'_>
    where
        Self: Sized,
    {
        Shape::Array(Box::new(items.iter().map(|item| item as &dyn Loggable)))
    }
}

/// The structural description of a [`Loggable`] value.
pub enum Shape<'a> {
    /// An absent value, rendered as `null`.
    Null,
    /// A primitive rendered through its direct textual conversion.
    Primitive(Primitive),
    /// Borrowed text, rendered as is.
    Text(&'a str),
    /// A slice of primitives.
    PrimitiveArray(PrimitiveSlice<'a>),
    /// A slice or fixed-size array of non-primitive values.
    Array(Elements<'a>),
    /// A sized collection, such as `Vec` or `HashSet`.
    Collection(&'static str, Elements<'a>),
    /// A borrowed iterable whose size is only known after iterating.
    Iterable(&'static str, Elements<'a>),
    /// A map of keys to values.
    Map(&'static str, Entries<'a>),
    /// A value rendered through its `Display` impl.
    Object(&'a dyn fmt::Display),
    /// A value rendered through its `Debug` impl.
    Debug(&'a dyn fmt::Debug),
}

/// Categories of types, used to decide whether a formatter override may be
/// registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Primitive,
    Array,
    Collection,
    Iterable,
    Map,
    /// References and smart pointers, which render their referent.
    Reference,
    Object,
}

impl Kind {
    /// Returns `true` if values of this kind always use the built-in
    /// formatters.
    pub fn is_reserved(self) -> bool {
        !matches!(self, Kind::Object)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Primitive => "primitive",
            Kind::Array => "array",
            Kind::Collection => "collection",
            Kind::Iterable => "iterable",
            Kind::Map => "map",
            Kind::Reference => "reference",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Which built-in formatters are active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Builtins {
    pub array: bool,
    pub collection: bool,
    pub iterable: bool,
    pub map: bool,
}

impl Default for Builtins {
    fn default() -> Self {
        Builtins {
            array: true,
            collection: true,
            iterable: true,
            map: true,
        }
    }
}

type Override = Arc<dyn Fn(&dyn Any, &FormatterRegistry) -> String + Send + Sync>;

/// Maps values to their rendered text.
///
/// # Overrides
///
/// A formatter registered for a type takes precedence over every built-in.
/// Complex formatters receive the registry itself to render nested values:
/// ```
/// use alog::formatter::FormatterRegistry;
/// use alog::{Loggable, Shape};
/// use std::any::Any;
///
/// struct Order {
///     id: u32,
///     items: Vec<&'static str>,
/// }
///
/// impl Loggable for Order {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Text("<order>")
///     }
///
///     fn as_any(&self) -> Option<&dyn Any> {
///         Some(self)
///     }
/// }
///
/// let mut registry = FormatterRegistry::new();
/// registry
///     .register(|order: &Order, nested: &FormatterRegistry| {
///         format!("Order #{} {}", order.id, nested.render(&order.items))
///     })
///     .unwrap();
///
/// let order = Order { id: 7, items: vec!["tea"] };
/// assert_eq!(registry.render(&order), "Order #7 Vec(size = 1) [tea]");
/// ```
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    builtins: Builtins,
    overrides: HashMap<TypeId, Override>,
}

impl FormatterRegistry {
    /// A registry with every built-in enabled and no overrides.
    pub fn new() -> Self {
        FormatterRegistry::default()
    }

    pub fn builtins(&self) -> Builtins {
        self.builtins
    }

    pub(crate) fn builtins_mut(&mut self) -> &mut Builtins {
        &mut self.builtins
    }

    /// Returns `true` if an override is registered for `T`.
    pub fn has_override<T: 'static>(&self) -> bool {
        self.overrides.contains_key(&TypeId::of::<T>())
    }

    /// Registers a formatter for values of type `T`, replacing any previous
    /// one.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::ReservedType`] if `T` is a primitive,
    /// array, collection, iterable, map or reference type.
    pub fn register<T, F>(&mut self, formatter: F) -> Result<(), ConfigError>
    where
        T: Loggable + 'static,
        F: Fn(&T, &FormatterRegistry) -> String + Send + Sync + 'static,
    {
        let kind = T::kind();
        if kind.is_reserved() {
            return Err(ConfigError::ReservedType {
                type_name: std::any::type_name::<T>(),
                kind,
            });
        }

        let erased: Override = Arc::new(move |any: &dyn Any, registry: &FormatterRegistry| {
            match any.downcast_ref::<T>() {
                Some(value) => formatter(value, registry),
                None => String::new(),
            }
        });
        self.overrides.insert(TypeId::of::<T>(), erased);
        Ok(())
    }

    /// Renders a value.
    pub fn render(&self, value: &dyn Loggable) -> String {
        if let Some(any) = value.as_any() {
            if let Some(formatter) = self.overrides.get(&Any::type_id(any)) {
                return formatter(any, self);
            }
        }

        match value.shape() {
            Shape::PrimitiveArray(items) if self.builtins.array => {
                sized("Array", items.iter().map(|p| p.to_string()))
            }
            Shape::Array(elements) if self.builtins.array => {
                sized("Array", elements.map(|e| self.render(e)))
            }
            Shape::Collection(name, elements) if self.builtins.collection => {
                sized(name, elements.map(|e| self.render(e)))
            }
            Shape::Iterable(name, elements) if self.builtins.iterable => {
                sized(name, elements.map(|e| self.render(e)))
            }
            Shape::Map(name, entries) if self.builtins.map => sized(
                name,
                entries.map(|(k, v)| format!("{{{} -> {}}}", self.render(k), self.render(v))),
            ),
            shape => plain(shape),
        }
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("builtins", &self.builtins)
            .field("overrides", &self.overrides.len())
            .finish()
    }
}

fn sized(name: &str, items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    format!("{}(size = {}) [{}]", name, items.len(), items.join(", "))
}

/// Renders a shape without consulting any registry. Used when the matching
/// built-in is disabled.
fn plain(shape: Shape<'_>) -> String {
    fn list(items: impl Iterator<Item = String>) -> String {
        format!("[{}]", items.collect::<Vec<_>>().join(", "))
    }

    match shape {
        Shape::Null => "null".to_owned(),
        Shape::Primitive(p) => p.to_string(),
        Shape::Text(text) => text.to_owned(),
        Shape::Object(value) => value.to_string(),
        Shape::Debug(value) => format!("{:?}", value),
        Shape::PrimitiveArray(items) => list(items.iter().map(|p| p.to_string())),
        Shape::Array(elements)
        | Shape::Collection(_, elements)
        | Shape::Iterable(_, elements) => list(elements.map(|e| plain(e.shape()))),
        Shape::Map(_, entries) => format!(
            "{{{}}}",
            entries
                .map(|(k, v)| format!("{}={}", plain(k.shape()), plain(v.shape())))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// The last path segment of a type name with generic arguments removed,
/// e.g. `Vec` for `alloc::vec::Vec<i32>`.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
