use super::{short_type_name, Elements, Entries, Kind, Loggable, Shape};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

fn elements<'a, T, I>(iter: I) -> Elements<'a>
where
    T: Loggable + 'a,
    I: Iterator<Item = &'a T> + 'a,
{
    Box::new(iter.map(|item| item as &dyn Loggable))
}

fn entries<'a, K, V, I>(iter: I) -> Entries<'a>
where
    K: Loggable + 'a,
    V: Loggable + 'a,
    I: Iterator<Item = (&'a K, &'a V)> + 'a,
{
    Box::new(iter.map(|(k, v)| (k as &dyn Loggable, v as &dyn Loggable)))
}

impl Loggable for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(self)
    }
}

impl Loggable for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(self)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Loggable for fmt::Arguments<'_> {
    fn shape(&self) -> Shape<'_> {
        Shape::Object(self)
    }
}

macro_rules! transparent {
    ($($ptr:ident),*) => {
        $(
            impl<T: Loggable + ?Sized> Loggable for $ptr<T> {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    (**self).as_any()
                }

                fn kind() -> Kind {
                    Kind::Reference
                }
            }
        )*
    };
}

transparent!(Box, Rc, Arc);

impl<T: Loggable + ?Sized> Loggable for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        (**self).as_any()
    }

    fn kind() -> Kind {
        Kind::Reference
    }
}

impl<T: Loggable> Loggable for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }

    fn as_any(&self) -> Option<&dyn Any> {
        self.as_ref().and_then(Loggable::as_any)
    }

    fn kind() -> Kind {
        Kind::Reference
    }
}

impl<T: Loggable> Loggable for [T] {
    fn shape(&self) -> Shape<'_> {
        T::slice_shape(self)
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn shape(&self) -> Shape<'_> {
        T::slice_shape(self)
    }

    fn kind() -> Kind {
        Kind::Array
    }
}

macro_rules! collections {
    ($($name:literal => $ty:ident),* $(,)?) => {
        $(
            impl<T: Loggable> Loggable for $ty<T> {
                fn shape(&self) -> Shape<'_> {
                    Shape::Collection($name, elements(self.iter()))
                }

                fn kind() -> Kind {
                    Kind::Collection
                }
            }
        )*
    };
}

collections! {
    "Vec" => Vec,
    "VecDeque" => VecDeque,
    "LinkedList" => LinkedList,
    "HashSet" => HashSet,
    "BTreeSet" => BTreeSet,
    "BinaryHeap" => BinaryHeap,
}

impl<K: Loggable, V: Loggable, S> Loggable for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map("HashMap", entries(self.iter()))
    }

    fn kind() -> Kind {
        Kind::Map
    }
}

impl<K: Loggable, V: Loggable> Loggable for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map("BTreeMap", entries(self.iter()))
    }

    fn kind() -> Kind {
        Kind::Map
    }
}

/// Renders anything that can be iterated by reference with the iterable
/// built-in. The label is the short name of the wrapped type, and the size is
/// counted while rendering.
/// ```
/// use alog::formatter::{FormatterRegistry, Iterable};
/// use std::collections::VecDeque;
///
/// let queue: VecDeque<u8> = (1..=3).collect();
/// let registry = FormatterRegistry::new();
/// assert_eq!(registry.render(&Iterable(&queue)), "VecDeque(size = 3) [1, 2, 3]");
/// ```
pub struct Iterable<'a, C: ?Sized>(pub &'a C);

impl<'a, C, T> Loggable for Iterable<'a, C>
where
    C: ?Sized,
    &'a C: IntoIterator<Item = &'a T>,
    <&'a C as IntoIterator>::IntoIter: 'a,
    T: Loggable + 'a,
{
    fn shape(&self) -> Shape<'_> {
        let items = self.0.into_iter().map(|item| item as &dyn Loggable);
        Shape::Iterable(short_type_name::<C>(), Box::new(items))
    }

    fn kind() -> Kind {
        Kind::Iterable
    }
}

/// Wraps a value so it renders through its `Display` impl.
pub fn display<T: fmt::Display + ?Sized>(value: &T) -> DisplayValue<'_, T> {
    DisplayValue(value)
}

/// Wraps a value so it renders through its `Debug` impl.
/// ```
/// #[derive(Debug)]
/// struct Point { x: i32 }
///
/// let registry = alog::formatter::FormatterRegistry::new();
/// assert_eq!(registry.render(&alog::formatter::debug(&Point { x: 1 })), "Point { x: 1 }");
/// ```
pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> DebugValue<'_, T> {
    DebugValue(value)
}

/// See [`display`].
pub struct DisplayValue<'a, T: ?Sized>(&'a T);

/// See [`debug`].
pub struct DebugValue<'a, T: ?Sized>(&'a T);

impl<T: fmt::Display + ?Sized> Loggable for DisplayValue<'_, T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Object(&self.0)
    }
}

impl<T: fmt::Debug + ?Sized> Loggable for DebugValue<'_, T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Debug(&self.0)
    }
}
