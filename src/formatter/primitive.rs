use super::{Kind, Loggable, Shape};
use std::fmt;

macro_rules! primitives {
    ($($variant:ident($ty:ty) as $fmt:literal),* $(,)?) => {
        /// A primitive value, copied out of the logged value.
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub enum Primitive {
            $($variant($ty)),*
        }

        /// A borrowed slice of primitives.
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub enum PrimitiveSlice<'a> {
            $($variant(&'a [$ty])),*
        }

        impl fmt::Display for Primitive {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Primitive::$variant(v) => write!(f, $fmt, v)),*
                }
            }
        }

        impl<'a> PrimitiveSlice<'a> {
            pub fn len(&self) -> usize {
                match self {
                    $(PrimitiveSlice::$variant(items) => items.len()),*
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            pub fn iter(&self) -> Box<dyn Iterator<Item = Primitive> + 'a> {
                match *self {
                    $(PrimitiveSlice::$variant(items) => {
                        Box::new(items.iter().map(|v| Primitive::$variant(*v)))
                    }),*
                }
            }
        }

        $(
            impl Loggable for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Primitive(Primitive::$variant(*self))
                }

                fn kind() -> Kind {
                    Kind::Primitive
                }

                fn slice_shape(items: &[Self]) -> Shape<'_> {
                    Shape::PrimitiveArray(PrimitiveSlice::$variant(items))
                }
            }
        )*
    };
}

primitives! {
    Bool(bool) as "{}",
    Char(char) as "{}",
    I8(i8) as "{}",
    I16(i16) as "{}",
    I32(i32) as "{}",
    I64(i64) as "{}",
    I128(i128) as "{}",
    Isize(isize) as "{}",
    U8(u8) as "{}",
    U16(u16) as "{}",
    U32(u32) as "{}",
    U64(u64) as "{}",
    U128(u128) as "{}",
    Usize(usize) as "{}",
    // `Debug` keeps the fractional part, so `1.0` does not print as `1`
    F32(f32) as "{:?}",
    F64(f64) as "{:?}",
}

macro_rules! integral {
    ($value:expr, $v:ident => $e:expr) => {
        match $value {
            Primitive::I8($v) => Some($e),
            Primitive::I16($v) => Some($e),
            Primitive::I32($v) => Some($e),
            Primitive::I64($v) => Some($e),
            Primitive::I128($v) => Some($e),
            Primitive::Isize($v) => Some($e),
            Primitive::U8($v) => Some($e),
            Primitive::U16($v) => Some($e),
            Primitive::U32($v) => Some($e),
            Primitive::U64($v) => Some($e),
            Primitive::U128($v) => Some($e),
            Primitive::Usize($v) => Some($e),
            _ => None,
        }
    };
}

/// Integer bases understood by [`Primitive::to_radix`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Radix {
    Decimal,
    Octal,
    LowerHex,
    UpperHex,
}

impl Primitive {
    /// Formats an integer in the given base. Negative values use their two's
    /// complement representation for every base but decimal.
    pub(crate) fn to_radix(self, radix: Radix) -> Option<String> {
        integral!(self, v => match radix {
            Radix::Decimal => v.to_string(),
            Radix::Octal => format!("{:o}", v),
            Radix::LowerHex => format!("{:x}", v),
            Radix::UpperHex => format!("{:X}", v),
        })
    }

    pub(crate) fn to_f64(self) -> Option<f64> {
        match self {
            Primitive::F32(v) => Some(f64::from(v)),
            Primitive::F64(v) => Some(v),
            other => integral!(other, v => v as f64),
        }
    }

    pub(crate) fn to_char(self) -> Option<char> {
        match self {
            Primitive::Char(c) => Some(c),
            other => integral!(other, v => v as i128)
                .and_then(|code| u32::try_from(code).ok())
                .and_then(char::from_u32),
        }
    }
}
