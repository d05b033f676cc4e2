//! printf-style interpolation of log messages.
//!
//! Supported conversions are `%s` `%S` `%d` `%x` `%X` `%o` `%f` `%e` `%E`
//! `%b` `%B` `%c` `%C` plus `%n` and `%%`, with the `-`, `0` and `+` flags,
//! a width, a precision and explicit argument indices such as `%2$s`.
//!
//! ```
//! use alog::formatter::FormatterRegistry;
//! use alog::printf::format;
//!
//! let registry = FormatterRegistry::new();
//! assert_eq!(format("Message %s, %d", &[&"title", &100], &registry), "Message title, 100");
//! assert_eq!(format("%2$s %1$s", &[&"world", &"hello"], &registry), "hello world");
//! assert_eq!(format("[%5.1f]", &[&3.14159], &registry), "[  3.1]");
//! ```
//!
//! `%s` renders through the [`FormatterRegistry`]. Numeric conversions of a
//! non-numeric argument fall back to `%s`. A conversion without a matching
//! argument is emitted verbatim, and a pattern with no arguments at all is
//! returned unchanged.
use crate::formatter::primitive::Radix;
use crate::formatter::{FormatterRegistry, Loggable, Primitive, Shape};

const CONVERSIONS: &str = "sSdxXofeEbBcC";
const DEFAULT_PRECISION: usize = 6;

/// Interpolates `args` into `pattern`.
pub fn format(pattern: &str, args: &[&dyn Loggable], registry: &FormatterRegistry) -> String {
    if args.is_empty() {
        return pattern.to_owned();
    }

    let mut out = String::with_capacity(pattern.len() + 16 * args.len());
    let mut next = 0;
    let mut rest = pattern;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match Spec::parse(tail) {
            Some((spec, len)) => {
                spec.write(&tail[..len], args, &mut next, registry, &mut out);
                rest = &tail[len..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Default)]
struct Spec {
    index: Option<usize>,
    left: bool,
    zero: bool,
    plus: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

fn digits(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |n| from + n)
}

impl Spec {
    /// Parses a specifier at the start of `s`, which begins with `%`.
    /// Returns the specifier and its length in bytes.
    fn parse(s: &str) -> Option<(Spec, usize)> {
        let bytes = s.as_bytes();
        let mut spec = Spec::default();
        let mut i = 1;

        let end = digits(bytes, i);
        if end > i && bytes.get(end) == Some(&b'$') {
            spec.index = s[i..end].parse().ok();
            i = end + 1;
        }

        while let Some(&b) = bytes.get(i) {
            match b {
                b'-' => spec.left = true,
                b'0' => spec.zero = true,
                b'+' => spec.plus = true,
                b' ' | b'#' | b',' | b'(' => {}
                _ => break,
            }
            i += 1;
        }

        let end = digits(bytes, i);
        if end > i {
            spec.width = s[i..end].parse().ok();
            i = end;
        }

        if bytes.get(i) == Some(&b'.') {
            let end = digits(bytes, i + 1);
            spec.precision = Some(s[i + 1..end].parse().unwrap_or(0));
            i = end;
        }

        match bytes.get(i) {
            Some(&b) if b.is_ascii_alphabetic() || b == b'%' => {
                spec.conversion = char::from(b);
                Some((spec, i + 1))
            }
            _ => None,
        }
    }

    fn write(
        &self,
        raw: &str,
        args: &[&dyn Loggable],
        next: &mut usize,
        registry: &FormatterRegistry,
        out: &mut String,
    ) {
        match self.conversion {
            '%' => return self.pad("%", false, out),
            'n' => return out.push('\n'),
            c if !CONVERSIONS.contains(c) => return out.push_str(raw),
            _ => {}
        }

        let arg = match self.index {
            Some(n) => n.checked_sub(1).and_then(|i| args.get(i)),
            None => {
                *next += 1;
                args.get(*next - 1)
            }
        };
        let arg = match arg {
            Some(arg) => *arg,
            None => return out.push_str(raw),
        };

        match self.convert(arg) {
            Some(text) => self.pad(&text, true, out),
            None => self.pad(&self.string(arg, registry), false, out),
        }
    }

    /// Applies a non-string conversion, or returns `None` if the argument
    /// does not fit it.
    fn convert(&self, arg: &dyn Loggable) -> Option<String> {
        let shape = arg.shape();
        let primitive = match &shape {
            Shape::Primitive(p) => Some(*p),
            _ => None,
        };

        let text = match self.conversion {
            'd' => self.signed(primitive?.to_radix(Radix::Decimal)?),
            'o' => primitive?.to_radix(Radix::Octal)?,
            'x' => primitive?.to_radix(Radix::LowerHex)?,
            'X' => primitive?.to_radix(Radix::UpperHex)?,
            'f' => {
                let v = primitive?.to_f64()?;
                self.signed(format!("{:.*}", self.precision.unwrap_or(DEFAULT_PRECISION), v))
            }
            'e' | 'E' => {
                let v = primitive?.to_f64()?;
                let text = self.signed(exponent(v, self.precision.unwrap_or(DEFAULT_PRECISION)));
                if self.conversion == 'E' {
                    text.to_uppercase()
                } else {
                    text
                }
            }
            'b' | 'B' => {
                let text = match shape {
                    Shape::Null => "false".to_owned(),
                    Shape::Primitive(Primitive::Bool(b)) => b.to_string(),
                    _ => "true".to_owned(),
                };
                return Some(self.case(text));
            }
            'c' | 'C' => return Some(self.case(primitive?.to_char()?.to_string())),
            _ => return None,
        };
        Some(text)
    }

    fn string(&self, arg: &dyn Loggable, registry: &FormatterRegistry) -> String {
        let mut text = registry.render(arg);
        if let Some(precision) = self.precision {
            if let Some((cut, _)) = text.char_indices().nth(precision) {
                text.truncate(cut);
            }
        }
        if self.conversion.is_ascii_uppercase() {
            text.to_uppercase()
        } else {
            text
        }
    }

    fn case(&self, text: String) -> String {
        if self.conversion.is_ascii_uppercase() {
            text.to_uppercase()
        } else {
            text
        }
    }

    fn signed(&self, text: String) -> String {
        if self.plus && !text.starts_with('-') {
            format!("+{}", text)
        } else {
            text
        }
    }

    fn pad(&self, text: &str, numeric: bool, out: &mut String) {
        let len = text.chars().count();
        let width = match self.width {
            Some(width) if width > len => width,
            _ => return out.push_str(text),
        };
        let fill = width - len;

        if self.left {
            out.push_str(text);
            out.extend(std::iter::repeat(' ').take(fill));
        } else if self.zero && numeric {
            let (sign, digits) = match text.strip_prefix(['-', '+']) {
                Some(digits) => text.split_at(text.len() - digits.len()),
                None => ("", text),
            };
            out.push_str(sign);
            out.extend(std::iter::repeat('0').take(fill));
            out.push_str(digits);
        } else {
            out.extend(std::iter::repeat(' ').take(fill));
            out.push_str(text);
        }
    }
}

/// Scientific notation with a signed, two-digit exponent: `1.500000e+02`.
fn exponent(v: f64, precision: usize) -> String {
    let text = format!("{:.*e}", precision, v);
    match text.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.abs()
            ),
            Err(_) => text,
        },
        None => text,
    }
}
