use alog::{FormatterRegistry, Loggable};
use std::error::Error;
use std::fmt;

#[derive(Debug, Loggable)]
struct OrderId(u32);

#[derive(Loggable)]
#[loggable(display)]
struct Sku(&'static str);

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SKU-{}", self.0)
    }
}

#[derive(Debug, Loggable)]
#[loggable(debug)]
enum State {
    Open,
    Closed { reason: String },
}

#[derive(Debug, Loggable)]
struct Pair<T>(T, T);

#[test]
fn derived_values_render() {
    let registry = FormatterRegistry::new();
    assert_eq!(registry.render(&OrderId(7)), "OrderId(7)");
    assert_eq!(registry.render(&Sku("A1")), "SKU-A1");
    assert_eq!(registry.render(&State::Open), "Open");
    assert_eq!(
        registry.render(&State::Closed {
            reason: "paid".to_owned()
        }),
        "Closed { reason: \"paid\" }"
    );
    assert_eq!(registry.render(&Pair(1, 2)), "Pair(1, 2)");
    assert_eq!(
        registry.render(&vec![OrderId(1), OrderId(2)]),
        "Vec(size = 2) [OrderId(1), OrderId(2)]"
    );
}

#[test]
fn derived_types_accept_overrides() -> Result<(), Box<dyn Error>> {
    let mut registry = FormatterRegistry::new();
    registry.register(|id: &OrderId, _: &FormatterRegistry| format!("#{}", id.0))?;
    assert_eq!(registry.render(&OrderId(7)), "#7");
    assert_eq!(registry.render(&&[OrderId(1), OrderId(2)][..]), "Array(size = 2) [#1, #2]");
    Ok(())
}
