//! `alog` macros.

use proc_macro::TokenStream;

mod derive;

#[proc_macro_derive(Loggable, attributes(loggable))]
pub fn loggable(input: TokenStream) -> TokenStream {
    derive::loggable(input)
}
