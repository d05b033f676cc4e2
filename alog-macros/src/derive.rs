use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

pub fn loggable(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    impl_loggable(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

#[derive(Clone, Copy)]
enum Render {
    Debug,
    Display,
}

fn parse_render(attrs: &[syn::Attribute]) -> syn::Result<Render> {
    let mut render = None;

    for attr in attrs.iter() {
        if !attr.path.is_ident("loggable") {
            continue;
        }

        if render.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "cannot have multiple #[loggable(...)] attributes on same item",
            ));
        }

        let list = match attr.parse_meta()? {
            syn::Meta::List(list) if list.nested.len() == 1 => list,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "#[loggable(..)] expects exactly one argument, try #[loggable(display)]",
                ))
            }
        };

        render = match &list.nested[0] {
            syn::NestedMeta::Meta(syn::Meta::Path(path)) if path.is_ident("debug") => {
                Some(Render::Debug)
            }
            syn::NestedMeta::Meta(syn::Meta::Path(path)) if path.is_ident("display") => {
                Some(Render::Display)
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "unknown argument, expected either `debug` or `display`",
                ))
            }
        };
    }

    Ok(render.unwrap_or(Render::Debug))
}

fn impl_loggable(input: &syn::DeriveInput) -> syn::Result<TokenStream2> {
    let render = parse_render(&input.attrs)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (shape, bound) = match render {
        Render::Debug => (
            quote! { ::alog::Shape::Debug(self) },
            quote! { ::core::fmt::Debug },
        ),
        Render::Display => (
            quote! { ::alog::Shape::Object(self) },
            quote! { ::core::fmt::Display },
        ),
    };

    // Overrides are keyed by `TypeId`, which needs `'static`.
    if input.generics.params.is_empty() {
        Ok(quote! {
            impl ::alog::Loggable for #name {
                fn shape(&self) -> ::alog::Shape<'_> {
                    #shape
                }

                fn as_any(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                    ::core::option::Option::Some(self)
                }
            }
        })
    } else {
        let predicates = where_clause.map(|clause| &clause.predicates);
        Ok(quote! {
            impl #impl_generics ::alog::Loggable for #name #ty_generics
            where
                Self: #bound,
                #predicates
            {
                fn shape(&self) -> ::alog::Shape<'_> {
                    #shape
                }
            }
        })
    }
}
