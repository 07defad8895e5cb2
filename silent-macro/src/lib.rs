//! # silent-macro
//!
//! This crate provides the `#[silent]` attribute macro, which turns a function
//! returning `Result<T, E>` into one returning `T` by running its body through
//! `SilentTry::exec`.
//!
//! See the main `silent` crate for usage examples.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use silent_core::LogLevel;
use syn::{
    Expr, GenericArgument, Ident, ItemFn, LitBool, LitStr, PathArguments, ReturnType, Token, Type,
    parse::Parse, parse_macro_input, spanned::Spanned,
};

fn extract_result_ok_type(return_type: &ReturnType) -> Option<&Type> {
    if let ReturnType::Type(_, ty) = return_type
        && let Type::Path(type_path) = &**ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Result"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && (1..=2).contains(&args.args.len())
        && let Some(GenericArgument::Type(ok_type)) = args.args.first()
    {
        return Some(ok_type);
    }
    None
}

struct SilentAttrs {
    fallback: Option<Expr>,
    message: Option<LitStr>,
    level: Option<(LogLevel, Span)>,
    quiet: bool,
}

impl Parse for SilentAttrs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut attrs = SilentAttrs {
            fallback: None,
            message: None,
            level: None,
            quiet: false,
        };

        if input.is_empty() {
            return Ok(attrs);
        }

        loop {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match key.to_string().as_str() {
                "fallback" => {
                    attrs.fallback = Some(input.parse()?);
                }
                "message" => {
                    attrs.message = Some(input.parse()?);
                }
                "level" => {
                    let lit: LitStr = input.parse()?;
                    let level = lit
                        .value()
                        .parse::<LogLevel>()
                        .map_err(|err| syn::Error::new(lit.span(), err))?;
                    attrs.level = Some((level, lit.span()));
                }
                "quiet" => {
                    let lit: LitBool = input.parse()?;
                    attrs.quiet = lit.value;
                }
                _ => {
                    return Err(syn::Error::new(key.span(), "unknown attribute"));
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
        }

        Ok(attrs)
    }
}

/// Run a function body through `SilentTry` so it never fails.
///
/// The function must return `Result<T, E>` with `E: IntoFault`, and the
/// calling crate must depend on `silent`. The return type becomes `T`: the
/// `Ok` value on success, the fallback on any error or panic. The fallback is
/// evaluated before the body runs. The fault is logged exactly as
/// `SilentTry::exec` would log it; errors other than `Fault` are located at
/// the annotated function.
///
/// # Attributes
///
/// - `fallback = <expr>` - Value returned on failure (default: `Default::default()`)
/// - `message = "..."` - Label logged as `[custom_msg:...]`
/// - `level = "..."` - One of the eight level names, checked at compile time
/// - `quiet = true/false` - Skip logging, like `simple_exec`
///
/// # Examples
///
/// ```rust,ignore
/// use silent::{silent, Fault};
///
/// #[silent(fallback = 0, message = "parsing quantity", level = "warning")]
/// fn quantity(input: &str) -> Result<u32, Fault> {
///     Ok(input.trim().parse()?)
/// }
///
/// assert_eq!(quantity(" 12 "), 12);
/// assert_eq!(quantity("twelve"), 0);
/// ```
#[proc_macro_attribute]
pub fn silent(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = parse_macro_input!(attr as SilentAttrs);
    let input = parse_macro_input!(item as ItemFn);

    let ItemFn {
        attrs: fn_attrs,
        vis,
        sig,
        block,
    } = input;

    if let Some(asyncness) = sig.asyncness {
        return syn::Error::new(asyncness.span(), "#[silent] does not support async functions")
            .to_compile_error()
            .into();
    }

    let ReturnType::Type(_, result_type) = &sig.output else {
        return syn::Error::new(sig.span(), "#[silent] requires a function returning Result<T, E>")
            .to_compile_error()
            .into();
    };
    let Some(ok_type) = extract_result_ok_type(&sig.output) else {
        return syn::Error::new(result_type.span(), "#[silent] requires a Result<T, E> return type")
            .to_compile_error()
            .into();
    };

    let mut new_sig = sig.clone();
    new_sig.output = syn::parse_quote! { -> #ok_type };

    let message = attrs.message.map(|msg| quote! { .with_message(#msg) });
    let level = attrs.level.map(|(level, span)| {
        let variant = Ident::new(&format!("{level:?}"), span);
        quote! { .with_level(::silent::silent_core::LogLevel::#variant) }
    });
    let fallback = attrs
        .fallback
        .map(|expr| quote! { #expr })
        .unwrap_or_else(|| quote! { ::core::default::Default::default() });
    let run = if attrs.quiet {
        quote! { simple_exec }
    } else {
        quote! { exec }
    };

    let expanded = quote! {
        #(#fn_attrs)*
        #vis #new_sig {
            let __silent_fallback = #fallback;
            ::silent::attempt()
                #message
                #level
                .#run(move |_| -> #result_type #block, __silent_fallback)
        }
    };

    expanded.into()
}
