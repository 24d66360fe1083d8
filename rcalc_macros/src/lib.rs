use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, PatType, Type};

fn integral_error_msg(fn_name: &str) -> String {
    format!("{}() only accepts integral values", fn_name)
}

/// Turns a function with typed scalar parameters into a callable over
/// `&[Scalar]` with a fixed argument count.
///
/// Supported parameter types are `f64`, `i64`, `bool` and `Scalar`. The
/// generated function expects `Scalar` and `CalcError` to be in scope.
#[proc_macro_attribute]
pub fn calc_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;
    let name_str = fn_name.to_string();

    let mut arg_extractions = Vec::new();

    for (i, arg) in fn_args.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return syn::Error::new_spanned(arg, "calc_fn does not take `self`")
                .to_compile_error()
                .into();
        };
        let arg_name = match **pat {
            syn::Pat::Ident(ref ident) => &ident.ident,
            _ => {
                return syn::Error::new_spanned(pat, "unsupported argument pattern")
                    .to_compile_error()
                    .into()
            }
        };

        let type_ident = match **ty {
            Type::Path(ref type_path) => type_path.path.segments.last().map(|s| &s.ident),
            _ => None,
        };
        let Some(type_ident) = type_ident else {
            return syn::Error::new_spanned(ty, "unsupported argument type")
                .to_compile_error()
                .into();
        };

        let extract_code = match type_ident.to_string().as_str() {
            "f64" => quote! {
                let #arg_name: f64 = args[#i].as_f64();
            },
            "i64" => {
                let err_msg = integral_error_msg(&name_str);
                quote! {
                    let #arg_name: i64 = args[#i]
                        .as_integer()
                        .ok_or_else(|| CalcError::Arithmetic(#err_msg.to_string()))?;
                }
            }
            "bool" => quote! {
                let #arg_name: bool = args[#i].is_truthy();
            },
            "Scalar" => quote! {
                let #arg_name: Scalar = args[#i];
            },
            other => {
                return syn::Error::new_spanned(ty, format!("unsupported argument type {}", other))
                    .to_compile_error()
                    .into()
            }
        };

        arg_extractions.push(extract_code);
    }

    let args_len = arg_extractions.len();
    let expanded = quote! {
        #vis fn #fn_name(args: &[Scalar]) #fn_output {
            if args.len() != #args_len {
                return Err(CalcError::ArgumentCount {
                    name: #name_str.to_string(),
                    given: args.len(),
                });
            }

            #(#arg_extractions)*

            #fn_body
        }
    };

    TokenStream::from(expanded)
}
