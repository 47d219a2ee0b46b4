// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr, Type};

/// Marker and display options parsed from a field's `#[view_model(...)]`.
#[derive(Default)]
struct FieldOptions {
    export: bool,
    view: bool,
    own_export: bool,
    skip: bool,
    rename: Option<String>,
    display: Option<String>,
    singular: Option<String>,
    list_hint: Option<LitStr>,
    separator: Option<String>,
    option_display: Option<String>,
}

/// Options parsed from the struct's `#[view_model(...)]`.
#[derive(Default)]
struct ContainerOptions {
    name: Option<String>,
    metadata: Vec<Type>,
    display: Option<String>,
}

/// `#[derive(ViewModel)]` macro: implements `vmstub::Describe`
///
/// Registers the struct as a record in a `vmstub::Schema`, one member per
/// named field, in declaration order. Field types must implement `Describe`.
///
/// Field options (`#[view_model(...)]`):
/// - `export`: inclusion marker, the field appears in the generated stub
/// - `view`: field is shown in the rendered view
/// - `own_export`: field's type needs its own exported definition
/// - `rename = "..."`: emitted key (defaults to the field name)
/// - `display`, `singular`, `list_hint`, `separator`, `option_display`:
///   display metadata
/// - `skip`: leave the field out of the schema entirely
///
/// Struct options: `name = "..."` (schema name, defaults to the struct
/// name), `metadata = Companion` (take members from another type),
/// `display = "..."`.
///
/// # Panics
///
/// Never panics; unsupported input (enums, unions, tuple structs, generic
/// structs, unknown options) is reported as a compile error.
///
/// Example:
/// ```ignore
/// use vmstub::ViewModel;
///
/// #[derive(ViewModel)]
/// struct Person {
///     #[view_model(export)]
///     name: String,
///     #[view_model(export, rename = "birthDate")]
///     birth_date: chrono::NaiveDate,
///     #[view_model(export, display = "Tags", list_hint = "use_separator")]
///     tags: Vec<String>,
/// }
/// ```
#[proc_macro_derive(ViewModel, attributes(view_model))]
pub fn derive_view_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ViewModel cannot be derived for generic types",
        ));
    }

    let container = parse_container_options(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            Fields::Unit => return expand_record(input, &container, Vec::new()),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let mut members = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        let key = options
            .rename
            .clone()
            .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string());
        members.push((key, field.ty.clone(), options));
    }

    expand_record(input, &container, members)
}

fn expand_record(
    input: &DeriveInput,
    container: &ContainerOptions,
    members: Vec<(String, Type, FieldOptions)>,
) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let type_name = container
        .name
        .clone()
        .unwrap_or_else(|| ident.to_string());

    let member_defs: Vec<TokenStream2> = members
        .iter()
        .map(|(key, ty, options)| member_tokens(key, ty, options))
        .collect::<syn::Result<_>>()?;
    let member_tys: Vec<&Type> = members.iter().map(|(_, ty, _)| ty).collect();
    let metadata = &container.metadata;

    let type_display = container.display.as_ref().map(|name| {
        quote! { .with_display(::vmstub::ViewDisplay::new(#name)) }
    });

    Ok(quote! {
        impl ::vmstub::Describe for #ident {
            fn type_ref() -> ::vmstub::TypeRef {
                ::vmstub::TypeRef::named(#type_name)
            }

            fn register(schema: &mut ::vmstub::Schema) {
                // Defined before its members so recursive types terminate.
                if schema.contains(#type_name) {
                    return;
                }
                schema.define(
                    ::vmstub::TypeDef::record(#type_name)
                        #(.with_member(#member_defs))*
                        #(.with_metadata(<#metadata as ::vmstub::Describe>::type_ref().name()))*
                        #type_display
                );
                #(<#member_tys as ::vmstub::Describe>::register(schema);)*
                #(<#metadata as ::vmstub::Describe>::register(schema);)*
            }
        }
    })
}

fn member_tokens(key: &str, ty: &Type, options: &FieldOptions) -> syn::Result<TokenStream2> {
    let mut markers = Vec::new();
    if options.export {
        markers.push(quote! { ::vmstub::Marker::ExportToViewModel });
    }
    if options.view {
        markers.push(quote! { ::vmstub::Marker::ExportToView });
    }
    if options.own_export {
        markers.push(quote! { ::vmstub::Marker::RequiresOwnExport });
    }

    let display = match &options.display {
        Some(name) => {
            let singular = options
                .singular
                .as_ref()
                .map(|s| quote! { .with_singular(#s) });
            let list_hint = options
                .list_hint
                .as_ref()
                .map(list_hint_tokens)
                .transpose()?
                .map(|hint| quote! { .with_list_hint(#hint) });
            let separator = options
                .separator
                .as_ref()
                .map(|s| quote! { .with_separator(#s) });
            let option_display = options
                .option_display
                .as_ref()
                .map(|s| quote! { .with_option_display(#s) });
            Some(quote! {
                .with_display(
                    ::vmstub::ViewDisplay::new(#name)
                        #singular
                        #list_hint
                        #separator
                        #option_display
                )
            })
        }
        None => {
            let orphan = options
                .singular
                .is_some()
                || options.list_hint.is_some()
                || options.separator.is_some()
                || options.option_display.is_some();
            if orphan {
                return Err(syn::Error::new(
                    proc_macro2::Span::call_site(),
                    format!("field `{key}`: display options require `display = \"...\"`"),
                ));
            }
            None
        }
    };

    Ok(quote! {
        ::vmstub::MemberDef::new(#key, <#ty as ::vmstub::Describe>::type_ref())
            #(.with_marker(#markers))*
            #display
    })
}

fn list_hint_tokens(hint: &LitStr) -> syn::Result<TokenStream2> {
    match hint.value().as_str() {
        "unused" => Ok(quote! { ::vmstub::ListHint::Unused }),
        "one_per_line" => Ok(quote! { ::vmstub::ListHint::OnePerLine }),
        "use_separator" => Ok(quote! { ::vmstub::ListHint::UseSeparator }),
        other => Err(syn::Error::new_spanned(
            hint,
            format!("Unsupported list_hint `{other}`. Expected unused, one_per_line or use_separator."),
        )),
    }
}

fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("view_model")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("export") {
                options.export = true;
            } else if meta.path.is_ident("view") {
                options.view = true;
            } else if meta.path.is_ident("own_export") {
                options.own_export = true;
            } else if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("rename") {
                options.rename = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("display") {
                options.display = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("singular") {
                options.singular = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("separator") {
                options.separator = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("option_display") {
                options.option_display = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("list_hint") {
                options.list_hint = Some(meta.value()?.parse::<LitStr>()?);
            } else {
                return Err(meta.error("unsupported view_model field option"));
            }
            Ok(())
        })?;
    }
    Ok(options)
}

fn parse_container_options(attrs: &[Attribute]) -> syn::Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("view_model")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                options.name = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("metadata") {
                options.metadata.push(meta.value()?.parse::<Type>()?);
            } else if meta.path.is_ident("display") {
                options.display = Some(meta.value()?.parse::<LitStr>()?.value());
            } else {
                return Err(meta.error("unsupported view_model container option"));
            }
            Ok(())
        })?;
    }
    Ok(options)
}
