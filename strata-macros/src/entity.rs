use crate::utils::{AttrArgs, apply_derives, ensure_required_fields};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Type, parse_macro_input};

/// #[entity] 宏实现
/// - 确保字段 `id: IdType` 存在并置于字段最前
/// - 自动实现 `::strata_domain::entity::Entity`，并按标识实现 `PartialEq`/`Eq`
/// - 支持参数：`#[entity(id = IdType, debug = true|false)]`；
///   - `id` 默认 `::strata_domain::id::UniqueEntityId`
///   - `debug` 默认 `true`（派生 Debug）。当为 `false` 时不派生 Debug，便于用户自定义实现。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as AttrArgs);
    let cfg = match cfg.only(&["id", "debug"], proc_macro2::Span::call_site()) {
        Ok(cfg) => cfg,
        Err(err) => return err.to_compile_error().into(),
    };
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    // 仅支持具名字段结构体
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type: Type = cfg
        .id
        .unwrap_or_else(|| syn::parse_quote! { ::strata_domain::id::UniqueEntityId });

    ensure_required_fields(fields_named, &[("id", &id_type)], /*reposition_existing*/ true);

    if cfg.debug.unwrap_or(true) {
        apply_derives(&mut st.attrs, vec![syn::parse_quote!(Debug)]);
    }

    let ident = &st.ident;
    let generics = st.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::strata_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn id(&self) -> &Self::Id { &self.id }
        }

        impl #impl_generics ::core::cmp::PartialEq for #ident #ty_generics #where_clause {
            fn eq(&self, other: &Self) -> bool { self.id == other.id }
        }

        impl #impl_generics ::core::cmp::Eq for #ident #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}
