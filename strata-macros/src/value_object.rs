use crate::utils::{AttrArgs, apply_derives, serde_crate_attr, serde_derives};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Generics, Ident, Item, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并/追加派生：Clone, (Debug 可控), Serialize, Deserialize
/// - 单字段 tuple struct 加上 `#[serde(transparent)]`，嵌套时序列化为内部载荷
/// - 默认实现 `ValueObject`，并以 `ValueObject::equals` 实现 `PartialEq`/`Eq`
/// - 参数：`debug = true|false`（默认 true）、`eq = true|false`（默认 true，
///   为 false 时由使用方自行实现 `ValueObject` 与 `PartialEq`）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as AttrArgs);
    let cfg = match cfg.only(&["debug", "eq"], proc_macro2::Span::call_site()) {
        Ok(cfg) => cfg,
        Err(err) => return err.to_compile_error().into(),
    };
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = vec![syn::parse_quote!(Clone)];
    if cfg.debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    required.extend(serde_derives());

    let derive_eq = cfg.eq.unwrap_or(true);

    match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            st.attrs.push(serde_crate_attr());
            if matches!(&st.fields, syn::Fields::Unnamed(f) if f.unnamed.len() == 1) {
                st.attrs.push(syn::parse_quote!(#[serde(transparent)]));
            }
            let impls = derive_eq.then(|| value_impls(&st.ident, &st.generics));
            TokenStream::from(quote! { #st #impls })
        }
        Item::Enum(en) => {
            apply_derives(&mut en.attrs, required);
            en.attrs.push(serde_crate_attr());
            let impls = derive_eq.then(|| value_impls(&en.ident, &en.generics));
            TokenStream::from(quote! { #en #impls })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}

fn value_impls(ident: &Ident, generics: &Generics) -> proc_macro2::TokenStream {
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    let mut bounded = generics.clone();
    bounded
        .make_where_clause()
        .predicates
        .push(syn::parse_quote!(#ident #ty_generics: ::strata_domain::serde::Serialize));
    let where_clause = &bounded.where_clause;

    quote! {
        impl #impl_generics ::strata_domain::value_object::ValueObject for #ident #ty_generics #where_clause {}

        impl #impl_generics ::core::cmp::PartialEq for #ident #ty_generics #where_clause {
            fn eq(&self, other: &Self) -> bool {
                ::strata_domain::value_object::ValueObject::equals(self, other)
            }
        }

        impl #impl_generics ::core::cmp::Eq for #ident #ty_generics #where_clause {}
    }
}
