use crate::utils::{AttrArgs, apply_derives, ensure_required_fields};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Type, parse_macro_input};

/// #[aggregate] 宏实现
/// - 确保字段 `root: AggregateRoot<IdType>` 存在并置于字段最前
/// - 实现 `Entity`（标识取自 root）与 `Aggregate`，并按标识实现 `PartialEq`/`Eq`
/// - 支持参数：`#[aggregate(id = IdType, debug = true|false)]`，`id` 默认 `UniqueEntityId`
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
            return syn::Error::new(other.span(), "#[aggregate] only on struct")
                .to_compile_error()
                .into();
        }
    };

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
    let root_type: Type =
        syn::parse_quote! { ::strata_domain::aggregate_root::AggregateRoot<#id_type> };

    ensure_required_fields(fields_named, &[("root", &root_type)], /*reposition_existing*/ true);

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

            fn id(&self) -> &Self::Id { self.root.id() }
        }

        impl #impl_generics ::strata_domain::aggregate::Aggregate for #ident #ty_generics #where_clause {
            fn root(&self) -> &#root_type { &self.root }

            fn root_mut(&mut self) -> &mut #root_type { &mut self.root }
        }

        impl #impl_generics ::core::cmp::PartialEq for #ident #ty_generics #where_clause {
            fn eq(&self, other: &Self) -> bool { self.root.id() == other.root.id() }
        }

        impl #impl_generics ::core::cmp::Eq for #ident #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}
