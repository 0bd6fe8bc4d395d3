use crate::utils::{AttrArgs, apply_derives, ensure_required_fields};
use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, ItemEnum, ItemStruct, LitStr, Result, Token, Type, parse_macro_input};

/// #[domain_event] 宏实现
/// - 结构体：确保字段 `aggregate_id: IdType`、`occurred_at: DateTime<Utc>` 存在（缺失时追加在最前）；
///   实现 `NamedEvent`（`name` 默认取类型名）与 `DomainEvent<IdType>`
/// - 枚举：仅支持具名字段变体，每个变体同样补齐上述字段；
///   种类名称默认 `Enum.Variant`，可用变体上的 `#[event(name = "...")]` 覆写
/// - 合并/追加派生：Debug, Clone
/// - 参数：`#[domain_event(id = IdType, name = "...")]`，`id` 默认 `UniqueEntityId`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as AttrArgs);
    let cfg = match cfg.only(&["id", "name"], proc_macro2::Span::call_site()) {
        Ok(cfg) => cfg,
        Err(err) => return err.to_compile_error().into(),
    };
    let input = parse_macro_input!(item as Item);

    let id_type: Type = cfg
        .id
        .unwrap_or_else(|| syn::parse_quote! { ::strata_domain::id::UniqueEntityId });
    let at_type: Type = syn::parse_quote! {
        ::strata_domain::chrono::DateTime<::strata_domain::chrono::Utc>
    };

    let result = match input {
        Item::Struct(st) => expand_struct(st, &id_type, &at_type, cfg.name),
        Item::Enum(en) => match cfg.name {
            Some(name) => Err(syn::Error::new(
                name.span(),
                "'name' is not allowed on enums; use #[event(name = \"...\")] on variants",
            )),
            None => expand_enum(en, &id_type, &at_type),
        },
        other => Err(syn::Error::new(
            other.span(),
            "#[domain_event] only supports struct or enum",
        )),
    };

    match result {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn required_derives() -> Vec<syn::Path> {
    vec![syn::parse_quote!(Debug), syn::parse_quote!(Clone)]
}

fn expand_struct(
    mut st: ItemStruct,
    id_type: &Type,
    at_type: &Type,
    name: Option<LitStr>,
) -> Result<proc_macro2::TokenStream> {
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return Err(syn::Error::new(
                st.span(),
                "#[domain_event] supports only named-field structs",
            ));
        }
    };

    ensure_required_fields(
        fields_named,
        &[("aggregate_id", id_type), ("occurred_at", at_type)],
        /*reposition_existing*/ false,
    );
    apply_derives(&mut st.attrs, required_derives());

    let ident = &st.ident;
    let name = name.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    Ok(quote! {
        #st

        impl #impl_generics ::strata_domain::domain_event::NamedEvent for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }

        impl #impl_generics ::strata_domain::domain_event::DomainEvent<#id_type> for #ident #ty_generics #where_clause {
            fn event_name(&self) -> &'static str {
                <Self as ::strata_domain::domain_event::NamedEvent>::NAME
            }

            fn occurred_at(&self) -> #at_type { self.occurred_at }

            fn aggregate_id(&self) -> &#id_type { &self.aggregate_id }

            fn as_any(&self) -> &dyn ::std::any::Any { self }
        }
    })
}

fn expand_enum(
    mut en: ItemEnum,
    id_type: &Type,
    at_type: &Type,
) -> Result<proc_macro2::TokenStream> {
    apply_derives(&mut en.attrs, required_derives());

    // 变体 -> 自定义事件种类名
    let mut variant_names: HashMap<String, LitStr> = HashMap::new();

    for v in &mut en.variants {
        let fields_named = match &mut v.fields {
            syn::Fields::Named(f) => f,
            _ => {
                return Err(syn::Error::new(
                    v.span(),
                    "#[domain_event] supports only named-field enum variants, e.g., Variant { x: T }",
                ));
            }
        };
        ensure_required_fields(
            fields_named,
            &[("aggregate_id", id_type), ("occurred_at", at_type)],
            /*reposition_existing*/ false,
        );

        let mut retained_attrs = Vec::new();
        for attr in v.attrs.iter() {
            if !attr.path().is_ident("event") {
                retained_attrs.push(attr.clone());
                continue;
            }
            let lit = parse_variant_name(attr)?;
            if variant_names.insert(v.ident.to_string(), lit).is_some() {
                return Err(syn::Error::new(
                    attr.span(),
                    "duplicate 'name' specified for this variant",
                ));
            }
        }
        v.attrs = retained_attrs;
    }

    let enum_ident = &en.ident;
    let enum_name = enum_ident.to_string();
    let name_arms = en.variants.iter().map(|v| {
        let v_ident = &v.ident;
        let key = v_ident.to_string();
        let lit = variant_names
            .get(&key)
            .cloned()
            .unwrap_or_else(|| LitStr::new(&format!("{enum_name}.{key}"), v_ident.span()));
        quote! { Self::#v_ident { .. } => #lit }
    });
    let at_arms = en.variants.iter().map(|v| {
        let v_ident = &v.ident;
        quote! { Self::#v_ident { occurred_at, .. } => *occurred_at }
    });
    let id_arms = en.variants.iter().map(|v| {
        let v_ident = &v.ident;
        quote! { Self::#v_ident { aggregate_id, .. } => aggregate_id }
    });
    let (impl_generics, ty_generics, where_clause) = en.generics.split_for_impl();

    Ok(quote! {
        #en

        impl #impl_generics ::strata_domain::domain_event::DomainEvent<#id_type> for #enum_ident #ty_generics #where_clause {
            fn event_name(&self) -> &'static str {
                match self { #( #name_arms, )* }
            }

            fn occurred_at(&self) -> #at_type {
                match self { #( #at_arms, )* }
            }

            fn aggregate_id(&self) -> &#id_type {
                match self { #( #id_arms, )* }
            }

            fn as_any(&self) -> &dyn ::std::any::Any { self }
        }
    })
}

// 解析变体级 #[event(name = "...")]
fn parse_variant_name(attr: &syn::Attribute) -> Result<LitStr> {
    let pairs = attr.parse_args_with(Punctuated::<syn::MetaNameValue, Token![,]>::parse_terminated)?;
    let mut name: Option<LitStr> = None;
    for kv in pairs {
        if !kv.path.is_ident("name") {
            return Err(syn::Error::new(kv.path.span(), "unknown key; expected 'name'"));
        }
        let lit = match kv.value {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            }) => lit,
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "expected string literal for 'name'",
                ));
            }
        };
        if name.replace(lit).is_some() {
            return Err(syn::Error::new(kv.path.span(), "duplicate key 'name' in attribute"));
        }
    }
    name.ok_or_else(|| syn::Error::new(attr.span(), "expected #[event(name = \"...\")]"))
}
