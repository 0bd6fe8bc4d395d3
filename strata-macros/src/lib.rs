//! strata-domain 的过程宏
//!
//! 展开结果以 `::strata_domain::...` 路径引用运行时类型，
//! 使用方只需依赖 `strata-domain`（其中重新导出了本 crate 的宏）。
//!
use proc_macro::TokenStream;

mod aggregate;
mod domain_event;
mod entity;
mod entity_id;
mod utils;
mod value_object;

/// 实体宏
/// - 确保字段 `id: IdType` 位于最前
/// - 实现 `Entity`，并按标识实现 `PartialEq`/`Eq`
/// - 参数：`#[entity(id = IdType, debug = true|false)]`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 聚合宏
/// - 确保字段 `root: AggregateRoot<IdType>` 位于最前
/// - 实现 `Entity`、`Aggregate`，并按标识实现 `PartialEq`/`Eq`
/// - 参数：`#[aggregate(id = IdType, debug = true|false)]`
#[proc_macro_attribute]
pub fn aggregate(attr: TokenStream, item: TokenStream) -> TokenStream {
    aggregate::expand(attr, item)
}

/// 实体 ID 宏
/// 用于单字段 tuple struct（例如 `struct OrderId(String);`），实现 `Identity`、
/// `Display`、`FromStr` 等
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
/// - 派生序列化，并以规范形态（序列化后的 JSON 值）实现值相等
/// - 参数：`#[value_object(debug = true|false, eq = true|false)]`
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}

/// 领域事件宏
/// - 补齐 `aggregate_id` 与 `occurred_at` 字段
/// - 实现 `DomainEvent<IdType>`（结构体另实现 `NamedEvent`）
/// - 参数：`#[domain_event(id = IdType, name = "...")]`
#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(attr, item)
}
