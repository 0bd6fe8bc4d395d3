//! 聚合（Aggregate）抽象
//!
//! 聚合是记录并延迟派发领域事件的事务边界：
//! - 通过 `Entity` 约束聚合具备标识，相等性只看标识；
//! - 事件只能经由聚合自身的可变方法记录（`&mut self`）；
//! - 事件的清除只发生在调度器成功派发之后，或显式调用 `clear_events`。
//!
//! 具体聚合通常用 `#[aggregate(id = ...)]` 生成 `root` 字段与本 trait 的实现。
//!
use std::sync::Arc;

use crate::aggregate_root::AggregateRoot;
use crate::domain_event::DomainEvent;
use crate::entity::Entity;

/// 聚合接口
pub trait Aggregate: Entity {
    /// 嵌入的聚合根组件
    fn root(&self) -> &AggregateRoot<Self::Id>;

    fn root_mut(&mut self) -> &mut AggregateRoot<Self::Id>;

    /// 待派发事件（按记录顺序）
    fn domain_events(&self) -> Vec<Arc<dyn DomainEvent<Self::Id>>> {
        self.root().domain_events()
    }

    /// 是否有尚未派发的事件
    fn has_pending_events(&self) -> bool {
        self.root().has_pending_events()
    }

    /// 记录事件，并在首次记录时把聚合登记到调度器
    fn add_domain_event<E>(&mut self, event: E)
    where
        E: DomainEvent<Self::Id>,
        Self: Sized,
    {
        self.root_mut().record(event);
    }

    fn clear_events(&mut self) {
        self.root_mut().clear_events();
    }

    fn current_user_using(&self) -> Option<&Self::Id> {
        self.root().current_user_using()
    }

    fn set_current_user_using(&mut self, user: Option<Self::Id>) {
        self.root_mut().set_current_user_using(user);
    }
}
