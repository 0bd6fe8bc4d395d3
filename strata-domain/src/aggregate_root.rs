//! 聚合根组件（AggregateRoot）
//!
//! 以组合方式嵌入具体聚合，负责：
//! - 保存聚合标识；
//! - 按记录顺序保存待派发的领域事件；
//! - 首次记录事件时把聚合登记到调度器（之后的记录不会重复登记）；
//! - 保存“当前使用者”标记（仅作提示，不是互斥锁）。
//!
//! 事件队列与调度器共享：派发成功后调度器清空队列，聚合上的
//! `domain_events()` 随即为空。
//!
use std::fmt;
use std::sync::Arc;

use crate::domain_event::{DomainEvent, DomainEvents, PendingEvents};
use crate::id::Identity;

/// 嵌入聚合的事件记录组件
pub struct AggregateRoot<I: Identity> {
    id: I,
    events: PendingEvents<I>,
    dispatcher: DomainEvents<I>,
    current_user_using: Option<I>,
}

impl<I: Identity> AggregateRoot<I> {
    pub fn new(id: I, dispatcher: &DomainEvents<I>) -> Self {
        Self {
            id,
            events: PendingEvents::new(),
            dispatcher: dispatcher.clone(),
            current_user_using: None,
        }
    }

    pub fn id(&self) -> &I {
        &self.id
    }

    /// 待派发事件（按记录顺序）
    pub fn domain_events(&self) -> Vec<Arc<dyn DomainEvent<I>>> {
        self.events.snapshot()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// 记录事件并登记待派发
    pub fn record<E: DomainEvent<I>>(&mut self, event: E) {
        tracing::trace!(
            aggregate_id = %self.id,
            event = event.event_name(),
            "record domain event"
        );
        self.events.push(Arc::new(event));
        self.dispatcher
            .mark_aggregate_for_dispatch(&self.id, &self.events);
    }

    /// 丢弃待派发事件，不触发任何处理器
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn current_user_using(&self) -> Option<&I> {
        self.current_user_using.as_ref()
    }

    pub fn set_current_user_using(&mut self, user: Option<I>) {
        self.current_user_using = user;
    }
}

/// 克隆共享事件队列与调度器，只复制标识与使用者标记
impl<I: Identity> Clone for AggregateRoot<I> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            events: self.events.clone(),
            dispatcher: self.dispatcher.clone(),
            current_user_using: self.current_user_using.clone(),
        }
    }
}

impl<I: Identity> fmt::Debug for AggregateRoot<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateRoot")
            .field("id", &self.id)
            .field("pending", &self.events.len())
            .field("current_user_using", &self.current_user_using)
            .finish()
    }
}
