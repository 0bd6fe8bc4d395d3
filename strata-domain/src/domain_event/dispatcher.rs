//! 领域事件调度器（DomainEvents）
//!
//! 两张表：
//! - 处理器表：事件种类名称 → 按注册顺序排列的处理器；
//! - 待派发聚合表：聚合标识 → 该聚合的事件队列（与聚合共享）。
//!
//! 聚合在记录事件时把自己登记到待派发表；事务提交后由基础设施调用
//! [`DomainEvents::dispatch_events_for_aggregate`]，按记录顺序同步派发，
//! 成功后清空已派发事件并把聚合移出待派发表。
//!
//! 调度器是可克隆的句柄，克隆共享同一份状态。处理器在调用前被复制出表，
//! 调用期间不持有任何表锁，因此处理器内部可以再次注册处理器或记录新事件。
//!
use bon::Builder;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use super::{DomainEvent, EventHandler, NamedEvent, PendingEvents};
use crate::error::{DomainError, DomainResult};
use crate::id::Identity;

type ErasedFn<I> = dyn Fn(&dyn DomainEvent<I>) -> DomainResult<()> + Send + Sync;

struct RegisteredHandler<I: Identity> {
    name: String,
    call: Arc<ErasedFn<I>>,
}

impl<I: Identity> Clone for RegisteredHandler<I> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            call: Arc::clone(&self.call),
        }
    }
}

/// 调度器配置
#[derive(Debug, Clone, Default, Builder)]
pub struct DomainEventsConfig {
    /// 日志中的作用域标签，便于区分多个调度器实例
    #[builder(into)]
    pub scope: Option<String>,
    /// 为没有处理器的事件输出 debug 日志（默认只在 trace 级别记录）
    #[builder(default)]
    pub log_unhandled: bool,
}

struct Inner<I: Identity> {
    handlers: DashMap<String, Vec<RegisteredHandler<I>>>,
    marked: DashMap<I, PendingEvents<I>>,
    config: DomainEventsConfig,
}

/// 领域事件调度器
pub struct DomainEvents<I: Identity> {
    inner: Arc<Inner<I>>,
}

impl<I: Identity> DomainEvents<I> {
    pub fn new() -> Self {
        Self::with_config(DomainEventsConfig::default())
    }

    pub fn with_config(config: DomainEventsConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                handlers: DashMap::new(),
                marked: DashMap::new(),
                config,
            }),
        }
    }

    pub fn config(&self) -> &DomainEventsConfig {
        &self.inner.config
    }

    fn scope(&self) -> &str {
        self.inner.config.scope.as_deref().unwrap_or("default")
    }

    /// 为具名事件注册处理器；同一种类可注册多个，按注册顺序调用
    pub fn register<E, H>(&self, handler: Arc<H>)
    where
        E: DomainEvent<I> + NamedEvent,
        H: EventHandler<E> + ?Sized + 'static,
    {
        self.register_named::<E, H>(E::NAME, handler);
    }

    /// 以显式种类名称注册处理器
    ///
    /// 派发时若事件无法还原为 `E`，处理器返回 [`DomainError::TypeMismatch`]。
    pub fn register_named<E, H>(&self, kind: impl Into<String>, handler: Arc<H>)
    where
        E: DomainEvent<I>,
        H: EventHandler<E> + ?Sized + 'static,
    {
        let name = handler.handler_name().to_owned();
        let call: Arc<ErasedFn<I>> = Arc::new(move |event: &dyn DomainEvent<I>| {
            let typed = event
                .downcast_ref::<E>()
                .ok_or_else(|| DomainError::TypeMismatch {
                    expected: type_name::<E>().to_owned(),
                    found: event.event_name().to_owned(),
                })?;
            handler.handle(typed)
        });
        self.push_handler(kind.into(), RegisteredHandler { name, call });
    }

    /// 注册接收任意事件类型的处理器（例如审计日志）
    pub fn register_untyped<H>(&self, kind: impl Into<String>, handler: Arc<H>)
    where
        H: EventHandler<dyn DomainEvent<I>> + ?Sized + 'static,
    {
        let name = handler.handler_name().to_owned();
        let call: Arc<ErasedFn<I>> =
            Arc::new(move |event: &dyn DomainEvent<I>| handler.handle(event));
        self.push_handler(kind.into(), RegisteredHandler { name, call });
    }

    fn push_handler(&self, kind: String, handler: RegisteredHandler<I>) {
        tracing::debug!(
            scope = self.scope(),
            event = %kind,
            handler = %handler.name,
            "register domain event handler"
        );
        self.inner.handlers.entry(kind).or_default().push(handler);
    }

    /// 某一种类已注册的处理器数量
    pub fn handler_count(&self, kind: &str) -> usize {
        self.inner.handlers.get(kind).map_or(0, |hs| hs.len())
    }

    /// 派发单个事件
    ///
    /// 无处理器时静默忽略；处理器按注册顺序调用，首个错误立即返回，
    /// 后续处理器不再执行。
    pub fn dispatch(&self, event: &dyn DomainEvent<I>) -> DomainResult<()> {
        let kind = event.event_name();
        let handlers = match self.inner.handlers.get(kind) {
            Some(entry) => entry.value().clone(),
            None => {
                if self.inner.config.log_unhandled {
                    tracing::debug!(scope = self.scope(), event = kind, "no handler for domain event");
                } else {
                    tracing::trace!(scope = self.scope(), event = kind, "no handler for domain event");
                }
                return Ok(());
            }
        };

        for handler in &handlers {
            tracing::trace!(
                scope = self.scope(),
                event = kind,
                handler = %handler.name,
                aggregate_id = %event.aggregate_id(),
                "dispatch domain event"
            );
            if let Err(err) = (handler.call)(event) {
                tracing::warn!(
                    scope = self.scope(),
                    event = kind,
                    handler = %handler.name,
                    error = %err,
                    "domain event handler failed"
                );
                return Err(err);
            }
        }
        Ok(())
    }

    /// 登记待派发聚合
    ///
    /// 同一队列重复登记无效果。同一标识换成另一个队列时（旧实例未派发即被丢弃，
    /// 之后重新加载），以最新登记的队列为准，旧队列中的事件不再派发。
    pub fn mark_aggregate_for_dispatch(&self, id: &I, events: &PendingEvents<I>) {
        match self.inner.marked.entry(id.clone()) {
            Entry::Occupied(mut entry) => {
                if !entry.get().same_queue(events) {
                    tracing::debug!(
                        scope = self.scope(),
                        aggregate_id = %id,
                        discarded = entry.get().len(),
                        "stale pending events replaced by newer aggregate instance"
                    );
                    entry.insert(events.clone());
                }
            }
            Entry::Vacant(entry) => {
                tracing::trace!(scope = self.scope(), aggregate_id = %id, "aggregate marked for dispatch");
                entry.insert(events.clone());
            }
        }
    }

    /// 派发并清空某聚合的待派发事件
    ///
    /// 未登记的标识直接返回。处理器失败时错误原样返回，此时已记录的事件
    /// 不会被清除，聚合仍处于待派发状态，可以重试。
    pub fn dispatch_events_for_aggregate(&self, id: &I) -> DomainResult<()> {
        let Some(queue) = self.inner.marked.get(id).map(|e| e.value().clone()) else {
            return Ok(());
        };

        let events = queue.snapshot();
        for event in &events {
            self.dispatch(event.as_ref())?;
        }

        queue.drain_front(events.len());
        self.inner.marked.remove_if(id, |_, q| q.is_empty());

        tracing::debug!(
            scope = self.scope(),
            aggregate_id = %id,
            dispatched = events.len(),
            "dispatched aggregate events"
        );
        Ok(())
    }

    /// 标识是否处于待派发状态
    pub fn is_marked(&self, id: &I) -> bool {
        self.inner.marked.contains_key(id)
    }

    pub fn marked_count(&self) -> usize {
        self.inner.marked.len()
    }

    /// 移除全部处理器
    pub fn clear_handlers(&self) {
        self.inner.handlers.clear();
    }

    /// 清空待派发聚合表（不清空聚合自身的事件队列）
    pub fn clear_marked_aggregates(&self) {
        self.inner.marked.clear();
    }
}

impl<I: Identity> Default for DomainEvents<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Identity> Clone for DomainEvents<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: Identity> fmt::Debug for DomainEvents<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainEvents")
            .field("scope", &self.scope())
            .field("kinds", &self.inner.handlers.len())
            .field("marked", &self.inner.marked.len())
            .finish()
    }
}
