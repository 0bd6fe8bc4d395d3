use std::any::type_name;
use std::fmt;

use crate::error::DomainResult;

/// 事件处理器：同步处理某一种类的事件
///
/// 处理失败时返回错误，调度器不会吞掉它，而是直接传播给调用方并中止后续处理器。
/// `E` 可以是具体事件类型，也可以是 `dyn DomainEvent<I>`（接收任意种类的事件）。
pub trait EventHandler<E: ?Sized>: Send + Sync {
    /// 处理事件
    fn handle(&self, event: &E) -> DomainResult<()>;

    /// 处理器名称（用于日志与错误信息）
    fn handler_name(&self) -> &str {
        type_name::<Self>()
    }
}

/// 以闭包实现的处理器，由 [`handler_fn`] 构造
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

/// 把闭包包装成 [`EventHandler`]
///
/// ```
/// use strata_domain::domain_event::{EventHandler, handler_fn};
///
/// let h = handler_fn("noop", |_: &u32| Ok(()));
/// assert!(h.handle(&1).is_ok());
/// assert_eq!(h.handler_name(), "noop");
/// ```
pub fn handler_fn<E, F>(name: &'static str, f: F) -> FnHandler<F>
where
    E: ?Sized,
    F: Fn(&E) -> DomainResult<()> + Send + Sync,
{
    FnHandler { name, f }
}

impl<E, F> EventHandler<E> for FnHandler<F>
where
    E: ?Sized,
    F: Fn(&E) -> DomainResult<()> + Send + Sync,
{
    fn handle(&self, event: &E) -> DomainResult<()> {
        (self.f)(event)
    }

    fn handler_name(&self) -> &str {
        self.name
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}
