//! 领域事件（Domain Event）与同步调度
//!
//! 定义事件需要实现的最小接口（`DomainEvent`）、按种类注册的处理器（`EventHandler`），
//! 以及在事务提交后按聚合派发事件的调度器 `DomainEvents`。

mod dispatcher;
mod domain_event_trait;
mod handler;
mod pending;

pub use dispatcher::{DomainEvents, DomainEventsConfig};
pub use domain_event_trait::{DomainEvent, NamedEvent};
pub use handler::{EventHandler, FnHandler, handler_fn};
pub use pending::PendingEvents;
