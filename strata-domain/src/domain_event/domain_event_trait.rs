use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt;

use crate::id::Identity;

/// 领域事件：不可变记录，携带发生时间与所属聚合的标识（而非聚合本身）
///
/// 该 trait 可作为 trait object 使用，调度器以 `&dyn DomainEvent<I>` 传递事件；
/// 处理器需要具体类型时通过 [`downcast_ref`](#method.downcast_ref) 还原。
pub trait DomainEvent<I: Identity>: Any + fmt::Debug + Send + Sync + 'static {
    /// 事件种类名称，作为处理器注册的键
    fn event_name(&self) -> &'static str;

    /// 事件发生时间
    fn occurred_at(&self) -> DateTime<Utc>;

    /// 所属聚合的标识
    fn aggregate_id(&self) -> &I;

    /// 类型擦除入口，用于向下转型
    fn as_any(&self) -> &dyn Any;
}

/// 具名事件：为具体事件类型提供稳定的种类名称（避免依赖 `type_name::<T>()`）
pub trait NamedEvent {
    const NAME: &'static str;
}

impl<I: Identity> dyn DomainEvent<I> {
    /// 尝试还原为具体事件类型
    pub fn downcast_ref<E: DomainEvent<I>>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    pub fn is<E: DomainEvent<I>>(&self) -> bool {
        self.as_any().is::<E>()
    }
}
