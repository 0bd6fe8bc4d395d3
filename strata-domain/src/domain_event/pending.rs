use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

use super::DomainEvent;
use crate::id::Identity;

/// 聚合上待派发的事件队列
///
/// 克隆只复制句柄：聚合与调度器持有的是同一份队列，
/// 调度成功后由调度器清出已派发的前缀，聚合上随即可见。
pub struct PendingEvents<I: Identity> {
    inner: Arc<Mutex<Vec<Arc<dyn DomainEvent<I>>>>>,
}

impl<I: Identity> PendingEvents<I> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, event: Arc<dyn DomainEvent<I>>) {
        self.inner.lock().push(event);
    }

    /// 按记录顺序返回当前队列的副本
    pub fn snapshot(&self) -> Vec<Arc<dyn DomainEvent<I>>> {
        self.inner.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// 丢弃前 `n` 个事件；派发期间追加的事件保留在队尾
    pub(crate) fn drain_front(&self, n: usize) {
        let mut guard = self.inner.lock();
        let n = n.min(guard.len());
        guard.drain(..n);
    }

    /// 两个句柄是否指向同一队列
    pub fn same_queue(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<I: Identity> Default for PendingEvents<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Identity> Clone for PendingEvents<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: Identity> fmt::Debug for PendingEvents<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.lock().iter()).finish()
    }
}
