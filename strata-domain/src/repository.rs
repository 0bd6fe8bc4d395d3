//! 仓储（Repository）接口与内存实现
//!
//! 仓储以实体标识为准进行保存、删除与查找；接口是异步的，
//! 以便在不同基础设施上实现。`InMemoryRepository` 用于测试与原型：
//! 不保证持久性，也不做唯一性检查（重复检查由调用方负责）。
//!
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::DomainResult;

#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Entity,
{
    /// 新增实体
    async fn create(&self, entity: T) -> DomainResult<()>;

    /// 覆盖同一标识的实体；不存在时不做任何事
    async fn save(&self, entity: T) -> DomainResult<()>;

    /// 删除同一标识的实体；不存在时不做任何事
    async fn delete(&self, entity: &T) -> DomainResult<()>;

    /// 是否存在同一标识的实体
    async fn exists(&self, entity: &T) -> DomainResult<bool>;

    /// 按标识查找
    async fn get_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;
}

#[async_trait]
impl<T, R> Repository<T> for Arc<R>
where
    T: Entity + 'static,
    R: Repository<T> + ?Sized,
{
    async fn create(&self, entity: T) -> DomainResult<()> {
        (**self).create(entity).await
    }

    async fn save(&self, entity: T) -> DomainResult<()> {
        (**self).save(entity).await
    }

    async fn delete(&self, entity: &T) -> DomainResult<()> {
        (**self).delete(entity).await
    }

    async fn exists(&self, entity: &T) -> DomainResult<bool> {
        (**self).exists(entity).await
    }

    async fn get_by_id(&self, id: &T::Id) -> DomainResult<Option<T>> {
        (**self).get_by_id(id).await
    }
}

/// 基于内存列表的仓储，保持插入顺序
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// 是否存在满足条件的实体
    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.items.read().iter().any(predicate)
    }

    /// 只保留满足条件的实体
    pub fn retain(&self, predicate: impl FnMut(&T) -> bool) {
        self.items.write().retain(predicate);
    }

    pub fn clear(&self) {
        self.items.write().clear();
    }
}

impl<T: Clone> InMemoryRepository<T> {
    /// 当前全部实体的副本
    pub fn items(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// 查找第一个满足条件的实体
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.items.read().iter().find(|item| predicate(item)).cloned()
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Clone + 'static,
{
    async fn create(&self, entity: T) -> DomainResult<()> {
        tracing::trace!(id = %entity.id(), "in-memory create");
        self.items.write().push(entity);
        Ok(())
    }

    async fn save(&self, entity: T) -> DomainResult<()> {
        let mut items = self.items.write();
        match items.iter_mut().find(|item| item.equals(&entity)) {
            Some(slot) => *slot = entity,
            None => tracing::trace!(id = %entity.id(), "in-memory save skipped, entity not found"),
        }
        Ok(())
    }

    async fn delete(&self, entity: &T) -> DomainResult<()> {
        let mut items = self.items.write();
        if let Some(index) = items.iter().position(|item| item.equals(entity)) {
            items.remove(index);
        }
        Ok(())
    }

    async fn exists(&self, entity: &T) -> DomainResult<bool> {
        Ok(self.items.read().iter().any(|item| item.equals(entity)))
    }

    async fn get_by_id(&self, id: &T::Id) -> DomainResult<Option<T>> {
        Ok(self.items.read().iter().find(|item| item.id() == id).cloned())
    }
}
