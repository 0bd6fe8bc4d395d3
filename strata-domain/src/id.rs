//! 标识（Identity）与标识生成器
//!
//! 标识是对原始 id 值的包装，相等性只由被包装的值决定。
//! 生成策略（随机 / 自增）通过 [`IdGenerator`] 外部注入：
//! - 不带参数调用 `create(None)` 生成新标识；
//! - 带原始值调用 `create(Some(raw))` 重建已有标识（从存储加载时）。
//!
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::atomic::{AtomicI64, Ordering};

use strata_macros::entity_id;
use uuid::Uuid;

/// 标识抽象：按包装值比较，可哈希、可显示
pub trait Identity: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// 被包装的原始值类型
    type Raw: Clone + Send + Sync + 'static;

    /// 获取原始值
    fn raw(&self) -> &Self::Raw;
}

/// 标识生成器
pub trait IdGenerator: Send + Sync {
    type Id: Identity;

    /// `raw` 为空时生成新标识，否则按原始值重建
    fn create(&self, raw: Option<<Self::Id as Identity>::Raw>) -> Self::Id;

    /// 生成一个新标识
    fn generate(&self) -> Self::Id {
        self.create(None)
    }
}

impl<G> IdGenerator for &G
where
    G: IdGenerator + ?Sized,
{
    type Id = G::Id;

    fn create(&self, raw: Option<<Self::Id as Identity>::Raw>) -> Self::Id {
        (**self).create(raw)
    }
}

/// 构造实体时决定标识：已提供则沿用（重建路径），否则由生成器生成
pub fn resolve_id<G>(existing: Option<G::Id>, generator: &G) -> G::Id
where
    G: IdGenerator + ?Sized,
{
    existing.unwrap_or_else(|| generator.generate())
}

/// 基于 UUID 文本的唯一标识
#[entity_id]
pub struct UniqueEntityId(String);

/// 随机 UUID（v4）生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueEntityIdGenerator;

impl IdGenerator for UniqueEntityIdGenerator {
    type Id = UniqueEntityId;

    fn create(&self, raw: Option<String>) -> UniqueEntityId {
        UniqueEntityId::new(raw.unwrap_or_else(|| Uuid::new_v4().to_string()))
    }
}

/// 自增整数标识
#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct IncrementalEntityId(i64);

/// 顺序生成器：线程安全计数，重建时会把计数推进到已见最大值之后，避免重复
#[derive(Debug)]
pub struct IncrementalEntityIdGenerator {
    next: AtomicI64,
}

impl Default for IncrementalEntityIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IncrementalEntityIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定首个生成值
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    /// 下一次 `generate` 将返回的值
    pub fn peek(&self) -> i64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdGenerator for IncrementalEntityIdGenerator {
    type Id = IncrementalEntityId;

    fn create(&self, raw: Option<i64>) -> IncrementalEntityId {
        match raw {
            Some(value) => {
                self.next.fetch_max(value.saturating_add(1), Ordering::SeqCst);
                IncrementalEntityId::new(value)
            }
            // 计数在 i64::MAX 处饱和，不回绕为负数
            None => {
                let current = self
                    .next
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                        Some(n.saturating_add(1))
                    })
                    .unwrap_or_else(|n| n);
                IncrementalEntityId::new(current)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_wrapped_value() {
        let a = UniqueEntityId::new("a-1".to_string());
        let b: UniqueEntityId = "a-1".parse().unwrap();
        let c = UniqueEntityId::from("a-2".to_string());

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.raw(), "a-1");
        assert_eq!(a.to_string(), "a-1");
    }

    #[test]
    fn unique_generator_mints_distinct_ids_and_reconstructs() {
        let generator = UniqueEntityIdGenerator;
        let a = generator.generate();
        let b = generator.generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.raw()).is_ok());

        let again = generator.create(Some(a.raw().clone()));
        assert_eq!(again, a);
    }

    #[test]
    fn incremental_generator_is_sequential() {
        let generator = IncrementalEntityIdGenerator::starting_at(10);
        assert_eq!(generator.generate().raw(), &10);
        assert_eq!(generator.generate().raw(), &11);
        assert_eq!(generator.peek(), 12);
    }

    #[test]
    fn incremental_reconstruction_advances_counter() {
        let generator = IncrementalEntityIdGenerator::new();
        let loaded = generator.create(Some(41));
        assert_eq!(loaded, IncrementalEntityId::new(41));
        assert_eq!(generator.generate(), IncrementalEntityId::new(42));

        // 旧值重建不会回拨计数
        generator.create(Some(3));
        assert_eq!(generator.generate(), IncrementalEntityId::new(43));
    }

    #[test]
    fn incremental_counter_saturates_instead_of_wrapping() {
        let generator = IncrementalEntityIdGenerator::starting_at(i64::MAX - 1);
        assert_eq!(generator.generate().raw(), &(i64::MAX - 1));
        assert_eq!(generator.generate().raw(), &i64::MAX);
        assert_eq!(generator.generate().raw(), &i64::MAX);
        assert_eq!(generator.peek(), i64::MAX);
    }

    #[test]
    fn resolve_id_prefers_existing() {
        let generator = IncrementalEntityIdGenerator::new();
        let kept = resolve_id(Some(IncrementalEntityId::new(7)), &generator);
        assert_eq!(kept.raw(), &7);
        assert_eq!(generator.peek(), 1);

        let minted = resolve_id(None, &generator);
        assert_eq!(minted.raw(), &1);
    }
}
