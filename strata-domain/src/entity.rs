//! 实体（Entity）基础抽象
//!
//! 实体以标识区分：标识构造后不可变，两个实体当且仅当标识相等时相等，
//! 与其余属性（props）无关。`#[entity]` / `#[aggregate]` 宏会据此生成 `PartialEq`。
//!
use crate::id::Identity;

/// 具备唯一标识的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型
    type Id: Identity;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 按标识判断是否为同一实体
    fn equals(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.id() == other.id()
    }
}
