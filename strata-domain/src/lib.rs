//! 分层领域建模基础库（strata-domain）
//!
//! 提供以 DDD 为中心的通用构件，供应用在其上定义具体的实体与流程：
//! - 标识（`id`）、实体（`entity`）与值对象（`value_object`）建模
//! - 聚合（`aggregate`）及其事件记录组件（`aggregate_root`）
//! - 领域事件（`domain_event`）与延迟派发的调度器 `DomainEvents`
//! - 变更追踪列表（`watched_list`），用于持久化子集合时只处理差量
//! - 仓储接口与内存实现（`repository`）
//! - 双结果类型 `Either`，供用例流水线返回失败或成功
//!
//! 典型用法：
//! 1. 用 `#[entity_id]`、`#[value_object]`、`#[entity]`、`#[aggregate]` 定义模型；
//! 2. 用 `#[domain_event]` 定义事件，在聚合的可变方法中 `add_domain_event`；
//! 3. 持久化成功后调用 `DomainEvents::dispatch_events_for_aggregate` 触发处理器。
//!
pub mod aggregate;
pub mod aggregate_root;
pub mod domain_event;
pub mod either;
pub mod entity;
pub mod error;
pub mod id;
pub mod repository;
pub mod value_object;
pub mod watched_list;

pub use either::Either;
pub use strata_macros::{aggregate, domain_event, entity, entity_id, value_object};

// 宏展开中使用的依赖路径
#[doc(hidden)]
pub use chrono;
#[doc(hidden)]
pub use serde;

// 允许在本 crate 内部通过 ::strata_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::strata_domain 路径。
extern crate self as strata_domain;
