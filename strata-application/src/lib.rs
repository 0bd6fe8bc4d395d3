//! 应用层（strata-application）
//!
//! 在领域层之上编排一次业务调用：
//! - `validator`：把原始输入转换为已解析参数或结构化校验错误；
//! - `use_case`：校验 → 前置钩子 → 核心操作 → 失败钩子 → 后置钩子 的流水线；
//! - `service`：以静态类型依赖包组织协作者；
//! - `error`：用例失败与校验错误类型。
//!
pub mod error;
pub mod service;
pub mod use_case;
pub mod validator;

pub use error::{UseCaseFailure, ValidationError, ValidationIssue};
pub use service::{Dependent, Service};
pub use use_case::{Failed, UseCase, UseCaseResult};
pub use validator::Validator;
