//! 用例（Use Case）流水线
//!
//! 一次执行严格按顺序经过以下步骤，每一步都等待完成后才进入下一步：
//!
//! ```text
//! validate ─失败→ handle_failure(Validation) → 返回 Failure(Validation)
//!    │
//!    └─成功→ pre_execute → perform ─失败→ handle_failure(Domain) ┐
//!                              │                                 ├→ post_execute → 返回结果
//!                              └─成功────────────────────────────┘
//! ```
//!
//! 校验失败与业务失败都以 [`Either::Failure`] 返回，不会以错误形式抛出。
//!
use async_trait::async_trait;
use strata_domain::Either;

use crate::error::UseCaseFailure;
use crate::validator::Validator;

/// 用例的原始输入类型
pub type InputOf<U> = <<U as UseCase>::Validator as Validator>::Input;

/// 用例的校验错误类型
pub type ValidationErrorOf<U> = <<U as UseCase>::Validator as Validator>::Error;

/// `execute` 的返回类型
pub type UseCaseResult<U> = Either<
    UseCaseFailure<ValidationErrorOf<U>, <U as UseCase>::Failure>,
    <U as UseCase>::Success,
>;

/// 交给 `handle_failure` 的失败视图
pub enum Failed<'a, U: UseCase + ?Sized> {
    /// 校验失败：原始输入与校验错误
    Validation {
        input: &'a InputOf<U>,
        error: &'a ValidationErrorOf<U>,
    },
    /// 业务失败：已解析参数与 `perform` 返回的失败值
    Domain {
        params: &'a U::Params,
        failure: &'a U::Failure,
    },
}

impl<U: UseCase + ?Sized> Failed<'_, U> {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// 用例
///
/// 只有 `perform` 必须实现；`pre_execute`、`post_execute`、`handle_failure`
/// 默认什么也不做。`execute` 负责编排，一般不应覆写。
#[async_trait]
pub trait UseCase: Send + Sync {
    /// 用例名称（日志字段）
    const NAME: &'static str;

    /// 输入校验器，其输出即 `perform` 的参数
    type Validator: Validator<Output = Self::Params>;
    type Params: Send + Sync;
    type Failure: Send + Sync;
    type Success: Send + Sync;

    fn validator(&self) -> &Self::Validator;

    /// 校验通过后、`perform` 之前调用
    async fn pre_execute(&self, _params: &Self::Params) {}

    /// 核心业务操作
    async fn perform(&self, params: &Self::Params) -> Either<Self::Failure, Self::Success>;

    /// 总在最后调用（校验失败时除外），只能观察结果
    async fn post_execute(
        &self,
        _params: &Self::Params,
        _result: &Either<Self::Failure, Self::Success>,
    ) {
    }

    /// 校验失败或业务失败时调用；业务失败时先于 `post_execute`
    async fn handle_failure(&self, _failure: Failed<'_, Self>) {}

    /// 执行完整流水线
    async fn execute(&self, input: InputOf<Self>) -> UseCaseResult<Self> {
        tracing::debug!(use_case = Self::NAME, "validating input");
        let params = match self.validator().validate(&input).await {
            Ok(params) => params,
            Err(error) => {
                tracing::debug!(use_case = Self::NAME, "input rejected by validator");
                self.handle_failure(Failed::Validation {
                    input: &input,
                    error: &error,
                })
                .await;
                return Either::Failure(UseCaseFailure::Validation(error));
            }
        };

        self.pre_execute(&params).await;

        tracing::debug!(use_case = Self::NAME, "performing");
        let result = self.perform(&params).await;

        if let Either::Failure(failure) = &result {
            tracing::debug!(use_case = Self::NAME, "perform returned failure");
            self.handle_failure(Failed::Domain {
                params: &params,
                failure,
            })
            .await;
        }

        self.post_execute(&params, &result).await;
        tracing::debug!(
            use_case = Self::NAME,
            success = result.is_success(),
            "use case finished"
        );

        result.map_failure(UseCaseFailure::Domain)
    }
}
