//! 输入校验
//!
//! 校验器把原始输入转换为已解析的参数，或返回结构化的校验错误。
//! 用例只依赖 [`Validator`] 契约，具体规则（serde 结构 + `validator` 规则、
//! 手写闭包等）由实现决定。
//!
use async_trait::async_trait;
use std::marker::PhantomData;

#[cfg(feature = "validator")]
mod schema;

#[cfg(feature = "validator")]
pub use schema::SchemaValidator;

/// 校验器契约
#[async_trait]
pub trait Validator: Send + Sync {
    /// 原始输入
    type Input: Send + Sync;
    /// 解析后的参数
    type Output: Send + Sync;
    /// 校验失败时的结构化错误
    type Error: Send + Sync;

    async fn validate(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// 以同步闭包实现的校验器
pub struct FnValidator<I, O, E, F> {
    f: F,
    _marker: PhantomData<fn(&I) -> Result<O, E>>,
}

/// 把闭包包装成 [`Validator`]
pub fn validator_fn<I, O, E, F>(f: F) -> FnValidator<I, O, E, F>
where
    F: Fn(&I) -> Result<O, E> + Send + Sync,
{
    FnValidator {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<I, O, E, F> Validator for FnValidator<I, O, E, F>
where
    I: Send + Sync,
    O: Send + Sync,
    E: Send + Sync,
    F: Fn(&I) -> Result<O, E> + Send + Sync,
{
    type Input = I;
    type Output = O;
    type Error = E;

    async fn validate(&self, input: &I) -> Result<O, E> {
        (self.f)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[tokio::test]
    async fn fn_validator_maps_input() {
        let v = validator_fn(|raw: &String| {
            raw.trim()
                .parse::<u32>()
                .map_err(|e| ValidationError::single("", e.to_string()))
        });

        assert_eq!(v.validate(&" 42 ".to_string()).await.unwrap(), 42);
        assert!(v.validate(&"abc".to_string()).await.is_err());
    }
}
