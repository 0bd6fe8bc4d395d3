use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use validator::Validate;

use super::Validator;
use crate::error::ValidationError;

/// 基于 serde + `validator` 的结构校验器
///
/// 先把原始 JSON 反序列化为 `T`（结构与类型转换），再执行 `T` 上的 `#[validate]` 规则。
/// 两类失败都转换为 [`ValidationError`]。
///
/// ```
/// use serde::Deserialize;
/// use serde_json::json;
/// use strata_application::validator::{SchemaValidator, Validator};
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Signup {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// # tokio_test_block(async {
/// let v = SchemaValidator::<Signup>::new();
/// assert!(v.validate(&json!({ "name": "" })).await.is_err());
/// assert_eq!(v.validate(&json!({ "name": "ada" })).await.unwrap().name, "ada");
/// # });
/// # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub struct SchemaValidator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SchemaValidator<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SchemaValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SchemaValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

#[async_trait]
impl<T> Validator for SchemaValidator<T>
where
    T: DeserializeOwned + Validate + Send + Sync,
{
    type Input = Value;
    type Output = T;
    type Error = ValidationError;

    async fn validate(&self, input: &Value) -> Result<T, ValidationError> {
        let parsed: T = serde_json::from_value(input.clone())
            .map_err(|e| ValidationError::single("", e.to_string()))?;
        parsed.validate()?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    struct NewCustomer {
        #[validate(length(min = 2, message = "name too short"))]
        name: String,
        #[validate(range(max = 150))]
        age: u32,
    }

    #[tokio::test]
    async fn accepts_valid_input() {
        let v = SchemaValidator::<NewCustomer>::new();
        let parsed = v.validate(&json!({ "name": "John", "age": 20 })).await.unwrap();
        assert_eq!(parsed.name, "John");
        assert_eq!(parsed.age, 20);
    }

    #[tokio::test]
    async fn shape_errors_are_reported_at_root() {
        let v = SchemaValidator::<NewCustomer>::new();
        let err = v.validate(&json!({ "name": "John" })).await.unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].path, "");
        assert!(err.issues()[0].message.contains("age"));
    }

    #[tokio::test]
    async fn rule_errors_carry_field_paths() {
        let v = SchemaValidator::<NewCustomer>::new();
        let err = v
            .validate(&json!({ "name": "J", "age": 200 }))
            .await
            .unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["age", "name"]);
        assert_eq!(err.issues_at("name").next().unwrap().message, "name too short");
        assert_eq!(err.issues_at("age").next().unwrap().message, "range");
    }
}
