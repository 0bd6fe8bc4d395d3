use serde::Serialize;
use std::fmt;

/// 用例失败：校验失败或领域失败，按来源区分
#[derive(Debug, Clone, thiserror::Error)]
pub enum UseCaseFailure<V, F> {
    /// 原始输入未通过校验，`perform` 未被调用
    #[error("validation: {0}")]
    Validation(V),

    /// `perform` 返回的业务失败
    #[error("domain: {0}")]
    Domain(F),
}

impl<V, F> UseCaseFailure<V, F> {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    pub fn validation(&self) -> Option<&V> {
        match self {
            Self::Validation(v) => Some(v),
            Self::Domain(_) => None,
        }
    }

    pub fn domain(&self) -> Option<&F> {
        match self {
            Self::Validation(_) => None,
            Self::Domain(f) => Some(f),
        }
    }
}

/// 单条校验问题：字段路径（根为空串）与可读信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// 结构化校验错误，可序列化，也可作为可读文本展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    if issues.is_empty() {
        return "invalid input".to_owned();
    }
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// 只含一条问题的错误
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![ValidationIssue::new(path, message)])
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// 某字段路径上的问题
    pub fn issues_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.path == path)
    }

    /// 序列化形态，便于直接返回给调用方
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "issues": &self.issues })
    }
}

#[cfg(feature = "validator")]
impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut issues: Vec<ValidationIssue> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    ValidationIssue::new(field.to_string(), message)
                })
            })
            .collect();
        // field_errors 来自 HashMap，排序保证输出稳定
        issues.sort_by(|a, b| a.path.cmp(&b.path));
        Self { issues }
    }
}
