//! 二元结果（Either）
//!
//! 以值的形式表达“失败或成功”，替代抛出错误：
//! - `Failure(L)`：业务失败或校验失败；
//! - `Success(R)`：正常结果。
//!
//! 与 `std::result::Result` 不同，`Either` 刻意不实现 `PartialEq`，
//! 它是控制流载体而非可比较的值。两者之间可以显式互转。
//!

/// 失败或成功，二者必居其一
#[must_use]
#[derive(Debug, Clone)]
pub enum Either<L, R> {
    Failure(L),
    Success(R),
}

/// 构造失败结果
pub fn failure<L, R>(value: L) -> Either<L, R> {
    Either::Failure(value)
}

/// 构造成功结果
pub fn success<L, R>(value: R) -> Either<L, R> {
    Either::Success(value)
}

impl<L, R> Either<L, R> {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// 取出失败值；成功时返回 `None`
    pub fn failure(self) -> Option<L> {
        match self {
            Self::Failure(l) => Some(l),
            Self::Success(_) => None,
        }
    }

    /// 取出成功值；失败时返回 `None`
    pub fn success(self) -> Option<R> {
        match self {
            Self::Failure(_) => None,
            Self::Success(r) => Some(r),
        }
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Self::Failure(l) => Either::Failure(l),
            Self::Success(r) => Either::Success(r),
        }
    }

    pub fn failure_ref(&self) -> Option<&L> {
        match self {
            Self::Failure(l) => Some(l),
            Self::Success(_) => None,
        }
    }

    pub fn success_ref(&self) -> Option<&R> {
        match self {
            Self::Failure(_) => None,
            Self::Success(r) => Some(r),
        }
    }

    pub fn map<T>(self, f: impl FnOnce(R) -> T) -> Either<L, T> {
        match self {
            Self::Failure(l) => Either::Failure(l),
            Self::Success(r) => Either::Success(f(r)),
        }
    }

    pub fn map_failure<T>(self, f: impl FnOnce(L) -> T) -> Either<T, R> {
        match self {
            Self::Failure(l) => Either::Failure(f(l)),
            Self::Success(r) => Either::Success(r),
        }
    }

    /// 成功时继续执行下一步，失败时短路
    pub fn and_then<T>(self, f: impl FnOnce(R) -> Either<L, T>) -> Either<L, T> {
        match self {
            Self::Failure(l) => Either::Failure(l),
            Self::Success(r) => f(r),
        }
    }

    /// 两个分支各自折叠为同一类型
    pub fn fold<T>(self, on_failure: impl FnOnce(L) -> T, on_success: impl FnOnce(R) -> T) -> T {
        match self {
            Self::Failure(l) => on_failure(l),
            Self::Success(r) => on_success(r),
        }
    }

    pub fn into_result(self) -> Result<R, L> {
        match self {
            Self::Failure(l) => Err(l),
            Self::Success(r) => Ok(r),
        }
    }
}

impl<T> Either<T, T> {
    /// 两侧类型一致时，无论哪个分支都直接取出所持有的值
    pub fn extract(self) -> T {
        match self {
            Self::Failure(v) | Self::Success(v) => v,
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(value: Result<R, L>) -> Self {
        match value {
            Ok(r) => Self::Success(r),
            Err(l) => Self::Failure(l),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(value: Either<L, R>) -> Self {
        value.into_result()
    }
}
