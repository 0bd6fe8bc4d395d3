//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的不可变对象。
//!
//! 值对象的“规范形态”是其载荷序列化后的 [`serde_json::Value`]：
//! - 嵌套的值对象序列化为其自身载荷（`#[value_object]` 会为单字段元组结构体加上
//!   `#[serde(transparent)]`），因此规范形态天然是递归“去包装”后的纯结构数据；
//! - 默认相等性即规范形态的深度比较（对象按键比较，与字段顺序无关）；
//! - 个别类型可覆写 [`ValueObject::equals`] 定义自己的相等规则。
//!
mod searchable;

pub use searchable::Searchable;

use serde::Serialize;
use serde_json::Value;

use crate::error::DomainResult;

/// 值对象抽象
pub trait ValueObject: Serialize {
    /// 规范（去包装）投影：嵌套值对象被替换为其载荷，数组逐元素处理，标量原样保留
    fn clean_value(&self) -> DomainResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// 规范形态的字符串表示
    fn canonical_string(&self) -> DomainResult<String> {
        Ok(serde_json::to_string(&self.clean_value()?)?)
    }

    /// 值相等：默认比较规范形态，无法投影的值一律视为不相等
    fn equals(&self, other: &Self) -> bool {
        match (self.clean_value(), other.clean_value()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strata_macros::value_object;

    #[value_object]
    struct Person {
        name: String,
        age: u32,
    }

    #[value_object]
    struct Label(String);

    #[value_object]
    struct Family {
        name: String,
        child: Person,
    }

    #[value_object]
    struct Member {
        name: Label,
        child: Person,
    }

    #[value_object]
    struct Members(Vec<Member>);

    #[value_object(eq = false)]
    struct NamedOnly {
        name: String,
        age: u32,
    }

    impl PartialEq for NamedOnly {
        fn eq(&self, other: &Self) -> bool {
            self.equals(other)
        }
    }

    impl ValueObject for NamedOnly {
        fn equals(&self, other: &Self) -> bool {
            self.name == other.name
        }
    }

    fn person(name: &str, age: u32) -> Person {
        Person {
            name: name.into(),
            age,
        }
    }

    #[test]
    fn equality_is_structural() {
        let a = Family {
            name: "John".into(),
            child: person("Doe", 20),
        };
        let b = Family {
            name: "John".into(),
            child: person("Doe", 20),
        };
        let c = Family {
            name: "Jane".into(),
            child: person("Doe", 20),
        };
        let d = Family {
            name: "John".into(),
            child: person("Doe", 21),
        };

        assert!(a.equals(&b));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn clean_value_unwraps_nested_levels() {
        let members = Members(vec![
            Member {
                name: Label("John".into()),
                child: person("Doe", 20),
            },
            Member {
                name: Label("Jane".into()),
                child: person("Roe", 3),
            },
        ]);

        assert_eq!(
            members.clean_value().unwrap(),
            json!([
                { "name": "John", "child": { "name": "Doe", "age": 20 } },
                { "name": "Jane", "child": { "name": "Roe", "age": 3 } },
            ])
        );
    }

    #[test]
    fn scalar_payload_passes_through() {
        let label = Label("plain".into());
        assert_eq!(label.clean_value().unwrap(), json!("plain"));
        assert_eq!(label.canonical_string().unwrap(), "\"plain\"");
    }

    #[test]
    fn canonical_string_of_record() {
        let p = person("John", 20);
        assert_eq!(p.canonical_string().unwrap(), r#"{"age":20,"name":"John"}"#);
    }

    #[test]
    fn equality_override_is_respected() {
        let a = NamedOnly {
            name: "John".into(),
            age: 20,
        };
        let b = NamedOnly {
            name: "John".into(),
            age: 21,
        };
        let c = NamedOnly {
            name: "Jane".into(),
            age: 20,
        };

        assert!(a.equals(&b));
        assert_eq!(a, b);
        assert!(!a.equals(&c));
    }
}
