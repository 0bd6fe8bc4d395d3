use strata_domain::entity;
use strata_domain::entity::Entity;
use strata_domain::id::{IdGenerator, IncrementalEntityId, IncrementalEntityIdGenerator};

#[entity(id = IncrementalEntityId)]
#[derive(Clone)]
struct Customer {
    name: String,
}

// 默认标识类型为 UniqueEntityId
#[entity]
struct Note {
    body: String,
}

#[entity(id = IncrementalEntityId, debug = false)]
struct Secret {
    value: String,
}

fn main() {
    let ids = IncrementalEntityIdGenerator::new();
    let a = Customer {
        id: ids.generate(),
        name: "a".into(),
    };
    let mut b = a.clone();
    b.name = "b".into();
    assert_eq!(a, b);
    assert_eq!(a.id().to_string(), "1");

    let n = Note {
        id: strata_domain::id::UniqueEntityIdGenerator.generate(),
        body: String::new(),
    };
    let _ = format!("{:?}", n);
    let _ = n.body;

    let s = Secret {
        id: ids.generate(),
        value: "x".into(),
    };
    assert!(s.equals(&s));
    let _ = s.value;
}
