use strata_domain::value_object;
use strata_domain::value_object::ValueObject;

#[value_object]
struct Amount {
    value: i64,
}

#[value_object]
struct Currency(String);

#[value_object]
struct Price {
    amount: Amount,
    currency: Currency,
}

#[value_object(debug = false)]
struct Opaque(i32);

#[value_object]
enum Level {
    Low,
    High,
}

#[value_object(eq = false)]
struct CaseInsensitive(String);

impl ValueObject for CaseInsensitive {
    fn equals(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl PartialEq for CaseInsensitive {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

fn main() {
    let _ = format!("{:?}", Amount { value: 0 });

    let a = Price {
        amount: Amount { value: 5 },
        currency: Currency("EUR".into()),
    };
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(
        a.canonical_string().unwrap(),
        r#"{"amount":{"value":5},"currency":"EUR"}"#
    );

    let _ = Opaque(1) == Opaque(1);
    assert!(Level::Low != Level::High);
    assert!(CaseInsensitive("a".into()) == CaseInsensitive("A".into()));
}
