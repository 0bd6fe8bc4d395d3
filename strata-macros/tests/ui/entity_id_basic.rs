use strata_domain::entity_id;
use strata_domain::id::Identity;

#[entity_id]
struct UserId(String);

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
struct Seq(u64);

fn main() {
    let id = UserId::new("u-1".to_string());
    let _ = format!("{:?} {}", id, id);
    assert_eq!(id.raw(), "u-1");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"u-1\"");

    let parsed: Seq = "42".parse().unwrap();
    assert!(parsed > Seq::new(7));
    assert_eq!(parsed.into_inner(), 42);

    let back: UserId = serde_json::from_str("\"u-2\"").unwrap();
    assert_eq!(back, UserId::from("u-2".to_string()));
}
