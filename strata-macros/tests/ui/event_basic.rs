use strata_domain::chrono::Utc;
use strata_domain::domain_event::{DomainEvent, NamedEvent};
use strata_domain::domain_event;
use strata_domain::id::IncrementalEntityId;

#[domain_event(id = IncrementalEntityId)]
struct Shipped {
    carrier: String,
}

#[domain_event(id = IncrementalEntityId, name = "order.paid")]
struct Paid {
    amount: i64,
}

#[domain_event(id = IncrementalEntityId)]
enum StockEvent {
    Reserved { qty: u32 },
    #[event(name = "stock.released")]
    Released { qty: u32 },
}

fn main() {
    let id = IncrementalEntityId::new(1);
    let shipped = Shipped {
        aggregate_id: id,
        occurred_at: Utc::now(),
        carrier: "post".into(),
    };
    assert_eq!(shipped.event_name(), "Shipped");
    assert_eq!(Paid::NAME, "order.paid");
    assert_eq!(shipped.aggregate_id(), &id);
    let _ = shipped.carrier.clone();

    let reserved = StockEvent::Reserved {
        aggregate_id: id,
        occurred_at: Utc::now(),
        qty: 2,
    };
    let released = StockEvent::Released {
        aggregate_id: id,
        occurred_at: Utc::now(),
        qty: 2,
    };
    assert_eq!(reserved.event_name(), "StockEvent.Reserved");
    assert_eq!(released.event_name(), "stock.released");

    let erased: &dyn DomainEvent<IncrementalEntityId> = &released;
    assert!(erased.downcast_ref::<StockEvent>().is_some());
    assert!(!erased.is::<Shipped>());
    let _ = Paid {
        aggregate_id: id,
        occurred_at: Utc::now(),
        amount: 1,
    }
    .amount;
}
