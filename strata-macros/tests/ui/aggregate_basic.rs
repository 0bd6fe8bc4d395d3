use strata_domain::aggregate::Aggregate;
use strata_domain::aggregate_root::AggregateRoot;
use strata_domain::chrono::Utc;
use strata_domain::domain_event::DomainEvents;
use strata_domain::entity::Entity;
use strata_domain::id::{IdGenerator, UniqueEntityId, UniqueEntityIdGenerator};
use strata_domain::{aggregate, domain_event};

#[domain_event(name = "CartCreated")]
struct CartCreated {}

#[aggregate(id = UniqueEntityId)]
struct Cart {
    items: Vec<String>,
}

fn main() {
    let events = DomainEvents::new();
    let id = UniqueEntityIdGenerator.generate();
    let mut cart = Cart {
        root: AggregateRoot::new(id.clone(), &events),
        items: Vec::new(),
    };
    cart.add_domain_event(CartCreated {
        aggregate_id: cart.id().clone(),
        occurred_at: Utc::now(),
    });

    assert_eq!(cart.domain_events().len(), 1);
    assert!(events.is_marked(&id));
    assert!(cart.items.is_empty());
    let _ = format!("{:?}", cart);
}
