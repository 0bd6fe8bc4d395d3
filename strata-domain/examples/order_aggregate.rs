//! 聚合记录事件、仓储保存、事务后派发的完整流程
//!
//! 运行：`RUST_LOG=trace cargo run -p strata-domain --example order_aggregate`
use std::sync::Arc;

use strata_domain::aggregate::Aggregate;
use strata_domain::aggregate_root::AggregateRoot;
use strata_domain::chrono::Utc;
use strata_domain::domain_event::{
    DomainEvent, DomainEvents, DomainEventsConfig, EventHandler, handler_fn,
};
use strata_domain::entity::Entity;
use strata_domain::error::DomainResult;
use strata_domain::id::{IdGenerator, IncrementalEntityId, IncrementalEntityIdGenerator};
use strata_domain::repository::{InMemoryRepository, Repository};
use strata_domain::watched_list::WatchedList;
use strata_domain::{aggregate, domain_event, value_object};
use tracing_subscriber::EnvFilter;

#[value_object]
struct OrderLine {
    sku: String,
    qty: u32,
}

#[domain_event(id = IncrementalEntityId)]
enum OrderEvent {
    Placed { lines: usize },
    #[event(name = "order.line_removed")]
    LineRemoved { sku: String },
}

#[aggregate(id = IncrementalEntityId)]
#[derive(Clone)]
struct Order {
    lines: WatchedList<OrderLine>,
}

impl Order {
    fn place(
        ids: &IncrementalEntityIdGenerator,
        events: &DomainEvents<IncrementalEntityId>,
        lines: Vec<OrderLine>,
    ) -> Self {
        let id = ids.generate();
        let count = lines.len();
        let mut order = Self {
            root: AggregateRoot::new(id, events),
            lines: WatchedList::new(lines, |a: &OrderLine, b: &OrderLine| a.sku == b.sku),
        };
        order.add_domain_event(OrderEvent::Placed {
            aggregate_id: id,
            occurred_at: Utc::now(),
            lines: count,
        });
        order
    }

    fn remove_line(&mut self, sku: &str) {
        let line = OrderLine {
            sku: sku.to_owned(),
            qty: 0,
        };
        if !self.lines.is_current_item(&line) {
            return;
        }
        self.lines.remove(&line);
        let event = OrderEvent::LineRemoved {
            aggregate_id: *self.id(),
            occurred_at: Utc::now(),
            sku: sku.to_owned(),
        };
        self.add_domain_event(event);
    }
}

struct AuditLog;

impl EventHandler<dyn DomainEvent<IncrementalEntityId>> for AuditLog {
    fn handle(&self, event: &dyn DomainEvent<IncrementalEntityId>) -> DomainResult<()> {
        println!(
            "[audit] {} for order {} at {}",
            event.event_name(),
            event.aggregate_id(),
            event.occurred_at()
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let events = DomainEvents::with_config(
        DomainEventsConfig::builder()
            .scope("orders")
            .log_unhandled(true)
            .build(),
    );
    let audit = Arc::new(AuditLog);
    events.register_untyped("OrderEvent.Placed", audit.clone());
    events.register_untyped("order.line_removed", audit);
    events.register_named::<OrderEvent, _>(
        "order.line_removed",
        Arc::new(handler_fn("restock", |e: &OrderEvent| {
            if let OrderEvent::LineRemoved { sku, .. } = e {
                println!("[restock] {sku}");
            }
            Ok(())
        })),
    );

    let ids = IncrementalEntityIdGenerator::new();
    let repo = InMemoryRepository::new();

    let mut order = Order::place(
        &ids,
        &events,
        vec![
            OrderLine {
                sku: "pen".into(),
                qty: 2,
            },
            OrderLine {
                sku: "ink".into(),
                qty: 1,
            },
        ],
    );
    order.remove_line("ink");
    println!("pending events: {}", order.domain_events().len());
    println!("removed lines: {:?}", order.lines.removed_items());

    repo.create(order.clone()).await?;
    events.dispatch_events_for_aggregate(order.id())?;

    println!("pending after dispatch: {}", order.domain_events().len());
    println!("still marked: {}", events.is_marked(order.id()));
    Ok(())
}
