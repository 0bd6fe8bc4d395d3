//! 端到端示例：用例创建聚合，持久化成功后派发领域事件
//!
//! 运行：`RUST_LOG=debug cargo run -p strata-application --example create_customer`
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use strata_application::validator::SchemaValidator;
use strata_application::{Dependent, Failed, UseCase};
use strata_domain::Either;
use strata_domain::aggregate::Aggregate;
use strata_domain::aggregate_root::AggregateRoot;
use strata_domain::chrono::Utc;
use strata_domain::domain_event::{DomainEvents, handler_fn};
use strata_domain::entity::Entity;
use strata_domain::error::DomainError;
use strata_domain::id::{IdGenerator, UniqueEntityId, UniqueEntityIdGenerator};
use strata_domain::repository::{InMemoryRepository, Repository};
use strata_domain::{aggregate, domain_event};
use tracing_subscriber::EnvFilter;
use validator::Validate;

#[domain_event(name = "customer.registered")]
struct CustomerRegistered {
    name: String,
}

#[aggregate]
#[derive(Clone)]
struct Customer {
    name: String,
}

impl Customer {
    fn register(name: &str, events: &DomainEvents<UniqueEntityId>) -> Self {
        let id = UniqueEntityIdGenerator.generate();
        let mut customer = Self {
            root: AggregateRoot::new(id.clone(), events),
            name: name.to_owned(),
        };
        customer.add_domain_event(CustomerRegistered {
            aggregate_id: id,
            occurred_at: Utc::now(),
            name: name.to_owned(),
        });
        customer
    }
}

#[derive(Debug, Deserialize, Validate)]
struct RegisterParams {
    #[validate(length(min = 1, max = 64))]
    name: String,
}

struct RegisterDeps {
    customers: Arc<InMemoryRepository<Customer>>,
    events: DomainEvents<UniqueEntityId>,
}

struct RegisterCustomer {
    deps: RegisterDeps,
    validator: SchemaValidator<RegisterParams>,
}

impl Dependent for RegisterCustomer {
    type Deps = RegisterDeps;

    fn deps(&self) -> &RegisterDeps {
        &self.deps
    }
}

#[derive(Debug, thiserror::Error)]
enum RegisterError {
    #[error("customer '{0}' already exists")]
    Duplicate(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[async_trait]
impl UseCase for RegisterCustomer {
    const NAME: &'static str = "register_customer";
    type Validator = SchemaValidator<RegisterParams>;
    type Params = RegisterParams;
    type Failure = RegisterError;
    type Success = Customer;

    fn validator(&self) -> &Self::Validator {
        &self.validator
    }

    async fn perform(&self, params: &RegisterParams) -> Either<RegisterError, Customer> {
        let deps = self.deps();
        if deps.customers.any(|c| c.name == params.name) {
            return Either::Failure(RegisterError::Duplicate(params.name.clone()));
        }

        let customer = Customer::register(&params.name, &deps.events);
        if let Err(err) = deps.customers.create(customer.clone()).await {
            return Either::Failure(err.into());
        }
        // 持久化成功后再派发
        if let Err(err) = deps.events.dispatch_events_for_aggregate(customer.id()) {
            return Either::Failure(err.into());
        }
        Either::Success(customer)
    }

    async fn handle_failure(&self, failure: Failed<'_, Self>) {
        match failure {
            Failed::Validation { error, .. } => println!("rejected input: {error}"),
            Failed::Domain { failure, .. } => println!("failed: {failure}"),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let events = DomainEvents::new();
    events.register::<CustomerRegistered, _>(Arc::new(handler_fn(
        "welcome-mail",
        |e: &CustomerRegistered| {
            println!("welcome, {} ({})", e.name, e.aggregate_id);
            Ok(())
        },
    )));

    let use_case = RegisterCustomer {
        deps: RegisterDeps {
            customers: Arc::new(InMemoryRepository::new()),
            events: events.clone(),
        },
        validator: SchemaValidator::new(),
    };

    for input in [
        json!({ "name": "Ada" }),
        json!({ "name": "Ada" }),
        json!({ "name": "" }),
    ] {
        match use_case.execute(input).await {
            Either::Success(customer) => println!("registered {}", customer.id()),
            Either::Failure(failure) => println!("=> {failure}"),
        }
    }

    println!("pending aggregates: {}", events.marked_count());
}
