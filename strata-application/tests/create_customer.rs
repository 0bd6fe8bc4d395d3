#![cfg(feature = "validator")]

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use strata_application::validator::SchemaValidator;
use strata_application::{Dependent, Failed, UseCase};
use strata_domain::Either;
use strata_domain::entity;
use strata_domain::entity::Entity;
use strata_domain::id::{IdGenerator, UniqueEntityIdGenerator};
use strata_domain::repository::{InMemoryRepository, Repository};
use validator::Validate;

#[entity]
#[derive(Clone)]
struct Customer {
    name: String,
    age: u32,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateCustomerParams {
    #[validate(length(min = 1, message = "name is required"))]
    name: String,
    age: u32,
}

struct CreateCustomerDeps {
    customers: Arc<InMemoryRepository<Customer>>,
}

#[derive(Default)]
struct Calls {
    performed: AtomicUsize,
    failures: AtomicUsize,
    post: AtomicUsize,
}

struct CreateCustomer {
    deps: CreateCustomerDeps,
    validator: SchemaValidator<CreateCustomerParams>,
    calls: Calls,
}

impl CreateCustomer {
    fn new(customers: Arc<InMemoryRepository<Customer>>) -> Self {
        Self {
            deps: CreateCustomerDeps { customers },
            validator: SchemaValidator::new(),
            calls: Calls::default(),
        }
    }
}

impl Dependent for CreateCustomer {
    type Deps = CreateCustomerDeps;

    fn deps(&self) -> &CreateCustomerDeps {
        &self.deps
    }
}

#[derive(Debug, PartialEq)]
enum CreateCustomerError {
    AlreadyExists,
}

#[async_trait]
impl UseCase for CreateCustomer {
    const NAME: &'static str = "create_customer";
    type Validator = SchemaValidator<CreateCustomerParams>;
    type Params = CreateCustomerParams;
    type Failure = CreateCustomerError;
    type Success = Customer;

    fn validator(&self) -> &Self::Validator {
        &self.validator
    }

    async fn perform(&self, params: &CreateCustomerParams) -> Either<CreateCustomerError, Customer> {
        self.calls.performed.fetch_add(1, Ordering::SeqCst);

        let customers = &self.deps().customers;
        if customers.any(|c| c.name == params.name) {
            return Either::Failure(CreateCustomerError::AlreadyExists);
        }

        let customer = Customer {
            id: UniqueEntityIdGenerator.generate(),
            name: params.name.clone(),
            age: params.age,
        };
        customers.create(customer.clone()).await.expect("in-memory create");
        Either::Success(customer)
    }

    async fn handle_failure(&self, _failure: Failed<'_, Self>) {
        self.calls.failures.fetch_add(1, Ordering::SeqCst);
    }

    async fn post_execute(
        &self,
        _params: &CreateCustomerParams,
        _result: &Either<CreateCustomerError, Customer>,
    ) {
        self.calls.post.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn creates_customer() {
    let repo = Arc::new(InMemoryRepository::new());
    let uc = CreateCustomer::new(Arc::clone(&repo));

    let customer = uc
        .execute(json!({ "name": "John", "age": 20 }))
        .await
        .success()
        .unwrap();

    assert_eq!(customer.name, "John");
    assert_eq!(customer.age, 20);
    assert!(repo.exists(&customer).await.unwrap());
    assert_eq!(repo.get_by_id(customer.id()).await.unwrap().unwrap().name, "John");
    assert_eq!(uc.calls.post.load(Ordering::SeqCst), 1);
    assert_eq!(uc.calls.failures.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejects_duplicate_name() {
    let repo = Arc::new(InMemoryRepository::new());
    let uc = CreateCustomer::new(Arc::clone(&repo));

    assert!(uc.execute(json!({ "name": "John", "age": 20 })).await.is_success());
    let failure = uc
        .execute(json!({ "name": "John", "age": 31 }))
        .await
        .failure()
        .unwrap();

    assert_eq!(failure.domain(), Some(&CreateCustomerError::AlreadyExists));
    assert_eq!(repo.len(), 1);
    assert_eq!(uc.calls.failures.load(Ordering::SeqCst), 1);
    assert_eq!(uc.calls.post.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn invalid_input_never_reaches_perform() {
    let repo = Arc::new(InMemoryRepository::new());
    let uc = CreateCustomer::new(Arc::clone(&repo));

    let failure = uc
        .execute(json!({ "name": "", "age": 20 }))
        .await
        .failure()
        .unwrap();
    let error = failure.validation().unwrap();
    assert_eq!(error.issues_at("name").count(), 1);

    let failure = uc
        .execute(json!({ "name": "Jane", "age": "old" }))
        .await
        .failure()
        .unwrap();
    assert!(failure.is_validation());

    assert_eq!(uc.calls.performed.load(Ordering::SeqCst), 0);
    assert_eq!(uc.calls.failures.load(Ordering::SeqCst), 2);
    assert_eq!(uc.calls.post.load(Ordering::SeqCst), 0);
    assert!(repo.is_empty());
}
