mod common;

use common::{
    RecordingGateway, checkout_input, complete_use_case, create_use_case, payment_input,
    seed_product,
};
use storefront_checkout::config::FeeSchedule;
use storefront_checkout::domain::TransactionStatus;
use storefront_checkout::domain::ports::{DeliveryStore, ProductStore, TransactionStore};
use storefront_checkout::infrastructure::in_memory::InMemoryStore;

#[tokio::test]
async fn approved_checkout_end_to_end() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    gateway.enqueue_status("gw-1", "APPROVED");
    let product = seed_product(&store, 15_000_000, 25).await;

    let created = create_use_case(&store, FeeSchedule::default())
        .execute(checkout_input(product.id, 2, "jane@example.com"))
        .await
        .unwrap()
        .value();
    assert_eq!(created.status, TransactionStatus::Pending);
    assert_eq!(created.amount_cents, 30_000_000);
    assert_eq!(created.total_cents, 31_500_000);

    let completed = complete_use_case(&store, &gateway)
        .execute(payment_input(created.id))
        .await
        .unwrap()
        .value();

    assert_eq!(completed.status, TransactionStatus::Approved);
    assert_eq!(completed.gateway_transaction_id.as_deref(), Some("gw-1"));

    // The charge carried the transaction's money, reference and customer.
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_cents, 31_500_000);
    assert_eq!(requests[0].currency, "COP");
    assert_eq!(requests[0].reference, created.reference);
    assert_eq!(requests[0].customer_email, "jane@example.com");

    // Side effects: stock down by quantity, one pending delivery at the
    // customer's address.
    let product = ProductStore::find_by_id(&store, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock, 23);
    let delivery = DeliveryStore::find_by_transaction(&store, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(delivery.address, "Calle 1 # 2-3");
    assert_eq!(delivery.city, "Bogota");
}

#[tokio::test]
async fn declined_checkout_settles_without_side_effects() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    gateway.enqueue_status("gw-2", "DECLINED");
    let product = seed_product(&store, 15_000_000, 25).await;

    let created = create_use_case(&store, FeeSchedule::default())
        .execute(checkout_input(product.id, 1, "jane@example.com"))
        .await
        .unwrap()
        .value();

    // A declined card is a successful execution, not a failure.
    let completed = complete_use_case(&store, &gateway)
        .execute(payment_input(created.id))
        .await
        .unwrap()
        .value();
    assert_eq!(completed.status, TransactionStatus::Declined);

    let product = ProductStore::find_by_id(&store, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock, 25);
    assert_eq!(store.delivery_count().await, 0);
}

#[tokio::test]
async fn gateway_outage_poisons_the_transaction_for_good() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    gateway.enqueue_error("connect timeout");
    let product = seed_product(&store, 15_000_000, 25).await;

    let created = create_use_case(&store, FeeSchedule::default())
        .execute(checkout_input(product.id, 1, "jane@example.com"))
        .await
        .unwrap()
        .value();

    let complete = complete_use_case(&store, &gateway);
    let failed = complete
        .execute(payment_input(created.id))
        .await
        .unwrap();
    let message = failed.error();
    assert!(message.contains("Payment gateway error"), "{message}");

    let reloaded = TransactionStore::find_by_id(&store, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, TransactionStatus::Error);

    // ERROR is terminal: a fresh attempt is rejected before the gateway,
    // even though the gateway has recovered.
    gateway.enqueue_status("gw-3", "APPROVED");
    let retry = complete.execute(payment_input(created.id)).await.unwrap();
    assert_eq!(retry.error(), "Transaction is not in PENDING status");
    assert_eq!(gateway.requests().len(), 1);
}

#[tokio::test]
async fn repeat_orders_reuse_the_customer() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    gateway.enqueue_status("gw-4", "APPROVED");
    gateway.enqueue_status("gw-5", "APPROVED");
    let product = seed_product(&store, 8_000_000, 40).await;

    let create = create_use_case(&store, FeeSchedule::default());
    let complete = complete_use_case(&store, &gateway);

    let first = create
        .execute(checkout_input(product.id, 1, "jane@example.com"))
        .await
        .unwrap()
        .value();
    complete
        .execute(payment_input(first.id))
        .await
        .unwrap()
        .value();

    let second = create
        .execute(checkout_input(product.id, 3, "jane@example.com"))
        .await
        .unwrap()
        .value();
    complete
        .execute(payment_input(second.id))
        .await
        .unwrap()
        .value();

    assert_eq!(store.customer_count().await, 1);
    assert_eq!(second.customer_id, first.customer_id);
    assert_ne!(second.reference, first.reference);

    // Both deliveries exist and stock reflects both orders.
    assert_eq!(store.delivery_count().await, 2);
    let product = ProductStore::find_by_id(&store, product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock, 36);
}

#[tokio::test]
async fn oversell_is_rejected_at_creation() {
    let store = InMemoryStore::new();
    let product = seed_product(&store, 8_000_000, 2).await;

    let outcome = create_use_case(&store, FeeSchedule::default())
        .execute(checkout_input(product.id, 5, "jane@example.com"))
        .await
        .unwrap();
    assert_eq!(outcome.error(), "Insufficient stock");

    // Nothing was persisted for the failed attempt.
    assert_eq!(store.customer_count().await, 0);
}
