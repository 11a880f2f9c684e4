use common::{Customer, Money, Product};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{OrderLineRequest, OrderLimits, OrderPlacementService, PlaceOrder, Stores, reconcile};
use store::{InMemoryCustomerStore, InMemoryOrderStore, InMemoryProductStore};

fn catalog(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| {
            Product::new(
                format!("SKU-{i:04}"),
                format!("Widget {i}"),
                Money::from_cents(1000),
                u32::MAX,
            )
        })
        .collect()
}

fn lines_for(products: &[Product]) -> Vec<OrderLineRequest> {
    products
        .iter()
        .map(|p| OrderLineRequest::new(p.id.clone(), 1))
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let products = catalog(50);
    let requested = lines_for(&products);

    c.bench_function("domain/reconcile_50_lines", |b| {
        b.iter(|| reconcile(&products, &requested).unwrap());
    });
}

fn bench_place_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let products = catalog(10);
    let requested = lines_for(&products);

    let customers = InMemoryCustomerStore::new();
    let product_store = InMemoryProductStore::new();
    rt.block_on(async {
        customers
            .insert(Customer::new("C-BENCH", "Bench", "bench@example.com"))
            .await;
        for product in products {
            product_store.insert(product).await;
        }
    });

    let service = OrderPlacementService::new(Stores::new(
        customers,
        product_store,
        InMemoryOrderStore::new(),
    ))
    .with_limits(OrderLimits { max_lines: 10 });

    c.bench_function("domain/place_order_10_lines", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .place_order(PlaceOrder::new("C-BENCH", requested.clone()))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_reconcile, bench_place_order);
criterion_main!(benches);
