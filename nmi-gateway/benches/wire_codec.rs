//! Benchmarks for request flattening and report normalization.
//!
//! Run with: `cargo bench --bench wire_codec`

#![allow(clippy::let_underscore_must_use, reason = "Criterion benchmarks ignore results")]
#![allow(missing_docs, reason = "Benchmark functions are self-documenting")]

use std::{fmt::Write as _, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nmi_gateway::{
    normalize::{Encoding, RawResponse, normalize},
    request::{LineItem, transaction::{Sale, TransactionRequest}},
    response::{CustomerVaultReport, TransactionReport},
    wire::{CustomFieldMap, OperationRequest},
};
use rust_decimal::Decimal;

fn sale_with_items(count: usize) -> Sale {
    let products = (0..count)
        .map(|i| LineItem {
            item_product_code: Some(format!("SKU-{i}")),
            item_description: Some("Widget".to_owned()),
            item_unit_cost: Some(Decimal::new(1999, 2)),
            item_quantity: Some(Decimal::ONE),
            item_total_amount: Some(Decimal::new(1999, 2)),
            ..LineItem::default()
        })
        .collect();

    let mut custom_fields = CustomFieldMap::new();
    custom_fields.insert("channel", "web");
    custom_fields.insert("campaign", "spring");

    Sale(TransactionRequest {
        ccnumber: Some("4111111111111111".to_owned()),
        ccexp: Some("1025".to_owned()),
        amount: Some(Decimal::new(1999, 2) * Decimal::from(count)),
        products,
        custom_fields,
        ..TransactionRequest::default()
    })
}

fn transaction_report(count: usize) -> String {
    let mut body = String::from("<nm_response>");
    for i in 0..count {
        let _ = write!(
            body,
            "<transaction><transaction_id>{i}</transaction_id><condition>complete</condition>\
             <action><amount>19.99</amount><action_type>sale</action_type></action></transaction>"
        );
    }
    body.push_str("</nm_response>");
    body
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_sale");

    for count in [0_usize, 10, 100] {
        let sale = sale_with_items(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &sale, |b, sale| {
            b.iter(|| {
                let request = OperationRequest::from_operation(black_box(sale)).ok()?;
                Some(black_box(request.flatten()))
            });
        });
    }

    group.finish();
}

fn bench_normalize_xml(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_transaction_report");

    for count in [1_usize, 50, 500] {
        let raw = RawResponse { status: 200, body: transaction_report(count), encoding: Encoding::Xml };
        group.bench_with_input(BenchmarkId::from_parameter(count), &raw, |b, raw| {
            b.iter(|| black_box(normalize::<TransactionReport>(black_box(raw))));
        });
    }

    group.finish();
}

fn bench_normalize_empty_vault(c: &mut Criterion) {
    let raw = RawResponse {
        status: 200,
        body: "<nm_response></nm_response>".to_owned(),
        encoding: Encoding::Xml,
    };

    c.bench_function("normalize_empty_vault", |b| {
        b.iter(|| black_box(normalize::<CustomerVaultReport>(black_box(&raw))));
    });
}

criterion_group!(benches, bench_flatten, bench_normalize_xml, bench_normalize_empty_vault);
criterion_main!(benches);
