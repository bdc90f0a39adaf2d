use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ethwire::abi::ParamType;
use ethwire::rlp::{self, RlpItem};
use ethwire::tx::{AccessListEntry, Eip1559Transaction, TransactionEnvelope, TransactionRequest};
use ethwire::types::{Address, Bytes, H256, U256};

/// Benchmark canonical type parsing
fn bench_type_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("type_parsing");

    for ty in &["uint256", "int24[5][]", "bytes32[2][3][4]", "address[][][][][][][]"] {
        group.bench_with_input(BenchmarkId::from_parameter(ty), ty, |b, ty| {
            b.iter(|| ParamType::parse(black_box(ty)))
        });
    }

    group.finish();
}

/// Benchmark RLP encoding of strings and nested lists
fn bench_rlp_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("rlp_encoding");

    for size in &[1usize, 55, 56, 1024, 65536] {
        let payload = vec![0xabu8; *size];
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("string", size), &payload, |b, payload| {
            b.iter(|| rlp::encode(black_box(payload.as_slice())))
        });
    }

    let nested = RlpItem::List(
        (0..64)
            .map(|i| RlpItem::List(vec![RlpItem::uint(i), RlpItem::String(vec![i as u8; 32])]))
            .collect(),
    );
    group.bench_function("nested_list", |b| b.iter(|| rlp::encode(black_box(&nested))));

    group.finish();
}

/// Benchmark envelope serialization, with and without text normalization
fn bench_transaction_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction_serialization");

    for keys in &[0usize, 8, 64] {
        let envelope = TransactionEnvelope::from(Eip1559Transaction {
            chain_id: 1,
            nonce: 42,
            max_priority_fee_per_gas: U256::from(1_000_000_000u64),
            max_fee_per_gas: U256::from(30_000_000_000u64),
            gas: 100_000,
            to: Some(Address::from_bytes([0x35; 20])),
            value: U256::from(1_000_000_000_000_000_000u64),
            data: Some(Bytes::from_vec(vec![0xa9; 68])),
            access_list: vec![AccessListEntry::new(
                Address::from_bytes([0x11; 20]),
                (0..*keys).map(|i| H256::from_low_u64_be(i as u64)).collect(),
            )],
            ..Default::default()
        });

        group.bench_with_input(BenchmarkId::new("eip1559", keys), &envelope, |b, envelope| {
            b.iter(|| black_box(envelope).serialize())
        });
    }

    let request = TransactionRequest {
        tx_type: Some("0x2".to_string()),
        chain_id: Some("0x1".to_string()),
        nonce: Some("0x2a".to_string()),
        max_priority_fee_per_gas: Some("0x3b9aca00".to_string()),
        max_fee_per_gas: Some("0x6fc23ac00".to_string()),
        gas: Some("0x186a0".to_string()),
        to: Some(format!("0x{}", "35".repeat(20))),
        value: Some("0xde0b6b3a7640000".to_string()),
        data: Some(format!("0x{}", "a9".repeat(68))),
        ..Default::default()
    };
    group.bench_function("request_to_wire", |b| b.iter(|| black_box(&request).serialize()));

    group.finish();
}

criterion_group!(
    benches,
    bench_type_parsing,
    bench_rlp_encoding,
    bench_transaction_serialization
);
criterion_main!(benches);
