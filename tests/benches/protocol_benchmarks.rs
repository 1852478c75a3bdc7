//! # Asset Protocol Benchmarks
//!
//! Throughput of the hot paths a scanner hits once per transaction:
//!
//! | Path | Work |
//! |------|------|
//! | codec | envelope split + issuance/send decode |
//! | rules | rule-variant lookup by height |
//! | parse | decode + validate + apply against the in-memory ledger |
//! | compose | validate + encode for the transaction builder |

use asset_protocol::codec::{
    decode_envelope, encode_envelope, IssuanceLayout, IssuanceMessage, MessageType, SendMessage,
    DEFAULT_PREFIX, MAX_ENVELOPE_SIZE,
};
use asset_protocol::{rule_variant, AssetProtocolApi, IssuanceRequest, SendRequest, UNIT};
use asset_protocol_tests::fixtures::{plain_issuance, ChainSimulator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use shared_types::{Address, Network};

const FOO: u64 = 4_276_985;

fn long_issuance() -> IssuanceMessage {
    IssuanceMessage {
        asset_id: FOO,
        quantity: 1_000 * UNIT,
        divisible: true,
        card_image: true,
        card_series: 1_400_000_000,
        card_number: 12.5,
        description: "benchmark edition".to_string(),
    }
}

fn funded_simulator() -> ChainSimulator {
    let alice = Address::from("1Alice");
    let mut sim = ChainSimulator::mainnet(320_000)
        .register(FOO, "FOO")
        .fund(&alice, "XCP", 1_000 * UNIT);
    sim.issue(&alice, &plain_issuance(FOO, u64::from(u32::MAX)));
    sim
}

// ============================================================================
// Codec
// ============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let message = long_issuance();
    let body = message.encode(IssuanceLayout::Long).unwrap();
    let envelope =
        encode_envelope(DEFAULT_PREFIX, MessageType::Issuance, &body, MAX_ENVELOPE_SIZE).unwrap();

    group.throughput(Throughput::Bytes(envelope.len() as u64));
    group.bench_function("issuance_decode_long", |b| {
        b.iter(|| {
            let (_, body) = decode_envelope(DEFAULT_PREFIX, black_box(&envelope)).unwrap();
            black_box(IssuanceMessage::decode(body, true).unwrap())
        })
    });
    group.bench_function("issuance_encode_long", |b| {
        b.iter(|| black_box(message.encode(IssuanceLayout::Long).unwrap()))
    });

    let send = SendMessage {
        asset_id: FOO,
        quantity: 42,
        published_balance: Some(1_000),
    }
    .encode();
    group.bench_function("send_decode", |b| {
        b.iter(|| black_box(SendMessage::decode(black_box(&send)).unwrap()))
    });

    group.finish();
}

// ============================================================================
// Rule table
// ============================================================================

fn bench_rule_lookup(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let heights: Vec<u64> = (0..1_000).map(|_| rng.gen_range(0..400_000)).collect();

    c.bench_function("rule_variant_lookup", |b| {
        b.iter(|| {
            for height in &heights {
                black_box(rule_variant(*height, Network::Mainnet));
            }
        })
    });
}

// ============================================================================
// Parse / compose
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let alice = Address::from("1Alice");
    let bob = Address::from("1Bob");

    for sends in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(sends as u64));
        group.bench_with_input(BenchmarkId::new("send_batch", sends), &sends, |b, &sends| {
            b.iter_batched(
                funded_simulator,
                |mut sim| {
                    for _ in 0..sends {
                        black_box(sim.send(&alice, &bob, FOO, 1));
                    }
                    sim
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.bench_function("reissuance", |b| {
        b.iter_batched(
            funded_simulator,
            |mut sim| black_box(sim.issue(&alice, &plain_issuance(FOO, 1))),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let sim = funded_simulator();
    let alice = Address::from("1Alice");
    let issuance = IssuanceRequest::new(alice.clone(), "FOO", 1, true).with_description("more");
    let send = SendRequest::new(alice, Address::from("1Bob"), "FOO", 1);

    let mut group = c.benchmark_group("compose");
    group.bench_function("issuance", |b| {
        b.iter(|| black_box(sim.service().compose_issuance(&issuance).unwrap()))
    });
    group.bench_function("send", |b| {
        b.iter(|| black_box(sim.service().compose_send(&send).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_codec, bench_rule_lookup, bench_parse, bench_compose);
criterion_main!(benches);
