//! Order Hashing Benchmarks — Signing-Path Performance
//!
//! Benchmarks the EIP-712 struct hash, the full order hash (domain
//! separator included), and signing, the hot path when building orders
//! in bulk.
//!
//! Run with: cargo bench --bench order_hash

use alloy::primitives::{address, Address, U256};
use alloy::signers::local::PrivateKeySigner;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use zeroex_mesh_demo::domain::asset_data::encode_erc20;
use zeroex_mesh_demo::domain::order::Order;

fn sample_order() -> Order {
    Order {
        chain_id: 1337,
        exchange_address: address!("48bacb9266a570d521063ef5dd96e61686dbe788"),
        maker_address: address!("5409ed021d9299bf6814279a6a1411a7e866a631"),
        taker_address: address!("6ecbe1db9ef729cbe972c83fb886247691fb6beb"),
        fee_recipient_address: address!("e36ea790bc9d7ab70c55260c66d52b1eca985f84"),
        sender_address: Address::ZERO,
        maker_asset_amount: U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64)),
        taker_asset_amount: U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64)),
        maker_fee: U256::ZERO,
        taker_fee: U256::ZERO,
        expiration_time_seconds: U256::from(1_700_000_000u64),
        salt: U256::from(41_253_767u64),
        maker_asset_data: encode_erc20(address!("34d402f14d58e001d8efbe6585051bf9706aa064")),
        taker_asset_data: encode_erc20(address!("25b8fe1de9daf8ba351890744ff28cf7dfa8f5e3")),
        maker_fee_asset_data: encode_erc20(address!("34d402f14d58e001d8efbe6585051bf9706aa064")),
        taker_fee_asset_data: encode_erc20(address!("25b8fe1de9daf8ba351890744ff28cf7dfa8f5e3")),
    }
}

/// Benchmark the EIP-712 struct hash alone.
fn bench_hash_struct(c: &mut Criterion) {
    let order = sample_order();

    c.bench_function("order_hash_struct", |b| {
        b.iter(|| black_box(&order).hash_struct());
    });
}

/// Benchmark the full order hash (domain separator + struct hash).
fn bench_order_hash(c: &mut Criterion) {
    let order = sample_order();

    c.bench_function("order_hash_full", |b| {
        b.iter(|| black_box(&order).order_hash());
    });
}

/// Benchmark hashing plus ECDSA signing.
fn bench_sign(c: &mut Criterion) {
    let order = sample_order();
    let signer: PrivateKeySigner =
        "0xf2f48ee19680706196e2e339e5da3491186e0c4c5030670656b0e0164837257d"
            .parse()
            .unwrap();

    c.bench_function("order_sign", |b| {
        b.iter(|| black_box(order.clone()).sign(&signer).unwrap());
    });
}

criterion_group!(benches, bench_hash_struct, bench_order_hash, bench_sign);
criterion_main!(benches);
