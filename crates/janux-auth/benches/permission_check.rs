//! Benchmark: permission check cost
//!
//! # Background
//!
//! Every guarded operation runs `has_permissions`, which resolves names
//! through the context's `IndexMap` and masks against the stored grant.
//! This measures the name lookup against the raw mask path, and how the
//! cost grows with context width.
//!
//! # When to revisit
//!
//! - If checks start taking many names per call
//! - If the grant map moves off `IndexMap`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use janux_auth::{AuthorizationContext, AuthorizationHolder};
use std::sync::Arc;

fn wide_context(bits: u32) -> Arc<AuthorizationContext> {
    let names: Vec<String> = (0..bits).map(|i| format!("BIT_{i}")).collect();
    Arc::new(AuthorizationContext::with_bits("WIDE", "Wide", &names).expect("context"))
}

fn bench_single_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("permission_check");

    let person = Arc::new(
        AuthorizationContext::with_bits("PERSON", "Person", ["READ", "UPDATE", "DELETE"])
            .expect("context"),
    );
    let mut holder = AuthorizationHolder::new("clerk");
    holder.grant(["READ", "UPDATE"], &person).expect("grant");

    group.bench_function("has_permission/granted", |b| {
        b.iter(|| black_box(holder.has_permission(black_box("READ"), "PERSON")));
    });

    group.bench_function("has_permission/denied", |b| {
        b.iter(|| black_box(holder.has_permission(black_box("DELETE"), "PERSON")));
    });

    group.bench_function("has_permission/no_grant", |b| {
        b.iter(|| black_box(holder.has_permission(black_box("READ"), "ACCOUNT")));
    });

    group.bench_function("permissions_as_number", |b| {
        b.iter(|| black_box(person.permissions_as_number(black_box(["READ", "UPDATE"]))));
    });

    group.finish();
}

fn bench_wide_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("permission_check_wide");

    for bits in [8_u32, 32, 64] {
        let ctx = wide_context(bits);
        let names: Vec<String> = (0..bits).map(|i| format!("BIT_{i}")).collect();

        let mut holder = AuthorizationHolder::new("admin");
        holder.grant(ctx.max_value(), &ctx).expect("grant");

        group.throughput(Throughput::Elements(u64::from(bits)));
        group.bench_with_input(BenchmarkId::new("all_names", bits), &names, |b, names| {
            b.iter(|| black_box(holder.has_permissions(names, "WIDE")));
        });

        group.bench_with_input(BenchmarkId::new("names_for_mask", bits), &ctx, |b, ctx| {
            b.iter(|| black_box(ctx.names_for_mask(black_box(ctx.max_value()))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_check, bench_wide_context);
criterion_main!(benches);
