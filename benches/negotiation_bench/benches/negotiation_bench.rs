//! Version negotiation benchmarks
//!
//! Measures version parsing, path and `Accept` negotiation, and the version
//! header check on their own, without the async layer stack.

use apiver_core::{IntoResponse, Request, ResponseFuture};
use apiver_versioning::{
    check_version_header, parse_version_token, ApiVersion, MajorVersionRegistry,
    NegotiationConfig, VersionNegotiator, VersionRange,
};
use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn v1(_req: Request) -> ResponseFuture {
    Box::pin(async { "v1".into_response() })
}

fn config() -> NegotiationConfig {
    NegotiationConfig::new(VersionRange::new(ApiVersion::new(1, 0), ApiVersion::new(1, 12)).unwrap())
}

fn request(path: &str, headers: &[(&str, &str)]) -> Request {
    let mut builder = http::Request::builder().uri(path);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Bytes::new()).unwrap().into()
}

/// Benchmark version string parsing
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_parse");

    for text in ["1.0", "1.12", "2.03", "latest"] {
        group.bench_with_input(BenchmarkId::new("major_minor", text), text, |b, text| {
            b.iter(|| ApiVersion::parse(black_box(text)).is_ok())
        });
    }

    group.bench_function("path_token", |b| {
        b.iter(|| parse_version_token(black_box("v1.7")))
    });

    group.finish();
}

/// Benchmark path and Accept negotiation
fn bench_negotiate(c: &mut Criterion) {
    let negotiator =
        VersionNegotiator::new(config(), MajorVersionRegistry::new().version(1, v1));
    let mut group = c.benchmark_group("negotiate");

    group.bench_function("path", |b| {
        b.iter(|| {
            let mut req = request(black_box("/v1.0/clusters/abc"), &[]);
            negotiator.negotiate(&mut req).state()
        })
    });

    group.bench_function("accept", |b| {
        b.iter(|| {
            let mut req = request(
                "/clusters",
                &[("Accept", black_box("text/html, application/vnd.openstack.clustering-v1.0+json"))],
            );
            negotiator.negotiate(&mut req).state()
        })
    });

    group.bench_function("index", |b| {
        b.iter(|| {
            let mut req = request(black_box("/versions"), &[]);
            negotiator.negotiate(&mut req).state()
        })
    });

    group.finish();
}

/// Benchmark the version header check with growing service lists
fn bench_version_header(c: &mut Criterion) {
    let config = config();
    let mut group = c.benchmark_group("version_header");

    for services in [1usize, 4, 16] {
        let mut value: Vec<String> = (0..services).map(|i| format!("service{} 2.{}", i, i)).collect();
        value.push("clustering 1.7".to_string());
        let value = value.join(", ");

        group.bench_with_input(BenchmarkId::new("services", services), &value, |b, value| {
            b.iter(|| {
                let mut req = request("/clusters", &[("OpenStack-API-Version", value.as_str())]);
                check_version_header(&mut req, &config).is_ok()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_negotiate, bench_version_header);

criterion_main!(benches);
