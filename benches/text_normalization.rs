//! Benchmarks for turning post HTML into speech text
//!
//! This benchmark measures:
//! - Normalization of short, typical and oversized posts
//! - Request assembly on top of normalized text

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use post_tts::text::TextNormalizer;
use post_tts::tts::build;

const SHORT_POST: &str = "<h2>Setup</h2><p>Open Settings &amp; choose a voice.</p>";

fn typical_post() -> String {
    let mut html = String::new();
    for i in 0..20 {
        html.push_str(&format!(
            "<h3>Step {i}</h3><p>Go to <strong>Left &gt; IAM &amp; Admin</strong> \
             and click &ldquo;Create&rdquo;&hellip; [caption id=\"{i}\"]<img src=\"a.png\" \
             alt=\"Screenshot {i}\">[/caption] At 10:{i:02} it's ready!</p>\n"
        ));
    }
    html
}

fn oversized_post() -> String {
    "<p>Lorem ipsum dolor sit amet, consectetur adipiscing elit; sed do eiusmod.</p>".repeat(400)
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = TextNormalizer::for_encoding("UTF-8");
    let mut group = c.benchmark_group("normalize");

    let inputs = [
        ("short", SHORT_POST.to_string()),
        ("typical", typical_post()),
        ("oversized", oversized_post()),
    ];
    for (name, html) in &inputs {
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("html", name), html, |b, html| {
            b.iter(|| normalizer.normalize(black_box(html)))
        });
    }

    group.finish();
}

fn bench_request_build(c: &mut Criterion) {
    let text = TextNormalizer::for_encoding("UTF-8").normalize(&typical_post());

    c.bench_function("build_request", |b| {
        b.iter(|| build(black_box("en-GB"), black_box("en-GB-Wavenet-C"), "calm", &text))
    });
}

criterion_group!(benches, bench_normalize, bench_request_build);
criterion_main!(benches);
