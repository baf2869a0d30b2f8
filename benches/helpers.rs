use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;
use voca_client::{
    QueryParams, SearchResponse, build_query_string, no_results, pos_tag_to_readable,
    specific_word_type,
};

fn bench_query_strings(c: &mut Criterion) {
    const CASES: &[(&str, usize)] = &[("small", 3), ("medium", 16), ("large", 128)];
    for &(label, size) in CASES {
        let params: QueryParams = (0..size)
            .map(|i| (format!("key {i}"), if i % 4 == 0 { String::new() } else { format!("v&{i}") }))
            .collect();
        c.bench_with_input(BenchmarkId::new("build_query_string", label), &params, |b, params| {
            b.iter(|| black_box(build_query_string(Some(params))));
        });
    }
}

fn bench_labels(c: &mut Criterion) {
    const TAGS: &[&str] = &["NN", "JJR", "VBZ extra", "WP$", "ZZ"];
    c.bench_function("pos_tag_to_readable", |b| {
        b.iter(|| {
            for tag in TAGS {
                black_box(pos_tag_to_readable(tag));
            }
        });
    });

    const LABELS: &[&str] = &["Noun (singular)", "Verb", "Verb (past part.", ""];
    c.bench_function("specific_word_type", |b| {
        b.iter(|| {
            for label in LABELS {
                black_box(specific_word_type(label));
            }
        });
    });
}

fn bench_no_results(c: &mut Criterion) {
    let groups: Vec<_> = (0..64)
        .map(|i| json!({ "word": format!("w{i}"), "pos": "NN", "sentences": [] }))
        .collect();
    let response: SearchResponse =
        serde_json::from_value(json!({ "sentences": groups, "forms": [] })).expect("valid payload");
    c.bench_function("no_results::all_empty", |b| {
        b.iter(|| black_box(no_results(&response)));
    });
}

criterion_group!(benches, bench_query_strings, bench_labels, bench_no_results);
criterion_main!(benches);
