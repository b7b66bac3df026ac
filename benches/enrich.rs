use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio::{enrich, sanitize};

fn article_body(sections: usize) -> String {
    let mut html = String::new();
    for i in 0..sections {
        html.push_str(&format!(
            "<h2>Section {i}</h2><p>Some prose with a <a href=\"https://example.com/{i}\">link</a> \
             and <strong>emphasis</strong>.</p><img src=\"/uploads/{i}.jpg\" alt=\"Photo {i}\">\
             <script>track({i})</script>",
        ));
    }
    html
}

fn bench_sanitize(c: &mut Criterion) {
    let small = article_body(5);
    let large = article_body(100);

    c.bench_function("sanitize small article", |b| {
        b.iter(|| sanitize(black_box(&small)))
    });
    c.bench_function("sanitize large article", |b| {
        b.iter(|| sanitize(black_box(&large)))
    });
}

fn bench_enrich(c: &mut Criterion) {
    let sanitized = sanitize(&article_body(100));

    c.bench_function("enrich large article", |b| {
        b.iter(|| enrich(black_box(&sanitized)))
    });
}

criterion_group!(benches, bench_sanitize, bench_enrich);
criterion_main!(benches);
