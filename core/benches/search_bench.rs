use criterion::{criterion_group, criterion_main, Criterion};
use guide_search_core::tokenizer::tokenize;
use guide_search_core::{search, Document, FieldWeights, InvertedIndex, MatchMode, SearchOptions};

fn corpus() -> Vec<Document> {
    (0..200u32)
        .map(|id| Document {
            id,
            url: format!("/guide/{id:02}"),
            title: format!("Chapter {id} pytest selenium appium"),
            content: "fixture parametrize mock webdriver locust pandas matplotlib ".repeat(20),
            category: if id % 2 == 0 { "python".into() } else { "csharp".into() },
            tags: "python testing automation unity".into(),
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = "Selenium WebDriver 元素定位 页面对象模型 web自动化 ".repeat(100);
    c.bench_function("tokenize_page", |b| b.iter(|| tokenize(&text)));
}

fn bench_build(c: &mut Criterion) {
    let docs = corpus();
    c.bench_function("build_200_docs", |b| b.iter(|| InvertedIndex::build(docs.clone(), &FieldWeights::default())));
}

fn bench_search(c: &mut Criterion) {
    let index = InvertedIndex::build(corpus(), &FieldWeights::default());
    let exact = SearchOptions::default();
    let substring = SearchOptions { mode: MatchMode::Substring, ..SearchOptions::default() };
    c.bench_function("search_exact", |b| b.iter(|| search(&index, "pytest fixture", &exact)));
    c.bench_function("search_substring", |b| b.iter(|| search(&index, "webdriver", &substring)));
}

criterion_group!(benches, bench_tokenize, bench_build, bench_search);
criterion_main!(benches);
