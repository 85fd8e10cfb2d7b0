//! Benchmarks for wrapping, screen rendering and reveal stepping.
//! Run with: cargo bench

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ratatui::{backend::TestBackend, Terminal};
use retrochat::adapters::mock::StaticAnswers;
use retrochat::app::{App, Message};
use retrochat::mock_server::mock_answer;
use retrochat::sfx::Sfx;
use retrochat::typewriter::{Typewriter, TypewriterConfig};
use retrochat::ui::{render, wrap_text};

fn answer_text(repeats: usize) -> String {
    (0..repeats)
        .map(|_| mock_answer(3, "bench-session"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn app_with_history(turns: usize) -> App {
    let mut app = App::new(
        Arc::new(StaticAnswers::new()),
        TypewriterConfig::default(),
        Sfx::silent(),
        "bench-session",
    );
    for i in 0..turns {
        app.messages.push(Message::user(format!("question number {}", i)));
        app.messages.push(Message::bot(answer_text(1)));
    }
    app
}

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_text");

    for size in [1, 5, 25].iter() {
        let text = answer_text(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(wrap_text(black_box(text), 76)));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_screen");

    for turns in [1, 10, 50].iter() {
        let app = app_with_history(*turns);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(turns), &app, |b, app| {
            b.iter(|| {
                terminal.draw(|f| render(f, black_box(app))).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_reveal(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let typewriter = Typewriter::new(TypewriterConfig::default().with_interval(Duration::ZERO))
        .with_rng_seed(1);
    let text = answer_text(1);

    c.bench_function("reveal_full_answer", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let mut updates = 0usize;
                typewriter.type_text(black_box(&text), |_| updates += 1).await;
                black_box(updates)
            })
        });
    });
}

criterion_group!(benches, bench_wrap, bench_render, bench_reveal);
criterion_main!(benches);
