//! Gesture Classification Benchmarks
//!
//! Measures per-frame classifier cost for the pose mixes a live camera
//! produces, and stroke planning for the gestures that drive input.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use handgesture_input::gesture::landmarks::{
    INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP,
};
use handgesture_input::gesture::{GestureClassifier, GestureEvent, GestureKind, Landmark};
use handgesture_input::input::{InputSynthesizer, RecordingInjector, SynthesizerConfig, Viewport};

/// Pointing hand with the index tip at (x, y)
fn pointing(x: f32, y: f32) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(x, y + 0.3, 0.0); LANDMARK_COUNT];
    points[INDEX_MCP] = Landmark::new(x, y + 0.1, 0.0);
    points[INDEX_TIP] = Landmark::new(x, y, 0.0);
    points[THUMB_TIP] = Landmark::new(x - 0.2, y + 0.15, 0.0);
    points[MIDDLE_TIP] = Landmark::new(x + 0.02, y + 0.2, 0.0);
    points[RING_TIP] = Landmark::new(x + 0.04, y + 0.2, 0.0);
    points[PINKY_TIP] = Landmark::new(x + 0.06, y + 0.2, 0.0);
    points
}

/// A sequence of frames at 30 FPS for each pose mix
fn sequences() -> Vec<(&'static str, Vec<Vec<Landmark>>)> {
    let still: Vec<_> = (0..300).map(|_| pointing(0.5, 0.5)).collect();

    // Sweeps across the frame fast enough to swipe
    let sweeping: Vec<_> = (0..300)
        .map(|i| pointing(0.1 + 0.8 * ((i % 10) as f32 / 10.0), 0.4))
        .collect();

    let pinching: Vec<_> = (0..300)
        .map(|i| {
            let d = 0.01 + 0.03 * ((i % 20) as f32 / 20.0);
            let mut points = pointing(0.5, 0.5);
            points[THUMB_TIP] = Landmark::new(0.5 - d / 2.0, 0.5, 0.0);
            points[INDEX_TIP] = Landmark::new(0.5 + d / 2.0, 0.5, 0.0);
            points
        })
        .collect();

    vec![("still_point", still), ("sweeping", sweeping), ("pinching", pinching)]
}

/// Benchmark classifying a 10 second stream
fn bench_classify_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_stream");

    for (name, frames) in sequences() {
        group.throughput(Throughput::Elements(frames.len() as u64));
        group.bench_with_input(BenchmarkId::new("30fps_10s", name), &frames, |b, frames| {
            b.iter(|| {
                let mut classifier = GestureClassifier::default();
                let mut emitted = 0usize;
                for (i, frame) in frames.iter().enumerate() {
                    if classifier.classify(black_box(frame), i as u64 * 33).is_some() {
                        emitted += 1;
                    }
                }
                emitted
            })
        });
    }

    group.finish();
}

/// Benchmark the reject path for short landmark lists
fn bench_classify_short_frame(c: &mut Criterion) {
    let short = vec![Landmark::new(0.5, 0.5, 0.0); 5];
    let mut classifier = GestureClassifier::default();

    c.bench_function("classify_short_frame", |b| {
        b.iter(|| classifier.classify(black_box(&short), 0))
    });
}

/// Benchmark stroke planning per gesture kind
fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesizer_plan");
    let synth = InputSynthesizer::new(
        RecordingInjector::new(),
        Viewport::new(1080, 2340).expect("valid viewport"),
        SynthesizerConfig::default(),
    );

    for kind in [GestureKind::Point, GestureKind::SwipeLeft, GestureKind::PinchIn] {
        let event = GestureEvent::new(kind, 0.4, 0.6);
        group.bench_with_input(BenchmarkId::new("plan", kind.as_str()), &event, |b, event| {
            b.iter(|| synth.plan(black_box(event)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classify_stream,
    bench_classify_short_frame,
    bench_plan
);
criterion_main!(benches);
