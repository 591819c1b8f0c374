//! Benchmarks for equation generation.
//!
//! Includes:
//! - Each generation mode at its default settings
//! - Grade school scaling over the unknown count
//! - Pattern-override generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use certus::prelude::*;

/// Benchmark each mode at defaults.
fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("modes");

    let basic = GenerationConfig::new(Mode::BasicMath(BasicMathConfig::default()));
    group.bench_function("basic_math", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(generate_seeded(&basic, seed))
        })
    });

    let quiz = GenerationConfig::new(Mode::SimpleQuiz(SimpleQuizConfig::default()));
    group.bench_function("simple_quiz", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(generate_seeded(&quiz, seed))
        })
    });

    let grade = GenerationConfig::new(Mode::GradeSchool(GradeSchoolConfig::default()));
    group.bench_function("grade_school", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(generate_seeded(&grade, seed))
        })
    });

    group.finish();
}

/// Benchmark grade school over the unknown count.
fn bench_grade_school_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade_school_unknowns");

    for unknowns in [1usize, 2, 3] {
        let config = GenerationConfig::new(Mode::GradeSchool(GradeSchoolConfig {
            num_unknowns: unknowns,
            operations: vec![Op::Add, Op::Sub, Op::Mul],
            max_value: 60,
            allow_decimals: false,
        }));
        group.bench_with_input(
            BenchmarkId::from_parameter(unknowns),
            &config,
            |b, config| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    black_box(generate_seeded(config, seed))
                })
            },
        );
    }

    group.finish();
}

/// Benchmark pattern-override generation.
fn bench_patterns(c: &mut Criterion) {
    let config = GenerationConfig::new(Mode::GradeSchool(GradeSchoolConfig::default()))
        .with_patterns(vec![
            EquationPattern::new("{x} + {y} = {c1}"),
            EquationPattern::new("{x} - {y} = {c2}"),
        ]);
    c.bench_function("patterns", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(generate_seeded(&config, seed))
        })
    });
}

criterion_group!(
    benches,
    bench_modes,
    bench_grade_school_scaling,
    bench_patterns
);
criterion_main!(benches);
