//! Proptest strategies for the record types the list screens sort.

use chrono::Duration;
use codearena_domain::{
    Difficulty, Measurement, Problem, SubmissionRecord, SubmissionStatus, Topic,
};
use proptest::prelude::*;

use crate::builders::{reference_time, ProblemBuilder, SubmissionBuilder};

/// Milliseconds or `N/A`
pub fn arb_runtime() -> impl Strategy<Value = Measurement> {
    prop_oneof![
        4 => (1u32..500).prop_map(|ms| Measurement::Millis(ms as f64)),
        1 => Just(Measurement::NotAvailable),
    ]
}

/// Megabytes with one decimal or `N/A`
pub fn arb_memory() -> impl Strategy<Value = Measurement> {
    prop_oneof![
        4 => (100u32..1000).prop_map(|tenths| Measurement::Megabytes(tenths as f64 / 10.0)),
        1 => Just(Measurement::NotAvailable),
    ]
}

pub fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

pub fn arb_status() -> impl Strategy<Value = SubmissionStatus> {
    prop::sample::select(SubmissionStatus::ALL.to_vec())
}

/// Submissions with ids `s0..` in generation order
pub fn arb_submissions(max: usize) -> impl Strategy<Value = Vec<SubmissionRecord>> {
    prop::collection::vec(
        (arb_status(), arb_runtime(), arb_memory(), 0i64..60 * 24 * 40),
        0..max,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (status, runtime, memory, minutes))| {
                SubmissionBuilder::new()
                    .id(format!("s{i}"))
                    .status(status)
                    .runtime(runtime)
                    .memory(memory)
                    .timestamp(reference_time() - Duration::minutes(minutes))
                    .build()
            })
            .collect()
    })
}

/// Problems with ids `p0..` in generation order
pub fn arb_problems(max: usize) -> impl Strategy<Value = Vec<Problem>> {
    prop::collection::vec(
        (
            arb_difficulty(),
            0u32..1000,
            0u8..=100,
            prop::collection::vec(prop::sample::select(Topic::ALL.to_vec()), 0..3),
        ),
        0..max,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (difficulty, popularity, rate, topics))| {
                ProblemBuilder::new()
                    .id(format!("p{i}"))
                    .difficulty(difficulty)
                    .popularity(popularity)
                    .success_rate(rate)
                    .topics(topics)
                    .build()
            })
            .collect()
    })
}
