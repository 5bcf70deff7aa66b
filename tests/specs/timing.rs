// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer cadence, catch-up, and retry behavior

use crate::prelude::{CounterJob, FlakyJob};
use chime_core::{every, JobConfig, Schedule};
use chime_scheduler::Scheduler;
use chrono::Local;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn repeating_job_fires_on_its_cadence() {
    let scheduler = Arc::new(Scheduler::new());
    let job = CounterJob::new();
    scheduler
        .add("tick", job.clone(), Schedule::every(every(100).milliseconds()))
        .unwrap();

    let running = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move { scheduler.start().await }
    });

    tokio::time::sleep(Duration::from_millis(350)).await;
    scheduler.cancel("tick");

    let runs = job.runs();
    assert!(runs >= 2, "expected at least two firings in 350ms, got {runs}");
    assert!(runs <= 4, "expected at most four firings in 350ms, got {runs}");
    tokio::time::timeout(Duration::from_secs(1), running)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn stale_anchor_catches_up_to_the_next_boundary() {
    let scheduler = Scheduler::new();
    let job = CounterJob::new();

    // anchored a second in the past with a 300ms period: the overdue
    // boundaries are consumed, so the run lands about 200ms out, not
    // immediately and not a full fresh 300ms away
    let schedule = Schedule::each("300ms").anchor(Local::now() - Duration::from_millis(1000));
    scheduler.add("catchup", job.clone(), schedule).unwrap();

    let begin = Instant::now();
    // each-only schedules are one-shot, so start returns after the run
    scheduler.start().await;
    let elapsed = begin.elapsed();

    assert_eq!(job.runs(), 1);
    assert!(
        elapsed >= Duration::from_millis(120),
        "fired too early: {elapsed:?}"
    );
    assert!(
        elapsed <= Duration::from_millis(290),
        "fired too late: {elapsed:?}"
    );
}

#[tokio::test]
async fn failing_one_shot_spends_exactly_its_retry_budget() {
    let scheduler = Scheduler::new();
    let job = FlakyJob::failing();
    let config = JobConfig::new(Schedule::each("20ms")).retries(2);
    scheduler.add_with("flaky", job.clone(), config).unwrap();

    tokio::time::timeout(Duration::from_secs(1), scheduler.start())
        .await
        .unwrap();

    assert_eq!(job.attempts(), 3, "one initial attempt plus two retries");
}

#[tokio::test]
async fn retries_stop_at_the_first_success() {
    let scheduler = Scheduler::new();
    let job = FlakyJob::succeeding_on(2);
    let config = JobConfig::new(Schedule::each("20ms")).retries(5);
    scheduler.add_with("flaky", job.clone(), config).unwrap();

    tokio::time::timeout(Duration::from_secs(1), scheduler.start())
        .await
        .unwrap();

    assert_eq!(job.attempts(), 2);
}

#[tokio::test]
async fn exhausted_retries_do_not_stop_the_schedule() {
    let scheduler = Arc::new(Scheduler::new());
    let job = FlakyJob::failing();
    let config = JobConfig::new(Schedule::every(every(80).milliseconds())).retries(1);
    scheduler.add_with("flaky", job.clone(), config).unwrap();

    let running = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move { scheduler.start().await }
    });

    tokio::time::sleep(Duration::from_millis(380)).await;
    scheduler.cancel("flaky");
    tokio::time::timeout(Duration::from_secs(1), running)
        .await
        .unwrap()
        .unwrap();

    // two attempts per firing, and the failure never unscheduled the job
    let attempts = job.attempts();
    assert!(attempts >= 4, "expected at least two firings, got {attempts} attempts");
    assert_eq!(attempts % 2, 0, "attempts always come in pairs of two");
}
