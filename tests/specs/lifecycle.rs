// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration, cancellation, and start lifecycle

use crate::prelude::{CounterJob, SlowJob};
use chime_core::{every, Schedule, ScheduleError};
use chime_scheduler::{Scheduler, SchedulerError};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn duplicate_names_are_rejected_and_the_first_job_keeps_running() {
    let scheduler = Arc::new(Scheduler::new());
    let first = CounterJob::new();
    let second = CounterJob::new();

    scheduler
        .add("tick", first.clone(), Schedule::every(every(50).milliseconds()))
        .unwrap();
    let err = scheduler
        .add("tick", second.clone(), Schedule::every(every(50).milliseconds()))
        .unwrap_err();
    assert!(matches!(err, SchedulerError::DuplicateName(name) if name == "tick"));

    let running = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move { scheduler.start().await }
    });

    tokio::time::sleep(Duration::from_millis(180)).await;
    scheduler.cancel("tick");

    assert!(first.runs() >= 1, "original job should keep its schedule");
    assert_eq!(second.runs(), 0, "rejected job must never run");
    tokio::time::timeout(Duration::from_secs(1), running)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn invalid_schedules_register_nothing() {
    let scheduler = Scheduler::new();
    let job = CounterJob::new();

    let err = scheduler.add("noop", job.clone(), Schedule::once()).unwrap_err();
    assert!(matches!(
        err,
        SchedulerError::InvalidSchedule(ScheduleError::Empty)
    ));

    let err = scheduler.add("noop", job.clone(), Schedule::each("2hm")).unwrap_err();
    assert!(matches!(
        err,
        SchedulerError::InvalidSchedule(ScheduleError::UnparseableEach { .. })
    ));

    // nothing was registered: cancel is a no-op and the name stays free
    scheduler.cancel("noop");
    scheduler
        .add("noop", job, Schedule::every(every(1).seconds()))
        .unwrap();
}

#[tokio::test]
async fn nothing_fires_before_start() {
    let scheduler = Scheduler::new();
    let slow = CounterJob::new();
    let fast = CounterJob::new();

    scheduler
        .add("slow", slow.clone(), Schedule::every(every(200).milliseconds()))
        .unwrap();
    scheduler
        .add("fast", fast.clone(), Schedule::every(every(100).milliseconds()))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(slow.runs() + fast.runs(), 0);
}

#[tokio::test]
async fn jobs_added_after_start_are_armed_immediately() {
    let scheduler = Arc::new(Scheduler::new());
    let job = CounterJob::new();

    let running = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move { scheduler.start().await }
    });

    // let start flip the started flag first
    tokio::time::sleep(Duration::from_millis(20)).await;
    scheduler
        .add("late", job.clone(), Schedule::every(every(100).milliseconds()))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(350)).await;
    scheduler.cancel("late");

    assert!(job.runs() >= 1, "job registered after start never ran");
    tokio::time::timeout(Duration::from_secs(1), running)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn cancel_lets_an_in_flight_run_finish() {
    let scheduler = Arc::new(Scheduler::new());
    let job = SlowJob::new(Duration::from_millis(150));

    scheduler
        .add("slow", job.clone(), Schedule::every(every(50).milliseconds()))
        .unwrap();

    let running = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move { scheduler.start().await }
    });

    // the first run starts around 50ms and holds until around 200ms
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(job.started(), 1, "a run should be in flight");

    scheduler.cancel("slow");
    assert_eq!(job.completed(), 0, "cancel must not wait for the run");

    // start drains only after the in-flight run completes
    tokio::time::timeout(Duration::from_secs(1), running)
        .await
        .expect("scheduler should drain after the in-flight run")
        .unwrap();
    assert_eq!(job.completed(), 1, "the in-flight run finishes naturally");

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(job.started(), 1, "no new run may be armed after cancel");
}

#[tokio::test]
async fn cancelling_every_repeating_job_unblocks_start() {
    let scheduler = Arc::new(Scheduler::new());
    let one_shot = CounterJob::new();
    let repeating = CounterJob::new();

    scheduler
        .add("blip", one_shot.clone(), Schedule::each("50ms"))
        .unwrap();
    scheduler
        .add("tick", repeating.clone(), Schedule::every(every(100).milliseconds()))
        .unwrap();

    let running = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move { scheduler.start().await }
    });

    tokio::time::sleep(Duration::from_millis(250)).await;
    scheduler.cancel("tick");

    tokio::time::timeout(Duration::from_secs(1), running)
        .await
        .expect("start should return once all work is gone")
        .unwrap();
    assert_eq!(one_shot.runs(), 1);
    assert!(repeating.runs() >= 1);
}
