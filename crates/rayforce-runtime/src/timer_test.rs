// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use std::sync::{Arc, Mutex};

#[test]
fn a_fresh_heap_has_no_next_timeout() {
    let mut timers = Timers::new();
    assert_eq!(timers.fire_due(0), None);
}

#[test]
fn a_one_shot_timer_fires_once_and_is_gone() {
    let mut timers = Timers::new();
    let fired = Arc::new(Mutex::new(0));
    {
        let fired = Arc::clone(&fired);
        timers.add(0, 100, 1, move |_now| {
            *fired.lock().unwrap() += 1;
            Value::Null
        });
    }
    timers.fire_due(50);
    assert_eq!(*fired.lock().unwrap(), 0);
    timers.fire_due(100);
    assert_eq!(*fired.lock().unwrap(), 1);
    timers.fire_due(1000);
    assert_eq!(*fired.lock().unwrap(), 1);
    assert!(timers.is_empty());
}

#[test]
fn a_repeating_timer_fires_the_requested_number_of_times() {
    let mut timers = Timers::new();
    let fired = Arc::new(Mutex::new(0));
    {
        let fired = Arc::clone(&fired);
        timers.add(0, 100, 3, move |_now| {
            *fired.lock().unwrap() += 1;
            Value::Null
        });
    }
    timers.fire_due(100);
    timers.fire_due(200);
    timers.fire_due(300);
    timers.fire_due(400);
    assert_eq!(*fired.lock().unwrap(), 3);
}

#[test]
fn an_infinite_timer_keeps_reinserting() {
    let mut timers = Timers::new();
    let fired = Arc::new(Mutex::new(0));
    {
        let fired = Arc::clone(&fired);
        timers.add(0, 50, REPEAT_FOREVER, move |_now| {
            *fired.lock().unwrap() += 1;
            Value::Null
        });
    }
    for tick in 1..=10 {
        timers.fire_due(tick * 50);
    }
    assert_eq!(*fired.lock().unwrap(), 10);
    assert_eq!(timers.len(), 1);
}

#[test]
fn multiple_timers_fire_in_expiry_order() {
    let mut timers = Timers::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for (id, delay) in [(1, 300), (2, 100), (3, 200)] {
        let order = Arc::clone(&order);
        timers.add(0, delay, 1, move |_now| {
            order.lock().unwrap().push(id);
            Value::Null
        });
    }
    timers.fire_due(1000);
    assert_eq!(*order.lock().unwrap(), vec![2, 3, 1]);
}

#[test]
fn cancelling_a_timer_stops_it_from_ever_firing() {
    let mut timers = Timers::new();
    let fired = Arc::new(Mutex::new(0));
    let id = {
        let fired = Arc::clone(&fired);
        timers.add(0, 100, 1, move |_now| {
            *fired.lock().unwrap() += 1;
            Value::Null
        })
    };
    assert!(timers.cancel(id));
    timers.fire_due(1000);
    assert_eq!(*fired.lock().unwrap(), 0);
    assert!(!timers.cancel(id));
}

#[test]
fn next_timeout_reflects_the_closest_pending_expiry() {
    let mut timers = Timers::new();
    timers.add(0, 500, 1, |_| Value::Null);
    timers.add(0, 100, 1, |_| Value::Null);
    let next = timers.fire_due(0).unwrap();
    assert_eq!(next, std::time::Duration::from_millis(100));
}
