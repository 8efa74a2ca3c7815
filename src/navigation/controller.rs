use std::cell::Cell;

use super::{NavigationError, ObserverError, Result, SubscriptionId, SubscriptionRegistry};

/// Discrete cursor over `[min_time, max_time]` that moves in whole
/// `time_step` increments and notifies observers once per effective move.
///
/// All operations take `&self` so an observer holding a shared handle can
/// query or move the controller while a notification is in flight.
#[derive(Debug)]
pub struct SequencePositionController {
    min_time: i64,
    max_time: i64,
    time_step: i64,
    position: Cell<i64>,
    observers: SubscriptionRegistry,
}

impl SequencePositionController {
    pub fn new(min_time: i64, max_time: i64, time_step: i64) -> Result<Self> {
        if min_time > max_time {
            return Err(NavigationError::InvalidBounds { min_time, max_time });
        }
        if time_step <= 0 {
            return Err(NavigationError::InvalidStep(time_step));
        }
        Ok(Self {
            min_time,
            max_time,
            time_step,
            position: Cell::new(min_time),
            observers: SubscriptionRegistry::new(),
        })
    }

    pub fn with_max_time(max_time: i64) -> Result<Self> {
        Self::new(0, max_time, 1)
    }

    pub fn min_time(&self) -> i64 {
        self.min_time
    }

    pub fn max_time(&self) -> i64 {
        self.max_time
    }

    pub fn time_step(&self) -> i64 {
        self.time_step
    }

    pub fn position(&self) -> i64 {
        self.position.get()
    }

    /// Number of step-aligned positions between the bounds, saturating at
    /// `usize::MAX`.
    pub fn step_count(&self) -> usize {
        usize::try_from(self.last_step_index().saturating_add(1)).unwrap_or(usize::MAX)
    }

    fn last_step_index(&self) -> u64 {
        self.max_time.abs_diff(self.min_time) / self.time_step.unsigned_abs()
    }

    /// Clamps `value` into the bounds and snaps it to the nearest step
    /// (ties to even). A `max_time` that is not step-aligned is still
    /// returned as-is for values at or beyond it.
    pub fn normalize(&self, value: f64) -> i64 {
        if value.is_nan() || value <= self.min_time as f64 {
            return self.min_time;
        }
        if value >= self.max_time as f64 {
            return self.max_time;
        }
        let steps = ((value - self.min_time as f64) / self.time_step as f64).round_ties_even();
        let steps = (steps as u64).min(self.last_step_index());
        let target = i128::from(self.min_time) + i128::from(steps) * i128::from(self.time_step);
        i64::try_from(target).unwrap_or(self.max_time)
    }

    /// Returns `true` when the position changed and observers were notified.
    pub fn move_to(&self, value: f64) -> Result<bool> {
        let target = self.normalize(value);
        let current = self.position.get();
        if target == current {
            return Ok(false);
        }
        self.position.set(target);
        log::debug!("sequence position {current} -> {target}");
        self.observers.notify_all()?;
        Ok(true)
    }

    pub fn begin(&self) -> Result<bool> {
        self.move_to(self.min_time as f64)
    }

    pub fn end(&self) -> Result<bool> {
        self.move_to(self.max_time as f64)
    }

    pub fn step_forward(&self) -> Result<bool> {
        self.move_to(self.position.get().saturating_add(self.time_step) as f64)
    }

    pub fn step_backward(&self) -> Result<bool> {
        self.move_to(self.position.get().saturating_sub(self.time_step) as f64)
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn() -> std::result::Result<(), ObserverError> + 'static,
    {
        let id = self.observers.subscribe(observer);
        log::debug!("position observer {id} subscribed");
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        self.observers.unsubscribe(id)?;
        log::debug!("position observer {id} unsubscribed");
        Ok(())
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.observers.contains(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    pub fn notify_all(&self) -> Result<()> {
        self.observers.notify_all()
    }
}
