//! Cancellable one-shot and repeating timers driven by frame deltas.
//!
//! The queue never runs callbacks itself. The owner advances the clock and
//! then drains due timers one at a time with `pop_due`, which lets handling
//! one timer cancel another that was due in the same frame.

use std::time::Duration;

/// Identifies a scheduled timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub handle: TimerHandle,
    pub event: E,
    /// Queue time at which the timer was due.
    pub at: Duration,
}

#[derive(Debug, Clone)]
struct TimerEntry<E> {
    handle: TimerHandle,
    due: Duration,
    interval: Option<Duration>,
    event: E,
}

/// A deterministic timer queue over a virtual clock.
///
/// Two clocks are tracked: `now`, the instant new timers are scheduled
/// relative to, and `horizon`, how far the frame driver has advanced. While
/// draining, `now` follows each fired timer so a timer scheduled from inside
/// a handler lands where it would have with small deltas.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now: Duration,
    horizon: Duration,
    next_id: u64,
    entries: Vec<TimerEntry<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            horizon: Duration::ZERO,
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<E: Clone> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire once, `delay` from now.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        self.insert(delay, None, event)
    }

    /// Schedule `event` to fire every `interval`, first after one interval.
    /// A zero interval is bumped to one millisecond.
    pub fn schedule_repeating(&mut self, interval: Duration, event: E) -> TimerHandle {
        let interval = interval.max(Duration::from_millis(1));
        self.insert(interval, Some(interval), event)
    }

    /// Cancel a pending timer. Returns false if it already fired (one-shot)
    /// or was cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the horizon forward. Call `pop_due` until it returns `None`
    /// afterwards.
    pub fn advance(&mut self, delta: Duration) {
        self.horizon += delta;
    }

    /// Pop the earliest timer due at or before the horizon. Ties go to the
    /// timer scheduled first. Repeating timers are re-queued one interval
    /// after their due time.
    pub fn pop_due(&mut self) -> Option<Fired<E>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= self.horizon)
            .min_by_key(|(_, entry)| (entry.due, entry.handle))
            .map(|(i, _)| i);

        let Some(idx) = idx else {
            self.now = self.horizon;
            return None;
        };

        let due = self.entries[idx].due;
        self.now = due;

        let fired = match self.entries[idx].interval {
            Some(interval) => {
                let entry = &mut self.entries[idx];
                entry.due = due + interval;
                Fired {
                    handle: entry.handle,
                    event: entry.event.clone(),
                    at: due,
                }
            }
            None => {
                let entry = self.entries.swap_remove(idx);
                Fired {
                    handle: entry.handle,
                    event: entry.event,
                    at: due,
                }
            }
        };
        Some(fired)
    }

    fn insert(&mut self, delay: Duration, interval: Option<Duration>, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            handle,
            due: self.now + delay,
            interval,
            event,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn drain(queue: &mut TimerQueue<&'static str>) -> Vec<(&'static str, u64)> {
        let mut out = Vec::new();
        while let Some(fired) = queue.pop_due() {
            out.push((fired.event, fired.at.as_millis() as u64));
        }
        out
    }

    #[test]
    fn one_shot_fires_once() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), "intro");

        queue.advance(ms(99));
        assert!(drain(&mut queue).is_empty());

        queue.advance(ms(1));
        assert_eq!(drain(&mut queue), vec![("intro", 100)]);

        queue.advance(ms(1000));
        assert!(drain(&mut queue).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn repeating_fires_every_interval() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(ms(10), "taunt");
        queue.advance(ms(35));
        assert_eq!(
            drain(&mut queue),
            vec![("taunt", 10), ("taunt", 20), ("taunt", 30)]
        );
        assert_eq!(queue.now(), ms(35));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_repeating(ms(10), "taunt");
        assert!(queue.is_pending(handle));
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        queue.advance(ms(100));
        assert!(drain(&mut queue).is_empty());
    }

    #[test]
    fn cancel_mid_drain_suppresses_later_firings() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(ms(5), "stop");
        let taunt = queue.schedule_repeating(ms(10), "taunt");
        queue.advance(ms(50));

        let fired = queue.pop_due().unwrap();
        assert_eq!(fired.handle, first);
        queue.cancel(taunt);
        assert!(queue.pop_due().is_none());
    }

    #[test]
    fn scheduling_while_draining_uses_fire_time() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), "intro");
        queue.advance(ms(1000));

        let fired = queue.pop_due().unwrap();
        assert_eq!(fired.at, ms(100));
        queue.schedule_repeating(ms(300), "taunt");

        assert_eq!(
            drain(&mut queue),
            vec![("taunt", 400), ("taunt", 700), ("taunt", 1000)]
        );
    }

    #[test]
    fn ties_resolve_in_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(10), "a");
        queue.schedule(ms(10), "b");
        queue.advance(ms(10));
        assert_eq!(drain(&mut queue), vec![("a", 10), ("b", 10)]);
    }

    #[test]
    fn zero_interval_is_bumped() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(Duration::ZERO, "spin");
        queue.advance(ms(3));
        assert_eq!(drain(&mut queue).len(), 3);
    }
}
