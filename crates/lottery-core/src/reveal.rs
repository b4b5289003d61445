//! Reveal animator
//!
//! After a draw the full result is already known; it is handed to the UI one
//! item at a time with fixed pauses in between. Purely cosmetic: there is no
//! cancellation, callers block re-entry with the busy flag instead.

use core::time::Duration;

use async_trait::async_trait;
use tracing::debug;

/// Pauses between revealed items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    /// Pause before the first item ("drawing...")
    pub initial_delay: Duration,
    /// Pause before each item
    pub per_item_delay: Duration,
}

impl RevealSchedule {
    pub fn new(initial_delay: Duration, per_item_delay: Duration) -> Self {
        Self {
            initial_delay,
            per_item_delay,
        }
    }

    /// Total time a reveal of `items` takes
    pub fn total_duration(&self, items: usize) -> Duration {
        self.initial_delay + self.per_item_delay * items as u32
    }
}

/// Runtime-specific sleep
///
/// Not `Send`: the browser implementation awaits JS promises.
#[async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper that returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

#[async_trait(?Send)]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Sleeper backed by the tokio timer
        #[derive(Debug, Clone, Copy, Default)]
        pub struct TokioSleeper;

        #[async_trait(?Send)]
        impl Sleeper for TokioSleeper {
            async fn sleep(&self, duration: Duration) {
                if !duration.is_zero() {
                    tokio::time::sleep(duration).await;
                }
            }
        }
    }
}

/// Hand `items` to `on_item` one by one, pausing per `schedule`
pub async fn reveal<T, S, F>(items: Vec<T>, schedule: RevealSchedule, sleeper: &S, mut on_item: F)
where
    S: Sleeper + ?Sized,
    F: FnMut(T),
{
    debug!(
        "Revealing {} items over {:?}",
        items.len(),
        schedule.total_duration(items.len())
    );

    sleeper.sleep(schedule.initial_delay).await;
    for item in items {
        sleeper.sleep(schedule.per_item_delay).await;
        on_item(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSleeper {
        slept: RefCell<Vec<Duration>>,
    }

    #[async_trait(?Send)]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
        }
    }

    #[test]
    fn test_reveal_order_and_pauses() {
        let sleeper = RecordingSleeper::default();
        let schedule = RevealSchedule::new(Duration::from_millis(500), Duration::from_millis(30));
        let mut revealed = Vec::new();

        futures::executor::block_on(reveal(vec![3, 1, 2], schedule, &sleeper, |n| revealed.push(n)));

        assert_eq!(revealed, vec![3, 1, 2]);
        let slept = sleeper.slept.borrow();
        assert_eq!(slept.len(), 4);
        assert_eq!(slept[0], Duration::from_millis(500));
        assert!(slept[1..].iter().all(|d| *d == Duration::from_millis(30)));
    }

    #[test]
    fn test_total_duration() {
        let schedule = RevealSchedule::new(Duration::from_millis(500), Duration::from_millis(50));
        assert_eq!(schedule.total_duration(4), Duration::from_millis(700));
    }

    #[cfg(feature = "std")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleeper_paces_reveal() {
        let schedule = RevealSchedule::new(Duration::from_millis(500), Duration::from_millis(30));
        let start = tokio::time::Instant::now();
        let mut count = 0;

        reveal(vec!['a', 'b'], schedule, &TokioSleeper, |_| count += 1).await;

        assert_eq!(count, 2);
        assert!(start.elapsed() >= Duration::from_millis(560));
    }
}
