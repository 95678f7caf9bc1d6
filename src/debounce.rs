use std::time::{Duration, Instant};

use tracing::trace;

/// Single-flight debouncer for the quick-search term.
///
/// Every schedule supersedes the previous pending term; nothing is queued.
/// The event loop drives it by calling [`Debouncer::poll`] on each tick, so
/// no timer thread exists and a cancelled term can never fire.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    /// Schedule a term, dropping any previously pending one.
    pub fn schedule(&mut self, term: String, now: Instant) {
        trace!("Debounce schedule: {term:?}");
        self.pending = Some((term, now + self.delay));
    }

    /// Drop the pending term, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Return the pending term once its quiet period has elapsed. Fires at
    /// most once per schedule.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(term, _)| term),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_the_quiet_period() {
        let mut d = Debouncer::new(Duration::from_millis(300));
        let t0 = Instant::now();
        d.schedule("daft".into(), t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(299)), None);
        assert_eq!(
            d.poll(t0 + Duration::from_millis(300)),
            Some("daft".to_string())
        );
        // one-shot
        assert_eq!(d.poll(t0 + Duration::from_millis(301)), None);
    }

    #[test]
    fn newer_term_supersedes_older() {
        let mut d = Debouncer::new(Duration::from_millis(300));
        let t0 = Instant::now();
        d.schedule("da".into(), t0);
        d.schedule("daft".into(), t0 + Duration::from_millis(100));
        // the first deadline passes without firing
        assert_eq!(d.poll(t0 + Duration::from_millis(350)), None);
        assert_eq!(
            d.poll(t0 + Duration::from_millis(400)),
            Some("daft".to_string())
        );
    }

    #[test]
    fn cancelled_terms_never_fire() {
        let mut d = Debouncer::new(Duration::from_millis(300));
        let t0 = Instant::now();
        d.schedule("daft".into(), t0);
        d.cancel();
        assert_eq!(d.poll(t0 + Duration::from_secs(10)), None);
    }
}
