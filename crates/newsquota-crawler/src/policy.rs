use std::fmt;

/// Why the crawl of a source ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    NeedMet,
    PageLimit,
    HttpStatus(u16),
    EmptyPage,
    ZeroYieldStreak(usize),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeedMet => write!(f, "need met"),
            Self::PageLimit => write!(f, "page limit reached"),
            Self::HttpStatus(status) => write!(f, "HTTP {status}"),
            Self::EmptyPage => write!(f, "0 items"),
            Self::ZeroYieldStreak(n) => write!(f, "{n} consecutive pages with 0 additions"),
        }
    }
}

/// What happened to one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    TransportFailure,
    NonSuccess(u16),
    Empty,
    Processed { admitted: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop(StopReason),
}

/// Per-source stopping state. Once stopped it stays stopped.
#[derive(Debug, Clone)]
pub struct StoppingPolicy {
    threshold: usize,
    zero_streak: usize,
    stopped: Option<StopReason>,
}

impl StoppingPolicy {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            zero_streak: 0,
            stopped: None,
        }
    }

    pub fn observe(&mut self, event: PageEvent) -> Flow {
        if let Some(reason) = self.stopped {
            return Flow::Stop(reason);
        }

        match event {
            PageEvent::TransportFailure => Flow::Continue,
            PageEvent::NonSuccess(status) => Flow::Stop(self.stop(StopReason::HttpStatus(status))),
            PageEvent::Empty => Flow::Stop(self.stop(StopReason::EmptyPage)),
            PageEvent::Processed { admitted: 0 } => {
                self.zero_streak += 1;
                if self.zero_streak >= self.threshold {
                    Flow::Stop(self.stop(StopReason::ZeroYieldStreak(self.zero_streak)))
                } else {
                    Flow::Continue
                }
            }
            PageEvent::Processed { .. } => {
                self.zero_streak = 0;
                Flow::Continue
            }
        }
    }

    /// Stops for a reason decided by the caller. An earlier reason is kept and
    /// returned instead.
    pub fn stop(&mut self, reason: StopReason) -> StopReason {
        *self.stopped.get_or_insert(reason)
    }

    pub fn zero_streak(&self) -> usize {
        self.zero_streak
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_counts_only_pages_without_admissions() {
        let mut policy = StoppingPolicy::new(3);

        assert_eq!(Flow::Continue, policy.observe(PageEvent::Processed { admitted: 0 }));
        assert_eq!(Flow::Continue, policy.observe(PageEvent::TransportFailure));
        assert_eq!(Flow::Continue, policy.observe(PageEvent::Processed { admitted: 0 }));
        assert_eq!(2, policy.zero_streak());
        assert_eq!(Flow::Continue, policy.observe(PageEvent::Processed { admitted: 4 }));
        assert_eq!(0, policy.zero_streak());

        assert_eq!(Flow::Continue, policy.observe(PageEvent::Processed { admitted: 0 }));
        assert_eq!(Flow::Continue, policy.observe(PageEvent::Processed { admitted: 0 }));
        assert_eq!(
            Flow::Stop(StopReason::ZeroYieldStreak(3)),
            policy.observe(PageEvent::Processed { admitted: 0 })
        );
    }

    #[test]
    fn terminal_pages_stop_immediately() {
        let mut policy = StoppingPolicy::new(80);
        assert_eq!(
            Flow::Stop(StopReason::HttpStatus(404)),
            policy.observe(PageEvent::NonSuccess(404))
        );

        let mut policy = StoppingPolicy::new(80);
        assert_eq!(
            Flow::Stop(StopReason::EmptyPage),
            policy.observe(PageEvent::Empty)
        );
    }

    #[test]
    fn stopped_is_irreversible() {
        let mut policy = StoppingPolicy::new(1);
        policy.stop(StopReason::NeedMet);

        assert_eq!(
            Flow::Stop(StopReason::NeedMet),
            policy.observe(PageEvent::Processed { admitted: 10 })
        );
        assert_eq!(StopReason::NeedMet, policy.stop(StopReason::PageLimit));
        assert_eq!(Some(StopReason::NeedMet), policy.stop_reason());
    }
}
