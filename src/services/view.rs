use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Ticket issued when a view starts a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Per-view guard for late responses.
///
/// Each request takes a ticket from a monotonically increasing sequence. A
/// response may be applied only while the view is live and its ticket is the
/// most recent one issued.
#[derive(Debug)]
pub struct ViewHandle {
    name: &'static str,
    latest: AtomicU64,
    live: AtomicBool,
}

impl ViewHandle {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            latest: AtomicU64::new(0),
            live: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Issues the next ticket, superseding all earlier ones
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a response for `ticket` may still be applied
    pub fn accepts(&self, ticket: RequestTicket) -> bool {
        self.live.load(Ordering::SeqCst) && self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Marks the view gone; every outstanding response is discarded.
    ///
    /// The server unmounts its views once shutdown begins, so searches still
    /// in flight answer as superseded instead of returning late results.
    pub fn unmount(&self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_accepted() {
        let view = ViewHandle::new("search");
        let ticket = view.begin();
        assert!(view.accepts(ticket));
    }

    #[test]
    fn test_superseded_ticket_rejected() {
        let view = ViewHandle::new("search");
        let first = view.begin();
        let second = view.begin();
        assert!(!view.accepts(first));
        assert!(view.accepts(second));
    }

    #[test]
    fn test_unmounted_view_rejects_everything() {
        let view = ViewHandle::new("detail");
        let ticket = view.begin();
        view.unmount();
        assert!(!view.accepts(ticket));
        assert!(!view.accepts(view.begin()));
    }
}
