use crate::events::LendingEvent;

/// Trait for catalog change observation
pub trait LendingObserver {
    /// Called after a mutation succeeds
    fn on_event(&self, event: &LendingEvent);
}

/// Logs every event at info level
#[derive(Debug)]
pub struct TransitionLogger;

impl LendingObserver for TransitionLogger {
    fn on_event(&self, event: &LendingEvent) {
        match event {
            LendingEvent::Added { id, title } => tracing::info!(%id, title, "book added"),
            LendingEvent::Deleted { id, title } => tracing::info!(%id, title, "book deleted"),
            LendingEvent::Updated { id } => tracing::info!(%id, "book updated"),
            LendingEvent::Issued { id, borrower, due_date, .. } => {
                tracing::info!(%id, borrower, %due_date, "book issued");
            }
            LendingEvent::Returned { id, late_fee } => {
                tracing::info!(%id, late_fee, "book returned");
            }
        }
    }
}

/// Warns when a book comes back with a fee attached
#[derive(Debug)]
pub struct OverdueNotifier;

impl LendingObserver for OverdueNotifier {
    fn on_event(&self, event: &LendingEvent) {
        match event {
            LendingEvent::Returned { id, late_fee } if *late_fee > 0.0 => {
                tracing::warn!(%id, late_fee, "book returned after its due date");
            }
            _ => {}
        }
    }
}
