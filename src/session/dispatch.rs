//! Event Dispatch
//!
//! Owns the extractor, the session state, and the registered observers.
//! One raw line goes in; if a recognizer fires, the matching state
//! transition is applied and every observer gets the event plus a fresh
//! snapshot. Observer failures are logged and swallowed so a broken
//! consumer can never stall ingestion.

use tracing::{debug, warn};

use crate::session::event::LogEvent;
use crate::session::extract::LogExtractor;
use crate::session::snapshot::StateSnapshot;
use crate::session::state::SessionState;

/// Observer errors.
///
/// Observers do I/O (console, files, durable stores); their failures are
/// reported at the dispatch boundary and never propagated into the
/// ingestion loop.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// Underlying write failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A boundary consumer of state changes.
///
/// Called after every successfully applied event with the event itself and
/// an immutable snapshot of the resulting state. Implementations must not
/// assume any particular event ordering beyond what the log stream
/// provides.
pub trait Observer: Send {
    /// Stable name used when reporting failures.
    fn name(&self) -> &'static str;

    /// React to one applied event.
    fn on_event(&mut self, event: &LogEvent, snapshot: &StateSnapshot) -> Result<(), ObserverError>;
}

/// Line-to-state pipeline with observer fan-out.
pub struct Dispatcher {
    extractor: LogExtractor,
    state: SessionState,
    observers: Vec<Box<dyn Observer>>,
}

impl Dispatcher {
    /// Create a dispatcher with fresh state and no observers.
    pub fn new() -> Self {
        Self {
            extractor: LogExtractor::new(),
            state: SessionState::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn register(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Current state, read-only.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Process one raw log line.
    ///
    /// Returns whether a recognizer fired and its transition was applied.
    /// Unrecognized and malformed lines return false with no side effects.
    pub fn handle(&mut self, line: &str) -> bool {
        let Some(event) = self.extractor.parse(line) else {
            return false;
        };

        debug!("applying {} event", event.kind());
        self.apply(&event);
        self.notify(&event);
        true
    }

    /// Map the event onto its state transition. Exhaustive by construction.
    fn apply(&mut self, event: &LogEvent) {
        match event {
            LogEvent::Joined { key, name, address } => {
                self.state.on_joined(key.clone(), name.clone(), address.clone());
            }
            LogEvent::Left { key } => self.state.on_left(key),
            LogEvent::Killed { killer, victim } => self.state.on_killed(killer, victim),
            LogEvent::SelfKilled { key, by_world } => self.state.on_self_killed(key, *by_world),
            LogEvent::Renamed { key, new_name } => self.state.on_renamed(key, new_name.clone()),
            LogEvent::MapChanged { map } => self.state.on_map_changed(map.clone()),
        }
    }

    /// Hand every observer the event and a snapshot of the new state.
    fn notify(&mut self, event: &LogEvent) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.state.snapshot();
        for observer in &mut self.observers {
            if let Err(e) = observer.on_event(event, &snapshot) {
                warn!("observer '{}' failed: {}", observer.name(), e);
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::PlayerKey;

    #[test]
    fn test_unrecognized_line_returns_false_and_changes_nothing() {
        let mut dispatcher = Dispatcher::new();
        assert!(!dispatcher.handle("Server cvar \"sv_gravity\" = \"800\""));
        assert_eq!(dispatcher.state().player_count(), 0);
    }

    #[test]
    fn test_full_line_sequence() {
        let mut dispatcher = Dispatcher::new();

        let lines = [
            r#""A<1><STEAM_0:0:11><>" connected, address "10.0.0.1:27005""#,
            r#""B<2><STEAM_0:0:22><>" connected, address "10.0.0.2:27005""#,
            r#""A<1><STEAM_0:0:11><>" killed "B<2><STEAM_0:0:22><>" with "mp5""#,
            r#""B<2><STEAM_0:0:22><>" disconnected"#,
            r#""A<1><STEAM_0:0:11><>" committed suicide with "grenade""#,
        ];
        for line in lines {
            assert!(dispatcher.handle(line), "line not recognized: {}", line);
        }

        let state = dispatcher.state();
        assert_eq!(state.player_count(), 1);
        assert!(state.player(&PlayerKey::new("2")).is_none());

        let a = state.player(&PlayerKey::new("1")).unwrap();
        assert_eq!(a.name, "A");
        assert_eq!(a.kills, 0); // one kill, then one self-inflicted death
        assert_eq!(a.deaths, 1);
    }

    struct FailingObserver;

    impl Observer for FailingObserver {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn on_event(&mut self, _: &LogEvent, _: &StateSnapshot) -> Result<(), ObserverError> {
            Err(ObserverError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk on fire",
            )))
        }
    }

    struct CountingObserver {
        seen: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Observer for CountingObserver {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_event(&mut self, _: &LogEvent, _: &StateSnapshot) -> Result<(), ObserverError> {
            self.seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_observer_failure_does_not_stop_ingestion() {
        let seen = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Box::new(FailingObserver));
        dispatcher.register(Box::new(CountingObserver { seen: seen.clone() }));

        assert!(dispatcher.handle(r#""A<1><STEAM_0:0:11><>" connected"#));
        assert!(dispatcher.handle(r#""A<1><STEAM_0:0:11><>" disconnected"#));

        // Both events applied and both reached the observer registered
        // after the failing one.
        assert_eq!(seen.load(std::sync::atomic::Ordering::SeqCst), 2);
        assert_eq!(dispatcher.state().player_count(), 0);
    }

    #[test]
    fn test_observers_see_post_apply_snapshot() {
        struct SnapshotProbe {
            last: std::sync::Arc<std::sync::Mutex<Option<StateSnapshot>>>,
        }

        impl Observer for SnapshotProbe {
            fn name(&self) -> &'static str {
                "probe"
            }

            fn on_event(
                &mut self,
                _: &LogEvent,
                snapshot: &StateSnapshot,
            ) -> Result<(), ObserverError> {
                *self.last.lock().unwrap() = Some(snapshot.clone());
                Ok(())
            }
        }

        let last = std::sync::Arc::new(std::sync::Mutex::new(None));
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Box::new(SnapshotProbe { last: last.clone() }));

        dispatcher.handle(r#""A<1><STEAM_0:0:11><>" connected"#);
        let snapshot = last.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.players.len(), 1);
        assert_eq!(snapshot.players[0].name, "A");

        dispatcher.handle(r#"Started map "crossfire""#);
        let snapshot = last.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.map, "crossfire");
    }
}
