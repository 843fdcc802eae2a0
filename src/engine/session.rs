use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::entities::{
    CloseReason, Event, NavigationRequest, Provider, ProviderAvailability, RouteSummary, Selection,
};
use crate::error::{session_active_error, Error};

/// The single in-flight navigation presentation.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: Uuid,
    pub request: NavigationRequest,
    pub summary: RouteSummary,
    pub availability: Vec<ProviderAvailability>,
    pub selection: Selection,
    pub opened_at: DateTime<Utc>,
    pub pending_launch: Option<Provider>,
}

impl Session {
    pub fn new(
        request: NavigationRequest,
        availability: Vec<ProviderAvailability>,
        selection: Selection,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            summary: RouteSummary::Unavailable,
            availability,
            selection,
            opened_at: Utc::now(),
            pending_launch: None,
        }
    }
}

/// Owns the active session. Nothing else may open, close or replace it.
#[derive(Debug)]
pub struct SessionManager {
    current: Option<Session>,
    events: broadcast::Sender<Event>,
}

impl SessionManager {
    pub fn new(events: broadcast::Sender<Event>) -> Self {
        Self {
            current: None,
            events,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_presenting(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_current(&self, id: Uuid) -> bool {
        self.current.as_ref().map(|s| s.id) == Some(id)
    }

    #[tracing::instrument(skip_all, fields(session_id = %session.id))]
    pub fn open(&mut self, session: Session) -> Result<Uuid, Error> {
        if let Some(current) = &self.current {
            tracing::info!(current = %current.id, "rejecting session while another is presenting");
            return Err(session_active_error());
        }

        let id = session.id;
        self.current = Some(session);
        tracing::info!("session presenting");

        Ok(id)
    }

    /// Stores a summary for `id`. Returns false, changing nothing, when `id`
    /// is no longer the current session.
    pub fn update_summary(&mut self, id: Uuid, summary: RouteSummary) -> bool {
        match self.current.as_mut().filter(|s| s.id == id) {
            Some(session) => {
                session.summary = summary;
                true
            }
            None => {
                tracing::debug!(session_id = %id, "discarding summary for stale session");
                false
            }
        }
    }

    /// Marks a launch as in flight. Returns false if `id` is stale or another
    /// launch is already pending.
    pub fn begin_launch(&mut self, id: Uuid, app: Provider) -> bool {
        match self.current.as_mut().filter(|s| s.id == id) {
            Some(session) if session.pending_launch.is_none() => {
                session.pending_launch = Some(app);
                true
            }
            Some(session) => {
                tracing::debug!(pending = ?session.pending_launch, "launch already in flight");
                false
            }
            None => false,
        }
    }

    pub fn abort_launch(&mut self, id: Uuid) {
        if let Some(session) = self.current.as_mut().filter(|s| s.id == id) {
            session.pending_launch = None;
        }
    }

    /// Records a successful hand-off: `launched` then `closed{launch}`.
    #[tracing::instrument(skip(self))]
    pub fn complete_launch(&mut self, id: Uuid, app: Provider) -> Option<Session> {
        if !self.is_current(id) {
            tracing::debug!("launch completed after session closed");
            return None;
        }

        self.emit(Event::NavigationLaunched { app });
        self.close(CloseReason::Launch)
    }

    /// Closes the current session, if any. Closing twice is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn close(&mut self, reason: CloseReason) -> Option<Session> {
        let session = match self.current.take() {
            Some(session) => session,
            None => {
                tracing::debug!("close requested with no session presenting");
                return None;
            }
        };

        let presented_for = Utc::now() - session.opened_at;
        tracing::info!(
            session_id = %session.id,
            presented_ms = presented_for.num_milliseconds(),
            "session closed"
        );

        self.emit(Event::NavigationClosed { reason });
        Some(session)
    }

    fn emit(&self, event: Event) {
        if self.events.send(event).is_err() {
            tracing::trace!(event = event.name(), "no event subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::selector::select;
    use crate::entities::{Coordinates, Stop};
    use tokio::sync::broadcast::error::TryRecvError;

    fn session() -> Session {
        let destination = Coordinates::new(3.0, 4.0).unwrap();
        let request = NavigationRequest::new(Stop::CurrentLocation, destination);
        Session::new(request, vec![], select(&[], true))
    }

    fn manager() -> (SessionManager, broadcast::Receiver<Event>) {
        let (tx, rx) = broadcast::channel(16);
        (SessionManager::new(tx), rx)
    }

    #[test]
    fn second_close_is_a_noop() {
        let (mut sessions, mut events) = manager();
        sessions.open(session()).unwrap();

        assert!(sessions.close(CloseReason::Programmatic).is_some());
        assert!(sessions.close(CloseReason::Programmatic).is_none());

        assert_eq!(
            events.try_recv().unwrap(),
            Event::NavigationClosed {
                reason: CloseReason::Programmatic
            }
        );
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn only_one_session_presents() {
        let (mut sessions, _events) = manager();
        let first = sessions.open(session()).unwrap();

        let err = sessions.open(session()).unwrap_err();
        assert_eq!(err, session_active_error());
        assert!(sessions.is_current(first));
    }

    #[test]
    fn launch_emits_launched_before_closed() {
        let (mut sessions, mut events) = manager();
        let id = sessions.open(session()).unwrap();

        assert!(sessions.begin_launch(id, Provider::System));
        assert!(!sessions.begin_launch(id, Provider::ThirdParty));
        assert!(sessions.complete_launch(id, Provider::System).is_some());

        assert_eq!(
            events.try_recv().unwrap(),
            Event::NavigationLaunched {
                app: Provider::System
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            Event::NavigationClosed {
                reason: CloseReason::Launch
            }
        );
        assert!(!sessions.is_presenting());
    }

    #[test]
    fn stale_updates_are_ignored() {
        let (mut sessions, mut events) = manager();
        let id = sessions.open(session()).unwrap();
        sessions.close(CloseReason::User);
        let _ = events.try_recv();

        let summary = RouteSummary::Available {
            distance_meters: 1.0,
            eta_seconds: 1.0,
        };
        assert!(!sessions.update_summary(id, summary));
        assert!(sessions.complete_launch(id, Provider::System).is_none());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }
}
