use std::sync::Arc;

use async_channel::{Receiver, Sender};
use tokio::sync::{broadcast, oneshot};
use uuid::Uuid;

use super::launch::{build_system_launch, build_third_party_launch, SystemLaunch};
use super::preview::{preview, Preview};
use super::selector::select;
use super::session::{Session, SessionManager};
use crate::entities::{
    CloseReason, Event, NavigationRequest, PreviewView, Provider, ProviderAvailability,
    SUMMARY_PENDING,
};
use crate::error::{
    invalid_input_error, launch_target_unavailable_error, no_active_session_error,
    presentation_failure_error, session_active_error, unexpected_error, Error,
};
use crate::external::{
    AppOpener, DirectionsProvider, ImageLoader, LocationProvider, PresentationHost,
};

pub type Reply<T> = oneshot::Sender<Result<T, Error>>;

#[derive(Debug)]
pub enum Command {
    Start {
        request: NavigationRequest,
        availability: Vec<ProviderAvailability>,
        reply: Reply<Uuid>,
    },
    Close {
        reason: CloseReason,
        reply: oneshot::Sender<()>,
    },
    Launch {
        app: Provider,
        reply: Reply<bool>,
    },
    PreviewReady {
        session_id: Uuid,
        preview: Preview,
    },
    LogoLoaded {
        session_id: Uuid,
        image: Vec<u8>,
    },
    Opened {
        session_id: Uuid,
        app: Provider,
        opened: bool,
        reply: Reply<bool>,
    },
    Shutdown,
}

/// Background work reaches the presenter only through this queue.
#[derive(Clone, Debug)]
pub struct Mailbox(Sender<Command>);

impl Mailbox {
    pub fn new(sender: Sender<Command>) -> Self {
        Self(sender)
    }

    pub async fn post(&self, command: Command) {
        if self.0.send(command).await.is_err() {
            tracing::debug!("presenter stopped, dropping command");
        }
    }
}

/// Collaborators the presenter drives.
pub struct Collaborators {
    pub directions: Arc<dyn DirectionsProvider + Send + Sync>,
    pub location: Arc<dyn LocationProvider + Send + Sync>,
    pub opener: Arc<dyn AppOpener + Send + Sync>,
    pub images: Arc<dyn ImageLoader + Send + Sync>,
    pub host: Box<dyn PresentationHost + Send>,
}

/// The UI-owning execution context: the session and the host are only touched
/// here, one command at a time.
pub struct Presenter {
    sessions: SessionManager,
    host: Box<dyn PresentationHost + Send>,
    directions: Arc<dyn DirectionsProvider + Send + Sync>,
    location: Arc<dyn LocationProvider + Send + Sync>,
    opener: Arc<dyn AppOpener + Send + Sync>,
    images: Arc<dyn ImageLoader + Send + Sync>,
    mailbox: Mailbox,
    third_party_scheme: String,
}

impl Presenter {
    pub fn new(
        collaborators: Collaborators,
        events: broadcast::Sender<Event>,
        mailbox: Mailbox,
        third_party_scheme: String,
    ) -> Self {
        Self {
            sessions: SessionManager::new(events),
            host: collaborators.host,
            directions: collaborators.directions,
            location: collaborators.location,
            opener: collaborators.opener,
            images: collaborators.images,
            mailbox,
            third_party_scheme,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    #[tracing::instrument(name = "Presenter::run", skip_all)]
    pub async fn run(mut self, commands: Receiver<Command>) {
        while let Ok(command) = commands.recv().await {
            if let Command::Shutdown = command {
                break;
            }
            self.handle(command);
        }

        self.close(CloseReason::Programmatic);
        tracing::debug!("presenter stopped");
    }

    /// Must run inside a tokio runtime; background work is spawned from here.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Start {
                request,
                availability,
                reply,
            } => {
                let _ = reply.send(self.start(request, availability));
            }
            Command::Close { reason, reply } => {
                self.close(reason);
                let _ = reply.send(());
            }
            Command::Launch { app, reply } => self.launch(app, reply),
            Command::PreviewReady {
                session_id,
                preview,
            } => self.apply_preview(session_id, preview),
            Command::LogoLoaded { session_id, image } => {
                if self.sessions.is_current(session_id) {
                    self.host.show_logo(session_id, &image);
                }
            }
            Command::Opened {
                session_id,
                app,
                opened,
                reply,
            } => {
                let _ = reply.send(Ok(self.finish_launch(session_id, app, opened)));
            }
            Command::Shutdown => {}
        }
    }

    #[tracing::instrument(skip_all, fields(title = %request.title))]
    fn start(
        &mut self,
        request: NavigationRequest,
        availability: Vec<ProviderAvailability>,
    ) -> Result<Uuid, Error> {
        if self.sessions.is_presenting() {
            return Err(session_active_error());
        }

        let selection = select(&availability, request.preferred_provider.prefers_native());
        let session = Session::new(request, availability, selection);

        let view = PreviewView {
            session_id: session.id,
            title: session.request.title.clone(),
            header: session.request.header.clone(),
            origin: session.request.origin,
            destination: session.request.destination,
            waypoints: session.request.waypoints.clone(),
            controls: selection,
            summary: SUMMARY_PENDING.into(),
            simulate: session.request.simulate,
        };

        if let Err(err) = self.host.present(&view) {
            tracing::warn!(?err, "host could not present navigation");
            return Err(presentation_failure_error());
        }

        let id = self.sessions.open(session)?;

        if let Some(session) = self.sessions.current() {
            self.spawn_preview(id, session.request.clone());
            if let Some(url) = session.request.header.logo_url.clone() {
                if session.request.header.show {
                    self.spawn_logo(id, url);
                }
            }
        }

        Ok(id)
    }

    fn spawn_preview(&self, session_id: Uuid, request: NavigationRequest) {
        let directions = self.directions.clone();
        let location = self.location.clone();
        let mailbox = self.mailbox.clone();

        tokio::spawn(async move {
            let preview = preview(directions.as_ref(), location.as_ref(), &request).await;
            mailbox
                .post(Command::PreviewReady {
                    session_id,
                    preview,
                })
                .await;
        });
    }

    fn spawn_logo(&self, session_id: Uuid, url: String) {
        let images = self.images.clone();
        let mailbox = self.mailbox.clone();

        tokio::spawn(async move {
            match images.load(&url).await {
                Ok(image) => mailbox.post(Command::LogoLoaded { session_id, image }).await,
                Err(err) => tracing::debug!(?err, %url, "header logo not loaded"),
            }
        });
    }

    fn apply_preview(&mut self, session_id: Uuid, preview: Preview) {
        if !self.sessions.update_summary(session_id, preview.summary) {
            return;
        }
        tracing::debug!(
            %session_id,
            available = preview.summary.is_available(),
            "route preview ready"
        );

        if let Some(route) = &preview.route {
            self.host
                .render_route(session_id, route, preview.viewport().as_ref());
        }
        self.host.show_summary(session_id, &preview.summary.describe());
    }

    fn close(&mut self, reason: CloseReason) {
        if let Some(session) = self.sessions.close(reason) {
            self.host.dismiss(session.id);
        }
    }

    #[tracing::instrument(skip(self, reply))]
    fn launch(&mut self, app: Provider, reply: Reply<bool>) {
        let session = match self.sessions.current() {
            Some(session) => session,
            None => {
                let _ = reply.send(Err(no_active_session_error()));
                return;
            }
        };
        let session_id = session.id;

        let target = match app {
            Provider::System => LaunchTarget::System(build_system_launch(&session.request)),
            Provider::ThirdParty => {
                let enabled = session
                    .selection
                    .control(Provider::ThirdParty)
                    .map(|c| c.enabled)
                    .unwrap_or(false);

                if !enabled {
                    tracing::info!(err = %launch_target_unavailable_error(), "ignoring launch");
                    let _ = reply.send(Ok(false));
                    return;
                }

                match build_third_party_launch(&session.request, &self.third_party_scheme) {
                    Some(url) => LaunchTarget::Url(url),
                    None => {
                        tracing::error!(
                            scheme = %self.third_party_scheme,
                            "could not build third-party launch url"
                        );
                        let _ = reply.send(Err(unexpected_error()));
                        return;
                    }
                }
            }
            Provider::Embedded => {
                let _ = reply.send(Err(invalid_input_error()));
                return;
            }
        };

        if !self.sessions.begin_launch(session_id, app) {
            let _ = reply.send(Ok(false));
            return;
        }

        let opener = self.opener.clone();
        let mailbox = self.mailbox.clone();

        tokio::spawn(async move {
            let opened = match &target {
                LaunchTarget::System(launch) => opener.open_system(launch).await,
                LaunchTarget::Url(url) => opener.open_url(url).await,
            };

            mailbox
                .post(Command::Opened {
                    session_id,
                    app,
                    opened,
                    reply,
                })
                .await;
        });
    }

    fn finish_launch(&mut self, session_id: Uuid, app: Provider, opened: bool) -> bool {
        if !opened {
            tracing::warn!(app = app.name(), "external app did not open");
            self.sessions.abort_launch(session_id);
            return false;
        }

        match self.sessions.complete_launch(session_id, app) {
            Some(session) => {
                self.host.dismiss(session.id);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug)]
enum LaunchTarget {
    System(SystemLaunch),
    Url(reqwest::Url),
}
