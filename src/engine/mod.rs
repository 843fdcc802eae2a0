pub mod launch;
pub mod presenter;
pub mod preview;
pub mod selector;
pub mod session;

use async_channel::Sender;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};

use crate::{
    api::{HostAPI, InitOptions, Initialized, Installed, NavigationAPI, Started, API},
    config::ApiKey,
    entities::{CloseReason, Event, Provider, ProviderAvailability},
    error::{unexpected_error, Error},
    external::AppOpener,
    normalizer::normalize,
};

use presenter::{Collaborators, Command, Mailbox, Presenter};

const EVENT_CAPACITY: usize = 64;

pub struct Engine {
    commands: Sender<Command>,
    events: broadcast::Sender<Event>,
    opener: Arc<dyn AppOpener + Send + Sync>,
    api_key: ApiKey,
    third_party_scheme: String,
}

impl Engine {
    /// Spawns the presenter task, so this must be called inside a tokio runtime.
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(collaborators: Collaborators, api_key: ApiKey, third_party_scheme: String) -> Self {
        let (commands, inbox) = async_channel::unbounded();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let opener = collaborators.opener.clone();

        let presenter = Presenter::new(
            collaborators,
            events.clone(),
            Mailbox::new(commands.clone()),
            third_party_scheme.clone(),
        );
        tokio::spawn(presenter.run(inbox));

        Self {
            commands,
            events,
            opener,
            api_key,
            third_party_scheme,
        }
    }

    async fn request<T>(&self, command: Command, reply: oneshot::Receiver<T>) -> Result<T, Error> {
        self.commands
            .send(command)
            .await
            .map_err(|_| unexpected_error())?;

        reply.await.map_err(|_| unexpected_error())
    }

    async fn close_with(&self, reason: CloseReason) -> Result<(), Error> {
        let (reply, rx) = oneshot::channel();
        if self.request(Command::Close { reason, reply }, rx).await.is_err() {
            tracing::debug!(?reason, "presenter gone, nothing to close");
        }

        Ok(())
    }

    async fn third_party_installed(&self) -> bool {
        self.opener.can_open(&self.third_party_scheme).await
    }

    async fn check_availability(&self) -> Vec<ProviderAvailability> {
        vec![
            ProviderAvailability::new(Provider::Embedded, true),
            ProviderAvailability::new(Provider::System, true),
            ProviderAvailability::new(Provider::ThirdParty, self.third_party_installed().await),
        ]
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        let _ = self.commands.try_send(Command::Shutdown);
    }
}

#[async_trait]
impl NavigationAPI for Engine {
    #[tracing::instrument(skip_all)]
    async fn initialize(&self, options: InitOptions) -> Result<Initialized, Error> {
        if let Some(key) = options.api_key.filter(|k| !k.is_empty()) {
            self.api_key.set(key).await;
            tracing::info!("api key stored");
        }

        Ok(Initialized { ok: true })
    }

    #[tracing::instrument(skip_all)]
    async fn start_navigation(&self, options: Value) -> Result<Started, Error> {
        let request = normalize(&options)?;
        let availability = self.check_availability().await;

        let (reply, rx) = oneshot::channel();
        let command = Command::Start {
            request,
            availability,
            reply,
        };
        let session_id = self.request(command, rx).await??;

        tracing::info!(%session_id, "navigation started");

        Ok(Started { started: true })
    }

    #[tracing::instrument(skip(self))]
    async fn close(&self) -> Result<(), Error> {
        self.close_with(CloseReason::Programmatic).await
    }

    #[tracing::instrument(skip(self))]
    async fn is_provider_installed(&self) -> Result<Installed, Error> {
        Ok(Installed {
            installed: self.third_party_installed().await,
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }
}

#[async_trait]
impl HostAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn launch(&self, app: Provider) -> Result<bool, Error> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::Launch { app, reply }, rx).await?
    }

    #[tracing::instrument(skip(self))]
    async fn dismiss(&self) -> Result<(), Error> {
        self.close_with(CloseReason::User).await
    }
}

impl API for Engine {}
