//! App Core for Tickerlens.
//!
//! Holds settings, the signed-in session and the backend collaborators, and
//! mounts at most one history sidebar at a time.

use std::sync::Arc;

use crate::managers::history_sidebar::{HistorySidebar, SidebarConfig};
use crate::services::backend_client::BackendClient;
use crate::services::company_search::CompanySearch;
use crate::services::history_api::HistoryFetcher;
use crate::services::notifier::{Notifier, QueuedNotifier};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::company::{SearchDetail, SearchResult};
use crate::types::errors::AppError;
use crate::types::history::HistoryChange;
use crate::types::session::{AccessToken, SessionProvider, StaticSession};
use crate::types::settings::ClientSettings;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "TICKERLENS_API_URL";

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    session: Arc<StaticSession>,
    history_fetcher: Arc<dyn HistoryFetcher>,
    company_search: Arc<dyn CompanySearch>,
    notifier: Arc<QueuedNotifier>,
    sidebar: Option<HistorySidebar>,
    api_url: Option<String>,
}

impl App {
    /// Loads settings from `config_path` (or the default location) and builds
    /// the HTTP backend client. `TICKERLENS_API_URL`, when set, replaces
    /// `api.base_url` for this run only.
    pub fn new(config_path: Option<String>) -> Result<Self, AppError> {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self::with_api_url(config_path, api_url)
    }

    /// Like [`App::new`], with the base URL override passed in.
    ///
    /// The override only reaches the HTTP client; it is never written to the
    /// settings file.
    pub fn with_api_url(
        config_path: Option<String>,
        api_url: Option<String>,
    ) -> Result<Self, AppError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load()?;

        let mut api = settings.api.clone();
        if let Some(url) = &api_url {
            api.base_url = url.clone();
        }
        let client = Arc::new(BackendClient::new(
            &api,
            settings.history.effective_page_size(),
        )?);
        tracing::info!(
            base_url = client.base_url(),
            overridden = api_url.is_some(),
            "backend client ready"
        );

        let mut app = Self::with_collaborators(settings_engine, client.clone(), client);
        app.api_url = Some(api.base_url);
        Ok(app)
    }

    /// Builds an app around explicit collaborators.
    pub fn with_collaborators(
        settings_engine: SettingsEngine,
        history_fetcher: Arc<dyn HistoryFetcher>,
        company_search: Arc<dyn CompanySearch>,
    ) -> Self {
        Self {
            settings_engine,
            session: Arc::new(StaticSession::new()),
            history_fetcher,
            company_search,
            notifier: Arc::new(QueuedNotifier::new()),
            sidebar: None,
            api_url: None,
        }
    }

    /// Base URL the HTTP collaborators were built with, if any.
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn settings(&self) -> &ClientSettings {
        self.settings_engine.get_settings()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.access_token().is_some()
    }

    pub fn sign_in(&mut self, token: AccessToken) {
        self.close_history();
        self.session.sign_in(token);
        tracing::info!("signed in");
    }

    /// Signs out and unmounts the history view.
    pub fn sign_out(&mut self) {
        self.close_history();
        self.session.sign_out();
        tracing::info!("signed out");
    }

    fn token(&self) -> Result<AccessToken, AppError> {
        self.session.access_token().ok_or(AppError::NotSignedIn)
    }

    /// Mounts a fresh history sidebar, replacing any mounted one.
    ///
    /// The new sidebar starts empty at page 1; call
    /// [`HistorySidebar::load_initial`] to fetch it.
    pub fn open_history(&mut self) -> Result<&HistorySidebar, AppError> {
        let token = self.token()?;
        self.close_history();

        let config = SidebarConfig::from(&self.settings().history);
        let notifier: Arc<dyn Notifier> = self.notifier.clone();
        let sidebar = HistorySidebar::mount(self.history_fetcher.clone(), token, notifier, config);
        Ok(&*self.sidebar.insert(sidebar))
    }

    pub fn history(&self) -> Result<&HistorySidebar, AppError> {
        self.sidebar.as_ref().ok_or(AppError::HistoryNotOpen)
    }

    pub fn close_history(&mut self) {
        if let Some(sidebar) = self.sidebar.take() {
            sidebar.unmount();
        }
    }

    /// Returns and clears failure notifications raised while paging.
    pub fn drain_notifications(&self) -> Vec<String> {
        self.notifier.drain()
    }

    pub async fn search_company(
        &self,
        ticker: &str,
        days_ago: Option<u32>,
    ) -> Result<SearchResult, AppError> {
        let token = self.token()?;
        let days_ago = days_ago.unwrap_or(self.settings().search.default_days_ago);
        Ok(self.company_search.search_company(&token, ticker, days_ago).await?)
    }

    pub async fn get_search(&self, search_id: u64) -> Result<SearchDetail, AppError> {
        let token = self.token()?;
        Ok(self.company_search.get_search(&token, search_id).await?)
    }

    /// Deletes a search on the server, then removes it from the mounted sidebar.
    pub async fn delete_search(&self, search_id: u64) -> Result<bool, AppError> {
        let token = self.token()?;
        self.company_search.delete_search(&token, search_id).await?;
        Ok(self.apply_history_change(HistoryChange::Deleted { search_id }))
    }

    /// Reflects an external search change in the mounted sidebar, if any.
    pub fn apply_history_change(&self, change: HistoryChange) -> bool {
        self.sidebar
            .as_ref()
            .map(|s| s.apply_change(change))
            .unwrap_or(false)
    }
}
