//! Routes messages to the content script attached to each tab.

use std::collections::HashMap;

use jobfill_config::Config;
use jobfill_dom::Document;
use jobfill_engine::ContentScript;
use jobfill_protocols::{ContentRequest, ContentResponse, MessagingError, SiteVariant};
use tracing::{debug, info};

pub type TabId = u32;

/// Tabs with an injected content script. Sends fail fast; nothing is retried.
pub struct TabBridge {
    config: Config,
    tabs: HashMap<TabId, ContentScript>,
}

impl TabBridge {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            tabs: HashMap::new(),
        }
    }

    /// Inject a content script into a tab, replacing any previous page.
    pub fn attach(&mut self, tab: TabId, document: Document, url: impl Into<String>) {
        let url = url.into();
        info!(tab, %url, "Content script attached");
        self.tabs
            .insert(tab, ContentScript::new(document, url, &self.config));
    }

    pub fn detach(&mut self, tab: TabId) -> Option<ContentScript> {
        self.tabs.remove(&tab)
    }

    /// The tab navigated away: its script stays registered but stops answering.
    pub fn unload(&mut self, tab: TabId) {
        if let Some(script) = self.tabs.get_mut(&tab) {
            script.document_mut().unload();
        }
    }

    pub fn is_attached(&self, tab: TabId) -> bool {
        self.tabs.contains_key(&tab)
    }

    pub fn script(&self, tab: TabId) -> Option<&ContentScript> {
        self.tabs.get(&tab)
    }

    pub fn url(&self, tab: TabId) -> Option<&str> {
        self.tabs.get(&tab).map(ContentScript::url)
    }

    pub fn variant(&self, tab: TabId, is_workday: Option<bool>) -> Option<SiteVariant> {
        self.tabs.get(&tab).map(|script| script.variant_for(is_workday))
    }

    fn live_script(&mut self, tab: TabId) -> Result<&mut ContentScript, MessagingError> {
        let script = self
            .tabs
            .get_mut(&tab)
            .ok_or(MessagingError::NotInjected(tab))?;
        if script.document().is_unloaded() {
            return Err(MessagingError::TabGone(tab));
        }
        Ok(script)
    }

    pub async fn send(
        &mut self,
        tab: TabId,
        request: ContentRequest,
    ) -> Result<ContentResponse, MessagingError> {
        debug!(tab, action = request.action(), "Sending to tab");
        let script = self.live_script(tab)?;
        Ok(script.handle(request).await)
    }

    /// Same as [`send`](Self::send) across a JSON boundary.
    pub async fn send_json(&mut self, tab: TabId, payload: &str) -> Result<String, MessagingError> {
        let script = self.live_script(tab)?;
        script.handle_json(payload).await
    }
}
