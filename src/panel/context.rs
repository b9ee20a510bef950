//! # Site Context
//!
//! The session collaborator a panel is constructed with. It owns the list of
//! sites the user may query and the current selection; panels only read it
//! and ask it to change the selection.

use std::sync::{Arc, RwLock};

/// Session view exposed to panels
pub trait SiteContext: Send + Sync {
    /// Whether the user may edit and run queries
    fn is_logged_in(&self) -> bool;

    /// Sites the user may select, in display order
    fn sites(&self) -> Vec<String>;

    /// Currently selected site domain, or an empty string
    fn selected_site(&self) -> String;

    /// Select `domain` as the current site
    fn select_site(&self, domain: &str);
}

#[derive(Debug, Default)]
struct SessionState {
    logged_in: bool,
    sites: Vec<String>,
    selected_site: String,
}

/// In-memory session shared between panels and the controller.
///
/// Cloning yields another handle onto the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionSites {
    state: Arc<RwLock<SessionState>>,
}

impl SessionSites {
    /// Session with no login and no sites
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Logged-in session over `sites`, selecting `selected` or the first site
    pub fn logged_in(sites: Vec<String>, selected: Option<String>) -> Self {
        let selected_site = selected
            .filter(|site| sites.contains(site))
            .or_else(|| sites.first().cloned())
            .unwrap_or_default();

        Self {
            state: Arc::new(RwLock::new(SessionState {
                logged_in: true,
                sites,
                selected_site,
            })),
        }
    }

    /// Change the login state, e.g. after credentials were revoked
    pub fn set_logged_in(&self, logged_in: bool) {
        if let Ok(mut state) = self.state.write() {
            state.logged_in = logged_in;
        }
    }
}

impl SiteContext for SessionSites {
    fn is_logged_in(&self) -> bool {
        self.state.read().map(|s| s.logged_in).unwrap_or(false)
    }

    fn sites(&self) -> Vec<String> {
        self.state
            .read()
            .map(|s| s.sites.clone())
            .unwrap_or_default()
    }

    fn selected_site(&self) -> String {
        self.state
            .read()
            .map(|s| s.selected_site.clone())
            .unwrap_or_default()
    }

    fn select_site(&self, domain: &str) {
        match self.state.write() {
            Ok(mut state) => {
                tracing::debug!("Selecting site '{}'", domain);
                state.selected_site = domain.to_string();
            }
            Err(e) => tracing::error!("Session state poisoned: {}", e),
        }
    }
}
