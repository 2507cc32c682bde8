//! Per-session dashboard preferences.
//!
//! Groups the footer tabs and the active tab behind one explicit object
//! instead of ambient global storage. Both are restored when the session
//! opens and written back whenever they change.

use crate::storage::KeyValueStore;
use crate::tabs::{AssignError, FooterTabs, TabCatalog};
use crate::types::{Role, TabId};
use tracing::{debug, info, warn};

/// Storage key holding the last selected tab.
pub const ACTIVE_TAB_KEY: &str = "sunboard.active_tab";

#[derive(Debug)]
pub struct DashboardSession<S> {
    store: S,
    footer: FooterTabs<S>,
    active: TabId,
}

impl<S: KeyValueStore + Clone> DashboardSession<S> {
    /// Restore a session for `role` from `store`.
    pub fn open(store: S, role: Role) -> Self {
        let footer = FooterTabs::load(store.clone(), TabCatalog::for_role(role));
        let active = restore_active(&store, &footer);
        debug!(%role, %active, "dashboard session opened");
        Self {
            store,
            footer,
            active,
        }
    }

    pub fn role(&self) -> Role {
        self.footer.catalog().role()
    }

    pub fn catalog(&self) -> &TabCatalog {
        self.footer.catalog()
    }

    pub fn footer(&self) -> &FooterTabs<S> {
        &self.footer
    }

    pub fn footer_mut(&mut self) -> &mut FooterTabs<S> {
        &mut self.footer
    }

    pub fn active_tab(&self) -> TabId {
        self.active
    }

    /// Make `tab` the active section and remember it.
    pub fn select(&mut self, tab: TabId) -> Result<TabId, AssignError> {
        if !self.catalog().contains(tab) {
            return Err(AssignError::NotInCatalog {
                tab,
                role: self.role(),
            });
        }
        if tab != self.active {
            self.active = tab;
            info!(%tab, "active tab changed");
            if let Err(e) = self.store.set(ACTIVE_TAB_KEY, tab.as_str()) {
                warn!(error = %e, "failed to persist active tab");
            }
        }
        Ok(tab)
    }
}

fn restore_active<S: KeyValueStore>(store: &S, footer: &FooterTabs<S>) -> TabId {
    let fallback = footer.tabs().first().copied().unwrap_or(TabId::Overview);
    match store.get(ACTIVE_TAB_KEY) {
        Ok(Some(raw)) => match raw.parse::<TabId>() {
            Ok(tab) if footer.catalog().contains(tab) => tab,
            Ok(tab) => {
                warn!(%tab, "persisted active tab not offered to this role");
                fallback
            }
            Err(e) => {
                warn!(error = %e, "ignoring persisted active tab");
                fallback
            }
        },
        Ok(None) => fallback,
        Err(e) => {
            warn!(error = %e, "failed to read active tab");
            fallback
        }
    }
}
