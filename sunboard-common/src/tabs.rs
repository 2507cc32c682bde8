//! Footer tab configuration.
//!
//! The footer is an ordered list of [`TabId`]s the user customizes. It is
//! loaded once per session, written back in full after every accepted edit,
//! and displayed through [`even_prefix`]: an odd-length list hides its last
//! entry.

use crate::storage::KeyValueStore;
use crate::types::{Role, TabDescriptor, TabId, UnknownTab};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Storage key holding the persisted footer list.
pub const FOOTER_TABS_KEY: &str = "sunboard.footer_tabs";

/// Shortest footer a user can store; the visible prefix is never below two.
pub const MIN_FOOTER_TABS: usize = 2;

/// Tabs the host offers to a given role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabCatalog {
    role: Role,
    tabs: Vec<TabDescriptor>,
}

impl TabCatalog {
    pub fn for_role(role: Role) -> Self {
        let tabs = TabId::ALL
            .into_iter()
            .filter(|tab| Self::offered_to(*tab, role))
            .map(TabDescriptor::from)
            .collect();
        Self { role, tabs }
    }

    fn offered_to(tab: TabId, role: Role) -> bool {
        match tab {
            TabId::Admin => role == Role::Admin,
            TabId::Clients | TabId::Commissions => matches!(role, Role::Consultant | Role::Admin),
            TabId::Production | TabId::Savings | TabId::Referrals => {
                matches!(role, Role::Customer | Role::Admin)
            }
            TabId::Overview
            | TabId::Rewards
            | TabId::Community
            | TabId::Support
            | TabId::Settings => true,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    pub fn contains(&self, tab: TabId) -> bool {
        self.tabs.iter().any(|d| d.id == tab)
    }

    pub fn get(&self, tab: TabId) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|d| d.id == tab)
    }

    /// Footer used when nothing valid is persisted.
    pub fn default_footer(&self) -> Vec<TabId> {
        match self.role {
            Role::Customer => vec![
                TabId::Overview,
                TabId::Production,
                TabId::Savings,
                TabId::Rewards,
            ],
            Role::Consultant => vec![
                TabId::Overview,
                TabId::Clients,
                TabId::Commissions,
                TabId::Rewards,
            ],
            Role::Admin => vec![
                TabId::Overview,
                TabId::Production,
                TabId::Savings,
                TabId::Rewards,
                TabId::Admin,
            ],
        }
    }
}

/// Rejected footer edit. The footer is left untouched and nothing is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error(transparent)]
    UnknownTab(#[from] UnknownTab),

    #[error("tab '{tab}' is not available to the {role} role")]
    NotInCatalog { tab: TabId, role: Role },

    #[error("index {index} is out of range for {len} footer tabs")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("footer needs at least {MIN_FOOTER_TABS} tabs, got {len}")]
    TooFew { len: usize },
}

/// Visible part of a footer list: drop the last entry when the length is
/// odd and at least 2. Shorter lists are returned as they are.
pub fn even_prefix<T>(items: &[T]) -> &[T] {
    if items.len() >= 2 && items.len() % 2 == 1 {
        &items[..items.len() - 1]
    } else {
        items
    }
}

/// Read the persisted footer, or the catalog default.
///
/// Missing keys, storage failures, malformed JSON, a list shorter than
/// [`MIN_FOOTER_TABS`], and tabs
/// the catalog does not offer all fall back to the default.
pub fn load_footer_tabs<S: KeyValueStore>(store: &S, catalog: &TabCatalog) -> Vec<TabId> {
    match read_persisted(store, catalog) {
        Ok(Some(tabs)) => {
            debug!(count = tabs.len(), "restored footer tabs");
            tabs
        }
        Ok(None) => {
            debug!(role = %catalog.role(), "no persisted footer tabs; using defaults");
            catalog.default_footer()
        }
        Err(reason) => {
            warn!(role = %catalog.role(), %reason, "ignoring persisted footer tabs");
            catalog.default_footer()
        }
    }
}

fn read_persisted<S: KeyValueStore>(
    store: &S,
    catalog: &TabCatalog,
) -> Result<Option<Vec<TabId>>, String> {
    let Some(raw) = store.get(FOOTER_TABS_KEY).map_err(|e| e.to_string())? else {
        return Ok(None);
    };
    let tabs: Vec<TabId> = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    if tabs.len() < MIN_FOOTER_TABS {
        return Err(format!("persisted list has {} tab(s)", tabs.len()));
    }
    if let Some(tab) = tabs.iter().find(|tab| !catalog.contains(**tab)) {
        return Err(format!("tab '{tab}' is not offered to this role"));
    }
    Ok(Some(tabs))
}

/// The user's footer tabs bound to a store.
#[derive(Debug)]
pub struct FooterTabs<S> {
    store: S,
    catalog: TabCatalog,
    tabs: Vec<TabId>,
}

impl<S: KeyValueStore> FooterTabs<S> {
    /// Restore from `store`, falling back to the catalog default.
    pub fn load(store: S, catalog: TabCatalog) -> Self {
        let tabs = load_footer_tabs(&store, &catalog);
        Self {
            store,
            catalog,
            tabs,
        }
    }

    pub fn tabs(&self) -> &[TabId] {
        &self.tabs
    }

    /// Tabs to display. Recomputed on every call.
    pub fn visible(&self) -> &[TabId] {
        even_prefix(&self.tabs)
    }

    pub fn catalog(&self) -> &TabCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Put `tab` at `index`, replacing what was there.
    pub fn assign(&mut self, index: usize, tab: TabId) -> Result<&[TabId], AssignError> {
        self.check_offered(tab)?;
        let len = self.tabs.len();
        let slot = self
            .tabs
            .get_mut(index)
            .ok_or(AssignError::IndexOutOfRange { index, len })?;
        *slot = tab;
        info!(index, %tab, "footer tab assigned");
        self.persist();
        Ok(&self.tabs)
    }

    /// [`assign`](Self::assign) from a raw id as received from user input.
    pub fn assign_str(&mut self, index: usize, raw: &str) -> Result<&[TabId], AssignError> {
        let tab = raw.parse::<TabId>()?;
        self.assign(index, tab)
    }

    /// Replace the whole list.
    pub fn replace(&mut self, tabs: Vec<TabId>) -> Result<&[TabId], AssignError> {
        if tabs.len() < MIN_FOOTER_TABS {
            return Err(AssignError::TooFew { len: tabs.len() });
        }
        for tab in &tabs {
            self.check_offered(*tab)?;
        }
        info!(count = tabs.len(), "footer tabs replaced");
        self.tabs = tabs;
        self.persist();
        Ok(&self.tabs)
    }

    /// Restore the role default and persist it.
    pub fn reset(&mut self) -> &[TabId] {
        self.tabs = self.catalog.default_footer();
        info!(role = %self.catalog.role(), "footer tabs reset");
        self.persist();
        &self.tabs
    }

    fn check_offered(&self, tab: TabId) -> Result<(), AssignError> {
        if self.catalog.contains(tab) {
            Ok(())
        } else {
            Err(AssignError::NotInCatalog {
                tab,
                role: self.catalog.role(),
            })
        }
    }

    /// Write the full list. Failures are logged; memory stays authoritative
    /// for the rest of the session.
    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.tabs) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode footer tabs");
                return;
            }
        };
        if let Err(e) = self.store.set(FOOTER_TABS_KEY, &encoded) {
            warn!(error = %e, "failed to persist footer tabs");
        }
    }
}
