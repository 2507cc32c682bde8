//! `sunboard tabs`: inspect and edit the persisted footer tabs.

use crate::ui::{OutputContext, StatusIndicator};
use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use sunboard_common::{
    AssignError, DashboardSession, JsonFileStore, KeyValueStore, Role, TabDescriptor, TabId,
};
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum TabsAction {
    /// List the footer tabs and the tabs offered to the role
    Show,
    /// Put TAB into footer slot INDEX (0-based)
    Assign { index: usize, tab: String },
    /// Replace the whole footer with the given tabs, in order
    Replace {
        #[arg(required = true, num_args = 1..)]
        tabs: Vec<String>,
    },
    /// Restore the role's default footer
    Reset,
    /// Make TAB the active section
    Select { tab: String },
}

#[derive(Debug, Serialize)]
struct FooterSlot {
    index: usize,
    id: TabId,
    label: &'static str,
    icon: &'static str,
    visible: bool,
}

#[derive(Debug, Serialize)]
struct TabsReport {
    role: Role,
    active: TabId,
    footer: Vec<FooterSlot>,
    available: Vec<TabDescriptor>,
}

pub fn run(action: &TabsAction, role: Role, data_dir: &Path, ctx: &OutputContext) -> Result<()> {
    let store = Arc::new(JsonFileStore::in_dir(data_dir));
    debug!(path = %store.path().display(), %role, "opening dashboard session");
    let mut session = DashboardSession::open(store, role);

    let changed = match action {
        TabsAction::Show => None,
        TabsAction::Assign { index, tab } => {
            session
                .footer_mut()
                .assign_str(*index, tab)
                .with_context(|| format!("cannot put '{tab}' into footer slot {index}"))?;
            Some(format!("slot {index} is now {tab}"))
        }
        TabsAction::Replace { tabs } => {
            let parsed = tabs
                .iter()
                .map(|raw| raw.parse::<TabId>().map_err(AssignError::from))
                .collect::<Result<Vec<_>, _>>()
                .context("cannot replace footer tabs")?;
            session
                .footer_mut()
                .replace(parsed)
                .context("cannot replace footer tabs")?;
            Some(format!("footer replaced with {} tabs", tabs.len()))
        }
        TabsAction::Reset => {
            session.footer_mut().reset();
            Some(format!("footer reset to the {role} default"))
        }
        TabsAction::Select { tab } => {
            let tab = tab
                .parse::<TabId>()
                .map_err(AssignError::from)
                .and_then(|tab| session.select(tab))
                .with_context(|| format!("cannot select '{tab}'"))?;
            Some(format!("active tab is now {tab}"))
        }
    };

    let report = build_report(&session);
    if ctx.is_json() {
        return ctx.json(&report);
    }
    if let Some(message) = changed {
        println!("{} {}", StatusIndicator::Success.display(ctx.theme()), message);
    }
    print_report(&report, ctx);
    Ok(())
}

fn build_report<S: KeyValueStore + Clone>(session: &DashboardSession<S>) -> TabsReport {
    let footer = session.footer();
    let visible = footer.visible().len();
    TabsReport {
        role: session.role(),
        active: session.active_tab(),
        footer: footer
            .tabs()
            .iter()
            .enumerate()
            .map(|(index, id)| FooterSlot {
                index,
                id: *id,
                label: id.label(),
                icon: id.icon(),
                visible: index < visible,
            })
            .collect(),
        available: session.catalog().tabs().to_vec(),
    }
}

fn print_report(report: &TabsReport, ctx: &OutputContext) {
    let theme = ctx.theme();
    println!(
        "{}",
        theme.format_header(&format!("Footer tabs ({})", report.role))
    );
    for slot in &report.footer {
        let mut line = format!("  {}  {:<12} {}", slot.index, slot.id.as_str(), slot.label);
        if slot.id == report.active {
            line.push_str(&format!("  {}", theme.highlight("[active]")));
        }
        if !slot.visible {
            line.push_str(&format!("  {}", theme.muted("(hidden: odd count)")));
        }
        println!("{line}");
    }
    let available: Vec<&str> = report.available.iter().map(|d| d.id.as_str()).collect();
    println!("{} {}", theme.muted("Available:"), available.join(", "));
}
