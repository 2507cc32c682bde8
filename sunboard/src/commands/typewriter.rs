//! `sunboard typewriter`: run the headline animation on the terminal.

use crate::ui::OutputContext;
use anyhow::{Context, Result};
use clap::Args;
use console::Term;
use std::rc::Rc;
use sunboard_common::{
    ErrorCode, HasErrorCode, LoadedConfig, TokioScheduler, TypewriterConfig, TypewriterEngine,
    TypewriterSnapshot,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tracing::{debug, info};

/// The Ctrl-C handler could not be installed, so the animation could not be
/// interrupted cleanly.
#[derive(Debug, Error)]
#[error("cannot listen for Ctrl-C")]
pub struct SignalError(#[source] pub std::io::Error);

impl HasErrorCode for SignalError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InternalRuntimeError
    }
}

#[derive(Debug, Args)]
pub struct TypewriterArgs {
    /// Message to cycle through (repeatable, replaces the configured list)
    #[arg(short, long = "message", value_name = "TEXT")]
    pub messages: Vec<String>,

    /// Delay per typed character
    #[arg(long, value_name = "MS")]
    pub typing_ms: Option<u64>,

    /// Delay per deleted character
    #[arg(long, value_name = "MS")]
    pub deleting_ms: Option<u64>,

    /// Pause once a message is fully typed
    #[arg(long, value_name = "MS")]
    pub pause_type_ms: Option<u64>,

    /// Pause once a message is fully deleted
    #[arg(long, value_name = "MS")]
    pub pause_delete_ms: Option<u64>,

    /// Stop after this many passes over all messages (default: run until Ctrl-C)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub cycles: Option<u64>,
}

impl TypewriterArgs {
    /// Fold flags into `loaded`, recording them as command-line sources.
    pub fn apply_to(&self, loaded: &mut LoadedConfig) {
        if !self.messages.is_empty() {
            loaded.config.typewriter.messages = self.messages.clone();
            loaded.record_cli("typewriter.messages", "--message");
        }
        if let Some(ms) = self.typing_ms {
            loaded.config.typewriter.typing_speed_ms = ms;
            loaded.record_cli("typewriter.typing_speed_ms", "--typing-ms");
        }
        if let Some(ms) = self.deleting_ms {
            loaded.config.typewriter.deleting_speed_ms = ms;
            loaded.record_cli("typewriter.deleting_speed_ms", "--deleting-ms");
        }
        if let Some(ms) = self.pause_type_ms {
            loaded.config.typewriter.pause_after_type_ms = ms;
            loaded.record_cli("typewriter.pause_after_type_ms", "--pause-type-ms");
        }
        if let Some(ms) = self.pause_delete_ms {
            loaded.config.typewriter.pause_after_delete_ms = ms;
            loaded.record_cli("typewriter.pause_after_delete_ms", "--pause-delete-ms");
        }
    }
}

pub async fn run(args: &TypewriterArgs, loaded: &LoadedConfig, ctx: &OutputContext) -> Result<()> {
    let config = TypewriterConfig::from(&loaded.config.typewriter);
    LocalSet::new()
        .run_until(animate(config, args.cycles, ctx))
        .await
}

async fn animate(config: TypewriterConfig, cycles: Option<u64>, ctx: &OutputContext) -> Result<()> {
    let engine = TypewriterEngine::new(config, Rc::new(TokioScheduler::new()))
        .context("invalid typewriter configuration")?;

    let (tx, mut rx) = mpsc::unbounded_channel::<TypewriterSnapshot>();
    engine.on_change(move |snapshot| {
        let _ = tx.send(snapshot.clone());
    });

    let mut renderer = Renderer::new(ctx);
    engine.start();
    info!(?cycles, "typewriter running");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            frame = rx.recv() => {
                let Some(snapshot) = frame else { break };
                renderer.draw(&snapshot)?;
                if cycles.is_some_and(|limit| snapshot.cycles >= limit) {
                    debug!(cycles = snapshot.cycles, "cycle limit reached");
                    break;
                }
            }
            signal = &mut ctrl_c => {
                signal.map_err(SignalError)?;
                debug!("interrupted");
                break;
            }
        }
    }

    engine.stop();
    renderer.finish()
}

/// Draws frames: redrawn in place on a terminal, one line per change when
/// piped, one JSON snapshot per tick with `--json`.
struct Renderer<'a> {
    ctx: &'a OutputContext,
    term: Option<Term>,
    last: Option<String>,
}

impl<'a> Renderer<'a> {
    fn new(ctx: &'a OutputContext) -> Self {
        let term = (!ctx.is_json() && ctx.is_tty()).then(Term::stdout);
        Self {
            ctx,
            term,
            last: None,
        }
    }

    fn draw(&mut self, snapshot: &TypewriterSnapshot) -> Result<()> {
        if self.ctx.is_json() {
            return self.ctx.json(snapshot);
        }
        if let Some(term) = &self.term {
            term.clear_line()?;
            term.write_str(&format!(
                "{}{}",
                snapshot.displayed_text,
                self.ctx.theme().muted("▌")
            ))?;
            return Ok(());
        }
        if self.last.as_deref() != Some(snapshot.displayed_text.as_str()) {
            println!("{}", snapshot.displayed_text);
            self.last = Some(snapshot.displayed_text.clone());
        }
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        if let Some(term) = &self.term {
            term.clear_line()?;
            term.write_line("")?;
        }
        Ok(())
    }
}
