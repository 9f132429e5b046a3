//! The interactive catalog screen.
//!
//! Mounting spawns the hydrate task; commands read line by line stand in for
//! taps on the chips, cards and list end. Unmounting cancels the token so a
//! late response never reaches the state.

use std::str::FromStr;
use std::sync::Arc;

use catalog_engine::{ProductId, SortOption};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::controller::{CatalogController, HydrateOutcome};
use crate::error::Result;
use crate::view::Renderer;

pub const HELP: &str = "\
Commands:
  search <text>     filter titles (empty clears)
  category <name>   show one category, `category All` for everything
  sort default|asc|desc
  fav <id>          toggle favorite
  more              load the next page
  refresh           fetch again
  help
  quit";

/// A user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Category(String),
    Sort(SortOption),
    Favorite(ProductId),
    More,
    Refresh,
    Help,
    Quit,
}

/// Why a line could not be understood.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type `help`")]
    Unknown(String),

    #[error("{0}")]
    InvalidArgument(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "category" | "c" => {
                if rest.is_empty() {
                    Err(CommandError::InvalidArgument("category needs a name".into()))
                } else {
                    Ok(Command::Category(rest.to_string()))
                }
            }
            "sort" => rest
                .parse()
                .map(Command::Sort)
                .map_err(|e: catalog_engine::Error| CommandError::InvalidArgument(e.to_string())),
            "fav" | "f" => rest.parse().map(Command::Favorite).map_err(|_| {
                CommandError::InvalidArgument(format!("'{}' is not a product id", rest))
            }),
            "more" | "m" => Ok(Command::More),
            "refresh" | "r" => Ok(Command::Refresh),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Whether the screen keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One mounted catalog screen.
pub struct Screen {
    controller: Arc<CatalogController>,
    renderer: Renderer,
    /// Cancelled on unmount
    mount: CancellationToken,
    /// Token of the hydrate currently in flight
    fetch: CancellationToken,
}

impl Screen {
    pub fn new(controller: Arc<CatalogController>, renderer: Renderer) -> Self {
        let mount = CancellationToken::new();
        let fetch = mount.child_token();
        Self {
            controller,
            renderer,
            mount,
            fetch,
        }
    }

    pub fn controller(&self) -> &Arc<CatalogController> {
        &self.controller
    }

    /// Token cancelled when the screen unmounts.
    pub fn mount_token(&self) -> CancellationToken {
        self.mount.clone()
    }

    /// Render the current state.
    pub fn render(&self) -> String {
        self.renderer.render_screen(&self.controller.state())
    }

    /// Start a hydrate in the background, superseding any fetch in flight.
    pub fn spawn_hydrate(&mut self) -> JoinHandle<HydrateOutcome> {
        self.fetch.cancel();
        self.fetch = self.mount.child_token();

        let controller = Arc::clone(&self.controller);
        let token = self.fetch.clone();
        tokio::spawn(async move { controller.hydrate(&token).await })
    }

    /// Apply one command. Returns a message to show, if any.
    pub async fn apply(&mut self, command: Command) -> (Flow, Option<String>) {
        match command {
            Command::Search(query) => self.controller.set_search_query(query),
            Command::Category(name) => {
                let state = self.controller.state();
                // Chips are tapped, not typed; forgive case differences
                let Some(resolved) = state
                    .categories()
                    .iter()
                    .find(|c| c.eq_ignore_ascii_case(&name))
                    .cloned()
                else {
                    return (Flow::Continue, Some(format!("No category named {}", name)));
                };
                self.controller.set_category(resolved);
            }
            Command::Sort(option) => self.controller.set_sort_option(option),
            Command::Favorite(id) => {
                if self.controller.state().product(id).is_none() {
                    return (Flow::Continue, Some(format!("No product with id {}", id)));
                }
                if let Err(e) = self.controller.toggle_favorite(id).await {
                    tracing::warn!(id, error = %e, "Failed to persist favorites");
                    return (Flow::Continue, Some(format!("Could not save favorites: {}", e)));
                }
            }
            Command::More => {
                if !self.controller.load_more() {
                    return (Flow::Continue, Some("Nothing more to load".to_string()));
                }
            }
            Command::Refresh => {
                // Detached; superseded fetches see their token cancelled
                let _ = self.spawn_hydrate();
            }
            Command::Help => return (Flow::Continue, Some(HELP.to_string())),
            Command::Quit => return (Flow::Quit, None),
        }
        (Flow::Continue, None)
    }

    /// Hydrate, render a single frame and return.
    pub async fn render_once<W>(&mut self, output: &mut W) -> Result<HydrateOutcome>
    where
        W: AsyncWrite + Unpin,
    {
        let outcome = self
            .spawn_hydrate()
            .await
            .unwrap_or(HydrateOutcome::Cancelled);
        write_frame(output, &self.render()).await?;
        Ok(outcome)
    }

    /// Run until `quit` or end of input, re-rendering on every state change.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut updates = self.controller.subscribe();
        let mut lines = input.lines();
        let hydrate = self.spawn_hydrate();

        write_frame(output, &self.render()).await?;

        loop {
            tokio::select! {
                _ = self.mount.cancelled() => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    write_frame(output, &self.render()).await?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let command = match line.parse::<Command>() {
                        Ok(command) => command,
                        Err(CommandError::Empty) => continue,
                        Err(e) => {
                            write_frame(output, &e.to_string()).await?;
                            continue;
                        }
                    };
                    let (flow, message) = self.apply(command).await;
                    if let Some(message) = message {
                        write_frame(output, &message).await?;
                    }
                    if flow == Flow::Quit {
                        break;
                    }
                }
            }
        }

        self.unmount();
        if let Ok(outcome) = hydrate.await {
            tracing::debug!(?outcome, "Initial hydrate settled");
        }
        Ok(())
    }

    /// Cancel everything in flight.
    pub fn unmount(&self) {
        self.mount.cancel();
    }
}

async fn write_frame<W>(output: &mut W, frame: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(frame.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
