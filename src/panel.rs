//! Line-oriented terminal front end over the interaction controller.

use std::{str::FromStr, sync::Arc};

use crate::{
    controller::{InteractionController, SubmitOutcome},
    error::{AppError, AppResult},
    models::{Category, FilterKey, Method, Mode},
    render::{render_entry, render_results},
    services::RecommendationBackend,
};

pub const HELP: &str = "\
Commands:
  category <name|none>        videojuegos, peliculas, libros, musica, series
  mode <preferences|top10|search>
  method <multimodal|cbf|cf>
  prefs <a, b, c>             comma-separated likes
  query <text>                search text
  filter <key> [value]        year, genre, platform, artist, author; no value clears
  clear-filters
  send
  categories                  ask the backend which categories it serves
  status
  help
  quit";

/// One user action typed into the panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    Category(Option<Category>),
    Mode(Mode),
    Method(Method),
    Preferences(String),
    Query(String),
    Filter(FilterKey, String),
    ClearFilters,
    Send,
    Categories,
    Status,
    Help,
    Quit,
}

impl FromStr for PanelCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "category" => match rest {
                "" | "none" => PanelCommand::Category(None),
                name => PanelCommand::Category(Some(name.parse()?)),
            },
            "mode" => PanelCommand::Mode(rest.parse()?),
            "method" => PanelCommand::Method(rest.parse()?),
            "prefs" => PanelCommand::Preferences(rest.to_string()),
            "query" => PanelCommand::Query(rest.to_string()),
            "filter" => {
                let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                PanelCommand::Filter(key.parse()?, value.trim().to_string())
            }
            "clear-filters" => PanelCommand::ClearFilters,
            "send" => PanelCommand::Send,
            "categories" => PanelCommand::Categories,
            "status" => PanelCommand::Status,
            "help" | "?" => PanelCommand::Help,
            "quit" | "exit" => PanelCommand::Quit,
            "" => return Err(AppError::InvalidInput("empty command".to_string())),
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unknown command '{}', try 'help'",
                    other
                )))
            }
        };

        Ok(command)
    }
}

/// Controller plus the backend it submits to
pub struct Panel {
    controller: InteractionController,
    backend: Arc<dyn RecommendationBackend>,
}

impl Panel {
    pub fn new(controller: InteractionController, backend: Arc<dyn RecommendationBackend>) -> Self {
        Self {
            controller,
            backend,
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Applies one command and returns the text to print
    pub async fn handle(&mut self, command: PanelCommand) -> AppResult<String> {
        let state = self.controller.state_mut();
        let output = match command {
            PanelCommand::Category(category) => {
                state.set_category(category);
                self.status()
            }
            PanelCommand::Mode(mode) => {
                state.set_mode(mode);
                self.status()
            }
            PanelCommand::Method(method) => {
                state.set_method(method);
                self.status()
            }
            PanelCommand::Preferences(text) => {
                state.set_preferences(text);
                self.status()
            }
            PanelCommand::Query(text) => {
                state.set_query(text);
                self.status()
            }
            PanelCommand::Filter(key, value) => {
                state.set_filter(key, value);
                self.status()
            }
            PanelCommand::ClearFilters => {
                state.clear_filters();
                self.status()
            }
            PanelCommand::Send => self.send().await?,
            PanelCommand::Categories => {
                let names: Vec<String> = self
                    .backend
                    .categories()
                    .await?
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                names.join(", ")
            }
            PanelCommand::Status => self.status(),
            PanelCommand::Help => HELP.to_string(),
            PanelCommand::Quit => String::new(),
        };

        Ok(output)
    }

    async fn send(&mut self) -> AppResult<String> {
        let start = self.controller.conversation().len();
        let outcome = self.controller.submit(self.backend.as_ref()).await?;

        let conversation = self.controller.conversation();
        let mut lines: Vec<String> = conversation.since(start).iter().map(render_entry).collect();

        match outcome {
            SubmitOutcome::Applied { .. } => {
                if let Some(results) = conversation.results() {
                    for (i, item) in render_results(results).iter().enumerate() {
                        lines.push(format!("{:>2}. {}", i + 1, item));
                    }
                }
            }
            SubmitOutcome::Failed(e) => lines.push(format!("(error: {})", e)),
            SubmitOutcome::Stale => {}
        }

        Ok(lines.join("\n"))
    }

    /// One-line summary of the inputs and whether `send` would fire
    pub fn status(&self) -> String {
        let state = self.controller.state();
        let category = state
            .category()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut line = format!(
            "category={} mode={} method={}",
            category,
            state.mode(),
            state.method()
        );
        if let Some(category) = state.category() {
            for (key, value) in state.active_filters(category) {
                line.push_str(&format!(" {}={:?}", key, value));
            }
        }
        match state.submit_block() {
            Some(block) => line.push_str(&format!(" [send disabled: {}]", block)),
            None => line.push_str(" [ready]"),
        }
        line
    }
}
