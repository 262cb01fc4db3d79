//! Interaction controller
//!
//! Owns the panel state, turns it into backend requests and folds backend
//! outcomes back into the conversation.
//!
//! Submissions carry a generation number. A completion whose generation is
//! older than the latest accepted submission is discarded, so a slow response
//! can never overwrite the results of a newer request.

mod builder;
mod conversation;
mod session;
mod state;

pub use builder::{build_request, split_preferences};
pub use conversation::{acknowledgement, Conversation, ResultSet, FAILURE_NOTICE};
pub use session::SessionId;
pub use state::{ControllerState, SubmitBlock};

use tracing::instrument;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{BackendRequest, ResultItem},
    services::backend::{self, RecommendationBackend},
};

/// A submission whose user turn is already in the transcript, awaiting its backend result
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    generation: u64,
    request: BackendRequest,
}

impl PendingSubmission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &BackendRequest {
        &self.request
    }
}

/// What a completed submission did to the conversation
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Acknowledgement appended and results replaced
    Applied { results: usize },
    /// Backend failed; results untouched
    Failed(AppError),
    /// A newer submission was issued meanwhile; outcome dropped
    Stale,
}

impl SubmitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SubmitOutcome::Applied { .. })
    }
}

pub struct InteractionController {
    state: ControllerState,
    session: SessionId,
    generation: u64,
    show_errors: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl InteractionController {
    pub fn new(config: &Config) -> Self {
        Self {
            state: ControllerState::new(config.default_method),
            session: SessionId::new(),
            generation: 0,
            show_errors: config.show_errors,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Input setters live on the state; the conversation is not reachable from here
    pub fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }

    pub fn conversation(&self) -> &Conversation {
        &self.state.conversation
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Builds the request and echoes the user turn.
    ///
    /// Nothing is appended when submission is disabled.
    #[instrument(skip_all, fields(session_id = %self.session))]
    pub fn begin_submit(&mut self) -> AppResult<PendingSubmission> {
        let request = build_request(&self.state)?;
        let echo = conversation::echo_text(&self.state, &request);

        self.generation += 1;
        self.state.conversation.push_user(echo);

        tracing::debug!(
            generation = self.generation,
            mode = %request.mode(),
            category = %request.category(),
            "Submission started"
        );

        Ok(PendingSubmission {
            generation: self.generation,
            request,
        })
    }

    /// Folds a backend outcome into the conversation.
    #[instrument(skip_all, fields(session_id = %self.session, generation = pending.generation))]
    pub fn complete(
        &mut self,
        pending: PendingSubmission,
        outcome: AppResult<Vec<ResultItem>>,
    ) -> SubmitOutcome {
        if pending.generation != self.generation {
            tracing::warn!(
                latest = self.generation,
                "Discarding response for superseded submission"
            );
            return SubmitOutcome::Stale;
        }

        match outcome {
            Ok(items) => {
                let results = items.len();
                self.state.conversation.apply_success(&pending.request, items);
                tracing::info!(
                    mode = %pending.request.mode(),
                    category = %pending.request.category(),
                    results,
                    "Submission applied"
                );
                SubmitOutcome::Applied { results }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    mode = %pending.request.mode(),
                    category = %pending.request.category(),
                    "Backend request failed"
                );
                if self.show_errors {
                    self.state.conversation.push_failure_notice();
                }
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Echoes, calls the backend, and applies the outcome.
    ///
    /// Returns `Err` only when submission is disabled. Backend failures are
    /// reported as `SubmitOutcome::Failed`.
    pub async fn submit(&mut self, backend: &dyn RecommendationBackend) -> AppResult<SubmitOutcome> {
        let pending = self.begin_submit()?;
        let outcome = backend::execute(backend, pending.request()).await;
        Ok(self.complete(pending, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogItem, Category, FilterKey, Method, Mode, MusicItem, Speaker};
    use crate::services::backend::MockRecommendationBackend;

    fn movie(name: &str) -> ResultItem {
        ResultItem::Catalog(CatalogItem {
            name: Some(name.to_string()),
            ..Default::default()
        })
    }

    fn top10_controller(category: Category) -> InteractionController {
        let mut controller = InteractionController::default();
        controller.state_mut().set_category(Some(category));
        controller.state_mut().set_mode(Mode::Top10);
        controller
    }

    #[tokio::test]
    async fn test_top10_success_appends_two_entries_and_results_verbatim() {
        let backend_items = vec![movie("El Padrino"), movie("Casablanca"), movie("Amélie")];
        let expected = backend_items.clone();

        let mut backend = MockRecommendationBackend::new();
        backend
            .expect_top10()
            .withf(|category| *category == Category::Movies)
            .times(1)
            .returning(move |_| Ok(backend_items.clone()));

        let mut controller = top10_controller(Category::Movies);
        let outcome = controller.submit(&backend).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Applied { results: 3 }));
        let transcript = controller.conversation().transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].speaker, Speaker::User);
        assert_eq!(transcript[0].text, "Muéstrame el top 10 de peliculas");
        assert_eq!(transcript[1].speaker, Speaker::System);
        assert_eq!(transcript[1].text, "Top 10 de la categoría:");
        assert_eq!(controller.conversation().items(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_failure_keeps_echo_and_previous_results() {
        let mut backend = MockRecommendationBackend::new();
        let mut calls = 0;
        backend.expect_top10().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(vec![movie("Roma")])
            } else {
                Err(AppError::RequestFailed("backend returned status 500".into()))
            }
        });

        let mut controller = top10_controller(Category::Movies);
        controller.submit(&backend).await.unwrap();
        let before = controller.conversation().items().to_vec();

        let outcome = controller.submit(&backend).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(AppError::RequestFailed(_))));
        // two from the first call plus the echo of the failed one
        assert_eq!(controller.conversation().len(), 3);
        assert_eq!(controller.conversation().items(), before.as_slice());
    }

    #[tokio::test]
    async fn test_failure_notice_when_enabled() {
        let mut backend = MockRecommendationBackend::new();
        backend
            .expect_search()
            .returning(|_| Err(AppError::RequestFailed("connection refused".into())));

        let config = Config {
            show_errors: true,
            ..Config::default()
        };
        let mut controller = InteractionController::new(&config);
        controller.state_mut().set_category(Some(Category::Books));
        controller.state_mut().set_mode(Mode::Search);
        controller.state_mut().set_query("dune");

        controller.submit(&backend).await.unwrap();
        let transcript = controller.conversation().transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].text, FAILURE_NOTICE);
        assert!(controller.conversation().results().is_none());
    }

    #[tokio::test]
    async fn test_recommend_sends_split_preferences_and_method() {
        let mut backend = MockRecommendationBackend::new();
        backend
            .expect_recommend()
            .withf(|req| {
                req.category == Category::Music
                    && req.preferences == vec!["rock", "pop", "jazz"]
                    && req.method == Method::ContentBased
            })
            .times(1)
            .returning(|_| {
                Ok(vec![ResultItem::Music(MusicItem {
                    name: Some("Bohemian Rhapsody".into()),
                    ..Default::default()
                })])
            });

        let mut controller = InteractionController::default();
        let state = controller.state_mut();
        state.set_category(Some(Category::Music));
        state.set_method(Method::ContentBased);
        state.set_preferences("rock, pop ,  jazz");

        controller.submit(&backend).await.unwrap();
        let transcript = controller.conversation().transcript();
        assert_eq!(transcript[0].text, "Me gustan: rock, pop ,  jazz");
        assert_eq!(transcript[1].text, "Aquí tienes tus recomendaciones:");
        assert_eq!(
            controller.conversation().results().unwrap().category,
            Category::Music
        );
    }

    #[test]
    fn test_disabled_submission_appends_nothing() {
        let backend = MockRecommendationBackend::new();
        let mut controller = InteractionController::default();
        controller.state_mut().set_mode(Mode::Search);
        controller.state_mut().set_filter(FilterKey::Year, "2001");

        let result = tokio_test::block_on(controller.submit(&backend));
        assert!(matches!(
            result,
            Err(AppError::SubmitDisabled(SubmitBlock::MissingCategory))
        ));
        assert!(controller.conversation().is_empty());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut controller = top10_controller(Category::Videogames);
        let first = controller.begin_submit().unwrap();

        controller.state_mut().set_category(Some(Category::Books));
        let second = controller.begin_submit().unwrap();
        assert!(second.generation() > first.generation());

        let outcome = controller.complete(second, Ok(vec![movie("Rayuela")]));
        assert!(outcome.is_applied());

        let outcome = controller.complete(first, Ok(vec![movie("Tetris")]));
        assert!(matches!(outcome, SubmitOutcome::Stale));

        let conversation = controller.conversation();
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.items(), &[movie("Rayuela")]);
        assert_eq!(conversation.results().unwrap().category, Category::Books);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let config = Config {
            show_errors: true,
            ..Config::default()
        };
        let mut controller = InteractionController::new(&config);
        controller.state_mut().set_category(Some(Category::Series));
        controller.state_mut().set_mode(Mode::Top10);

        let first = controller.begin_submit().unwrap();
        let _second = controller.begin_submit().unwrap();
        let outcome = controller.complete(first, Err(AppError::RequestFailed("timeout".into())));

        assert!(matches!(outcome, SubmitOutcome::Stale));
        assert_eq!(controller.conversation().count_by(Speaker::System), 0);
    }

    #[test]
    fn test_default_method_from_config() {
        let config = Config {
            default_method: Method::Collaborative,
            ..Config::default()
        };
        let controller = InteractionController::new(&config);
        assert_eq!(controller.state().method(), Method::Collaborative);
        assert_eq!(controller.state().mode(), Mode::ByPreferences);
        assert_eq!(controller.state().category(), None);
    }
}
