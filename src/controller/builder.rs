use crate::{
    error::{AppError, AppResult},
    models::{BackendRequest, FilterSet, Mode, RecommendRequest, SearchRequest},
};

use super::ControllerState;

/// Splits comma-separated preferences, trimming each token.
///
/// Order is kept, duplicates are kept, and empty tokens from consecutive
/// commas are passed through as-is.
pub fn split_preferences(raw: &str) -> Vec<String> {
    raw.split(',').map(|token| token.trim().to_string()).collect()
}

/// Derives the single outbound request for the current state and mode.
///
/// Refuses with `SubmitDisabled` when the submit predicate does not hold.
pub fn build_request(state: &ControllerState) -> AppResult<BackendRequest> {
    if let Some(block) = state.submit_block() {
        return Err(AppError::SubmitDisabled(block));
    }
    let category = state
        .category()
        .ok_or(AppError::SubmitDisabled(super::SubmitBlock::MissingCategory))?;

    let request = match state.mode() {
        Mode::ByPreferences => BackendRequest::Recommend(RecommendRequest {
            category,
            preferences: split_preferences(state.preferences()),
            method: state.method(),
        }),
        Mode::Top10 => BackendRequest::Top10 { category },
        Mode::Search => {
            let filters: FilterSet = state
                .active_filters(category)
                .map(|(key, value)| (key, value.to_string()))
                .collect();

            BackendRequest::Search(SearchRequest {
                category,
                query: state.query().to_string(),
                filters,
            })
        }
    };

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SubmitBlock;
    use crate::models::{Category, FilterKey, Method};

    #[test]
    fn test_split_preferences_trims_and_keeps_order() {
        assert_eq!(split_preferences("rock, pop ,  jazz"), vec!["rock", "pop", "jazz"]);
    }

    #[test]
    fn test_split_preferences_keeps_duplicates_and_empty_tokens() {
        assert_eq!(split_preferences("rock,,rock"), vec!["rock", "", "rock"]);
        assert_eq!(split_preferences("solo"), vec!["solo"]);
    }

    #[test]
    fn test_build_recommend_request() {
        let mut state = ControllerState::default();
        state.set_category(Some(Category::Music));
        state.set_method(Method::Collaborative);
        state.set_preferences("rock, pop ,  jazz");

        let request = build_request(&state).unwrap();
        assert_eq!(
            request,
            BackendRequest::Recommend(RecommendRequest {
                category: Category::Music,
                preferences: vec!["rock".into(), "pop".into(), "jazz".into()],
                method: Method::Collaborative,
            })
        );
    }

    #[test]
    fn test_build_top10_ignores_other_inputs() {
        let mut state = ControllerState::default();
        state.set_category(Some(Category::Movies));
        state.set_mode(Mode::Top10);
        state.set_preferences("drama");
        state.set_query("nolan");

        let request = build_request(&state).unwrap();
        assert_eq!(
            request,
            BackendRequest::Top10 {
                category: Category::Movies
            }
        );
    }

    #[test]
    fn test_search_filters_restricted_to_category() {
        let mut state = ControllerState::default();
        state.set_category(Some(Category::Music));
        state.set_mode(Mode::Search);
        state.set_filter(FilterKey::Year, "2020");
        state.set_filter(FilterKey::Genre, "ignored");
        state.set_filter(FilterKey::Artist, "Shakira");

        let request = build_request(&state).unwrap();
        let BackendRequest::Search(search) = &request else {
            panic!("expected search request");
        };
        assert_eq!(search.query, "");
        assert_eq!(search.filters.len(), 2);
        assert_eq!(search.filters.get(&FilterKey::Year).map(String::as_str), Some("2020"));
        assert_eq!(
            search.filters.get(&FilterKey::Artist).map(String::as_str),
            Some("Shakira")
        );

        let body = String::from_utf8(request.body().unwrap().unwrap()).unwrap();
        assert_eq!(
            body,
            r#"{"categoria":"musica","query":"","filtros":{"año":"2020","artista":"Shakira"}}"#
        );
    }

    #[test]
    fn test_search_omits_blank_filters() {
        let mut state = ControllerState::default();
        state.set_category(Some(Category::Books));
        state.set_mode(Mode::Search);
        state.set_query("macondo");
        state.set_filter(FilterKey::Author, "   ");

        let BackendRequest::Search(search) = build_request(&state).unwrap() else {
            panic!("expected search request");
        };
        assert!(search.filters.is_empty());
    }

    #[test]
    fn test_builder_is_deterministic() {
        let mut state = ControllerState::default();
        state.set_category(Some(Category::Videogames));
        state.set_mode(Mode::Search);
        state.set_query("mario");
        state.set_filter(FilterKey::Platform, "Wii");
        state.set_filter(FilterKey::Genre, "Platform");
        state.set_filter(FilterKey::Year, "2007");

        let first = build_request(&state).unwrap().body().unwrap();
        let second = build_request(&state).unwrap().body().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_builder_refuses_when_disabled() {
        let state = ControllerState::default();
        let err = build_request(&state).unwrap_err();
        assert!(matches!(
            err,
            AppError::SubmitDisabled(SubmitBlock::MissingCategory)
        ));
    }
}
