use crate::models::{BackendRequest, Category, Mode, ResultItem, Speaker, TranscriptEntry};

use super::ControllerState;

/// Shown after a failed request when visible errors are enabled
pub const FAILURE_NOTICE: &str = "No se pudo completar la solicitud.";

/// Results of the last successful submission, tagged with the category they belong to
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub category: Category,
    pub mode: Mode,
    pub items: Vec<ResultItem>,
}

/// Append-only transcript plus the current result set
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    transcript: Vec<TranscriptEntry>,
    results: Option<ResultSet>,
}

/// User turn echoing the action about to be sent
pub fn echo_text(state: &ControllerState, request: &BackendRequest) -> String {
    match request {
        BackendRequest::Recommend(_) => format!("Me gustan: {}", state.preferences()),
        BackendRequest::Top10 { category } => format!("Muéstrame el top 10 de {}", category),
        BackendRequest::Search(_) => format!("Busco: {}", state.query()),
    }
}

/// Fixed system acknowledgement for a successful call
pub fn acknowledgement(mode: Mode) -> &'static str {
    match mode {
        Mode::ByPreferences => "Aquí tienes tus recomendaciones:",
        Mode::Top10 => "Top 10 de la categoría:",
        Mode::Search => "Resultados de la búsqueda:",
    }
}

impl Conversation {
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    /// Items of the current result set, empty before the first success
    pub fn items(&self) -> &[ResultItem] {
        self.results
            .as_ref()
            .map(|set| set.items.as_slice())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    pub(crate) fn push_user(&mut self, text: String) {
        self.transcript.push(TranscriptEntry::user(text));
    }

    /// Appends the acknowledgement and swaps in the new results in one step
    pub(crate) fn apply_success(&mut self, request: &BackendRequest, items: Vec<ResultItem>) {
        self.transcript
            .push(TranscriptEntry::system(acknowledgement(request.mode())));
        self.results = Some(ResultSet {
            category: request.category(),
            mode: request.mode(),
            items,
        });
    }

    pub(crate) fn push_failure_notice(&mut self) {
        self.transcript.push(TranscriptEntry::system(FAILURE_NOTICE));
    }

    /// Entries from `start` onwards, used to print what a submission added
    pub fn since(&self, start: usize) -> &[TranscriptEntry] {
        self.transcript.get(start..).unwrap_or_default()
    }

    pub fn count_by(&self, speaker: Speaker) -> usize {
        self.transcript
            .iter()
            .filter(|entry| entry.speaker == speaker)
            .count()
    }
}
