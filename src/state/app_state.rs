//! Application state definitions

use super::forms::StepForm;
use super::store::FormStore;
use super::summary::ReviewSection;
use super::upload::UploadProgress;
use super::validation::ValidationErrors;
use super::wizard::WizardStep;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

/// Acknowledgment returned by the submission service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAck {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

/// Where the submit action stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted(SubmissionAck),
}

/// Slow action queued by a key press, run after the next draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Submit,
    SendVerification(String),
}

/// Review step selection, collapsed sections and certification
#[derive(Debug, Clone, Default)]
pub struct ReviewState {
    pub selected_section: usize,
    pub collapsed: HashSet<ReviewSection>,
    /// "I certify the information is accurate"
    pub certified: bool,
}

impl ReviewState {
    pub fn selected(&self) -> ReviewSection {
        ReviewSection::ALL[self.selected_section.min(ReviewSection::ALL.len() - 1)]
    }

    pub fn select_next(&mut self) {
        if self.selected_section + 1 < ReviewSection::ALL.len() {
            self.selected_section += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_section = self.selected_section.saturating_sub(1);
    }

    pub fn toggle_selected(&mut self) {
        let section = self.selected();
        if !self.collapsed.remove(&section) {
            self.collapsed.insert(section);
        }
    }

    pub fn is_collapsed(&self, section: ReviewSection) -> bool {
        self.collapsed.contains(&section)
    }
}

/// Main application state
pub struct AppState {
    // Form
    pub store: FormStore,
    pub form: StepForm,
    /// Errors from the last failed advance on the current step
    pub errors: ValidationErrors,

    // Review
    pub review: ReviewState,
    pub submission: SubmissionStatus,

    // Async actions
    pub pending_action: Option<PendingAction>,
    pub uploads: Vec<UploadProgress>,

    // Feedback
    pub error_queue: VecDeque<String>,
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let store = FormStore::new();
        let form = StepForm::for_step(store.step(), store.get());
        Self {
            store,
            form,
            errors: ValidationErrors::new(),
            review: ReviewState::default(),
            submission: SubmissionStatus::Idle,
            pending_action: None,
            uploads: Vec::new(),
            error_queue: VecDeque::new(),
            status_message: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.store.step()
    }

    /// Bring the step form in line with the store: a new step gets a fresh
    /// form, the same step only refreshes its rows.
    pub fn sync_form(&mut self) {
        if self.form.step != self.store.step() {
            self.form = StepForm::for_step(self.store.step(), self.store.get());
        } else {
            self.form.refresh(self.store.get());
        }
    }

    /// Error message for a validator key, if the last advance reported one
    pub fn field_error(&self, key: Option<&str>) -> Option<&str> {
        key.and_then(|k| self.errors.get(k))
    }

    /// Back to an empty form on step 1
    pub fn reset(&mut self) {
        self.store.reset();
        self.errors = ValidationErrors::new();
        self.review = ReviewState::default();
        self.submission = SubmissionStatus::Idle;
        self.pending_action = None;
        self.uploads.clear();
        self.sync_form();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    // Error queue

    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::record::{FieldUpdate, TextField};

    mod review_state {
        use super::*;

        #[test]
        fn test_selection_saturates() {
            let mut review = ReviewState::default();
            review.select_prev();
            assert_eq!(review.selected(), ReviewSection::BasicInformation);
            for _ in 0..10 {
                review.select_next();
            }
            assert_eq!(review.selected(), ReviewSection::ServicesCertifications);
        }

        #[test]
        fn test_toggle_collapse() {
            let mut review = ReviewState::default();
            review.toggle_selected();
            assert!(review.is_collapsed(ReviewSection::BasicInformation));
            review.toggle_selected();
            assert!(!review.is_collapsed(ReviewSection::BasicInformation));
        }
    }

    mod error_queue {
        use super::*;

        #[test]
        fn test_errors_are_fifo() {
            let mut state = AppState::new();
            assert!(!state.has_errors());
            state.push_error("first".into());
            state.push_error("second".into());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }

    mod form_sync {
        use super::*;

        #[test]
        fn test_new_state_has_step_one_form() {
            let state = AppState::new();
            assert_eq!(state.form.step, WizardStep::FIRST);
            assert!(!state.form.fields.is_empty());
        }

        #[test]
        fn test_sync_rebuilds_on_step_change() {
            let mut state = AppState::new();
            state.store.jump_to(2);
            state.sync_form();
            assert_eq!(state.form.step.number(), 2);
            assert_eq!(state.form.fields.len(), 1);
        }

        #[test]
        fn test_reset_clears_everything() {
            let mut state = AppState::new();
            state.store.set_field(FieldUpdate::Text(
                TextField::LegalEntityName,
                "Riverside".into(),
            ));
            state.store.jump_to(7);
            state.review.certified = true;
            state.errors.insert("email", "Email is required");
            state.reset();

            assert_eq!(state.step(), WizardStep::FIRST);
            assert!(state.store.get().legal_entity_name.is_empty());
            assert!(!state.review.certified);
            assert!(state.errors.is_empty());
            assert_eq!(state.form.step, WizardStep::FIRST);
        }
    }
}
