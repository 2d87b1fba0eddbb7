//! Application state and core logic

use crate::config::IntakeConfig;
use crate::export::{self, ExportFormat};
use crate::platform::{self, CONTINUE_KEY, PREVIOUS_KEY, RESET_KEY, SAVE_KEY};
use crate::state::record::{FacilityType, FieldUpdate, FlagField, SiteMode, UploadMethod, UploadedFile};
use crate::state::summary::{project, render_text};
use crate::state::upload::{tick_uploads, UploadProgress};
use crate::state::validation::{is_valid_email, keys};
use crate::state::wizard::first_invalid_step;
use crate::state::{
    AppState, FieldKind, Form, PendingAction, RecordError, SubmissionStatus, WizardStep,
};
use crate::submission::{SimulatedSubmitter, SubmissionService};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};

/// Spreadsheet extensions accepted for multi-site uploads
const UPLOAD_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend the form is submitted to
    submitter: Box<dyn SubmissionService>,
    config: IntakeConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App backed by the simulated submitter
    pub fn new(config: IntakeConfig) -> Self {
        let submitter = SimulatedSubmitter::from_config(&config);
        Self::with_service(config, Box::new(submitter))
    }

    pub fn with_service(config: IntakeConfig, submitter: Box<dyn SubmissionService>) -> Self {
        Self {
            state: AppState::new(),
            submitter,
            config,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Advance time-based indicators; called once per frame
    pub fn tick(&mut self) {
        tick_uploads(&mut self.state.uploads);
    }

    /// Whether the run loop should redraw quickly
    pub fn is_animating(&self) -> bool {
        !self.state.uploads.is_empty() || self.state.pending_action.is_some()
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.submission {
            SubmissionStatus::Submitting => return Ok(()),
            SubmissionStatus::Submitted(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.start_new_application();
                }
                return Ok(());
            }
            SubmissionStatus::Idle => {}
        }

        // Clear any status message on key press
        self.state.status_message = None;

        if platform::is_shortcut(&key, RESET_KEY) {
            self.start_new_application();
            return Ok(());
        }

        if self.state.step().is_review() {
            self.handle_review_key(key).await
        } else {
            self.handle_step_key(key).await
        }
    }

    /// Run the action queued by the last key press, if any
    pub async fn run_pending(&mut self) {
        let Some(action) = self.state.pending_action.take() else {
            return;
        };
        match action {
            PendingAction::Submit => self.submit().await,
            PendingAction::SendVerification(email) => self.send_verification(&email).await,
        }
    }

    // Data-entry steps

    async fn handle_step_key(&mut self, key: KeyEvent) -> Result<()> {
        if platform::is_shortcut(&key, CONTINUE_KEY) {
            self.advance();
            return Ok(());
        }
        if platform::is_shortcut(&key, PREVIOUS_KEY) {
            self.back();
            return Ok(());
        }
        if platform::is_shortcut(&key, SAVE_KEY) {
            self.save_progress();
            return Ok(());
        }

        let kind = self.state.form.active_kind();
        let accepts_text = kind.is_some_and(|k| k.accepts_text());
        let modified = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Char(c) if accepts_text && !modified => self.input_char(c),
            KeyCode::Char(' ') if !modified => self.activate(),
            KeyCode::Backspace if accepts_text => self.backspace(),
            KeyCode::Enter => self.activate(),
            KeyCode::Delete if kind.is_some_and(|k| k.is_entry()) => self.activate(),
            _ => {}
        }
        Ok(())
    }

    fn input_char(&mut self, c: char) {
        let Some(field) = self.state.form.active().cloned() else {
            return;
        };
        match field.kind {
            kind if kind.uses_draft() => self.state.form.draft.push(c),
            FieldKind::Text(text_field) if !self.state.store.get().is_read_only(text_field) => {
                let mut value = self.state.store.get().text(text_field).to_string();
                value.push(c);
                self.state.store.set_text(text_field, value);
            }
            _ => return,
        }
        self.clear_field_error(field.error_key);
    }

    fn backspace(&mut self) {
        let Some(field) = self.state.form.active().cloned() else {
            return;
        };
        match field.kind {
            kind if kind.uses_draft() => {
                self.state.form.draft.pop();
            }
            FieldKind::Text(text_field) if !self.state.store.get().is_read_only(text_field) => {
                let mut value = self.state.store.get().text(text_field).to_string();
                value.pop();
                self.state.store.set_text(text_field, value);
            }
            _ => {}
        }
    }

    fn clear_field_error(&mut self, key: Option<&'static str>) {
        if let Some(key) = key {
            self.state.errors.remove(key);
        }
    }

    /// Toggle, cycle, commit or remove, depending on the focused row
    fn activate(&mut self) {
        let Some(field) = self.state.form.active().cloned() else {
            return;
        };
        if let FieldKind::Text(_) = field.kind {
            self.state.form.next_field();
            return;
        }

        if let Err(err) = self.apply_activation(field.kind) {
            self.push_error(err.to_string());
        }
        self.clear_field_error(field.error_key);
        self.state.sync_form();
    }

    fn apply_activation(&mut self, kind: FieldKind) -> Result<(), RecordError> {
        let record = self.state.store.get();
        match kind {
            FieldKind::Text(_) => {}
            FieldKind::Toggle(FlagField::SameAsLegalEntity) => {
                let checked = !record.same_as_legal_entity;
                self.state.store.set_same_as_legal_entity(checked);
            }
            FieldKind::Toggle(FlagField::SameAsPrimary(role)) => {
                let checked = !record.role(role).same_as_primary;
                self.state.store.set_same_as_primary(role, checked);
            }
            FieldKind::Toggle(FlagField::Service(catalog, key)) => {
                self.state.store.toggle_service(catalog, key);
            }
            FieldKind::Toggle(flag) => {
                let value = !record.flag(flag);
                self.state.store.set_field(FieldUpdate::Flag(flag, value));
            }
            FieldKind::Facility => {
                let next = FacilityType::cycle(record.facility_type);
                self.state
                    .store
                    .set_field(FieldUpdate::FacilityType(Some(next)));
            }
            FieldKind::SiteMode => {
                let next = SiteMode::toggle(record.has_multiple_sites);
                self.state.store.select_site_mode(next);
            }
            FieldKind::UploadMethod => {
                let next = match record.upload_method {
                    UploadMethod::None => UploadMethod::Csv,
                    UploadMethod::Csv => UploadMethod::None,
                };
                self.state.store.set_field(FieldUpdate::UploadMethod(next));
            }
            FieldKind::UploadPath => {
                let path = std::mem::take(&mut self.state.form.draft);
                self.attach_file(&path);
            }
            FieldKind::UploadedFile(index) => {
                let removed = self.state.store.remove_uploaded_file(index)?;
                tracing::info!("Removed site file {}", removed.name);
            }
            FieldKind::Standard => {
                self.state.store.add_standard(&self.state.form.draft)?;
                self.state.form.draft.clear();
            }
            FieldKind::StandardEntry(index) => {
                self.state.store.remove_standard(index)?;
            }
            FieldKind::Date(list) => {
                self.state.store.add_date(list, &self.state.form.draft)?;
                self.state.form.draft.clear();
            }
            FieldKind::DateEntry(list, index) => {
                self.state.store.remove_date(list, index)?;
            }
            FieldKind::VerifyEmail => self.request_verification(),
        }
        Ok(())
    }

    /// Attach a local spreadsheet by path. Only its metadata is recorded.
    fn attach_file(&mut self, raw_path: &str) {
        let path = PathBuf::from(raw_path.trim());
        if !has_upload_extension(&path) {
            self.push_error("Please upload a CSV or Excel file (.csv, .xlsx, .xls)");
            return;
        }
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => {
                self.push_error(format!("{} is not a file", path.display()));
                return;
            }
            Err(err) => {
                self.push_error(format!("Cannot read {}: {err}", path.display()));
                return;
            }
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.state
            .uploads
            .push(UploadProgress::new(name.clone(), self.config.upload_duration()));
        self.state.store.add_uploaded_file(UploadedFile {
            name,
            size: metadata.len(),
            handle: path,
        });
        self.state.errors.remove(keys::FILE_UPLOAD);
    }

    fn request_verification(&mut self) {
        let email = self.state.store.get().primary_contact.email.trim().to_string();
        if !is_valid_email(&email) {
            self.state
                .errors
                .insert(keys::EMAIL, "Please enter a valid email address");
            return;
        }
        self.state.set_status(format!("Sending verification email to {email}..."));
        self.state.pending_action = Some(PendingAction::SendVerification(email));
    }

    async fn send_verification(&mut self, email: &str) {
        match self.submitter.send_verification_email(email).await {
            Ok(()) => {
                // The address may have been edited while the request was out
                if self.state.store.get().primary_contact.email.trim() == email {
                    self.state
                        .store
                        .set_field(FieldUpdate::Flag(FlagField::EmailVerified, true));
                }
                self.state.set_status(format!("Verification email sent to {email}"));
            }
            Err(err) => self.push_error(format!("Failed to send verification email: {err}")),
        }
    }

    // Navigation

    fn advance(&mut self) {
        let from = self.state.step();
        let errors = self.state.store.advance();
        if errors.is_empty() {
            self.state.errors = errors;
            self.state.sync_form();
            if self.state.step() != from {
                tracing::info!("Moved to step {}", self.state.step().number());
            }
        } else {
            for (key, message) in errors.iter() {
                tracing::debug!("step {} invalid: {key}: {message}", from.number());
            }
            self.state.errors = errors;
            self.state.form.focus_first_error(&self.state.errors);
            self.state
                .set_status(format!("Please fix {} field(s) to continue", self.state.errors.len()));
        }
    }

    fn back(&mut self) {
        self.state.store.back();
        self.state.errors = Default::default();
        self.state.sync_form();
    }

    fn jump_to(&mut self, step: WizardStep) {
        self.state.store.jump_to(step.number());
        self.state.errors = Default::default();
        self.state.sync_form();
    }

    fn save_progress(&mut self) {
        match serde_json::to_string(self.state.store.get()) {
            Ok(json) => {
                tracing::info!(
                    "Progress saved at step {}: {json}",
                    self.state.step().number()
                );
                self.state.set_status(format!(
                    "Progress saved (step {} of {})",
                    self.state.step().number(),
                    WizardStep::LAST_ENTRY.number()
                ));
            }
            Err(err) => self.push_error(format!("Failed to save progress: {err}")),
        }
    }

    fn start_new_application(&mut self) {
        self.state.reset();
        self.state.set_status("Started a new application");
    }

    // Review step

    async fn handle_review_key(&mut self, key: KeyEvent) -> Result<()> {
        if platform::is_shortcut(&key, SAVE_KEY) {
            self.request_submit();
            return Ok(());
        }
        if platform::is_shortcut(&key, PREVIOUS_KEY) {
            self.back();
            return Ok(());
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => self.state.review.select_prev(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.state.review.select_next(),
            KeyCode::Char(' ') | KeyCode::Enter => self.state.review.toggle_selected(),
            KeyCode::Char('e') => {
                let step = self.state.review.selected().edit_step();
                self.jump_to(step);
            }
            KeyCode::Char('c') => {
                self.state.review.certified = !self.state.review.certified;
            }
            KeyCode::Char('t') => self.export(ExportFormat::Text),
            KeyCode::Char('v') => self.export(ExportFormat::Csv),
            KeyCode::Char('y') => self.copy_summary(),
            _ => {}
        }
        Ok(())
    }

    /// Check certification and every step, then queue the submission
    fn request_submit(&mut self) {
        if !self.state.review.certified {
            self.push_error("Please certify that the information provided is accurate (press c)");
            return;
        }
        if let Some((step, errors)) = first_invalid_step(self.state.store.get()) {
            self.jump_to(step);
            self.state.errors = errors;
            self.state.form.focus_first_error(&self.state.errors);
            self.push_error(format!(
                "Step {} ({}) needs attention before submitting",
                step.number(),
                step.title()
            ));
            return;
        }
        self.state.submission = SubmissionStatus::Submitting;
        self.state.pending_action = Some(PendingAction::Submit);
    }

    async fn submit(&mut self) {
        match self.submitter.submit(self.state.store.get()).await {
            Ok(ack) => {
                tracing::info!("Submission acknowledged: {}", ack.id);
                self.state.submission = SubmissionStatus::Submitted(ack);
            }
            Err(err) => {
                self.state.submission = SubmissionStatus::Idle;
                self.push_error(format!("Submission failed: {err}"));
            }
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let dir = self.config.export_dir();
        match export::export(self.state.store.get(), format, &dir) {
            Ok(path) => self.state.set_status(format!("Saved {}", path.display())),
            Err(err) => self.push_error(format!("Export failed: {err:#}")),
        }
    }

    fn copy_summary(&mut self) {
        let text = render_text(&project(self.state.store.get()));
        match self.copy_to_clipboard(&text) {
            Ok(()) => self.state.set_status("Summary copied to clipboard"),
            Err(err) => self.push_error(format!("Failed to copy: {err}")),
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

fn has_upload_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            UPLOAD_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}
