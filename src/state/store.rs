//! Form state store
//!
//! Owns the single [`FormRecord`] and the current [`WizardStep`]. Every record
//! mutation is a [`FieldUpdate`] applied by [`FormStore::set_field`] or
//! [`FormStore::set_many`], so the one-shot copies (same as primary, same as
//! legal entity) land atomically.

use super::record::{
    ContactField, DateList, FieldUpdate, FlagField, FormRecord, PrimaryField, Role,
    ServiceCatalog, ServiceKey, SiteMode, TextField, UploadMethod, UploadedFile,
};
use super::validation::ValidationErrors;
use super::wizard::{self, WizardStep};
use chrono::NaiveDate;
use thiserror::Error;

/// Accepted input formats for certification dates
const DATE_INPUT_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];
/// Stored format for certification dates
const DATE_OUTPUT_FORMAT: &str = "%m/%d/%Y";

/// Rejected list mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Standard name cannot be blank")]
    BlankStandard,
    #[error("\"{0}\" is already in the standards list")]
    DuplicateStandard(String),
    #[error("\"{0}\" is not a valid date (use MM/DD/YYYY)")]
    InvalidDate(String),
    #[error("At most {cap} {noun} dates can be recorded")]
    DateCapReached { noun: &'static str, cap: usize },
    #[error("No entry at position {0}")]
    IndexOutOfRange(usize),
}

#[derive(Debug, Clone, Default)]
pub struct FormStore {
    record: FormRecord,
    step: WizardStep,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_record(record: FormRecord) -> Self {
        Self {
            record,
            step: WizardStep::FIRST,
        }
    }

    /// Current snapshot of the record
    pub fn get(&self) -> &FormRecord {
        &self.record
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Replace a single value. Never validates.
    pub fn set_field(&mut self, update: FieldUpdate) {
        tracing::debug!("set_field {update:?}");
        self.record.apply(update);
    }

    /// Apply several updates as one replacement of the record
    pub fn set_many(&mut self, updates: impl IntoIterator<Item = FieldUpdate>) {
        let mut next = self.record.clone();
        for update in updates {
            tracing::debug!("set_many {update:?}");
            next.apply(update);
        }
        self.record = next;
    }

    /// Restore every field to its default and return to the first step
    pub fn reset(&mut self) {
        tracing::info!("Resetting intake form");
        self.record = FormRecord::default();
        self.step = WizardStep::FIRST;
    }

    // Navigation

    /// Validate the current step and move forward when it passes
    pub fn advance(&mut self) -> ValidationErrors {
        let result = wizard::advance(self.step, &self.record);
        self.step = result.step;
        result.errors
    }

    pub fn back(&mut self) {
        self.step = wizard::back(self.step);
    }

    pub fn jump_to(&mut self, target: u8) {
        self.step = wizard::jump_to(target);
        tracing::debug!("jump to step {}", self.step.number());
    }

    // One-shot copies

    /// Set a role's "same as primary" flag; turning it on copies the
    /// primary contact's name, work phone and email in the same update.
    pub fn set_same_as_primary(&mut self, role: Role, checked: bool) {
        let flag = FieldUpdate::Flag(FlagField::SameAsPrimary(role), checked);
        if !checked {
            self.set_field(flag);
            return;
        }

        let primary = &self.record.primary_contact;
        let copies = [
            (ContactField::FirstName, primary.first_name.clone()),
            (ContactField::LastName, primary.last_name.clone()),
            (ContactField::Phone, primary.work_phone.clone()),
            (ContactField::Email, primary.email.clone()),
        ];
        let updates = std::iter::once(flag).chain(
            copies
                .into_iter()
                .map(|(field, value)| FieldUpdate::Text(TextField::Contact(role, field), value)),
        );
        self.set_many(updates);
    }

    /// Set "same as legal entity"; turning it on copies the legal name
    /// into the d/b/a name.
    pub fn set_same_as_legal_entity(&mut self, checked: bool) {
        let flag = FieldUpdate::Flag(FlagField::SameAsLegalEntity, checked);
        if checked {
            let legal = self.record.legal_entity_name.clone();
            self.set_many([flag, FieldUpdate::Text(TextField::DbaName, legal)]);
        } else {
            self.set_field(flag);
        }
    }

    /// Edit a text value; keeps mirrored values in step with their source
    pub fn set_text(&mut self, field: TextField, value: String) {
        let mut updates = Vec::with_capacity(2);
        if field == TextField::LegalEntityName && self.record.same_as_legal_entity {
            updates.push(FieldUpdate::Text(TextField::DbaName, value.clone()));
        }
        if field == TextField::Primary(PrimaryField::Email) {
            updates.push(FieldUpdate::Flag(FlagField::EmailVerified, false));
        }
        updates.push(FieldUpdate::Text(field, value));
        self.set_many(updates);
    }

    // Site information

    /// Choose single or multiple locations; single clears any upload state
    pub fn select_site_mode(&mut self, mode: SiteMode) {
        match mode {
            SiteMode::Single => self.set_many([
                FieldUpdate::SiteMode(Some(SiteMode::Single)),
                FieldUpdate::UploadMethod(UploadMethod::None),
                FieldUpdate::UploadedFiles(Vec::new()),
            ]),
            SiteMode::Multiple => self.set_field(FieldUpdate::SiteMode(Some(SiteMode::Multiple))),
        }
    }

    pub fn add_uploaded_file(&mut self, file: UploadedFile) {
        tracing::info!("Attached site file {} ({})", file.name, file.size_label());
        let mut files = self.record.uploaded_files.clone();
        files.push(file);
        self.set_field(FieldUpdate::UploadedFiles(files));
    }

    pub fn remove_uploaded_file(&mut self, index: usize) -> Result<UploadedFile, RecordError> {
        let mut files = self.record.uploaded_files.clone();
        if index >= files.len() {
            return Err(RecordError::IndexOutOfRange(index));
        }
        let removed = files.remove(index);
        self.set_field(FieldUpdate::UploadedFiles(files));
        Ok(removed)
    }

    // Services

    pub fn toggle_service(&mut self, catalog: ServiceCatalog, key: ServiceKey) {
        let field = FlagField::Service(catalog, key);
        let current = self.record.flag(field);
        self.set_field(FieldUpdate::Flag(field, !current));
    }

    // Standards

    /// Append a standard; blanks and duplicates are rejected
    pub fn add_standard(&mut self, standard: &str) -> Result<(), RecordError> {
        let standard = standard.trim();
        if standard.is_empty() {
            return Err(RecordError::BlankStandard);
        }
        let mut standards = self.record.standards_to_apply.clone();
        if standards.iter().any(|s| s == standard) {
            return Err(RecordError::DuplicateStandard(standard.to_string()));
        }
        standards.push(standard.to_string());
        self.set_field(FieldUpdate::Standards(standards));
        Ok(())
    }

    pub fn remove_standard(&mut self, index: usize) -> Result<String, RecordError> {
        let mut standards = self.record.standards_to_apply.clone();
        if index >= standards.len() {
            return Err(RecordError::IndexOutOfRange(index));
        }
        let removed = standards.remove(index);
        self.set_field(FieldUpdate::Standards(standards));
        Ok(removed)
    }

    // Certification dates

    /// Append a date to `list`, normalized to MM/DD/YYYY. Returns the stored text.
    pub fn add_date(&mut self, list: DateList, raw: &str) -> Result<String, RecordError> {
        let mut dates = self.record.dates(list).clone();
        if dates.len() >= list.cap() {
            return Err(RecordError::DateCapReached {
                noun: list.noun(),
                cap: list.cap(),
            });
        }
        let date = parse_date(raw)?;
        let formatted = date.format(DATE_OUTPUT_FORMAT).to_string();
        dates.push(formatted.clone());
        self.set_field(FieldUpdate::Dates(list, dates));
        Ok(formatted)
    }

    pub fn remove_date(&mut self, list: DateList, index: usize) -> Result<String, RecordError> {
        let mut dates = self.record.dates(list).clone();
        if index >= dates.len() {
            return Err(RecordError::IndexOutOfRange(index));
        }
        let removed = dates.remove(index);
        self.set_field(FieldUpdate::Dates(list, dates));
        Ok(removed)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, RecordError> {
    let raw = raw.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .ok_or_else(|| RecordError::InvalidDate(raw.to_string()))
}
