//! Form field descriptors

use crate::state::record::{DateList, FlagField, TextField};

/// What a focusable row on a step edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text stored directly in the record
    Text(TextField),
    /// Checkbox
    Toggle(FlagField),
    /// Cycles through the facility type catalog
    Facility,
    /// Single / multiple locations
    SiteMode,
    /// Whether site details come from an uploaded spreadsheet
    UploadMethod,
    /// Draft input for a local spreadsheet path
    UploadPath,
    /// An attached spreadsheet, removable
    UploadedFile(usize),
    /// Draft input for a new standard
    Standard,
    /// An added standard, removable
    StandardEntry(usize),
    /// Draft input for a new certification date
    Date(DateList),
    /// An added certification date, removable
    DateEntry(DateList, usize),
    /// Sends the verification email for the primary contact
    VerifyEmail,
}

impl FieldKind {
    /// Whether typed characters go to this field
    pub fn accepts_text(&self) -> bool {
        matches!(
            self,
            Self::Text(_) | Self::UploadPath | Self::Standard | Self::Date(_)
        )
    }

    /// Typed characters are held in the form's draft until Enter
    pub fn uses_draft(&self) -> bool {
        matches!(self, Self::UploadPath | Self::Standard | Self::Date(_))
    }

    /// Rows that Delete removes from a list
    pub fn is_entry(&self) -> bool {
        matches!(
            self,
            Self::UploadedFile(_) | Self::StandardEntry(_) | Self::DateEntry(..)
        )
    }
}

/// A single focusable row with its label and validation key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Heading the row is listed under
    pub group: &'static str,
    pub label: String,
    pub kind: FieldKind,
    /// Key under which validators report this row's error
    pub error_key: Option<&'static str>,
}

impl FormField {
    pub fn new(group: &'static str, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            group,
            label: label.into(),
            kind,
            error_key: None,
        }
    }

    pub fn with_error(mut self, key: &'static str) -> Self {
        self.error_key = Some(key);
        self
    }

    pub fn text(group: &'static str, label: &str, field: TextField) -> Self {
        Self::new(group, label, FieldKind::Text(field))
    }

    pub fn toggle(group: &'static str, label: &str, flag: FlagField) -> Self {
        Self::new(group, label, FieldKind::Toggle(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::record::PrimaryField;

    #[test]
    fn test_text_kinds_accept_typing() {
        assert!(FieldKind::Text(TextField::DbaName).accepts_text());
        assert!(FieldKind::Date(DateList::Thrombolytic).accepts_text());
        assert!(!FieldKind::Facility.accepts_text());
        assert!(!FieldKind::StandardEntry(0).accepts_text());
    }

    #[test]
    fn test_only_list_inputs_use_draft() {
        assert!(FieldKind::Standard.uses_draft());
        assert!(FieldKind::UploadPath.uses_draft());
        assert!(!FieldKind::Text(TextField::Primary(PrimaryField::Email)).uses_draft());
    }

    #[test]
    fn test_with_error_sets_key() {
        let field = FormField::text("Identity", "Legal Entity Name", TextField::LegalEntityName)
            .with_error("legalEntityName");
        assert_eq!(field.error_key, Some("legalEntityName"));
        assert!(!field.kind.is_entry());
    }
}
