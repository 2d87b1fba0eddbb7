//! Step forms: the focusable rows of each wizard step

use super::field::{FieldKind, FormField};
use crate::state::record::{
    AddressField, ContactField, DateList, FlagField, FormRecord, PrimaryField, Role,
    ServiceCatalog, ServiceCategory, SiteMode, TextField, UploadMethod,
};
use crate::state::validation::{contact_key, keys, ValidationErrors};
use crate::state::wizard::WizardStep;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Rows of the current step plus the draft for list inputs
#[derive(Debug, Clone, Default)]
pub struct StepForm {
    pub step: WizardStep,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    /// Pending text for the focused list input (path, standard or date)
    pub draft: String,
}

impl StepForm {
    pub fn for_step(step: WizardStep, record: &FormRecord) -> Self {
        Self {
            step,
            fields: fields_for(step, record),
            active_field_index: 0,
            draft: String::new(),
        }
    }

    /// Rebuild the rows after the record changed shape (list entries,
    /// site mode). Focus stays put, clamped to the new row count.
    pub fn refresh(&mut self, record: &FormRecord) {
        self.fields = fields_for(self.step, record);
        if self.active_field_index >= self.fields.len() {
            self.active_field_index = self.fields.len().saturating_sub(1);
        }
    }

    pub fn active(&self) -> Option<&FormField> {
        self.get_field(self.active_field_index)
    }

    pub fn active_kind(&self) -> Option<FieldKind> {
        self.active().map(|f| f.kind)
    }

    /// Move focus to the first row that has an error
    pub fn focus_first_error(&mut self, errors: &ValidationErrors) {
        if let Some(index) = self
            .fields
            .iter()
            .position(|f| f.error_key.is_some_and(|key| errors.contains_key(key)))
        {
            self.set_active_field(index);
        }
    }

    /// Focus the row editing `kind`, if this step has one
    pub fn focus_kind(&mut self, kind: FieldKind) {
        if let Some(index) = self.fields.iter().position(|f| f.kind == kind) {
            self.set_active_field(index);
        }
    }
}

impl Form for StepForm {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let index = index.min(self.fields.len().saturating_sub(1));
        if index != self.active_field_index {
            self.draft.clear();
        }
        self.active_field_index = index;
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

fn fields_for(step: WizardStep, record: &FormRecord) -> Vec<FormField> {
    match step.number() {
        1 => quote_request_fields(),
        2 => facility_fields(),
        3 => leadership_fields(),
        4 => site_fields(record),
        5 => site_service_fields(),
        6 => offering_fields(record),
        _ => Vec::new(),
    }
}

fn quote_request_fields() -> Vec<FormField> {
    const ORG: &str = "Identify Healthcare Organization";
    const CONTACT: &str = "Primary Contact Information";
    let primary = |label: &str, field: PrimaryField| {
        FormField::text(CONTACT, label, TextField::Primary(field))
    };
    vec![
        FormField::text(ORG, "Legal Entity Name", TextField::LegalEntityName)
            .with_error(keys::LEGAL_ENTITY_NAME),
        FormField::text(ORG, "Doing Business As (d/b/a) Name", TextField::DbaName)
            .with_error(keys::DBA_NAME),
        FormField::toggle(ORG, "Same as Legal Entity Name", FlagField::SameAsLegalEntity),
        primary("First Name", PrimaryField::FirstName).with_error(keys::FIRST_NAME),
        primary("Last Name", PrimaryField::LastName).with_error(keys::LAST_NAME),
        primary("Title", PrimaryField::Title).with_error(keys::TITLE),
        primary("Work Phone", PrimaryField::WorkPhone).with_error(keys::WORK_PHONE),
        primary("Cell Phone", PrimaryField::CellPhone),
        primary("Email", PrimaryField::Email).with_error(keys::EMAIL),
        FormField::new(CONTACT, "Send Verification Email", FieldKind::VerifyEmail),
    ]
}

fn facility_fields() -> Vec<FormField> {
    vec![FormField::new(
        "Facility and Organization Type",
        "Facility Type",
        FieldKind::Facility,
    )
    .with_error(keys::FACILITY_TYPE)]
}

fn leadership_fields() -> Vec<FormField> {
    const BILLING: &str = "Billing Address";
    let mut fields = Vec::new();
    for role in Role::ALL {
        let group = role.label();
        fields.push(FormField::toggle(
            group,
            "Same as Primary Contact entered in Step 1",
            FlagField::SameAsPrimary(role),
        ));
        for (label, field) in [
            ("First Name", ContactField::FirstName),
            ("Last Name", ContactField::LastName),
            ("Phone", ContactField::Phone),
            ("Email", ContactField::Email),
        ] {
            fields.push(
                FormField::text(group, label, TextField::Contact(role, field))
                    .with_error(contact_key(role, field)),
            );
        }
    }
    for (label, field, key) in [
        ("Street Address", AddressField::Street, keys::STREET),
        ("City", AddressField::City, keys::CITY),
        ("State", AddressField::State, keys::STATE),
        ("ZIP Code", AddressField::ZipCode, keys::ZIP_CODE),
    ] {
        fields.push(FormField::text(BILLING, label, TextField::Billing(field)).with_error(key));
    }
    fields
}

fn site_fields(record: &FormRecord) -> Vec<FormField> {
    const GROUP: &str = "Site Information";
    let mut fields = vec![FormField::new(
        GROUP,
        "Do you have multiple sites or locations?",
        FieldKind::SiteMode,
    )
    .with_error(keys::LOCATION_TYPE)];

    if record.has_multiple_sites == Some(SiteMode::Multiple) {
        fields.push(FormField::new(
            GROUP,
            "How would you like to add your site information?",
            FieldKind::UploadMethod,
        ));
        if record.upload_method == UploadMethod::Csv {
            fields.push(
                FormField::new(GROUP, "Add File (.csv, .xlsx, .xls)", FieldKind::UploadPath)
                    .with_error(keys::FILE_UPLOAD),
            );
            for (index, file) in record.uploaded_files.iter().enumerate() {
                fields.push(FormField::new(
                    "Uploaded",
                    format!("{} ({})", file.name, file.size_label()),
                    FieldKind::UploadedFile(index),
                ));
            }
        }
    }
    fields
}

fn service_toggles(catalog: ServiceCatalog) -> Vec<FormField> {
    const CATEGORIES: [ServiceCategory; 4] = [
        ServiceCategory::Emergency,
        ServiceCategory::Cardiac,
        ServiceCategory::Diagnostic,
        ServiceCategory::Rehabilitation,
    ];
    CATEGORIES
        .iter()
        .flat_map(|category| {
            catalog
                .keys()
                .iter()
                .filter(move |key| key.category() == *category)
                .map(move |key| {
                    FormField::toggle(
                        category.label(),
                        key.label(),
                        FlagField::Service(catalog, *key),
                    )
                })
        })
        .collect()
}

fn site_service_fields() -> Vec<FormField> {
    let mut fields = service_toggles(ServiceCatalog::Site);
    fields.push(
        FormField::text("Other", "Other Service", TextField::OtherService)
            .with_error(keys::SERVICES),
    );
    fields
}

fn offering_fields(record: &FormRecord) -> Vec<FormField> {
    const STANDARDS: &str = "Standards to Apply";
    const CERTIFICATION: &str = "Stroke Certification";

    let mut fields = service_toggles(ServiceCatalog::Offering);
    fields.push(
        FormField::text("Other", "Other Service Offering", TextField::OtherServiceOffering)
            .with_error(keys::SERVICE_OFFERING),
    );

    fields.push(FormField::new(STANDARDS, "Add Standard", FieldKind::Standard));
    for (index, standard) in record.standards_to_apply.iter().enumerate() {
        fields.push(FormField::new(
            STANDARDS,
            standard.clone(),
            FieldKind::StandardEntry(index),
        ));
    }

    fields.push(FormField::text(
        CERTIFICATION,
        "Date of Application",
        TextField::ApplicationDate,
    ));
    fields.push(FormField::text(
        CERTIFICATION,
        "Expiration Date of Current Stroke Certification",
        TextField::StrokeCertificationExpiration,
    ));
    for list in [DateList::Thrombolytic, DateList::Thrombectomy] {
        let dates = record.dates(list);
        fields.push(FormField::new(
            list.label(),
            format!("Add Date ({}/{})", dates.len(), list.cap()),
            FieldKind::Date(list),
        ));
        for (index, date) in dates.iter().enumerate() {
            fields.push(FormField::new(
                list.label(),
                date.clone(),
                FieldKind::DateEntry(list, index),
            ));
        }
    }
    fields
}
