//! Per-step field validation
//!
//! Each step inspects only its own slice of the record and reports
//! field key → message. An empty result means the step may be left.

use super::record::{ContactField, FormRecord, Role, ServiceCatalog, SiteMode, UploadMethod};
use super::wizard::WizardStep;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}$").expect("phone pattern compiles")
});

/// Error keys shown next to fields
pub mod keys {
    pub const LEGAL_ENTITY_NAME: &str = "legalEntityName";
    pub const DBA_NAME: &str = "dbaName";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const TITLE: &str = "title";
    pub const WORK_PHONE: &str = "workPhone";
    pub const EMAIL: &str = "email";
    pub const FACILITY_TYPE: &str = "facilityType";
    pub const STREET: &str = "street";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const ZIP_CODE: &str = "zipCode";
    pub const LOCATION_TYPE: &str = "locationType";
    pub const FILE_UPLOAD: &str = "fileUpload";
    pub const SERVICES: &str = "services";
    pub const SERVICE_OFFERING: &str = "serviceOffering";
}

/// Error key for a role contact field
pub fn contact_key(role: Role, field: ContactField) -> &'static str {
    match (role, field) {
        (Role::Ceo, ContactField::FirstName) => "ceoFirstName",
        (Role::Ceo, ContactField::LastName) => "ceoLastName",
        (Role::Ceo, ContactField::Phone) => "ceoPhone",
        (Role::Ceo, ContactField::Email) => "ceoEmail",
        (Role::DirectorOfQuality, ContactField::FirstName) => "doqFirstName",
        (Role::DirectorOfQuality, ContactField::LastName) => "doqLastName",
        (Role::DirectorOfQuality, ContactField::Phone) => "doqPhone",
        (Role::DirectorOfQuality, ContactField::Email) => "doqEmail",
        (Role::InvoicingContact, ContactField::FirstName) => "invoicingFirstName",
        (Role::InvoicingContact, ContactField::LastName) => "invoicingLastName",
        (Role::InvoicingContact, ContactField::Phone) => "invoicingPhone",
        (Role::InvoicingContact, ContactField::Email) => "invoicingEmail",
    }
}

/// Field key → message mapping returned by a validator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

fn require(errors: &mut ValidationErrors, value: &str, key: &'static str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(key, message);
        false
    } else {
        true
    }
}

/// Run the validator for `step`
pub fn validate(step: WizardStep, record: &FormRecord) -> ValidationErrors {
    match step.number() {
        1 => validate_quote_request(record),
        2 => validate_facility(record),
        3 => validate_leadership(record),
        4 => validate_sites(record),
        5 => validate_services(record, ServiceCatalog::Site),
        6 => validate_services(record, ServiceCatalog::Offering),
        _ => ValidationErrors::new(),
    }
}

fn validate_quote_request(record: &FormRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let contact = &record.primary_contact;

    require(
        &mut errors,
        &record.legal_entity_name,
        keys::LEGAL_ENTITY_NAME,
        "Legal Entity Name is required",
    );
    require(&mut errors, &record.dba_name, keys::DBA_NAME, "DBA Name is required");
    require(
        &mut errors,
        &contact.first_name,
        keys::FIRST_NAME,
        "First Name is required",
    );
    require(
        &mut errors,
        &contact.last_name,
        keys::LAST_NAME,
        "Last Name is required",
    );
    require(&mut errors, &contact.title, keys::TITLE, "Title is required");

    if require(
        &mut errors,
        &contact.work_phone,
        keys::WORK_PHONE,
        "Work Phone is required",
    ) && !is_valid_phone(&contact.work_phone)
    {
        errors.insert(keys::WORK_PHONE, "Please enter a valid phone number");
    }

    if require(&mut errors, &contact.email, keys::EMAIL, "Email is required")
        && !is_valid_email(&contact.email)
    {
        errors.insert(keys::EMAIL, "Please enter a valid email address");
    }

    errors
}

fn validate_facility(record: &FormRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if record.facility_type.is_none() {
        errors.insert(keys::FACILITY_TYPE, "Please select a facility type");
    }
    errors
}

fn validate_leadership(record: &FormRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for role in Role::ALL.into_iter().filter(Role::is_required) {
        let contact = record.role(role);
        if contact.same_as_primary {
            continue;
        }
        let label = role.label();
        require(
            &mut errors,
            &contact.first_name,
            contact_key(role, ContactField::FirstName),
            &format!("{label} First Name is required"),
        );
        require(
            &mut errors,
            &contact.last_name,
            contact_key(role, ContactField::LastName),
            &format!("{label} Last Name is required"),
        );
        require(
            &mut errors,
            &contact.phone,
            contact_key(role, ContactField::Phone),
            &format!("{label} Phone is required"),
        );
        let email_key = contact_key(role, ContactField::Email);
        if require(
            &mut errors,
            &contact.email,
            email_key,
            &format!("{label} Email is required"),
        ) && !is_valid_email(&contact.email)
        {
            errors.insert(email_key, "Please enter a valid email address");
        }
    }

    let address = &record.billing_address;
    require(
        &mut errors,
        &address.street,
        keys::STREET,
        "Street Address is required",
    );
    require(&mut errors, &address.city, keys::CITY, "City is required");
    require(&mut errors, &address.state, keys::STATE, "State is required");
    require(
        &mut errors,
        &address.zip_code,
        keys::ZIP_CODE,
        "ZIP Code is required",
    );

    errors
}

fn validate_sites(record: &FormRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if record.has_multiple_sites.is_none() {
        errors.insert(keys::LOCATION_TYPE, "Please select a location option");
    }

    if record.has_multiple_sites == Some(SiteMode::Multiple)
        && record.upload_method == UploadMethod::Csv
        && record.uploaded_files.is_empty()
    {
        errors.insert(keys::FILE_UPLOAD, "Please upload at least one file");
    }

    errors
}

fn validate_services(record: &FormRecord, catalog: ServiceCatalog) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let (other, key) = match catalog {
        ServiceCatalog::Site => (&record.other_service, keys::SERVICES),
        ServiceCatalog::Offering => (&record.other_service_offering, keys::SERVICE_OFFERING),
    };

    if !record.services(catalog).any_selected() && other.trim().is_empty() {
        errors.insert(key, "Please select at least one service");
    }

    errors
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::record::{FacilityType, ServiceKey, UploadedFile};
    use std::path::PathBuf;

    /// A record that passes every data-entry step
    pub(crate) fn complete_record() -> FormRecord {
        let mut record = FormRecord::default();
        record.legal_entity_name = "Riverside Health Corporation".into();
        record.dba_name = "Riverside Hospital".into();
        record.primary_contact.first_name = "Ada".into();
        record.primary_contact.last_name = "Okafor".into();
        record.primary_contact.title = "Quality Manager".into();
        record.primary_contact.work_phone = "(555) 123-4567".into();
        record.primary_contact.email = "ada@riverside.org".into();
        record.facility_type = Some(FacilityType::CriticalAccess);
        record.ceo.same_as_primary = true;
        record.invoicing_contact.first_name = "Lee".into();
        record.invoicing_contact.last_name = "Marsh".into();
        record.invoicing_contact.phone = "555-987-6543".into();
        record.invoicing_contact.email = "billing@riverside.org".into();
        record.billing_address.street = "1 River Rd".into();
        record.billing_address.city = "Springfield".into();
        record.billing_address.state = "IL".into();
        record.billing_address.zip_code = "62701".into();
        record.has_multiple_sites = Some(SiteMode::Single);
        record.site_services.set(ServiceKey::EmergencyDepartment, true);
        record.service_offering.set(ServiceKey::OpenHeart, true);
        record
    }

    fn step(n: u8) -> WizardStep {
        WizardStep::new(n)
    }

    mod patterns {
        use super::*;

        #[test]
        fn test_email_examples() {
            assert!(is_valid_email("a@b.com"));
            assert!(!is_valid_email("a@b"));
            assert!(!is_valid_email("a.com"));
            assert!(!is_valid_email("a b@c.com"));
        }

        #[test]
        fn test_phone_examples() {
            assert!(is_valid_phone("(555) 123-4567"));
            assert!(is_valid_phone("5551234567"));
            assert!(is_valid_phone("555.123.4567"));
            assert!(!is_valid_phone("555-123"));
            assert!(!is_valid_phone("555-123-45678"));
        }
    }

    mod quote_request {
        use super::*;

        #[test]
        fn test_empty_record_reports_every_field() {
            let errors = validate(step(1), &FormRecord::default());
            for key in [
                keys::LEGAL_ENTITY_NAME,
                keys::DBA_NAME,
                keys::FIRST_NAME,
                keys::LAST_NAME,
                keys::TITLE,
                keys::WORK_PHONE,
                keys::EMAIL,
            ] {
                assert!(errors.contains_key(key), "missing {key}");
            }
            assert_eq!(errors.len(), 7);
        }

        #[test]
        fn test_whitespace_only_is_missing() {
            let mut record = complete_record();
            record.legal_entity_name = "   ".into();
            let errors = validate(step(1), &record);
            assert_eq!(
                errors.get(keys::LEGAL_ENTITY_NAME),
                Some("Legal Entity Name is required")
            );
        }

        #[test]
        fn test_malformed_phone_and_email() {
            let mut record = complete_record();
            record.primary_contact.work_phone = "555-123".into();
            record.primary_contact.email = "ada@riverside".into();
            let errors = validate(step(1), &record);
            assert_eq!(
                errors.get(keys::WORK_PHONE),
                Some("Please enter a valid phone number")
            );
            assert_eq!(
                errors.get(keys::EMAIL),
                Some("Please enter a valid email address")
            );
        }

        #[test]
        fn test_cell_phone_is_optional() {
            let record = complete_record();
            assert!(record.primary_contact.cell_phone.is_empty());
            assert!(validate(step(1), &record).is_empty());
        }
    }

    mod facility {
        use super::*;

        #[test]
        fn test_requires_selection() {
            let errors = validate(step(2), &FormRecord::default());
            assert!(errors.contains_key(keys::FACILITY_TYPE));
            assert!(validate(step(2), &complete_record()).is_empty());
        }
    }

    mod leadership {
        use super::*;

        #[test]
        fn test_director_of_quality_is_exempt() {
            let mut record = complete_record();
            record.director_of_quality = Default::default();
            assert!(validate(step(3), &record).is_empty());
        }

        #[test]
        fn test_same_as_primary_skips_contact_fields() {
            let mut record = complete_record();
            record.ceo = Default::default();
            record.ceo.same_as_primary = true;
            assert!(validate(step(3), &record).is_empty());

            record.ceo.same_as_primary = false;
            let errors = validate(step(3), &record);
            assert_eq!(errors.get("ceoFirstName"), Some("CEO First Name is required"));
            assert!(errors.contains_key("ceoLastName"));
            assert!(errors.contains_key("ceoPhone"));
            assert!(errors.contains_key("ceoEmail"));
        }

        #[test]
        fn test_role_email_format() {
            let mut record = complete_record();
            record.invoicing_contact.email = "billing".into();
            let errors = validate(step(3), &record);
            assert_eq!(
                errors.get("invoicingEmail"),
                Some("Please enter a valid email address")
            );
        }

        #[test]
        fn test_billing_address_always_required() {
            let mut record = complete_record();
            record.invoicing_contact.same_as_primary = true;
            record.billing_address = Default::default();
            let errors = validate(step(3), &record);
            for key in [keys::STREET, keys::CITY, keys::STATE, keys::ZIP_CODE] {
                assert!(errors.contains_key(key), "missing {key}");
            }
        }
    }

    mod sites {
        use super::*;

        #[test]
        fn test_location_type_required() {
            let errors = validate(step(4), &FormRecord::default());
            assert!(errors.contains_key(keys::LOCATION_TYPE));
        }

        #[test]
        fn test_csv_upload_needs_a_file() {
            let mut record = complete_record();
            record.has_multiple_sites = Some(SiteMode::Multiple);
            record.upload_method = UploadMethod::Csv;
            assert!(validate(step(4), &record).contains_key(keys::FILE_UPLOAD));

            record.uploaded_files.push(UploadedFile {
                name: "sites.csv".into(),
                size: 10,
                handle: PathBuf::from("sites.csv"),
            });
            assert!(validate(step(4), &record).is_empty());
        }

        #[test]
        fn test_multiple_without_upload_method_passes() {
            let mut record = complete_record();
            record.has_multiple_sites = Some(SiteMode::Multiple);
            assert!(validate(step(4), &record).is_empty());
        }
    }

    mod services {
        use super::*;

        #[test]
        fn test_other_service_satisfies_rule() {
            let mut record = FormRecord::default();
            assert!(validate(step(5), &record).contains_key(keys::SERVICES));
            record.other_service = "Sleep lab".into();
            assert!(validate(step(5), &record).is_empty());
        }

        #[test]
        fn test_catalogs_are_independent() {
            let mut record = FormRecord::default();
            record.site_services.set(ServiceKey::Lithotripsy, true);
            assert!(validate(step(5), &record).is_empty());
            assert!(validate(step(6), &record).contains_key(keys::SERVICE_OFFERING));
            record.other_service_offering = "  ".into();
            assert!(validate(step(6), &record).contains_key(keys::SERVICE_OFFERING));
        }
    }

    #[test]
    fn test_review_step_is_always_valid() {
        assert!(validate(WizardStep::REVIEW, &FormRecord::default()).is_empty());
    }

    #[test]
    fn test_validation_is_step_scoped() {
        let mut record = complete_record();
        record.billing_address = Default::default();
        assert!(!validate(step(3), &record).is_empty());
        assert!(validate(step(1), &record).is_empty());
    }
}
