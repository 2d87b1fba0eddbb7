//! The intake form record and its typed field paths

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Maximum number of thrombolytic administration dates on an application
pub const MAX_THROMBOLYTIC_DATES: usize = 25;
/// Maximum number of thrombectomy dates on an application
pub const MAX_THROMBECTOMY_DATES: usize = 15;

/// Primary contact; receives all official communications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryContact {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub work_phone: String,
    pub cell_phone: String,
    pub email: String,
    pub email_verified: bool,
}

/// A leadership or billing contact that may mirror the primary contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleContact {
    pub same_as_primary: bool,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Contact roles collected on the leadership step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Ceo,
    DirectorOfQuality,
    InvoicingContact,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Ceo, Role::DirectorOfQuality, Role::InvoicingContact];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ceo => "CEO",
            Self::DirectorOfQuality => "Director of Quality",
            Self::InvoicingContact => "Invoicing Contact",
        }
    }

    /// Whether the leadership step requires this contact's details
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::DirectorOfQuality)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl BillingAddress {
    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.zip_code.is_empty()
    }
}

/// Facility type catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacilityType {
    SameAsLegal,
    CriticalAccess,
    Childrens,
    Ltac,
    FreeStandingPsychiatric,
    Other,
}

impl FacilityType {
    pub const ALL: [FacilityType; 6] = [
        FacilityType::SameAsLegal,
        FacilityType::CriticalAccess,
        FacilityType::Childrens,
        FacilityType::Ltac,
        FacilityType::FreeStandingPsychiatric,
        FacilityType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::SameAsLegal => "Same as Legal Entity Name",
            Self::CriticalAccess => "Critical Access",
            Self::Childrens => "Children's",
            Self::Ltac => "Long-Term Acute Care (LTAC)",
            Self::FreeStandingPsychiatric => "Free-Standing Psychiatric",
            Self::Other => "Other",
        }
    }

    /// Next entry in the catalog, starting from the first when unset
    pub fn cycle(current: Option<Self>) -> Self {
        match current {
            None => Self::ALL[0],
            Some(current) => {
                let index = Self::ALL.iter().position(|t| *t == current).unwrap_or(0);
                Self::ALL[(index + 1) % Self::ALL.len()]
            }
        }
    }
}

/// Whether the organization operates from one or several locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteMode {
    Single,
    Multiple,
}

impl SiteMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single Location",
            Self::Multiple => "Multiple Locations",
        }
    }

    pub fn toggle(current: Option<Self>) -> Self {
        match current {
            Some(Self::Single) => Self::Multiple,
            Some(Self::Multiple) | None => Self::Single,
        }
    }
}

/// How multi-site information is provided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UploadMethod {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "csv")]
    Csv,
}

impl UploadMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Not specified",
            Self::Csv => "Upload CSV / Excel",
        }
    }
}

/// Site spreadsheet attached on the site information step.
///
/// Only metadata is kept; the file content is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    /// Local path of the selected file
    pub handle: PathBuf,
}

impl UploadedFile {
    pub fn size_label(&self) -> String {
        format!("{:.2}kb", self.size as f64 / 1024.0)
    }
}

/// Service catalog shared by the site-services and service-offering selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceKey {
    EmergencyDepartment,
    NeonatalIntensiveCare,
    PediatricIntensiveCare,
    CardiacCatheterizationLab,
    OpenHeart,
    MriImaging,
    DiagnosticRadioisotope,
    Lithotripsy,
    PhysicalRehabilitationServices,
    PhysicalTherapy,
    OccupationalTherapy,
    SpeechLanguageTherapy,
    Audiology,
}

impl ServiceKey {
    pub const ALL: [ServiceKey; 13] = [
        ServiceKey::EmergencyDepartment,
        ServiceKey::NeonatalIntensiveCare,
        ServiceKey::PediatricIntensiveCare,
        ServiceKey::CardiacCatheterizationLab,
        ServiceKey::OpenHeart,
        ServiceKey::MriImaging,
        ServiceKey::DiagnosticRadioisotope,
        ServiceKey::Lithotripsy,
        ServiceKey::PhysicalRehabilitationServices,
        ServiceKey::PhysicalTherapy,
        ServiceKey::OccupationalTherapy,
        ServiceKey::SpeechLanguageTherapy,
        ServiceKey::Audiology,
    ];

    /// Stable camelCase key, also used for the summary's humanized names
    pub fn key(&self) -> &'static str {
        match self {
            Self::EmergencyDepartment => "emergencyDepartment",
            Self::NeonatalIntensiveCare => "neonatalIntensiveCare",
            Self::PediatricIntensiveCare => "pediatricIntensiveCare",
            Self::CardiacCatheterizationLab => "cardiacCatheterizationLab",
            Self::OpenHeart => "openHeart",
            Self::MriImaging => "mriImaging",
            Self::DiagnosticRadioisotope => "diagnosticRadioisotope",
            Self::Lithotripsy => "lithotripsy",
            Self::PhysicalRehabilitationServices => "physicalRehabilitationServices",
            Self::PhysicalTherapy => "physicalTherapy",
            Self::OccupationalTherapy => "occupationalTherapy",
            Self::SpeechLanguageTherapy => "speechLanguageTherapy",
            Self::Audiology => "audiology",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EmergencyDepartment => "Emergency Department",
            Self::NeonatalIntensiveCare => "Neonatal Intensive Care Services",
            Self::PediatricIntensiveCare => "Pediatric Intensive Care Services",
            Self::CardiacCatheterizationLab => "Cardiac Catheterization Laboratory",
            Self::OpenHeart => "Open Heart",
            Self::MriImaging => "Magnetic Resonance Imaging (MRI)",
            Self::DiagnosticRadioisotope => "Diagnostic Radioisotope Facility",
            Self::Lithotripsy => "Lithotripsy",
            Self::PhysicalRehabilitationServices => "Physical Rehabilitation Services",
            Self::PhysicalTherapy => "Physical Therapy",
            Self::OccupationalTherapy => "Occupational Therapy",
            Self::SpeechLanguageTherapy => "Speech/Language Therapy",
            Self::Audiology => "Audiology",
        }
    }

    pub fn category(&self) -> ServiceCategory {
        match self {
            Self::EmergencyDepartment
            | Self::NeonatalIntensiveCare
            | Self::PediatricIntensiveCare => ServiceCategory::Emergency,
            Self::CardiacCatheterizationLab | Self::OpenHeart => ServiceCategory::Cardiac,
            Self::MriImaging | Self::DiagnosticRadioisotope | Self::Lithotripsy => {
                ServiceCategory::Diagnostic
            }
            Self::PhysicalRehabilitationServices
            | Self::PhysicalTherapy
            | Self::OccupationalTherapy
            | Self::SpeechLanguageTherapy
            | Self::Audiology => ServiceCategory::Rehabilitation,
        }
    }
}

/// Display grouping for services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCategory {
    Emergency,
    Cardiac,
    Diagnostic,
    Rehabilitation,
}

impl ServiceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Emergency => "Emergency & Critical Care",
            Self::Cardiac => "Cardiac Services",
            Self::Diagnostic => "Diagnostic Services",
            Self::Rehabilitation => "Rehabilitation Services",
        }
    }
}

/// Which selection a service toggle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceCatalog {
    /// Services provided at the site (every catalog key)
    Site,
    /// Services the application covers (acute-care subset)
    Offering,
}

impl ServiceCatalog {
    pub fn keys(&self) -> &'static [ServiceKey] {
        match self {
            Self::Site => &ServiceKey::ALL,
            Self::Offering => &ServiceKey::ALL[..8],
        }
    }
}

/// Fixed-key service → selected mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSelections {
    #[serde(skip)]
    catalog: ServiceCatalog,
    #[serde(flatten)]
    selected: BTreeMap<ServiceKey, bool>,
}

impl ServiceSelections {
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self {
            catalog,
            selected: catalog.keys().iter().map(|key| (*key, false)).collect(),
        }
    }

    /// Set a service; keys outside this catalog are ignored
    pub fn set(&mut self, key: ServiceKey, value: bool) -> bool {
        match self.selected.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn is_selected(&self, key: ServiceKey) -> bool {
        self.selected.get(&key).copied().unwrap_or(false)
    }

    pub fn any_selected(&self) -> bool {
        self.selected.values().any(|v| *v)
    }

    /// Selected keys in catalog order
    pub fn selected(&self) -> Vec<ServiceKey> {
        self.catalog
            .keys()
            .iter()
            .copied()
            .filter(|key| self.is_selected(*key))
            .collect()
    }
}

/// Ordered certification date lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateList {
    Thrombolytic,
    Thrombectomy,
}

impl DateList {
    pub fn cap(&self) -> usize {
        match self {
            Self::Thrombolytic => MAX_THROMBOLYTIC_DATES,
            Self::Thrombectomy => MAX_THROMBECTOMY_DATES,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Thrombolytic => "Thrombolytic Dates",
            Self::Thrombectomy => "Thrombectomy Dates",
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            Self::Thrombolytic => "thrombolytic",
            Self::Thrombectomy => "thrombectomy",
        }
    }
}

/// Every value the intake wizard collects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    // Quote request
    pub legal_entity_name: String,
    pub dba_name: String,
    pub same_as_legal_entity: bool,
    pub primary_contact: PrimaryContact,

    // Facility details
    pub facility_type: Option<FacilityType>,

    // Leadership contacts
    pub ceo: RoleContact,
    pub director_of_quality: RoleContact,
    pub invoicing_contact: RoleContact,
    pub billing_address: BillingAddress,

    // Site information
    pub has_multiple_sites: Option<SiteMode>,
    pub upload_method: UploadMethod,
    pub uploaded_files: Vec<UploadedFile>,

    // Services
    pub site_services: ServiceSelections,
    pub other_service: String,
    pub service_offering: ServiceSelections,
    pub other_service_offering: String,

    // Certifications
    pub standards_to_apply: Vec<String>,
    pub stroke_certification_expiration: String,
    pub application_date: String,
    pub thrombolytic_dates: Vec<String>,
    pub thrombectomy_dates: Vec<String>,
}

impl Default for FormRecord {
    fn default() -> Self {
        Self {
            legal_entity_name: String::new(),
            dba_name: String::new(),
            same_as_legal_entity: false,
            primary_contact: PrimaryContact::default(),
            facility_type: None,
            ceo: RoleContact::default(),
            director_of_quality: RoleContact::default(),
            invoicing_contact: RoleContact::default(),
            billing_address: BillingAddress::default(),
            has_multiple_sites: None,
            upload_method: UploadMethod::None,
            uploaded_files: Vec::new(),
            site_services: ServiceSelections::new(ServiceCatalog::Site),
            other_service: String::new(),
            service_offering: ServiceSelections::new(ServiceCatalog::Offering),
            other_service_offering: String::new(),
            standards_to_apply: Vec::new(),
            stroke_certification_expiration: String::new(),
            application_date: String::new(),
            thrombolytic_dates: Vec::new(),
            thrombectomy_dates: Vec::new(),
        }
    }
}

/// Primary contact text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryField {
    FirstName,
    LastName,
    Title,
    WorkPhone,
    CellPhone,
    Email,
}

/// Role contact text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    Phone,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Street,
    City,
    State,
    ZipCode,
}

/// Path to a text value in the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    LegalEntityName,
    DbaName,
    Primary(PrimaryField),
    Contact(Role, ContactField),
    Billing(AddressField),
    OtherService,
    OtherServiceOffering,
    StrokeCertificationExpiration,
    ApplicationDate,
}

/// Path to a boolean value in the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagField {
    SameAsLegalEntity,
    EmailVerified,
    SameAsPrimary(Role),
    Service(ServiceCatalog, ServiceKey),
}

/// A single typed replacement of one record value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Text(TextField, String),
    Flag(FlagField, bool),
    FacilityType(Option<FacilityType>),
    SiteMode(Option<SiteMode>),
    UploadMethod(UploadMethod),
    UploadedFiles(Vec<UploadedFile>),
    Standards(Vec<String>),
    Dates(DateList, Vec<String>),
}

impl FormRecord {
    pub fn role(&self, role: Role) -> &RoleContact {
        match role {
            Role::Ceo => &self.ceo,
            Role::DirectorOfQuality => &self.director_of_quality,
            Role::InvoicingContact => &self.invoicing_contact,
        }
    }

    pub fn role_mut(&mut self, role: Role) -> &mut RoleContact {
        match role {
            Role::Ceo => &mut self.ceo,
            Role::DirectorOfQuality => &mut self.director_of_quality,
            Role::InvoicingContact => &mut self.invoicing_contact,
        }
    }

    pub fn services(&self, catalog: ServiceCatalog) -> &ServiceSelections {
        match catalog {
            ServiceCatalog::Site => &self.site_services,
            ServiceCatalog::Offering => &self.service_offering,
        }
    }

    pub fn services_mut(&mut self, catalog: ServiceCatalog) -> &mut ServiceSelections {
        match catalog {
            ServiceCatalog::Site => &mut self.site_services,
            ServiceCatalog::Offering => &mut self.service_offering,
        }
    }

    pub fn dates(&self, list: DateList) -> &Vec<String> {
        match list {
            DateList::Thrombolytic => &self.thrombolytic_dates,
            DateList::Thrombectomy => &self.thrombectomy_dates,
        }
    }

    pub fn dates_mut(&mut self, list: DateList) -> &mut Vec<String> {
        match list {
            DateList::Thrombolytic => &mut self.thrombolytic_dates,
            DateList::Thrombectomy => &mut self.thrombectomy_dates,
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::LegalEntityName => &self.legal_entity_name,
            TextField::DbaName => &self.dba_name,
            TextField::Primary(f) => {
                let p = &self.primary_contact;
                match f {
                    PrimaryField::FirstName => &p.first_name,
                    PrimaryField::LastName => &p.last_name,
                    PrimaryField::Title => &p.title,
                    PrimaryField::WorkPhone => &p.work_phone,
                    PrimaryField::CellPhone => &p.cell_phone,
                    PrimaryField::Email => &p.email,
                }
            }
            TextField::Contact(role, f) => {
                let c = self.role(role);
                match f {
                    ContactField::FirstName => &c.first_name,
                    ContactField::LastName => &c.last_name,
                    ContactField::Phone => &c.phone,
                    ContactField::Email => &c.email,
                }
            }
            TextField::Billing(f) => {
                let a = &self.billing_address;
                match f {
                    AddressField::Street => &a.street,
                    AddressField::City => &a.city,
                    AddressField::State => &a.state,
                    AddressField::ZipCode => &a.zip_code,
                }
            }
            TextField::OtherService => &self.other_service,
            TextField::OtherServiceOffering => &self.other_service_offering,
            TextField::StrokeCertificationExpiration => &self.stroke_certification_expiration,
            TextField::ApplicationDate => &self.application_date,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::LegalEntityName => &mut self.legal_entity_name,
            TextField::DbaName => &mut self.dba_name,
            TextField::Primary(f) => {
                let p = &mut self.primary_contact;
                match f {
                    PrimaryField::FirstName => &mut p.first_name,
                    PrimaryField::LastName => &mut p.last_name,
                    PrimaryField::Title => &mut p.title,
                    PrimaryField::WorkPhone => &mut p.work_phone,
                    PrimaryField::CellPhone => &mut p.cell_phone,
                    PrimaryField::Email => &mut p.email,
                }
            }
            TextField::Contact(role, f) => {
                let c = self.role_mut(role);
                match f {
                    ContactField::FirstName => &mut c.first_name,
                    ContactField::LastName => &mut c.last_name,
                    ContactField::Phone => &mut c.phone,
                    ContactField::Email => &mut c.email,
                }
            }
            TextField::Billing(f) => {
                let a = &mut self.billing_address;
                match f {
                    AddressField::Street => &mut a.street,
                    AddressField::City => &mut a.city,
                    AddressField::State => &mut a.state,
                    AddressField::ZipCode => &mut a.zip_code,
                }
            }
            TextField::OtherService => &mut self.other_service,
            TextField::OtherServiceOffering => &mut self.other_service_offering,
            TextField::StrokeCertificationExpiration => &mut self.stroke_certification_expiration,
            TextField::ApplicationDate => &mut self.application_date,
        }
    }

    pub fn flag(&self, field: FlagField) -> bool {
        match field {
            FlagField::SameAsLegalEntity => self.same_as_legal_entity,
            FlagField::EmailVerified => self.primary_contact.email_verified,
            FlagField::SameAsPrimary(role) => self.role(role).same_as_primary,
            FlagField::Service(catalog, key) => self.services(catalog).is_selected(key),
        }
    }

    /// Text mirrored from another field and not editable on its own.
    /// The d/b/a name follows the legal name while "same as legal entity" is on.
    pub fn is_read_only(&self, field: TextField) -> bool {
        field == TextField::DbaName && self.same_as_legal_entity
    }

    /// Apply one update in place
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Text(field, value) => *self.text_mut(field) = value,
            FieldUpdate::Flag(field, value) => match field {
                FlagField::SameAsLegalEntity => self.same_as_legal_entity = value,
                FlagField::EmailVerified => self.primary_contact.email_verified = value,
                FlagField::SameAsPrimary(role) => self.role_mut(role).same_as_primary = value,
                FlagField::Service(catalog, key) => {
                    if !self.services_mut(catalog).set(key, value) {
                        tracing::warn!("Service {} is not in the {catalog:?} catalog", key.key());
                    }
                }
            },
            FieldUpdate::FacilityType(value) => self.facility_type = value,
            FieldUpdate::SiteMode(value) => self.has_multiple_sites = value,
            FieldUpdate::UploadMethod(value) => self.upload_method = value,
            FieldUpdate::UploadedFiles(files) => self.uploaded_files = files,
            FieldUpdate::Standards(standards) => self.standards_to_apply = standards,
            FieldUpdate::Dates(list, dates) => *self.dates_mut(list) = dates,
        }
    }
}
