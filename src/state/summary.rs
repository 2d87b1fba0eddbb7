//! Summary projection
//!
//! Flattens a [`FormRecord`] into ordered `(section, field, value)` rows.
//! The review screen, the text export and the CSV export all render the
//! same rows so they can never disagree.

use super::record::{FormRecord, Role, ServiceCatalog, SiteMode};
use super::wizard::WizardStep;
use serde::Serialize;

/// Shown for empty text values
pub const EMPTY_TEXT: &str = "-";
/// Shown for empty lists
pub const EMPTY_LIST: &str = "None";
/// Shown for choices that were never made
pub const UNSET_CHOICE: &str = "Not specified";

const LIST_SEPARATOR: &str = ", ";
const CSV_HEADER: [&str; 3] = ["Section", "Field", "Value"];

/// Collapsible groups on the review step, one per data-entry step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewSection {
    BasicInformation,
    FacilityDetail,
    LeadershipContacts,
    SiteInformation,
    SiteServices,
    ServicesCertifications,
}

impl ReviewSection {
    pub const ALL: [ReviewSection; 6] = [
        ReviewSection::BasicInformation,
        ReviewSection::FacilityDetail,
        ReviewSection::LeadershipContacts,
        ReviewSection::SiteInformation,
        ReviewSection::SiteServices,
        ReviewSection::ServicesCertifications,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInformation => "Basic Information",
            Self::FacilityDetail => "Facility Detail",
            Self::LeadershipContacts => "Leadership Contacts",
            Self::SiteInformation => "Site Information",
            Self::SiteServices => "Site Services",
            Self::ServicesCertifications => "Services & Certifications",
        }
    }

    /// Step opened by the section's Edit action
    pub fn edit_step(&self) -> WizardStep {
        let index = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        WizardStep::new(index as u8 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub section: &'static str,
    pub field: String,
    pub value: String,
}

impl SummaryRow {
    fn new(section: ReviewSection, field: impl Into<String>, value: String) -> Self {
        Self {
            section: section.title(),
            field: field.into(),
            value,
        }
    }
}

/// Every row of the summary, in display order
pub fn project(record: &FormRecord) -> Vec<SummaryRow> {
    ReviewSection::ALL
        .iter()
        .flat_map(|section| project_section(record, *section))
        .collect()
}

/// Rows for a single review section
pub fn project_section(record: &FormRecord, section: ReviewSection) -> Vec<SummaryRow> {
    let row = |field: &str, value: String| SummaryRow::new(section, field, value);
    match section {
        ReviewSection::BasicInformation => {
            let primary = &record.primary_contact;
            vec![
                row("Legal Entity Name", text(&record.legal_entity_name)),
                row("d/b/a Name", text(&record.dba_name)),
                row(
                    "Same as Legal Entity Name",
                    yes_no(record.same_as_legal_entity),
                ),
                row(
                    "Primary Contact Name",
                    full_name(&primary.first_name, &primary.last_name),
                ),
                row("Primary Contact Title", text(&primary.title)),
                row("Primary Contact Work Phone", text(&primary.work_phone)),
                row("Primary Contact Cell Phone", text(&primary.cell_phone)),
                row("Primary Contact Email", text(&primary.email)),
                row(
                    "Email Verification",
                    if primary.email_verified {
                        "Verified".to_string()
                    } else {
                        "Not Verified".to_string()
                    },
                ),
            ]
        }
        ReviewSection::FacilityDetail => vec![row(
            "Facility Type",
            record
                .facility_type
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| UNSET_CHOICE.to_string()),
        )],
        ReviewSection::LeadershipContacts => {
            let mut rows = Vec::with_capacity(Role::ALL.len() * 4 + 1);
            for role in Role::ALL {
                let contact = record.role(role);
                rows.push(row(
                    &format!("{} Same as Primary", role.label()),
                    yes_no(contact.same_as_primary),
                ));
                rows.push(row(
                    &format!("{} Name", role.label()),
                    full_name(&contact.first_name, &contact.last_name),
                ));
                rows.push(row(&format!("{} Phone", role.label()), text(&contact.phone)));
                rows.push(row(&format!("{} Email", role.label()), text(&contact.email)));
            }
            rows.push(row("Billing Address", billing_address(record)));
            rows
        }
        ReviewSection::SiteInformation => vec![
            row(
                "Site Configuration",
                match record.has_multiple_sites {
                    None => UNSET_CHOICE.to_string(),
                    Some(SiteMode::Single) => SiteMode::Single.label().to_string(),
                    Some(SiteMode::Multiple) => format!(
                        "{} ({} files)",
                        SiteMode::Multiple.label(),
                        record.uploaded_files.len()
                    ),
                },
            ),
            row("Input Method", record.upload_method.label().to_string()),
            row(
                "Uploaded Files",
                list(
                    record
                        .uploaded_files
                        .iter()
                        .map(|f| format!("{} ({})", f.name, f.size_label())),
                ),
            ),
        ],
        ReviewSection::SiteServices => vec![
            row("Services Provided", services(record, ServiceCatalog::Site)),
            row("Other Service", text(&record.other_service)),
        ],
        ReviewSection::ServicesCertifications => vec![
            row("Service Offering", services(record, ServiceCatalog::Offering)),
            row("Other Service Offering", text(&record.other_service_offering)),
            row(
                "Standards to Apply",
                list(record.standards_to_apply.iter().cloned()),
            ),
            row("Date of Application", text(&record.application_date)),
            row(
                "Expiration Date of Current Stroke Certification",
                text(&record.stroke_certification_expiration),
            ),
            row(
                "Thrombolytic Dates",
                list(record.thrombolytic_dates.iter().cloned()),
            ),
            row(
                "Thrombectomy Dates",
                list(record.thrombectomy_dates.iter().cloned()),
            ),
        ],
    }
}

/// Space before every capital, then trim: `mriImaging` -> `mri Imaging`
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out.trim().to_string()
}

fn yes_no(value: bool) -> String {
    let label = if value { "Yes" } else { "No" };
    label.to_string()
}

fn text(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        EMPTY_TEXT.to_string()
    } else {
        value.to_string()
    }
}

fn full_name(first: &str, last: &str) -> String {
    text(&format!("{} {}", first.trim(), last.trim()))
}

fn list(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        EMPTY_LIST.to_string()
    } else {
        items.join(LIST_SEPARATOR)
    }
}

fn services(record: &FormRecord, catalog: ServiceCatalog) -> String {
    list(
        record
            .services(catalog)
            .selected()
            .into_iter()
            .map(|key| humanize_key(key.key())),
    )
}

fn billing_address(record: &FormRecord) -> String {
    let address = &record.billing_address;
    if address.is_empty() {
        return EMPTY_TEXT.to_string();
    }
    format!(
        "{}, {}, {} {}",
        address.street.trim(),
        address.city.trim(),
        address.state.trim(),
        address.zip_code.trim()
    )
}

/// Plain-text export grouped by section
pub fn render_text(rows: &[SummaryRow]) -> String {
    let title = "APPLICATION FORM SUMMARY";
    let mut out = format!("{title}\n{}\n", "=".repeat(title.len()));
    let mut current: Option<&str> = None;
    for row in rows {
        if current != Some(row.section) {
            let heading = row.section.to_uppercase();
            out.push_str(&format!("\n{heading}\n{}\n", "-".repeat(heading.len())));
            current = Some(row.section);
        }
        out.push_str(&format!("{}: {}\n", row.field, row.value));
    }
    out
}

/// CSV export: header row, then one quoted row per summary row
pub fn render_csv(rows: &[SummaryRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(&CSV_HEADER));
    for row in rows {
        lines.push(csv_line(&[row.section, &row.field, &row.value]));
    }
    lines.join("\n")
}

fn csv_line(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::record::{FacilityType, ServiceKey, UploadMethod, UploadedFile};
    use crate::state::validation::tests::complete_record;
    use std::path::PathBuf;

    /// Parse CSV produced by [`render_csv`]: every cell quoted, quotes doubled
    pub(crate) fn parse_csv(input: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        for line in input.lines() {
            let mut cells = Vec::new();
            let mut cell = String::new();
            let mut in_quotes = false;
            let mut chars = line.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '"' if in_quotes && chars.peek() == Some(&'"') => {
                        cell.push('"');
                        chars.next();
                    }
                    '"' => in_quotes = !in_quotes,
                    ',' if !in_quotes => cells.push(std::mem::take(&mut cell)),
                    _ => cell.push(c),
                }
            }
            cells.push(cell);
            rows.push(cells);
        }
        rows
    }

    fn value<'a>(rows: &'a [SummaryRow], field: &str) -> &'a str {
        rows.iter()
            .find(|r| r.field == field)
            .map(|r| r.value.as_str())
            .unwrap_or_else(|| panic!("no row for {field}"))
    }

    mod placeholders {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_record_uses_placeholders() {
            let rows = project(&FormRecord::default());
            assert_eq!(value(&rows, "Legal Entity Name"), EMPTY_TEXT);
            assert_eq!(value(&rows, "Primary Contact Name"), EMPTY_TEXT);
            assert_eq!(value(&rows, "Facility Type"), UNSET_CHOICE);
            assert_eq!(value(&rows, "Site Configuration"), UNSET_CHOICE);
            assert_eq!(value(&rows, "Input Method"), UNSET_CHOICE);
            assert_eq!(value(&rows, "Services Provided"), EMPTY_LIST);
            assert_eq!(value(&rows, "Standards to Apply"), EMPTY_LIST);
            assert_eq!(value(&rows, "Thrombectomy Dates"), EMPTY_LIST);
            assert_eq!(value(&rows, "Billing Address"), EMPTY_TEXT);
            assert_eq!(value(&rows, "Email Verification"), "Not Verified");
        }

        #[test]
        fn test_projection_is_total() {
            let rows = project(&FormRecord::default());
            assert!(rows.iter().all(|r| !r.value.is_empty()));
            for section in ReviewSection::ALL {
                assert!(rows.iter().any(|r| r.section == section.title()));
            }

            let mut expected = vec![
                "Legal Entity Name",
                "d/b/a Name",
                "Same as Legal Entity Name",
                "Primary Contact Name",
                "Primary Contact Title",
                "Primary Contact Work Phone",
                "Primary Contact Cell Phone",
                "Primary Contact Email",
                "Email Verification",
                "Facility Type",
            ]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
            for role in Role::ALL {
                for suffix in ["Same as Primary", "Name", "Phone", "Email"] {
                    expected.push(format!("{} {suffix}", role.label()));
                }
            }
            expected.extend(
                [
                    "Billing Address",
                    "Site Configuration",
                    "Input Method",
                    "Uploaded Files",
                    "Services Provided",
                    "Other Service",
                    "Service Offering",
                    "Other Service Offering",
                    "Standards to Apply",
                    "Date of Application",
                    "Expiration Date of Current Stroke Certification",
                    "Thrombolytic Dates",
                    "Thrombectomy Dates",
                ]
                .map(String::from),
            );
            let fields: Vec<String> = rows.into_iter().map(|r| r.field).collect();
            assert_eq!(fields, expected);
        }

        #[test]
        fn test_default_flags_read_no() {
            let rows = project(&FormRecord::default());
            assert_eq!(value(&rows, "Same as Legal Entity Name"), "No");
            for role in Role::ALL {
                assert_eq!(value(&rows, &format!("{} Same as Primary", role.label())), "No");
            }
        }
    }

    mod values {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_complete_record_values() {
            let mut record = complete_record();
            record.facility_type = Some(FacilityType::Ltac);
            record.primary_contact.email_verified = true;
            record.standards_to_apply = vec!["NIAHO".into(), "ISO 9001".into()];
            let rows = project(&record);

            assert_eq!(value(&rows, "Facility Type"), "Long-Term Acute Care (LTAC)");
            assert_eq!(value(&rows, "Email Verification"), "Verified");
            assert_eq!(value(&rows, "Standards to Apply"), "NIAHO, ISO 9001");
            assert_eq!(
                value(&rows, "Billing Address"),
                "1 River Rd, Springfield, IL 62701"
            );
            assert_eq!(value(&rows, "Services Provided"), "emergency Department");
            assert_eq!(value(&rows, "Service Offering"), "open Heart");
        }

        #[test]
        fn test_mirroring_flags_and_file_sizes_are_shown() {
            let mut record = complete_record();
            record.same_as_legal_entity = true;
            record.has_multiple_sites = Some(SiteMode::Multiple);
            record.uploaded_files = vec![
                UploadedFile {
                    name: "sites.csv".into(),
                    size: 2048,
                    handle: PathBuf::from("sites.csv"),
                },
                UploadedFile {
                    name: "annex.xlsx".into(),
                    size: 1536,
                    handle: PathBuf::from("annex.xlsx"),
                },
            ];
            let rows = project(&record);

            assert_eq!(value(&rows, "Same as Legal Entity Name"), "Yes");
            assert_eq!(value(&rows, "CEO Same as Primary"), "Yes");
            assert_eq!(value(&rows, "Director of Quality Same as Primary"), "No");
            assert_eq!(value(&rows, "Invoicing Contact Same as Primary"), "No");
            assert_eq!(
                value(&rows, "Uploaded Files"),
                "sites.csv (2.00kb), annex.xlsx (1.50kb)"
            );
        }

        #[test]
        fn test_multiple_sites_counts_files() {
            let mut record = FormRecord::default();
            record.has_multiple_sites = Some(SiteMode::Multiple);
            record.upload_method = UploadMethod::Csv;
            record.uploaded_files.push(UploadedFile {
                name: "sites.csv".into(),
                size: 10,
                handle: PathBuf::from("sites.csv"),
            });
            let rows = project(&record);
            assert_eq!(
                value(&rows, "Site Configuration"),
                "Multiple Locations (1 files)"
            );
            assert_eq!(value(&rows, "Uploaded Files"), "sites.csv (0.01kb)");
        }

        #[test]
        fn test_humanize_key() {
            assert_eq!(humanize_key("mriImaging"), "mri Imaging");
            assert_eq!(humanize_key("lithotripsy"), "lithotripsy");
            assert_eq!(
                humanize_key(ServiceKey::PhysicalRehabilitationServices.key()),
                "physical Rehabilitation Services"
            );
        }

        #[test]
        fn test_edit_step_per_section() {
            let steps: Vec<u8> = ReviewSection::ALL
                .iter()
                .map(|s| s.edit_step().number())
                .collect();
            assert_eq!(steps, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    mod renderers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_text_has_headings() {
            let text = render_text(&project(&complete_record()));
            assert!(text.starts_with("APPLICATION FORM SUMMARY\n========================\n"));
            assert!(text.contains("\nBASIC INFORMATION\n-----------------\n"));
            assert!(text.contains("Legal Entity Name: Riverside Health Corporation\n"));
            assert!(text.contains("\nSERVICES & CERTIFICATIONS\n"));
        }

        #[test]
        fn test_csv_round_trip() {
            let mut record = complete_record();
            record.legal_entity_name = "St. \"Mary's\" Hospital, Inc".into();
            let rows = project(&record);
            let parsed = parse_csv(&render_csv(&rows));

            assert_eq!(parsed[0], vec!["Section", "Field", "Value"]);
            assert_eq!(parsed.len(), rows.len() + 1);
            for (row, cells) in rows.iter().zip(&parsed[1..]) {
                assert_eq!(cells, &vec![row.section.to_string(), row.field.clone(), row.value.clone()]);
            }
        }

        #[test]
        fn test_csv_doubles_quotes() {
            let rows = vec![SummaryRow {
                section: "Basic Information",
                field: "Legal Entity Name".into(),
                value: "A \"B\"".into(),
            }];
            let csv = render_csv(&rows);
            assert_eq!(
                csv.lines().nth(1),
                Some("\"Basic Information\",\"Legal Entity Name\",\"A \"\"B\"\"\"")
            );
        }
    }
}
