//! Wizard steps and navigation

use super::record::FormRecord;
use super::validation::{validate, ValidationErrors};

/// Position in the wizard, always within `1..=7`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WizardStep(u8);

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep(1);
    /// Last data-entry step
    pub const LAST_ENTRY: WizardStep = WizardStep(6);
    pub const REVIEW: WizardStep = WizardStep(7);

    /// Build a step, clamping out-of-range numbers
    pub fn new(number: u8) -> Self {
        Self(number.clamp(Self::FIRST.0, Self::REVIEW.0))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn prev(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    pub fn is_review(self) -> bool {
        self == Self::REVIEW
    }

    pub fn title(self) -> &'static str {
        match self.0 {
            1 => "Quote Request",
            2 => "Facility Details",
            3 => "Leadership Contacts",
            4 => "Site Information",
            5 => "Site Services",
            6 => "Services & Certifications",
            _ => "Review & Submit",
        }
    }

    /// Every step in order
    pub fn all() -> impl Iterator<Item = WizardStep> {
        (Self::FIRST.0..=Self::REVIEW.0).map(WizardStep)
    }

    /// Data-entry steps only
    pub fn entry_steps() -> impl Iterator<Item = WizardStep> {
        (Self::FIRST.0..=Self::LAST_ENTRY.0).map(WizardStep)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Result of trying to leave a step forwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub step: WizardStep,
    pub errors: ValidationErrors,
}

/// Validate `step` and move forward when it passes
pub fn advance(step: WizardStep, record: &FormRecord) -> Advance {
    let errors = validate(step, record);
    let next = if errors.is_empty() { step.next() } else { step };
    tracing::debug!(
        "advance from step {} -> {} ({} errors)",
        step.number(),
        next.number(),
        errors.len()
    );
    Advance { step: next, errors }
}

/// Move back one step; never validates
pub fn back(step: WizardStep) -> WizardStep {
    step.prev()
}

/// Jump straight to `target`, skipping validation of anything in between
pub fn jump_to(target: u8) -> WizardStep {
    WizardStep::new(target)
}

/// First data-entry step whose validator fails, with its errors
pub fn first_invalid_step(record: &FormRecord) -> Option<(WizardStep, ValidationErrors)> {
    WizardStep::entry_steps()
        .map(|step| (step, validate(step, record)))
        .find(|(_, errors)| !errors.is_empty())
}
