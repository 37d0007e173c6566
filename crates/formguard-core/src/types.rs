//! Classification vocabulary and detection result types.

use serde::{Deserialize, Serialize};

/// Stable node identifier assigned by the host when snapshotting the page.
///
/// Ids survive re-snapshots of an unchanged DOM (CDP backend-node-id style),
/// which is what allows the detector to keep processed/ignored ledgers
/// across repeated runs on the same page.
pub type NodeId = u64;

/// Form classification outcomes.
///
/// Closed set by design: scoring is a fixed table over these variants, never
/// an open-ended rule registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    Login,
    Register,
    PasswordChange,
    Recovery,
    Mfa,
    /// A real form element that matched no credential-relevant type.
    Noop,
}

impl FormType {
    /// Every scorable form type, [`FormType::Noop`] excluded.
    pub const SCORED: [FormType; 5] = [
        FormType::Login,
        FormType::Register,
        FormType::PasswordChange,
        FormType::Recovery,
        FormType::Mfa,
    ];
}

/// Field classification outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Email,
    Username,
    UsernameHidden,
    #[serde(rename = "password")]
    PasswordCurrent,
    #[serde(rename = "new-password")]
    PasswordNew,
    Otp,
}

impl FieldType {
    /// Every scorable field type.
    pub const SCORED: [FieldType; 6] = [
        FieldType::Email,
        FieldType::Username,
        FieldType::UsernameHidden,
        FieldType::PasswordCurrent,
        FieldType::PasswordNew,
        FieldType::Otp,
    ];

    /// Whether this type names a password input.
    pub fn is_password(self) -> bool {
        matches!(self, FieldType::PasswordCurrent | FieldType::PasswordNew)
    }
}

/// A classified input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedField {
    pub field_type: FieldType,
    /// Snapshot node of the input element.
    pub element: NodeId,
}

/// A classified form with its clustered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedForm {
    pub form_type: FormType,
    /// Snapshot node of the form (or form-cluster root) element.
    pub element: NodeId,
    /// Fields enclosed by this form, in DOM/visual order.
    pub fields: Vec<DetectedField>,
}

/// Result of one detection run over a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Detected forms, each with its clustered fields.
    pub forms: Vec<DetectedForm>,
    /// Fields with no enclosing detected form ("dangling" fields). Surfaced
    /// only when non-empty; consumers treat this as a synthetic no-form
    /// bucket.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dangling: Vec<DetectedField>,
}

impl Prediction {
    /// True when the run produced neither forms nor dangling fields.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty() && self.dangling.is_empty()
    }

    /// Total number of classified fields across forms and the dangling bucket.
    pub fn field_count(&self) -> usize {
        self.forms.iter().map(|f| f.fields.len()).sum::<usize>() + self.dangling.len()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
