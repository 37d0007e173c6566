//! Score tables.
//!
//! Scores are additive over weighted signals and clamped to `[0, 1]`.
//! Positive weights reward signals typical of the type, negative weights
//! punish outliers. Anything at or above the configured threshold becomes a
//! candidate; everything below stays unclassified. The tables are pure
//! functions over extracted features, which keeps them unit-testable without
//! a snapshot.

use formguard_core::{FieldType, FormType};

use crate::config::DetectorConfig;
use crate::features::{FieldFeatures, FormFeatures};
use crate::vocab::{
    self, CONFIRM_ACTION_RE, CREATE_ACTION_RE, CURRENT_VALUE_RE, EMAIL_ATTR_RE, EMAIL_RE,
    LOGIN_RE, MFA_ACTION_RE, MFA_ATTR_RE, MFA_RE, OAUTH_ATTR_RE, OTP_ATTR_RE, OTP_OUTLIER_RE,
    PASSWORD_OUTLIER_RE, RECOVERY_RE, REGISTER_RE, REMEMBER_ACTION_RE, RESET_ACTION_RE,
    SEARCH_ACTION_RE, TOS_RE, TROUBLE_RE, USERNAME_ATTR_RE, USERNAME_OUTLIER_RE, USERNAME_RE,
};

fn clamp01(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// Score a form (or cluster root) against one form type.
pub(crate) fn form_score(form: &FormFeatures, form_type: FormType) -> f64 {
    let intent = form.intent_text();
    let stats = &form.stats;
    let mut score = 0.0;

    match form_type {
        FormType::Login => {
            if LOGIN_RE.is_match(&intent) {
                score += 0.35;
            }
            if stats.visible_passwords == 1 && stats.autocomplete_new == 0 {
                score += 0.25;
            }
            if stats.visible_texts == 1 {
                score += 0.15;
            }
            // Password-only step of a multi-step login flow.
            if stats.visible_passwords == 1
                && stats.visible_texts == 0
                && stats.autocomplete_new == 0
            {
                score += 0.25;
            }
            if REMEMBER_ACTION_RE.is_match(&form.heading_text)
                || REMEMBER_ACTION_RE.is_match(&form.body_text)
            {
                score += 0.1;
            }
            if TROUBLE_RE.is_match(&form.link_text) {
                score += 0.1;
            }
            if OAUTH_ATTR_RE.is_match(&form.button_text) {
                score += 0.1;
            }
            if REGISTER_RE.is_match(&intent) {
                score -= 0.3;
            }
            if stats.autocomplete_new > 0 || stats.visible_passwords >= 2 {
                score -= 0.25;
            }
            if TOS_RE.is_match(&form.body_text) || TOS_RE.is_match(&form.heading_text) {
                score -= 0.2;
            }
            if SEARCH_ACTION_RE.is_match(&form.attr_text) {
                score -= 0.4;
            }
            if MFA_RE.is_match(&intent) {
                score -= 0.2;
            }
        }
        FormType::Register => {
            if REGISTER_RE.is_match(&intent) {
                score += 0.35;
            }
            if CREATE_ACTION_RE.is_match(&form.button_text) {
                score += 0.2;
            }
            if stats.autocomplete_new > 0 {
                score += 0.25;
            }
            if stats.visible_passwords >= 2
                && (CONFIRM_ACTION_RE.is_match(&intent)
                    || CONFIRM_ACTION_RE.is_match(&form.body_text))
            {
                score += 0.2;
            }
            if TOS_RE.is_match(&form.body_text) || TOS_RE.is_match(&form.heading_text) {
                score += 0.15;
            }
            if stats.visible_texts >= 2 {
                score += 0.1;
            }
            if LOGIN_RE.is_match(&form.button_text) {
                score -= 0.3;
            }
            if CURRENT_VALUE_RE.is_match(&intent) {
                score -= 0.3;
            }
        }
        FormType::PasswordChange => {
            if RESET_ACTION_RE.is_match(&intent) {
                score += 0.35;
            }
            if stats.autocomplete_current >= 1 && stats.autocomplete_new >= 1 {
                score += 0.25;
            }
            if CURRENT_VALUE_RE.is_match(&intent) || CURRENT_VALUE_RE.is_match(&form.heading_text)
            {
                score += 0.2;
            }
            if stats.visible_passwords >= 2
                && (CONFIRM_ACTION_RE.is_match(&intent)
                    || CONFIRM_ACTION_RE.is_match(&form.body_text))
            {
                score += 0.2;
            }
            if stats.visible_texts == 0 && stats.visible_passwords > 0 {
                score += 0.1;
            }
            if REGISTER_RE.is_match(&intent) {
                score -= 0.3;
            }
            if stats.visible_passwords == 0 {
                score -= 0.25;
            }
        }
        FormType::Recovery => {
            if RECOVERY_RE.is_match(&intent) || TROUBLE_RE.is_match(&intent) {
                score += 0.4;
            }
            if stats.visible_passwords == 0 && stats.visible_texts >= 1 {
                score += 0.2;
            }
            if stats.emails >= 1 {
                score += 0.1;
            }
            if stats.visible_passwords > 0 {
                score -= 0.35;
            }
            if REGISTER_RE.is_match(&intent) {
                score -= 0.2;
            }
        }
        FormType::Mfa => {
            if MFA_RE.is_match(&intent)
                || MFA_ATTR_RE.is_match(&intent)
                || MFA_RE.is_match(&form.body_text)
            {
                score += 0.4;
            }
            if stats.otp_like >= 1 {
                score += 0.3;
            }
            if MFA_ACTION_RE.is_match(&form.button_text) {
                score += 0.1;
            }
            if stats.visible_passwords > 0 {
                score -= 0.3;
            }
        }
        FormType::Noop => {}
    }

    clamp01(score)
}

/// Score a field against one field type.
///
/// `form_type` is the winning classification of the field's enclosing form
/// ([`FormType::Noop`] for dangling fields); some field types lean on it.
pub(crate) fn field_score(
    field: &FieldFeatures,
    form_type: FormType,
    field_type: FieldType,
    config: &DetectorConfig,
) -> f64 {
    let mut haystack = field.attr_text.clone();
    haystack.push_str(&field.context_text);
    let mut score = 0.0;

    match field_type {
        FieldType::Email => {
            if !field.visible || !field.is_text_like() {
                return 0.0;
            }
            if field.input_type == "email" {
                score += 0.5;
            }
            if field.autocomplete_is("email") {
                score += 0.4;
            }
            if EMAIL_RE.is_match(&haystack) || EMAIL_ATTR_RE.is_match(&field.attr_text) {
                score += 0.3;
            }
            if field.value.as_deref().is_some_and(|v| v.contains('@')) {
                score += 0.2;
            }
            if USERNAME_OUTLIER_RE.is_match(&field.attr_text) {
                score -= 0.3;
            }
        }
        FieldType::Username => {
            if !field.visible || !field.is_text_like() || field.input_type == "email" {
                return 0.0;
            }
            if USERNAME_RE.is_match(&haystack) {
                score += 0.5;
            }
            if USERNAME_ATTR_RE.is_match(&field.attr_text) {
                score += 0.4;
            }
            if field.autocomplete_is("username") {
                score += 0.4;
            }
            if form_type == FormType::Login {
                score += 0.15;
            }
            if USERNAME_OUTLIER_RE.is_match(&haystack) {
                score -= 0.4;
            }
            if EMAIL_RE.is_match(&field.attr_text) {
                score -= 0.3;
            }
            if PASSWORD_OUTLIER_RE.is_match(&haystack) {
                score -= 0.4;
            }
            if field.input_type == "search" || SEARCH_ACTION_RE.is_match(&field.attr_text) {
                score -= 0.4;
            }
        }
        FieldType::UsernameHidden => {
            if field.input_type != "hidden" {
                return 0.0;
            }
            let Some(value) = field.value.as_deref().filter(|v| !v.is_empty()) else {
                return 0.0;
            };
            if value.len() > config.max_hidden_value_len
                || vocab::HIDDEN_IGNORE_VALUES.contains(&value)
            {
                return 0.0;
            }
            if USERNAME_ATTR_RE.is_match(&field.attr_text)
                || USERNAME_RE.is_match(&field.attr_text)
                || EMAIL_RE.is_match(&field.attr_text)
                || EMAIL_ATTR_RE.is_match(&field.attr_text)
            {
                score += 0.5;
            }
            if value.contains('@') {
                score += 0.3;
            }
        }
        FieldType::PasswordCurrent => {
            if field.input_type != "password" || !field.visible {
                return 0.0;
            }
            score += 0.3;
            if field.autocomplete_is("current-password") {
                score += 0.4;
            }
            if CURRENT_VALUE_RE.is_match(&haystack) {
                score += 0.25;
            }
            if form_type == FormType::Login {
                score += 0.2;
            }
            if field.autocomplete_is("new-password") {
                score -= 0.5;
            }
            if CREATE_ACTION_RE.is_match(&haystack) || CONFIRM_ACTION_RE.is_match(&haystack) {
                score -= 0.3;
            }
            if form_type == FormType::Register {
                score -= 0.2;
            }
        }
        FieldType::PasswordNew => {
            if field.input_type != "password" || !field.visible {
                return 0.0;
            }
            score += 0.25;
            if field.autocomplete_is("new-password") {
                score += 0.6;
            }
            if CREATE_ACTION_RE.is_match(&haystack) {
                score += 0.3;
            }
            if CONFIRM_ACTION_RE.is_match(&haystack) {
                score += 0.25;
            }
            if matches!(form_type, FormType::Register | FormType::PasswordChange) {
                score += 0.3;
            }
            if form_type == FormType::Login {
                score -= 0.3;
            }
            if CURRENT_VALUE_RE.is_match(&haystack) {
                score -= 0.4;
            }
        }
        FieldType::Otp => {
            if !field.visible || !matches!(field.input_type.as_str(), "text" | "number" | "tel") {
                return 0.0;
            }
            if OTP_ATTR_RE.is_match(&field.attr_text) {
                score += 0.5;
            }
            if field
                .autocomplete
                .as_deref()
                .is_some_and(|ac| ac.contains("one-time-code"))
            {
                score += 0.5;
            }
            if MFA_ATTR_RE.is_match(&haystack) || MFA_RE.is_match(&haystack) {
                score += 0.3;
            }
            if field
                .pattern
                .as_deref()
                .is_some_and(|p| vocab::OTP_PATTERNS.contains(&p.replace('\\', "").as_str()))
            {
                score += 0.25;
            }
            if matches!(field.maxlength, Some(1) | Some(6)) {
                score += 0.2;
            }
            if form_type == FormType::Mfa {
                score += 0.15;
            }
            if OTP_OUTLIER_RE.is_match(&field.attr_text) {
                score -= 0.4;
            }
        }
    }

    clamp01(score)
}

/// Best field classification for a candidate, if any reaches the threshold.
///
/// Ties resolve in declaration order of [`FieldType::SCORED`], which puts the
/// less destructive interpretation first.
pub(crate) fn classify_field(
    field: &FieldFeatures,
    form_type: FormType,
    config: &DetectorConfig,
) -> Option<FieldType> {
    let mut best: Option<(FieldType, f64)> = None;
    for field_type in FieldType::SCORED {
        let score = field_score(field, form_type, field_type, config);
        if score < config.score_threshold {
            continue;
        }
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((field_type, score));
        }
    }
    best.map(|(field_type, _)| field_type)
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod tests;
