use super::*;
use crate::features::FieldStats;

fn blank_form() -> FormFeatures {
    FormFeatures {
        attr_text: String::new(),
        button_text: String::new(),
        link_text: String::new(),
        heading_text: String::new(),
        body_text: String::new(),
        stats: FieldStats::default(),
    }
}

fn blank_field(input_type: &str) -> FieldFeatures {
    FieldFeatures {
        input_type: input_type.into(),
        attr_text: String::new(),
        context_text: String::new(),
        autocomplete: None,
        pattern: None,
        maxlength: None,
        value: None,
        visible: true,
        form: Some(1),
    }
}

fn cfg() -> DetectorConfig {
    DetectorConfig::default()
}

fn best_form_type(form: &FormFeatures, config: &DetectorConfig) -> Option<FormType> {
    FormType::SCORED
        .into_iter()
        .map(|ty| (ty, form_score(form, ty)))
        .filter(|(_, score)| *score >= config.score_threshold)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(ty, _)| ty)
}

#[test]
fn test_login_form_wins() {
    let mut form = blank_form();
    form.attr_text = "loginform".into();
    form.button_text = "signin".into();
    form.stats.visible_passwords = 1;
    form.stats.visible_texts = 1;

    assert_eq!(best_form_type(&form, &cfg()), Some(FormType::Login));
}

#[test]
fn test_register_form_wins() {
    let mut form = blank_form();
    form.attr_text = "signupform".into();
    form.button_text = "createaccount".into();
    form.body_text = "iagreetotheterms".into();
    form.stats.visible_passwords = 1;
    form.stats.visible_texts = 2;
    form.stats.autocomplete_new = 1;

    assert_eq!(best_form_type(&form, &cfg()), Some(FormType::Register));
    // The new-password hint drags the login score down.
    assert!(form_score(&form, FormType::Login) < cfg().score_threshold);
}

#[test]
fn test_password_change_form_wins() {
    let mut form = blank_form();
    form.attr_text = "changepassword".into();
    form.heading_text = "currentpassword newpassword confirmpassword".into();
    form.stats.visible_passwords = 3;
    form.stats.autocomplete_current = 1;
    form.stats.autocomplete_new = 1;

    assert_eq!(best_form_type(&form, &cfg()), Some(FormType::PasswordChange));
}

#[test]
fn test_recovery_form_wins() {
    let mut form = blank_form();
    form.attr_text = "forgotpassword".into();
    form.heading_text = "resetyourpassword".into();
    form.stats.visible_texts = 1;
    form.stats.emails = 1;

    assert_eq!(best_form_type(&form, &cfg()), Some(FormType::Recovery));
}

#[test]
fn test_mfa_form_wins() {
    let mut form = blank_form();
    form.attr_text = "twofactorchallenge".into();
    form.button_text = "verify".into();
    form.stats.visible_texts = 1;
    form.stats.otp_like = 1;

    assert_eq!(best_form_type(&form, &cfg()), Some(FormType::Mfa));
}

#[test]
fn test_search_form_scores_nothing() {
    let mut form = blank_form();
    form.attr_text = "searchform".into();
    form.button_text = "search".into();
    form.stats.visible_texts = 1;

    assert_eq!(best_form_type(&form, &cfg()), None);
}

#[test]
fn test_scores_are_clamped() {
    let mut form = blank_form();
    form.attr_text = "loginsignin".into();
    form.button_text = "connexion".into();
    form.heading_text = "rememberme".into();
    form.link_text = "forgotpassword".into();
    form.stats.visible_passwords = 1;
    form.stats.visible_texts = 1;

    let score = form_score(&form, FormType::Login);
    assert!((0.0..=1.0).contains(&score), "{score}");
}

#[test]
fn test_plain_password_leans_on_form_type() {
    let field = blank_field("password");
    assert_eq!(
        classify_field(&field, FormType::Login, &cfg()),
        Some(FieldType::PasswordCurrent)
    );
    assert_eq!(
        classify_field(&field, FormType::Register, &cfg()),
        Some(FieldType::PasswordNew)
    );
}

#[test]
fn test_autocomplete_overrides_form_lean() {
    let mut field = blank_field("password");
    field.autocomplete = Some("new-password".into());
    assert_eq!(
        classify_field(&field, FormType::Login, &cfg()),
        Some(FieldType::PasswordNew)
    );
}

#[test]
fn test_current_password_vocab_in_change_form() {
    let mut current = blank_field("password");
    current.attr_text = "currentpassword".into();
    let mut fresh = blank_field("password");
    fresh.attr_text = "newpassword".into();

    assert_eq!(
        classify_field(&current, FormType::PasswordChange, &cfg()),
        Some(FieldType::PasswordCurrent)
    );
    assert_eq!(
        classify_field(&fresh, FormType::PasswordChange, &cfg()),
        Some(FieldType::PasswordNew)
    );
}

#[test]
fn test_invisible_password_is_not_classified() {
    let mut field = blank_field("password");
    field.visible = false;
    assert_eq!(classify_field(&field, FormType::Login, &cfg()), None);
}

#[test]
fn test_email_beats_username_for_email_inputs() {
    let mut field = blank_field("email");
    field.attr_text = "useremail".into();
    assert_eq!(
        classify_field(&field, FormType::Login, &cfg()),
        Some(FieldType::Email)
    );
}

#[test]
fn test_username_field() {
    let mut field = blank_field("text");
    field.attr_text = "username".into();
    assert_eq!(
        classify_field(&field, FormType::Login, &cfg()),
        Some(FieldType::Username)
    );
}

#[test]
fn test_name_fields_are_not_usernames() {
    let mut field = blank_field("text");
    field.attr_text = "firstname".into();
    assert_eq!(classify_field(&field, FormType::Register, &cfg()), None);
}

#[test]
fn test_hidden_username_value_gating() {
    let mut field = blank_field("hidden");
    field.attr_text = "userid".into();

    field.value = None;
    assert_eq!(classify_field(&field, FormType::Login, &cfg()), None);

    field.value = Some("true".into());
    assert_eq!(classify_field(&field, FormType::Login, &cfg()), None);

    field.value = Some("x".repeat(400));
    assert_eq!(classify_field(&field, FormType::Login, &cfg()), None);

    field.value = Some("jane@example.com".into());
    assert_eq!(
        classify_field(&field, FormType::Login, &cfg()),
        Some(FieldType::UsernameHidden)
    );
}

#[test]
fn test_otp_field() {
    let mut field = blank_field("text");
    field.attr_text = "otpcode".into();
    field.maxlength = Some(6);
    assert_eq!(
        classify_field(&field, FormType::Mfa, &cfg()),
        Some(FieldType::Otp)
    );
}

#[test]
fn test_resend_control_is_not_otp() {
    let mut field = blank_field("text");
    field.attr_text = "resendotp".into();
    assert_eq!(classify_field(&field, FormType::Mfa, &cfg()), None);
}
