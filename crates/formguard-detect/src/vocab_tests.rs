use super::*;

#[test]
fn test_sanitize_collapses_separators() {
    assert_eq!(sanitize("Sign-In"), "signin");
    assert_eq!(sanitize("sign_in now!"), "signinnow");
    assert_eq!(sanitize("NEW  Password"), "newpassword");
    assert_eq!(sanitize(""), "");
}

#[test]
fn test_login_vocab() {
    for text in ["signin", "login", "seconnecter", "anmelden", "iniciarsesion"] {
        assert!(LOGIN_RE.is_match(text), "{text}");
    }
    assert!(!LOGIN_RE.is_match("register"));
}

#[test]
fn test_register_vocab() {
    for text in ["signup", "createaccount", "registrieren", "sinscrire", "getstarted"] {
        assert!(REGISTER_RE.is_match(text), "{text}");
    }
    assert!(!REGISTER_RE.is_match("signin"));
}

#[test]
fn test_recovery_and_trouble_vocab() {
    for text in ["reset", "recover", "forgot", "trouble", "zurucksetzen"] {
        assert!(RECOVERY_RE.is_match(text) || TROUBLE_RE.is_match(text), "{text}");
    }
}

#[test]
fn test_password_vocab() {
    for text in ["password", "passphrase", "motdepasse", "contrasena", "senha"] {
        assert!(PASSWORD_RE.is_match(text), "{text}");
    }
    assert!(PASSWORD_OUTLIER_RE.is_match("socialsecuritynumber"));
}

#[test]
fn test_username_vocab() {
    for text in ["username", "nickname", "benutzername", "identifiant"] {
        assert!(USERNAME_RE.is_match(text), "{text}");
    }
    assert!(USERNAME_ATTR_RE.is_match("loginid"));
    assert!(USERNAME_OUTLIER_RE.is_match("firstname"));
    assert!(USERNAME_OUTLIER_RE.is_match("lastname"));
    assert!(!USERNAME_RE.is_match("email"));
}

#[test]
fn test_email_vocab() {
    assert!(EMAIL_RE.is_match("email"));
    assert!(EMAIL_RE.is_match("courriel"));
    assert!(EMAIL_ATTR_RE.is_match("usermail"));
}

#[test]
fn test_mfa_and_otp_vocab() {
    for text in ["twofactor", "2fa", "mfa", "authenticationcode", "twostep"] {
        assert!(MFA_RE.is_match(text) || MFA_ATTR_RE.is_match(text), "{text}");
    }
    for text in ["otp", "totp", "onetime", "1time", "totppin"] {
        assert!(OTP_ATTR_RE.is_match(text), "{text}");
    }
    // Resend buttons near OTP inputs are not themselves OTP fields.
    assert!(OTP_OUTLIER_RE.is_match("resendcode"));
}

#[test]
fn test_action_vocab() {
    assert!(CREATE_ACTION_RE.is_match("createnew"));
    assert!(RESET_ACTION_RE.is_match("changepassword"));
    assert!(RESET_ACTION_RE.is_match("update"));
    assert!(CONFIRM_ACTION_RE.is_match("confirmpassword"));
    assert!(CONFIRM_ACTION_RE.is_match("retype"));
    assert!(CURRENT_VALUE_RE.is_match("currentpassword"));
    assert!(CURRENT_VALUE_RE.is_match("oldpassword"));
}

#[test]
fn test_tos_vocab() {
    assert!(TOS_RE.is_match("iagreetotheterms"));
    assert!(TOS_RE.is_match("privacypolicy"));
    assert!(!TOS_RE.is_match("signin"));
}

#[test]
fn test_hidden_attr_vocab() {
    assert!(HIDDEN_ATTR_RE.is_match("sronly"));
    assert!(HIDDEN_ATTR_RE.is_match("visuallyhidden"));
    assert!(HIDDEN_ATTR_RE.is_match("offscreen"));
    assert!(!HIDDEN_ATTR_RE.is_match("visible"));
}
