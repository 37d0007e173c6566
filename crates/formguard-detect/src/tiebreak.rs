//! Candidate resolution.
//!
//! Several form types can clear the threshold for the same element; the
//! resolution order is fixed and biased toward the least destructive autofill
//! action. Offering a saved login on a register form is recoverable; offering
//! to save a new password over an existing login is not.

use formguard_core::FormType;

/// Pick the winning type among threshold-clearing `(type, score)` candidates
/// for one form element.
///
/// Resolution order:
///
/// 1. Password-change and register candidates whose scores lie within
///    `tolerance` of each other resolve to password-change. Both flows
///    present two fresh password inputs; treating the pair as a change form
///    avoids overwriting a stored credential with a half-typed one.
/// 2. Any remaining login candidate wins outright.
/// 3. Otherwise the highest score wins, earlier candidate on exact ties.
pub fn select_best_form(candidates: &[(FormType, f64)], tolerance: f64) -> Option<FormType> {
    let score_of = |wanted: FormType| {
        candidates
            .iter()
            .find(|(ty, _)| *ty == wanted)
            .map(|(_, score)| *score)
    };

    if let (Some(change), Some(register)) = (
        score_of(FormType::PasswordChange),
        score_of(FormType::Register),
    ) {
        if (change - register).abs() <= tolerance {
            return Some(FormType::PasswordChange);
        }
    }

    if score_of(FormType::Login).is_some() {
        return Some(FormType::Login);
    }

    // max_by keeps the last of equal maxima; reversing keeps the first.
    candidates
        .iter()
        .rev()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(ty, _)| *ty)
}

#[cfg(test)]
#[path = "tiebreak_tests.rs"]
mod tests;
