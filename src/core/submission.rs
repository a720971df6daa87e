use crate::domain::model::{BirthDate, LeadForm, LeadPayload, LifePathNumber};
use crate::utils::error::FormError;
use crate::utils::validation::is_plausible_email;

/// A form that passed every check, ready to be turned into a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLead {
    pub first_name: String,
    pub email: String,
    pub birth_date: BirthDate,
}

/// Checks the form in page order and stops at the first failure.
pub fn validate_form(form: &LeadForm) -> Result<ValidatedLead, FormError> {
    let first_name = form.first_name.trim();
    if first_name.is_empty() {
        tracing::debug!("❌ First name missing");
        return Err(FormError::MissingFirstName);
    }

    let email = form.email.trim();
    if !is_plausible_email(email) {
        tracing::debug!("❌ Invalid email: {}", email);
        return Err(FormError::InvalidEmail);
    }

    // 0 等同未選擇
    let selected = |v: Option<i64>| v.filter(|n| *n != 0);
    let (Some(day), Some(month), Some(year)) =
        (selected(form.day), selected(form.month), selected(form.year))
    else {
        tracing::debug!(
            "❌ Incomplete date: day={:?} month={:?} year={:?}",
            form.day,
            form.month,
            form.year
        );
        return Err(FormError::IncompleteDate);
    };

    let birth_date = BirthDate::new(year, month, day).inspect_err(|_| {
        tracing::debug!("❌ Invalid date: {}-{}-{}", year, month, day);
    })?;

    Ok(ValidatedLead {
        first_name: first_name.to_string(),
        email: email.to_string(),
        birth_date,
    })
}

pub fn build_payload(lead: &ValidatedLead) -> LeadPayload {
    let life_path_number = LifePathNumber::from_birth_date(&lead.birth_date);
    tracing::debug!("🔢 Life path number: {}", life_path_number);

    LeadPayload {
        first_name: lead.first_name.clone(),
        email: lead.email.clone(),
        birth_date: lead.birth_date.iso_string(),
        life_path_number,
    }
}
