use crate::core::numerology::{compute_life_path_number, is_valid_date, MASTER_NUMBERS};
use crate::utils::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    day: u32,
    month: u32,
    year: u32,
}

impl BirthDate {
    /// Builds a date that is guaranteed to exist on the Gregorian calendar.
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self, FormError> {
        // 年份須為正數，數字串接才有定義
        if year < 1 || !is_valid_date(year, month, day) {
            return Err(FormError::InvalidDate);
        }

        Ok(Self {
            day: day as u32,
            month: month as u32,
            year: year as u32,
        })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    /// `YYYY-MM-DD`
    pub fn iso_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifePathNumber(u32);

impl LifePathNumber {
    pub fn from_birth_date(date: &BirthDate) -> Self {
        Self(compute_life_path_number(date.day, date.month, date.year))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_master(&self) -> bool {
        MASTER_NUMBERS.contains(&self.0)
    }
}

impl fmt::Display for LifePathNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw form input; an unselected date field is `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
    pub first_name: String,
    pub email: String,
    pub day: Option<i64>,
    pub month: Option<i64>,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub first_name: String,
    pub email: String,
    pub birth_date: String,
    pub life_path_number: LifePathNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryChannel {
    Webhook,
    CrmApi,
    CrmFormAction,
    LocalOnly,
}

impl fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeliveryChannel::Webhook => "webhook",
            DeliveryChannel::CrmApi => "systeme-api",
            DeliveryChannel::CrmFormAction => "systeme-form",
            DeliveryChannel::LocalOnly => "local",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub channel: DeliveryChannel,
    pub status: Option<u16>,
    pub response: Option<String>,
}

/// What the page shows once a submission has been handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub message: String,
    pub payload: LeadPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
