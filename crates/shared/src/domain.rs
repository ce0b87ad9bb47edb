use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ParseStatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum InternStatus {
    #[default]
    InProgress,
    Completed,
}

impl InternStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

impl fmt::Display for InternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InternStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl TryFrom<String> for InternStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Case-insensitive; `"COMPLETED"` and `"in progress"` are both valid.
impl FromStr for InternStatus {
    type Err = ParseStatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "completed" => Ok(Self::Completed),
            "inprogress" => Ok(Self::InProgress),
            _ => Err(ParseStatusError(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Status")]
    pub status: InternStatus,
}

impl InternRecord {
    /// A freshly registered intern always starts in progress.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
            status: InternStatus::InProgress,
        }
    }

    pub fn with_status(mut self, status: InternStatus) -> Self {
        self.status = status;
        self
    }
}

/// A registration that already passed required-field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIntern {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl From<NewIntern> for InternRecord {
    fn from(value: NewIntern) -> Self {
        InternRecord::new(value.name, value.email, value.department)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrySummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
}

impl RegistrySummary {
    pub fn from_statuses(statuses: impl IntoIterator<Item = InternStatus>) -> Self {
        let mut total = 0;
        let mut completed = 0;
        for status in statuses {
            total += 1;
            if status.is_completed() {
                completed += 1;
            }
        }
        Self {
            total,
            completed,
            in_progress: total - completed,
        }
    }
}
