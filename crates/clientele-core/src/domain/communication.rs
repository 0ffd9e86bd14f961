use crate::domain::char_len;
use crate::domain::ids::{CommunicationId, CustomerId};
use crate::error::{ensure_no_violations, CoreError, Violation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MAX_SUBJECT_LEN: usize = 150;
pub const MAX_MESSAGE_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationType {
    Call,
    Email,
}

impl CommunicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationType::Call => "CALL",
            CommunicationType::Email => "EMAIL",
        }
    }
}

impl fmt::Display for CommunicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommunicationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CALL" => Ok(CommunicationType::Call),
            "EMAIL" => Ok(CommunicationType::Email),
            other => Err(CoreError::InvalidCommunicationType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallOutcome {
    Answered,
    NoAnswer,
    Voicemail,
    Busy,
}

impl CallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallOutcome::Answered => "ANSWERED",
            CallOutcome::NoAnswer => "NO_ANSWER",
            CallOutcome::Voicemail => "VOICEMAIL",
            CallOutcome::Busy => "BUSY",
        }
    }
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallOutcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANSWERED" => Ok(CallOutcome::Answered),
            "NO_ANSWER" => Ok(CallOutcome::NoAnswer),
            "VOICEMAIL" => Ok(CallOutcome::Voicemail),
            "BUSY" => Ok(CallOutcome::Busy),
            other => Err(CoreError::InvalidCallOutcome(other.to_string())),
        }
    }
}

/// Variant payload of a communication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationChannel {
    Call {
        duration_seconds: u32,
        outcome: CallOutcome,
    },
    Email {
        recipient_email: Option<String>,
        attachment_name: Option<String>,
    },
}

impl CommunicationChannel {
    pub fn kind(&self) -> CommunicationType {
        match self {
            CommunicationChannel::Call { .. } => CommunicationType::Call,
            CommunicationChannel::Email { .. } => CommunicationType::Email,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommunicationNew {
    pub customer_id: CustomerId,
    pub subject: String,
    pub message: Option<String>,
    pub channel: CommunicationChannel,
}

#[derive(Debug, Clone, Serialize)]
pub struct Communication {
    id: CommunicationId,
    customer_id: CustomerId,
    pub subject: String,
    pub message: Option<String>,
    pub channel: CommunicationChannel,
    created_at: i64,
}

impl Communication {
    pub fn new(now_utc: i64, input: CommunicationNew) -> Self {
        Self::restore(CommunicationId::new(), now_utc, input)
    }

    pub fn restore(id: CommunicationId, created_at: i64, input: CommunicationNew) -> Self {
        Self {
            id,
            customer_id: input.customer_id,
            subject: input.subject,
            message: input.message,
            channel: input.channel,
            created_at,
        }
    }

    pub fn id(&self) -> CommunicationId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn kind(&self) -> CommunicationType {
        self.channel.kind()
    }

    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.subject.trim().is_empty() {
            violations.push(Violation::SubjectRequired);
        } else if char_len(&self.subject) > MAX_SUBJECT_LEN {
            violations.push(Violation::SubjectTooLong);
        }
        if let Some(message) = self.message.as_deref() {
            if char_len(message) > MAX_MESSAGE_LEN {
                violations.push(Violation::MessageTooLong);
            }
        }

        violations
    }

    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        ensure_no_violations(self.validate())
    }
}

impl PartialEq for Communication {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Communication {}

impl Hash for Communication {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
