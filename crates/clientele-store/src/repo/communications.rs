use crate::error::{Result, StoreError};
use crate::repo::{parse_enum, parse_id};
use clientele_core::domain::{
    CallOutcome, Communication, CommunicationChannel, CommunicationId, CommunicationNew,
    CommunicationType, CustomerId,
};
use rusqlite::{params, Connection, Params};

const SELECT_COMMUNICATIONS: &str = "SELECT id, customer_id, type, subject, message, call_duration_seconds, call_outcome, recipient_email, attachment_name, created_at
     FROM communications";

/// Variant columns as stored; the unused variant's columns are NULL.
struct ChannelColumns<'c> {
    duration_seconds: Option<u32>,
    outcome: Option<&'static str>,
    recipient_email: Option<&'c str>,
    attachment_name: Option<&'c str>,
}

impl<'c> ChannelColumns<'c> {
    fn from_channel(channel: &'c CommunicationChannel) -> Self {
        match channel {
            CommunicationChannel::Call {
                duration_seconds,
                outcome,
            } => Self {
                duration_seconds: Some(*duration_seconds),
                outcome: Some(outcome.as_str()),
                recipient_email: None,
                attachment_name: None,
            },
            CommunicationChannel::Email {
                recipient_email,
                attachment_name,
            } => Self {
                duration_seconds: None,
                outcome: None,
                recipient_email: recipient_email.as_deref(),
                attachment_name: attachment_name.as_deref(),
            },
        }
    }
}

pub struct CommunicationsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CommunicationsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, communication: &Communication) -> Result<()> {
        communication.ensure_valid()?;
        let columns = ChannelColumns::from_channel(&communication.channel);
        self.conn.execute(
            "INSERT INTO communications (id, customer_id, type, subject, message, call_duration_seconds, call_outcome, recipient_email, attachment_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                communication.id().to_string(),
                communication.customer_id().to_string(),
                communication.kind().as_str(),
                communication.subject,
                communication.message,
                columns.duration_seconds,
                columns.outcome,
                columns.recipient_email,
                columns.attachment_name,
                communication.created_at(),
            ],
        )?;
        Ok(())
    }

    pub fn get(&self, id: CommunicationId) -> Result<Option<Communication>> {
        let mut items = self.query(
            &format!("{SELECT_COMMUNICATIONS} WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(items.pop())
    }

    pub fn list_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Communication>> {
        self.query(
            &format!(
                "{SELECT_COMMUNICATIONS} WHERE customer_id = ?1 ORDER BY created_at DESC, id ASC;"
            ),
            [customer_id.to_string()],
        )
    }

    pub fn list_by_type(&self, kind: CommunicationType) -> Result<Vec<Communication>> {
        self.query(
            &format!("{SELECT_COMMUNICATIONS} WHERE type = ?1 ORDER BY created_at ASC, id ASC;"),
            [kind.as_str()],
        )
    }

    pub fn list_all(&self) -> Result<Vec<Communication>> {
        self.query(
            &format!("{SELECT_COMMUNICATIONS} ORDER BY created_at ASC, id ASC;"),
            [],
        )
    }

    /// Rewrites subject, message and the channel payload. Switching between a
    /// call and an email is allowed; the other variant's columns are cleared.
    pub fn update(&self, communication: &Communication) -> Result<()> {
        communication.ensure_valid()?;
        let columns = ChannelColumns::from_channel(&communication.channel);
        let updated = self.conn.execute(
            "UPDATE communications
             SET type = ?2, subject = ?3, message = ?4, call_duration_seconds = ?5,
                 call_outcome = ?6, recipient_email = ?7, attachment_name = ?8
             WHERE id = ?1;",
            params![
                communication.id().to_string(),
                communication.kind().as_str(),
                communication.subject,
                communication.message,
                columns.duration_seconds,
                columns.outcome,
                columns.recipient_email,
                columns.attachment_name,
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(communication.id().to_string()));
        }
        Ok(())
    }

    pub fn delete(&self, id: CommunicationId) -> Result<()> {
        self.conn
            .execute("DELETE FROM communications WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn query<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Communication>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(communication_from_row(row)?);
        }
        Ok(items)
    }
}

fn communication_from_row(row: &rusqlite::Row<'_>) -> Result<Communication> {
    let id: CommunicationId = parse_id(row.get(0)?)?;
    let customer_id: CustomerId = parse_id(row.get(1)?)?;
    let kind: CommunicationType = parse_enum("communications.type", row.get(2)?)?;

    let channel = match kind {
        CommunicationType::Call => {
            let outcome_raw: Option<String> = row.get(6)?;
            let outcome: CallOutcome = match outcome_raw {
                Some(raw) => parse_enum("communications.call_outcome", raw)?,
                None => {
                    return Err(StoreError::InvalidRow {
                        table: "communications",
                        reason: format!("call {id} has no outcome"),
                    })
                }
            };
            let duration: Option<u32> = row.get(5)?;
            CommunicationChannel::Call {
                duration_seconds: duration.unwrap_or(0),
                outcome,
            }
        }
        CommunicationType::Email => CommunicationChannel::Email {
            recipient_email: row.get(7)?,
            attachment_name: row.get(8)?,
        },
    };

    Ok(Communication::restore(
        id,
        row.get(9)?,
        CommunicationNew {
            customer_id,
            subject: row.get(3)?,
            message: row.get(4)?,
            channel,
        },
    ))
}
