use crate::error::{Result, StoreError};
use crate::repo::{parse_enum, parse_id};
use clientele_core::domain::{Appointment, AppointmentId, AppointmentNew, CustomerId};
use rusqlite::{params, Connection, Params};

const SELECT_APPOINTMENTS: &str = "SELECT id, customer_id, title, description, scheduled_at, location, status, created_at
     FROM appointments";

pub struct AppointmentsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> AppointmentsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, appointment: &Appointment) -> Result<()> {
        appointment.ensure_valid()?;
        self.conn.execute(
            "INSERT INTO appointments (id, customer_id, title, description, scheduled_at, location, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                appointment.id().to_string(),
                appointment.customer_id().to_string(),
                appointment.title,
                appointment.description,
                appointment.scheduled_at,
                appointment.location,
                appointment.status.as_str(),
                appointment.created_at(),
            ],
        )?;
        Ok(())
    }

    pub fn get(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        let mut items = self.query(
            &format!("{SELECT_APPOINTMENTS} WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(items.pop())
    }

    pub fn list_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Appointment>> {
        self.query(
            &format!("{SELECT_APPOINTMENTS} WHERE customer_id = ?1 ORDER BY scheduled_at ASC, id ASC;"),
            [customer_id.to_string()],
        )
    }

    /// Appointments with `now < scheduled_at <= until`, soonest first.
    pub fn list_upcoming(&self, now_utc: i64, until: i64) -> Result<Vec<Appointment>> {
        self.query(
            &format!(
                "{SELECT_APPOINTMENTS}
                 WHERE scheduled_at > ?1 AND scheduled_at <= ?2
                 ORDER BY scheduled_at ASC, id ASC;"
            ),
            params![now_utc, until],
        )
    }

    pub fn list_all(&self) -> Result<Vec<Appointment>> {
        self.query(
            &format!("{SELECT_APPOINTMENTS} ORDER BY created_at ASC, id ASC;"),
            [],
        )
    }

    pub fn update(&self, appointment: &Appointment) -> Result<()> {
        appointment.ensure_valid()?;
        let updated = self.conn.execute(
            "UPDATE appointments
             SET title = ?2, description = ?3, scheduled_at = ?4, location = ?5, status = ?6
             WHERE id = ?1;",
            params![
                appointment.id().to_string(),
                appointment.title,
                appointment.description,
                appointment.scheduled_at,
                appointment.location,
                appointment.status.as_str(),
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(appointment.id().to_string()));
        }
        Ok(())
    }

    pub fn delete(&self, id: AppointmentId) -> Result<()> {
        self.conn
            .execute("DELETE FROM appointments WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn query<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(appointment_from_row(row)?);
        }
        Ok(items)
    }
}

fn appointment_from_row(row: &rusqlite::Row<'_>) -> Result<Appointment> {
    let id: AppointmentId = parse_id(row.get(0)?)?;
    let customer_id: CustomerId = parse_id(row.get(1)?)?;
    let status = parse_enum("appointments.status", row.get(6)?)?;
    Ok(Appointment::restore(
        id,
        row.get(7)?,
        AppointmentNew {
            customer_id,
            title: row.get(2)?,
            description: row.get(3)?,
            scheduled_at: row.get(4)?,
            location: row.get(5)?,
            status,
        },
    ))
}
