use crate::error::{Result, StoreError};
use crate::repo::{parse_enum, parse_id};
use clientele_core::domain::{Customer, CustomerCategory, CustomerId, CustomerNew};
use rusqlite::{params, Connection, Params};

const SELECT_CUSTOMERS: &str =
    "SELECT id, full_name, phone, email, category, notes, created_at FROM customers";

pub struct CustomersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CustomersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, customer: &Customer) -> Result<()> {
        customer.ensure_valid()?;
        self.conn.execute(
            "INSERT INTO customers (id, full_name, phone, email, category, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                customer.id().to_string(),
                customer.full_name,
                customer.phone,
                customer.email,
                customer.category.as_str(),
                customer.notes,
                customer.created_at(),
            ],
        )?;
        Ok(())
    }

    pub fn get(&self, id: CustomerId) -> Result<Option<Customer>> {
        let mut items = self.query(
            &format!("{SELECT_CUSTOMERS} WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(items.pop())
    }

    pub fn exists(&self, id: CustomerId) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM customers WHERE id = ?1;",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// First customer stored with this exact email, if any.
    pub fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let mut items = self.query(
            &format!("{SELECT_CUSTOMERS} WHERE email = ?1 ORDER BY created_at ASC, id ASC LIMIT 1;"),
            [email.trim()],
        )?;
        Ok(items.pop())
    }

    pub fn list_by_category(&self, category: CustomerCategory) -> Result<Vec<Customer>> {
        self.query(
            &format!("{SELECT_CUSTOMERS} WHERE category = ?1 ORDER BY created_at ASC, id ASC;"),
            [category.as_str()],
        )
    }

    pub fn list_all(&self) -> Result<Vec<Customer>> {
        self.query(
            &format!("{SELECT_CUSTOMERS} ORDER BY created_at ASC, id ASC;"),
            [],
        )
    }

    pub fn update(&self, customer: &Customer) -> Result<()> {
        customer.ensure_valid()?;
        let updated = self.conn.execute(
            "UPDATE customers
             SET full_name = ?2, phone = ?3, email = ?4, category = ?5, notes = ?6
             WHERE id = ?1;",
            params![
                customer.id().to_string(),
                customer.full_name,
                customer.phone,
                customer.email,
                customer.category.as_str(),
                customer.notes,
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(customer.id().to_string()));
        }
        Ok(())
    }

    /// Leaves the customer's appointments, tasks and communications in place.
    pub fn delete(&self, id: CustomerId) -> Result<()> {
        self.conn
            .execute("DELETE FROM customers WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn query<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(customer_from_row(row)?);
        }
        Ok(items)
    }
}

fn customer_from_row(row: &rusqlite::Row<'_>) -> Result<Customer> {
    let id: CustomerId = parse_id(row.get(0)?)?;
    let category = parse_enum("customers.category", row.get(4)?)?;
    Ok(Customer::restore(
        id,
        row.get(6)?,
        CustomerNew {
            full_name: row.get(1)?,
            phone: row.get(2)?,
            email: row.get(3)?,
            category,
            notes: row.get(5)?,
        },
    ))
}
