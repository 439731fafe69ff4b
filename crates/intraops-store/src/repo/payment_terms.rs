use intraops_core::accounting::{PaymentTerm, PaymentTermRepository};
use intraops_core::errors::{DomainError, Result};
use intraops_core::paging::{ListOptions, Page};
use rusqlite::{params, OptionalExtension, Row};

use super::{from_millis, overshoot, to_millis};
use crate::db::Database;
use crate::errors::{corrupt_row, from_rusqlite};

const COLUMNS: &str =
    "id, name, days_until_due, discount_days, discount_basis_points, created_at, updated_at";

struct TermRow {
    id: String,
    name: String,
    days_until_due: i64,
    discount_days: i64,
    discount_basis_points: i64,
    created_at: i64,
    updated_at: i64,
}

impl TermRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            days_until_due: row.get(2)?,
            discount_days: row.get(3)?,
            discount_basis_points: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn into_model(self) -> Result<PaymentTerm> {
        let id = self.id;
        let count = |column: &str, value: i64| {
            u32::try_from(value)
                .map_err(|_| corrupt_row("payment_terms", &id, &format!("{} = {}", column, value)))
        };
        let days_until_due = count("days_until_due", self.days_until_due)?;
        let discount_days = count("discount_days", self.discount_days)?;
        let discount_basis_points = count("discount_basis_points", self.discount_basis_points)?;
        let created_at = from_millis("payment_terms", &id, self.created_at)?;
        let updated_at = from_millis("payment_terms", &id, self.updated_at)?;
        Ok(PaymentTerm {
            id,
            name: self.name,
            days_until_due,
            discount_days,
            discount_basis_points,
            created_at,
            updated_at,
        })
    }
}

/// Payment terms in the `payment_terms` table
#[derive(Clone)]
pub struct SqlitePaymentTerms {
    db: Database,
}

impl SqlitePaymentTerms {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn find_one(&self, predicate: &str, value: &str) -> Result<Option<PaymentTerm>> {
        let sql = format!("SELECT {} FROM payment_terms WHERE {} = ?1", COLUMNS, predicate);
        let row = self.db.with_conn(|conn| {
            conn.query_row(&sql, [value], TermRow::read)
                .optional()
                .map_err(from_rusqlite)
        })?;
        row.map(TermRow::into_model).transpose()
    }
}

impl PaymentTermRepository for SqlitePaymentTerms {
    fn insert(&self, term: &PaymentTerm) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO payment_terms
                    (id, name, days_until_due, discount_days, discount_basis_points, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    term.id,
                    term.name,
                    term.days_until_due,
                    term.discount_days,
                    term.discount_basis_points,
                    to_millis(&term.created_at),
                    to_millis(&term.updated_at),
                ],
            )
            .map_err(from_rusqlite)?;
            Ok(())
        })
    }

    fn update(&self, term: &PaymentTerm) -> Result<()> {
        let changed = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE payment_terms
                 SET name = ?2, days_until_due = ?3, discount_days = ?4,
                     discount_basis_points = ?5, updated_at = ?6
                 WHERE id = ?1",
                params![
                    term.id,
                    term.name,
                    term.days_until_due,
                    term.discount_days,
                    term.discount_basis_points,
                    to_millis(&term.updated_at),
                ],
            )
            .map_err(from_rusqlite)
        })?;
        if changed == 0 {
            return Err(DomainError::StaleWrite {
                entity: "payment_term",
                id: term.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.db.with_conn(|conn| {
            conn.execute("DELETE FROM payment_terms WHERE id = ?1", [id])
                .map_err(from_rusqlite)
        })?;
        Ok(removed > 0)
    }

    fn get(&self, id: &str) -> Result<Option<PaymentTerm>> {
        self.find_one("id", id)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<PaymentTerm>> {
        self.find_one("name", name)
    }

    fn list(&self, options: &ListOptions) -> Result<Page<PaymentTerm>> {
        let after = options.after_key()?;
        let limit = options.effective_limit();
        let sql = format!(
            "SELECT {} FROM payment_terms
             WHERE (?1 IS NULL OR name > ?1)
               AND (?2 IS NULL OR instr(lower(name), lower(?2)) > 0)
             ORDER BY name
             LIMIT ?3",
            COLUMNS
        );
        let rows = self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
            let rows = stmt
                .query_map(
                    params![after, options.name_contains, overshoot(limit)],
                    TermRow::read,
                )
                .map_err(from_rusqlite)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(from_rusqlite)?;
            Ok(rows)
        })?;

        let terms = rows
            .into_iter()
            .map(TermRow::into_model)
            .collect::<Result<Vec<_>>>()?;
        Ok(Page::from_overshot(terms, limit, |t| t.name.clone()))
    }
}
