use intraops_core::accounting::{AccountGroup, AccountGroupRepository};
use intraops_core::errors::{DomainError, Result};
use intraops_core::paging::{ListOptions, Page};
use rusqlite::{params, OptionalExtension, Row};

use super::{from_millis, overshoot, to_millis};
use crate::db::Database;
use crate::errors::from_rusqlite;

const COLUMNS: &str = "id, number, name, description, created_at, updated_at";

/// Raw column values, decoded outside the rusqlite row callback
struct GroupRow {
    id: String,
    number: String,
    name: String,
    description: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl GroupRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            number: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_model(self) -> Result<AccountGroup> {
        let created_at = from_millis("account_groups", &self.id, self.created_at)?;
        let updated_at = from_millis("account_groups", &self.id, self.updated_at)?;
        Ok(AccountGroup {
            id: self.id,
            number: self.number,
            name: self.name,
            description: self.description,
            created_at,
            updated_at,
        })
    }
}

/// Account groups in the `account_groups` table
#[derive(Clone)]
pub struct SqliteAccountGroups {
    db: Database,
}

impl SqliteAccountGroups {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn find_one(&self, predicate: &str, value: &str) -> Result<Option<AccountGroup>> {
        let sql = format!("SELECT {} FROM account_groups WHERE {} = ?1", COLUMNS, predicate);
        let row = self.db.with_conn(|conn| {
            conn.query_row(&sql, [value], GroupRow::read)
                .optional()
                .map_err(from_rusqlite)
        })?;
        row.map(GroupRow::into_model).transpose()
    }
}

impl AccountGroupRepository for SqliteAccountGroups {
    fn insert(&self, group: &AccountGroup) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account_groups (id, number, name, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    group.id,
                    group.number,
                    group.name,
                    group.description,
                    to_millis(&group.created_at),
                    to_millis(&group.updated_at),
                ],
            )
            .map_err(from_rusqlite)?;
            Ok(())
        })
    }

    fn update(&self, group: &AccountGroup) -> Result<()> {
        let changed = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE account_groups
                 SET number = ?2, name = ?3, description = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    group.id,
                    group.number,
                    group.name,
                    group.description,
                    to_millis(&group.updated_at),
                ],
            )
            .map_err(from_rusqlite)
        })?;
        if changed == 0 {
            return Err(DomainError::StaleWrite {
                entity: "account_group",
                id: group.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.db.with_conn(|conn| {
            conn.execute("DELETE FROM account_groups WHERE id = ?1", [id])
                .map_err(from_rusqlite)
        })?;
        Ok(removed > 0)
    }

    fn get(&self, id: &str) -> Result<Option<AccountGroup>> {
        self.find_one("id", id)
    }

    fn find_by_number(&self, number: &str) -> Result<Option<AccountGroup>> {
        self.find_one("number", number)
    }

    fn list(&self, options: &ListOptions) -> Result<Page<AccountGroup>> {
        let after = options.after_key()?;
        let limit = options.effective_limit();
        let sql = format!(
            "SELECT {} FROM account_groups
             WHERE (?1 IS NULL OR number > ?1)
               AND (?2 IS NULL OR instr(lower(name), lower(?2)) > 0)
             ORDER BY number
             LIMIT ?3",
            COLUMNS
        );
        let rows = self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
            let rows = stmt
                .query_map(
                    params![after, options.name_contains, overshoot(limit)],
                    GroupRow::read,
                )
                .map_err(from_rusqlite)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(from_rusqlite)?;
            Ok(rows)
        })?;

        let groups = rows
            .into_iter()
            .map(GroupRow::into_model)
            .collect::<Result<Vec<_>>>()?;
        Ok(Page::from_overshot(groups, limit, |g| g.number.clone()))
    }
}
