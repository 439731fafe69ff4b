//! Database connection management
//!
//! One `Database` owns one SQLite connection. Repositories and the unit of
//! work share it through cheap clones, so a unit of work opened by the
//! pipeline covers every repository call made by the handler.
//!
//! An open unit of work belongs to the thread that began it. Until its
//! outermost scope is committed or rolled back, every other thread using the
//! same `Database` blocks, and cannot write into a transaction it does not own.

use std::path::Path;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, ThreadId};

use rusqlite::Connection;

use crate::errors::{from_rusqlite, lock_poisoned, Result};
use crate::migrations::apply_migrations;

/// The open unit of work, if any: owning thread and nesting depth
#[derive(Debug, Default)]
pub(crate) struct Scope {
    owner: Option<ThreadId>,
    depth: usize,
}

impl Scope {
    /// Depth seen by the calling thread; 0 when it owns nothing
    pub(crate) fn depth(&self) -> usize {
        if self.owner == Some(thread::current().id()) {
            self.depth
        } else {
            0
        }
    }

    pub(crate) fn enter(&mut self) {
        self.owner = Some(thread::current().id());
        self.depth += 1;
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.owner = None;
        }
    }

    fn excludes_current(&self) -> bool {
        self.owner
            .is_some_and(|owner| owner != thread::current().id())
    }
}

struct Inner {
    conn: Connection,
    scope: Scope,
}

struct Shared {
    inner: Mutex<Inner>,
    released: Condvar,
}

#[derive(Clone)]
pub struct Database {
    shared: Arc<Shared>,
}

impl Database {
    /// Open (creating if needed) the database file at `path`
    ///
    /// # Errors
    ///
    /// `Persistence` if the file cannot be opened or configured.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).map_err(from_rusqlite)?;
        configure(&conn, true)?;
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database (for tests)
    ///
    /// # Errors
    ///
    /// `Persistence` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
        configure(&conn, false)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    conn,
                    scope: Scope::default(),
                }),
                released: Condvar::new(),
            }),
        }
    }

    /// Run `f` with exclusive access to the connection
    ///
    /// Waits while another thread holds an open unit of work.
    ///
    /// # Errors
    ///
    /// `Internal` if the connection lock is poisoned, otherwise whatever `f`
    /// returns.
    pub fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        self.with_scope(|_, conn| f(conn))
    }

    /// Like `with_conn`, also handing out the unit-of-work scope
    pub(crate) fn with_scope<T>(
        &self,
        f: impl FnOnce(&mut Scope, &mut Connection) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.shared.inner.lock().map_err(|_| lock_poisoned())?;
        while guard.scope.excludes_current() {
            guard = self
                .shared
                .released
                .wait(guard)
                .map_err(|_| lock_poisoned())?;
        }

        let Inner { conn, scope } = &mut *guard;
        let was_open = scope.owner.is_some();
        let outcome = f(scope, conn);
        if was_open && scope.owner.is_none() {
            self.shared.released.notify_all();
        }
        outcome
    }

    /// Apply every pending embedded migration, returning the ids applied
    ///
    /// # Errors
    ///
    /// `Persistence` if a migration fails, `Conflict` on checksum mismatch.
    pub fn migrate(&self) -> Result<Vec<String>> {
        self.with_conn(apply_migrations)
    }
}

/// Configure a connection with the settings every handle relies on
fn configure(conn: &Connection, file_backed: bool) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    // WAL needs a file; in-memory databases keep the default journal
    if file_backed {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(from_rusqlite)?;
    }
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(from_rusqlite)?;

    Ok(())
}
