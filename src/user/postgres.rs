use crate::db::{DbConnection, Pool};
use crate::schema::users;
use crate::user::{StoreError, User, UserChanges, UserMessage, UserStore};
use diesel::prelude::*;

/// `users` table behind a shared connection pool. Each call checks a
/// connection out and hands it back when the call returns.
pub struct PgUserStore {
    pool: Pool,
}

impl PgUserStore {
    pub fn new(pool: Pool) -> Self {
        PgUserStore { pool }
    }

    fn connection(&self) -> Result<DbConnection, StoreError> {
        Ok(self.pool.get()?)
    }
}

impl UserStore for PgUserStore {
    fn list(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.connection()?;

        let users = users::table.load::<User>(&conn)?;

        Ok(users)
    }

    fn get(&self, id: &str) -> Result<User, StoreError> {
        let conn = self.connection()?;

        let user = users::table.filter(users::id.eq(id)).first(&conn)?;

        Ok(user)
    }

    fn create(&self, user: UserMessage) -> Result<User, StoreError> {
        let conn = self.connection()?;

        let user = User::from(user);

        let user = diesel::insert_into(users::table)
            .values(user)
            .get_result(&conn)?;

        Ok(user)
    }

    fn update(&self, id: &str, changes: UserChanges) -> Result<User, StoreError> {
        // Diesel refuses an UPDATE with an empty SET clause.
        if changes.is_empty() {
            return self.get(id);
        }

        let conn = self.connection()?;

        // One conditional statement: an id deleted concurrently surfaces as
        // NotFound instead of racing a separate existence check.
        let user = diesel::update(users::table.filter(users::id.eq(id)))
            .set(changes)
            .get_result(&conn)?;

        Ok(user)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.connection()?;

        let deleted = diesel::delete(users::table.filter(users::id.eq(id))).execute(&conn)?;

        if deleted == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
