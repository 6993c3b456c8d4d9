//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    NewUser, StoredUser, UniqueUserField, UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, PasswordDigest, Role, User, UserId, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

/// Map Diesel errors, telling unique violations apart by constraint.
fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        let names_email = info
            .constraint_name()
            .map_or_else(|| info.message().contains("email"), |name| name.contains("email"));
        debug!(constraint = ?info.constraint_name(), "user unique violation");
        let field = if names_email {
            UniqueUserField::Email
        } else {
            UniqueUserField::Username
        };
        return UserPersistenceError::conflict(field);
    }
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_stored_user(row: UserRow) -> Result<StoredUser, UserPersistenceError> {
    let UserRow {
        id,
        username,
        email,
        password_hash,
        role,
        created_at,
    } = row;
    let corrupt = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("invalid user row: {err}"))
    };
    let user = User::new(
        UserId::from_uuid(id),
        Username::new(username).map_err(corrupt)?,
        EmailAddress::new(email).map_err(corrupt)?,
        role.parse::<Role>().map_err(corrupt)?,
        created_at,
    );
    Ok(StoredUser {
        user,
        password: PasswordDigest::new(password_hash),
    })
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row_to_stored_user(row).map(|stored| stored.user)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            id: *user.id.as_uuid(),
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password.as_str(),
            role: user.role.as_str(),
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stored_user).transpose()
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::username.eq(username.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for user row conversion and error mapping.
    use super::*;
    use chrono::{DateTime, Utc};
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;
    use uuid::Uuid;

    struct UniqueViolation {
        constraint: Option<&'static str>,
        message: &'static str,
    }

    impl DatabaseErrorInformation for UniqueViolation {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("users")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn row(role: &str) -> UserRow {
        UserRow {
            id: Uuid::nil(),
            username: "anna".to_owned(),
            email: "anna@vidensbank.dk".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            role: role.to_owned(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[rstest]
    #[case(Some("users_email_key"), "duplicate key", UniqueUserField::Email)]
    #[case(Some("users_username_key"), "duplicate key", UniqueUserField::Username)]
    #[case(None, "duplicate key value violates \"users_email_key\"", UniqueUserField::Email)]
    #[case(None, "duplicate key", UniqueUserField::Username)]
    fn unique_violation_names_the_field(
        #[case] constraint: Option<&'static str>,
        #[case] message: &'static str,
        #[case] expected: UniqueUserField,
    ) {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(UniqueViolation {
                constraint,
                message,
            }),
        ));

        assert_eq!(err, UserPersistenceError::conflict(expected));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));

        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));

        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn row_converts_with_credential() {
        let stored = row_to_stored_user(row("admin")).expect("valid row");

        assert!(stored.user.is_admin());
        assert_eq!(stored.password.as_str(), "$argon2id$stub");
    }

    #[rstest]
    fn unknown_role_is_a_query_error() {
        let err = row_to_stored_user(row("superuser")).expect_err("bad role");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
