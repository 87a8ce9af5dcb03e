//! User storage operations.
//!
//! The stored credential is write-only here: callers supply it already hashed
//! (hashing belongs to the auth layer), and no read ever selects the
//! `password` column.

use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tracing::debug;

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::row::{FromRow, RowExt};
use crate::update::{Column, Patch};
use crate::value::{Value, params_ref};

/// Columns selected for every user read.
const USER_COLUMNS: &str = "username, first_name, last_name, email, is_admin";

/// A user row in its external shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl FromRow for User {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            username: row.try_get_column("username")?,
            first_name: row.try_get_column("first_name")?,
            last_name: row.try_get_column("last_name")?,
            email: row.try_get_column("email")?,
            is_admin: row.try_get_column("is_admin")?,
        })
    }
}

/// Payload for creating a user. `password` carries the pre-hashed credential.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Updatable user fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    Password,
    Email,
    IsAdmin,
}

impl Column for UserField {
    fn column(self) -> &'static str {
        match self {
            UserField::FirstName => "first_name",
            UserField::LastName => "last_name",
            UserField::Password => "password",
            UserField::Email => "email",
            UserField::IsAdmin => "is_admin",
        }
    }
}

/// Create a user, rejecting duplicate usernames up front.
pub async fn create(conn: &impl GenericClient, data: NewUser) -> ModelResult<User> {
    let existing = conn
        .query_opt(
            "SELECT username FROM users WHERE username = $1",
            &[&data.username],
        )
        .await?;
    if existing.is_some() {
        return Err(ModelError::duplicate(format!(
            "Duplicate username: {}",
            data.username
        )));
    }

    let sql = format!(
        "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {USER_COLUMNS}"
    );
    debug!(username = %data.username, "inserting user");
    let row = conn
        .query_one(
            &sql,
            &[
                &data.username,
                &data.password,
                &data.first_name,
                &data.last_name,
                &data.email,
                &data.is_admin,
            ],
        )
        .await?;
    User::from_row(&row)
}

/// List all users ordered by username.
pub async fn find_all(conn: &impl GenericClient) -> ModelResult<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username");
    let rows = conn.query(&sql, &[]).await?;
    rows.iter().map(User::from_row).collect()
}

/// Fetch a single user by username.
pub async fn get(conn: &impl GenericClient, username: &str) -> ModelResult<User> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
    let row = conn
        .query_opt(&sql, &[&username])
        .await?
        .ok_or_else(|| ModelError::not_found(format!("No user: {username}")))?;
    User::from_row(&row)
}

/// Partially update a user; only the fields present in `patch` change.
pub async fn update(
    conn: &impl GenericClient,
    username: &str,
    patch: Patch<UserField>,
) -> ModelResult<User> {
    let (sql, values) = build_update(username, patch)?;
    debug!(username, "updating user");
    let row = conn
        .query_opt(&sql, &params_ref(&values))
        .await?
        .ok_or_else(|| ModelError::not_found(format!("No user: {username}")))?;
    User::from_row(&row)
}

/// Delete a user by username.
pub async fn remove(conn: &impl GenericClient, username: &str) -> ModelResult<()> {
    let deleted = conn
        .query_opt(
            "DELETE FROM users WHERE username = $1 RETURNING username",
            &[&username],
        )
        .await?;
    if deleted.is_none() {
        return Err(ModelError::not_found(format!("No user: {username}")));
    }
    Ok(())
}

fn build_update(username: &str, patch: Patch<UserField>) -> ModelResult<(String, Vec<Value>)> {
    let set = patch.into_set_clause()?;
    let sql = format!(
        "UPDATE users SET {} WHERE username = ${} RETURNING {USER_COLUMNS}",
        set.text(),
        set.len() + 1
    );
    let mut values = set.into_values();
    values.push(Value::from(username));
    Ok((sql, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_resolves_logical_fields_to_columns() {
        let patch = Patch::new()
            .set(UserField::FirstName, "Aliya")
            .set(UserField::IsAdmin, true);
        let (sql, values) = build_update("aliya32", patch).unwrap();
        assert_eq!(
            sql,
            "UPDATE users SET \"first_name\"=$1, \"is_admin\"=$2 WHERE username = $3 \
             RETURNING username, first_name, last_name, email, is_admin"
        );
        assert_eq!(
            values,
            vec![
                Value::Text("Aliya".to_owned()),
                Value::Bool(true),
                Value::Text("aliya32".to_owned())
            ]
        );
    }

    #[test]
    fn update_with_empty_patch_is_rejected() {
        assert!(
            build_update("aliya32", Patch::new())
                .unwrap_err()
                .is_validation()
        );
    }

    #[test]
    fn reads_never_select_the_credential_column() {
        assert!(!USER_COLUMNS.contains("password"));
    }
}
