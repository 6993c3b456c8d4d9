//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{contact_forms, pages, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the pages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PageRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub topic: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the contact_forms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contact_forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InquiryRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
}

/// Insertable struct for new inquiries; status comes from the caller.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contact_forms)]
pub(crate) struct NewInquiryRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub submitted_at: DateTime<Utc>,
    pub status: &'a str,
}
