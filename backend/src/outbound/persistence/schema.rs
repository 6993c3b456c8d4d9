//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Unique, lowercased email.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Varchar,
        /// One of `user`, `editor`, `admin`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Knowledge base pages.
    pages (id) {
        id -> Int8,
        title -> Varchar,
        /// Unique URL slug.
        slug -> Varchar,
        content -> Text,
        topic -> Varchar,
        is_published -> Bool,
        created_at -> Timestamptz,
        /// Maintained by the `pages_updated_at` trigger.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contact form inquiries.
    contact_forms (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        subject -> Varchar,
        message -> Text,
        submitted_at -> Timestamptz,
        /// One of `new`, `read`, `replied`.
        status -> Varchar,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, pages, contact_forms);
