//! Dynamic statements over a [`FieldSet`].
//!
//! Column names come from the models crate, never from request data, so they
//! are pushed as SQL text; every value goes through a bind parameter.

use anyhow::anyhow;
use schoolhub_core::AppError;
use schoolhub_models::{FieldSet, FieldValue};
use sqlx::{Postgres, QueryBuilder};

pub fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: FieldValue) {
    match value {
        FieldValue::Text(v) => builder.push_bind(v),
        FieldValue::TextList(v) => builder.push_bind(v),
        FieldValue::Int(v) => builder.push_bind(v),
        FieldValue::Bool(v) => builder.push_bind(v),
        FieldValue::Date(v) => builder.push_bind(v),
        FieldValue::Timestamp(v) => builder.push_bind(v),
    };
}

/// `INSERT INTO table (a, b) VALUES ($1, $2) RETURNING returning`
pub fn insert_statement(
    table: &str,
    fields: FieldSet,
    returning: &str,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("INSERT INTO {} (", table));
    builder.push(fields.columns().collect::<Vec<_>>().join(", "));
    builder.push(") VALUES (");

    for (i, (_, value)) in fields.into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        push_value(&mut builder, value);
    }

    builder.push(format!(") RETURNING {}", returning));
    builder
}

/// `UPDATE table SET a = $1, updated_at = NOW() WHERE id = $n RETURNING returning`
pub fn update_statement(
    table: &str,
    id: uuid::Uuid,
    fields: FieldSet,
    returning: &str,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", table));

    for (column, value) in fields {
        builder.push(column);
        builder.push(" = ");
        push_value(&mut builder, value);
        builder.push(", ");
    }

    builder.push("updated_at = NOW() WHERE id = ");
    builder.push_bind(id);
    builder.push(format!(" RETURNING {}", returning));
    builder
}

/// Maps constraint violations on a write to client errors; anything else
/// stays a 500.
pub fn write_error(err: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::bad_request(anyhow!("{} already exists", name));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::unprocessable(anyhow!(
                "{} references a record that does not exist",
                name
            ));
        }
        if db_err.is_check_violation() {
            return AppError::unprocessable(anyhow!("{} has invalid values", name));
        }
    }
    AppError::from(err)
}

/// `%term%` for a `LIKE ... ESCAPE '\'` match, with the wildcards in
/// `term` taken literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
