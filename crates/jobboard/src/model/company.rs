//! Company storage operations.

use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tracing::debug;

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::filter::CompanyFilter;
use crate::row::{FromRow, RowExt};
use crate::update::{Column, Patch};
use crate::value::{Value, params_ref};

/// Columns selected for every company read.
const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// A company row in its external shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Payload for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Updatable company fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Description,
    NumEmployees,
    LogoUrl,
}

impl Column for CompanyField {
    fn column(self) -> &'static str {
        match self {
            CompanyField::Name => "name",
            CompanyField::Description => "description",
            CompanyField::NumEmployees => "num_employees",
            CompanyField::LogoUrl => "logo_url",
        }
    }
}

/// Create a company, rejecting duplicate handles up front.
pub async fn create(conn: &impl GenericClient, data: NewCompany) -> ModelResult<Company> {
    let existing = conn
        .query_opt(
            "SELECT handle FROM companies WHERE handle = $1",
            &[&data.handle],
        )
        .await?;
    if existing.is_some() {
        return Err(ModelError::duplicate(format!(
            "Duplicate company: {}",
            data.handle
        )));
    }

    let sql = format!(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {COMPANY_COLUMNS}"
    );
    debug!(handle = %data.handle, "inserting company");
    let row = conn
        .query_one(
            &sql,
            &[
                &data.handle,
                &data.name,
                &data.description,
                &data.num_employees,
                &data.logo_url,
            ],
        )
        .await?;
    Company::from_row(&row)
}

/// List companies matching `filter`, ordered by name (handle breaks ties).
pub async fn find_all(
    conn: &impl GenericClient,
    filter: &CompanyFilter,
) -> ModelResult<Vec<Company>> {
    let (sql, values) = build_list(filter)?;
    debug!(sql = %sql, "listing companies");
    let rows = conn.query(&sql, &params_ref(&values)).await?;
    rows.iter().map(Company::from_row).collect()
}

/// Fetch a single company by handle.
pub async fn get(conn: &impl GenericClient, handle: &str) -> ModelResult<Company> {
    let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
    let row = conn
        .query_opt(&sql, &[&handle])
        .await?
        .ok_or_else(|| ModelError::not_found(format!("No company: {handle}")))?;
    Company::from_row(&row)
}

/// Partially update a company; only the fields present in `patch` change.
pub async fn update(
    conn: &impl GenericClient,
    handle: &str,
    patch: Patch<CompanyField>,
) -> ModelResult<Company> {
    let (sql, values) = build_update(handle, patch)?;
    debug!(handle, "updating company");
    let row = conn
        .query_opt(&sql, &params_ref(&values))
        .await?
        .ok_or_else(|| ModelError::not_found(format!("No company: {handle}")))?;
    Company::from_row(&row)
}

/// Delete a company by handle.
pub async fn remove(conn: &impl GenericClient, handle: &str) -> ModelResult<()> {
    let deleted = conn
        .query_opt(
            "DELETE FROM companies WHERE handle = $1 RETURNING handle",
            &[&handle],
        )
        .await?;
    if deleted.is_none() {
        return Err(ModelError::not_found(format!("No company: {handle}")));
    }
    Ok(())
}

fn build_list(filter: &CompanyFilter) -> ModelResult<(String, Vec<Value>)> {
    let clause = filter.build()?;
    let mut sql = format!("SELECT {COMPANY_COLUMNS} FROM companies");
    if !clause.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(clause.text());
    }
    sql.push_str(" ORDER BY name, handle");
    Ok((sql, clause.into_values()))
}

fn build_update(handle: &str, patch: Patch<CompanyField>) -> ModelResult<(String, Vec<Value>)> {
    let set = patch.into_set_clause()?;
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_COLUMNS}",
        set.text(),
        set.len() + 1
    );
    let mut values = set.into_values();
    values.push(Value::from(handle));
    Ok((sql, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_without_criteria_has_no_where_clause() {
        let (sql, values) = build_list(&CompanyFilter::default()).unwrap();
        assert_eq!(
            sql,
            "SELECT handle, name, description, num_employees, logo_url \
             FROM companies ORDER BY name, handle"
        );
        assert!(values.is_empty());
    }

    #[test]
    fn list_with_criteria_appends_predicates() {
        let filter = CompanyFilter {
            name: Some("net".to_owned()),
            min_employees: Some(5),
            max_employees: Some(10),
        };
        let (sql, values) = build_list(&filter).unwrap();
        assert_eq!(
            sql,
            "SELECT handle, name, description, num_employees, logo_url \
             FROM companies \
             WHERE num_employees >= $1 AND num_employees <= $2 AND name ILIKE $3 \
             ORDER BY name, handle"
        );
        assert_eq!(
            values,
            vec![
                Value::Int(5),
                Value::Int(10),
                Value::Text("%net%".to_owned())
            ]
        );
    }

    #[test]
    fn list_rejects_inverted_employee_range() {
        let filter = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(5),
            ..Default::default()
        };
        assert!(build_list(&filter).unwrap_err().is_validation());
    }

    #[test]
    fn update_appends_identifier_after_patch_values() {
        let patch = Patch::new()
            .set(CompanyField::Name, "Anderson LLC")
            .set(CompanyField::NumEmployees, 875);
        let (sql, values) = build_update("anderson-llc", patch).unwrap();
        assert_eq!(
            sql,
            "UPDATE companies SET \"name\"=$1, \"num_employees\"=$2 \
             WHERE handle = $3 \
             RETURNING handle, name, description, num_employees, logo_url"
        );
        assert_eq!(
            values,
            vec![
                Value::Text("Anderson LLC".to_owned()),
                Value::Int(875),
                Value::Text("anderson-llc".to_owned())
            ]
        );
    }

    #[test]
    fn update_with_empty_patch_is_rejected() {
        let err = build_update("anderson-llc", Patch::new()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn company_serializes_to_camel_case() {
        let company = Company {
            handle: "acme".to_owned(),
            name: "Acme".to_owned(),
            description: "Anvils".to_owned(),
            num_employees: Some(12),
            logo_url: None,
        };
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["numEmployees"], 12);
        assert!(json["logoUrl"].is_null());
    }
}
