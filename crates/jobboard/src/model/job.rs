//! Job storage operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tracing::debug;

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::filter::JobFilter;
use crate::model::company::{self, Company};
use crate::row::{FromRow, RowExt};
use crate::update::{Column, Patch};
use crate::value::{Value, params_ref};

/// Columns selected for every job read.
const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// A job row in its external shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// A listing row joined with the owning company's display name.
///
/// `company_name` is null when the company row is missing; the listing query
/// must not fail on a dangling handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

impl FromRow for JobListing {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
            company_name: row.try_get_column("company_name")?,
        })
    }
}

/// A job with its owning company embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

/// Payload for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Updatable job fields. The owning company is fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Salary,
    Equity,
}

impl Column for JobField {
    fn column(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Salary => "salary",
            JobField::Equity => "equity",
        }
    }
}

/// Create a job. A bad company handle surfaces as
/// [`ModelError::ForeignKeyViolation`].
pub async fn create(conn: &impl GenericClient, data: NewJob) -> ModelResult<Job> {
    let sql = format!(
        "INSERT INTO jobs (title, salary, equity, company_handle) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {JOB_COLUMNS}"
    );
    debug!(title = %data.title, company = %data.company_handle, "inserting job");
    let row = conn
        .query_one(
            &sql,
            &[&data.title, &data.salary, &data.equity, &data.company_handle],
        )
        .await?;
    Job::from_row(&row)
}

/// List jobs matching `filter`, ordered by title (id breaks ties).
pub async fn find_all(conn: &impl GenericClient, filter: &JobFilter) -> ModelResult<Vec<JobListing>> {
    let (sql, values) = build_list(filter);
    debug!(sql = %sql, "listing jobs");
    let rows = conn.query(&sql, &params_ref(&values)).await?;
    rows.iter().map(JobListing::from_row).collect()
}

/// Fetch a single job by id, with its owning company embedded.
pub async fn get(conn: &impl GenericClient, id: i32) -> ModelResult<JobDetail> {
    let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
    let row = conn
        .query_opt(&sql, &[&id])
        .await?
        .ok_or_else(|| ModelError::not_found(format!("No job: {id}")))?;
    let job = Job::from_row(&row)?;

    let company = company::get(conn, &job.company_handle).await?;
    Ok(JobDetail {
        id: job.id,
        title: job.title,
        salary: job.salary,
        equity: job.equity,
        company,
    })
}

/// Partially update a job; only the fields present in `patch` change.
pub async fn update(
    conn: &impl GenericClient,
    id: i32,
    patch: Patch<JobField>,
) -> ModelResult<Job> {
    let (sql, values) = build_update(id, patch)?;
    debug!(id, "updating job");
    let row = conn
        .query_opt(&sql, &params_ref(&values))
        .await?
        .ok_or_else(|| ModelError::not_found(format!("No job: {id}")))?;
    Job::from_row(&row)
}

/// Delete a job by id.
pub async fn remove(conn: &impl GenericClient, id: i32) -> ModelResult<()> {
    let deleted = conn
        .query_opt("DELETE FROM jobs WHERE id = $1 RETURNING id", &[&id])
        .await?;
    if deleted.is_none() {
        return Err(ModelError::not_found(format!("No job: {id}")));
    }
    Ok(())
}

fn build_list(filter: &JobFilter) -> (String, Vec<Value>) {
    let clause = filter.build();
    let mut sql = String::from(
        "SELECT jobs.id, jobs.title, jobs.salary, jobs.equity, jobs.company_handle, \
         companies.name AS company_name \
         FROM jobs LEFT JOIN companies ON companies.handle = jobs.company_handle",
    );
    if !clause.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(clause.text());
    }
    sql.push_str(" ORDER BY jobs.title, jobs.id");
    (sql, clause.into_values())
}

fn build_update(id: i32, patch: Patch<JobField>) -> ModelResult<(String, Vec<Value>)> {
    let set = patch.into_set_clause()?;
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
        set.text(),
        set.len() + 1
    );
    let mut values = set.into_values();
    values.push(Value::from(id));
    Ok((sql, values))
}
