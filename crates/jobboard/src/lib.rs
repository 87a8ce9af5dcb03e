//! # jobboard
//!
//! A PostgreSQL model layer for a job-board backend: companies, jobs, and
//! users, with injection-safe dynamic SQL building.
//!
//! ## Features
//!
//! - **Parameterized fragments**: partial-update `SET` clauses and listing
//!   `WHERE` clauses are built as SQL text plus an ordered value list; user
//!   input never lands in the text
//! - **Closed field sets**: patches address columns through per-entity field
//!   enums, so only pre-approved columns are reachable
//! - **Typed filters**: listing criteria are records of optional fields;
//!   absent fields add no predicate
//! - **Transaction-friendly**: every repository function accepts anything
//!   implementing [`GenericClient`]
//!
//! ## Example
//!
//! ```ignore
//! use jobboard::model::company::{self, CompanyField};
//! use jobboard::{CompanyFilter, Patch};
//!
//! // GET /companies?name=net&minEmployees=10
//! let companies = company::find_all(
//!     &client,
//!     &CompanyFilter {
//!         name: Some("net".into()),
//!         min_employees: Some(10),
//!         ..Default::default()
//!     },
//! )
//! .await?;
//!
//! // PATCH /companies/anderson-llc
//! let patch = Patch::new().set(CompanyField::NumEmployees, 875);
//! let updated = company::update(&client, "anderson-llc", patch).await?;
//! ```

pub mod client;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod model;
pub mod row;
pub mod update;
pub mod value;

pub use client::GenericClient;
pub use error::{ModelError, ModelResult};
pub use filter::{CompanyFilter, JobFilter};
pub use fragment::Fragment;
pub use row::{FromRow, RowExt};
pub use update::{Column, Patch};
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
