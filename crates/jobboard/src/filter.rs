//! Listing filter criteria and `WHERE` clause building.
//!
//! Each filter is a typed record of optional fields; absent fields contribute
//! no predicate. Builders return a [`Fragment`] whose text may be empty, in
//! which case the caller omits the `WHERE` clause entirely.

use serde::Deserialize;

use crate::error::{ModelError, ModelResult};
use crate::fragment::{Fragment, FragmentBuilder};

/// Optional company listing criteria.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on the company name.
    pub name: Option<String>,
    /// Companies with at least this many employees.
    pub min_employees: Option<i32>,
    /// Companies with no more than this many employees.
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Build the AND-ed `WHERE` predicates for this filter.
    ///
    /// Fails with [`ModelError::Validation`] when both bounds are present and
    /// inverted, before any predicate is emitted.
    pub fn build(&self) -> ModelResult<Fragment> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(ModelError::validation(
                    "minEmployees must be <= maxEmployees",
                ));
            }
        }

        let mut predicates = FragmentBuilder::new();
        if let Some(min) = self.min_employees {
            predicates.push("num_employees >= ", min);
        }
        if let Some(max) = self.max_employees {
            predicates.push("num_employees <= ", max);
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            predicates.push("name ILIKE ", format!("%{name}%"));
        }
        Ok(predicates.join(" AND "))
    }
}

/// Optional job listing criteria.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct JobFilter {
    /// Case-insensitive substring match on the job title.
    pub title: Option<String>,
    /// Jobs paying at least this salary.
    pub min_salary: Option<i32>,
    /// When true, only jobs with a non-zero equity share.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Build the AND-ed `WHERE` predicates for this filter.
    ///
    /// Equity filtering is opt-in: `has_equity` false or absent adds no
    /// predicate, so zero-equity jobs stay listed.
    pub fn build(&self) -> Fragment {
        let mut predicates = FragmentBuilder::new();
        if let Some(min) = self.min_salary {
            predicates.push("salary >= ", min);
        }
        if self.has_equity == Some(true) {
            predicates.push_raw("equity > 0");
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            predicates.push("title ILIKE ", format!("%{title}%"));
        }
        predicates.join(" AND ")
    }
}
