//! Composite views and operation inputs.
//!
//! Views are assembled from one or two queries and never persisted.

use chrono::NaiveDate;
use models::{company, invoice};
use sea_orm::FromQueryResult;
use serde::Serialize;

/// Literal returned by both delete operations.
pub const DELETED_STATUS: &str = "deleted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub status: &'static str,
}

impl Deleted {
    pub fn new() -> Self { Self { status: DELETED_STATUS } }
}

impl Default for Deleted {
    fn default() -> Self { Self::new() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

/// Invoice as embedded in a company detail; `comp_code` is implied by the parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

impl From<invoice::Model> for InvoiceLine {
    fn from(m: invoice::Model) -> Self {
        Self { id: m.id, amt: m.amt, paid: m.paid, add_date: m.add_date, paid_date: m.paid_date }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<InvoiceLine>,
}

impl CompanyDetail {
    pub fn new(company: company::Model, invoices: Vec<invoice::Model>) -> Self {
        Self {
            code: company.code,
            name: company.name,
            description: company.description,
            invoices: invoices.into_iter().map(InvoiceLine::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    /// Absent when the join finds no company row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<company::Model>,
}

impl InvoiceDetail {
    pub fn new(inv: invoice::Model, company: Option<company::Model>) -> Self {
        Self {
            id: inv.id,
            comp_code: inv.comp_code,
            amt: inv.amt,
            paid: inv.paid,
            add_date: inv.add_date,
            paid_date: inv.paid_date,
            company,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Replacement values for the mutable company columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyChanges {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
}

/// `amt` is always replaced. `paid` and `paid_date` are replaced only when
/// present; `paid_date: Some(None)` clears the date. The two are never
/// reconciled with each other.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvoiceUpdate {
    pub amt: f64,
    pub paid: Option<bool>,
    pub paid_date: Option<Option<NaiveDate>>,
}

impl InvoiceUpdate {
    pub fn amount(amt: f64) -> Self {
        Self { amt, ..Self::default() }
    }

    pub fn apply(&self, mut current: invoice::Model) -> invoice::Model {
        current.amt = self.amt;
        if let Some(paid) = self.paid {
            current.paid = paid;
        }
        if let Some(paid_date) = self.paid_date {
            current.paid_date = paid_date;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> invoice::Model {
        invoice::Model {
            id: 3,
            comp_code: "acme".into(),
            amt: 100.0,
            paid: false,
            add_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            paid_date: None,
        }
    }

    #[test]
    fn amount_only_update_keeps_other_columns() {
        let next = InvoiceUpdate::amount(75.0).apply(row());
        assert_eq!(next.amt, 75.0);
        assert!(!next.paid);
        assert_eq!(next.comp_code, "acme");
        assert_eq!(next.add_date, row().add_date);
    }

    #[test]
    fn paid_flag_and_date_are_independent() {
        let upd = InvoiceUpdate { amt: 100.0, paid: Some(true), paid_date: None };
        let next = upd.apply(row());
        assert!(next.paid);
        assert!(next.paid_date.is_none());
    }

    #[test]
    fn detail_omits_missing_company() {
        let v = serde_json::to_value(InvoiceDetail::new(row(), None)).unwrap();
        assert!(v.get("company").is_none());
        assert_eq!(v["add_date"], "2024-01-02");
    }

    #[test]
    fn company_detail_lines_drop_comp_code() {
        let c = company::Model { code: "acme".into(), name: "Acme Corp".into(), description: None };
        let v = serde_json::to_value(CompanyDetail::new(c, vec![row()])).unwrap();
        assert_eq!(v["invoices"][0]["id"], 3);
        assert!(v["invoices"][0].get("comp_code").is_none());
    }

    #[test]
    fn deleted_marker_literal() {
        assert_eq!(Deleted::new().status, "deleted");
    }
}
