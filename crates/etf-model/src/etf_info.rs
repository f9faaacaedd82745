use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key facts scraped from one ETF page.
///
/// Every field is free-form text exactly as it appears on the page.
/// A field that was not found on the page stays an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EtfInfo {
    pub title: String,
    pub replication: String,
    pub earnings: String,
    pub total_expense_ratio: String,
    pub tracking_difference: String,
    pub fund_size: String,
}

/// One of the five descriptive attributes read from a labelled description block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescField {
    Replication,
    TotalExpenseRatio,
    TrackingDifference,
    Earnings,
    FundSize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown description label: {0:?}")]
    UnknownLabel(String),
}

impl DescField {
    pub const ALL: [DescField; 5] = [
        DescField::Replication,
        DescField::Earnings,
        DescField::TotalExpenseRatio,
        DescField::TrackingDifference,
        DescField::FundSize,
    ];

    /// Map a (trimmed) page label to its field. Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Replication" => Some(DescField::Replication),
            "TER" => Some(DescField::TotalExpenseRatio),
            "TD" => Some(DescField::TrackingDifference),
            "Earnings" => Some(DescField::Earnings),
            "Fund size" => Some(DescField::FundSize),
            _ => None,
        }
    }

    /// The label as printed on the page.
    pub fn label(self) -> &'static str {
        match self {
            DescField::Replication => "Replication",
            DescField::TotalExpenseRatio => "TER",
            DescField::TrackingDifference => "TD",
            DescField::Earnings => "Earnings",
            DescField::FundSize => "Fund size",
        }
    }
}

impl FromStr for DescField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DescField::from_label(s).ok_or_else(|| ModelError::UnknownLabel(s.to_string()))
    }
}

impl fmt::Display for DescField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl EtfInfo {
    /// Overwrite one descriptive field. Later writes replace earlier ones.
    pub fn set_field(&mut self, field: DescField, value: String) {
        let slot = match field {
            DescField::Replication => &mut self.replication,
            DescField::TotalExpenseRatio => &mut self.total_expense_ratio,
            DescField::TrackingDifference => &mut self.tracking_difference,
            DescField::Earnings => &mut self.earnings,
            DescField::FundSize => &mut self.fund_size,
        };
        *slot = value;
    }

    pub fn field(&self, field: DescField) -> &str {
        match field {
            DescField::Replication => &self.replication,
            DescField::TotalExpenseRatio => &self.total_expense_ratio,
            DescField::TrackingDifference => &self.tracking_difference,
            DescField::Earnings => &self.earnings,
            DescField::FundSize => &self.fund_size,
        }
    }

    /// Number of non-empty fields, title included.
    pub fn filled_fields(&self) -> usize {
        let title = usize::from(!self.title.is_empty());
        title
            + DescField::ALL
                .iter()
                .filter(|f| !self.field(**f).is_empty())
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_fields() == 0
    }
}
