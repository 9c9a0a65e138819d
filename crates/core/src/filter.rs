//! Conjunctive filter parameters passed through to the data source.
//!
//! The pipeline does not interpret filter semantics; it renders each
//! [`FilterParam`] as `key{op}value` and joins a list with `;` for the
//! query string. Filter meaning is owned entirely by the server.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operator in a server-side filter constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Eq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl FilterOperator {
    /// Wire representation of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
        }
    }
}

/// One equality/comparison constraint, e.g. `areaType=nation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParam {
    pub key: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterParam {
    /// Construct a constraint with an arbitrary operator.
    pub fn new(
        key: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            operator,
            value: value.into(),
        }
    }

    /// Construct an equality constraint (the common case).
    pub fn eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FilterOperator::Eq, value)
    }
}

impl fmt::Display for FilterParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, self.operator.as_str(), self.value)
    }
}

/// Join constraints into the conjunctive (AND) wire form: `a=1;b<2`.
pub fn join_filters(filters: &[FilterParam]) -> String {
    filters
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_key_op_value() {
        let param = FilterParam::eq("areaType", "nation");
        assert_eq!(param.to_string(), "areaType=nation");

        let param = FilterParam::new("date", FilterOperator::Gte, "2020-04-01");
        assert_eq!(param.to_string(), "date>=2020-04-01");
    }

    #[test]
    fn join_is_semicolon_separated() {
        let filters = vec![
            FilterParam::eq("areaType", "nation"),
            FilterParam::eq("areaName", "England"),
        ];
        assert_eq!(join_filters(&filters), "areaType=nation;areaName=England");
    }

    #[test]
    fn join_of_empty_list_is_empty() {
        assert_eq!(join_filters(&[]), "");
    }
}
