//! Filter and sort criteria, and their translation into SQL.
//!
//! RULE: filter values are always bound as statement parameters.
//! The only identifiers that reach generated SQL are `Property::column()`
//! names and the fixed operator/orientation tokens.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::{
    error::{LedgerError, LedgerResult},
    types::RecordKind,
};

// ── Vocabulary ─────────────────────────────────────────────────────

/// Record fields that may be filtered or sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Date,
    Title,
    Amount,
    Category,
}

impl Property {
    pub fn column(self) -> &'static str {
        match self {
            Property::Date     => "date",
            Property::Title    => "title",
            Property::Amount   => "amount",
            Property::Category => "category",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Property::Amount)
    }
}

impl FromStr for Property {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date"     => Ok(Property::Date),
            "title"    => Ok(Property::Title),
            "amount"   => Ok(Property::Amount),
            "category" => Ok(Property::Category),
            other => Err(LedgerError::UnsupportedProperty { value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Is,
    IsExactly,
    MoreThan,
    LessThan,
}

/// How a filter value is turned into a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamTransform {
    Raw,
    /// `%value%`, except on numeric columns where the raw value is bound.
    Contains,
}

impl Operator {
    /// SQL token and parameter transform for each operator.
    fn mapping(self) -> (&'static str, ParamTransform) {
        match self {
            Operator::Is        => ("LIKE", ParamTransform::Contains),
            Operator::IsExactly => ("=",    ParamTransform::Raw),
            Operator::MoreThan  => (">",    ParamTransform::Raw),
            Operator::LessThan  => ("<",    ParamTransform::Raw),
        }
    }

    pub fn token(self) -> &'static str {
        self.mapping().0
    }
}

impl FromStr for Operator {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Is"        => Ok(Operator::Is),
            "IsExactly" => Ok(Operator::IsExactly),
            "MoreThan"  => Ok(Operator::MoreThan),
            "LessThan"  => Ok(Operator::LessThan),
            other => Err(LedgerError::UnsupportedOperator { value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Asc,
    Desc,
}

impl Orientation {
    pub fn token(self) -> &'static str {
        match self {
            Orientation::Asc  => "ASC",
            Orientation::Desc => "DESC",
        }
    }
}

impl FromStr for Orientation {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Asc"  => Ok(Orientation::Asc),
            "Desc" => Ok(Orientation::Desc),
            other => Err(LedgerError::UnsupportedOperator { value: other.to_string() }),
        }
    }
}

// ── Filters and sorts ──────────────────────────────────────────────

/// A filter operand as supplied by the UI: either free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl FilterValue {
    fn bind(&self, property: Property, transform: ParamTransform) -> Value {
        match (transform, self) {
            (ParamTransform::Contains, _) if !property.is_numeric() => {
                Value::Text(format!("%{self}%"))
            }
            (_, FilterValue::Number(n)) => Value::Real(*n),
            (_, FilterValue::Text(s))   => Value::Text(s.clone()),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Text(s)   => f.write_str(s),
        }
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub property: Property,
    pub operator: Operator,
    pub value:    FilterValue,
}

impl Filter {
    pub fn new(property: Property, operator: Operator, value: impl Into<FilterValue>) -> Self {
        Self { property, operator, value: value.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub property:    Property,
    pub orientation: Orientation,
}

impl Sort {
    pub fn new(property: Property, orientation: Orientation) -> Self {
        Self { property, orientation }
    }
}

// ── Wire form ──────────────────────────────────────────────────────

/// A filter as it arrives over the message boundary, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFilter {
    pub property: String,
    pub operator: String,
    pub value:    FilterValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSort {
    pub property:    String,
    pub orientation: String,
}

impl TryFrom<RawFilter> for Filter {
    type Error = LedgerError;

    fn try_from(raw: RawFilter) -> LedgerResult<Self> {
        let operator = raw.operator.parse()?;
        let property = raw.property.parse()?;
        Ok(Filter { property, operator, value: raw.value })
    }
}

impl TryFrom<RawSort> for Sort {
    type Error = LedgerError;

    fn try_from(raw: RawSort) -> LedgerResult<Self> {
        let orientation = raw.orientation.parse()?;
        let property = raw.property.parse()?;
        Ok(Sort { property, orientation })
    }
}

/// Validate wire criteria. Fails on the first unknown operator, orientation
/// or property; nothing is built or executed in that case.
pub fn parse_criteria(
    filters: Vec<RawFilter>,
    sorts: Vec<RawSort>,
) -> LedgerResult<(Vec<Filter>, Vec<Sort>)> {
    let filters = filters
        .into_iter()
        .map(Filter::try_from)
        .collect::<LedgerResult<Vec<_>>>()?;
    let sorts = sorts
        .into_iter()
        .map(Sort::try_from)
        .collect::<LedgerResult<Vec<_>>>()?;
    Ok((filters, sorts))
}

// ── Translation ────────────────────────────────────────────────────

/// SQL text plus its positional parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFragment {
    pub clause: String,
    pub params: Vec<Value>,
}

/// Build the optional ` WHERE ...` and ` ORDER BY ...` suffix.
pub fn translate(filters: &[Filter], sorts: &[Sort]) -> QueryFragment {
    let mut clause = String::new();
    let mut params = Vec::with_capacity(filters.len());

    if !filters.is_empty() {
        let conditions: Vec<String> = filters
            .iter()
            .map(|filter| {
                let (token, transform) = filter.operator.mapping();
                params.push(filter.value.bind(filter.property, transform));
                format!("{} {} ?", filter.property.column(), token)
            })
            .collect();
        clause.push_str(" WHERE ");
        clause.push_str(&conditions.join(" AND "));
    }

    if !sorts.is_empty() {
        let keys: Vec<String> = sorts
            .iter()
            .map(|sort| format!("{} {}", sort.property.column(), sort.orientation.token()))
            .collect();
        clause.push_str(" ORDER BY ");
        clause.push_str(&keys.join(", "));
    }

    QueryFragment { clause, params }
}

/// Full SELECT over one collection with the translated criteria appended.
pub fn select_statement(kind: RecordKind, filters: &[Filter], sorts: &[Sort]) -> QueryFragment {
    let fragment = translate(filters, sorts);
    QueryFragment {
        clause: format!(
            "SELECT id, date, title, amount, category FROM {}{}",
            kind.table(),
            fragment.clause
        ),
        params: fragment.params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_produce_empty_fragment() {
        let fragment = translate(&[], &[]);
        assert_eq!(fragment.clause, "");
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn is_on_text_property_wraps_value() {
        let fragment = translate(&[Filter::new(Property::Title, Operator::Is, "Grocer")], &[]);
        assert_eq!(fragment.clause, " WHERE title LIKE ?");
        assert_eq!(fragment.params, vec![Value::Text("%Grocer%".into())]);
    }

    #[test]
    fn is_on_text_property_wraps_numeric_value_as_text() {
        let fragment = translate(&[Filter::new(Property::Category, Operator::Is, 7.0)], &[]);
        assert_eq!(fragment.params, vec![Value::Text("%7%".into())]);
    }

    #[test]
    fn is_on_amount_binds_raw_value() {
        let fragment = translate(&[Filter::new(Property::Amount, Operator::Is, 42.5)], &[]);
        assert_eq!(fragment.clause, " WHERE amount LIKE ?");
        assert_eq!(fragment.params, vec![Value::Real(42.5)]);
    }

    #[test]
    fn filters_join_with_and_and_keep_param_order() {
        let filters = vec![
            Filter::new(Property::Category, Operator::IsExactly, "Food"),
            Filter::new(Property::Amount, Operator::MoreThan, 10.0),
            Filter::new(Property::Date, Operator::LessThan, "2024-06-01"),
        ];
        let fragment = translate(&filters, &[]);
        assert_eq!(
            fragment.clause,
            " WHERE category = ? AND amount > ? AND date < ?"
        );
        assert_eq!(
            fragment.params,
            vec![
                Value::Text("Food".into()),
                Value::Real(10.0),
                Value::Text("2024-06-01".into()),
            ]
        );
    }

    #[test]
    fn sorts_follow_filters_in_priority_order() {
        let filters = vec![Filter::new(Property::Title, Operator::IsExactly, "Rent")];
        let sorts = vec![
            Sort::new(Property::Date, Orientation::Desc),
            Sort::new(Property::Amount, Orientation::Asc),
        ];
        let fragment = translate(&filters, &sorts);
        assert_eq!(
            fragment.clause,
            " WHERE title = ? ORDER BY date DESC, amount ASC"
        );
    }

    #[test]
    fn select_statement_targets_kind_table() {
        let sorts = vec![Sort::new(Property::Category, Orientation::Asc)];
        let stmt = select_statement(RecordKind::Debit, &[], &sorts);
        assert_eq!(
            stmt.clause,
            "SELECT id, date, title, amount, category FROM debits ORDER BY category ASC"
        );
        let stmt = select_statement(RecordKind::Credit, &[], &[]);
        assert_eq!(stmt.clause, "SELECT id, date, title, amount, category FROM credits");
    }

    #[test]
    fn operator_tokens_match_table() {
        assert_eq!(Operator::Is.token(), "LIKE");
        assert_eq!(Operator::IsExactly.token(), "=");
        assert_eq!(Operator::MoreThan.token(), ">");
        assert_eq!(Operator::LessThan.token(), "<");
        assert_eq!(Orientation::Asc.token(), "ASC");
        assert_eq!(Orientation::Desc.token(), "DESC");
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let raw = RawFilter {
            property: "title".into(),
            operator: "Contains".into(),
            value:    "x".into(),
        };
        let err = Filter::try_from(raw).unwrap_err();
        assert!(matches!(err, LedgerError::UnsupportedOperator { ref value } if value == "Contains"));
    }

    #[test]
    fn unknown_orientation_is_rejected_as_operator() {
        let raw = RawSort { property: "date".into(), orientation: "Sideways".into() };
        let err = Sort::try_from(raw).unwrap_err();
        assert!(matches!(err, LedgerError::UnsupportedOperator { ref value } if value == "Sideways"));
    }

    #[test]
    fn unknown_property_is_rejected() {
        let raw = RawSort { property: "id; DROP TABLE credits".into(), orientation: "Asc".into() };
        let err = Sort::try_from(raw).unwrap_err();
        assert!(matches!(err, LedgerError::UnsupportedProperty { .. }));
    }

    #[test]
    fn parse_criteria_fails_closed_on_any_bad_entry() {
        let filters = vec![
            RawFilter { property: "title".into(), operator: "Is".into(), value: "a".into() },
            RawFilter { property: "title".into(), operator: "Like".into(), value: "b".into() },
        ];
        assert!(parse_criteria(filters, vec![]).is_err());
    }

    #[test]
    fn raw_filter_value_accepts_text_or_number() {
        let raw: RawFilter = serde_json::from_str(
            r#"{"property":"amount","operator":"MoreThan","value":12.5}"#,
        )
        .unwrap();
        assert_eq!(raw.value, FilterValue::Number(12.5));

        let raw: RawFilter = serde_json::from_str(
            r#"{"property":"title","operator":"Is","value":"Rent"}"#,
        )
        .unwrap();
        assert_eq!(raw.value, FilterValue::Text("Rent".into()));
    }
}
