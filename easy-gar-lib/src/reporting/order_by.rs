use super::request::OrderByFragment;
use super::{Dimension, MetricExpr};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How the remote API ranks rows for an ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    #[default]
    Value,
    Delta,
    Smart,
    HistogramBucket,
    DimensionAsInteger,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    #[strum(to_string = "ASCENDING", serialize = "asc")]
    Ascending,
    #[strum(to_string = "DESCENDING", serialize = "desc")]
    Descending,
}

/// One sort key of a report.
///
/// The field reference must match a metric expression, metric alias, or
/// dimension name in the same request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderBy {
    field_name: String,
    order_type: OrderType,
    sort_order: SortOrder,
}

impl OrderBy {
    /// Order by value, ascending.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            order_type: OrderType::default(),
            sort_order: SortOrder::default(),
        }
    }

    #[must_use]
    pub fn metric(metric: &MetricExpr) -> Self {
        Self::new(metric.expression())
    }

    #[must_use]
    pub fn dimension(dimension: &Dimension) -> Self {
        Self::new(dimension.name())
    }

    #[must_use]
    pub const fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub const fn descending(self) -> Self {
        self.with_sort_order(SortOrder::Descending)
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// The wire fragment placed in a request's ordering list.
    #[must_use]
    pub fn request_fragment(&self) -> OrderByFragment {
        OrderByFragment {
            field_name: self.field_name.clone(),
            order_type: self.order_type,
            sort_order: self.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let order = OrderBy::new("ga:sessions");
        assert_eq!(order.order_type(), OrderType::Value);
        assert_eq!(order.sort_order(), SortOrder::Ascending);
    }

    #[test]
    fn test_fragment() {
        let order = OrderBy::new("ga:sessions").with_order_type(OrderType::Delta).descending();
        let json = serde_json::to_value(order.request_fragment()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "fieldName": "ga:sessions", "orderType": "DELTA", "sortOrder": "DESCENDING" })
        );
    }

    #[test]
    fn test_from_metric_and_dimension() {
        let metric = MetricExpr::new("ga:users", "Users", None);
        assert_eq!(OrderBy::metric(&metric).field_name(), "ga:users");
        assert_eq!(OrderBy::dimension(&Dimension::date()).field_name(), "ga:date");
    }

    #[test]
    fn test_parse_sort_order_shorthand() {
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("descending".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_parse_order_type() {
        assert_eq!("histogram_bucket".parse::<OrderType>().unwrap(), OrderType::HistogramBucket);
        assert_eq!(OrderType::DimensionAsInteger.to_string(), "DIMENSION_AS_INTEGER");
    }
}
