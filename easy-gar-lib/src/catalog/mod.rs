//! The catalog of named metrics and dimensions.
//!
//! The remote API identifies fields by namespaced wire names such as
//! `ga:sessions`. The catalog maps short snake_case keys to those names plus a
//! display alias and, for metrics, a formatting hint.
//!
//! # Implementation Model
//!
//! Built-in entries live in two static tables (`metric_defs.rs` and
//! `dimension_defs.rs`); the per-goal metrics are expanded from a template
//! for each of the twenty goal slots. [`Catalog::builtin`] builds the
//! registry once per process. [`Catalog::with_custom`] derives a new registry
//! with entries from the configuration file layered on top; a custom key
//! replaces the built-in entry of the same key.
//!
//! [`Catalog::resolve_metric`] also understands arithmetic over keys, so
//! `pageviews/sessions` yields the derived metric `(ga:pageviews)/(ga:sessions)`.

mod category;
mod dimension_defs;
mod metric_defs;

pub use category::{DimensionCategory, MetricCategory};

use crate::Result;
use crate::reporting::{Dimension, FormattingType, MetricExpr, Operator};
use dimension_defs::DIMENSION_DEFINITIONS;
use metric_defs::{GOAL_COUNT, GOAL_METRIC_TEMPLATES, METRIC_DEFINITIONS};
use ohno::{app_err, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Prefix of the remote API's wire names; such names bypass the catalog.
const WIRE_PREFIX: &str = "ga:";

static BUILTIN: LazyLock<Catalog> = LazyLock::new(Catalog::build_builtin);

/// A metric declared in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomMetric {
    pub key: String,
    pub expression: String,

    #[serde(default)]
    pub alias: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatting_type: Option<FormattingType>,
}

/// A dimension declared in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomDimension {
    pub key: String,
    pub name: String,

    #[serde(default)]
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricEntry {
    pub key: String,
    pub category: MetricCategory,
    pub metric: MetricExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionEntry {
    pub key: String,
    pub category: DimensionCategory,
    pub dimension: Dimension,
}

/// Read-only registry of named metrics and dimensions.
#[derive(Debug, Clone)]
pub struct Catalog {
    metrics: Vec<MetricEntry>,
    dimensions: Vec<DimensionEntry>,
    metric_index: HashMap<String, usize>,
    dimension_index: HashMap<String, usize>,
}

impl Catalog {
    /// The built-in registry, constructed on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    fn build_builtin() -> Self {
        let mut metrics: Vec<_> = METRIC_DEFINITIONS
            .iter()
            .map(|def| MetricEntry {
                key: def.key.to_string(),
                category: def.category,
                metric: MetricExpr::new(def.expression, def.alias, Some(def.formatting_type)),
            })
            .collect();

        for goal in 1..=GOAL_COUNT {
            for (key, wire, alias, formatting_type) in GOAL_METRIC_TEMPLATES {
                metrics.push(MetricEntry {
                    key: format!("goal{goal:02}_{key}"),
                    category: MetricCategory::GoalConversions,
                    metric: MetricExpr::new(format!("ga:goal{goal}{wire}"), format!("Goal {goal:02} {alias}"), Some(*formatting_type)),
                });
            }
        }

        // stable, so the all-goals entries stay ahead of the per-goal ones
        metrics.sort_by_key(|e| e.category);

        let dimensions = DIMENSION_DEFINITIONS
            .iter()
            .map(|def| DimensionEntry {
                key: def.key.to_string(),
                category: def.category,
                dimension: Dimension::new(def.name, def.alias),
            })
            .collect();

        Self::from_entries(metrics, dimensions)
    }

    fn from_entries(metrics: Vec<MetricEntry>, dimensions: Vec<DimensionEntry>) -> Self {
        let metric_index = metrics.iter().enumerate().map(|(i, e)| (e.key.clone(), i)).collect();
        let dimension_index = dimensions.iter().enumerate().map(|(i, e)| (e.key.clone(), i)).collect();

        Self {
            metrics,
            dimensions,
            metric_index,
            dimension_index,
        }
    }

    /// A registry with `metrics` and `dimensions` layered over this one.
    ///
    /// A custom entry whose key already exists replaces that entry in place;
    /// new keys are appended under the `Custom` category.
    #[must_use]
    pub fn with_custom(&self, metrics: &[CustomMetric], dimensions: &[CustomDimension]) -> Self {
        let mut metric_entries = self.metrics.clone();
        let mut metric_index = self.metric_index.clone();

        for custom in metrics {
            let metric = MetricExpr::new(custom.expression.as_str(), custom.alias.as_str(), custom.formatting_type);
            if let Some(&i) = metric_index.get(&custom.key) {
                metric_entries[i].metric = metric;
            } else {
                let _ = metric_index.insert(custom.key.clone(), metric_entries.len());
                metric_entries.push(MetricEntry {
                    key: custom.key.clone(),
                    category: MetricCategory::Custom,
                    metric,
                });
            }
        }

        let mut dimension_entries = self.dimensions.clone();
        let mut dimension_index = self.dimension_index.clone();

        for custom in dimensions {
            let dimension = Dimension::new(custom.name.as_str(), custom.alias.as_str());
            if let Some(&i) = dimension_index.get(&custom.key) {
                dimension_entries[i].dimension = dimension;
            } else {
                let _ = dimension_index.insert(custom.key.clone(), dimension_entries.len());
                dimension_entries.push(DimensionEntry {
                    key: custom.key.clone(),
                    category: DimensionCategory::Custom,
                    dimension,
                });
            }
        }

        Self {
            metrics: metric_entries,
            dimensions: dimension_entries,
            metric_index,
            dimension_index,
        }
    }

    #[must_use]
    pub fn metric(&self, key: &str) -> Option<MetricExpr> {
        self.metric_index.get(key).map(|&i| self.metrics[i].metric.clone())
    }

    #[must_use]
    pub fn dimension(&self, key: &str) -> Option<Dimension> {
        self.dimension_index.get(key).map(|&i| self.dimensions[i].dimension.clone())
    }

    /// All metric entries, grouped by category in declaration order.
    pub fn metrics(&self) -> impl Iterator<Item = &MetricEntry> {
        self.metrics.iter()
    }

    /// All dimension entries, grouped by category in declaration order.
    pub fn dimensions(&self) -> impl Iterator<Item = &DimensionEntry> {
        self.dimensions.iter()
    }

    /// The first entry, if any, that represents the `ga:` wire name `expression`.
    #[must_use]
    pub fn metric_by_expression(&self, expression: &str) -> Option<&MetricEntry> {
        self.metrics.iter().find(|e| e.metric.expression() == expression)
    }

    /// Resolve a metric spec into a metric expression.
    ///
    /// A spec is a catalog key or a `ga:` wire name, or several of them joined
    /// by `+`, `-`, `*` and `/`. Operators apply strictly left to right.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec has an empty operand or names an unknown key.
    pub fn resolve_metric(&self, spec: &str) -> Result<MetricExpr> {
        let mut result: Option<MetricExpr> = None;
        let mut pending_op: Option<Operator> = None;
        let mut operand_start = 0;

        for (i, c) in spec.char_indices().chain(core::iter::once((spec.len(), '\0'))) {
            let op = Operator::from_symbol(c);
            if op.is_none() && i < spec.len() {
                continue;
            }

            let Some(token) = spec.get(operand_start..i) else {
                bail!("invalid metric '{spec}'");
            };
            let operand = self.resolve_metric_operand(token.trim(), spec)?;

            result = Some(match (result, pending_op) {
                (Some(lhs), Some(op)) => lhs.compose(&operand, op),
                _ => operand,
            });

            pending_op = op;
            operand_start = i + c.len_utf8();
        }

        result.ok_or_else(|| app_err!("invalid metric '{spec}'"))
    }

    fn resolve_metric_operand(&self, token: &str, spec: &str) -> Result<MetricExpr> {
        if token.is_empty() {
            bail!("invalid metric '{spec}': missing operand");
        }

        if token.starts_with(WIRE_PREFIX) {
            return Ok(self
                .metric_by_expression(token)
                .map_or_else(|| MetricExpr::from_expression(token), |e| e.metric.clone()));
        }

        match self.metric(token) {
            Some(metric) => Ok(metric),
            None => bail!("unknown metric '{token}'; use the `metrics` command to list the available keys"),
        }
    }

    /// Resolve a dimension spec into a dimension descriptor.
    ///
    /// A spec is a catalog key or a `ga:` wire name, optionally followed by
    /// histogram bucket boundaries in brackets, as in `session_count[1,5,10]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the buckets don't parse.
    pub fn resolve_dimension(&self, spec: &str) -> Result<Dimension> {
        let spec = spec.trim();

        let (key, buckets) = match spec.split_once('[') {
            Some((key, rest)) => {
                let Some(inner) = rest.strip_suffix(']') else {
                    bail!("invalid dimension '{spec}': missing closing ']'");
                };

                let mut buckets = Vec::new();
                for part in inner.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                    match part.parse::<i64>() {
                        Ok(b) => buckets.push(b),
                        Err(_) => bail!("invalid histogram bucket '{part}' in dimension '{spec}'"),
                    }
                }

                (key.trim(), buckets)
            }
            None => (spec, Vec::new()),
        };

        let dimension = if key.starts_with(WIRE_PREFIX) {
            self.dimensions
                .iter()
                .find(|e| e.dimension.name() == key)
                .map_or_else(|| Dimension::new(key, ""), |e| e.dimension.clone())
        } else {
            match self.dimension(key) {
                Some(d) => d,
                None => bail!("unknown dimension '{key}'; use the `dimensions` command to list the available keys"),
            }
        };

        Ok(if buckets.is_empty() {
            dimension
        } else {
            dimension.with_histogram_buckets(buckets)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_lookups() {
        let catalog = Catalog::builtin();

        let sessions = catalog.metric("sessions").unwrap();
        assert_eq!(sessions.expression(), "ga:sessions");
        assert_eq!(sessions.alias(), Some("Sessions"));
        assert_eq!(sessions.formatting_type(), Some(FormattingType::Integer));

        let date = catalog.dimension("date").unwrap();
        assert_eq!(date, Dimension::date());
        assert_eq!(date.display_name(), "Date");

        assert!(catalog.metric("no_such_metric").is_none());
        assert!(catalog.dimension("sessions").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let catalog = Catalog::builtin();

        let metric_keys: HashSet<_> = catalog.metrics().map(|e| e.key.as_str()).collect();
        assert_eq!(metric_keys.len(), catalog.metrics().count());

        let dimension_keys: HashSet<_> = catalog.dimensions().map(|e| e.key.as_str()).collect();
        assert_eq!(dimension_keys.len(), catalog.dimensions().count());
    }

    #[test]
    fn test_goal_templates_expanded() {
        let catalog = Catalog::builtin();

        let m = catalog.metric("goal07_conversion_rate").unwrap();
        assert_eq!(m.expression(), "ga:goal7ConversionRate");
        assert_eq!(m.alias(), Some("Goal 07 Conversion Rate"));
        assert_eq!(m.formatting_type(), Some(FormattingType::Percent));

        assert!(catalog.metric("goal20_abandons").is_some());
        assert!(catalog.metric("goal21_abandons").is_none());

        let goals = catalog.metrics().filter(|e| e.category == MetricCategory::GoalConversions).count();
        assert_eq!(goals, 7 + GOAL_METRIC_TEMPLATES.len() * 20);
    }

    #[test]
    fn test_metrics_grouped_by_category() {
        let categories: Vec<_> = Catalog::builtin().metrics().map(|e| e.category).collect();
        assert!(categories.is_sorted());
        assert_eq!(categories.first(), Some(&MetricCategory::Users));
        assert_eq!(categories.last(), Some(&MetricCategory::PageTracking));

        let first_goal = Catalog::builtin()
            .metrics()
            .find(|e| e.category == MetricCategory::GoalConversions)
            .unwrap();
        assert_eq!(first_goal.key, "goal_starts_all");
    }

    #[test]
    fn test_custom_entries_shadow_and_append() {
        let catalog = Catalog::builtin().with_custom(
            &[
                CustomMetric {
                    key: "sessions".into(),
                    expression: "ga:sessions".into(),
                    alias: "Visits".into(),
                    formatting_type: None,
                },
                CustomMetric {
                    key: "signups".into(),
                    expression: "ga:goal3Completions".into(),
                    alias: "Signups".into(),
                    formatting_type: Some(FormattingType::Integer),
                },
            ],
            &[CustomDimension {
                key: "plan".into(),
                name: "ga:dimension1".into(),
                alias: "Plan".into(),
            }],
        );

        assert_eq!(catalog.metric("sessions").unwrap().alias(), Some("Visits"));
        assert_eq!(catalog.metric("signups").unwrap().expression(), "ga:goal3Completions");
        assert_eq!(catalog.dimension("plan").unwrap().name(), "ga:dimension1");
        assert_eq!(catalog.metrics().last().map(|e| e.category), Some(MetricCategory::Custom));
        assert_eq!(catalog.metrics().count(), Catalog::builtin().metrics().count() + 1);

        // the shared registry is untouched
        assert_eq!(Catalog::builtin().metric("sessions").unwrap().alias(), Some("Sessions"));
    }

    #[test]
    fn test_resolve_single_key() {
        let m = Catalog::builtin().resolve_metric(" bounce_rate ").unwrap();
        assert_eq!(m.expression(), "ga:bounceRate");
    }

    #[test]
    fn test_resolve_expression_left_to_right() {
        let m = Catalog::builtin().resolve_metric("pageviews+entrances/sessions").unwrap();
        assert_eq!(m.expression(), "((ga:pageviews)+(ga:entrances))/(ga:sessions)");
        assert_eq!(m.alias(), Some("Pageviews + Entrances / Sessions"));
        assert_eq!(m.formatting_type(), Some(FormattingType::Float));
    }

    #[test]
    fn test_resolve_wire_names() {
        let catalog = Catalog::builtin();

        let known = catalog.resolve_metric("ga:users").unwrap();
        assert_eq!(known.alias(), Some("Users"));

        let unknown = catalog.resolve_metric("ga:metric4").unwrap();
        assert_eq!(unknown.expression(), "ga:metric4");
        assert_eq!(unknown.alias(), None);
    }

    #[test]
    fn test_resolve_metric_errors() {
        let catalog = Catalog::builtin();
        for spec in ["", "sessions/", "/sessions", "sessions//users", "nope", "sessions+nope"] {
            assert!(catalog.resolve_metric(spec).is_err(), "'{spec}' should not resolve");
        }
    }

    #[test]
    fn test_resolve_dimension_with_buckets() {
        let catalog = Catalog::builtin();

        let d = catalog.resolve_dimension("session_count[1, 5,10]").unwrap();
        assert_eq!(d.name(), "ga:sessionCount");
        assert_eq!(d.histogram_buckets(), [1, 5, 10]);

        let d = catalog.resolve_dimension("ga:country").unwrap();
        assert_eq!(d.display_name(), "Country");

        let d = catalog.resolve_dimension("ga:dimension2").unwrap();
        assert_eq!(d.display_name(), "ga:dimension2");
    }

    #[test]
    fn test_resolve_dimension_errors() {
        let catalog = Catalog::builtin();
        for spec in ["nope", "session_count[1,2", "session_count[a]"] {
            assert!(catalog.resolve_dimension(spec).is_err(), "'{spec}' should not resolve");
        }
    }
}
