use super::MetricCategory;
use crate::reporting::FormattingType;

#[derive(Debug)]
pub struct MetricDef {
    pub key: &'static str,
    pub expression: &'static str,
    pub alias: &'static str,
    pub formatting_type: FormattingType,
    pub category: MetricCategory,
}

macro_rules! metric_def {
    ($key:expr, $expression:expr, $alias:expr, $formatting_type:ident, $category:ident) => {
        MetricDef {
            key: $key,
            expression: $expression,
            alias: $alias,
            formatting_type: FormattingType::$formatting_type,
            category: MetricCategory::$category,
        }
    };
}

/// The per-goal metrics, instantiated for every goal slot.
///
/// Each tuple is `(key suffix, wire suffix, alias suffix, formatting type)`.
/// Goal `n` yields key `goal{n:02}_{key}`, wire name `ga:goal{n}{wire}` and
/// alias `Goal {n:02} {alias}`.
pub const GOAL_METRIC_TEMPLATES: &[(&str, &str, &str, FormattingType)] = &[
    ("starts", "Starts", "Starts", FormattingType::Integer),
    ("completions", "Completions", "Completions", FormattingType::Integer),
    ("value", "Value", "Value", FormattingType::Currency),
    ("conversion_rate", "ConversionRate", "Conversion Rate", FormattingType::Percent),
    ("abandons", "Abandons", "Abandoned Funnels", FormattingType::Integer),
    ("abandon_rate", "AbandonRate", "Abandonment Rate", FormattingType::Percent),
];

/// Number of goal slots a view can configure.
pub const GOAL_COUNT: u32 = 20;

pub const METRIC_DEFINITIONS: &[MetricDef] = &[
    // Users
    metric_def!("users", "ga:users", "Users", Integer, Users),
    metric_def!("new_users", "ga:newUsers", "New Users", Integer, Users),
    metric_def!("users_1d", "ga:1dayUsers", "1 Day Active Users", Integer, Users),
    metric_def!("users_7d", "ga:7dayUsers", "7 Day Active Users", Integer, Users),
    metric_def!("users_14d", "ga:14dayUsers", "14 Day Active Users", Integer, Users),
    metric_def!("users_28d", "ga:28dayUsers", "28 Day Active Users", Integer, Users),
    metric_def!("users_30d", "ga:30dayUsers", "30 Day Active Users", Integer, Users),
    metric_def!("sessions_per_user", "ga:sessionsPerUser", "Sessions per User", Float, Users),
    metric_def!("percent_new_sessions", "ga:percentNewSessions", "% New Sessions", Percent, Users),

    // Sessions
    metric_def!("sessions", "ga:sessions", "Sessions", Integer, Sessions),
    metric_def!("bounces", "ga:bounces", "Bounces", Integer, Sessions),
    metric_def!("bounce_rate", "ga:bounceRate", "Bounce Rate", Percent, Sessions),
    metric_def!("session_duration", "ga:sessionDuration", "Session Duration", Time, Sessions),
    metric_def!("avg_session_duration", "ga:avgSessionDuration", "Avg. Session Duration", Time, Sessions),
    metric_def!("unique_dimensions_combination", "ga:uniqueDimensionCombinations", "Unique Dimension Combinations", Integer, Sessions),
    metric_def!("hits", "ga:hits", "Hits", Integer, Sessions),

    // Traffic sources
    metric_def!("organic_searches", "ga:organicSearches", "Organic Searches", Integer, TrafficSources),

    // AdWords
    metric_def!("impressions", "ga:impressions", "Impressions", Integer, AdWords),
    metric_def!("ad_clicks", "ga:adClicks", "Clicks", Integer, AdWords),
    metric_def!("ad_cost", "ga:adCost", "Cost", Currency, AdWords),
    metric_def!("cpm", "ga:CPM", "CPM", Currency, AdWords),
    metric_def!("cpc", "ga:CPC", "CPC", Currency, AdWords),
    metric_def!("ctr", "ga:CTR", "CTR", Percent, AdWords),
    metric_def!("cost_per_transaction", "ga:costPerTransaction", "Cost per Transaction", Currency, AdWords),
    metric_def!("cost_per_conversion", "ga:costPerConversion", "Cost per Conversion", Currency, AdWords),
    metric_def!("rpc", "ga:RPC", "RPC", Currency, AdWords),
    metric_def!("roas", "ga:ROAS", "ROAS", Currency, AdWords),

    // Goal conversions, all goals
    metric_def!("goal_starts_all", "ga:goalStartsAll", "Goal Starts", Integer, GoalConversions),
    metric_def!("goal_completions_all", "ga:goalCompletionsAll", "Goal Completions", Integer, GoalConversions),
    metric_def!("goal_value_all", "ga:goalValueAll", "Goal Value", Currency, GoalConversions),
    metric_def!("goal_value_per_session", "ga:goalValuePerSession", "Per Session Goal Value", Currency, GoalConversions),
    metric_def!("goal_conversion_rate_all", "ga:goalConversionRateAll", "Goal Conversion Rate", Percent, GoalConversions),
    metric_def!("goal_abandons_all", "ga:goalAbandonsAll", "Abandoned Funnels", Integer, GoalConversions),
    metric_def!("goal_abandon_rate_all", "ga:goalAbandonRateAll", "Total Abandonment Rate", Percent, GoalConversions),

    // Page tracking
    metric_def!("page_value", "ga:pageValue", "Page Value", Currency, PageTracking),
    metric_def!("entrances", "ga:entrances", "Entrances", Integer, PageTracking),
    metric_def!("entrance_rate", "ga:entranceRate", "Entrances / Pageviews", Percent, PageTracking),
    metric_def!("pageviews", "ga:pageviews", "Pageviews", Integer, PageTracking),
    metric_def!("pageviews_per_session", "ga:pageviewsPerSession", "Pages / Session", Float, PageTracking),
    metric_def!("unique_pageviews", "ga:uniquePageviews", "Unique Page Views", Integer, PageTracking),
    metric_def!("time_on_page", "ga:timeOnPage", "Time on Page", Time, PageTracking),
    metric_def!("exits", "ga:exits", "Exits", Integer, PageTracking),
    metric_def!("avg_time_on_page", "ga:avgTimeOnPage", "Avg. Time on Page", Time, PageTracking),
    metric_def!("exit_rate", "ga:exitRate", "% Exit", Percent, PageTracking),
];
