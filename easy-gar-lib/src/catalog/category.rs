use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Grouping used when listing catalog metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, Serialize, Deserialize)]
pub enum MetricCategory {
    Users,
    Sessions,
    #[strum(to_string = "Traffic Sources")]
    TrafficSources,
    AdWords,
    #[strum(to_string = "Goal Conversions")]
    GoalConversions,
    #[strum(to_string = "Page Tracking")]
    PageTracking,

    /// Entries supplied by the configuration file.
    Custom,
}

/// Grouping used when listing catalog dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, Serialize, Deserialize)]
pub enum DimensionCategory {
    Users,
    Sessions,
    #[strum(to_string = "Traffic Sources")]
    TrafficSources,
    AdWords,
    #[strum(to_string = "Goal Conversions")]
    GoalConversions,
    #[strum(to_string = "Platform or Device")]
    PlatformOrDevice,
    #[strum(to_string = "Geo Network")]
    GeoNetwork,
    System,
    #[strum(to_string = "Page Tracking")]
    PageTracking,
    Time,
    Audience,

    /// Entries supplied by the configuration file.
    Custom,
}
