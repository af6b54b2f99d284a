use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Backend hint trading precision for response time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize, ValueEnum)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[value(rename_all = "camelCase")]
pub enum SamplingLevel {
    /// Balance between speed and accuracy.
    #[default]
    Default,

    /// Fast response with a smaller sample.
    Small,

    /// More accurate response with a larger sample, slower.
    Large,
}
