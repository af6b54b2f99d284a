use super::DimensionCategory;

#[derive(Debug)]
pub struct DimensionDef {
    pub key: &'static str,
    pub name: &'static str,
    pub alias: &'static str,
    pub category: DimensionCategory,
}

macro_rules! dimension_def {
    ($key:expr, $name:expr, $alias:expr, $category:ident) => {
        DimensionDef {
            key: $key,
            name: $name,
            alias: $alias,
            category: DimensionCategory::$category,
        }
    };
}

pub const DIMENSION_DEFINITIONS: &[DimensionDef] = &[
    // Users
    dimension_def!("user_type", "ga:userType", "User Type", Users),
    dimension_def!("session_count", "ga:sessionCount", "Count of Sessions", Users),
    dimension_def!("days_since_last_session", "ga:daysSinceLastSession", "Days Since Last Session", Users),
    dimension_def!("user_defined_value", "ga:userDefinedValue", "User Defined Value", Users),
    dimension_def!("user_bucket", "ga:userBucket", "User Bucket", Users),

    // Sessions
    dimension_def!("session_duration_bucket", "ga:sessionDurationBucket", "Session Duration", Sessions),

    // Traffic sources
    dimension_def!("referral_path", "ga:referralPath", "Referral Path", TrafficSources),
    dimension_def!("full_referrer", "ga:fullReferrer", "Full Referrer", TrafficSources),
    dimension_def!("campaign", "ga:campaign", "Campaign", TrafficSources),
    dimension_def!("source", "ga:source", "Source", TrafficSources),
    dimension_def!("medium", "ga:medium", "Medium", TrafficSources),
    dimension_def!("source_medium", "ga:sourceMedium", "Source / Medium", TrafficSources),
    dimension_def!("keyword", "ga:keyword", "Keyword", TrafficSources),
    dimension_def!("ad_content", "ga:adContent", "Ad Content", TrafficSources),
    dimension_def!("social_network", "ga:socialNetwork", "Social Network", TrafficSources),
    dimension_def!("has_social_source_referral", "ga:hasSocialSourceReferral", "Social Source Referral", TrafficSources),
    dimension_def!("campaign_code", "ga:campaignCode", "Campaign Code", TrafficSources),

    // AdWords
    dimension_def!("ad_group", "ga:adGroup", "AdWords Ad Group", AdWords),
    dimension_def!("ad_slot", "ga:adSlot", "AdWord Ad Slot", AdWords),
    dimension_def!("ad_distribution_network", "ga:adDistributionNetwork", "Ad Distribution Network", AdWords),
    dimension_def!("ad_match_type", "ga:adMatchType", "Query Match Type", AdWords),
    dimension_def!("ad_keyword_match_type", "ga:adKeywordMatchType", "Keyword Match Type", AdWords),
    dimension_def!("ad_matched_query", "ga:adMatchedQuery", "Search Query", AdWords),
    dimension_def!("ad_placement_domain", "ga:adPlacementDomain", "Placement Domain", AdWords),
    dimension_def!("ad_placement_url", "ga:adPlacementUrl", "Placement URL", AdWords),
    dimension_def!("ad_format", "ga:adFormat", "Ad Format", AdWords),
    dimension_def!("ad_targeting_type", "ga:adTargetingType", "Targeting Type", AdWords),
    dimension_def!("ad_targeting_option", "ga:adTargetingOption", "Placement Type", AdWords),
    dimension_def!("ad_display_url", "ga:adDisplayUrl", "Display URL", AdWords),
    dimension_def!("ad_destination_url", "ga:adDestinationUrl", "Destination URL", AdWords),
    dimension_def!("adwords_customer_id", "ga:adwordsCustomerID", "AdWords Customer ID", AdWords),
    dimension_def!("adwords_campaign_id", "ga:adwordsCampaignID", "AdWords Campaign ID", AdWords),
    dimension_def!("adwords_ad_group_id", "ga:adwordsAdGroupID", "AdWords Ad Group ID", AdWords),
    dimension_def!("adwords_creative_id", "ga:adwordsCreativeID", "AdWords Creative ID", AdWords),
    dimension_def!("adwords_criteria_id", "ga:adwordsCriteriaID", "AdWord Criteria ID", AdWords),
    dimension_def!("ad_query_word_count", "ga:adQueryWordCount", "Query Word Count", AdWords),
    dimension_def!("is_true_view_video_ad", "ga:isTrueViewVideoAd", "TrueView Video Ad", AdWords),

    // Goal conversions
    dimension_def!("goal_completion_location", "ga:goalCompletionLocation", "Goal Completion Location", GoalConversions),
    dimension_def!("goal_previous_step1", "ga:goalPreviousStep1", "Goal Previous Step - 1", GoalConversions),
    dimension_def!("goal_previous_step2", "ga:goalPreviousStep2", "Goal Previous Step - 2", GoalConversions),
    dimension_def!("goal_previous_step3", "ga:goalPreviousStep3", "Goal Previous Step - 3", GoalConversions),

    // Platform or device
    dimension_def!("browser", "ga:browser", "Browser", PlatformOrDevice),
    dimension_def!("browser_version", "ga:browserVersion", "Browser Version", PlatformOrDevice),
    dimension_def!("os", "ga:operatingSystem", "Operating System", PlatformOrDevice),
    dimension_def!("os_version", "ga:operatingSystemVersion", "Operating System Version", PlatformOrDevice),
    dimension_def!("mobile_branding", "ga:mobileDeviceBranding", "Mobile Device Branding", PlatformOrDevice),
    dimension_def!("mobile_model", "ga:mobileDeviceModel", "Mobile Device Model", PlatformOrDevice),
    dimension_def!("mobile_input_selector", "ga:mobileInputSelector", "Mobile Input Selector", PlatformOrDevice),
    dimension_def!("mobile_device_info", "ga:mobileDeviceInfo", "Mobile Device Info", PlatformOrDevice),
    dimension_def!("mobile_marketing_name", "ga:mobileDeviceMarketingName", "Mobile Device Marketing Name", PlatformOrDevice),
    dimension_def!("device_category", "ga:deviceCategory", "Device Category", PlatformOrDevice),
    dimension_def!("browser_size", "ga:browserSize", "Browser Size", PlatformOrDevice),
    dimension_def!("data_source", "ga:dataSource", "Data Source", PlatformOrDevice),

    // Geo network
    dimension_def!("continent", "ga:continent", "Continent", GeoNetwork),
    dimension_def!("subcontinent", "ga:subContinent", "Sub Continent", GeoNetwork),
    dimension_def!("country", "ga:country", "Country", GeoNetwork),
    dimension_def!("region", "ga:region", "Region", GeoNetwork),
    dimension_def!("metro", "ga:metro", "Metro", GeoNetwork),
    dimension_def!("city", "ga:city", "City", GeoNetwork),
    dimension_def!("latitude", "ga:latitude", "Latitude", GeoNetwork),
    dimension_def!("longitude", "ga:longitude", "Longitude", GeoNetwork),
    dimension_def!("network_domain", "ga:networkDomain", "Network Domain", GeoNetwork),
    dimension_def!("network_location", "ga:networkLocation", "Service Provider", GeoNetwork),
    dimension_def!("city_id", "ga:cityId", "City ID", GeoNetwork),
    dimension_def!("continent_id", "ga:continentId", "Continent ID", GeoNetwork),
    dimension_def!("country_iso_code", "ga:countryIsoCode", "Country ISO Code", GeoNetwork),
    dimension_def!("metro_id", "ga:metroId", "Metro ID", GeoNetwork),
    dimension_def!("region_id", "ga:regionId", "Region ID", GeoNetwork),
    dimension_def!("region_iso_code", "ga:regionIsoCode", "Region ISO Code", GeoNetwork),
    dimension_def!("subcontinent_code", "ga:subContinentCode", "Sub Continent Code", GeoNetwork),

    // System
    dimension_def!("flash_version", "ga:flashVersion", "Flash Version", System),
    dimension_def!("java_enabled", "ga:javaEnabled", "Java Support", System),
    dimension_def!("language", "ga:language", "Language", System),
    dimension_def!("screen_colors", "ga:screenColors", "Screen Colors", System),
    dimension_def!("source_property_display_name", "ga:sourcePropertyDisplayName", "Source Property Display Name", System),
    dimension_def!("source_property_tracking_id", "ga:sourcePropertyTrackingId", "Source Property Tracking ID", System),
    dimension_def!("screen_resolution", "ga:screenResolution", "Screen Resolution", System),

    // Page tracking
    dimension_def!("hostname", "ga:hostname", "Hostname", PageTracking),
    dimension_def!("page_path", "ga:pagePath", "Page", PageTracking),
    dimension_def!("page_path_level1", "ga:pagePathLevel1", "Page path level 1", PageTracking),
    dimension_def!("page_path_level2", "ga:pagePathLevel2", "Page path level 2", PageTracking),
    dimension_def!("page_path_level3", "ga:pagePathLevel3", "Page path level 3", PageTracking),
    dimension_def!("page_path_level4", "ga:pagePathLevel4", "Page path level 4", PageTracking),
    dimension_def!("page_title", "ga:pageTitle", "Page Title", PageTracking),
    dimension_def!("landing_page_path", "ga:landingPagePath", "Landing Page", PageTracking),
    dimension_def!("second_page_path", "ga:secondPagePath", "Second Page", PageTracking),
    dimension_def!("exit_page_path", "ga:exitPagePath", "Exit Page", PageTracking),
    dimension_def!("previous_page_path", "ga:previousPagePath", "Previous Page Path", PageTracking),
    dimension_def!("page_depth", "ga:pageDepth", "Page Depth", PageTracking),

    // Time
    dimension_def!("date", "ga:date", "Date", Time),
    dimension_def!("year", "ga:year", "Year", Time),
    dimension_def!("month", "ga:month", "Month of the Year", Time),
    dimension_def!("week", "ga:week", "Week of the Year", Time),
    dimension_def!("day", "ga:day", "Day of the Month", Time),
    dimension_def!("hour", "ga:hour", "Hour", Time),
    dimension_def!("minute", "ga:minute", "Minute", Time),
    dimension_def!("nth_month", "ga:nthMonth", "Month Index", Time),
    dimension_def!("nth_week", "ga:nthWeek", "Week Index", Time),
    dimension_def!("nth_day", "ga:nthDay", "Day Index", Time),
    dimension_def!("nth_minute", "ga:nthMinute", "Minute Index", Time),
    dimension_def!("day_of_week", "ga:dayOfWeek", "Day of Week", Time),
    dimension_def!("day_of_week_name", "ga:dayOfWeekName", "Day of Week Name", Time),
    dimension_def!("date_hour", "ga:dateHour", "Hour of Day", Time),
    dimension_def!("date_hour_minute", "ga:dateHourMinute", "Date Hour and Minute", Time),
    dimension_def!("year_month", "ga:yearMonth", "Month of Year", Time),
    dimension_def!("year_week", "ga:yearWeek", "Week of Year", Time),
    dimension_def!("iso_week", "ga:isoWeek", "ISO Week of the Year", Time),
    dimension_def!("iso_year", "ga:isoYear", "ISO Year", Time),
    dimension_def!("iso_year_iso_week", "ga:isoYearIsoWeek", "ISO Week of ISO Year", Time),
    dimension_def!("nth_hour", "ga:nthHour", "Hour Index", Time),

    // Audience
    dimension_def!("user_age_bracket", "ga:userAgeBracket", "Age", Audience),
    dimension_def!("user_gender", "ga:userGender", "Gender", Audience),
    dimension_def!("interest_other_category", "ga:interestOtherCategory", "Other Category", Audience),
    dimension_def!("interest_affinity_category", "ga:interestAffinityCategory", "Affinity Category (reach)", Audience),
    dimension_def!("interest_in_market_category", "ga:interestInMarketCategory", "In-Market Segment", Audience),
];
