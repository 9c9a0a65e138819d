/// CLI configuration loaded from environment variables.
///
/// All fields have defaults suitable for pointing at the public data
/// API; override via environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the data API (default: the public endpoint).
    pub api_url: String,
    /// Optional analytics collector URL; no delivery when unset.
    pub collector_url: Option<String>,
    /// Area type to compare, e.g. `nation` or `region` (default: `nation`).
    pub area_type: String,
    /// Metric to fetch (default: `newCasesByPublishDate`).
    pub metric: String,
}

impl Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                 |
    /// |-------------------------|-----------------------------------------|
    /// | `COVDASH_API_URL`       | `https://api.coronavirus.data.gov.uk`   |
    /// | `COVDASH_COLLECTOR_URL` | unset                                   |
    /// | `COVDASH_AREA_TYPE`     | `nation`                                |
    /// | `COVDASH_METRIC`        | `newCasesByPublishDate`                 |
    pub fn from_env() -> Self {
        let api_url = std::env::var("COVDASH_API_URL")
            .unwrap_or_else(|_| "https://api.coronavirus.data.gov.uk".into());

        let collector_url = std::env::var("COVDASH_COLLECTOR_URL").ok();

        let area_type = std::env::var("COVDASH_AREA_TYPE").unwrap_or_else(|_| "nation".into());

        let metric =
            std::env::var("COVDASH_METRIC").unwrap_or_else(|_| "newCasesByPublishDate".into());

        Self {
            api_url,
            collector_url,
            area_type,
            metric,
        }
    }
}
