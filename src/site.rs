//! Datadog site presets.

use std::fmt;

/// Datadog site hosting an organization. Selects the API base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Site {
    #[default]
    US1,
    US3,
    US5,
    EU1,
    AP1,
    US1Fed,
    /// Any other site domain, e.g. `datad0g.com` for staging.
    Custom(String),
}

impl Site {
    /// Site domain as used in `DD_SITE`.
    pub fn domain(&self) -> &str {
        match self {
            Site::US1 => "datadoghq.com",
            Site::US3 => "us3.datadoghq.com",
            Site::US5 => "us5.datadoghq.com",
            Site::EU1 => "datadoghq.eu",
            Site::AP1 => "ap1.datadoghq.com",
            Site::US1Fed => "ddog-gov.com",
            Site::Custom(domain) => domain.as_str(),
        }
    }

    /// API base URL for this site.
    pub fn base_url(&self) -> String {
        format!("https://api.{}", self.domain())
    }
}

impl From<&str> for Site {
    fn from(value: &str) -> Self {
        match value.trim().trim_end_matches('/') {
            "datadoghq.com" => Site::US1,
            "us3.datadoghq.com" => Site::US3,
            "us5.datadoghq.com" => Site::US5,
            "datadoghq.eu" => Site::EU1,
            "ap1.datadoghq.com" => Site::AP1,
            "ddog-gov.com" => Site::US1Fed,
            other => Site::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_domains_map_to_presets() {
        assert_eq!(Site::from("datadoghq.eu"), Site::EU1);
        assert_eq!(Site::from(" us5.datadoghq.com/ "), Site::US5);
        assert_eq!(Site::default().base_url(), "https://api.datadoghq.com");
    }

    #[test]
    fn custom_domain_kept() {
        let site = Site::from("datad0g.com");
        assert_eq!(site, Site::Custom("datad0g.com".into()));
        assert_eq!(site.base_url(), "https://api.datad0g.com");
    }
}
