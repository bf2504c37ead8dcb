use crate::model::{api_model, Model};

api_model! {
    /// Exclusion filter: a query, a sampling rule and an on/off toggle.
    pub struct LogsExclusionFilter {
        required {
            /// Share of matching logs to exclude; `1.0` excludes all of them.
            sample_rate: f64 = "sample_rate",
        }
        optional {
            /// Log query scoping the filter. The server default `*` matches every log.
            query: String = "query",
        }
    }
}

api_model! {
    /// Named exclusion rule attached to a logs index.
    pub struct LogsExclusion {
        required {
            name: String = "name",
        }
        optional {
            filter: Model<LogsExclusionFilter> = "filter",
            is_enabled: bool = "is_enabled",
        }
    }
}
