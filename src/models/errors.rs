use crate::model::api_model;

api_model! {
    /// Error body returned by the API on non-2xx responses.
    pub struct APIErrorResponse {
        required {
            /// Error messages, most relevant first.
            errors: Vec<String> = "errors",
        }
        optional {}
    }
}
