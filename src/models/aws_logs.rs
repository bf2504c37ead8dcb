use crate::model::{api_model, Model};

api_model! {
    /// AWS account ID and Lambda ARN.
    pub struct AWSAccountAndLambdaRequest {
        required {
            /// Your AWS Account ID without dashes.
            account_id: String = "account_id",
            /// ARN of the Datadog Lambda created during the Datadog-AWS logs collection setup.
            lambda_arn: String = "lambda_arn",
        }
        optional {}
    }
}

api_model! {
    /// A list of current AWS services for which Datadog offers automatic log collection.
    pub struct AWSLogsServicesRequest {
        required {
            /// Your AWS Account ID without dashes.
            account_id: String = "account_id",
            /// Services to enable, as returned by the list services endpoint.
            services: Vec<String> = "services",
        }
        optional {}
    }
}

api_model! {
    /// Description of the Lambdas.
    pub struct AWSLogsLambda {
        required {}
        optional {
            /// Available ARN IDs.
            arn: String = "arn",
        }
    }
}

api_model! {
    /// A list of all Datadog-AWS logs integrations available in your Datadog organization.
    pub struct AWSLogsListResponse {
        required {}
        optional {
            /// Your AWS Account ID without dashes.
            account_id: String = "account_id",
            /// List of ARNs configured in your Datadog account.
            lambdas: Vec<Model<AWSLogsLambda>> = "lambdas",
            /// Array of services IDs.
            services: Vec<String> = "services",
        }
    }
}

api_model! {
    /// The list of current AWS services for which Datadog offers automatic log collection.
    pub struct AWSLogsListServicesResponse {
        required {}
        optional {
            /// Key value in returned object.
            id: String = "id",
            /// Name of service available for configuration with Datadog logs.
            label: String = "label",
        }
    }
}

api_model! {
    /// Description of errors.
    pub struct AWSLogsAsyncError {
        required {}
        optional {
            /// Code properties.
            code: String = "code",
            /// Message content.
            message: String = "message",
        }
    }
}

api_model! {
    /// A list of all Datadog-AWS logs integrations available in your Datadog organization.
    pub struct AWSLogsAsyncResponse {
        required {}
        optional {
            /// List of errors.
            errors: Vec<Model<AWSLogsAsyncError>> = "errors",
            /// Status of the properties.
            status: String = "status",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unparsed_list_item_does_not_hide_siblings() {
        let payload = json!({
            "account_id": "123456789012",
            "lambdas": [
                {"arn": "arn:aws:lambda:us-east-1:123456789012:function:Forwarder"},
                {"arn": 42}
            ],
            "services": ["s3", "elb"]
        });
        let list: Model<AWSLogsListResponse> = serde_json::from_value(payload.clone()).unwrap();

        let typed = list.typed().unwrap();
        let lambdas = typed.lambdas.as_ref().unwrap();
        assert!(!lambdas[0].is_unparsed());
        assert!(lambdas[1].is_unparsed());
        assert_eq!(serde_json::to_value(&list).unwrap(), payload);
    }

    #[test]
    fn services_request_builder() {
        let body = AWSLogsServicesRequest::new("123456789012", vec!["s3".to_string()]);
        assert_eq!(
            serde_json::to_value(Model::new(body)).unwrap(),
            json!({"account_id": "123456789012", "services": ["s3"]})
        );
    }
}
