//! AWS Logs integration API client (v1).
//!
//! Manages the Lambda forwarders and AWS services whose logs are shipped to
//! Datadog. Requires both an API key and an application key.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use crate::{
    client::ClientInner,
    core::validate_application_key,
    errors::Result,
    http::RequestOptions,
    model::Model,
    models::{
        AWSAccountAndLambdaRequest, AWSLogsAsyncResponse, AWSLogsListResponse,
        AWSLogsListServicesResponse, AWSLogsServicesRequest,
    },
};

const LOGS_PATH: &str = "/api/v1/integration/aws/logs";
const SERVICES_PATH: &str = "/api/v1/integration/aws/logs/services";
const CHECK_LAMBDA_ASYNC_PATH: &str = "/api/v1/integration/aws/logs/check_async";
const CHECK_SERVICES_ASYNC_PATH: &str = "/api/v1/integration/aws/logs/services_async";

/// Client for the AWS Logs integration endpoints.
#[derive(Clone)]
pub struct AWSLogsIntegrationClient {
    inner: Arc<ClientInner>,
    options: RequestOptions,
}

impl AWSLogsIntegrationClient {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            options: RequestOptions::default(),
        }
    }

    /// Apply per-call overrides (request id, headers, timeout, retry) to
    /// every request made through this handle.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    fn ensure_keys(&self) -> Result<()> {
        validate_application_key(&self.inner.api_key, &self.inner.application_key)
    }

    /// List all Datadog-AWS Logs integrations configured in the organization.
    pub async fn list_aws_logs_integrations(&self) -> Result<Vec<Model<AWSLogsListResponse>>> {
        self.ensure_keys()?;
        self.inner
            .call_json(Method::GET, LOGS_PATH, None, &self.options)
            .await
    }

    /// Attach a Lambda forwarder ARN to an AWS account.
    pub async fn create_aws_lambda_arn(
        &self,
        body: impl Into<Model<AWSAccountAndLambdaRequest>>,
    ) -> Result<Value> {
        self.ensure_keys()?;
        let body: Model<AWSAccountAndLambdaRequest> = body.into();
        let body = body.encode()?;
        self.inner
            .call_json(Method::POST, LOGS_PATH, Some(body), &self.options)
            .await
    }

    /// Detach a Lambda forwarder ARN from an AWS account.
    pub async fn delete_aws_lambda_arn(
        &self,
        body: impl Into<Model<AWSAccountAndLambdaRequest>>,
    ) -> Result<Value> {
        self.ensure_keys()?;
        let body: Model<AWSAccountAndLambdaRequest> = body.into();
        let body = body.encode()?;
        self.inner
            .call_json(Method::DELETE, LOGS_PATH, Some(body), &self.options)
            .await
    }

    /// List the AWS services that can ship logs to Datadog.
    pub async fn list_aws_logs_services(&self) -> Result<Vec<Model<AWSLogsListServicesResponse>>> {
        self.ensure_keys()?;
        self.inner
            .call_json(Method::GET, SERVICES_PATH, None, &self.options)
            .await
    }

    /// Enable automatic log collection for a list of services.
    pub async fn enable_aws_log_services(
        &self,
        body: impl Into<Model<AWSLogsServicesRequest>>,
    ) -> Result<Value> {
        self.ensure_keys()?;
        let body: Model<AWSLogsServicesRequest> = body.into();
        let body = body.encode()?;
        self.inner
            .call_json(Method::POST, SERVICES_PATH, Some(body), &self.options)
            .await
    }

    /// Check whether a Lambda ARN can be attached to the account.
    ///
    /// The check runs asynchronously on the Datadog side; poll until the
    /// returned status is no longer `waiting`.
    pub async fn check_aws_logs_lambda_async(
        &self,
        body: impl Into<Model<AWSAccountAndLambdaRequest>>,
    ) -> Result<Model<AWSLogsAsyncResponse>> {
        self.ensure_keys()?;
        let body: Model<AWSAccountAndLambdaRequest> = body.into();
        let body = body.encode()?;
        self.inner
            .call_model(Method::POST, CHECK_LAMBDA_ASYNC_PATH, Some(body), &self.options)
            .await
    }

    /// Check whether log collection can be enabled for the given services.
    pub async fn check_aws_logs_services_async(
        &self,
        body: impl Into<Model<AWSLogsServicesRequest>>,
    ) -> Result<Model<AWSLogsAsyncResponse>> {
        self.ensure_keys()?;
        let body: Model<AWSLogsServicesRequest> = body.into();
        let body = body.encode()?;
        self.inner
            .call_model(Method::POST, CHECK_SERVICES_ASYNC_PATH, Some(body), &self.options)
            .await
    }
}
