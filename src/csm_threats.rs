//! Cloud Workload Security (CSM Threats) agent rule API client (v2).

use std::sync::Arc;

use reqwest::Method;

use crate::{
    client::ClientInner,
    core::{path_segment, validate_application_key},
    errors::Result,
    http::RequestOptions,
    model::Model,
    models::{CloudWorkloadSecurityAgentRuleResponse, CloudWorkloadSecurityAgentRuleUpdateRequest},
};

/// Client for CSM Threats agent rules.
#[derive(Clone)]
pub struct CloudWorkloadSecurityClient {
    inner: Arc<ClientInner>,
    options: RequestOptions,
}

fn agent_rule_path(agent_rule_id: &str) -> Result<String> {
    let agent_rule_id = path_segment("agent_rule_id", agent_rule_id)?;
    Ok(format!("/api/v2/remote_config/products/cws/agent_rules/{agent_rule_id}"))
}

impl CloudWorkloadSecurityClient {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            options: RequestOptions::default(),
        }
    }

    /// Apply per-call overrides to every request made through this handle.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the details of a single agent rule.
    pub async fn get_csm_threats_agent_rule(
        &self,
        agent_rule_id: &str,
    ) -> Result<Model<CloudWorkloadSecurityAgentRuleResponse>> {
        validate_application_key(&self.inner.api_key, &self.inner.application_key)?;
        let path = agent_rule_path(agent_rule_id)?;
        self.inner
            .call_model(Method::GET, &path, None, &self.options)
            .await
    }

    /// Update a single agent rule. Only the attributes present in the body
    /// are changed.
    pub async fn update_csm_threats_agent_rule(
        &self,
        agent_rule_id: &str,
        body: impl Into<Model<CloudWorkloadSecurityAgentRuleUpdateRequest>>,
    ) -> Result<Model<CloudWorkloadSecurityAgentRuleResponse>> {
        validate_application_key(&self.inner.api_key, &self.inner.application_key)?;
        let path = agent_rule_path(agent_rule_id)?;
        let body: Model<CloudWorkloadSecurityAgentRuleUpdateRequest> = body.into();
        let body = body.encode()?;
        self.inner
            .call_model(Method::PATCH, &path, Some(body), &self.options)
            .await
    }
}
