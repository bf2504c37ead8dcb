use std::sync::Arc;

use reqwest::Method;

use crate::{
    client::ClientInner,
    core::{path_segment, validate_application_key},
    errors::Result,
    http::RequestOptions,
    model::Model,
    models::{TeamLinkCreateRequest, TeamLinkResponse},
};

/// Client for team operations.
#[derive(Clone)]
pub struct TeamsClient {
    inner: Arc<ClientInner>,
    options: RequestOptions,
}

impl TeamsClient {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a new link to a team.
    pub async fn create_team_link(
        &self,
        team_id: &str,
        body: impl Into<Model<TeamLinkCreateRequest>>,
    ) -> Result<Model<TeamLinkResponse>> {
        validate_application_key(&self.inner.api_key, &self.inner.application_key)?;
        let team_id = path_segment("team_id", team_id)?;
        let path = format!("/api/v2/team/{team_id}/links");
        let body: Model<TeamLinkCreateRequest> = body.into();
        let body = body.encode()?;
        self.inner
            .call_model(Method::POST, &path, Some(body), &self.options)
            .await
    }
}
