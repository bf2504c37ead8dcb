mod common;

use common::{replay, test_client};
use datadog_api_client::models::{
    CloudWorkloadSecurityAgentRuleType, CloudWorkloadSecurityAgentRuleUpdateAttributes,
    CloudWorkloadSecurityAgentRuleUpdateData, CloudWorkloadSecurityAgentRuleUpdateRequest,
};
use datadog_api_client::Error;
use serde_json::json;

const RULE_ID: &str = "ufv-7bk-ba9";

fn update_body() -> CloudWorkloadSecurityAgentRuleUpdateRequest {
    let attributes = CloudWorkloadSecurityAgentRuleUpdateAttributes {
        description: Some("Updated agent rule".into()),
        enabled: Some(true),
        expression: Some(r#"exec.file.name == "sh""#.into()),
        ..CloudWorkloadSecurityAgentRuleUpdateAttributes::new()
    };
    let mut data = CloudWorkloadSecurityAgentRuleUpdateData::new(
        attributes,
        CloudWorkloadSecurityAgentRuleType::AgentRule,
    );
    data.id = Some(RULE_ID.into());
    CloudWorkloadSecurityAgentRuleUpdateRequest::new(data)
}

#[tokio::test]
async fn update_then_get_agent_rule() {
    let server = replay("csm_threats_agent_rule").await;
    let api = test_client(&server.uri()).cloud_workload_security();

    let updated = api
        .update_csm_threats_agent_rule(RULE_ID, update_body())
        .await
        .expect("update should succeed");
    let data = updated
        .typed()
        .and_then(|r| r.data.as_ref())
        .and_then(|d| d.typed())
        .expect("typed data");
    assert_eq!(data.id.as_deref(), Some(RULE_ID));
    assert_eq!(data.type_, Some(CloudWorkloadSecurityAgentRuleType::AgentRule));

    let attributes = data.attributes.as_ref().unwrap();
    let typed = attributes.typed().expect("typed attributes");
    assert_eq!(typed.version, Some(2));
    assert_eq!(typed.updated_at, Some(1_700_000_300_000));
    assert_eq!(
        attributes.additional_properties().unwrap().get("creator"),
        Some(&json!({"handle": "datadog.user@example.com", "name": "Datadog User"}))
    );

    // The recorded GET returns a type the client does not know yet.
    let fetched = api
        .get_csm_threats_agent_rule(RULE_ID)
        .await
        .expect("get should succeed");
    assert!(fetched.is_unparsed());
    assert_eq!(
        fetched.unparsed().unwrap()["data"]["type"],
        json!("agent_rule_v2")
    );
}

#[tokio::test]
async fn missing_rule_maps_to_api_error() {
    let server = replay("csm_threats_not_found").await;
    let api = test_client(&server.uri()).cloud_workload_security();

    let err = api
        .get_csm_threats_agent_rule("missing-rule")
        .await
        .expect_err("404 should fail");
    match err {
        Error::Api(api_err) => {
            assert_eq!(api_err.status, 404);
            assert_eq!(api_err.message, "Not found");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_rule_id_rejected() {
    let server = wiremock::MockServer::start().await;
    let api = test_client(&server.uri()).cloud_workload_security();

    let err = api
        .update_csm_threats_agent_rule("  ", update_body())
        .await
        .expect_err("blank id should fail");
    assert!(matches!(err, Error::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn agent_rule_id_is_escaped_as_one_segment() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path(
            "/api/v2/remote_config/products/cws/agent_rules/rule%2F..%2Fother%23frag",
        ))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "rule/../other#frag", "type": "agent_rule"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetched = test_client(&server.uri())
        .cloud_workload_security()
        .get_csm_threats_agent_rule("rule/../other#frag")
        .await
        .expect("get should succeed");
    let data = fetched
        .typed()
        .and_then(|r| r.data.as_ref())
        .and_then(|d| d.typed())
        .expect("typed data");
    assert_eq!(data.id.as_deref(), Some("rule/../other#frag"));
}
