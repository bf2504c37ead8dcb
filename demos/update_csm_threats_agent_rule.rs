//! Update a Workload Protection agent rule.
//!
//! Run with:
//! ```bash
//! DD_API_KEY=... DD_APP_KEY=... AGENT_RULE_DATA_ID=... \
//!     cargo run --example update_csm_threats_agent_rule
//! ```

use datadog_api_client::models::{
    CloudWorkloadSecurityAgentRuleType, CloudWorkloadSecurityAgentRuleUpdateAttributes,
    CloudWorkloadSecurityAgentRuleUpdateData, CloudWorkloadSecurityAgentRuleUpdateRequest,
};
use datadog_api_client::{Client, Config};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let agent_rule_id = std::env::var("AGENT_RULE_DATA_ID")
        .expect("AGENT_RULE_DATA_ID environment variable must be set");

    let attributes = CloudWorkloadSecurityAgentRuleUpdateAttributes {
        description: Some("Updated Agent rule".to_string()),
        enabled: Some(true),
        expression: Some(r#"exec.file.name == "sh""#.to_string()),
        ..CloudWorkloadSecurityAgentRuleUpdateAttributes::new()
    };
    let mut data = CloudWorkloadSecurityAgentRuleUpdateData::new(
        attributes,
        CloudWorkloadSecurityAgentRuleType::AgentRule,
    );
    data.id = Some(agent_rule_id.clone());
    let body = CloudWorkloadSecurityAgentRuleUpdateRequest::new(data);

    let client = Client::new(Config::from_env())?;
    let response = client
        .cloud_workload_security()
        .update_csm_threats_agent_rule(&agent_rule_id, body)
        .await?;

    if response.is_unparsed() {
        eprintln!("response did not match the known schema; printing it verbatim");
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
