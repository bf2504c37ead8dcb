use crate::model::{api_model, enums::api_enum, Model};

api_enum! {
    /// The type of the resource, always `agent_rule`.
    pub enum CloudWorkloadSecurityAgentRuleType {
        #[default]
        AgentRule = "agent_rule",
    }
}

api_model! {
    /// Update an existing Cloud Workload Security Agent rule.
    pub struct CloudWorkloadSecurityAgentRuleUpdateAttributes {
        required {}
        optional {
            /// The description of the Agent rule.
            description: String = "description",
            /// Whether the Agent rule is enabled.
            enabled: bool = "enabled",
            /// The SECL expression of the Agent rule.
            expression: String = "expression",
            /// The ID of the policy the rule belongs to.
            policy_id: String = "policy_id",
            /// The list of product tags associated with the rule.
            product_tags: Vec<String> = "product_tags",
        }
    }
}

api_model! {
    /// Object for a single Agent rule.
    pub struct CloudWorkloadSecurityAgentRuleUpdateData {
        required {
            attributes: Model<CloudWorkloadSecurityAgentRuleUpdateAttributes> = "attributes",
            type_: CloudWorkloadSecurityAgentRuleType = "type",
        }
        optional {
            /// The ID of the agent rule.
            id: String = "id",
        }
    }
}

api_model! {
    /// Request object that includes the Agent rule with the attributes to update.
    pub struct CloudWorkloadSecurityAgentRuleUpdateRequest {
        required {
            data: Model<CloudWorkloadSecurityAgentRuleUpdateData> = "data",
        }
        optional {}
    }
}

api_model! {
    /// A Cloud Workload Security Agent rule returned by the API.
    pub struct CloudWorkloadSecurityAgentRuleAttributes {
        required {}
        optional {
            /// The category of the Agent rule.
            category: String = "category",
            /// When the Agent rule was created, timestamp in milliseconds.
            creation_date: i64 = "creationDate",
            /// The description of the Agent rule.
            description: String = "description",
            /// Whether the Agent rule is enabled.
            enabled: bool = "enabled",
            /// The SECL expression of the Agent rule.
            expression: String = "expression",
            /// The name of the Agent rule.
            name: String = "name",
            /// When the Agent rule was last updated, timestamp in milliseconds.
            updated_at: i64 = "updatedAt",
            /// The version of the Agent rule.
            version: i64 = "version",
        }
    }
}

api_model! {
    /// Object for a single Agent rule.
    pub struct CloudWorkloadSecurityAgentRuleData {
        required {}
        optional {
            attributes: Model<CloudWorkloadSecurityAgentRuleAttributes> = "attributes",
            /// The ID of the Agent rule.
            id: String = "id",
            type_: CloudWorkloadSecurityAgentRuleType = "type",
        }
    }
}

api_model! {
    /// Response object that includes an Agent rule.
    pub struct CloudWorkloadSecurityAgentRuleResponse {
        required {}
        optional {
            data: Model<CloudWorkloadSecurityAgentRuleData> = "data",
        }
    }
}
