//! API request and response bodies.
//!
//! Every struct here is declared through `api_model!`, so it satisfies the
//! forward-compatible contract in [`crate::model`]. Bodies travel on the wire
//! wrapped in [`Model`](crate::model::Model).

mod aws_logs;
mod csm_threats;
mod errors;
mod logs;
mod slo;
mod synthetics;
mod teams;
mod users;

pub use aws_logs::{
    AWSAccountAndLambdaRequest, AWSLogsAsyncError, AWSLogsAsyncResponse, AWSLogsLambda,
    AWSLogsListResponse, AWSLogsListServicesResponse, AWSLogsServicesRequest,
};
pub use csm_threats::{
    CloudWorkloadSecurityAgentRuleAttributes, CloudWorkloadSecurityAgentRuleData,
    CloudWorkloadSecurityAgentRuleResponse, CloudWorkloadSecurityAgentRuleType,
    CloudWorkloadSecurityAgentRuleUpdateAttributes, CloudWorkloadSecurityAgentRuleUpdateData,
    CloudWorkloadSecurityAgentRuleUpdateRequest,
};
pub use errors::APIErrorResponse;
pub use logs::{LogsExclusion, LogsExclusionFilter};
pub use slo::{SLOErrorTimeframe, ServiceLevelObjectivesBulkDeletedErrors};
pub use synthetics::SyntheticsCheckType;
pub use teams::{
    TeamLink, TeamLinkAttributes, TeamLinkCreate, TeamLinkCreateRequest, TeamLinkResponse,
    TeamLinkType,
};
pub use users::{RelationshipToUser, RelationshipToUserData, UsersType};
