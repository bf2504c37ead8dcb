use crate::model::{api_model, enums::api_enum, Model};

api_enum! {
    /// Team link type.
    pub enum TeamLinkType {
        #[default]
        TeamLinks = "team_links",
    }
}

api_model! {
    /// Team link attributes.
    pub struct TeamLinkAttributes {
        required {
            /// The link's label.
            label: String = "label",
            /// The URL for the link.
            url: String = "url",
        }
        optional {
            /// The link's position, used to sort links for the team.
            position: i32 = "position",
            /// ID of the team the link is associated with.
            team_id: String = "team_id",
        }
    }
}

api_model! {
    /// Team link create.
    pub struct TeamLinkCreate {
        required {
            attributes: Model<TeamLinkAttributes> = "attributes",
            type_: TeamLinkType = "type",
        }
        optional {}
    }
}

api_model! {
    /// Team link create request.
    pub struct TeamLinkCreateRequest {
        required {
            data: Model<TeamLinkCreate> = "data",
        }
        optional {}
    }
}

api_model! {
    /// Team link.
    pub struct TeamLink {
        required {
            attributes: Model<TeamLinkAttributes> = "attributes",
            /// The team link's identifier.
            id: String = "id",
            type_: TeamLinkType = "type",
        }
        optional {}
    }
}

api_model! {
    /// Team link response.
    pub struct TeamLinkResponse {
        required {}
        optional {
            data: Model<TeamLink> = "data",
        }
    }
}
