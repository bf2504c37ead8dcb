use crate::model::{api_model, enums::api_enum, Model};

api_enum! {
    /// Users resource type.
    pub enum UsersType {
        #[default]
        Users = "users",
    }
}

api_model! {
    /// Relationship to user object.
    pub struct RelationshipToUserData {
        required {
            /// A unique identifier that represents the user.
            id: String = "id",
            type_: UsersType = "type",
        }
        optional {}
    }
}

api_model! {
    /// Relationship to user.
    pub struct RelationshipToUser {
        required {
            data: Model<RelationshipToUserData> = "data",
        }
        optional {}
    }
}
