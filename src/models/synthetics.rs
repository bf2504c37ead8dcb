use crate::model::enums::api_enum;

api_enum! {
    /// Type of assertion to apply in an API test.
    pub enum SyntheticsCheckType {
        Equals = "equals",
        NotEquals = "notEquals",
        Contains = "contains",
        NotContains = "notContains",
        StartsWith = "startsWith",
        NotStartsWith = "notStartsWith",
        Greater = "greater",
        Lower = "lower",
        GreaterEquals = "greaterEquals",
        LowerEquals = "lowerEquals",
        MatchRegex = "matchRegex",
        Between = "between",
        IsEmpty = "isEmpty",
        NotIsEmpty = "notIsEmpty",
    }
}
