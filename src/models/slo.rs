use crate::model::{api_model, enums::api_enum};

api_enum! {
    /// Timeframe of an SLO threshold, or `all` when every threshold is affected.
    pub enum SLOErrorTimeframe {
        SevenDays = "7d",
        ThirtyDays = "30d",
        NinetyDays = "90d",
        All = "all",
    }
}

api_model! {
    /// Object describing the error of a bulk SLO deletion.
    pub struct ServiceLevelObjectivesBulkDeletedErrors {
        required {
            /// The ID of the service level objective associated with this error.
            id: String = "id",
            /// The error message.
            message: String = "message",
            timeframe: SLOErrorTimeframe = "timeframe",
        }
        optional {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodecError, Model};

    #[test]
    fn missing_field_wins_over_invalid_enum() {
        let err = Model::<ServiceLevelObjectivesBulkDeletedErrors>::decode(
            br#"{"id": "slo-1", "timeframe": "1y"}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingRequiredField {
                field: "message",
                ..
            }
        ));
    }

    #[test]
    fn required_fields_are_checked_in_declaration_order() {
        let err =
            Model::<ServiceLevelObjectivesBulkDeletedErrors>::decode(br#"{"timeframe": "7d"}"#)
                .unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingRequiredField { field: "id", .. }
        ));
    }

    #[test]
    fn unknown_timeframe_round_trips() {
        let bytes = br#"{"id":"slo-1","message":"not found","timeframe":"1y"}"#;
        let model = Model::<ServiceLevelObjectivesBulkDeletedErrors>::decode(bytes).unwrap();
        assert!(model.is_unparsed());
        let again: serde_json::Value = serde_json::from_slice(&model.encode().unwrap()).unwrap();
        let original: serde_json::Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(again, original);
    }
}
