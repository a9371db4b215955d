use sleuth_core::errors::*;

#[test]
fn unexpected_input_names_input_and_awaited_prompt() {
    let err = SessionError::UnexpectedInput {
        input: "hint",
        awaiting: "an answer",
    };
    let msg = err.to_string();
    assert!(msg.contains("hint"));
    assert!(msg.contains("an answer"));
}

#[test]
fn duplicate_name_carries_name() {
    let err = DatasetError::DuplicateName {
        name: "Umm Kulthum".into(),
    };
    assert!(err.to_string().contains("Umm Kulthum"));
}

#[test]
fn dimension_mismatch_carries_values() {
    let err = EmbeddingError::DimensionMismatch {
        expected: 384,
        actual: 128,
    };
    let msg = err.to_string();
    assert!(msg.contains("384"));
    assert!(msg.contains("128"));
}

// --- From impls ---

#[test]
fn session_error_converts_and_is_usage_error() {
    let err: SleuthError = SessionError::SessionFinished {
        outcome: "success".into(),
    }
    .into();
    assert!(matches!(err, SleuthError::SessionError(_)));
    assert!(err.is_usage_error());
}

#[test]
fn embedding_error_converts_and_is_not_usage_error() {
    let err: SleuthError = EmbeddingError::ProviderUnavailable {
        provider: "ollama".into(),
    }
    .into();
    assert!(matches!(err, SleuthError::EmbeddingError(_)));
    assert!(!err.is_usage_error());
}

#[test]
fn dataset_error_converts() {
    let err: SleuthError = DatasetError::Empty.into();
    assert!(matches!(err, SleuthError::DatasetError(DatasetError::Empty)));
}

#[test]
fn serde_json_error_converts() {
    let bad = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: SleuthError = bad.into();
    assert!(matches!(err, SleuthError::SerializationError(_)));
}
