//! Shared engine initialisation from `RULE_NLU_MODEL`.
//!
//! Kept in its own test binary so the process-wide engine starts
//! uninitialised, and as a single test so nothing races on the variable.

use iiq_rule_nlu::analysis::{shared_engine, MODEL_ENV_VAR};
use iiq_rule_nlu::{extract, AnalysisError, NluError};

#[test]
fn test_failed_initialisation_is_returned_and_retried() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent_model.yaml");
    std::env::set_var(MODEL_ENV_VAR, &missing);

    let err = extract("Create a correlation rule for SAP").unwrap_err();
    match err {
        NluError::Engine(AnalysisError::ModelNotFound { path }) => assert_eq!(path, missing),
        other => panic!("Expected ModelNotFound, got {:?}", other),
    }

    // The failure is not cached
    assert!(matches!(
        shared_engine(),
        Err(AnalysisError::ModelNotFound { .. })
    ));

    std::env::remove_var(MODEL_ENV_VAR);

    let result = extract("Create a correlation rule for SAP").unwrap();
    assert_eq!(result.application_name.as_deref(), Some("SAP"));
    assert_eq!(shared_engine().unwrap().model_name(), "en_rules_sm");
}
