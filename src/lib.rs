//! Natural-language extraction of IdentityIQ rule requests.
//!
//! Turns an instruction such as
//! `"Create a correlation rule for Active Directory using sAMAccountName"`
//! into an [`ExtractionResult`]: the user's intent, the rule type, the target
//! application and the attribute names to wire into the generated rule.
//!
//! ```no_run
//! let result = iiq_rule_nlu::extract("What is the pre-iterate rule for SAP")?;
//! assert_eq!(result.application_name.as_deref(), Some("SAP"));
//! # Ok::<(), iiq_rule_nlu::NluError>(())
//! ```
//!
//! [`extract`] runs over the process-wide [`SharedEngine`]. Use
//! [`RuleExtractor`] directly to inject a different [`LinguisticAnalyzer`].

pub mod analysis;
pub mod error;
pub mod io;
pub mod nlu;

pub use analysis::{
    AnnotatedDoc, LinguisticAnalyzer, MockAnalyzer, ModelLoader, ShallowParser, SharedEngine,
};
pub use error::{AnalysisError, NluError, PersistenceError};
pub use iiq_rule_types::{RuleDefinition, RuleParameter, RuleType};
pub use nlu::{ExtractionResult, Intent, RuleExtractor};

/// Extract a rule request using the shared linguistic engine.
///
/// The engine is initialised on first call; if its language model cannot be
/// loaded the error is returned and the next call tries again.
pub fn extract(text: &str) -> error::Result<ExtractionResult> {
    RuleExtractor::new(SharedEngine).extract(text)
}
