//! Documentation rules.
//!
//! Any week with a minor-band day requires a non-revoked parental-consent
//! document and a safety-training record; weeks with 14-17 days also
//! require a non-revoked, non-expired work permit. Each rule reports
//! missing / expired / revoked as distinct per-document detail, rolled up
//! into a single pass or fail outcome.

use chrono::NaiveDate;

use crate::calendar::AgeBand;
use crate::context::ComplianceContext;
use crate::models::{ComplianceDocument, DocumentType, RuleCategory, RuleEvaluation};
use crate::rules::{MINOR_BANDS, Rule};

/// The status of one document relative to the check date.
fn document_status(document: &ComplianceDocument, check_date: NaiveDate) -> &'static str {
    if document.is_revoked() {
        "revoked"
    } else if document.is_expired_on(check_date) {
        "expired"
    } else {
        "valid"
    }
}

/// Shared evaluation for the three documentation rules.
///
/// The requirement applies to the dates whose band is one of `bands`;
/// those dates are reported as affected on failure. A single document of
/// the required type that is neither revoked nor expired satisfies the
/// rule.
fn evaluate_required_document(
    ctx: &ComplianceContext,
    bands: &[AgeBand],
    document_type: DocumentType,
    display_name: &str,
    remediation: &str,
) -> RuleEvaluation {
    let required_dates: Vec<NaiveDate> = ctx
        .daily_age_bands
        .iter()
        .filter(|(_, band)| bands.contains(band))
        .map(|(date, _)| *date)
        .collect();

    let on_file: Vec<&ComplianceDocument> = ctx
        .documents
        .iter()
        .filter(|document| document.document_type == document_type)
        .collect();

    let statuses: Vec<serde_json::Value> = on_file
        .iter()
        .map(|document| {
            serde_json::json!({
                "document_id": document.id,
                "status": document_status(document, ctx.check_date),
                "expires_at": document.expires_at,
            })
        })
        .collect();

    if on_file
        .iter()
        .any(|document| document.is_valid_on(ctx.check_date))
    {
        return RuleEvaluation::pass(serde_json::json!({
            "document_type": document_type.to_string(),
            "documents": statuses,
        }));
    }

    let message = if on_file.is_empty() {
        format!("No {} on file", display_name)
    } else if on_file
        .iter()
        .any(|document| !document.is_revoked() && document.is_expired_on(ctx.check_date))
    {
        format!("{} on file has expired", display_name)
    } else {
        format!("{} on file has been revoked", display_name)
    };

    RuleEvaluation::fail(
        serde_json::json!({
            "document_type": document_type.to_string(),
            "documents": statuses,
        }),
        message,
        remediation,
        required_dates,
        Vec::new(),
    )
}

/// Non-revoked parental consent required for all minors.
pub struct ParentalConsentRule;

impl Rule for ParentalConsentRule {
    fn id(&self) -> &'static str {
        "parental_consent"
    }

    fn name(&self) -> &'static str {
        "Parental consent on file"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Documentation
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &MINOR_BANDS
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_required_document(
            ctx,
            &MINOR_BANDS,
            DocumentType::ParentalConsent,
            "parental consent",
            "Collect a signed parental consent form before the minor's next shift",
        )
    }
}

/// Non-revoked, non-expired work permit required for ages 14-17.
pub struct WorkPermitRule;

impl Rule for WorkPermitRule {
    fn id(&self) -> &'static str {
        "work_permit"
    }

    fn name(&self) -> &'static str {
        "Work permit on file"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Documentation
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages14To15, AgeBand::Ages16To17]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_required_document(
            ctx,
            &[AgeBand::Ages14To15, AgeBand::Ages16To17],
            DocumentType::WorkPermit,
            "work permit",
            "Obtain a current work permit; renew it if the previous one expired",
        )
    }
}

/// Safety-training record required for all minors.
pub struct SafetyTrainingRule;

impl Rule for SafetyTrainingRule {
    fn id(&self) -> &'static str {
        "safety_training"
    }

    fn name(&self) -> &'static str {
        "Safety training on file"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Documentation
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &MINOR_BANDS
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_required_document(
            ctx,
            &MINOR_BANDS,
            DocumentType::SafetyTraining,
            "safety training record",
            "Complete and record safety training before the minor's next shift",
        )
    }
}
