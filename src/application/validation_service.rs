//! Validation scoring service
//!
//! Compares a candidate record field-by-field against a reference record,
//! producing a boolean validity map (comparison order preserved) and an
//! accuracy ratio. This ratio measures correctness against the reference;
//! the presence ratio in a parsing report is a different number and the two
//! are never combined.

use tracing::debug;

use crate::domain::medicine::{MedicineRecord, StoredMedicine, ValidationMap, ValidationResult};
use crate::domain::schema::{MedicineField, UnknownFieldError};

/// Whether a field matches between candidate and reference.
///
/// Equality is trimmed string equality (list fields compare element-wise).
/// A field absent on either side is a mismatch - including absent on both:
/// presence is part of correctness here, so a reference that also lacks the
/// field does not rescue the candidate.
fn fields_match(candidate: &MedicineRecord, reference: &MedicineRecord, field: MedicineField) -> bool {
    match (candidate.get(field), reference.get(field)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// Score a candidate record against a reference record.
///
/// `fields` gives the comparison set and its order; the returned map
/// preserves it. `extraction_completeness` is matched / compared, and 0.0
/// for an empty comparison set.
pub fn score(
    candidate: &MedicineRecord,
    reference: &MedicineRecord,
    fields: &[MedicineField],
) -> ValidationResult {
    let mut validation = ValidationMap::default();
    for &field in fields {
        validation.push(field, fields_match(candidate, reference, field));
    }

    let extraction_completeness = if validation.is_empty() {
        0.0
    } else {
        validation.matched() as f64 / validation.len() as f64
    };

    debug!(
        compared = validation.len(),
        matched = validation.matched(),
        completeness = extraction_completeness,
        "validation scored"
    );

    ValidationResult {
        details: reference.clone(),
        validation,
        extraction_completeness,
    }
}

/// Score with field names instead of schema values.
///
/// A name outside the closed schema is a caller contract violation and
/// yields a hard error; nothing is scored in that case.
pub fn score_named(
    candidate: &MedicineRecord,
    reference: &MedicineRecord,
    names: &[&str],
) -> Result<ValidationResult, UnknownFieldError> {
    let fields = names
        .iter()
        .map(|name| MedicineField::parse(name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(score(candidate, reference, &fields))
}

/// Score a candidate against a stored record from the repository
/// collaborator.
pub fn score_against_stored(
    candidate: &MedicineRecord,
    stored: &StoredMedicine,
    fields: &[MedicineField],
) -> ValidationResult {
    score(candidate, &stored.record, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::medicine::FieldValue;
    use rstest::rstest;

    fn record_with(pairs: &[(MedicineField, &str)]) -> MedicineRecord {
        let mut record = MedicineRecord::default();
        for (field, value) in pairs {
            record.set(*field, FieldValue::Text((*value).to_string()));
        }
        record
    }

    #[test]
    fn two_mismatches_out_of_eight() {
        let reference = record_with(&[
            (MedicineField::KoreanName, "타이레놀"),
            (MedicineField::EnglishName, "Tylenol"),
            (MedicineField::Category, "해열진통제"),
            (MedicineField::Company, "한국얀센"),
            (MedicineField::Appearance, "흰색 정제"),
            (MedicineField::Efficacy, "발열 완화"),
            (MedicineField::Dosage, "1일 3회"),
            (MedicineField::StorageMethod, "실온 보관"),
        ]);
        let mut candidate = reference.clone();
        candidate.set(MedicineField::Company, FieldValue::Text("다른회사".into()));
        candidate.set(MedicineField::Dosage, FieldValue::Text("1일 1회".into()));

        let fields = [
            MedicineField::KoreanName,
            MedicineField::EnglishName,
            MedicineField::Category,
            MedicineField::Company,
            MedicineField::Appearance,
            MedicineField::Efficacy,
            MedicineField::Dosage,
            MedicineField::StorageMethod,
        ];
        let result = score(&candidate, &reference, &fields);

        assert!((result.extraction_completeness - 0.75).abs() < f64::EPSILON);
        let false_count = result.validation.iter().filter(|(_, valid)| !valid).count();
        assert_eq!(false_count, 2);
        assert_eq!(result.validation.get(MedicineField::Company), Some(false));
        assert_eq!(result.validation.get(MedicineField::Dosage), Some(false));
        assert_eq!(result.details, reference);
    }

    #[rstest]
    #[case(Some("타이레놀"), Some("타이레놀"), true)]
    #[case(Some("타이레놀"), Some("게보린"), false)]
    #[case(Some("타이레놀"), None, false)]
    #[case(None, Some("타이레놀"), false)]
    #[case(None, None, false)] // absent on both sides stays a mismatch
    fn match_policy(
        #[case] candidate_value: Option<&str>,
        #[case] reference_value: Option<&str>,
        #[case] expected: bool,
    ) {
        let mut candidate = MedicineRecord::default();
        let mut reference = MedicineRecord::default();
        if let Some(value) = candidate_value {
            candidate.set(MedicineField::KoreanName, FieldValue::Text(value.into()));
        }
        if let Some(value) = reference_value {
            reference.set(MedicineField::KoreanName, FieldValue::Text(value.into()));
        }

        let result = score(&candidate, &reference, &[MedicineField::KoreanName]);
        assert_eq!(result.validation.get(MedicineField::KoreanName), Some(expected));
    }

    #[test]
    fn list_fields_compare_element_wise() {
        let mut candidate = MedicineRecord::default();
        let mut reference = MedicineRecord::default();
        candidate.set(
            MedicineField::Ingredients,
            FieldValue::List(vec!["아세트아미노펜".into(), "전분".into()]),
        );
        reference.set(
            MedicineField::Ingredients,
            FieldValue::List(vec!["아세트아미노펜".into(), "전분".into()]),
        );

        let result = score(&candidate, &reference, &[MedicineField::Ingredients]);
        assert_eq!(result.validation.get(MedicineField::Ingredients), Some(true));

        reference.set(
            MedicineField::Ingredients,
            FieldValue::List(vec!["전분".into(), "아세트아미노펜".into()]),
        );
        let result = score(&candidate, &reference, &[MedicineField::Ingredients]);
        assert_eq!(result.validation.get(MedicineField::Ingredients), Some(false));
    }

    #[test]
    fn comparison_order_is_preserved() {
        let candidate = record_with(&[(MedicineField::Efficacy, "발열 완화")]);
        let reference = candidate.clone();

        let fields = [
            MedicineField::Efficacy,
            MedicineField::KoreanName,
            MedicineField::Category,
        ];
        let result = score(&candidate, &reference, &fields);
        let order: Vec<MedicineField> = result.validation.iter().map(|(field, _)| field).collect();
        assert_eq!(order, fields.to_vec());
    }

    #[test]
    fn unknown_name_is_a_hard_error() {
        let record = MedicineRecord::default();
        let error = score_named(&record, &record, &["koreanName", "insuranceCode"]).unwrap_err();
        assert_eq!(error, UnknownFieldError("insuranceCode".into()));
    }

    #[test]
    fn empty_comparison_set_scores_zero() {
        let record = MedicineRecord::default();
        let result = score(&record, &record, &[]);
        assert_eq!(result.extraction_completeness, 0.0);
        assert!(result.validation.is_empty());
    }

    #[test]
    fn stored_record_is_the_reference_side() {
        let reference = record_with(&[(MedicineField::KoreanName, "타이레놀")]);
        let stored = StoredMedicine::new("https://terms.naver.com/entry.naver?cid=51000", reference);
        let candidate = record_with(&[(MedicineField::KoreanName, "타이레놀")]);

        let result = score_against_stored(&candidate, &stored, &[MedicineField::KoreanName]);
        assert!((result.extraction_completeness - 1.0).abs() < f64::EPSILON);
    }
}
