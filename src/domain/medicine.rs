//! Medicine record entities and extraction/validation report types
//!
//! A [`MedicineRecord`] is the canonical extracted entity: every field is
//! optional, and absence is meaningful. Values are always trimmed and never
//! empty; an empty extraction result is stored as absent.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

use crate::domain::schema::MedicineField;

/// A single field value: plain text, or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Trim the value and drop it entirely if nothing remains.
    ///
    /// Empty strings and empty lists collapse to `None`, so a record can
    /// never hold a present-but-empty field.
    pub fn normalized(self) -> Option<FieldValue> {
        match self {
            FieldValue::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(FieldValue::Text(text.to_string()))
                }
            }
            FieldValue::List(items) => {
                let items: Vec<String> = items
                    .into_iter()
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some(FieldValue::List(items))
                }
            }
        }
    }
}

/// Canonical medicine information extracted from a detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MedicineRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub korean_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formulation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficacy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precautions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elderly_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl MedicineRecord {
    /// Read a field generically.
    pub fn get(&self, field: MedicineField) -> Option<FieldValue> {
        let text = |value: &Option<String>| value.clone().map(FieldValue::Text);
        let list = |value: &Option<Vec<String>>| value.clone().map(FieldValue::List);

        match field {
            MedicineField::KoreanName => text(&self.korean_name),
            MedicineField::EnglishName => text(&self.english_name),
            MedicineField::DrugCode => text(&self.drug_code),
            MedicineField::Formulation => text(&self.formulation),
            MedicineField::Category => text(&self.category),
            MedicineField::Company => text(&self.company),
            MedicineField::Appearance => text(&self.appearance),
            MedicineField::Ingredients => list(&self.ingredients),
            MedicineField::Efficacy => text(&self.efficacy),
            MedicineField::Dosage => text(&self.dosage),
            MedicineField::Precautions => text(&self.precautions),
            MedicineField::SideEffects => text(&self.side_effects),
            MedicineField::Interactions => text(&self.interactions),
            MedicineField::StorageMethod => text(&self.storage_method),
            MedicineField::PregnancyInfo => text(&self.pregnancy_info),
            MedicineField::ChildrenInfo => text(&self.children_info),
            MedicineField::ElderlyInfo => text(&self.elderly_info),
            MedicineField::ImageUrl => text(&self.image_url),
            MedicineField::ReferenceUrls => list(&self.reference_urls),
            MedicineField::LastUpdated => text(&self.last_updated),
        }
    }

    /// Store a field generically. The value is normalized first; empty
    /// values leave the field absent. Returns whether a value was stored.
    ///
    /// A list value assigned to a text field is joined with `", "`; a text
    /// value assigned to a list field becomes a single-element list.
    pub fn set(&mut self, field: MedicineField, value: FieldValue) -> bool {
        let Some(value) = value.normalized() else {
            return false;
        };

        let as_text = |value: FieldValue| match value {
            FieldValue::Text(text) => text,
            FieldValue::List(items) => items.join(", "),
        };
        let as_list = |value: FieldValue| match value {
            FieldValue::Text(text) => vec![text],
            FieldValue::List(items) => items,
        };

        match field {
            MedicineField::KoreanName => self.korean_name = Some(as_text(value)),
            MedicineField::EnglishName => self.english_name = Some(as_text(value)),
            MedicineField::DrugCode => self.drug_code = Some(as_text(value)),
            MedicineField::Formulation => self.formulation = Some(as_text(value)),
            MedicineField::Category => self.category = Some(as_text(value)),
            MedicineField::Company => self.company = Some(as_text(value)),
            MedicineField::Appearance => self.appearance = Some(as_text(value)),
            MedicineField::Ingredients => self.ingredients = Some(as_list(value)),
            MedicineField::Efficacy => self.efficacy = Some(as_text(value)),
            MedicineField::Dosage => self.dosage = Some(as_text(value)),
            MedicineField::Precautions => self.precautions = Some(as_text(value)),
            MedicineField::SideEffects => self.side_effects = Some(as_text(value)),
            MedicineField::Interactions => self.interactions = Some(as_text(value)),
            MedicineField::StorageMethod => self.storage_method = Some(as_text(value)),
            MedicineField::PregnancyInfo => self.pregnancy_info = Some(as_text(value)),
            MedicineField::ChildrenInfo => self.children_info = Some(as_text(value)),
            MedicineField::ElderlyInfo => self.elderly_info = Some(as_text(value)),
            MedicineField::ImageUrl => self.image_url = Some(as_text(value)),
            MedicineField::ReferenceUrls => self.reference_urls = Some(as_list(value)),
            MedicineField::LastUpdated => self.last_updated = Some(as_text(value)),
        }
        true
    }

    /// Fields currently carrying a value, in schema order.
    pub fn populated_fields(&self) -> Vec<MedicineField> {
        MedicineField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.populated_fields().is_empty()
    }

    /// Content hash over all populated fields, in schema order.
    ///
    /// Used by the store collaborator for change detection: two records with
    /// identical field values hash identically regardless of how they were
    /// obtained.
    pub fn data_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for field in MedicineField::ALL {
            match self.get(field) {
                Some(FieldValue::Text(text)) => {
                    hasher.update(field.name().as_bytes());
                    hasher.update(b"=");
                    hasher.update(text.as_bytes());
                    hasher.update(b"\n");
                }
                Some(FieldValue::List(items)) => {
                    hasher.update(field.name().as_bytes());
                    hasher.update(b"=");
                    for item in &items {
                        hasher.update(item.as_bytes());
                        hasher.update(b"|");
                    }
                    hasher.update(b"\n");
                }
                None => {}
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Outcome metadata for a single extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParsingReport {
    /// Origin of the document; empty when unknown.
    pub source_url: String,
    /// True iff at least one field was extracted.
    pub parsing_success: bool,
    /// Fields actually populated, in schema order.
    pub extracted_fields: Vec<MedicineField>,
    /// Schema-order complement of `extracted_fields`.
    pub missing_fields: Vec<MedicineField>,
    /// Error messages accumulated during the run; extraction continues past
    /// individual field failures.
    pub parsing_errors: Vec<String>,
    /// |extracted| / |schema|, in [0, 1]. Measures presence, not
    /// correctness; the validation scorer's ratio is a separate number.
    pub completeness: f64,
}

impl ParsingReport {
    /// Fresh report for a run that has not extracted anything yet.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            parsing_success: false,
            extracted_fields: Vec::new(),
            missing_fields: MedicineField::ALL.to_vec(),
            parsing_errors: Vec::new(),
            completeness: 0.0,
        }
    }

    /// Re-derive missing fields, the success flag, and completeness from
    /// `extracted_fields`. Called once at the end of extraction, and again
    /// by callers that enrich the record afterwards.
    pub fn recompute(&mut self) {
        self.missing_fields = MedicineField::ALL
            .into_iter()
            .filter(|field| !self.extracted_fields.contains(field))
            .collect();
        self.parsing_success = !self.extracted_fields.is_empty();
        self.completeness = self.extracted_fields.len() as f64 / MedicineField::ALL.len() as f64;
    }
}

/// Serializable extraction output: the record plus its report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MedicineDocument {
    pub data: MedicineRecord,
    pub meta: ParsingReport,
}

/// Per-field validation outcome, preserving the caller's comparison order.
///
/// Serializes as a JSON object whose key order is the comparison order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationMap(Vec<(MedicineField, bool)>);

impl ValidationMap {
    pub fn push(&mut self, field: MedicineField, valid: bool) {
        self.0.push((field, valid));
    }

    pub fn get(&self, field: MedicineField) -> Option<bool> {
        self.0
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, valid)| *valid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MedicineField, bool)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields that validated.
    pub fn matched(&self) -> usize {
        self.0.iter().filter(|(_, valid)| *valid).count()
    }
}

impl Serialize for ValidationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, valid) in &self.0 {
            map.serialize_entry(field.name(), valid)?;
        }
        map.end()
    }
}

/// Result of comparing a candidate record against a reference record.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidationResult {
    /// The reference record the candidate was compared against.
    pub details: MedicineRecord,
    /// Field-by-field verdicts, in comparison order.
    #[ts(type = "Record<string, boolean>")]
    pub validation: ValidationMap,
    /// Correct fields / compared fields, in [0, 1]. An accuracy metric;
    /// not the presence ratio a `ParsingReport` carries.
    pub extraction_completeness: f64,
}

/// A medicine record as held by the backing store collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoredMedicine {
    pub id: Option<i64>,
    pub url: String,
    #[serde(flatten)]
    pub record: MedicineRecord,
    pub data_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredMedicine {
    pub fn new(url: impl Into<String>, record: MedicineRecord) -> Self {
        let now = Utc::now();
        let data_hash = Some(record.data_hash());
        Self {
            id: None,
            url: url.into(),
            record,
            data_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Minimum shape required before the store accepts the entry.
    pub fn is_valid(&self) -> bool {
        !self.url.is_empty() && self.record.korean_name.is_some()
    }

    /// Refresh the content hash after mutating the record.
    pub fn refresh_hash(&mut self) {
        self.data_hash = Some(self.record.data_hash());
        self.updated_at = Utc::now();
    }
}
