//! Field schema registry for medicine records
//!
//! The single authoritative list of fields a medicine record may carry.
//! Both the document extractor and the validation scorer consume this
//! registry; no other module declares its own field list.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// A field name outside the closed schema was supplied at an API boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown medicine field: '{0}'")]
pub struct UnknownFieldError(pub String);

/// Semantic grouping of schema fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FieldGroup {
    Identity,
    Classification,
    Descriptive,
    Clinical,
    SpecialPopulation,
    Media,
}

/// The closed set of recognized medicine record fields.
///
/// Declaration order is the canonical schema order: extraction walks fields
/// in this order and reports use it for extracted/missing accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum MedicineField {
    KoreanName,
    EnglishName,
    DrugCode,
    Formulation,
    Category,
    Company,
    Appearance,
    Ingredients,
    Efficacy,
    Dosage,
    Precautions,
    SideEffects,
    Interactions,
    StorageMethod,
    PregnancyInfo,
    ChildrenInfo,
    ElderlyInfo,
    ImageUrl,
    ReferenceUrls,
    LastUpdated,
}

impl MedicineField {
    /// Every schema field, in canonical schema order.
    pub const ALL: [MedicineField; 20] = [
        MedicineField::KoreanName,
        MedicineField::EnglishName,
        MedicineField::DrugCode,
        MedicineField::Formulation,
        MedicineField::Category,
        MedicineField::Company,
        MedicineField::Appearance,
        MedicineField::Ingredients,
        MedicineField::Efficacy,
        MedicineField::Dosage,
        MedicineField::Precautions,
        MedicineField::SideEffects,
        MedicineField::Interactions,
        MedicineField::StorageMethod,
        MedicineField::PregnancyInfo,
        MedicineField::ChildrenInfo,
        MedicineField::ElderlyInfo,
        MedicineField::ImageUrl,
        MedicineField::ReferenceUrls,
        MedicineField::LastUpdated,
    ];

    /// Wire name of the field, as used in serialized records and reports.
    pub fn name(self) -> &'static str {
        match self {
            MedicineField::KoreanName => "koreanName",
            MedicineField::EnglishName => "englishName",
            MedicineField::DrugCode => "drugCode",
            MedicineField::Formulation => "formulation",
            MedicineField::Category => "category",
            MedicineField::Company => "company",
            MedicineField::Appearance => "appearance",
            MedicineField::Ingredients => "ingredients",
            MedicineField::Efficacy => "efficacy",
            MedicineField::Dosage => "dosage",
            MedicineField::Precautions => "precautions",
            MedicineField::SideEffects => "sideEffects",
            MedicineField::Interactions => "interactions",
            MedicineField::StorageMethod => "storageMethod",
            MedicineField::PregnancyInfo => "pregnancyInfo",
            MedicineField::ChildrenInfo => "childrenInfo",
            MedicineField::ElderlyInfo => "elderlyInfo",
            MedicineField::ImageUrl => "imageUrl",
            MedicineField::ReferenceUrls => "referenceUrls",
            MedicineField::LastUpdated => "lastUpdated",
        }
    }

    /// Semantic group the field belongs to.
    pub fn group(self) -> FieldGroup {
        match self {
            MedicineField::KoreanName
            | MedicineField::EnglishName
            | MedicineField::DrugCode
            | MedicineField::Formulation => FieldGroup::Identity,
            MedicineField::Category | MedicineField::Company => FieldGroup::Classification,
            MedicineField::Appearance | MedicineField::Ingredients => FieldGroup::Descriptive,
            MedicineField::Efficacy
            | MedicineField::Dosage
            | MedicineField::Precautions
            | MedicineField::SideEffects
            | MedicineField::Interactions
            | MedicineField::StorageMethod => FieldGroup::Clinical,
            MedicineField::PregnancyInfo
            | MedicineField::ChildrenInfo
            | MedicineField::ElderlyInfo => FieldGroup::SpecialPopulation,
            MedicineField::ImageUrl
            | MedicineField::ReferenceUrls
            | MedicineField::LastUpdated => FieldGroup::Media,
        }
    }

    /// Whether the field carries an ordered list of strings rather than a
    /// single text value.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            MedicineField::Ingredients | MedicineField::ReferenceUrls
        )
    }

    /// Resolve a wire name back to a schema field.
    ///
    /// Names outside the schema are a caller contract violation and yield a
    /// hard error rather than being silently dropped.
    pub fn parse(name: &str) -> Result<Self, UnknownFieldError> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| UnknownFieldError(name.to_string()))
    }
}
