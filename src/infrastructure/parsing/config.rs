//! Parsing configuration for HTML extraction
//!
//! Centralized configuration for CSS selectors and label dictionaries. Each
//! field carries an ordered fallback chain: source documents are not
//! schema-stable, and known alternative layouts are covered by appending a
//! locator rather than branching in the extraction code.

use serde::{Deserialize, Serialize};

use crate::domain::schema::MedicineField;

/// Constants for the encyclopedia source.
pub mod naver {
    /// Host used to resolve relative image and reference URLs.
    pub const BASE_URL: &str = "https://terms.naver.com";
    /// Path fragment every encyclopedia entry URL carries.
    pub const ENTRY_PATH: &str = "terms.naver.com/entry.naver";
    /// Category id parameter identifying the medicine dictionary.
    pub const DICT_CATEGORY_PARAM: &str = "cid=51000";
    /// Keyword naming the medicine dictionary in cite lines and meta tags.
    pub const DICT_KEYWORD: &str = "의약품사전";
}

/// Main parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Base URL for resolving relative links
    pub base_url: String,

    /// Medicine detail page selectors
    pub detail_selectors: MedicineDetailSelectors,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            base_url: naver::BASE_URL.to_string(),
            detail_selectors: MedicineDetailSelectors::default(),
        }
    }
}

/// CSS selectors for medicine detail pages - multiple fallbacks per field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineDetailSelectors {
    /// Main content container; document root is the last resort
    pub content_container: Vec<String>,

    /// Title (Korean name) and Latin/English name
    pub korean_name: Vec<String>,
    pub english_name: Vec<String>,

    /// Direct locators for profile-table fields
    pub drug_code: Vec<String>,
    pub formulation: Vec<String>,
    pub category: Vec<String>,
    pub company: Vec<String>,
    pub appearance: Vec<String>,

    /// Clinical section locators (container id prefixed by the section
    /// token; versioned id suffixes are matched by prefix)
    pub efficacy: Vec<String>,
    pub dosage: Vec<String>,
    pub precautions: Vec<String>,
    pub side_effects: Vec<String>,
    pub interactions: Vec<String>,
    pub storage_method: Vec<String>,

    /// Special-population section locators
    pub pregnancy_info: Vec<String>,
    pub children_info: Vec<String>,
    pub elderly_info: Vec<String>,

    /// Ingredient list items
    pub ingredients_items: Vec<String>,

    /// Image elements whose src attribute carries the value
    pub image: Vec<String>,

    /// Anchor elements whose hrefs become the reference URL list
    pub reference_links: Vec<String>,

    /// Last-updated stamp
    pub last_updated: Vec<String>,

    /// Structured data containers
    pub profile_container: Vec<String>,
    pub section_container: Vec<String>,
    pub section_heading: Vec<String>,
    pub section_content: Vec<String>,
}

impl Default for MedicineDetailSelectors {
    fn default() -> Self {
        Self {
            content_container: vec![
                "div#size_ct.size_ct_v2".to_string(),
                "div#size_ct".to_string(),
                "div.size_ct_v2".to_string(),
            ],
            korean_name: vec![
                "h1.headword".to_string(),
                "h2.headword".to_string(),
                "h3.headword".to_string(),
                "div.headword_title .headword".to_string(),
            ],
            english_name: vec![
                "p.word_txt".to_string(),
                "span.word_txt".to_string(),
                "div.headword_title .word_txt".to_string(),
            ],
            drug_code: vec![
                "dd.drug_code".to_string(),
                "[data-field='drugCode']".to_string(),
            ],
            formulation: vec![
                "dd.formulation".to_string(),
                "[data-field='formulation']".to_string(),
            ],
            category: vec![
                "dd.category".to_string(),
                "[data-field='category']".to_string(),
            ],
            company: vec![
                "dd.company".to_string(),
                "[data-field='company']".to_string(),
            ],
            appearance: vec![
                "dd.appearance".to_string(),
                "[data-field='appearance']".to_string(),
            ],
            efficacy: vec![
                "div[id^='efficacy']".to_string(),
                "div.efficacy".to_string(),
            ],
            dosage: vec![
                "div[id^='dosage']".to_string(),
                "div.dosage".to_string(),
            ],
            precautions: vec![
                "div[id^='precautions']".to_string(),
                "div.precautions".to_string(),
            ],
            side_effects: vec![
                "div[id^='side_effects']".to_string(),
                "div[id^='side-effects']".to_string(),
                "div.side_effects".to_string(),
            ],
            interactions: vec![
                "div[id^='interactions']".to_string(),
                "div.interactions".to_string(),
            ],
            storage_method: vec![
                "div[id^='storage']".to_string(),
                "div.storage_method".to_string(),
            ],
            pregnancy_info: vec![
                "div[id^='pregnancy']".to_string(),
                "div.pregnancy_info".to_string(),
            ],
            children_info: vec![
                "div[id^='children']".to_string(),
                "div.children_info".to_string(),
            ],
            elderly_info: vec![
                "div[id^='elderly']".to_string(),
                "div.elderly_info".to_string(),
            ],
            ingredients_items: vec![
                "div[id^='ingredients'] li".to_string(),
                "ul.ingredient_list li".to_string(),
                "div.ingredients li".to_string(),
            ],
            image: vec![
                "img.type_img".to_string(),
                "div.img_box img".to_string(),
                "img.medicine_img".to_string(),
                "#medicine_image_section img".to_string(),
            ],
            reference_links: vec![
                "p.cite a".to_string(),
                "div.reference a".to_string(),
                "ul.reference_list a".to_string(),
                "div.source_area a".to_string(),
            ],
            last_updated: vec![
                "span.update_date".to_string(),
                "p.update_date".to_string(),
                "div.date_info .date".to_string(),
                "span.last_update".to_string(),
            ],
            profile_container: vec![
                "div.profile_wrap".to_string(),
                "div.tmp_profile".to_string(),
                "div.profile_info".to_string(),
                "#profile_section".to_string(),
            ],
            section_container: vec![
                "div.section".to_string(),
                "div.section_content".to_string(),
                "div.detail_section".to_string(),
                "div.medicine_info".to_string(),
            ],
            section_heading: vec!["h3".to_string(), "h4".to_string()],
            section_content: vec![
                "div.content".to_string(),
                "p.txt".to_string(),
                "div.txt".to_string(),
            ],
        }
    }
}

/// Exact-match dictionary from profile table labels to schema fields.
///
/// Labels not listed here are ignored, not errors.
pub fn profile_label_map() -> &'static [(&'static str, MedicineField)] {
    &[
        ("분류", MedicineField::Category),
        ("업체명", MedicineField::Company),
        ("제조사", MedicineField::Company),
        ("성상", MedicineField::Appearance),
        ("구분", MedicineField::Formulation),
        ("제형", MedicineField::Formulation),
        ("보험코드", MedicineField::DrugCode),
        ("품목기준코드", MedicineField::DrugCode),
    ]
}

/// Containment-match dictionary from section headings to schema fields.
///
/// Entries are checked in order and the first key contained in the heading
/// wins, so longer keys come before their substrings.
pub fn section_label_map() -> &'static [(&'static str, MedicineField)] {
    &[
        ("성분정보", MedicineField::Ingredients),
        ("성분", MedicineField::Ingredients),
        ("효능효과", MedicineField::Efficacy),
        ("효능", MedicineField::Efficacy),
        ("용법용량", MedicineField::Dosage),
        ("용법", MedicineField::Dosage),
        ("주의사항", MedicineField::Precautions),
        ("이상반응", MedicineField::SideEffects),
        ("부작용", MedicineField::SideEffects),
        ("상호작용", MedicineField::Interactions),
        ("저장방법", MedicineField::StorageMethod),
        ("보관방법", MedicineField::StorageMethod),
        ("임산부", MedicineField::PregnancyInfo),
        ("임부", MedicineField::PregnancyInfo),
        ("수유부", MedicineField::PregnancyInfo),
        ("소아", MedicineField::ChildrenInfo),
        ("어린이", MedicineField::ChildrenInfo),
        ("고령자", MedicineField::ElderlyInfo),
        ("노인", MedicineField::ElderlyInfo),
    ]
}
