//! Medicine detail page parser
//!
//! Extracts a medicine record from a detail page using per-field selector
//! fallback chains, a label/value profile table walk, and a titled-section
//! scan. Extraction is best-effort: a field that fails leaves an error
//! message in the report and the run continues.

use std::collections::HashMap;

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::config::{naver, profile_label_map, section_label_map, MedicineDetailSelectors, ParsingConfig};
use super::context::DetailParseContext;
use super::error::{ParsingError, ParsingResult};
use super::ContextualParser;
use crate::domain::medicine::{FieldValue, MedicineRecord, ParsingReport};
use crate::domain::schema::{FieldGroup, MedicineField};
use crate::utils::clean_text;

/// Parser for extracting medicine information from detail pages
pub struct MedicineDetailParser {
    /// Direct per-field selector chains, first non-empty match wins
    field_chains: Vec<(MedicineField, Vec<Selector>)>,

    /// Compiled selectors for structured containers
    content_container: Vec<Selector>,
    profile_container: Vec<Selector>,
    section_container: Vec<Selector>,
    section_heading: Vec<Selector>,
    section_content: Vec<Selector>,

    /// Field-specific selectors
    ingredients_items: Vec<Selector>,
    image: Vec<Selector>,
    reference_links: Vec<Selector>,

    /// Page identification selectors
    label_selector: Selector,
    cite_selector: Selector,
    meta_selector: Selector,

    /// Label dictionaries
    profile_labels: &'static [(&'static str, MedicineField)],
    section_labels: &'static [(&'static str, MedicineField)],
}

impl MedicineDetailParser {
    /// Create a new parser with the default selector configuration
    pub fn new() -> Result<Self> {
        let config = ParsingConfig::default();
        Self::with_config(&config.detail_selectors)
    }

    /// Create a parser with a custom selector configuration
    pub fn with_config(selectors: &MedicineDetailSelectors) -> Result<Self> {
        let field_chains = vec![
            (MedicineField::KoreanName, Self::compile_selectors("koreanName", &selectors.korean_name)?),
            (MedicineField::EnglishName, Self::compile_selectors("englishName", &selectors.english_name)?),
            (MedicineField::DrugCode, Self::compile_selectors("drugCode", &selectors.drug_code)?),
            (MedicineField::Formulation, Self::compile_selectors("formulation", &selectors.formulation)?),
            (MedicineField::Category, Self::compile_selectors("category", &selectors.category)?),
            (MedicineField::Company, Self::compile_selectors("company", &selectors.company)?),
            (MedicineField::Appearance, Self::compile_selectors("appearance", &selectors.appearance)?),
            (MedicineField::Efficacy, Self::compile_selectors("efficacy", &selectors.efficacy)?),
            (MedicineField::Dosage, Self::compile_selectors("dosage", &selectors.dosage)?),
            (MedicineField::Precautions, Self::compile_selectors("precautions", &selectors.precautions)?),
            (MedicineField::SideEffects, Self::compile_selectors("sideEffects", &selectors.side_effects)?),
            (MedicineField::Interactions, Self::compile_selectors("interactions", &selectors.interactions)?),
            (MedicineField::StorageMethod, Self::compile_selectors("storageMethod", &selectors.storage_method)?),
            (MedicineField::PregnancyInfo, Self::compile_selectors("pregnancyInfo", &selectors.pregnancy_info)?),
            (MedicineField::ChildrenInfo, Self::compile_selectors("childrenInfo", &selectors.children_info)?),
            (MedicineField::ElderlyInfo, Self::compile_selectors("elderlyInfo", &selectors.elderly_info)?),
            (MedicineField::LastUpdated, Self::compile_selectors("lastUpdated", &selectors.last_updated)?),
        ];

        Ok(Self {
            field_chains,
            content_container: Self::compile_selectors("content container", &selectors.content_container)?,
            profile_container: Self::compile_selectors("profile container", &selectors.profile_container)?,
            section_container: Self::compile_selectors("section container", &selectors.section_container)?,
            section_heading: Self::compile_selectors("section heading", &selectors.section_heading)?,
            section_content: Self::compile_selectors("section content", &selectors.section_content)?,
            ingredients_items: Self::compile_selectors("ingredients", &selectors.ingredients_items)?,
            image: Self::compile_selectors("image", &selectors.image)?,
            reference_links: Self::compile_selectors("reference links", &selectors.reference_links)?,
            label_selector: Self::compile_selector("dt")?,
            cite_selector: Self::compile_selector("p.cite")?,
            meta_selector: Self::compile_selector("meta")?,
            profile_labels: profile_label_map(),
            section_labels: section_label_map(),
        })
    }

    /// Extract a record and its report from raw HTML.
    ///
    /// Never fails: malformed markup, absent fields, and blank input all
    /// degrade into the report. The caller owns the returned pair.
    pub fn extract(&self, raw_html: &str, source_url: &str) -> (MedicineRecord, ParsingReport) {
        let context = DetailParseContext::new(source_url);
        self.extract_with_context(raw_html, &context)
    }

    /// Extract with an explicit context (base URL override).
    pub fn extract_with_context(
        &self,
        raw_html: &str,
        context: &DetailParseContext,
    ) -> (MedicineRecord, ParsingReport) {
        let mut record = MedicineRecord::default();
        let mut report = ParsingReport::new(context.url.clone());

        if raw_html.trim().is_empty() {
            debug!(url = %context.url, "blank document, nothing to extract");
            report.recompute();
            return (record, report);
        }

        let html = Html::parse_document(raw_html);
        if !html.errors.is_empty() {
            debug!(
                url = %context.url,
                errors = html.errors.len(),
                "tolerated HTML parse errors"
            );
        }

        let root = self.content_root(&html);
        let base = Url::parse(&context.base_url)
            .or_else(|_| Url::parse(naver::BASE_URL))
            .ok();

        let profile = self.scan_profile(root);
        let sections = self.scan_sections(root);

        for field in MedicineField::ALL {
            match self.extract_field(&html, root, base.as_ref(), field, &profile, &sections) {
                Ok(Some(value)) => {
                    if record.set(field, value) {
                        report.extracted_fields.push(field);
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(url = %context.url, field = field.name(), %error, "field extraction failed");
                    report.parsing_errors.push(format!("{}: {error}", field.name()));
                }
            }
        }

        report.recompute();
        debug!(
            url = %context.url,
            extracted = report.extracted_fields.len(),
            completeness = report.completeness,
            "extraction finished"
        );
        (record, report)
    }

    /// Whether the document looks like a medicine dictionary entry.
    ///
    /// Redirected search hits and entries from sibling dictionaries share
    /// the same host, so the URL check alone is not enough.
    pub fn is_medicine_page(&self, raw_html: &str, url: &str) -> bool {
        if !url.contains(naver::ENTRY_PATH) || !url.contains(naver::DICT_CATEGORY_PARAM) {
            return false;
        }

        let html = Html::parse_document(raw_html);
        if self.first_text(&html, self.chain(MedicineField::KoreanName)).is_none() {
            return false;
        }

        if let Some(cite) = html.select(&self.cite_selector).next() {
            if cite.text().collect::<String>().contains(naver::DICT_KEYWORD) {
                return true;
            }
        }
        html.select(&self.meta_selector).any(|meta| {
            meta.value()
                .attr("content")
                .is_some_and(|content| content.contains("의약품"))
        })
    }

    /// Compile selector strings, skipping invalid entries.
    ///
    /// A chain where nothing compiles is a configuration error.
    fn compile_selectors(what: &str, selector_strings: &[String]) -> Result<Vec<Selector>> {
        let mut selectors = Vec::new();
        let mut errors = Vec::new();

        for raw in selector_strings {
            match Selector::parse(raw) {
                Ok(selector) => selectors.push(selector),
                Err(reason) => {
                    let error = ParsingError::invalid_selector(raw, reason);
                    warn!(chain = what, %error, "skipping selector");
                    errors.push(error.to_string());
                }
            }
        }

        if selectors.is_empty() && !selector_strings.is_empty() {
            return Err(ParsingError::configuration(format!(
                "no valid selectors for {what}: {}",
                errors.join(", ")
            ))
            .into());
        }
        Ok(selectors)
    }

    fn compile_selector(raw: &str) -> Result<Selector> {
        Selector::parse(raw).map_err(|reason| ParsingError::invalid_selector(raw, reason).into())
    }

    /// Main content container, falling back to the document root.
    fn content_root<'a>(&self, html: &'a Html) -> ElementRef<'a> {
        for selector in &self.content_container {
            if let Some(element) = html.select(selector).next() {
                return element;
            }
        }
        html.root_element()
    }

    /// Walk the profile table once: label elements mapped through the
    /// exact-match dictionary, values from the structurally adjacent
    /// element. Unrecognized labels are ignored.
    fn scan_profile(&self, root: ElementRef<'_>) -> HashMap<MedicineField, String> {
        let mut entries = HashMap::new();

        let mut containers: Vec<ElementRef> = Vec::new();
        for selector in &self.profile_container {
            containers.extend(root.select(selector));
            if !containers.is_empty() {
                break;
            }
        }
        if containers.is_empty() {
            containers.push(root);
        }

        for container in containers {
            for label_element in container.select(&self.label_selector) {
                let label = clean_text(&label_element.text().collect::<String>());
                let Some(field) = self
                    .profile_labels
                    .iter()
                    .find(|(key, _)| *key == label)
                    .map(|(_, field)| *field)
                else {
                    continue;
                };

                let Some(value_element) = label_element
                    .next_siblings()
                    .filter_map(ElementRef::wrap)
                    .next()
                else {
                    continue;
                };
                if value_element.value().name() != "dd" {
                    continue;
                }

                let value = clean_text(&value_element.text().collect::<String>());
                if !value.is_empty() {
                    entries.entry(field).or_insert(value);
                }
            }
        }
        entries
    }

    /// Walk titled sections once: headings mapped through the containment
    /// dictionary, content from the known content locators.
    fn scan_sections(&self, root: ElementRef<'_>) -> HashMap<MedicineField, String> {
        let mut entries = HashMap::new();

        let mut containers: Vec<ElementRef> = Vec::new();
        for selector in &self.section_container {
            containers.extend(root.select(selector));
            if !containers.is_empty() {
                break;
            }
        }

        for section in containers {
            let Some(heading) = self.first_element(section, &self.section_heading) else {
                continue;
            };
            let title = clean_text(&heading.text().collect::<String>());
            if title.is_empty() {
                continue;
            }
            let Some(field) = self
                .section_labels
                .iter()
                .find(|(key, _)| title.contains(*key))
                .map(|(_, field)| *field)
            else {
                continue;
            };
            let Some(content) = self.section_content_text(section) else {
                continue;
            };
            entries.entry(field).or_insert(content);
        }
        entries
    }

    /// Apply one field's rules: direct chain first, then the profile and
    /// section dictionaries.
    fn extract_field(
        &self,
        html: &Html,
        root: ElementRef<'_>,
        base: Option<&Url>,
        field: MedicineField,
        profile: &HashMap<MedicineField, String>,
        sections: &HashMap<MedicineField, String>,
    ) -> ParsingResult<Option<FieldValue>> {
        match field {
            MedicineField::ImageUrl => self.extract_image(root, base),
            MedicineField::ReferenceUrls => Ok(self.extract_reference_urls(html, base)),
            MedicineField::Ingredients => Ok(self.extract_ingredients(root, sections)),
            _ => {
                let is_section = matches!(
                    field.group(),
                    FieldGroup::Clinical | FieldGroup::SpecialPopulation
                );
                let direct = if is_section {
                    self.first_container_text(html, self.chain(field))
                } else {
                    self.first_text(html, self.chain(field))
                };
                Ok(direct
                    .or_else(|| profile.get(&field).cloned())
                    .or_else(|| sections.get(&field).cloned())
                    .map(FieldValue::Text))
            }
        }
    }

    fn chain(&self, field: MedicineField) -> &[Selector] {
        self.field_chains
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, chain)| chain.as_slice())
            .unwrap_or(&[])
    }

    /// First selector in the chain whose first match has non-empty text.
    fn first_text(&self, html: &Html, selectors: &[Selector]) -> Option<String> {
        for selector in selectors {
            if let Some(element) = html.select(selector).next() {
                let text = clean_text(&element.text().collect::<String>());
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Like [`Self::first_text`], but the matched element is a section
    /// container: prefer its content locators, fall back to inline text.
    fn first_container_text(&self, html: &Html, selectors: &[Selector]) -> Option<String> {
        for selector in selectors {
            if let Some(element) = html.select(selector).next() {
                if let Some(text) = self.container_text(element) {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Content of a section located by its heading: content locators only.
    fn section_content_text(&self, section: ElementRef<'_>) -> Option<String> {
        for selector in &self.section_content {
            for element in section.select(selector) {
                let text = clean_text(&element.text().collect::<String>());
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Content of a directly located container: content locators, then the
    /// container's own text.
    fn container_text(&self, container: ElementRef<'_>) -> Option<String> {
        if let Some(text) = self.section_content_text(container) {
            return Some(text);
        }
        let text = clean_text(&container.text().collect::<String>());
        (!text.is_empty()).then_some(text)
    }

    /// Image URL from the src-equivalent attribute of the first matching
    /// element, resolved absolute.
    fn extract_image(
        &self,
        root: ElementRef<'_>,
        base: Option<&Url>,
    ) -> ParsingResult<Option<FieldValue>> {
        for selector in &self.image {
            for element in root.select(selector) {
                for attr in ["src", "data-src"] {
                    if let Some(src) = element.value().attr(attr) {
                        let src = src.trim();
                        if !src.is_empty() {
                            let resolved = resolve_link(base, src)?;
                            return Ok(Some(FieldValue::Text(resolved)));
                        }
                    }
                }
            }
        }
        Ok(None)
    }

    /// All hrefs under the first matching reference container, resolved
    /// absolute, order kept, duplicates dropped. An unresolvable href is
    /// skipped rather than failing the whole list.
    ///
    /// Cite lines sit outside the main content container, so this scans the
    /// whole document.
    fn extract_reference_urls(&self, html: &Html, base: Option<&Url>) -> Option<FieldValue> {
        for selector in &self.reference_links {
            let mut urls: Vec<String> = Vec::new();
            for element in html.select(selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };
                let href = href.trim();
                if href.is_empty() || href == "#" || href.starts_with("javascript:") {
                    continue;
                }
                match resolve_link(base, href) {
                    Ok(resolved) => {
                        if !urls.contains(&resolved) {
                            urls.push(resolved);
                        }
                    }
                    Err(error) => debug!(href, %error, "skipping unresolvable reference link"),
                }
            }
            if !urls.is_empty() {
                return Some(FieldValue::List(urls));
            }
        }
        None
    }

    /// Ingredient list items, falling back to splitting the ingredients
    /// section text.
    fn extract_ingredients(
        &self,
        root: ElementRef<'_>,
        sections: &HashMap<MedicineField, String>,
    ) -> Option<FieldValue> {
        for selector in &self.ingredients_items {
            let items: Vec<String> = root
                .select(selector)
                .map(|element| clean_text(&element.text().collect::<String>()))
                .filter(|item| !item.is_empty())
                .collect();
            if !items.is_empty() {
                return Some(FieldValue::List(items));
            }
        }
        sections
            .get(&MedicineField::Ingredients)
            .map(|text| FieldValue::List(split_list_text(text)))
    }

    fn first_element<'a>(
        &self,
        scope: ElementRef<'a>,
        selectors: &[Selector],
    ) -> Option<ElementRef<'a>> {
        selectors
            .iter()
            .find_map(|selector| scope.select(selector).next())
    }
}

impl ContextualParser for MedicineDetailParser {
    type Output = (MedicineRecord, ParsingReport);
    type Context = DetailParseContext;

    fn parse_with_context(
        &self,
        html: &str,
        context: &Self::Context,
    ) -> ParsingResult<Self::Output> {
        Ok(self.extract_with_context(html, context))
    }
}

/// Resolve a possibly relative link against the base URL.
fn resolve_link(base: Option<&Url>, link: &str) -> ParsingResult<String> {
    if let Ok(absolute) = Url::parse(link) {
        return Ok(absolute.to_string());
    }
    let base = base.ok_or_else(|| ParsingError::url_resolution_failed(link, "no base URL"))?;
    base.join(link)
        .map(|url| url.to_string())
        .map_err(|reason| ParsingError::url_resolution_failed(link, reason))
}

/// Split a plain-text ingredient blob into its ordered items.
fn split_list_text(text: &str) -> Vec<String> {
    text.split(|c: char| c == '|' || c == ',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
