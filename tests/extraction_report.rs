//! End-to-end extraction tests over realistic encyclopedia documents.

use medidict::{ExtractionService, MedicineDetailParser, MedicineField};
use proptest::prelude::*;

const FULL_DOCUMENT: &str = r#"
<!DOCTYPE html>
<html lang="ko">
<head>
  <title>타이레놀정500밀리그람 - 의약품사전</title>
  <meta name="description" content="의약품 정보: 타이레놀정500밀리그람">
</head>
<body>
  <div class="headword_title">
    <h2 class="headword">타이레놀정500밀리그람</h2>
    <span class="word_txt">Tylenol Tab. 500mg</span>
  </div>
  <div id="size_ct" class="size_ct_v2">
    <div class="profile_wrap">
      <dl>
        <dt>분류</dt><dd>해열.진통.소염제</dd>
        <dt>구분</dt><dd>일반의약품</dd>
        <dt>업체명</dt><dd>한국존슨앤드존슨판매(유)</dd>
        <dt>성상</dt><dd>흰색의 장방형 정제</dd>
        <dt>보험코드</dt><dd>642903470</dd>
        <dt>포장단위</dt><dd>10정</dd>
      </dl>
    </div>
    <div class="img_box">
      <img class="type_img" src="/imgs/medicine/tylenol500.jpg" alt="타이레놀정">
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT1">성분정보</h3>
      <p class="txt">아세트아미노펜 500mg | 스테아르산마그네슘 | 전분글리콜산나트륨</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT2">효능효과</h3>
      <p class="txt">감기로 인한 발열 및 동통(통증), 두통, 신경통, 근육통의 완화</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT3">용법용량</h3>
      <p class="txt">만 12세 이상 소아 및 성인: 1회 1~2정씩 1일 3-4회 (4-6시간 마다) 복용한다</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT4">주의사항</h3>
      <p class="txt">매일 세잔 이상 정기적으로 술을 마시는 사람은 의사 또는 약사와 상의한다</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT5">부작용</h3>
      <p class="txt">쇽, 아나필락시스양 증상이 드물게 나타날 수 있다</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT6">상호작용</h3>
      <p class="txt">바르비탈계 약물, 삼환계 항우울제와 병용 시 주의한다</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT7">저장방법</h3>
      <p class="txt">기밀용기, 실온(1~30℃) 보관</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT8">임부 및 수유부에 대한 투여</h3>
      <p class="txt">임부 또는 임신하고 있을 가능성이 있는 여성에게는 신중히 투여한다</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT9">소아에 대한 투여</h3>
      <p class="txt">만 12세 미만의 소아에게는 투여하지 않는다</p>
    </div>
    <div class="section">
      <h3 id="TABLE_OF_CONTENT10">고령자에 대한 투여</h3>
      <p class="txt">고령자에게는 감량하는 등 신중히 투여한다</p>
    </div>
    <span class="update_date">2024. 11. 18.</span>
  </div>
  <p class="cite">
    <a href="/entry.naver?docId=2134702&cid=51000&categoryId=51000">의약품사전</a>
    <a href="https://www.health.kr">약학정보원</a>
  </p>
</body>
</html>
"#;

const SOURCE_URL: &str = "https://terms.naver.com/entry.naver?docId=2134702&cid=51000";

#[test]
fn full_document_populates_every_group() {
    let service = ExtractionService::with_defaults().unwrap();
    let (record, report) = service.extract(FULL_DOCUMENT, SOURCE_URL);

    assert_eq!(record.korean_name.as_deref(), Some("타이레놀정500밀리그람"));
    assert_eq!(record.english_name.as_deref(), Some("Tylenol Tab. 500mg"));
    assert_eq!(record.category.as_deref(), Some("해열.진통.소염제"));
    assert_eq!(record.formulation.as_deref(), Some("일반의약품"));
    assert_eq!(record.company.as_deref(), Some("한국존슨앤드존슨판매(유)"));
    assert_eq!(record.appearance.as_deref(), Some("흰색의 장방형 정제"));
    assert_eq!(record.drug_code.as_deref(), Some("642903470"));
    assert_eq!(
        record.ingredients.as_deref(),
        Some(
            &[
                "아세트아미노펜 500mg".to_string(),
                "스테아르산마그네슘".to_string(),
                "전분글리콜산나트륨".to_string()
            ][..]
        )
    );
    assert!(record.efficacy.as_deref().unwrap().contains("발열"));
    assert!(record.dosage.as_deref().unwrap().contains("1회 1~2정"));
    assert!(record.precautions.is_some());
    assert!(record.side_effects.as_deref().unwrap().contains("아나필락시스"));
    assert!(record.interactions.as_deref().unwrap().contains("바르비탈계"));
    assert_eq!(record.storage_method.as_deref(), Some("기밀용기, 실온(1~30℃) 보관"));
    assert!(record.pregnancy_info.is_some());
    assert!(record.children_info.as_deref().unwrap().contains("만 12세 미만"));
    assert!(record.elderly_info.as_deref().unwrap().contains("고령자"));
    assert_eq!(
        record.image_url.as_deref(),
        Some("https://terms.naver.com/imgs/medicine/tylenol500.jpg")
    );
    assert_eq!(record.last_updated.as_deref(), Some("2024. 11. 18."));
    let references = record.reference_urls.as_deref().unwrap();
    assert_eq!(references.len(), 2);
    assert!(references[0].starts_with("https://terms.naver.com/entry.naver"));

    assert!(report.parsing_success);
    assert_eq!(report.source_url, SOURCE_URL);
    assert_eq!(report.extracted_fields.len(), 20);
    assert!(report.missing_fields.is_empty());
    assert!((report.completeness - 1.0).abs() < f64::EPSILON);
    assert!(report.parsing_errors.is_empty());
}

#[test]
fn extracted_fields_follow_schema_order() {
    let service = ExtractionService::with_defaults().unwrap();
    let (_, report) = service.extract(FULL_DOCUMENT, SOURCE_URL);

    let positions: Vec<usize> = report
        .extracted_fields
        .iter()
        .map(|field| {
            MedicineField::ALL
                .iter()
                .position(|candidate| candidate == field)
                .unwrap()
        })
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn document_serializes_with_data_and_meta_keys() {
    let service = ExtractionService::with_defaults().unwrap();
    let document = service.extract_document(FULL_DOCUMENT, SOURCE_URL);

    let json = serde_json::to_value(&document).unwrap();
    let data = json.get("data").and_then(|value| value.as_object()).unwrap();
    let meta = json.get("meta").and_then(|value| value.as_object()).unwrap();

    assert_eq!(data["koreanName"], "타이레놀정500밀리그람");
    assert_eq!(meta["sourceUrl"], SOURCE_URL);
    assert_eq!(meta["parsingSuccess"], true);
    assert_eq!(meta["extractedFields"][0], "koreanName");
    assert!(meta["completeness"].as_f64().unwrap() > 0.99);
}

#[test]
fn medicine_page_guard_accepts_the_full_document() {
    let parser = MedicineDetailParser::new().unwrap();
    assert!(parser.is_medicine_page(FULL_DOCUMENT, SOURCE_URL));
    assert!(!parser.is_medicine_page(FULL_DOCUMENT, "https://example.com/entry"));
}

#[test]
fn truncated_document_degrades_to_partial_extraction() {
    // Cut the document mid-tag to simulate a broken fetch.
    let mut mid = FULL_DOCUMENT.len() / 2;
    while !FULL_DOCUMENT.is_char_boundary(mid) {
        mid -= 1;
    }
    let truncated = &FULL_DOCUMENT[..mid];
    let service = ExtractionService::with_defaults().unwrap();
    let (record, report) = service.extract(truncated, SOURCE_URL);

    assert!(report.parsing_success);
    assert!(record.korean_name.is_some());
    assert!(report.completeness < 1.0);
    assert_eq!(
        report.extracted_fields.len() + report.missing_fields.len(),
        MedicineField::ALL.len()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn accounting_invariant_holds_for_arbitrary_input(input in ".{0,300}") {
        let parser = MedicineDetailParser::new().unwrap();
        let (_, report) = parser.extract(&input, "");

        prop_assert_eq!(
            report.extracted_fields.len() + report.missing_fields.len(),
            MedicineField::ALL.len()
        );
        prop_assert!((0.0..=1.0).contains(&report.completeness));
        let expected = report.extracted_fields.len() as f64 / MedicineField::ALL.len() as f64;
        prop_assert!((report.completeness - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn extraction_is_idempotent_for_arbitrary_fragments(
        name in "[a-zA-Z가-힣 ]{0,40}",
        junk in ".{0,120}",
    ) {
        let html = format!(
            "<div><h1 class=\"headword\">{name}</h1><p>{junk}</p><dl><dt>분류</dt><dd>{junk}</dd>"
        );
        let parser = MedicineDetailParser::new().unwrap();
        let first = parser.extract(&html, "https://terms.naver.com/entry.naver?cid=51000");
        let second = parser.extract(&html, "https://terms.naver.com/entry.naver?cid=51000");

        prop_assert_eq!(first.0, second.0);
        prop_assert_eq!(first.1, second.1);
    }
}
