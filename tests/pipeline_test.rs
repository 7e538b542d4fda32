/// End-to-end pipeline tests over static markup: classification, container
/// location, extraction and cross-page dedup working together the way a
/// scan drives them.
///
/// Covers:
/// - platform pages (greenhouse by URL, lever and workday by markup)
/// - the generic class-pattern and heading fallbacks
/// - keyword gating of non-matching containers
/// - duplicate collapsing across pages, including tracking-query URLs
/// - report files written from pipeline output
use job_scout::{
    dedupe, extract_page, DedupIndex, ExtractOptions, JobBoard, JobRecord, PageInput, ScanConfig,
    Taxonomy,
};

fn taxonomy() -> Taxonomy {
    Taxonomy::load(["senior product manager", "product manager", "business analyst", "remote"])
}

fn page(company: &str, url: &str, html: &str) -> PageInput {
    PageInput { company: company.to_string(), url: url.to_string(), html: html.to_string() }
}

/// Feed pages through extraction and a shared dedup index in order, the
/// same shape the scan aggregation uses.
fn scan_pages(pages: &[PageInput], taxonomy: &Taxonomy, fuzzy: bool) -> Vec<JobRecord> {
    let options = ExtractOptions::default();
    let mut index = DedupIndex::new(fuzzy);
    let mut kept = Vec::new();
    for page in pages {
        kept.extend(dedupe(extract_page(page, taxonomy, &options), &mut index));
    }
    kept
}

const GREENHOUSE_PAGE: &str = r#"
<section>
  <div class="opening">
    <a data-qa="opening-title" href="/acme/jobs/101">Senior Product Manager</a>
    <span data-qa="opening-location">Remote - US</span>
  </div>
  <div class="opening">
    <a data-qa="opening-title" href="/acme/jobs/102">Staff Accountant</a>
    <span data-qa="opening-location">Austin, TX</span>
  </div>
  <div class="opening">
    <a data-qa="opening-title" href="/acme/jobs/103">Product Manager, Mobile</a>
    <span data-qa="opening-location">Berlin</span>
  </div>
</section>"#;

#[test]
fn greenhouse_page_extracts_only_keyword_matched_openings() {
    let records = extract_page(
        &page("Acme", "https://boards.greenhouse.io/acme", GREENHOUSE_PAGE),
        &taxonomy(),
        &ExtractOptions::default(),
    );

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Senior Product Manager");
    assert_eq!(records[0].url, "https://boards.greenhouse.io/acme/jobs/101");
    assert_eq!(records[0].location.as_deref(), Some("Remote - US"));
    assert!(records[0].modifier_matches.contains(&"remote".to_string()));
    assert_eq!(records[1].title, "Product Manager, Mobile");
    assert!(records.iter().all(|r| r.source == JobBoard::Greenhouse));
    assert!(records.iter().all(|r| !r.core_matches.is_empty()));
}

#[test]
fn generic_job_card_page_end_to_end() {
    let html = r#"
        <div class="job-card">
          <h3>Senior Product Manager</h3>
          <p>Remote</p>
          <a href="/careers/senior-product-manager">Apply Now</a>
        </div>"#;
    let records = extract_page(
        &page("Acme", "https://acme.example/careers", html),
        &taxonomy(),
        &ExtractOptions::default(),
    );

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.source, JobBoard::Generic);
    assert_eq!(record.title, "Senior Product Manager");
    assert_eq!(record.url, "https://acme.example/careers/senior-product-manager");
    assert!(record.core_matches.contains(&"senior product manager".to_string()));
    assert!(record.core_matches.contains(&"product manager".to_string()));
    assert_eq!(record.modifier_matches, vec!["remote".to_string()]);
}

#[test]
fn lever_markup_is_recognized_without_a_lever_url() {
    let html = r#"
        <div class="posting">
          <div class="posting-title"><a href="https://jobs.lever.co/acme/123">Product Manager</a></div>
          <span class="posting-location">Remote</span>
        </div>"#;
    let records = extract_page(
        &page("Acme", "https://acme.example/careers", html),
        &taxonomy(),
        &ExtractOptions::default(),
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source, JobBoard::Lever);
    assert_eq!(records[0].title, "Product Manager");
    assert_eq!(records[0].url, "https://jobs.lever.co/acme/123");
    assert_eq!(records[0].location.as_deref(), Some("Remote"));
}

#[test]
fn workday_attributes_classify_and_filter_roles() {
    let html = r#"
        <ul>
          <li data-automation-id="jobTitle"><a href="/en-US/acme/job/R-1001">Business Analyst</a></li>
          <li data-automation-id="jobTitle"><a href="/en-US/acme/job/R-1002">Office Chef</a></li>
        </ul>"#;
    let records = extract_page(
        &page("Acme", "https://acme.example/openings", html),
        &taxonomy(),
        &ExtractOptions::default(),
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source, JobBoard::Workday);
    assert_eq!(records[0].title, "Business Analyst");
    assert_eq!(records[0].url, "https://acme.example/en-US/acme/job/R-1001");
}

#[test]
fn tracking_query_variant_across_pages_is_one_posting() {
    let html = r#"<div class="job"><h3>Product Manager</h3></div>"#;
    let pages = [
        page("Acme", "https://acme.example/jobs?utm_source=newsletter", html),
        page("Acme", "https://acme.example/jobs", html),
    ];

    let kept = scan_pages(&pages, &taxonomy(), true);
    assert_eq!(kept.len(), 1);
    // First sighting wins, tracking query and all.
    assert_eq!(kept[0].url, "https://acme.example/jobs?utm_source=newsletter");
}

#[test]
fn sibling_roles_survive_when_fuzzy_prefix_is_off() {
    let html_a = r#"<div class="job"><h3>Senior Product Manager, Platform</h3></div>"#;
    let html_b = r#"<div class="job"><h3>Senior Product Manager, Growth</h3></div>"#;
    let pages = [
        page("Acme", "https://acme.example/jobs/platform", html_a),
        page("Acme", "https://acme.example/jobs/growth", html_b),
    ];

    let collapsed = scan_pages(&pages, &taxonomy(), true);
    assert_eq!(collapsed.len(), 1);

    let kept = scan_pages(&pages, &taxonomy(), false);
    assert_eq!(kept.len(), 2);
}

#[test]
fn config_keywords_drive_the_pipeline() {
    let config = ScanConfig::from_toml_str(
        r#"
        keywords = ["business analyst"]
        fuzzy_title_prefix = true
        "#,
    )
    .unwrap();
    let taxonomy = Taxonomy::load(config.keywords.iter());

    let body = "Partner with operations on weekly revenue and churn reporting. ".repeat(3);
    let html = format!("<section><h2>Business Analyst</h2><p>{body}</p></section>");
    let pages = [page("Acme", "https://acme.example/careers", &html)];

    let kept = scan_pages(&pages, &taxonomy, config.fuzzy_title_prefix);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].title, "Business Analyst");
    assert_eq!(kept[0].source, JobBoard::Generic);
}

#[test]
fn deduped_output_is_stable_under_a_second_pass() {
    let pages = [
        page("Acme", "https://boards.greenhouse.io/acme", GREENHOUSE_PAGE),
        page("Acme", "https://boards.greenhouse.io/acme?ref=home", GREENHOUSE_PAGE),
    ];
    let once = scan_pages(&pages, &taxonomy(), true);
    let twice = dedupe(once.clone(), &mut DedupIndex::new(true));

    assert_eq!(once.len(), twice.len());
    let ids = |records: &[JobRecord]| {
        records.iter().map(|r| r.identity.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&once), ids(&twice));
}

#[test]
fn reports_reflect_pipeline_output() {
    let records = extract_page(
        &page("Acme", "https://boards.greenhouse.io/acme", GREENHOUSE_PAGE),
        &taxonomy(),
        &ExtractOptions::default(),
    );

    let dir = std::env::temp_dir();
    let csv_path = dir.join(format!("jobscout-pipeline-{}.csv", std::process::id()));
    let json_path = dir.join(format!("jobscout-pipeline-{}.json", std::process::id()));

    job_scout::report::write_csv(&records, &csv_path).unwrap();
    job_scout::report::write_json(&records, &json_path).unwrap();

    let csv_content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_content.lines().count(), records.len() + 1);
    assert!(csv_content.contains("Senior Product Manager"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["total_jobs"], records.len());
    assert_eq!(json["jobs"][0]["source"], "greenhouse");

    std::fs::remove_file(&csv_path).ok();
    std::fs::remove_file(&json_path).ok();
}
