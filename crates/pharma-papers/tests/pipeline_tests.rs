//! End-to-end tests: search, parse, filter and write the report.

use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pharma_papers::client::PubMedClient;
use pharma_papers::config::Config;
use pharma_papers::formatters::{HEADER, write_csv};
use pharma_papers::parser::{Element, FixedClock, RawRecord, RecordParser};
use pharma_papers::pipeline::fetch_industry_papers;
use pharma_papers::report::{OutputSink, ReportOutcome, serialize};
use pharma_papers::{Paper, RecordError};

const ESEARCH_XML: &str = include_str!("fixtures/esearch_cancer_immunotherapy.xml");
const EFETCH_XML: &str = include_str!("fixtures/efetch_cancer_immunotherapy.xml");
const EFETCH_ONE_MALFORMED_XML: &str = include_str!("fixtures/efetch_one_malformed.xml");

fn frozen_parser() -> RecordParser<FixedClock> {
    RecordParser::with_clock(FixedClock(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()))
}

async fn mount_fixture(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", "cancer immunotherapy"))
        .and(query_param("retmax", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_XML))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_XML))
        .expect(1)
        .mount(mock_server)
        .await;
}

fn records_from(xml: &str) -> Vec<RawRecord> {
    Element::parse(xml.as_bytes())
        .unwrap()
        .into_named("PubmedArticle")
        .into_iter()
        .map(RawRecord::new)
        .collect()
}

fn find<'a>(papers: &'a [Paper], pmid: &str) -> &'a Paper {
    papers.iter().find(|p| p.pubmed_id() == pmid).unwrap()
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_cancer_immunotherapy_keeps_three_industry_papers() {
    let mock_server = MockServer::start().await;
    mount_fixture(&mock_server).await;

    let client = PubMedClient::new(Config::for_testing(&mock_server.uri())).unwrap();
    let summary =
        fetch_industry_papers(&client, &frozen_parser(), "cancer immunotherapy", 5).await.unwrap();

    assert_eq!(summary.fetched, 5);
    assert_eq!(summary.rejected, 0);
    assert_eq!(summary.parsed, 5);

    let ids: Vec<&str> = summary.papers.iter().map(Paper::pubmed_id).collect();
    assert_eq!(ids, vec!["39000001", "39000003", "39000005"]);
}

#[tokio::test]
async fn test_pipeline_author_subsets_and_companies() {
    let mock_server = MockServer::start().await;
    mount_fixture(&mock_server).await;

    let client = PubMedClient::new(Config::for_testing(&mock_server.uri())).unwrap();
    let papers = fetch_industry_papers(&client, &frozen_parser(), "cancer immunotherapy", 5)
        .await
        .unwrap()
        .papers;

    let first = find(&papers, "39000001");
    assert_eq!(first.title(), "PD-1 blockade combined with in situ vaccination in solid tumours.");
    assert_eq!(first.publication_date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    let names: Vec<&str> = first.non_academic_authors().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Alice Smith"]);
    assert_eq!(
        first.company_affiliations(),
        vec!["Oncology R&D, AstraZeneca, Gaithersburg, MD, USA. alice.smith@astrazeneca.com."]
    );
    assert_eq!(first.corresponding_author_email(), Some("alice.smith@astrazeneca.com"));

    // ValidYN="N" authors still count as non-academic, just not corresponding.
    let third = find(&papers, "39000003");
    let names: Vec<&str> = third.non_academic_authors().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Hans Müller", "Giulia Rossi"]);
    assert_eq!(third.company_affiliations().len(), 2);
    assert_eq!(third.corresponding_author_email(), Some("rossi.g@gene.com"));

    let fifth = find(&papers, "39000005");
    let names: Vec<&str> = fifth.non_academic_authors().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Ella Brown", "Ken Ito"]);
    assert_eq!(
        fifth.company_affiliations(),
        vec![
            "Cell Therapy Unit, Bristol-Myers Squibb, Seattle, WA, USA.",
            "Bristol-Myers Squibb, Princeton, NJ, USA. ken.ito@bms.com",
        ]
    );
    assert_eq!(fifth.corresponding_author_email(), Some("ken.ito@bms.com"));
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_batch_with_missing_pmid_drops_only_that_record() {
    let records = records_from(EFETCH_ONE_MALFORMED_XML);
    assert_eq!(records.len(), 4);

    let batch = frozen_parser().parse_batch(&records);

    let ids: Vec<&str> = batch.papers.iter().map(Paper::pubmed_id).collect();
    assert_eq!(ids, vec!["1001", "1003", "1004"]);
    assert_eq!(batch.rejected, vec![RecordError::MissingField("PMID")]);
}

#[test]
fn test_incomplete_pub_date_uses_clock() {
    let records = records_from(EFETCH_XML);
    let batch = frozen_parser().parse_batch(&records);

    // 39000002 has Year and Month but no Day.
    let paper = find(&batch.papers, "39000002");
    assert_eq!(paper.publication_date(), NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
}

#[test]
fn test_collective_author_is_skipped() {
    let records = records_from(EFETCH_XML);
    let batch = frozen_parser().parse_batch(&records);

    let paper = find(&batch.papers, "39000004");
    let names: Vec<&str> = paper.authors().iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Yuki Tanaka"]);
}

// =============================================================================
// Report Tests
// =============================================================================

#[tokio::test]
async fn test_report_rows_for_fixture() {
    let mock_server = MockServer::start().await;
    mount_fixture(&mock_server).await;

    let client = PubMedClient::new(Config::for_testing(&mock_server.uri())).unwrap();
    let papers = fetch_industry_papers(&client, &frozen_parser(), "cancer immunotherapy", 5)
        .await
        .unwrap()
        .papers;

    let mut out = Vec::new();
    let rows = write_csv(&papers, &mut out).unwrap();
    assert_eq!(rows, 3);

    let mut reader = csv::Reader::from_reader(out.as_slice());
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, HEADER);

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[1][0], "39000003");
    assert_eq!(&records[1][2], "2022-12-01");
    assert_eq!(&records[1][3], "Hans Müller; Giulia Rossi");
    assert_eq!(&records[2][5], "ken.ito@bms.com");
}

#[test]
fn test_serialize_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("results.csv");

    let batch = frozen_parser().parse_batch(&records_from(EFETCH_XML));
    let papers = pharma_papers::report::filter_industry(batch.papers);

    let sink = OutputSink::File(file.clone());
    let outcome = serialize(&papers, &sink).unwrap();
    assert_eq!(outcome, ReportOutcome::Written { rows: 3, sink });

    let contents = std::fs::read_to_string(&file).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
    assert_eq!(lines.count(), 3);
}

#[test]
fn test_serialize_nothing_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("results.csv");

    let outcome = serialize(&[], &OutputSink::File(file.clone())).unwrap();

    assert_eq!(outcome, ReportOutcome::NoMatchingRecords);
    assert!(!file.exists());
}

#[test]
fn test_serialize_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("results.csv");
    std::fs::write(&file, "stale\nstale\nstale\nstale\nstale\nstale\n").unwrap();

    let batch = frozen_parser().parse_batch(&records_from(EFETCH_XML));
    let papers = pharma_papers::report::filter_industry(batch.papers);
    serialize(&papers[..1], &OutputSink::File(file.clone())).unwrap();

    let contents = std::fs::read_to_string(&file).unwrap();
    assert!(!contents.contains("stale"));
    assert_eq!(contents.lines().count(), 2);
}
