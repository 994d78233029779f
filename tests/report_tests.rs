use handle_hunter::output::write_reports;
use handle_hunter::ProbeVerdict;

#[test]
fn writes_all_three_reports() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");
    let items = vec![
        ProbeVerdict { service_name: "GitHub".into(), resolved_url: "https://github.com/a/b".into(), found: true },
        ProbeVerdict { service_name: "Reddit".into(), resolved_url: "https://reddit.com/u/a/b".into(), found: false },
    ];

    let paths = write_reports(&out, "a/b", &items).unwrap();

    assert_eq!(paths.html, out.join("results_a_b.html"));
    let html = std::fs::read_to_string(&paths.html).unwrap();
    assert!(html.contains("Username: a/b"));
    let csv = std::fs::read_to_string(&paths.csv).unwrap();
    assert_eq!(csv.lines().count(), 3);
    let jsonl = std::fs::read_to_string(&paths.jsonl).unwrap();
    assert!(jsonl.lines().next().unwrap().contains("\"found\":true"));
}
