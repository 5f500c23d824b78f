use podhtml::pod_to_html;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct PodCase {
    name: String,
    pod: String,
    html: String,
}

#[test]
fn pod_cases() {
    let case_data =
        fs::read_to_string("tests/data/cases.json").expect("Failed to read cases.json");
    let cases: Vec<PodCase> = serde_json::from_str(&case_data).expect("Failed to parse cases.json");
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in cases.iter() {
        let result = pod_to_html(&case.pod);
        if result != case.html {
            eprintln!("\nCase '{}' failed", case.name);
            eprintln!("  Input: {:?}", case.pod);
            eprintln!("  Expected: {:?}", case.html);
            eprintln!("  Got: {:?}", result);
            failures.push(case.name.as_str());
        }
    }

    assert!(failures.is_empty(), "failed cases: {:?}", failures);
}
