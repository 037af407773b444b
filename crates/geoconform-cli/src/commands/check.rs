use geoconform_kernel::ConformanceReport;
use serde_json::json;

use crate::support::{
    container_or_exit, load_config_or_exit, load_document_or_exit, print_json_or_exit,
};

pub fn run(document: String, config: Option<String>, json_output: bool) {
    let config = load_config_or_exit(config.as_deref());
    let container = container_or_exit(&config);
    let parsed = load_document_or_exit(&document);

    let mut checked: Vec<(String, ConformanceReport)> = Vec::with_capacity(parsed.subjects.len());
    for spec in &parsed.subjects {
        let label = spec.label();
        let subject = spec.build().unwrap_or_else(|e| {
            eprintln!("error: {document}: {label}: {e}");
            std::process::exit(2);
        });
        tracing::debug!(subject = %label, "validating");
        checked.push((label, container.validate(subject.as_ref())));
    }
    let rejected = checked.iter().filter(|(_, r)| !r.is_accepted()).count();

    if json_output {
        let subjects: Vec<_> = checked
            .iter()
            .map(|(label, report)| json!({ "subject": label, "report": report }))
            .collect();
        print_json_or_exit(&json!({
            "document": document,
            "subjectCount": checked.len(),
            "rejectedCount": rejected,
            "subjects": subjects,
        }));
    } else {
        println!("geoconform check {document}");
        for (index, (label, report)) in checked.iter().enumerate() {
            println!("  [{index}] {label}: {report}");
            for failure in &report.failures {
                println!(
                    "      - {} {}: {}",
                    failure.category, failure.path, failure.message
                );
            }
            for warning in &report.warnings {
                println!(
                    "      ~ {} {}: {}",
                    warning.category, warning.path, warning.message
                );
            }
        }
        println!("  Rejected: {rejected} of {}", checked.len());
    }

    if rejected > 0 {
        std::process::exit(1);
    }
}
