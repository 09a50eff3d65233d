use crate::config::ClientConfig;
use crate::support::{build_controller, exit_with_error, format_timestamp, print_json};
use serde_json::json;
use vpnc_engine::HistoryFilter;
use vpnc_log::Event;

pub struct Args {
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub status: Option<String>,
    pub json: bool,
}

pub fn run(config: &ClientConfig, args: Args) {
    let filter = HistoryFilter::parse(
        args.from.as_deref(),
        args.to.as_deref(),
        args.status.as_deref(),
        args.sort.as_deref(),
    )
    .unwrap_or_else(|e| exit_with_error("invalid history filter", e));

    let controller = build_controller(config, None);
    let path = controller.log().path().display().to_string();
    let events = controller
        .history(&filter)
        .unwrap_or_else(|e| exit_with_error(&format!("failed to read history from {path}"), e));

    if args.json {
        print_json(&json!({
            "action": "history",
            "path": path,
            "filter": {
                "from": filter.from,
                "to": filter.to,
                "status": filter.status.map(|status| status.as_str()),
                "sort": filter.sort.as_str(),
            },
            "count": events.len(),
            "items": events
                .iter()
                .map(|event| json!({
                    "status": event.status.as_str(),
                    "timestamp": event.timestamp,
                }))
                .collect::<Vec<_>>(),
        }));
        return;
    }

    println!("{}", render(&events, &config.timestamp_format));
}

fn render(events: &[Event], timestamp_format: &str) -> String {
    if events.is_empty() {
        return "No events found".to_string();
    }
    events
        .iter()
        .map(|event| {
            format!(
                "Status: {}, Timestamp: {}",
                event.status,
                format_timestamp(event.timestamp, timestamp_format)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
