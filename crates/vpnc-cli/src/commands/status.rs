use crate::config::ClientConfig;
use crate::support::{build_controller, exit_with_error, print_json};
use serde_json::json;
use vpnc_engine::StatusReport;

pub fn run(config: &ClientConfig, json_output: bool) {
    let controller = build_controller(config, None);
    let path = controller.log().path().display().to_string();
    let report = controller
        .status()
        .unwrap_or_else(|e| exit_with_error(&format!("failed to read status from {path}"), e));

    if json_output {
        print_json(&json!({
            "action": "status",
            "path": path,
            "status": report.current.map(|event| event.status.as_str()),
            "timestamp": report.current.map(|event| event.timestamp),
            "uptimeSeconds": report.uptime_seconds,
        }));
        return;
    }

    println!("{}", render(&report));
}

fn render(report: &StatusReport) -> String {
    let Some(current) = report.current else {
        return "No events found".to_string();
    };
    match report.uptime_seconds {
        Some(uptime) => format!("Status: {}\nUptime: {uptime} seconds", current.status),
        None => format!("Status: {}", current.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpnc_log::{Event, Status};

    #[test]
    fn renders_no_events() {
        let report = StatusReport {
            current: None,
            uptime_seconds: None,
        };
        insta::assert_snapshot!(render(&report), @"No events found");
    }

    #[test]
    fn renders_up_with_uptime() {
        let report = StatusReport {
            current: Some(Event::new(Status::Up, 1_000)),
            uptime_seconds: Some(90),
        };
        insta::assert_snapshot!(render(&report), @r"
        Status: UP
        Uptime: 90 seconds
        ");
    }

    #[test]
    fn renders_transient_status_without_uptime() {
        let report = StatusReport {
            current: Some(Event::new(Status::Starting, 1_000)),
            uptime_seconds: None,
        };
        assert_eq!(render(&report), "Status: STARTING");
    }
}
