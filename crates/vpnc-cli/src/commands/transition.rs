use crate::config::ClientConfig;
use crate::support::{build_controller, exit_with_error, print_json};
use serde_json::json;
use vpnc_engine::{TransitionKind, TransitionPlan};
use vpnc_log::Event;

pub fn run(config: &ClientConfig, seed: Option<u64>, kind: TransitionKind, json_output: bool) {
    let mut controller = build_controller(config, seed);
    let path = controller.log().path().display().to_string();
    let plan = controller
        .transition_with(kind, |_| {
            if !json_output {
                println!("{}", progress_line(kind));
            }
        })
        .unwrap_or_else(|e| {
            exit_with_error(&format!("failed to record `{}` in {path}", kind.as_str()), e)
        });

    if json_output {
        let (result, appended, status) = match plan {
            TransitionPlan::AlreadyInState(current) => ("already", Vec::new(), current.status),
            TransitionPlan::Apply { outcome, .. } => ("applied", plan.events(), outcome.status),
        };
        print_json(&json!({
            "action": kind.as_str(),
            "path": path,
            "result": result,
            "status": status.as_str(),
            "appended": appended.iter().map(event_json).collect::<Vec<_>>(),
        }));
        return;
    }

    println!("{}", summary_line(&plan));
}

fn progress_line(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::Up => "Starting...",
        TransitionKind::Down => "Stopping...",
    }
}

fn summary_line(plan: &TransitionPlan) -> String {
    match plan {
        TransitionPlan::AlreadyInState(current) => format!("Already {}", current.status),
        TransitionPlan::Apply { outcome, .. } => format!("Status: {}", outcome.status),
    }
}

fn event_json(event: &Event) -> serde_json::Value {
    json!({
        "status": event.status.as_str(),
        "timestamp": event.timestamp,
    })
}
