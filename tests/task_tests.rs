//! Tests for SUMA task management actions
//!
//! Each action maps to one `suma` call. These tests check the command line
//! that is run and how its exit status lands in the report.

use aixsuma::{
    run_action, Action, CommandOutput, ModuleContext, RunReport, ScriptedRunner, SumaParams,
};

const LOG_FILE: &str = "/var/adm/ansible/suma_debug.log";

fn task_params(action: Action, task_id: Option<&str>, sched_time: Option<&str>) -> SumaParams {
    SumaParams {
        action,
        task_id: task_id.map(str::to_string),
        sched_time: sched_time.map(str::to_string),
        ..SumaParams::default()
    }
}

fn run_with(output: CommandOutput, params: &SumaParams) -> (RunReport, Vec<String>) {
    let runner = ScriptedRunner::new();
    runner.push(output);
    let report = run_action(&ModuleContext::new(&runner, params, LOG_FILE));
    (report, runner.calls())
}

fn run_ok(params: &SumaParams) -> (RunReport, Vec<String>) {
    run_with(CommandOutput::ok(""), params)
}

#[test]
fn test_list_all_tasks() {
    let listing = "Task ID:             3\nRqType:              Latest\n";
    let params = task_params(Action::List, None, None);
    let (report, calls) = run_with(CommandOutput::ok(listing), &params);

    assert!(!report.failed, "{}", report.msg);
    assert!(!report.changed);
    assert_eq!(calls, vec!["/usr/sbin/suma -l"]);
    assert_eq!(report.stdout, listing);
    assert_eq!(report.msg, "Suma list completed successfully");
}

#[test]
fn test_list_is_repeatable() {
    let params = task_params(Action::List, Some("3"), None);
    let (first, first_calls) = run_with(CommandOutput::ok("Task ID: 3\n"), &params);
    let (second, second_calls) = run_with(CommandOutput::ok("Task ID: 3\n"), &params);

    assert_eq!(first, second);
    assert_eq!(first_calls, second_calls);
    assert_eq!(first_calls, vec!["/usr/sbin/suma -l 3"]);
}

#[test]
fn test_list_blank_task_lists_all() {
    let (report, calls) = run_ok(&task_params(Action::List, Some("  "), None));
    assert!(!report.failed, "{}", report.msg);
    assert_eq!(calls, vec!["/usr/sbin/suma -l"]);
}

#[test]
fn test_edit_without_schedule_saves() {
    let (report, calls) = run_ok(&task_params(Action::Edit, Some("7"), None));
    assert!(!report.failed, "{}", report.msg);
    assert_eq!(calls, vec!["/usr/sbin/suma -w 7"]);
}

#[test]
fn test_edit_with_schedule() {
    let (report, calls) = run_ok(&task_params(Action::Edit, Some("7"), Some("30 2 * * 0")));
    assert!(!report.failed, "{}", report.msg);
    assert_eq!(calls, vec!["/usr/sbin/suma -s 30 2 * * 0 7"]);
}

#[test]
fn test_edit_blank_schedule_unschedules() {
    let (report, calls) = run_ok(&task_params(Action::Edit, Some("7"), Some("")));
    assert!(!report.failed, "{}", report.msg);
    assert_eq!(calls, vec!["/usr/sbin/suma -u 7"]);
}

#[test]
fn test_edit_invalid_schedule_runs_nothing() {
    let runner = ScriptedRunner::new();
    let params = task_params(Action::Edit, Some("7"), Some("30 25 * * 0"));
    let report = run_action(&ModuleContext::new(&runner, &params, LOG_FILE));

    assert!(report.failed);
    assert_eq!(
        report.msg,
        "Suma edit command '/usr/sbin/suma -s 30 25 * * 0 7' failed Bad schedule time '30 25 * * 0'"
    );
    assert!(runner.calls().is_empty());
}

#[test]
fn test_edit_wrong_field_count() {
    let runner = ScriptedRunner::new();
    let params = task_params(Action::Edit, Some("7"), Some("30 2 * *"));
    let report = run_action(&ModuleContext::new(&runner, &params, LOG_FILE));

    assert!(report.failed);
    assert!(report.msg.ends_with("failed Bad schedule time '30 2 * *'"));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_unschedule_and_delete() {
    let (report, calls) = run_ok(&task_params(Action::Unschedule, Some("4"), None));
    assert!(!report.failed, "{}", report.msg);
    assert_eq!(calls, vec!["/usr/sbin/suma -u 4"]);

    let (report, calls) = run_ok(&task_params(Action::Delete, Some("4"), None));
    assert!(!report.failed, "{}", report.msg);
    assert_eq!(calls, vec!["/usr/sbin/suma -d 4"]);
}

#[test]
fn test_missing_task_id_is_config_error() {
    let runner = ScriptedRunner::new();
    let params = task_params(Action::Delete, None, None);
    let report = run_action(&ModuleContext::new(&runner, &params, LOG_FILE));

    assert!(report.failed);
    assert_eq!(
        report.msg,
        "Bad parameter: action is delete but task_id is missing"
    );
    assert!(runner.calls().is_empty());
}

#[test]
fn test_config_and_default() {
    let params = task_params(Action::Config, None, None);
    let (report, calls) = run_with(CommandOutput::ok("DisplayName=\n"), &params);
    assert!(!report.failed, "{}", report.msg);
    assert_eq!(calls, vec!["/usr/sbin/suma -c"]);
    assert_eq!(report.stdout, "DisplayName=\n");

    let (report, calls) = run_ok(&task_params(Action::Default, None, None));
    assert!(!report.failed, "{}", report.msg);
    assert_eq!(calls, vec!["/usr/sbin/suma -D"]);
}

#[test]
fn test_nonzero_exit_is_fatal() {
    let (report, _) = run_with(
        CommandOutput::failed(1, "", "0500-002 Task 9 does not exist."),
        &task_params(Action::Delete, Some("9"), None),
    );

    assert!(report.failed);
    assert_eq!(
        report.msg,
        "Suma delete command '/usr/sbin/suma -d 9' failed with return code 1"
    );
    assert_eq!(report.stderr, "0500-002 Task 9 does not exist.");
}

#[test]
fn test_default_failure_label() {
    let params = task_params(Action::Default, None, None);
    let (report, _) = run_with(CommandOutput::failed(3, "", ""), &params);
    assert!(report.failed);
    assert!(report
        .msg
        .starts_with("Suma list default command '/usr/sbin/suma -D'"));
}
