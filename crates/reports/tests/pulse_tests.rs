mod common;

use std::time::Duration;

use common::*;
use henry_reports::pulse::{
    self, Check, CheckContext, CheckFuture, CheckOutcome, CheckRegistry, CheckReport, CheckSection,
    DB_CONNECTIONS_TITLE, EXPLORE_PERFORMANCE_TITLE,
};
use testing::{connection, connection_result};

fn connections_fake() -> FakeLooker {
    FakeLooker::new()
        .with_connection(connection("A"), vec![connection_result("success", "ok")])
        .with_connection(
            connection("B"),
            vec![
                connection_result("success", "ok"),
                connection_result("error", "could not connect to warehouse"),
            ],
        )
        .with_connection(connection("C"), vec![connection_result("success", "ok")])
        .with_connection(connection("looker"), vec![])
        .with_query_rows(
            |q| q.filters.contains_key("history.connection_name"),
            vec![json!({"history.query_run_count": 12})],
        )
        .with_legacy_feature("old_dashboards", true)
        .with_legacy_feature("old_explores", false)
}

async fn run(ctx: &ReportContext, registry: &CheckRegistry) -> Vec<CheckReport> {
    let mut reports = Vec::new();
    let emitted = pulse::run_all(ctx, registry, |report| reports.push(report)).await;
    assert_eq!(emitted, reports.len());
    reports
}

fn find<'a>(reports: &'a [CheckReport], name: &str) -> &'a CheckReport {
    reports
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no report for {name}"))
}

fn rows(report: &CheckReport) -> &[ResolvedRecord] {
    match &report.outcome {
        CheckOutcome::Rows(rows) => rows,
        CheckOutcome::Error(err) => panic!("check {} failed: {err}", report.name),
    }
}

#[tokio::test]
async fn test_every_check_reported_once() {
    for workers in [1, 8] {
        let (_, ctx) = context(connections_fake(), workers);
        let registry = CheckRegistry::standard();
        let reports = run(&ctx, &registry).await;

        let mut names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        let mut expected = registry.names();
        expected.sort_unstable();
        assert_eq!(names, expected, "workers = {workers}");
    }
}

#[tokio::test]
async fn test_connection_failure_is_isolated() {
    let (_, ctx) = context(connections_fake(), 4);
    let reports = run(&ctx, &CheckRegistry::standard()).await;
    let connections = find(&reports, "db_connections");

    assert_eq!(connections.title, DB_CONNECTIONS_TITLE);
    let rows = rows(connections);
    assert_eq!(
        column(rows, "Connection"),
        vec![Cell::text("A"), Cell::text("B"), Cell::text("C")]
    );
    assert_eq!(
        column(rows, "Status"),
        vec![
            Cell::text("OK"),
            Cell::text("- could not connect to warehouse"),
            Cell::text("OK")
        ]
    );
    assert_eq!(column(rows, "Query Count"), vec![Cell::Int(12); 3]);
}

#[tokio::test]
async fn test_connection_test_call_failure_only_marks_that_row() {
    let fake = connections_fake().with_failure("test_connection:B", 500, "driver crashed");
    let (_, ctx) = context(fake, 2);
    let reports = run(&ctx, &CheckRegistry::standard()).await;
    let rows = rows(find(&reports, "db_connections"));

    assert_eq!(rows.len(), 3);
    assert_eq!(cell(&rows[0], "Status"), &Cell::text("OK"));
    assert!(cell(&rows[1], "Status").is_error());
    assert_eq!(cell(&rows[1], "Query Count"), &Cell::Int(12));
    assert_eq!(cell(&rows[2], "Status"), &Cell::text("OK"));
}

#[tokio::test]
async fn test_no_connections_fails_only_that_check() {
    let fake = FakeLooker::new().with_legacy_feature("old_dashboards", true);
    let (_, ctx) = context(fake, 2);
    let reports = run(&ctx, &CheckRegistry::standard()).await;

    assert_eq!(reports.len(), 6);
    let connections = find(&reports, "db_connections");
    assert_eq!(connections.outcome, CheckOutcome::Error("No connections found.".to_string()));
    assert_eq!(connections.title, DB_CONNECTIONS_TITLE);
    assert_eq!(rows(find(&reports, "legacy_features")).len(), 1);
}

#[tokio::test]
async fn test_remote_failure_fails_only_that_check() {
    let fake = connections_fake().with_failure("all_legacy_features", 403, "forbidden");
    let (_, ctx) = context(fake, 4);
    let reports = run(&ctx, &CheckRegistry::standard()).await;

    assert_eq!(reports.iter().filter(|r| r.is_failure()).count(), 1);
    assert!(find(&reports, "legacy_features").is_failure());
}

#[tokio::test]
async fn test_legacy_features_lists_enabled_only() {
    let (_, ctx) = context(connections_fake(), 2);
    let reports = run(&ctx, &CheckRegistry::standard()).await;
    let rows = rows(find(&reports, "legacy_features"));

    assert_eq!(column(rows, "Feature"), vec![Cell::text("old_dashboards")]);
}

#[tokio::test]
async fn test_explore_performance_title_includes_average() {
    let fake = connections_fake()
        .with_query_rows(
            |q| q.fields == ["history.average_runtime"],
            vec![json!({"history.average_runtime": 2.5})],
        )
        .with_query_rows(
            |q| q.fields.len() == 3 && q.fields[2] == "history.average_runtime",
            vec![json!({"query.model": "thelook", "query.view": "orders", "history.average_runtime": 9.1})],
        );
    let (_, ctx) = context(fake, 2);
    let reports = run(&ctx, &CheckRegistry::standard()).await;
    let explores = find(&reports, "explore_performance");

    assert_eq!(
        explores.title,
        format!("{EXPLORE_PERFORMANCE_TITLE}\nFor context, the average query runtime is 2.5000s")
    );
    assert_eq!(cell(&rows(explores)[0], "query.view"), &Cell::text("orders"));
}

fn slow_check(_: CheckContext) -> CheckFuture {
    Box::pin(async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(CheckSection {
            title: "slow".to_string(),
            rows: Vec::new(),
        })
    })
}

fn fast_check(_: CheckContext) -> CheckFuture {
    Box::pin(async {
        Ok(CheckSection {
            title: "fast".to_string(),
            rows: Vec::new(),
        })
    })
}

fn panicking_check(_: CheckContext) -> CheckFuture {
    Box::pin(async {
        if true {
            panic!("check exploded");
        }
        Ok(CheckSection {
            title: "never".to_string(),
            rows: Vec::new(),
        })
    })
}

#[tokio::test]
async fn test_emission_follows_completion_order() {
    let mut registry = CheckRegistry::new();
    registry
        .register(Check {
            name: "A",
            title: "slow",
            run: slow_check,
        })
        .register(Check {
            name: "B",
            title: "fast",
            run: fast_check,
        });
    let (_, ctx) = context(FakeLooker::new(), 2);
    let reports = run(&ctx, &registry).await;

    let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[tokio::test]
async fn test_panicking_check_becomes_failed_report() {
    let mut registry = CheckRegistry::new();
    registry
        .register(Check {
            name: "boom",
            title: "Exploding check",
            run: panicking_check,
        })
        .register(Check {
            name: "fine",
            title: "fast",
            run: fast_check,
        });
    let (_, ctx) = context(FakeLooker::new(), 1);
    let reports = run(&ctx, &registry).await;

    assert_eq!(reports.len(), 2);
    let boom = find(&reports, "boom");
    assert_eq!(boom.title, "Exploding check");
    assert!(matches!(&boom.outcome, CheckOutcome::Error(msg) if msg.contains("check exploded")));
}

#[test]
fn test_report_json_shape() {
    let report = CheckReport {
        name: "legacy_features".to_string(),
        title: "Checking for enabled legacy features".to_string(),
        outcome: CheckOutcome::Error("forbidden".to_string()),
    };
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({"name": "legacy_features", "title": "Checking for enabled legacy features", "error": "forbidden"})
    );
}
