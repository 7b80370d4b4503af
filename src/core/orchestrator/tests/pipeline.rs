use std::sync::Arc;

use crate::core::agents::testutil::{
    ScriptedAgent, migrations_output, queries_output, sample_request, sample_schema, schema_output,
};

use super::orchestrator;

#[tokio::test]
async fn happy_path_aggregates_all_three_sections() {
    let ddl = ScriptedAgent::always("ddl", Ok(schema_output()));
    let query = ScriptedAgent::always(
        "query",
        Ok(queries_output(&[(
            "q_top",
            "SELECT origin, cnt FROM iceberg.optimized.mv_counts",
        )])),
    );
    let migration = ScriptedAgent::always(
        "migration",
        Ok(migrations_output(&[
            "INSERT INTO iceberg.optimized.flights SELECT * FROM flights;",
        ])),
    );

    let result = orchestrator(ddl, query, migration)
        .run(Arc::new(sample_request()), None)
        .await
        .unwrap();

    let expected_ddl: Vec<String> = result.ddl.iter().map(|d| d.statement.clone()).collect();
    assert_eq!(expected_ddl, sample_schema().statements);
    assert_eq!(result.migrations.len(), 1);

    // Every input id exactly once, in input order; rewritten where produced.
    let ids: Vec<&str> = result.queries.iter().map(|q| q.queryid.as_str()).collect();
    assert_eq!(ids, vec!["q_rare", "q_top"]);
    assert_eq!(result.queries[0].query, "SELECT count(*) FROM flights");
    assert_eq!(
        result.queries[1].query,
        "SELECT origin, cnt FROM iceberg.optimized.mv_counts"
    );
}

#[tokio::test]
async fn unknown_and_duplicate_rewrites_are_dropped() {
    let ddl = ScriptedAgent::always("ddl", Ok(schema_output()));
    let query = ScriptedAgent::always(
        "query",
        Ok(queries_output(&[
            ("ghost", "SELECT 1"),
            ("q_top", "SELECT 2"),
            ("q_top", "SELECT 3"),
        ])),
    );
    let migration = ScriptedAgent::always("migration", Ok(migrations_output(&[])));

    let result = orchestrator(ddl, query, migration)
        .run(Arc::new(sample_request()), None)
        .await
        .unwrap();

    assert_eq!(result.queries.len(), 2);
    assert!(result.queries.iter().all(|q| q.queryid != "ghost"));
    // first rewrite for an id wins
    let q_top = result.queries.iter().find(|q| q.queryid == "q_top").unwrap();
    assert_eq!(q_top.query, "SELECT 2");
}

#[tokio::test]
async fn blank_rewrite_falls_back_to_original_sql() {
    let ddl = ScriptedAgent::always("ddl", Ok(schema_output()));
    let query = ScriptedAgent::always("query", Ok(queries_output(&[("q_top", "   ")])));
    let migration = ScriptedAgent::always("migration", Ok(migrations_output(&[])));

    let result = orchestrator(ddl, query, migration)
        .run(Arc::new(sample_request()), None)
        .await
        .unwrap();

    let q_top = result.queries.iter().find(|q| q.queryid == "q_top").unwrap();
    assert_eq!(q_top.query, "SELECT origin, count(*) FROM flights GROUP BY origin");
}

#[tokio::test]
async fn already_optimal_workload_round_trips_unchanged() {
    let request = sample_request();
    let pairs: Vec<(&str, &str)> = request
        .queries
        .iter()
        .map(|q| (q.queryid.as_str(), q.query.as_str()))
        .collect();

    let ddl = ScriptedAgent::always("ddl", Ok(schema_output()));
    let query = ScriptedAgent::always("query", Ok(queries_output(&pairs)));
    let migration = ScriptedAgent::always("migration", Ok(migrations_output(&[])));

    let result = orchestrator(ddl, query, migration)
        .run(Arc::new(request.clone()), None)
        .await
        .unwrap();

    assert_eq!(result.queries.len(), request.queries.len());
    for (spec, out) in request.queries.iter().zip(&result.queries) {
        assert_eq!(spec.queryid, out.queryid);
        assert_eq!(spec.query, out.query);
    }
}
