//! Prompt construction for the Trino/Iceberg optimization agents.

use crate::core::types::QuerySpec;

use super::{AgentContext, SchemaPlan};

pub(crate) const SYSTEM: &str = "You are a senior database performance engineer working on a \
     Trino (distributed SQL) + Apache Iceberg lakehouse. Be short and concise; output as little \
     text as possible.";

/// Queries ordered by optimization priority (runquantity × executiontime,
/// descending) so the most expensive workload leads the prompt. Prompt-local:
/// result ordering elsewhere follows the input order.
pub(crate) fn impact_ordered(queries: &[QuerySpec]) -> Vec<&QuerySpec> {
    let mut ordered: Vec<&QuerySpec> = queries.iter().collect();
    ordered.sort_by(|a, b| b.impact().cmp(&a.impact()));
    ordered
}

fn workload_block(queries: &[QuerySpec]) -> String {
    impact_ordered(queries)
        .iter()
        .enumerate()
        .map(|(i, q)| {
            format!(
                "Query #{n} (impact: {runs} runs × {time}s)\nID: {id}\nSQL:\n{sql}",
                n = i + 1,
                runs = q.runquantity,
                time = q.executiontime,
                id = q.queryid,
                sql = q.query,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn ddl_block(ctx: &AgentContext) -> String {
    ctx.request
        .ddl
        .iter()
        .map(|d| d.statement.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn metadata_block(ctx: &AgentContext) -> String {
    ctx.metadata
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .map(|m| format!("Backend metadata:\n{m}\n\n"))
        .unwrap_or_default()
}

/// Prompt for the DDL agent: analyze schema + workload, produce an
/// optimization plan and the revised DDL as one JSON object.
pub(crate) fn schema_prompt(ctx: &AgentContext) -> String {
    format!(
        "Role: Senior Database Performance Analyst and Migration Developer\n\n\
         INPUT:\n\
         {metadata}\
         DDL statements:\n{ddl}\n\n\
         Query workload (highest impact first):\n{workload}\n\n\
         TASK: Analyze the schema and workload, then design an optimized schema.\n\n\
         RULES:\n\
         - Source tables are read-only; optimizations create new tables and materialized views.\n\
         - Always use full 3-part names (<catalog>.<schema>.<table>).\n\
         - Order DDL so schemas come before tables and tables before dependent views.\n\
         - Table formats: ORC, PARQUET, or AVRO only.\n\
         - Use Trino types (BIGINT, VARCHAR, DOUBLE, TIMESTAMP(6), DATE, BOOLEAN, ARRAY, MAP, ROW).\n\n\
         Output ONLY valid JSON, no other text:\n\
         {{\n\
           \"plan\": \"<short prioritized optimization plan with rationale>\",\n\
           \"ddl\": [\"<one complete SQL DDL statement per array entry, ending with a semicolon>\"]\n\
         }}",
        metadata = metadata_block(ctx),
        ddl = ddl_block(ctx),
        workload = workload_block(&ctx.request.queries),
    )
}

/// Prompt for the query agent: rewrite the workload against the optimized
/// schema, preserving exact semantics.
pub(crate) fn query_prompt(ctx: &AgentContext, schema: &SchemaPlan) -> String {
    format!(
        "Role: SQL Performance Engineer\n\n\
         INPUT:\n\
         Optimization plan:\n{plan}\n\n\
         Optimized DDL:\n{new_ddl}\n\n\
         Original DDL:\n{old_ddl}\n\n\
         Query workload (highest impact first):\n{workload}\n\n\
         TASK: Rewrite each query to use the optimized schema while preserving exact semantics \
         (JOIN types, aggregation scope, NULL handling, ORDER BY, LIMIT/OFFSET).\n\n\
         RULES:\n\
         - Update every table reference to the optimized schema.\n\
         - Prefer materialized views where the query matches their aggregation.\n\
         - Omit a query entirely if no beneficial rewrite exists.\n\n\
         Output ONLY valid JSON, no other text:\n\
         [{{\"queryid\": \"<id from the workload>\", \"query\": \"<rewritten SQL>\"}}]",
        plan = schema.plan,
        new_ddl = schema.statements.join("\n"),
        old_ddl = ddl_block(ctx),
        workload = workload_block(&ctx.request.queries),
    )
}

/// Prompt for the migration agent: idempotent statements populating the
/// optimized schema from the source tables.
pub(crate) fn migration_prompt(ctx: &AgentContext, schema: &SchemaPlan) -> String {
    format!(
        "Role: Senior Database Migration Developer\n\n\
         INPUT:\n\
         Optimization plan:\n{plan}\n\n\
         Source DDL:\n{old_ddl}\n\n\
         Target DDL:\n{new_ddl}\n\n\
         TASK: Generate idempotent Trino SQL migration statements that populate the target \
         schema from the source tables (CREATE IF NOT EXISTS → INSERT INTO ... SELECT → \
         ALTER → CREATE MATERIALIZED VIEW).\n\n\
         RULES:\n\
         - Wrap risky casts in TRY_CAST and handle NULLs with COALESCE.\n\
         - Splits use multiple INSERTs with WHERE; merges use UNION ALL.\n\n\
         OUTPUT FORMAT: one SQL statement per line ending with a semicolon. \
         No comments, no blank lines, no markdown.",
        plan = schema.plan,
        old_ddl = ddl_block(ctx),
        new_ddl = schema.statements.join("\n"),
    )
}
