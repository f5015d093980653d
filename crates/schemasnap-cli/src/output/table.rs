//! Human-readable summary output formatting.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use schemasnap_core::{Column, DatabaseSchema, Table};
use serde_json::Value;
use std::fmt::Write;

/// Format the schema document as human-readable text with optional colors.
pub fn format_table(schema: &DatabaseSchema, database: &str, use_colors: bool) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    write_header(&mut out, database, colored);
    write_summary(&mut out, schema, colored);
    write_objects(&mut out, "Tables:", &schema.tables, colored);
    write_objects(&mut out, "Views:", &schema.views, colored);
    write_procedures(&mut out, schema, colored);

    out
}

fn write_header(out: &mut String, database: &str, colored: bool) {
    let title = format!("SchemaSnap: {database}");
    let line = "═".repeat(50);

    if colored {
        writeln!(out, "{}", title.bold()).unwrap();
        writeln!(out, "{}", line.dimmed()).unwrap();
    } else {
        writeln!(out, "{title}").unwrap();
        writeln!(out, "{line}").unwrap();
    }
}

fn write_summary(out: &mut String, schema: &DatabaseSchema, colored: bool) {
    let stats = format!(
        "Summary: {} tables | {} views | {} stored procedures",
        schema.tables.len(),
        schema.views.len(),
        schema.stored_procedures.len()
    );

    if colored {
        writeln!(out, "{}", stats.cyan()).unwrap();
    } else {
        writeln!(out, "{stats}").unwrap();
    }

    writeln!(out).unwrap();
}

fn write_objects(
    out: &mut String,
    heading: &str,
    objects: &indexmap::IndexMap<String, Table>,
    colored: bool,
) {
    if objects.is_empty() {
        return;
    }

    if colored {
        writeln!(out, "{}", heading.bold()).unwrap();
    } else {
        writeln!(out, "{heading}").unwrap();
    }

    for (name, columns) in objects {
        writeln!(out, "  {name}").unwrap();
        for column in columns.values() {
            writeln!(out, "    {}", describe_column(column, colored)).unwrap();
        }
    }
    writeln!(out).unwrap();
}

fn describe_column(column: &Column, colored: bool) -> String {
    let type_text = if column.length > 0 {
        format!("{}({})", column.column_type, column.length)
    } else {
        column.column_type.clone()
    };

    let marker = if column.is_primary {
        if colored {
            format!(" {}", "PRI".green())
        } else {
            " PRI".to_string()
        }
    } else {
        String::new()
    };

    format!("{} {type_text}{marker}", column.field)
}

fn write_procedures(out: &mut String, schema: &DatabaseSchema, colored: bool) {
    if schema.stored_procedures.is_empty() {
        return;
    }

    if colored {
        writeln!(out, "{}", "Stored procedures:".bold()).unwrap();
    } else {
        writeln!(out, "Stored procedures:").unwrap();
    }

    for procedure in schema.stored_procedures.values() {
        writeln!(out, "  {}", procedure.name).unwrap();
        for parameter in procedure.parameters.values() {
            let mode = parameter
                .raw
                .get("parameterMode")
                .and_then(Value::as_str)
                .unwrap_or("IN");
            writeln!(out, "    {mode} {}", parameter.parameter_name).unwrap();
        }
    }
    writeln!(out).unwrap();
}
