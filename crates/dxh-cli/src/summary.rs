use chrono::Local;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dxh_cli::app::CliSession;
use dxh_model::{FieldSpec, FieldValue, FormSchema};
use dxh_persistence::ArchivedSubmission;
use dxh_session::{SubmitOutcome, SubmitReport};
use dxh_submit::Acknowledgement;
use dxh_validate::validate;

pub fn print_fields(schema: &FormSchema) {
    println!("{}", schema.title);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Options"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    for field in &schema.fields {
        table.add_row(vec![
            Cell::new(&field.name).fg(Color::Cyan),
            Cell::new(&field.label),
            dim_cell(field.kind),
            if field.options.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(field.options.join(" / "))
            },
            requirement_cell(field),
        ]);
    }
    println!("{table}");
}

pub fn print_status(session: &CliSession) {
    let schema = session.schema();
    let snapshot = session.snapshot();

    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Answer")]);
    apply_table_style(&mut table);
    for field in &schema.fields {
        let label = if field.is_mandatory() {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };
        let answer = match snapshot.get(&field.name) {
            Some(value) if value.is_filled() => Cell::new(value.joined("、")),
            _ => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(label), answer]);
    }
    println!("{table}");

    println!("Progress: {}", session.progress_label());
    match session.drafts().load_record() {
        Ok(Some(record)) => println!(
            "Draft saved: {}",
            record.saved_at.with_timezone(&Local).format("%Y/%m/%d %H:%M:%S")
        ),
        Ok(None) => println!("Draft saved: -"),
        Err(error) => println!("Draft saved: unreadable ({})", error.user_message()),
    }

    let report = validate(schema, &snapshot);
    match report.user_message() {
        None => println!("Ready to submit."),
        Some(message) => println!("{message}"),
    }
}

pub fn print_submit_report(report: &SubmitReport) {
    match &report.outcome {
        SubmitOutcome::Busy => println!("A submission is already in progress."),
        SubmitOutcome::Invalid(validation) => {
            println!("Not submitted: {} field(s) missing.", validation.missing_fields.len());
        }
        SubmitOutcome::Submitted { ack, transcript } => {
            match ack {
                Acknowledgement::Skipped => println!("Not sent: no endpoint configured."),
                ack => println!("Submitted: {ack}"),
            }
            if let Some(transcript) = transcript {
                println!("Transcript: {}", transcript.path.display());
            }
        }
        SubmitOutcome::Failed { error, fallback } => {
            println!("Submission failed: {error}");
            if let Some(fallback) = fallback {
                println!("Transcript: {}", fallback.path.display());
            }
            println!("Your answers are kept as a draft.");
        }
    }
}

pub fn print_history(schema: &FormSchema, entries: &[ArchivedSubmission]) {
    if entries.is_empty() {
        println!("No submissions yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Submitted"),
        header_cell("Name"),
        header_cell("Answered"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, entry) in entries.iter().enumerate() {
        let answered = schema
            .fields
            .iter()
            .filter(|f| entry.fields.get(&f.name).is_some_and(FieldValue::is_filled))
            .count();
        let name = entry
            .fields
            .text("name")
            .filter(|n| !n.trim().is_empty())
            .map_or_else(|| dim_cell("-"), Cell::new);
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(
                entry
                    .submitted_at
                    .with_timezone(&Local)
                    .format("%Y/%m/%d %H:%M:%S"),
            ),
            name,
            Cell::new(format!("{answered}/{}", schema.fields.len())),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn requirement_cell(field: &FieldSpec) -> Cell {
    match (field.kind.is_multi(), field.min_selections, field.max_selections) {
        (true, min, Some(max)) if min > 0 => Cell::new(format!("{min}-{max}")).fg(Color::Yellow),
        (true, min, None) if min > 0 => Cell::new(format!("{min}+")).fg(Color::Yellow),
        (true, _, Some(max)) => dim_cell(format!("max {max}")),
        _ if field.required => Cell::new("yes")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        _ => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
