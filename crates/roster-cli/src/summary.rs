use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_core::{ColumnDetection, ImportReport, ImportStatus};
use roster_model::{ColumnMapping, DryRunResult, LogLevel, RosterField};

pub fn print_columns(detection: &ColumnDetection, mapping: &ColumnMapping) {
    println!(
        "Header row: {} ({} data rows)",
        detection.table.header_index + 1,
        detection.table.data_rows().len()
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column"), header_cell("Field")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, column) in detection.columns.iter().enumerate() {
        let field = mapping
            .bindings()
            .find(|(_, bound)| *bound == column)
            .map(|(field, _)| field);
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(column),
            field_cell(field),
        ]);
    }
    println!("{table}");

    let missing: Vec<&str> = RosterField::ALL
        .iter()
        .filter(|field| field.is_required() && mapping.get(**field).is_none())
        .map(RosterField::as_str)
        .collect();
    if !missing.is_empty() {
        eprintln!(
            "Unmapped required fields: {} (use --map FIELD=COLUMN)",
            missing.join(", ")
        );
    }
}

pub fn print_plan(plan: &DryRunResult) {
    if plan.is_empty() {
        println!("Nothing to create: the directory already matches the roster.");
        return;
    }
    if !plan.units_to_create.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Unit"), header_cell("Parent")]);
        apply_table_style(&mut table);
        for pair in &plan.units_to_create {
            table.add_row(vec![
                Cell::new(&pair.name),
                pair.parent.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
            ]);
        }
        println!("Units to create ({}):", plan.units_to_create.len());
        println!("{table}");
    }
    if !plan.teams_to_create.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Team"),
            header_cell("Unit"),
            header_cell("Parent"),
        ]);
        apply_table_style(&mut table);
        for pair in &plan.teams_to_create {
            table.add_row(vec![
                Cell::new(&pair.team),
                Cell::new(&pair.unit),
                pair.parent.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
            ]);
        }
        println!("Teams to create ({}):", plan.teams_to_create.len());
        println!("{table}");
    }
    if !plan.people_to_create.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Name"),
            header_cell("Unit"),
            header_cell("Team"),
            header_cell("Role"),
            header_cell("Rank"),
        ]);
        apply_table_style(&mut table);
        for row in &plan.people_to_create {
            table.add_row(vec![
                Cell::new(&row.full_name),
                Cell::new(&row.unit),
                Cell::new(&row.team),
                optional_cell(row.role.as_deref()),
                optional_cell(row.rank.as_deref()),
            ]);
        }
        println!("People to create ({}):", plan.people_to_create.len());
        println!("{table}");
    }
}

pub fn print_report(report: &ImportReport) {
    for line in report.log.lines() {
        match line.level {
            LogLevel::Info => println!("  {}", line.message),
            LogLevel::Warning => eprintln!("  warning: {}", line.message),
        }
    }

    let counts = &report.counts;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Entity"), header_cell("Created"), header_cell("Other")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Units"),
        count_cell(counts.units_created, Color::Green),
        other_cell(counts.units_unresolved, "unresolved", Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("People"),
        count_cell(counts.people_created, Color::Green),
        other_cell(counts.people_existing, "existing", Color::DarkGrey),
    ]);
    table.add_row(vec![
        Cell::new("Teams"),
        count_cell(counts.teams_created, Color::Green),
        Cell::new(format!(
            "{} replaced, {} unchanged, {} skipped",
            counts.teams_replaced, counts.teams_unchanged, counts.groups_skipped
        )),
    ]);
    println!("{table}");

    let status = match report.status {
        ImportStatus::Completed => "completed",
        ImportStatus::Canceled => "canceled, entities created so far were kept",
        ImportStatus::Failed => "failed, entities created so far were kept",
    };
    println!(
        "Status: {status} ({}/{} steps)",
        report.progress.done, report.progress.total
    );
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn field_cell(field: Option<RosterField>) -> Cell {
    match field {
        Some(field) if field.is_required() => Cell::new(field)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Some(field) => Cell::new(field).fg(Color::Blue),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn other_cell(count: usize, label: &str, color: Color) -> Cell {
    if count > 0 {
        Cell::new(format!("{count} {label}")).fg(color)
    } else {
        dim_cell("-")
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
