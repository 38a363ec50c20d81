//! Terminal rendering of lookup, batch and load results.

use std::fmt::Write;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use alma_model::{PARENT_SEPARATOR, ParentSummary, Role};

use crate::session::{BatchOutcome, LookupOutcome, Session};

pub fn render_lookup(outcome: &LookupOutcome) -> String {
    let result = &outcome.result;
    let mut out = String::new();
    let _ = writeln!(out, "ALMA ID: {}", result.query);
    if !outcome.lists.is_empty() {
        let _ = writeln!(out, "Lists: {}", membership_line(outcome));
    }

    let parents: Vec<&String> = result.as_child_parents.iter().collect();
    let children: Vec<&String> = result.as_parent_children.iter().collect();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&format!("As CHILD -> Parents ({})", parents.len())),
        header_cell(&format!("As PARENT -> Children ({})", children.len())),
    ]);
    apply_table_style(&mut table);
    let rows = parents.len().max(children.len()).max(1);
    for row in 0..rows {
        table.add_row(vec![
            id_cell(parents.get(row).copied(), row),
            id_cell(children.get(row).copied(), row),
        ]);
    }
    let _ = writeln!(out, "{table}");

    if result.is_not_found() {
        let _ = writeln!(
            out,
            "Not found: {} does not appear as a child or a parent in this table.",
            result.query
        );
    } else {
        let _ = writeln!(
            out,
            "Appears as child: {} | Appears as parent: {}",
            yes_no(outcome.role.is_child()),
            yes_no(outcome.role.is_parent())
        );
    }
    out
}

/// One block per ID, suitable for piping.
pub fn render_lookup_plain(outcome: &LookupOutcome) -> String {
    let result = &outcome.result;
    let mut out = String::new();
    let _ = writeln!(out, "id\t{}", result.query);
    let _ = writeln!(out, "role\t{}", outcome.role);
    for (name, member) in &outcome.lists {
        let _ = writeln!(out, "list\t{name}\t{}", yes_no(*member));
    }
    for parent in &result.as_child_parents {
        let _ = writeln!(out, "parent\t{parent}");
    }
    for child in &result.as_parent_children {
        let _ = writeln!(out, "child\t{child}");
    }
    out
}

pub fn render_batch(outcome: &BatchOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "IDs: {}", outcome.ids.len());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Count"),
        header_cell("IDs"),
    ]);
    apply_batch_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for membership in &outcome.lists {
        add_group_row(&mut table, &membership.list, &membership.members, Color::Green);
        add_group_row(
            &mut table,
            &format!("NOT {}", membership.list),
            &membership.non_members,
            Color::DarkGrey,
        );
    }
    let roles = &outcome.roles;
    add_group_row(&mut table, "PARENTS ONLY", &roles.parents_only, role_color(Role::Parent));
    add_group_row(
        &mut table,
        "CHILDREN AND PARENTS",
        &roles.children_and_parents,
        role_color(Role::Both),
    );
    add_group_row(&mut table, "CHILDREN ONLY", &roles.children_only, role_color(Role::Child));
    add_group_row(&mut table, "NOT IN TABLE", &roles.unmatched, role_color(Role::Neither));
    add_group_row(
        &mut table,
        "TOP-LEVEL PARENTS",
        &roles.top_level_parents,
        role_color(Role::Parent),
    );
    add_group_row(&mut table, "STANDALONE", &roles.standalone, role_color(Role::Neither));
    add_group_row(
        &mut table,
        "UNIQUE PARENTS",
        &outcome.parents.unique_parents,
        Color::Yellow,
    );
    let _ = writeln!(out, "{table}");

    let parents = &outcome.parents;
    let _ = writeln!(
        out,
        "From {} submitted child ALMAs, found {} unique parent ALMAs.",
        parents.submitted_children,
        parents.unique_parents.len()
    );
    if !parents.ranking.is_empty() {
        let _ = writeln!(out, "{}", ranking_table(parents));
        let _ = writeln!(out, "{}", mapping_table(parents));
    }
    out
}

fn ranking_table(parents: &ParentSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Parent"), header_cell("Children in batch")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in &parents.ranking {
        table.add_row(vec![Cell::new(&entry.parent), count_cell(entry.children)]);
    }
    table
}

fn mapping_table(parents: &ParentSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Child"), header_cell("Parents")]);
    apply_table_style(&mut table);
    for row in &parents.mapping {
        table.add_row(vec![Cell::new(&row.child), Cell::new(row.parents.join("\n"))]);
    }
    table
}

/// Parents of one child as a single field, `A ||| B`.
pub fn join_parents(parents: &[String]) -> String {
    parents.join(&format!(" {PARENT_SEPARATOR} "))
}

/// `group<TAB>id` lines for every group.
pub fn render_batch_plain(outcome: &BatchOutcome) -> String {
    let mut out = String::new();
    let mut emit = |group: &str, ids: &[String]| {
        for id in ids {
            let _ = writeln!(out, "{group}\t{id}");
        }
    };
    for membership in &outcome.lists {
        emit(&membership.list, &membership.members);
        emit(&format!("NOT_{}", membership.list), &membership.non_members);
    }
    emit("PARENTS_ONLY", &outcome.roles.parents_only);
    emit("CHILDREN_AND_PARENTS", &outcome.roles.children_and_parents);
    emit("CHILDREN_ONLY", &outcome.roles.children_only);
    emit("NOT_IN_TABLE", &outcome.roles.unmatched);
    emit("TOP_LEVEL_PARENTS", &outcome.roles.top_level_parents);
    emit("STANDALONE", &outcome.roles.standalone);
    emit("UNIQUE_PARENTS", &outcome.parents.unique_parents);
    for entry in &outcome.parents.ranking {
        let _ = writeln!(out, "PARENT_RANK\t{}\t{}", entry.parent, entry.children);
    }
    for row in &outcome.parents.mapping {
        let _ = writeln!(out, "CHILD_TO_PARENTS\t{}\t{}", row.child, join_parents(&row.parents));
    }
    out
}

pub fn render_stats(session: &Session) -> String {
    let report = session.report();
    let stats = session.stats();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: [(&str, usize); 7] = [
        ("Rows read", report.rows_read),
        ("Records", report.records),
        ("Skipped (empty child)", report.skipped_empty_child),
        ("Skipped (no parents)", report.skipped_empty_parent),
        ("Distinct children", stats.children),
        ("Distinct parents", stats.parents),
        ("Child-parent links", stats.edges),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), count_cell(value)]);
    }
    for list in session.lists() {
        table.add_row(vec![
            Cell::new(format!("List {}", list.name())),
            count_cell(list.len()),
        ]);
    }
    format!("Table: {}\n{table}\n", session.table_path().display())
}

fn membership_line(outcome: &LookupOutcome) -> String {
    outcome
        .lists
        .iter()
        .map(|(name, member)| format!("{name}: {}", yes_no(*member)))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn add_group_row(table: &mut Table, group: &str, ids: &[String], color: Color) {
    let ids_cell = if ids.is_empty() {
        dim_cell("(none)")
    } else {
        Cell::new(ids.join("\n"))
    };
    table.add_row(vec![
        Cell::new(group).fg(color).add_attribute(Attribute::Bold),
        count_cell(ids.len()),
        ids_cell,
    ]);
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Parent => Color::Blue,
        Role::Both => Color::Magenta,
        Role::Child => Color::Cyan,
        Role::Neither => Color::DarkGrey,
    }
}

fn id_cell(id: Option<&String>, row: usize) -> Cell {
    match id {
        Some(id) => Cell::new(id),
        None if row == 0 => dim_cell("(none)"),
        None => Cell::new(""),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "YES" } else { "NO" }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_batch_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
