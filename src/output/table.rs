use super::{state_tone, Resource, StateTone};
use chrono::{DateTime, Utc};
use tabled::{
    builder::Builder, settings::object::Rows, settings::style::HorizontalLine, settings::Color,
    settings::Style,
};

/// Format data as pretty tables with UTF-8 borders, one table per resource
/// kind in order of first appearance.
///
/// The state column is always last so it can be colored by position.
pub fn format_table(data: &[Resource], no_color: bool) -> String {
    if data.is_empty() {
        return "Nothing to show.".to_string();
    }

    let mut kinds: Vec<&'static str> = Vec::new();
    for resource in data {
        if !kinds.contains(&resource.kind()) {
            kinds.push(resource.kind());
        }
    }

    kinds
        .iter()
        .map(|kind| {
            let group: Vec<&Resource> = data.iter().filter(|r| r.kind() == *kind).collect();
            format_group(&group, no_color)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_group(group: &[&Resource], no_color: bool) -> String {
    let mut builder = Builder::default();
    let header = header_for(group[0]);
    let state_col = header.len() - 1;
    builder.push_record(header.iter().map(|h| h.to_string()));

    let mut cell_colors: Vec<(usize, usize, Color)> = Vec::new();
    for (i, resource) in group.iter().enumerate() {
        builder.push_record(row_for(resource));
        if let Some(state) = resource.state() {
            cell_colors.push((i + 1, state_col, tone_color(state_tone(state))));
        }
    }

    let mut table = builder.build();
    let double_line = HorizontalLine::full('═', '╪', '╞', '╡');
    table.with(Style::rounded().horizontals([(1, double_line)]));

    if !no_color {
        table.modify(Rows::first(), Color::BOLD);
        for (row, col, color) in cell_colors {
            table.modify((row, col), color);
        }
    }

    table.to_string()
}

fn header_for(resource: &Resource) -> &'static [&'static str] {
    match resource {
        Resource::Account(_) => &["ID", "Name", "Email", "Computers", "Prints", "State"],
        Resource::Computer(_) => &["ID", "Name", "Hostname", "Version", "State"],
        Resource::Printer(_) => &["ID", "Name", "Computer", "Default", "State"],
        Resource::PrintJob(_) => &["ID", "Title", "Printer", "Content", "Created", "State"],
        Resource::PrintJobState(_) => &["Job", "Message", "Client", "Created", "State"],
    }
}

fn row_for(resource: &Resource) -> Vec<String> {
    match resource {
        Resource::Account(a) => vec![
            a.id.to_string(),
            a.display_name(),
            a.email.clone(),
            a.num_computers.to_string(),
            a.total_prints.to_string(),
            dash(a.state.as_deref()),
        ],
        Resource::Computer(c) => vec![
            c.id.to_string(),
            c.name.clone(),
            dash(c.hostname.as_deref()),
            dash(c.version.as_deref()),
            c.state.clone(),
        ],
        Resource::Printer(p) => vec![
            p.id.to_string(),
            p.name.clone(),
            p.computer.name.clone(),
            if p.default == Some(true) { "yes" } else { "" }.to_string(),
            dash(p.state.as_deref()),
        ],
        Resource::PrintJob(j) => vec![
            j.id.to_string(),
            dash(j.title.as_deref()),
            j.printer.name.clone(),
            j.content_type.clone(),
            format_timestamp(j.create_timestamp),
            j.state.clone(),
        ],
        Resource::PrintJobState(s) => vec![
            s.print_job_id.to_string(),
            dash(s.message.as_deref()),
            dash(s.client_version.as_deref()),
            format_timestamp(s.create_timestamp),
            s.state.clone(),
        ],
    }
}

fn dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn format_timestamp(t: Option<DateTime<Utc>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn tone_color(tone: StateTone) -> Color {
    match tone {
        StateTone::Good => Color::FG_GREEN,
        StateTone::Neutral => Color::FG_YELLOW,
        StateTone::Bad => Color::FG_RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Computer;

    fn computer(id: u64, state: &str) -> Resource {
        Resource::Computer(Computer {
            id,
            name: format!("PC-{}", id),
            inet: None,
            inet6: None,
            hostname: Some("front@desk".to_string()),
            version: Some("4.27.8".to_string()),
            jre: None,
            create_timestamp: None,
            state: state.to_string(),
        })
    }

    #[test]
    fn test_table_contains_rows() {
        let rendered = format_table(&[computer(1, "connected"), computer(2, "disconnected")], true);
        assert!(rendered.contains("Hostname"));
        assert!(rendered.contains("PC-1"));
        assert!(rendered.contains("PC-2"));
        assert!(rendered.contains("disconnected"));
        assert!(rendered.contains('═'));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_table(&[], true), "Nothing to show.");
    }
}
