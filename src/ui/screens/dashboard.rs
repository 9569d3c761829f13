use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::store::BudgetStore;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{bar_ratio, format_amount, percent, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, store: &BudgetStore) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Total budget card
            Constraint::Min(5),    // Category table
        ])
        .split(area);

    render_total(f, chunks[0], store);
    if store.is_empty() {
        render_empty(f, chunks[1]);
    } else {
        render_categories(f, chunks[1], app, store);
    }
}

fn render_total(f: &mut Frame, area: Rect, store: &BudgetStore) {
    let line = Line::from(vec![
        Span::styled(" Total Budget: ", theme::dim_style()),
        Span::styled(
            format_amount(store.total_budget()),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {} categories", store.len()),
            theme::dim_style(),
        ),
    ]);
    let card = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY)),
    );
    f.render_widget(card, area);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App, store: &BudgetStore) {
    let header_cells = ["Category", "Allocated", "Spent", "Remaining", "Progress", ""]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let page = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = store
        .categories()
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(page.max(1))
        .map(|(i, cat)| {
            let ratio = bar_ratio(cat.utilization());
            let color = theme::utilization_color(ratio);

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let remaining = cat.remaining();
            let remaining_style = if cat.is_over_budget() {
                theme::error_style()
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(truncate(&cat.name, 20)),
                Cell::from(format_amount(cat.allocated)),
                Cell::from(format_amount(cat.spent)),
                Cell::from(format_amount(remaining)).style(remaining_style),
                Cell::from(progress_bar(ratio, 20)).style(Style::default().fg(color)),
                Cell::from(percent(cat.utilization()))
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(22),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Categories ({}) ", store.len()),
                theme::title_style(),
            )),
    );
    f.render_widget(table, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No categories yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Press a or use :add <name> <amount> to create one",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Categories ", theme::title_style())),
    );
    f.render_widget(msg, area);
}
