use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::insights::Insights;
use crate::ui::theme;
use crate::ui::util::{bar_ratio, format_amount, percent, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, insights: &Insights) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Chart + utilization
        ])
        .split(area);

    render_summary_cards(f, chunks[0], insights);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_spending_chart(f, body[0], insights);
    render_utilization(f, body[1], insights);
}

fn render_summary_cards(f: &mut Frame, area: Rect, insights: &Insights) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let remaining = insights.total_remaining();
    let unallocated = insights.unallocated();

    render_card(f, cards[0], "Total Budget", insights.total_budget, theme::ACCENT);
    render_card(f, cards[1], "Spent", insights.total_spent, theme::YELLOW);
    render_card(f, cards[2], "Remaining", remaining, sign_color(remaining));
    render_card(f, cards[3], "Unallocated", unallocated, sign_color(unallocated));
}

fn sign_color(amount: Decimal) -> Color {
    if amount >= Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    }
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, insights: &Insights) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Spending by Category ", theme::title_style()));

    if insights.total_spent.is_zero() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Nothing spent yet. Record a transaction from the Dashboard",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = insights
        .by_spending()
        .into_iter()
        .take(12)
        .map(|row| {
            let color = theme::utilization_color(bar_ratio(row.utilization));
            Bar::default()
                .value(row.spent.to_u64().unwrap_or(0))
                .label(Line::from(truncate(&row.name, 10)))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_utilization(f: &mut Frame, area: Rect, insights: &Insights) {
    let items: Vec<ListItem> = insights
        .rows
        .iter()
        .map(|row| {
            let ratio = bar_ratio(row.utilization);
            let color = theme::utilization_color(ratio);
            let marker = if row.is_over_budget() { " over" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<14}", truncate(&row.name, 13)),
                    theme::normal_style(),
                ),
                Span::styled(progress_bar(ratio, 12), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>5}", percent(row.utilization)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} of spend", percent(row.share)),
                    theme::dim_style(),
                ),
                Span::styled(marker, theme::error_style()),
            ]))
        })
        .collect();

    let over = insights.over_budget().len();
    let title = if over == 0 {
        " Utilization ".to_string()
    } else {
        format!(" Utilization ({over} over budget) ")
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(title, theme::title_style())),
    );
    f.render_widget(list, area);
}
