use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::store::BudgetStore;
use crate::ui::app::{Form, FormKind};
use crate::ui::theme;
use crate::ui::util::format_amount;

/// Centered popup with the form's two fields and any inline errors.
pub(crate) fn render(f: &mut Frame, area: Rect, form: &Form, store: &BudgetStore) {
    let mut lines = Vec::new();

    if let FormKind::Transaction { index } = form.kind {
        if let Some(cat) = store.get(index) {
            lines.push(Line::from(vec![
                Span::styled(" Category: ", theme::dim_style()),
                Span::styled(cat.name.clone(), theme::normal_style()),
                Span::styled(
                    format!("   {} left", format_amount(cat.remaining())),
                    theme::dim_style(),
                ),
            ]));
            lines.push(Line::from(""));
        }
    }

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        lines.push(Line::from(Span::styled(format!(" {}", field.label), label_style)));

        let cursor = if focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(" > ", label_style),
            Span::styled(format!("{}{cursor}", field.value), theme::normal_style()),
        ]));

        match &field.error {
            Some(err) => lines.push(Line::from(Span::styled(
                format!("   {err}"),
                theme::error_style(),
            ))),
            None => lines.push(Line::from("")),
        }
    }

    lines.push(Line::from(Span::styled(
        " Tab next field | Enter save | Esc cancel ",
        theme::dim_style(),
    )));

    let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 56.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                format!(" {} ", form.kind.title()),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);
}
