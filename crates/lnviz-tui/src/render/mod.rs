//! Main render/view function (View in TEA pattern)


use std::time::Instant;

use lnviz_app::{AppState, UiMode};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI.
///
/// Pure apart from the log view, which records the viewport size and scroll
/// position back into `state.log_view`.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);

    frame.render_widget(
        widgets::MainHeader::new(
            state.status,
            &state.settings.server.base_url,
            &state.settings.server.node_id,
        ),
        areas.header,
    );

    frame.render_widget(
        widgets::FlowView::new(state.status)
            .edge(state.flow.visible_edge(Instant::now()))
            .message_count(state.history.len()),
        areas.flow,
    );

    let rows = state.filtered_indices();
    frame.render_stateful_widget(
        widgets::LogView::new(&state.history, &rows).focused(state.ui_mode == UiMode::Normal),
        areas.log,
        &mut state.log_view,
    );
    render_search_bar(frame, areas.log, state, rows.len());

    if areas.detail.width > 0 {
        frame.render_widget(
            widgets::DetailPanel::new(state.stats())
                .latest(state.latest_message())
                .template(state.selected_template())
                .sequences_completed(state.sequences_completed),
            areas.detail,
        );
    }

    frame.render_widget(
        widgets::StatusBar::new(state.ui_mode, state.connected).notice(state.notice.as_ref()),
        areas.status,
    );

    match state.ui_mode {
        UiMode::Compose => {
            frame.render_widget(widgets::ComposeDialog::new(&state.compose), area);
        }
        UiMode::TemplatePicker => {
            frame.render_widget(
                widgets::TemplatePicker::new(&state.catalog, state.picker.cursor)
                    .selected(state.selected_template),
                area,
            );
        }
        UiMode::Normal | UiMode::SearchInput => {}
    }
}

/// Search prompt over the bottom border of the log while typing or filtering
fn render_search_bar(frame: &mut Frame, log: Rect, state: &AppState, matches: usize) {
    let typing = state.ui_mode == UiMode::SearchInput;
    if !typing && !state.log_view.has_search() {
        return;
    }
    if log.height < 2 || log.width < 4 {
        return;
    }

    let bar = Rect::new(log.x + 2, log.bottom() - 1, log.width - 4, 1);
    frame.render_widget(
        widgets::SearchInput::new(&state.log_view.search_query, typing)
            .counts(matches, state.history.len()),
        bar,
    );
}
