use crate::core::details::CryptoDetailsViewModel;
use crate::core::home::HomeViewModel;
use crate::core::routes::Route;
use crate::core::state::SimpleViewModelState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CryptoList, DetailsView, SearchBox, Status, StatusView, TitleBar,
};
use crate::tui::palette::Palette;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;

const HOME_HELP: &str = "Enter open | Ctrl+R refresh | Ctrl+T theme | Ctrl+U clear | Esc quit";
const DETAILS_HELP: &str = "Esc back | r retry | Ctrl+C quit";

pub fn draw_ui(
    frame: &mut Frame,
    route: &Route,
    home: &HomeViewModel,
    details: Option<&CryptoDetailsViewModel>,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let dark_mode = home.is_dark_theme();
    let palette = Palette::from_dark_mode(dark_mode);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let status_message = match home.state() {
        SimpleViewModelState::Loading => "Loading...",
        SimpleViewModelState::Error(_) => "Error",
        SimpleViewModelState::Idle(_) => "",
    };
    TitleBar {
        vs_currency: tui.vs_currency.clone(),
        last_update: home.get_last_update().map(str::to_string),
        is_stale: home.state().data().is_some_and(|data| data.is_stale),
        status_message: status_message.to_string(),
        dark_mode,
        palette,
    }
    .render(frame, title_area);

    let help = match route {
        Route::Home => {
            draw_home(frame, main_area, home, tui, palette, spinner_frame);
            HOME_HELP
        }
        Route::CryptoDetails { .. } => {
            draw_details(frame, main_area, details, tui, palette, spinner_frame);
            DETAILS_HELP
        }
    };
    frame.render_widget(
        Line::from(Span::styled(help, Style::default().fg(palette.dim))),
        help_area,
    );
}

fn draw_home(
    frame: &mut Frame,
    area: Rect,
    home: &HomeViewModel,
    tui: &mut TuiState,
    palette: Palette,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};
    let [search_area, list_area] = Layout::vertical([Length(3), Min(0)]).areas(area);

    let cryptos = home.get_cryptos();
    SearchBox {
        value: home.search_value(),
        match_count: cryptos.map(<[_]>::len),
        palette,
    }
    .render(frame, search_area);

    match (home.state(), cryptos) {
        (_, Some(cryptos)) => CryptoList {
            state: &mut tui.crypto_list,
            cryptos,
            palette,
        }
        .render(frame, list_area),
        (SimpleViewModelState::Error(message), None) => StatusView {
            status: Status::Error(message),
            palette,
        }
        .render(frame, list_area),
        _ => StatusView {
            status: Status::Loading { spinner_frame },
            palette,
        }
        .render(frame, list_area),
    }
}

fn draw_details(
    frame: &mut Frame,
    area: Rect,
    details: Option<&CryptoDetailsViewModel>,
    tui: &TuiState,
    palette: Palette,
    spinner_frame: usize,
) {
    let state = details.map(CryptoDetailsViewModel::state);
    match state {
        Some(SimpleViewModelState::Idle(crypto)) => DetailsView {
            crypto,
            vs_currency: &tui.vs_currency,
            palette,
        }
        .render(frame, area),
        Some(SimpleViewModelState::Error(message)) => StatusView {
            status: Status::Error(message),
            palette,
        }
        .render(frame, area),
        _ => StatusView {
            status: Status::Loading { spinner_frame },
            palette,
        }
        .render(frame, area),
    }
}
