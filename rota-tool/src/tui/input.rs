use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{AppMode, RotaApp, Screen};

pub fn handle_event(app: &mut RotaApp, event: Event) {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            handle_key(app, key);
        }
    }
}

fn handle_key(app: &mut RotaApp, key: KeyEvent) {
    if app.mode == AppMode::SelectOption {
        handle_popup_key(app, key);
        return;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (KeyCode::F(1), _) => app.show_form(),
        (KeyCode::F(2), _) => app.show_week(),
        _ => match app.screen {
            Screen::Form => handle_form_key(app, key),
            Screen::Week => handle_week_key(app, key),
        },
    }
}

fn handle_form_key(app: &mut RotaApp, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => app.submit(),
        (KeyCode::Tab, _) | (KeyCode::Down, _) => app.focus_next(),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => app.focus_prev(),
        (KeyCode::Enter, _) => app.activate(),
        (KeyCode::Backspace, _) => app.input_backspace(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => app.input_char(c),
        _ => {}
    }
}

fn handle_week_key(app: &mut RotaApp, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.shift_days(-1),
        KeyCode::Right | KeyCode::Char('l') => app.shift_days(1),
        KeyCode::Up | KeyCode::Char('k') => app.shift_days(-7),
        KeyCode::Down | KeyCode::Char('j') => app.shift_days(7),
        KeyCode::Char('t') => app.select_date(chrono::Local::now().date_naive()),
        KeyCode::Char('r') => app.refresh_week(),
        _ => {}
    }
}

fn handle_popup_key(app: &mut RotaApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_popup(),
        KeyCode::Enter => app.popup_select(),
        KeyCode::Up => app.popup_up(),
        KeyCode::Down => app.popup_down(),
        _ => {}
    }
}
