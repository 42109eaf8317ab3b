mod app;
mod input;
mod ui;

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use rota_api::RotaClient;

use app::RotaApp;

use crate::error::RotaToolError;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run(client: RotaClient, date: NaiveDate) -> Result<(), RotaToolError> {
    let mut terminal = enter_screen()?;

    let mut app = RotaApp::new(client, date);
    app.start();

    let result = run_loop(&mut terminal, &mut app).await;
    leave_screen(&mut terminal)?;
    result
}

fn enter_screen() -> Result<Term, RotaToolError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Runs even when the loop failed, so the shell is usable afterwards.
fn leave_screen(terminal: &mut Term) -> Result<(), RotaToolError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_loop(terminal: &mut Term, app: &mut RotaApp) -> Result<(), RotaToolError> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Short poll keeps network results flowing while idle.
        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            input::handle_event(app, event);
        }

        app.poll_responses();

        if app.should_quit {
            break;
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}
