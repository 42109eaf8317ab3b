use std::sync::Arc;

use chrono::NaiveDate;
use rota_api::{RotaClient, RotaError};
use rota_core::{
    CreatedDuty, DayBucket, DutyForm, FormField, ReferenceData, SelectOption, SubmitOutcome,
    WeekRequest, WeekView,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Focus index of the submit button, after the six form inputs.
pub const SUBMIT_INDEX: usize = FormField::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Week,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    SelectOption,
}

type WeekResponse = (u64, Result<Vec<DayBucket>, RotaError>);

pub struct RotaApp {
    pub screen: Screen,
    pub mode: AppMode,
    pub should_quit: bool,
    pub client: Arc<RotaClient>,

    pub form: DutyForm,
    pub focus: usize,
    pub reference: ReferenceData,
    reference_requested: bool,
    reference_rx: Option<oneshot::Receiver<ReferenceData>>,
    submit_rx: Option<oneshot::Receiver<Result<CreatedDuty, RotaError>>>,

    pub week: WeekView,
    week_tx: mpsc::UnboundedSender<WeekResponse>,
    week_rx: mpsc::UnboundedReceiver<WeekResponse>,

    // Popup state
    pub popup_selected: usize,
}

impl RotaApp {
    pub fn new(client: RotaClient, date: NaiveDate) -> Self {
        let (week_tx, week_rx) = mpsc::unbounded_channel();

        Self {
            screen: Screen::Week,
            mode: AppMode::Normal,
            should_quit: false,
            client: Arc::new(client),
            form: DutyForm::new(),
            focus: 0,
            reference: ReferenceData::default(),
            reference_requested: false,
            reference_rx: None,
            submit_rx: None,
            week: WeekView::new(date),
            week_tx,
            week_rx,
            popup_selected: 0,
        }
    }

    /// Issues the initial week fetch.
    pub fn start(&mut self) {
        let request = self.week.refresh();
        self.request_week(request);
    }

    fn request_week(&self, request: WeekRequest) {
        debug!(token = request.token, week = %request.range, "Requesting week");
        let client = Arc::clone(&self.client);
        let tx = self.week_tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_week(&request.range).await;
            let _ = tx.send((request.token, result));
        });
    }

    pub fn show_week(&mut self) {
        self.screen = Screen::Week;
    }

    /// Switches to the form, fetching reference lists the first time.
    pub fn show_form(&mut self) {
        self.screen = Screen::Form;
        if self.reference_requested {
            return;
        }
        self.reference_requested = true;

        let (tx, rx) = oneshot::channel();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let _ = tx.send(client.fetch_reference_data().await);
        });
        self.reference_rx = Some(rx);
    }

    pub fn reference_loading(&self) -> bool {
        self.reference_rx.is_some()
    }

    pub fn shift_days(&mut self, days: i64) {
        if let Some(request) = self.week.shift_days(days) {
            self.request_week(request);
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        let request = self.week.select_date(date);
        self.request_week(request);
    }

    pub fn refresh_week(&mut self) {
        let request = self.week.refresh();
        self.request_week(request);
    }

    pub fn focused_field(&self) -> Option<FormField> {
        FormField::ALL.get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (SUBMIT_INDEX + 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(SUBMIT_INDEX);
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.focused_field().filter(|f| !f.is_selection()) {
            self.form.push_char(field, c);
        }
    }

    pub fn input_backspace(&mut self) {
        match self.focused_field() {
            Some(field) if field.is_selection() => self.form.set(field, ""),
            Some(field) => self.form.pop_char(field),
            None => {}
        }
    }

    /// Enter on the form: submit, open a picker, or advance.
    pub fn activate(&mut self) {
        match self.focused_field() {
            None => self.submit(),
            Some(field) if field.is_selection() => self.open_picker(),
            Some(_) => self.focus_next(),
        }
    }

    pub fn submit(&mut self) {
        let Some(duty) = self.form.submit() else {
            return;
        };

        let (tx, rx) = oneshot::channel();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let _ = tx.send(client.create_duty(&duty).await);
        });
        self.submit_rx = Some(rx);
    }

    pub fn popup_options(&self) -> Vec<SelectOption> {
        self.focused_field()
            .map(|f| self.reference.options(f))
            .unwrap_or_default()
    }

    pub fn open_picker(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let current = self.form.get(field);
        self.popup_selected = self
            .popup_options()
            .iter()
            .position(|o| o.value == current)
            .unwrap_or(0);
        self.mode = AppMode::SelectOption;
    }

    pub fn close_popup(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn popup_up(&mut self) {
        if self.popup_selected > 0 {
            self.popup_selected -= 1;
        }
    }

    pub fn popup_down(&mut self) {
        let max = self.popup_options().len().saturating_sub(1);
        if self.popup_selected < max {
            self.popup_selected += 1;
        }
    }

    pub fn popup_select(&mut self) {
        let options = self.popup_options();
        if let (Some(field), Some(option)) = (self.focused_field(), options.get(self.popup_selected)) {
            self.form.set(field, option.value.clone());
        }
        self.close_popup();
    }

    pub fn poll_responses(&mut self) {
        if let Some(ref mut rx) = self.reference_rx {
            match rx.try_recv() {
                Ok(data) => {
                    self.reference = data;
                    self.reference_rx = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {
                    // Still waiting
                }
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.reference_rx = None;
                }
            }
        }

        if let Some(ref mut rx) = self.submit_rx {
            match rx.try_recv() {
                Ok(result) => {
                    let outcome = match result {
                        Ok(created) => {
                            debug!(id = ?created.id, "Duty submitted");
                            SubmitOutcome::Created
                        }
                        Err(e) => {
                            warn!(error = %e, "Duty submission failed");
                            SubmitOutcome::Rejected {
                                message: e.server_message().map(String::from),
                            }
                        }
                    };
                    self.form.finish(outcome);
                    self.submit_rx = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.form.finish(SubmitOutcome::Rejected { message: None });
                    self.submit_rx = None;
                }
            }
        }

        while let Ok((token, result)) = self.week_rx.try_recv() {
            self.week.apply(token, result);
        }
    }
}
