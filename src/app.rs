//! Application state and core logic

use crate::codec::preference::{self, Preference};
use crate::codec::{self, question, Address, PhoneNumber};
use crate::config::FormConfig;
use crate::error::CodecError;
use crate::picker::PickerOutcome;
use crate::platform;
use crate::resolver::Variant;
use crate::schema::FormMode;
use crate::service::{FormService, HttpFormService};
use crate::session::{FieldEdit, FormSession};
use crate::state::{
    AddressDialog, AppState, DateDialog, Dialog, ImageDialog, ListDialog, ListKind,
};
use crate::submission::{FsImageSource, ImageSource};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;

/// Focusable entry of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Field(String),
    Preference(Preference),
}

/// Owned copy of a field's variant for key dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Text { multiline: bool },
    Phone,
    Address,
    Date,
    Image,
    Question,
    Choice { options: Vec<String>, many: bool },
    Dropdown(Vec<String>),
    Unresolved(String),
}

impl Widget {
    pub fn of(variant: &Variant<'_>) -> Self {
        match variant {
            Variant::PlainText => Widget::Text { multiline: false },
            Variant::Multiline => Widget::Text { multiline: true },
            Variant::Phone => Widget::Phone,
            Variant::Address => Widget::Address,
            Variant::Date => Widget::Date,
            Variant::Image => Widget::Image,
            Variant::Question => Widget::Question,
            Variant::ChoiceOne(set) => Widget::Choice {
                options: set.options.clone(),
                many: false,
            },
            Variant::ChoiceMany(set) => Widget::Choice {
                options: set.options.clone(),
                many: true,
            },
            Variant::ChoiceDropdown(set) => Widget::Dropdown(set.options.clone()),
            Variant::Unresolved(err) => Widget::Unresolved(err.to_string()),
        }
    }

    /// Widgets that take typed text
    fn takes_text(&self) -> bool {
        matches!(
            self,
            Widget::Text { .. } | Widget::Phone | Widget::Address | Widget::Question
        )
    }
}

/// Main application struct
pub struct App {
    /// Transient UI state
    pub state: AppState,
    /// Schema and committed values
    pub session: FormSession,
    service: Arc<dyn FormService>,
    images: Box<dyn ImageSource>,
    quit: bool,
}

impl App {
    /// Connect to the member service and fetch the form schema once
    pub async fn new(config: &FormConfig) -> Result<Self> {
        let service = HttpFormService::new(config)?;
        let fetched = service.fetch_schema().await?;
        let session = FormSession::from_fetched(fetched);
        Ok(Self::with_session(
            session,
            Arc::new(service),
            Box::new(FsImageSource),
        ))
    }

    pub fn with_session(
        session: FormSession,
        service: Arc<dyn FormService>,
        images: Box<dyn ImageSource>,
    ) -> Self {
        Self {
            state: AppState::default(),
            session,
            service,
            images,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    pub fn title(&self) -> &'static str {
        match self.session.schema().mode() {
            FormMode::Create => "Sign Up",
            FormMode::Edit => "Edit Profile",
        }
    }

    /// Fixed selectors whose key no schema field claims, active or not
    pub fn preferences(&self) -> Vec<Preference> {
        let schema = self.session.schema();
        preference::for_mode(schema.mode())
            .into_iter()
            .filter(|pref| schema.field(pref.key).is_none() && !schema.is_excluded(pref.key))
            .collect()
    }

    /// Focus order: schema fields, then preferences
    pub fn focus_targets(&self) -> Vec<Focus> {
        self.session
            .schema()
            .fields()
            .iter()
            .map(|field| Focus::Field(field.name.clone()))
            .chain(self.preferences().into_iter().map(Focus::Preference))
            .collect()
    }

    pub fn focused(&self) -> Option<Focus> {
        self.focus_targets().into_iter().nth(self.state.active_field)
    }

    pub fn widget(&self, name: &str) -> Option<Widget> {
        self.session.variant(name).ok().map(|v| Widget::of(&v))
    }

    /// Text a new draft starts from
    pub fn committed_text(&self, name: &str, widget: &Widget) -> String {
        let values = self.session.state();
        match widget {
            Widget::Phone => PhoneNumber::decode(values.get(name))
                .segment(self.state.field_ui(name).segment)
                .to_string(),
            Widget::Address => Address::decode(values.get(name)).detail,
            Widget::Question => codec::text::current(values, question::ANSWER_KEY).to_string(),
            _ => codec::text::current(values, name).to_string(),
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Picker dialogs are modal too
        if let Some(dialog) = self.state.dialog.take() {
            self.state.dialog = self.handle_dialog_key(dialog, key).await;
            return Ok(());
        }

        self.state.status_message = None;

        if platform::is_quit(&key) {
            self.quit = true;
            return Ok(());
        }
        if platform::is_submit(&key) {
            self.submit().await;
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            _ => match self.focused() {
                Some(Focus::Field(name)) => self.handle_field_key(&name, key),
                Some(Focus::Preference(pref)) => self.handle_preference_key(&pref, key),
                None => {}
            },
        }

        Ok(())
    }

    fn move_focus(&mut self, forward: bool) {
        self.commit_draft();
        let count = self.focus_targets().len();
        if forward {
            self.state.next_field(count);
        } else {
            self.state.prev_field(count);
        }
    }

    fn apply(&mut self, name: &str, edit: FieldEdit) {
        if let Err(err) = self.session.apply(name, edit) {
            self.push_error(err.to_string());
        }
    }

    /// Commit the focused field's draft through its codec
    fn commit_draft(&mut self) {
        let Some(Focus::Field(name)) = self.focused() else {
            return;
        };
        let Some(text) = self.state.take_draft(&name) else {
            return;
        };
        let edit = match self.widget(&name) {
            Some(Widget::Text { .. }) => FieldEdit::Text(text),
            Some(Widget::Phone) => FieldEdit::PhoneSegment {
                index: self.state.field_ui(&name).segment,
                text,
            },
            Some(Widget::Address) => FieldEdit::AddressDetail(text),
            Some(Widget::Question) => FieldEdit::QuestionAnswer(text),
            _ => return,
        };
        self.apply(&name, edit);
    }

    fn open(&mut self, dialog: Dialog) {
        tracing::debug!(field = dialog.field(), "Picker opened");
        self.state.dialog = Some(dialog);
    }

    fn handle_field_key(&mut self, name: &str, key: KeyEvent) {
        let Some(widget) = self.widget(name) else {
            return;
        };

        match (&widget, key.code) {
            (Widget::Unresolved(reason), KeyCode::Enter | KeyCode::Char(' ')) => {
                self.state.status_message = Some(reason.clone());
            }
            (Widget::Text { multiline: true }, KeyCode::Enter) => {
                let committed = self.committed_text(name, &widget);
                self.state.input_char(name, '\n', &committed);
            }
            (Widget::Text { .. } | Widget::Phone, KeyCode::Enter) => self.commit_draft(),
            (Widget::Phone, KeyCode::Left) => self.move_segment(name, false),
            (Widget::Phone, KeyCode::Right) => self.move_segment(name, true),
            (Widget::Phone, KeyCode::Char(c)) if !c.is_ascii_digit() => {}
            (Widget::Address, KeyCode::Enter) => {
                self.commit_draft();
                self.open(Dialog::Address(AddressDialog::new(name)));
            }
            (Widget::Question, KeyCode::Enter) => {
                self.commit_draft();
                let items = question::QUESTIONS
                    .iter()
                    .map(|(id, label)| (id.to_string(), label.to_string()))
                    .collect();
                let current = codec::text::current(self.session.state(), name).to_string();
                self.open(Dialog::List(ListDialog::new(
                    name,
                    ListKind::Question,
                    items,
                    &current,
                )));
            }
            (Widget::Date, KeyCode::Enter) => {
                let initial = codec::date::current(self.session.state(), name);
                let today = chrono::Local::now().date_naive();
                self.open(Dialog::Date(DateDialog::new(name, initial, today)));
            }
            (Widget::Image, KeyCode::Enter) => self.open(Dialog::Image(ImageDialog::new(name))),
            (Widget::Dropdown(options), KeyCode::Enter) => {
                let items = options.iter().map(|o| (o.clone(), o.clone())).collect();
                let current = codec::text::current(self.session.state(), name).to_string();
                self.open(Dialog::List(ListDialog::new(
                    name,
                    ListKind::Options,
                    items,
                    &current,
                )));
            }
            (Widget::Choice { options, .. }, KeyCode::Left) => {
                self.state.move_highlight(name, false, options.len());
            }
            (Widget::Choice { options, .. }, KeyCode::Right) => {
                self.state.move_highlight(name, true, options.len());
            }
            (Widget::Choice { options, many }, KeyCode::Char(' ')) => {
                let highlighted = self.state.field_ui(name).highlighted;
                if let Some(value) = options.get(highlighted) {
                    let edit = if *many {
                        FieldEdit::Toggle(value.clone())
                    } else {
                        FieldEdit::Select(value.clone())
                    };
                    self.apply(name, edit);
                }
            }
            (widget, KeyCode::Char(c)) if widget.takes_text() => {
                let committed = self.committed_text(name, widget);
                self.state.input_char(name, c, &committed);
            }
            (widget, KeyCode::Backspace) if widget.takes_text() => {
                let committed = self.committed_text(name, widget);
                self.state.backspace(name, &committed);
            }
            _ => {}
        }
    }

    fn move_segment(&mut self, name: &str, forward: bool) {
        self.commit_draft();
        let ui = self.state.field_ui_mut(name);
        ui.segment = if forward {
            (ui.segment + 1).min(codec::phone::SEGMENTS - 1)
        } else {
            ui.segment.saturating_sub(1)
        };
    }

    fn handle_preference_key(&mut self, pref: &Preference, key: KeyEvent) {
        let len = pref.choices.len();
        match key.code {
            KeyCode::Left => self.state.move_highlight(pref.key, false, len),
            KeyCode::Right => self.state.move_highlight(pref.key, true, len),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let highlighted = self.state.field_ui(pref.key).highlighted;
                if let Some((value, _)) = pref.choices.get(highlighted) {
                    if let Err(err) = self.session.select_preference(pref, value) {
                        self.push_error(err.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    /// Route a key to the open dialog; returns the dialog if it stays open
    async fn handle_dialog_key(&mut self, dialog: Dialog, key: KeyEvent) -> Option<Dialog> {
        if key.code == KeyCode::Esc {
            tracing::debug!(field = dialog.field(), "Picker cancelled");
            return None;
        }

        match dialog {
            Dialog::Address(mut d) => {
                match key.code {
                    KeyCode::Enter => {
                        let result = self.session.pick_address(&d.field, &d).await;
                        self.picked(&d.field, result);
                        return None;
                    }
                    KeyCode::Tab | KeyCode::Down => d.next_input(),
                    KeyCode::BackTab | KeyCode::Up => d.prev_input(),
                    KeyCode::Left | KeyCode::Right if d.focus == 0 => d.toggle_scheme(),
                    KeyCode::Char(c) => d.input_char(c),
                    KeyCode::Backspace => d.backspace(),
                    _ => {}
                }
                Some(Dialog::Address(d))
            }
            Dialog::Date(mut d) => {
                match key.code {
                    KeyCode::Enter => {
                        let result = self.session.pick_date(&d.field, &d).await;
                        self.picked(&d.field, result);
                        return None;
                    }
                    KeyCode::Left => d.part = d.part.prev(),
                    KeyCode::Right => d.part = d.part.next(),
                    KeyCode::Up => d.step(true),
                    KeyCode::Down => d.step(false),
                    _ => {}
                }
                Some(Dialog::Date(d))
            }
            Dialog::Image(mut d) => {
                match key.code {
                    KeyCode::Enter => {
                        let result = self.session.pick_image(&d.field, &d).await;
                        self.picked(&d.field, result);
                        return None;
                    }
                    KeyCode::Char(c) => d.path.push(c),
                    KeyCode::Backspace => {
                        d.path.pop();
                    }
                    _ => {}
                }
                Some(Dialog::Image(d))
            }
            Dialog::List(mut d) => {
                match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        let edit: fn(String) -> FieldEdit = match d.kind {
                            ListKind::Options => FieldEdit::Select,
                            ListKind::Question => FieldEdit::Question,
                        };
                        let field = d.field.clone();
                        match d.confirm() {
                            PickerOutcome::Picked(value) => self.apply(&field, edit(value)),
                            PickerOutcome::Cancelled => {
                                tracing::debug!(field = %field, "Picker cancelled")
                            }
                        }
                        return None;
                    }
                    KeyCode::Up | KeyCode::BackTab => d.move_up(),
                    KeyCode::Down | KeyCode::Tab => d.move_down(),
                    _ => {}
                }
                Some(Dialog::List(d))
            }
        }
    }

    /// Report the result of a session picker run
    fn picked(&mut self, field: &str, result: Result<bool, CodecError>) {
        match result {
            Ok(true) => {}
            Ok(false) => tracing::debug!(field = %field, "Picker cancelled"),
            Err(err) => self.push_error(err.to_string()),
        }
    }

    /// Commit any draft, then serialize and send the form once
    async fn submit(&mut self) {
        self.commit_draft();
        if self.state.has_errors() {
            return;
        }

        match self
            .session
            .submit(self.service.as_ref(), self.images.as_ref())
            .await
        {
            Ok(()) => {
                self.state.status_message = Some("Saved".to_string());
            }
            Err(err) => {
                tracing::error!(error = %err, "Submit failed");
                self.push_error(err.to_string());
            }
        }
    }
}
