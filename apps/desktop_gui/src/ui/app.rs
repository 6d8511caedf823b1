use std::time::Duration;

use chrono::{Local, NaiveDate};
use client_core::{
    form::DATE_INPUT_FORMAT,
    view::{
        FieldKind, FormFieldView, GuestListView, NewPartyFormView, PartyDetailsView,
        PartyListView, SelectedPartyView,
    },
    Action, ApiConfig, AppView, NewPartyDraft,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_error, UiEvent};
use crate::controller::orchestration::{command_for_action, dispatch_backend_command};

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusSeverity {
    Info,
    Error,
}

pub struct PartyPlannerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    api_label: String,
    view: Option<AppView>,
    draft: NewPartyDraft,

    status: String,
    status_severity: StatusSeverity,
}

impl PartyPlannerApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_label: format!(
                "{}/{}",
                startup.api.base_url.trim_end_matches('/'),
                startup.api.cohort.trim_matches('/')
            ),
            view: None,
            draft: NewPartyDraft::default(),
            status: "Loading parties...".to_string(),
            status_severity: StatusSeverity::Info,
        };
        dispatch_backend_command(&app.cmd_tx, BackendCommand::Init, &mut app.status);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Rendered(view) => {
                    // A render rebuilds the form too, so typed values do not survive it.
                    self.draft = draft_from_form(&view.new_party_form);
                    self.view = Some(view);
                    if self.status_severity == StatusSeverity::Info {
                        self.status = "Up to date".to_string();
                    }
                }
                UiEvent::Info(message) => {
                    self.status = message;
                    self.status_severity = StatusSeverity::Info;
                }
                UiEvent::Error(err) => {
                    tracing::debug!(context = ?err.context(), "ui: error surfaced");
                    self.status = describe_error(&err);
                    self.status_severity = StatusSeverity::Error;
                }
            }
        }
    }

    fn dispatch_action(&mut self, action: Action) {
        let cmd = command_for_action(action, &self.draft);
        self.status = format!("Sending {}...", cmd.name());
        self.status_severity = StatusSeverity::Info;
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let text = egui::RichText::new(&self.status);
                let text = match self.status_severity {
                    StatusSeverity::Info => text.weak(),
                    StatusSeverity::Error => text.color(ui.visuals().error_fg_color),
                };
                ui.label(text);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.api_label).weak());
                });
            });
        });
    }

    fn show_view(&mut self, ctx: &egui::Context, view: &AppView) -> Vec<Action> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(view.title.as_str());
            ui.add_space(4.0);
        });

        egui::SidePanel::left("party_list")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading(view.parties_heading.as_str());
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("party_list_scroll")
                    .show(ui, |ui| show_party_list(ui, &view.party_list, &mut actions));
            });

        egui::SidePanel::right("new_party_form")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.heading(view.form_heading.as_str());
                ui.separator();
                show_new_party_form(ui, &view.new_party_form, &mut self.draft, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(view.details_heading.as_str());
            ui.separator();
            match &view.selected_party {
                SelectedPartyView::Prompt(prompt) => {
                    ui.label(prompt.as_str());
                }
                SelectedPartyView::Details(details) => {
                    show_party_details(ui, details, &mut actions);
                }
            }
        });

        actions
    }
}

fn draft_from_form(form: &NewPartyFormView) -> NewPartyDraft {
    let mut draft = NewPartyDraft::default();
    for field in &form.fields {
        if let Some(value) = draft_field_mut(&mut draft, field.name) {
            value.clone_from(&field.value);
        }
    }
    draft
}

fn draft_field_mut<'a>(draft: &'a mut NewPartyDraft, name: &str) -> Option<&'a mut String> {
    match name {
        "name" => Some(&mut draft.name),
        "description" => Some(&mut draft.description),
        "date" => Some(&mut draft.date),
        "location" => Some(&mut draft.location),
        _ => None,
    }
}

fn show_party_list(ui: &mut egui::Ui, list: &PartyListView, actions: &mut Vec<Action>) {
    for item in &list.items {
        if ui.selectable_label(item.selected, item.name.as_str()).clicked() {
            actions.push(item.on_click);
        }
    }
}

fn show_party_details(ui: &mut egui::Ui, details: &PartyDetailsView, actions: &mut Vec<Action>) {
    ui.label(egui::RichText::new(&details.heading).strong().size(18.0));
    ui.label(details.date_label.as_str())
        .on_hover_text(details.date_time.as_str());
    ui.label(egui::RichText::new(&details.location).italics());
    ui.add_space(6.0);
    ui.label(details.description.as_str());
    ui.add_space(6.0);
    show_guest_list(ui, &details.guests);
    ui.add_space(10.0);
    if ui.button(details.delete_label.as_str()).clicked() {
        actions.push(details.on_delete);
    }
}

fn show_guest_list(ui: &mut egui::Ui, guests: &GuestListView) {
    egui::Frame::NONE
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            for entry in &guests.entries {
                ui.label(format!("• {}", entry.name));
            }
        });
}

fn show_new_party_form(
    ui: &mut egui::Ui,
    form: &NewPartyFormView,
    draft: &mut NewPartyDraft,
    actions: &mut Vec<Action>,
) {
    for field in &form.fields {
        let Some(value) = draft_field_mut(draft, field.name) else {
            continue;
        };
        show_form_field(ui, field, value);
        ui.add_space(4.0);
    }

    let all_filled = [&draft.name, &draft.description, &draft.date, &draft.location]
        .iter()
        .all(|value| !value.trim().is_empty());
    let submit = ui
        .add_enabled(all_filled, egui::Button::new(form.submit_label.as_str()))
        .on_disabled_hover_text("All fields are required.");
    if submit.clicked() {
        actions.push(form.on_submit);
    }
}

fn show_form_field(ui: &mut egui::Ui, field: &FormFieldView, value: &mut String) {
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };
    ui.label(egui::RichText::new(label).strong());

    match field.kind {
        FieldKind::Text => {
            ui.add(
                egui::TextEdit::singleline(value)
                    .id_salt(field.name)
                    .hint_text(field.placeholder)
                    .desired_width(f32::INFINITY),
            );
        }
        FieldKind::Date => {
            ui.horizontal(|ui| match picked_date(value) {
                Some(mut date) => {
                    ui.add(DatePickerButton::new(&mut date).id_salt(field.name));
                    if ui.small_button("Clear").clicked() {
                        value.clear();
                    } else {
                        *value = format_picked_date(date);
                    }
                }
                None => {
                    if ui.button("Pick a date").clicked() {
                        *value = format_picked_date(Local::now().date_naive());
                    }
                }
            });
        }
    }
}

/// The day held by the date field, if one has been picked.
fn picked_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT).ok()
}

fn format_picked_date(date: NaiveDate) -> String {
    date.format(DATE_INPUT_FORMAT).to_string()
}

impl eframe::App for PartyPlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        let actions = match self.view.clone() {
            Some(view) => self.show_view(ctx, &view),
            None => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.spinner();
                        ui.weak("Loading parties...");
                    });
                });
                Vec::new()
            }
        };
        for action in actions {
            self.dispatch_action(action);
        }

        // Backend events arrive on a channel; keep polling it.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
