//! View tree built from [`AppState`]. Every function here is pure: the same state
//! always yields an equal tree, and the whole tree is rebuilt on each render.

use shared::{
    domain::{GuestId, PartyId},
    protocol::Party,
};

use crate::state::AppState;

pub const APP_TITLE: &str = "Party Planner";
pub const SELECT_PROMPT: &str = "Please select a party to learn more.";

/// Interaction attached to a view element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectParty(PartyId),
    RemoveParty(PartyId),
    SubmitNewParty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppView {
    pub title: String,
    pub parties_heading: String,
    pub details_heading: String,
    pub form_heading: String,
    pub party_list: PartyListView,
    pub selected_party: SelectedPartyView,
    pub new_party_form: NewPartyFormView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyListView {
    pub items: Vec<PartyListItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyListItemView {
    pub party_id: PartyId,
    pub name: String,
    pub selected: bool,
    pub on_click: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedPartyView {
    Prompt(String),
    Details(PartyDetailsView),
}

impl SelectedPartyView {
    pub fn details(&self) -> Option<&PartyDetailsView> {
        match self {
            Self::Details(details) => Some(details),
            Self::Prompt(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyDetailsView {
    pub party_id: PartyId,
    pub heading: String,
    /// Full timestamp as the server sent it.
    pub date_time: String,
    pub date_label: String,
    pub location: String,
    pub description: String,
    pub guests: GuestListView,
    pub delete_label: String,
    pub on_delete: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestListView {
    pub entries: Vec<GuestEntryView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestEntryView {
    pub guest_id: GuestId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPartyFormView {
    pub fields: Vec<FormFieldView>,
    pub submit_label: String,
    pub on_submit: Action,
}

pub fn render(state: &AppState) -> AppView {
    AppView {
        title: APP_TITLE.to_string(),
        parties_heading: "Upcoming Parties".to_string(),
        details_heading: "Party Details".to_string(),
        form_heading: "Add a new party".to_string(),
        party_list: party_list(state),
        selected_party: selected_party(state),
        new_party_form: new_party_form(),
    }
}

pub fn party_list(state: &AppState) -> PartyListView {
    PartyListView {
        items: state
            .parties
            .iter()
            .map(|party| party_list_item(state, party))
            .collect(),
    }
}

pub fn party_list_item(state: &AppState, party: &Party) -> PartyListItemView {
    PartyListItemView {
        party_id: party.id,
        name: party.name.clone(),
        selected: state.is_selected(party.id),
        on_click: Action::SelectParty(party.id),
    }
}

pub fn selected_party(state: &AppState) -> SelectedPartyView {
    let Some(party) = &state.selected_party else {
        return SelectedPartyView::Prompt(SELECT_PROMPT.to_string());
    };

    SelectedPartyView::Details(PartyDetailsView {
        party_id: party.id,
        heading: format!("{} #{}", party.name, party.id),
        date_time: party.date.clone(),
        date_label: party.date_portion().to_string(),
        location: party.location.clone(),
        description: party.description.clone(),
        guests: guest_list(state),
        delete_label: "Delete Party".to_string(),
        on_delete: Action::RemoveParty(party.id),
    })
}

pub fn guest_list(state: &AppState) -> GuestListView {
    GuestListView {
        entries: state
            .guests_at_selected_party()
            .into_iter()
            .map(|guest| GuestEntryView {
                guest_id: guest.id,
                name: guest.name.clone(),
            })
            .collect(),
    }
}

pub fn new_party_form() -> NewPartyFormView {
    let field = |name: &'static str, label: &'static str, kind: FieldKind| FormFieldView {
        name,
        label,
        placeholder: name,
        kind,
        required: true,
        value: String::new(),
    };

    NewPartyFormView {
        fields: vec![
            field("name", "Name", FieldKind::Text),
            field("description", "Description", FieldKind::Text),
            field("date", "Date", FieldKind::Date),
            field("location", "Location", FieldKind::Text),
        ],
        submit_label: "Add party".to_string(),
        on_submit: Action::SubmitNewParty,
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
