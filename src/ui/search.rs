//! Search box, suggestions, and the selected breeds list

use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::{BreedCatalog, SelectedBreeds};

/// Messages produced by the panel's widgets
#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    SuggestionPicked(String),
    RemovePressed(String),
    SearchPressed,
}

/// A change the panel asks the application to make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a breed to the selection and refetch
    Select(String),
    /// Remove a breed from the selection and refetch
    Remove(String),
    /// Refetch for the selection as it is
    Search,
}

/// Local state of the search panel.
///
/// Catalog and selection are owned by the application and only borrowed
/// here; the panel reports changes as `Action`s.
#[derive(Debug)]
pub struct SearchPanel {
    input: String,
    suggestions: Vec<String>,
    limit: usize,
}

impl SearchPanel {
    pub fn new(limit: usize) -> Self {
        Self {
            input: String::new(),
            suggestions: Vec::new(),
            limit,
        }
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[cfg(test)]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn update(
        &mut self,
        message: Message,
        catalog: &BreedCatalog,
        selected: &SelectedBreeds,
    ) -> Option<Action> {
        match message {
            Message::InputChanged(value) => {
                self.update_input(value, catalog);
                None
            }
            Message::SuggestionPicked(name) => self.select_suggestion(name, selected),
            Message::RemovePressed(name) => Some(self.remove_breed(name)),
            Message::SearchPressed => Some(self.manual_search()),
        }
    }

    /// Store the raw input and recompute suggestions for it
    pub fn update_input(&mut self, value: String, catalog: &BreedCatalog) {
        self.suggestions = catalog.suggestions(&value, self.limit);
        self.input = value;
    }

    /// Pick a suggestion. Already-selected breeds are ignored entirely.
    pub fn select_suggestion(&mut self, name: String, selected: &SelectedBreeds) -> Option<Action> {
        if selected.contains(&name) {
            return None;
        }
        self.input.clear();
        self.suggestions.clear();
        Some(Action::Select(name))
    }

    pub fn remove_breed(&self, name: String) -> Action {
        Action::Remove(name)
    }

    pub fn manual_search(&self) -> Action {
        Action::Search
    }

    pub fn view<'a>(&'a self, selected: &'a SelectedBreeds) -> Element<'a, Message> {
        let search_row = row![
            text_input("Search Dogs", &self.input)
                .on_input(Message::InputChanged)
                .padding(10)
                .width(Length::Fill),
            button("Search")
                .on_press(Message::SearchPressed)
                .padding(10),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mut search_box: Column<Message> = column![search_row].spacing(4);
        if !self.suggestions.is_empty() {
            let items = self.suggestions.iter().map(|suggestion| -> Element<'a, Message> {
                button(text(suggestion))
                    .style(button::text)
                    .width(Length::Fill)
                    .on_press(Message::SuggestionPicked(suggestion.clone()))
                    .into()
            });
            search_box = search_box.push(Column::with_children(items).spacing(2));
        }

        let chips: Vec<Element<'a, Message>> = selected
            .as_slice()
            .iter()
            .map(|breed| {
                container(
                    row![
                        text(breed),
                        button(text("Remove").size(12))
                            .style(button::danger)
                            .on_press(Message::RemovePressed(breed.clone())),
                    ]
                    .spacing(8)
                    .align_y(Alignment::Center),
                )
                .padding(6)
                .style(container::rounded_box)
                .into()
            })
            .collect();

        let selected_list = column![
            text("Selected Breeds:").size(18),
            Wrap::with_elements(chips).spacing(8.0).line_spacing(8.0),
        ]
        .spacing(10);

        column![
            container(search_box).padding(16).style(container::rounded_box).width(Length::Fill),
            container(selected_list).padding(16).style(container::rounded_box).width(Length::Fill),
        ]
        .spacing(16)
        .into()
    }
}
