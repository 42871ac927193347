use crossterm::event::{KeyCode, KeyEvent};

use crate::data::{AnimalRecord, Habitat, HabitatCollection};
use crate::glyph::EmojiTable;
use crate::route::{Navigator, Route};

/// Everything the hologram needs once the route parameters resolved
#[derive(Debug, Clone, PartialEq)]
pub struct HologramView {
    pub habitat: Habitat,
    pub animal: AnimalRecord,
    pub glyph: String,
}

impl HologramView {
    pub fn detail_route(&self) -> Route {
        Route::animal_detail(self.habitat.as_str(), self.animal.id.as_str())
    }

    pub fn quiz_route(&self) -> Route {
        Route::quiz(self.habitat.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Found(HologramView),
    /// Final state: nothing animal-specific is offered from here
    NotFound { habitat: String, animal_id: String },
}

impl Screen {
    pub fn resolve(data: &HabitatCollection, glyphs: &EmojiTable, habitat: &str, animal_id: &str) -> Self {
        let found = habitat
            .parse::<Habitat>()
            .ok()
            .and_then(|h| data.resolve(habitat, animal_id).map(|animal| (h, animal)));

        match found {
            Some((habitat, animal)) => {
                let glyph = glyphs.glyph(&animal.name).to_string();
                tracing::debug!("Resolved {}/{} to {} {}", habitat, animal_id, animal.name, glyph);
                Screen::Found(HologramView { habitat, animal: animal.clone(), glyph })
            }
            None => {
                tracing::debug!("No animal for {}/{}", habitat, animal_id);
                Screen::NotFound {
                    habitat: habitat.to_string(),
                    animal_id: animal_id.to_string(),
                }
            }
        }
    }
}

/// The three buttons of the found screen, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Back,
    LearnMore,
    TakeQuiz,
}

impl Action {
    pub fn label(&self, animal_name: &str) -> String {
        match self {
            Action::Back => format!("← Back to {}", animal_name),
            Action::LearnMore => format!("Learn More About {}", animal_name),
            Action::TakeQuiz => "Take Quiz".to_string(),
        }
    }

    pub fn route(&self, view: &HologramView) -> Route {
        match self {
            Action::Back | Action::LearnMore => view.detail_route(),
            Action::TakeQuiz => view.quiz_route(),
        }
    }

    fn next(self) -> Self {
        match self {
            Action::Back => Action::LearnMore,
            Action::LearnMore => Action::TakeQuiz,
            Action::TakeQuiz => Action::Back,
        }
    }

    fn prev(self) -> Self {
        match self {
            Action::Back => Action::TakeQuiz,
            Action::LearnMore => Action::Back,
            Action::TakeQuiz => Action::LearnMore,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App<N: Navigator> {
    pub screen: Screen,
    pub popup: Popup,
    pub focus: Action,
    pub show_instructions: bool,

    // Feedback shown in the info line
    pub status_message: Option<String>,

    navigator: N,
}

impl<N: Navigator> App<N> {
    pub fn new(screen: Screen, navigator: N, show_instructions: bool) -> Self {
        Self {
            screen,
            popup: Popup::None,
            focus: Action::LearnMore,
            show_instructions,
            status_message: None,
            navigator,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup != Popup::None {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                self.popup = Popup::None;
            }
            return;
        }

        if matches!(key.code, KeyCode::Char('?') | KeyCode::Char('h')) {
            self.popup = Popup::Help;
            return;
        }

        // The placeholder has nothing to act on
        if matches!(self.screen, Screen::NotFound { .. }) {
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Right => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Left => self.focus = self.focus.prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focus),
            KeyCode::Char('b') => self.activate(Action::Back),
            KeyCode::Char('l') => self.activate(Action::LearnMore),
            KeyCode::Char('t') => self.activate(Action::TakeQuiz),
            KeyCode::Char('i') => self.show_instructions = !self.show_instructions,
            _ => {}
        }
    }

    /// Fire a navigation request for one of the buttons
    pub fn activate(&mut self, action: Action) {
        let Screen::Found(view) = &self.screen else {
            return;
        };
        let route = action.route(view);
        self.status_message = Some(format!("Opening {}", route));
        self.focus = action;
        self.navigator.navigate(route);
    }
}
