use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ishara_core::{AppState, Category, UiCommand};

use crate::log_layer::LogBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Translate,
    Learn,
    Recognize,
    Train,
    Logs,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Translate,
        Tab::Learn,
        Tab::Recognize,
        Tab::Train,
        Tab::Logs,
    ];

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Tabs with a text field swallow plain character keys.
    fn takes_text(self) -> bool {
        matches!(self, Tab::Translate | Tab::Train)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    None,
    Quit,
    Command(UiCommand),
}

pub struct App {
    pub tab: Tab,
    pub state: AppState,
    pub translate_input: String,
    pub train_input: String,
    pub selected_item: usize,
    pub should_quit: bool,
    pub logs: LogBuffer,
    pub log_scroll: usize,
    pub log_auto_scroll: bool,
    voice_seen: u64,
}

impl App {
    pub fn new(logs: LogBuffer) -> Self {
        Self {
            tab: Tab::Translate,
            state: AppState::default(),
            translate_input: String::new(),
            train_input: String::new(),
            selected_item: 0,
            should_quit: false,
            logs,
            log_scroll: 0,
            log_auto_scroll: true,
            voice_seen: 0,
        }
    }

    pub fn update_state(&mut self, new_state: AppState) {
        if new_state.translation.voice_seq > self.voice_seen {
            self.voice_seen = new_state.translation.voice_seq;
            self.translate_input = new_state.translation.voice_text.clone();
        }
        if new_state.learning.category != self.state.learning.category {
            self.selected_item = 0;
        }
        self.state = new_state;
        let items = self.state.learning.items.len();
        if items > 0 && self.selected_item >= items {
            self.selected_item = items - 1;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc => return self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.quit()
            }
            KeyCode::Tab => {
                self.tab = self.tab.next();
                return AppAction::None;
            }
            KeyCode::BackTab => {
                self.tab = self.tab.prev();
                return AppAction::None;
            }
            KeyCode::F(n @ 1..=5) => {
                self.tab = Tab::ALL[n as usize - 1];
                return AppAction::None;
            }
            _ => {}
        }

        if !self.tab.takes_text() {
            match key.code {
                KeyCode::Char('q') => return self.quit(),
                KeyCode::Char(c @ '1'..='5') => {
                    self.tab = Tab::ALL[c as usize - '1' as usize];
                    return AppAction::None;
                }
                _ => {}
            }
        }

        match self.tab {
            Tab::Translate => self.handle_translate_key(key),
            Tab::Learn => self.handle_learn_key(key),
            Tab::Recognize => self.handle_recognize_key(key),
            Tab::Train => self.handle_train_key(key),
            Tab::Logs => self.handle_logs_key(key),
        }
    }

    fn quit(&mut self) -> AppAction {
        self.should_quit = true;
        AppAction::Quit
    }

    fn handle_translate_key(&mut self, key: KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('r') if ctrl => AppAction::Command(UiCommand::SimulateVoice),
            KeyCode::Char('l') if ctrl => {
                self.translate_input.clear();
                AppAction::Command(UiCommand::ClearInput)
            }
            KeyCode::Char(c) if !ctrl => {
                self.translate_input.push(c);
                AppAction::Command(UiCommand::SetInputText(self.translate_input.clone()))
            }
            KeyCode::Backspace => {
                self.translate_input.pop();
                AppAction::Command(UiCommand::SetInputText(self.translate_input.clone()))
            }
            KeyCode::Enter => {
                AppAction::Command(UiCommand::TranslateNow(self.translate_input.clone()))
            }
            _ => AppAction::None,
        }
    }

    fn handle_learn_key(&mut self, key: KeyEvent) -> AppAction {
        let current = self.state.learning.category;
        let pos = Category::ALL
            .iter()
            .position(|c| *c == current)
            .unwrap_or(0);
        let n = Category::ALL.len();
        match key.code {
            KeyCode::Right => {
                AppAction::Command(UiCommand::SelectCategory(Category::ALL[(pos + 1) % n]))
            }
            KeyCode::Left => {
                AppAction::Command(UiCommand::SelectCategory(Category::ALL[(pos + n - 1) % n]))
            }
            KeyCode::Up => {
                self.selected_item = self.selected_item.saturating_sub(1);
                AppAction::None
            }
            KeyCode::Down => {
                if self.selected_item + 1 < self.state.learning.items.len() {
                    self.selected_item += 1;
                }
                AppAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.state.learning.items.is_empty() {
                    AppAction::None
                } else {
                    AppAction::Command(UiCommand::SelectItem(self.selected_item))
                }
            }
            KeyCode::Char('d') => AppAction::Command(UiCommand::StartDailyChallenge),
            KeyCode::Char('x') if self.state.learning.selected.is_some() => {
                AppAction::Command(UiCommand::CloseItem)
            }
            _ => AppAction::None,
        }
    }

    fn handle_recognize_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                AppAction::Command(UiCommand::ToggleRecognition)
            }
            KeyCode::Char('c') => AppAction::Command(UiCommand::ClearTranscript),
            _ => AppAction::None,
        }
    }

    fn handle_train_key(&mut self, key: KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => AppAction::Command(UiCommand::SaveSign),
            KeyCode::Char('l') if ctrl => {
                self.train_input.clear();
                AppAction::Command(UiCommand::ClearTraining)
            }
            KeyCode::Char(c) if !ctrl => {
                self.train_input.push(c);
                AppAction::Command(UiCommand::SetTargetWord(self.train_input.clone()))
            }
            KeyCode::Backspace => {
                self.train_input.pop();
                AppAction::Command(UiCommand::SetTargetWord(self.train_input.clone()))
            }
            KeyCode::Enter => AppAction::Command(UiCommand::StartRecording),
            _ => AppAction::None,
        }
    }

    fn handle_logs_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Up => {
                self.log_scroll = self.log_scroll.saturating_add(1);
                self.log_auto_scroll = false;
            }
            KeyCode::Down => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            KeyCode::Char('G') => {
                self.log_scroll = 0;
                self.log_auto_scroll = true;
            }
            _ => {}
        }
        AppAction::None
    }
}
