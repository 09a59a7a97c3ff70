//! Application state and key handling
//!
//! `App` holds only view state (mode, selection, status line, banner).
//! Every change to the lists goes through `ListStore`.

use std::time::{Duration, Instant};

use cartlist_core::{AddOutcome, ListStore, ShareTarget};
use crossterm::event::{KeyCode, KeyModifiers};

/// How long a status message stays on screen
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Moving around the active list
    Normal,
    /// Typing into the item input line
    Item,
    /// Editing the active list's name
    Rename,
    /// "Create a new list?" confirmation
    NewListPrompt,
    /// Waiting for the share target key
    Share,
    /// "Delete this list?" confirmation
    ConfirmDeleteList,
}

/// A deep link the run loop should hand to the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub target: ShareTarget,
    pub url: String,
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Selected row in the active list
    pub selected: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Ads removed for this session
    pub ads_removed: bool,
    /// Saves that have failed so far
    pub save_failures: u64,
    /// Label placed in front of shared messages
    pub share_label: String,
    /// Share waiting to be opened by the run loop
    pub pending_share: Option<ShareRequest>,
}

impl App {
    pub fn new(share_label: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            selected: 0,
            status_message: None,
            status_message_time: None,
            show_help: false,
            ads_removed: false,
            save_failures: 0,
            share_label: share_label.into(),
            pending_share: None,
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Hide the ad banner for the rest of the session
    pub fn remove_ads(&mut self) {
        if !self.ads_removed {
            self.ads_removed = true;
            self.set_status("Ads removed");
        }
    }

    /// Keep the selection inside the active list
    pub fn clamp_selection(&mut self, store: &ListStore) {
        let len = store.active_items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Dispatch a key press according to the input mode
    pub fn handle_key(&mut self, store: &mut ListStore, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // If help is showing, any key dismisses it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal(store, code),
            InputMode::Item => self.handle_item_input(store, code),
            InputMode::Rename => self.handle_rename_input(store, code),
            InputMode::NewListPrompt => self.handle_new_list_prompt(store, code),
            InputMode::Share => self.handle_share(store, code),
            InputMode::ConfirmDeleteList => self.handle_confirm_delete(store, code),
        }
        self.clamp_selection(store);
    }

    fn handle_normal(&mut self, store: &mut ListStore, code: KeyCode) {
        match code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            // Navigation within the active list
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected += 1;
            }

            // Switching lists
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                self.cycle_list(store, true);
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                self.cycle_list(store, false);
            }

            // Item actions
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.input_mode = InputMode::Item;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if !store.active_items().is_empty() {
                    match store.toggle_bought(self.selected) {
                        Ok(_) => {}
                        Err(e) => self.set_status(e.to_string()),
                    }
                }
            }
            KeyCode::Char('e') => match store.edit_item(self.selected) {
                Ok(_) => self.input_mode = InputMode::Item,
                Err(e) => self.set_status(e.to_string()),
            },
            KeyCode::Char('d') | KeyCode::Delete => {
                if !store.active_items().is_empty() {
                    match store.delete_item(self.selected) {
                        Ok(item) => self.set_status(format!("Removed '{}'", item.name)),
                        Err(e) => self.set_status(e.to_string()),
                    }
                }
            }

            // List actions
            KeyCode::Char('n') => {
                store.open_new_list_prompt();
                self.input_mode = InputMode::NewListPrompt;
            }
            KeyCode::Char('r') => match store.begin_rename() {
                Ok(()) => self.input_mode = InputMode::Rename,
                Err(e) => self.set_status(e.to_string()),
            },
            KeyCode::Char('D') => {
                if store.active_list_name().is_some() {
                    self.input_mode = InputMode::ConfirmDeleteList;
                } else {
                    self.set_status("No list is selected");
                }
            }
            KeyCode::Char('s') => {
                if store.active_list_name().is_some() {
                    self.input_mode = InputMode::Share;
                } else {
                    self.set_status("No list is selected");
                }
            }

            KeyCode::Char('p') => self.remove_ads(),
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Esc => store.cancel_edit(),

            _ => {}
        }
    }

    fn handle_item_input(&mut self, store: &mut ListStore, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                store.cancel_edit();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => match store.submit_pending_text() {
                Ok(AddOutcome::Rejected) => {}
                Ok(AddOutcome::CreatedList { list, index }) => {
                    self.selected = index;
                    self.set_status(format!("Created {}", list));
                }
                Ok(AddOutcome::Appended { index }) | Ok(AddOutcome::Replaced { index }) => {
                    self.selected = index;
                }
                Err(e) => self.set_status(e.to_string()),
            },
            KeyCode::Char(c) => {
                let mut text = store.session().pending_text.clone();
                text.push(c);
                store.set_pending_text(text);
            }
            KeyCode::Backspace => {
                let mut text = store.session().pending_text.clone();
                text.pop();
                store.set_pending_text(text);
            }
            _ => {}
        }
    }

    fn handle_rename_input(&mut self, store: &mut ListStore, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                store.cancel_rename();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => match store.commit_rename() {
                Ok(()) => self.input_mode = InputMode::Normal,
                // Stay in rename mode so the name can be fixed
                Err(e) => self.set_status(e.to_string()),
            },
            KeyCode::Char(c) => {
                let mut text = store.session().rename_buffer.clone();
                text.push(c);
                store.set_rename_buffer(text);
            }
            KeyCode::Backspace => {
                let mut text = store.session().rename_buffer.clone();
                text.pop();
                store.set_rename_buffer(text);
            }
            _ => {}
        }
    }

    fn handle_new_list_prompt(&mut self, store: &mut ListStore, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let name = store.create_list();
                self.selected = 0;
                self.set_status(format!("Created {}", name));
            }
            KeyCode::Char('n') | KeyCode::Esc => store.cancel_new_list_prompt(),
            _ => return,
        }
        self.input_mode = InputMode::Normal;
    }

    fn handle_share(&mut self, store: &mut ListStore, code: KeyCode) {
        let target = match code {
            KeyCode::Char('w') => Some(ShareTarget::WhatsApp),
            KeyCode::Char('m') => Some(ShareTarget::Messenger),
            KeyCode::Char('s') => Some(ShareTarget::Sms),
            KeyCode::Esc => None,
            _ => return,
        };
        self.input_mode = InputMode::Normal;

        if let Some(target) = target {
            match store.share_message(&self.share_label) {
                Ok(message) => {
                    self.pending_share = Some(ShareRequest {
                        target,
                        url: target.url(&message),
                    });
                }
                Err(e) => self.set_status(e.to_string()),
            }
        }
    }

    fn handle_confirm_delete(&mut self, store: &mut ListStore, code: KeyCode) {
        match code {
            KeyCode::Char('y') => {
                let name = store.active_list_name().map(str::to_string);
                match store.delete_active_list() {
                    Ok(_) => {
                        self.selected = 0;
                        if let Some(name) = name {
                            self.set_status(format!("Deleted {}", name));
                        }
                    }
                    Err(e) => self.set_status(e.to_string()),
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {}
            _ => return,
        }
        self.input_mode = InputMode::Normal;
    }

    /// Select the next or previous list in display order
    fn cycle_list(&mut self, store: &mut ListStore, forward: bool) {
        let names = store.list_names();
        if names.is_empty() {
            return;
        }

        let current = store
            .active_list_name()
            .and_then(|active| names.iter().position(|name| name == active));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => names.len() - 1,
            (Some(i), true) => (i + 1) % names.len(),
            (Some(i), false) => (i + names.len() - 1) % names.len(),
        };

        if let Err(e) = store.select_list(&names[next]) {
            self.set_status(e.to_string());
        }
        self.selected = 0;
    }
}
