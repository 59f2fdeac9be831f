//! Command palette: quick navigation over the tool catalog.

pub mod search;
pub mod shortcut;

pub use search::{search, MatchKind, SearchHit};
pub use shortcut::{KeyEvent, Platform, Shortcut, ShortcutError};

/// What the page should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    Opened,
    Closed,
    SelectionMoved(usize),
    /// Navigate to the tool with this id.
    Navigate(String),
    Ignored,
}

#[derive(Debug, Clone)]
pub struct PaletteState {
    open: bool,
    selected: usize,
    results: Vec<String>,
    toggle: Shortcut,
    platform: Platform,
}

impl PaletteState {
    pub fn new(platform: Platform) -> Self {
        Self {
            open: false,
            selected: 0,
            results: Vec::new(),
            toggle: Shortcut::primary("k"),
            platform,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&str> {
        self.results.get(self.selected).map(String::as_str)
    }

    pub fn toggle_label(&self) -> String {
        self.toggle.label(self.platform)
    }

    /// Replace the result list (tool ids) after the query changed.
    pub fn set_results(&mut self, tool_ids: Vec<String>) {
        self.results = tool_ids;
        self.selected = 0;
    }

    pub fn open(&mut self) {
        self.open = true;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Reference key handling for the palette. The inline script in
    /// `templates/layout.html` mirrors it: the toggle shortcut opens and
    /// closes, a bare `/` opens while closed, Escape closes, arrows wrap
    /// around the results and Enter navigates to the selection. Change both
    /// together.
    pub fn handle_key(&mut self, event: &KeyEvent) -> PaletteAction {
        if self.toggle.matches(event, self.platform) {
            return if self.open {
                self.close();
                PaletteAction::Closed
            } else {
                self.open();
                PaletteAction::Opened
            };
        }

        if !self.open {
            let bare = !(event.ctrl || event.meta || event.alt);
            if bare && event.key == "/" {
                self.open();
                return PaletteAction::Opened;
            }
            return PaletteAction::Ignored;
        }

        match event.key.as_str() {
            "Escape" => {
                self.close();
                PaletteAction::Closed
            }
            "ArrowDown" if !self.results.is_empty() => {
                self.selected = (self.selected + 1) % self.results.len();
                PaletteAction::SelectionMoved(self.selected)
            }
            "ArrowUp" if !self.results.is_empty() => {
                self.selected = self
                    .selected
                    .checked_sub(1)
                    .unwrap_or(self.results.len() - 1);
                PaletteAction::SelectionMoved(self.selected)
            }
            "Enter" => match self.selected().map(str::to_string) {
                Some(id) => {
                    self.close();
                    PaletteAction::Navigate(id)
                }
                None => PaletteAction::Ignored,
            },
            _ => PaletteAction::Ignored,
        }
    }
}
