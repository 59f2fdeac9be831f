use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Mac,
    #[default]
    Other,
}

impl Platform {
    /// Guess the platform from a `User-Agent` (or `navigator.platform`) string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ua.contains("mac os") || ua.contains("macintosh") || ua.contains("macintel") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }
}

/// A key press as reported by the browser (`KeyboardEvent.key` + modifiers).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcutError {
    #[error("empty shortcut")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
}

/// A key combination such as `mod+k`, where `mod` is Cmd on macOS and Ctrl
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    key: String,
    primary: bool,
    ctrl: bool,
    meta: bool,
    shift: bool,
    alt: bool,
}

impl Shortcut {
    /// `mod+<key>`.
    pub fn primary(key: &str) -> Self {
        Self {
            key: key.to_string(),
            primary: true,
            ctrl: false,
            meta: false,
            shift: false,
            alt: false,
        }
    }

    pub fn matches(&self, event: &KeyEvent, platform: Platform) -> bool {
        let (mut want_ctrl, mut want_meta) = (self.ctrl, self.meta);
        if self.primary {
            match platform {
                Platform::Mac => want_meta = true,
                Platform::Other => want_ctrl = true,
            }
        }

        event.key.eq_ignore_ascii_case(&self.key)
            && event.ctrl == want_ctrl
            && event.meta == want_meta
            && event.shift == self.shift
            && event.alt == self.alt
    }

    /// Human-readable label, e.g. `⌘K` on macOS and `Ctrl+K` elsewhere.
    pub fn label(&self, platform: Platform) -> String {
        let key = self.key.to_uppercase();
        match platform {
            Platform::Mac => {
                let mut label = String::new();
                if self.ctrl {
                    label.push('⌃');
                }
                if self.alt {
                    label.push('⌥');
                }
                if self.shift {
                    label.push('⇧');
                }
                if self.primary || self.meta {
                    label.push('⌘');
                }
                label.push_str(&key);
                label
            }
            Platform::Other => {
                let mut parts: Vec<&str> = Vec::new();
                if self.primary || self.ctrl {
                    parts.push("Ctrl");
                }
                if self.meta {
                    parts.push("Meta");
                }
                if self.alt {
                    parts.push("Alt");
                }
                if self.shift {
                    parts.push("Shift");
                }
                parts.push(&key);
                parts.join("+")
            }
        }
    }
}

impl FromStr for Shortcut {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or(ShortcutError::Empty)?;

        let mut shortcut = Shortcut::primary(key);
        shortcut.primary = false;

        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "mod" => shortcut.primary = true,
                "ctrl" | "control" => shortcut.ctrl = true,
                "meta" | "cmd" | "command" => shortcut.meta = true,
                "shift" => shortcut.shift = true,
                "alt" | "option" => shortcut.alt = true,
                _ => return Err(ShortcutError::UnknownModifier(modifier.to_string())),
            }
        }

        Ok(shortcut)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(Platform::Other))
    }
}
