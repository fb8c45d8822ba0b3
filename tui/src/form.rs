use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;

/// Single-line text input.
#[derive(Clone, Debug, Default)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            masked: true,
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// What the field shows on screen.
    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        self.value.extend(s.chars().filter(|c| !c.is_control()));
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Apply an editing key. Returns false if the key is not an edit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }
}

/// A fixed list of fields with one focused at a time.
#[derive(Clone, Debug)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focused(&mut self) -> Option<&mut TextField> {
        self.fields.get_mut(self.focus)
    }

    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|f| f.value.as_str()).unwrap_or_default()
    }

    pub fn field_mut(&mut self, idx: usize) -> Option<&mut TextField> {
        self.fields.get_mut(idx)
    }

    pub fn is_last_focused(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Focus movement and editing. Enter is left to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                true
            }
            _ => self.focused().is_some_and(|f| f.handle_key(key)),
        }
    }
}
