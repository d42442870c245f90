// Form state - minimal text fields for the TUI forms
//
// Native form constraints do not exist in a terminal, so numeric fields
// are parsed on submit; a parse failure surfaces as a toast and nothing
// is submitted.

use crossterm::event::KeyCode;

/// One editable text field
#[derive(Debug, Clone)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    /// Render as dots (passwords)
    pub mask: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            mask: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            mask: true,
        }
    }

    pub fn with_value(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            mask: false,
        }
    }

    /// Value as rendered (masked fields show dots)
    pub fn display_value(&self) -> String {
        if self.mask {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Apply a key to this field. Returns true if consumed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
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

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn parse_f64(&self) -> Result<f64, String> {
        self.trimmed()
            .parse::<f64>()
            .map_err(|_| format!("Invalid number for {}", self.label))
    }

    pub fn parse_u32(&self) -> Result<u32, String> {
        self.trimmed()
            .parse::<u32>()
            .map_err(|_| format!("Invalid number for {}", self.label))
    }

    /// Empty field means None; anything else must parse
    pub fn parse_optional_f64(&self) -> Result<Option<f64>, String> {
        if self.trimmed().is_empty() {
            return Ok(None);
        }
        self.parse_f64().map(Some)
    }

    pub fn require_text(&self) -> Result<String, String> {
        let text = self.trimmed();
        if text.is_empty() {
            Err(format!("{} is required", self.label))
        } else {
            Ok(text.to_string())
        }
    }
}

/// A vertical group of fields with one focused at a time
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focused: usize,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focused: 0 }
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = if self.focused == 0 {
            self.fields.len() - 1
        } else {
            self.focused - 1
        };
    }

    /// Route a key: Tab/Down and BackTab/Up move focus, everything else
    /// goes to the focused field. Returns true if consumed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                true
            }
            other => self.fields[self.focused].handle_key(other),
        }
    }

    pub fn field(&self, index: usize) -> &TextField {
        &self.fields[index]
    }

    /// Clear all values and reset focus
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focused = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace_edit_the_focused_field() {
        let mut form = Form::new(vec![TextField::new("Email"), TextField::masked("Password")]);
        for c in "ana".chars() {
            form.handle_key(KeyCode::Char(c));
        }
        form.handle_key(KeyCode::Backspace);
        assert_eq!(form.field(0).value, "an");

        form.handle_key(KeyCode::Tab);
        form.handle_key(KeyCode::Char('x'));
        assert_eq!(form.field(1).value, "x");
        assert_eq!(form.field(1).display_value(), "•");
    }

    #[test]
    fn focus_wraps_both_directions() {
        let mut form = Form::new(vec![TextField::new("A"), TextField::new("B")]);
        form.handle_key(KeyCode::BackTab);
        assert_eq!(form.focused, 1);
        form.handle_key(KeyCode::Tab);
        assert_eq!(form.focused, 0);
    }

    #[test]
    fn numeric_parsing_reports_the_field_label() {
        let field = TextField::with_value("Calories", "abc");
        assert_eq!(
            field.parse_f64().unwrap_err(),
            "Invalid number for Calories"
        );

        let empty = TextField::new("Goal weight");
        assert_eq!(empty.parse_optional_f64().unwrap(), None);
        let field = TextField::with_value("Goal weight", " 63.5 ");
        assert_eq!(field.parse_optional_f64().unwrap(), Some(63.5));
    }
}
