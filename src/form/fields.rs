use crate::form::FormError;
use askama::Template;

/// Free-text `<input>`
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "text_field.html")]
pub struct TextField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Message set by live validation, empty when none
    pub custom_validity: String,
    pub invalid: bool,
}

impl TextField {
    pub fn too_short(&self) -> bool {
        let len = self.value.chars().count();
        len > 0 && self.min_length.is_some_and(|min| len < min)
    }

    pub fn is_valid(&self) -> bool {
        let len = self.value.chars().count();
        self.custom_validity.is_empty()
            && !(self.required && self.value.trim().is_empty())
            && !self.too_short()
            && self.max_length.map_or(true, |max| len <= max)
    }
}

/// `<input type="number">` holding the raw text the user typed
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "number_field.html")]
pub struct NumberField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub required: bool,
    pub min: u32,
    pub max: u32,
    pub invalid: bool,
}

impl NumberField {
    pub fn number(&self) -> Option<u32> {
        self.value.trim().parse().ok()
    }

    pub fn is_valid(&self) -> bool {
        if self.value.trim().is_empty() {
            return !self.required;
        }
        self.number()
            .is_some_and(|n| self.min <= n && n <= self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

/// `<select>` with exactly one selected option
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "select_field.html")]
pub struct SelectField {
    pub name: String,
    pub label: String,
    pub options: Vec<SelectOption>,
    pub selected: usize,
    pub invalid: bool,
}

impl SelectField {
    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|option| option.value.as_str())
            .unwrap_or_default()
    }

    pub fn position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option.value == value)
    }

    /// Position of the option carrying `value`, or an error naming this field
    pub fn require(&self, value: &str) -> Result<usize, FormError> {
        self.position(value).ok_or_else(|| FormError::UnknownOption {
            field: self.name.clone(),
            value: value.to_string(),
        })
    }

    /// Select the option carrying `value`
    pub fn select_value(&mut self, value: &str) -> Result<(), FormError> {
        self.selected = self.require(value)?;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.options
            .get(self.selected)
            .is_some_and(|option| !option.disabled)
    }
}
