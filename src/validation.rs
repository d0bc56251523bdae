use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Course fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Description,
    Instructor,
    Duration,
    Price,
    Category,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Instructor => "instructor",
            Field::Duration => "duration",
            Field::Price => "price",
            Field::Category => "category",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Instructor => "Instructor",
            Field::Duration => "Duration",
            Field::Price => "Price",
            Field::Category => "Category",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Field::Title),
            "description" => Some(Field::Description),
            "instructor" => Some(Field::Instructor),
            "duration" => Some(Field::Duration),
            "price" => Some(Field::Price),
            "category" => Some(Field::Category),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for a field.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

pub fn check_text(errors: &mut FieldErrors, field: Field, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{} is required", field.label()));
    }
}

pub fn check_duration(errors: &mut FieldErrors, hours: i64) {
    if hours <= 0 {
        errors.insert(Field::Duration, "Duration must be a positive number");
    }
}

pub fn check_price(errors: &mut FieldErrors, price: f64) {
    if !price.is_finite() || price < 0.0 {
        errors.insert(Field::Price, "Price must be a valid number");
    }
}

/// Parses a duration typed into a form. Records an error and returns `None`
/// when the input is blank, non-numeric or not positive.
pub fn parse_duration(errors: &mut FieldErrors, raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(Field::Duration, "Duration is required");
        return None;
    }
    match raw.parse::<i64>() {
        Ok(hours) if hours > 0 => Some(hours),
        _ => {
            errors.insert(Field::Duration, "Duration must be a positive number");
            None
        }
    }
}

pub fn parse_price(errors: &mut FieldErrors, raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(Field::Price, "Price is required");
        return None;
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Some(price),
        _ => {
            errors.insert(Field::Price, "Price must be a valid number");
            None
        }
    }
}
