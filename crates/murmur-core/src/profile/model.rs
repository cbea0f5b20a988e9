//! Profile entity and its custom fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MurmurError, Result};

/// Personal information about an author. Every part of it is optional.
///
/// A profile tracks whether it was modified after creation through a
/// conservative dirty flag: a name or birth-date setter raises the flag
/// whenever the new value is set and differs from the stored one, *or*
/// whenever the stored value was already set (so a no-op write over a
/// populated field still counts as a modification). Writing unset over an
/// unset field is the only write that never raises the flag. Custom-field
/// operations always raise it. Once raised the flag never clears; the only
/// way to obtain an unmodified profile again is [`Clone`], which duplicates
/// the data but not the flag.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Whether the profile was modified after creation. Not persisted.
    #[serde(skip)]
    modified: bool,
    first_name: Option<String>,
    middle_name: Option<String>,
    last_name: Option<String>,
    birth_day: Option<u32>,
    birth_month: Option<u32>,
    birth_year: Option<u32>,
    #[serde(default)]
    fields: Vec<Field>,
}

impl Clone for Profile {
    /// A clone carries the same data but always starts out unmodified.
    fn clone(&self) -> Self {
        Self {
            modified: false,
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            birth_day: self.birth_day,
            birth_month: self.birth_month,
            birth_year: self.birth_year,
            fields: self.fields.clone(),
        }
    }
}

impl Profile {
    /// Creates a new empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether this profile was modified after creation.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the first name.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Sets the first name.
    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.modified |= dirties(&self.first_name, &first_name);
        self.first_name = first_name;
    }

    /// Returns the middle name(s).
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    /// Sets the middle name.
    pub fn set_middle_name(&mut self, middle_name: Option<String>) {
        self.modified |= dirties(&self.middle_name, &middle_name);
        self.middle_name = middle_name;
    }

    /// Returns the last name.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Sets the last name.
    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.modified |= dirties(&self.last_name, &last_name);
        self.last_name = last_name;
    }

    /// Returns the day of the month the author was born on.
    pub fn birth_day(&self) -> Option<u32> {
        self.birth_day
    }

    /// Sets the day of the month the author was born on.
    pub fn set_birth_day(&mut self, birth_day: Option<u32>) {
        self.modified |= dirties(&self.birth_day, &birth_day);
        self.birth_day = birth_day;
    }

    /// Returns the month the author was born in.
    pub fn birth_month(&self) -> Option<u32> {
        self.birth_month
    }

    /// Sets the month the author was born in.
    pub fn set_birth_month(&mut self, birth_month: Option<u32>) {
        self.modified |= dirties(&self.birth_month, &birth_month);
        self.birth_month = birth_month;
    }

    /// Returns the year the author was born in.
    pub fn birth_year(&self) -> Option<u32> {
        self.birth_year
    }

    /// Sets the year the author was born in.
    pub fn set_birth_year(&mut self, birth_year: Option<u32>) {
        self.modified |= dirties(&self.birth_year, &birth_year);
        self.birth_year = birth_year;
    }

    /// Returns the custom fields, in display order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the custom field with the given id.
    pub fn field_by_id(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Returns the custom field with the given name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Appends a new custom field with an empty value.
    ///
    /// The name must be non-empty and must not collide with the name of an
    /// existing field.
    pub fn add_field(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(MurmurError::EmptyFieldName);
        }
        if self.field_by_name(name).is_some() {
            return Err(MurmurError::duplicate_field(name));
        }
        self.fields.push(Field {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            value: String::new(),
        });
        self.modified = true;
        Ok(())
    }

    /// Renames the field with the given id. The field itself is excluded
    /// from the duplicate check, so renaming a field to its current name
    /// succeeds.
    pub fn rename_field(&mut self, id: &str, new_name: &str) -> Result<()> {
        if new_name.is_empty() {
            return Err(MurmurError::EmptyFieldName);
        }
        if self
            .fields
            .iter()
            .any(|field| field.id != id && field.name == new_name)
        {
            return Err(MurmurError::duplicate_field(new_name));
        }
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.id == id)
            .ok_or_else(|| MurmurError::not_found("field", id))?;
        field.name = new_name.to_string();
        self.modified = true;
        Ok(())
    }

    /// Removes the field with the given id.
    pub fn remove_field(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.fields.remove(index);
        self.modified = true;
        Ok(())
    }

    /// Moves the field with the given id one position towards the front.
    /// Moving the first field is a no-op.
    pub fn move_field_up(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        if index > 0 {
            self.fields.swap(index, index - 1);
        }
        self.modified = true;
        Ok(())
    }

    /// Moves the field with the given id one position towards the back.
    /// Moving the last field is a no-op.
    pub fn move_field_down(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        if index + 1 < self.fields.len() {
            self.fields.swap(index, index + 1);
        }
        self.modified = true;
        Ok(())
    }

    /// Stores a new value in the field with the given id.
    pub fn set_field_value(&mut self, id: &str, value: &str) -> Result<()> {
        let index = self.position(id)?;
        self.fields[index].value = value.to_string();
        self.modified = true;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|field| field.id == id)
            .ok_or_else(|| MurmurError::not_found("field", id))
    }
}

/// The asymmetric dirty rule shared by all scalar setters: a write counts
/// as a modification when the new value is set and differs from the current
/// one, or when the current value was already set.
fn dirties<T: PartialEq>(current: &Option<T>, new: &Option<T>) -> bool {
    (new.is_some() && new != current) || current.is_some()
}

/// A custom key/value entry of a [`Profile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    id: String,
    name: String,
    value: String,
}

impl Field {
    /// Returns the id of this field.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the name of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of this field.
    pub fn value(&self) -> &str {
        &self.value
    }
}
