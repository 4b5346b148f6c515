//! Profile view and editor.

use super::directory::User;
use super::text_input::TextInput;

/// Field of the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Bio,
    Location,
    Website,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [Self::Name, Self::Bio, Self::Location, Self::Website];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Display Name",
            Self::Bio => "Bio",
            Self::Location => "Location",
            Self::Website => "Website",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Profile edit form, prefilled from the user.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: TextInput,
    pub bio: TextInput,
    pub location: TextInput,
    pub website: TextInput,
    pub field: ProfileField,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: TextInput::with_value(&user.name),
            bio: TextInput::with_value(&user.bio),
            location: TextInput::with_value(user.location.clone().unwrap_or_default()),
            website: TextInput::with_value(user.website.clone().unwrap_or_default()),
            field: ProfileField::Name,
        }
    }

    pub fn input(&self, field: ProfileField) -> &TextInput {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Bio => &self.bio,
            ProfileField::Location => &self.location,
            ProfileField::Website => &self.website,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.field {
            ProfileField::Name => &mut self.name,
            ProfileField::Bio => &mut self.bio,
            ProfileField::Location => &mut self.location,
            ProfileField::Website => &mut self.website,
        }
    }

    /// Write the form into `user`. A blank name is refused.
    pub fn apply(&self, user: &mut User) -> Result<(), &'static str> {
        let name = self.name.value().trim();
        if name.is_empty() {
            return Err("display name cannot be empty");
        }
        user.name = name.to_string();
        user.bio = self.bio.value().trim().to_string();
        user.location = optional(self.location.value());
        user.website = optional(self.website.value());
        Ok(())
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Profile view state.
#[derive(Debug, Default)]
pub struct ProfileState {
    /// User being viewed. `None` means the current user.
    pub viewing: Option<String>,
    /// Open edit form.
    pub form: Option<ProfileForm>,
}
