//! Volunteer identity and directory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The identity of a volunteer, joined onto attendance records at export time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    /// Unique identifier for the volunteer.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl Volunteer {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Lookup of volunteers by id.
#[derive(Debug, Clone, Default)]
pub struct VolunteerDirectory {
    volunteers: HashMap<String, Volunteer>,
}

impl VolunteerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a volunteer, replacing any previous entry with the same id.
    pub fn insert(&mut self, volunteer: Volunteer) {
        self.volunteers.insert(volunteer.id.clone(), volunteer);
    }

    /// Looks up a volunteer by id.
    pub fn get(&self, id: &str) -> Option<&Volunteer> {
        self.volunteers.get(id)
    }

    /// Returns the number of volunteers in the directory.
    pub fn len(&self) -> usize {
        self.volunteers.len()
    }

    /// Returns true if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.volunteers.is_empty()
    }
}

impl FromIterator<Volunteer> for VolunteerDirectory {
    fn from_iter<I: IntoIterator<Item = Volunteer>>(iter: I) -> Self {
        let mut directory = Self::new();
        for volunteer in iter {
            directory.insert(volunteer);
        }
        directory
    }
}
