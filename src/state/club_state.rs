//! Club directory.

use super::text_input::TextInput;
use std::collections::HashSet;

/// Club category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClubCategory {
    Trading,
    Investing,
    News,
    Crypto,
}

impl ClubCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Trading => "Trading",
            Self::Investing => "Investing",
            Self::News => "News",
            Self::Crypto => "Crypto",
        }
    }
}

/// Category filter including "All".
pub const CATEGORY_FILTERS: [Option<ClubCategory>; 5] = [
    None,
    Some(ClubCategory::Trading),
    Some(ClubCategory::Investing),
    Some(ClubCategory::News),
    Some(ClubCategory::Crypto),
];

/// A community club.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members: u32,
    pub icon: String,
    pub category: ClubCategory,
}

/// Clubs view state.
#[derive(Debug, Default)]
pub struct ClubState {
    pub clubs: Vec<Club>,
    pub search: TextInput,
    pub category: Option<ClubCategory>,
    pub joined: HashSet<String>,
    /// Selected index into the filtered list.
    pub selected: usize,
}

impl ClubState {
    pub fn new(clubs: Vec<Club>) -> Self {
        Self {
            clubs,
            ..Default::default()
        }
    }

    /// Clubs matching the search (name or description, case-insensitive) and
    /// the category filter.
    pub fn filtered(&self) -> Vec<&Club> {
        let query = self.search.value().to_lowercase();
        self.clubs
            .iter()
            .filter(|c| self.category.is_none_or(|cat| c.category == cat))
            .filter(|c| {
                c.name.to_lowercase().contains(&query)
                    || c.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn selected_club(&self) -> Option<&Club> {
        self.filtered().get(self.selected).copied()
    }

    /// Advance the category filter, wrapping back to "All".
    pub fn cycle_category(&mut self) {
        let i = CATEGORY_FILTERS
            .iter()
            .position(|c| *c == self.category)
            .unwrap_or(0);
        self.category = CATEGORY_FILTERS[(i + 1) % CATEGORY_FILTERS.len()];
        self.clamp_selection();
    }

    /// Join or leave. Returns whether the viewer is now a member.
    pub fn toggle_join(&mut self, club_id: &str) -> bool {
        if self.joined.remove(club_id) {
            false
        } else {
            self.joined.insert(club_id.to_string());
            true
        }
    }

    pub fn is_joined(&self, club_id: &str) -> bool {
        self.joined.contains(club_id)
    }

    /// Member count including the viewer.
    pub fn member_count(&self, club: &Club) -> u32 {
        club.members + u32::from(self.is_joined(&club.id))
    }

    pub fn clamp_selection(&mut self) {
        let max = self.filtered().len().saturating_sub(1);
        self.selected = self.selected.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(id: &str, name: &str, description: &str, category: ClubCategory) -> Club {
        Club {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            members: 100,
            icon: String::new(),
            category,
        }
    }

    fn state() -> ClubState {
        ClubState::new(vec![
            club("1", "F&O Snipers", "Nifty option buying", ClubCategory::Trading),
            club("2", "Value Investors", "Hidden gems", ClubCategory::Investing),
            club("3", "Swing Kings", "Weekly swing setups", ClubCategory::Trading),
        ])
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let mut s = state();
        s.search.set_value("SWING");
        let ids: Vec<&str> = s.filtered().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);

        s.search.set_value("gems");
        assert_eq!(s.filtered()[0].id, "2");
    }

    #[test]
    fn test_category_filter_cycles() {
        let mut s = state();
        s.cycle_category();
        assert_eq!(s.category, Some(ClubCategory::Trading));
        assert_eq!(s.filtered().len(), 2);

        for _ in 0..4 {
            s.cycle_category();
        }
        assert_eq!(s.category, None);
        assert_eq!(s.filtered().len(), 3);
    }

    #[test]
    fn test_toggle_join() {
        let mut s = state();
        let c = s.clubs[0].clone();
        assert!(s.toggle_join("1"));
        assert_eq!(s.member_count(&c), 101);
        assert!(!s.toggle_join("1"));
        assert_eq!(s.member_count(&c), 100);
    }

    #[test]
    fn test_selection_clamps_to_filter() {
        let mut s = state();
        s.selected = 2;
        s.search.set_value("value");
        s.clamp_selection();
        assert_eq!(s.selected, 0);
        assert_eq!(s.selected_club().unwrap().id, "2");
    }
}
