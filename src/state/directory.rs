//! Users and the user directory.

use serde::{Deserialize, Serialize};

/// Reputation tier shown next to a user's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Reputation {
    #[default]
    Novice,
    Analyst,
    Guru,
    MarketWizard,
}

impl std::fmt::Display for Reputation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Novice => write!(f, "Novice"),
            Self::Analyst => write!(f, "Analyst"),
            Self::Guru => write!(f, "Guru"),
            Self::MarketWizard => write!(f, "Market Wizard"),
        }
    }
}

/// A community member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Handle, without the leading `@`.
    pub handle: String,
    /// Avatar reference (URL).
    pub avatar: String,
    /// Experience points.
    pub xp: u32,
    /// Level.
    pub level: u32,
    /// Earned badges.
    pub badges: Vec<String>,
    /// Short biography.
    pub bio: String,
    /// Follower count.
    pub followers: u32,
    /// Following count.
    pub following: u32,
    /// Reputation tier.
    pub reputation: Reputation,
    /// Location, if shared.
    pub location: Option<String>,
    /// Personal website, if shared.
    pub website: Option<String>,
}

impl User {
    /// XP needed to complete the current level.
    pub fn xp_goal(&self) -> u32 {
        self.level.max(1) * 1000
    }

    /// Progress through the current level, 0-100.
    pub fn level_progress(&self) -> u16 {
        let percent = (self.xp as f64 / self.xp_goal() as f64 * 100.0).round();
        percent.clamp(0.0, 100.0) as u16
    }

    /// Whether `query` (already lower-cased) appears in the handle or name.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.handle.to_lowercase().contains(query_lower)
            || self.name.to_lowercase().contains(query_lower)
    }
}

/// Ordered collection of users.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    users: Vec<User>,
}

impl Directory {
    /// Create a directory from users in display order.
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// All users, in directory order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a user by ID.
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look up a user by ID for editing.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Users whose handle or name contains `query`, case-insensitively,
    /// preserving directory order.
    pub fn search(&self, query: &str) -> Vec<&User> {
        let query_lower = query.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.matches(&query_lower))
            .collect()
    }

    /// Users ordered by XP, highest first.
    pub fn leaderboard(&self) -> Vec<&User> {
        let mut ranked: Vec<&User> = self.users.iter().collect();
        ranked.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.name.cmp(&b.name)));
        ranked
    }

    /// Rank (1-based) of a user on the leaderboard.
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.leaderboard()
            .iter()
            .position(|u| u.id == id)
            .map(|i| i + 1)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(id: &str, name: &str, handle: &str, xp: u32) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            handle: handle.to_string(),
            avatar: String::new(),
            xp,
            level: 1,
            badges: Vec::new(),
            bio: String::new(),
            followers: 0,
            following: 0,
            reputation: Reputation::Novice,
            location: None,
            website: None,
        }
    }

    pub fn directory() -> Directory {
        Directory::new(vec![
            user("1", "Arjun Mehta", "arjun_m", 4250),
            user("2", "Rahul Trader", "rahul_t", 1200),
            user("3", "Priya Invests", "priya_i", 3400),
            user("4", "Nifty King", "nifty_k", 500),
            user("5", "Stock Wizard", "stock_wiz", 8000),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_search_matches_handle_or_name_case_insensitively() {
        let dir = directory();
        let handles: Vec<&str> = dir.search("RA").iter().map(|u| u.handle.as_str()).collect();
        // "Rahul Trader" (name + handle), "Priya Invests" does not contain "ra"
        assert_eq!(handles, vec!["rahul_t"]);

        let handles: Vec<&str> = dir.search("i").iter().map(|u| u.handle.as_str()).collect();
        assert_eq!(handles, vec!["priya_i", "nifty_k", "stock_wiz"]);
    }

    #[test]
    fn test_empty_query_returns_everyone_in_order() {
        let dir = directory();
        assert_eq!(dir.search("").len(), dir.len());
        assert_eq!(dir.search("")[0].id, "1");
    }

    #[test]
    fn test_leaderboard_orders_by_xp() {
        let dir = directory();
        let ids: Vec<&str> = dir.leaderboard().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "1", "3", "2", "4"]);
        assert_eq!(dir.rank_of("1"), Some(2));
        assert_eq!(dir.rank_of("missing"), None);
    }

    #[test]
    fn test_level_progress() {
        let mut u = user("9", "Test", "test", 4250);
        u.level = 14;
        assert_eq!(u.xp_goal(), 14_000);
        assert_eq!(u.level_progress(), 30);

        u.xp = 50_000;
        assert_eq!(u.level_progress(), 100);
    }
}
