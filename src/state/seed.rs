//! Demo content the store starts with.

use super::chat_state::ChatMessage;
use super::club_state::{Club, ClubCategory};
use super::directory::{Reputation, User};
use super::feed_state::{Comment, Post, PostKind};
use crate::api::Sentiment;
use crate::content::{Poll, PollOption};
use chrono::{DateTime, TimeDelta, Utc};

/// XP earned on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyXp {
    pub day: &'static str,
    pub xp: u64,
}

/// Everything the store is seeded with.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub current_user_id: String,
    pub posts: Vec<Post>,
    pub messages: Vec<ChatMessage>,
    /// Users who take part in the chat room.
    pub chat_members: Vec<String>,
    pub clubs: Vec<Club>,
    pub weekly_activity: Vec<DailyXp>,
}

impl SeedData {
    /// The demo community, with timestamps relative to `now`.
    pub fn demo(now: DateTime<Utc>) -> Self {
        Self {
            users: users(),
            current_user_id: "1".to_string(),
            posts: posts(now),
            messages: messages(now),
            chat_members: vec!["2".to_string(), "3".to_string(), "4".to_string()],
            clubs: clubs(),
            weekly_activity: weekly_activity(),
        }
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self::demo(Utc::now())
    }
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    name: &str,
    handle: &str,
    xp: u32,
    level: u32,
    badges: &[&str],
    bio: &str,
    followers: u32,
    following: u32,
    reputation: Reputation,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        handle: handle.to_string(),
        avatar: format!("https://picsum.photos/40/40?random={id}"),
        xp,
        level,
        badges: badges.iter().map(|b| b.to_string()).collect(),
        bio: bio.to_string(),
        followers,
        following,
        reputation,
        location: None,
        website: None,
    }
}

fn users() -> Vec<User> {
    let mut arjun = user(
        "1",
        "Arjun Mehta",
        "arjun_m",
        4250,
        14,
        &["Early Adopter", "Bull Run", "Chartist"],
        "Swing trader focused on mid-caps. Identifying breakout patterns before they happen. NISM Certified.",
        142,
        89,
        Reputation::Analyst,
    );
    arjun.location = Some("Mumbai, IN".to_string());
    arjun.website = Some("https://arjuntrades.com".to_string());

    let mut rahul = user(
        "2",
        "Rahul Trader",
        "rahul_t",
        1200,
        12,
        &["Sniper"],
        "Day trader. Nifty & BankNifty options.",
        450,
        120,
        Reputation::Analyst,
    );
    rahul.location = Some("Delhi, IN".to_string());

    let mut priya = user(
        "3",
        "Priya Invests",
        "priya_i",
        3400,
        25,
        &["Fundamentalist", "HODL"],
        "Long term value investing. Coffee can portfolio.",
        1200,
        45,
        Reputation::Guru,
    );
    priya.location = Some("Bangalore, IN".to_string());

    let nifty = user(
        "4",
        "Nifty King",
        "nifty_k",
        500,
        5,
        &[],
        "Just starting out.",
        20,
        200,
        Reputation::Novice,
    );

    let mut wizard = user(
        "5",
        "Stock Wizard",
        "stock_wiz",
        8000,
        40,
        &["Legend", "100x Club"],
        "Veteran trader with 15 years of experience.",
        50_000,
        10,
        Reputation::MarketWizard,
    );
    wizard.website = Some("https://stockwiz.com".to_string());

    let crypto = user(
        "6",
        "Crypto Queen",
        "crypto_q",
        4500,
        18,
        &["Diamond Hands"],
        "Web3 enthusiast.",
        3400,
        400,
        Reputation::Analyst,
    );

    vec![arjun, rahul, priya, nifty, wizard, crypto]
}

fn comment(id: &str, author_id: &str, content: &str, at: DateTime<Utc>) -> Comment {
    Comment {
        id: id.to_string(),
        author_id: author_id.to_string(),
        content: content.to_string(),
        created_at: at,
    }
}

fn posts(now: DateTime<Utc>) -> Vec<Post> {
    let fed_poll = Poll::with_votes(
        "What will the market do after the Fed meeting?",
        vec![
            PollOption {
                id: "opt1".to_string(),
                text: "Rally (Bullish)".to_string(),
                votes: 145,
            },
            PollOption {
                id: "opt2".to_string(),
                text: "Crash (Bearish)".to_string(),
                votes: 42,
            },
            PollOption {
                id: "opt3".to_string(),
                text: "Sideways / No Change".to_string(),
                votes: 43,
            },
        ],
        None,
    );

    vec![
        Post {
            id: "101".to_string(),
            author_id: "2".to_string(),
            content: "The IT sector looks oversold on the weekly timeframe. RSI divergence is clear on $INFY and $TCS. I am initiating long positions here with a 2-month view. What do you guys think?".to_string(),
            created_at: now - TimeDelta::hours(2),
            likes: 45,
            liked: false,
            tags: vec!["INFY".into(), "TCS".into(), "TechnicalAnalysis".into()],
            kind: PostKind::View,
            sentiment: Some(Sentiment::Bullish),
            poll: None,
            comment_count: 12,
            comments: vec![
                comment("c1", "3", "Agree with TCS, but INFY guidance was weak.", now - TimeDelta::minutes(50)),
                comment("c2", "1", "Waiting for a daily close above 1400 before entry.", now - TimeDelta::minutes(10)),
            ],
        },
        Post {
            id: "102".to_string(),
            author_id: "3".to_string(),
            content: "Be careful with small caps right now. Valuations are stretched for $ADANIENT and the liquidity could dry up fast if the global cues turn negative. Holding 30% cash in my portfolio.".to_string(),
            created_at: now - TimeDelta::hours(5),
            likes: 120,
            liked: false,
            tags: vec!["MarketOutlook".into(), "RiskManagement".into()],
            kind: PostKind::View,
            sentiment: Some(Sentiment::Bearish),
            poll: None,
            comment_count: 34,
            comments: Vec::new(),
        },
        Post {
            id: "103".to_string(),
            author_id: "5".to_string(),
            content: "With the Fed meeting coming up, what is your expectation for the market reaction next week?".to_string(),
            created_at: now - TimeDelta::hours(24),
            likes: 230,
            liked: false,
            tags: vec!["FedMeet".into(), "Poll".into()],
            kind: PostKind::View,
            sentiment: Some(Sentiment::Neutral),
            poll: Some(fed_poll),
            comment_count: 85,
            comments: vec![comment("c3", "2", "Priced in already.", now - TimeDelta::hours(2))],
        },
    ]
}

fn message(id: &str, author_id: &str, content: &str, at: DateTime<Utc>) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        author_id: author_id.to_string(),
        content: content.to_string(),
        created_at: at,
        system: false,
    }
}

fn messages(now: DateTime<Utc>) -> Vec<ChatMessage> {
    vec![
        message("m1", "2", "Bank Nifty facing resistance at 44500 levels. Watch out.", now - TimeDelta::minutes(5)),
        message("m2", "3", "Agree, huge call writing visible there.", now - TimeDelta::minutes(4)),
        message("m3", "4", "Anyone tracking Tata Motors today? Breakout soon?", now - TimeDelta::minutes(2)),
    ]
}

fn club(id: &str, name: &str, description: &str, members: u32, icon: &str, category: ClubCategory) -> Club {
    Club {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        members,
        icon: icon.to_string(),
        category,
    }
}

fn clubs() -> Vec<Club> {
    vec![
        club("1", "F&O Snipers", "Dedicated to Nifty & BankNifty option buying strategies.", 12_500, "🎯", ClubCategory::Trading),
        club("2", "Value Investors", "Finding hidden gems for 5+ year horizon. Fundamental analysis only.", 8_400, "💎", ClubCategory::Investing),
        club("3", "IPO Watch", "Analysis and GMP discussions for upcoming listings.", 23_000, "🔔", ClubCategory::News),
        club("4", "Crypto Corner", "Bitcoin, ETH and Altcoin technicals.", 5_600, "₿", ClubCategory::Crypto),
        club("5", "Swing Kings", "Weekly swing trading setups and chart patterns.", 9_200, "📈", ClubCategory::Trading),
        club("6", "Dividend Yielders", "Focus on high dividend paying PSU and private stocks.", 4_100, "💰", ClubCategory::Investing),
    ]
}

fn weekly_activity() -> Vec<DailyXp> {
    [
        ("Mon", 120),
        ("Tue", 250),
        ("Wed", 180),
        ("Thu", 300),
        ("Fri", 210),
        ("Sat", 90),
        ("Sun", 150),
    ]
    .into_iter()
    .map(|(day, xp)| DailyXp { day, xp })
    .collect()
}
