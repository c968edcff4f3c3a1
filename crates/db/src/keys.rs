//! Store key space.

use std::fmt;

/// Every key the site stores, one JSON value each.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Users,
    NewsTicker,
    Banners,
    Events,
    ManifestoPoints,
    Poll,
    Leadership,
    Ideology,
    Achievements,
    Media,
    Suggestions,
    Votes,
    Transactions,
}

impl StoreKey {
    /// All keys, in seeding order.
    pub const ALL: [Self; 13] = [
        Self::Users,
        Self::NewsTicker,
        Self::Banners,
        Self::Events,
        Self::ManifestoPoints,
        Self::Poll,
        Self::Leadership,
        Self::Ideology,
        Self::Achievements,
        Self::Media,
        Self::Suggestions,
        Self::Votes,
        Self::Transactions,
    ];

    /// Key name in the underlying medium.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::NewsTicker => "news_ticker",
            Self::Banners => "banners",
            Self::Events => "events",
            Self::ManifestoPoints => "manifesto_points",
            Self::Poll => "poll",
            Self::Leadership => "leadership",
            Self::Ideology => "ideology",
            Self::Achievements => "achievements",
            Self::Media => "media",
            Self::Suggestions => "suggestions",
            Self::Votes => "votes",
            Self::Transactions => "transactions",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
