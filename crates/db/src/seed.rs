//! First-run content.
//!
//! [`initialize_once`] writes a default value for every key that is absent
//! and leaves present keys alone, so running it on every start is safe and
//! never clobbers admin edits.

use chrono::Utc;
use serde::Serialize;
use tvk_common::{AppResult, IdGenerator};

use crate::entities::{
    Achievement, Banner, Event, EventType, IdeologyPoint, LeadershipMember, ManifestoPoint,
    ManifestoSuggestion, MediaAsset, MediaType, PollData, PollOption, SuggestionStatus,
    TickerItem, Transaction, User, UserRole, VoteOption,
};
use crate::keys::StoreKey;
use crate::store::KeyValueStore;

/// Administrator account written into an empty `users` key.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Options for seeding.
#[derive(Debug, Clone, Default)]
pub struct SeedOptions {
    /// Administrator to create; `None` seeds an empty user list.
    pub admin: Option<AdminSeed>,
}

/// Write seed values for every absent key. Returns the keys written.
pub async fn initialize_once(
    store: &dyn KeyValueStore,
    options: &SeedOptions,
) -> AppResult<Vec<StoreKey>> {
    let mut seeded = Vec::new();

    for key in StoreKey::ALL {
        if store.contains(key.as_str()).await? {
            continue;
        }

        store.set_raw(key.as_str(), seed_value(key, options)?).await?;
        seeded.push(key);
    }

    if seeded.is_empty() {
        tracing::debug!("Store already initialized");
    } else {
        tracing::info!(keys = ?seeded, "Seeded default content");
    }

    Ok(seeded)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string(value)?)
}

fn seed_value(key: StoreKey, options: &SeedOptions) -> AppResult<String> {
    match key {
        StoreKey::Users => to_json(&seed_users(options)),
        StoreKey::NewsTicker => to_json(&seed_ticker()),
        StoreKey::Banners => to_json(&seed_banners()),
        StoreKey::Events => to_json(&seed_events()),
        StoreKey::ManifestoPoints => to_json(&seed_manifesto_points()),
        StoreKey::Poll => to_json(&seed_poll()),
        StoreKey::Leadership => to_json(&seed_leadership()),
        StoreKey::Ideology => to_json(&seed_ideology()),
        StoreKey::Achievements => to_json(&seed_achievements()),
        StoreKey::Media => to_json(&seed_media()),
        StoreKey::Suggestions => to_json(&seed_suggestions()),
        StoreKey::Votes => to_json(&seed_votes()),
        StoreKey::Transactions => to_json::<[Transaction]>(&[]),
    }
}

fn seed_users(options: &SeedOptions) -> Vec<User> {
    options
        .admin
        .iter()
        .map(|admin| User {
            id: IdGenerator::new().generate(),
            name: admin.name.clone(),
            email: Some(admin.email.clone()),
            role: UserRole::Admin,
            membership_id: None,
            password_hash: Some(admin.password_hash.clone()),
            avatar: None,
            mobile: None,
            constituency: None,
            joined_at: Utc::now(),
            sso_provider: None,
            email_verified: true,
            mobile_verified: false,
        })
        .collect()
}

fn seed_ticker() -> Vec<TickerItem> {
    vec![
        TickerItem::from("TVK State Conference to be held in Vikravandi this month."),
        TickerItem::from("Join the movement: Dial *100# for membership enrollment."),
        TickerItem::from("Education for all is our primary mission."),
    ]
}

fn seed_banners() -> Vec<Banner> {
    vec![
        Banner {
            id: "b1".to_string(),
            title: "Pirappokkum Ella Uyirkkum".to_string(),
            subtitle: "All are equal by birth".to_string(),
            cta: "Join the Movement".to_string(),
            image: "https://images.unsplash.com/photo-1540910419892-4a36d2c3266c?auto=format&fit=crop&w=1600&q=80".to_string(),
            accent_color: "#D41D24".to_string(),
        },
        Banner {
            id: "b2".to_string(),
            title: "Vision 2026".to_string(),
            subtitle: "Education, employment and equality for every district".to_string(),
            cta: "Read the Manifesto".to_string(),
            image: "https://images.unsplash.com/photo-1517048676732-d65bc937f952?auto=format&fit=crop&w=1600&q=80".to_string(),
            accent_color: "#FFD700".to_string(),
        },
    ]
}

fn seed_events() -> Vec<Event> {
    vec![
        Event {
            id: "e1".to_string(),
            title: "State General Conference".to_string(),
            date: "Dec 15, 2024".to_string(),
            location: "Vikravandi, Villupuram".to_string(),
            event_type: EventType::Conference,
            image: "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?auto=format&fit=crop&w=800&q=80".to_string(),
        },
        Event {
            id: "e2".to_string(),
            title: "Youth Empowerment Rally".to_string(),
            date: "Jan 10, 2025".to_string(),
            location: "Marina Grounds, Chennai".to_string(),
            event_type: EventType::Rally,
            image: "https://images.unsplash.com/photo-1560523160-754a9e25c68f?auto=format&fit=crop&w=800&q=80".to_string(),
        },
        Event {
            id: "e3".to_string(),
            title: "District Coordinators Meet".to_string(),
            date: "Jan 22, 2025".to_string(),
            location: "Trichy Central".to_string(),
            event_type: EventType::Meeting,
            image: "https://images.unsplash.com/photo-1511578314322-379afb476865?auto=format&fit=crop&w=800&q=80".to_string(),
        },
    ]
}

fn seed_manifesto_points() -> Vec<ManifestoPoint> {
    [
        (
            "mp1",
            "Universal Quality Education",
            "Digital classrooms in every village and zero-cost higher education for all.",
        ),
        (
            "mp2",
            "Agricultural Sovereignty",
            "Minimum Support Price (MSP) determined by farmers, not middlemen.",
        ),
        (
            "mp3",
            "Youth Employment Hubs",
            "One skill-development center for every 5 constituencies.",
        ),
        (
            "mp4",
            "Environmental Justice",
            "Strict protection of Tamil Nadu's coastline and sacred water bodies.",
        ),
    ]
    .into_iter()
    .map(|(id, title, desc)| ManifestoPoint {
        id: id.to_string(),
        title: title.to_string(),
        desc: desc.to_string(),
    })
    .collect()
}

fn seed_poll() -> PollData {
    PollData {
        question: "Which issue should the party prioritise first?".to_string(),
        options: [
            ("p1", "Education Reform", 32),
            ("p2", "Farmers Support", 23),
            ("p3", "Unemployment Solutions", 36),
            ("p4", "Environmental Protection", 9),
        ]
        .into_iter()
        .map(|(id, label, percentage)| PollOption {
            id: id.to_string(),
            label: label.to_string(),
            percentage,
        })
        .collect(),
    }
}

fn seed_leadership() -> Vec<LeadershipMember> {
    vec![
        LeadershipMember {
            id: "leader-1".to_string(),
            name: "Thalapathy Vijay".to_string(),
            role: "Founder & President".to_string(),
            image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=400&h=500&q=80".to_string(),
            bio: "Visionary leader dedicated to social justice, secularism, and the progress of Tamil Nadu.".to_string(),
        },
        LeadershipMember {
            id: "leader-2".to_string(),
            name: "Dr. S. Karthik".to_string(),
            role: "General Secretary".to_string(),
            image: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?auto=format&fit=crop&w=400&h=500&q=80".to_string(),
            bio: "Political strategist with over 20 years of experience in administrative reforms.".to_string(),
        },
    ]
}

fn seed_ideology() -> Vec<IdeologyPoint> {
    [
        ("i1", "Equality", "All are equal by birth; no caste, creed or gender hierarchy."),
        ("i2", "Secularism", "Equal respect for every faith and none."),
        ("i3", "Social Justice", "Representation and opportunity for every community."),
        ("i4", "Progress", "Governance measured by schools, jobs and clean water."),
    ]
    .into_iter()
    .map(|(id, title, description)| IdeologyPoint {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    })
    .collect()
}

fn seed_achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            id: "a1".to_string(),
            year: "2024".to_string(),
            title: "Party Founded".to_string(),
            desc: "Registered with the Election Commission of India.".to_string(),
            img: "https://images.unsplash.com/photo-1529107386315-e1a2ed48a620?auto=format&fit=crop&w=800&q=80".to_string(),
        },
        Achievement {
            id: "a2".to_string(),
            year: "2024".to_string(),
            title: "First State Conference".to_string(),
            desc: "Lakhs of supporters gathered at Vikravandi.".to_string(),
            img: "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?auto=format&fit=crop&w=800&q=80".to_string(),
        },
    ]
}

fn seed_media() -> Vec<MediaAsset> {
    vec![
        MediaAsset {
            id: "m1".to_string(),
            title: "TVK Official Poster 2024".to_string(),
            url: "https://images.unsplash.com/photo-1540910419892-4a36d2c3266c".to_string(),
            media_type: MediaType::Poster,
            download_count: 1240,
        },
        MediaAsset {
            id: "m2".to_string(),
            title: "Thalapathy Vision Wallpaper".to_string(),
            url: "https://images.unsplash.com/photo-1517048676732-d65bc937f952".to_string(),
            media_type: MediaType::Wallpaper,
            download_count: 850,
        },
    ]
}

fn seed_suggestions() -> Vec<ManifestoSuggestion> {
    vec![ManifestoSuggestion {
        id: "s1".to_string(),
        user: "Arun Kumar".to_string(),
        user_id: "member-123".to_string(),
        timestamp: Utc::now(),
        suggestion: "Open a public library with free Wi-Fi in every panchayat.".to_string(),
        status: SuggestionStatus::Pending,
        response: None,
    }]
}

fn seed_votes() -> Vec<VoteOption> {
    [
        ("1", "Education Reform", 4500),
        ("2", "Farmers Support", 3200),
        ("3", "Unemployment Solutions", 5100),
        ("4", "Environmental Protection", 1200),
    ]
    .into_iter()
    .map(|(id, label, votes)| VoteOption {
        id: id.to_string(),
        label: label.to_string(),
        votes,
    })
    .collect()
}
