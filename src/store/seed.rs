use chrono::{NaiveDate, Utc};

use super::{Comment, Event, Role, Store, User};

/// Plaintext password shared by every sample account.
pub const SAMPLE_PASSWORD: &str = "password123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users_created: usize,
    pub events_created: usize,
    pub emails: Vec<String>,
}

const SAMPLE_USERS: &[(&str, &str, Role, i64)] = &[
    ("john@university.edu", "John Smith", Role::Organizer, 150),
    ("sarah@university.edu", "Sarah Johnson", Role::Student, 200),
    ("mike@university.edu", "Mike Chen", Role::Student, 180),
    ("emma@university.edu", "Emma Davis", Role::Faculty, 220),
];

struct SampleEvent {
    title: &'static str,
    date: (i32, u32, u32),
    time: &'static str,
    location: &'static str,
    category: &'static str,
    description: &'static str,
    created_by: &'static str,
    attendees: &'static [&'static str],
    comments: &'static [(&'static str, &'static str)],
}

const SAMPLE_EVENTS: &[SampleEvent] = &[
    SampleEvent {
        title: "Spring Music Festival 2025",
        date: (2025, 3, 25),
        time: "14:00",
        location: "Main Hall",
        category: "cultural",
        description: "Annual celebration featuring local bands, food trucks, and campus talent. \
                      Join us for an unforgettable afternoon of music and entertainment!",
        created_by: "1",
        attendees: &["2", "3", "4"],
        comments: &[
            ("Sarah Johnson", "I'm so excited to perform with my band!"),
            ("Mike Chen", "Are there any food vendor applications still open?"),
        ],
    },
    SampleEvent {
        title: "Tech Innovation Expo",
        date: (2025, 3, 18),
        time: "10:00",
        location: "Innovation Lab",
        category: "academic",
        description: "Showcase groundbreaking student projects and research initiatives. \
                      Network with industry leaders and fellow innovators.",
        created_by: "3",
        attendees: &["1", "2", "4"],
        comments: &[("Mike Chen", "I'll be demoing my AI project!")],
    },
    SampleEvent {
        title: "Community Bake Sale",
        date: (2025, 4, 2),
        time: "11:00",
        location: "Student Plaza",
        category: "social",
        description: "Raising funds for local charities with homemade treats and community \
                      spirit. All proceeds go to helping local shelters.",
        created_by: "2",
        attendees: &["1", "4"],
        comments: &[],
    },
];

impl Store {
    /// Replace all data with the sample users and events.
    ///
    /// `password_hash` is the hash of [`SAMPLE_PASSWORD`] and is shared by all
    /// sample accounts. Favorites are cleared and id sequences restart after
    /// the sample records.
    pub fn reset_with_sample_data(&mut self, password_hash: &str) -> SeedSummary {
        let now = Utc::now();

        self.users.clear();
        self.events.clear();
        self.favorites.clear();

        for (i, (email, name, role, points)) in SAMPLE_USERS.iter().enumerate() {
            let key = i as u64 + 1;
            self.users.insert(
                key,
                User {
                    id: key.to_string(),
                    email: email.to_string(),
                    name: name.to_string(),
                    role: *role,
                    password_hash: password_hash.to_string(),
                    joined_date: now,
                    points: *points,
                    verified: true,
                    updated_at: None,
                },
            );
        }

        for (i, sample) in SAMPLE_EVENTS.iter().enumerate() {
            let key = i as u64 + 1;
            let (y, m, d) = sample.date;
            let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
                tracing::warn!("Skipping sample event with invalid date: {}", sample.title);
                continue;
            };

            self.events.insert(
                key,
                Event {
                    id: key.to_string(),
                    title: sample.title.to_string(),
                    date,
                    time: sample.time.to_string(),
                    location: sample.location.to_string(),
                    category: sample.category.to_string(),
                    description: sample.description.to_string(),
                    created_by: sample.created_by.to_string(),
                    created_at: now,
                    attendees: sample.attendees.iter().map(|a| a.to_string()).collect(),
                    comments: sample
                        .comments
                        .iter()
                        .map(|(author, text)| Comment {
                            author: author.to_string(),
                            text: text.to_string(),
                            timestamp: now,
                        })
                        .collect(),
                    updated_at: None,
                },
            );
        }

        self.next_user_id = SAMPLE_USERS.len() as u64 + 1;
        self.next_event_id = SAMPLE_EVENTS.len() as u64 + 1;

        tracing::info!(
            "Store reset with {} sample users and {} sample events",
            self.users.len(),
            self.events.len()
        );

        SeedSummary {
            users_created: self.users.len(),
            events_created: self.events.len(),
            emails: SAMPLE_USERS.iter().map(|(email, ..)| email.to_string()).collect(),
        }
    }
}
