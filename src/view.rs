//! The view model sitting between the data layer and the terminal.
//!
//! Projection is a pure function of the latest activity snapshot plus the
//! current user, and rendering is a pure function of the projection. Nothing
//! here is cached or diffed; every refresh rebuilds the whole thing.

use crate::{activity::ActivityMap, session::User};
use std::fmt::Write;

/// What the activity list should show right now.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub cards: Vec<ActivityCard>,
}

/// One activity, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    /// Signed on purpose: an over-subscribed activity renders as negative.
    pub spots_left: i64,
    pub participants: Vec<ParticipantRow>,
}

/// One participant line, with its removal control shown or hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRow {
    pub email: String,
    /// Whether the removal control is drawn. Cosmetic only; the server
    /// makes the real authorization call.
    pub removable: bool,
}

impl BoardView {
    /// Derive the full view from a server snapshot and whoever is logged
    /// in.
    pub fn project(activities: &ActivityMap, user: Option<&User>) -> BoardView {
        let removable = user.map(|u| u.role.is_teacher()).unwrap_or(false);

        let cards = activities
            .iter()
            .map(|(name, activity)| ActivityCard {
                name: name.clone(),
                description: activity.description.clone(),
                schedule: activity.schedule.clone(),
                spots_left: activity.spots_left(),
                participants: activity
                    .participants
                    .iter()
                    .map(|email| ParticipantRow {
                        email: email.clone(),
                        removable,
                    })
                    .collect(),
            })
            .collect();

        BoardView { cards }
    }
}

/// Draw the whole board as text, one card per activity.
pub fn render(view: &BoardView) -> String {
    let mut out = String::new();

    for card in &view.cards {
        let _ = writeln!(out, "=== {} ===", card.name);
        let _ = writeln!(out, "{}", card.description);
        let _ = writeln!(out, "Schedule: {}", card.schedule);
        let _ = writeln!(out, "Availability: {} spots left", card.spots_left);

        if card.participants.is_empty() {
            let _ = writeln!(out, "No participants yet");
        } else {
            let _ = writeln!(out, "Participants:");
            for row in &card.participants {
                if row.removable {
                    let _ = writeln!(out, "  - {} [x]", row.email);
                } else {
                    let _ = writeln!(out, "  - {}", row.email);
                }
            }
        }

        let _ = writeln!(out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    fn chess_club() -> ActivityMap {
        serde_json::from_str(
            r#"{
                "Chess Club": {
                    "description": "Learn strategies and compete in tournaments",
                    "schedule": "Fridays, 3:30 PM - 5:00 PM",
                    "max_participants": 10,
                    "participants": ["a@x.com", "b@x.com"]
                }
            }"#,
        )
        .unwrap()
    }

    fn teacher() -> User {
        User {
            username: String::from("mrs.frizzle"),
            role: Role::Teacher,
        }
    }

    fn student() -> User {
        User {
            username: String::from("arnold"),
            role: Role::Other,
        }
    }

    #[test]
    fn the_chess_club_example() {
        let view = BoardView::project(&chess_club(), None);

        assert_eq!(view.cards.len(), 1);
        let card = &view.cards[0];
        assert_eq!(card.spots_left, 8);
        assert_eq!(card.participants.len(), 2);
    }

    #[test]
    fn removal_controls_only_show_for_teachers() {
        let activities = chess_club();

        let logged_out = BoardView::project(&activities, None);
        let as_student = BoardView::project(&activities, Some(&student()));
        let as_teacher = BoardView::project(&activities, Some(&teacher()));

        assert!(logged_out.cards[0].participants.iter().all(|r| !r.removable));
        assert!(as_student.cards[0].participants.iter().all(|r| !r.removable));
        assert!(as_teacher.cards[0].participants.iter().all(|r| r.removable));
    }

    #[test]
    fn rendering_the_same_snapshot_twice_is_identical() {
        let activities = chess_club();
        let user = teacher();

        let first = render(&BoardView::project(&activities, Some(&user)));
        let second = render(&BoardView::project(&activities, Some(&user)));

        assert_eq!(first, second);
    }

    #[test]
    fn rendered_rows_carry_the_removal_marker_for_teachers() {
        let rendered =
            render(&BoardView::project(&chess_club(), Some(&teacher())));

        assert!(rendered.contains("  - a@x.com [x]"));
        assert!(rendered.contains("  - b@x.com [x]"));
        assert!(rendered.contains("Availability: 8 spots left"));
    }

    #[test]
    fn an_empty_activity_says_so() {
        let activities: ActivityMap = serde_json::from_str(
            r#"{
                "Art Club": {
                    "description": "Explore painting and drawing",
                    "schedule": "Thursdays, 3:30 PM - 5:00 PM",
                    "max_participants": 15,
                    "participants": []
                }
            }"#,
        )
        .unwrap();

        let rendered = render(&BoardView::project(&activities, None));

        assert!(rendered.contains("No participants yet"));
    }

    #[test]
    fn over_capacity_renders_a_negative_count() {
        let activities: ActivityMap = serde_json::from_str(
            r#"{
                "Tiny Club": {
                    "description": "",
                    "schedule": "",
                    "max_participants": 1,
                    "participants": ["a@x.com", "b@x.com", "c@x.com"]
                }
            }"#,
        )
        .unwrap();

        let rendered = render(&BoardView::project(&activities, None));

        assert!(rendered.contains("Availability: -2 spots left"));
    }
}
