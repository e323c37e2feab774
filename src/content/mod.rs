//! Portfolio content module
//!
//! Builds the content record rendered on the home page. The record is rebuilt
//! on every request and never mutated after construction.

use serde::Serialize;

/// A service offering shown in the services section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    /// Icon font class, e.g. `fas fa-camera`
    pub icon: String,
    pub title: String,
    pub description: String,
    /// Skill labels in display order
    pub skills: Vec<String>,
}

/// A gallery entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioItem {
    /// Display/reference key, unique within one record
    pub id: u32,
    /// Image path relative to the static mount
    pub src: String,
    pub title: String,
    /// Free-form tag used for client-side filtering
    pub category: String,
    pub client: String,
    pub year: String,
    pub description: String,
}

/// An achievement counter; `number` is text so it can carry `+` or `%`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub number: String,
    pub label: String,
}

/// Full content record handed to the home page template
///
/// Profile fields sit at the top level next to the ordered collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioData {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub services: Vec<Service>,
    pub portfolio_items: Vec<PortfolioItem>,
    pub achievements: Vec<Achievement>,
}

impl PortfolioData {
    /// Categories in first-seen order, used to build the gallery filter bar
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.portfolio_items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }
}

/// Build the portfolio content record.
///
/// Always succeeds and has no side effects.
pub fn portfolio_data() -> PortfolioData {
    PortfolioData {
        name: "Vaishavi P Rao".to_string(),
        title: "Aspiring Model • Creative Writer • Fitness Enthusiast".to_string(),
        bio: "Passionate student exploring the creative world of modeling, writing, and fitness. \
              Always eager to learn, grow, and take on new challenges in these exciting fields."
            .to_string(),
        services: services(),
        portfolio_items: portfolio_items(),
        achievements: achievements(),
    }
}

fn services() -> Vec<Service> {
    vec![
        service(
            "fas fa-camera",
            "Student Modeling",
            "Building my portfolio through photoshoots, learning poses, and developing confidence in front of the camera.",
            &[
                "Portrait Photography",
                "Fashion Basics",
                "Posing Practice",
                "Social Media Content",
            ],
        ),
        service(
            "fas fa-pen-nib",
            "Creative Writing",
            "Passionate about storytelling, blogging, and creating engaging content for social media and personal projects.",
            &["Poem Writing", "Creative Stories"],
        ),
        service(
            "fas fa-heart",
            "Fitness Journey",
            "Sharing my fitness journey, healthy lifestyle tips, and motivating others to stay active and healthy.",
            &["Workout Planning", "Healthy Recipes", "Fitness Tips"],
        ),
    ]
}

fn portfolio_items() -> Vec<PortfolioItem> {
    vec![
        item(
            1,
            "First Portrait Session",
            "modeling",
            "Personal Project",
            "My very first portrait photoshoot - learning about lighting and poses!",
        ),
        item(
            2,
            "Fitness Progress Photos",
            "fitness",
            "Instagram Post",
            "Documenting my fitness journey and sharing progress with followers.",
        ),
        item(
            3,
            "Personal Blog",
            "writing",
            "Personal Blog",
            "whispers of My Pen",
        ),
        item(
            4,
            "Fashion Practice Shoot",
            "modeling",
            "Photography Class",
            "Practicing different fashion poses and expressions.",
        ),
        item(
            5,
            "Collaboration Shoots",
            "modeling",
            "30-Day Challenge",
            "In Love with every click.",
        ),
        item(
            6,
            "My Words",
            "writing",
            "College Workshop",
            "Lost in Pages Found in words.",
        ),
    ]
}

fn achievements() -> Vec<Achievement> {
    [
        ("3+", "Practice Sessions"),
        ("10+", "Photo Shoots"),
        ("1", "Year Learning"),
        ("100%", "Passion & Dedication"),
    ]
    .into_iter()
    .map(|(number, label)| Achievement {
        number: number.to_string(),
        label: label.to_string(),
    })
    .collect()
}

fn service(icon: &str, title: &str, description: &str, skills: &[&str]) -> Service {
    Service {
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        skills: skills.iter().map(ToString::to_string).collect(),
    }
}

// Gallery images follow the `images/gallery<id>.jpg` naming and all date from 2024
fn item(id: u32, title: &str, category: &str, client: &str, description: &str) -> PortfolioItem {
    PortfolioItem {
        id,
        src: format!("images/gallery{id}.jpg"),
        title: title.to_string(),
        category: category.to_string(),
        client: client.to_string(),
        year: "2024".to_string(),
        description: description.to_string(),
    }
}
