use serde::Serialize;

/// Only services in this category are offered through the guest wizard.
pub const HAIRCUT_CATEGORY: &str = "Haircut";

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Barber {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Barber {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaircutStyle {
    pub id: &'static str,
    pub name: &'static str,
}

/// House styles the guest picks from before choosing a service. These are
/// curated by the shop rather than stored alongside the priced services.
pub fn haircut_styles() -> &'static [HaircutStyle] {
    &[
        HaircutStyle { id: "buzz", name: "Buzz Cut" },
        HaircutStyle { id: "crew", name: "Crew Cut" },
        HaircutStyle { id: "taper", name: "Classic Taper" },
        HaircutStyle { id: "pompadour", name: "Pompadour" },
        HaircutStyle { id: "undercut", name: "Undercut" },
        HaircutStyle { id: "two-block", name: "Two Block" },
    ]
}

pub fn find_haircut_style(id: &str) -> Option<HaircutStyle> {
    haircut_styles().iter().find(|style| style.id == id).copied()
}
