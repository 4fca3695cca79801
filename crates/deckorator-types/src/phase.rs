//! Construction phases and per-phase work assignments.
//!
//! The phase set is closed. Each phase has a human label (shown in prompts)
//! and a slug (used as the element tag in artifacts). Both directions go
//! through [`PHASE_TABLE`], so `from_slug(slug(p)) == p` holds by construction.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A construction phase of a deck project, in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PlanningAndPermits,
    SitePreparation,
    FootingsAndFoundation,
    Framing,
    Decking,
    RailingsAndStairs,
    FinishingAndSealing,
}

/// Bidirectional lookup: phase, human label, element slug.
pub static PHASE_TABLE: [(Phase, &str, &str); 7] = [
    (Phase::PlanningAndPermits, "Planning & Permits", "planning_and_permits"),
    (Phase::SitePreparation, "Site Preparation", "site_preparation"),
    (Phase::FootingsAndFoundation, "Footings & Foundation", "footings_and_foundation"),
    (Phase::Framing, "Framing", "framing"),
    (Phase::Decking, "Decking", "decking"),
    (Phase::RailingsAndStairs, "Railings & Stairs", "railings_and_stairs"),
    (Phase::FinishingAndSealing, "Finishing & Sealing", "finishing_and_sealing"),
];

impl Phase {
    /// All phases in build order.
    pub const ALL: [Phase; 7] = [
        Phase::PlanningAndPermits,
        Phase::SitePreparation,
        Phase::FootingsAndFoundation,
        Phase::Framing,
        Phase::Decking,
        Phase::RailingsAndStairs,
        Phase::FinishingAndSealing,
    ];

    fn row(self) -> &'static (Phase, &'static str, &'static str) {
        // PHASE_TABLE covers every variant, in declaration order.
        &PHASE_TABLE[self as usize]
    }

    /// Human-readable label, e.g. "Planning & Permits".
    pub fn label(self) -> &'static str {
        self.row().1
    }

    /// Element tag form, e.g. "planning_and_permits".
    pub fn slug(self) -> &'static str {
        self.row().2
    }

    pub fn from_label(label: &str) -> Option<Phase> {
        PHASE_TABLE
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(phase, _, _)| *phase)
    }

    pub fn from_slug(slug: &str) -> Option<Phase> {
        PHASE_TABLE
            .iter()
            .find(|(_, _, s)| *s == slug)
            .map(|(phase, _, _)| *phase)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a phase label to its tag form. `None` for labels outside the phase set.
pub fn slugify(label: &str) -> Option<&'static str> {
    Phase::from_label(label).map(Phase::slug)
}

/// Map a tag back to its phase label. `None` for unknown tags.
pub fn deslugify(slug: &str) -> Option<&'static str> {
    Phase::from_slug(slug).map(Phase::label)
}

/// Who carries out a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assignment {
    #[serde(rename = "DIY")]
    Diy,
    Professional,
    Undecided,
}

impl Assignment {
    pub const ALL: [Assignment; 3] = [
        Assignment::Diy,
        Assignment::Professional,
        Assignment::Undecided,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Assignment::Diy => "DIY",
            Assignment::Professional => "Professional",
            Assignment::Undecided => "Undecided",
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diy" => Ok(Assignment::Diy),
            "professional" => Ok(Assignment::Professional),
            "undecided" => Ok(Assignment::Undecided),
            other => Err(format!("invalid assignment: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deslugify_inverts_slugify_for_every_label() {
        for &(_, label, _) in PHASE_TABLE.iter() {
            let slug = slugify(label).unwrap();
            assert_eq!(deslugify(slug), Some(label));
        }
    }

    #[test]
    fn test_slug_shape() {
        for &(_, label, slug) in PHASE_TABLE.iter() {
            let derived = label.to_lowercase().replace('&', "and").replace(' ', "_");
            assert_eq!(derived, slug);
        }
    }

    #[test]
    fn test_table_order_matches_variants() {
        for phase in Phase::ALL {
            assert_eq!(PHASE_TABLE[phase as usize].0, phase);
        }
    }

    #[test]
    fn test_unknown_labels_and_slugs() {
        assert_eq!(slugify("Demolition"), None);
        assert_eq!(deslugify("demolition"), None);
        assert_eq!(deslugify("Framing"), None);
    }

    #[test]
    fn test_assignment_from_str() {
        assert_eq!("DIY".parse::<Assignment>().unwrap(), Assignment::Diy);
        assert_eq!(
            " professional ".parse::<Assignment>().unwrap(),
            Assignment::Professional
        );
        assert!("maybe".parse::<Assignment>().is_err());
    }
}
