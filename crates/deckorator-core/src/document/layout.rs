//! Where each answer lives in a rendered document.
//!
//! The synthesizer and the parser both read this table, so a field is written
//! and read back from the same path. Legacy aliases cover documents produced
//! by the 3.0 construction template, which kept site data under
//! `site_specifications`.

use deckorator_types::answer::FieldKey;

/// Version stamped into `project_overview/template_version`.
pub const TEMPLATE_VERSION: &str = "3.1";

/// Separator between the two halves of the compound timeline value.
pub const TIMELINE_DELIMITER: &str = " - ";

pub const OVERVIEW: &str = "project_overview";
pub const REQUIREMENTS: &str = "user_requirements";
pub const PROJECT_BASICS: &str = "project_basics";
pub const SITE_INFORMATION: &str = "site_information";
pub const MATERIALS_DESIGN: &str = "materials_design";
pub const WORK_APPROACH: &str = "work_approach";
pub const WORK_ASSIGNMENTS: &str = "work_assignments";
pub const PHOTO_RESOURCES: &str = "photo_resources";
pub const LOCAL_RESOURCES: &str = "local_resources";
pub const DELIVERABLES: &str = "deliverables_requested";
pub const CONTEXT_INSTRUCTIONS: &str = "context_instructions";
pub const SUBMISSION_INSTRUCTIONS: &str = "submission_instructions";

pub const COMPLEXITY_PATH: &[&str] = &[OVERVIEW, "complexity_level"];
pub const KIND_PATH: &[&str] = &[OVERVIEW, "kind"];
pub const TEMPLATE_VERSION_PATH: &[&str] = &[OVERVIEW, "template_version"];
pub const TIMELINE_PATH: &[&str] = &[REQUIREMENTS, PROJECT_BASICS, "timeline"];
pub const ASSIGNMENTS_PATH: &[&str] = &[REQUIREMENTS, WORK_ASSIGNMENTS];

/// How a field is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A single text element.
    Leaf(&'static [&'static str]),
    /// One half of the compound `timeline` element.
    TimelineStart,
    TimelinePace,
    /// One child element per phase under `work_assignments`.
    Assignments,
}

pub fn placement(key: FieldKey) -> Placement {
    use FieldKey::*;

    let path: &'static [&'static str] = match key {
        Complexity => COMPLEXITY_PATH,
        ProjectDescription => &[REQUIREMENTS, PROJECT_BASICS, "project_description"],
        DeckSize => &[REQUIREMENTS, PROJECT_BASICS, "deck_size"],
        Budget => &[REQUIREMENTS, PROJECT_BASICS, "budget"],
        TimelineStart => return Placement::TimelineStart,
        TimelinePace => return Placement::TimelinePace,
        ZipCode => &[REQUIREMENTS, SITE_INFORMATION, "location", "zip_code"],
        AttachmentType => &[REQUIREMENTS, SITE_INFORMATION, "attachment_type"],
        GroundConditions => &[REQUIREMENTS, SITE_INFORMATION, "ground_conditions"],
        HeightFromGround => &[REQUIREMENTS, SITE_INFORMATION, "height_from_ground"],
        LengthFeet => &[REQUIREMENTS, SITE_INFORMATION, "dimensions", "length_feet"],
        WidthFeet => &[REQUIREMENTS, SITE_INFORMATION, "dimensions", "width_feet"],
        SlopeDirection => &[REQUIREMENTS, SITE_INFORMATION, "slope_direction"],
        SlopeAmountInches => &[REQUIREMENTS, SITE_INFORMATION, "slope_amount_inches"],
        DeckingMaterial => &[REQUIREMENTS, MATERIALS_DESIGN, "decking_material"],
        RailingStyle => &[REQUIREMENTS, MATERIALS_DESIGN, "railing_style"],
        StairsNeeded => &[REQUIREMENTS, MATERIALS_DESIGN, "stairs_needed"],
        SpecialFeatures => &[REQUIREMENTS, MATERIALS_DESIGN, "special_features"],
        Builder => &[REQUIREMENTS, WORK_APPROACH, "builder"],
        ExperienceLevel => &[REQUIREMENTS, WORK_APPROACH, "experience_level"],
        HelpersAvailable => &[REQUIREMENTS, WORK_APPROACH, "helpers_available"],
        HelperDetails => &[REQUIREMENTS, WORK_APPROACH, "helper_details"],
        Schedule => &[REQUIREMENTS, WORK_APPROACH, "schedule"],
        WorkAssignments => return Placement::Assignments,
        PhotoAlbumUrl => &[PHOTO_RESOURCES, "album_url"],
        PhotoAlbumDescription => &[PHOTO_RESOURCES, "album_description"],
    };
    Placement::Leaf(path)
}

/// Older locations consulted when the current path is absent.
///
/// Height has none: older documents record it as a number of inches
/// (`dimensions/height_above_ground_inches`), which does not map onto one of
/// the height choices.
pub fn legacy_aliases(key: FieldKey) -> &'static [&'static [&'static str]] {
    match key {
        FieldKey::LengthFeet => &[&["site_specifications", "dimensions", "length_feet"]],
        FieldKey::WidthFeet => &[&["site_specifications", "dimensions", "width_feet"]],
        FieldKey::SlopeDirection => &[&["site_specifications", "site_conditions", "slope_direction"]],
        FieldKey::SlopeAmountInches => {
            &[&["site_specifications", "site_conditions", "slope_amount_inches"]]
        }
        FieldKey::AttachmentType => &[&["site_specifications", "attachment_details", "method"]],
        FieldKey::DeckingMaterial => &[&["structural_requirements", "decking_material"]],
        _ => &[],
    }
}

/// Render a path the way it appears in warnings.
pub fn display_path(path: &[&str]) -> String {
    path.join("/")
}

/// Leaf tag of a field stored as a single element.
pub fn leaf_tag(key: FieldKey) -> Option<&'static str> {
    match placement(key) {
        Placement::Leaf(path) => path.last().copied(),
        _ => None,
    }
}
