//! Render an answer set into a request document.
//!
//! Rendering is deterministic: the same answers, supplier entry, complexity
//! and date always produce the same text. Both variants share every section
//! up to `local_resources`; they differ only in the requested deliverables
//! and the context instructions.

use chrono::NaiveDate;
use deckorator_types::answer::{Answer, AnswerSet, FieldKey};
use deckorator_types::artifact::Complexity;
use deckorator_types::phase::{Assignment, Phase};
use deckorator_types::supplier::SupplierEntry;

use super::element::Element;
use super::layout::{self, TEMPLATE_VERSION, TIMELINE_DELIMITER};
use crate::schema::{self, GROUND_LEVEL, LEVEL};

/// Placeholder used inside prose when an answer is missing.
const NOT_SPECIFIED: &str = "not specified";

pub const BASIC_DELIVERABLES: &[&str] = &[
    "design_overview",
    "material_list",
    "cost_estimate",
    "step_by_step_instructions",
    "tool_list",
    "safety_guidelines",
    "permit_guidance",
];

/// Requested on top of [`BASIC_DELIVERABLES`] for advanced documents.
pub const ADVANCED_DELIVERABLES: &[&str] = &[
    "grading_analysis",
    "foundation_plan",
    "framing_specifications",
    "structural_calculations",
    "project_timeline",
    "bid_ready_material_list",
];

/// Everything besides the answers that shapes a document.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub complexity: Complexity,
    pub suppliers: &'a SupplierEntry,
    pub generated_on: NaiveDate,
}

pub fn synthesize(answers: &AnswerSet, ctx: &RenderContext<'_>) -> String {
    build_document(answers, ctx).to_xml()
}

pub fn build_document(answers: &AnswerSet, ctx: &RenderContext<'_>) -> Element {
    Element::branch(
        ctx.complexity.root_tag(),
        vec![
            project_overview(ctx),
            user_requirements(answers),
            photo_resources(answers),
            local_resources(answers, ctx.suppliers),
            deliverables_requested(ctx.complexity),
            context_instructions(answers, ctx.complexity),
            submission_instructions(ctx.complexity),
        ],
    )
}

/// A permit is assumed for anything but a ground-level deck, including
/// unanswered and "Not sure" heights.
pub fn permit_required(answers: &AnswerSet) -> bool {
    answers.text(FieldKey::HeightFromGround) != Answer::Answered(GROUND_LEVEL)
}

/// Deliverable tags requested for `complexity`, basic ones first.
pub fn deliverables(complexity: Complexity) -> Vec<&'static str> {
    let mut tags = BASIC_DELIVERABLES.to_vec();
    if complexity == Complexity::Advanced {
        tags.extend_from_slice(ADVANCED_DELIVERABLES);
    }
    tags
}

/// Footer count guidance from the deck footprint.
pub fn footer_layout(answers: &AnswerSet) -> String {
    let (Answer::Answered(length), Answer::Answered(width)) = (
        answers.measure(FieldKey::LengthFeet),
        answers.measure(FieldKey::WidthFeet),
    ) else {
        return "Requires site measurements".to_string();
    };
    if length <= 12.0 && width <= 12.0 {
        "4-footer minimum layout, corner and mid-span positions".to_string()
    } else if length <= 16.0 && width <= 16.0 {
        "6-footer layout with intermediate supports".to_string()
    } else {
        "8+ footer layout requiring engineering calculations".to_string()
    }
}

/// Drop across the deck length as a percentage, `None` when unknown.
pub fn slope_percentage(answers: &AnswerSet) -> Option<f64> {
    if answers
        .text(FieldKey::SlopeDirection)
        .answered()
        .is_some_and(|d| d.eq_ignore_ascii_case(LEVEL))
    {
        return Some(0.0);
    }
    let length = answers.measure(FieldKey::LengthFeet).answered()?;
    let drop = answers.measure(FieldKey::SlopeAmountInches).answered()?;
    if length <= 0.0 {
        return None;
    }
    Some(drop / (length * 12.0) * 100.0)
}

fn value(answers: &AnswerSet, key: FieldKey) -> String {
    match answers.get(key) {
        Answer::Answered(v) => v.to_string(),
        Answer::Unanswered => String::new(),
    }
}

/// Value for use inside prose.
fn phrase(answers: &AnswerSet, key: FieldKey) -> String {
    match answers.get(key) {
        Answer::Answered(v) => v.to_string(),
        Answer::Unanswered => NOT_SPECIFIED.to_string(),
    }
}

fn field(answers: &AnswerSet, key: FieldKey) -> Element {
    let tag = layout::leaf_tag(key).unwrap_or(key.as_str());
    Element::leaf(tag, value(answers, key))
}

fn flag(tag: &str, value: bool) -> Element {
    Element::leaf(tag, value.to_string())
}

fn timeline(answers: &AnswerSet) -> String {
    let start = value(answers, FieldKey::TimelineStart);
    let pace = value(answers, FieldKey::TimelinePace);
    if start.is_empty() && pace.is_empty() {
        return String::new();
    }
    format!("{start}{TIMELINE_DELIMITER}{pace}").trim().to_string()
}

fn total_square_feet(answers: &AnswerSet) -> String {
    match (
        answers.measure(FieldKey::LengthFeet),
        answers.measure(FieldKey::WidthFeet),
    ) {
        (Answer::Answered(length), Answer::Answered(width)) => (length * width).to_string(),
        _ => String::new(),
    }
}

fn project_overview(ctx: &RenderContext<'_>) -> Element {
    let description = match ctx.complexity {
        Complexity::Basic => {
            "Plan a homeowner deck project: design, materials, costs and build steps"
        }
        Complexity::Advanced => {
            "Produce construction specifications and working drawings for a deck project"
        }
    };
    Element::branch(
        layout::OVERVIEW,
        vec![
            Element::leaf("description", description),
            Element::leaf("kind", ctx.complexity.document_kind()),
            Element::leaf("generated_date", ctx.generated_on.format("%Y-%m-%d").to_string()),
            Element::leaf("complexity_level", ctx.complexity.label()),
            Element::leaf("template_version", TEMPLATE_VERSION),
        ],
    )
}

fn user_requirements(answers: &AnswerSet) -> Element {
    use FieldKey as K;

    let basics = Element::branch(
        layout::PROJECT_BASICS,
        vec![
            field(answers, K::ProjectDescription),
            field(answers, K::DeckSize),
            field(answers, K::Budget),
            Element::leaf("timeline", timeline(answers)),
        ],
    );
    let site = Element::branch(
        layout::SITE_INFORMATION,
        vec![
            Element::branch("location", vec![field(answers, K::ZipCode)]),
            field(answers, K::AttachmentType),
            field(answers, K::GroundConditions),
            field(answers, K::HeightFromGround),
            Element::branch(
                "dimensions",
                vec![
                    field(answers, K::LengthFeet),
                    field(answers, K::WidthFeet),
                    Element::leaf("total_square_feet", total_square_feet(answers)),
                ],
            ),
            field(answers, K::SlopeDirection),
            field(answers, K::SlopeAmountInches),
        ],
    );
    let materials = Element::branch(
        layout::MATERIALS_DESIGN,
        vec![
            field(answers, K::DeckingMaterial),
            field(answers, K::RailingStyle),
            field(answers, K::StairsNeeded),
            field(answers, K::SpecialFeatures),
        ],
    );
    let work = Element::branch(
        layout::WORK_APPROACH,
        vec![
            field(answers, K::Builder),
            field(answers, K::ExperienceLevel),
            field(answers, K::HelpersAvailable),
            field(answers, K::HelperDetails),
            field(answers, K::Schedule),
        ],
    );
    let assignments = Element::branch(
        layout::WORK_ASSIGNMENTS,
        Phase::ALL
            .into_iter()
            .map(|phase| {
                let text = answers
                    .assignment(phase)
                    .answered()
                    .map(Assignment::as_str)
                    .unwrap_or_default();
                Element::leaf(phase.slug(), text)
            })
            .collect(),
    );

    Element::branch(
        layout::REQUIREMENTS,
        vec![basics, site, materials, work, assignments],
    )
}

fn photo_resources(answers: &AnswerSet) -> Element {
    Element::branch(
        layout::PHOTO_RESOURCES,
        vec![
            field(answers, FieldKey::PhotoAlbumUrl),
            field(answers, FieldKey::PhotoAlbumDescription),
        ],
    )
}

fn local_resources(answers: &AnswerSet, suppliers: &SupplierEntry) -> Element {
    let jurisdiction = match answers.text(FieldKey::ZipCode) {
        Answer::Answered(zip) => format!("Building department for {zip}"),
        Answer::Unanswered => "Local building department".to_string(),
    };
    Element::branch(
        layout::LOCAL_RESOURCES,
        vec![
            Element::leaf("area", suppliers.area.as_str()),
            Element::branch(
                "suppliers",
                suppliers
                    .suppliers
                    .iter()
                    .map(|name| Element::leaf("supplier", name.as_str()))
                    .collect(),
            ),
            Element::leaf("jurisdiction", jurisdiction),
            flag("permit_required", permit_required(answers)),
        ],
    )
}

fn deliverables_requested(complexity: Complexity) -> Element {
    Element::branch(
        layout::DELIVERABLES,
        deliverables(complexity)
            .into_iter()
            .map(|tag| flag(tag, true))
            .collect(),
    )
}

fn phases_assigned(answers: &AnswerSet, wanted: Assignment) -> Vec<&'static str> {
    Phase::ALL
        .into_iter()
        .filter(|phase| answers.assignment(*phase) == Answer::Answered(wanted))
        .map(Phase::label)
        .collect()
}

fn work_split(answers: &AnswerSet) -> String {
    let parts: Vec<String> = Assignment::ALL
        .into_iter()
        .filter_map(|assignment| {
            let phases = phases_assigned(answers, assignment);
            (!phases.is_empty()).then(|| format!("{assignment}: {}", phases.join(", ")))
        })
        .collect();
    if parts.is_empty() {
        "No phase assignments recorded".to_string()
    } else {
        parts.join("; ")
    }
}

fn helper_guidance(answers: &AnswerSet) -> String {
    if schema::has_helpers(answers) {
        let details = answers
            .text(FieldKey::HelperDetails)
            .answered()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();
        format!(
            "Mark two-person tasks; helpers: {}{details}",
            phrase(answers, FieldKey::HelpersAvailable)
        )
    } else if answers.get(FieldKey::HelpersAvailable).is_answered() {
        "Plan every task for one person working alone".to_string()
    } else {
        "Helper availability not specified; flag tasks that need a second person".to_string()
    }
}

fn site_guidance(answers: &AnswerSet) -> String {
    let slope = match (
        answers.text(FieldKey::SlopeDirection),
        answers.measure(FieldKey::SlopeAmountInches),
    ) {
        (Answer::Answered(direction), _) if direction.eq_ignore_ascii_case(LEVEL) => {
            "a level site".to_string()
        }
        (Answer::Answered(direction), Answer::Answered(drop)) => {
            format!("ground falling {drop} inches toward the {}", direction.to_lowercase())
        }
        (Answer::Answered(direction), Answer::Unanswered) => {
            format!("ground sloping toward the {}", direction.to_lowercase())
        }
        (Answer::Unanswered, _) => "an unmeasured slope".to_string(),
    };
    format!(
        "Account for {} ground conditions and {slope}; the deck is {}",
        phrase(answers, FieldKey::GroundConditions).to_lowercase(),
        phrase(answers, FieldKey::AttachmentType).to_lowercase()
    )
}

fn context_instructions(answers: &AnswerSet, complexity: Complexity) -> Element {
    use FieldKey as K;

    let mut children = vec![
        Element::leaf(
            "audience",
            format!(
                "Write for a builder with this experience: {}",
                phrase(answers, K::ExperienceLevel)
            ),
        ),
        Element::leaf("work_split", work_split(answers)),
        Element::leaf("helper_guidance", helper_guidance(answers)),
        Element::leaf("site_guidance", site_guidance(answers)),
        Element::leaf(
            "budget_guidance",
            format!("Keep the material list within the budget: {}", phrase(answers, K::Budget)),
        ),
        Element::leaf(
            "schedule_guidance",
            format!(
                "Sequence the work for {} availability, starting {}",
                phrase(answers, K::Schedule).to_lowercase(),
                phrase(answers, K::TimelineStart).to_lowercase()
            ),
        ),
    ];

    if complexity == Complexity::Advanced {
        let professional = phases_assigned(answers, Assignment::Professional);
        let coordination = if professional.is_empty() {
            "No phases are assigned to professionals".to_string()
        } else {
            format!("Prepare bid-ready scopes for: {}", professional.join(", "))
        };
        let slope = slope_percentage(answers)
            .map(|pct| format!("{pct:.2}%"))
            .unwrap_or_default();
        children.extend([
            Element::leaf("professional_coordination", coordination),
            Element::leaf(
                "long_term_planning",
                format!(
                    "Recommend a maintenance schedule for {} decking and {} railings",
                    phrase(answers, K::DeckingMaterial).to_lowercase(),
                    phrase(answers, K::RailingStyle).to_lowercase()
                ),
            ),
            Element::branch(
                "structural_estimates",
                vec![
                    Element::leaf("footer_layout", footer_layout(answers)),
                    Element::leaf("slope_percentage", slope),
                ],
            ),
        ]);
    }

    Element::branch(layout::CONTEXT_INSTRUCTIONS, children)
}

fn submission_instructions(complexity: Complexity) -> Element {
    let expectations = match complexity {
        Complexity::Basic => "A practical plan a homeowner can follow, organized by the deliverables above",
        Complexity::Advanced => {
            "Construction-ready specifications with measurements and quantities, not a summary of the answers"
        }
    };
    Element::branch(
        layout::SUBMISSION_INSTRUCTIONS,
        vec![
            Element::leaf(
                "photos",
                "Photos show the current site, ground slope, house attachment point and drainage",
            ),
            Element::leaf("expectations", expectations),
        ],
    )
}
