//! The fixed question list of a planning session.
//!
//! Questions are asked in the order returned by [`questions`], grouped by
//! [`Topic`]. Option lists are the literal texts stored in the answer set and
//! written to documents.

use std::fmt;

use deckorator_types::answer::{AnswerSet, FieldKey};
use deckorator_types::phase::Phase;

pub const COMPLEXITY_OPTIONS: &[&str] = &["Basic", "Advanced"];

pub const DECK_SIZE_OPTIONS: &[&str] = &[
    "Small (under 200 sq ft)",
    "Medium (200-400 sq ft)",
    "Large (400-600 sq ft)",
    "Extra large (over 600 sq ft)",
];

pub const BUDGET_OPTIONS: &[&str] = &[
    "Under $5,000",
    "$5,000-$10,000",
    "$10,000-$20,000",
    "Over $20,000",
    "Not sure yet",
];

pub const TIMELINE_START_OPTIONS: &[&str] = &[
    "As soon as possible",
    "This spring",
    "This summer",
    "This fall",
    "Next year",
];

pub const TIMELINE_PACE_OPTIONS: &[&str] = &[
    "Finish in a few weekends",
    "Steady progress over a season",
    "No rush",
];

pub const ATTACHMENT_OPTIONS: &[&str] = &["Attached to house (ledger board)", "Freestanding"];

pub const GROUND_OPTIONS: &[&str] = &[
    "Flat and level",
    "Gentle slope",
    "Steep slope",
    "Rocky or uneven",
    "Not sure",
];

/// The one height answer that does not need a permit.
pub const GROUND_LEVEL: &str = "Ground level (under 30 inches)";

pub const HEIGHT_OPTIONS: &[&str] = &[
    GROUND_LEVEL,
    "Raised (30 inches to 6 feet)",
    "High deck (over 6 feet)",
    "Not sure",
];

pub const LEVEL: &str = "Level";

pub const SLOPE_DIRECTION_OPTIONS: &[&str] = &[LEVEL, "North", "South", "East", "West"];

pub const DECKING_OPTIONS: &[&str] = &[
    "Pressure-treated wood",
    "Cedar",
    "Composite",
    "PVC",
    "Not sure",
];

pub const RAILING_OPTIONS: &[&str] = &[
    "Wood",
    "Metal balusters",
    "Cable",
    "Glass panels",
    "No railing",
];

pub const BUILDER_OPTIONS: &[&str] = &[
    "I'll build it myself (DIY)",
    "Hire a contractor",
    "Mix of DIY and professional",
];

pub const EXPERIENCE_OPTIONS: &[&str] = &["Beginner", "Some experience", "Experienced"];

pub const HELPERS_OPTIONS: &[&str] = &[
    "Yes, I have help available",
    "Sometimes, help on weekends",
    "No, working alone",
];

pub const SCHEDULE_OPTIONS: &[&str] = &[
    "Weekends only",
    "Evenings and weekends",
    "Full-time until done",
];

pub const ASSIGNMENT_OPTIONS: &[&str] = &["DIY", "Professional", "Undecided"];

/// Description recorded when no album URL is given.
pub const NO_ALBUM_DESCRIPTION: &str = "Individual photos will be uploaded";

/// Question groups, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    ProjectBasics,
    SiteInformation,
    MaterialsDesign,
    WorkApproach,
    WorkAssignments,
    PhotoResources,
}

impl Topic {
    pub fn title(self) -> &'static str {
        match self {
            Topic::ProjectBasics => "Project Basics",
            Topic::SiteInformation => "Site Information",
            Topic::MaterialsDesign => "Materials & Design",
            Topic::WorkApproach => "Work Approach",
            Topic::WorkAssignments => "Work Assignments",
            Topic::PhotoResources => "Photos",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Where an answer is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Field(FieldKey),
    Phase(Phase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Text { optional: bool },
    Choice(&'static [&'static str]),
    YesNo,
    Number { unit: &'static str },
}

pub struct Question {
    pub target: Target,
    pub topic: Topic,
    pub prompt: String,
    pub kind: QuestionKind,
    /// Asked only when this holds for the answers collected so far.
    pub condition: Option<fn(&AnswerSet) -> bool>,
    /// Applied to fresh text before it is stored.
    pub normalize: Option<fn(&str) -> String>,
}

impl Question {
    fn new(key: FieldKey, topic: Topic, prompt: &str, kind: QuestionKind) -> Self {
        Self {
            target: Target::Field(key),
            topic,
            prompt: prompt.to_string(),
            kind,
            condition: None,
            normalize: None,
        }
    }

    fn when(mut self, condition: fn(&AnswerSet) -> bool) -> Self {
        self.condition = Some(condition);
        self
    }

    fn normalized(mut self, normalize: fn(&str) -> String) -> Self {
        self.normalize = Some(normalize);
        self
    }

    /// Whether the question applies to `answers`.
    pub fn applies(&self, answers: &AnswerSet) -> bool {
        self.condition.is_none_or(|condition| condition(answers))
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("target", &self.target)
            .field("topic", &self.topic)
            .field("prompt", &self.prompt)
            .field("kind", &self.kind)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

/// A slope amount only matters when the ground is not level.
pub fn has_slope(answers: &AnswerSet) -> bool {
    answers
        .text(FieldKey::SlopeDirection)
        .answered()
        .is_some_and(|direction| !direction.eq_ignore_ascii_case(LEVEL))
}

/// Helper details are asked whenever the helpers answer mentions help.
pub fn has_helpers(answers: &AnswerSet) -> bool {
    answers
        .text(FieldKey::HelpersAvailable)
        .answered()
        .is_some_and(|helpers| helpers.to_lowercase().contains("help"))
}

pub fn has_album_url(answers: &AnswerSet) -> bool {
    answers.get(FieldKey::PhotoAlbumUrl).is_answered()
}

/// Prefix `https://` onto URLs that carry no scheme.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Every question, in presentation order.
pub fn questions() -> Vec<Question> {
    use FieldKey as K;
    use QuestionKind::*;
    use Topic::*;

    let mut list = vec![
        Question::new(
            K::Complexity,
            ProjectBasics,
            "What level of planning do you need?",
            Choice(COMPLEXITY_OPTIONS),
        ),
        Question::new(
            K::ProjectDescription,
            ProjectBasics,
            "Describe your deck project in a sentence or two",
            Text { optional: false },
        ),
        Question::new(K::DeckSize, ProjectBasics, "How big a deck?", Choice(DECK_SIZE_OPTIONS)),
        Question::new(K::Budget, ProjectBasics, "What is your budget?", Choice(BUDGET_OPTIONS)),
        Question::new(
            K::TimelineStart,
            ProjectBasics,
            "When do you want to start?",
            Choice(TIMELINE_START_OPTIONS),
        ),
        Question::new(
            K::TimelinePace,
            ProjectBasics,
            "How quickly do you want to finish?",
            Choice(TIMELINE_PACE_OPTIONS),
        ),
        Question::new(K::ZipCode, SiteInformation, "Zip code", Text { optional: false }),
        Question::new(
            K::AttachmentType,
            SiteInformation,
            "How will the deck be supported?",
            Choice(ATTACHMENT_OPTIONS),
        ),
        Question::new(
            K::GroundConditions,
            SiteInformation,
            "What are the ground conditions?",
            Choice(GROUND_OPTIONS),
        ),
        Question::new(
            K::HeightFromGround,
            SiteInformation,
            "How high off the ground?",
            Choice(HEIGHT_OPTIONS),
        ),
        Question::new(K::LengthFeet, SiteInformation, "Deck length", Number { unit: "feet" }),
        Question::new(K::WidthFeet, SiteInformation, "Deck width", Number { unit: "feet" }),
        Question::new(
            K::SlopeDirection,
            SiteInformation,
            "Which way does the ground slope?",
            Choice(SLOPE_DIRECTION_OPTIONS),
        ),
        Question::new(
            K::SlopeAmountInches,
            SiteInformation,
            "Drop across the deck length",
            Number { unit: "inches" },
        )
        .when(has_slope),
        Question::new(
            K::DeckingMaterial,
            MaterialsDesign,
            "Decking material",
            Choice(DECKING_OPTIONS),
        ),
        Question::new(K::RailingStyle, MaterialsDesign, "Railing style", Choice(RAILING_OPTIONS)),
        Question::new(K::StairsNeeded, MaterialsDesign, "Do you need stairs?", YesNo),
        Question::new(
            K::SpecialFeatures,
            MaterialsDesign,
            "Any special features (built-in seating, lighting, pergola)?",
            Text { optional: true },
        ),
        Question::new(K::Builder, WorkApproach, "Who will build the deck?", Choice(BUILDER_OPTIONS)),
        Question::new(
            K::ExperienceLevel,
            WorkApproach,
            "Your building experience",
            Choice(EXPERIENCE_OPTIONS),
        ),
        Question::new(
            K::HelpersAvailable,
            WorkApproach,
            "Will you have help?",
            Choice(HELPERS_OPTIONS),
        ),
        Question::new(
            K::HelperDetails,
            WorkApproach,
            "Who is helping and what can they do?",
            Text { optional: true },
        )
        .when(has_helpers),
        Question::new(
            K::Schedule,
            WorkApproach,
            "When can you work on it?",
            Choice(SCHEDULE_OPTIONS),
        ),
    ];

    list.extend(Phase::ALL.into_iter().map(|phase| Question {
        target: Target::Phase(phase),
        topic: WorkAssignments,
        prompt: format!("Who will handle {}?", phase.label()),
        kind: Choice(ASSIGNMENT_OPTIONS),
        condition: None,
        normalize: None,
    }));

    list.push(
        Question::new(
            K::PhotoAlbumUrl,
            PhotoResources,
            "Photo album URL (leave blank to upload photos individually)",
            Text { optional: true },
        )
        .normalized(normalize_url),
    );
    list.push(
        Question::new(
            K::PhotoAlbumDescription,
            PhotoResources,
            "What do the photos show?",
            Text { optional: true },
        )
        .when(has_album_url),
    );
    list
}
