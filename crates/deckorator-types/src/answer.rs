//! The answer set: every response collected during a planning session.
//!
//! Keys come from the closed [`FieldKey`] schema. A key that is absent from
//! the set is *unanswered*; the set never stores an empty string, so "has a
//! prior value" is decided by the [`Answer`] tag rather than by inspecting
//! string contents.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::Complexity;
use crate::phase::{Assignment, Phase};

/// A question key in the closed answer schema.
///
/// Declaration order is the presentation order of the planning session,
/// grouped by topic (basics, site, materials, work approach, assignments,
/// photos). `AnswerSet` iterates in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Complexity,
    ProjectDescription,
    DeckSize,
    Budget,
    TimelineStart,
    TimelinePace,
    ZipCode,
    AttachmentType,
    GroundConditions,
    HeightFromGround,
    LengthFeet,
    WidthFeet,
    SlopeDirection,
    SlopeAmountInches,
    DeckingMaterial,
    RailingStyle,
    StairsNeeded,
    SpecialFeatures,
    Builder,
    ExperienceLevel,
    HelpersAvailable,
    HelperDetails,
    Schedule,
    WorkAssignments,
    PhotoAlbumUrl,
    PhotoAlbumDescription,
}

/// The shape of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// One of a fixed list of options, stored as the option text.
    Choice,
    /// Yes/no answer stored as a boolean.
    Flag,
    /// Numeric measurement.
    Measure,
    /// Phase -> assignment mapping.
    Assignments,
}

impl FieldKey {
    pub const ALL: [FieldKey; 26] = [
        FieldKey::Complexity,
        FieldKey::ProjectDescription,
        FieldKey::DeckSize,
        FieldKey::Budget,
        FieldKey::TimelineStart,
        FieldKey::TimelinePace,
        FieldKey::ZipCode,
        FieldKey::AttachmentType,
        FieldKey::GroundConditions,
        FieldKey::HeightFromGround,
        FieldKey::LengthFeet,
        FieldKey::WidthFeet,
        FieldKey::SlopeDirection,
        FieldKey::SlopeAmountInches,
        FieldKey::DeckingMaterial,
        FieldKey::RailingStyle,
        FieldKey::StairsNeeded,
        FieldKey::SpecialFeatures,
        FieldKey::Builder,
        FieldKey::ExperienceLevel,
        FieldKey::HelpersAvailable,
        FieldKey::HelperDetails,
        FieldKey::Schedule,
        FieldKey::WorkAssignments,
        FieldKey::PhotoAlbumUrl,
        FieldKey::PhotoAlbumDescription,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Complexity => "complexity",
            FieldKey::ProjectDescription => "project_description",
            FieldKey::DeckSize => "deck_size",
            FieldKey::Budget => "budget",
            FieldKey::TimelineStart => "timeline_start",
            FieldKey::TimelinePace => "timeline_pace",
            FieldKey::ZipCode => "zip_code",
            FieldKey::AttachmentType => "attachment_type",
            FieldKey::GroundConditions => "ground_conditions",
            FieldKey::HeightFromGround => "height_from_ground",
            FieldKey::LengthFeet => "length_feet",
            FieldKey::WidthFeet => "width_feet",
            FieldKey::SlopeDirection => "slope_direction",
            FieldKey::SlopeAmountInches => "slope_amount_inches",
            FieldKey::DeckingMaterial => "decking_material",
            FieldKey::RailingStyle => "railing_style",
            FieldKey::StairsNeeded => "stairs_needed",
            FieldKey::SpecialFeatures => "special_features",
            FieldKey::Builder => "builder",
            FieldKey::ExperienceLevel => "experience_level",
            FieldKey::HelpersAvailable => "helpers_available",
            FieldKey::HelperDetails => "helper_details",
            FieldKey::Schedule => "schedule",
            FieldKey::WorkAssignments => "work_assignments",
            FieldKey::PhotoAlbumUrl => "photo_album_url",
            FieldKey::PhotoAlbumDescription => "photo_album_description",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldKey::ProjectDescription
            | FieldKey::ZipCode
            | FieldKey::SpecialFeatures
            | FieldKey::HelperDetails
            | FieldKey::PhotoAlbumUrl
            | FieldKey::PhotoAlbumDescription => FieldKind::Text,
            FieldKey::LengthFeet | FieldKey::WidthFeet | FieldKey::SlopeAmountInches => {
                FieldKind::Measure
            }
            FieldKey::StairsNeeded => FieldKind::Flag,
            FieldKey::WorkAssignments => FieldKind::Assignments,
            _ => FieldKind::Choice,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored answer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Text(String),
    Choice(String),
    Flag(bool),
    Measure(f64),
    Assignments(BTreeMap<Phase, Assignment>),
}

impl AnswerValue {
    /// Text content of `Text` and `Choice` values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value carries nothing worth storing.
    fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s.trim().is_empty(),
            AnswerValue::Assignments(map) => map.is_empty(),
            AnswerValue::Flag(_) | AnswerValue::Measure(_) => false,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => f.write_str(s),
            AnswerValue::Flag(b) => write!(f, "{b}"),
            AnswerValue::Measure(n) => write!(f, "{n}"),
            AnswerValue::Assignments(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(phase, assignment)| format!("{phase}: {assignment}"))
                    .collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

/// Tagged presence of an answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer<T> {
    Unanswered,
    Answered(T),
}

impl<T> Answer<T> {
    pub fn is_answered(&self) -> bool {
        matches!(self, Answer::Answered(_))
    }

    pub fn answered(self) -> Option<T> {
        match self {
            Answer::Answered(value) => Some(value),
            Answer::Unanswered => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Answer<U> {
        match self {
            Answer::Answered(value) => Answer::Answered(f(value)),
            Answer::Unanswered => Answer::Unanswered,
        }
    }
}

impl<T> From<Option<T>> for Answer<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Answer::Answered(v),
            None => Answer::Unanswered,
        }
    }
}

/// Ordered mapping from field key to answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<FieldKey, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Answer<&AnswerValue> {
        self.values.get(&key).into()
    }

    /// Store `value` under `key`, returning the previous value.
    ///
    /// Blank text and empty assignment maps clear the key instead: the set
    /// only ever holds answered fields.
    pub fn set(&mut self, key: FieldKey, value: AnswerValue) -> Option<AnswerValue> {
        if value.is_blank() {
            return self.values.remove(&key);
        }
        self.values.insert(key, value)
    }

    pub fn clear(&mut self, key: FieldKey) -> Option<AnswerValue> {
        self.values.remove(&key)
    }

    /// Text of a `Text` or `Choice` field.
    pub fn text(&self, key: FieldKey) -> Answer<&str> {
        self.values.get(&key).and_then(AnswerValue::as_text).into()
    }

    pub fn flag(&self, key: FieldKey) -> Answer<bool> {
        match self.values.get(&key) {
            Some(AnswerValue::Flag(b)) => Answer::Answered(*b),
            _ => Answer::Unanswered,
        }
    }

    pub fn measure(&self, key: FieldKey) -> Answer<f64> {
        match self.values.get(&key) {
            Some(AnswerValue::Measure(n)) => Answer::Answered(*n),
            _ => Answer::Unanswered,
        }
    }

    pub fn assignments(&self) -> Option<&BTreeMap<Phase, Assignment>> {
        match self.values.get(&FieldKey::WorkAssignments) {
            Some(AnswerValue::Assignments(map)) => Some(map),
            _ => None,
        }
    }

    pub fn assignment(&self, phase: Phase) -> Answer<Assignment> {
        self.assignments()
            .and_then(|map| map.get(&phase).copied())
            .into()
    }

    /// Record the assignment for one phase, keeping the other phases.
    pub fn set_assignment(&mut self, phase: Phase, assignment: Assignment) {
        let entry = self
            .values
            .entry(FieldKey::WorkAssignments)
            .or_insert_with(|| AnswerValue::Assignments(BTreeMap::new()));
        match entry {
            AnswerValue::Assignments(map) => {
                map.insert(phase, assignment);
            }
            other => {
                *other = AnswerValue::Assignments(BTreeMap::from([(phase, assignment)]));
            }
        }
    }

    /// The complexity choice, if answered with one of the canonical labels.
    pub fn complexity(&self) -> Answer<Complexity> {
        self.text(FieldKey::Complexity)
            .answered()
            .and_then(Complexity::normalize)
            .into()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &AnswerValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_unanswered() {
        let answers = AnswerSet::new();
        assert_eq!(answers.get(FieldKey::Budget), Answer::Unanswered);
        assert_eq!(answers.text(FieldKey::Budget), Answer::Unanswered);
    }

    #[test]
    fn test_blank_text_clears_instead_of_storing() {
        let mut answers = AnswerSet::new();
        answers.set(FieldKey::ZipCode, AnswerValue::Text("22032".to_string()));
        assert_eq!(answers.text(FieldKey::ZipCode), Answer::Answered("22032"));

        let previous = answers.set(FieldKey::ZipCode, AnswerValue::Text("   ".to_string()));
        assert_eq!(previous, Some(AnswerValue::Text("22032".to_string())));
        assert!(!answers.get(FieldKey::ZipCode).is_answered());
        assert!(answers.is_empty());
    }

    #[test]
    fn test_set_overwrites_and_returns_previous() {
        let mut answers = AnswerSet::new();
        assert!(answers
            .set(FieldKey::LengthFeet, AnswerValue::Measure(12.0))
            .is_none());
        let previous = answers.set(FieldKey::LengthFeet, AnswerValue::Measure(16.5));
        assert_eq!(previous, Some(AnswerValue::Measure(12.0)));
        assert_eq!(answers.measure(FieldKey::LengthFeet), Answer::Answered(16.5));
    }

    #[test]
    fn test_set_assignment_accumulates_phases() {
        let mut answers = AnswerSet::new();
        answers.set_assignment(Phase::Framing, Assignment::Diy);
        answers.set_assignment(Phase::FootingsAndFoundation, Assignment::Professional);

        assert_eq!(answers.assignment(Phase::Framing), Answer::Answered(Assignment::Diy));
        assert_eq!(
            answers.assignment(Phase::FootingsAndFoundation),
            Answer::Answered(Assignment::Professional)
        );
        assert_eq!(answers.assignment(Phase::Decking), Answer::Unanswered);
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn test_iteration_follows_presentation_order() {
        let mut answers = AnswerSet::new();
        answers.set(FieldKey::PhotoAlbumUrl, AnswerValue::Text("https://x".to_string()));
        answers.set(FieldKey::Complexity, AnswerValue::Choice("Basic".to_string()));
        answers.set(FieldKey::StairsNeeded, AnswerValue::Flag(true));

        let keys: Vec<FieldKey> = answers.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![FieldKey::Complexity, FieldKey::StairsNeeded, FieldKey::PhotoAlbumUrl]
        );
    }

    #[test]
    fn test_complexity_normalizes() {
        let mut answers = AnswerSet::new();
        answers.set(FieldKey::Complexity, AnswerValue::Choice("Advanced".to_string()));
        assert_eq!(answers.complexity(), Answer::Answered(Complexity::Advanced));
    }

    #[test]
    fn test_all_keys_are_listed_in_order() {
        let mut sorted = FieldKey::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, FieldKey::ALL.to_vec());
        assert_eq!(FieldKey::StairsNeeded.kind(), FieldKind::Flag);
        assert_eq!(FieldKey::WidthFeet.kind(), FieldKind::Measure);
        assert_eq!(FieldKey::DeckSize.kind(), FieldKind::Choice);
    }

    #[test]
    fn test_answer_set_json_shape() {
        let mut answers = AnswerSet::new();
        answers.set(FieldKey::Budget, AnswerValue::Choice("Under $5,000".to_string()));
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["budget"]["kind"], "choice");
        assert_eq!(json["budget"]["value"], "Under $5,000");
    }
}
