//! Read a rendered document back into an answer set.
//!
//! Parsing never fails: problems become [`ParseWarning`]s and the affected
//! fields stay unanswered. Callers decide whether a document with warnings is
//! still usable as a merge basis (only [`ParseOutcome::is_malformed`] rules
//! it out).

use deckorator_types::answer::{AnswerSet, AnswerValue, FieldKey, FieldKind};
use deckorator_types::artifact::Complexity;
use deckorator_types::error::ParseWarning;
use deckorator_types::phase::{Assignment, Phase};
use tracing::debug;

use super::element::Element;
use super::layout::{self, Placement};

/// Answers recovered from a document, plus everything that went wrong.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub answers: AnswerSet,
    pub warnings: Vec<ParseWarning>,
    /// Reported for display only.
    pub template_version: Option<String>,
}

impl ParseOutcome {
    /// The document was not a well-formed tree.
    pub fn is_malformed(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ParseWarning::Malformed(_)))
    }
}

pub fn parse_document(text: &str) -> ParseOutcome {
    let root = match Element::parse(text) {
        Ok(root) => root,
        Err(err) => {
            return ParseOutcome {
                warnings: vec![ParseWarning::Malformed(err.to_string())],
                ..ParseOutcome::default()
            };
        }
    };

    let mut outcome = ParseOutcome {
        template_version: root
            .find(layout::TEMPLATE_VERSION_PATH)
            .and_then(Element::text)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        ..ParseOutcome::default()
    };

    for key in FieldKey::ALL {
        match layout::placement(key) {
            Placement::Leaf(_) if key == FieldKey::Complexity => read_complexity(&root, &mut outcome),
            Placement::Leaf(path) => read_leaf(&root, key, path, &mut outcome),
            Placement::TimelineStart => read_timeline(&root, &mut outcome),
            // Both halves come from the same element.
            Placement::TimelinePace => {}
            Placement::Assignments => read_assignments(&root, &mut outcome),
        }
    }

    debug!(
        fields = outcome.answers.len(),
        warnings = outcome.warnings.len(),
        "parsed document"
    );
    outcome
}

fn locate<'a>(root: &'a Element, key: FieldKey, path: &[&str]) -> Option<&'a Element> {
    root.find(path).or_else(|| {
        layout::legacy_aliases(key)
            .iter()
            .find_map(|alias| root.find(alias))
    })
}

fn read_leaf(root: &Element, key: FieldKey, path: &[&str], outcome: &mut ParseOutcome) {
    let Some(element) = locate(root, key, path) else {
        outcome
            .warnings
            .push(ParseWarning::missing(key, &layout::display_path(path)));
        return;
    };
    let Some(raw) = element.text() else {
        outcome
            .warnings
            .push(ParseWarning::invalid(key.as_str(), "<nested elements>"));
        return;
    };
    if raw.is_empty() {
        return;
    }
    match convert(key.kind(), raw) {
        Some(value) => {
            outcome.answers.set(key, value);
        }
        None => outcome.warnings.push(ParseWarning::invalid(key.as_str(), raw)),
    }
}

fn convert(kind: FieldKind, raw: &str) -> Option<AnswerValue> {
    match kind {
        FieldKind::Text => Some(AnswerValue::Text(raw.to_string())),
        FieldKind::Choice => Some(AnswerValue::Choice(raw.to_string())),
        FieldKind::Flag => parse_flag(raw).map(AnswerValue::Flag),
        FieldKind::Measure => raw
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(AnswerValue::Measure),
        FieldKind::Assignments => None,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "yes" | "y" => Some(true),
        "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn read_complexity(root: &Element, outcome: &mut ParseOutcome) {
    let candidates = [
        root.find(layout::COMPLEXITY_PATH).and_then(Element::text),
        root.find(layout::KIND_PATH).and_then(Element::text),
        Some(root.tag()),
    ];
    let mut rejected = None;
    for raw in candidates.into_iter().flatten().filter(|raw| !raw.is_empty()) {
        match Complexity::normalize(raw) {
            Some(complexity) => {
                outcome.answers.set(
                    FieldKey::Complexity,
                    AnswerValue::Choice(complexity.label().to_string()),
                );
                return;
            }
            None => {
                rejected.get_or_insert(raw);
            }
        }
    }
    let warning = match rejected {
        Some(raw) => ParseWarning::invalid(FieldKey::Complexity.as_str(), raw),
        None => ParseWarning::missing(
            FieldKey::Complexity,
            &layout::display_path(layout::COMPLEXITY_PATH),
        ),
    };
    outcome.warnings.push(warning);
}

/// Split a stored timeline into its start and pace halves.
///
/// Surrounding whitespace is trimmed before this runs, so a value whose
/// second half was empty arrives as `"start -"`.
pub fn split_timeline(raw: &str) -> Option<(&str, &str)> {
    let delimiter = layout::TIMELINE_DELIMITER;
    if let Some((start, pace)) = raw.split_once(delimiter) {
        return Some((start.trim(), pace.trim()));
    }
    let bare = delimiter.trim();
    if raw == bare {
        return Some(("", ""));
    }
    if let Some(start) = raw.strip_suffix(delimiter.trim_end()) {
        return Some((start.trim(), ""));
    }
    raw.strip_prefix(delimiter.trim_start())
        .map(|pace| ("", pace.trim()))
}

fn read_timeline(root: &Element, outcome: &mut ParseOutcome) {
    let Some(element) = root.find(layout::TIMELINE_PATH) else {
        outcome.warnings.push(ParseWarning::missing(
            FieldKey::TimelineStart,
            &layout::display_path(layout::TIMELINE_PATH),
        ));
        return;
    };
    let raw = element.text().unwrap_or_default();
    if raw.is_empty() {
        return;
    }
    match split_timeline(raw) {
        Some((start, pace)) => {
            outcome
                .answers
                .set(FieldKey::TimelineStart, AnswerValue::Choice(start.to_string()));
            outcome
                .answers
                .set(FieldKey::TimelinePace, AnswerValue::Choice(pace.to_string()));
        }
        None => outcome.warnings.push(ParseWarning::invalid("timeline", raw)),
    }
}

fn read_assignments(root: &Element, outcome: &mut ParseOutcome) {
    let Some(element) = root.find(layout::ASSIGNMENTS_PATH) else {
        outcome.warnings.push(ParseWarning::missing(
            FieldKey::WorkAssignments,
            &layout::display_path(layout::ASSIGNMENTS_PATH),
        ));
        return;
    };
    for child in element.children() {
        let Some(phase) = Phase::from_slug(child.tag()) else {
            outcome
                .warnings
                .push(ParseWarning::invalid(FieldKey::WorkAssignments.as_str(), child.tag()));
            continue;
        };
        let raw = child.text().unwrap_or_default();
        if raw.is_empty() {
            continue;
        }
        match raw.parse::<Assignment>() {
            Ok(assignment) => outcome.answers.set_assignment(phase, assignment),
            Err(_) => outcome
                .warnings
                .push(ParseWarning::invalid(phase.slug(), raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckorator_types::answer::Answer;

    #[test]
    fn test_malformed_document_yields_one_warning() {
        let outcome = parse_document("<deck_plan_request><project_overview>");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.is_malformed());
        assert!(outcome.answers.is_empty());
    }

    #[test]
    fn test_missing_sections_warn_per_field() {
        let outcome = parse_document("<deck_plan_request/>");
        assert!(!outcome.is_malformed());
        // Complexity still comes from the root tag.
        assert_eq!(outcome.answers.complexity(), Answer::Answered(Complexity::Basic));
        assert_eq!(outcome.answers.len(), 1);
        assert!(outcome.warnings.iter().any(|w| matches!(
            w,
            ParseWarning::MissingField { field, .. } if field == "zip_code"
        )));
    }

    #[test]
    fn test_empty_elements_are_unanswered_without_warning() {
        let xml = "<deck_plan_request><user_requirements><project_basics>\
                   <budget/><timeline></timeline>\
                   </project_basics></user_requirements></deck_plan_request>";
        let outcome = parse_document(xml);
        assert_eq!(outcome.answers.get(FieldKey::Budget), Answer::Unanswered);
        assert_eq!(outcome.answers.get(FieldKey::TimelineStart), Answer::Unanswered);
        assert!(!outcome.warnings.iter().any(|w| matches!(
            w,
            ParseWarning::MissingField { field, .. } | ParseWarning::InvalidValue { field, .. }
                if field == "budget" || field == "timeline" || field == "timeline_start"
        )));
    }

    #[test]
    fn test_timeline_split() {
        assert_eq!(split_timeline("This spring - No rush"), Some(("This spring", "No rush")));
        assert_eq!(split_timeline("This spring -"), Some(("This spring", "")));
        assert_eq!(split_timeline("- No rush"), Some(("", "No rush")));
        assert_eq!(split_timeline("-"), Some(("", "")));
        assert_eq!(split_timeline("sometime soon"), None);
    }

    #[test]
    fn test_timeline_without_delimiter_warns() {
        let xml = "<deck_plan_request><user_requirements><project_basics>\
                   <timeline>whenever</timeline>\
                   </project_basics></user_requirements></deck_plan_request>";
        let outcome = parse_document(xml);
        assert_eq!(outcome.answers.get(FieldKey::TimelineStart), Answer::Unanswered);
        assert_eq!(outcome.answers.get(FieldKey::TimelinePace), Answer::Unanswered);
        assert!(outcome
            .warnings
            .contains(&ParseWarning::invalid("timeline", "whenever")));
    }

    #[test]
    fn test_invalid_values_warn() {
        let xml = "<deck_plan_request><user_requirements>\
                   <site_information><dimensions><length_feet>twelve</length_feet></dimensions></site_information>\
                   <materials_design><stairs_needed>maybe</stairs_needed></materials_design>\
                   <work_assignments><framing>DIY</framing><roofing>DIY</roofing><decking>someone</decking></work_assignments>\
                   </user_requirements></deck_plan_request>";
        let outcome = parse_document(xml);
        assert!(outcome.warnings.contains(&ParseWarning::invalid("length_feet", "twelve")));
        assert!(outcome.warnings.contains(&ParseWarning::invalid("stairs_needed", "maybe")));
        assert!(outcome.warnings.contains(&ParseWarning::invalid("work_assignments", "roofing")));
        assert!(outcome.warnings.contains(&ParseWarning::invalid("decking", "someone")));
        assert_eq!(
            outcome.answers.assignment(Phase::Framing),
            Answer::Answered(Assignment::Diy)
        );
        assert_eq!(outcome.answers.measure(FieldKey::LengthFeet), Answer::Unanswered);
    }

    #[test]
    fn test_legacy_construction_layout() {
        let xml = "<construction_specification_request>\
                   <project_overview><kind>construction specification request</kind></project_overview>\
                   <site_specifications>\
                   <dimensions><length_feet>16</length_feet><width_feet>12</width_feet>\
                   <height_above_ground_inches>24</height_above_ground_inches></dimensions>\
                   <site_conditions><slope_direction>North</slope_direction><slope_amount_inches>6</slope_amount_inches></site_conditions>\
                   </site_specifications>\
                   </construction_specification_request>";
        let outcome = parse_document(xml);
        assert_eq!(outcome.answers.complexity(), Answer::Answered(Complexity::Advanced));
        assert_eq!(outcome.answers.measure(FieldKey::LengthFeet), Answer::Answered(16.0));
        assert_eq!(outcome.answers.measure(FieldKey::WidthFeet), Answer::Answered(12.0));
        assert_eq!(outcome.answers.text(FieldKey::SlopeDirection), Answer::Answered("North"));
        assert_eq!(
            outcome.answers.measure(FieldKey::SlopeAmountInches),
            Answer::Answered(6.0)
        );
        // Inches cannot be mapped onto a height choice.
        assert_eq!(outcome.answers.text(FieldKey::HeightFromGround), Answer::Unanswered);
        assert_eq!(outcome.template_version, None);
    }

    #[test]
    fn test_unrecognized_complexity_warns() {
        let xml = "<request><project_overview><complexity_level>Medium</complexity_level></project_overview></request>";
        let outcome = parse_document(xml);
        assert_eq!(outcome.answers.complexity(), Answer::Unanswered);
        assert!(outcome.warnings.contains(&ParseWarning::invalid("complexity", "Medium")));
    }
}
