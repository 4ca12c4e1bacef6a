//! Access policy: which actors may perform which actions on an appraisal.
//!
//! All predicates here are pure and total; they never fail. Callers turn a
//! `false` into [`CoreError::Forbidden`]. Role and relationship checks are
//! centralized here so no handler re-implements them ad hoc.

use serde::Serialize;

use crate::status::{AppraisalStatus, Stage};
use crate::types::DbId;

/// Role-label keywords that qualify as manager-level regardless of the
/// numeric role level. Matched case-insensitively as substrings.
const MANAGER_KEYWORDS: &[&str] = &[
    "manager", "lead", "head", "director", "vp", "chief", "cxo", "cto", "ceo", "admin",
];

/// Role levels strictly above this threshold qualify as manager-level.
const MANAGER_LEVEL_THRESHOLD: i16 = 2;

/// The authenticated party attempting an operation.
///
/// Built per request from the token claims; never persisted by the engine.
#[derive(Debug, Clone)]
pub struct Actor {
    pub employee_id: DbId,
    pub role_label: String,
    pub role_level: i16,
}

/// An actor's relationship to a specific appraisal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Appraisee,
    Appraiser,
    Reviewer,
    None,
}

/// The three participant ids of an appraisal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participants {
    pub appraisee_id: DbId,
    pub appraiser_id: DbId,
    pub reviewer_id: DbId,
}

impl Participants {
    /// Classify an employee id against the three participant slots.
    ///
    /// Checked appraisee-first; the reviewer is guaranteed distinct from
    /// the other two by the creation invariant.
    pub fn relationship_of(&self, employee_id: DbId) -> Relationship {
        if employee_id == self.appraisee_id {
            Relationship::Appraisee
        } else if employee_id == self.appraiser_id {
            Relationship::Appraiser
        } else if employee_id == self.reviewer_id {
            Relationship::Reviewer
        } else {
            Relationship::None
        }
    }

    /// The single employee authorized to submit the given stage.
    pub fn stage_owner(&self, stage: Stage) -> DbId {
        match stage {
            Stage::SelfAssessment => self.appraisee_id,
            Stage::AppraiserEvaluation => self.appraiser_id,
            Stage::ReviewerEvaluation => self.reviewer_id,
        }
    }
}

/// Whether the actor holds a manager-level role.
///
/// A role-label keyword match takes precedence over the numeric level, so a
/// "Team Lead" at level 2 still qualifies.
pub fn is_manager_level(actor: &Actor) -> bool {
    let label = actor.role_label.to_lowercase();
    if MANAGER_KEYWORDS.iter().any(|kw| label.contains(kw)) {
        return true;
    }
    actor.role_level > MANAGER_LEVEL_THRESHOLD
}

/// Only manager-level actors may create appraisals.
pub fn can_create_appraisal(actor: &Actor) -> bool {
    is_manager_level(actor)
}

/// Draft contents (goals, participants, dates) are editable only by the
/// appraiser and only while the appraisal is still in Draft.
pub fn can_edit_draft(
    actor: &Actor,
    participants: &Participants,
    status: AppraisalStatus,
) -> bool {
    actor.employee_id == participants.appraiser_id && status == AppraisalStatus::Draft
}

/// Whether the actor is the single party designated for a stage.
///
/// Manager-level confers nothing here: a manager who is not the designated
/// appraisee/appraiser/reviewer can never submit that stage.
pub fn can_act_in_stage(actor: &Actor, participants: &Participants, stage: Stage) -> bool {
    actor.employee_id == participants.stage_owner(stage)
}

/// Appraisee, appraiser, and reviewer may always fetch the current
/// snapshot; everyone else is denied.
pub fn can_view(actor: &Actor, participants: &Participants) -> bool {
    participants.relationship_of(actor.employee_id) != Relationship::None
}

/// Which field groups the actor may currently write.
///
/// Consumed by the read endpoint so the presentation layer can disable
/// everything else; the engine re-checks on every write regardless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EditableFields {
    pub goals: bool,
    pub self_assessment: bool,
    pub appraiser_evaluation: bool,
    pub reviewer_evaluation: bool,
}

/// Compute the field groups currently mutable by this actor.
pub fn editable_fields(
    actor: &Actor,
    participants: &Participants,
    status: AppraisalStatus,
) -> EditableFields {
    EditableFields {
        goals: can_edit_draft(actor, participants, status),
        self_assessment: status == AppraisalStatus::AppraiseeSelfAssessment
            && can_act_in_stage(actor, participants, Stage::SelfAssessment),
        appraiser_evaluation: status == AppraisalStatus::AppraiserEvaluation
            && can_act_in_stage(actor, participants, Stage::AppraiserEvaluation),
        reviewer_evaluation: status == AppraisalStatus::ReviewerEvaluation
            && can_act_in_stage(actor, participants, Stage::ReviewerEvaluation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: DbId, label: &str, level: i16) -> Actor {
        Actor {
            employee_id: id,
            role_label: label.to_string(),
            role_level: level,
        }
    }

    fn participants() -> Participants {
        Participants {
            appraisee_id: 1,
            appraiser_id: 2,
            reviewer_id: 3,
        }
    }

    #[test]
    fn manager_keywords_match_case_insensitively() {
        assert!(is_manager_level(&actor(1, "Engineering Manager", 1)));
        assert!(is_manager_level(&actor(1, "TEAM LEAD", 1)));
        assert!(is_manager_level(&actor(1, "Head of Product", 1)));
        assert!(is_manager_level(&actor(1, "cto", 1)));
        assert!(is_manager_level(&actor(1, "Site Admin", 1)));
    }

    #[test]
    fn label_match_takes_precedence_over_level() {
        // A "Team Lead" at level 2 still qualifies.
        assert!(is_manager_level(&actor(1, "Team Lead", 2)));
    }

    #[test]
    fn high_level_qualifies_without_keyword() {
        assert!(is_manager_level(&actor(1, "Software Engineer", 3)));
        assert!(is_manager_level(&actor(1, "Architect", 5)));
    }

    #[test]
    fn junior_non_manager_does_not_qualify() {
        assert!(!is_manager_level(&actor(1, "Software Engineer", 1)));
        assert!(!is_manager_level(&actor(1, "Software Engineer", 2)));
        assert!(!can_create_appraisal(&actor(1, "Designer", 2)));
    }

    #[test]
    fn relationship_classification() {
        let p = participants();
        assert_eq!(p.relationship_of(1), Relationship::Appraisee);
        assert_eq!(p.relationship_of(2), Relationship::Appraiser);
        assert_eq!(p.relationship_of(3), Relationship::Reviewer);
        assert_eq!(p.relationship_of(99), Relationship::None);
    }

    #[test]
    fn can_edit_draft_requires_appraiser_and_draft_status() {
        let p = participants();
        let appraiser = actor(2, "Manager", 3);
        assert!(can_edit_draft(&appraiser, &p, AppraisalStatus::Draft));
        assert!(!can_edit_draft(&appraiser, &p, AppraisalStatus::Submitted));

        let appraisee = actor(1, "Engineer", 1);
        assert!(!can_edit_draft(&appraisee, &p, AppraisalStatus::Draft));
    }

    #[test]
    fn each_stage_is_gated_to_its_designated_party() {
        let p = participants();
        let appraisee = actor(1, "Engineer", 1);
        let appraiser = actor(2, "Manager", 3);
        let reviewer = actor(3, "Director", 4);

        assert!(can_act_in_stage(&appraisee, &p, Stage::SelfAssessment));
        assert!(!can_act_in_stage(&appraiser, &p, Stage::SelfAssessment));

        assert!(can_act_in_stage(&appraiser, &p, Stage::AppraiserEvaluation));
        assert!(!can_act_in_stage(&reviewer, &p, Stage::AppraiserEvaluation));

        assert!(can_act_in_stage(&reviewer, &p, Stage::ReviewerEvaluation));
        assert!(!can_act_in_stage(&appraisee, &p, Stage::ReviewerEvaluation));
    }

    #[test]
    fn unrelated_manager_can_act_in_no_stage() {
        let p = participants();
        let outsider = actor(42, "VP of Engineering", 6);
        for stage in [
            Stage::SelfAssessment,
            Stage::AppraiserEvaluation,
            Stage::ReviewerEvaluation,
        ] {
            assert!(!can_act_in_stage(&outsider, &p, stage));
        }
        assert!(!can_view(&outsider, &p));
    }

    #[test]
    fn participants_can_view_regardless_of_status() {
        let p = participants();
        for id in [1, 2, 3] {
            assert!(can_view(&actor(id, "Anyone", 1), &p));
        }
    }

    #[test]
    fn editable_fields_track_status_and_relationship() {
        let p = participants();
        let appraiser = actor(2, "Manager", 3);

        let draft = editable_fields(&appraiser, &p, AppraisalStatus::Draft);
        assert!(draft.goals);
        assert!(!draft.appraiser_evaluation);

        let evaluating = editable_fields(&appraiser, &p, AppraisalStatus::AppraiserEvaluation);
        assert!(!evaluating.goals);
        assert!(evaluating.appraiser_evaluation);

        let appraisee = actor(1, "Engineer", 1);
        let self_stage =
            editable_fields(&appraisee, &p, AppraisalStatus::AppraiseeSelfAssessment);
        assert!(self_stage.self_assessment);
        assert!(!self_stage.goals);

        // Once the appraisal is complete nothing is editable by anyone.
        for id in [1, 2, 3] {
            let fields = editable_fields(&actor(id, "Anyone", 5), &p, AppraisalStatus::Complete);
            assert_eq!(fields, EditableFields::default());
        }
    }
}
