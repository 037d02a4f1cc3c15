//! Core type definitions for collabdb.

use crate::error::CoreError;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A single record: field name to JSON value.
///
/// Rows are loosely shaped so the relation attacher can add embed keys
/// without a per-table schema.
pub type Row = Map<String, Value>;

/// Returns the integer `id` of a row, if it has one.
#[must_use]
pub fn row_id(row: &Row) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

/// Returns the current time as an ISO-8601 string with millisecond precision.
#[must_use]
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

macro_rules! tables {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)+) => {
        /// A named table in the store.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Table {
            $($(#[$doc])* $variant,)+
        }

        impl Table {
            /// Every table, in schema order.
            pub const ALL: &'static [Table] = &[$(Table::$variant,)+];

            /// Returns the wire name of the table.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Table::$variant => $name,)+
                }
            }
        }

        impl FromStr for Table {
            type Err = CoreError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $($name => Ok(Table::$variant),)+
                    other => Err(CoreError::unknown_table(other)),
                }
            }
        }
    };
}

tables! {
    /// Universities and their research offices.
    Colleges => "colleges",
    /// Industry organisations.
    CorporatePartners => "corporate_partners",
    /// University research projects offered for collaboration.
    ResearchProjects => "research_projects",
    /// Problems posted by corporate partners.
    IndustryChallenges => "industry_challenges",
    /// Project/challenge pairings.
    MatchmakingScores => "matchmaking_scores",
    /// Partner requests to collaborate on a project.
    CollaborationRequests => "collaboration_requests",
    /// Collaboration agreements.
    Agreements => "agreements",
    /// Reusable agreement templates.
    AgreementTemplates => "agreement_templates",
    /// Checklist entries for an agreement.
    AgreementChecklistItems => "agreement_checklist_items",
    /// Signatures collected on an agreement.
    AgreementSignatures => "agreement_signatures",
    /// Revision history of an agreement.
    AgreementVersions => "agreement_versions",
    /// Running projects created from signed agreements.
    ActiveProjects => "active_projects",
    /// Milestones of an active project.
    ProjectMilestones => "project_milestones",
    /// Deliverables of an active project.
    ProjectDeliverables => "project_deliverables",
    /// Team members on an active project.
    ProjectTeamMembers => "project_team_members",
    /// Invention disclosures.
    IpDisclosures => "ip_disclosures",
    /// Inventors named on a disclosure.
    IpInventors => "ip_inventors",
    /// Patent filings for a disclosure.
    IpPatentFilings => "ip_patent_filings",
    /// Disclosures offered for licensing.
    LicensingOpportunities => "licensing_opportunities",
    /// Partner inquiries about a licensing opportunity.
    LicensingInquiries => "licensing_inquiries",
    /// Negotiation thread messages.
    NegotiationMessages => "negotiation_messages",
    /// Scope drafts attached to a collaboration request.
    ProjectScopes => "project_scopes",
    /// Student talent profiles.
    StudentProfiles => "student_profiles",
    /// Skills listed on a student profile.
    StudentSkills => "student_skills",
    /// Publications listed on a student profile.
    StudentPublications => "student_publications",
    /// Work experience listed on a student profile.
    StudentExperiences => "student_experiences",
    /// Candidates bookmarked by a partner.
    SavedCandidates => "saved_candidates",
    /// Interview invitations from partners to students.
    InterviewRequests => "interview_requests",
    /// Signed-in sessions.
    UserSessions => "user_sessions",
    /// Audit trail of user actions.
    ActivityLogs => "activity_logs",
}

impl Table {
    /// Whether updates to this table always stamp `updated_at`.
    ///
    /// Other tables are stamped only when the row already carries the field.
    #[must_use]
    pub const fn has_lifecycle(self) -> bool {
        matches!(
            self,
            Table::Agreements
                | Table::ActiveProjects
                | Table::StudentProfiles
                | Table::AgreementChecklistItems
        )
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
