//! Per-table relation rules.

use crate::error::CoreResult;
use crate::scoring::{forecast_trl, synergy_score};
use crate::table::Tables;
use crate::types::{Row, Table};
use serde_json::Value;

/// Computes a derived field from the row and the committed tables.
pub type ComputeFn = fn(&Tables, &Row) -> CoreResult<Value>;

/// How a related row is embedded.
#[derive(Debug, Clone, Copy)]
pub enum Embed {
    /// Reduced projection: only these fields, when present.
    Fields(&'static [&'static str]),
    /// A shallow copy of the whole related row.
    All,
    /// The related row decorated with its own relations.
    Nested,
    /// A single field of each related row (collections only).
    Pluck(&'static str),
}

/// One relation rule.
#[derive(Debug, Clone, Copy)]
pub enum Relation {
    /// `row[foreign_key]` references `table.id`; embeds one row or `null`.
    BelongsTo {
        /// Output key.
        key: &'static str,
        /// Referenced table.
        table: Table,
        /// Field on this row holding the referenced id.
        foreign_key: &'static str,
        /// Embed shape.
        embed: Embed,
    },
    /// Rows of `table` whose `foreign_key` references this row's id.
    HasMany {
        /// Output key.
        key: &'static str,
        /// Referencing table.
        table: Table,
        /// Field on the referencing rows holding this row's id.
        foreign_key: &'static str,
        /// Embed shape for each element.
        embed: Embed,
    },
    /// A derived field.
    Computed {
        /// Output key.
        key: &'static str,
        /// Pure function producing the value.
        compute: ComputeFn,
    },
}

impl Relation {
    /// Returns the output key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Relation::BelongsTo { key, .. }
            | Relation::HasMany { key, .. }
            | Relation::Computed { key, .. } => *key,
        }
    }
}

const fn belongs_to(
    key: &'static str,
    table: Table,
    foreign_key: &'static str,
    embed: Embed,
) -> Relation {
    Relation::BelongsTo {
        key,
        table,
        foreign_key,
        embed,
    }
}

const fn has_many(
    key: &'static str,
    table: Table,
    foreign_key: &'static str,
    embed: Embed,
) -> Relation {
    Relation::HasMany {
        key,
        table,
        foreign_key,
        embed,
    }
}

const COLLEGE_SUMMARY: Embed = Embed::Fields(&["name", "location"]);
const PARTNER_NAME: Embed = Embed::Fields(&["name"]);
const PARTNER_SUMMARY: Embed = Embed::Fields(&["name", "industry"]);
const REQUEST_SUMMARY: Embed = Embed::Fields(&["status", "message"]);
const AGREEMENT_SUMMARY: Embed = Embed::Fields(&["title", "status"]);

const RESEARCH_PROJECTS: &[Relation] = &[
    belongs_to("colleges", Table::Colleges, "college_id", COLLEGE_SUMMARY),
    Relation::Computed {
        key: "trl_forecast",
        compute: trl_forecast,
    },
];

const INDUSTRY_CHALLENGES: &[Relation] = &[belongs_to(
    "corporate_partners",
    Table::CorporatePartners,
    "partner_id",
    Embed::Fields(&["name", "industry", "logo_url"]),
)];

const MATCHMAKING_SCORES: &[Relation] = &[
    belongs_to("research_projects", Table::ResearchProjects, "project_id", Embed::Nested),
    belongs_to(
        "industry_challenges",
        Table::IndustryChallenges,
        "challenge_id",
        Embed::Nested,
    ),
    Relation::Computed {
        key: "synergy",
        compute: synergy,
    },
];

const COLLABORATION_REQUESTS: &[Relation] = &[
    belongs_to("research_projects", Table::ResearchProjects, "project_id", Embed::Nested),
    belongs_to(
        "corporate_partners",
        Table::CorporatePartners,
        "partner_id",
        PARTNER_SUMMARY,
    ),
];

const AGREEMENTS: &[Relation] = &[
    belongs_to(
        "collaboration_requests",
        Table::CollaborationRequests,
        "request_id",
        Embed::Nested,
    ),
    has_many(
        "agreement_checklist_items",
        Table::AgreementChecklistItems,
        "agreement_id",
        Embed::All,
    ),
    has_many(
        "agreement_signatures",
        Table::AgreementSignatures,
        "agreement_id",
        Embed::Fields(&["signer_name", "signer_role", "signed_at"]),
    ),
];

const AGREEMENT_VERSIONS: &[Relation] = &[belongs_to(
    "agreements",
    Table::Agreements,
    "agreement_id",
    AGREEMENT_SUMMARY,
)];

const ACTIVE_PROJECTS: &[Relation] = &[
    belongs_to("agreements", Table::Agreements, "agreement_id", AGREEMENT_SUMMARY),
    has_many(
        "project_milestones",
        Table::ProjectMilestones,
        "active_project_id",
        Embed::All,
    ),
    has_many(
        "project_deliverables",
        Table::ProjectDeliverables,
        "active_project_id",
        Embed::All,
    ),
    has_many(
        "project_team_members",
        Table::ProjectTeamMembers,
        "active_project_id",
        Embed::Fields(&["name", "role"]),
    ),
];

const IP_DISCLOSURES: &[Relation] = &[
    belongs_to(
        "research_projects",
        Table::ResearchProjects,
        "project_id",
        Embed::Fields(&["title", "college_id"]),
    ),
    has_many(
        "ip_inventors",
        Table::IpInventors,
        "disclosure_id",
        Embed::Fields(&["name", "contribution_percent"]),
    ),
    has_many(
        "ip_patent_filings",
        Table::IpPatentFilings,
        "disclosure_id",
        Embed::All,
    ),
];

const LICENSING_OPPORTUNITIES: &[Relation] = &[belongs_to(
    "ip_disclosures",
    Table::IpDisclosures,
    "disclosure_id",
    Embed::Nested,
)];

const LICENSING_INQUIRIES: &[Relation] = &[
    belongs_to(
        "licensing_opportunities",
        Table::LicensingOpportunities,
        "opportunity_id",
        Embed::Fields(&["title", "status"]),
    ),
    belongs_to(
        "corporate_partners",
        Table::CorporatePartners,
        "partner_id",
        PARTNER_NAME,
    ),
];

const REQUEST_THREAD: &[Relation] = &[belongs_to(
    "collaboration_requests",
    Table::CollaborationRequests,
    "request_id",
    REQUEST_SUMMARY,
)];

const STUDENT_PROFILES: &[Relation] = &[
    belongs_to("colleges", Table::Colleges, "college_id", Embed::Fields(&["name"])),
    has_many(
        "student_skills",
        Table::StudentSkills,
        "student_id",
        Embed::Pluck("skill"),
    ),
    has_many(
        "student_publications",
        Table::StudentPublications,
        "student_id",
        Embed::Fields(&["title", "venue", "year"]),
    ),
    has_many(
        "student_experiences",
        Table::StudentExperiences,
        "student_id",
        Embed::All,
    ),
];

const CANDIDATE_LINKS: &[Relation] = &[
    belongs_to("student_profiles", Table::StudentProfiles, "student_id", Embed::Nested),
    belongs_to(
        "corporate_partners",
        Table::CorporatePartners,
        "partner_id",
        PARTNER_NAME,
    ),
];

/// Returns the relation rules for a table; empty for plain tables.
#[must_use]
pub fn relations(table: Table) -> &'static [Relation] {
    match table {
        Table::ResearchProjects => RESEARCH_PROJECTS,
        Table::IndustryChallenges => INDUSTRY_CHALLENGES,
        Table::MatchmakingScores => MATCHMAKING_SCORES,
        Table::CollaborationRequests => COLLABORATION_REQUESTS,
        Table::Agreements => AGREEMENTS,
        Table::AgreementVersions => AGREEMENT_VERSIONS,
        Table::ActiveProjects => ACTIVE_PROJECTS,
        Table::IpDisclosures => IP_DISCLOSURES,
        Table::LicensingOpportunities => LICENSING_OPPORTUNITIES,
        Table::LicensingInquiries => LICENSING_INQUIRIES,
        Table::NegotiationMessages | Table::ProjectScopes => REQUEST_THREAD,
        Table::StudentProfiles => STUDENT_PROFILES,
        Table::SavedCandidates | Table::InterviewRequests => CANDIDATE_LINKS,
        _ => &[],
    }
}

fn trl_forecast(_tables: &Tables, row: &Row) -> CoreResult<Value> {
    Ok(serde_json::to_value(forecast_trl(row))?)
}

fn synergy(tables: &Tables, row: &Row) -> CoreResult<Value> {
    match (
        referenced(tables, row, Table::ResearchProjects, "project_id"),
        referenced(tables, row, Table::IndustryChallenges, "challenge_id"),
    ) {
        (Some(project), Some(challenge)) => {
            Ok(serde_json::to_value(synergy_score(project, challenge))?)
        }
        _ => Ok(Value::Null),
    }
}

fn referenced<'a>(tables: &'a Tables, row: &Row, table: Table, field: &str) -> Option<&'a Row> {
    tables.find_referenced(table, row.get(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tables_have_no_rules() {
        assert!(relations(Table::ActivityLogs).is_empty());
        assert!(relations(Table::Colleges).is_empty());
    }

    #[test]
    fn keys_are_unique_per_table() {
        for table in Table::ALL {
            let mut keys: Vec<_> = relations(*table).iter().map(Relation::key).collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), total, "duplicate relation key on {table}");
        }
    }
}
