//! Deterministic synthetic population of every table.
//!
//! The same seed always yields the same rows. Every foreign key written here
//! points at a row inserted earlier in the same run, so relation attachment
//! never dangles on seeded data. `user_sessions` and `activity_logs` are
//! left empty; they only fill at runtime.

use crate::scoring::synergy_score;
use crate::table::Tables;
use crate::types::{Row, Table};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

/// 2024-01-15T09:00:00Z; every seeded timestamp is an offset from it.
const BASE_UNIX_SECONDS: i64 = 1_705_309_200;

const COLLEGES: &[(&str, &str)] = &[
    ("Northfield Institute of Technology", "Boston, MA"),
    ("Westlake University", "Seattle, WA"),
    ("Coastal State College", "San Diego, CA"),
    ("Midland Polytechnic", "Columbus, OH"),
    ("Summit Research University", "Denver, CO"),
];

const PARTNERS: &[(&str, &str)] = &[
    ("Helix Biotech", "healthcare"),
    ("Voltline Energy", "energy"),
    ("Orbital Dynamics", "aerospace"),
    ("Quantra Analytics", "software"),
    ("GreenRoot Agritech", "agriculture"),
    ("Forge Materials", "manufacturing"),
];

const RESEARCH_AREAS: &[&str] = &[
    "machine learning",
    "battery chemistry",
    "materials science",
    "genomics",
    "robotics",
    "computer vision",
];

const KEYWORDS: &[&str] = &[
    "machine learning",
    "energy storage",
    "composites",
    "crispr",
    "autonomy",
    "imaging",
    "sensors",
    "healthcare",
    "energy",
    "manufacturing",
    "software",
    "agriculture",
];

const PROJECT_STATUSES: &[&str] = &["active", "seeking_partners", "completed"];
const REQUEST_STATUSES: &[&str] = &["pending", "accepted", "in_negotiation", "rejected"];
const AGREEMENT_STATUSES: &[&str] = &["signed", "under_review", "draft"];
const CHECKLIST_LABELS: &[&str] = &[
    "Confidentiality terms reviewed",
    "IP ownership clause agreed",
    "Budget schedule approved",
];
const FIRST_NAMES: &[&str] = &[
    "Avery", "Jordan", "Priya", "Mateo", "Lin", "Samira", "Noah", "Keiko", "Dana", "Omar",
];
const LAST_NAMES: &[&str] = &[
    "Okafor", "Nguyen", "Schmidt", "Patel", "Garcia", "Kim", "Rossi", "Haddad",
];
const SKILLS: &[&str] = &[
    "python", "rust", "pytorch", "cad", "matlab", "wet lab", "statistics", "embedded c",
];
const VENUES: &[&str] = &["NeurIPS", "Nature Energy", "ICRA", "ACS Nano", "Bioinformatics"];
const DEGREES: &[&str] = &["BSc", "MSc", "PhD"];
const JURISDICTIONS: &[&str] = &["US", "EP", "PCT"];

/// Row counts written by one [`seed`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// The seed that drove the run.
    pub seed: u64,
    /// Rows written per table; tables left empty are absent.
    pub rows: BTreeMap<Table, usize>,
}

impl SeedReport {
    /// Total rows written.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.values().sum()
    }
}

/// Populates `tables` from `seed`.
///
/// Ids continue from whatever the tables already hold.
pub fn seed(tables: &mut Tables, seed: u64) -> SeedReport {
    let mut seeder = Seeder {
        tables,
        rng: StdRng::seed_from_u64(seed),
        report: SeedReport {
            seed,
            rows: BTreeMap::new(),
        },
    };
    seeder.run();

    let report = seeder.report;
    info!(
        seed,
        tables = report.rows.len(),
        rows = report.total(),
        "database seeded"
    );
    report
}

struct Seeder<'a> {
    tables: &'a mut Tables,
    rng: StdRng,
    report: SeedReport,
}

impl Seeder<'_> {
    fn run(&mut self) {
        let colleges = self.colleges();
        let partners = self.partners();
        let projects = self.research_projects(&colleges);
        let challenges = self.industry_challenges(&partners);
        self.matchmaking_scores(&projects, &challenges);

        let requests = self.collaboration_requests(&projects, &partners, &challenges);
        let templates = self.agreement_templates();
        let agreements = self.agreements(&requests, &templates);
        self.active_projects(&agreements);
        self.negotiations(&requests);

        let disclosures = self.ip_disclosures(&projects);
        self.licensing(&disclosures, &partners);

        let students = self.students(&colleges);
        self.recruiting(&students, &partners);
    }

    fn colleges(&mut self) -> Vec<i64> {
        COLLEGES
            .iter()
            .enumerate()
            .map(|(i, (name, location))| {
                let year = self.rng.gen_range(1850..=1990);
                let slug = name.split_whitespace().next().unwrap_or("college").to_lowercase();
                self.insert(
                    Table::Colleges,
                    json!({
                        "name": name,
                        "location": location,
                        "established_year": year,
                        "website": format!("https://www.{slug}.edu"),
                        "contact_email": format!("partnerships@{slug}.edu"),
                        "created_at": self.at(-(400 + i as i64 * 30)),
                    }),
                )
            })
            .collect()
    }

    fn partners(&mut self) -> Vec<i64> {
        PARTNERS
            .iter()
            .enumerate()
            .map(|(i, (name, industry))| {
                let slug = name.replace(' ', "-").to_lowercase();
                let employees = self.rng.gen_range(50..=20_000);
                self.insert(
                    Table::CorporatePartners,
                    json!({
                        "name": name,
                        "industry": industry,
                        "logo_url": format!("https://cdn.example.com/logos/{slug}.png"),
                        "employee_count": employees,
                        "created_at": self.at(-(300 + i as i64 * 20)),
                    }),
                )
            })
            .collect()
    }

    fn research_projects(&mut self, colleges: &[i64]) -> Vec<i64> {
        (0..12)
            .map(|i| {
                let college_id = colleges[i % colleges.len()];
                let area = self.pick(RESEARCH_AREAS);
                let keywords = self.pick_many(KEYWORDS, 3);
                let trl = self.rng.gen_range(1..=7);
                let funding = self.rng.gen_range(2..=60) * 10_000;
                let team = self.rng.gen_range(2..=9);
                let status = self.pick(PROJECT_STATUSES);
                let pi = self.person();
                self.insert(
                    Table::ResearchProjects,
                    json!({
                        "college_id": college_id,
                        "title": format!("{} study {}", capitalize(area), i + 1),
                        "description": format!("Applied {area} research with industry potential."),
                        "research_area": area,
                        "keywords": keywords,
                        "trl_level": trl,
                        "funding_amount": funding,
                        "team_size": team,
                        "status": status,
                        "principal_investigator": pi,
                        "created_at": self.at(-200 + i as i64 * 7),
                    }),
                )
            })
            .collect()
    }

    fn industry_challenges(&mut self, partners: &[i64]) -> Vec<i64> {
        (0..8)
            .map(|i| {
                let partner_index = i % partners.len();
                let industry = PARTNERS[partner_index % PARTNERS.len()].1;
                let expertise = self.pick_many(KEYWORDS, 3);
                let min_trl = self.rng.gen_range(2..=6);
                let budget = self.rng.gen_range(5..=50) * 10_000;
                self.insert(
                    Table::IndustryChallenges,
                    json!({
                        "partner_id": partners[partner_index],
                        "title": format!("{} challenge {}", capitalize(industry), i + 1),
                        "industry": industry,
                        "required_expertise": expertise,
                        "min_trl": min_trl,
                        "budget": budget,
                        "status": "open",
                        "deadline": self.at(60 + i as i64 * 10),
                        "created_at": self.at(-120 + i as i64 * 5),
                    }),
                )
            })
            .collect()
    }

    fn matchmaking_scores(&mut self, projects: &[i64], challenges: &[i64]) {
        for (i, challenge_id) in challenges.iter().enumerate() {
            for index in sample(&mut self.rng, projects.len(), 3.min(projects.len())).into_vec() {
                let project_id = projects[index];
                let score = match (
                    self.tables.find_by_id(Table::ResearchProjects, project_id),
                    self.tables.find_by_id(Table::IndustryChallenges, *challenge_id),
                ) {
                    (Some(project), Some(challenge)) => synergy_score(project, challenge).score,
                    _ => 0,
                };
                self.insert(
                    Table::MatchmakingScores,
                    json!({
                        "project_id": project_id,
                        "challenge_id": challenge_id,
                        "score": score,
                        "status": "suggested",
                        "created_at": self.at(-60 + i as i64),
                    }),
                );
            }
        }
    }

    fn collaboration_requests(
        &mut self,
        projects: &[i64],
        partners: &[i64],
        challenges: &[i64],
    ) -> Vec<i64> {
        (0..8)
            .map(|i| {
                let status = if i < 5 {
                    "accepted"
                } else {
                    self.pick(REQUEST_STATUSES)
                };
                let requester = self.person();
                self.insert(
                    Table::CollaborationRequests,
                    json!({
                        "project_id": projects[i % projects.len()],
                        "partner_id": partners[i % partners.len()],
                        "challenge_id": challenges[i % challenges.len()],
                        "message": format!("{requester} would like to discuss a joint pilot."),
                        "requested_by": requester,
                        "status": status,
                        "created_at": self.at(-50 + i as i64 * 3),
                    }),
                )
            })
            .collect()
    }

    fn agreement_templates(&mut self) -> Vec<i64> {
        ["Sponsored Research", "Non-Disclosure", "Technology License"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.insert(
                    Table::AgreementTemplates,
                    json!({
                        "name": format!("{name} Agreement"),
                        "category": name.to_lowercase().replace(' ', "_"),
                        "body": format!("Standard {name} terms between the parties."),
                        "created_at": self.at(-365 + i as i64),
                    }),
                )
            })
            .collect()
    }

    /// The first five (accepted) requests get agreements.
    fn agreements(&mut self, requests: &[i64], templates: &[i64]) -> Vec<(i64, &'static str)> {
        let mut agreements = Vec::new();
        for (i, request_id) in requests.iter().take(5).enumerate() {
            let status = AGREEMENT_STATUSES[i % AGREEMENT_STATUSES.len()];
            let created = self.at(-40 + i as i64 * 2);
            let agreement_id = self.insert(
                Table::Agreements,
                json!({
                    "request_id": request_id,
                    "template_id": templates[i % templates.len()],
                    "title": format!("Collaboration Agreement #{}", i + 1),
                    "status": status,
                    "effective_date": self.at(i as i64 * 5),
                    "created_at": created,
                    "updated_at": self.at(-30 + i as i64 * 2),
                }),
            );

            for (item, label) in CHECKLIST_LABELS.iter().enumerate() {
                let completed = status == "signed" || self.rng.gen_bool(0.5);
                self.insert(
                    Table::AgreementChecklistItems,
                    json!({
                        "agreement_id": agreement_id,
                        "label": label,
                        "completed": completed,
                        "sort_order": item + 1,
                        "updated_at": self.at(-30 + item as i64),
                    }),
                );
            }

            if status == "signed" {
                for role in ["college", "partner"] {
                    let signer = self.person();
                    self.insert(
                        Table::AgreementSignatures,
                        json!({
                            "agreement_id": agreement_id,
                            "signer_name": signer,
                            "signer_role": role,
                            "signed_at": self.at(-20 + i as i64),
                        }),
                    );
                }
            }

            let versions = self.rng.gen_range(1..=2);
            for version in 1..=versions {
                let author = self.person();
                self.insert(
                    Table::AgreementVersions,
                    json!({
                        "agreement_id": agreement_id,
                        "version_number": version,
                        "summary": format!("Revision {version}"),
                        "author": author,
                        "created_at": self.at(-35 + version * 3),
                    }),
                );
            }

            agreements.push((agreement_id, status));
        }
        agreements
    }

    fn active_projects(&mut self, agreements: &[(i64, &'static str)]) {
        for (i, (agreement_id, _)) in agreements.iter().take(3).enumerate() {
            let progress = self.rng.gen_range(10..=80);
            let project_id = self.insert(
                Table::ActiveProjects,
                json!({
                    "agreement_id": agreement_id,
                    "name": format!("Joint Program {}", i + 1),
                    "status": "in_progress",
                    "progress": progress,
                    "start_date": self.at(-15 + i as i64),
                    "end_date": self.at(180 + i as i64 * 30),
                    "updated_at": self.at(-2),
                }),
            );

            for (m, title) in ["Kickoff", "Prototype", "Final report"].iter().enumerate() {
                let status = if m == 0 { "completed" } else { "pending" };
                self.insert(
                    Table::ProjectMilestones,
                    json!({
                        "active_project_id": project_id,
                        "title": title,
                        "status": status,
                        "due_date": self.at(m as i64 * 60),
                    }),
                );
            }

            for (d, title) in ["Design document", "Test dataset"].iter().enumerate() {
                self.insert(
                    Table::ProjectDeliverables,
                    json!({
                        "active_project_id": project_id,
                        "title": title,
                        "status": "pending",
                        "due_date": self.at(30 + d as i64 * 45),
                    }),
                );
            }

            for role in ["principal investigator", "industry lead", "research assistant"] {
                let name = self.person();
                let email = format!("{}@example.com", name.replace(' ', ".").to_lowercase());
                self.insert(
                    Table::ProjectTeamMembers,
                    json!({
                        "active_project_id": project_id,
                        "name": name,
                        "role": role,
                        "email": email,
                    }),
                );
            }
        }
    }

    fn negotiations(&mut self, requests: &[i64]) {
        for (i, request_id) in requests.iter().take(4).enumerate() {
            for (m, sender) in ["partner", "college", "partner"].iter().enumerate() {
                self.insert(
                    Table::NegotiationMessages,
                    json!({
                        "request_id": request_id,
                        "sender_role": sender,
                        "content": format!("Proposal round {} from the {sender}.", m + 1),
                        "created_at": self.at(-25 + i as i64 + m as i64),
                    }),
                );
            }

            let budget = self.rng.gen_range(5..=40) * 10_000;
            let months = self.rng.gen_range(6..=24);
            self.insert(
                Table::ProjectScopes,
                json!({
                    "request_id": request_id,
                    "objectives": "Validate the prototype against partner requirements.",
                    "budget": budget,
                    "duration_months": months,
                    "status": "draft",
                    "created_at": self.at(-24 + i as i64),
                }),
            );
        }
    }

    fn ip_disclosures(&mut self, projects: &[i64]) -> Vec<i64> {
        (0..5)
            .map(|i| {
                let project_id = projects[(i * 2) % projects.len()];
                let filer = self.person();
                let disclosure_id = self.insert(
                    Table::IpDisclosures,
                    json!({
                        "project_id": project_id,
                        "title": format!("Invention disclosure {}", i + 1),
                        "description": "Novel method identified during sponsored work.",
                        "status": if i < 3 { "filed" } else { "under_review" },
                        "filed_by": filer,
                        "created_at": self.at(-90 + i as i64 * 9),
                    }),
                );

                for share in [60, 40] {
                    let name = self.person();
                    self.insert(
                        Table::IpInventors,
                        json!({
                            "disclosure_id": disclosure_id,
                            "name": name,
                            "contribution_percent": share,
                        }),
                    );
                }

                if i < 3 {
                    let jurisdiction = self.pick(JURISDICTIONS);
                    let number = self.rng.gen_range(100_000..=999_999);
                    self.insert(
                        Table::IpPatentFilings,
                        json!({
                            "disclosure_id": disclosure_id,
                            "jurisdiction": jurisdiction,
                            "application_number": format!("{jurisdiction}-{number}"),
                            "status": "pending",
                            "filed_at": self.at(-60 + i as i64 * 9),
                        }),
                    );
                }

                disclosure_id
            })
            .collect()
    }

    fn licensing(&mut self, disclosures: &[i64], partners: &[i64]) {
        let opportunities: Vec<i64> = disclosures
            .iter()
            .take(4)
            .enumerate()
            .map(|(i, disclosure_id)| {
                let price = self.rng.gen_range(2..=20) * 25_000;
                self.insert(
                    Table::LicensingOpportunities,
                    json!({
                        "disclosure_id": disclosure_id,
                        "title": format!("License package {}", i + 1),
                        "license_type": if i % 2 == 0 { "exclusive" } else { "non_exclusive" },
                        "status": "available",
                        "asking_price": price,
                        "created_at": self.at(-45 + i as i64 * 4),
                    }),
                )
            })
            .collect();

        for (i, opportunity_id) in opportunities.iter().enumerate() {
            self.insert(
                Table::LicensingInquiries,
                json!({
                    "opportunity_id": opportunity_id,
                    "partner_id": partners[(i + 1) % partners.len()],
                    "message": "Interested in evaluation terms.",
                    "status": "open",
                    "created_at": self.at(-10 + i as i64),
                }),
            );
        }
    }

    fn students(&mut self, colleges: &[i64]) -> Vec<i64> {
        (0..10)
            .map(|i| {
                let name = self.person();
                let email = format!("{}@students.example.edu", name.replace(' ', ".").to_lowercase());
                let degree = self.pick(DEGREES);
                let year = self.rng.gen_range(2024..=2028);
                let gpa = f64::from(self.rng.gen_range(280..=400_u32)) / 100.0;
                let student_id = self.insert(
                    Table::StudentProfiles,
                    json!({
                        "college_id": colleges[i % colleges.len()],
                        "name": name,
                        "email": email,
                        "degree": degree,
                        "graduation_year": year,
                        "gpa": gpa,
                        "bio": format!("{degree} candidate interested in applied research."),
                        "created_at": self.at(-150 + i as i64 * 6),
                        "updated_at": self.at(-5),
                    }),
                );

                for skill in self.pick_many(SKILLS, 3) {
                    let proficiency = self.rng.gen_range(1..=5);
                    self.insert(
                        Table::StudentSkills,
                        json!({
                            "student_id": student_id,
                            "skill": skill,
                            "proficiency": proficiency,
                        }),
                    );
                }

                let publications = self.rng.gen_range(1..=2);
                for p in 0..publications {
                    let venue = self.pick(VENUES);
                    self.insert(
                        Table::StudentPublications,
                        json!({
                            "student_id": student_id,
                            "title": format!("Findings in {} ({})", venue, p + 1),
                            "venue": venue,
                            "year": 2022 + p,
                        }),
                    );
                }

                let (organization, _) = PARTNERS[i % PARTNERS.len()];
                self.insert(
                    Table::StudentExperiences,
                    json!({
                        "student_id": student_id,
                        "organization": organization,
                        "role": "Research intern",
                        "start_date": self.at(-400),
                        "end_date": self.at(-310),
                    }),
                );

                student_id
            })
            .collect()
    }

    fn recruiting(&mut self, students: &[i64], partners: &[i64]) {
        // Distinct (student, partner) pairs so on_conflict upserts stay unique.
        for i in 0..5 {
            self.insert(
                Table::SavedCandidates,
                json!({
                    "student_id": students[i % students.len()],
                    "partner_id": partners[i % partners.len()],
                    "note": "Strong fit for upcoming pilot.",
                    "created_at": self.at(-8 + i as i64),
                }),
            );
        }

        for i in 0..4 {
            self.insert(
                Table::InterviewRequests,
                json!({
                    "student_id": students[(i + 5) % students.len()],
                    "partner_id": partners[(i + 2) % partners.len()],
                    "position": "Research engineer intern",
                    "status": if i == 0 { "scheduled" } else { "requested" },
                    "scheduled_at": self.at(7 + i as i64 * 2),
                    "created_at": self.at(-3 + i as i64),
                }),
            );
        }
    }

    /// Appends a row with the next id, defaulting `created_at`.
    fn insert(&mut self, table: Table, fields: Value) -> i64 {
        let id = self.tables.next_id(table);
        let mut row = Row::new();
        row.insert("id".to_string(), Value::from(id));
        if let Value::Object(fields) = fields {
            row.extend(fields);
        }
        if !row.contains_key("created_at") {
            let created = self.at(-30);
            row.insert("created_at".to_string(), Value::String(created));
        }

        self.tables.push(table, row);
        *self.report.rows.entry(table).or_default() += 1;
        id
    }

    fn at(&self, days: i64) -> String {
        let base = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(BASE_UNIX_SECONDS);
        (base + TimeDelta::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn pick(&mut self, pool: &'static [&'static str]) -> &'static str {
        pool[self.rng.gen_range(0..pool.len())]
    }

    fn pick_many(&mut self, pool: &'static [&'static str], amount: usize) -> Vec<&'static str> {
        sample(&mut self.rng, pool.len(), amount.min(pool.len()))
            .into_vec()
            .into_iter()
            .map(|index| pool[index])
            .collect()
    }

    fn person(&mut self) -> String {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        format!("{first} {last}")
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{relations, Relation};
    use crate::types::row_id;

    fn seeded(value: u64) -> (Tables, SeedReport) {
        let mut tables = Tables::new();
        let report = seed(&mut tables, value);
        (tables, report)
    }

    #[test]
    fn same_seed_same_rows() {
        let (a, _) = seeded(42);
        let (b, _) = seeded(42);
        for table in Table::ALL {
            assert_eq!(a.get(*table), b.get(*table), "{table} differs");
        }
    }

    #[test]
    fn different_seed_changes_content_not_shape() {
        let (a, report_a) = seeded(1);
        let (b, report_b) = seeded(2);
        assert_eq!(report_a.rows.len(), report_b.rows.len());
        assert_eq!(a.len(Table::Colleges), b.len(Table::Colleges));
        assert_ne!(
            a.get(Table::ResearchProjects),
            b.get(Table::ResearchProjects)
        );
    }

    #[test]
    fn runtime_tables_stay_empty() {
        let (tables, report) = seeded(42);
        assert_eq!(tables.len(Table::UserSessions), 0);
        assert_eq!(tables.len(Table::ActivityLogs), 0);
        assert_eq!(report.rows.len(), Table::ALL.len() - 2);
        assert_eq!(report.total(), tables.total_rows());
    }

    #[test]
    fn ids_are_sequential() {
        let (tables, _) = seeded(42);
        for table in Table::ALL {
            let ids: Vec<i64> = tables.get(*table).iter().filter_map(row_id).collect();
            let expected: Vec<i64> = (1..=ids.len() as i64).collect();
            assert_eq!(ids, expected, "{table}");
        }
    }

    #[test]
    fn foreign_keys_resolve() {
        let (tables, _) = seeded(7);
        for table in Table::ALL {
            for relation in relations(*table) {
                let Relation::BelongsTo {
                    table: target,
                    foreign_key,
                    ..
                } = relation
                else {
                    continue;
                };
                for row in tables.get(*table) {
                    let id = row.get(*foreign_key).and_then(Value::as_i64);
                    let id = id.unwrap_or_else(|| panic!("{table}.{foreign_key} missing"));
                    assert!(
                        tables.find_by_id(*target, id).is_some(),
                        "{table}.{foreign_key} = {id} dangles"
                    );
                }
            }
        }
    }

    #[test]
    fn lifecycle_tables_carry_updated_at() {
        let (tables, _) = seeded(42);
        for table in Table::ALL.iter().filter(|t| t.has_lifecycle()) {
            for row in tables.get(*table) {
                assert!(row.get("updated_at").is_some_and(Value::is_string), "{table}");
            }
        }
    }

    #[test]
    fn timestamps_are_rfc3339() {
        let (tables, _) = seeded(42);
        for row in tables.get(Table::ResearchProjects) {
            let created = row["created_at"].as_str().unwrap();
            assert!(DateTime::parse_from_rfc3339(created).is_ok());
        }
    }

    #[test]
    fn saved_candidate_pairs_are_unique() {
        let (tables, _) = seeded(42);
        let mut pairs: Vec<_> = tables
            .get(Table::SavedCandidates)
            .iter()
            .map(|row| (row["student_id"].as_i64(), row["partner_id"].as_i64()))
            .collect();
        let total = pairs.len();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), total);
    }
}
