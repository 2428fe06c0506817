//! Feature encoding shared by training and inference.
//!
//! Both paths go through the same enum codes, so a profile is always encoded
//! exactly like the reference records the models were fitted on. Categorical
//! values outside the supported sets encode as 0, which collides with the
//! first category; this is a known limitation of the encoding.

use crate::intelligence::population::ReferenceRecord;
use crate::models::profile::ResolvedProfile;

pub const FEATURE_COUNT: usize = 11;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "city",
    "industry",
    "experience_level",
    "education",
    "python_skill",
    "sql_skill",
    "ml_skill",
    "communication_skill",
    "portfolio_projects",
    "github_commits",
    "years_experience",
];

pub fn encode_record(record: &ReferenceRecord) -> Vec<f64> {
    vec![
        record.city.code() as f64,
        record.industry.code() as f64,
        record.experience_level.code() as f64,
        record.education.code() as f64,
        record.python_skill,
        record.sql_skill,
        record.ml_skill,
        record.communication_skill,
        record.portfolio_projects as f64,
        record.github_commits as f64,
        record.years_experience,
    ]
}

pub fn encode_profile(profile: &ResolvedProfile) -> Vec<f64> {
    vec![
        profile.city_kind().map_or(0, |c| c.code()) as f64,
        profile.industry_kind().map_or(0, |i| i.code()) as f64,
        profile.experience_kind().map_or(0, |l| l.code()) as f64,
        profile.education_kind().map_or(0, |e| e.code()) as f64,
        profile.python_skill,
        profile.sql_skill,
        profile.ml_skill,
        profile.communication_skill,
        profile.portfolio_projects as f64,
        profile.github_commits as f64,
        profile.years_experience,
    ]
}
