//! Hand-authored lookup tables for the synthetic market and the heuristic scorers.
//!
//! Kept as enum-keyed constant slices so the scoring code never carries literals.
//! Lookups for values missing from a table fall back to the documented default.

use crate::models::profile::{City, CurrencyZone, Education, ExperienceLevel, Industry, Skill};

// ────────────────────────────────────────────────────────────────────────────
// Salary model used by the population generator
// ────────────────────────────────────────────────────────────────────────────

pub const SALARY_FLOOR: f64 = 45_000.0;
pub const SALARY_CEILING: f64 = 350_000.0;
pub const SALARY_NOISE_SD: f64 = 8_000.0;
/// Conversion applied to USD salaries to obtain the CAD-normalized column.
pub const USD_TO_CAD: f64 = 1.35;
/// Probability that a generated record belongs to the Canadian zone.
pub const CANADA_SHARE: f64 = 0.6;

pub fn base_salary(zone: CurrencyZone) -> f64 {
    match zone {
        CurrencyZone::Canada => 55_000.0,
        CurrencyZone::Usa => 60_000.0,
    }
}

const CITY_SALARY_MULTIPLIERS: &[(City, f64)] = &[
    (City::Toronto, 1.2),
    (City::Vancouver, 1.15),
    (City::Montreal, 1.0),
    (City::Ottawa, 1.1),
    (City::Calgary, 1.08),
    (City::Edmonton, 1.05),
    (City::SanFrancisco, 1.8),
    (City::NewYork, 1.6),
    (City::Seattle, 1.4),
    (City::Boston, 1.3),
    (City::LosAngeles, 1.25),
    (City::Austin, 1.2),
    (City::Chicago, 1.15),
    (City::Denver, 1.1),
];

const EXPERIENCE_SALARY_MULTIPLIERS: &[(ExperienceLevel, f64)] = &[
    (ExperienceLevel::Junior, 1.0),
    (ExperienceLevel::Intermediate, 1.4),
    (ExperienceLevel::Senior, 1.8),
    (ExperienceLevel::Principal, 2.5),
    (ExperienceLevel::Director, 3.2),
];

const INDUSTRY_SALARY_MULTIPLIERS: &[(Industry, f64)] = &[
    (Industry::Tech, 1.3),
    (Industry::Finance, 1.25),
    (Industry::Healthcare, 1.1),
    (Industry::Government, 1.05),
    (Industry::Consulting, 1.35),
    (Industry::Retail, 0.9),
];

const EDUCATION_SALARY_MULTIPLIERS: &[(Education, f64)] = &[
    (Education::PhD, 1.2),
    (Education::Master, 1.1),
    (Education::Bachelor, 1.0),
    (Education::Bootcamp, 0.95),
    (Education::Certificate, 0.9),
];

/// Half-open range of years of experience sampled for each level.
const EXPERIENCE_YEARS: &[(ExperienceLevel, f64, f64)] = &[
    (ExperienceLevel::Junior, 0.0, 2.0),
    (ExperienceLevel::Intermediate, 2.0, 5.0),
    (ExperienceLevel::Senior, 5.0, 10.0),
    (ExperienceLevel::Principal, 8.0, 15.0),
    (ExperienceLevel::Director, 10.0, 20.0),
];

pub fn city_multiplier(city: City) -> f64 {
    lookup(CITY_SALARY_MULTIPLIERS, city).unwrap_or(1.0)
}

pub fn experience_multiplier(level: ExperienceLevel) -> f64 {
    lookup(EXPERIENCE_SALARY_MULTIPLIERS, level).unwrap_or(1.0)
}

pub fn industry_multiplier(industry: Industry) -> f64 {
    lookup(INDUSTRY_SALARY_MULTIPLIERS, industry).unwrap_or(1.0)
}

pub fn education_multiplier(education: Education) -> f64 {
    lookup(EDUCATION_SALARY_MULTIPLIERS, education).unwrap_or(1.0)
}

pub fn experience_years_range(level: ExperienceLevel) -> (f64, f64) {
    EXPERIENCE_YEARS
        .iter()
        .find(|(l, _, _)| *l == level)
        .map_or((0.0, 2.0), |(_, lo, hi)| (*lo, *hi))
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic scoring tables
// ────────────────────────────────────────────────────────────────────────────

/// Score used for any city or industry missing from the desirability tables.
pub const DEFAULT_MARKET_SCORE: f64 = 7.0;
/// Score used for an unrecognised education level.
pub const DEFAULT_EDUCATION_SCORE: f64 = 6.0;

const CITY_MARKET_SCORES: &[(City, f64)] = &[
    (City::Toronto, 9.0),
    (City::Vancouver, 8.0),
    (City::Montreal, 7.0),
    (City::Ottawa, 7.0),
    (City::Calgary, 6.0),
    (City::Edmonton, 6.0),
];

const INDUSTRY_MARKET_SCORES: &[(Industry, f64)] = &[
    (Industry::Tech, 9.0),
    (Industry::Finance, 8.0),
    (Industry::Consulting, 8.0),
    (Industry::Healthcare, 7.0),
    (Industry::Government, 6.0),
    (Industry::Retail, 5.0),
];

const EDUCATION_GROWTH_SCORES: &[(Education, f64)] = &[
    (Education::PhD, 10.0),
    (Education::Master, 8.0),
    (Education::Bachelor, 6.0),
    (Education::Bootcamp, 7.0),
    (Education::Certificate, 5.0),
];

pub fn city_market_score(city: Option<City>) -> f64 {
    city.and_then(|c| lookup(CITY_MARKET_SCORES, c))
        .unwrap_or(DEFAULT_MARKET_SCORE)
}

pub fn industry_market_score(industry: Option<Industry>) -> f64 {
    industry
        .and_then(|i| lookup(INDUSTRY_MARKET_SCORES, i))
        .unwrap_or(DEFAULT_MARKET_SCORE)
}

pub fn education_growth_score(education: Option<Education>) -> f64 {
    education
        .and_then(|e| lookup(EDUCATION_GROWTH_SCORES, e))
        .unwrap_or(DEFAULT_EDUCATION_SCORE)
}

// ────────────────────────────────────────────────────────────────────────────
// Skill targets
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct SkillTarget {
    pub skill: Skill,
    pub display_name: &'static str,
    pub target: f64,
    pub priority: &'static str,
}

pub const SKILL_TARGETS: &[SkillTarget] = &[
    SkillTarget {
        skill: Skill::Python,
        display_name: "Python Programming",
        target: 8.0,
        priority: "high",
    },
    SkillTarget {
        skill: Skill::Sql,
        display_name: "SQL & Databases",
        target: 7.0,
        priority: "high",
    },
    SkillTarget {
        skill: Skill::MachineLearning,
        display_name: "Machine Learning",
        target: 6.0,
        priority: "medium",
    },
    SkillTarget {
        skill: Skill::Communication,
        display_name: "Communication",
        target: 8.0,
        priority: "high",
    },
];

// ────────────────────────────────────────────────────────────────────────────
// Career pathways & market flags
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct PathwayStep {
    pub next_level: &'static str,
    pub timeline_months: u32,
    pub requirements: &'static [&'static str],
}

const PATHWAYS: &[(ExperienceLevel, PathwayStep)] = &[
    (
        ExperienceLevel::Junior,
        PathwayStep {
            next_level: "Intermediate",
            timeline_months: 24,
            requirements: &[
                "2+ portfolio projects",
                "Python proficiency",
                "1-2 years experience",
            ],
        },
    ),
    (
        ExperienceLevel::Intermediate,
        PathwayStep {
            next_level: "Senior",
            timeline_months: 36,
            requirements: &[
                "Technical leadership",
                "ML project experience",
                "4+ years experience",
            ],
        },
    ),
    (
        ExperienceLevel::Senior,
        PathwayStep {
            next_level: "Principal",
            timeline_months: 48,
            requirements: &["System design", "Team mentoring", "Business impact"],
        },
    ),
];

/// Used for Principal, Director and unrecognised levels.
pub const FALLBACK_PATHWAY: PathwayStep = PathwayStep {
    next_level: "Senior+",
    timeline_months: 24,
    requirements: &["Continued excellence", "Leadership", "Innovation"],
};

pub fn pathway_for(level: Option<ExperienceLevel>) -> PathwayStep {
    level
        .and_then(|l| PATHWAYS.iter().find(|(k, _)| *k == l))
        .map_or(FALLBACK_PATHWAY, |(_, step)| *step)
}

const HIGH_COMPETITION_CITIES: &[City] = &[
    City::Toronto,
    City::Vancouver,
    City::SanFrancisco,
    City::NewYork,
    City::Seattle,
];

const TECH_HUB_CITIES: &[City] = &[City::SanFrancisco, City::Seattle];

const GROWING_INDUSTRIES: &[Industry] = &[Industry::Tech, Industry::Finance];

pub fn is_high_competition(city: Option<City>) -> bool {
    city.is_some_and(|c| HIGH_COMPETITION_CITIES.contains(&c))
}

pub fn is_tech_hub(city: Option<City>) -> bool {
    city.is_some_and(|c| TECH_HUB_CITIES.contains(&c))
}

pub fn is_growing_industry(industry: Option<Industry>) -> bool {
    industry.is_some_and(|i| GROWING_INDUSTRIES.contains(&i))
}

fn lookup<K: PartialEq + Copy>(table: &[(K, f64)], key: K) -> Option<f64> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_city_has_a_salary_multiplier() {
        for city in City::CANADIAN.into_iter().chain(City::US) {
            assert!(
                CITY_SALARY_MULTIPLIERS.iter().any(|(c, _)| *c == city),
                "missing multiplier for {}",
                city.name()
            );
        }
    }

    #[test]
    fn test_us_cities_use_default_market_score() {
        assert_eq!(city_market_score(Some(City::Austin)), DEFAULT_MARKET_SCORE);
        assert_eq!(city_market_score(None), DEFAULT_MARKET_SCORE);
        assert_eq!(city_market_score(Some(City::Toronto)), 9.0);
    }

    #[test]
    fn test_junior_pathway() {
        let step = pathway_for(Some(ExperienceLevel::Junior));
        assert_eq!(step.next_level, "Intermediate");
        assert_eq!(step.timeline_months, 24);
    }

    #[test]
    fn test_terminal_levels_use_fallback_pathway() {
        assert_eq!(
            pathway_for(Some(ExperienceLevel::Director)).next_level,
            "Senior+"
        );
        assert_eq!(pathway_for(None).next_level, "Senior+");
    }

    #[test]
    fn test_skill_targets_cover_all_skills() {
        for skill in Skill::ALL {
            assert!(SKILL_TARGETS.iter().any(|t| t.skill == skill));
        }
    }
}
