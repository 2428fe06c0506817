//! Heuristic scorers. Each takes a resolved profile (skills already clamped to
//! [0, 10]) and returns an unrounded score; rounding happens at assembly time.

use crate::intelligence::tables::{
    city_market_score, education_growth_score, industry_market_score, SKILL_TARGETS,
};
use crate::models::profile::ResolvedProfile;

/// 10 minus the mean shortfall against the skill targets, floored at 0.
pub fn skill_gap_score(profile: &ResolvedProfile) -> f64 {
    let total: f64 = SKILL_TARGETS
        .iter()
        .map(|t| (t.target - profile.skill(t.skill)).max(0.0))
        .sum();
    let mean_gap = total / SKILL_TARGETS.len() as f64;
    (10.0 - mean_gap).max(0.0)
}

/// Mean of city and industry desirability.
pub fn job_market_score(profile: &ResolvedProfile) -> f64 {
    let city = city_market_score(profile.city_kind());
    let industry = industry_market_score(profile.industry_kind());
    (city + industry) / 2.0
}

/// 40% education, 30% portfolio (2 points per project, capped at 10),
/// 30% tenure (one point per year, capped at 10).
pub fn career_growth_index(profile: &ResolvedProfile) -> f64 {
    let education = education_growth_score(profile.education_kind());
    let portfolio = (profile.portfolio_projects as f64 * 2.0).min(10.0);
    let experience = profile.years_experience.min(10.0);
    education * 0.4 + portfolio * 0.3 + experience * 0.3
}

/// Mean of project score (2.5 per project) and commit score (1 per 20 commits), each capped at 10.
pub fn portfolio_strength(profile: &ResolvedProfile) -> f64 {
    let projects = (profile.portfolio_projects as f64 * 2.5).min(10.0);
    let commits = (profile.github_commits as f64 / 20.0).min(10.0);
    (projects + commits) / 2.0
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Profile;

    fn resolve(profile: Profile) -> ResolvedProfile {
        profile.resolve()
    }

    #[test]
    fn test_toronto_tech_skill_gap_is_9_25() {
        let profile = resolve(Profile {
            city: Some("Toronto".to_string()),
            industry: Some("Tech".to_string()),
            python_skill: Some(7.0),
            sql_skill: Some(6.5),
            ml_skill: Some(5.5),
            communication_skill: Some(7.0),
            portfolio_projects: Some(3),
            years_experience: Some(3.0),
            ..Default::default()
        });
        // Shortfalls 1, 0.5, 0.5, 1 → mean 0.75.
        assert!((skill_gap_score(&profile) - 9.25).abs() < 1e-12);
    }

    #[test]
    fn test_skill_gap_monotone_in_each_skill() {
        let levels = [0.0, 1.5, 3.0, 5.5, 6.0, 7.0, 8.0, 9.5, 10.0, 12.0];
        for skill in 0..4 {
            let mut previous = f64::MIN;
            for level in levels {
                let mut profile = Profile {
                    python_skill: Some(4.0),
                    sql_skill: Some(4.0),
                    ml_skill: Some(4.0),
                    communication_skill: Some(4.0),
                    ..Default::default()
                };
                match skill {
                    0 => profile.python_skill = Some(level),
                    1 => profile.sql_skill = Some(level),
                    2 => profile.ml_skill = Some(level),
                    _ => profile.communication_skill = Some(level),
                }
                let score = skill_gap_score(&resolve(profile));
                assert!(score >= previous, "skill {skill} at {level}: {score} < {previous}");
                previous = score;
            }
        }
    }

    #[test]
    fn test_skill_gap_bounds() {
        let worst = resolve(Profile {
            python_skill: Some(0.0),
            sql_skill: Some(0.0),
            ml_skill: Some(0.0),
            communication_skill: Some(0.0),
            ..Default::default()
        });
        let best = resolve(Profile {
            python_skill: Some(10.0),
            sql_skill: Some(10.0),
            ml_skill: Some(10.0),
            communication_skill: Some(10.0),
            ..Default::default()
        });
        // Mean shortfall of all-zero skills is (8+7+6+8)/4 = 7.25.
        assert!((skill_gap_score(&worst) - 2.75).abs() < 1e-12);
        assert_eq!(skill_gap_score(&best), 10.0);
    }

    #[test]
    fn test_market_score_defaults_for_unlisted() {
        let toronto_tech = resolve(Profile::default());
        assert_eq!(job_market_score(&toronto_tech), 9.0);

        let unknown = resolve(Profile {
            city: Some("Denver".to_string()),
            industry: Some("Mining".to_string()),
            ..Default::default()
        });
        assert_eq!(job_market_score(&unknown), 7.0);
    }

    #[test]
    fn test_growth_index_saturates() {
        let profile = resolve(Profile {
            education: Some("PhD".to_string()),
            portfolio_projects: Some(50),
            years_experience: Some(40.0),
            ..Default::default()
        });
        assert!((career_growth_index(&profile) - 10.0).abs() < 1e-12);

        let default = resolve(Profile::default());
        // 6*0.4 + 4*0.3 + 2*0.3
        assert!((career_growth_index(&default) - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_portfolio_strength_default_and_cap() {
        let default = resolve(Profile::default());
        // (min(10, 5) + min(10, 2.5)) / 2
        assert_eq!(portfolio_strength(&default), 3.75);

        let prolific = resolve(Profile {
            portfolio_projects: Some(100),
            github_commits: Some(100_000),
            ..Default::default()
        });
        assert_eq!(portfolio_strength(&prolific), 10.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(72.449, 1), 72.4);
        assert_eq!(round_to(81234.6, 0), 81235.0);
    }
}
