//! Insight aggregation: benchmarks a profile against the reference population
//! and turns the raw metrics into recommendations, a pathway and a market summary.

use crate::intelligence::models::{
    CareerPathway, CityAnalysis, IndustryAnalysis, MarketAnalysis, SkillRecommendation,
};
use crate::intelligence::population::{ReferencePopulation, ReferenceRecord};
use crate::intelligence::scoring::round_to;
use crate::intelligence::tables::{
    is_growing_industry, is_high_competition, is_tech_hub, pathway_for, SKILL_TARGETS,
};
use crate::models::profile::{CurrencyZone, ResolvedProfile};

/// Percentile reported when no reference record shares the profile's city and industry.
pub const EMPTY_COHORT_PERCENTILE: f64 = 50.0;

const US_CITY_SALARY_FALLBACK: f64 = 75_000.0;
const CA_CITY_SALARY_FALLBACK: f64 = 65_000.0;
const REMOTE_RATE_FALLBACK: f64 = 65.0;
const INDUSTRY_SALARY_FALLBACK: f64 = 70_000.0;
const HIRING_RATE_FALLBACK: f64 = 75.0;
/// Cities with more reference records than this are reported as high-opportunity.
const OPPORTUNITY_THRESHOLD: usize = 200;
/// A skill is recommended only when it trails its target by more than this.
const RECOMMENDATION_GAP_THRESHOLD: f64 = 1.0;

const SKILL_DEMAND: &[&str] = &["Python", "SQL", "Machine Learning", "Communication"];

/// Share of the city + industry cohort earning strictly less than `salary`, as a percentage.
pub fn salary_percentile(
    population: &ReferencePopulation,
    profile: &ResolvedProfile,
    salary: f64,
) -> f64 {
    let (below, total) = population
        .cohort(&profile.city, &profile.industry)
        .fold((0usize, 0usize), |(below, total), r| {
            (below + usize::from(r.salary_cad < salary), total + 1)
        });

    if total == 0 {
        return EMPTY_COHORT_PERCENTILE;
    }
    round_to(below as f64 / total as f64 * 100.0, 1)
}

/// One entry per skill trailing its target by more than one point, largest gap first.
pub fn skill_recommendations(profile: &ResolvedProfile) -> Vec<SkillRecommendation> {
    let mut recommendations: Vec<SkillRecommendation> = SKILL_TARGETS
        .iter()
        .filter_map(|t| {
            let current = profile.skill(t.skill);
            let gap = t.target - current;
            (gap > RECOMMENDATION_GAP_THRESHOLD).then(|| SkillRecommendation {
                skill: t.display_name.to_string(),
                current_level: current,
                target_level: t.target,
                gap: round_to(gap, 1),
                priority: t.priority.to_string(),
                estimated_improvement_months: ((gap * 2.0).round() as u32).max(1),
            })
        })
        .collect();

    recommendations.sort_by(|a, b| b.gap.total_cmp(&a.gap));
    recommendations
}

pub fn career_pathway(profile: &ResolvedProfile) -> CareerPathway {
    let step = pathway_for(profile.experience_kind());
    CareerPathway {
        current_level: profile.experience_level.clone(),
        next_level: step.next_level.to_string(),
        timeline_months: step.timeline_months,
        requirements: step.requirements.iter().map(|r| r.to_string()).collect(),
    }
}

pub fn market_analysis(population: &ReferencePopulation, profile: &ResolvedProfile) -> MarketAnalysis {
    let city = profile.city_kind();
    let zone = city.map_or(CurrencyZone::Canada, |c| c.zone());
    let city_rows: Vec<&ReferenceRecord> = population.in_city(&profile.city).collect();
    let industry_rows: Vec<&ReferenceRecord> =
        population.in_industry(&profile.industry).collect();

    let avg_salary = match zone {
        CurrencyZone::Usa => mean(&city_rows, |r| r.salary_local),
        CurrencyZone::Canada => mean(&city_rows, |r| r.salary_cad),
    }
    .map(|v| v.round())
    .unwrap_or(match zone {
        CurrencyZone::Usa => US_CITY_SALARY_FALLBACK,
        CurrencyZone::Canada => CA_CITY_SALARY_FALLBACK,
    });

    let remote_work_rate = mean(&city_rows, |r| f64::from(u8::from(r.remote_work_available)))
        .map_or(REMOTE_RATE_FALLBACK, |v| round_to(v * 100.0, 1));

    let city_analysis = CityAnalysis {
        city: profile.city.clone(),
        country: zone.country().to_string(),
        currency: zone.currency().to_string(),
        avg_salary,
        job_opportunities: if city_rows.len() > OPPORTUNITY_THRESHOLD {
            "High"
        } else {
            "Medium"
        }
        .to_string(),
        remote_work_rate,
        competition_level: if is_high_competition(city) {
            "High"
        } else {
            "Medium"
        }
        .to_string(),
        market_context: if is_tech_hub(city) {
            "Tech hub with high salaries"
        } else {
            "Growing tech market"
        }
        .to_string(),
    };

    let industry_analysis = IndustryAnalysis {
        avg_salary: mean(&industry_rows, |r| r.salary_cad)
            .map_or(INDUSTRY_SALARY_FALLBACK, f64::round),
        growth_trend: if is_growing_industry(profile.industry_kind()) {
            "Growing"
        } else {
            "Stable"
        }
        .to_string(),
        skill_demand: SKILL_DEMAND.iter().map(|s| s.to_string()).collect(),
        hiring_rate: mean(&industry_rows, |r| f64::from(u8::from(r.hired)))
            .map_or(HIRING_RATE_FALLBACK, |v| round_to(v * 100.0, 1)),
    };

    let recommendations = vec![
        format!(
            "Target {} {}+ salary range for {}",
            zone.currency(),
            format_thousands(avg_salary),
            profile.city
        ),
        "Focus on high-demand skills for North American market".to_string(),
        "Build a strong portfolio showcasing practical projects".to_string(),
        format!("Network in {} tech community", profile.city),
        "Consider remote opportunities across US/Canada border".to_string(),
    ];

    MarketAnalysis {
        city_analysis,
        industry_analysis,
        recommendations,
    }
}

fn mean(rows: &[&ReferenceRecord], value: impl Fn(&ReferenceRecord) -> f64) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|&r| value(r)).sum::<f64>() / rows.len() as f64)
}

/// Formats a whole amount with comma thousands separators, e.g. `81234` → `81,234`.
fn format_thousands(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
