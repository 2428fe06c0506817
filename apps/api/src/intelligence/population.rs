//! Synthetic reference population: the training corpus and benchmarking cohort.
//!
//! Generated once per engine from an explicit seeded RNG, so two populations
//! built from the same [`PopulationSpec`] are identical record for record.

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, Normal, Poisson};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::intelligence::tables::{
    self, base_salary, CANADA_SHARE, SALARY_CEILING, SALARY_FLOOR, SALARY_NOISE_SD, USD_TO_CAD,
};
use crate::models::profile::{City, CurrencyZone, Education, ExperienceLevel, Industry};

pub const DEFAULT_POPULATION_SIZE: usize = 3000;
pub const DEFAULT_POPULATION_SEED: u64 = 42;

const HIRE_RATE: f64 = 0.75;
const REMOTE_RATE: f64 = 0.7;

#[derive(Debug, Error)]
#[error("invalid {name} distribution: {reason}")]
pub struct PopulationError {
    name: &'static str,
    reason: String,
}

/// How the binary `hired` outcome is generated.
///
/// `Independent` draws it with a fixed rate regardless of the profile, so the
/// job-match classifier can only learn noise. `FeatureDependent` ties the
/// hire probability to skills, portfolio and tenure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HireLabelMode {
    #[default]
    Independent,
    FeatureDependent,
}

impl FromStr for HireLabelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "independent" => Ok(HireLabelMode::Independent),
            "feature_dependent" | "feature-dependent" => Ok(HireLabelMode::FeatureDependent),
            other => Err(format!(
                "unknown hire label mode '{other}' (expected independent or feature_dependent)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationSpec {
    pub size: usize,
    pub seed: u64,
    pub hire_label: HireLabelMode,
}

impl Default for PopulationSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_POPULATION_SIZE,
            seed: DEFAULT_POPULATION_SEED,
            hire_label: HireLabelMode::Independent,
        }
    }
}

/// One synthetic career record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRecord {
    pub city: City,
    pub industry: Industry,
    pub experience_level: ExperienceLevel,
    pub education: Education,
    /// Salary in the record's own currency.
    pub salary_local: f64,
    /// Salary normalized to CAD.
    pub salary_cad: f64,
    pub python_skill: f64,
    pub sql_skill: f64,
    pub ml_skill: f64,
    pub communication_skill: f64,
    pub portfolio_projects: u32,
    pub github_commits: u32,
    pub years_experience: f64,
    pub job_satisfaction: f64,
    pub career_growth_potential: f64,
    pub remote_work_available: bool,
    pub hired: bool,
}

impl ReferenceRecord {
    pub fn zone(&self) -> CurrencyZone {
        self.city.zone()
    }

    pub fn skill_score(&self) -> f64 {
        (self.python_skill + self.sql_skill + self.ml_skill + self.communication_skill) / 4.0
    }

    pub fn portfolio_strength_raw(&self) -> f64 {
        (self.portfolio_projects as f64).ln_1p() + (self.github_commits as f64).ln_1p() / 100.0
    }

    pub fn experience_salary_ratio(&self) -> f64 {
        self.salary_cad / (self.years_experience + 1.0)
    }
}

/// Every distribution the generator draws from, built once per population.
struct Samplers {
    salary_noise: Normal<f64>,
    python: Beta<f64>,
    sql: Beta<f64>,
    ml: Beta<f64>,
    communication: Beta<f64>,
    satisfaction: Beta<f64>,
    growth: Beta<f64>,
    projects: Poisson<f64>,
    commits: Poisson<f64>,
}

impl Samplers {
    fn new() -> Result<Self, PopulationError> {
        Ok(Self {
            salary_noise: Normal::new(0.0, SALARY_NOISE_SD)
                .map_err(|e| invalid("salary noise", e))?,
            python: beta("python skill", 2.0, 5.0)?,
            sql: beta("sql skill", 2.0, 4.0)?,
            ml: beta("ml skill", 1.5, 6.0)?,
            communication: beta("communication skill", 3.0, 3.0)?,
            satisfaction: beta("job satisfaction", 3.0, 2.0)?,
            growth: beta("career growth", 2.0, 3.0)?,
            projects: Poisson::new(3.0).map_err(|e| invalid("portfolio projects", e))?,
            commits: Poisson::new(150.0).map_err(|e| invalid("github commits", e))?,
        })
    }
}

fn beta(name: &'static str, alpha: f64, beta: f64) -> Result<Beta<f64>, PopulationError> {
    Beta::new(alpha, beta).map_err(|e| invalid(name, e))
}

fn invalid(name: &'static str, err: impl std::fmt::Display) -> PopulationError {
    PopulationError {
        name,
        reason: err.to_string(),
    }
}

/// Immutable collection of reference records.
#[derive(Debug, Clone)]
pub struct ReferencePopulation {
    spec: PopulationSpec,
    records: Vec<ReferenceRecord>,
}

impl ReferencePopulation {
    pub fn generate(spec: PopulationSpec) -> Result<Self, PopulationError> {
        let samplers = Samplers::new()?;
        let mut rng = StdRng::seed_from_u64(spec.seed);

        let records: Vec<ReferenceRecord> = (0..spec.size)
            .map(|_| sample_record(&mut rng, &samplers, spec.hire_label))
            .collect();

        let hired = records.iter().filter(|r| r.hired).count();
        let canadian = records
            .iter()
            .filter(|r| r.zone() == CurrencyZone::Canada)
            .count();
        info!(
            "Reference population generated: {} records (seed {}, {:?} hire labels, {} hired, {} Canadian)",
            records.len(),
            spec.seed,
            spec.hire_label,
            hired,
            canadian
        );
        if !records.is_empty() {
            let n = records.len() as f64;
            debug!(
                "Population means: skill score {:.2}, portfolio strength {:.2}, salary per year of experience {:.0}",
                records.iter().map(ReferenceRecord::skill_score).sum::<f64>() / n,
                records.iter().map(ReferenceRecord::portfolio_strength_raw).sum::<f64>() / n,
                records.iter().map(ReferenceRecord::experience_salary_ratio).sum::<f64>() / n,
            );
        }

        Ok(Self { spec, records })
    }

    #[cfg(test)]
    pub fn from_records(records: Vec<ReferenceRecord>) -> Self {
        Self {
            spec: PopulationSpec {
                size: records.len(),
                ..Default::default()
            },
            records,
        }
    }

    pub fn spec(&self) -> PopulationSpec {
        self.spec
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose city name matches exactly. Unknown names match nothing.
    pub fn in_city<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a ReferenceRecord> {
        self.records.iter().filter(move |r| r.city.name() == city)
    }

    pub fn in_industry<'a>(
        &'a self,
        industry: &'a str,
    ) -> impl Iterator<Item = &'a ReferenceRecord> {
        self.records
            .iter()
            .filter(move |r| r.industry.name() == industry)
    }

    /// Records sharing both city and industry.
    pub fn cohort<'a>(
        &'a self,
        city: &'a str,
        industry: &'a str,
    ) -> impl Iterator<Item = &'a ReferenceRecord> {
        self.in_city(city)
            .filter(move |r| r.industry.name() == industry)
    }
}

fn sample_record(rng: &mut StdRng, s: &Samplers, hire_label: HireLabelMode) -> ReferenceRecord {
    let zone = if rng.gen::<f64>() < CANADA_SHARE {
        CurrencyZone::Canada
    } else {
        CurrencyZone::Usa
    };
    let city = match zone {
        CurrencyZone::Canada => City::CANADIAN[rng.gen_range(0..City::CANADIAN.len())],
        CurrencyZone::Usa => City::US[rng.gen_range(0..City::US.len())],
    };
    let industry = Industry::ALL[rng.gen_range(0..Industry::ALL.len())];
    let experience_level = ExperienceLevel::ALL[rng.gen_range(0..ExperienceLevel::ALL.len())];
    let education = Education::ALL[rng.gen_range(0..Education::ALL.len())];

    let salary_local = (base_salary(zone)
        * tables::city_multiplier(city)
        * tables::experience_multiplier(experience_level)
        * tables::industry_multiplier(industry)
        * tables::education_multiplier(education)
        + s.salary_noise.sample(rng))
    .clamp(SALARY_FLOOR, SALARY_CEILING);
    let salary_cad = match zone {
        CurrencyZone::Canada => salary_local,
        CurrencyZone::Usa => (salary_local * USD_TO_CAD).trunc(),
    };

    let python_skill = s.python.sample(rng) * 10.0;
    let sql_skill = s.sql.sample(rng) * 10.0;
    let ml_skill = s.ml.sample(rng) * 10.0;
    let communication_skill = s.communication.sample(rng) * 10.0;

    let portfolio_projects = s.projects.sample(rng) as u32;
    let github_commits = s.commits.sample(rng) as u32;
    let (lo, hi) = tables::experience_years_range(experience_level);
    let years_experience = rng.gen_range(lo..hi);

    let job_satisfaction = s.satisfaction.sample(rng) * 10.0;
    let career_growth_potential = s.growth.sample(rng) * 10.0;
    let remote_work_available = rng.gen_bool(REMOTE_RATE);

    let mut record = ReferenceRecord {
        city,
        industry,
        experience_level,
        education,
        salary_local,
        salary_cad,
        python_skill,
        sql_skill,
        ml_skill,
        communication_skill,
        portfolio_projects,
        github_commits,
        years_experience,
        job_satisfaction,
        career_growth_potential,
        remote_work_available,
        hired: false,
    };

    let hire_probability = match hire_label {
        HireLabelMode::Independent => HIRE_RATE,
        HireLabelMode::FeatureDependent => feature_hire_probability(
            record.skill_score(),
            record.portfolio_projects,
            record.years_experience,
        ),
    };
    record.hired = rng.gen_bool(hire_probability);
    record
}

/// Logistic hire model centred so an average record lands near the 75% base rate.
fn feature_hire_probability(skill_score: f64, projects: u32, years: f64) -> f64 {
    let logit = 1.1
        + 0.6 * (skill_score - 4.0)
        + 0.3 * (projects as f64 - 3.0)
        + 0.15 * (years - 6.0);
    (1.0 / (1.0 + (-logit).exp())).clamp(0.01, 0.99)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_spec(seed: u64) -> PopulationSpec {
        PopulationSpec {
            size: 500,
            seed,
            hire_label: HireLabelMode::Independent,
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = ReferencePopulation::generate(small_spec(42)).unwrap();
        let b = ReferencePopulation::generate(small_spec(42)).unwrap();
        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn test_different_seed_different_population() {
        let a = ReferencePopulation::generate(small_spec(42)).unwrap();
        let b = ReferencePopulation::generate(small_spec(43)).unwrap();
        assert_ne!(a.records(), b.records());
    }

    #[test]
    fn test_default_population_size() {
        let pop = ReferencePopulation::generate(PopulationSpec::default()).unwrap();
        assert_eq!(pop.len(), 3000);
    }

    #[test]
    fn test_record_fields_within_domains() {
        let pop = ReferencePopulation::generate(small_spec(1)).unwrap();
        for r in pop.records() {
            assert!((SALARY_FLOOR..=SALARY_CEILING).contains(&r.salary_local));
            for skill in [r.python_skill, r.sql_skill, r.ml_skill, r.communication_skill] {
                assert!((0.0..=10.0).contains(&skill));
            }
            let (lo, hi) = tables::experience_years_range(r.experience_level);
            assert!(r.years_experience >= lo && r.years_experience < hi);
            match r.zone() {
                CurrencyZone::Canada => assert_eq!(r.salary_cad, r.salary_local),
                CurrencyZone::Usa => {
                    assert_eq!(r.salary_cad, (r.salary_local * USD_TO_CAD).trunc())
                }
            }
        }
    }

    #[test]
    fn test_hire_rate_near_base_rate() {
        let pop = ReferencePopulation::generate(PopulationSpec::default()).unwrap();
        let rate = pop.records().iter().filter(|r| r.hired).count() as f64 / pop.len() as f64;
        assert!((0.70..0.80).contains(&rate), "hire rate was {rate}");
    }

    #[test]
    fn test_both_zones_present() {
        let pop = ReferencePopulation::generate(small_spec(5)).unwrap();
        let canadian = pop
            .records()
            .iter()
            .filter(|r| r.zone() == CurrencyZone::Canada)
            .count();
        assert!(canadian > 0 && canadian < pop.len());
    }

    #[test]
    fn test_feature_dependent_labels_track_skill() {
        assert!(feature_hire_probability(9.0, 6, 10.0) > feature_hire_probability(1.0, 0, 0.5));
    }

    #[test]
    fn test_hire_label_mode_only_changes_hired() {
        let independent = ReferencePopulation::generate(small_spec(42)).unwrap();
        let dependent = ReferencePopulation::generate(PopulationSpec {
            hire_label: HireLabelMode::FeatureDependent,
            ..small_spec(42)
        })
        .unwrap();

        let without_label = |pop: &ReferencePopulation| -> Vec<ReferenceRecord> {
            pop.records()
                .iter()
                .cloned()
                .map(|r| ReferenceRecord { hired: false, ..r })
                .collect()
        };
        assert_eq!(without_label(&independent), without_label(&dependent));
        assert_ne!(independent.records(), dependent.records());
    }

    #[test]
    fn test_cohort_filters_city_and_industry() {
        let pop = ReferencePopulation::generate(small_spec(9)).unwrap();
        assert!(pop
            .cohort("Toronto", "Tech")
            .all(|r| r.city == City::Toronto && r.industry == Industry::Tech));
        assert_eq!(pop.cohort("Atlantis", "Tech").count(), 0);
    }

    #[test]
    fn test_derived_columns() {
        let pop = ReferencePopulation::generate(small_spec(3)).unwrap();
        let r = &pop.records()[0];
        let mean =
            (r.python_skill + r.sql_skill + r.ml_skill + r.communication_skill) / 4.0;
        assert!((r.skill_score() - mean).abs() < 1e-12);
        assert!(r.experience_salary_ratio() <= r.salary_cad);
        assert!(r.portfolio_strength_raw() >= 0.0);
    }

    #[test]
    fn test_hire_label_mode_parsing() {
        assert_eq!(
            "feature_dependent".parse::<HireLabelMode>(),
            Ok(HireLabelMode::FeatureDependent)
        );
        assert_eq!(
            " Independent ".parse::<HireLabelMode>(),
            Ok(HireLabelMode::Independent)
        );
        assert!("random".parse::<HireLabelMode>().is_err());
    }
}
