use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Categorical domains
// ────────────────────────────────────────────────────────────────────────────

/// The two salary zones covered by the reference population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyZone {
    Canada,
    Usa,
}

impl CurrencyZone {
    pub fn country(self) -> &'static str {
        match self {
            CurrencyZone::Canada => "Canada",
            CurrencyZone::Usa => "USA",
        }
    }

    pub fn currency(self) -> &'static str {
        match self {
            CurrencyZone::Canada => "CAD",
            CurrencyZone::Usa => "USD",
        }
    }
}

/// Supported metro areas. Declaration order is the integer code fed to the models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Toronto,
    Vancouver,
    Montreal,
    Ottawa,
    Calgary,
    Edmonton,
    NewYork,
    SanFrancisco,
    Seattle,
    Austin,
    Boston,
    Chicago,
    LosAngeles,
    Denver,
}

impl City {
    pub const CANADIAN: [City; 6] = [
        City::Toronto,
        City::Vancouver,
        City::Montreal,
        City::Ottawa,
        City::Calgary,
        City::Edmonton,
    ];

    pub const US: [City; 8] = [
        City::NewYork,
        City::SanFrancisco,
        City::Seattle,
        City::Austin,
        City::Boston,
        City::Chicago,
        City::LosAngeles,
        City::Denver,
    ];

    pub fn name(self) -> &'static str {
        match self {
            City::Toronto => "Toronto",
            City::Vancouver => "Vancouver",
            City::Montreal => "Montreal",
            City::Ottawa => "Ottawa",
            City::Calgary => "Calgary",
            City::Edmonton => "Edmonton",
            City::NewYork => "New York",
            City::SanFrancisco => "San Francisco",
            City::Seattle => "Seattle",
            City::Austin => "Austin",
            City::Boston => "Boston",
            City::Chicago => "Chicago",
            City::LosAngeles => "Los Angeles",
            City::Denver => "Denver",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::CANADIAN
            .into_iter()
            .chain(Self::US)
            .find(|c| c.name() == name)
    }

    pub fn zone(self) -> CurrencyZone {
        if Self::US.contains(&self) {
            CurrencyZone::Usa
        } else {
            CurrencyZone::Canada
        }
    }

    pub fn code(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Tech,
    Finance,
    Healthcare,
    Government,
    Consulting,
    Retail,
}

impl Industry {
    pub const ALL: [Industry; 6] = [
        Industry::Tech,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Government,
        Industry::Consulting,
        Industry::Retail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Industry::Tech => "Tech",
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Government => "Government",
            Industry::Consulting => "Consulting",
            Industry::Retail => "Retail",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.name() == name)
    }

    pub fn code(self) -> usize {
        self as usize
    }
}

/// Career ladder, ordered from Junior to Director.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    Intermediate,
    Senior,
    Principal,
    Director,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 5] = [
        ExperienceLevel::Junior,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Senior,
        ExperienceLevel::Principal,
        ExperienceLevel::Director,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Principal => "Principal",
            ExperienceLevel::Director => "Director",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }

    pub fn from_code(code: usize) -> Option<Self> {
        Self::ALL.get(code).copied()
    }

    pub fn code(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    Bachelor,
    Master,
    PhD,
    Bootcamp,
    Certificate,
}

impl Education {
    pub const ALL: [Education; 5] = [
        Education::Bachelor,
        Education::Master,
        Education::PhD,
        Education::Bootcamp,
        Education::Certificate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Education::Bachelor => "Bachelor",
            Education::Master => "Master",
            Education::PhD => "PhD",
            Education::Bootcamp => "Bootcamp",
            Education::Certificate => "Certificate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    pub fn code(self) -> usize {
        self as usize
    }
}

/// The four tracked skills, each scored on a 0–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Python,
    Sql,
    MachineLearning,
    Communication,
}

#[cfg(test)]
impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::Python,
        Skill::Sql,
        Skill::MachineLearning,
        Skill::Communication,
    ];
}

// ────────────────────────────────────────────────────────────────────────────
// Caller-supplied profile
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_CITY: &str = "Toronto";
pub const DEFAULT_INDUSTRY: &str = "Tech";
pub const DEFAULT_EXPERIENCE_LEVEL: &str = "Junior";
pub const DEFAULT_EDUCATION: &str = "Bachelor";
pub const DEFAULT_PYTHON_SKILL: f64 = 5.0;
pub const DEFAULT_SQL_SKILL: f64 = 5.0;
pub const DEFAULT_ML_SKILL: f64 = 3.0;
pub const DEFAULT_COMMUNICATION_SKILL: f64 = 6.0;
pub const DEFAULT_PORTFOLIO_PROJECTS: u32 = 2;
pub const DEFAULT_GITHUB_COMMITS: u32 = 50;
pub const DEFAULT_YEARS_EXPERIENCE: f64 = 2.0;

/// Profile as received from a caller. Every field is optional.
///
/// Categorical fields are kept as free strings: values outside the supported
/// sets still flow through lookups (falling back to defaults) instead of
/// being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub city: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<String>,
    pub education: Option<String>,
    pub python_skill: Option<f64>,
    pub sql_skill: Option<f64>,
    pub ml_skill: Option<f64>,
    pub communication_skill: Option<f64>,
    pub portfolio_projects: Option<u32>,
    pub github_commits: Option<u32>,
    pub years_experience: Option<f64>,
}

/// A profile with every default applied and skills clamped into [0, 10].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedProfile {
    pub city: String,
    pub industry: String,
    pub experience_level: String,
    pub education: String,
    pub python_skill: f64,
    pub sql_skill: f64,
    pub ml_skill: f64,
    pub communication_skill: f64,
    pub portfolio_projects: u32,
    pub github_commits: u32,
    pub years_experience: f64,
}

impl Profile {
    pub fn resolve(&self) -> ResolvedProfile {
        ResolvedProfile {
            city: text_or(&self.city, DEFAULT_CITY),
            industry: text_or(&self.industry, DEFAULT_INDUSTRY),
            experience_level: text_or(&self.experience_level, DEFAULT_EXPERIENCE_LEVEL),
            education: text_or(&self.education, DEFAULT_EDUCATION),
            python_skill: skill_or(self.python_skill, DEFAULT_PYTHON_SKILL),
            sql_skill: skill_or(self.sql_skill, DEFAULT_SQL_SKILL),
            ml_skill: skill_or(self.ml_skill, DEFAULT_ML_SKILL),
            communication_skill: skill_or(self.communication_skill, DEFAULT_COMMUNICATION_SKILL),
            portfolio_projects: self
                .portfolio_projects
                .unwrap_or(DEFAULT_PORTFOLIO_PROJECTS),
            github_commits: self.github_commits.unwrap_or(DEFAULT_GITHUB_COMMITS),
            years_experience: match self.years_experience {
                Some(y) if !y.is_nan() => y.max(0.0),
                _ => DEFAULT_YEARS_EXPERIENCE,
            },
        }
    }
}

impl ResolvedProfile {
    pub fn city_kind(&self) -> Option<City> {
        City::from_name(&self.city)
    }

    pub fn industry_kind(&self) -> Option<Industry> {
        Industry::from_name(&self.industry)
    }

    pub fn experience_kind(&self) -> Option<ExperienceLevel> {
        ExperienceLevel::from_name(&self.experience_level)
    }

    pub fn education_kind(&self) -> Option<Education> {
        Education::from_name(&self.education)
    }

    pub fn skill(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Python => self.python_skill,
            Skill::Sql => self.sql_skill,
            Skill::MachineLearning => self.ml_skill,
            Skill::Communication => self.communication_skill,
        }
    }
}

fn text_or(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

/// NaN falls back to the default; everything else is clamped to the 0–10 scale.
fn skill_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v.clamp(0.0, 10.0),
        _ => default,
    }
}
