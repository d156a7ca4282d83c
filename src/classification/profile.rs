//! Taxpayer profile answers.
//!
//! Each question of the status check has a closed set of options, identified
//! on the wire by a short id (e.g. `"freelance"`).

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A closed set of answers to one profile question.
pub trait ProfileOption: Sized + Copy + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// The wire id.
    fn id(self) -> &'static str;

    /// The human-readable description.
    fn label(self) -> &'static str;

    /// Parses a wire id, naming `field` in the error.
    fn parse(field: &str, value: &str) -> EngineResult<Self> {
        let wanted = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::InvalidProfile {
                field: field.to_string(),
                message: format!(
                    "unknown option '{}', expected one of: {}",
                    value,
                    Self::ALL
                        .iter()
                        .map(|option| option.id())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }

    /// Parses a list of wire ids, dropping duplicates and keeping first-seen order.
    fn parse_all<S: AsRef<str>>(field: &str, values: &[S]) -> EngineResult<Vec<Self>>
    where
        Self: PartialEq,
    {
        let mut parsed: Vec<Self> = Vec::with_capacity(values.len());
        for value in values {
            let option = Self::parse(field, value.as_ref())?;
            if !parsed.contains(&option) {
                parsed.push(option);
            }
        }
        Ok(parsed)
    }
}

/// How the taxpayer earns income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    /// Salary from an employer.
    Salary,
    /// Working alone (freelance, gigs, personal services).
    Freelance,
    /// A small business selling goods or services.
    Business,
    /// A mix of the above.
    Mix,
    /// A registered company (LTD).
    Company,
    /// A non-profit, NGO, charity or association.
    Ngo,
}

impl ProfileOption for WorkType {
    const ALL: &'static [Self] = &[
        Self::Salary,
        Self::Freelance,
        Self::Business,
        Self::Mix,
        Self::Company,
        Self::Ngo,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Freelance => "freelance",
            Self::Business => "business",
            Self::Mix => "mix",
            Self::Company => "company",
            Self::Ngo => "ngo",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Salary => "I earn a salary from an employer",
            Self::Freelance => "I work for myself alone (freelance, gigs, personal services)",
            Self::Business => "I run a small business that sells goods or services",
            Self::Mix => "I do a mix of the above",
            Self::Company => "I run a registered company (LTD)",
            Self::Ngo => "I run or manage a non-profit / NGO / charity / association",
        }
    }
}

impl WorkType {
    /// Whether the complexity question applies.
    pub fn asks_complexity(self) -> bool {
        matches!(self, Self::Freelance | Self::Business | Self::Mix)
    }
}

/// Signs that a self-employed activity has grown into a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityIndicator {
    /// Pays staff or helpers.
    Staff,
    /// Has a shop, outlet or POS terminal.
    Shop,
    /// Has regular daily sales.
    Sales,
    /// Has a business name or CAC registration.
    Cac,
}

impl ProfileOption for ComplexityIndicator {
    const ALL: &'static [Self] = &[Self::Staff, Self::Shop, Self::Sales, Self::Cac];

    fn id(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Shop => "shop",
            Self::Sales => "sales",
            Self::Cac => "cac",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Staff => "Staff or helpers",
            Self::Shop => "A shop, outlet, or POS terminal",
            Self::Sales => "Regular daily sales",
            Self::Cac => "Business name or CAC registration",
        }
    }
}

/// Kind of non-profit organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NgoType {
    /// Religious or faith-based organisation.
    Religious,
    /// Charity or foundation.
    Charity,
    /// NGO / non-profit organisation.
    Ngo,
    /// Cooperative society.
    Cooperative,
    /// Trade union or professional association.
    Union,
}

impl ProfileOption for NgoType {
    const ALL: &'static [Self] = &[
        Self::Religious,
        Self::Charity,
        Self::Ngo,
        Self::Cooperative,
        Self::Union,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Religious => "religious",
            Self::Charity => "charity",
            Self::Ngo => "ngo",
            Self::Cooperative => "cooperative",
            Self::Union => "union",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Religious => "Religious or faith-based organisation",
            Self::Charity => "Charity or foundation",
            Self::Ngo => "NGO / non-profit organisation",
            Self::Cooperative => "Cooperative society",
            Self::Union => "Trade union or professional association",
        }
    }
}

/// How a non-profit receives money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NgoIncome {
    /// Donations, grants, tithes or gifts.
    Donations,
    /// Membership dues or subscriptions.
    Membership,
    /// Sale of goods or merchandise.
    Sales,
    /// Paid training, consultancy or events.
    Training,
    /// Rent, licensing or service fees.
    Rent,
}

impl ProfileOption for NgoIncome {
    const ALL: &'static [Self] = &[
        Self::Donations,
        Self::Membership,
        Self::Sales,
        Self::Training,
        Self::Rent,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Donations => "donations",
            Self::Membership => "membership",
            Self::Sales => "sales",
            Self::Training => "training",
            Self::Rent => "rent",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Donations => "Donations, grants, tithes, or gifts",
            Self::Membership => "Membership dues or subscriptions",
            Self::Sales => "Sale of goods or merchandise",
            Self::Training => "Paid training, consultancy, or events",
            Self::Rent => "Rent, licensing, or service fees",
        }
    }
}

impl NgoIncome {
    /// Income that may be treated as business income.
    pub fn is_commercial(self) -> bool {
        matches!(self, Self::Sales | Self::Training | Self::Rent)
    }
}

/// Where income is earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeSource {
    /// Within Nigeria.
    Local,
    /// Outside Nigeria.
    Foreign,
    /// Both.
    Mixed,
}

impl ProfileOption for IncomeSource {
    const ALL: &'static [Self] = &[Self::Local, Self::Foreign, Self::Mixed];

    fn id(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Foreign => "foreign",
            Self::Mixed => "mixed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Local => "Earned within Nigeria",
            Self::Foreign => "Earned from outside Nigeria (Foreign)",
            Self::Mixed => "Mix of Nigerian and foreign earnings",
        }
    }
}

impl IncomeSource {
    /// Whether any income is earned abroad.
    pub fn has_foreign_component(self) -> bool {
        matches!(self, Self::Foreign | Self::Mixed)
    }
}

/// All answers to the status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxProfile {
    /// How income is earned.
    pub work_type: WorkType,
    /// Business complexity signals.
    pub complexity: Vec<ComplexityIndicator>,
    /// Organisation kinds, for non-profits.
    pub ngo_types: Vec<NgoType>,
    /// Income kinds, for non-profits.
    pub ngo_income: Vec<NgoIncome>,
    /// Where income is earned.
    pub income_source: Option<IncomeSource>,
}

impl TaxProfile {
    /// A profile with only the work type answered.
    pub fn new(work_type: WorkType) -> Self {
        Self {
            work_type,
            complexity: Vec::new(),
            ngo_types: Vec::new(),
            ngo_income: Vec::new(),
            income_source: None,
        }
    }

    /// Whether the given complexity indicator was selected.
    pub fn has_complexity(&self, indicator: ComplexityIndicator) -> bool {
        self.complexity.contains(&indicator)
    }

    /// Whether the given non-profit income kind was selected.
    pub fn has_ngo_income(&self, income: NgoIncome) -> bool {
        self.ngo_income.contains(&income)
    }
}
