//! Taxpayer status classification.

use serde::Serialize;

use super::profile::{ComplexityIndicator, NgoIncome, ProfileOption, TaxProfile, WorkType};

const PAYE_BY_EMPLOYER: &str = "PAYE (Pay As You Earn) - Your employer handles this.";
const COMPANY_CIT: &str = "CIT (Companies Income Tax) - Paid to Nigeria Revenue Service (NRS).";
const COMPANY_VAT: &str = "VAT (Value Added Tax) - Paid to Nigeria Revenue Service (NRS).";
const DIRECTORS_PIT: &str = "Note: Directors still have personal tax obligations (PIT) - paid to State Internal Revenue Service (SIRS).";
const WHT_CORPORATE: &str = "Withholding Tax (WHT): Any corporate body (other than an individual), government ministry, department or agency (MDA), statutory body, or public authority must deduct WHT on applicable transactions.";
const MIXED_PIT: &str = "PIT (Personal Income Tax) on your private earnings - paid to State Internal Revenue Service (SIRS).";
const MIXED_PAYE: &str = "PAYE on any salary portion - handled by employer, remitted to SIRS.";
const DIRECT_ASSESSMENT: &str =
    "PIT (Personal Income Tax) - Direct Assessment, paid to State Internal Revenue Service (SIRS).";
const VAT_THRESHOLD: &str = "VAT (Value Added Tax) - Register with Nigeria Revenue Service (NRS) if turnover exceeds ₦25 million.";
const STAFF_PAYE: &str =
    "PAYE for Staff - Deduct and remit to State Internal Revenue Service (SIRS).";
const FOREIGN_INCOME: &str =
    "Foreign Income may have tax exemptions if you paid tax abroad (Residency Rule).";

const NGO_READINESS: &str = "Tax Readiness Note: Many donations and grants may be exempt from tax. However, income from services, sales, or commercial activities may be subject to taxation.";
const NGO_COMMERCIAL_ALERT: &str = "Commercial Income Alert: When your NGO earns money from selling goods, providing paid services, or charging fees, that income may be treated as business income and subject to VAT and company income tax.";
const NGO_COMMERCIAL_AUTHORITY: &str =
    "Tax Authority for Commercial Income: Register for VAT and CIT with Nigeria Revenue Service (NRS).";
const NGO_COMMERCIAL_WHT: &str = "Withholding Tax (WHT): If the organisation earns money from selling goods, providing paid services, or charging fees, that income may be treated as business income and can be subject to VAT and company income tax and must deduct WHT on applicable transactions.";
const NGO_EXEMPT_INCOME: &str = "Donation/Membership Income: These sources may qualify for tax-exempt status if your organisation is registered.";
const NGO_CONSULT: &str = "Important: NGO tax treatment depends on your specific registration and activities. Consult with a tax professional about your organisation's status.";

const AUTHORITY_NRS: &str =
    "PRIMARY AUTHORITY: Nigeria Revenue Service (NRS) for all company taxes (CIT, VAT, etc).";
const AUTHORITY_NGO: &str = "AUTHORITY GUIDANCE: NRS for any taxable commercial income/VAT. Check with authorities for exemption status.";
const AUTHORITY_SIRS: &str =
    "PRIMARY AUTHORITY: State Internal Revenue Service (SIRS) for all personal taxes (PIT, PAYE).";
const REGISTRATION_AND_TIN: &str = "Business Registration & TIN: All businesses must be registered with the Corporate Affairs Commission (CAC) and obtain a Tax Identification Number (TIN).";
const RECORD_KEEPING: &str = "Record-Keeping Reminder: Maintaining accurate financial records (invoices, receipts, and expenses) is crucial for tax compliance and for proving eligibility for exemptions or reliefs.";

/// The taxpayer category a profile falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaxpayerCategory {
    /// Employed; tax is withheld by the employer.
    #[serde(rename = "Salary Earner")]
    SalaryEarner,
    /// Working alone, or a business without complexity indicators.
    #[serde(rename = "Self-Employed")]
    SelfEmployed,
    /// A business with staff, premises, regular sales or registration.
    #[serde(rename = "Business Owner")]
    BusinessOwner,
    /// Salary plus private earnings.
    #[serde(rename = "Mixed Income")]
    MixedIncome,
    /// Director of a registered company.
    #[serde(rename = "Company Owner")]
    CompanyOwner,
    /// NGO, charity, cooperative or association.
    #[serde(rename = "Non-Profit Organisation")]
    NonProfit,
}

impl ProfileOption for TaxpayerCategory {
    const ALL: &'static [Self] = &[
        Self::SalaryEarner,
        Self::SelfEmployed,
        Self::BusinessOwner,
        Self::MixedIncome,
        Self::CompanyOwner,
        Self::NonProfit,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::SalaryEarner => "salary-earner",
            Self::SelfEmployed => "self-employed",
            Self::BusinessOwner => "business-owner",
            Self::MixedIncome => "mixed-income",
            Self::CompanyOwner => "company-owner",
            Self::NonProfit => "non-profit",
        }
    }

    /// Display name, identical to the serialized form.
    fn label(self) -> &'static str {
        match self {
            Self::SalaryEarner => "Salary Earner",
            Self::SelfEmployed => "Self-Employed",
            Self::BusinessOwner => "Business Owner",
            Self::MixedIncome => "Mixed Income",
            Self::CompanyOwner => "Company Owner",
            Self::NonProfit => "Non-Profit Organisation",
        }
    }
}

impl std::fmt::Display for TaxpayerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category plus the obligations that follow from it, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// The category the profile falls into.
    pub classification: TaxpayerCategory,
    /// Obligation notes, ending with the record-keeping reminder.
    pub obligations: Vec<String>,
}

/// Determines the category for a profile.
///
/// A small business only counts as a business once it shows at least one
/// complexity indicator; otherwise it is treated as self-employment.
pub fn categorize(profile: &TaxProfile) -> TaxpayerCategory {
    match profile.work_type {
        WorkType::Salary => TaxpayerCategory::SalaryEarner,
        WorkType::Freelance => TaxpayerCategory::SelfEmployed,
        WorkType::Business if profile.complexity.is_empty() => TaxpayerCategory::SelfEmployed,
        WorkType::Business => TaxpayerCategory::BusinessOwner,
        WorkType::Mix => TaxpayerCategory::MixedIncome,
        WorkType::Company => TaxpayerCategory::CompanyOwner,
        WorkType::Ngo => TaxpayerCategory::NonProfit,
    }
}

/// Classifies a profile and lists its tax obligations.
pub fn classify(profile: &TaxProfile) -> ClassificationResult {
    let classification = categorize(profile);
    let mut obligations: Vec<String> = Vec::new();
    let mut push = |line: &str| obligations.push(line.to_string());

    match classification {
        TaxpayerCategory::NonProfit => {
            if !profile.ngo_types.is_empty() {
                push(&format!(
                    "Organisation Type: {}",
                    join_labels(&profile.ngo_types)
                ));
            }
            if !profile.ngo_income.is_empty() {
                push(&format!(
                    "Income Sources: {}",
                    join_labels(&profile.ngo_income)
                ));
            }
            push(NGO_READINESS);
            if profile.ngo_income.iter().any(|income| income.is_commercial()) {
                push(NGO_COMMERCIAL_ALERT);
                push(NGO_COMMERCIAL_AUTHORITY);
                push(NGO_COMMERCIAL_WHT);
            }
            if profile.has_ngo_income(NgoIncome::Donations)
                || profile.has_ngo_income(NgoIncome::Membership)
            {
                push(NGO_EXEMPT_INCOME);
            }
            push(NGO_CONSULT);
            push(WHT_CORPORATE);
        }
        TaxpayerCategory::SalaryEarner => push(PAYE_BY_EMPLOYER),
        TaxpayerCategory::CompanyOwner => {
            push(COMPANY_CIT);
            push(COMPANY_VAT);
            push(DIRECTORS_PIT);
            push(WHT_CORPORATE);
        }
        TaxpayerCategory::MixedIncome => {
            push(MIXED_PIT);
            push(MIXED_PAYE);
        }
        TaxpayerCategory::SelfEmployed | TaxpayerCategory::BusinessOwner => {
            push(DIRECT_ASSESSMENT);
            if profile.has_complexity(ComplexityIndicator::Shop)
                || profile.has_complexity(ComplexityIndicator::Sales)
            {
                push(VAT_THRESHOLD);
            }
            if profile.has_complexity(ComplexityIndicator::Staff) {
                push(STAFF_PAYE);
            }
        }
    }

    if classification != TaxpayerCategory::NonProfit
        && profile
            .income_source
            .is_some_and(|source| source.has_foreign_component())
    {
        push(FOREIGN_INCOME);
    }

    push(match classification {
        TaxpayerCategory::CompanyOwner => AUTHORITY_NRS,
        TaxpayerCategory::NonProfit => AUTHORITY_NGO,
        _ => AUTHORITY_SIRS,
    });

    if profile.work_type.asks_complexity() {
        push(REGISTRATION_AND_TIN);
    }

    push(RECORD_KEEPING);

    ClassificationResult {
        classification,
        obligations,
    }
}

fn join_labels<T: ProfileOption>(options: &[T]) -> String {
    options
        .iter()
        .map(|option| option.label())
        .collect::<Vec<_>>()
        .join(", ")
}
