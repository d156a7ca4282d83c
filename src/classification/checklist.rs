//! Per-category compliance checklists.
//!
//! Each [`TaxpayerCategory`] has a fixed to-do list. Progress is the share of
//! that list marked done; ids belonging to other categories are ignored.

use serde::Serialize;

use super::classifier::TaxpayerCategory;

/// One to-do item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Stable id, unique across all categories.
    pub id: &'static str,
    /// What to do.
    pub text: &'static str,
}

const fn item(id: &'static str, text: &'static str) -> ChecklistItem {
    ChecklistItem { id, text }
}

const SALARY_EARNER: &[ChecklistItem] = &[
    item("paye-check", "Check payslip for correct PAYE tax deduction"),
    item(
        "paye-card",
        "Get Tax Clearance Certificate (TCC) from employer annually",
    ),
    item("tin-salary", "Ensure your TIN is registered with your employer"),
];

const SELF_EMPLOYED: &[ChecklistItem] = &[
    item("tin", "Register for Taxpayer Identification Number (TIN)"),
    item("records", "Set up a record-keeping system (Excel/Software)"),
    item(
        "vat-reg",
        "Register for VAT with NRS/SIRS (if turnover > ₦25 million)",
    ),
    item(
        "invoice-system",
        "Create invoices for all services/products sold",
    ),
    item("bank-account", "Separate personal and business bank accounts"),
];

const BUSINESS_OWNER: &[ChecklistItem] = &[
    item("tin-biz", "Register for Taxpayer Identification Number (TIN)"),
    item(
        "cac",
        "Register Business Name with CAC (Corporate Affairs Commission)",
    ),
    item(
        "vat-biz",
        "Register for VAT with NRS/SIRS (if turnover > ₦25 million)",
    ),
    item(
        "bank-biz",
        "Open Corporate Bank Account separate from personal",
    ),
    item("records-biz", "Set up a record-keeping system (Excel/Software)"),
    item("monthly-tracking", "Track income and expenses monthly"),
];

const MIXED_INCOME: &[ChecklistItem] = &[
    item("tin-mixed", "Register for Taxpayer Identification Number (TIN)"),
    item(
        "paye-track",
        "Keep all PAYE slips and WHT credit notes from salary/services",
    ),
    item(
        "separate-sources",
        "Keep records for each income source separately",
    ),
    item("wht-credits", "Collect WHT credit notes from service payments"),
    item(
        "avoid-double",
        "Understand: PAYE already paid should not be double-taxed",
    ),
    item(
        "mixed-vat",
        "Register for VAT if business income exceeds ₦25 million",
    ),
];

const COMPANY_OWNER: &[ChecklistItem] = &[
    item(
        "tin-company",
        "Register Company for Taxpayer Identification Number (TIN)",
    ),
    item(
        "cac-company",
        "Register Company with CAC as a Limited company (LTD)",
    ),
    item(
        "separate-tax",
        "Understand: Company tax (CIT) is separate from your personal tax",
    ),
    item(
        "director-salary",
        "Pay yourself a salary and ensure PAYE is deducted",
    ),
    item("company-vat", "Register Company for VAT (if applicable)"),
    item(
        "company-records",
        "Maintain comprehensive company financial records",
    ),
    item(
        "wht-company",
        "Collect WHT credit notes paid on company expenses",
    ),
    item(
        "director-paye",
        "Director tax (PIT) is separate from company tax (CIT)",
    ),
];

const NON_PROFIT: &[ChecklistItem] = &[
    item(
        "ngo-tin",
        "Register Organisation for Taxpayer Identification Number (TIN)",
    ),
    item(
        "ngo-separate",
        "Keep donations separate from business/commercial income",
    ),
    item(
        "ngo-records",
        "Maintain records of all income sources (donations, grants, services)",
    ),
    item(
        "ngo-vat",
        "Know: Commercial income (sales, training) may trigger VAT threshold",
    ),
    item("ngo-wht", "Collect WHT credit notes on any service income"),
    item(
        "ngo-when-file",
        "Understand: Filing becomes mandatory if commercial income is significant",
    ),
    item(
        "ngo-consult",
        "Consult a professional about your specific tax-exempt status",
    ),
];

/// The to-do list for a category, in display order.
pub fn checklist_items(category: TaxpayerCategory) -> &'static [ChecklistItem] {
    match category {
        TaxpayerCategory::SalaryEarner => SALARY_EARNER,
        TaxpayerCategory::SelfEmployed => SELF_EMPLOYED,
        TaxpayerCategory::BusinessOwner => BUSINESS_OWNER,
        TaxpayerCategory::MixedIncome => MIXED_INCOME,
        TaxpayerCategory::CompanyOwner => COMPANY_OWNER,
        TaxpayerCategory::NonProfit => NON_PROFIT,
    }
}

/// A category's checklist with progress against the completed ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checklist {
    /// The category the list belongs to.
    pub category: TaxpayerCategory,
    /// Every item for the category.
    pub items: Vec<ChecklistItem>,
    /// Ids of the items marked done, in list order.
    pub completed: Vec<&'static str>,
    /// Percentage done, rounded half up.
    pub progress: u8,
}

/// Builds the checklist for `category`, marking the items in `completed`.
pub fn build_checklist<S: AsRef<str>>(
    category: TaxpayerCategory,
    completed: &[S],
) -> Checklist {
    let items = checklist_items(category);
    let done: Vec<&'static str> = items
        .iter()
        .filter(|item| completed.iter().any(|id| id.as_ref() == item.id))
        .map(|item| item.id)
        .collect();

    Checklist {
        category,
        items: items.to_vec(),
        progress: percent(done.len(), items.len()),
        completed: done,
    }
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // done <= total, so the result is at most 100.
    ((done * 200 + total) / (total * 2)) as u8
}
