use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Incoming customer fields for create and update.
///
/// Every field is optional: presence of name/email/spend is enforced at the
/// transport boundary, and update deliberately accepts absent fields (they
/// overwrite, they do not skip).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub annual_spend: Option<Decimal>,
    pub last_purchase_date: Option<NaiveDate>,
}
