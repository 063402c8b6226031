use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer row. `name` and `email` are stored trimmed and lower-cased by the
/// service layer; both are nullable because presence is a transport-boundary
/// concern. The loyalty tier is not a column, see [`tier_for`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub annual_spend: Option<Decimal>,
    pub last_purchase_date: Option<NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Loyalty tier as of `today`. Recomputed on every read, never persisted.
    pub fn tier(&self, today: NaiveDate) -> Tier {
        tier_for(self.annual_spend, self.last_purchase_date, today)
    }
}

/// Loyalty tier. Exactly three values; there is no Bronze.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Platinum,
    Gold,
    Silver,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Platinum => "Platinum",
            Tier::Gold => "Gold",
            Tier::Silver => "Silver",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PLATINUM_SPEND_FLOOR: i64 = 10_000;
const GOLD_SPEND_FLOOR: i64 = 1_000;

/// Derive the loyalty tier from spend and purchase recency, first match wins:
/// - spend >= 10000 and a purchase within the last 6 months -> Platinum
/// - 1000 <= spend < 10000 and a purchase within the last 12 months -> Gold
/// - anything else (including missing spend or purchase date) -> Silver
///
/// High spend with a stale purchase date falls all the way to Silver; the
/// Gold branch only applies below the Platinum spend floor.
pub fn tier_for(
    annual_spend: Option<Decimal>,
    last_purchase_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Tier {
    let Some(spend) = annual_spend else {
        return Tier::Silver;
    };
    if spend >= Decimal::from(PLATINUM_SPEND_FLOOR) {
        if purchased_within(last_purchase_date, today, Months::new(6)) {
            return Tier::Platinum;
        }
    } else if spend >= Decimal::from(GOLD_SPEND_FLOOR) {
        if purchased_within(last_purchase_date, today, Months::new(12)) {
            return Tier::Gold;
        }
    }
    Tier::Silver
}

fn purchased_within(last: Option<NaiveDate>, today: NaiveDate, window: Months) -> bool {
    // Strictly after the cutoff; a purchase exactly on it does not count
    match (last, today.checked_sub_months(window)) {
        (Some(purchased), Some(cutoff)) => purchased > cutoff,
        _ => false,
    }
}
