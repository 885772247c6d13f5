//! Static reference tables
//!
//! Read-only game data consumed by the engine and operations: job and
//! course catalogs, property listings, staking plans, loan offers and
//! the fixed USD conversion-rate table. Not a live price feed; rates
//! are deliberately static.
//!
//! CRITICAL: All money values are i64 (cents)

use crate::models::currency::{Cents, CryptoCoin, Currency, FiatCurrency};

/// A job paying a monthly salary (annual / 12)
#[derive(Debug, Clone, Copy)]
pub struct Job {
    pub id: &'static str,
    pub title: &'static str,
    /// Annual salary in cents
    pub annual_salary: Cents,
    /// Course that must be completed before this job can be taken
    pub required_course: Option<&'static str>,
}

/// An education course unlocking jobs
#[derive(Debug, Clone, Copy)]
pub struct Course {
    pub id: &'static str,
    pub title: &'static str,
    /// Tuition in cents, collected as platform revenue
    pub cost: Cents,
    /// Simulated days from enrollment to completion
    pub duration_days: i64,
}

/// A property that can be bought or rented
#[derive(Debug, Clone, Copy)]
pub struct PropertyListing {
    pub id: &'static str,
    pub name: &'static str,
    pub buy_price: Cents,
    /// Annual rent in cents
    pub rent_price: Cents,
    /// Monthly maintenance in cents, owed by owners
    pub maintenance_fee: Cents,
}

/// A staking plan: lock for a fixed simulated duration, earn a fixed
/// fraction of the staked amount
#[derive(Debug, Clone, Copy)]
pub struct StakingPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub duration_days: i64,
    /// Reward as a fraction of the stake, e.g. 0.05
    pub reward: f64,
}

/// A loan product on offer
#[derive(Debug, Clone, Copy)]
pub struct LoanOffer {
    pub id: &'static str,
    pub name: &'static str,
    pub principal: Cents,
    /// Flat rate applied up front, e.g. 0.08
    pub interest_rate: f64,
    pub term_months: u32,
}

const JOBS: &[Job] = &[
    Job { id: "job1", title: "Software Engineer", annual_salary: 12_000_000, required_course: Some("edu3") },
    Job { id: "job2", title: "Graphic Designer", annual_salary: 7_500_000, required_course: Some("edu5") },
    Job { id: "job3", title: "Doctor", annual_salary: 25_000_000, required_course: Some("edu4") },
    Job { id: "job4", title: "Teacher", annual_salary: 6_000_000, required_course: Some("edu1") },
    Job { id: "job5", title: "Marketing Manager", annual_salary: 9_500_000, required_course: Some("edu2") },
    Job { id: "job6", title: "Chef", annual_salary: 8_000_000, required_course: Some("edu1") },
    Job { id: "job7", title: "Accountant", annual_salary: 8_500_000, required_course: Some("edu6") },
    Job { id: "job8", title: "Data Scientist", annual_salary: 15_000_000, required_course: Some("edu3") },
];

const COURSES: &[Course] = &[
    Course { id: "edu1", title: "High School Diploma", cost: 500_000, duration_days: 365 * 4 },
    Course { id: "edu2", title: "Bachelor's in Business", cost: 4_000_000, duration_days: 365 * 4 },
    Course { id: "edu3", title: "Bachelor's in CS", cost: 5_500_000, duration_days: 365 * 4 },
    Course { id: "edu4", title: "Medical Doctorate", cost: 30_000_000, duration_days: 365 * 8 },
    Course { id: "edu5", title: "Graphic Design Certificate", cost: 1_000_000, duration_days: 365 },
    Course { id: "edu6", title: "Accounting Certification (CPA)", cost: 1_500_000, duration_days: 365 * 2 },
];

const PROPERTIES: &[PropertyListing] = &[
    PropertyListing { id: "prop1", name: "Modern Downtown Loft", buy_price: 65_000_000, rent_price: 350_000, maintenance_fee: 55_000 },
    PropertyListing { id: "prop2", name: "Suburban Family Home", buy_price: 45_000_000, rent_price: 280_000, maintenance_fee: 50_000 },
    PropertyListing { id: "prop3", name: "Luxury Beachfront Villa", buy_price: 250_000_000, rent_price: 1_500_000, maintenance_fee: 300_000 },
    PropertyListing { id: "prop4", name: "Cozy Studio Apartment", buy_price: 18_000_000, rent_price: 180_000, maintenance_fee: 30_000 },
    PropertyListing { id: "prop5", name: "Mountain View Cabin", buy_price: 32_000_000, rent_price: 220_000, maintenance_fee: 40_000 },
    PropertyListing { id: "prop6", name: "Chic Urban Condo", buy_price: 78_000_000, rent_price: 420_000, maintenance_fee: 60_000 },
    PropertyListing { id: "prop7", name: "Historic Townhouse", buy_price: 120_000_000, rent_price: 650_000, maintenance_fee: 80_000 },
    PropertyListing { id: "prop8", name: "Desert Oasis", buy_price: 85_000_000, rent_price: 500_000, maintenance_fee: 70_000 },
];

// Lock durations run on the simulated calendar (days), not wall time.
const STAKING_PLANS: &[StakingPlan] = &[
    StakingPlan { id: "plan_1", name: "1 Day - 5% Reward", duration_days: 1, reward: 0.05 },
    StakingPlan { id: "plan_2", name: "2 Days - 10% Reward", duration_days: 2, reward: 0.10 },
    StakingPlan { id: "plan_3", name: "5 Days - 20% Reward", duration_days: 5, reward: 0.20 },
    StakingPlan { id: "plan_4", name: "10 Days - 40% Reward", duration_days: 10, reward: 0.40 },
    StakingPlan { id: "plan_5", name: "20 Days - 60% Reward", duration_days: 20, reward: 0.60 },
    StakingPlan { id: "plan_6", name: "25 Days - 75% Reward", duration_days: 25, reward: 0.75 },
    StakingPlan { id: "plan_7", name: "30 Days - 85% Reward", duration_days: 30, reward: 0.85 },
    StakingPlan { id: "plan_8", name: "45 Days - 100% Reward", duration_days: 45, reward: 1.00 },
];

const LOAN_OFFERS: &[LoanOffer] = &[
    LoanOffer { id: "loan1", name: "Personal Loan", principal: 500_000, interest_rate: 0.10, term_months: 12 },
    LoanOffer { id: "loan2", name: "Car Loan", principal: 2_000_000, interest_rate: 0.08, term_months: 48 },
    LoanOffer { id: "loan3", name: "Mortgage Loan", principal: 25_000_000, interest_rate: 0.05, term_months: 360 },
    LoanOffer { id: "loan4", name: "Student Loan", principal: 5_000_000, interest_rate: 0.06, term_months: 120 },
];

/// All static reference tables, bundled for dependency injection
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    jobs: &'static [Job],
    courses: &'static [Course],
    properties: &'static [PropertyListing],
    staking_plans: &'static [StakingPlan],
    loan_offers: &'static [LoanOffer],
}

impl Catalog {
    /// The built-in game data
    pub fn builtin() -> Self {
        Self {
            jobs: JOBS,
            courses: COURSES,
            properties: PROPERTIES,
            staking_plans: STAKING_PLANS,
            loan_offers: LOAN_OFFERS,
        }
    }

    pub fn jobs(&self) -> &'static [Job] {
        self.jobs
    }

    pub fn courses(&self) -> &'static [Course] {
        self.courses
    }

    pub fn properties(&self) -> &'static [PropertyListing] {
        self.properties
    }

    pub fn staking_plans(&self) -> &'static [StakingPlan] {
        self.staking_plans
    }

    pub fn loan_offers(&self) -> &'static [LoanOffer] {
        self.loan_offers
    }

    pub fn job(&self, id: &str) -> Option<&'static Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn course(&self, id: &str) -> Option<&'static Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn property(&self, id: &str) -> Option<&'static PropertyListing> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn staking_plan(&self, id: &str) -> Option<&'static StakingPlan> {
        self.staking_plans.iter().find(|p| p.id == id)
    }

    pub fn loan_offer(&self, id: &str) -> Option<&'static LoanOffer> {
        self.loan_offers.iter().find(|o| o.id == id)
    }

    /// Static USD price of one whole unit of `currency`
    pub fn usd_price(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Fiat(FiatCurrency::Usd) => 1.0,
            Currency::Fiat(FiatCurrency::Ngn) => 1.0 / 1500.0,
            Currency::Fiat(FiatCurrency::Eur) => 1.08,
            Currency::Crypto(CryptoCoin::Btc) => 65_000.0,
            Currency::Crypto(CryptoCoin::Eth) => 3_500.0,
            Currency::Crypto(CryptoCoin::Ltc) => 80.0,
            Currency::Crypto(CryptoCoin::Xrp) => 0.5,
            Currency::Crypto(CryptoCoin::Doge) => 0.15,
            Currency::Crypto(CryptoCoin::Gmz) => 0.015,
        }
    }

    /// Value of a minor-unit amount of `currency`, in USD cents
    pub fn to_usd_cents(&self, amount: Cents, currency: Currency) -> Cents {
        let whole = amount as f64 / currency.scale() as f64;
        (whole * self.usd_price(currency) * 100.0).round() as Cents
    }

    /// Convert a minor-unit amount between two currencies at the static
    /// rate table
    ///
    /// # Example
    /// ```
    /// use bank_sim_core_rs::catalog::Catalog;
    /// use bank_sim_core_rs::models::currency::{Currency, CryptoCoin, USD};
    ///
    /// let catalog = Catalog::builtin();
    /// // $65,000 buys exactly one BTC at the static rate
    /// let btc = catalog.convert(65_000_00, USD, Currency::Crypto(CryptoCoin::Btc));
    /// assert_eq!(btc, 100_000_000);
    /// ```
    pub fn convert(&self, amount: Cents, from: Currency, to: Currency) -> Cents {
        let whole = amount as f64 / from.scale() as f64;
        let usd = whole * self.usd_price(from);
        (usd / self.usd_price(to) * to.scale() as f64).round() as Cents
    }
}
