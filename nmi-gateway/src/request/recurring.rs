//! Recurring billing requests (`recurring=...`).
//!
//! A schedule is either every `day_frequency` days, or every
//! `month_frequency` months on `day_of_month`. The two groups never mix.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    AccountHolderType, AccountType, Currency, PaymentMethod, SecCode, gateway_operation,
    validate::{self, Schedule},
};
use crate::{error::Result, response::RecurringResponse, wire::CustomFieldMap};

/// A plan definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecurringPlan {
    /// Plan being edited.
    pub current_plan_id: Option<String>,
    /// Plan id.
    pub plan_id: Option<String>,
    /// Display name.
    pub plan_name: Option<String>,
    /// Amount per payment.
    pub plan_amount: Option<Decimal>,
    /// Number of payments; 0 bills until cancelled.
    pub plan_payments: Option<u32>,
    /// Bill every N days.
    pub day_frequency: Option<u32>,
    /// Bill every N months (1-24).
    pub month_frequency: Option<u32>,
    /// Day of month to bill (1-31).
    pub day_of_month: Option<u32>,
}

impl RecurringPlan {
    fn schedule(&self) -> Schedule {
        Schedule {
            day_frequency: self.day_frequency,
            month_frequency: self.month_frequency,
            day_of_month: self.day_of_month,
        }
    }

    fn check_add(&self) -> Result<()> {
        validate::not_accepted("add_plan", &[("current_plan_id", self.current_plan_id.is_some())])?;
        validate::required_opt("plan_id", self.plan_id.as_deref())?;
        validate::required_opt("plan_name", self.plan_name.as_deref())?;
        validate::present("plan_payments", self.plan_payments.as_ref())?;
        validate::positive_amount("plan_amount", self.plan_amount)?;
        self.schedule().require_complete()
    }

    fn check_edit(&self) -> Result<()> {
        validate::required_opt("current_plan_id", self.current_plan_id.as_deref())?;
        validate::non_negative("plan_amount", self.plan_amount)?;
        self.schedule().require_complete_if_any()
    }
}

gateway_operation! {
    /// Create a plan.
    AddPlan(RecurringPlan) -> RecurringResponse {
        name: "add_plan",
        endpoint: Transact,
        discriminant: "recurring" = "add_plan",
        validate: RecurringPlan::check_add,
    }
}

gateway_operation! {
    /// Change an existing plan.
    EditPlan(RecurringPlan) -> RecurringResponse {
        name: "edit_plan",
        endpoint: Transact,
        discriminant: "recurring" = "edit_plan",
        validate: RecurringPlan::check_edit,
    }
}

/// A subscription: who pays, how, and on which schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionRequest {
    /// Subscription being updated.
    pub subscription_id: Option<String>,
    /// Existing plan to subscribe to.
    pub plan_id: Option<String>,
    /// Custom schedule: number of payments; 0 bills until cancelled.
    pub plan_payments: Option<u32>,
    /// Custom schedule: amount per payment.
    pub plan_amount: Option<Decimal>,
    /// Custom schedule: bill every N days.
    pub day_frequency: Option<u32>,
    /// Custom schedule: bill every N months (1-24).
    pub month_frequency: Option<u32>,
    /// Custom schedule: day of month to bill (1-31).
    pub day_of_month: Option<u32>,
    /// First billing date, `YYYYMMDD`.
    pub start_date: Option<String>,

    /// Vault customer to bill instead of inline payment data.
    pub customer_vault_id: Option<String>,
    /// Collect.js payment token.
    pub payment_token: Option<String>,
    /// Payment instrument.
    pub payment: Option<PaymentMethod>,
    /// Card number.
    pub ccnumber: Option<String>,
    /// Card expiry, `MMYY`.
    pub ccexp: Option<String>,
    /// Name on the checking account.
    pub checkname: Option<String>,
    /// Routing number.
    pub checkaba: Option<String>,
    /// Account number.
    pub checkaccount: Option<String>,
    /// ACH account holder type.
    pub account_holder_type: Option<AccountHolderType>,
    /// ACH account type.
    pub account_type: Option<AccountType>,
    /// ACH entry class.
    pub sec_code: Option<SecCode>,
    /// Currency.
    pub currency: Currency,

    /// Order id.
    pub orderid: Option<String>,
    /// Order description.
    pub order_description: Option<String>,
    /// Purchase order number.
    pub ponumber: Option<String>,
    /// Sales tax.
    pub tax: Option<Decimal>,
    /// Shipping amount.
    pub shipping: Option<Decimal>,

    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Address line 1.
    pub address1: Option<String>,
    /// Address line 2.
    pub address2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Fax.
    pub fax: Option<String>,
    /// Email.
    pub email: Option<String>,

    /// Merchant-defined fields.
    #[serde(default)]
    pub custom_fields: CustomFieldMap,
}

impl SubscriptionRequest {
    fn schedule(&self) -> Schedule {
        Schedule {
            day_frequency: self.day_frequency,
            month_frequency: self.month_frequency,
            day_of_month: self.day_of_month,
        }
    }

    fn check_common(&self) -> Result<()> {
        validate::gateway_date("start_date", self.start_date.as_deref())?;
        validate::email("email", self.email.as_deref())
    }

    /// The plan supplies the schedule and amount.
    fn check_existing_plan(&self) -> Result<()> {
        let schedule = self.schedule();
        validate::not_accepted(
            "add_subscription",
            &[
                ("subscription_id", self.subscription_id.is_some()),
                ("plan_payments", self.plan_payments.is_some()),
                ("plan_amount", self.plan_amount.is_some()),
                ("day_frequency", schedule.day_frequency.is_some()),
                ("month_frequency", schedule.month_frequency.is_some()),
                ("day_of_month", schedule.day_of_month.is_some()),
            ],
        )?;
        validate::required_opt("plan_id", self.plan_id.as_deref())?;
        self.check_common()
    }

    fn check_custom(&self) -> Result<()> {
        validate::not_accepted(
            "add_custom_subscription",
            &[("subscription_id", self.subscription_id.is_some()), ("plan_id", self.plan_id.is_some())],
        )?;
        validate::present("plan_payments", self.plan_payments.as_ref())?;
        validate::positive_amount("plan_amount", self.plan_amount)?;
        self.schedule().require_complete()?;
        self.check_common()
    }

    fn check_update(&self) -> Result<()> {
        validate::not_accepted("update_subscription", &[("plan_id", self.plan_id.is_some())])?;
        validate::required_opt("subscription_id", self.subscription_id.as_deref())?;
        self.schedule().require_complete_if_any()?;
        self.check_common()
    }
}

gateway_operation! {
    /// Subscribe to an existing plan.
    AddSubscription(SubscriptionRequest) -> RecurringResponse {
        name: "add_subscription",
        endpoint: Transact,
        discriminant: "recurring" = "add_subscription",
        validate: SubscriptionRequest::check_existing_plan,
    }
}

gateway_operation! {
    /// Subscribe with an inline schedule instead of a plan.
    AddCustomSubscription(SubscriptionRequest) -> RecurringResponse {
        name: "add_custom_subscription",
        endpoint: Transact,
        discriminant: "recurring" = "add_subscription",
        validate: SubscriptionRequest::check_custom,
    }
}

gateway_operation! {
    /// Change an existing subscription.
    UpdateSubscription(SubscriptionRequest) -> RecurringResponse {
        name: "update_subscription",
        endpoint: Transact,
        discriminant: "recurring" = "update_subscription",
        validate: SubscriptionRequest::check_update,
    }
}

/// Cancel a subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteSubscription {
    /// Subscription to cancel.
    pub subscription_id: String,
}

impl DeleteSubscription {
    /// Targets `subscription_id`.
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self { subscription_id: subscription_id.into() }
    }

    fn check(&self) -> Result<()> {
        validate::required("subscription_id", &self.subscription_id)
    }
}

gateway_operation! {
    impl DeleteSubscription => RecurringResponse {
        name: "delete_subscription",
        endpoint: Transact,
        discriminant: ["recurring" = "delete_subscription"],
        validate: DeleteSubscription::check,
    }
}
