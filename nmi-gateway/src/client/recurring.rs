use super::{ApiResponse, operation_client};
use crate::{
    request::{
        Call,
        recurring::{
            AddCustomSubscription, AddPlan, AddSubscription, DeleteSubscription, EditPlan,
            RecurringPlan, SubscriptionRequest, UpdateSubscription,
        },
    },
    response::RecurringResponse,
    transport::Transport,
};

operation_client! {
    /// Recurring billing operations (`recurring=...`).
    Recurring
}

impl<T: Transport> Recurring<T> {
    /// Creates a plan.
    pub async fn add_plan(&self, call: impl Into<Call<RecurringPlan>>) -> ApiResponse<RecurringResponse> {
        self.dispatcher.execute(call.into().map(AddPlan)).await
    }

    /// Edits a plan.
    pub async fn edit_plan(&self, call: impl Into<Call<RecurringPlan>>) -> ApiResponse<RecurringResponse> {
        self.dispatcher.execute(call.into().map(EditPlan)).await
    }

    /// Subscribes a customer to an existing plan.
    pub async fn add_subscription(
        &self,
        call: impl Into<Call<SubscriptionRequest>>,
    ) -> ApiResponse<RecurringResponse> {
        self.dispatcher.execute(call.into().map(AddSubscription)).await
    }

    /// Subscribes a customer on a custom schedule.
    pub async fn add_custom_subscription(
        &self,
        call: impl Into<Call<SubscriptionRequest>>,
    ) -> ApiResponse<RecurringResponse> {
        self.dispatcher.execute(call.into().map(AddCustomSubscription)).await
    }

    /// Updates a subscription.
    pub async fn update_subscription(
        &self,
        call: impl Into<Call<SubscriptionRequest>>,
    ) -> ApiResponse<RecurringResponse> {
        self.dispatcher.execute(call.into().map(UpdateSubscription)).await
    }

    /// Cancels a subscription.
    pub async fn delete_subscription(
        &self,
        call: impl Into<Call<DeleteSubscription>>,
    ) -> ApiResponse<RecurringResponse> {
        self.dispatcher.execute(call.into()).await
    }
}
