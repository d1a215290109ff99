//! Shifts service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::DateTime;
use mockall::automock;
use tracing::info;
use waybill::{
    shifts::{NewWorkingShift, ShiftClock, WorkingShift},
    time::{format_timestamp, parse_timestamp},
    users::UserId,
    validation::ValidationError,
};

use crate::{
    api::LogisticsApi,
    domain::shifts::errors::ShiftsServiceError,
    storage::{self, CURRENT_SHIFT_START_KEY, KeyValueStore},
};

#[derive(Clone)]
pub struct ApiShiftsService {
    api: Arc<dyn LogisticsApi>,
    store: Arc<dyn KeyValueStore>,
}

impl ApiShiftsService {
    #[must_use]
    pub fn new(api: Arc<dyn LogisticsApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl ShiftsService for ApiShiftsService {
    async fn current(&self) -> Result<ShiftClock, ShiftsServiceError> {
        let started_at =
            storage::get_json::<String>(self.store.as_ref(), CURRENT_SHIFT_START_KEY).await?;

        let started_at = started_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(ShiftClock::resume(started_at))
    }

    async fn start(&self, now: DateTime) -> Result<ShiftClock, ShiftsServiceError> {
        let mut clock = self.current().await?;
        let started_at = clock.start(now)?;

        storage::set_json(
            self.store.as_ref(),
            CURRENT_SHIFT_START_KEY,
            &format_timestamp(started_at),
        )
        .await?;

        info!(%started_at, "shift started");

        Ok(clock)
    }

    async fn finish(
        &self,
        user: UserId,
        now: DateTime,
    ) -> Result<NewWorkingShift, ShiftsServiceError> {
        let mut clock = self.current().await?;

        if clock.started_at().is_none() {
            return Err(ValidationError::ShiftNotStarted.into());
        }

        let worker = self.api.worker_by_user(user).await?;
        let shift = clock.finish(worker.id, now)?;

        self.api.create_working_shift(shift.clone()).await?;
        self.store.remove(CURRENT_SHIFT_START_KEY).await?;

        info!(
            worker = %worker.id,
            start = %shift.start_time,
            end = %shift.end_time,
            "shift recorded"
        );

        Ok(shift)
    }

    async fn history(&self, user: UserId) -> Result<Vec<WorkingShift>, ShiftsServiceError> {
        let worker = self.api.worker_by_user(user).await?;

        let mut shifts: Vec<WorkingShift> = self
            .api
            .list_working_shifts()
            .await?
            .into_iter()
            .filter(|shift| shift.worker_id == worker.id)
            .collect();

        shifts.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        Ok(shifts)
    }
}

#[automock]
#[async_trait]
pub trait ShiftsService: Send + Sync {
    /// The shift open on this client, if any.
    async fn current(&self) -> Result<ShiftClock, ShiftsServiceError>;

    /// Open a shift at `now`. Fails while a shift is already open.
    async fn start(&self, now: DateTime) -> Result<ShiftClock, ShiftsServiceError>;

    /// Close the open shift at `now` and record it for the signed-in worker.
    async fn finish(&self, user: UserId, now: DateTime)
    -> Result<NewWorkingShift, ShiftsServiceError>;

    /// Shifts of the signed-in worker, latest first.
    async fn history(&self, user: UserId) -> Result<Vec<WorkingShift>, ShiftsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;
    use waybill::fleet::WorkerId;

    use super::*;
    use crate::test::{TestContext, helpers::worker};

    #[tokio::test]
    async fn finishing_without_a_start_never_calls_the_backend() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api.expect_worker_by_user().never();
        ctx.api.expect_create_working_shift().never();

        let result = ctx
            .shifts()
            .finish(UserId::new(8), date(2024, 1, 10).at(18, 0, 0, 0))
            .await;

        assert!(matches!(
            result,
            Err(ShiftsServiceError::Validation(ValidationError::ShiftNotStarted))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn shift_start_survives_restarts_and_is_cleared_on_finish() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_worker_by_user()
            .returning(|_| Ok(worker(4, 8, Some(1))));
        ctx.api
            .expect_create_working_shift()
            .times(1)
            .withf(|shift| {
                shift.worker_id == WorkerId::new(4)
                    && shift.start_time == date(2024, 1, 10).at(9, 0, 0, 0)
                    && shift.end_time == date(2024, 1, 10).at(18, 0, 0, 0)
            })
            .returning(|_| Ok(()));

        let store = ctx.store.clone();
        let service = ctx.shifts();

        service.start(date(2024, 1, 10).at(9, 0, 0, 0)).await?;

        assert_eq!(
            store.get(CURRENT_SHIFT_START_KEY).await?.as_deref(),
            Some("\"2024-01-10T09:00:00\"")
        );
        assert_eq!(
            service.current().await?.started_at(),
            Some(date(2024, 1, 10).at(9, 0, 0, 0))
        );

        service
            .finish(UserId::new(8), date(2024, 1, 10).at(18, 0, 0, 0))
            .await?;

        assert_eq!(store.get(CURRENT_SHIFT_START_KEY).await?, None);
        assert_eq!(service.current().await?.started_at(), None);

        Ok(())
    }

    #[tokio::test]
    async fn starting_twice_keeps_the_stored_start() -> TestResult {
        let ctx = TestContext::new();
        let store = ctx.store.clone();
        let service = ctx.shifts();

        service.start(date(2024, 5, 1).at(9, 0, 0, 0)).await?;

        let result = service.start(date(2024, 5, 1).at(15, 0, 0, 0)).await;

        assert!(matches!(
            result,
            Err(ShiftsServiceError::Validation(ValidationError::ShiftAlreadyStarted))
        ));
        assert_eq!(
            store.get(CURRENT_SHIFT_START_KEY).await?.as_deref(),
            Some("\"2024-05-01T09:00:00\"")
        );

        Ok(())
    }

    #[tokio::test]
    async fn history_keeps_the_worker_shifts_latest_first() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_worker_by_user()
            .returning(|_| Ok(worker(4, 8, Some(1))));
        ctx.api.expect_list_working_shifts().returning(|| {
            let shift = |id: i64, worker: i64, day: i8| WorkingShift {
                id: waybill::shifts::WorkingShiftId::new(id),
                worker_id: WorkerId::new(worker),
                start_time: date(2024, 1, day).at(9, 0, 0, 0),
                end_time: None,
                hours_worked: None,
                status: None,
            };

            Ok(vec![shift(1, 4, 1), shift(2, 5, 2), shift(3, 4, 3)])
        });

        let ids: Vec<i64> = ctx
            .shifts()
            .history(UserId::new(8))
            .await?
            .iter()
            .map(|shift| shift.id.get())
            .collect();

        assert_eq!(ids, vec![3, 1]);

        Ok(())
    }
}
