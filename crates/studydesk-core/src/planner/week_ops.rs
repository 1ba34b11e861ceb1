//! Week, counter and view operations for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    display::{Subjects, WeekSummaries},
    error::{PlannerError, Result},
    models::{ViewSettings, WeekPlan},
    params::{ShowWeek, UpdateMeta, UpdateView},
    store::PlannerStore,
};

impl Planner {
    /// The plan of the selected week as the user sees it: tasks sorted by due
    /// date and position, limited to the selected subjects. Counters always
    /// cover the whole week.
    pub async fn show_week(&self, params: &ShowWeek) -> Result<Option<WeekPlan>> {
        let week_start = self.week_start_for(params.date()?)?;
        let session = self.session(week_start).await?;

        Ok(session.store.week_plan().map(|plan| WeekPlan {
            tasks: session.store.visible_tasks().into_iter().cloned().collect(),
            ..plan.clone()
        }))
    }

    /// The stored plan of the selected week, unfiltered and in insertion
    /// order.
    pub async fn get_week(&self, params: &ShowWeek) -> Result<Option<WeekPlan>> {
        let week_start = self.week_start_for(params.date()?)?;
        let session = self.session(week_start).await?;
        Ok(session.store.week_plan().cloned())
    }

    /// All weeks stored for the user, newest first.
    pub async fn list_weeks(&self) -> Result<WeekSummaries> {
        let user = self.user.clone();
        let plans = self.with_db(move |db| db.list_week_plans(&user)).await?;
        Ok(WeekSummaries(plans))
    }

    /// Sets the caller-maintained counters of a week, creating an empty plan
    /// for it if needed.
    pub async fn update_meta(&self, params: &UpdateMeta) -> Result<WeekPlan> {
        let (date, update) = params.validate()?;
        let week_start = self.week_start_for(date)?;
        let now = self.clock.now().timestamp();

        let mut session = self.session(week_start).await?;
        if session.store.week_plan().is_none() {
            session
                .store
                .set_week_plan(Some(WeekPlan::new(week_start, now)));
        }
        session.store.update_meta(&update);
        session.store.touch(now);

        let Some(plan) = session.store.week_plan().cloned() else {
            return Err(PlannerError::Configuration {
                message: format!("Week plan for {week_start} missing after update"),
            });
        };

        let user = self.user.clone();
        let stored = plan.clone();
        if let Err(e) = self
            .with_db(move |db| db.upsert_week_plan(&user, &stored))
            .await
        {
            session.invalidate();
            return Err(e);
        }
        Ok(plan)
    }

    /// Current view settings.
    pub async fn view_settings(&self) -> Result<ViewSettings> {
        self.load_view().await
    }

    /// Changes and saves the view settings.
    pub async fn update_view(&self, params: &UpdateView) -> Result<ViewSettings> {
        let update = params.validate(self.catalog())?;
        let current = self.load_view().await?;

        let mut store = PlannerStore::new(self.current_week_start()?);
        store.set_view_mode(update.mode.unwrap_or(current.mode));
        store.set_selected_subjects(
            update
                .selected_subjects
                .unwrap_or(current.selected_subjects),
        );
        store.set_show_heatmap(update.show_heatmap.unwrap_or(current.show_heatmap));
        let snapshot = store.snapshot().without_plan();

        let state = self.state.clone();
        let saved = snapshot.clone();
        task::spawn_blocking(move || state.save(&saved))
            .await
            .map_err(PlannerError::join)??;

        // Cached weeks reload their view on next lock
        self.registry.bump_view_generation();

        Ok(ViewSettings {
            mode: snapshot.view_mode,
            selected_subjects: snapshot.selected_subjects,
            show_heatmap: snapshot.show_heatmap,
        })
    }

    /// The subject catalog.
    pub fn subjects(&self) -> Subjects {
        Subjects(self.catalog().iter().cloned().collect())
    }
}
