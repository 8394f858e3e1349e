//! Pipeline orchestrator
//!
//! Sequences the four stages of a run — intent analysis, skeleton
//! planning, per-day detailing, logistics generation — threading each
//! stage's output into the next and assembling the final [`TripPlan`].
//! Execution is strictly sequential: the day loop is a blocking
//! iteration with one model call in flight at a time.

use crate::Result;
use crate::error::Stage;
use crate::llm::ChatClient;
use crate::models::{TripPlan, TripRequest};
use crate::stages::{DayDetailer, IntentAnalyzer, LogisticsGenerator, SkeletonPlanner};
use tracing::{debug, info};

/// Receives progress notifications during a run.
///
/// This is a reporting concern only: observers cannot influence the run,
/// and a failed run discards everything they were shown.
pub trait ProgressObserver {
    /// A stage is about to start
    fn stage_started(&mut self, stage: Stage) {
        let _ = stage;
    }

    /// One day's narrative has been written (`day` of `total`)
    fn day_completed(&mut self, day: u32, total: u32) {
        let _ = (day, total);
    }
}

/// Observer that ignores all notifications
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Run-scoped orchestrator for the four-stage pipeline.
///
/// Each call to [`run`](Self::run) builds a fresh [`TripPlan`]; nothing
/// is shared between runs. On any stage failure the run aborts, partial
/// results are discarded, and the stage-identified error is returned —
/// this is the single point of fatal-failure handling.
pub struct PlannerPipeline<C: ChatClient> {
    chat: C,
}

impl<C: ChatClient> PlannerPipeline<C> {
    /// Create a pipeline over the given chat backend
    pub fn new(chat: C) -> Self {
        Self { chat }
    }

    /// The chat backend this pipeline runs over
    pub fn chat(&self) -> &C {
        &self.chat
    }

    /// Execute one complete run for the given request
    pub async fn run(
        &self,
        request: &TripRequest,
        observer: &mut dyn ProgressObserver,
    ) -> Result<TripPlan> {
        request.validate()?;

        info!(
            "Planning {}-day trip to '{}' ({}, {})",
            request.days, request.destination, request.companions, request.budget
        );

        observer.stage_started(Stage::IntentAnalysis);
        let summary = IntentAnalyzer::analyze(&self.chat, request).await?;

        observer.stage_started(Stage::SkeletonPlanning);
        let mut days =
            SkeletonPlanner::plan(&self.chat, &summary, request.days, &request.destination).await?;

        observer.stage_started(Stage::DayDetailing);
        let profile = request.user_profile();
        let total = days.len() as u32;
        let mut full_report = String::new();
        for day in &mut days {
            debug!("Writing day {}/{}: {}", day.day, total, day.title);
            let content = DayDetailer::detail(&self.chat, day, &profile).await?;
            full_report.push_str(&format!(
                "# Day {}：{}\n{}\n\n",
                day.day,
                day.title,
                content.as_str()
            ));
            day.content = Some(content);
            observer.day_completed(day.day, total);
        }

        observer.stage_started(Stage::LogisticsGeneration);
        let logistics = LogisticsGenerator::generate(
            &self.chat,
            &request.destination,
            &summary,
            &full_report,
        )
        .await?;

        info!("Trip plan complete: {} days", days.len());
        Ok(TripPlan {
            destination: request.destination.clone(),
            summary,
            days,
            logistics,
            full_report,
        })
    }
}
