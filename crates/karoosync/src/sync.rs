//! Locate, fetch, convert and upload, one workout at a time.

use std::path::PathBuf;
use std::sync::Arc;

use karoosync_client::workout::workout_filename;
use karoosync_client::{
    Authenticator, ClientError, Session, WorkoutFile, WorkoutSource, WorkoutSummary,
    WorkoutUploader,
};

use crate::config::Settings;
use crate::error::{SyncError, SyncResult};
use crate::locate::{SyncWindow, locate};
use crate::zwo::convert;

/// How converted workouts reach the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UploadMode {
    /// POST the converted workout as JSON.
    #[default]
    Inline,
    /// Import the ZWO document as a file upload.
    File,
}

/// Log in to the destination. Runs once per sync, before any workout.
pub async fn authenticate(auth: &dyn Authenticator, settings: &Settings) -> SyncResult<Session> {
    auth.authenticate(&settings.destination_username, &settings.destination_password)
        .await
        .map_err(|e| match e {
            ClientError::Auth(_) | ClientError::Token(_) | ClientError::Decode(_) => {
                SyncError::AuthFailed(e.to_string())
            }
            other => SyncError::RemoteRequestFailed(other),
        })
}

/// Result of syncing one workout.
#[derive(Debug)]
pub struct SyncOutcome {
    pub summary: WorkoutSummary,
    /// Confirmation id from the destination.
    pub result: SyncResult<String>,
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub outcomes: Vec<SyncOutcome>,
}

impl SyncReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

pub struct Syncer {
    source: Arc<dyn WorkoutSource>,
    uploader: Arc<dyn WorkoutUploader>,
    session: Session,
    mode: UploadMode,
    save_dir: Option<PathBuf>,
}

impl Syncer {
    pub fn new(
        source: Arc<dyn WorkoutSource>,
        uploader: Arc<dyn WorkoutUploader>,
        session: Session,
        mode: UploadMode,
    ) -> Self {
        Self {
            source,
            uploader,
            session,
            mode,
            save_dir: None,
        }
    }

    /// Keep a copy of every downloaded document in `dir`.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(dir.into());
        self
    }

    /// Sync every ride in `window`.
    ///
    /// A failing listing aborts the run. After that each workout succeeds or
    /// fails on its own and the rest are still processed.
    pub async fn run(&self, window: SyncWindow) -> SyncResult<SyncReport> {
        let records = self
            .source
            .list_events(window.oldest, window.newest)
            .await?;
        let summaries = locate(&records, window);
        tracing::info!(
            oldest = %window.oldest,
            newest = %window.newest,
            listed = records.len(),
            selected = summaries.len(),
            "located workouts"
        );

        let mut report = SyncReport::default();
        for summary in summaries {
            let result = self.sync_one(&summary).await;
            match &result {
                Ok(id) => tracing::info!(event_id = %summary.id, confirmation = %id, "workout synced"),
                Err(e) => tracing::warn!(event_id = %summary.id, error = %e, "workout failed"),
            }
            report.outcomes.push(SyncOutcome { summary, result });
        }
        Ok(report)
    }

    /// Fetch, convert and upload one workout.
    pub async fn sync_one(&self, summary: &WorkoutSummary) -> SyncResult<String> {
        let document = self.source.download_workout(&summary.id).await?;
        let planned_date = summary.date.format("%Y-%m-%d").to_string();
        let workout = convert(&document, &planned_date)?;
        tracing::debug!(
            event_id = %summary.id,
            name = %workout.name,
            steps = workout.structure.len(),
            "converted workout"
        );

        let filename = workout_filename(&planned_date, &workout.name);
        if let Some(dir) = &self.save_dir {
            tokio::fs::create_dir_all(dir).await?;
            // Event id in the name: same-day rides may share a title.
            let cached = workout_filename(
                &planned_date,
                &format!("{} ({})", workout.name, summary.id),
            );
            let path = dir.join(cached);
            tokio::fs::write(&path, document.as_bytes()).await?;
            tracing::debug!(path = %path.display(), "saved workout document");
        }

        let confirmation = match self.mode {
            UploadMode::Inline => self.uploader.upload_workout(&self.session, &workout).await?,
            UploadMode::File => {
                let file = WorkoutFile {
                    filename,
                    bytes: document.into_bytes(),
                };
                self.uploader
                    .upload_workout_file(&self.session, file)
                    .await?
            }
        };
        Ok(confirmation)
    }
}
